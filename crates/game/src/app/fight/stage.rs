const BACKDROP_COLOR: Color = [24, 26, 34, 255];
const FLOOR_COLOR: Color = [60, 56, 48, 255];
const FIGHTER_ONE_COLOR: Color = [90, 160, 255, 255];
const FIGHTER_TWO_COLOR: Color = [255, 110, 90, 255];
const ATTACK_BOX_COLOR: Color = [255, 235, 120, 255];
const HEALTH_RESTORE_COLOR: Color = [90, 220, 120, 255];
const STRENGTH_BOOST_COLOR: Color = [220, 120, 240, 255];
const HEALTH_BAR_BACK_COLOR: Color = [40, 40, 44, 255];
const HEALTH_BAR_FILL_COLOR: Color = [70, 200, 90, 255];
const COMBO_PIP_COLOR: Color = [255, 200, 70, 255];
const WINNER_BANNER_COLOR: Color = [240, 240, 240, 255];

const HEALTH_BAR_WIDTH: f32 = 300.0;
const HEALTH_BAR_HEIGHT: f32 = 14.0;
const HEALTH_BAR_MARGIN: f32 = 20.0;
const COMBO_PIP_SIZE: f32 = 8.0;
const COMBO_PIP_GAP: f32 = 4.0;
const COMBO_PIP_MAX: u32 = 10;

fn cue_for_event(event: FightEvent) -> Option<Cue> {
    match event {
        FightEvent::Jumped { .. } => Some(Cue::Jump),
        FightEvent::AttackStarted { .. } => Some(Cue::Swing),
        FightEvent::HitLanded { .. } => Some(Cue::Impact),
        FightEvent::PickupClaimed { .. } => Some(Cue::Pickup),
        FightEvent::MatchEnded { .. } => Some(Cue::Fanfare),
        FightEvent::PickupSpawned { .. } => None,
    }
}

fn fighter_commands_from_snapshot(input: &InputSnapshot, id: FighterId) -> FighterCommands {
    match id {
        FighterId::One => FighterCommands {
            left: input.is_down(InputAction::P1Left),
            right: input.is_down(InputAction::P1Right),
            jump: input.is_down(InputAction::P1Jump),
            attack: input.is_down(InputAction::P1Attack),
        },
        FighterId::Two => FighterCommands {
            left: input.is_down(InputAction::P2Left),
            right: input.is_down(InputAction::P2Right),
            jump: input.is_down(InputAction::P2Jump),
            attack: input.is_down(InputAction::P2Attack),
        },
    }
}

fn unix_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// The playable fight. Each load derives a fresh per-match seed from the
/// base seed so rematches differ but a whole session replays from one seed.
pub(crate) struct FightStage {
    base_seed: u64,
    matches_started: u64,
    state: MatchState,
    leaderboard: LeaderboardStore,
    cues: Box<dyn CueSink>,
    recorded_result: bool,
}

impl FightStage {
    pub(crate) fn new(base_seed: u64, leaderboard: LeaderboardStore, cues: Box<dyn CueSink>) -> Self {
        Self {
            base_seed,
            matches_started: 0,
            state: MatchState::new(base_seed),
            leaderboard,
            cues,
            recorded_result: false,
        }
    }

    fn route_cues(&mut self) {
        for event in self.state.events().last_tick_events() {
            if let Some(cue) = cue_for_event(*event) {
                self.cues.play(cue);
            }
        }
    }

    fn record_result_once(&mut self) {
        if self.recorded_result {
            return;
        }
        let Some(outcome) = self.state.outcome() else {
            return;
        };
        self.recorded_result = true;
        let record = MatchRecord {
            winner: outcome.winner.as_token().to_string(),
            timestamp_ms: unix_timestamp_ms(),
            duration_ticks: outcome.ending_tick,
            peak_combo: self.state.peak_combo(),
        };
        match self.leaderboard.append(record) {
            Ok(()) => info!(
                winner = outcome.winner.as_token(),
                duration_ticks = outcome.ending_tick,
                "match_recorded"
            ),
            // A failed append never takes down the match loop.
            Err(error) => warn!(
                error = %error,
                path = %self.leaderboard.path().display(),
                "leaderboard_append_failed"
            ),
        }
    }

    fn draw_fighter(&self, draw: &mut DrawList, id: FighterId, color: Color) {
        let fighter = self.state.fighter(id);
        if fighter.is_attacking() {
            draw.push_rect(fighter.attack_rect(), ATTACK_BOX_COLOR);
        }
        draw.push_rect(fighter.body_rect(), color);
    }

    fn draw_health_bar(&self, draw: &mut DrawList, id: FighterId) {
        let fighter = self.state.fighter(id);
        let x = match id {
            FighterId::One => HEALTH_BAR_MARGIN,
            FighterId::Two => ARENA_WIDTH - HEALTH_BAR_MARGIN - HEALTH_BAR_WIDTH,
        };
        draw.push_rect(
            Rect::new(x, HEALTH_BAR_MARGIN, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT),
            HEALTH_BAR_BACK_COLOR,
        );
        let fill = HEALTH_BAR_WIDTH * fighter.health as f32 / MAX_HEALTH as f32;
        if fill > 0.0 {
            // Fighter two's bar drains toward the screen edge.
            let fill_x = match id {
                FighterId::One => x,
                FighterId::Two => x + HEALTH_BAR_WIDTH - fill,
            };
            draw.push_rect(
                Rect::new(fill_x, HEALTH_BAR_MARGIN, fill, HEALTH_BAR_HEIGHT),
                HEALTH_BAR_FILL_COLOR,
            );
        }
        let pips = fighter.combo_count.min(COMBO_PIP_MAX);
        for pip in 0..pips {
            let offset = pip as f32 * (COMBO_PIP_SIZE + COMBO_PIP_GAP);
            let pip_x = match id {
                FighterId::One => x + offset,
                FighterId::Two => x + HEALTH_BAR_WIDTH - COMBO_PIP_SIZE - offset,
            };
            draw.push_rect(
                Rect::new(
                    pip_x,
                    HEALTH_BAR_MARGIN + HEALTH_BAR_HEIGHT + COMBO_PIP_GAP,
                    COMBO_PIP_SIZE,
                    COMBO_PIP_SIZE,
                ),
                COMBO_PIP_COLOR,
            );
        }
    }
}

impl Stage for FightStage {
    fn load(&mut self) {
        let seed = self.base_seed.wrapping_add(self.matches_started);
        self.matches_started += 1;
        self.state = MatchState::new(seed);
        self.recorded_result = false;
        info!(seed, match_number = self.matches_started, "fight_started");
    }

    fn update(&mut self, input: &InputSnapshot) -> StageCommand {
        let fight_input = FightInput::default()
            .with_commands(
                FighterId::One,
                fighter_commands_from_snapshot(input, FighterId::One),
            )
            .with_commands(
                FighterId::Two,
                fighter_commands_from_snapshot(input, FighterId::Two),
            );
        let was_terminal = self.state.outcome().is_some();
        self.state.step(&fight_input);
        // Terminal steps are no-ops that keep the last tick's events, so
        // cues only route while the match is still advancing.
        if !was_terminal {
            let counts = self.state.events().last_tick_counts();
            if counts.total > 0 {
                debug!(
                    total = counts.total,
                    jumped = counts.jumped,
                    attacks = counts.attack_started,
                    hits = counts.hit_landed,
                    spawns = counts.pickup_spawned,
                    claims = counts.pickup_claimed,
                    ended = counts.match_ended,
                    "fight_events"
                );
            }
            self.route_cues();
            self.record_result_once();
        }

        if self.state.outcome().is_some() && input.confirm_pressed() {
            return StageCommand::SwitchTo(StageKey::Menu);
        }
        StageCommand::None
    }

    fn draw(&self, draw: &mut DrawList) {
        draw.push_clear(BACKDROP_COLOR);
        draw.push_rect(
            Rect::new(0.0, FLOOR_Y, ARENA_WIDTH, ARENA_HEIGHT - FLOOR_Y),
            FLOOR_COLOR,
        );
        for pickup in self.state.pickups() {
            let color = match pickup.kind {
                PickupKind::HealthRestore => HEALTH_RESTORE_COLOR,
                PickupKind::StrengthBoost => STRENGTH_BOOST_COLOR,
            };
            draw.push_rect(pickup.rect(), color);
        }
        self.draw_fighter(draw, FighterId::One, FIGHTER_ONE_COLOR);
        self.draw_fighter(draw, FighterId::Two, FIGHTER_TWO_COLOR);
        self.draw_health_bar(draw, FighterId::One);
        self.draw_health_bar(draw, FighterId::Two);

        if let Some(outcome) = self.state.outcome() {
            // Banner leans toward the winner's side of the screen.
            let banner_x = match outcome.winner {
                FighterId::One => ARENA_WIDTH * 0.25 - 100.0,
                FighterId::Two => ARENA_WIDTH * 0.75 - 100.0,
            };
            draw.push_rect(Rect::new(banner_x, 80.0, 200.0, 40.0), WINNER_BANNER_COLOR);
        }
    }

    fn unload(&mut self) {
        info!(tick = self.state.tick(), "fight_unloaded");
    }

    fn debug_title(&self) -> Option<String> {
        let one = self.state.fighter(FighterId::One);
        let two = self.state.fighter(FighterId::Two);
        Some(format!(
            "tick {} | p1 hp {} | p2 hp {}",
            self.state.tick(),
            one.health,
            two.health
        ))
    }
}
