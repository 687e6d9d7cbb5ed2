#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum FighterId {
    One,
    Two,
}

const FIGHTER_IDS: [FighterId; 2] = [FighterId::One, FighterId::Two];

impl FighterId {
    fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    fn as_token(self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Two => "two",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Facing {
    Left,
    Right,
}

/// Held-key state for one fighter, sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FighterCommands {
    left: bool,
    right: bool,
    jump: bool,
    attack: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FightInput {
    commands: [FighterCommands; 2],
}

impl FightInput {
    fn commands(&self, id: FighterId) -> FighterCommands {
        self.commands[id.index()]
    }

    fn with_commands(mut self, id: FighterId, commands: FighterCommands) -> Self {
        self.commands[id.index()] = commands;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Fighter {
    position: Vec2,
    velocity: Vec2,
    facing: Facing,
    health: u32,
    attack_ticks_remaining: u32,
    swing_landed: bool,
    combo_count: u32,
    combo_window_remaining: u32,
    strength_boost: u32,
    strength_boost_remaining: u32,
}

impl Fighter {
    fn spawn(x: f32, facing: Facing) -> Self {
        Self {
            position: Vec2 {
                x,
                y: FLOOR_Y - FIGHTER_HEIGHT,
            },
            velocity: Vec2::default(),
            facing,
            health: MAX_HEALTH,
            attack_ticks_remaining: 0,
            swing_landed: false,
            combo_count: 0,
            combo_window_remaining: 0,
            strength_boost: 0,
            strength_boost_remaining: 0,
        }
    }

    fn is_attacking(&self) -> bool {
        self.attack_ticks_remaining > 0
    }

    fn is_defeated(&self) -> bool {
        self.health == 0
    }

    fn is_grounded(&self) -> bool {
        self.position.y >= FLOOR_Y - FIGHTER_HEIGHT
    }

    fn body_rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, FIGHTER_WIDTH, FIGHTER_HEIGHT)
    }

    /// Fixed-size box extending forward from the leading edge in the facing
    /// direction, vertically aligned with the torso.
    fn attack_rect(&self) -> Rect {
        let x = match self.facing {
            Facing::Right => self.position.x + FIGHTER_WIDTH,
            Facing::Left => self.position.x - ATTACK_BOX_WIDTH,
        };
        Rect::new(
            x,
            self.position.y + ATTACK_BOX_TOP_OFFSET,
            ATTACK_BOX_WIDTH,
            ATTACK_BOX_HEIGHT,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PickupId(u64);

#[derive(Debug, Default)]
struct PickupIdAllocator {
    next: u64,
}

impl PickupIdAllocator {
    fn allocate(&mut self) -> PickupId {
        let id = PickupId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PickupKind {
    HealthRestore,
    StrengthBoost,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pickup {
    id: PickupId,
    kind: PickupKind,
    position: Vec2,
    lifetime_remaining: u32,
}

impl Pickup {
    fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, PICKUP_SIZE, PICKUP_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FightEvent {
    Jumped {
        fighter: FighterId,
    },
    AttackStarted {
        fighter: FighterId,
    },
    HitLanded {
        attacker: FighterId,
        damage: u32,
        combo: u32,
    },
    PickupSpawned {
        id: PickupId,
        kind: PickupKind,
    },
    PickupClaimed {
        fighter: FighterId,
        kind: PickupKind,
    },
    MatchEnded {
        winner: FighterId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FightEventKind {
    Jumped,
    AttackStarted,
    HitLanded,
    PickupSpawned,
    PickupClaimed,
    MatchEnded,
}

impl FightEvent {
    fn kind(self) -> FightEventKind {
        match self {
            Self::Jumped { .. } => FightEventKind::Jumped,
            Self::AttackStarted { .. } => FightEventKind::AttackStarted,
            Self::HitLanded { .. } => FightEventKind::HitLanded,
            Self::PickupSpawned { .. } => FightEventKind::PickupSpawned,
            Self::PickupClaimed { .. } => FightEventKind::PickupClaimed,
            Self::MatchEnded { .. } => FightEventKind::MatchEnded,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FightEventCounts {
    total: u32,
    jumped: u32,
    attack_started: u32,
    hit_landed: u32,
    pickup_spawned: u32,
    pickup_claimed: u32,
    match_ended: u32,
}

impl FightEventCounts {
    fn record(&mut self, kind: FightEventKind) {
        self.total = self.total.saturating_add(1);
        match kind {
            FightEventKind::Jumped => self.jumped = self.jumped.saturating_add(1),
            FightEventKind::AttackStarted => {
                self.attack_started = self.attack_started.saturating_add(1)
            }
            FightEventKind::HitLanded => self.hit_landed = self.hit_landed.saturating_add(1),
            FightEventKind::PickupSpawned => {
                self.pickup_spawned = self.pickup_spawned.saturating_add(1)
            }
            FightEventKind::PickupClaimed => {
                self.pickup_claimed = self.pickup_claimed.saturating_add(1)
            }
            FightEventKind::MatchEnded => self.match_ended = self.match_ended.saturating_add(1),
        }
    }
}

#[derive(Debug, Default)]
struct FightEventBus {
    current_tick_events: Vec<FightEvent>,
    last_tick_events: Vec<FightEvent>,
    last_tick_counts: FightEventCounts,
}

impl FightEventBus {
    fn emit(&mut self, event: FightEvent) {
        self.current_tick_events.push(event);
    }

    fn finish_tick_rollover(&mut self) {
        let mut counts = FightEventCounts::default();
        for event in &self.current_tick_events {
            counts.record(event.kind());
        }
        self.last_tick_counts = counts;
        self.last_tick_events.clear();
        std::mem::swap(&mut self.last_tick_events, &mut self.current_tick_events);
    }

    fn last_tick_events(&self) -> &[FightEvent] {
        &self.last_tick_events
    }

    fn last_tick_counts(&self) -> FightEventCounts {
        self.last_tick_counts
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MatchOutcome {
    winner: FighterId,
    ending_tick: u64,
}

/// Complete deterministic fight state. All randomness flows through the
/// owned seeded RNG, so identical seeds and command scripts replay
/// identically.
struct MatchState {
    tick: u64,
    fighters: [Fighter; 2],
    pickups: Vec<Pickup>,
    pickup_ids: PickupIdAllocator,
    rng: StdRng,
    events: FightEventBus,
    outcome: Option<MatchOutcome>,
    peak_combo: u32,
}

impl MatchState {
    fn new(seed: u64) -> Self {
        Self {
            tick: 0,
            fighters: [
                Fighter::spawn(SPAWN_X_ONE, Facing::Right),
                Fighter::spawn(SPAWN_X_TWO, Facing::Left),
            ],
            pickups: Vec::new(),
            pickup_ids: PickupIdAllocator::default(),
            rng: StdRng::seed_from_u64(seed),
            events: FightEventBus::default(),
            outcome: None,
            peak_combo: 0,
        }
    }

    fn fighter(&self, id: FighterId) -> &Fighter {
        &self.fighters[id.index()]
    }

    fn fighter_mut(&mut self, id: FighterId) -> &mut Fighter {
        &mut self.fighters[id.index()]
    }

    fn tick(&self) -> u64 {
        self.tick
    }

    fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    fn events(&self) -> &FightEventBus {
        &self.events
    }

    fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    fn peak_combo(&self) -> u32 {
        self.peak_combo
    }
}
