#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FightSystemId {
    Movement,
    Timers,
    HitResolution,
    Pickups,
    Termination,
}

impl FightSystemId {
    #[cfg(test)]
    fn name(self) -> &'static str {
        match self {
            Self::Movement => "movement",
            Self::Timers => "timers",
            Self::HitResolution => "hit_resolution",
            Self::Pickups => "pickups",
            Self::Termination => "termination",
        }
    }
}

/// Systems run in this order every tick. Termination runs last so the tick
/// that reduces a fighter to zero health is also the tick the match ends.
const FIGHT_SYSTEM_ORDER: [FightSystemId; 5] = [
    FightSystemId::Movement,
    FightSystemId::Timers,
    FightSystemId::HitResolution,
    FightSystemId::Pickups,
    FightSystemId::Termination,
];

impl MatchState {
    /// Advances the match by one tick. Once the outcome is set this is a
    /// whole-match no-op, so terminal state is frozen for observers.
    fn step(&mut self, input: &FightInput) {
        if self.outcome.is_some() {
            return;
        }
        for system in FIGHT_SYSTEM_ORDER {
            match system {
                FightSystemId::Movement => self.run_movement(input),
                FightSystemId::Timers => self.run_timers(input),
                FightSystemId::HitResolution => self.run_hit_resolution(),
                FightSystemId::Pickups => self.run_pickups(),
                FightSystemId::Termination => self.run_termination(),
            }
        }
        self.tick = self.tick.saturating_add(1);
        self.events.finish_tick_rollover();
    }

    fn run_movement(&mut self, input: &FightInput) {
        for id in FIGHTER_IDS {
            let commands = input.commands(id);
            let fighter = self.fighter_mut(id);
            if fighter.is_defeated() {
                continue;
            }

            let dir = match (commands.left, commands.right) {
                (true, false) => -1.0,
                (false, true) => 1.0,
                _ => 0.0,
            };
            fighter.velocity.x = dir * BASE_MOVE_SPEED;
            if dir < 0.0 {
                fighter.facing = Facing::Left;
            } else if dir > 0.0 {
                fighter.facing = Facing::Right;
            }

            let grounded = fighter.is_grounded();
            if commands.jump && grounded {
                fighter.velocity.y = JUMP_IMPULSE;
                self.events.emit(FightEvent::Jumped { fighter: id });
            } else if !grounded {
                fighter.velocity.y += GRAVITY_PER_TICK;
            }

            let fighter = self.fighter_mut(id);
            fighter.position.x += fighter.velocity.x;
            fighter.position.y += fighter.velocity.y;

            fighter.position.x = fighter.position.x.clamp(0.0, ARENA_WIDTH - FIGHTER_WIDTH);
            if fighter.position.y >= FLOOR_Y - FIGHTER_HEIGHT {
                fighter.position.y = FLOOR_Y - FIGHTER_HEIGHT;
                fighter.velocity.y = 0.0;
            }
        }
    }

    /// Countdowns decrement before a fresh attack press is honored, so an
    /// armed attack stays hitbox-active for exactly ATTACK_DURATION_TICKS.
    fn run_timers(&mut self, input: &FightInput) {
        for id in FIGHTER_IDS {
            let commands = input.commands(id);
            let fighter = self.fighter_mut(id);

            if fighter.attack_ticks_remaining > 0 {
                fighter.attack_ticks_remaining -= 1;
            }
            if fighter.combo_window_remaining > 0 {
                fighter.combo_window_remaining -= 1;
                if fighter.combo_window_remaining == 0 {
                    fighter.combo_count = 0;
                }
            }
            if fighter.strength_boost_remaining > 0 {
                fighter.strength_boost_remaining -= 1;
                if fighter.strength_boost_remaining == 0 {
                    fighter.strength_boost = 0;
                }
            }

            if commands.attack && !fighter.is_attacking() && !fighter.is_defeated() {
                fighter.attack_ticks_remaining = ATTACK_DURATION_TICKS;
                fighter.swing_landed = false;
                self.events.emit(FightEvent::AttackStarted { fighter: id });
            }
        }
    }

    /// Both pair directions are tested against the same pre-application
    /// state, so a mutual trade on one tick damages both fighters.
    fn run_hit_resolution(&mut self) {
        let mut hits: Vec<FighterId> = Vec::new();
        for attacker_id in FIGHTER_IDS {
            let attacker = self.fighter(attacker_id);
            let defender = self.fighter(attacker_id.opponent());
            if attacker.is_attacking()
                && !attacker.swing_landed
                && !defender.is_defeated()
                && attacker.attack_rect().overlaps(&defender.body_rect())
            {
                hits.push(attacker_id);
            }
        }

        for attacker_id in hits {
            let attacker = self.fighter_mut(attacker_id);
            let damage = BASE_ATTACK_DAMAGE + attacker.strength_boost;
            attacker.swing_landed = true;
            attacker.combo_count = attacker.combo_count.saturating_add(1);
            attacker.combo_window_remaining = COMBO_WINDOW_TICKS;
            let combo = attacker.combo_count;
            self.peak_combo = self.peak_combo.max(combo);

            let defender = self.fighter_mut(attacker_id.opponent());
            defender.health = defender.health.saturating_sub(damage);

            self.events.emit(FightEvent::HitLanded {
                attacker: attacker_id,
                damage,
                combo,
            });
        }
    }

    fn run_pickups(&mut self) {
        for pickup in &mut self.pickups {
            pickup.lifetime_remaining = pickup.lifetime_remaining.saturating_sub(1);
        }
        self.pickups.retain(|pickup| pickup.lifetime_remaining > 0);

        // Claims resolve in fighter order, so fighter one wins a contested
        // pickup both fighters overlap on the same tick.
        for id in FIGHTER_IDS {
            if self.fighter(id).is_defeated() {
                continue;
            }
            let body = self.fighter(id).body_rect();
            let mut index = 0;
            while index < self.pickups.len() {
                if self.pickups[index].rect().overlaps(&body) {
                    let pickup = self.pickups.remove(index);
                    self.apply_pickup(id, pickup.kind);
                    self.events.emit(FightEvent::PickupClaimed {
                        fighter: id,
                        kind: pickup.kind,
                    });
                } else {
                    index += 1;
                }
            }
        }

        if self.pickups.len() < PICKUP_CAP && self.rng.gen::<f64>() < PICKUP_SPAWN_CHANCE {
            let kind = if self.rng.gen_bool(0.5) {
                PickupKind::HealthRestore
            } else {
                PickupKind::StrengthBoost
            };
            let x = self.rng.gen_range(0.0..=ARENA_WIDTH - PICKUP_SIZE);
            let pickup = Pickup {
                id: self.pickup_ids.allocate(),
                kind,
                position: Vec2 {
                    x,
                    y: FLOOR_Y - PICKUP_SIZE,
                },
                lifetime_remaining: PICKUP_LIFETIME_TICKS,
            };
            let id = pickup.id;
            self.pickups.push(pickup);
            self.events.emit(FightEvent::PickupSpawned { id, kind });
        }
    }

    fn apply_pickup(&mut self, id: FighterId, kind: PickupKind) {
        let fighter = self.fighter_mut(id);
        match kind {
            PickupKind::HealthRestore => {
                fighter.health = (fighter.health + HEALTH_RESTORE_AMOUNT).min(MAX_HEALTH);
            }
            PickupKind::StrengthBoost => {
                // Re-pickup resets the expiry rather than stacking.
                fighter.strength_boost = STRENGTH_BOOST_AMOUNT;
                fighter.strength_boost_remaining = BOOST_DURATION_TICKS;
            }
        }
    }

    fn run_termination(&mut self) {
        let one_down = self.fighter(FighterId::One).is_defeated();
        let two_down = self.fighter(FighterId::Two).is_defeated();
        if !one_down && !two_down {
            return;
        }
        // Double KO resolves to fighter one.
        let winner = if two_down {
            FighterId::One
        } else {
            FighterId::Two
        };
        self.outcome = Some(MatchOutcome {
            winner,
            ending_tick: self.tick,
        });
        self.events.emit(FightEvent::MatchEnded { winner });
    }
}
