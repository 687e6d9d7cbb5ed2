use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use engine::{
    Color, DrawList, InputAction, InputSnapshot, Rect, Stage, StageCommand, StageKey, Vec2,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::cues::{Cue, CueSink};

const ARENA_WIDTH: f32 = 800.0;
const ARENA_HEIGHT: f32 = 450.0;
const FLOOR_Y: f32 = 400.0;
const FIGHTER_WIDTH: f32 = 50.0;
const FIGHTER_HEIGHT: f32 = 100.0;
const SPAWN_X_ONE: f32 = 100.0;
const SPAWN_X_TWO: f32 = 650.0;
const BASE_MOVE_SPEED: f32 = 3.0;
const JUMP_IMPULSE: f32 = -12.0;
const GRAVITY_PER_TICK: f32 = 0.8;
const MAX_HEALTH: u32 = 100;
const ATTACK_DURATION_TICKS: u32 = 15;
const COMBO_WINDOW_TICKS: u32 = 120;
const BASE_ATTACK_DAMAGE: u32 = 5;
const ATTACK_BOX_WIDTH: f32 = 40.0;
const ATTACK_BOX_HEIGHT: f32 = 30.0;
const ATTACK_BOX_TOP_OFFSET: f32 = 30.0;
const PICKUP_SIZE: f32 = 20.0;
const PICKUP_CAP: usize = 2;
const PICKUP_LIFETIME_TICKS: u32 = 600;
const PICKUP_SPAWN_CHANCE: f64 = 0.005;
const HEALTH_RESTORE_AMOUNT: u32 = 25;
const STRENGTH_BOOST_AMOUNT: u32 = 5;
const BOOST_DURATION_TICKS: u32 = 300;
const LEADERBOARD_FILE: &str = "leaderboard.json";
const DATA_DIR_ENV_VAR: &str = "STICKDUEL_DATA_DIR";

include!("types.rs");
include!("systems.rs");
include!("leaderboard.rs");
include!("stage.rs");

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
