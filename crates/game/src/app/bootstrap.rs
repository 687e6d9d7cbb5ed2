use engine::{LoopConfig, Stage};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::cues::LogCueSink;
use super::fight::{FightStage, LeaderboardStore};
use super::menu::MenuStage;

const SEED_ENV_VAR: &str = "STICKDUEL_SEED";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) menu: Box<dyn Stage>,
    pub(crate) fight: Box<dyn Stage>,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Stick Duel Startup ===");

    let seed = resolve_seed_from_env();
    info!(seed, "match_seed_resolved");

    let fight = FightStage::new(seed, LeaderboardStore::from_env(), Box::new(LogCueSink));
    AppWiring {
        config: LoopConfig::default(),
        menu: Box::new(MenuStage),
        fight: Box::new(fight),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn resolve_seed_from_env() -> u64 {
    match std::env::var(SEED_ENV_VAR) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(seed) => seed,
            Err(_) => {
                warn!(raw = %raw, "seed_env_var_invalid");
                rand::random::<u64>()
            }
        },
        Err(_) => rand::random::<u64>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wiring_uses_default_loop_config() {
        let config = LoopConfig::default();
        assert_eq!(config.target_tps, 60);
        assert_eq!(config.window_title, "Stick Duel");
    }
}
