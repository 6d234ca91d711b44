//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from a crate directory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by GAMEAI_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("GAMEAI_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from GAMEAI_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "GAMEAI_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
    // Optional string field
    ($config:expr, $section:ident . $field:ident, $key:expr, optional) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = Some(v);
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: GAMEAI_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "GAMEAI_COMMON_LOG_LEVEL");

    // Search
    env_override!(config, search.algorithm, "GAMEAI_SEARCH_ALGORITHM");
    env_override!(config, search.difficulty, "GAMEAI_SEARCH_DIFFICULTY");
    env_override!(config, search.pruning, "GAMEAI_SEARCH_PRUNING", parse);
    env_override!(
        config,
        search.simulations,
        "GAMEAI_SEARCH_SIMULATIONS",
        parse
    );
    env_override!(
        config,
        search.exploration,
        "GAMEAI_SEARCH_EXPLORATION",
        parse
    );
    env_override!(config, search.backprop, "GAMEAI_SEARCH_BACKPROP");
    env_override!(config, search.playout, "GAMEAI_SEARCH_PLAYOUT");

    // Arena
    env_override!(config, arena.game, "GAMEAI_ARENA_GAME");
    env_override!(config, arena.games, "GAMEAI_ARENA_GAMES", parse);
    env_override!(config, arena.seed, "GAMEAI_ARENA_SEED", parse);
    env_override!(config, arena.ai_player, "GAMEAI_ARENA_AI_PLAYER");
    env_override!(config, arena.self_play, "GAMEAI_ARENA_SELF_PLAY", parse);
    env_override!(
        config,
        arena.report_path,
        "GAMEAI_ARENA_REPORT_PATH",
        optional
    );

    config
}
