//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time, so
//! the file at the repository root is the single source of default values.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    search: SearchDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    algorithm: String,
    difficulty: String,
    pruning: bool,
    simulations: u32,
    exploration: f64,
    backprop: String,
    playout: String,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    game: String,
    games: u32,
    seed: u64,
    ai_player: String,
    self_play: bool,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Search
pub fn algorithm() -> &'static str {
    &DEFAULTS.search.algorithm
}
pub fn difficulty() -> &'static str {
    &DEFAULTS.search.difficulty
}
pub fn pruning() -> bool {
    DEFAULTS.search.pruning
}
pub fn simulations() -> u32 {
    DEFAULTS.search.simulations
}
pub fn exploration() -> f64 {
    DEFAULTS.search.exploration
}
pub fn backprop() -> &'static str {
    &DEFAULTS.search.backprop
}
pub fn playout() -> &'static str {
    &DEFAULTS.search.playout
}

// Arena
pub fn game() -> &'static str {
    &DEFAULTS.arena.game
}
pub fn games() -> u32 {
    DEFAULTS.arena.games
}
pub fn seed() -> u64 {
    DEFAULTS.arena.seed
}
pub fn ai_player() -> &'static str {
    &DEFAULTS.arena.ai_player
}
pub fn self_play() -> bool {
    DEFAULTS.arena.self_play
}
