//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.
//! Enumerated settings stay as strings here; the arena parses them into
//! engine types and reports unknown values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_algorithm() -> String {
    defaults::algorithm().into()
}
fn d_difficulty() -> String {
    defaults::difficulty().into()
}
fn d_pruning() -> bool {
    defaults::pruning()
}
fn d_simulations() -> u32 {
    defaults::simulations()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_backprop() -> String {
    defaults::backprop().into()
}
fn d_playout() -> String {
    defaults::playout().into()
}
fn d_game() -> String {
    defaults::game().into()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_ai_player() -> String {
    defaults::ai_player().into()
}
fn d_self_play() -> bool {
    defaults::self_play()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Search engine selection and tuning
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// "minimax" or "mcts"
    #[serde(default = "d_algorithm")]
    pub algorithm: String,
    /// Minimax depth ceiling by name
    #[serde(default = "d_difficulty")]
    pub difficulty: String,
    /// Alpha-beta pruning for minimax
    #[serde(default = "d_pruning")]
    pub pruning: bool,
    /// MCTS simulation budget per move
    #[serde(default = "d_simulations")]
    pub simulations: u32,
    /// UCT exploration constant
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    #[serde(default = "d_backprop")]
    pub backprop: String,
    #[serde(default = "d_playout")]
    pub playout: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: defaults::algorithm().into(),
            difficulty: defaults::difficulty().into(),
            pruning: defaults::pruning(),
            simulations: defaults::simulations(),
            exploration: defaults::exploration(),
            backprop: defaults::backprop().into(),
            playout: defaults::playout().into(),
        }
    }
}

/// Match runner configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    /// "tictactoe" or "connect4"
    #[serde(default = "d_game")]
    pub game: String,
    /// Number of games to play
    #[serde(default = "d_games")]
    pub games: u32,
    /// Seed for the engines and the random opponent
    #[serde(default = "d_seed")]
    pub seed: u64,
    /// Side played by the AI ("a" or "b")
    #[serde(default = "d_ai_player")]
    pub ai_player: String,
    /// Let the AI play both sides
    #[serde(default = "d_self_play")]
    pub self_play: bool,
    /// Where to write the JSON summary (None = don't write)
    #[serde(default)]
    pub report_path: Option<String>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            game: defaults::game().into(),
            games: defaults::games(),
            seed: defaults::seed(),
            ai_player: defaults::ai_player().into(),
            self_play: defaults::self_play(),
            report_path: None,
        }
    }
}
