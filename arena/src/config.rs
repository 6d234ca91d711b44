//! Configuration for the match runner
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use engine_config::{load_config, CentralConfig, SearchConfig};
use mcts::PlayoutPolicy;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

use crate::policy::{parse_player, AiConfig};

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_game() -> String {
    CENTRAL_CONFIG.arena.game.clone()
}

fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.arena.seed
}

fn default_ai_player() -> String {
    CENTRAL_CONFIG.arena.ai_player.clone()
}

fn default_self_play() -> bool {
    CENTRAL_CONFIG.arena.self_play
}

fn default_report_path() -> String {
    CENTRAL_CONFIG.arena.report_path.clone().unwrap_or_default()
}

fn default_algorithm() -> String {
    CENTRAL_CONFIG.search.algorithm.clone()
}

fn default_difficulty() -> String {
    CENTRAL_CONFIG.search.difficulty.clone()
}

fn default_pruning() -> bool {
    CENTRAL_CONFIG.search.pruning
}

fn default_simulations() -> u32 {
    CENTRAL_CONFIG.search.simulations
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.search.exploration
}

fn default_backprop() -> String {
    CENTRAL_CONFIG.search.backprop.clone()
}

fn default_playout() -> String {
    CENTRAL_CONFIG.search.playout.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

/// Which board the match is played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    TicTacToe,
    Connect4,
}

impl GameKind {
    /// Playout policy used when the setting is "auto".
    pub fn default_playout(self) -> PlayoutPolicy {
        match self {
            Self::TicTacToe => PlayoutPolicy::GreedyWin,
            Self::Connect4 => PlayoutPolicy::Random,
        }
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "tictactoe" | "ttt" => Ok(Self::TicTacToe),
            "connect4" | "connectfour" => Ok(Self::Connect4),
            other => Err(format!(
                "unknown game '{other}' (expected 'tictactoe' or 'connect4')"
            )),
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TicTacToe => write!(f, "tictactoe"),
            Self::Connect4 => write!(f, "connect4"),
        }
    }
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "arena")]
#[command(about = "Play the minimax and MCTS engines against a random opponent or themselves")]
#[command(
    long_about = "Plays a series of Tic-Tac-Toe or Connect-Four games with the AI on one
side (or both), records the cost of every AI move, and prints the aggregate
statistics as JSON.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Game to play (tictactoe, connect4)
    #[arg(long, default_value_t = default_game())]
    pub game: String,

    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Seed for the engines and the random opponent
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Side played by the AI (a moves first, b second)
    #[arg(long, default_value_t = default_ai_player())]
    pub ai_player: String,

    /// Let the AI play both sides
    #[arg(long, default_value_t = default_self_play(), action = ArgAction::Set)]
    pub self_play: bool,

    /// Search algorithm (minimax, mcts)
    #[arg(long, default_value_t = default_algorithm())]
    pub algorithm: String,

    /// Minimax difficulty (easy, medium, hard)
    #[arg(long, default_value_t = default_difficulty())]
    pub difficulty: String,

    /// Explicit minimax depth, overriding the difficulty
    #[arg(long)]
    pub depth: Option<u32>,

    /// Alpha-beta pruning for minimax
    #[arg(long, default_value_t = default_pruning(), action = ArgAction::Set)]
    pub pruning: bool,

    /// Number of MCTS simulations per move
    #[arg(long, default_value_t = default_simulations())]
    pub simulations: u32,

    /// UCT exploration constant
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// MCTS backpropagation mode (absolute, alternating)
    #[arg(long, default_value_t = default_backprop())]
    pub backprop: String,

    /// MCTS playout policy (random, greedy_win, auto)
    #[arg(long, default_value_t = default_playout())]
    pub playout: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Write the JSON summary here (empty to skip)
    #[arg(long, default_value_t = default_report_path())]
    pub report_path: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        self.game_kind().map_err(|e| anyhow!(e))?;

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        self.ai_config()?;
        Ok(())
    }

    pub fn game_kind(&self) -> Result<GameKind, String> {
        self.game.parse()
    }

    /// The search settings these flags describe, for the configured game.
    pub fn ai_config(&self) -> Result<AiConfig> {
        let ai_player = parse_player(&self.ai_player).map_err(|e| anyhow!(e))?;
        let search = SearchConfig {
            algorithm: self.algorithm.clone(),
            difficulty: self.difficulty.clone(),
            pruning: self.pruning,
            simulations: self.simulations,
            exploration: self.exploration,
            backprop: self.backprop.clone(),
            playout: self.playout.clone(),
        };

        let mut config =
            AiConfig::from_search_config(&search, ai_player).context("invalid search settings")?;
        if let Some(depth) = self.depth {
            config = config.with_depth(depth);
            config.validate().context("invalid search depth")?;
        }
        if self.playout.eq_ignore_ascii_case("auto") {
            if let Ok(kind) = self.game_kind() {
                config.mcts.playout = kind.default_playout();
            }
        }
        Ok(config)
    }

    pub fn report_path(&self) -> Option<PathBuf> {
        (!self.report_path.is_empty()).then(|| PathBuf::from(&self.report_path))
    }
}
