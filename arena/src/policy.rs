//! Move selection: the AI configuration and the decision entry points.
//!
//! [`decide_move`] dispatches a board to minimax or MCTS according to an
//! [`AiConfig`]; [`instrumented_decide_move`] does the same under a
//! [`ResourceProbe`]. [`RandomPolicy`] is the seeded opponent used by the
//! match runner.

use engine_config::SearchConfig;
use engine_core::{Board, Geometry, Move, Player};
use mcts::{run_mcts, MctsConfig, PlayoutPolicy};
use minimax::{Difficulty, MinimaxConfig};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::instrument::{measure, ResourceProbe, ResourceStats};

/// Search algorithm used for AI moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Minimax,
    Mcts,
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(Self::Minimax),
            "mcts" => Ok(Self::Mcts),
            other => Err(format!(
                "unknown algorithm '{other}' (expected 'minimax' or 'mcts')"
            )),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimax => write!(f, "minimax"),
            Self::Mcts => write!(f, "mcts"),
        }
    }
}

/// Parse a side name: "a"/"x"/"black" or "b"/"o"/"red".
pub fn parse_player(s: &str) -> Result<Player, String> {
    match s.to_ascii_lowercase().as_str() {
        "a" | "x" | "black" => Ok(Player::A),
        "b" | "o" | "red" => Ok(Player::B),
        other => Err(format!("unknown player '{other}' (expected 'a' or 'b')")),
    }
}

/// Parse a playout setting. "auto" reads as uniform random here; the CLI
/// config replaces it with the per-game default.
fn parse_playout(s: &str) -> Result<PlayoutPolicy, ConfigError> {
    if s.eq_ignore_ascii_case("auto") {
        return Ok(PlayoutPolicy::Random);
    }
    s.parse().map_err(ConfigError::Invalid)
}

/// Errors raised before a decision is searched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Minimax(#[from] minimax::SearchError),

    #[error(transparent)]
    Mcts(#[from] mcts::SearchError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Everything a search needs besides the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    pub algorithm: Algorithm,

    /// Minimax plies below each root move
    pub depth: u32,

    /// Alpha-beta pruning for minimax
    pub pruning: bool,

    /// MCTS budget and tuning
    pub mcts: MctsConfig,

    /// Side the AI plays
    pub ai_player: Player,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::minimax(Difficulty::default(), true, Player::B)
    }
}

impl AiConfig {
    pub fn minimax(difficulty: Difficulty, pruning: bool, ai_player: Player) -> Self {
        Self {
            algorithm: Algorithm::Minimax,
            depth: difficulty.depth(),
            pruning,
            mcts: MctsConfig::default(),
            ai_player,
        }
    }

    pub fn mcts(simulations: u32, ai_player: Player) -> Self {
        Self {
            algorithm: Algorithm::Mcts,
            depth: Difficulty::default().depth(),
            pruning: true,
            mcts: MctsConfig::default().with_simulations(simulations),
            ai_player,
        }
    }

    /// Build from the `[search]` section of the central config.
    pub fn from_search_config(
        search: &SearchConfig,
        ai_player: Player,
    ) -> Result<Self, ConfigError> {
        let algorithm = search.algorithm.parse().map_err(ConfigError::Invalid)?;
        let difficulty: Difficulty = search.difficulty.parse().map_err(ConfigError::Invalid)?;
        let mcts = MctsConfig::default()
            .with_simulations(search.simulations)
            .with_exploration(search.exploration)
            .with_backprop(search.backprop.parse().map_err(ConfigError::Invalid)?)
            .with_playout(parse_playout(&search.playout)?);

        let config = Self {
            algorithm,
            depth: difficulty.depth(),
            pruning: search.pruning,
            mcts,
            ai_player,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_simulations(mut self, simulations: u32) -> Self {
        self.mcts.simulations = simulations;
        self
    }

    pub fn with_ai_player(mut self, ai_player: Player) -> Self {
        self.ai_player = ai_player;
        self
    }

    pub fn simulations(&self) -> u32 {
        self.mcts.simulations
    }

    /// The named difficulty whose depth matches, if any.
    pub fn difficulty(&self) -> Option<Difficulty> {
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
            .into_iter()
            .find(|d| d.depth() == self.depth)
    }

    pub fn minimax_config(&self) -> MinimaxConfig {
        MinimaxConfig::new(self.depth, self.pruning)
    }

    /// Check the settings of the selected algorithm.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.algorithm {
            Algorithm::Minimax => self.minimax_config().validate()?,
            Algorithm::Mcts => self.mcts.validate()?,
        }
        Ok(())
    }
}

/// Choose a move for `config.ai_player`, who is to move on `board`.
///
/// Returns `Ok(None)` when the board has no legal move. Unpruned minimax
/// draws its inner-node shuffle seed from `rng`.
pub fn decide_move<G: Geometry>(
    board: &Board<G>,
    config: &AiConfig,
    rng: &mut ChaCha20Rng,
) -> Result<Option<Move>, ConfigError> {
    match config.algorithm {
        Algorithm::Minimax => {
            let mut search_config = config.minimax_config();
            if !config.pruning {
                search_config = search_config.with_shuffle_seed(rng.gen());
            }
            let outcome = minimax::search(board, config.ai_player, search_config)?;
            debug!(
                best_move = ?outcome.best_move,
                score = outcome.score,
                nodes = outcome.nodes,
                depth = config.depth,
                pruning = config.pruning,
                "Minimax decision"
            );
            Ok(outcome.best_move)
        }
        Algorithm::Mcts => {
            let result = run_mcts(board, config.ai_player, config.mcts.clone(), rng)?;
            debug!(
                best_move = ?result.best_move,
                value = result.value,
                simulations = result.simulations,
                tree_size = result.tree_size,
                "MCTS decision"
            );
            Ok(result.best_move)
        }
    }
}

/// [`decide_move`] under `probe`, returning the cost of the decision.
///
/// The configuration is checked before sampling starts, so a rejected
/// request produces no statistics.
pub fn instrumented_decide_move<G, P>(
    board: &Board<G>,
    config: &AiConfig,
    rng: &mut ChaCha20Rng,
    probe: &mut P,
) -> Result<(Option<Move>, ResourceStats), ConfigError>
where
    G: Geometry,
    P: ResourceProbe + ?Sized,
{
    config.validate()?;
    let (decision, stats) = measure(probe, || decide_move(board, config, rng));
    Ok((decision?, stats))
}

/// Opponent that plays a uniformly random legal move.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// A random legal move, or `None` when the game is over.
    pub fn select_move<G: Geometry>(&mut self, board: &Board<G>) -> Option<Move> {
        board.legal_moves().choose(&mut self.rng).copied()
    }
}
