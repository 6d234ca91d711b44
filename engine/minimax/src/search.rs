//! Depth-bounded minimax with optional alpha-beta pruning.
//!
//! The root is always searched in scan order and the first move reaching
//! the best score is kept, so the choice is deterministic for a given board.
//! Inner nodes of an unpruned search may be visited in a seeded random
//! order; this changes effort only, never the value of the root.

use engine_core::{Board, Evaluator, Geometry, Move, Player, WinLossEvaluator};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MinimaxConfig;

/// Errors that can occur before a minimax search starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result of a minimax search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// First root move in scan order with the best score; None when the
    /// board has no legal move
    pub best_move: Option<Move>,

    /// Score of `best_move` for the maximizing player
    pub score: i32,

    /// Positions visited, root excluded
    pub nodes: u64,
}

/// A single minimax search over one board.
pub struct MinimaxSearch<'a, E: Evaluator> {
    evaluator: &'a E,
    config: MinimaxConfig,
    maximizing: Player,
    rng: Option<ChaCha20Rng>,
    nodes: u64,
}

impl<'a, E: Evaluator> MinimaxSearch<'a, E> {
    pub fn new(
        evaluator: &'a E,
        config: MinimaxConfig,
        maximizing: Player,
    ) -> Result<Self, SearchError> {
        config.validate()?;

        let rng = match (config.prune, config.shuffle_seed) {
            (false, Some(seed)) => Some(ChaCha20Rng::seed_from_u64(seed)),
            _ => None,
        };

        Ok(Self {
            evaluator,
            config,
            maximizing,
            rng,
            nodes: 0,
        })
    }

    /// Choose a move for the maximizing player, who is to move on `board`.
    pub fn run<G: Geometry>(&mut self, board: &Board<G>) -> SearchOutcome {
        let mut best_move = None;
        let mut best_score = i32::MIN;
        let mut alpha = i32::MIN;
        let beta = i32::MAX;

        for mv in board.legal_moves() {
            let mut child = board.clone();
            child.play_generated(mv, self.maximizing);
            let score = self.minimax(&child, self.config.depth, false, alpha, beta);
            trace!(%mv, score, "minimax root move");

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if self.config.prune {
                alpha = alpha.max(score);
            }
        }

        let outcome = SearchOutcome {
            best_move,
            score: if best_move.is_some() { best_score } else { 0 },
            nodes: self.nodes,
        };
        debug!(
            best_move = ?outcome.best_move,
            score = outcome.score,
            nodes = outcome.nodes,
            depth = self.config.depth,
            prune = self.config.prune,
            "minimax search complete"
        );
        outcome
    }

    fn minimax<G: Geometry>(
        &mut self,
        board: &Board<G>,
        depth: u32,
        maximizing_turn: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 || board.is_terminal() {
            return self.evaluator.evaluate(board, self.maximizing);
        }

        let player = if maximizing_turn {
            self.maximizing
        } else {
            self.maximizing.opponent()
        };

        let mut moves = board.available_moves();
        if let Some(rng) = self.rng.as_mut() {
            moves.shuffle(rng);
        }

        let mut best = if maximizing_turn { i32::MIN } else { i32::MAX };
        for mv in moves {
            let mut child = board.clone();
            child.play_generated(mv, player);
            let score = self.minimax(&child, depth - 1, !maximizing_turn, alpha, beta);

            if maximizing_turn {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if self.config.prune && beta <= alpha {
                break;
            }
        }

        best
    }
}

/// Search `board` with the default win/loss evaluator.
pub fn search<G: Geometry>(
    board: &Board<G>,
    maximizing: Player,
    config: MinimaxConfig,
) -> Result<SearchOutcome, SearchError> {
    let evaluator = WinLossEvaluator::new();
    let mut search = MinimaxSearch::new(&evaluator, config, maximizing)?;
    Ok(search.run(board))
}

/// Best move for `maximizing` looking `depth_limit` plies past each
/// candidate. Returns `Ok(None)` only when there is no legal move.
pub fn find_best_move<G: Geometry>(
    board: &Board<G>,
    maximizing: Player,
    depth_limit: u32,
    prune: bool,
) -> Result<Option<Move>, SearchError> {
    search(board, maximizing, MinimaxConfig::new(depth_limit, prune)).map(|o| o.best_move)
}
