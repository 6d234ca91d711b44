//! Core types for the two-game search engine
//!
//! This crate provides the pieces both search algorithms share:
//! - `Board`: fixed-size grid generic over a `Geometry` (shape, win length, gravity)
//! - `Player` / `Cell`: the two sides and the contents of a square
//! - `Move` / `Outcome`: coordinates and game results
//! - `Evaluator`: static scoring of terminal and cutoff positions
//! - `GameMetadata`: display information for callers that render boards

pub mod board;
pub mod evaluator;
pub mod metadata;
pub mod player;

// Re-export main types for convenience
pub use board::{Board, Geometry, IllegalMove, Move, Outcome, SnapshotError};
pub use evaluator::{evaluate, Evaluator, WinLossEvaluator, LOSS_SCORE, WIN_SCORE};
pub use metadata::GameMetadata;
pub use player::{Cell, Player};
