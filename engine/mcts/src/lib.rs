//! Monte Carlo Tree Search (MCTS) with UCT selection.
//!
//! This crate provides an MCTS implementation that works with any board
//! geometry from `engine-core`.
//!
//! # Overview
//!
//! MCTS builds a search tree by running simulations. Each simulation
//! consists of four phases:
//!
//! 1. **Selection**: Traverse the tree using UCT
//!    (`wins/visits + C * sqrt(ln(N) / visits)`), trying unvisited children
//!    first
//! 2. **Expansion**: When reaching a non-terminal leaf, add one child for
//!    each legal move and pick one at random
//! 3. **Playout**: Play random moves from that child until the game ends
//! 4. **Backpropagation**: Update visit counts and results along the path
//!    from the child to the root
//!
//! After the budget is spent, the most visited root child is played.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Player;
//! use games_tictactoe::TicTacToeBoard;
//! use mcts::{run_mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let board: TicTacToeBoard = "XX. OO. ...".parse().unwrap();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let config = MctsConfig::default().with_simulations(500);
//!
//! let result = run_mcts(&board, Player::A, config, &mut rng).unwrap();
//! assert_eq!(result.best_move.map(|m| (m.row, m.col)), Some((0, 2)));
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `simulations`: Number of simulations per search (default: 3000)
//! - `exploration`: UCT exploration constant (default: 2.0)
//! - `backprop`: [`BackpropMode`], absolute (AI-relative) or alternating
//! - `playout`: [`PlayoutPolicy`], uniform random or greedy-win

pub mod config;
pub mod node;
pub mod playout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{BackpropMode, MctsConfig, PlayoutPolicy, DEFAULT_EXPLORATION};
pub use node::{MctsNode, NodeId};
pub use playout::{playout, winning_move};
pub use search::{run_mcts, MctsSearch, SearchError, SearchResult};
pub use tree::{MctsTree, TreeStats};
