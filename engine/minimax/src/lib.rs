//! Minimax search for the two-player board games in `engine-core`.
//!
//! The search looks a fixed number of plies past each candidate move and
//! scores leaves with an [`engine_core::Evaluator`]. Alpha-beta pruning can
//! be switched off to get a full-width baseline for comparing effort.
//!
//! ```rust
//! use engine_core::Player;
//! use games_tictactoe::TicTacToeBoard;
//! use minimax::{find_best_move, Difficulty};
//!
//! let board: TicTacToeBoard = "XX. OO. ...".parse().unwrap();
//! let mv = find_best_move(&board, Player::A, Difficulty::Easy.depth(), true).unwrap();
//! assert_eq!(mv.map(|m| (m.row, m.col)), Some((0, 2)));
//! ```

pub mod config;
pub mod search;

pub use config::{Difficulty, MinimaxConfig};
pub use search::{find_best_move, search, MinimaxSearch, SearchError, SearchOutcome};
