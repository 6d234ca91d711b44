//! Tic-Tac-Toe geometry for the shared board engine
//!
//! A 3x3 grid where a move may fill any empty cell and three in a row wins.
//! Player A plays X and moves first; player B plays O.
//!
//! # Board Layout
//!
//! ```text
//! (0,0) (0,1) (0,2)
//! (1,0) (1,1) (1,2)
//! (2,0) (2,1) (2,2)
//! ```
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Move, Player};
//! use games_tictactoe::TicTacToeBoard;
//!
//! let mut board = TicTacToeBoard::new();
//! board.apply(Move::new(1, 1), Player::A).unwrap();
//! assert_eq!(board.available_moves().len(), 8);
//! ```

use engine_core::{Board, GameMetadata, Geometry, Move};

/// Board dimensions
pub const ROWS: usize = 3;
pub const COLS: usize = 3;
pub const WIN_LENGTH: usize = 3;

/// The centre square.
pub const CENTER: Move = Move::new(1, 1);

/// The four corner squares, in scan order.
pub const CORNERS: [Move; 4] = [
    Move::new(0, 0),
    Move::new(0, 2),
    Move::new(2, 0),
    Move::new(2, 2),
];

/// Tic-Tac-Toe board shape and rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TicTacToe;

impl Geometry for TicTacToe {
    const ROWS: usize = ROWS;
    const COLS: usize = COLS;
    const WIN_LENGTH: usize = WIN_LENGTH;
    const GRAVITY: bool = false;

    fn metadata() -> GameMetadata {
        GameMetadata::new("tictactoe", "Tic-Tac-Toe")
            .with_board(COLS, ROWS)
            .with_win_length(WIN_LENGTH)
            .with_players(vec!["X".to_string(), "O".to_string()], vec!['X', 'O'])
            .with_description("Get three in a row to win!")
            .with_board_type("grid")
    }
}

/// A Tic-Tac-Toe board
pub type TicTacToeBoard = Board<TicTacToe>;

/// Whether `mv` is one of the four corners.
pub fn is_corner(mv: Move) -> bool {
    CORNERS.contains(&mv)
}

/// Whether `mv` is an edge (a non-corner, non-centre square).
pub fn is_edge(mv: Move) -> bool {
    mv.row < ROWS && mv.col < COLS && mv != CENTER && !is_corner(mv)
}

/// Flat index (0-8) of a move, row-major.
pub fn to_index(mv: Move) -> usize {
    mv.row * COLS + mv.col
}

/// Move for a flat index (0-8), or `None` when out of range.
pub fn from_index(index: usize) -> Option<Move> {
    (index < ROWS * COLS).then(|| Move::new(index / COLS, index % COLS))
}

#[cfg(test)]
mod tests;
