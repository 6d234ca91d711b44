//! Connect 4 geometry for the shared board engine
//!
//! Connect 4 is a two-player connection game where players drop discs into a
//! 7-column, 6-row vertically suspended grid. The objective is to be the
//! first to form a horizontal, vertical, or diagonal line of four discs.
//!
//! # Board Layout
//!
//! Row 0 is the top row; a dropped disc settles at the highest empty row
//! index of its column:
//! ```text
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Top
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 4: [28][29][30][31][32][33][34]
//! Row 5: [35][36][37][38][39][40][41]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Player;
//! use games_connect4::Connect4Board;
//!
//! let mut board = Connect4Board::new();
//! let mv = board.move_for_column(3).unwrap();
//! assert_eq!((mv.row, mv.col), (5, 3));
//! board.apply(mv, Player::A).unwrap();
//! assert_eq!(board.move_for_column(3).unwrap().row, 4);
//! ```

use engine_core::{Board, GameMetadata, Geometry, IllegalMove, Player};

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42
pub const WIN_LENGTH: usize = 4;

/// Connect 4 board shape and rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Connect4;

impl Geometry for Connect4 {
    const ROWS: usize = ROWS;
    const COLS: usize = COLS;
    const WIN_LENGTH: usize = WIN_LENGTH;
    const GRAVITY: bool = true;

    fn metadata() -> GameMetadata {
        GameMetadata::new("connect4", "Connect 4")
            .with_board(COLS, ROWS)
            .with_win_length(WIN_LENGTH)
            .with_players(
                vec!["Black".to_string(), "Red".to_string()],
                vec!['X', 'O'],
            )
            .with_description("Drop pieces to connect 4 in a row!")
            .with_board_type("drop_column")
    }
}

/// A Connect 4 board
pub type Connect4Board = Board<Connect4>;

/// Drop `player`'s disc into `col`, returning the row it landed on.
pub fn drop_piece(
    board: &mut Connect4Board,
    col: usize,
    player: Player,
) -> Result<usize, IllegalMove> {
    let mv = board.move_for_column(col)?;
    board.apply(mv, player)?;
    Ok(mv.row)
}

/// Number of discs in `col`.
pub fn column_height(board: &Connect4Board, col: usize) -> usize {
    (0..ROWS).filter(|&row| !board.is_empty(row, col)).count()
}
