//! Fixed-size board shared by both games.
//!
//! The board is generic over a [`Geometry`] that fixes its shape, the length
//! of a winning line and whether pieces fall under gravity. Cells are stored
//! row-major with row 0 at the top:
//!
//! ```text
//! Connect 4 (6x7)                       Tic-Tac-Toe (3x3)
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]   Row 0: [0][1][2]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]   Row 1: [3][4][5]
//! ...                                   Row 2: [6][7][8]
//! Row 5: [35][36][37][38][39][40][41]  <- pieces land here first
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::str::FromStr;
use thiserror::Error;

use crate::metadata::GameMetadata;
use crate::player::{Cell, Player};

/// Static description of a board shape and its rules.
///
/// Implemented by zero-sized marker types in the game crates.
pub trait Geometry:
    fmt::Debug + Clone + Copy + PartialEq + Eq + Hash + Default + Send + Sync + 'static
{
    /// Number of rows
    const ROWS: usize;
    /// Number of columns
    const COLS: usize;
    /// Pieces in a row needed to win
    const WIN_LENGTH: usize;
    /// Whether a piece must occupy the lowest empty cell of its column
    const GRAVITY: bool;

    /// Display metadata for this game
    fn metadata() -> GameMetadata;

    /// Total number of cells
    fn size() -> usize {
        Self::ROWS * Self::COLS
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Move {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Reasons a move cannot be placed. Nothing is written to the board when one
/// of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("move ({row}, {col}) is outside the {rows}x{cols} board")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("column {col} is full")]
    ColumnFull { col: usize },

    #[error(
        "cell ({row}, {col}) is not the lowest empty cell of its column (expected row {expected})"
    )]
    NotLowestEmpty {
        row: usize,
        col: usize,
        expected: usize,
    },
}

/// Reasons a restored cell list cannot become a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("expected {expected} cells, got {got}")]
    WrongSize { expected: usize, got: usize },

    #[error("piece at ({row}, {col}) is floating above an empty cell")]
    FloatingPiece { row: usize, col: usize },

    #[error("piece counts {a} and {b} cannot arise from alternating play")]
    PieceCountMismatch { a: usize, b: usize },

    #[error("unknown cell symbol '{0}'")]
    UnknownSymbol(char),
}

/// State of a game as read from the board alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Win(Player),
    Draw,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        self != Outcome::InProgress
    }

    /// Reward from `perspective`'s point of view.
    ///
    /// * `1` if `perspective` won
    /// * `-1` if the opponent won
    /// * `0` for draws or unfinished games
    #[inline]
    pub fn reward_for(self, perspective: Player) -> i32 {
        match self {
            Outcome::Win(p) if p == perspective => 1,
            Outcome::Win(_) => -1,
            Outcome::InProgress | Outcome::Draw => 0,
        }
    }
}

/// Line directions as (row step, column step): horizontal, vertical,
/// down-right diagonal, down-left diagonal. Win scans follow this order.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A grid of cells with the shape and rules of `G`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board<G: Geometry> {
    cells: Vec<Cell>,
    _geometry: PhantomData<G>,
}

impl<G: Geometry> Board<G> {
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::Empty; G::size()],
            _geometry: PhantomData,
        }
    }

    /// Rebuild a board from a row-major cell list, e.g. a saved snapshot.
    pub fn from_cells(cells: Vec<Cell>) -> Result<Self, SnapshotError> {
        if cells.len() != G::size() {
            return Err(SnapshotError::WrongSize {
                expected: G::size(),
                got: cells.len(),
            });
        }

        let board = Self {
            cells,
            _geometry: PhantomData,
        };

        if G::GRAVITY {
            for row in 0..G::ROWS - 1 {
                for col in 0..G::COLS {
                    if !board.cell(row, col).is_empty() && board.cell(row + 1, col).is_empty() {
                        return Err(SnapshotError::FloatingPiece { row, col });
                    }
                }
            }
        }

        let (a, b) = (board.count(Player::A), board.count(Player::B));
        if a.abs_diff(b) > 1 {
            return Err(SnapshotError::PieceCountMismatch { a, b });
        }

        Ok(board)
    }

    pub fn rows(&self) -> usize {
        G::ROWS
    }

    pub fn cols(&self) -> usize {
        G::COLS
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    fn index(row: usize, col: usize) -> usize {
        row * G::COLS + col
    }

    #[inline]
    fn in_bounds(row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < G::ROWS && (col as usize) < G::COLS
    }

    /// Cell at (row, col). Panics if out of range; use [`Board::get`] for
    /// unchecked input.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[Self::index(row, col)]
    }

    /// Cell at (row, col), or `None` when the coordinate is off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        (row < G::ROWS && col < G::COLS).then(|| self.cell(row, col))
    }

    /// Whether (row, col) is on the board and empty.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Cell::Empty))
    }

    /// Number of occupied cells.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Number of cells held by `player`.
    pub fn count(&self, player: Player) -> usize {
        let target = Cell::from(player);
        self.cells.iter().filter(|&&c| c == target).count()
    }

    /// Whose turn it is, given which side opened the game.
    pub fn player_to_move(&self, first: Player) -> Player {
        if self.count(first) > self.count(first.opponent()) {
            first.opponent()
        } else {
            first
        }
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Lowest empty row of `col`, or `None` when the column is full.
    fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        (0..G::ROWS).rev().find(|&row| self.cell(row, col).is_empty())
    }

    /// Every placeable cell, in scan order.
    ///
    /// Without gravity this is every empty cell in row-major order. With
    /// gravity it is, for each column left to right, the lowest empty row;
    /// full columns are skipped. Game-over is not considered here; see
    /// [`Board::legal_moves`].
    pub fn available_moves(&self) -> Vec<Move> {
        if G::GRAVITY {
            (0..G::COLS)
                .filter_map(|col| self.lowest_empty_row(col).map(|row| Move::new(row, col)))
                .collect()
        } else {
            (0..G::ROWS)
                .flat_map(|row| (0..G::COLS).map(move |col| Move::new(row, col)))
                .filter(|mv| self.cell(mv.row, mv.col).is_empty())
                .collect()
        }
    }

    /// Moves a search may play: [`Board::available_moves`], or nothing once
    /// the game is decided.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.winner().is_some() {
            Vec::new()
        } else {
            self.available_moves()
        }
    }

    /// The move that drops a piece into `col`.
    pub fn move_for_column(&self, col: usize) -> Result<Move, IllegalMove> {
        if col >= G::COLS {
            return Err(IllegalMove::OutOfRange {
                row: 0,
                col,
                rows: G::ROWS,
                cols: G::COLS,
            });
        }
        self.lowest_empty_row(col)
            .map(|row| Move::new(row, col))
            .ok_or(IllegalMove::ColumnFull { col })
    }

    /// Check that `mv` may be placed without touching the board.
    pub fn validate(&self, mv: Move) -> Result<(), IllegalMove> {
        let Move { row, col } = mv;
        if row >= G::ROWS || col >= G::COLS {
            return Err(IllegalMove::OutOfRange {
                row,
                col,
                rows: G::ROWS,
                cols: G::COLS,
            });
        }

        if G::GRAVITY {
            match self.lowest_empty_row(col) {
                None => return Err(IllegalMove::ColumnFull { col }),
                Some(expected) if expected != row => {
                    if !self.cell(row, col).is_empty() {
                        return Err(IllegalMove::Occupied { row, col });
                    }
                    return Err(IllegalMove::NotLowestEmpty { row, col, expected });
                }
                Some(_) => {}
            }
        } else if !self.cell(row, col).is_empty() {
            return Err(IllegalMove::Occupied { row, col });
        }

        Ok(())
    }

    /// Place `player`'s piece at `mv`.
    pub fn apply(&mut self, mv: Move, player: Player) -> Result<(), IllegalMove> {
        self.validate(mv)?;
        self.cells[Self::index(mv.row, mv.col)] = Cell::from(player);
        Ok(())
    }

    /// Copy of this board with `player`'s piece at `mv`.
    pub fn with_move(&self, mv: Move, player: Player) -> Result<Self, IllegalMove> {
        let mut next = self.clone();
        next.apply(mv, player)?;
        Ok(next)
    }

    /// Apply a move produced by this board's own move generator.
    ///
    /// Skips validation; debug builds still assert the cell is empty.
    #[inline]
    pub fn play_generated(&mut self, mv: Move, player: Player) {
        debug_assert!(self.cell(mv.row, mv.col).is_empty(), "cell {mv} occupied");
        self.cells[Self::index(mv.row, mv.col)] = Cell::from(player);
    }

    /// Owner of the line of `G::WIN_LENGTH` starting at (row, col) in
    /// direction (dr, dc), if that line fits and is uniform.
    fn line_owner(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<Player> {
        let first = self.cell(row, col).player()?;
        let target = Cell::from(first);
        (1..G::WIN_LENGTH as isize)
            .all(|i| {
                let r = row as isize + dr * i;
                let c = col as isize + dc * i;
                Self::in_bounds(r, c) && self.cell(r as usize, c as usize) == target
            })
            .then_some(first)
    }

    /// The player holding a complete line, if any.
    ///
    /// Lines are scanned horizontally, vertically, then along both diagonals,
    /// row-major within each direction; the first complete line decides.
    pub fn winner(&self) -> Option<Player> {
        DIRECTIONS.iter().find_map(|&(dr, dc)| {
            (0..G::ROWS).find_map(|row| {
                (0..G::COLS).find_map(|col| self.line_owner(row, col, dr, dc))
            })
        })
    }

    /// Whether the piece at `mv` completes a line for its owner.
    ///
    /// Only lines through `mv` are inspected, so this is the cheap check to
    /// run right after placing a piece.
    pub fn completes_line(&self, mv: Move) -> bool {
        let Some(player) = self.cell(mv.row, mv.col).player() else {
            return false;
        };
        let target = Cell::from(player);

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let mut count = 1;

            // Count in positive direction
            let (mut r, mut c) = (mv.row as isize + dr, mv.col as isize + dc);
            while Self::in_bounds(r, c) && self.cell(r as usize, c as usize) == target {
                count += 1;
                r += dr;
                c += dc;
            }

            // Count in negative direction
            let (mut r, mut c) = (mv.row as isize - dr, mv.col as isize - dc);
            while Self::in_bounds(r, c) && self.cell(r as usize, c as usize) == target {
                count += 1;
                r -= dr;
                c -= dc;
            }

            count >= G::WIN_LENGTH
        })
    }

    pub fn outcome(&self) -> Outcome {
        match self.winner() {
            Some(player) => Outcome::Win(player),
            None if self.is_full() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }

    /// Whether the game on this board is over (a winner or no empty cell).
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_over()
    }

    /// Empty every cell.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}

impl<G: Geometry> Default for Board<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Geometry> fmt::Display for Board<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..G::ROWS {
            let line: String = (0..G::COLS).map(|col| self.cell(row, col).symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Parse rows of `X`, `O` and `.` (whitespace ignored), top row first.
///
/// ```
/// # use engine_core::{Board, Geometry, GameMetadata, Player};
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// # struct Three;
/// # impl Geometry for Three {
/// #     const ROWS: usize = 3;
/// #     const COLS: usize = 3;
/// #     const WIN_LENGTH: usize = 3;
/// #     const GRAVITY: bool = false;
/// #     fn metadata() -> GameMetadata { GameMetadata::new("three", "Three") }
/// # }
/// let board: Board<Three> = "XXX OO. ...".parse().unwrap();
/// assert_eq!(board.winner(), Some(Player::A));
/// ```
impl<G: Geometry> FromStr for Board<G> {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '.' | '_' => Ok(Cell::Empty),
                'X' | 'x' => Ok(Cell::PlayerA),
                'O' | 'o' => Ok(Cell::PlayerB),
                other => Err(SnapshotError::UnknownSymbol(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(cells)
    }
}

impl<G: Geometry> fmt::Debug for Board<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board<{}x{}>\n{}", G::ROWS, G::COLS, self)
    }
}
