//! Static board evaluation.
//!
//! The evaluator scores a terminal or depth-cutoff board from one player's
//! point of view. Only decided games carry a score; every other position is
//! neutral, so a forced win or loss always dominates.

use crate::board::{Board, Geometry};
use crate::player::Player;

/// Score of a won position. Far outside any count a search can accumulate.
pub const WIN_SCORE: i32 = 1_000_000;

/// Score of a lost position.
pub const LOSS_SCORE: i32 = -WIN_SCORE;

/// Trait for static evaluators used at search leaves.
pub trait Evaluator: Send + Sync {
    /// Score `board` for `maximizing`. Higher is better for that player.
    fn evaluate<G: Geometry>(&self, board: &Board<G>, maximizing: Player) -> i32;
}

/// Win/lose/neutral heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinLossEvaluator;

impl WinLossEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for WinLossEvaluator {
    #[inline]
    fn evaluate<G: Geometry>(&self, board: &Board<G>, maximizing: Player) -> i32 {
        match board.winner() {
            Some(p) if p == maximizing => WIN_SCORE,
            Some(_) => LOSS_SCORE,
            None => 0,
        }
    }
}

/// Evaluate with the default [`WinLossEvaluator`].
pub fn evaluate<G: Geometry>(board: &Board<G>, maximizing: Player) -> i32 {
    WinLossEvaluator.evaluate(board, maximizing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Move;
    use crate::metadata::GameMetadata;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    struct Row3;

    impl Geometry for Row3 {
        const ROWS: usize = 1;
        const COLS: usize = 3;
        const WIN_LENGTH: usize = 3;
        const GRAVITY: bool = false;

        fn metadata() -> GameMetadata {
            GameMetadata::new("row3", "Row").with_board(3, 1)
        }
    }

    #[test]
    fn test_neutral_when_undecided() {
        let mut board = Board::<Row3>::new();
        assert_eq!(evaluate(&board, Player::A), 0);
        board.apply(Move::new(0, 0), Player::A).unwrap();
        assert_eq!(evaluate(&board, Player::B), 0);
    }

    #[test]
    fn test_win_and_loss_are_symmetric() {
        let mut board = Board::<Row3>::new();
        for col in 0..3 {
            board.play_generated(Move::new(0, col), Player::B);
        }
        assert_eq!(evaluate(&board, Player::B), WIN_SCORE);
        assert_eq!(evaluate(&board, Player::A), LOSS_SCORE);
    }

    #[test]
    fn test_draw_is_neutral() {
        let mut board = Board::<Row3>::new();
        board.play_generated(Move::new(0, 0), Player::A);
        board.play_generated(Move::new(0, 1), Player::B);
        board.play_generated(Move::new(0, 2), Player::A);
        assert!(board.is_full());
        assert_eq!(WinLossEvaluator::new().evaluate(&board, Player::A), 0);
    }
}
