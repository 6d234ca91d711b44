//! Random playouts from a leaf to the end of the game.

use engine_core::{Board, Geometry, Move, Outcome, Player};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::PlayoutPolicy;

/// Play `board` out to a decided position, `to_move` first, and return the
/// final outcome. The board is consumed move by move.
pub fn playout<G: Geometry, R: Rng + ?Sized>(
    board: &mut Board<G>,
    to_move: Player,
    policy: PlayoutPolicy,
    rng: &mut R,
) -> Outcome {
    let mut outcome = board.outcome();
    let mut player = to_move;

    while !outcome.is_over() {
        let moves = board.available_moves();
        let mv = match policy {
            PlayoutPolicy::Random => moves.choose(rng).copied(),
            PlayoutPolicy::GreedyWin => {
                winning_move(board, &moves, player).or_else(|| moves.choose(rng).copied())
            }
        };
        let Some(mv) = mv else {
            break;
        };

        board.play_generated(mv, player);
        outcome = if board.completes_line(mv) {
            Outcome::Win(player)
        } else if board.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        };
        player = player.opponent();
    }

    outcome
}

/// First move in `moves` that wins on the spot for `player`.
pub fn winning_move<G: Geometry>(board: &Board<G>, moves: &[Move], player: Player) -> Option<Move> {
    moves.iter().copied().find(|&mv| {
        let mut probe = board.clone();
        probe.play_generated(mv, player);
        probe.completes_line(mv)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::GameMetadata;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    struct Three;

    impl Geometry for Three {
        const ROWS: usize = 3;
        const COLS: usize = 3;
        const WIN_LENGTH: usize = 3;
        const GRAVITY: bool = false;

        fn metadata() -> GameMetadata {
            GameMetadata::new("three", "Three").with_board(3, 3)
        }
    }

    #[test]
    fn test_playout_reaches_terminal() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..50 {
            let mut board = Board::<Three>::new();
            let outcome = playout(&mut board, Player::A, PlayoutPolicy::Random, &mut rng);
            assert!(outcome.is_over());
            assert_eq!(outcome, board.outcome());
        }
    }

    #[test]
    fn test_playout_on_decided_board_is_noop() {
        let mut board: Board<Three> = "XXX OO. ...".parse().unwrap();
        let before = board.clone();
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        let outcome = playout(&mut board, Player::B, PlayoutPolicy::Random, &mut rng);
        assert_eq!(outcome, Outcome::Win(Player::A));
        assert_eq!(board, before);
    }

    #[test]
    fn test_greedy_takes_immediate_win() {
        let board: Board<Three> = "XX. OO. ...".parse().unwrap();
        let moves = board.available_moves();
        assert_eq!(winning_move(&board, &moves, Player::A), Some(Move::new(0, 2)));
        assert_eq!(winning_move(&board, &moves, Player::B), Some(Move::new(1, 2)));

        for seed in 0..10 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let mut b = board.clone();
            let outcome = playout(&mut b, Player::A, PlayoutPolicy::GreedyWin, &mut rng);
            assert_eq!(outcome, Outcome::Win(Player::A));
        }
    }

    #[test]
    fn test_same_seed_same_playout() {
        let run = |seed| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let mut board = Board::<Three>::new();
            playout(&mut board, Player::A, PlayoutPolicy::Random, &mut rng);
            board
        };
        assert_eq!(run(42), run(42));
    }
}
