use super::*;
use engine_core::{Cell, IllegalMove, Outcome, Player};

fn board(rows: &str) -> TicTacToeBoard {
    rows.parse().expect("valid board fixture")
}

#[test]
fn test_initial_state() {
    let board = TicTacToeBoard::new();
    assert_eq!(board.piece_count(), 0);
    assert!(!board.is_full());
    assert_eq!(board.winner(), None);
    assert_eq!(board.outcome(), Outcome::InProgress);
}

#[test]
fn test_available_moves_scan_order() {
    let board = TicTacToeBoard::new();
    let moves = board.available_moves();
    assert_eq!(moves.len(), 9);
    assert_eq!(moves, (0..9).filter_map(from_index).collect::<Vec<_>>());
}

#[test]
fn test_applied_move_is_never_offered_again() {
    let mut board = TicTacToeBoard::new();
    let mut player = Player::A;
    for mv in [CENTER, Move::new(0, 0), Move::new(2, 1), Move::new(0, 2)] {
        board.apply(mv, player).unwrap();
        assert!(!board.available_moves().contains(&mv));
        assert!(!board.is_empty(mv.row, mv.col));
        player = player.opponent();
    }
    assert_eq!(board.available_moves().len(), 5);
}

#[test]
fn test_invalid_move_is_not_committed() {
    let mut board = TicTacToeBoard::new();
    board.apply(CENTER, Player::A).unwrap();

    let before = board.clone();
    assert_eq!(
        board.apply(CENTER, Player::B),
        Err(IllegalMove::Occupied { row: 1, col: 1 })
    );
    assert!(matches!(
        board.apply(Move::new(3, 0), Player::B),
        Err(IllegalMove::OutOfRange { .. })
    ));
    assert_eq!(board, before);
}

#[test]
fn test_winning_lines() {
    let rows = ["XXX OO. ...", "OO. XXX ...", "OO. ... XXX"];
    let cols = ["XO. XO. X..", "OX. OX. .X.", ".OX .OX ..X"];
    let diagonals = ["XO. OX. ..X", "OOX .X. X.."];

    for fixture in rows.iter().chain(&cols).chain(&diagonals) {
        assert_eq!(board(fixture).winner(), Some(Player::A), "fixture {fixture}");
    }
}

#[test]
fn test_o_wins() {
    let b = board("XXO XO. O..");
    assert_eq!(b.winner(), Some(Player::B));
    assert_eq!(b.outcome(), Outcome::Win(Player::B));
}

#[test]
fn test_winner_is_unique_on_reachable_boards() {
    // Every board here is reachable under alternating play; at most one side
    // can hold a line.
    let fixtures = [
        "XXX OO. ...",
        "XOX OXO OXO",
        "XXO XO. O..",
        "X.O .X. O.X",
        "OXX XOO XOX",
    ];
    let holds_line = |b: &TicTacToeBoard, player: Player| {
        (0..9)
            .filter_map(from_index)
            .any(|mv| b.cell(mv.row, mv.col) == Cell::from(player) && b.completes_line(mv))
    };
    for fixture in fixtures {
        let b = board(fixture);
        let a_holds = holds_line(&b, Player::A);
        let b_holds = holds_line(&b, Player::B);
        assert!(!(a_holds && b_holds), "fixture {fixture}");
        match b.winner() {
            Some(winner) => assert!(holds_line(&b, winner), "fixture {fixture}"),
            None => assert!(!a_holds && !b_holds, "fixture {fixture}"),
        }
    }
}

#[test]
fn test_draw_game() {
    // X O X / O X O / O X O
    let b = board("XOX OXO OXO");
    assert!(b.is_full());
    assert_eq!(b.winner(), None);
    assert_eq!(b.outcome(), Outcome::Draw);
    assert!(b.legal_moves().is_empty());
}

#[test]
fn test_won_board_has_no_legal_moves() {
    let b = board("XXX OO. ...");
    assert!(b.legal_moves().is_empty());
    assert_eq!(b.available_moves().len(), 4);
}

#[test]
fn test_completes_line_after_each_move() {
    let mut b = board("XX. OO. ...");
    let winning = Move::new(0, 2);
    b.apply(winning, Player::A).unwrap();
    assert!(b.completes_line(winning));
    assert!(!b.completes_line(Move::new(1, 0)));
}

#[test]
fn test_corners_and_edges() {
    assert!(CORNERS.iter().all(|&m| is_corner(m)));
    assert!(!is_corner(CENTER));
    assert!(is_edge(Move::new(0, 1)));
    assert!(is_edge(Move::new(1, 2)));
    assert!(!is_edge(CENTER));
    assert!(!is_edge(Move::new(0, 0)));
    assert!(!is_edge(Move::new(5, 5)));
}

#[test]
fn test_index_roundtrip() {
    for i in 0..9 {
        let mv = from_index(i).unwrap();
        assert_eq!(to_index(mv), i);
    }
    assert_eq!(from_index(9), None);
}

#[test]
fn test_metadata() {
    let meta = TicTacToe::metadata();
    assert_eq!(meta.game_id, "tictactoe");
    assert_eq!(meta.board_size(), 9);
    assert_eq!(meta.win_length, 3);
    assert_eq!(meta.board_type, "grid");
}

#[test]
fn test_cells_roundtrip_through_snapshot() {
    let b = board("X.. .O. ..X");
    let restored = TicTacToeBoard::from_cells(b.cells().to_vec()).unwrap();
    assert_eq!(restored, b);
    assert_eq!(restored.cell(1, 1), Cell::PlayerB);
}
