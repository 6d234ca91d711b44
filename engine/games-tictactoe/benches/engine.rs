use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use engine_core::{Move, Player};
use games_tictactoe::{TicTacToeBoard, CENTER};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_moves");

    group.bench_function("available_moves_empty", |b| {
        let board = TicTacToeBoard::new();
        b.iter(|| board.available_moves());
    });

    group.bench_function("apply_center", |b| {
        b.iter_batched(
            TicTacToeBoard::new,
            |mut board| {
                board.apply(CENTER, Player::A).unwrap();
                board
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_winner(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_winner");

    group.bench_function("winner_full_draw", |b| {
        let board: TicTacToeBoard = "XOX OXO OXO".parse().unwrap();
        b.iter(|| board.winner());
    });

    group.bench_function("completes_line", |b| {
        let board: TicTacToeBoard = "XXX OO. ...".parse().unwrap();
        b.iter(|| board.completes_line(Move::new(0, 1)));
    });

    group.finish();
}

fn bench_random_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_playout");
    group.bench_function("random_game", |b| {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        b.iter(|| {
            let mut board = TicTacToeBoard::new();
            let mut player = Player::A;
            while !board.is_terminal() {
                let moves = board.available_moves();
                let mv = *moves.choose(&mut rng).unwrap();
                board.play_generated(mv, player);
                player = player.opponent();
            }
            board.outcome()
        });
    });
    group.finish();
}

criterion_group!(benches, bench_moves, bench_winner, bench_random_game);
criterion_main!(benches);
