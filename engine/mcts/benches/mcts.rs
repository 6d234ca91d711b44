//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full MCTS search with varying simulation counts
//! - Tree operations (expansion, selection, backpropagation)
//! - Search from different game states (opening, midgame, near-terminal)
//! - Backpropagation mode and playout policy comparison

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use engine_core::{Outcome, Player};
use games_connect4::Connect4Board;
use games_tictactoe::TicTacToeBoard;
use mcts::{BackpropMode, MctsConfig, MctsSearch, MctsTree, PlayoutPolicy};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

// =============================================================================
// Full MCTS Search Benchmarks
// =============================================================================

fn bench_mcts_search_simulations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_simulations");

    for sims in [50, 200, 800, 3000] {
        group.throughput(Throughput::Elements(sims as u64));
        group.bench_with_input(BenchmarkId::new("tictactoe", sims), &sims, |b, &sims| {
            let board = TicTacToeBoard::new();
            let config = MctsConfig::default().with_simulations(sims);

            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                let mut search = MctsSearch::new(&board, Player::A, config.clone()).unwrap();
                black_box(search.run(&mut rng))
            });
        });

        group.bench_with_input(BenchmarkId::new("connect4", sims), &sims, |b, &sims| {
            let board = Connect4Board::new();
            let config = MctsConfig::default().with_simulations(sims);

            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                let mut search = MctsSearch::new(&board, Player::A, config.clone()).unwrap();
                black_box(search.run(&mut rng))
            });
        });
    }

    group.finish();
}

fn bench_mcts_game_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_game_phases");
    let config = MctsConfig::for_testing();

    let positions = [
        ("opening", "... ... ...", Player::A),
        ("midgame", "O.X .X. O..", Player::A),
        ("near_terminal", "XX. OO. ...", Player::A),
    ];

    for (name, rows, player) in positions {
        let board: TicTacToeBoard = rows.parse().unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                let mut search = MctsSearch::new(&board, player, config.clone()).unwrap();
                black_box(search.run(&mut rng))
            });
        });
    }

    group.finish();
}

// =============================================================================
// Tree Operation Benchmarks
// =============================================================================

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_tree_ops");

    group.bench_function("expand_root_connect4", |b| {
        b.iter(|| {
            let mut tree = MctsTree::new(Connect4Board::new(), Player::A);
            black_box(tree.expand(tree.root()))
        });
    });

    group.bench_function("select_child", |b| {
        let mut tree = MctsTree::new(TicTacToeBoard::new(), Player::A);
        tree.expand(tree.root());

        // Give each child a different record
        let children = tree.get(tree.root()).children.clone();
        for (i, id) in children.into_iter().enumerate() {
            let child = tree.get_mut(id);
            child.visits = (i as u32 + 1) * 10;
            child.wins = (i as i64 - 4) * child.visits as i64 / 10;
        }
        tree.get_mut(tree.root()).visits = 450;

        b.iter(|| black_box(tree.select_child(tree.root(), 2.0)));
    });

    group.bench_function("backpropagate_depth_5", |b| {
        b.iter_batched(
            || {
                let mut tree = MctsTree::new(TicTacToeBoard::new(), Player::A);
                let mut leaf = tree.root();
                for _ in 0..5 {
                    tree.expand(leaf);
                    leaf = tree.get(leaf).children[0];
                }
                (tree, leaf)
            },
            |(mut tree, leaf)| {
                tree.backpropagate(
                    leaf,
                    Outcome::Win(Player::A),
                    BackpropMode::Absolute,
                    Player::A,
                );
                black_box(tree)
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// =============================================================================
// Configuration Comparison Benchmarks
// =============================================================================

fn bench_mcts_configs(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_configs");
    let board = TicTacToeBoard::new();

    let configs = [
        ("absolute_random", MctsConfig::for_testing()),
        (
            "alternating_random",
            MctsConfig::for_testing().with_backprop(BackpropMode::Alternating),
        ),
        (
            "absolute_greedy",
            MctsConfig::for_testing().with_playout(PlayoutPolicy::GreedyWin),
        ),
    ];

    for (name, config) in configs {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                let mut search = MctsSearch::new(&board, Player::A, config.clone()).unwrap();
                black_box(search.run(&mut rng))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_mcts_search_simulations,
    bench_mcts_game_phases,
    bench_tree_operations,
    bench_mcts_configs,
);
criterion_main!(benches);
