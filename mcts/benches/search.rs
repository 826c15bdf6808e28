//! Search benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full searches with varying simulation counts
//! - PMCGS vs UCT at the same budget
//! - Search from different game phases (opening, midgame)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use connect4::{Board, Player};
use mcts::{pmcgs_search, uct_search, SearchConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// A midgame position reached by a fixed opening sequence.
fn midgame_board() -> Board {
    let mut board = Board::new();
    let moves = [3usize, 3, 2, 4, 4, 2, 5, 1, 3, 0];
    let mut player = Player::Red;
    for col in moves {
        board.make_move(col, player);
        player = player.opponent();
    }
    board
}

fn bench_search_simulations(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_simulations");

    for sims in [50u32, 200, 500, 2000] {
        group.throughput(Throughput::Elements(sims as u64));
        group.bench_with_input(BenchmarkId::new("uct", sims), &sims, |b, &sims| {
            let board = Board::new();
            let config = SearchConfig::default().with_simulations(sims);
            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                black_box(uct_search(&board, Player::Red, config, &mut rng))
            });
        });
        group.bench_with_input(BenchmarkId::new("pmcgs", sims), &sims, |b, &sims| {
            let board = Board::new();
            let config = SearchConfig::default().with_simulations(sims);
            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                black_box(pmcgs_search(&board, Player::Red, config, &mut rng))
            });
        });
    }

    group.finish();
}

fn bench_search_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_phases");
    let config = SearchConfig::default().with_simulations(500);

    group.bench_function("uct_opening", |b| {
        let board = Board::new();
        b.iter(|| {
            let mut rng = ChaCha20Rng::seed_from_u64(7);
            black_box(uct_search(&board, Player::Red, config, &mut rng))
        });
    });

    group.bench_function("uct_midgame", |b| {
        let board = midgame_board();
        b.iter(|| {
            let mut rng = ChaCha20Rng::seed_from_u64(7);
            black_box(uct_search(&board, Player::Red, config, &mut rng))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_search_simulations, bench_search_phases);
criterion_main!(benches);
