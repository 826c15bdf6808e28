//! Round-robin tournament driver.
//!
//! Every ordered pair of distinct entries plays N independent games,
//! alternating which entry takes Red each game so neither label is
//! structurally favored by the first-move advantage. Games inside a
//! pairing fan out across the rayon thread pool; each game owns its own
//! board, tree, and RNG, so the only synchronization point is the
//! associative win/draw reduction at the end of a pairing.

use connect4::Player;
use mcts::Strategy;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use tracing::info;

use crate::game::{simulate_game, MoveSelector};

/// Win percentages per ordered pairing; `None` on the diagonal.
#[derive(Debug, Clone)]
pub struct ScoreMatrix {
    names: Vec<String>,
    scores: Vec<Option<f64>>,
}

impl ScoreMatrix {
    fn new(names: Vec<String>) -> Self {
        let n = names.len();
        Self {
            names,
            scores: vec![None; n * n],
        }
    }

    /// Entry labels in table order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Row entry's win percentage against the column entry, `None` on
    /// the diagonal.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.scores[row * self.names.len() + col]
    }

    fn set(&mut self, row: usize, col: usize, score: f64) {
        let n = self.names.len();
        self.scores[row * n + col] = Some(score);
    }
}

/// Standard lineup: the baseline plus both engines at two budgets.
pub fn standard_lineup() -> Vec<(String, Strategy)> {
    lineup_with_budgets(500, 10_000)
}

/// Reduced-budget lineup for smoke runs.
pub fn fast_lineup() -> Vec<(String, Strategy)> {
    lineup_with_budgets(50, 500)
}

fn lineup_with_budgets(low: u32, high: u32) -> Vec<(String, Strategy)> {
    [
        Strategy::UniformRandom,
        Strategy::Pmcgs { simulations: low },
        Strategy::Pmcgs { simulations: high },
        Strategy::Uct { simulations: low },
        Strategy::Uct { simulations: high },
    ]
    .into_iter()
    .map(|s| (s.label(), s))
    .collect()
}

/// Play every ordered pairing of distinct entries for `games_per_pairing`
/// games and collect the score matrix.
///
/// Per-game seeds are drawn from a master generator before any game is
/// dispatched, so the result is reproducible for a fixed `seed` no
/// matter how games are scheduled across workers, and the reduction
/// over game outcomes is order-independent.
pub fn run_round_robin<S: MoveSelector>(
    entries: &[(String, S)],
    games_per_pairing: u32,
    seed: u64,
) -> ScoreMatrix {
    let names: Vec<String> = entries.iter().map(|(name, _)| name.clone()).collect();
    let mut matrix = ScoreMatrix::new(names);
    let mut master = ChaCha20Rng::seed_from_u64(seed);

    for row in 0..entries.len() {
        for col in 0..entries.len() {
            if row == col {
                continue;
            }

            let seeds: Vec<u64> = (0..games_per_pairing).map(|_| master.gen()).collect();
            let score = run_pairing(&entries[row].1, &entries[col].1, &seeds);

            info!(
                row = %entries[row].0,
                col = %entries[col].0,
                games = games_per_pairing,
                score,
                "pairing complete"
            );
            matrix.set(row, col, score);
        }
    }

    matrix
}

/// Run one pairing in parallel and score it for the row entry:
/// `(wins + 0.5 * draws) / games * 100`.
fn run_pairing<S: MoveSelector>(row: &S, col: &S, seeds: &[u64]) -> f64 {
    if seeds.is_empty() {
        return 0.0;
    }

    let (wins, draws) = seeds
        .par_iter()
        .enumerate()
        .map(|(game, &game_seed)| {
            // Even-indexed games give Red to the row entry.
            let row_is_red = game % 2 == 0;
            let record = if row_is_red {
                simulate_game(row, col, game_seed)
            } else {
                simulate_game(col, row, game_seed)
            };

            match record.outcome.winner() {
                Some(winner) => {
                    let row_won = (winner == Player::Red) == row_is_red;
                    if row_won {
                        (1u32, 0u32)
                    } else {
                        (0, 0)
                    }
                }
                None => (0, 1),
            }
        })
        .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));

    (wins as f64 + 0.5 * draws as f64) / seeds.len() as f64 * 100.0
}
