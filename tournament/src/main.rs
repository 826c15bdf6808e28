//! Connect Four strategy runner.
//!
//! Two modes:
//! 1. `solve` loads a position file naming an algorithm and a player to
//!    move, runs one move selection, and prints the chosen column (with
//!    per-column values at higher verbosity).
//! 2. `tournament` plays every strategy pairing for N games each over a
//!    rayon worker pool and writes a win-percentage table to a report
//!    file.

use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use connect4::Position;
use mcts::{pmcgs_search, random_move, uct_search, SearchConfig, Strategy};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

mod config;
mod game;
mod report;
mod round_robin;

use crate::config::{Cli, Command, Verbosity};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Verbose solve output includes the per-simulation trace events.
    let level = match cli.command {
        Command::Solve {
            verbosity: Verbosity::Verbose,
            ..
        } => "trace".to_string(),
        _ => cli.log_level.clone(),
    };
    init_tracing(&level)?;

    match cli.command {
        Command::Solve {
            file,
            verbosity,
            simulations,
            seed,
        } => solve(&file, verbosity, simulations, seed),
        Command::Tournament {
            games,
            workers,
            fast,
            seed,
            output,
        } => tournament(games, workers, fast, seed, &output),
    }
}

fn solve(
    file: &std::path::Path,
    verbosity: Verbosity,
    simulations: u32,
    seed: Option<u64>,
) -> Result<()> {
    let position = Position::from_file(file)
        .with_context(|| format!("failed to load position {}", file.display()))?;

    let strategy = Strategy::from_kind(&position.algorithm, simulations)
        .with_context(|| format!("unknown algorithm '{}'", position.algorithm))?;

    if matches!(
        strategy,
        Strategy::Pmcgs { simulations: 0 } | Strategy::Uct { simulations: 0 }
    ) {
        bail!(
            "algorithm '{}' requires a positive simulation count",
            position.algorithm
        );
    }

    let mut rng = match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    info!(algorithm = %position.algorithm, player = %position.to_move, "solving position");

    let best = match strategy {
        Strategy::UniformRandom => random_move(&position.board, &mut rng),
        Strategy::Pmcgs { simulations } | Strategy::Uct { simulations } => {
            let config = SearchConfig::default().with_simulations(simulations);
            let result = match strategy {
                Strategy::Pmcgs { .. } => {
                    pmcgs_search(&position.board, position.to_move, config, &mut rng)
                }
                _ => uct_search(&position.board, position.to_move, config, &mut rng),
            };

            if verbosity != Verbosity::None {
                print!("{}", report::format_column_values(&position.board, &result));
            }
            result.best
        }
    };

    match best {
        // Column numbering is 1-indexed in all printed output.
        Some(col) => println!("FINAL Move selected: {}", col + 1),
        None => bail!("no legal moves in position"),
    }

    Ok(())
}

fn tournament(
    games: u32,
    workers: usize,
    fast: bool,
    seed: Option<u64>,
    output: &std::path::Path,
) -> Result<()> {
    if workers > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build_global()
            .context("failed to configure worker pool")?;
    }

    let entries = if fast {
        round_robin::fast_lineup()
    } else {
        round_robin::standard_lineup()
    };

    let seed = match seed {
        Some(seed) => seed,
        None => {
            use rand::Rng;
            ChaCha20Rng::from_entropy().gen()
        }
    };

    info!(games, workers, fast, seed, "starting round-robin tournament");

    let start = Instant::now();
    let matrix = round_robin::run_round_robin(&entries, games, seed);
    let elapsed = start.elapsed();

    println!("{}", report::format_table(&matrix));
    println!("Tournament completed in {:.2} seconds", elapsed.as_secs_f64());

    report::write_report(output, &matrix, games, elapsed)
        .with_context(|| format!("failed to write report to {}", output.display()))?;
    info!(path = %output.display(), "report written");

    Ok(())
}
