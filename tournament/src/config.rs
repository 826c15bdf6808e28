//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// How much search detail the solve command prints.
///
/// `Verbose` additionally raises the tracing filter so per-simulation
/// events become visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Verbosity {
    None,
    Brief,
    Verbose,
}

#[derive(Parser, Debug)]
#[command(name = "tournament")]
#[command(about = "Connect Four move selection and strategy tournaments")]
#[command(
    long_about = "Plays Connect Four with uniform random, PMCGS, and UCT move
selection. `solve` runs one strategy on a position file; `tournament` pits the
strategies against each other in a round-robin and writes a results table."
)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Select a move for the position in a file.
    Solve {
        /// Position file: algorithm, player to move, then six grid rows.
        file: PathBuf,

        /// Output detail.
        #[arg(value_enum, default_value_t = Verbosity::None)]
        verbosity: Verbosity,

        /// Simulation budget for PMCGS/UCT (ignored by UR).
        #[arg(default_value_t = 0)]
        simulations: u32,

        /// RNG seed; drawn from the OS when omitted.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run the round-robin tournament.
    Tournament {
        /// Games per algorithm pairing.
        #[arg(default_value_t = 100)]
        games: u32,

        /// Worker threads for parallel games (0 = one per CPU).
        #[arg(long, default_value_t = 0)]
        workers: usize,

        /// Use the reduced simulation budgets for a quick smoke run.
        #[arg(long)]
        fast: bool,

        /// Master RNG seed; drawn from the OS when omitted.
        #[arg(long)]
        seed: Option<u64>,

        /// Report file path.
        #[arg(long, default_value = "tournament_results.txt")]
        output: PathBuf,
    },
}
