//! Result table formatting and report-file output.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use connect4::{Board, COLS};
use mcts::SearchResult;

use crate::round_robin::ScoreMatrix;

const CELL_WIDTH: usize = 14;

/// Render the score matrix as a fixed-width table: row labels down the
/// left, `-` on the diagonal, one decimal with a percent sign.
pub fn format_table(matrix: &ScoreMatrix) -> String {
    let names = matrix.names();
    let mut out = String::new();

    let mut header = " ".repeat(CELL_WIDTH);
    for name in names {
        header.push_str(&pad(name));
    }
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(header.len()));
    out.push('\n');

    for (row, name) in names.iter().enumerate() {
        let mut line = pad(name);
        for col in 0..names.len() {
            match matrix.get(row, col) {
                Some(score) => line.push_str(&pad(&format!("{:5.1}%", score))),
                None => line.push_str(&pad("-")),
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn pad(cell: &str) -> String {
    format!("{:<width$}", cell, width = CELL_WIDTH)
}

/// Write the tournament report: header lines plus the score table.
pub fn write_report<P: AsRef<Path>>(
    path: P,
    matrix: &ScoreMatrix,
    games_per_pairing: u32,
    elapsed: Duration,
) -> Result<()> {
    let path = path.as_ref();
    let mut file = fs::File::create(path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;

    writeln!(file, "Connect Four MCTS Tournament Results")?;
    writeln!(file, "Games per match: {}", games_per_pairing)?;
    writeln!(file, "Total time: {:.2} seconds", elapsed.as_secs_f64())?;
    writeln!(file)?;
    writeln!(file, "Win percentages (row algorithm vs column algorithm):")?;
    writeln!(file)?;
    write!(file, "{}", format_table(matrix))?;

    Ok(())
}

/// Per-column value summary after a search, in the position file's
/// 1-indexed column numbering: `Null` for illegal columns, `0.000` for
/// legal columns the search never visited.
pub fn format_column_values(board: &Board, result: &SearchResult) -> String {
    let mut out = String::new();
    for col in 0..COLS as u8 {
        if !board.is_valid_move(col as usize) {
            out.push_str(&format!("Column {}: Null\n", col + 1));
            continue;
        }
        match result.child(col) {
            Some(stat) if stat.visits > 0 => {
                out.push_str(&format!("Column {}: {:.3}\n", col + 1, stat.mean_value));
            }
            _ => out.push_str(&format!("Column {}: 0.000\n", col + 1)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round_robin::run_round_robin;
    use connect4::Player;
    use mcts::{uct_search, SearchConfig, Strategy};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn small_matrix() -> ScoreMatrix {
        let entries = vec![
            ("ur_a".to_string(), Strategy::UniformRandom),
            ("ur_b".to_string(), Strategy::UniformRandom),
        ];
        run_round_robin(&entries, 4, 3)
    }

    #[test]
    fn test_table_layout() {
        let table = format_table(&small_matrix());
        let lines: Vec<&str> = table.lines().collect();

        // Header, divider, one line per entry.
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("ur_a") && lines[0].contains("ur_b"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].starts_with("ur_a"));
        // Diagonal cell is a dash, off-diagonal carries a percent sign.
        assert!(lines[2].contains('-'));
        assert!(lines[2].contains('%'));
    }

    #[test]
    fn test_report_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");

        write_report(&path, &small_matrix(), 4, Duration::from_millis(1500)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Games per match: 4"));
        assert!(contents.contains("Total time: 1.50 seconds"));
        assert!(contents.contains("ur_a"));
    }

    #[test]
    fn test_column_values_mark_illegal_columns_null() {
        // Fill column 2 without completing four in a row.
        let mut board = Board::new();
        for player in [
            Player::Red,
            Player::Red,
            Player::Yellow,
            Player::Yellow,
            Player::Red,
            Player::Red,
        ] {
            board.make_move(2, player);
        }

        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let result = uct_search(&board, Player::Yellow, SearchConfig::for_testing(), &mut rng);
        let summary = format_column_values(&board, &result);

        assert!(summary.contains("Column 3: Null"));
        assert!(summary.lines().count() == COLS);
        // Every other column is legal and visited, so it reports a value.
        assert!(summary.contains("Column 1: "));
        assert!(!summary.contains("Column 1: Null"));
    }
}
