//! Textual position loading.
//!
//! A position file names the algorithm to run, the player to move, and
//! the grid, top row first:
//!
//! ```text
//! UCT
//! R
//! OOOOOOO
//! OOOOOOO
//! OOOOOOO
//! OOOOOOO
//! OOOYOOO
//! OOORYOO
//! ```
//!
//! Parsing fails fast on malformed input rather than guessing: a short
//! file, an irregular grid line, a bad cell character, or a disc with an
//! empty cell beneath it are all hard errors.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::{Board, Player, COLS, ROWS};

/// Errors from parsing a position file.
#[derive(Debug, Error)]
pub enum PositionError {
    #[error("failed to read position file: {0}")]
    Io(#[from] std::io::Error),

    #[error("position file has {actual} lines, expected at least {expected}")]
    TooShort { expected: usize, actual: usize },

    #[error("invalid player '{0}', expected 'R' or 'Y'")]
    InvalidPlayer(String),

    #[error("grid line {row} has {actual} cells, expected {expected}")]
    IrregularRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid cell '{ch}' at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, ch: char },

    #[error("floating disc in column {col}: occupied cell above an empty one")]
    FloatingDisc { col: usize },
}

/// A loaded position: which algorithm to run, who moves, and the board.
///
/// The algorithm name is kept as text; mapping it onto a concrete
/// strategy is the caller's concern.
#[derive(Debug, Clone)]
pub struct Position {
    pub algorithm: String,
    pub to_move: Player,
    pub board: Board,
}

impl Position {
    /// Parse a position from file contents.
    pub fn parse(input: &str) -> Result<Self, PositionError> {
        let lines: Vec<&str> = input.lines().map(str::trim_end).collect();
        let expected = 2 + ROWS;
        if lines.len() < expected {
            return Err(PositionError::TooShort {
                expected,
                actual: lines.len(),
            });
        }

        let algorithm = lines[0].trim().to_string();
        let to_move = match lines[1].trim() {
            "R" => Player::Red,
            "Y" => Player::Yellow,
            other => return Err(PositionError::InvalidPlayer(other.to_string())),
        };

        // Grid lines run top row first; board rows run bottom first.
        let mut cells = [[None; ROWS]; COLS];
        for (line_idx, line) in lines[2..2 + ROWS].iter().enumerate() {
            let row = ROWS - 1 - line_idx;
            let chars: Vec<char> = line.trim().chars().collect();
            if chars.len() != COLS {
                return Err(PositionError::IrregularRow {
                    row: line_idx,
                    expected: COLS,
                    actual: chars.len(),
                });
            }
            for (col, &ch) in chars.iter().enumerate() {
                cells[col][row] = match ch {
                    'R' => Some(Player::Red),
                    'Y' => Some(Player::Yellow),
                    'O' => None,
                    _ => {
                        return Err(PositionError::InvalidCell {
                            row: line_idx,
                            col,
                            ch,
                        })
                    }
                };
            }
        }

        // Rebuild by replaying each column bottom-up. A disc above an
        // empty cell cannot be replayed and is rejected.
        let mut board = Board::new();
        for col in 0..COLS {
            let mut seen_empty = false;
            for row in 0..ROWS {
                match cells[col][row] {
                    Some(player) => {
                        if seen_empty {
                            return Err(PositionError::FloatingDisc { col });
                        }
                        board.make_move(col, player);
                    }
                    None => seen_empty = true,
                }
            }
        }

        Ok(Self {
            algorithm,
            to_move,
            board,
        })
    }

    /// Load and parse a position file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PositionError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }
}
