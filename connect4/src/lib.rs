//! Connect Four board model.
//!
//! The board is a 7-column, 6-row grid. Players drop discs into a column
//! and the disc settles on the lowest open row. The first player to line
//! up four discs horizontally, vertically, or diagonally wins.
//!
//! # Board Layout
//!
//! Cells are stored in row-major order with row 0 at the bottom:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! `heights[col]` is always the number of discs in `col`, so a drop into
//! `col` lands at row `heights[col]`.
//!
//! The board does not track whose turn it is; callers pass the mover to
//! [`Board::make_move`]. This keeps the model usable as a scratch position
//! during tree search, where the mover is a property of the tree node.

use std::fmt;

pub mod position;

pub use position::{Position, PositionError};

/// Board dimensions.
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// Target line length.
pub const WIN_LENGTH: usize = 4;

/// One of the two players. Red moves first in a fresh game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Yellow,
}

impl Player {
    /// The opposing player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Yellow,
            Player::Yellow => Player::Red,
        }
    }

    /// Character used in the textual position format.
    pub fn as_char(self) -> char {
        match self {
            Player::Red => 'R',
            Player::Yellow => 'Y',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Red => write!(f, "Red"),
            Player::Yellow => write!(f, "Yellow"),
        }
    }
}

/// Terminal outcome of a game.
///
/// Values are expressed from Yellow's perspective throughout the crate
/// family: +1 for a Yellow win, -1 for a Red win, 0 for a draw. Search
/// statistics accumulate these values directly, so every node in a search
/// tree compares with the same arithmetic sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    YellowWin,
    RedWin,
    Draw,
}

impl Outcome {
    /// Fixed-perspective value: +1 Yellow win, -1 Red win, 0 draw.
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Outcome::YellowWin => 1.0,
            Outcome::RedWin => -1.0,
            Outcome::Draw => 0.0,
        }
    }

    /// The winning player, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::YellowWin => Some(Player::Yellow),
            Outcome::RedWin => Some(Player::Red),
            Outcome::Draw => None,
        }
    }
}

/// Line directions scanned for a win: horizontal, vertical, the two
/// diagonals. Expressed as (column step, row step).
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Connect Four board state.
///
/// Copies are deep: each clone owns its grid and height array, so a
/// simulated rollout can mutate a scratch copy without disturbing the
/// position seen by sibling branches of a search tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Cell contents in row-major order, row 0 at the bottom.
    cells: [Option<Player>; BOARD_SIZE],
    /// Number of discs in each column (0..=6).
    heights: [u8; COLS],
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            heights: [0; COLS],
        }
    }

    /// Convert column and row to a cell index.
    #[inline]
    fn pos(col: usize, row: usize) -> usize {
        row * COLS + col
    }

    /// Cell contents at (col, row), row 0 at the bottom.
    #[inline]
    pub fn cell(&self, col: usize, row: usize) -> Option<Player> {
        self.cells[Self::pos(col, row)]
    }

    /// Number of discs in each column.
    #[inline]
    pub fn heights(&self) -> &[u8; COLS] {
        &self.heights
    }

    /// Whether a drop into `col` is legal.
    #[inline]
    pub fn is_valid_move(&self, col: usize) -> bool {
        col < COLS && self.heights[col] < ROWS as u8
    }

    /// Drop a disc for `player` into `col`.
    ///
    /// Returns `false` without modifying the board if the move is illegal.
    /// No panic and no error type: callers are expected to check the
    /// result, and a game driver treats a rejected move as a loss for the
    /// mover.
    pub fn make_move(&mut self, col: usize, player: Player) -> bool {
        if !self.is_valid_move(col) {
            return false;
        }
        let row = self.heights[col] as usize;
        self.cells[Self::pos(col, row)] = Some(player);
        self.heights[col] += 1;
        true
    }

    /// Remove the most recent disc from `col`.
    ///
    /// Returns `false` if the column is empty. Inverse of [`make_move`]:
    /// a successful move followed by `undo_move` on the same column
    /// restores the grid and heights exactly.
    ///
    /// [`make_move`]: Board::make_move
    pub fn undo_move(&mut self, col: usize) -> bool {
        if col >= COLS || self.heights[col] == 0 {
            return false;
        }
        self.heights[col] -= 1;
        let row = self.heights[col] as usize;
        self.cells[Self::pos(col, row)] = None;
        true
    }

    /// Columns that can still accept a disc, in ascending order.
    ///
    /// The ordering is part of the contract: random choices indexed into
    /// this list must be reproducible under a fixed seed.
    pub fn legal_moves(&self) -> Vec<u8> {
        (0..COLS as u8)
            .filter(|&col| self.heights[col as usize] < ROWS as u8)
            .collect()
    }

    /// Whether every column is full.
    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h == ROWS as u8)
    }

    /// Whether `player` has four in a row anywhere on the board.
    ///
    /// Scans the whole board rather than tracking wins incrementally;
    /// the board is small enough that the scan is not a bottleneck in
    /// search rollouts.
    pub fn check_win(&self, player: Player) -> bool {
        for row in 0..ROWS as i32 {
            for col in 0..COLS as i32 {
                for (dc, dr) in DIRECTIONS {
                    let end_col = col + (WIN_LENGTH as i32 - 1) * dc;
                    let end_row = row + (WIN_LENGTH as i32 - 1) * dr;
                    if end_col < 0
                        || end_col >= COLS as i32
                        || end_row < 0
                        || end_row >= ROWS as i32
                    {
                        continue;
                    }
                    let hit = (0..WIN_LENGTH as i32).all(|i| {
                        let c = (col + i * dc) as usize;
                        let r = (row + i * dr) as usize;
                        self.cell(c, r) == Some(player)
                    });
                    if hit {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Terminal outcome of the position, or `None` if play continues.
    ///
    /// Yellow's win is checked before Red's. Both cannot hold in a
    /// reachable game, but the ordering gives Yellow precedence on
    /// hand-built boards and is kept deliberately.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.check_win(Player::Yellow) {
            return Some(Outcome::YellowWin);
        }
        if self.check_win(Player::Red) {
            return Some(Outcome::RedWin);
        }
        if self.is_full() {
            return Some(Outcome::Draw);
        }
        None
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Textual form used by position files: top row first, `O` for empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            for col in 0..COLS {
                let ch = match self.cell(col, row) {
                    Some(p) => p.as_char(),
                    None => 'O',
                };
                write!(f, "{}", ch)?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
