//! Single-game simulation.
//!
//! Drives one full game between two move selectors. The routine is a
//! pure function of (red selector, yellow selector, seed), so a parallel
//! driver can run games independently with no shared state.

use connect4::{Board, Outcome, Player};
use mcts::Strategy;
use rand_chacha::ChaCha20Rng;
use rand::SeedableRng;
use tracing::trace;

/// Anything that can pick a column for the player to move.
///
/// The tournament driver is generic over this seam so tests can inject
/// deterministic stubs; production code only ever passes [`Strategy`].
pub trait MoveSelector: Sync {
    /// Choose a column, or `None` if the selector has no move to offer.
    fn choose(&self, board: &Board, to_move: Player, rng: &mut ChaCha20Rng) -> Option<u8>;
}

impl MoveSelector for Strategy {
    fn choose(&self, board: &Board, to_move: Player, rng: &mut ChaCha20Rng) -> Option<u8> {
        self.select_move(board, to_move, rng)
    }
}

/// Result of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    RedWins,
    YellowWins,
    Draw,
}

impl GameOutcome {
    /// The winning player, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::RedWins => Some(Player::Red),
            GameOutcome::YellowWins => Some(Player::Yellow),
            GameOutcome::Draw => None,
        }
    }

    fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::RedWin => GameOutcome::RedWins,
            Outcome::YellowWin => GameOutcome::YellowWins,
            Outcome::Draw => GameOutcome::Draw,
        }
    }

    /// Outcome when `player` forfeits by offering no move or an illegal one.
    fn loss_for(player: Player) -> Self {
        match player {
            Player::Red => GameOutcome::YellowWins,
            Player::Yellow => GameOutcome::RedWins,
        }
    }
}

/// A completed game: its outcome and the column sequence played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    pub moves: Vec<u8>,
}

/// Play one game from an empty board, Red moving first.
///
/// A selector that returns `None` or proposes a move the board rejects
/// loses on the spot. That is the contract for malformed selector
/// output: treat it as resignation rather than crash the tournament.
pub fn simulate_game<R, Y>(red: &R, yellow: &Y, seed: u64) -> GameRecord
where
    R: MoveSelector,
    Y: MoveSelector,
{
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut board = Board::new();
    let mut player = Player::Red;
    let mut moves = Vec::new();

    loop {
        let chosen = match player {
            Player::Red => red.choose(&board, player, &mut rng),
            Player::Yellow => yellow.choose(&board, player, &mut rng),
        };

        let col = match chosen {
            Some(col) => col,
            None => {
                trace!(?player, "selector offered no move, forfeits");
                return GameRecord {
                    outcome: GameOutcome::loss_for(player),
                    moves,
                };
            }
        };

        if !board.make_move(col as usize, player) {
            trace!(?player, col, "illegal move, forfeits");
            return GameRecord {
                outcome: GameOutcome::loss_for(player),
                moves,
            };
        }
        moves.push(col);

        if let Some(outcome) = board.outcome() {
            return GameRecord {
                outcome: GameOutcome::from_outcome(outcome),
                moves,
            };
        }

        player = player.opponent();
    }
}
