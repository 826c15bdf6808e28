//! Move-selection strategies.
//!
//! Three strategies are provided as a closed set:
//!
//! - **Uniform random** picks among legal columns with no search.
//! - **PMCGS** (Pure Monte Carlo Game Search) builds a tree, descending
//!   uniformly at random among expanded children.
//! - **UCT** is identical except descent uses UCB selection.
//!
//! Both tree searches run the same simulation shape: descend while the
//! current node is fully expanded and has children, expand one random
//! untried move, roll out with random play to a terminal state, then
//! backpropagate the outcome value to every node on the path. Values are
//! stored from Yellow's perspective everywhere; see [`crate::node`].

use connect4::{Board, Player};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::config::SearchConfig;
use crate::tree::SearchTree;

/// A move-selection strategy with its simulation budget.
///
/// Modeled as a tagged union rather than open-ended trait objects: the
/// set of strategies is closed and dispatch happens once per move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    UniformRandom,
    Pmcgs { simulations: u32 },
    Uct { simulations: u32 },
}

impl Strategy {
    /// Map an algorithm name from a position file onto a strategy.
    /// `simulations` is the CLI parameter; it is ignored for `UR`.
    pub fn from_kind(kind: &str, simulations: u32) -> Option<Strategy> {
        match kind {
            "UR" => Some(Strategy::UniformRandom),
            "PMCGS" => Some(Strategy::Pmcgs { simulations }),
            "UCT" => Some(Strategy::Uct { simulations }),
            _ => None,
        }
    }

    /// Label used in tournament tables, e.g. `UCT_10000`.
    pub fn label(&self) -> String {
        match self {
            Strategy::UniformRandom => "UR".to_string(),
            Strategy::Pmcgs { simulations } => format!("PMCGS_{}", simulations),
            Strategy::Uct { simulations } => format!("UCT_{}", simulations),
        }
    }

    /// Choose a column for `to_move`, or `None` if no legal move exists.
    ///
    /// Pure given the RNG state: the same board, player, and seed always
    /// produce the same move.
    pub fn select_move(
        &self,
        board: &Board,
        to_move: Player,
        rng: &mut ChaCha20Rng,
    ) -> Option<u8> {
        match *self {
            Strategy::UniformRandom => random_move(board, rng),
            Strategy::Pmcgs { simulations } => {
                let config = SearchConfig::default().with_simulations(simulations);
                pmcgs_search(board, to_move, config, rng).best
            }
            Strategy::Uct { simulations } => {
                let config = SearchConfig::default().with_simulations(simulations);
                uct_search(board, to_move, config, rng).best
            }
        }
    }
}

/// Uniform-random move selection. No search, no retained state.
pub fn random_move(board: &Board, rng: &mut ChaCha20Rng) -> Option<u8> {
    let legal = board.legal_moves();
    if legal.is_empty() {
        return None;
    }
    Some(legal[rng.gen_range(0..legal.len())])
}

/// Statistics for one root child after a search.
#[derive(Debug, Clone, Copy)]
pub struct ChildStat {
    pub column: u8,
    pub visits: u32,
    pub mean_value: f64,
}

/// Result of a tree search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Chosen column, `None` if no child was ever visited (which
    /// requires a zero budget or a board with no legal moves).
    pub best: Option<u8>,

    /// Mean value at the root, from Yellow's perspective.
    pub value: f64,

    /// Simulations recorded at the root.
    pub simulations: u32,

    /// Per-child statistics in expansion order.
    pub children: Vec<ChildStat>,
}

impl SearchResult {
    /// Statistics for the child reached by playing `column`, if expanded.
    pub fn child(&self, column: u8) -> Option<&ChildStat> {
        self.children.iter().find(|c| c.column == column)
    }
}

/// Descent rule distinguishing the two tree searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DescentPolicy {
    /// Uniform random among expanded children (PMCGS).
    Uniform,
    /// UCB with unexplored-child priority (UCT).
    Ucb,
}

/// Run a PMCGS search and report root statistics.
pub fn pmcgs_search(
    board: &Board,
    to_move: Player,
    config: SearchConfig,
    rng: &mut ChaCha20Rng,
) -> SearchResult {
    run_search(board, to_move, config, DescentPolicy::Uniform, rng)
}

/// Run a UCT search and report root statistics.
pub fn uct_search(
    board: &Board,
    to_move: Player,
    config: SearchConfig,
    rng: &mut ChaCha20Rng,
) -> SearchResult {
    run_search(board, to_move, config, DescentPolicy::Ucb, rng)
}

fn run_search(
    board: &Board,
    to_move: Player,
    config: SearchConfig,
    policy: DescentPolicy,
    rng: &mut ChaCha20Rng,
) -> SearchResult {
    let mut tree = SearchTree::new(to_move, board.legal_moves());

    for _ in 0..config.simulations {
        simulate(&mut tree, board, config.exploration, policy, rng);
    }

    let root = tree.get(tree.root());
    let children: Vec<ChildStat> = root
        .children
        .iter()
        .map(|&(column, id)| {
            let node = tree.get(id);
            ChildStat {
                column,
                visits: node.visits,
                mean_value: node.mean_value(),
            }
        })
        .collect();

    let best = tree.best_final_move();
    debug!(
        ?policy,
        ?to_move,
        best,
        root_visits = root.visits,
        nodes = tree.len(),
        "search complete"
    );

    SearchResult {
        best,
        value: root.mean_value(),
        simulations: root.visits,
        children,
    }
}

/// One simulation: descend, expand, roll out, backpropagate.
fn simulate(
    tree: &mut SearchTree,
    root_board: &Board,
    exploration: f64,
    policy: DescentPolicy,
    rng: &mut ChaCha20Rng,
) {
    // Scratch copy owned by this simulation; the tree never stores
    // board state, it replays moves along the descent.
    let mut board = root_board.clone();
    let mut current = tree.root();
    let mut path = vec![current];

    // Descent: stop at the first node that still has an untried move,
    // has no children, or is terminal on the scratch board.
    loop {
        let node = tree.get(current);
        if !node.is_fully_expanded() || node.children.is_empty() {
            break;
        }
        let selected = match policy {
            DescentPolicy::Uniform => tree.select_child_uniform(current, rng),
            DescentPolicy::Ucb => tree.select_child_ucb(current, exploration, rng),
        };
        let child = match selected {
            Some(child) => child,
            None => break,
        };
        let mover = tree.get(current).to_move;
        if let Some(action) = tree.get(child).action {
            board.make_move(action as usize, mover);
            trace!(action, ?mover, "descent move");
        }
        path.push(child);
        current = child;
    }

    let mut outcome = board.outcome();

    // Expansion: one random untried move, child owned by the opponent.
    if outcome.is_none() && !tree.get(current).is_fully_expanded() {
        let node = tree.get_mut(current);
        let idx = rng.gen_range(0..node.untried.len());
        let action = node.untried.swap_remove(idx);
        let mover = node.to_move;

        let placed = board.make_move(action as usize, mover);
        debug_assert!(placed, "untried moves are legal by construction");

        let child = tree.add_child(current, action, mover.opponent(), board.legal_moves());
        trace!(action, ?mover, "node added");
        path.push(child);
        current = child;
        outcome = board.outcome();
    }

    // Rollout from the leaf, then backpropagate the fixed-perspective
    // value unchanged to every node on the path.
    let value = match outcome {
        Some(outcome) => outcome.value(),
        None => rollout(&mut board, tree.get(current).to_move, rng),
    };
    trace!(value, depth = path.len(), "terminal value");
    tree.backpropagate(&path, value);
}

/// Random play-out to a terminal state. A position with no legal moves
/// and no detected terminal is scored as a draw defensively; a full
/// board is always terminal, so the branch should be unreachable.
fn rollout(board: &mut Board, first: Player, rng: &mut ChaCha20Rng) -> f64 {
    let mut player = first;
    loop {
        if let Some(outcome) = board.outcome() {
            return outcome.value();
        }
        let legal = board.legal_moves();
        if legal.is_empty() {
            return 0.0;
        }
        let col = legal[rng.gen_range(0..legal.len())];
        board.make_move(col as usize, player);
        player = player.opponent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect4::COLS;
    use rand::SeedableRng;

    fn rng(seed: u64) -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(seed)
    }

    /// Yellow has three discs stacked in column 0; the fourth cell is open.
    fn vertical_threat_board() -> Board {
        let mut board = Board::new();
        for _ in 0..3 {
            board.make_move(0, Player::Yellow);
        }
        // Red's earlier replies, away from the threat.
        board.make_move(5, Player::Red);
        board.make_move(6, Player::Red);
        board.make_move(6, Player::Red);
        board
    }

    #[test]
    fn test_random_move_is_legal() {
        let board = Board::new();
        let mut rng = rng(1);
        for _ in 0..50 {
            let col = random_move(&board, &mut rng).unwrap();
            assert!(board.is_valid_move(col as usize));
        }
    }

    #[test]
    fn test_random_move_none_on_full_board() {
        let mut board = Board::new();
        for col in 0..COLS {
            let player = if col % 2 == 0 { Player::Red } else { Player::Yellow };
            for _ in 0..6 {
                board.make_move(col, player);
            }
        }
        assert_eq!(random_move(&board, &mut rng(1)), None);
    }

    #[test]
    fn test_search_expands_every_root_move() {
        let board = Board::new();
        let result = uct_search(
            &board,
            Player::Red,
            SearchConfig::for_testing(),
            &mut rng(3),
        );

        // 50 simulations on an empty board: all 7 columns expanded and
        // visited at least once.
        assert_eq!(result.children.len(), COLS);
        assert!(result.children.iter().all(|c| c.visits > 0));
        assert_eq!(result.simulations, 50);
        assert!(result.best.is_some());
    }

    #[test]
    fn test_zero_budget_yields_no_move() {
        let board = Board::new();
        let config = SearchConfig::default().with_simulations(0);
        let result = pmcgs_search(&board, Player::Red, config, &mut rng(4));
        assert_eq!(result.best, None);
        assert!(result.children.is_empty());
    }

    #[test]
    fn test_uct_takes_immediate_win() {
        let board = vertical_threat_board();
        let config = SearchConfig::default().with_simulations(1000);
        let result = uct_search(&board, Player::Yellow, config, &mut rng(5));

        assert_eq!(result.best, Some(0), "Yellow should complete the line");
        // Every simulation through the winning child is an immediate
        // Yellow win, so its mean is exactly +1.
        let win = result.child(0).unwrap();
        assert!((win.mean_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pmcgs_takes_immediate_win() {
        let board = vertical_threat_board();
        let config = SearchConfig::default().with_simulations(1000);
        let result = pmcgs_search(&board, Player::Yellow, config, &mut rng(6));
        assert_eq!(result.best, Some(0));
    }

    #[test]
    fn test_uct_blocks_forced_loss() {
        // Red to move against the open three: any column except 0 hands
        // Yellow the game.
        let board = vertical_threat_board();
        let config = SearchConfig::default().with_simulations(5000);
        let result = uct_search(&board, Player::Red, config, &mut rng(7));
        assert_eq!(result.best, Some(0), "Red must block column 0");
    }

    #[test]
    fn test_pmcgs_blocks_forced_loss() {
        let board = vertical_threat_board();
        let config = SearchConfig::default().with_simulations(5000);
        let result = pmcgs_search(&board, Player::Red, config, &mut rng(8));
        assert_eq!(result.best, Some(0), "Red must block column 0");
    }

    #[test]
    fn test_search_is_deterministic_under_fixed_seed() {
        let board = vertical_threat_board();
        let config = SearchConfig::default().with_simulations(500);

        let a = uct_search(&board, Player::Red, config, &mut rng(42));
        let b = uct_search(&board, Player::Red, config, &mut rng(42));

        assert_eq!(a.best, b.best);
        assert_eq!(a.simulations, b.simulations);
        for (x, y) in a.children.iter().zip(b.children.iter()) {
            assert_eq!(x.column, y.column);
            assert_eq!(x.visits, y.visits);
            assert_eq!(x.mean_value, y.mean_value);
        }
    }

    #[test]
    fn test_strategy_labels() {
        assert_eq!(Strategy::UniformRandom.label(), "UR");
        assert_eq!(Strategy::Pmcgs { simulations: 500 }.label(), "PMCGS_500");
        assert_eq!(Strategy::Uct { simulations: 10_000 }.label(), "UCT_10000");
    }

    #[test]
    fn test_strategy_from_kind() {
        assert_eq!(Strategy::from_kind("UR", 0), Some(Strategy::UniformRandom));
        assert_eq!(
            Strategy::from_kind("UCT", 500),
            Some(Strategy::Uct { simulations: 500 })
        );
        assert_eq!(Strategy::from_kind("MINIMAX", 500), None);
    }

    #[test]
    fn test_strategy_select_move_dispatch() {
        let board = Board::new();
        for strategy in [
            Strategy::UniformRandom,
            Strategy::Pmcgs { simulations: 20 },
            Strategy::Uct { simulations: 20 },
        ] {
            let col = strategy.select_move(&board, Player::Red, &mut rng(9)).unwrap();
            assert!(board.is_valid_move(col as usize));
        }
    }
}
