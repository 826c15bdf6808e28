//! Monte Carlo tree search strategies for Connect Four.
//!
//! This crate implements the two tree-search move selectors, PMCGS and
//! UCT, plus the uniform-random baseline. Each simulation runs four
//! phases:
//!
//! 1. **Selection**: descend while the current node is fully expanded
//!    and has children. PMCGS picks children uniformly at random; UCT
//!    uses UCB with absolute priority for unexplored children.
//! 2. **Expansion**: add one child for a random untried move.
//! 3. **Rollout**: random play to a terminal state.
//! 4. **Backpropagation**: add one visit and the terminal value to every
//!    node on the descent path.
//!
//! # Value convention
//!
//! All accumulated values are expressed from Yellow's perspective: +1
//! for a Yellow win, -1 for a Red win, 0 for a draw, at every node of
//! the tree. Backpropagation never flips signs; instead, selection
//! maximizes at Yellow-to-move nodes and minimizes at Red-to-move
//! nodes. Mixing this fixed-perspective convention with per-node sign
//! flipping corrupts play silently, so the convention is enforced in
//! one place ([`tree::SearchTree::backpropagate`]) and tested.
//!
//! # Determinism
//!
//! Every random choice draws from a caller-supplied `ChaCha20Rng`, and
//! UCB tie-breaks are deterministic (first child in expansion order).
//! A search is a pure function of (board, player, config, seed).
//!
//! # Usage
//!
//! ```rust
//! use connect4::{Board, Player};
//! use mcts::{SearchConfig, uct_search};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let board = Board::new();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let config = SearchConfig::default().with_simulations(200);
//! let result = uct_search(&board, Player::Red, config, &mut rng);
//! assert!(result.best.is_some());
//! ```

pub mod config;
pub mod node;
pub mod search;
pub mod tree;

pub use config::{SearchConfig, EXPLORATION};
pub use node::{NodeId, SearchNode};
pub use search::{
    pmcgs_search, random_move, uct_search, ChildStat, SearchResult, Strategy,
};
pub use tree::SearchTree;
