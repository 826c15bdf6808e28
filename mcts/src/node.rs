//! Search tree node representation.
//!
//! Each node represents a decision point reached by a specific move
//! history. Nodes store the visit and value statistics that drive both
//! selection rules.

use connect4::Player;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// A node in the search tree.
///
/// Accumulated value is always expressed from Yellow's perspective
/// (+1 Yellow win, -1 Red win), regardless of whose turn it is at the
/// node. Selection flips between max and min depending on `to_move`;
/// the stored sign convention never changes.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Column played to reach this node from its parent. `None` at the root.
    pub action: Option<u8>,

    /// Player whose turn it is at this node.
    pub to_move: Player,

    /// Number of simulations that passed through this node.
    pub visits: u32,

    /// Sum of terminal values backpropagated through this node,
    /// from Yellow's perspective.
    pub value_sum: f64,

    /// Columns not yet expanded into children.
    pub untried: Vec<u8>,

    /// Expanded children as (column, node) pairs, in expansion order.
    /// The ordering is stable and load-bearing: selection tie-breaks
    /// keep the first child encountered.
    pub children: Vec<(u8, NodeId)>,
}

impl SearchNode {
    /// Create a root node for the player about to move.
    pub fn new_root(to_move: Player, untried: Vec<u8>) -> Self {
        Self {
            action: None,
            to_move,
            visits: 0,
            value_sum: 0.0,
            untried,
            children: Vec::new(),
        }
    }

    /// Create a child node reached by playing `action`.
    pub fn new_child(action: u8, to_move: Player, untried: Vec<u8>) -> Self {
        Self {
            action: Some(action),
            to_move,
            visits: 0,
            value_sum: 0.0,
            untried,
            children: Vec::new(),
        }
    }

    /// Whether every legal move at this node has been expanded.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// Mean backpropagated value, 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value_sum / self.visits as f64
        }
    }

    /// UCB score of this node as a child of a node with `parent_visits`
    /// visits: `w/n + C * sqrt(ln(N) / n)`.
    ///
    /// The exploration bonus is always added; whether the parent then
    /// maximizes or minimizes the score depends on the parent's player
    /// to move, not on the score arithmetic. Callers must not invoke
    /// this on an unvisited node.
    #[inline]
    pub fn ucb_score(&self, parent_visits: u32, exploration: f64) -> f64 {
        let bonus = exploration * ((parent_visits as f64).ln() / self.visits as f64).sqrt();
        self.mean_value() + bonus
    }
}
