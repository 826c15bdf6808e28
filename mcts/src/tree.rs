//! Search tree with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by `NodeId`
//! indices. No parent back-pointers: backpropagation walks the path
//! stack recorded during descent. A tree lives for exactly one move
//! decision and is discarded afterwards.

use connect4::Player;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::trace;

use crate::node::{NodeId, SearchNode};

/// Arena-backed search tree.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    root: NodeId,
}

impl SearchTree {
    /// Create a tree whose root has `to_move` to play and the given
    /// untried columns.
    pub fn new(to_move: Player, untried: Vec<u8>) -> Self {
        Self {
            nodes: vec![SearchNode::new_root(to_move, untried)],
            root: NodeId(0),
        }
    }

    /// Root node ID (always 0).
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Total number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a child of `parent` reached by playing `action`, with
    /// `to_move` to play next. Returns the new node's ID.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        action: u8,
        to_move: Player,
        untried: Vec<u8>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SearchNode::new_child(action, to_move, untried));
        self.get_mut(parent).children.push((action, id));
        id
    }

    /// Uniform-random child selection, the PMCGS descent rule.
    pub fn select_child_uniform(&self, id: NodeId, rng: &mut ChaCha20Rng) -> Option<NodeId> {
        let node = self.get(id);
        if node.children.is_empty() {
            return None;
        }
        let (_, child) = node.children[rng.gen_range(0..node.children.len())];
        Some(child)
    }

    /// UCB child selection, the UCT descent rule.
    ///
    /// Unvisited children take absolute priority: one is chosen uniformly
    /// at random before any visited child is considered, so exploitation
    /// bias can never starve a move of its first sample. Otherwise the
    /// child maximizing (Yellow to move) or minimizing (Red to move)
    /// `w/n + C*sqrt(ln(N)/n)` wins, with ties kept by the first child in
    /// expansion order. The deterministic tie-break matters: with a fixed
    /// seed the whole search replays identically.
    pub fn select_child_ucb(
        &self,
        id: NodeId,
        exploration: f64,
        rng: &mut ChaCha20Rng,
    ) -> Option<NodeId> {
        let node = self.get(id);
        if node.children.is_empty() {
            return None;
        }

        trace!(
            wi = node.value_sum,
            ni = node.visits,
            "selection node stats"
        );

        let unvisited: Vec<NodeId> = node
            .children
            .iter()
            .filter(|&&(_, child)| self.get(child).visits == 0)
            .map(|&(_, child)| child)
            .collect();
        if !unvisited.is_empty() {
            trace!(count = unvisited.len(), "unvisited child takes priority");
            return Some(unvisited[rng.gen_range(0..unvisited.len())]);
        }

        let maximize = node.to_move == Player::Yellow;
        let mut best: Option<(f64, NodeId)> = None;
        for &(column, child) in &node.children {
            let score = self.get(child).ucb_score(node.visits, exploration);
            trace!(column, score, "child ucb value");
            let better = match best {
                None => true,
                Some((best_score, _)) => {
                    if maximize {
                        score > best_score
                    } else {
                        score < best_score
                    }
                }
            };
            if better {
                best = Some((score, child));
            }
        }
        best.map(|(_, child)| child)
    }

    /// Commit to a move once simulations are exhausted: best mean value
    /// among visited children, max for Yellow at the root, min for Red.
    /// No exploration term. `None` only if no child was ever visited.
    pub fn best_final_move(&self) -> Option<u8> {
        let root = self.get(self.root);
        let maximize = root.to_move == Player::Yellow;

        let mut best: Option<(f64, u8)> = None;
        for &(action, child) in &root.children {
            let node = self.get(child);
            if node.visits == 0 {
                continue;
            }
            let value = node.mean_value();
            let better = match best {
                None => true,
                Some((best_value, _)) => {
                    if maximize {
                        value > best_value
                    } else {
                        value < best_value
                    }
                }
            };
            if better {
                best = Some((value, action));
            }
        }
        best.map(|(_, action)| action)
    }

    /// Update statistics along a simulation path, leaf to root order is
    /// irrelevant since values are perspective-fixed: every node gets one
    /// visit and the same terminal value, with no sign flipping.
    pub fn backpropagate(&mut self, path: &[NodeId], value: f64) {
        for &id in path {
            let node = self.get_mut(id);
            node.visits += 1;
            node.value_sum += value;
            trace!(
                node = id.0,
                wi = node.value_sum,
                ni = node.visits,
                "node stats updated"
            );
        }
    }
}
