//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices. Nodes are never removed; the whole
//! tree is dropped after a decision.

use engine_core::{Board, Geometry, Move, Outcome, Player};

use crate::config::BackpropMode;
use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<G: Geometry> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<G>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<G: Geometry> MctsTree<G> {
    /// Create a new tree rooted at `board` with `to_move` to play.
    pub fn new(board: Board<G>, to_move: Player) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(board, to_move)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<G> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<G> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode<G>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Select the child of `node_id` with the highest UCT score.
    ///
    /// Uses the parent's own visit count. Ties go to the earliest child, so
    /// unvisited children are tried in legal-move order.
    pub fn select_child(&self, node_id: NodeId, c: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        let mut best: Option<(NodeId, f64)> = None;

        for &child_id in &node.children {
            let score = self.get(child_id).uct_score(node.visits, c);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }

        best.map(|(id, _)| id)
    }

    /// Add a child to a parent node.
    /// Returns the new child's NodeId.
    pub fn add_child(
        &mut self,
        parent_id: NodeId,
        mv: Move,
        board: Board<G>,
        mover: Player,
    ) -> NodeId {
        let child = MctsNode::new_child(parent_id, mv, board, mover);
        let child_id = self.allocate(child);

        // Add to parent's children
        self.get_mut(parent_id).children.push(child_id);

        child_id
    }

    /// Create one child per legal move of `node_id`, in scan order.
    /// Returns the number of children added; terminal nodes get none.
    pub fn expand(&mut self, node_id: NodeId) -> usize {
        let node = self.get(node_id);
        if node.is_terminal() || node.is_expanded() {
            return 0;
        }

        let board = node.board.clone();
        let player = node.to_move();
        let moves = board.available_moves();

        for &mv in &moves {
            let mut child_board = board.clone();
            child_board.play_generated(mv, player);
            self.add_child(node_id, mv, child_board, player);
        }

        moves.len()
    }

    /// Credit `outcome` to `leaf_id` and every ancestor up to the root.
    ///
    /// Each node gets one visit. In [`BackpropMode::Absolute`] every node
    /// receives the result for `ai_player`; in [`BackpropMode::Alternating`]
    /// each node receives the result for the player who moved into it.
    pub fn backpropagate(
        &mut self,
        leaf_id: NodeId,
        outcome: Outcome,
        mode: BackpropMode,
        ai_player: Player,
    ) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            let perspective = match mode {
                BackpropMode::Absolute => ai_player,
                BackpropMode::Alternating => node.mover,
            };
            node.visits += 1;
            node.wins += i64::from(outcome.reward_for(perspective));

            current_id = node.parent;
        }
    }

    /// The most visited root child (robust child). Ties go to the earliest.
    pub fn best_child(&self) -> Option<NodeId> {
        let root = self.get(self.root);
        let mut best: Option<(NodeId, u32)> = None;

        for &child_id in &root.children {
            let visits = self.get(child_id).visits;
            match best {
                Some((_, best_visits)) if visits <= best_visits => {}
                _ => best = Some((child_id, visits)),
            }
        }

        best.map(|(id, _)| id)
    }

    /// Get the best move from root based on visit counts.
    /// Returns (move, visit_count) or None if root has no children.
    pub fn best_move(&self) -> Option<(Move, u32)> {
        let node = self.get(self.best_child()?);
        node.mv.map(|mv| (mv, node.visits))
    }

    /// Visit count of every root child, in legal-move order.
    pub fn root_visits(&self) -> Vec<(Move, u32)> {
        self.get(self.root)
            .children
            .iter()
            .filter_map(|&id| {
                let child = self.get(id);
                child.mv.map(|mv| (mv, child.visits))
            })
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_value: root.mean_value(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|id| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f64,
    pub max_depth: u32,
}
