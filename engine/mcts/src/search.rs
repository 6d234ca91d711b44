//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm:
//! 1. Selection: Traverse the tree using UCT to find a leaf
//! 2. Expansion: Add one child per legal move and pick one at random
//! 3. Playout: Play random moves from that child to the end of the game
//! 4. Backpropagation: Update statistics along the path

use engine_core::{Board, Geometry, Move, Player};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::playout::playout;
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result of an MCTS search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Most visited root move, or None when the root has no legal move
    pub best_move: Option<Move>,

    /// Visits per root move, in legal-move order
    pub child_visits: Vec<(Move, u32)>,

    /// Mean result at the root
    pub value: f64,

    /// Number of simulations performed
    pub simulations: u32,

    /// Nodes allocated by the search
    pub tree_size: usize,
}

/// MCTS search state.
pub struct MctsSearch<G: Geometry> {
    tree: MctsTree<G>,
    config: MctsConfig,
    ai_player: Player,
}

impl<G: Geometry> MctsSearch<G> {
    /// Create a new MCTS search for `ai_player` to move on `board`.
    ///
    /// The board is copied into the tree; the caller's board is never
    /// touched.
    pub fn new(
        board: &Board<G>,
        ai_player: Player,
        config: MctsConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;

        Ok(Self {
            tree: MctsTree::new(board.clone(), ai_player),
            config,
            ai_player,
        })
    }

    /// Run the MCTS search for the configured number of simulations.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> SearchResult {
        let root = self.tree.get(self.tree.root());
        if root.is_terminal() {
            debug!(outcome = ?root.outcome, "MCTS root is terminal, no move to choose");
            return self.result(0);
        }

        for _ in 0..self.config.simulations {
            self.simulate(rng);
        }

        let result = self.result(self.config.simulations);
        debug!(
            best_move = ?result.best_move,
            simulations = result.simulations,
            tree_size = result.tree_size,
            value = result.value,
            "MCTS search complete"
        );
        result
    }

    fn result(&self, simulations: u32) -> SearchResult {
        let stats = self.tree.stats();
        SearchResult {
            best_move: self.tree.best_move().map(|(mv, _)| mv),
            child_visits: self.tree.root_visits(),
            value: stats.root_value,
            simulations,
            tree_size: stats.total_nodes,
        }
    }

    /// Run a single simulation (select -> expand -> playout -> backpropagate).
    fn simulate(&mut self, rng: &mut ChaCha20Rng) {
        // Selection: traverse to a leaf
        let (leaf_id, depth) = self.select();
        let leaf = self.tree.get(leaf_id);

        // A decided leaf is credited with its own outcome
        if leaf.is_terminal() {
            let outcome = leaf.outcome;
            self.tree
                .backpropagate(leaf_id, outcome, self.config.backprop, self.ai_player);
            trace!(leaf = leaf_id.0, depth, ?outcome, "MCTS terminal leaf");
            return;
        }

        // Expansion
        self.tree.expand(leaf_id);
        let Some(&child_id) = self.tree.get(leaf_id).children.choose(rng) else {
            return;
        };

        // Playout
        let child = self.tree.get(child_id);
        let mut board = child.board.clone();
        let outcome = if child.is_terminal() {
            child.outcome
        } else {
            playout(&mut board, child.to_move(), self.config.playout, rng)
        };

        // Backpropagation
        self.tree
            .backpropagate(child_id, outcome, self.config.backprop, self.ai_player);

        trace!(
            leaf = child_id.0,
            depth = depth + 1,
            ?outcome,
            "MCTS simulation complete"
        );
    }

    /// Select a leaf node by traversing the tree using UCT.
    /// Returns the leaf and its depth below the root.
    fn select(&self) -> (NodeId, usize) {
        let mut current = self.tree.root();
        let mut depth = 0;

        while let Some(child_id) = self.tree.select_child(current, self.config.exploration) {
            current = child_id;
            depth += 1;
        }

        (current, depth)
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<G> {
        &self.tree
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<G: Geometry>(
    board: &Board<G>,
    ai_player: Player,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    let mut search = MctsSearch::new(board, ai_player, config)?;
    Ok(search.run(rng))
}
