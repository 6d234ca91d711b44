//! MCTS tree node representation.
//!
//! Each node holds the board reached by playing `mv` from its parent, plus
//! the visit statistics used for UCT selection.

use engine_core::{Board, Geometry, Move, Outcome, Player};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<G: Geometry> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Move that led to this node from parent (None for root)
    pub mv: Option<Move>,

    /// Board after `mv` was played
    pub board: Board<G>,

    /// Player who made the move into this node. For the root this is the
    /// opponent of the side to move.
    pub mover: Player,

    /// Game state of `board`, computed once when the node is created
    pub outcome: Outcome,

    /// Number of times this node has been visited
    pub visits: u32,

    /// Sum of simulation results credited to this node
    pub wins: i64,

    /// Children in legal-move order. Empty until node is expanded.
    pub children: Vec<NodeId>,
}

impl<G: Geometry> MctsNode<G> {
    /// Create a new root node for `to_move` to play on `board`.
    pub fn new_root(board: Board<G>, to_move: Player) -> Self {
        let outcome = board.outcome();
        Self {
            parent: NodeId::NONE,
            mv: None,
            board,
            mover: to_move.opponent(),
            outcome,
            visits: 0,
            wins: 0,
            children: Vec::new(),
        }
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, mv: Move, board: Board<G>, mover: Player) -> Self {
        let outcome = if board.completes_line(mv) {
            Outcome::Win(mover)
        } else if board.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        };

        Self {
            parent,
            mv: Some(mv),
            board,
            mover,
            outcome,
            visits: 0,
            wins: 0,
            children: Vec::new(),
        }
    }

    /// Player whose turn it is on this node's board.
    #[inline]
    pub fn to_move(&self) -> Player {
        self.mover.opponent()
    }

    /// Mean result `wins / visits`; 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins as f64 / self.visits as f64
        }
    }

    /// UCT score for child selection:
    /// `wins/visits + c * sqrt(ln(parent_visits) / visits)`.
    ///
    /// Unvisited nodes score `+inf` so every child is tried once before any
    /// is revisited.
    #[inline]
    pub fn uct_score(&self, parent_visits: u32, c: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = self.visits as f64;
        self.mean_value() + c * ((parent_visits as f64).ln() / visits).sqrt()
    }

    /// Check if this node has been expanded (has children).
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_over()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::GameMetadata;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    struct Line;

    impl Geometry for Line {
        const ROWS: usize = 1;
        const COLS: usize = 3;
        const WIN_LENGTH: usize = 2;
        const GRAVITY: bool = false;

        fn metadata() -> GameMetadata {
            GameMetadata::new("line", "Line").with_board(3, 1)
        }
    }

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = MctsNode::new_root(Board::<Line>::new(), Player::A);

        assert!(node.parent.is_none());
        assert_eq!(node.mv, None);
        assert_eq!(node.to_move(), Player::A);
        assert_eq!(node.mover, Player::B);
        assert_eq!(node.visits, 0);
        assert!(!node.is_terminal());
        assert!(!node.is_expanded());
    }

    #[test]
    fn test_child_detects_win() {
        let mut board = Board::<Line>::new();
        board.play_generated(Move::new(0, 0), Player::A);
        board.play_generated(Move::new(0, 1), Player::A);

        let node = MctsNode::new_child(NodeId(0), Move::new(0, 1), board, Player::A);
        assert_eq!(node.outcome, Outcome::Win(Player::A));
        assert!(node.is_terminal());
        assert_eq!(node.to_move(), Player::B);
    }

    #[test]
    fn test_mean_value() {
        let mut node = MctsNode::new_root(Board::<Line>::new(), Player::A);

        // Unvisited
        assert!(node.mean_value().abs() < 1e-12);

        // After visits
        node.visits = 4;
        node.wins = 2;
        assert!((node.mean_value() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_uct_score() {
        let mut node = MctsNode::new_root(Board::<Line>::new(), Player::A);
        assert!(node.uct_score(10, 2.0).is_infinite());

        node.visits = 10;
        node.wins = 5;

        // UCT = 0.5 + 2.0 * sqrt(ln(100) / 10) = 0.5 + 2.0 * 0.6786... ≈ 1.857
        let uct = node.uct_score(100, 2.0);
        assert!((uct - 1.857).abs() < 0.01);
    }

    #[test]
    fn test_uct_prefers_fewer_visits_at_equal_mean() {
        let mut a = MctsNode::new_root(Board::<Line>::new(), Player::A);
        let mut b = a.clone();
        a.visits = 2;
        a.wins = 1;
        b.visits = 8;
        b.wins = 4;
        assert!(a.uct_score(10, 2.0) > b.uct_score(10, 2.0));
    }
}
