//! Game metadata for logs, reports and callers that render boards.

use serde::{Deserialize, Serialize};

/// Display-oriented description of a game.
///
/// Built by each geometry so callers can label boards, players and reports
/// without knowing which game they are holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    /// Game identifier (e.g., "tictactoe", "connect4")
    pub game_id: String,

    /// Human-readable display name (e.g., "Tic-Tac-Toe", "Connect 4")
    pub display_name: String,

    /// Board width in cells
    pub board_width: usize,

    /// Board height in cells
    pub board_height: usize,

    /// Pieces in a row needed to win
    pub win_length: usize,

    /// Display names for each player, indexed A then B
    pub player_names: Vec<String>,

    /// Single-character symbols for each player
    pub player_symbols: Vec<char>,

    /// Brief description of the rules
    pub description: String,

    /// Board interaction type
    /// - "grid": a move names any empty square (Tic-Tac-Toe)
    /// - "drop_column": a move names a column and the piece falls (Connect 4)
    pub board_type: String,
}

impl GameMetadata {
    /// Create a new GameMetadata with required fields
    pub fn new(game_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            display_name: display_name.into(),
            board_width: 0,
            board_height: 0,
            win_length: 0,
            player_names: vec!["Player A".to_string(), "Player B".to_string()],
            player_symbols: vec!['X', 'O'],
            description: String::new(),
            board_type: "grid".to_string(),
        }
    }

    /// Builder method for board dimensions
    pub fn with_board(mut self, width: usize, height: usize) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    /// Builder method for the winning line length
    pub fn with_win_length(mut self, win_length: usize) -> Self {
        self.win_length = win_length;
        self
    }

    /// Builder method for player information
    pub fn with_players(mut self, names: Vec<String>, symbols: Vec<char>) -> Self {
        self.player_names = names;
        self.player_symbols = symbols;
        self
    }

    /// Builder method for description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method for board type
    pub fn with_board_type(mut self, board_type: impl Into<String>) -> Self {
        self.board_type = board_type.into();
        self
    }

    /// Get the total number of board cells
    pub fn board_size(&self) -> usize {
        self.board_width * self.board_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_builder() {
        let meta = GameMetadata::new("tictactoe", "Tic-Tac-Toe")
            .with_board(3, 3)
            .with_win_length(3)
            .with_players(vec!["X".to_string(), "O".to_string()], vec!['X', 'O'])
            .with_description("Get three in a row to win!");

        assert_eq!(meta.game_id, "tictactoe");
        assert_eq!(meta.display_name, "Tic-Tac-Toe");
        assert_eq!(meta.board_width, 3);
        assert_eq!(meta.board_height, 3);
        assert_eq!(meta.win_length, 3);
        assert_eq!(meta.player_names, vec!["X", "O"]);
        assert_eq!(meta.description, "Get three in a row to win!");
        assert_eq!(meta.board_type, "grid");
    }

    #[test]
    fn test_board_size() {
        let meta = GameMetadata::new("test", "Test").with_board(7, 6);
        assert_eq!(meta.board_size(), 42);
    }

    #[test]
    fn test_serialization() {
        let meta = GameMetadata::new("connect4", "Connect 4")
            .with_board(7, 6)
            .with_board_type("drop_column");

        let json = serde_json::to_string(&meta).unwrap();
        let parsed: GameMetadata = serde_json::from_str(&json).unwrap();

        assert_eq!(meta, parsed);
    }
}
