//! Minimax configuration parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::search::SearchError;

/// Named search strengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Plies searched below each candidate move.
    pub fn depth(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 3,
            Difficulty::Hard => 5,
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{other}' (expected 'easy', 'medium' or 'hard')"
            )),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// Configuration for a minimax search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimaxConfig {
    /// Plies searched below each candidate root move.
    pub depth: u32,

    /// Enable alpha-beta pruning.
    pub prune: bool,

    /// Seed for shuffling child order when pruning is disabled. `None`
    /// keeps scan order everywhere.
    pub shuffle_seed: Option<u64>,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::default(), true)
    }
}

impl MinimaxConfig {
    pub fn new(depth: u32, prune: bool) -> Self {
        Self {
            depth,
            prune,
            shuffle_seed: None,
        }
    }

    pub fn from_difficulty(difficulty: Difficulty, prune: bool) -> Self {
        Self::new(difficulty.depth(), prune)
    }

    /// Builder pattern: shuffle inner nodes of unpruned searches.
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Reject a zero depth before any search runs.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.depth == 0 {
            return Err(SearchError::InvalidConfiguration(
                "search depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
