//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::search::SearchError;

/// Exploration constant used by the UCT formula unless overridden.
pub const DEFAULT_EXPLORATION: f64 = 2.0;

/// How a simulation result is credited to the nodes on its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackpropMode {
    /// Every node receives the result from the AI player's point of view
    /// (+1 AI win, -1 AI loss, 0 draw), whichever side moved into it.
    ///
    /// Note: this is not the textbook two-player formulation. Nodes where the
    /// opponent is to choose still maximise the AI's value, so the opponent
    /// is modelled as cooperative below the root.
    #[default]
    Absolute,

    /// Each node receives the result from the point of view of the player
    /// who made the move into it, so the sign alternates by level.
    Alternating,
}

/// Move choice during the random playout phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayoutPolicy {
    /// Uniformly random legal moves.
    #[default]
    Random,

    /// Take an immediately winning move when one exists, otherwise random.
    GreedyWin,
}

impl FromStr for BackpropMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "absolute" => Ok(Self::Absolute),
            "alternating" => Ok(Self::Alternating),
            other => Err(format!(
                "unknown backprop mode '{other}' (expected 'absolute' or 'alternating')"
            )),
        }
    }
}

impl fmt::Display for BackpropMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute => write!(f, "absolute"),
            Self::Alternating => write!(f, "alternating"),
        }
    }
}

impl FromStr for PlayoutPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "random" => Ok(Self::Random),
            "greedy_win" | "greedy" => Ok(Self::GreedyWin),
            other => Err(format!(
                "unknown playout policy '{other}' (expected 'random' or 'greedy_win')"
            )),
        }
    }
}

impl fmt::Display for PlayoutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::GreedyWin => write!(f, "greedy_win"),
        }
    }
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MctsConfig {
    /// Number of simulations to run per search.
    pub simulations: u32,

    /// Exploration constant `C` in `wins/visits + C * sqrt(ln(N) / visits)`.
    pub exploration: f64,

    /// How simulation results are credited along the path.
    pub backprop: BackpropMode,

    /// Move choice during playouts.
    pub playout: PlayoutPolicy,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            simulations: 3000,
            exploration: DEFAULT_EXPLORATION,
            backprop: BackpropMode::Absolute,
            playout: PlayoutPolicy::Random,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            simulations: 200,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.simulations = n;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the backpropagation mode.
    pub fn with_backprop(mut self, mode: BackpropMode) -> Self {
        self.backprop = mode;
        self
    }

    /// Builder pattern: set the playout policy.
    pub fn with_playout(mut self, policy: PlayoutPolicy) -> Self {
        self.playout = policy;
        self
    }

    /// Reject configurations that would run an empty or meaningless search.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.simulations == 0 {
            return Err(SearchError::InvalidConfiguration(
                "simulation budget must be at least 1".to_string(),
            ));
        }
        if !self.exploration.is_finite() || self.exploration <= 0.0 {
            return Err(SearchError::InvalidConfiguration(format!(
                "exploration constant must be finite and positive, got {}",
                self.exploration
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.simulations, 3000);
        assert!((config.exploration - 2.0).abs() < 1e-12);
        assert_eq!(config.backprop, BackpropMode::Absolute);
        assert_eq!(config.playout, PlayoutPolicy::Random);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_simulations(100)
            .with_backprop(BackpropMode::Alternating)
            .with_playout(PlayoutPolicy::GreedyWin);

        assert_eq!(config.simulations, 100);
        assert_eq!(config.backprop, BackpropMode::Alternating);
        assert_eq!(config.playout, PlayoutPolicy::GreedyWin);
    }

    #[test]
    fn test_validate_rejects_zero_simulations() {
        let err = MctsConfig::default().with_simulations(0).validate().unwrap_err();
        assert!(matches!(err, SearchError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_validate_rejects_bad_exploration() {
        for c in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(MctsConfig::default().with_exploration(c).validate().is_err());
        }
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!("Absolute".parse::<BackpropMode>(), Ok(BackpropMode::Absolute));
        assert_eq!("alternating".parse::<BackpropMode>(), Ok(BackpropMode::Alternating));
        assert!("negamax".parse::<BackpropMode>().is_err());

        assert_eq!("greedy-win".parse::<PlayoutPolicy>(), Ok(PlayoutPolicy::GreedyWin));
        assert_eq!("random".parse::<PlayoutPolicy>(), Ok(PlayoutPolicy::Random));
        assert_eq!(PlayoutPolicy::GreedyWin.to_string(), "greedy_win");
    }
}
