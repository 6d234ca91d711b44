//! Player and cell types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two sides in a game.
///
/// `A` moves first by default (X in Tic-Tac-Toe, Black in Connect Four).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Symbol used when rendering boards and logs.
    pub fn symbol(self) -> char {
        match self {
            Player::A => 'X',
            Player::B => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Contents of a single board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    PlayerA,
    PlayerB,
}

impl Cell {
    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// The player occupying this cell, if any.
    #[inline]
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerA => Some(Player::A),
            Cell::PlayerB => Some(Player::B),
        }
    }

    pub fn symbol(self) -> char {
        self.player().map(Player::symbol).unwrap_or('.')
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::A => Cell::PlayerA,
            Player::B => Cell::PlayerB,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips() {
        assert_eq!(Player::A.opponent(), Player::B);
        assert_eq!(Player::B.opponent(), Player::A);
        assert_eq!(Player::A.opponent().opponent(), Player::A);
    }

    #[test]
    fn test_cell_player_roundtrip() {
        assert_eq!(Cell::from(Player::A).player(), Some(Player::A));
        assert_eq!(Cell::from(Player::B).player(), Some(Player::B));
        assert_eq!(Cell::Empty.player(), None);
        assert!(Cell::default().is_empty());
    }

    #[test]
    fn test_symbols() {
        assert_eq!(Cell::Empty.symbol(), '.');
        assert_eq!(Cell::PlayerA.symbol(), 'X');
        assert_eq!(Player::B.to_string(), "O");
    }
}
