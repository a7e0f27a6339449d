//! Players and cell contents.
//!
//! A cell holds a count of orbs and, when non-empty, the player that owns
//! them. The empty cell is the only cell without an owner.

use serde::{Deserialize, Serialize};

/// One of the two sides. Red moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Red,
    Blue,
}

/// Both players in turn order.
pub const ALL_PLAYERS: [Player; 2] = [Player::Red, Player::Blue];

impl Player {
    /// Returns the other player.
    pub const fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// Returns the owner symbol used in the text game-state format.
    pub const fn symbol(self) -> char {
        match self {
            Player::Red => 'R',
            Player::Blue => 'B',
        }
    }

    /// Parses an owner symbol from the text game-state format.
    pub fn from_symbol(c: char) -> Option<Player> {
        match c {
            'R' => Some(Player::Red),
            'B' => Some(Player::Blue),
            _ => None,
        }
    }

    /// Parses a player from a symbol or a name (`R`, `red`, `Blue`, ...).
    pub fn from_name(s: &str) -> Option<Player> {
        match s.to_ascii_lowercase().as_str() {
            "r" | "red" => Some(Player::Red),
            "b" | "blue" => Some(Player::Blue),
            _ => None,
        }
    }

    /// Returns the lowercase player name.
    pub const fn name(self) -> &'static str {
        match self {
            Player::Red => "red",
            Player::Blue => "blue",
        }
    }

    /// Returns the capitalised player name used in text headers.
    pub const fn title(self) -> &'static str {
        match self {
            Player::Red => "Red",
            Player::Blue => "Blue",
        }
    }

    /// Index into two-element per-player arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::Red => 0,
            Player::Blue => 1,
        }
    }
}

/// Contents of one grid cell.
///
/// Invariant: `orbs == 0` exactly when `owner` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub orbs: u16,
    pub owner: Option<Player>,
}

impl Cell {
    /// The empty cell.
    pub const EMPTY: Cell = Cell {
        orbs: 0,
        owner: None,
    };

    /// Creates a cell holding `orbs` orbs of `owner`.
    pub const fn owned(orbs: u16, owner: Player) -> Cell {
        Cell {
            orbs,
            owner: Some(owner),
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.orbs == 0
    }

    /// Returns true if `player` may place an orb here.
    #[inline]
    pub fn accepts(&self, player: Player) -> bool {
        match self.owner {
            None => true,
            Some(p) => p == player,
        }
    }

    /// Returns true if the cell is owned by `player`.
    #[inline]
    pub fn is_owned_by(&self, player: Player) -> bool {
        self.owner == Some(player)
    }
}
