//! Win detection.
//!
//! A player wins once the opponent has been wiped off the board. An
//! opponent that has never placed an orb has not been defeated, so the
//! check needs to know who has ever had orbs on the board. That history
//! belongs to one game and is passed in explicitly.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player, ALL_PLAYERS};

/// Which players have ever had orbs on the board during a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PlacementHistory {
    placed: [bool; 2],
}

impl PlacementHistory {
    /// History of a game in which nobody has moved yet.
    pub const fn new() -> Self {
        PlacementHistory {
            placed: [false, false],
        }
    }

    /// History for a position whose past is unknown: a player counts as
    /// having placed iff they currently own orbs.
    pub fn from_board(board: &Board) -> Self {
        let mut history = PlacementHistory::new();
        for p in ALL_PLAYERS {
            if board.total_orbs(p) > 0 {
                history.mark(p);
            }
        }
        history
    }

    /// History in which both players have already placed.
    pub const fn both() -> Self {
        PlacementHistory {
            placed: [true, true],
        }
    }

    #[inline]
    pub fn has_placed(&self, player: Player) -> bool {
        self.placed[player.index()]
    }

    #[inline]
    pub fn mark(&mut self, player: Player) {
        self.placed[player.index()] = true;
    }
}

/// Result of a win check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameOutcome {
    pub is_decided: bool,
    pub winner: Option<Player>,
}

impl GameOutcome {
    pub const UNDECIDED: GameOutcome = GameOutcome {
        is_decided: false,
        winner: None,
    };

    pub const fn won_by(player: Player) -> Self {
        GameOutcome {
            is_decided: true,
            winner: Some(player),
        }
    }
}

/// Checks whether either player has won, updating `history` with every
/// player currently holding orbs.
///
/// `player` wins iff they hold orbs, the opponent holds none, and the
/// opponent has placed at some earlier point in the game.
pub fn evaluate_outcome(board: &Board, history: &mut PlacementHistory) -> GameOutcome {
    let mut totals = [0u32; 2];
    for cell in board.cells() {
        if let Some(owner) = cell.owner {
            totals[owner.index()] += cell.orbs as u32;
        }
    }

    for p in ALL_PLAYERS {
        if totals[p.index()] > 0 {
            history.mark(p);
        }
    }

    for p in ALL_PLAYERS {
        let opp = p.opponent();
        if totals[p.index()] > 0 && totals[opp.index()] == 0 && history.has_placed(opp) {
            return GameOutcome::won_by(p);
        }
    }

    GameOutcome::UNDECIDED
}
