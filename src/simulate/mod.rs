//! Move application and win detection.
//!
//! `apply_move` places one orb and resolves the resulting chain reaction.
//! `evaluate_outcome` decides whether the game is over given the board and
//! the game's placement history.

pub mod explosion;
pub mod outcome;

use crate::board::{Board, Cell, Journal, NoJournal, Player, Position};

pub use explosion::{explode, explosion_limit};
pub use outcome::{evaluate_outcome, GameOutcome, PlacementHistory};

/// Errors from applying a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("position {pos} is off the {rows}x{cols} board")]
    OutOfBounds {
        pos: Position,
        rows: usize,
        cols: usize,
    },

    #[error("position {pos} is owned by {owner:?}")]
    OwnedByOpponent { pos: Position, owner: Player },

    #[error("chain reaction from {origin} exceeded {limit} explosions")]
    ChainOverflow { origin: Position, limit: u32 },

    #[error("cell {pos} cannot hold another orb")]
    OrbOverflow { pos: Position },
}

impl MoveError {
    /// Returns true for errors the caller should answer by picking another move.
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            MoveError::OutOfBounds { .. } | MoveError::OwnedByOpponent { .. }
        )
    }
}

/// Summary of a successfully applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveReport {
    /// Number of cell explosions the move triggered.
    pub explosions: u32,
}

/// Places an orb for `player` at `pos` and resolves explosions, reporting
/// every cell write to `journal`.
///
/// An illegal move leaves the board untouched.
pub fn try_apply_move_with<J: Journal>(
    board: &mut Board,
    pos: Position,
    player: Player,
    journal: &mut J,
) -> Result<MoveReport, MoveError> {
    let geometry = board.geometry();
    if !geometry.contains(pos) {
        return Err(MoveError::OutOfBounds {
            pos,
            rows: geometry.rows,
            cols: geometry.cols,
        });
    }

    let idx = geometry.index(pos);
    let cell = board.cell_at(idx);
    if let Some(owner) = cell.owner {
        if owner != player {
            return Err(MoveError::OwnedByOpponent { pos, owner });
        }
    }

    let orbs = cell
        .orbs
        .checked_add(1)
        .ok_or(MoveError::OrbOverflow { pos })?;
    journal.record(idx, cell);
    let placed = Cell::owned(orbs, player);
    *board.cell_at_mut(idx) = placed;

    let mut explosions = 0;
    if placed.orbs >= geometry.critical_mass(pos) {
        explosions = explode(board, pos, player, explosion_limit(geometry), journal)?;
    }
    Ok(MoveReport { explosions })
}

/// Places an orb for `player` at `pos` and resolves explosions.
pub fn try_apply_move(
    board: &mut Board,
    pos: Position,
    player: Player,
) -> Result<MoveReport, MoveError> {
    try_apply_move_with(board, pos, player, &mut NoJournal)
}

/// Applies a move, returning false (and leaving the board untouched) if the
/// target cell is off the board or owned by the opponent.
///
/// Panics if the chain reaction exceeds the explosion limit or a cell's orb
/// count overflows; use `try_apply_move` where either is possible.
pub fn apply_move(board: &mut Board, pos: Position, player: Player) -> bool {
    match try_apply_move(board, pos, player) {
        Ok(_) => true,
        Err(e) if e.is_illegal_move() => false,
        Err(e) => panic!("explosion invariant violated: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Geometry, UndoLog};

    fn pos(r: usize, c: usize) -> Position {
        Position::new(r, c)
    }

    #[test]
    fn two_corner_moves_explode() {
        let mut board = Board::standard();
        assert!(apply_move(&mut board, pos(0, 0), Player::Red));
        assert_eq!(board.cell(pos(0, 0)), Cell::owned(1, Player::Red));

        assert!(apply_move(&mut board, pos(0, 0), Player::Red));
        assert_eq!(board.cell(pos(0, 0)), Cell::EMPTY);
        assert_eq!(board.cell(pos(0, 1)), Cell::owned(1, Player::Red));
        assert_eq!(board.cell(pos(1, 0)), Cell::owned(1, Player::Red));
    }

    #[test]
    fn opponent_cell_is_rejected_without_mutation() {
        let mut board = Board::standard();
        assert!(apply_move(&mut board, pos(2, 2), Player::Blue));
        let before = board.clone();
        assert!(!apply_move(&mut board, pos(2, 2), Player::Red));
        assert_eq!(board, before);

        let err = try_apply_move(&mut board, pos(2, 2), Player::Red).unwrap_err();
        assert_eq!(
            err,
            MoveError::OwnedByOpponent {
                pos: pos(2, 2),
                owner: Player::Blue
            }
        );
        assert!(err.is_illegal_move());
    }

    #[test]
    fn off_board_is_rejected() {
        let mut board = Board::standard();
        assert!(!apply_move(&mut board, pos(9, 0), Player::Red));
        let err = try_apply_move(&mut board, pos(0, 6), Player::Red).unwrap_err();
        assert!(matches!(err, MoveError::OutOfBounds { rows: 9, cols: 6, .. }));
    }

    #[test]
    fn full_cell_rejects_placement_without_mutation() {
        let mut board = Board::new(Geometry::new(3, 3));
        board.set_cell(pos(1, 1), Cell::owned(u16::MAX, Player::Red));
        let before = board.clone();
        let err = try_apply_move(&mut board, pos(1, 1), Player::Red).unwrap_err();
        assert_eq!(err, MoveError::OrbOverflow { pos: pos(1, 1) });
        assert!(!err.is_illegal_move());
        assert_eq!(board, before);
    }

    #[test]
    fn explosion_into_full_cell_is_reported() {
        let mut board = Board::new(Geometry::new(2, 2));
        board.set_cell(pos(0, 0), Cell::owned(1, Player::Red));
        board.set_cell(pos(0, 1), Cell::owned(u16::MAX, Player::Blue));
        let before = board.clone();

        let mut log = UndoLog::new();
        let err = try_apply_move_with(&mut board, pos(0, 0), Player::Red, &mut log).unwrap_err();
        assert_eq!(err, MoveError::OrbOverflow { pos: pos(0, 1) });
        log.rollback(&mut board, 0);
        assert_eq!(board, before);
        assert!(board.is_consistent());
    }

    #[test]
    #[should_panic(expected = "explosion invariant violated")]
    fn apply_move_panics_on_orb_overflow() {
        let mut board = Board::new(Geometry::new(3, 3));
        board.set_cell(pos(0, 1), Cell::owned(u16::MAX, Player::Red));
        apply_move(&mut board, pos(0, 1), Player::Red);
    }

    #[test]
    fn report_counts_explosions() {
        let mut board = Board::standard();
        let report = try_apply_move(&mut board, pos(4, 4), Player::Red).unwrap();
        assert_eq!(report.explosions, 0);
        board.set_cell(pos(0, 0), Cell::owned(1, Player::Red));
        let report = try_apply_move(&mut board, pos(0, 0), Player::Red).unwrap();
        assert_eq!(report.explosions, 1);
    }

    #[test]
    fn journaled_move_rolls_back_exactly() {
        let mut board = Board::standard();
        board.set_cell(pos(0, 0), Cell::owned(1, Player::Red));
        board.set_cell(pos(0, 1), Cell::owned(2, Player::Blue));
        board.set_cell(pos(1, 1), Cell::owned(3, Player::Blue));
        let before = board.clone();

        let mut log = UndoLog::new();
        let mark = log.mark();
        try_apply_move_with(&mut board, pos(0, 0), Player::Red, &mut log).unwrap();
        assert_ne!(board, before);
        log.rollback(&mut board, mark);
        assert_eq!(board, before);
    }

    #[test]
    fn conservation_on_small_board() {
        let mut board = Board::new(Geometry::new(3, 3));
        let moves = [
            (pos(1, 1), Player::Red),
            (pos(0, 0), Player::Blue),
            (pos(1, 1), Player::Red),
            (pos(0, 0), Player::Blue),
            (pos(1, 1), Player::Red),
            (pos(2, 2), Player::Blue),
            (pos(1, 1), Player::Red),
        ];
        for (p, player) in moves {
            let before = board.orb_count();
            if apply_move(&mut board, p, player) {
                assert_eq!(board.orb_count(), before + 1);
                assert!(board.is_consistent());
            }
        }
    }
}
