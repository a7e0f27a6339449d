//! Board representation.
//!
//! Contains players, cells, grid geometry (neighbors and critical mass),
//! the board itself, and the undo log used by in-place search.

pub mod cell;
pub mod geometry;
pub mod state;
pub mod undo;

pub use cell::{Cell, Player, ALL_PLAYERS};
pub use geometry::{Geometry, Neighbors, Position, STANDARD_COLS, STANDARD_ROWS};
pub use state::Board;
pub use undo::{Journal, NoJournal, UndoLog};
