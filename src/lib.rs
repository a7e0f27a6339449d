//! Chain Reaction engine library.
//!
//! Exposes the board model, move simulation, heuristic evaluation, search,
//! text protocols, and game sessions for use by integration tests and the
//! binary entry points.

pub mod board;
pub mod engine;
pub mod eval;
pub mod game;
pub mod protocol;
pub mod search;
pub mod selfplay;
pub mod simulate;
