//! Text protocols.
//!
//! This module implements the plain-text game-state format used to persist
//! and exchange boards, and the command parser for the engine main loop.

pub mod gamestate;
pub mod parser;

pub use gamestate::{
    encode_board, encode_game_state, next_to_move, parse_game_state, parse_game_state_with,
    parse_rows, GameState, GameStateError, AI_MOVE_HEADER, HUMAN_MOVE_HEADER, MAX_CELL_ORBS,
};
pub use parser::{parse_command, Command, GoParams};
