//! Engine module: 4x4 grid value, rotation-composed moves, tile spawning,
//! and the game state threaded between moves. Public API stays small.
//!
//! - `Grid` is the plain 4x4 board with useful methods.
//! - Free functions mirror the methods when convenient (e.g., `shift`).
//! - `GameState` + `MoveOutcome` carry score and status flags between calls;
//!   the engine itself keeps no state.

mod game;
mod ops;
pub mod state;

pub use game::{GameState, MoveOutcome, Rules, DEFAULT_WINNING_TILE};
pub use state::{Direction, Grid, ParseDirectionError, Score, Tile, GRID_SIZE, NUM_CELLS};

pub use ops::{
    apply_move, compact_and_merge_line, count_empty, get_highest_tile_val, get_score,
    initialize, is_terminal, legal_moves, rotate_clockwise, shift, spawn_tile,
};
