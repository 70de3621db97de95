//! Deterministic tile-merge engine for the 2405 puzzle.
//!
//! All randomness is injected through a caller-supplied [`rand::Rng`], so a
//! seeded generator replays a game exactly.

pub mod engine;

pub use engine::{Direction, GameState, Grid, MoveOutcome, Rules};
