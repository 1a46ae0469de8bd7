//! Rounds: the dealt board and the generator that deals it.
//!
//! A `Round` is immutable. Starting a new round replaces the old value
//! wholesale, and its `RoundId` is what stale timers compare against.

pub mod board;
pub mod generator;

pub use board::{Round, RoundId, Side, TilePosition};
pub use generator::RoundGenerator;
