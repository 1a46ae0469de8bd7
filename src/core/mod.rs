//! Core engine types: RNG, configuration, errors.
//!
//! Everything else in the crate builds on these. None of them know about
//! tiles, rounds or timers.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{
    EngineConfig, RecordedScore, DEFAULT_MAX_DRAW_ATTEMPTS, DEFAULT_PAIR_COUNT,
    DEFAULT_POINTS_PER_MATCH,
};
pub use error::{EngineError, StoreError};
pub use rng::{GameRng, GameRngState};
