//! Memory mode: timed preview, covered play and one-shot hints.

pub mod controller;

pub use controller::{MemoryEvent, MemoryModeController, MemoryModeState, MemoryPhase};
