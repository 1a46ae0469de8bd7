//! Cancellable timers on a manually driven clock.

pub mod queue;

pub use queue::{Fired, TimerHandle, TimerQueue};
