//! # mahjong-bridge
//!
//! Engine for a tile-matching puzzle: two columns of mahjong tiles, and the
//! player draws lines pairing each left tile with the right tile of equal
//! rank. Presentation is left to the host; this crate owns the rules.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Rounds come from a seeded `GameRng` and every timer
//!    runs on an explicit clock, so a session replays exactly from its seed
//!    and the sequence of inputs.
//!
//! 2. **Pure Scoring**: The verifier only reports. The session applies the
//!    score delta, the streak and the history write.
//!
//! 3. **Stale Timers Never Fire**: Memory-mode timers carry the epoch they
//!    were scheduled in and are dropped once the round moves on.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `tiles`: Tile definitions and the catalog
//! - `round`: Round layout and the generator
//! - `ledger`: Player connections and tap selection
//! - `verify`: Scoring of submitted connections
//! - `timers`: Virtual-clock timer queue
//! - `memory`: Memory mode (preview, hidden play, hints)
//! - `records`: Persisted score history
//! - `session`: The orchestrator presentations talk to

pub mod core;
pub mod tiles;
pub mod round;
pub mod ledger;
pub mod verify;
pub mod timers;
pub mod memory;
pub mod records;
pub mod session;

// Re-export commonly used types
pub use crate::core::{EngineConfig, EngineError, GameRng, GameRngState, RecordedScore, StoreError};

pub use crate::tiles::{Category, Rank, Tile, TileCatalog, TileId};

pub use crate::round::{Round, RoundGenerator, RoundId, Side, TilePosition};

pub use crate::ledger::{ConnectRejection, Connection, ConnectionLedger, Selection, SelectionOutcome};

pub use crate::verify::{ConnectionVerdict, VerificationResult, Verifier, VerifyRejection};

pub use crate::timers::{Fired, TimerHandle, TimerQueue};

pub use crate::memory::{MemoryEvent, MemoryModeController, MemoryModeState, MemoryPhase};

pub use crate::records::{
    FileStorage, GameRecord, MemoryStorage, RecordStorage, RecordStore, RECORDS_STORAGE_KEY,
};

pub use crate::session::{GameSession, InputRejection};
