//! Error types.
//!
//! Two families live here:
//!
//! - `EngineError`: configuration defects. These are loud and never retried.
//! - `StoreError`: persistence failures. The record store logs them and
//!   carries on from memory.
//!
//! Expected invalid input (a bad connect, verifying an empty ledger) is not
//! an error. Those paths return plain rejection enums next to the operation.

use thiserror::Error;

use crate::tiles::{Category, Rank};

/// Fatal configuration defects surfaced by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The generator ran out of draw attempts before collecting every pair.
    ///
    /// This means the tile catalog is missing entries, which is a packaging
    /// defect rather than a runtime condition.
    #[error("tile catalog exhausted: collected {collected} of {requested} pairs after {attempts} draws")]
    CatalogExhausted {
        requested: usize,
        collected: usize,
        attempts: u32,
    },

    /// A round was requested with a pair count the catalog can never satisfy.
    #[error("invalid pair count {requested} (catalog supports 1..={available})")]
    InvalidPairCount { requested: usize, available: usize },

    /// The catalog already holds a tile for this slot.
    #[error("tile {category} {rank} already registered")]
    DuplicateTile { category: Category, rank: Rank },

    /// A hand-built round has columns of different lengths.
    #[error("round columns differ in length: {left} left, {right} right")]
    ColumnLengthMismatch { left: usize, right: usize },

    /// A hand-built round has no perfect matching on rank.
    #[error("round has no rank bijection between columns")]
    NoRankBijection,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Persistence failures of the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing blob failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The blob could not be encoded or decoded.
    #[error("record blob malformed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The blob carries a version tag this build does not understand.
    #[error("unsupported record format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}
