//! Record store.
//!
//! Append-only history of verified rounds with summary statistics. Every
//! mutation is written through to the storage backend before returning. A
//! failed write is logged and remembered in `last_error`, and the in-memory
//! records stay authoritative for the rest of the session.
//!
//! A stored blob the store cannot decode is never overwritten silently. It
//! is copied to `UNREADABLE_RECORDS_KEY` first; if that copy fails, or the
//! blob could not even be read, writes are held back until `purge_all`.

use serde::{Deserialize, Serialize};

use super::record::GameRecord;
use super::storage::{RecordStorage, RECORDS_STORAGE_KEY, UNREADABLE_RECORDS_KEY};
use crate::core::StoreError;

/// Current version tag of the persisted blob.
pub const RECORD_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct PersistedRecordsRef<'a> {
    version: u32,
    records: &'a [GameRecord],
}

#[derive(Deserialize)]
struct BlobHeader {
    version: u32,
}

#[derive(Deserialize)]
struct PersistedRecords {
    records: Vec<GameRecord>,
}

/// Encode records into the persisted blob.
pub fn encode_records(records: &[GameRecord]) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec(&PersistedRecordsRef {
        version: RECORD_FORMAT_VERSION,
        records,
    })?)
}

/// Decode a persisted blob of any known version.
pub fn decode_records(blob: &[u8]) -> Result<Vec<GameRecord>, StoreError> {
    let value: serde_json::Value = serde_json::from_slice(blob)?;

    // Bare array written before the version tag existed.
    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }

    let header = BlobHeader::deserialize(&value)?;
    if header.version != RECORD_FORMAT_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: header.version,
            expected: RECORD_FORMAT_VERSION,
        });
    }
    let persisted: PersistedRecords = serde_json::from_value(value)?;
    Ok(persisted.records)
}

/// Score history backed by a `RecordStorage`.
#[derive(Debug)]
pub struct RecordStore<S: RecordStorage> {
    storage: S,
    records: Vec<GameRecord>,
    last_error: Option<String>,
    writes_held: bool,
}

impl<S: RecordStorage> RecordStore<S> {
    /// Open the store, loading whatever the backend holds.
    ///
    /// An unreadable blob is logged and the store starts empty, keeping the
    /// blob aside.
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            records: Vec::new(),
            last_error: None,
            writes_held: false,
        };

        match store.storage.load(RECORDS_STORAGE_KEY) {
            Ok(None) => {}
            Ok(Some(blob)) => match decode_records(&blob) {
                Ok(records) => {
                    tracing::debug!(count = records.len(), "loaded game records");
                    store.records = records;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to decode game records, starting empty");
                    store.last_error = Some(e.to_string());
                    store.set_aside(&blob);
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to load game records, holding writes until purge");
                store.last_error = Some(e.to_string());
                store.writes_held = true;
            }
        }
        store
    }

    fn set_aside(&mut self, blob: &[u8]) {
        match self.storage.save(UNREADABLE_RECORDS_KEY, blob) {
            Ok(()) => {
                tracing::debug!(key = UNREADABLE_RECORDS_KEY, "kept unreadable game records");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to keep unreadable game records, holding writes until purge");
                self.writes_held = true;
            }
        }
    }

    /// Add a record.
    pub fn append(&mut self, record: GameRecord) {
        self.records.push(record);
        self.persist();
    }

    /// All records, newest first.
    #[must_use]
    pub fn all(&self) -> Vec<GameRecord> {
        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        sorted
    }

    /// Remove the record at `position` in the newest-first view.
    ///
    /// Out-of-range positions are ignored.
    pub fn remove_at(&mut self, position: usize) -> Option<GameRecord> {
        let target = self.all().into_iter().nth(position)?;
        let index = self.records.iter().position(|r| r.id() == target.id())?;
        let removed = self.records.remove(index);
        self.persist();
        Some(removed)
    }

    /// Remove every record.
    ///
    /// Also replaces a stored blob that could not be read.
    pub fn purge_all(&mut self) {
        if self.records.is_empty() && !self.writes_held {
            return;
        }
        self.records.clear();
        self.writes_held = false;
        self.persist();
    }

    /// Best score, 0 when empty.
    #[must_use]
    pub fn highest_score(&self) -> i64 {
        self.records.iter().map(GameRecord::score).max().unwrap_or(0)
    }

    /// Mean score, 0.0 when empty.
    #[must_use]
    pub fn average_score(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let total: i64 = self.records.iter().map(GameRecord::score).sum();
        total as f64 / self.records.len() as f64
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent persistence failure, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether writes are held back to protect a blob that could not be read.
    #[must_use]
    pub fn writes_held(&self) -> bool {
        self.writes_held
    }

    /// Backend, for inspection.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) {
        if self.writes_held {
            tracing::warn!(count = self.records.len(), "not overwriting unreadable game records");
            return;
        }
        let result = encode_records(&self.records)
            .and_then(|blob| self.storage.save(RECORDS_STORAGE_KEY, &blob));
        match result {
            Ok(()) => self.last_error = None,
            Err(e) => {
                tracing::warn!(error = %e, count = self.records.len(), "failed to persist game records");
                self.last_error = Some(e.to_string());
            }
        }
    }
}
