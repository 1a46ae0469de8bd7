//! Persisted score history.
//!
//! ## Key Types
//!
//! - `GameRecord`: One verified round's score and timestamp
//! - `RecordStore`: History with newest-first view and statistics
//! - `RecordStorage`: Blob backend (`MemoryStorage`, `FileStorage`)

pub mod record;
pub mod storage;
pub mod store;

pub use record::GameRecord;
pub use storage::{FileStorage, MemoryStorage, RecordStorage, RECORDS_STORAGE_KEY, UNREADABLE_RECORDS_KEY};
pub use store::{decode_records, encode_records, RecordStore, RECORD_FORMAT_VERSION};
