//! Blob storage behind the record store.
//!
//! The store keeps all records as one blob under one well-known key.
//! Backends only move bytes; encoding and versioning live in the store.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::core::StoreError;

/// Key the record blob is stored under.
pub const RECORDS_STORAGE_KEY: &str = "MahjongBridgeRecords";

/// Key a blob the store could not decode is copied to before being replaced.
pub const UNREADABLE_RECORDS_KEY: &str = "MahjongBridgeRecords.unreadable";

/// Key/blob persistence backend.
pub trait RecordStorage {
    /// Read the blob under `key`, `None` if nothing was ever written.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the blob under `key`.
    fn save(&mut self, key: &str, blob: &[u8]) -> Result<(), StoreError>;
}

/// In-process storage. Contents vanish with the value.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    blobs: FxHashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw blob under `key`, for inspection.
    #[must_use]
    pub fn blob(&self, key: &str) -> Option<&[u8]> {
        self.blobs.get(key).map(Vec::as_slice)
    }

    /// Seed a blob, e.g. one written by an older build.
    pub fn insert(&mut self, key: impl Into<String>, blob: Vec<u8>) {
        self.blobs.insert(key.into(), blob);
    }
}

impl RecordStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &[u8]) -> Result<(), StoreError> {
        self.blobs.insert(key.to_string(), blob.to_vec());
        Ok(())
    }
}

/// One JSON file per key inside a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous file intact.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Store files under `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl RecordStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, blob: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(blob)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
