//! Persisted key-value seam.
//!
//! Each key holds one serialized blob and is always replaced whole.
//! `FileStore` keeps one `<key>.json` file per key under `.wasend/`;
//! `MemoryStore` backs tests and can be told to reject writes.

use crate::error::{Result, WasendError};
use crate::{io, paths};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub trait KeyValueStore {
    /// Read the blob stored under `key`, `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `<root>/.wasend`.
    pub fn for_root(root: &Path) -> Self {
        Self::new(paths::wasend_dir(root))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = paths::blob_path(&self.dir, key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = paths::blob_path(&self.dir, key);
        io::atomic_write(&path, value.as_bytes()).map_err(|e| {
            tracing::warn!(key, path = %path.display(), error = %e, "blob write failed");
            WasendError::StorageWrite(e.to_string())
        })
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Make every subsequent `set` fail, as a full quota would.
    pub fn reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.reject_writes {
            return Err(WasendError::StorageWrite(format!(
                "quota exceeded while writing '{key}'"
            )));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
