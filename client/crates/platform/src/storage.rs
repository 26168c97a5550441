//! Durable Key/Value Storage
//!
//! The client's equivalent of browser local storage: string keys mapped to
//! string values, written through synchronously so a restart sees every
//! completed mutation.
//!
//! Mutations are batched (`set_many` / `remove_many`) so a multi-key update
//! reaches disk as one write.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Storage file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Synchronous string key/value store
pub trait KeyValueStore: Send + Sync {
    /// Read one entry
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write several entries as one durable mutation
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError>;

    /// Remove several entries as one durable mutation (absent keys are ignored)
    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // The guarded maps stay consistent even if a holder panicked.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ============================================================================
// In-memory store
// ============================================================================

/// Process-local store
///
/// Clones share the same entries, which lets tests simulate a reload by
/// building a second session store over a clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut map = lock(&self.entries);
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut map = lock(&self.entries);
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

// ============================================================================
// File-backed store
// ============================================================================

/// Store persisted as one JSON object in a file
///
/// Every mutation rewrites the file through a temporary sibling and a rename,
/// so a crash leaves either the old or the new contents. A missing file is an
/// empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| {
                StorageError::Corrupt {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "Opened file store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        let bytes = serde_json::to_vec_pretty(entries).map_err(|e| io_err(io::Error::other(e)))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut file = fs::File::create(&tmp).map_err(io_err)?;
        file.write_all(&bytes).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }

    /// Apply `mutate` to a copy and persist it; memory only changes if the
    /// write succeeded.
    fn mutate(
        &self,
        mutate: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let mut entries = lock(&self.entries);
        let mut next = entries.clone();
        mutate(&mut next);
        if next == *entries {
            return Ok(());
        }
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        self.mutate(|map| {
            for (key, value) in entries {
                map.insert((*key).to_string(), (*value).to_string());
            }
        })
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        self.mutate(|map| {
            for key in keys {
                map.remove(*key);
            }
        })
    }
}
