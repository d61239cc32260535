//! # Storage Backend
//!
//! Key → JSON-document persistence behind the two state containers.
//!
//! ## Persistence Model
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     Storage Layout                               │
//! │                                                                  │
//! │  key                   document                                  │
//! │  ───────────────────   ─────────────────────────────────        │
//! │  jewelry-products      JSON array of Product                     │
//! │  jewelry-sales         JSON array of Sale                        │
//! │  jewelry-withdrawals   JSON array of Withdrawal                  │
//! │  jewelry-auth-user     JSON object SessionUser                   │
//! │                                                                  │
//! │  Every mutation rewrites the affected document in FULL.          │
//! │  No deltas, no migrations. One writer at a time is assumed;      │
//! │  a second process against the same directory is last-write-wins. │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Semantics
//! Loads never fail the caller: a missing, unreadable or malformed
//! document is logged and the collection resets to its default. Writes
//! propagate their error - losing a mutation silently would be worse than
//! surfacing it.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

// =============================================================================
// Storage Keys
// =============================================================================

/// Persisted product catalog.
pub const PRODUCTS_KEY: &str = "jewelry-products";

/// Persisted sales ledger.
pub const SALES_KEY: &str = "jewelry-sales";

/// Persisted withdrawal ledger.
pub const WITHDRAWALS_KEY: &str = "jewelry-withdrawals";

/// Persisted session object.
pub const SESSION_KEY: &str = "jewelry-auth-user";

// =============================================================================
// Errors
// =============================================================================

/// Storage backend failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Serializing a collection to JSON failed.
    #[error("storage serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Storage Trait
// =============================================================================

/// A string-keyed document store.
///
/// The seam between the state containers and where their JSON lives.
/// Implementations must treat `set` as a full overwrite of the document
/// under `key`.
pub trait Storage {
    /// Reads the document under `key`, if present.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrites the document under `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes the document under `key`. Removing an absent key is fine.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// References to a storage are storages themselves; the stores own their
/// backend by value, tests share one behind a reference.
impl<T: Storage + ?Sized> Storage for &T {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

// =============================================================================
// Load / Persist Helpers
// =============================================================================

/// Loads a persisted collection, absorbing every failure into the default.
///
/// A malformed document is the one recovery path this system has: log it,
/// reset the collection to empty, keep the other collections untouched.
pub fn load_collection<T, S>(storage: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: Storage + ?Sized,
{
    match storage.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "malformed persisted state, resetting collection");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(err) => {
            warn!(key, error = %err, "unreadable persisted state, resetting collection");
            T::default()
        }
    }
}

/// Serializes `value` and rewrites the document under `key` in full.
pub fn persist_collection<T, S>(storage: &S, key: &str, value: &T) -> StorageResult<()>
where
    T: Serialize,
    S: Storage + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)
}

// =============================================================================
// File-Backed Storage
// =============================================================================

/// One JSON file per key under a data directory.
///
/// `jewelry-products` lives at `<dir>/jewelry-products.json`, and so on.
/// The directory is created lazily on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a file storage rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    /// The data directory this storage writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

// =============================================================================
// In-Memory Storage
// =============================================================================

/// In-memory storage for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Plants a raw document, bypassing serialization. Test hook for
    /// exercising the malformed-state recovery path.
    pub fn plant(&self, key: &str, raw: &str) {
        self.entries
            .lock()
            .expect("storage mutex poisoned")
            .insert(key.to_string(), raw.to_string());
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self
            .entries
            .lock()
            .expect("storage mutex poisoned")
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .lock()
            .expect("storage mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries
            .lock()
            .expect("storage mutex poisoned")
            .remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
