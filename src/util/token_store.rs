//! Persistent auth token storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! One token lives under the fixed key [`TOKEN_STORAGE_KEY`]. The API client
//! never touches it; applications read it with [`TokenStore`] and pass it to
//! each call. The backing store is injected so the same accessors work over
//! browser `localStorage`, a file on disk, or memory in tests.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Storage key holding the current auth token.
pub const TOKEN_STORAGE_KEY: &str = "apiToken";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing store cannot be reached (e.g. no `window` or storage
    /// disabled by the browser).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// A file-backed store holds something other than a JSON string map.
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Minimal string key-value store, shaped after the browser `Storage` API.
pub trait KeyValueStorage {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

// =============================================================================
// TOKEN ACCESSORS
// =============================================================================

/// Get/set/clear accessors for the stored token. No format validation.
#[derive(Debug, Clone, Default)]
pub struct TokenStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> TokenStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The stored token, or an empty string when none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    pub fn get_stored_token(&self) -> Result<String, StorageError> {
        Ok(self
            .storage
            .get_item(TOKEN_STORAGE_KEY)?
            .unwrap_or_default())
    }

    /// Overwrite the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    pub fn set_stored_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set_item(TOKEN_STORAGE_KEY, token)
    }

    /// Remove the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    pub fn clear_stored_token(&self) -> Result<(), StorageError> {
        self.storage.remove_item(TOKEN_STORAGE_KEY)
    }
}

// =============================================================================
// MEMORY
// =============================================================================

/// In-process store. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items().remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// JSON object file on disk (`{"apiToken": "..."}`). A missing or empty
/// file reads as an empty store; parent directories are created on write.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    /// Read for a write: an unparsable file is dropped and replaced rather than
    /// blocking every later write.
    fn read_map_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_map() {
            Err(StorageError::Corrupt(e)) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding corrupt token file");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    /// Write to a sibling temp file created owner-only, then rename over the
    /// target so readers never see a partial file.
    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(map)?;
        let tmp = self.temp_path();
        remove_if_exists(&tmp)?;
        let mut file = create_private(&tmp)?;
        file.write_all(raw.as_bytes())?;
        file.sync_all()?;
        drop(file);
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.guard();
        Ok(self.read_map()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.guard();
        let mut map = self.read_map_for_write()?;
        map.insert(key.to_owned(), value.to_owned());
        self.write_map(&map)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.guard();
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StorageError::Corrupt(e)) => {
                // Unparsable, so the key may still be in there.
                tracing::warn!(path = %self.path.display(), error = %e, "removing corrupt token file");
                return remove_if_exists(&self.path).map_err(StorageError::from);
            }
            Err(e) => return Err(e),
        };
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<std::fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<std::fs::File> {
    std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
}

// =============================================================================
// BROWSER
// =============================================================================

/// `window.localStorage`, scoped to the page origin.
#[cfg(feature = "browser")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(feature = "browser")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_owned()))
    }
}

#[cfg(feature = "browser")]
impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;
