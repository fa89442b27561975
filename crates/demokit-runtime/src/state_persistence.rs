#![forbid(unsafe_code)]

//! Durable key-value state for the catalog.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        StateStore                             │
//! │   - In-memory cache of JSON values                            │
//! │   - Tracks unsaved changes                                    │
//! │   - Delegates to StorageBackend for persistence               │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     StorageBackend                            │
//! │   - MemoryStorage: shared in-memory map (tests, ephemeral)    │
//! │   - FileStorage: JSON file with atomic write-rename           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. Storage failures never panic; operations return `Result`.
//! 2. File writes go through a temp file and a rename.
//! 3. Removing a key removes it from storage; no sentinel values are kept.
//! 4. A value of the wrong JSON type reads as absent, never as an error.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `StorageError::Io` | File I/O failure | Returns error, cache unaffected |
//! | `StorageError::Serialization` | JSON encode/decode | Returns error, caller starts empty |
//! | Format version mismatch | File written by a newer build | Stored state ignored, logged |
//! | Type mismatch | Key reused with a different shape | `None`, logged |

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during state storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error during file operations.
    Io(std::io::Error),
    /// Serialization or deserialization error.
    Serialization(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            StorageError::Serialization(msg) => write!(f, "serialization error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Serialization(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// ─────────────────────────────────────────────────────────────────────────────
// Storage Backend Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Pluggable persistence for the [`StateStore`].
///
/// Everything runs on the UI thread, so backends are not required to be
/// `Send` or `Sync`.
pub trait StorageBackend {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Load every stored entry. Returns an empty map on first run.
    fn load_all(&self) -> StorageResult<HashMap<String, Value>>;

    /// Replace all stored entries.
    fn save_all(&self, entries: &HashMap<String, Value>) -> StorageResult<()>;

    /// Check if the backend is available and functional.
    fn is_available(&self) -> bool {
        true
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory Storage
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory storage backend.
///
/// Clones share the same map, so a clone handed to a second [`StateStore`]
/// sees what the first one flushed. Tests use this to simulate a relaunch
/// without touching the disk.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    data: Rc<RefCell<HashMap<String, Value>>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create memory storage pre-populated with entries.
    #[must_use]
    pub fn with_entries(entries: HashMap<String, Value>) -> Self {
        Self {
            data: Rc::new(RefCell::new(entries)),
        }
    }

    /// Copy of the stored entries.
    #[must_use]
    pub fn entries(&self) -> HashMap<String, Value> {
        self.data.borrow().clone()
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "MemoryStorage"
    }

    fn load_all(&self) -> StorageResult<HashMap<String, Value>> {
        Ok(self.data.borrow().clone())
    }

    fn save_all(&self, entries: &HashMap<String, Value>) -> StorageResult<()> {
        *self.data.borrow_mut() = entries.clone();
        Ok(())
    }
}

impl fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStorage")
            .field("entries", &self.data.borrow().len())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Storage
// ─────────────────────────────────────────────────────────────────────────────

/// On-disk layout of the state file.
#[derive(Serialize, Deserialize)]
struct StateFile {
    format_version: u32,
    entries: HashMap<String, Value>,
}

impl StateFile {
    const FORMAT_VERSION: u32 = 1;
}

/// JSON file storage backend.
///
/// # File Format
///
/// ```json
/// {
///   "format_version": 1,
///   "entries": {
///     "demokit.selected_group_index": 2,
///     "demokit.selected_demoable_index": 5
///   }
/// }
/// ```
///
/// Writes go to `{path}.tmp`, are flushed and synced, then renamed over
/// `{path}`.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create a file storage at the given path.
    ///
    /// The file does not need to exist; it is created on first save.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Storage at `$XDG_STATE_HOME/demokit/{app_name}/state.json`.
    #[must_use]
    pub fn default_for_app(app_name: &str) -> Self {
        let path = state_dir_or_fallback()
            .join("demokit")
            .join(app_name)
            .join("state.json");
        Self { path }
    }

    /// Location of the state file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");
        tmp
    }
}

/// `$XDG_STATE_HOME`, then `~/.local/state`, then the current directory.
fn state_dir_or_fallback() -> PathBuf {
    if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(state_home);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("state");
    }
    PathBuf::from(".")
}

impl StorageBackend for FileStorage {
    fn name(&self) -> &str {
        "FileStorage"
    }

    fn load_all(&self) -> StorageResult<HashMap<String, Value>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let state_file: StateFile = serde_json::from_reader(reader).map_err(|e| {
            StorageError::Serialization(format!("failed to parse state file: {e}"))
        })?;

        if state_file.format_version != StateFile::FORMAT_VERSION {
            tracing::warn!(
                stored = state_file.format_version,
                expected = StateFile::FORMAT_VERSION,
                "state file format version mismatch, ignoring stored state"
            );
            return Ok(HashMap::new());
        }

        Ok(state_file.entries)
    }

    fn save_all(&self, entries: &HashMap<String, Value>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let state_file = StateFile {
            format_version: StateFile::FORMAT_VERSION,
            entries: entries.clone(),
        };

        let tmp_path = self.temp_path();
        {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            serde_json::to_writer_pretty(&mut writer, &state_file).map_err(|e| {
                StorageError::Serialization(format!("failed to serialize state: {e}"))
            })?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            entries = entries.len(),
            "saved catalog state"
        );
        Ok(())
    }

    fn is_available(&self) -> bool {
        let Some(parent) = self.path.parent() else {
            return false;
        };
        if parent.as_os_str().is_empty() {
            return true;
        }
        if !parent.exists() {
            return fs::create_dir_all(parent).is_ok();
        }
        let marker = parent.join(".demokit_test_write");
        if fs::write(&marker, b"test").is_ok() {
            let _ = fs::remove_file(&marker);
            return true;
        }
        false
    }
}

impl fmt::Debug for FileStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStorage")
            .field("path", &self.path)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// State Store
// ─────────────────────────────────────────────────────────────────────────────

/// Cached key-value state over a [`StorageBackend`].
///
/// Reads are served from the cache. Writes mark the store dirty until
/// [`flush`](Self::flush) hands the whole map to the backend.
pub struct StateStore {
    backend: Box<dyn StorageBackend>,
    cache: HashMap<String, Value>,
    dirty: bool,
}

impl StateStore {
    /// Create a store over `backend`. Call [`load`](Self::load) to read
    /// what was persisted.
    #[must_use]
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            backend,
            cache: HashMap::new(),
            dirty: false,
        }
    }

    /// Store with a fresh [`MemoryStorage`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    /// Replace the cache with the backend's contents.
    pub fn load(&mut self) -> StorageResult<usize> {
        self.cache = self.backend.load_all()?;
        self.dirty = false;
        tracing::debug!(
            backend = %self.backend.name(),
            count = self.cache.len(),
            "loaded catalog state"
        );
        Ok(self.cache.len())
    }

    /// Write the cache to the backend if anything changed.
    ///
    /// Returns `Ok(true)` if data was written.
    pub fn flush(&mut self) -> StorageResult<bool> {
        if !self.dirty {
            return Ok(false);
        }
        self.backend.save_all(&self.cache)?;
        self.dirty = false;
        Ok(true)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.cache.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if self.cache.get(&key) != Some(&value) {
            self.cache.insert(key, value);
            self.dirty = true;
        }
    }

    /// Remove a key. Returns the old value if there was one.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let removed = self.cache.remove(key);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Non-negative integer stored under `key`.
    ///
    /// Absent keys and values of any other JSON type read as `None`.
    #[must_use]
    pub fn get_index(&self, key: &str) -> Option<usize> {
        let value = self.cache.get(key)?;
        match value.as_u64().and_then(|n| usize::try_from(n).ok()) {
            Some(index) => Some(index),
            None => {
                tracing::warn!(key, %value, "stored value is not an index, ignoring");
                None
            }
        }
    }

    /// Store an index, or remove the key for `None`.
    pub fn set_index(&mut self, key: &str, index: Option<usize>) {
        match index {
            Some(index) => self.set(key, Value::from(index)),
            None => {
                self.remove(key);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Check if there are unsaved changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }
}

impl fmt::Debug for StateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateStore")
            .field("backend", &self.backend.name())
            .field("entries", &self.cache.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
