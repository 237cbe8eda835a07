//! Persistence gateway for progress snapshots.
//!
//! The core only defines the snapshot shape and when it is written or read.
//! Storage lives behind [`SnapshotStore`]:
//!
//! - [`MemoryStore`]: in-process, for tests and ephemeral sessions
//! - `FileStore` (in `tui-pairs-store`): JSON file with atomic replace
//!
//! Failures never panic. The session turns them into a warning and a
//! boolean result; a failed save only means the next load falls back to a
//! new game.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::snapshot::ProgressSnapshot;

/// Errors that can occur while saving or loading a snapshot.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error during file operations.
    Io(std::io::Error),
    /// Snapshot could not be encoded or decoded.
    Serialization(String),
    /// Stored data is present but unusable.
    Corruption(String),
    /// Backend refuses the operation (read-only, missing directory, ...).
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            StoreError::Corruption(msg) => write!(f, "storage corruption: {msg}"),
            StoreError::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Pluggable snapshot storage.
pub trait SnapshotStore: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Read the stored snapshot. `Ok(None)` means nothing has been saved.
    fn load(&self) -> StoreResult<Option<ProgressSnapshot>>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &ProgressSnapshot) -> StoreResult<()>;

    /// Remove any stored snapshot.
    fn clear(&self) -> StoreResult<()>;

    fn is_available(&self) -> bool {
        true
    }
}

impl<T: SnapshotStore + ?Sized> SnapshotStore for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn load(&self) -> StoreResult<Option<ProgressSnapshot>> {
        (**self).load()
    }

    fn save(&self, snapshot: &ProgressSnapshot) -> StoreResult<()> {
        (**self).save(snapshot)
    }

    fn clear(&self) -> StoreResult<()> {
        (**self).clear()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// In-memory snapshot store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RwLock<Option<ProgressSnapshot>>,
    saves: AtomicUsize,
    read_only: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_snapshot(snapshot: ProgressSnapshot) -> Self {
        Self {
            slot: RwLock::new(Some(snapshot)),
            ..Self::default()
        }
    }

    /// Make every subsequent save fail with [`StoreError::Unavailable`].
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Current stored snapshot.
    pub fn peek(&self) -> Option<ProgressSnapshot> {
        self.slot.read().ok().and_then(|g| g.clone())
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Corruption("lock poisoned".into())
}

impl SnapshotStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    fn load(&self) -> StoreResult<Option<ProgressSnapshot>> {
        let guard = self.slot.read().map_err(poisoned)?;
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &ProgressSnapshot) -> StoreResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is read-only".into()));
        }
        *self.slot.write().map_err(poisoned)? = Some(snapshot.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        *self.slot.write().map_err(poisoned)? = None;
        Ok(())
    }

    fn is_available(&self) -> bool {
        !self.read_only.load(Ordering::SeqCst)
    }
}
