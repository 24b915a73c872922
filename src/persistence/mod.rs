//! Save/load of campaign progress
//!
//! Features:
//! - `ProgressStore` trait so the campaign never knows where data lives
//! - JSON file backend with tmp-then-rename writes (native)
//! - LocalStorage backend (web)
//! - In-memory backend for tests and storage-less hosts

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::progress::Progress;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

#[derive(Debug)]
pub enum StorageError {
    /// No storage backend reachable (private browsing, quota, missing dir)
    Unavailable(String),
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::Io(e) => write!(f, "storage I/O error: {e}"),
            Self::Parse(e) => write!(f, "malformed stored data: {e}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unavailable(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Keyed storage for the highest level reached
pub trait ProgressStore {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<Progress>, StorageError>;
    fn save(&mut self, progress: &Progress) -> Result<(), StorageError>;
}

/// Shared in-memory store. Clones see the same data, so a test can keep a
/// handle after giving one to a campaign.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    saved: Option<Progress>,
    saves: u32,
    available: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_progress(None)
    }

    pub fn with_progress(saved: Option<Progress>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryInner {
                saved,
                saves: 0,
                available: true,
            })),
        }
    }

    /// Simulate storage going away (every load/save fails)
    pub fn set_available(&self, available: bool) {
        self.inner.borrow_mut().available = available;
    }

    pub fn saved(&self) -> Option<Progress> {
        self.inner.borrow().saved.clone()
    }

    /// Successful saves so far
    pub fn save_count(&self) -> u32 {
        self.inner.borrow().saves
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Option<Progress>, StorageError> {
        let inner = self.inner.borrow();
        if !inner.available {
            return Err(StorageError::Unavailable("memory store disabled".into()));
        }
        Ok(inner.saved.clone())
    }

    fn save(&mut self, progress: &Progress) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        if !inner.available {
            return Err(StorageError::Unavailable("memory store disabled".into()));
        }
        inner.saved = Some(progress.clone());
        inner.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_shares_data() {
        let store = MemoryStore::new();
        let mut handle = store.clone();
        assert!(store.load().unwrap().is_none());

        handle.save(&Progress::new(42)).unwrap();
        assert_eq!(store.load().unwrap(), Some(Progress::new(42)));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_memory_store_unavailable() {
        let mut store = MemoryStore::with_progress(Some(Progress::new(5)));
        store.set_available(false);
        assert!(matches!(store.load(), Err(StorageError::Unavailable(_))));
        assert!(store.save(&Progress::new(6)).is_err());
        assert_eq!(store.saved(), Some(Progress::new(5)));
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::Unavailable("quota exceeded".into());
        assert_eq!(err.to_string(), "storage unavailable: quota exceeded");
    }
}
