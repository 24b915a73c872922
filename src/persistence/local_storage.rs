//! LocalStorage backend (web)
//!
//! Stores the bare level number as a string, so saves from earlier builds
//! of the web game load unchanged.

use super::{ProgressStore, StorageError};
use crate::progress::Progress;

/// LocalStorage key
pub const STORAGE_KEY: &str = "chronoBirdHighestLevel";

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|_| StorageError::Unavailable("localStorage access denied".into()))?
            .ok_or_else(|| StorageError::Unavailable("localStorage missing".into()))
    }
}

impl ProgressStore for LocalStorageStore {
    fn load(&self) -> Result<Option<Progress>, StorageError> {
        let raw = Self::storage()?
            .get_item(STORAGE_KEY)
            .map_err(|_| StorageError::Unavailable("localStorage read failed".into()))?;

        Ok(raw
            .and_then(|s| s.trim().parse::<u32>().ok())
            .map(|level| Progress::new(level).sanitized()))
    }

    fn save(&mut self, progress: &Progress) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(STORAGE_KEY, &progress.highest_level.to_string())
            .map_err(|_| StorageError::Unavailable("localStorage write failed".into()))?;
        log::info!("Progress saved (level {})", progress.highest_level);
        Ok(())
    }
}
