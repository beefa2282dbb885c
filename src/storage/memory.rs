//! In-memory set storage for testing.
//!
//! This module provides a thread-safe in-memory implementation of the
//! SetStore trait. The collection is kept as serialized JSON so that every
//! save and load goes through the same encoding as the file store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::core::Collection;
use crate::error::{RemembrallError, Result};
use crate::storage::SetStore;

/// Path reported in errors from the in-memory store.
const MEMORY_PATH: &str = "<memory>";

/// In-memory set store for testing.
///
/// Thread-safe implementation using `RwLock<Option<String>>`.
/// `None` models a store that was never initialized.
#[derive(Debug)]
pub struct MemorySetStore {
    /// Serialized collection.
    contents: RwLock<Option<String>>,
    /// Number of successful saves.
    saves: AtomicUsize,
}

impl Default for MemorySetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySetStore {
    /// Create an initialized store holding an empty collection.
    pub fn new() -> Self {
        Self {
            contents: RwLock::new(Some("{}".to_string())),
            saves: AtomicUsize::new(0),
        }
    }

    /// Create a store that has never been initialized.
    pub fn uninitialized() -> Self {
        Self {
            contents: RwLock::new(None),
            saves: AtomicUsize::new(0),
        }
    }

    /// Create a store pre-populated with a collection.
    pub fn with_collection(collection: &Collection) -> Result<Self> {
        let store = Self::new();
        *store.contents.write().unwrap() = Some(serde_json::to_string(collection)?);
        Ok(store)
    }

    /// Replace the raw stored text, bypassing serialization.
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.contents.write().unwrap() = Some(raw.into());
    }

    /// Get the number of saves performed.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SetStore for MemorySetStore {
    fn load(&self) -> Result<Collection> {
        let contents = self.contents.read().unwrap();
        let raw = contents
            .as_deref()
            .ok_or_else(|| RemembrallError::not_initialized(MEMORY_PATH))?;

        if raw.trim().is_empty() {
            return Err(RemembrallError::corrupt(MEMORY_PATH, "store is empty"));
        }

        serde_json::from_str(raw).map_err(|e| RemembrallError::corrupt(MEMORY_PATH, e.to_string()))
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        let json = serde_json::to_string(collection)?;
        let mut contents = self.contents.write().unwrap();
        if contents.is_none() {
            return Err(RemembrallError::not_initialized(MEMORY_PATH));
        }
        *contents = Some(json);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.contents.read().unwrap().is_some()
    }
}
