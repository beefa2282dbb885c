//! Set storage traits for Remembrall.
//!
//! This module defines the `SetStore` trait for collection persistence.

use std::sync::Arc;

use crate::core::Collection;
use crate::error::Result;

/// Trait for set storage backends.
///
/// Stores are read and written wholesale. Only one process is expected to
/// use a store at a time; concurrent writers overwrite each other at whole
/// collection granularity (last writer wins).
pub trait SetStore: Send + Sync {
    /// Load the full collection.
    ///
    /// Fails with `NotInitialized` if the store does not exist and with
    /// `Corrupt` if its content is not a valid collection. Never returns a
    /// partial collection.
    fn load(&self) -> Result<Collection>;

    /// Replace the stored collection.
    ///
    /// A failure part-way through must leave the previous content loadable.
    fn save(&self, collection: &Collection) -> Result<()>;

    /// Check if the store exists.
    fn is_initialized(&self) -> bool;
}

/// Blanket implementation of SetStore for Arc-wrapped stores.
///
/// This allows tests to keep a handle on a store that a command owns.
impl<T: SetStore + ?Sized> SetStore for Arc<T> {
    fn load(&self) -> Result<Collection> {
        (**self).load()
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        (**self).save(collection)
    }

    fn is_initialized(&self) -> bool {
        (**self).is_initialized()
    }
}
