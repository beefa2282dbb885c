//! File-based set storage for Remembrall.
//!
//! The collection lives in a single JSON file, `<home>/sets.json`.
//! Atomic writes are achieved via temp file + rename pattern.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{sets_path, SETS_FILE};
use crate::core::Collection;
use crate::error::{RemembrallError, Result};
use crate::storage::SetStore;
use crate::util::read_to_string_limited;

/// File-based set storage.
///
/// Does not create anything on construction: a missing file means the user
/// has not run `init`, which `load` reports as `NotInitialized`.
#[derive(Debug, Clone)]
pub struct FileSetStore {
    /// Path of the JSON store.
    path: PathBuf,
}

impl FileSetStore {
    /// Create a store at the default location (`<home>/sets.json`).
    pub fn new() -> Result<Self> {
        let path = sets_path().ok_or_else(|| {
            RemembrallError::config("Could not determine the remembrall home directory")
        })?;
        Ok(Self::with_path(path))
    }

    /// Create a store backed by a specific file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store for `sets.json` inside a directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self::with_path(dir.join(SETS_FILE))
    }

    /// Path of the JSON store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the path for a temp file used during atomic writes.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| SETS_FILE.to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    /// Write the collection atomically using temp file + rename.
    fn atomic_write(&self, collection: &Collection) -> Result<()> {
        let temp_path = self.temp_path();

        let json = serde_json::to_string_pretty(collection)?;

        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| RemembrallError::storage(&temp_path, e))?;
            file.write_all(json.as_bytes())
                .map_err(|e| RemembrallError::storage(&temp_path, e))?;
            file.sync_all()
                .map_err(|e| RemembrallError::storage(&temp_path, e))?;
        }

        // Rename temp file to final path (atomic on POSIX)
        fs::rename(&temp_path, &self.path).map_err(|e| RemembrallError::storage(&self.path, e))?;

        Ok(())
    }

    /// Create the store with an empty collection unless one already exists.
    ///
    /// Returns `Ok(true)` if the file was written. With `force`, an existing
    /// file is replaced only when it is blank or holds no sets. Any other
    /// unreadable content fails with `Corrupt` and is left in place.
    pub fn initialize(&self, force: bool) -> Result<bool> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| RemembrallError::storage(parent, e))?;
            }
        }

        if self.path.exists() {
            if !force {
                return Ok(false);
            }
            let content = read_to_string_limited(&self.path)?;
            if !content.trim().is_empty() {
                let existing = self.load()?;
                if !existing.is_empty() {
                    tracing::warn!(
                        path = %self.path.display(),
                        sets = existing.len(),
                        "refusing to overwrite a store that holds sets"
                    );
                    return Ok(false);
                }
            }
        }

        self.atomic_write(&Collection::new())?;
        Ok(true)
    }
}

impl SetStore for FileSetStore {
    fn load(&self) -> Result<Collection> {
        if !self.path.exists() {
            return Err(RemembrallError::not_initialized(&self.path));
        }

        let content = read_to_string_limited(&self.path)?;

        if content.trim().is_empty() {
            return Err(RemembrallError::corrupt(&self.path, "file is empty"));
        }

        let collection: Collection = serde_json::from_str(&content)
            .map_err(|e| RemembrallError::corrupt(&self.path, e.to_string()))?;

        tracing::debug!(path = %self.path.display(), sets = collection.len(), "store loaded");
        Ok(collection)
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                return Err(RemembrallError::not_initialized(&self.path));
            }
            _ => {}
        }

        self.atomic_write(collection)?;
        tracing::debug!(path = %self.path.display(), sets = collection.len(), "store saved");
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.path.is_file()
    }
}
