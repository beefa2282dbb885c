//! Unified error types for Remembrall.
//!
//! Errors split into two groups. Data-integrity errors (a missing or corrupt
//! store, failed writes) end the current run: a half-loaded collection must
//! never be saved back over the user's sets. Everything else is recoverable
//! and is reported by the menu shell before control returns to the user.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Remembrall operations.
#[derive(Error, Debug)]
pub enum RemembrallError {
    /// The store file does not exist yet.
    #[error("no set store at {path}; run `remembrall init` first")]
    NotInitialized { path: PathBuf },

    /// The store file exists but does not hold a valid collection.
    #[error("set store at {path} is corrupt: {message}")]
    Corrupt { path: PathBuf, message: String },

    /// A study session was requested over zero cards.
    #[error("nothing to study in '{title}' ({mode})")]
    EmptyStudySet { title: String, mode: String },

    /// No set with the given title.
    #[error("set not found: {title}")]
    SetNotFound { title: String },

    /// A set with the given title already exists.
    #[error("a set named '{title}' already exists")]
    DuplicateTitle { title: String },

    /// Card position outside the owning set.
    #[error("no card at position {index}")]
    CardNotFound { index: usize },

    /// Rejected user input.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// I/O errors on a known path.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON serialization errors outside of store loading.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// Tab-separated import errors.
    #[error("import error: {message}")]
    Import { message: String },

    /// Raw-mode or key-read failures.
    #[error("terminal error: {message}")]
    Terminal { message: String },
}

/// A specialized Result type for Remembrall operations.
pub type Result<T> = std::result::Result<T, RemembrallError>;

impl RemembrallError {
    /// Create a not-initialized error.
    pub fn not_initialized(path: impl Into<PathBuf>) -> Self {
        Self::NotInitialized { path: path.into() }
    }

    /// Create a corrupt-store error.
    pub fn corrupt(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an empty-study-set error.
    pub fn empty_study_set(title: impl Into<String>, mode: impl Into<String>) -> Self {
        Self::EmptyStudySet {
            title: title.into(),
            mode: mode.into(),
        }
    }

    /// Create a set-not-found error.
    pub fn set_not_found(title: impl Into<String>) -> Self {
        Self::SetNotFound {
            title: title.into(),
        }
    }

    /// Create a duplicate-title error.
    pub fn duplicate_title(title: impl Into<String>) -> Self {
        Self::DuplicateTitle {
            title: title.into(),
        }
    }

    /// Create a card-not-found error.
    pub fn card_not_found(index: usize) -> Self {
        Self::CardNotFound { index }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an import error.
    pub fn import(message: impl Into<String>) -> Self {
        Self::Import {
            message: message.into(),
        }
    }

    /// Create a terminal error.
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    /// Check if this error must end the current run.
    ///
    /// Store errors are fatal: continuing would risk saving a partial
    /// collection over the real one.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NotInitialized { .. } | Self::Corrupt { .. } | Self::Storage { .. }
        )
    }
}

impl From<io::Error> for RemembrallError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for RemembrallError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-open error handling.
///
/// Only for config loading. Store access never fails open.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }
}

/// Process exit codes.
pub mod exit_codes {
    /// Command completed.
    pub const SUCCESS: i32 = 0;

    /// Command failed with a recoverable error.
    pub const ERROR: i32 = 1;

    /// The store has not been initialized.
    pub const NOT_INITIALIZED: i32 = 2;

    /// The process panicked.
    pub const CRASH: i32 = 3;
}
