//! Convert command for Remembrall.
//!
//! Imports a tab-separated export (one `term<TAB>definition` per line) as a
//! new set.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;
use crate::import::import_file;
use crate::storage::SetStore;

/// Options for the convert command.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Title for the new set. Defaults to the file stem.
    pub title: Option<String>,
}

/// Output format for the convert command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertOutput {
    /// Whether the import was successful.
    pub success: bool,
    /// Title of the new set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Cards imported.
    pub cards: usize,
    /// Error message if the import failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConvertOutput {
    /// Create a successful output.
    pub fn success(title: impl Into<String>, cards: usize) -> Self {
        Self {
            success: true,
            title: Some(title.into()),
            cards,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            title: None,
            cards: 0,
            error: Some(error.into()),
        }
    }
}

/// The convert command implementation.
pub struct ConvertCommand<S> {
    store: S,
    file: PathBuf,
}

impl<S: SetStore> ConvertCommand<S> {
    /// Create a new convert command.
    pub fn new(store: S, file: impl Into<PathBuf>) -> Self {
        Self {
            store,
            file: file.into(),
        }
    }

    /// Run the convert command.
    pub fn run(&self, options: &ConvertOptions) -> ConvertOutput {
        match self.convert(options) {
            Ok((title, cards)) => ConvertOutput::success(title, cards),
            Err(e) => ConvertOutput::failure(e.to_string()),
        }
    }

    fn convert(&self, options: &ConvertOptions) -> Result<(String, usize)> {
        // Load first so a missing store is reported before the file is read
        let mut collection = self.store.load()?;
        let set = import_file(&self.file, options.title.as_deref())?;

        let title = set.title().to_string();
        let cards = set.len();
        collection.insert(set)?;
        self.store.save(&collection)?;

        Ok((title, cards))
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ConvertOutput, options: &ConvertOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    /// Format output as human-readable text.
    fn format_human_readable(&self, output: &ConvertOutput) -> String {
        if !output.success {
            return format!(
                "Convert failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        format!(
            "Imported {} card(s) into '{}'.\n",
            output.cards,
            output.title.as_deref().unwrap_or_default()
        )
    }
}
