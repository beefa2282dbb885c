//! Delete command for Remembrall.
//!
//! Removes one set from the store. There is no undo.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::SetStore;

/// Options for the delete command.
#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the delete command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOutput {
    /// Whether the set was deleted.
    pub success: bool,
    /// Title of the set.
    pub title: String,
    /// Cards removed with the set.
    pub cards: usize,
    /// Error message if deletion failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeleteOutput {
    /// Create a successful output.
    pub fn success(title: impl Into<String>, cards: usize) -> Self {
        Self {
            success: true,
            title: title.into(),
            cards,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(title: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            title: title.into(),
            cards: 0,
            error: Some(error.into()),
        }
    }
}

/// The delete command implementation.
pub struct DeleteCommand<S> {
    store: S,
}

impl<S: SetStore> DeleteCommand<S> {
    /// Create a new delete command.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the delete command.
    pub fn run(&self, title: &str, _options: &DeleteOptions) -> DeleteOutput {
        match self.delete(title) {
            Ok(cards) => DeleteOutput::success(title, cards),
            Err(e) => DeleteOutput::failure(title, e.to_string()),
        }
    }

    fn delete(&self, title: &str) -> Result<usize> {
        let mut collection = self.store.load()?;
        let removed = collection.remove(title)?;
        self.store.save(&collection)?;
        Ok(removed.len())
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &DeleteOutput, options: &DeleteOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else if output.success {
            format!("Deleted '{}' ({} cards).\n", output.title, output.cards)
        } else {
            format!(
                "Delete failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::tests::sample_collection;
    use crate::storage::MemorySetStore;
    use std::sync::Arc;

    #[test]
    fn test_delete_set() {
        let store = Arc::new(MemorySetStore::with_collection(&sample_collection()).unwrap());
        let cmd = DeleteCommand::new(Arc::clone(&store));

        let output = cmd.run("Spanish", &DeleteOptions::default());
        assert!(output.success);
        assert_eq!(output.cards, 2);
        assert_eq!(store.load().unwrap().titles(), vec!["Biology 101", "Empty"]);
    }

    #[test]
    fn test_delete_missing_set() {
        let store = Arc::new(MemorySetStore::with_collection(&sample_collection()).unwrap());
        let cmd = DeleteCommand::new(Arc::clone(&store));

        let output = cmd.run("French", &DeleteOptions::default());
        assert!(!output.success);
        assert_eq!(store.save_count(), 0);
        assert_eq!(
            cmd.format_output(&output, &DeleteOptions::default()),
            "Delete failed: set not found: French\n"
        );
    }
}
