//! List command for Remembrall.
//!
//! Lists every set with its card and starred counts.

use serde::{Deserialize, Serialize};

use crate::core::CardSet;
use crate::storage::SetStore;

/// Options for the list command.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the list command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOutput {
    /// Whether the list was successful.
    pub success: bool,
    /// Number of sets.
    pub count: usize,
    /// The sets, in collection order.
    pub sets: Vec<SetInfo>,
    /// Error message if listing failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of one set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetInfo {
    pub title: String,
    pub cards: usize,
    pub starred: usize,
}

impl From<&CardSet> for SetInfo {
    fn from(set: &CardSet) -> Self {
        Self {
            title: set.title().to_string(),
            cards: set.len(),
            starred: set.starred_count(),
        }
    }
}

impl ListOutput {
    /// Create a successful output.
    pub fn success(sets: Vec<SetInfo>) -> Self {
        Self {
            success: true,
            count: sets.len(),
            sets,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            count: 0,
            sets: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The list command implementation.
pub struct ListCommand<S> {
    store: S,
}

impl<S: SetStore> ListCommand<S> {
    /// Create a new list command.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the list command.
    pub fn run(&self, _options: &ListOptions) -> ListOutput {
        match self.store.load() {
            Ok(collection) => ListOutput::success(collection.iter().map(SetInfo::from).collect()),
            Err(e) => ListOutput::failure(e.to_string()),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ListOutput, options: &ListOptions) -> String {
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
    fn format_human_readable(&self, output: &ListOutput) -> String {
        if !output.success {
            return format!(
                "List failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        if output.sets.is_empty() {
            return "No sets yet. Run `remembrall` and choose \"Add a Set\".\n".to_string();
        }

        let mut lines = vec![format!("Found {} set(s):\n", output.count)];
        for set in &output.sets {
            let starred = if set.starred > 0 {
                format!(", {} starred", set.starred)
            } else {
                String::new()
            };
            lines.push(format!("  {} ({} cards{})", set.title, set.cards, starred));
        }

        lines.join("\n") + "\n"
    }
}
