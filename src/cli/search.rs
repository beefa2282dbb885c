//! Search command for Remembrall.
//!
//! Finds cards in one set whose term contains the query.

use serde::{Deserialize, Serialize};

use crate::core::Card;
use crate::error::RemembrallError;
use crate::storage::SetStore;

/// Options for the search command.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the search command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutput {
    /// Whether the search was successful.
    pub success: bool,
    /// Set searched.
    pub set: String,
    /// The search query used.
    pub query: String,
    /// Number of results found.
    pub count: usize,
    /// Matching cards, in set order.
    pub results: Vec<CardInfo>,
    /// Error message if search failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A matching card and its position in the set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardInfo {
    pub position: usize,
    pub term: String,
    pub definition: String,
    pub starred: bool,
}

impl CardInfo {
    fn new(position: usize, card: &Card) -> Self {
        Self {
            position,
            term: card.term.clone(),
            definition: card.definition.clone(),
            starred: card.starred,
        }
    }
}

impl SearchOutput {
    /// Create a successful output.
    pub fn success(
        set: impl Into<String>,
        query: impl Into<String>,
        results: Vec<CardInfo>,
    ) -> Self {
        Self {
            success: true,
            set: set.into(),
            query: query.into(),
            count: results.len(),
            results,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(
        set: impl Into<String>,
        query: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            set: set.into(),
            query: query.into(),
            count: 0,
            results: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The search command implementation.
pub struct SearchCommand<S> {
    store: S,
}

impl<S: SetStore> SearchCommand<S> {
    /// Create a new search command.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the search command. An empty query lists every card.
    pub fn run(&self, title: &str, query: &str, _options: &SearchOptions) -> SearchOutput {
        let collection = match self.store.load() {
            Ok(collection) => collection,
            Err(e) => return SearchOutput::failure(title, query, e.to_string()),
        };

        let Some(set) = collection.get(title) else {
            return SearchOutput::failure(
                title,
                query,
                RemembrallError::set_not_found(title).to_string(),
            );
        };

        let results = set
            .search_positions(query)
            .into_iter()
            .filter_map(|i| set.card(i).map(|card| CardInfo::new(i, card)))
            .collect();
        SearchOutput::success(title, query, results)
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &SearchOutput, options: &SearchOptions) -> String {
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
    fn format_human_readable(&self, output: &SearchOutput) -> String {
        if !output.success {
            return format!(
                "Search failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        if output.results.is_empty() {
            return format!("No cards in '{}' match '{}'.\n", output.set, output.query);
        }

        let mut lines = vec![format!(
            "Found {} card(s) in '{}':\n",
            output.count, output.set
        )];
        for card in &output.results {
            let star = if card.starred { "★" } else { " " };
            lines.push(format!(
                "{} {:>3}. {}\t{}",
                star,
                card.position + 1,
                card.term,
                card.definition
            ));
        }

        lines.join("\n") + "\n"
    }
}
