//! Tab-separated card import.
//!
//! One card per line, `term<TAB>definition`. Lines without a tab, or whose
//! definition is empty after the tab, are skipped. Only the first tab splits;
//! later tabs stay in the definition.

use std::path::Path;

use crate::core::{Card, CardSet};
use crate::error::{RemembrallError, Result};
use crate::util::read_to_string_limited;

/// Parse tab-separated text into cards, in line order.
pub fn parse_tab_separated(text: &str) -> Vec<Card> {
    let mut cards = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let Some((term, definition)) = line.split_once('\t') else {
            if !line.trim().is_empty() {
                tracing::debug!(line = number + 1, "skipping line without a tab");
            }
            continue;
        };
        if definition.is_empty() {
            tracing::debug!(line = number + 1, term, "skipping card with empty definition");
            continue;
        }
        cards.push(Card::new(term, definition));
    }

    cards
}

/// Default set title for an imported file: its stem.
pub fn title_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().trim().to_string())
        .filter(|stem| !stem.is_empty())
}

/// Read a tab-separated file into a new set.
///
/// The title defaults to the file stem. Files that yield no cards are
/// rejected rather than creating an empty set.
pub fn import_file(path: &Path, title: Option<&str>) -> Result<CardSet> {
    let title = match title {
        Some(title) => title.to_string(),
        None => title_from_path(path).ok_or_else(|| {
            RemembrallError::import(format!("cannot derive a title from {}", path.display()))
        })?,
    };

    let text = read_to_string_limited(path)?;
    let cards = parse_tab_separated(&text);
    if cards.is_empty() {
        return Err(RemembrallError::import(format!(
            "no `term<TAB>definition` lines found in {}",
            path.display()
        )));
    }

    tracing::info!(path = %path.display(), title = %title, cards = cards.len(), "file imported");
    Ok(CardSet::new(title, cards))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_definition_is_skipped() {
        let cards = parse_tab_separated("fire\tcombustion\nwater\t\n");
        assert_eq!(cards, vec![Card::new("fire", "combustion")]);
    }

    #[test]
    fn test_lines_without_tab_are_skipped() {
        let cards = parse_tab_separated("header line\n\nsun\tstar\n");
        assert_eq!(cards, vec![Card::new("sun", "star")]);
    }

    #[test]
    fn test_crlf_and_extra_tabs() {
        let cards = parse_tab_separated("a\tb\r\nc\td\te\r\n");
        assert_eq!(cards, vec![Card::new("a", "b"), Card::new("c", "d\te")]);
    }

    #[test]
    fn test_empty_term_is_kept() {
        let cards = parse_tab_separated("\tonly a definition\n");
        assert_eq!(cards, vec![Card::new("", "only a definition")]);
    }

    #[test]
    fn test_title_from_path() {
        assert_eq!(
            title_from_path(Path::new("/tmp/Spanish Verbs.txt")).as_deref(),
            Some("Spanish Verbs")
        );
        assert_eq!(title_from_path(Path::new("/")), None);
    }

    #[test]
    fn test_import_file_uses_stem() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("elements.tsv");
        fs::write(&path, "fire\tcombustion\nwater\t\n").unwrap();

        let set = import_file(&path, None).unwrap();
        assert_eq!(set.title(), "elements");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_import_file_with_title() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("x.txt");
        fs::write(&path, "a\tb\n").unwrap();

        let set = import_file(&path, Some("Letters")).unwrap();
        assert_eq!(set.title(), "Letters");
    }

    #[test]
    fn test_import_file_without_cards() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "no tabs here\n").unwrap();

        let err = import_file(&path, None).unwrap_err();
        assert!(matches!(err, RemembrallError::Import { .. }));
    }

    #[test]
    fn test_import_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = import_file(&dir.path().join("missing.txt"), None).unwrap_err();
        assert!(matches!(err, RemembrallError::Storage { .. }));
    }
}
