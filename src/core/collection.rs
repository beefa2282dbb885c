//! The full collection of card sets.
//!
//! Serialized as a JSON object mapping each title to its list of card
//! triples. Object order is the collection order, so sets come back in the
//! order they were created.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::card::{Card, CardSet};
use crate::error::{RemembrallError, Result};

/// All card sets known to the store, keyed by unique title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    sets: Vec<CardSet>,
}

impl Collection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check if the collection has no sets.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Set titles in collection order.
    pub fn titles(&self) -> Vec<&str> {
        self.sets.iter().map(CardSet::title).collect()
    }

    /// Iterate over sets in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &CardSet> {
        self.sets.iter()
    }

    /// Check if a title is taken.
    pub fn contains(&self, title: &str) -> bool {
        self.sets.iter().any(|s| s.title() == title)
    }

    /// Look up a set by title.
    pub fn get(&self, title: &str) -> Option<&CardSet> {
        self.sets.iter().find(|s| s.title() == title)
    }

    /// Look up a set by title for mutation.
    pub fn get_mut(&mut self, title: &str) -> Option<&mut CardSet> {
        self.sets.iter_mut().find(|s| s.title() == title)
    }

    /// Look up a set, failing with `SetNotFound`.
    pub fn require(&self, title: &str) -> Result<&CardSet> {
        self.get(title)
            .ok_or_else(|| RemembrallError::set_not_found(title))
    }

    /// Mutable lookup, failing with `SetNotFound`.
    pub fn require_mut(&mut self, title: &str) -> Result<&mut CardSet> {
        self.get_mut(title)
            .ok_or_else(|| RemembrallError::set_not_found(title))
    }

    /// Add a set. Titles must be non-empty and unique.
    pub fn insert(&mut self, set: CardSet) -> Result<()> {
        validate_title(set.title())?;
        if self.contains(set.title()) {
            return Err(RemembrallError::duplicate_title(set.title()));
        }
        tracing::info!(title = set.title(), cards = set.len(), "set added");
        self.sets.push(set);
        Ok(())
    }

    /// Remove a set by title.
    pub fn remove(&mut self, title: &str) -> Result<CardSet> {
        let index = self
            .sets
            .iter()
            .position(|s| s.title() == title)
            .ok_or_else(|| RemembrallError::set_not_found(title))?;
        tracing::info!(title, "set deleted");
        Ok(self.sets.remove(index))
    }

    /// Rename a set, keeping its position.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        validate_title(new)?;
        if old == new {
            return self.require_mut(old).map(|_| ());
        }
        if self.contains(new) {
            return Err(RemembrallError::duplicate_title(new));
        }
        self.require_mut(old)?.set_title(new);
        tracing::info!(from = old, to = new, "set renamed");
        Ok(())
    }
}

/// Check that a title can key a set.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(RemembrallError::invalid_input("set title cannot be empty"));
    }
    Ok(())
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sets.len()))?;
        for set in &self.sets {
            map.serialize_entry(set.title(), set.cards())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(CollectionVisitor)
    }
}

struct CollectionVisitor;

impl<'de> Visitor<'de> for CollectionVisitor {
    type Value = Collection;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from set title to a list of [term, definition, starred] cards")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<Self::Value, A::Error> {
        let mut collection = Collection::new();
        while let Some((title, cards)) = access.next_entry::<String, Vec<Card>>()? {
            if collection.contains(&title) {
                return Err(serde::de::Error::custom(format!(
                    "duplicate set title '{}'",
                    title
                )));
            }
            collection.sets.push(CardSet::new(title, cards));
        }
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn biology() -> CardSet {
        CardSet::new(
            "Biology 101",
            vec![
                Card::new("mitochondria", "the powerhouse of the cell"),
                Card::new("ATP", "energy currency of the cell").starred(),
            ],
        )
    }

    #[test]
    fn test_serializes_to_title_map() {
        let mut collection = Collection::new();
        collection.insert(biology()).unwrap();

        let json = serde_json::to_string(&collection).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"Biology 101":[["mitochondria","the powerhouse of the cell",false],"#,
                r#"["ATP","energy currency of the cell",true]]}"#
            )
        );
    }

    #[test]
    fn test_deserialize_preserves_set_order() {
        let json = r#"{"zeta": [["z", "last", false]], "alpha": [], "mid": [["m", "n", true]]}"#;
        let collection: Collection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.titles(), vec!["zeta", "alpha", "mid"]);
        assert!(collection.get("mid").unwrap().card(0).unwrap().starred);
    }

    #[test]
    fn test_deserialize_rejects_duplicate_titles() {
        let json = r#"{"a": [], "a": []}"#;
        let err = serde_json::from_str::<Collection>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate set title"));
    }

    #[test]
    fn test_deserialize_rejects_wrong_shape() {
        assert!(serde_json::from_str::<Collection>("[]").is_err());
        assert!(serde_json::from_str::<Collection>(r#"{"a": [["x"]]}"#).is_err());
        assert!(serde_json::from_str::<Collection>(r#"{"a": [["x", "y", "no"]]}"#).is_err());
    }

    #[test]
    fn test_insert_rejects_duplicate_and_empty() {
        let mut collection = Collection::new();
        collection.insert(biology()).unwrap();

        let err = collection.insert(CardSet::new("Biology 101", vec![])).unwrap_err();
        assert!(matches!(err, RemembrallError::DuplicateTitle { .. }));

        let err = collection.insert(CardSet::new("   ", vec![])).unwrap_err();
        assert!(matches!(err, RemembrallError::InvalidInput { .. }));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut collection = Collection::new();
        collection.insert(biology()).unwrap();

        let removed = collection.remove("Biology 101").unwrap();
        assert_eq!(removed.len(), 2);
        assert!(collection.is_empty());

        let err = collection.remove("Biology 101").unwrap_err();
        assert!(matches!(err, RemembrallError::SetNotFound { .. }));
    }

    #[test]
    fn test_rename_keeps_position() {
        let mut collection = Collection::new();
        collection.insert(CardSet::new("first", vec![])).unwrap();
        collection.insert(biology()).unwrap();
        collection.insert(CardSet::new("last", vec![])).unwrap();

        collection.rename("Biology 101", "Biology 102").unwrap();
        assert_eq!(collection.titles(), vec!["first", "Biology 102", "last"]);
    }

    #[test]
    fn test_rename_conflicts() {
        let mut collection = Collection::new();
        collection.insert(CardSet::new("a", vec![])).unwrap();
        collection.insert(CardSet::new("b", vec![])).unwrap();

        assert!(matches!(
            collection.rename("a", "b").unwrap_err(),
            RemembrallError::DuplicateTitle { .. }
        ));
        assert!(matches!(
            collection.rename("missing", "c").unwrap_err(),
            RemembrallError::SetNotFound { .. }
        ));
        assert!(collection.rename("a", "a").is_ok());
    }
}
