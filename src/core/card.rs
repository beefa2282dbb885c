//! Cards and card sets.
//!
//! A [`Card`] has no identity of its own: it is addressed by its position in
//! the owning [`CardSet`]. Starred cards are never stored separately; every
//! starred view is recomputed from the `starred` flags.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// On-disk shape of a card: `[term, definition, starred]`.
type CardRecord = (String, String, bool);

/// A term/definition pair with a starred flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CardRecord", into = "CardRecord")]
pub struct Card {
    /// Front of the card.
    pub term: String,
    /// Back of the card.
    pub definition: String,
    /// Marked for focused review.
    pub starred: bool,
}

impl Card {
    /// Create an unstarred card.
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
            starred: false,
        }
    }

    /// Builder: mark the card starred.
    pub fn starred(mut self) -> Self {
        self.starred = true;
        self
    }

    /// Flip the starred flag, returning the new value.
    pub fn toggle_star(&mut self) -> bool {
        self.starred = !self.starred;
        self.starred
    }

    /// Swap term and definition.
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.term, &mut self.definition);
    }
}

impl From<CardRecord> for Card {
    fn from((term, definition, starred): CardRecord) -> Self {
        Self {
            term,
            definition,
            starred,
        }
    }
}

impl From<Card> for CardRecord {
    fn from(card: Card) -> Self {
        (card.term, card.definition, card.starred)
    }
}

/// An ordered, titled collection of cards.
///
/// Title uniqueness is enforced by [`Collection`](super::Collection), which
/// is also the only place a set can be renamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSet {
    title: String,
    cards: Vec<Card>,
}

impl CardSet {
    /// Create a set from a title and cards.
    pub fn new(title: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            title: title.into(),
            cards,
        }
    }

    /// The set title.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// All cards in order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Card at a position.
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Mutable card at a position.
    pub fn card_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the set has no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Randomly permute the cards in place.
    ///
    /// Positions held by an in-progress session are invalid afterwards.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Swap term and definition on every card. Applying twice is a no-op.
    pub fn reverse(&mut self) {
        for card in &mut self.cards {
            card.reverse();
        }
    }

    /// Positions of cards whose term contains `query` (case-sensitive).
    ///
    /// The empty query matches every card.
    pub fn search_positions(&self, query: &str) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.term.contains(query))
            .map(|(i, _)| i)
            .collect()
    }

    /// Cards whose term contains `query`, in set order.
    pub fn search(&self, query: &str) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|card| card.term.contains(query))
            .collect()
    }

    /// Positions of starred cards, in set order.
    pub fn starred_positions(&self) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.starred)
            .map(|(i, _)| i)
            .collect()
    }

    /// Starred cards, recomputed from the flags on every call.
    pub fn starred_cards(&self) -> Vec<&Card> {
        self.cards.iter().filter(|card| card.starred).collect()
    }

    /// Number of starred cards.
    pub fn starred_count(&self) -> usize {
        self.cards.iter().filter(|card| card.starred).count()
    }

    /// Append cards to the end. Duplicates are kept.
    pub fn add_cards(&mut self, new_cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(new_cards);
    }

    /// Remove and return the card at a position.
    pub fn remove_card(&mut self, index: usize) -> Option<Card> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_set() -> CardSet {
        CardSet::new(
            "Spanish",
            vec![
                Card::new("cat", "gato"),
                Card::new("dog", "perro"),
                Card::new("catalog", "catálogo"),
            ],
        )
    }

    #[test]
    fn test_card_serializes_as_triple() {
        let card = Card::new("ATP", "energy currency of the cell").starred();
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, r#"["ATP","energy currency of the cell",true]"#);

        let parsed: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, card);
    }

    #[test]
    fn test_card_rejects_missing_field() {
        let result = serde_json::from_str::<Card>(r#"["ATP","energy"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_toggle_star() {
        let mut card = Card::new("a", "b");
        assert!(card.toggle_star());
        assert!(!card.toggle_star());
        assert!(!card.starred);
    }

    #[test]
    fn test_reverse_keeps_star() {
        let mut set = sample_set();
        set.card_mut(1).unwrap().starred = true;
        set.reverse();

        assert_eq!(set.card(0).unwrap().term, "gato");
        assert_eq!(set.card(0).unwrap().definition, "cat");
        assert!(set.card(1).unwrap().starred);
    }

    #[test]
    fn test_search_is_case_sensitive_substring() {
        let set = sample_set();
        let hits: Vec<&str> = set.search("cat").iter().map(|c| c.term.as_str()).collect();
        assert_eq!(hits, vec!["cat", "catalog"]);
        assert!(set.search("Cat").is_empty());
        assert_eq!(set.search_positions("og"), vec![1, 2]);
    }

    #[test]
    fn test_empty_query_matches_all_in_order() {
        let set = sample_set();
        let hits: Vec<&str> = set.search("").iter().map(|c| c.term.as_str()).collect();
        assert_eq!(hits, vec!["cat", "dog", "catalog"]);
    }

    #[test]
    fn test_starred_cards_follow_flags() {
        let mut set = sample_set();
        assert!(set.starred_cards().is_empty());

        set.card_mut(2).unwrap().starred = true;
        set.card_mut(0).unwrap().starred = true;

        let starred: Vec<&str> = set.starred_cards().iter().map(|c| c.term.as_str()).collect();
        assert_eq!(starred, vec!["cat", "catalog"]);
        assert_eq!(set.starred_positions(), vec![0, 2]);
        assert_eq!(set.starred_count(), 2);
    }

    #[test]
    fn test_add_cards_appends_without_dedup() {
        let mut set = sample_set();
        set.add_cards(vec![Card::new("cat", "gato")]);
        assert_eq!(set.len(), 4);
        assert_eq!(set.card(3).unwrap().term, "cat");
    }

    #[test]
    fn test_remove_card() {
        let mut set = sample_set();
        let removed = set.remove_card(1).unwrap();
        assert_eq!(removed.term, "dog");
        assert_eq!(set.len(), 2);
        assert!(set.remove_card(5).is_none());
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut set = sample_set();
        let mut rng = StdRng::seed_from_u64(7);
        set.shuffle(&mut rng);

        let mut terms: Vec<String> = set.cards().iter().map(|c| c.term.clone()).collect();
        terms.sort();
        assert_eq!(terms, vec!["cat", "catalog", "dog"]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_card() -> impl Strategy<Value = Card> {
            (".{0,12}", ".{0,12}", any::<bool>()).prop_map(|(term, definition, starred)| Card {
                term,
                definition,
                starred,
            })
        }

        fn arb_set() -> impl Strategy<Value = CardSet> {
            prop::collection::vec(arb_card(), 0..20).prop_map(|cards| CardSet::new("set", cards))
        }

        proptest! {
            // Property: reversing twice restores the set
            #[test]
            fn prop_reverse_is_involution(set in arb_set()) {
                let mut reversed = set.clone();
                reversed.reverse();
                reversed.reverse();
                prop_assert_eq!(reversed, set);
            }

            // Property: toggling twice restores the flag
            #[test]
            fn prop_toggle_star_twice(card in arb_card()) {
                let mut toggled = card.clone();
                toggled.toggle_star();
                toggled.toggle_star();
                prop_assert_eq!(toggled.starred, card.starred);
            }

            // Property: starred view is the exact starred subsequence
            #[test]
            fn prop_starred_is_subsequence(set in arb_set()) {
                let expected: Vec<&Card> = set.cards().iter().filter(|c| c.starred).collect();
                prop_assert_eq!(set.starred_cards(), expected);
                prop_assert!(set.starred_count() <= set.len());
            }

            // Property: starring a card is visible on the next call
            #[test]
            fn prop_star_visible_without_sync(
                set in arb_set(),
                pick in any::<prop::sample::Index>(),
            ) {
                prop_assume!(!set.is_empty());
                let mut set = set;
                let index = pick.index(set.len());
                set.card_mut(index).unwrap().starred = true;
                prop_assert!(set.starred_positions().contains(&index));
            }
        }
    }
}
