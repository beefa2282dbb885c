//! Study session state machine.
//!
//! A session walks one card set (or its starred subset) and reacts to
//! single-key commands. It mutates the borrowed set in place (stars,
//! reversal) but never persists: the caller saves the collection at its
//! checkpoints once the session has been dropped.

use std::fmt;

use crate::core::card::{Card, CardSet};
use crate::error::{RemembrallError, Result};

/// Which side of the current card is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Front.
    #[default]
    Term,
    /// Back.
    Definition,
}

impl Side {
    /// The other side.
    pub fn flipped(self) -> Self {
        match self {
            Side::Term => Side::Definition,
            Side::Definition => Side::Term,
        }
    }
}

/// Which cards the session walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StudyMode {
    /// Every card in set order.
    #[default]
    All,
    /// Only cards starred when the session started.
    Starred,
}

impl fmt::Display for StudyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudyMode::All => f.write_str("all cards"),
            StudyMode::Starred => f.write_str("starred"),
        }
    }
}

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Displaying the card at `index` of the active sequence.
    Showing { index: usize, side: Side },
    /// Moved forward past the last card.
    Complete,
    /// The user quit.
    Exited,
}

impl SessionState {
    /// Check if no further keys will be handled.
    pub fn is_finished(&self) -> bool {
        matches!(self, SessionState::Complete | SessionState::Exited)
    }
}

/// A keypress command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Space: show the other side.
    Flip,
    /// `h`: previous card.
    Previous,
    /// `l`: next card, or complete after the last.
    Next,
    /// `s`: star or unstar the current card.
    ToggleStar,
    /// `r`: swap term and definition across the whole set.
    Reverse,
    /// `q`: leave the session.
    Quit,
}

impl Command {
    /// Map a key to a command. Unbound keys yield `None`.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            ' ' => Some(Command::Flip),
            'h' => Some(Command::Previous),
            'l' => Some(Command::Next),
            's' => Some(Command::ToggleStar),
            'r' => Some(Command::Reverse),
            'q' => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Choices offered once a session reaches `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionChoice {
    /// Same mode, same order, from the start.
    StudyAgain,
    /// Shuffle the set and study every card.
    Reshuffle,
    /// Study the starred cards.
    StudyStarred,
    /// Leave to the set editor.
    EditSet,
    /// Back to the main menu.
    GoBack,
}

/// What the caller should do after a completion choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Start a fresh session.
    Restart { mode: StudyMode, reshuffle: bool },
    /// Open the set editor.
    Edit,
    /// Return to the menu.
    Leave,
}

impl CompletionChoice {
    /// Resolve this choice against the mode of the finished session.
    pub fn next_step(self, finished_mode: StudyMode) -> NextStep {
        match self {
            CompletionChoice::StudyAgain => NextStep::Restart {
                mode: finished_mode,
                reshuffle: false,
            },
            CompletionChoice::Reshuffle => NextStep::Restart {
                mode: StudyMode::All,
                reshuffle: true,
            },
            CompletionChoice::StudyStarred => NextStep::Restart {
                mode: StudyMode::Starred,
                reshuffle: false,
            },
            CompletionChoice::EditSet => NextStep::Edit,
            CompletionChoice::GoBack => NextStep::Leave,
        }
    }
}

/// Study session over one borrowed card set.
#[derive(Debug)]
pub struct StudySession<'a> {
    /// The set being studied. Mutations are visible to the owner.
    set: &'a mut CardSet,
    /// Mode the session was opened in.
    mode: StudyMode,
    /// Card positions in the set, in study order. Fixed at start.
    order: Vec<usize>,
    /// Current state.
    state: SessionState,
    /// Sequence indices reached going forward, in first-visit order.
    visited: Vec<usize>,
}

impl<'a> StudySession<'a> {
    /// Open a session at the first card.
    ///
    /// Fails with `EmptyStudySet` when the active sequence has no cards.
    pub fn new(set: &'a mut CardSet, mode: StudyMode) -> Result<Self> {
        let order = match mode {
            StudyMode::All => (0..set.len()).collect(),
            StudyMode::Starred => set.starred_positions(),
        };

        if order.is_empty() {
            return Err(RemembrallError::empty_study_set(
                set.title(),
                mode.to_string(),
            ));
        }

        tracing::debug!(title = set.title(), %mode, cards = order.len(), "session started");

        Ok(Self {
            set,
            mode,
            order,
            state: SessionState::Showing {
                index: 0,
                side: Side::Term,
            },
            visited: vec![0],
        })
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Mode the session was opened in.
    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    /// Length of the active sequence.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false: empty sessions cannot be opened.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The set being studied.
    pub fn set(&self) -> &CardSet {
        &*self.set
    }

    /// Sequence indices visited going forward.
    pub fn visited(&self) -> &[usize] {
        &self.visited
    }

    /// The card on screen, if showing.
    pub fn current_card(&self) -> Option<&Card> {
        match self.state {
            SessionState::Showing { index, .. } => self.set.card(self.order[index]),
            _ => None,
        }
    }

    /// Apply one command and return the new state.
    ///
    /// Commands after `Complete` or `Exited` are ignored.
    pub fn handle(&mut self, command: Command) -> SessionState {
        let SessionState::Showing { index, side } = self.state else {
            return self.state;
        };

        self.state = match command {
            Command::Flip => SessionState::Showing {
                index,
                side: side.flipped(),
            },
            Command::Previous => self.previous(index, side),
            Command::Next => self.next(index),
            Command::ToggleStar => {
                let position = self.order[index];
                if let Some(card) = self.set.card_mut(position) {
                    let starred = card.toggle_star();
                    tracing::debug!(position, starred, "star toggled");
                }
                SessionState::Showing { index, side }
            }
            Command::Reverse => {
                self.set.reverse();
                tracing::debug!(title = self.set.title(), "set reversed");
                SessionState::Showing {
                    index,
                    side: Side::Term,
                }
            }
            Command::Quit => {
                tracing::debug!(index, "session exited");
                SessionState::Exited
            }
        };

        self.state
    }

    /// Transition: Showing(i) → Showing(i-1, Term). No-op at the first card.
    fn previous(&self, index: usize, side: Side) -> SessionState {
        if index == 0 {
            return SessionState::Showing { index, side };
        }
        SessionState::Showing {
            index: index - 1,
            side: Side::Term,
        }
    }

    /// Transition: Showing(i) → Showing(i+1, Term), or Complete after the last card.
    fn next(&mut self, index: usize) -> SessionState {
        if index + 1 >= self.order.len() {
            tracing::debug!(title = self.set.title(), "session complete");
            return SessionState::Complete;
        }

        let next = index + 1;
        if !self.visited.contains(&next) {
            self.visited.push(next);
        }
        SessionState::Showing {
            index: next,
            side: Side::Term,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spanish() -> CardSet {
        CardSet::new(
            "Spanish",
            vec![Card::new("cat", "gato"), Card::new("dog", "perro")],
        )
    }

    fn showing(index: usize, side: Side) -> SessionState {
        SessionState::Showing { index, side }
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Command::from_key(' '), Some(Command::Flip));
        assert_eq!(Command::from_key('h'), Some(Command::Previous));
        assert_eq!(Command::from_key('l'), Some(Command::Next));
        assert_eq!(Command::from_key('s'), Some(Command::ToggleStar));
        assert_eq!(Command::from_key('r'), Some(Command::Reverse));
        assert_eq!(Command::from_key('q'), Some(Command::Quit));
        assert_eq!(Command::from_key('x'), None);
        assert_eq!(Command::from_key('L'), None);
    }

    #[test]
    fn test_starts_on_first_term() {
        let mut set = spanish();
        let session = StudySession::new(&mut set, StudyMode::All).unwrap();
        assert_eq!(session.state(), showing(0, Side::Term));
        assert_eq!(session.current_card().unwrap().term, "cat");
        assert_eq!(session.visited(), &[0]);
    }

    #[test]
    fn test_flip_toggles_side() {
        let mut set = spanish();
        let mut session = StudySession::new(&mut set, StudyMode::All).unwrap();
        assert_eq!(session.handle(Command::Flip), showing(0, Side::Definition));
        assert_eq!(session.handle(Command::Flip), showing(0, Side::Term));
    }

    #[test]
    fn test_previous_at_start_is_noop() {
        let mut set = spanish();
        let mut session = StudySession::new(&mut set, StudyMode::All).unwrap();
        session.handle(Command::Flip);
        assert_eq!(
            session.handle(Command::Previous),
            showing(0, Side::Definition)
        );
    }

    #[test]
    fn test_next_past_last_completes() {
        let mut set = spanish();
        let mut session = StudySession::new(&mut set, StudyMode::All).unwrap();
        assert_eq!(session.handle(Command::Next), showing(1, Side::Term));
        assert_eq!(session.handle(Command::Next), SessionState::Complete);
        assert!(session.current_card().is_none());
    }

    #[test]
    fn test_finished_session_ignores_keys() {
        let mut set = spanish();
        let mut session = StudySession::new(&mut set, StudyMode::All).unwrap();
        session.handle(Command::Quit);
        assert_eq!(session.handle(Command::Next), SessionState::Exited);
        assert_eq!(session.handle(Command::ToggleStar), SessionState::Exited);
        drop(session);
        assert_eq!(set.starred_count(), 0);
    }

    #[test]
    fn test_star_then_back_scenario() {
        let mut set = spanish();
        {
            let mut session = StudySession::new(&mut set, StudyMode::All).unwrap();

            session.handle(Command::Next);
            assert_eq!(session.current_card().unwrap().term, "dog");

            session.handle(Command::ToggleStar);
            assert!(session.current_card().unwrap().starred);

            assert_eq!(session.handle(Command::Previous), showing(0, Side::Term));
            assert_eq!(session.current_card().unwrap().term, "cat");
        }

        let starred: Vec<(&str, &str)> = set
            .starred_cards()
            .iter()
            .map(|c| (c.term.as_str(), c.definition.as_str()))
            .collect();
        assert_eq!(starred, vec![("dog", "perro")]);
    }

    #[test]
    fn test_star_keeps_side() {
        let mut set = spanish();
        let mut session = StudySession::new(&mut set, StudyMode::All).unwrap();
        session.handle(Command::Flip);
        assert_eq!(
            session.handle(Command::ToggleStar),
            showing(0, Side::Definition)
        );
    }

    #[test]
    fn test_reverse_swaps_whole_set() {
        let mut set = spanish();
        {
            let mut session = StudySession::new(&mut set, StudyMode::All).unwrap();
            session.handle(Command::Flip);
            assert_eq!(session.handle(Command::Reverse), showing(0, Side::Term));
            assert_eq!(session.current_card().unwrap().term, "gato");
        }
        assert_eq!(set.card(1).unwrap().term, "perro");
    }

    #[test]
    fn test_navigation_keeps_mutations() {
        let mut set = spanish();
        let mut session = StudySession::new(&mut set, StudyMode::All).unwrap();

        session.handle(Command::ToggleStar);
        session.handle(Command::Next);
        session.handle(Command::Previous);

        let card = session.current_card().unwrap();
        assert_eq!(card.term, "cat");
        assert!(card.starred);
    }

    #[test]
    fn test_visited_records_first_forward_visits() {
        let mut set = CardSet::new(
            "nums",
            (0..4).map(|i| Card::new(i.to_string(), "n")).collect(),
        );
        let mut session = StudySession::new(&mut set, StudyMode::All).unwrap();

        session.handle(Command::Next);
        session.handle(Command::Next);
        session.handle(Command::Previous);
        session.handle(Command::Next);
        session.handle(Command::Next);

        assert_eq!(session.visited(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_set_is_reported() {
        let mut set = CardSet::new("empty", vec![]);
        let err = StudySession::new(&mut set, StudyMode::All).unwrap_err();
        assert!(matches!(err, RemembrallError::EmptyStudySet { .. }));
    }

    #[test]
    fn test_starred_mode_without_stars_is_reported() {
        let mut set = spanish();
        let err = StudySession::new(&mut set, StudyMode::Starred).unwrap_err();
        assert!(matches!(err, RemembrallError::EmptyStudySet { .. }));
        assert!(err.to_string().contains("starred"));
    }

    #[test]
    fn test_starred_mode_walks_starred_cards() {
        let mut set = CardSet::new(
            "mixed",
            vec![
                Card::new("a", "1"),
                Card::new("b", "2").starred(),
                Card::new("c", "3"),
                Card::new("d", "4").starred(),
            ],
        );
        let mut session = StudySession::new(&mut set, StudyMode::Starred).unwrap();
        assert_eq!(session.len(), 2);
        assert_eq!(session.current_card().unwrap().term, "b");

        session.handle(Command::Next);
        assert_eq!(session.current_card().unwrap().term, "d");
        assert_eq!(session.handle(Command::Next), SessionState::Complete);
    }

    #[test]
    fn test_unstar_in_starred_mode_keeps_sequence() {
        let mut set = CardSet::new(
            "mixed",
            vec![Card::new("a", "1").starred(), Card::new("b", "2").starred()],
        );
        {
            let mut session = StudySession::new(&mut set, StudyMode::Starred).unwrap();
            session.handle(Command::ToggleStar);

            let card = session.current_card().unwrap();
            assert_eq!(card.term, "a");
            assert!(!card.starred);
            assert_eq!(session.len(), 2);
        }
        assert_eq!(set.starred_count(), 1);
    }

    #[test]
    fn test_completion_choices() {
        assert_eq!(
            CompletionChoice::StudyAgain.next_step(StudyMode::Starred),
            NextStep::Restart {
                mode: StudyMode::Starred,
                reshuffle: false
            }
        );
        assert_eq!(
            CompletionChoice::Reshuffle.next_step(StudyMode::Starred),
            NextStep::Restart {
                mode: StudyMode::All,
                reshuffle: true
            }
        );
        assert_eq!(
            CompletionChoice::StudyStarred.next_step(StudyMode::All),
            NextStep::Restart {
                mode: StudyMode::Starred,
                reshuffle: false
            }
        );
        assert_eq!(
            CompletionChoice::EditSet.next_step(StudyMode::All),
            NextStep::Edit
        );
        assert_eq!(
            CompletionChoice::GoBack.next_step(StudyMode::All),
            NextStep::Leave
        );
    }

    // =========================================================================
    // Property-based tests
    // =========================================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn set_of(n: usize) -> CardSet {
            CardSet::new(
                "generated",
                (0..n)
                    .map(|i| Card::new(format!("t{}", i), format!("d{}", i)))
                    .collect(),
            )
        }

        fn arb_command() -> impl Strategy<Value = Command> {
            prop_oneof![
                Just(Command::Flip),
                Just(Command::Previous),
                Just(Command::Next),
                Just(Command::ToggleStar),
                Just(Command::Reverse),
                Just(Command::Quit),
            ]
        }

        proptest! {
            // Property: N-1 presses of `l` reach the last card, one more completes
            #[test]
            fn prop_forward_walk_completes(n in 1usize..30) {
                let mut set = set_of(n);
                let mut session = StudySession::new(&mut set, StudyMode::All).unwrap();
                for _ in 0..n - 1 {
                    prop_assert!(!session.handle(Command::Next).is_finished());
                }
                prop_assert_eq!(
                    session.state(),
                    SessionState::Showing { index: n - 1, side: Side::Term }
                );
                prop_assert_eq!(session.handle(Command::Next), SessionState::Complete);
            }

            // Property: `l` then `h` returns to the same card content and star
            #[test]
            fn prop_next_then_previous_restores_card(
                n in 2usize..20,
                start in 0usize..20,
                star in any::<bool>(),
            ) {
                let start = start % (n - 1);
                let mut set = set_of(n);
                let mut session = StudySession::new(&mut set, StudyMode::All).unwrap();
                for _ in 0..start {
                    session.handle(Command::Next);
                }
                if star {
                    session.handle(Command::ToggleStar);
                }
                let before = session.current_card().cloned();

                session.handle(Command::Next);
                session.handle(Command::Previous);

                prop_assert_eq!(
                    session.state(),
                    SessionState::Showing { index: start, side: Side::Term }
                );
                prop_assert_eq!(session.current_card().cloned(), before);
            }

            // Property: the index never leaves the sequence
            #[test]
            fn prop_index_in_bounds(
                n in 1usize..10,
                commands in prop::collection::vec(arb_command(), 0..60),
            ) {
                let mut set = set_of(n);
                let mut session = StudySession::new(&mut set, StudyMode::All).unwrap();
                for command in commands {
                    if let SessionState::Showing { index, .. } = session.handle(command) {
                        prop_assert!(index < n);
                        prop_assert!(session.current_card().is_some());
                    }
                }
            }
        }
    }
}
