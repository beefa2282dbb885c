//! Menu choices offered by the shell.
//!
//! Each menu is an enum with a fixed order; `ALL[i]` is the action for the
//! `i`th label shown.

use crate::core::{CompletionChoice, StudyMode};

/// Top-level outcome of the menus: what the user wants to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Create a new set.
    AddSet,
    /// Study a set.
    StudySet { title: String, mode: StudyMode },
    /// Edit a set.
    EditSet(String),
    /// Leave the program.
    Exit,
}

/// Main menu prompt.
pub const MAIN_PROMPT: &str = "Please select a set or make a new one.";

/// Prompt shared by the secondary menus.
pub const GENERIC_PROMPT: &str = "How would you like to proceed?";

/// Prompt shown after the last card.
pub const FINISHED_PROMPT: &str = "How would you like to continue studying?";

/// Extra main menu entries after the set titles.
pub const ADD_SET_LABEL: &str = "Add a Set";
pub const EXIT_LABEL: &str = "Exit";

/// Label for repeating a card search.
pub const SEARCH_AGAIN_LABEL: &str = "Search Again";

/// Confirmation choices, affirmative first.
pub const CONFIRM_LABELS: [&str; 2] = ["Yes, delete it", "No, keep it"];

/// Actions on a chosen set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetAction {
    StudyShuffled,
    StudyStarred,
    Edit,
    Back,
}

impl SetAction {
    pub const ALL: [SetAction; 4] = [
        SetAction::StudyShuffled,
        SetAction::StudyStarred,
        SetAction::Edit,
        SetAction::Back,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SetAction::StudyShuffled => "Study this Shuffled Set",
            SetAction::StudyStarred => "Study the Starred Cards",
            SetAction::Edit => "Edit this Set",
            SetAction::Back => "Go Back",
        }
    }
}

/// Actions in the set editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    AddCards,
    EditCard,
    Rename,
    Delete,
    Back,
}

impl EditAction {
    pub const ALL: [EditAction; 5] = [
        EditAction::AddCards,
        EditAction::EditCard,
        EditAction::Rename,
        EditAction::Delete,
        EditAction::Back,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditAction::AddCards => "Add Cards",
            EditAction::EditCard => "Edit a Card",
            EditAction::Rename => "Rename Set",
            EditAction::Delete => "Delete Set",
            EditAction::Back => "Go Back",
        }
    }
}

/// Actions on a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    ChangeTerm,
    ChangeDefinition,
    ToggleStar,
    Delete,
    Back,
}

impl CardAction {
    pub const ALL: [CardAction; 5] = [
        CardAction::ChangeTerm,
        CardAction::ChangeDefinition,
        CardAction::ToggleStar,
        CardAction::Delete,
        CardAction::Back,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CardAction::ChangeTerm => "Change Term",
            CardAction::ChangeDefinition => "Change Definition",
            CardAction::ToggleStar => "Toggle Star",
            CardAction::Delete => "Delete Card",
            CardAction::Back => "Go Back",
        }
    }
}

/// Choices after a completed session, in display order.
pub const COMPLETION_CHOICES: [CompletionChoice; 5] = [
    CompletionChoice::StudyAgain,
    CompletionChoice::Reshuffle,
    CompletionChoice::StudyStarred,
    CompletionChoice::EditSet,
    CompletionChoice::GoBack,
];

pub fn completion_label(choice: CompletionChoice) -> &'static str {
    match choice {
        CompletionChoice::StudyAgain => "Study the Set Again",
        CompletionChoice::Reshuffle => "Study the Set Reshuffled",
        CompletionChoice::StudyStarred => "Study the Starred Cards",
        CompletionChoice::EditSet => "Edit this Set",
        CompletionChoice::GoBack => "Go Back",
    }
}

/// Owned labels for a list of actions.
pub fn labels<T: Copy>(items: &[T], label: impl Fn(T) -> &'static str) -> Vec<String> {
    items.iter().map(|item| label(*item).to_string()).collect()
}
