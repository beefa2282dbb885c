//! Core types and logic for Remembrall.
//!
//! This module contains the card data model, the collection of sets, and the
//! study session state machine.

pub mod card;
pub mod collection;
pub mod session;

pub use card::{Card, CardSet};
pub use collection::{validate_title, Collection};
pub use session::{
    Command, CompletionChoice, NextStep, SessionState, Side, StudyMode, StudySession,
};
