//! Remembrall - terminal flashcards
//!
//! Remembrall keeps named sets of term/definition cards in a single JSON
//! store and runs keyboard-driven study sessions over them, with starred
//! cards available for focused review.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod import;
pub mod shell;
pub mod storage;
pub mod ui;
pub mod util;

pub use config::Config;
pub use core::{
    Card, CardSet, Collection, Command, CompletionChoice, NextStep, SessionState, Side,
    StudyMode, StudySession,
};
pub use error::{RemembrallError, Result};
pub use import::{import_file, parse_tab_separated};
pub use shell::{Console, MenuAction, ScriptedConsole, Shell, TerminalConsole};
pub use storage::{FileSetStore, MemorySetStore, SetStore};

// CLI commands
pub use cli::{ConvertCommand, DeleteCommand, InitCommand, ListCommand, SearchCommand};
