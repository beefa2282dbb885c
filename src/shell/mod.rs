//! Interactive menu shell.
//!
//! The shell owns the in-memory [`Collection`] for the whole run. It hands a
//! single set to a study session or an editor at a time, and saves the whole
//! collection after every mutating action.

pub mod console;
mod edit;
pub mod menu;
mod study;

use rand::Rng;

use crate::config::Config;
use crate::core::{Collection, StudyMode};
use crate::error::Result;
use crate::storage::SetStore;
use crate::ui::{intro, Layout};

pub use console::{restore_terminal, Console, ScriptedConsole, TerminalConsole};
pub use menu::MenuAction;
pub use study::StudyOutcome;

use menu::{labels, SetAction, ADD_SET_LABEL, EXIT_LABEL, GENERIC_PROMPT, MAIN_PROMPT};

/// Menu-driven front end over a set store.
pub struct Shell<C, S, R> {
    console: C,
    store: S,
    config: Config,
    collection: Collection,
    rng: R,
}

impl<C: Console, S: SetStore, R: Rng> Shell<C, S, R> {
    /// Load the collection and build a shell.
    ///
    /// Fails with `NotInitialized` or `Corrupt` from the store; nothing is
    /// shown in that case.
    pub fn new(console: C, store: S, config: Config, rng: R) -> Result<Self> {
        let collection = store.load()?;
        tracing::debug!(sets = collection.len(), "shell started");
        Ok(Self {
            console,
            store,
            config,
            collection,
            rng,
        })
    }

    /// The in-memory collection.
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Play the intro banner if enabled.
    pub fn intro(&mut self) -> Result<()> {
        if !self.config.intro.enabled {
            return Ok(());
        }
        let layout = self.layout();
        let delay = std::time::Duration::from_millis(self.config.intro.frame_delay_ms);
        for frame in intro::frames(&layout) {
            self.console.show(&frame)?;
            self.console.pause(delay);
        }
        Ok(())
    }

    /// Run the main menu until the user exits.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.select_action()? {
                MenuAction::AddSet => {
                    self.add_set()?;
                }
                MenuAction::StudySet { title, mode } => self.study_set(&title, mode)?,
                MenuAction::EditSet(title) => self.edit_set(&title)?,
                MenuAction::Exit => break,
            }
        }
        tracing::debug!("shell exited");
        Ok(())
    }

    /// Ask the user what to do next.
    ///
    /// Going back from a set's menu returns to the main menu; cancelling the
    /// main menu exits.
    pub fn select_action(&mut self) -> Result<MenuAction> {
        loop {
            let titles: Vec<String> = self
                .collection
                .titles()
                .into_iter()
                .map(str::to_string)
                .collect();
            let mut choices = titles.clone();
            choices.push(ADD_SET_LABEL.to_string());
            choices.push(EXIT_LABEL.to_string());

            let Some(pick) = self.console.select(MAIN_PROMPT, &choices)? else {
                return Ok(MenuAction::Exit);
            };
            if pick == titles.len() {
                return Ok(MenuAction::AddSet);
            }
            let Some(title) = titles.get(pick).cloned() else {
                return Ok(MenuAction::Exit);
            };

            let set_choices = labels(&SetAction::ALL, SetAction::label);
            let action = self
                .console
                .select(GENERIC_PROMPT, &set_choices)?
                .and_then(|i| SetAction::ALL.get(i).copied());
            match action {
                Some(SetAction::StudyShuffled) => {
                    return Ok(MenuAction::StudySet {
                        title,
                        mode: StudyMode::All,
                    })
                }
                Some(SetAction::StudyStarred) => {
                    return Ok(MenuAction::StudySet {
                        title,
                        mode: StudyMode::Starred,
                    })
                }
                Some(SetAction::Edit) => return Ok(MenuAction::EditSet(title)),
                Some(SetAction::Back) | None => continue,
            }
        }
    }

    /// Study a set, moving on to its editor if the user picks that at the end.
    pub fn study_set(&mut self, title: &str, mode: StudyMode) -> Result<()> {
        if self.study(title, mode)? == StudyOutcome::Edit {
            self.edit_set(title)?;
        }
        Ok(())
    }

    /// Persist the whole collection.
    fn save(&self) -> Result<()> {
        self.store.save(&self.collection)
    }

    fn layout(&self) -> Layout {
        Layout::new(self.console.size(), &self.config.display)
    }

    /// Report a recoverable error to the user and carry on.
    ///
    /// Fatal errors are passed through.
    fn recover<T>(&mut self, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                tracing::debug!(error = %err, "recoverable error");
                self.console.notify(&err.to_string())?;
                Ok(None)
            }
        }
    }
}
