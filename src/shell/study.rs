//! Driving study sessions from the shell.
//!
//! Each pass opens a fresh [`StudySession`] over the chosen set, feeds it
//! keys until it finishes, drops it, and saves. The completion menu then
//! decides whether another pass starts.

use rand::Rng;

use crate::core::{Command, NextStep, SessionState, StudyMode, StudySession};
use crate::error::{RemembrallError, Result};
use crate::shell::menu::{completion_label, labels, COMPLETION_CHOICES, FINISHED_PROMPT};
use crate::shell::{Console, Shell};
use crate::storage::SetStore;
use crate::ui::render::study_frame;

/// Where the shell goes after studying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyOutcome {
    /// Back to the main menu.
    Menu,
    /// Into the set editor.
    Edit,
}

impl<C: Console, S: SetStore, R: Rng> Shell<C, S, R> {
    /// Study `title` until the user leaves.
    ///
    /// The collection is saved after every pass, whether it completed, was
    /// quit, or failed part way.
    pub fn study(&mut self, title: &str, mode: StudyMode) -> Result<StudyOutcome> {
        let mut mode = mode;
        let mut reshuffle = self.config.study.shuffle_on_start;

        loop {
            let pass = self.study_pass(title, mode, reshuffle);
            self.save()?;
            let Some(finished) = self.recover(pass)? else {
                return Ok(StudyOutcome::Menu);
            };

            if finished == SessionState::Exited {
                return Ok(StudyOutcome::Menu);
            }

            match self.completion_step(title, mode)? {
                NextStep::Restart {
                    mode: next_mode,
                    reshuffle: next_reshuffle,
                } => {
                    mode = next_mode;
                    reshuffle = next_reshuffle;
                }
                NextStep::Edit => return Ok(StudyOutcome::Edit),
                NextStep::Leave => return Ok(StudyOutcome::Menu),
            }
        }
    }

    /// Run one session to `Complete` or `Exited`.
    fn study_pass(
        &mut self,
        title: &str,
        mode: StudyMode,
        reshuffle: bool,
    ) -> Result<SessionState> {
        let layout = self.layout();
        let set = self.collection.require_mut(title)?;
        if reshuffle {
            set.shuffle(&mut self.rng);
        }

        let mut session = StudySession::new(set, mode)?;
        loop {
            self.console.show(&study_frame(&session, &layout))?;

            let key = self.console.read_key()?;
            let Some(command) = Command::from_key(key) else {
                continue;
            };
            let state = session.handle(command);
            if state.is_finished() {
                return Ok(state);
            }
        }
    }

    /// Ask how to continue after a completed pass.
    ///
    /// Choices that would open an empty session are reported and asked again.
    fn completion_step(&mut self, title: &str, finished_mode: StudyMode) -> Result<NextStep> {
        let choices = labels(&COMPLETION_CHOICES, completion_label);

        loop {
            let Some(choice) = self
                .console
                .select(FINISHED_PROMPT, &choices)?
                .and_then(|i| COMPLETION_CHOICES.get(i).copied())
            else {
                return Ok(NextStep::Leave);
            };

            let step = choice.next_step(finished_mode);
            if let NextStep::Restart {
                mode: StudyMode::Starred,
                ..
            } = step
            {
                let starred = self
                    .collection
                    .get(title)
                    .map_or(0, |set| set.starred_count());
                if starred == 0 {
                    let err =
                        RemembrallError::empty_study_set(title, StudyMode::Starred.to_string());
                    self.console.notify(&err.to_string())?;
                    continue;
                }
            }
            return Ok(step);
        }
    }
}
