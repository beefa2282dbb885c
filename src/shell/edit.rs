//! Creating and editing sets from the shell.

use rand::Rng;

use crate::core::{validate_title, Card, CardSet};
use crate::error::{RemembrallError, Result};
use crate::shell::menu::{
    labels, CardAction, EditAction, CONFIRM_LABELS, GENERIC_PROMPT, SEARCH_AGAIN_LABEL,
};
use crate::shell::{Console, Shell};
use crate::storage::SetStore;
use crate::ui::render::card_preview;

/// Input that ends card entry.
pub const FINISH_ENTRY: &str = "-";

impl<C: Console, S: SetStore, R: Rng> Shell<C, S, R> {
    /// Create a set from a title and typed cards.
    ///
    /// Returns the new title, or `None` if the user cancelled at the title.
    pub fn add_set(&mut self) -> Result<Option<String>> {
        let title = loop {
            let Some(title) = self.console.input("Title of the new set")? else {
                return Ok(None);
            };
            let title = title.trim().to_string();
            let check = validate_title(&title).and_then(|()| {
                if self.collection.contains(&title) {
                    Err(RemembrallError::duplicate_title(&title))
                } else {
                    Ok(())
                }
            });
            if self.recover(check)?.is_some() {
                break title;
            }
        };

        let cards = self.read_cards()?;
        let count = cards.len();
        self.collection.insert(CardSet::new(title.clone(), cards))?;
        self.save()?;

        self.console
            .notify(&format!("Added '{}' with {} cards.", title, count))?;
        Ok(Some(title))
    }

    /// Prompt for term/definition pairs until `-` or cancel.
    fn read_cards(&mut self) -> Result<Vec<Card>> {
        let mut cards = Vec::new();

        loop {
            let prompt = format!(
                "Term for card {} ('{}' to finish)",
                cards.len() + 1,
                FINISH_ENTRY
            );
            let term = match self.console.input(&prompt)? {
                Some(term) if term.trim() != FINISH_ENTRY => term,
                _ => break,
            };
            let prompt = format!("Definition of '{}' ('{}' to finish)", term, FINISH_ENTRY);
            let definition = match self.console.input(&prompt)? {
                Some(definition) if definition.trim() != FINISH_ENTRY => definition,
                _ => break,
            };

            if term.trim().is_empty() {
                self.recover::<()>(Err(RemembrallError::invalid_input(
                    "card term cannot be empty",
                )))?;
                continue;
            }
            cards.push(Card::new(term, definition));
        }

        Ok(cards)
    }

    /// Set editor menu. Returns when the user goes back or deletes the set.
    pub fn edit_set(&mut self, title: &str) -> Result<()> {
        let mut title = title.to_string();
        let choices = labels(&EditAction::ALL, EditAction::label);

        loop {
            if !self.collection.contains(&title) {
                let err = RemembrallError::set_not_found(&title);
                self.recover::<()>(Err(err))?;
                return Ok(());
            }

            let prompt = format!("Editing '{}'. {}", title, GENERIC_PROMPT);
            let action = self
                .console
                .select(&prompt, &choices)?
                .and_then(|i| EditAction::ALL.get(i).copied());

            match action {
                Some(EditAction::AddCards) => {
                    let cards = self.read_cards()?;
                    if !cards.is_empty() {
                        let count = cards.len();
                        self.collection.require_mut(&title)?.add_cards(cards);
                        self.save()?;
                        tracing::info!(title = %title, count, "cards added");
                    }
                }
                Some(EditAction::EditCard) => self.edit_card(&title)?,
                Some(EditAction::Rename) => {
                    if let Some(new_title) = self.rename_set(&title)? {
                        title = new_title;
                    }
                }
                Some(EditAction::Delete) => {
                    if self.delete_set(&title)? {
                        return Ok(());
                    }
                }
                Some(EditAction::Back) | None => return Ok(()),
            }
        }
    }

    /// Returns the new title if the set was renamed.
    fn rename_set(&mut self, title: &str) -> Result<Option<String>> {
        let Some(new_title) = self.console.input(&format!("New title for '{}'", title))? else {
            return Ok(None);
        };
        let new_title = new_title.trim().to_string();

        let renamed = self.collection.rename(title, &new_title);
        if self.recover(renamed)?.is_none() {
            return Ok(None);
        }
        self.save()?;
        Ok(Some(new_title))
    }

    /// Returns true if the set was deleted.
    fn delete_set(&mut self, title: &str) -> Result<bool> {
        let cards = self.collection.get(title).map_or(0, CardSet::len);
        let prompt = format!("Delete '{}' and its {} cards?", title, cards);
        if !self.confirm(&prompt)? {
            return Ok(false);
        }

        self.collection.remove(title)?;
        self.save()?;
        Ok(true)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let choices: Vec<String> = CONFIRM_LABELS.iter().map(|s| s.to_string()).collect();
        Ok(self.console.select(prompt, &choices)? == Some(0))
    }

    /// Search for a card by term, then edit the one picked.
    fn edit_card(&mut self, title: &str) -> Result<()> {
        let preview_chars = self.config.display.preview_chars;

        loop {
            let Some(query) = self.console.input("Search terms (leave blank to list all)")? else {
                return Ok(());
            };

            let set = self.collection.require(title)?;
            let positions = set.search_positions(&query);
            if positions.is_empty() {
                self.console
                    .notify(&format!("No cards in '{}' match '{}'.", title, query))?;
                continue;
            }

            let mut choices: Vec<String> = positions
                .iter()
                .filter_map(|&i| set.card(i))
                .map(|card| card_preview(card, preview_chars))
                .collect();
            choices.push(SEARCH_AGAIN_LABEL.to_string());

            let Some(pick) = self.console.select("Which card?", &choices)? else {
                return Ok(());
            };
            match positions.get(pick) {
                Some(&position) => return self.edit_card_at(title, position),
                None => continue,
            }
        }
    }

    /// Card menu for the card at `position`.
    fn edit_card_at(&mut self, title: &str, position: usize) -> Result<()> {
        let choices = labels(&CardAction::ALL, CardAction::label);
        let preview_chars = self.config.display.preview_chars;

        loop {
            let card = self
                .collection
                .require(title)?
                .card(position)
                .cloned()
                .ok_or_else(|| RemembrallError::card_not_found(position))?;

            let prompt = card_preview(&card, preview_chars);
            let action = self
                .console
                .select(&prompt, &choices)?
                .and_then(|i| CardAction::ALL.get(i).copied());

            match action {
                Some(CardAction::ChangeTerm) => {
                    let prompt = format!("New term (blank keeps '{}')", card.term);
                    if let Some(term) = self.replacement(&prompt)? {
                        self.update_card(title, position, |c| c.term = term)?;
                    }
                }
                Some(CardAction::ChangeDefinition) => {
                    let prompt = format!("New definition (blank keeps '{}')", card.definition);
                    if let Some(definition) = self.replacement(&prompt)? {
                        self.update_card(title, position, |c| c.definition = definition)?;
                    }
                }
                Some(CardAction::ToggleStar) => {
                    self.update_card(title, position, |c| {
                        c.toggle_star();
                    })?;
                }
                Some(CardAction::Delete) => {
                    let prompt = format!("Delete the card '{}'?", card.term);
                    if self.confirm(&prompt)? {
                        self.collection.require_mut(title)?.remove_card(position);
                        self.save()?;
                        tracing::info!(title, position, "card deleted");
                        return Ok(());
                    }
                }
                Some(CardAction::Back) | None => return Ok(()),
            }
        }
    }

    /// Read a replacement value. Blank or cancelled input keeps the old one.
    fn replacement(&mut self, prompt: &str) -> Result<Option<String>> {
        Ok(self
            .console
            .input(prompt)?
            .filter(|value| !value.trim().is_empty()))
    }

    fn update_card(
        &mut self,
        title: &str,
        position: usize,
        change: impl FnOnce(&mut Card),
    ) -> Result<()> {
        let card = self
            .collection
            .require_mut(title)?
            .card_mut(position)
            .ok_or_else(|| RemembrallError::card_not_found(position))?;
        change(card);
        self.save()?;
        tracing::debug!(title, position, "card updated");
        Ok(())
    }
}
