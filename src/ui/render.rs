//! Study frames, card boxes, and card previews.

use crate::core::{Card, SessionState, Side, StudySession};
use crate::ui::layout::center_in;
use crate::ui::{Frame, Layout, Line, Tone};
use crate::util::truncate_chars;

/// Key help shown under the card.
pub const INSTRUCTIONS: [&str; 5] = [
    "space: show the definition/term",
    "h and l: go back and forth",
    "s: star a missed card for later",
    "r: swap terms and definitions",
    "q: stop studying and go back",
];

/// Greedy word wrap to `width` characters. Words longer than a line are split.
///
/// Always returns at least one line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// A bordered box holding `text`, wrapped and centered, as full-width lines.
///
/// The box is at least `layout.card_height` rows tall and grows to fit.
pub fn card_box(text: &str, layout: &Layout, tone: Tone) -> Vec<Line> {
    let inner = layout.card_width;
    let wrapped = wrap(text, inner);
    let rows = layout.card_height.max(wrapped.len());
    let top_pad = (rows - wrapped.len()) / 2;

    let mut out = Vec::with_capacity(rows + 2);
    out.push(Line::new(
        layout.center(&format!("┌{}┐", "─".repeat(inner))),
        Tone::Accent,
    ));

    for row in 0..rows {
        let content = row
            .checked_sub(top_pad)
            .and_then(|i| wrapped.get(i))
            .map(String::as_str)
            .unwrap_or("");
        let len = content.chars().count();
        let left = (inner - len) / 2;
        let right = inner - len - left;
        let body = format!("│{}{}{}│", " ".repeat(left), content, " ".repeat(right));
        let tone = if content.is_empty() { Tone::Accent } else { tone };
        out.push(Line::new(layout.center(&body), tone));
    }

    out.push(Line::new(
        layout.center(&format!("└{}┘", "─".repeat(inner))),
        Tone::Accent,
    ));
    out
}

/// The screen for the current state of a study session.
///
/// Finished sessions render only the header.
pub fn study_frame(session: &StudySession<'_>, layout: &Layout) -> Frame {
    let mut frame = Frame::new();
    let total = session.len();
    let title = session.set().title();

    let (index, side) = match session.state() {
        SessionState::Showing { index, side } => (index, side),
        SessionState::Complete | SessionState::Exited => {
            frame.push(layout.center(title), Tone::Strong);
            return frame;
        }
    };

    frame.push(
        layout.center(&format!("{} · Card {}/{}", title, index + 1, total)),
        Tone::Strong,
    );
    frame.push(
        layout.center(&format!(
            "{} · seen {}/{}",
            session.mode(),
            session.visited().len(),
            total
        )),
        Tone::Muted,
    );
    frame.blank();

    if let Some(card) = session.current_card() {
        let (text, tone) = match side {
            Side::Term => (card.term.as_str(), Tone::Strong),
            Side::Definition => (card.definition.as_str(), Tone::Plain),
        };
        frame.extend(card_box(text, layout, tone));

        if card.starred {
            frame.push(layout.center("★ starred"), Tone::Star);
        } else {
            frame.blank();
        }
    }

    frame.blank();
    for line in INSTRUCTIONS {
        frame.push(layout.center(line), Tone::Muted);
    }
    frame
}

/// One-line summary of a card for menus.
pub fn card_preview(card: &Card, max_chars: usize) -> String {
    let marker = if card.starred { "★" } else { " " };
    format!(
        "{} {} | {}",
        marker,
        truncate_chars(&card.term, max_chars),
        truncate_chars(&card.definition, max_chars)
    )
}

/// Wrap a message to the card width and center it, with a blank line above.
pub fn message_frame(message: &str, layout: &Layout) -> Frame {
    let mut frame = Frame::new();
    frame.blank();
    for line in wrap(message, layout.card_width) {
        frame.push(center_in(&line, layout.width), Tone::Strong);
    }
    frame
}
