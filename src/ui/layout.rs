//! Card geometry resolved against the terminal size.

use crate::config::DisplayConfig;

/// Smallest usable terminal, in columns and rows.
const MIN_TERMINAL: (u16, u16) = (20, 10);

/// Narrowest card interior, in columns.
pub const MIN_CARD_WIDTH: usize = 10;

/// Sizes used by the renderers. All widths are in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Terminal columns.
    pub width: usize,
    /// Terminal rows.
    pub height: usize,
    /// Columns inside the card border.
    pub card_width: usize,
    /// Minimum rows inside the card border.
    pub card_height: usize,
}

impl Layout {
    /// Resolve the configured card size for a `(columns, rows)` terminal.
    pub fn new(size: (u16, u16), display: &DisplayConfig) -> Self {
        let width = usize::from(size.0.max(MIN_TERMINAL.0));
        let height = usize::from(size.1.max(MIN_TERMINAL.1));

        let outer = width * usize::from(display.card_width_percent) / 100;
        let card_width = outer
            .saturating_sub(2)
            .max(MIN_CARD_WIDTH)
            .min(width - 2);

        Self {
            width,
            height,
            card_width,
            card_height: usize::from(display.card_height.max(1)),
        }
    }

    /// Center `text` within the terminal width.
    pub fn center(&self, text: &str) -> String {
        center_in(text, self.width)
    }
}

/// Pad `text` with leading spaces so it sits centered in `width` columns.
///
/// Text wider than `width` is returned unchanged.
pub fn center_in(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let left = (width - len) / 2;
    format!("{}{}", " ".repeat(left), text)
}
