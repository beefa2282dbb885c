//! Screen content for the interactive shell.
//!
//! Everything here is pure: functions build a [`Frame`] of styled lines and
//! the console decides how to put it on screen. Terminal dimensions come in
//! through [`Layout`], never from process-wide state.

pub mod intro;
pub mod layout;
pub mod render;

pub use layout::Layout;

/// Emphasis for a line of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Plain,
    /// Bold text.
    Strong,
    /// Highlight color (banner, box border).
    Accent,
    /// Dim text (instructions, hints).
    Muted,
    /// Star marker.
    Star,
}

/// One line of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub tone: Tone,
}

impl Line {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Plain)
    }
}

/// A full screen of lines, drawn top to bottom after clearing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<Line>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line.
    pub fn push(&mut self, text: impl Into<String>, tone: Tone) {
        self.lines.push(Line::new(text, tone));
    }

    /// Append an empty line.
    pub fn blank(&mut self) {
        self.lines.push(Line::plain(""));
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = Line>) {
        self.lines.extend(lines);
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Unstyled text, one line per row.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.text.contains(needle))
    }
}
