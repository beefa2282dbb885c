//! Startup banner, revealed one letter per frame.

use crate::ui::{Frame, Layout, Tone};

/// Banner text.
pub const BANNER: &str = "REMEMBRALL";

/// Line shown under the completed banner.
pub const TAGLINE: &str = "flashcards for the terminal";

/// Banner frames, one per revealed letter.
///
/// Unrevealed letters are kept as spaces so the banner never shifts.
pub fn frames(layout: &Layout) -> Vec<Frame> {
    let letters: Vec<char> = BANNER.chars().collect();
    let top_pad = layout.height.saturating_sub(3) / 2;

    (1..=letters.len())
        .map(|shown| {
            let mut spaced: String = letters
                .iter()
                .enumerate()
                .map(|(i, c)| if i < shown { *c } else { ' ' })
                .flat_map(|c| [c, ' '])
                .collect();
            spaced.pop();

            let mut frame = Frame::new();
            for _ in 0..top_pad {
                frame.blank();
            }
            frame.push(layout.center(&spaced), Tone::Accent);
            if shown == letters.len() {
                frame.blank();
                frame.push(layout.center(TAGLINE), Tone::Muted);
            }
            frame
        })
        .collect()
}
