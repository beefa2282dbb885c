//! Input and output devices for the menu shell.
//!
//! The shell only talks to a [`Console`]. [`TerminalConsole`] drives a real
//! terminal with crossterm; [`ScriptedConsole`] replays canned input so the
//! shell can be tested end to end.

use std::collections::VecDeque;
use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, Stylize};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use crate::config::DisplayConfig;
use crate::error::{RemembrallError, Result};
use crate::ui::render::message_frame;
use crate::ui::{Frame, Layout, Line, Tone};

/// Key reported when the user cancels during study.
pub const QUIT_KEY: char = 'q';

/// Interactive input/output used by the shell.
pub trait Console {
    /// Terminal size as `(columns, rows)`.
    fn size(&self) -> (u16, u16);

    /// Replace the screen with a frame.
    fn show(&mut self, frame: &Frame) -> Result<()>;

    /// Tell the user something and wait for acknowledgement.
    fn notify(&mut self, message: &str) -> Result<()>;

    /// Block for one keypress. Cancel keys map to [`QUIT_KEY`].
    fn read_key(&mut self) -> Result<char>;

    /// Pick one of `choices`. `None` means cancelled.
    fn select(&mut self, prompt: &str, choices: &[String]) -> Result<Option<usize>>;

    /// Read a line of text. `None` means cancelled.
    fn input(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Wait between animation frames.
    fn pause(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

fn terminal_error(err: io::Error) -> RemembrallError {
    RemembrallError::terminal(err.to_string())
}

/// Put the terminal back into cooked mode on the main screen.
///
/// Safe to call when the terminal was never switched; used by the panic hook.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Raw-mode, alternate-screen terminal. Restored on drop.
pub struct TerminalConsole {
    out: Stdout,
    display: DisplayConfig,
}

impl TerminalConsole {
    /// Switch the terminal into raw mode on the alternate screen.
    ///
    /// `display` sizes the notices this console draws itself.
    pub fn new(display: DisplayConfig) -> Result<Self> {
        enable_raw_mode().map_err(terminal_error)?;
        let mut out = io::stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen, Hide) {
            restore_terminal();
            return Err(terminal_error(err));
        }
        Ok(Self { out, display })
    }

    fn layout(&self) -> Layout {
        Layout::new(self.size(), &self.display)
    }

    fn draw(&mut self, lines: &[Line]) -> Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0)).map_err(terminal_error)?;
        for line in lines {
            let text = line.text.as_str();
            let result = match line.tone {
                Tone::Plain => queue!(self.out, Print(text)),
                Tone::Strong => queue!(self.out, Print(text.bold())),
                Tone::Accent => queue!(self.out, Print(text.cyan().bold())),
                Tone::Muted => queue!(self.out, Print(text.dark_grey())),
                Tone::Star => queue!(self.out, Print(text.yellow().bold())),
            };
            result.map_err(terminal_error)?;
            queue!(self.out, Print("\r\n")).map_err(terminal_error)?;
        }
        self.out.flush().map_err(terminal_error)
    }

    /// Next key press, skipping releases, repeats and non-key events.
    fn next_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read().map_err(terminal_error)? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }
}

fn is_cancel(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

impl Drop for TerminalConsole {
    fn drop(&mut self) {
        restore_terminal();
    }
}

impl Console for TerminalConsole {
    fn size(&self) -> (u16, u16) {
        terminal::size().unwrap_or((80, 24))
    }

    fn show(&mut self, frame: &Frame) -> Result<()> {
        self.draw(frame.lines())
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        let layout = self.layout();
        let mut frame = message_frame(message, &layout);
        frame.blank();
        frame.push(layout.center("press any key to continue"), Tone::Muted);
        self.draw(frame.lines())?;
        self.next_key()?;
        Ok(())
    }

    fn read_key(&mut self) -> Result<char> {
        loop {
            let key = self.next_key()?;
            if is_cancel(&key) {
                return Ok(QUIT_KEY);
            }
            match key.code {
                KeyCode::Char(c) => return Ok(c),
                KeyCode::Left => return Ok('h'),
                KeyCode::Right => return Ok('l'),
                _ => {}
            }
        }
    }

    fn select(&mut self, prompt: &str, choices: &[String]) -> Result<Option<usize>> {
        if choices.is_empty() {
            return Ok(None);
        }
        let mut selected = 0;

        loop {
            let mut lines = vec![Line::new(prompt, Tone::Strong), Line::plain("")];
            for (i, choice) in choices.iter().enumerate() {
                if i == selected {
                    lines.push(Line::new(format!("> {}", choice), Tone::Accent));
                } else {
                    lines.push(Line::plain(format!("  {}", choice)));
                }
            }
            lines.push(Line::plain(""));
            lines.push(Line::new("j/k to move, enter to pick, esc to go back", Tone::Muted));
            self.draw(&lines)?;

            let key = self.next_key()?;
            if is_cancel(&key) {
                return Ok(None);
            }
            match key.code {
                KeyCode::Char('j') | KeyCode::Down => selected = (selected + 1) % choices.len(),
                KeyCode::Char('k') | KeyCode::Up => {
                    selected = selected.checked_sub(1).unwrap_or(choices.len() - 1)
                }
                KeyCode::Enter => return Ok(Some(selected)),
                _ => {}
            }
        }
    }

    fn input(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut buffer = String::new();

        loop {
            let lines = [
                Line::new(prompt, Tone::Strong),
                Line::plain(""),
                Line::plain(format!("> {}_", buffer)),
                Line::plain(""),
                Line::new("enter to confirm, esc to go back", Tone::Muted),
            ];
            self.draw(&lines)?;

            let key = self.next_key()?;
            if is_cancel(&key) {
                return Ok(None);
            }
            match key.code {
                KeyCode::Enter => return Ok(Some(buffer)),
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Tab => buffer.push('\t'),
                KeyCode::Char(c) => buffer.push(c),
                _ => {}
            }
        }
    }
}

/// A console fed from queues, recording everything shown.
///
/// Exhausted queues behave like a user who cancels: keys become `q`,
/// selections and inputs become `None`.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    keys: VecDeque<char>,
    selections: VecDeque<Option<usize>>,
    inputs: VecDeque<Option<String>>,
    /// Frames passed to `show`, in order.
    pub frames: Vec<Frame>,
    /// Messages passed to `notify`, in order.
    pub notices: Vec<String>,
    /// Prompts and their choices passed to `select`, in order.
    pub prompts: Vec<(String, Vec<String>)>,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue keypresses, one per character.
    pub fn keys(mut self, keys: &str) -> Self {
        self.keys.extend(keys.chars());
        self
    }

    /// Queue a menu pick.
    pub fn pick(mut self, index: usize) -> Self {
        self.selections.push_back(Some(index));
        self
    }

    /// Queue a cancelled menu.
    pub fn cancel_select(mut self) -> Self {
        self.selections.push_back(None);
        self
    }

    /// Queue a line of text.
    pub fn type_line(mut self, text: &str) -> Self {
        self.inputs.push_back(Some(text.to_string()));
        self
    }

    /// Queue a cancelled text prompt.
    pub fn cancel_input(mut self) -> Self {
        self.inputs.push_back(None);
        self
    }

    /// Check if every queued input was consumed.
    pub fn is_drained(&self) -> bool {
        self.keys.is_empty() && self.selections.is_empty() && self.inputs.is_empty()
    }
}

impl Console for ScriptedConsole {
    fn size(&self) -> (u16, u16) {
        (80, 24)
    }

    fn show(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        self.notices.push(message.to_string());
        Ok(())
    }

    fn read_key(&mut self) -> Result<char> {
        Ok(self.keys.pop_front().unwrap_or(QUIT_KEY))
    }

    fn select(&mut self, prompt: &str, choices: &[String]) -> Result<Option<usize>> {
        self.prompts.push((prompt.to_string(), choices.to_vec()));
        let pick = self.selections.pop_front().flatten();
        Ok(pick.filter(|i| *i < choices.len()))
    }

    fn input(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.inputs.pop_front().flatten())
    }

    fn pause(&mut self, _delay: Duration) {}
}
