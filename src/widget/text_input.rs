//! Text Input Widget: Single-line text input with a blinking caret.
//!
//! The value is a flat sequence of `char`s and the caret is an index into
//! it, always within `0..=len`. Editing follows the readline-style keys:
//!
//! | Key | Action |
//! |-----|--------|
//! | printable char | insert at caret |
//! | `Backspace`, `Delete` | remove the char before the caret |
//! | `←` / `→` | move caret |
//! | `Ctrl+A`, `Home` | caret to start |
//! | `Ctrl+E`, `End` | caret to end |
//! | `Ctrl+D` | remove the char under the caret |
//! | `Ctrl+K` | remove everything from the caret onwards |
//!
//! Blinking is driven from outside. [`TextInput::blink_command`] asks the
//! host for an [`Event::Blink`] after the blink interval, and every blink
//! event the widget handles re-arms the same command.

use std::time::Duration;

use super::traits::Component;
use crate::actor::{Command, Event, KeyCode, KeyModifiers};
use crate::clamp::clamp;
use crate::style::{Rgb, Style};

/// Default time between caret blinks.
pub const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(600);

/// Styles for the parts of a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextInputStyle {
    /// Style applied to the prompt.
    pub prompt: Style,
    /// Style applied to the value.
    pub text: Style,
    /// Style applied to the placeholder.
    pub placeholder: Style,
    /// Style of the caret while it is shown.
    pub caret: Style,
}

impl Default for TextInputStyle {
    fn default() -> Self {
        Self {
            prompt: Style::new(),
            text: Style::new(),
            placeholder: Style::new().fg(Rgb::new(100, 100, 100)),
            caret: Style::reversed(),
        }
    }
}

/// A single-line text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    /// Prefix rendered before the value (e.g., "> ").
    prompt: String,
    /// Text shown while the value is empty.
    placeholder: String,
    /// Current content.
    value: Vec<char>,
    /// Insertion index into `value`.
    caret: usize,
    /// Blink phase; the caret is drawn plain while this is set.
    blink: bool,
    /// Delay between blink events.
    blink_interval: Duration,
    /// Whether key events are handled.
    focused: bool,
    /// Styles.
    style: TextInputStyle,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput {
    /// Create an empty, focused input with the default prompt `"> "`.
    pub fn new() -> Self {
        Self {
            prompt: String::from("> "),
            placeholder: String::new(),
            value: Vec::new(),
            caret: 0,
            blink: false,
            blink_interval: DEFAULT_BLINK_INTERVAL,
            focused: true,
            style: TextInputStyle::default(),
        }
    }

    /// Set the prompt prefix.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the placeholder shown while the value is empty.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the styles.
    #[must_use]
    pub const fn with_style(mut self, style: TextInputStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the blink interval.
    #[must_use]
    pub const fn with_blink_interval(mut self, interval: Duration) -> Self {
        self.blink_interval = interval;
        self
    }

    /// Get the current value.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Number of chars in the value.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Check if the value is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Current caret index.
    pub const fn caret(&self) -> usize {
        self.caret
    }

    /// Replace the value, moving the caret to the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.caret = self.value.len();
    }

    /// Move the caret, clamped to `0..=len`.
    pub fn set_caret(&mut self, caret: usize) {
        self.caret = clamp(caret, 0, self.value.len());
    }

    /// Clear the value.
    pub fn reset(&mut self) {
        self.value.clear();
        self.caret = 0;
    }

    /// Get the prompt.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the prompt.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Replace the styles.
    pub const fn set_style(&mut self, style: TextInputStyle) {
        self.style = style;
    }

    /// Give the input focus so it handles keys and shows its caret.
    pub const fn focus(&mut self) {
        self.focused = true;
    }

    /// Remove focus; keys are ignored and the caret is hidden.
    pub const fn blur(&mut self) {
        self.focused = false;
    }

    /// Check if focused.
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Current blink phase.
    pub const fn blink(&self) -> bool {
        self.blink
    }

    /// Ask the host for the next blink event.
    ///
    /// Issue this once to start blinking; afterwards every handled
    /// [`Event::Blink`] returns it again.
    pub fn blink_command(&self) -> Command {
        Command::Schedule {
            delay: self.blink_interval,
            event: Event::Blink,
        }
    }

    fn insert_char(&mut self, c: char) {
        self.value.insert(self.caret, c);
        self.caret += 1;
    }

    /// Remove the char before the caret. Nothing to remove at the start.
    fn backspace(&mut self) {
        if !self.value.is_empty() && self.caret > 0 {
            self.value.remove(self.caret - 1);
            self.caret -= 1;
        }
    }

    /// Remove the char under the caret.
    fn delete_under_caret(&mut self) {
        if self.caret < self.value.len() {
            self.value.remove(self.caret);
        }
    }

    fn caret_left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    fn caret_right(&mut self) {
        if self.caret < self.value.len() {
            self.caret += 1;
        }
    }

    const fn caret_home(&mut self) {
        self.caret = 0;
    }

    fn caret_end(&mut self) {
        self.caret = self.value.len();
    }

    fn kill_to_end(&mut self) {
        self.value.truncate(self.caret);
        self.caret = self.value.len();
    }

    /// Apply a key press. Returns whether the key was recognized.
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Backspace | KeyCode::Delete => self.backspace(),
            KeyCode::Left => self.caret_left(),
            KeyCode::Right => self.caret_right(),
            KeyCode::Home => self.caret_home(),
            KeyCode::End => self.caret_end(),
            KeyCode::Char('a') if modifiers.control => self.caret_home(),
            KeyCode::Char('e') if modifiers.control => self.caret_end(),
            KeyCode::Char('d') if modifiers.control => self.delete_under_caret(),
            KeyCode::Char('k') if modifiers.control => self.kill_to_end(),
            KeyCode::Char(c) if !modifiers.is_chord() => self.insert_char(c),
            _ => return false,
        }
        true
    }

    /// Draw one caret cell. The caret is styled while the blink phase is off.
    fn caret_glyph(&self, glyph: &str) -> String {
        if self.blink {
            self.style.text.paint(glyph)
        } else {
            self.style.caret.paint(glyph)
        }
    }

    fn placeholder_view(&self) -> String {
        if !self.focused {
            return self.style.placeholder.paint(&self.placeholder);
        }
        let mut chars = self.placeholder.chars();
        let first = chars.next().map(String::from).unwrap_or_default();
        let rest: String = chars.collect();
        let mut out = self.caret_glyph(&first);
        out.push_str(&self.style.placeholder.paint(&rest));
        out
    }
}

impl Component for TextInput {
    fn update(mut self, event: &Event) -> (Self, Option<Command>) {
        match event {
            Event::Blink => {
                self.blink = !self.blink;
                let rearm = self.blink_command();
                (self, Some(rearm))
            }
            Event::Key { code, modifiers } if self.focused => {
                let handled = self.handle_key(*code, *modifiers);
                tracing::trace!(
                    target: "widget.text_input",
                    ?code,
                    handled,
                    caret = self.caret,
                    len = self.value.len(),
                    "key"
                );
                (self, None)
            }
            _ => (self, None),
        }
    }

    fn view(&self) -> String {
        let mut out = self.style.prompt.paint(&self.prompt);

        if self.value.is_empty() && !self.placeholder.is_empty() {
            out.push_str(&self.placeholder_view());
            return out;
        }

        if !self.focused {
            out.push_str(&self.style.text.paint(&self.value()));
            return out;
        }

        let before: String = self.value[..self.caret].iter().collect();
        out.push_str(&self.style.text.paint(&before));

        if let Some(&under) = self.value.get(self.caret) {
            out.push_str(&self.caret_glyph(under.encode_utf8(&mut [0; 4])));
            let after: String = self.value[self.caret + 1..].iter().collect();
            out.push_str(&self.style.text.paint(&after));
        } else {
            out.push_str(&self.caret_glyph(" "));
        }
        out
    }
}
