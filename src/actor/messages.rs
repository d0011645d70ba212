//! Message types for actor communication.
//!
//! [`Event`] flows into widgets; [`Command`] flows back out of them to the
//! host. These two enums are the whole protocol between a widget and the
//! loop that drives it.

use std::time::Duration;

/// Key codes for keyboard input.
///
/// This is a simplified subset of crossterm's `KeyCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Function key (F1-F12).
    F(u8),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Tab key.
    Tab,
    /// Backtab (Shift+Tab).
    BackTab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Escape key.
    Esc,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Control only.
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };

    /// Check if any modifier is active.
    pub const fn any(&self) -> bool {
        self.shift || self.control || self.alt
    }

    /// Whether Ctrl or Alt is held; such chords are never printable input.
    pub const fn is_chord(&self) -> bool {
        self.control || self.alt
    }
}

/// Events delivered to widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during keypress.
        modifiers: KeyModifiers,
    },

    /// Caret blink timer fired.
    Blink,

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Focus gained.
    FocusGained,

    /// Focus lost.
    FocusLost,

    /// An actor encountered an error.
    Error(String),

    /// An actor is shutting down.
    Shutdown,
}

impl Event {
    /// A key press without modifiers.
    pub const fn key(code: KeyCode) -> Self {
        Self::Key {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// A key press with Ctrl held.
    pub const fn ctrl(c: char) -> Self {
        Self::Key {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }

    /// A printable character.
    pub const fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }
}

/// A block of lines bound for a terminal scroll region.
///
/// `top` and `bottom` are terminal rows; the region spans `top..bottom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollArea {
    /// Lines to draw.
    pub lines: Vec<String>,
    /// First row of the region.
    pub top: u16,
    /// Row just past the region.
    pub bottom: u16,
}

impl ScrollArea {
    /// Number of rows the region spans.
    pub const fn height(&self) -> u16 {
        self.bottom.saturating_sub(self.top)
    }
}

/// Effects returned by widgets for the host to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Deliver `event` back to the widgets once `delay` has elapsed.
    Schedule {
        /// How long to wait.
        delay: Duration,
        /// The event to deliver.
        event: Event,
    },

    /// Repaint the whole scroll region with the given lines.
    Sync(ScrollArea),

    /// Shift the region up and append the lines at its bottom.
    ScrollDown(ScrollArea),

    /// Shift the region down and insert the lines at its top.
    ScrollUp(ScrollArea),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_chords() {
        assert!(!KeyModifiers::NONE.any());
        assert!(KeyModifiers::CONTROL.is_chord());
        let shift = KeyModifiers {
            shift: true,
            ..KeyModifiers::NONE
        };
        assert!(shift.any());
        assert!(!shift.is_chord());
    }

    #[test]
    fn test_event_constructors() {
        assert_eq!(
            Event::ctrl('a'),
            Event::Key {
                code: KeyCode::Char('a'),
                modifiers: KeyModifiers::CONTROL
            }
        );
        assert_eq!(Event::char('x'), Event::key(KeyCode::Char('x')));
    }

    #[test]
    fn test_scroll_area_height() {
        let area = ScrollArea {
            lines: Vec::new(),
            top: 3,
            bottom: 13,
        };
        assert_eq!(area.height(), 10);
    }
}
