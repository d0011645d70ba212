//! Style: Colors and text modifiers rendered as inline SGR tokens.
//!
//! Widgets render to plain strings, so styling is expressed as ANSI SGR
//! sequences embedded around the styled text. A [`Style`] is plain data
//! passed in at construction; there is no global color profile.
//!
//! ```
//! use flywheel_widgets::{Modifiers, Style};
//!
//! let caret = Style::reversed();
//! assert_eq!(caret.paint("x"), "\x1b[7mx\x1b[0m");
//! assert_eq!(Style::new().paint("x"), "x");
//! # let _ = Modifiers::BOLD;
//! ```

use bitflags::bitflags;
use std::fmt::Write;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// These can be combined using bitwise OR.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Blinking text
        const BLINK = 0b0001_0000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0010_0000;
        /// Hidden/invisible text
        const HIDDEN = 0b0100_0000;
        /// Strikethrough text
        const STRIKETHROUGH = 0b1000_0000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// SGR parameter for each modifier, in emission order.
const MODIFIER_CODES: [(Modifiers, u8); 8] = [
    (Modifiers::BOLD, 1),
    (Modifiers::DIM, 2),
    (Modifiers::ITALIC, 3),
    (Modifiers::UNDERLINE, 4),
    (Modifiers::BLINK, 5),
    (Modifiers::REVERSED, 7),
    (Modifiers::HIDDEN, 8),
    (Modifiers::STRIKETHROUGH, 9),
];

/// Foreground, background and modifiers for a run of text.
///
/// An empty style (the default) paints text unchanged, without any escape
/// sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    /// Foreground color, or the terminal default.
    pub fg: Option<Rgb>,
    /// Background color, or the terminal default.
    pub bg: Option<Rgb>,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl Style {
    /// A style that leaves text untouched.
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            modifiers: Modifiers::empty(),
        }
    }

    /// Invert-video style, used for the text caret.
    pub const fn reversed() -> Self {
        Self::new().add_modifier(Modifiers::REVERSED)
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Rgb) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add modifiers to the style.
    #[must_use]
    pub const fn add_modifier(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = self.modifiers.union(modifiers);
        self
    }

    /// Whether painting with this style emits no escape sequences.
    pub const fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.modifiers.is_empty()
    }

    /// Wrap `text` in this style's SGR sequences followed by a reset.
    pub fn paint(&self, text: &str) -> String {
        if self.is_plain() || text.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len() + 24);
        if let Some(fg) = self.fg {
            let _ = write!(out, "\x1b[38;2;{};{};{}m", fg.r, fg.g, fg.b);
        }
        if let Some(bg) = self.bg {
            let _ = write!(out, "\x1b[48;2;{};{};{}m", bg.r, bg.g, bg.b);
        }
        for (modifier, code) in MODIFIER_CODES {
            if self.modifiers.contains(modifier) {
                let _ = write!(out, "\x1b[{code}m");
            }
        }
        out.push_str(text);
        out.push_str("\x1b[0m");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_style_is_passthrough() {
        assert_eq!(Style::new().paint("hello"), "hello");
        assert!(Style::default().is_plain());
    }

    #[test]
    fn test_reversed_paint() {
        assert_eq!(Style::reversed().paint("a"), "\x1b[7ma\x1b[0m");
    }

    #[test]
    fn test_colors_then_modifiers() {
        let style = Style::new()
            .fg(Rgb::from_u32(0xFF5500))
            .add_modifier(Modifiers::BOLD | Modifiers::UNDERLINE);
        assert_eq!(
            style.paint("x"),
            "\x1b[38;2;255;85;0m\x1b[1m\x1b[4mx\x1b[0m"
        );
    }

    #[test]
    fn test_background_precedes_modifiers() {
        let style = Style::reversed().bg(Rgb::new(1, 2, 3));
        assert_eq!(style.paint("x"), "\x1b[48;2;1;2;3m\x1b[7mx\x1b[0m");
    }

    #[test]
    fn test_empty_text_has_no_tokens() {
        assert_eq!(Style::reversed().paint(""), "");
    }

    #[test]
    fn test_rgb_debug() {
        assert_eq!(format!("{:?}", Rgb::new(255, 0, 16)), "#ff0010");
    }
}
