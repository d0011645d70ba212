//! Widgets: Value-typed components driven by events.
//!
//! Every widget implements [`Component`]: `update` takes the widget by
//! value with one [`Event`](crate::Event) and returns the next widget plus
//! an optional [`Command`](crate::Command); `view` renders it to a string.
//!
//! - [`TextInput`]: single-line editable field with a blinking caret
//! - [`Viewport`]: scrollable pager over a block of text
//!
//! # Example
//!
//! ```
//! use flywheel_widgets::{Component, Event, KeyCode, Viewport};
//!
//! let mut viewport = Viewport::new(80, 10);
//! viewport.set_content(&"line\n".repeat(25));
//!
//! let (viewport, _) = viewport.update(&Event::key(KeyCode::PageDown));
//! assert_eq!(viewport.offset(), 10);
//! ```

mod text_input;
mod traits;
mod viewport;

pub use text_input::{TextInput, TextInputStyle, DEFAULT_BLINK_INTERVAL};
pub use traits::Component;
pub use viewport::{ContentError, Viewport};
