//! # Flywheel Widgets
//!
//! Value-semantics terminal widgets: a single-line text input with a blinking
//! caret, and a scrollable viewport with an optional high-performance mode
//! that scrolls with terminal scroll regions instead of repainting.
//!
//! ## Core Concepts
//!
//! - **Components**: `update(self, &Event) -> (Self, Option<Command>)` and a
//!   pure `view()`, so a widget is only ever replaced, never mutated behind
//!   the host's back
//! - **Commands**: deferred effects (timers, terminal scroll sequences) that
//!   the host carries out
//! - **Actors**: a reference host with input and timer threads
//!
//! ## Example
//!
//! ```rust
//! use flywheel_widgets::{Component, Event, KeyCode, TextInput};
//!
//! let input = TextInput::new();
//! let (input, _) = input.update(&Event::char('h'));
//! let (input, _) = input.update(&Event::char('i'));
//! let (input, _) = input.update(&Event::key(KeyCode::Left));
//!
//! assert_eq!(input.value(), "hi");
//! assert_eq!(input.caret(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod clamp;
pub mod style;
pub mod terminal;
pub mod widget;

// Re-exports for convenience
pub use actor::{Command, Engine, EngineConfig, Event, InputActor, KeyCode, KeyModifiers, ScrollArea, TimerActor};
pub use style::{Modifiers, Rgb, Style};
pub use terminal::OutputBuffer;
pub use widget::{Component, ContentError, TextInput, TextInputStyle, Viewport, DEFAULT_BLINK_INTERVAL};
