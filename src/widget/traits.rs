//! Component trait shared by every widget.
//!
//! Widgets are values: `update` consumes the current state and hands back
//! the next one together with an optional [`Command`] for the host. `view`
//! is a pure projection of the state to a string.

use crate::actor::{Command, Event};

/// A UI component driven by events and rendered to a string.
///
/// A host holding widgets of different kinds wraps them in its own enum
/// and matches on it; there is no runtime type inspection.
pub trait Component: Sized {
    /// Apply one event.
    ///
    /// Events the component does not understand leave it unchanged and
    /// produce no command.
    #[must_use]
    fn update(self, event: &Event) -> (Self, Option<Command>);

    /// Render the current state.
    fn view(&self) -> String;
}
