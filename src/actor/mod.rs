//! Actor Model: Message-passing host for the widgets.
//!
//! Widgets only see [`Event`]s and return [`Command`]s. The actors here are
//! one way to connect that protocol to a terminal:
//! - **Input Actor**: Polls terminal events, forwards them as `Event`s
//! - **Timer Actor**: Carries out `Command::Schedule`, delivering events later
//! - **Engine**: Owns the terminal, runs the other commands, repaints views
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐       Event       ┌──────────────┐   Event   ┌──────────┐
//! │ Input Thread │ ────────────────▶ │              │ ────────▶ │ Widgets  │
//! └──────────────┘                   │  Main Loop   │           │          │
//! ┌──────────────┐    Event (late)   │   (Engine)   │  Command  │          │
//! │ Timer Thread │ ────────────────▶ │              │ ◀──────── │          │
//! └──────────────┘                   └──────────────┘           └──────────┘
//!        ▲             Schedule             │
//!        └──────────────────────────────────┘
//! ```

mod engine;
mod input;
mod messages;
mod timer;

pub use engine::{compose_frame, enter_sequence, leave_sequence, Engine, EngineConfig};
pub use input::{convert_event, InputActor};
pub use messages::{Command, Event, KeyCode, KeyModifiers, ScrollArea};
pub use timer::TimerActor;
