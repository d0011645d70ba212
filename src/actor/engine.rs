//! Engine: Reference host that ties the actors to a real terminal.
//!
//! The engine owns raw mode and the alternate screen, spawns the input and
//! timer actors, carries out widget [`Command`]s and repaints string views.
//! Widgets do not depend on it; any host that can deliver [`Event`]s and
//! honor commands will do.
//!
//! ```ignore
//! let mut engine = Engine::new()?;
//! let mut input = TextInput::new();
//! engine.execute(&input.blink_command())?;
//!
//! while engine.is_running() {
//!     let Some(event) = engine.wait_event(Duration::from_millis(100)) else { continue };
//!     let (next, cmd) = input.update(&event);
//!     input = next;
//!     if let Some(cmd) = cmd {
//!         engine.execute(&cmd)?;
//!     }
//!     engine.draw(&input.view())?;
//! }
//! ```

use super::messages::{Command, Event};
use super::{InputActor, TimerActor};
use crate::terminal::OutputBuffer;
use crossbeam_channel::{bounded, Receiver};
use crossterm::{
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout};
use std::ops::Range;
use std::time::Duration;

/// Configuration for the Engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
    /// Capacity of the event channel shared by the actors.
    pub event_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            input_poll_timeout: Duration::from_millis(10),
            alternate_screen: true,
            event_capacity: 64,
        }
    }
}

/// The reference host.
pub struct Engine {
    /// Configuration.
    config: EngineConfig,
    /// Events from the input and timer actors.
    event_rx: Receiver<Event>,
    /// Input actor handle.
    input_actor: Option<InputActor>,
    /// Timer actor handle.
    timer_actor: Option<TimerActor>,
    /// Reused escape sequence buffer.
    output: OutputBuffer,
    /// Terminal handle.
    stdout: Stdout,
    /// Terminal width.
    width: u16,
    /// Terminal height.
    height: u16,
    /// Rows owned by a synced scroll area; `draw` leaves them alone.
    ignored_rows: Option<Range<u16>>,
    /// Whether the engine is running.
    running: bool,
}

impl Engine {
    /// Create a new engine with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails (raw mode, alternate screen, etc.).
    pub fn new() -> io::Result<Self> {
        Self::with_config(EngineConfig::default())
    }

    /// Create a new engine with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn with_config(config: EngineConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        if config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        let mut output = OutputBuffer::new();
        enter_sequence(&mut output);
        output.flush_to(&mut stdout)?;

        // Input and timer share one channel so the loop has a single source
        let (event_tx, event_rx) = bounded::<Event>(config.event_capacity);
        let input_actor = InputActor::spawn(event_tx.clone(), config.input_poll_timeout);
        let timer_actor = TimerActor::spawn(event_tx);

        tracing::info!(target: "engine", width, height, "started");

        Ok(Self {
            config,
            event_rx,
            input_actor: Some(input_actor),
            timer_actor: Some(timer_actor),
            output,
            stdout,
            width,
            height,
            ignored_rows: None,
            running: true,
        })
    }

    /// Get the terminal width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the terminal height.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Check if the engine is still running.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the engine.
    pub const fn stop(&mut self) {
        self.running = false;
    }

    /// Wait for the next event (blocking with timeout).
    pub fn wait_event(&self, timeout: Duration) -> Option<Event> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Record a new terminal size.
    ///
    /// Any synced scroll area is forgotten; the caller re-syncs it.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.ignored_rows = None;
    }

    /// Carry out a widget command.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn execute(&mut self, command: &Command) -> io::Result<()> {
        tracing::debug!(target: "engine", ?command, "execute");
        match command {
            Command::Schedule { delay, event } => {
                if let Some(timer) = &self.timer_actor {
                    timer.schedule(*delay, event.clone());
                }
                Ok(())
            }
            Command::Sync(area) => {
                self.ignored_rows = Some(area.top..area.bottom);
                self.flush_command(command)
            }
            Command::ScrollDown(_) | Command::ScrollUp(_) => self.flush_command(command),
        }
    }

    /// Repaint the screen with a rendered view, one line per row.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn draw(&mut self, view: &str) -> io::Result<()> {
        self.output.clear();
        compose_frame(&mut self.output, view, self.height, self.ignored_rows.as_ref());
        self.output.flush_to(&mut self.stdout)
    }

    fn flush_command(&mut self, command: &Command) -> io::Result<()> {
        self.output.clear();
        self.output.apply(command);
        self.output.flush_to(&mut self.stdout)
    }
}

/// Hide the cursor and blank the screen before the first frame.
pub fn enter_sequence(output: &mut OutputBuffer) {
    output.cursor_hide();
    output.clear_screen();
}

/// Drop any open style and give the cursor back.
pub fn leave_sequence(output: &mut OutputBuffer) {
    output.reset_attrs();
    output.cursor_show();
}

/// Write `view` into `output` as a full frame of `height` rows.
///
/// Rows in `ignored` belong to a synced scroll area and are skipped.
pub fn compose_frame(output: &mut OutputBuffer, view: &str, height: u16, ignored: Option<&Range<u16>>) {
    let mut lines = view.split('\n');
    for y in 0..height {
        let line = lines.next().unwrap_or("");
        if ignored.is_some_and(|rows| rows.contains(&y)) {
            continue;
        }
        output.write_row(y, line);
    }
    output.reset_attrs();
}

impl Drop for Engine {
    fn drop(&mut self) {
        // Stop actors
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }
        if let Some(actor) = self.timer_actor.take() {
            actor.join();
        }

        // Restore terminal state
        self.output.clear();
        leave_sequence(&mut self.output);
        let _ = self.output.flush_to(&mut self.stdout);
        if self.config.alternate_screen {
            let _ = execute!(self.stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        tracing::info!(target: "engine", "stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(view: &str, ignored: Option<&Range<u16>>) -> Vec<String> {
        let mut parser = vt100::Parser::new(4, 20, 0);
        parser.process(b"old0\r\nold1\r\nold2\r\nold3");
        let mut out = OutputBuffer::new();
        compose_frame(&mut out, view, 4, ignored);
        parser.process(out.as_bytes());
        parser.screen().rows(0, 20).collect()
    }

    #[test]
    fn test_compose_frame_overwrites_rows() {
        assert_eq!(render("a\nb", None), ["a", "b", "", ""]);
    }

    #[test]
    fn test_compose_frame_skips_synced_rows() {
        assert_eq!(render("a\n\n\nd", Some(&(1..3))), ["a", "old1", "old2", "d"]);
    }

    #[test]
    fn test_enter_and_leave_sequences() {
        let mut parser = vt100::Parser::new(4, 20, 0);
        parser.process(b"old0\r\nold1");

        let mut out = OutputBuffer::new();
        enter_sequence(&mut out);
        parser.process(out.as_bytes());
        assert!(parser.screen().hide_cursor());
        assert!(parser.screen().rows(0, 20).all(|row| row.is_empty()));

        out.clear();
        leave_sequence(&mut out);
        parser.process(out.as_bytes());
        assert!(!parser.screen().hide_cursor());
        assert_eq!(out.as_bytes(), b"\x1b[0m\x1b[?25h");
    }

    #[test]
    fn test_compose_frame_truncates_to_height() {
        assert_eq!(render("1\n2\n3\n4\n5\n6", None), ["1", "2", "3", "4"]);
    }
}
