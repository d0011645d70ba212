//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.
//!
//! Besides the cursor and screen primitives this knows how to carry out the
//! viewport's scroll commands with a terminal scroll region (DECSTBM):
//!
//! - **sync**: rewrite every row of the region
//! - **scroll down**: scroll the region up with line feeds at its bottom
//!   row, writing each new line into the freed row
//! - **scroll up**: insert blank rows at the top of the region and write the
//!   new lines into them
//!
//! Terminals ignore a scroll region whose top and bottom rows coincide, so a
//! single-row area is rewritten in place instead.

use crate::actor::{Command, ScrollArea};
use std::io::Write;

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// All output is accumulated here, then flushed in a single `write()` syscall
/// to prevent terminal flickering.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Move cursor to (x, y) position (1-indexed for ANSI).
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        // CSI row ; col H
        let _ = write!(self.data, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1);
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25h");
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Clear the entire screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[2J");
    }

    /// Erase the line under the cursor.
    #[inline]
    pub fn erase_line(&mut self) {
        self.data.extend_from_slice(b"\x1b[2K");
    }

    /// Restrict scrolling to rows `top..bottom` (0-indexed, exclusive end).
    #[inline]
    pub fn set_scroll_region(&mut self, top: u16, bottom: u16) {
        let _ = write!(self.data, "\x1b[{};{}r", u32::from(top) + 1, bottom);
    }

    /// Restore full-screen scrolling.
    #[inline]
    pub fn reset_scroll_region(&mut self) {
        self.data.extend_from_slice(b"\x1b[r");
    }

    /// Insert `n` blank lines at the cursor row, pushing the rest down.
    #[inline]
    pub fn insert_lines(&mut self, n: usize) {
        let _ = write!(self.data, "\x1b[{n}L");
    }

    /// Write a row: erase it, then draw `line` from the first column.
    pub fn write_row(&mut self, y: u16, line: &str) {
        self.cursor_move(0, y);
        self.erase_line();
        self.write_str(line);
    }

    /// Rewrite every row of the area, blanking rows without a line.
    pub fn sync_area(&mut self, area: &ScrollArea) {
        if area.height() == 0 {
            return;
        }
        self.set_scroll_region(area.top, area.bottom);
        for (i, y) in (area.top..area.bottom).enumerate() {
            self.write_row(y, area.lines.get(i).map_or("", String::as_str));
        }
        self.reset_scroll_region();
    }

    /// Scroll the area up by one row per line, appending the lines at the
    /// bottom.
    pub fn scroll_down_area(&mut self, area: &ScrollArea) {
        if area.height() == 0 || area.lines.is_empty() {
            return;
        }
        if area.height() == 1 {
            self.write_row(area.top, area.lines.last().map_or("", String::as_str));
            return;
        }
        self.set_scroll_region(area.top, area.bottom);
        self.cursor_move(0, area.bottom - 1);
        for line in &area.lines {
            self.write_str("\r\n");
            self.write_str(line);
        }
        self.reset_scroll_region();
    }

    /// Scroll the area down by one row per line, inserting the lines at the
    /// top.
    pub fn scroll_up_area(&mut self, area: &ScrollArea) {
        if area.height() == 0 || area.lines.is_empty() {
            return;
        }
        if area.height() == 1 {
            self.write_row(area.top, area.lines.first().map_or("", String::as_str));
            return;
        }
        self.set_scroll_region(area.top, area.bottom);
        self.cursor_move(0, area.top);
        self.insert_lines(area.lines.len());
        for (i, line) in area.lines.iter().enumerate() {
            if i > 0 {
                self.write_str("\r\n");
            }
            self.write_str(line);
        }
        self.reset_scroll_region();
    }

    /// Append the sequences for a scroll command.
    ///
    /// Returns `false` for commands that are not terminal output.
    pub fn apply(&mut self, command: &Command) -> bool {
        match command {
            Command::Sync(area) => self.sync_area(area),
            Command::ScrollDown(area) => self.scroll_down_area(area),
            Command::ScrollUp(area) => self.scroll_up_area(area),
            Command::Schedule { .. } => return false,
        }
        true
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
