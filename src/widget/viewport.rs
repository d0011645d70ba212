//! Viewport: A scrollable window over a block of text.
//!
//! The viewport shows `height` consecutive lines starting at `offset`, with
//! pager-style keys:
//!
//! | Keys | Action |
//! |------|--------|
//! | `PgDn`, `Space`, `f` | page down |
//! | `PgUp`, `b` | page up |
//! | `d` / `u` | half page down / up |
//! | `↓`, `j` / `↑`, `k` | one line down / up |
//!
//! # Rendering
//!
//! In the standard mode [`Viewport::view`] returns the visible lines and the
//! host repaints them every frame.
//!
//! In high-performance mode `view` only returns blank lines to reserve
//! space. The content goes to the terminal out of band:
//! [`Viewport::sync_command`] repaints the whole region, and each navigation
//! through `update` returns a [`Command::ScrollDown`] or [`Command::ScrollUp`]
//! carrying only the lines that scrolled into view. The host calls
//! `sync_command` after `set_content` or `set_size`, since those do not
//! scroll. A navigation that has to pull a stale offset back inside the
//! content answers with a [`Command::Sync`] instead of a delta.
//!
//! Both modes cut lines to `width` chars so that no row wraps.

use std::io::Read;

use super::traits::Component;
use crate::actor::{Command, Event, KeyCode, ScrollArea};
use crate::clamp::{clamp, max_offset, step_down, step_up};

/// Failure to load viewport content.
///
/// Stored on the viewport and shown by [`Viewport::view`] in place of the
/// content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    /// The reader failed.
    #[error("could not read content: {0}")]
    Read(String),
    /// The bytes were not UTF-8.
    #[error("content is not valid UTF-8")]
    Encoding,
}

/// Direction and distance of one navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Down(usize),
    Up(usize),
}

/// A scrollable view over lines of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    /// Content, one entry per line.
    lines: Vec<String>,
    /// Index of the first visible line.
    offset: usize,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
    /// Row of the viewport's top edge in the terminal.
    y_position: u16,
    /// Whether content is delivered through scroll commands.
    high_performance: bool,
    /// Stored load failure.
    error: Option<ContentError>,
}

impl Viewport {
    /// Create an empty viewport of the given size.
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            lines: Vec::new(),
            offset: 0,
            width,
            height,
            y_position: 0,
            high_performance: false,
            error: None,
        }
    }

    /// Enable or disable high-performance rendering.
    #[must_use]
    pub const fn with_high_performance(mut self, enabled: bool) -> Self {
        self.high_performance = enabled;
        self
    }

    /// Set the terminal row of the viewport's top edge.
    #[must_use]
    pub const fn with_y_position(mut self, y_position: u16) -> Self {
        self.y_position = y_position;
        self
    }

    /// Width in columns.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Terminal row of the top edge.
    pub const fn y_position(&self) -> u16 {
        self.y_position
    }

    /// Index of the first visible line.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Total number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// All content lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether high-performance rendering is on.
    pub const fn is_high_performance(&self) -> bool {
        self.high_performance
    }

    /// Switch rendering strategy.
    pub const fn set_high_performance(&mut self, enabled: bool) {
        self.high_performance = enabled;
    }

    /// Replace the geometry.
    ///
    /// The offset is left alone; the next navigation call clamps it.
    pub const fn set_size(&mut self, y_position: u16, width: u16, height: u16) {
        self.y_position = y_position;
        self.width = width;
        self.height = height;
    }

    /// Replace the content, normalizing `\r\n` line endings.
    ///
    /// Clears any stored load error. The offset is left alone.
    pub fn set_content(&mut self, content: &str) {
        self.lines = content.replace("\r\n", "\n").split('\n').map(String::from).collect();
        self.error = None;
    }

    /// Read the content from `reader`.
    ///
    /// On failure the error is stored, so that `view` shows it, and the
    /// previous lines are kept.
    pub fn load(&mut self, mut reader: impl Read) -> Result<(), ContentError> {
        let mut bytes = Vec::new();
        let text = reader
            .read_to_end(&mut bytes)
            .map_err(|err| ContentError::Read(err.to_string()))
            .and_then(|_| String::from_utf8(bytes).map_err(|_| ContentError::Encoding));

        match text {
            Ok(text) => {
                self.set_content(&text);
                tracing::debug!(target: "widget.viewport", lines = self.lines.len(), "content loaded");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(target: "widget.viewport", error = %err, "content load failed");
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Store a load error to be shown instead of the content.
    pub fn set_error(&mut self, error: ContentError) {
        self.error = Some(error);
    }

    /// The stored load error, if any.
    pub const fn error(&self) -> Option<&ContentError> {
        self.error.as_ref()
    }

    /// Largest valid offset for the current content and height.
    pub fn max_offset(&self) -> usize {
        max_offset(self.lines.len(), usize::from(self.height))
    }

    /// Whether the view is at the very top.
    pub const fn at_top(&self) -> bool {
        self.offset == 0
    }

    /// Whether the view is at the very bottom.
    ///
    /// Uses the same boundary the navigation methods clamp to.
    pub fn at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    /// How far down the content is scrolled, from 0.0 to 1.0.
    #[allow(clippy::cast_precision_loss)]
    pub fn scroll_percent(&self) -> f64 {
        let max = self.max_offset();
        if max == 0 {
            return 1.0;
        }
        (self.offset as f64 / max as f64).clamp(0.0, 1.0)
    }

    /// The lines currently in view.
    pub fn visible_lines(&self) -> &[String] {
        self.slice(self.offset, self.offset.saturating_add(usize::from(self.height)))
    }

    /// Move down one page.
    pub fn page_down(&mut self) {
        self.apply(Motion::Down(self.page()));
    }

    /// Move up one page.
    pub fn page_up(&mut self) {
        self.apply(Motion::Up(self.page()));
    }

    /// Move down half a page.
    pub fn half_page_down(&mut self) {
        self.apply(Motion::Down(self.page() / 2));
    }

    /// Move up half a page.
    pub fn half_page_up(&mut self) {
        self.apply(Motion::Up(self.page() / 2));
    }

    /// Move down `n` lines.
    pub fn line_down(&mut self, n: usize) {
        self.apply(Motion::Down(n));
    }

    /// Move up `n` lines.
    pub fn line_up(&mut self, n: usize) {
        self.apply(Motion::Up(n));
    }

    /// Repaint the whole region with the visible lines.
    pub fn sync_command(&self) -> Command {
        Command::Sync(self.area(self.visible_lines()))
    }

    /// Lines revealed by [`Viewport::page_down`], without moving.
    pub fn page_down_command(&self) -> Option<Command> {
        self.delta(Motion::Down(self.page()))
    }

    /// Lines revealed by [`Viewport::page_up`], without moving.
    pub fn page_up_command(&self) -> Option<Command> {
        self.delta(Motion::Up(self.page()))
    }

    /// Lines revealed by [`Viewport::half_page_down`], without moving.
    pub fn half_page_down_command(&self) -> Option<Command> {
        self.delta(Motion::Down(self.page() / 2))
    }

    /// Lines revealed by [`Viewport::half_page_up`], without moving.
    pub fn half_page_up_command(&self) -> Option<Command> {
        self.delta(Motion::Up(self.page() / 2))
    }

    /// Lines revealed by [`Viewport::line_down`], without moving.
    pub fn line_down_command(&self, n: usize) -> Option<Command> {
        self.delta(Motion::Down(n))
    }

    /// Lines revealed by [`Viewport::line_up`], without moving.
    pub fn line_up_command(&self, n: usize) -> Option<Command> {
        self.delta(Motion::Up(n))
    }

    fn page(&self) -> usize {
        usize::from(self.height)
    }

    /// Offset after `motion`. A stale offset is clamped before moving.
    fn target(&self, motion: Motion) -> usize {
        let max = self.max_offset();
        let from = self.offset.min(max);
        match motion {
            Motion::Down(n) => step_down(from, n, max),
            Motion::Up(n) => step_up(from, n),
        }
    }

    fn apply(&mut self, motion: Motion) {
        self.offset = self.target(motion);
    }

    /// Scroll command for `motion`, computed from the current offset.
    ///
    /// An offset left past the end by `set_content` or `set_size` is
    /// clamped by the move, which may go against the motion; the whole
    /// region is repainted then.
    fn delta(&self, motion: Motion) -> Option<Command> {
        let old = self.offset;
        let new = self.target(motion);
        let height = self.page();

        if old > self.max_offset() {
            let lines = self.slice(new, new.saturating_add(height));
            return Some(Command::Sync(self.area(lines)));
        }

        match motion {
            Motion::Down(_) if new > old => {
                let top = old.saturating_add(height).max(new);
                let lines = self.slice(top, new.saturating_add(height));
                Some(Command::ScrollDown(self.area(lines)))
            }
            Motion::Up(_) if new < old => {
                let lines = self.slice(new, old.min(new.saturating_add(height)));
                Some(Command::ScrollUp(self.area(lines)))
            }
            _ => None,
        }
    }

    /// `lines[top..bottom]` with both ends clamped to the content.
    fn slice(&self, top: usize, bottom: usize) -> &[String] {
        let len = self.lines.len();
        let bottom = clamp(bottom, 0, len);
        let top = clamp(top, 0, bottom);
        &self.lines[top..bottom]
    }

    /// `line` cut to `width` chars, so a row never wraps.
    fn clip<'a>(&self, line: &'a str) -> &'a str {
        match line.char_indices().nth(usize::from(self.width)) {
            Some((cut, _)) => &line[..cut],
            None => line,
        }
    }

    fn area(&self, lines: &[String]) -> ScrollArea {
        ScrollArea {
            lines: lines.iter().map(|line| self.clip(line).to_string()).collect(),
            top: self.y_position,
            bottom: self.y_position.saturating_add(self.height),
        }
    }

    fn motion_for(&self, code: KeyCode) -> Option<Motion> {
        let page = self.page();
        Some(match code {
            KeyCode::PageDown | KeyCode::Char(' ' | 'f') => Motion::Down(page),
            KeyCode::PageUp | KeyCode::Char('b') => Motion::Up(page),
            KeyCode::Char('d') => Motion::Down(page / 2),
            KeyCode::Char('u') => Motion::Up(page / 2),
            KeyCode::Down | KeyCode::Char('j') => Motion::Down(1),
            KeyCode::Up | KeyCode::Char('k') => Motion::Up(1),
            _ => return None,
        })
    }
}

impl Component for Viewport {
    fn update(mut self, event: &Event) -> (Self, Option<Command>) {
        let Event::Key { code, modifiers } = event else {
            return (self, None);
        };
        if modifiers.is_chord() {
            return (self, None);
        }
        let Some(motion) = self.motion_for(*code) else {
            return (self, None);
        };

        let command = if self.high_performance {
            self.delta(motion)
        } else {
            None
        };
        let from = self.offset;
        self.apply(motion);
        tracing::debug!(target: "widget.viewport", from, to = self.offset, ?motion, "scroll");

        (self, command)
    }

    fn view(&self) -> String {
        if let Some(err) = &self.error {
            return err.to_string();
        }

        let height = self.page();
        if self.high_performance {
            return "\n".repeat(height.saturating_sub(1));
        }

        let lines: Vec<&str> = self.visible_lines().iter().map(|line| self.clip(line)).collect();
        let mut out = lines.join("\n");
        out.push_str(&"\n".repeat(height.saturating_sub(lines.len())));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::KeyModifiers;

    fn numbered(count: usize) -> String {
        (0..count).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n")
    }

    fn viewport(lines: usize, height: u16) -> Viewport {
        let mut vp = Viewport::new(80, height);
        vp.set_content(&numbered(lines));
        vp
    }

    fn names(range: std::ops::Range<usize>) -> Vec<String> {
        range.map(|i| format!("line {i}")).collect()
    }

    #[test]
    fn test_set_content_normalizes_crlf() {
        let mut vp = Viewport::new(10, 3);
        vp.set_content("a\r\nb\r\nc");
        assert_eq!(vp.lines(), ["a", "b", "c"]);
    }

    #[test]
    fn test_page_down_clamps_at_bottom() {
        let mut vp = viewport(25, 10);
        vp.page_down();
        assert_eq!(vp.offset(), 10);
        vp.page_down();
        assert_eq!(vp.offset(), 15);
        assert!(vp.at_bottom());
        vp.page_down();
        assert_eq!(vp.offset(), 15);
    }

    #[test]
    fn test_page_up_clamps_at_top() {
        let mut vp = viewport(25, 10);
        vp.line_down(4);
        vp.page_up();
        assert_eq!(vp.offset(), 0);
        assert!(vp.at_top());
        vp.page_up();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_page_round_trip() {
        let mut vp = viewport(40, 10);
        vp.page_down();
        vp.page_down();
        assert_eq!(vp.offset(), 20);
        vp.page_up();
        vp.page_down();
        assert_eq!(vp.offset(), 20);
    }

    #[test]
    fn test_half_pages_truncate() {
        let mut vp = viewport(30, 5);
        vp.half_page_down();
        assert_eq!(vp.offset(), 2);
        vp.half_page_down();
        assert_eq!(vp.offset(), 4);
        vp.half_page_up();
        assert_eq!(vp.offset(), 2);
    }

    #[test]
    fn test_line_moves() {
        let mut vp = viewport(12, 10);
        vp.line_down(0);
        assert_eq!(vp.offset(), 0);
        vp.line_down(1);
        assert_eq!(vp.offset(), 1);
        vp.line_down(5);
        assert_eq!(vp.offset(), 2);
        vp.line_up(7);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut vp = viewport(3, 10);
        assert!(vp.at_top());
        assert!(vp.at_bottom());
        vp.page_down();
        assert_eq!(vp.offset(), 0);
        assert!((vp.scroll_percent() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stale_offset_is_clamped_by_navigation() {
        let mut vp = viewport(25, 10);
        vp.page_down();
        vp.page_down();
        vp.set_content(&numbered(12));
        assert_eq!(vp.offset(), 15);
        vp.page_down();
        assert_eq!(vp.offset(), 2);
    }

    #[test]
    fn test_stale_offset_resyncs_in_high_performance_mode() {
        let mut vp = viewport(25, 10).with_y_position(1).with_high_performance(true);
        vp.page_down();
        vp.page_down();
        vp.set_content(&numbered(12));

        // Paging down from a stale offset moves the view up
        let (vp, cmd) = vp.update(&Event::key(KeyCode::PageDown));
        assert_eq!(vp.offset(), 2);
        assert_eq!(
            cmd,
            Some(Command::Sync(ScrollArea {
                lines: names(2..12),
                top: 1,
                bottom: 11,
            }))
        );

        // Once back in range, deltas resume
        let (_, cmd) = vp.update(&Event::key(KeyCode::Up));
        let Some(Command::ScrollUp(area)) = cmd else {
            panic!("expected scroll up");
        };
        assert_eq!(area.lines, names(1..2));
    }

    #[test]
    fn test_stale_offset_zero_motion_resyncs() {
        let mut vp = viewport(10, 1).with_high_performance(true);
        vp.line_down(9);
        vp.set_content(&numbered(4));

        // Half a page of height 1 is no motion, but the clamp still moves
        let (vp, cmd) = vp.update(&Event::key(KeyCode::Char('u')));
        assert_eq!(vp.offset(), 3);
        assert_eq!(
            cmd,
            Some(Command::Sync(ScrollArea {
                lines: names(3..4),
                top: 0,
                bottom: 1,
            }))
        );
    }

    #[test]
    fn test_long_lines_are_clipped_to_width() {
        let mut vp = Viewport::new(4, 2).with_high_performance(true);
        vp.set_content("abcdefgh
xy
élan vital");
        assert_eq!(vp.lines()[0], "abcdefgh");

        let Command::Sync(area) = vp.sync_command() else {
            panic!("expected sync");
        };
        assert_eq!(area.lines, ["abcd", "xy"]);

        let Some(Command::ScrollDown(area)) = vp.line_down_command(1) else {
            panic!("expected scroll down");
        };
        assert_eq!(area.lines, ["élan"]);

        vp.set_high_performance(false);
        assert_eq!(vp.view(), "abcd\nxy");
    }

    #[test]
    fn test_scroll_percent() {
        let mut vp = viewport(30, 10);
        assert!(vp.scroll_percent().abs() < f64::EPSILON);
        vp.page_down();
        assert!((vp.scroll_percent() - 0.5).abs() < f64::EPSILON);
        vp.page_down();
        assert!((vp.scroll_percent() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_view_pads_short_content() {
        let mut vp = Viewport::new(10, 4);
        vp.set_content("a\nb");
        assert_eq!(vp.view(), "a\nb\n\n");
    }

    #[test]
    fn test_view_visible_slice() {
        let mut vp = viewport(25, 3);
        vp.line_down(2);
        assert_eq!(vp.view(), "line 2\nline 3\nline 4");
    }

    #[test]
    fn test_view_empty_viewport() {
        let vp = Viewport::new(10, 3);
        assert_eq!(vp.view(), "\n\n\n");
    }

    #[test]
    fn test_view_high_performance_placeholder() {
        let vp = viewport(25, 4).with_high_performance(true);
        assert_eq!(vp.view(), "\n\n\n");
    }

    #[test]
    fn test_view_shows_error() {
        let mut vp = viewport(25, 4);
        vp.set_error(ContentError::Encoding);
        assert_eq!(vp.view(), "content is not valid UTF-8");

        vp.set_high_performance(true);
        assert_eq!(vp.view(), "content is not valid UTF-8");

        vp.set_content("ok");
        assert!(vp.error().is_none());
    }

    #[test]
    fn test_load_success_and_failure() {
        let mut vp = Viewport::new(10, 2);
        assert!(vp.load("x\r\ny".as_bytes()).is_ok());
        assert_eq!(vp.lines(), ["x", "y"]);

        let err = vp.load(&[0xff_u8, 0xfe][..]).unwrap_err();
        assert_eq!(err, ContentError::Encoding);
        assert_eq!(vp.error(), Some(&ContentError::Encoding));
        assert_eq!(vp.lines(), ["x", "y"]);
    }

    #[test]
    fn test_key_map() {
        let cases = [
            (KeyCode::PageDown, 10),
            (KeyCode::Char(' '), 10),
            (KeyCode::Char('f'), 10),
            (KeyCode::Char('d'), 5),
            (KeyCode::Down, 1),
            (KeyCode::Char('j'), 1),
        ];
        for (code, expected) in cases {
            let (vp, cmd) = viewport(50, 10).update(&Event::key(code));
            assert_eq!(vp.offset(), expected, "{code:?}");
            assert!(cmd.is_none());
        }

        let mut start = viewport(50, 10);
        start.line_down(20);
        let cases = [
            (KeyCode::PageUp, 10),
            (KeyCode::Char('b'), 10),
            (KeyCode::Char('u'), 15),
            (KeyCode::Up, 19),
            (KeyCode::Char('k'), 19),
        ];
        for (code, expected) in cases {
            let (vp, _) = start.clone().update(&Event::key(code));
            assert_eq!(vp.offset(), expected, "{code:?}");
        }
    }

    #[test]
    fn test_unmapped_events_pass_through() {
        let before = viewport(50, 10);
        for event in [
            Event::char('x'),
            Event::ctrl('f'),
            Event::Blink,
            Event::Resize { width: 10, height: 10 },
            Event::Key {
                code: KeyCode::Down,
                modifiers: KeyModifiers::CONTROL,
            },
        ] {
            let (after, cmd) = before.clone().update(&event);
            assert_eq!(after, before);
            assert!(cmd.is_none());
        }
    }

    #[test]
    fn test_sync_command() {
        let mut vp = viewport(25, 10).with_y_position(2).with_high_performance(true);
        vp.line_down(3);
        assert_eq!(
            vp.sync_command(),
            Command::Sync(ScrollArea {
                lines: names(3..13),
                top: 2,
                bottom: 12,
            })
        );
    }

    #[test]
    fn test_sync_includes_last_line() {
        let mut vp = viewport(25, 10).with_high_performance(true);
        vp.page_down();
        vp.page_down();
        let Command::Sync(area) = vp.sync_command() else {
            panic!("expected sync");
        };
        assert_eq!(area.lines, names(15..25));
    }

    #[test]
    fn test_high_performance_page_down_delta() {
        let vp = viewport(25, 10).with_y_position(1).with_high_performance(true);

        let (vp, cmd) = vp.update(&Event::key(KeyCode::PageDown));
        assert_eq!(vp.offset(), 10);
        assert_eq!(
            cmd,
            Some(Command::ScrollDown(ScrollArea {
                lines: names(10..20),
                top: 1,
                bottom: 11,
            }))
        );

        // Clamped page: only five new lines scroll in.
        let (vp, cmd) = vp.update(&Event::key(KeyCode::PageDown));
        assert_eq!(vp.offset(), 15);
        let Some(Command::ScrollDown(area)) = cmd else {
            panic!("expected scroll down");
        };
        assert_eq!(area.lines, names(20..25));

        // At the bottom nothing moves.
        let (vp, cmd) = vp.update(&Event::key(KeyCode::PageDown));
        assert_eq!(vp.offset(), 15);
        assert!(cmd.is_none());
    }

    #[test]
    fn test_high_performance_up_deltas() {
        let mut vp = viewport(40, 10).with_high_performance(true);
        vp.line_down(15);

        assert_eq!(
            vp.line_up_command(2),
            Some(Command::ScrollUp(ScrollArea {
                lines: names(13..15),
                top: 0,
                bottom: 10,
            }))
        );
        assert_eq!(vp.offset(), 15);

        let (vp, cmd) = vp.update(&Event::key(KeyCode::Char('u')));
        assert_eq!(vp.offset(), 10);
        let Some(Command::ScrollUp(area)) = cmd else {
            panic!("expected scroll up");
        };
        assert_eq!(area.lines, names(10..15));

        let (vp, cmd) = vp.update(&Event::key(KeyCode::PageUp));
        assert_eq!(vp.offset(), 0);
        let Some(Command::ScrollUp(area)) = cmd else {
            panic!("expected scroll up");
        };
        assert_eq!(area.lines, names(0..10));

        let (_, cmd) = vp.update(&Event::key(KeyCode::Up));
        assert!(cmd.is_none());
    }

    #[test]
    fn test_up_commands_do_not_move() {
        let mut vp = viewport(40, 10).with_high_performance(true);
        vp.line_down(12);

        let Some(Command::ScrollUp(area)) = vp.page_up_command() else {
            panic!("expected scroll up");
        };
        assert_eq!(area.lines, names(2..12));

        let Some(Command::ScrollUp(area)) = vp.half_page_up_command() else {
            panic!("expected scroll up");
        };
        assert_eq!(area.lines, names(7..12));
        assert_eq!(vp.offset(), 12);
    }

    #[test]
    fn test_large_jump_sends_one_screen() {
        let vp = viewport(100, 10).with_high_performance(true);
        let cmd = vp.line_down_command(40);
        let Some(Command::ScrollDown(area)) = cmd else {
            panic!("expected scroll down");
        };
        assert_eq!(area.lines, names(40..50));
    }

    #[test]
    fn test_standard_mode_emits_no_commands() {
        let (vp, cmd) = viewport(25, 10).update(&Event::key(KeyCode::PageDown));
        assert_eq!(vp.offset(), 10);
        assert!(cmd.is_none());
    }
}
