use std::io::Write;
use std::time::Duration;

use crate::sink::SyncWriter;
use crate::util::{Glyphs, Indent};

const CLEAR_LINE: &str = "\r\x1b[2K";
const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";

/// Single-line terminal target with in-place redraw and cursor bookkeeping.
///
/// Tracks whether an in-progress line is currently drawn, so that permanent
/// lines always start from column zero on a blank line, and whether the
/// cursor was hidden, so it can be restored exactly once.
#[derive(Debug)]
pub(crate) struct Terminal<W> {
    out: SyncWriter<W>,
    line_drawn: bool,
    cursor_hidden: bool,
}

impl<W: Write> Terminal<W> {
    pub(crate) fn new(out: SyncWriter<W>) -> Self {
        Self {
            out,
            line_drawn: false,
            cursor_hidden: false,
        }
    }

    /// Redraws the in-progress line in place. No trailing newline.
    pub(crate) fn draw_progress(
        &mut self, spinner: &str, depth: usize, label: &str,
    ) -> Result<(), std::io::Error> {
        let frame = format!("{CLEAR_LINE}{spinner} {}{label}", Indent(depth));
        self.line_drawn = true;
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }

    /// Writes a permanent line, wiping any in-progress line first.
    pub(crate) fn write_line(&mut self, line: &str) -> Result<(), std::io::Error> {
        let mut buf = String::with_capacity(line.len() + CLEAR_LINE.len() + 1);
        if self.line_drawn {
            buf.push_str(CLEAR_LINE);
            self.line_drawn = false;
        }
        buf.push_str(line);
        buf.push('\n');
        self.out.write_all(buf.as_bytes())?;
        self.out.flush()
    }

    /// Wipes the in-progress line, if one is drawn.
    pub(crate) fn clear_line(&mut self) -> Result<(), std::io::Error> {
        if !self.line_drawn {
            return Ok(());
        }
        self.line_drawn = false;
        self.out.write_all(CLEAR_LINE.as_bytes())?;
        self.out.flush()
    }

    pub(crate) fn hide_cursor(&mut self) -> Result<(), std::io::Error> {
        if self.cursor_hidden {
            return Ok(());
        }
        self.cursor_hidden = true;
        self.out.write_all(HIDE_CURSOR.as_bytes())?;
        self.out.flush()
    }

    pub(crate) fn show_cursor(&mut self) -> Result<(), std::io::Error> {
        if !self.cursor_hidden {
            return Ok(());
        }
        self.cursor_hidden = false;
        self.out.write_all(SHOW_CURSOR.as_bytes())?;
        self.out.flush()
    }

    /// Clears the in-progress line and shows the cursor again. Both steps are
    /// attempted even if the first one fails.
    pub(crate) fn release(&mut self) -> Result<(), std::io::Error> {
        let cleared = self.clear_line();
        let shown = self.show_cursor();
        cleared.and(shown)
    }

    pub(crate) fn cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }
}

/// `✓ <label>`, with ` (took <N>ms)` once `elapsed` reaches `threshold`.
pub(crate) fn success_line(
    glyphs: &Glyphs, depth: usize, label: &str, elapsed: Duration, threshold: Duration,
) -> String {
    let mut line = format!("{}{} {label}", Indent(depth), glyphs.success());
    if elapsed >= threshold {
        line.push_str(&format!(" (took {}ms)", elapsed.as_millis()));
    }
    line
}

/// `✗ <label>: <error>`
pub(crate) fn failure_line(
    glyphs: &Glyphs, depth: usize, label: &str, error: &dyn std::error::Error,
) -> String {
    format!("{}{} {label}: {error}", Indent(depth), glyphs.failure())
}

/// `✓ <text>` for an accomplishment.
pub(crate) fn accomplishment_line(glyphs: &Glyphs, depth: usize, text: &str) -> String {
    format!("{}{} {text}", Indent(depth), glyphs.success())
}
