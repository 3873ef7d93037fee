//! Line prefixing writer.

use std::{fmt, mem};

/// A sink that indents the continuation lines of a node label.
///
/// The first line is never prefixed: it continues whatever the renderer already put on the
/// current line.
pub(crate) struct LineWriter<'a, W> {
    /// Writer.
    writer: &'a mut W,
    /// Prefix for continuation lines.
    prefix: &'a str,
    /// Whether the cursor is at the head of a continuation line with no prefix written yet.
    at_line_head: bool,
}

impl<'a, W: fmt::Write> LineWriter<'a, W> {
    /// Creates a new `LineWriter`.
    pub(crate) fn new(writer: &'a mut W, prefix: &'a str) -> Self {
        Self {
            writer,
            prefix,
            at_line_head: false,
        }
    }
}

impl<'a, W: fmt::Write> fmt::Write for LineWriter<'a, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for (line, at_last_line) in lines_with_last_line_flag(s) {
            // Delay the emission of the prefix until the line content is given.
            if !line.is_empty() && mem::replace(&mut self.at_line_head, false) {
                self.writer.write_str(self.prefix)?;
            }

            self.writer.write_str(line)?;

            if !at_last_line {
                self.writer.write_char('\n')?;
                self.at_line_head = true;
            }
        }

        Ok(())
    }
}

/// Returns an iterator of `\n`-separated pieces with "last piece" flag.
///
/// Unlike `<str>::lines()`, a trailing `\r` is kept in the piece and a trailing `\n` yields
/// an empty last piece, so writing every piece with `\n` between them reproduces `s`.
fn lines_with_last_line_flag(s: &str) -> impl Iterator<Item = (&str, bool)> {
    let mut pieces = s.split('\n').peekable();

    std::iter::from_fn(move || {
        let piece = pieces.next()?;
        Some((piece, pieces.peek().is_none()))
    })
}
