//! In-memory text grid behind the terminal view.
//!
//! [`Screen`] interprets the small set of control characters the engine
//! emits: `\r` returns to column 0, `\n` starts a new line, `\x08` moves the
//! cursor one cell left. Any other character overwrites the cell under the
//! cursor. Finished lines go into a bounded scrollback.

use crate::config::MAX_SCROLLBACK_LINES;
use crate::core::Surface;
use crate::utils::RingBuffer;

#[derive(Clone, Debug)]
pub struct Screen {
    scrollback: RingBuffer<String>,
    line: Vec<char>,
    cursor: usize,
}

impl Screen {
    pub fn new() -> Self {
        Self::with_scrollback(MAX_SCROLLBACK_LINES)
    }

    pub fn with_scrollback(lines: usize) -> Self {
        Self {
            scrollback: RingBuffer::new(lines),
            line: Vec::new(),
            cursor: 0,
        }
    }

    /// Finished lines, oldest first.
    pub fn scrollback(&self) -> impl Iterator<Item = &str> {
        self.scrollback.iter().map(String::as_str)
    }

    /// The line holding the cursor.
    pub fn current_line(&self) -> String {
        self.line.iter().collect()
    }

    /// The current line split around the cursor cell.
    ///
    /// The middle element is the character under the cursor, or a blank when
    /// the cursor sits past the end of the line.
    pub fn cursor_split(&self) -> (String, char, String) {
        let cursor = self.cursor.min(self.line.len());
        let under = self.line.get(cursor).copied().unwrap_or(' ');
        let after = self.line.iter().skip(cursor + 1).collect();
        (self.line[..cursor].iter().collect(), under, after)
    }

    /// All visible lines with trailing blanks trimmed, joined by `\n`.
    pub fn text(&self) -> String {
        let current = self.current_line();
        self.scrollback()
            .chain(std::iter::once(current.as_str()))
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn put(&mut self, ch: char) {
        match ch {
            '\r' => self.cursor = 0,
            '\n' => {
                let finished: String = std::mem::take(&mut self.line).into_iter().collect();
                self.scrollback.push(finished);
                self.cursor = 0;
            }
            '\x08' => self.cursor = self.cursor.saturating_sub(1),
            ch => {
                match self.line.get_mut(self.cursor) {
                    Some(cell) => *cell = ch,
                    None => self.line.push(ch),
                }
                self.cursor += 1;
            }
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for Screen {
    fn write(&mut self, text: &str) {
        text.chars().for_each(|ch| self.put(ch));
    }

    fn clear(&mut self) {
        self.scrollback.clear();
        self.line.clear();
        self.cursor = 0;
    }
}
