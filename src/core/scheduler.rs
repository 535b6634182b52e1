//! Typed-output animation.
//!
//! [`OutputScheduler`] turns text into a queue of character reveals. It never
//! sleeps itself: the host calls [`OutputScheduler::tick`] and waits for the
//! returned delay before the next call. The completion token handed to
//! [`OutputScheduler::write`] comes back exactly once, from the tick that
//! reveals the final character.

use std::collections::VecDeque;

/// One step of a reveal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tick<C> {
    /// A character was revealed; wait `delay_ms` before the next tick.
    Reveal { ch: char, delay_ms: u32 },
    /// The final character was revealed and the reveal is over.
    Finished { ch: char, completion: C },
}

/// Outcome of [`OutputScheduler::write`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Write<C> {
    /// Characters are queued; drive them with `tick`.
    Started,
    /// Nothing to reveal; the completion fires immediately.
    Completed(C),
}

#[derive(Debug)]
struct Reveal<C> {
    chars: VecDeque<char>,
    completion: C,
}

#[derive(Debug)]
pub struct OutputScheduler<C> {
    queue: VecDeque<Reveal<C>>,
    char_delay_ms: u32,
}

impl<C> OutputScheduler<C> {
    pub fn new(char_delay_ms: u32) -> Self {
        Self {
            queue: VecDeque::new(),
            char_delay_ms,
        }
    }

    /// Whether characters are still waiting to be revealed.
    pub fn is_writing(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Queue `text` for reveal. Line endings are normalized to `\r\n`.
    ///
    /// Reveals queue up behind one another; empty text completes at once.
    pub fn write(&mut self, text: &str, completion: C) -> Write<C> {
        let chars: VecDeque<char> = normalize_line_endings(text).chars().collect();
        if chars.is_empty() {
            return Write::Completed(completion);
        }
        self.queue.push_back(Reveal { chars, completion });
        Write::Started
    }

    /// Reveal the next character, if any.
    pub fn tick(&mut self) -> Option<Tick<C>> {
        let reveal = self.queue.front_mut()?;
        let ch = reveal.chars.pop_front()?;

        if reveal.chars.is_empty() {
            let finished = self.queue.pop_front()?;
            return Some(Tick::Finished {
                ch,
                completion: finished.completion,
            });
        }

        // Line breaks are not paced, so multi-line blocks do not lag
        let delay_ms = if ch == '\r' || ch == '\n' {
            0
        } else {
            self.char_delay_ms
        };
        Some(Tick::Reveal { ch, delay_ms })
    }

    /// Drop everything still queued. Used when the host surface goes away.
    pub fn cancel(&mut self) {
        self.queue.clear();
    }
}

/// Convert every line ending to `\r\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\r\n")
}
