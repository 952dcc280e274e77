//! Non-blocking text scroller
//!
//! This module provides [`Scroller`], a re-entrant scroll session that
//! pushes a message across the canvas one column per step. It never
//! blocks: [`Scroller::step`] returns immediately when called before the
//! inter-column delay has elapsed, so it can be driven from a tick loop
//! alongside other work.
//!
//! A session walks a three-phase state machine per glyph: fetch the next
//! character's column bitmap, emit its columns one per step at the entry
//! edge, then emit spacer columns. The spacer is a single blank column
//! between characters; after the last character it widens to
//! `column_count() - 1` columns so the final glyph scrolls fully off the
//! visible grid before the session reports done.

use heapless::Vec;

use crate::canvas::Canvas;
use crate::error::MAX_MESSAGE_LEN;

/// Per-glyph emission phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Fetch the next character, or finish when the text is exhausted
    Fetch,
    /// Emit the fetched glyph's columns
    Glyph,
    /// Emit blank spacer columns
    Spacer,
}

/// A restartable scroll session
///
/// Created once and reused: [`start`](Self::start) begins a fresh session
/// at any time, discarding in-flight progress. Callers loop a message by
/// calling `start` again whenever [`step`](Self::step) reports done.
#[derive(Debug)]
pub struct Scroller {
    /// Message bytes for the current session
    text: Vec<u8, MAX_MESSAGE_LEN>,
    /// Next character to fetch
    cursor: usize,
    /// Current emission phase
    phase: Phase,
    /// Column bitmap of the fetched glyph
    glyph: [u8; 8],
    /// Columns in the current run (glyph width or spacer width)
    run_len: u16,
    /// Columns of the current run already emitted
    run_pos: u16,
    /// Delay between effective steps in milliseconds
    delay_ms: u32,
    /// Timestamp of the last effective step
    last_ms: u32,
}

impl Scroller {
    /// Create a scroller with the given inter-column delay
    pub fn new(delay_ms: u32) -> Self {
        Self {
            text: Vec::new(),
            cursor: 0,
            phase: Phase::Fetch,
            glyph: [0; 8],
            run_len: 0,
            run_pos: 0,
            delay_ms,
            last_ms: 0,
        }
    }

    /// Begin a fresh session with a new message
    ///
    /// Copies the text (truncated to [`MAX_MESSAGE_LEN`] bytes), clears the
    /// canvas, resets the glyph state machine and timestamps `now_ms`. The
    /// first column appears one delay period later.
    ///
    /// # Errors
    ///
    /// Returns the canvas error if the clear fails.
    pub fn start<C: Canvas>(
        &mut self,
        text: &str,
        canvas: &mut C,
        now_ms: u32,
    ) -> Result<(), C::Error> {
        self.text.clear();
        self.text.extend(text.bytes().take(MAX_MESSAGE_LEN));
        self.cursor = 0;
        self.phase = Phase::Fetch;
        self.run_len = 0;
        self.run_pos = 0;
        self.last_ms = now_ms;
        canvas.clear()
    }

    /// Advance the session by at most one column
    ///
    /// Returns `Ok(true)` once the message has scrolled fully off the
    /// canvas; an empty message is done on the first effective step. Until
    /// the inter-column delay has elapsed since the last effective step the
    /// call changes nothing and returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns the canvas error if a write fails.
    pub fn step<C: Canvas>(&mut self, canvas: &mut C, now_ms: u32) -> Result<bool, C::Error> {
        if now_ms.wrapping_sub(self.last_ms) < self.delay_ms {
            return Ok(false);
        }
        self.last_ms = now_ms;

        canvas.shift_left()?;

        if self.phase == Phase::Fetch {
            let Some(&ch) = self.text.get(self.cursor) else {
                return Ok(true);
            };
            self.cursor += 1;
            self.run_len = u16::from(canvas.glyph_columns(ch, &mut self.glyph));
            self.run_pos = 0;
            // Falls through so the first glyph column lands on this step
            self.phase = Phase::Glyph;
        }

        match self.phase {
            Phase::Glyph => {
                canvas.set_column(0, self.glyph[usize::from(self.run_pos % 8)])?;
                self.run_pos += 1;
                if self.run_pos >= self.run_len {
                    self.run_len = if self.cursor < self.text.len() {
                        1
                    } else {
                        (canvas.column_count() as u16).saturating_sub(1)
                    };
                    self.run_pos = 0;
                    self.phase = Phase::Spacer;
                }
            }
            Phase::Spacer => {
                canvas.set_column(0, 0)?;
                self.run_pos += 1;
                if self.run_pos >= self.run_len {
                    self.phase = Phase::Fetch;
                }
            }
            Phase::Fetch => {}
        }

        Ok(false)
    }
}
