//! Canvas abstraction over the physical LED matrix
//!
//! This module provides the [`Canvas`] trait, the capability set the
//! animation core needs from a chained 8-row LED matrix. The concrete
//! [`Max7219`](crate::interface::Max7219) driver implements it over SPI;
//! tests implement it over plain memory.
//!
//! ## Coordinate model
//!
//! The canvas is `device_count() * 8` columns wide and 8 rows tall.
//! Column 0 is the entry edge where the scroll engine inserts new columns;
//! [`Canvas::shift_left`] moves every column one position away from that
//! edge. Within a column byte, bit `r` is row `r`, top row first.
//!
//! ## Buffered updates
//!
//! `set_buffered(true)` suspends hardware commits so a renderer can issue
//! several column or row writes that appear as one atomic frame when
//! `set_buffered(false)` re-enables commits. Implementations without a
//! framebuffer may treat both calls as no-ops.

use core::fmt::Debug;

use crate::font;

/// Capability set required from the physical display
///
/// All drawing performed by the mode renderers and the scroll engine goes
/// through this trait. Implementations are expected to ignore writes to
/// out-of-range columns rather than fail; sprites deliberately walk in
/// from off-screen positions.
pub trait Canvas {
    /// Error type for canvas operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Number of chained 8x8 devices
    fn device_count(&self) -> usize;

    /// Total column count of the canvas
    fn column_count(&self) -> i16 {
        (self.device_count() * 8) as i16
    }

    /// Blank the entire canvas
    ///
    /// # Errors
    ///
    /// Returns an error if the hardware write fails.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Write an 8-pixel column pattern
    ///
    /// Bit `r` of `bits` is row `r`. Writes outside `0..column_count()`
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the hardware write fails.
    fn set_column(&mut self, column: i16, bits: u8) -> Result<(), Self::Error>;

    /// Write an 8-pixel row pattern on one device
    ///
    /// Writes with `device >= device_count()` or `row >= 8` are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the hardware write fails.
    fn set_row(&mut self, device: usize, row: u8, bits: u8) -> Result<(), Self::Error>;

    /// Shift the whole canvas one column away from the entry edge
    ///
    /// Column `c` moves to `c + 1`; the last column falls off and column 0
    /// becomes blank.
    ///
    /// # Errors
    ///
    /// Returns an error if the hardware write fails.
    fn shift_left(&mut self) -> Result<(), Self::Error>;

    /// Enable or disable buffered updates
    ///
    /// While buffered, writes accumulate without reaching the hardware;
    /// disabling commits everything accumulated as one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit on disable fails.
    fn set_buffered(&mut self, buffered: bool) -> Result<(), Self::Error>;

    /// Set display intensity, 0..=15
    ///
    /// Values above 15 are clamped by the implementation.
    ///
    /// # Errors
    ///
    /// Returns an error if the hardware write fails.
    fn set_intensity(&mut self, intensity: u8) -> Result<(), Self::Error>;

    /// Resolve a character's column bitmap from the built-in font
    ///
    /// Fills `columns` from index 0 and returns the number of columns used.
    fn glyph_columns(&self, ch: u8, columns: &mut [u8; 8]) -> u8 {
        font::glyph(ch, columns)
    }
}
