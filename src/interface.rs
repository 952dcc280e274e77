//! MAX7219 chain driver
//!
//! This module provides [`Max7219`], a framebuffer-backed driver for a
//! daisy-chain of MAX7219 8x8 LED matrix devices, and its [`Canvas`]
//! implementation used by the animation core.
//!
//! ## Hardware Requirements
//!
//! The MAX7219 takes a 3-wire serial input (DIN + CLK + LOAD). With
//! `embedded-hal` v1.0 that maps onto a [`SpiDevice`] whose chip select
//! drives LOAD: one SPI transaction shifts a register frame per device
//! through the chain and latches them together on CS release.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use stressled::{Canvas, Max7219};
//! # use core::convert::Infallible;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! // Four chained 8x8 tiles, 32 columns total
//! let mut matrix: Max7219<_, 4> = Max7219::new(MockSpi);
//! let _ = matrix.init();
//! let _ = matrix.set_column(0, 0b0001_1000);
//! ```

use embedded_hal::spi::SpiDevice;

use crate::canvas::Canvas;
use crate::command::{
    DECODE_MODE, DECODE_NONE, DIGIT0, DISPLAY_TEST, DISPLAY_TEST_OFF, INTENSITY, SCAN_ALL_DIGITS,
    SCAN_LIMIT, SHUTDOWN, SHUTDOWN_NORMAL, SHUTDOWN_OFF,
};
use crate::error::MAX_INTENSITY;

/// Intensity written by [`Max7219::init`]
pub const DEFAULT_INTENSITY: u8 = 8;

/// Maximum number of chained devices supported by this driver
pub const MAX_DEVICES: usize = 8;

/// Framebuffer-backed driver for a MAX7219 chain
///
/// The driver mirrors the chain's digit registers in a per-device row
/// buffer. Writes update the buffer and, unless buffered mode is active,
/// immediately flush the affected rows to the hardware. Each flushed row
/// is one SPI transaction covering the whole chain, so partial frames are
/// never latched.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`], CS wired to LOAD
/// * `DEVICES` - Number of chained devices, 1..=[`MAX_DEVICES`]
pub struct Max7219<SPI, const DEVICES: usize> {
    /// SPI device for communication
    spi: SPI,
    /// Row mirror, `framebuffer[device][row]`, bit 7 = column 0 of the device
    framebuffer: [[u8; 8]; DEVICES],
    /// Rows awaiting a flush, bit `r` = row `r` on any device
    dirty_rows: u8,
    /// Whether flushes are currently suspended
    buffered: bool,
}

impl<SPI, const DEVICES: usize> Max7219<SPI, DEVICES>
where
    SPI: SpiDevice,
{
    /// Create a new driver over an SPI device
    ///
    /// The chain is not touched until [`init`](Self::init) is called.
    pub fn new(spi: SPI) -> Self {
        const {
            assert!(DEVICES >= 1 && DEVICES <= MAX_DEVICES);
        }
        Self {
            spi,
            framebuffer: [[0; 8]; DEVICES],
            dirty_rows: 0,
            buffered: false,
        }
    }

    /// Wake the chain and bring it to a known state
    ///
    /// Disables display test, scans all eight rows, disables BCD decode,
    /// leaves shutdown, sets [`DEFAULT_INTENSITY`] and blanks every tile.
    ///
    /// # Errors
    ///
    /// Returns the SPI error if any transaction fails.
    pub fn init(&mut self) -> Result<(), SPI::Error> {
        self.write_all(DISPLAY_TEST, DISPLAY_TEST_OFF)?;
        self.write_all(SCAN_LIMIT, SCAN_ALL_DIGITS)?;
        self.write_all(DECODE_MODE, DECODE_NONE)?;
        self.write_all(SHUTDOWN, SHUTDOWN_NORMAL)?;
        self.write_all(INTENSITY, DEFAULT_INTENSITY)?;
        self.framebuffer = [[0; 8]; DEVICES];
        self.flush_rows(0xFF)
    }

    /// Put every device in the chain into shutdown
    ///
    /// Register contents are retained; [`init`](Self::init) wakes the chain
    /// again.
    ///
    /// # Errors
    ///
    /// Returns the SPI error if the transaction fails.
    pub fn power_off(&mut self) -> Result<(), SPI::Error> {
        self.write_all(SHUTDOWN, SHUTDOWN_OFF)
    }

    /// Access the row mirror, `[device][row]`
    pub fn framebuffer(&self) -> &[[u8; 8]; DEVICES] {
        &self.framebuffer
    }

    /// Release the underlying SPI device
    pub fn release(self) -> SPI {
        self.spi
    }

    /// Set or clear one pixel in the row mirror without flushing
    #[cfg(feature = "graphics")]
    pub(crate) fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= DEVICES * 8 || y >= 8 {
            return;
        }
        let mask = 0x80 >> (x % 8);
        let row = &mut self.framebuffer[x / 8][y];
        if on {
            *row |= mask;
        } else {
            *row &= !mask;
        }
        self.dirty_rows |= 1 << y;
    }

    /// Flush dirty rows unless buffered mode is active
    pub(crate) fn commit(&mut self) -> Result<(), SPI::Error> {
        if self.buffered {
            return Ok(());
        }
        let rows = self.dirty_rows;
        self.flush_rows(rows)
    }

    /// Write the same register on every device in one transaction
    fn write_all(&mut self, register: u8, data: u8) -> Result<(), SPI::Error> {
        let mut frame = [0u8; 2 * MAX_DEVICES];
        for slot in 0..DEVICES {
            frame[2 * slot] = register;
            frame[2 * slot + 1] = data;
        }
        self.spi.write(&frame[..2 * DEVICES])
    }

    /// Write the mirrored contents of the selected rows to the chain
    ///
    /// One transaction per row; the frame for the furthest device is
    /// shifted first so it lands at the end of the chain.
    fn flush_rows(&mut self, rows: u8) -> Result<(), SPI::Error> {
        for row in 0..8u8 {
            if rows & (1 << row) == 0 {
                continue;
            }
            let mut frame = [0u8; 2 * MAX_DEVICES];
            for (slot, device) in (0..DEVICES).rev().enumerate() {
                frame[2 * slot] = DIGIT0 + row;
                frame[2 * slot + 1] = self.framebuffer[device][usize::from(row)];
            }
            self.spi.write(&frame[..2 * DEVICES])?;
            self.dirty_rows &= !(1 << row);
        }
        Ok(())
    }
}

impl<SPI, const DEVICES: usize> Canvas for Max7219<SPI, DEVICES>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;

    fn device_count(&self) -> usize {
        DEVICES
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.framebuffer = [[0; 8]; DEVICES];
        self.dirty_rows = 0xFF;
        self.commit()
    }

    fn set_column(&mut self, column: i16, bits: u8) -> Result<(), Self::Error> {
        if column < 0 || column >= self.column_count() {
            return Ok(());
        }
        let column = column as usize;
        let device = column / 8;
        let mask = 0x80 >> (column % 8);
        for row in 0..8 {
            if bits & (1 << row) != 0 {
                self.framebuffer[device][row] |= mask;
            } else {
                self.framebuffer[device][row] &= !mask;
            }
        }
        self.dirty_rows = 0xFF;
        self.commit()
    }

    fn set_row(&mut self, device: usize, row: u8, bits: u8) -> Result<(), Self::Error> {
        if device >= DEVICES || row >= 8 {
            return Ok(());
        }
        self.framebuffer[device][usize::from(row)] = bits;
        self.dirty_rows |= 1 << row;
        self.commit()
    }

    fn shift_left(&mut self) -> Result<(), Self::Error> {
        for row in 0..8 {
            let mut carry = 0u8;
            for device in 0..DEVICES {
                let bits = self.framebuffer[device][row];
                self.framebuffer[device][row] = (bits >> 1) | carry;
                carry = (bits & 0x01) << 7;
            }
        }
        self.dirty_rows = 0xFF;
        self.commit()
    }

    fn set_buffered(&mut self, buffered: bool) -> Result<(), Self::Error> {
        self.buffered = buffered;
        self.commit()
    }

    fn set_intensity(&mut self, intensity: u8) -> Result<(), Self::Error> {
        self.write_all(INTENSITY, intensity.min(MAX_INTENSITY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct MockSpi {
        writes: alloc::vec::Vec<alloc::vec::Vec<u8>>,
    }

    impl embedded_hal::spi::ErrorType for MockSpi {
        type Error = core::convert::Infallible;
    }

    impl SpiDevice for MockSpi {
        fn transaction(
            &mut self,
            operations: &mut [embedded_hal::spi::Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            for operation in operations {
                if let embedded_hal::spi::Operation::Write(data) = operation {
                    self.writes.push(data.to_vec());
                }
            }
            Ok(())
        }
    }

    fn chain() -> Max7219<MockSpi, 2> {
        Max7219::new(MockSpi::default())
    }

    #[test]
    fn test_init_broadcasts_setup_registers() {
        let mut matrix = chain();
        matrix.init().unwrap();

        let writes = &matrix.spi.writes;
        assert_eq!(writes[0], [DISPLAY_TEST, 0x00, DISPLAY_TEST, 0x00]);
        assert_eq!(writes[1], [SCAN_LIMIT, 0x07, SCAN_LIMIT, 0x07]);
        assert_eq!(writes[2], [DECODE_MODE, 0x00, DECODE_MODE, 0x00]);
        assert_eq!(writes[3], [SHUTDOWN, 0x01, SHUTDOWN, 0x01]);
        assert_eq!(writes[4], [INTENSITY, DEFAULT_INTENSITY, INTENSITY, DEFAULT_INTENSITY]);
        // 8 blank row flushes follow
        assert_eq!(writes.len(), 5 + 8);
    }

    #[test]
    fn test_set_row_flushes_whole_chain_row() {
        let mut matrix = chain();
        matrix.set_row(0, 2, 0xAA).unwrap();

        // Furthest device (index 1) is shifted first
        let last = matrix.spi.writes.last().unwrap();
        assert_eq!(last, &[DIGIT0 + 2, 0x00, DIGIT0 + 2, 0xAA]);
    }

    #[test]
    fn test_set_column_maps_device_and_bit() {
        let mut matrix = chain();
        matrix.set_column(9, 0b0000_0101).unwrap();

        // Column 9 is device 1, second bit from the left
        assert_eq!(matrix.framebuffer()[1][0], 0x40);
        assert_eq!(matrix.framebuffer()[1][1], 0x00);
        assert_eq!(matrix.framebuffer()[1][2], 0x40);
        assert_eq!(matrix.framebuffer()[0], [0; 8]);
    }

    #[test]
    fn test_set_column_out_of_range_is_ignored() {
        let mut matrix = chain();
        matrix.set_column(-3, 0xFF).unwrap();
        matrix.set_column(16, 0xFF).unwrap();

        assert!(matrix.spi.writes.is_empty());
        assert_eq!(matrix.framebuffer(), &[[0; 8]; 2]);
    }

    #[test]
    fn test_shift_left_carries_across_device_boundary() {
        let mut matrix = chain();
        // Last column of device 0 holds a full column
        matrix.set_column(7, 0xFF).unwrap();
        matrix.shift_left().unwrap();

        for row in 0..8 {
            assert_eq!(matrix.framebuffer()[0][row], 0x00);
            assert_eq!(matrix.framebuffer()[1][row], 0x80);
        }
    }

    #[test]
    fn test_buffered_mode_defers_flush() {
        let mut matrix = chain();
        matrix.set_buffered(true).unwrap();
        matrix.set_row(0, 0, 0xFF).unwrap();
        matrix.set_row(1, 3, 0x0F).unwrap();
        assert!(matrix.spi.writes.is_empty());

        matrix.set_buffered(false).unwrap();
        // Rows 0 and 3 flush, nothing else
        assert_eq!(matrix.spi.writes.len(), 2);
        assert_eq!(matrix.spi.writes[0], [DIGIT0, 0x00, DIGIT0, 0xFF]);
        assert_eq!(matrix.spi.writes[1], [DIGIT0 + 3, 0x0F, DIGIT0 + 3, 0x00]);
    }

    #[test]
    fn test_set_intensity_clamps_to_hardware_range() {
        let mut matrix = chain();
        matrix.set_intensity(99).unwrap();
        assert_eq!(
            matrix.spi.writes.last().unwrap(),
            &[INTENSITY, 0x0F, INTENSITY, 0x0F]
        );
    }

    #[test]
    fn test_power_off_broadcasts_shutdown() {
        let mut matrix = chain();
        matrix.power_off().unwrap();
        assert_eq!(
            matrix.spi.writes.last().unwrap(),
            &[SHUTDOWN, 0x00, SHUTDOWN, 0x00]
        );
    }
}
