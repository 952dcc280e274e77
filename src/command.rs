//! MAX7219 register definitions
//!
//! This module defines the register addresses used to control the MAX7219
//! LED display driver. Each register write is a 16-bit frame: the register
//! address byte followed by the data byte. In a chained configuration one
//! frame per device is shifted through the chain and latched together.
//!
//! ## Frame Structure
//!
//! 1. Assert CS (load pin low)
//! 2. Shift one `[address, data]` pair per device, furthest device first
//! 3. Deassert CS to latch all devices at once
//!
//! ## Example
//!
//! ```rust
//! use stressled::command;
//!
//! // Frame waking a single device out of shutdown
//! let frame = [command::SHUTDOWN, command::SHUTDOWN_NORMAL];
//! # let _ = frame;
//! ```

// Control registers

/// No-op register (0x00)
///
/// Used as padding when addressing a single device in a chain; the other
/// devices receive a no-op frame and keep their state.
pub const NOOP: u8 = 0x00;

/// First digit register (0x01)
///
/// Digits 0 through 7 live at 0x01..=0x08 and hold one 8-bit row each.
/// Row `r` of a device is addressed as `DIGIT0 + r`.
pub const DIGIT0: u8 = 0x01;

/// Decode mode register (0x09)
///
/// Selects BCD decoding per digit. Matrix use requires raw segment data,
/// so this is always written as [`DECODE_NONE`].
pub const DECODE_MODE: u8 = 0x09;

/// Intensity register (0x0A)
///
/// Sets the PWM brightness duty cycle. Accepts 0x00 (minimum) to 0x0F
/// (maximum); upper bits are ignored by the device.
pub const INTENSITY: u8 = 0x0A;

/// Scan limit register (0x0B)
///
/// Number of digits (rows) scanned, minus one. Matrix use drives all
/// eight rows, so this is always written as [`SCAN_ALL_DIGITS`].
pub const SCAN_LIMIT: u8 = 0x0B;

/// Shutdown register (0x0C)
///
/// 0x00 puts the device in shutdown (display blank, registers retained),
/// 0x01 resumes normal operation.
pub const SHUTDOWN: u8 = 0x0C;

/// Display test register (0x0F)
///
/// 0x01 lights every LED regardless of register contents; 0x00 returns
/// to normal operation.
pub const DISPLAY_TEST: u8 = 0x0F;

// Register data values

/// Decode mode data: no BCD decoding on any digit
pub const DECODE_NONE: u8 = 0x00;

/// Scan limit data: scan all eight digits
pub const SCAN_ALL_DIGITS: u8 = 0x07;

/// Shutdown register data: shutdown mode
pub const SHUTDOWN_OFF: u8 = 0x00;

/// Shutdown register data: normal operation
pub const SHUTDOWN_NORMAL: u8 = 0x01;

/// Display test data: normal operation
pub const DISPLAY_TEST_OFF: u8 = 0x00;
