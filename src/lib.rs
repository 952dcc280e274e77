//! Stress-Level LED Matrix Animation Driver
//!
//! A driver for showing wearer stress levels on a chain of MAX7219 8x8 LED
//! dot-matrix modules. Five animations map to five levels, from a boot
//! banner through heartbeats to a full-panel alarm, all driven by a
//! non-blocking tick model suitable for a bare-metal main loop.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Configurable chain length, timings, intensities and messages
//! - Built-in 5x7 scrolling font
//! - Hardware abstracted behind the [`Canvas`] trait for host-side testing
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use stressled::{Builder, Max7219, StressDisplay};
//!
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
//! # fn millis() -> u32 { 0 }
//! # let spi = MockSpi;
//! let mut matrix: Max7219<_, 4> = Max7219::new(spi);
//! if matrix.init().is_err() {
//!     return;
//! }
//!
//! let config = match Builder::new().intensity(8).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = StressDisplay::new(matrix, config);
//! let _ = display.set_level(1);
//! loop {
//!     let _ = display.tick(millis());
//!     # break;
//! }
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Canvas abstraction over the LED matrix chain
pub mod canvas;
/// MAX7219 register definitions
pub mod command;
/// Animation configuration types and builder
pub mod config;
/// Top-level animation controller
pub mod display;
/// Error types for the driver
pub mod error;
/// Built-in 5x7 scrolling font
pub mod font;
/// MAX7219 chain driver
pub mod interface;
/// Per-level animation renderers
pub mod modes;
/// Sprite bitmaps
pub mod pattern;
/// Non-blocking text scroller
pub mod scroll;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use canvas::Canvas;
pub use config::{Builder, Config};
pub use display::{Level, StressDisplay};
pub use error::{BuilderError, MAX_INTENSITY, MAX_MESSAGE_LEN};
pub use interface::{DEFAULT_INTENSITY, MAX_DEVICES, Max7219};
pub use scroll::Scroller;
