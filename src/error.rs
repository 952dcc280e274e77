//! Error types for the driver
//!
//! This module defines [`BuilderError`], the error type raised while
//! constructing a [`Config`](crate::config::Config). Runtime display
//! operations have no error kinds of their own: invalid stress levels are
//! clamped rather than rejected, and hardware faults surface as the
//! [`Canvas`](crate::canvas::Canvas) implementation's own error type,
//! propagated unchanged.
//!
//! ## Example
//!
//! ```
//! use stressled::{Builder, BuilderError};
//!
//! // Intensity out of range
//! let result = Builder::new().intensity(20).build();
//! assert!(matches!(result, Err(BuilderError::InvalidIntensity { .. })));
//! ```

/// Maximum intensity (PWM duty step) accepted by the MAX7219
///
/// The intensity register has 16 steps, 0x00..=0x0F.
pub const MAX_INTENSITY: u8 = 15;

/// Maximum scroll message length in bytes
///
/// Messages are copied into a fixed-capacity buffer when a scroll session
/// starts; longer messages are rejected at configuration time.
pub const MAX_MESSAGE_LEN: usize = 128;

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Intensity value exceeds the hardware range
    ///
    /// See [`MAX_INTENSITY`].
    InvalidIntensity {
        /// Intensity value requested
        provided: u8,
    },
    /// A scroll message does not fit the scroll buffer
    ///
    /// See [`MAX_MESSAGE_LEN`].
    MessageTooLong {
        /// Maximum length in bytes
        max: usize,
        /// Length of the message provided
        provided: usize,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidIntensity { provided } => {
                write!(f, "Invalid intensity {provided} (max {MAX_INTENSITY})")
            }
            Self::MessageTooLong { max, provided } => {
                write!(f, "Message too long: {provided} bytes (max {max})")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
