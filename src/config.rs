//! Animation configuration types and builder

pub use crate::error::{BuilderError, MAX_INTENSITY, MAX_MESSAGE_LEN};

/// Animation configuration
///
/// This struct holds the timing constants, brightness levels and scroll
/// messages used by the mode renderers. Use [`Builder`] to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Default display intensity set on init (0..=15)
    pub intensity: u8,
    /// Intensity used while the relaxed heartbeat is drawn (0..=15)
    pub relaxed_intensity: u8,
    /// Delay between scroll engine steps in milliseconds
    pub scroll_delay_ms: u32,
    /// Period of the relaxed heartbeat toggle in milliseconds
    pub relaxed_beat_ms: u32,
    /// Period of the mild-stress heartbeat toggle in milliseconds
    pub mild_beat_ms: u32,
    /// Delay between invader walk steps in milliseconds
    pub invader_delay_ms: u32,
    /// Delay between intensity fade steps in milliseconds
    pub fade_delay_ms: u32,
    /// Duration of the high-stress fade phase in milliseconds
    pub fade_window_ms: u32,
    /// Message scrolled in boot mode
    pub boot_message: &'static str,
    /// Warning message scrolled after the invader walk
    pub stressed_message: &'static str,
    /// Urgent message scrolled between high-stress fades
    pub high_stress_message: &'static str,
}

/// Builder for constructing animation configuration
///
/// # Example
///
/// ```rust
/// use stressled::Builder;
///
/// let config = match Builder::new().intensity(4).boot_message("HELLO").build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    /// Default display intensity set on init
    intensity: u8,
    /// Intensity used while the relaxed heartbeat is drawn
    relaxed_intensity: u8,
    /// Delay between scroll engine steps in milliseconds
    scroll_delay_ms: u32,
    /// Period of the relaxed heartbeat toggle in milliseconds
    relaxed_beat_ms: u32,
    /// Period of the mild-stress heartbeat toggle in milliseconds
    mild_beat_ms: u32,
    /// Delay between invader walk steps in milliseconds
    invader_delay_ms: u32,
    /// Delay between intensity fade steps in milliseconds
    fade_delay_ms: u32,
    /// Duration of the high-stress fade phase in milliseconds
    fade_window_ms: u32,
    /// Message scrolled in boot mode
    boot_message: &'static str,
    /// Warning message scrolled after the invader walk
    stressed_message: &'static str,
    /// Urgent message scrolled between high-stress fades
    high_stress_message: &'static str,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            intensity: 8,
            relaxed_intensity: 5,
            scroll_delay_ms: 2,
            relaxed_beat_ms: 1000,
            mild_beat_ms: 25,
            invader_delay_ms: 5,
            fade_delay_ms: 5,
            fade_window_ms: 800,
            boot_message: "STRESS INDICATOR  CHECK YOURS",
            stressed_message: "Oh No! You are STRESSED  Relax",
            high_stress_message: "HIGH STRESS!   CALM DOWN",
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default display intensity (0..=15)
    pub fn intensity(mut self, value: u8) -> Self {
        self.intensity = value;
        self
    }

    /// Set the intensity used while the relaxed heartbeat is drawn (0..=15)
    pub fn relaxed_intensity(mut self, value: u8) -> Self {
        self.relaxed_intensity = value;
        self
    }

    /// Set the delay between scroll engine steps in milliseconds
    pub fn scroll_delay_ms(mut self, value: u32) -> Self {
        self.scroll_delay_ms = value;
        self
    }

    /// Set the period of the relaxed heartbeat toggle in milliseconds
    pub fn relaxed_beat_ms(mut self, value: u32) -> Self {
        self.relaxed_beat_ms = value;
        self
    }

    /// Set the period of the mild-stress heartbeat toggle in milliseconds
    pub fn mild_beat_ms(mut self, value: u32) -> Self {
        self.mild_beat_ms = value;
        self
    }

    /// Set the delay between invader walk steps in milliseconds
    pub fn invader_delay_ms(mut self, value: u32) -> Self {
        self.invader_delay_ms = value;
        self
    }

    /// Set the delay between intensity fade steps in milliseconds
    pub fn fade_delay_ms(mut self, value: u32) -> Self {
        self.fade_delay_ms = value;
        self
    }

    /// Set the duration of the high-stress fade phase in milliseconds
    pub fn fade_window_ms(mut self, value: u32) -> Self {
        self.fade_window_ms = value;
        self
    }

    /// Set the message scrolled in boot mode
    pub fn boot_message(mut self, message: &'static str) -> Self {
        self.boot_message = message;
        self
    }

    /// Set the warning message scrolled after the invader walk
    pub fn stressed_message(mut self, message: &'static str) -> Self {
        self.stressed_message = message;
        self
    }

    /// Set the urgent message scrolled between high-stress fades
    pub fn high_stress_message(mut self, message: &'static str) -> Self {
        self.high_stress_message = message;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidIntensity` if either intensity exceeds
    /// [`MAX_INTENSITY`], or `BuilderError::MessageTooLong` if a message does
    /// not fit the scroll buffer.
    pub fn build(self) -> Result<Config, BuilderError> {
        for intensity in [self.intensity, self.relaxed_intensity] {
            if intensity > MAX_INTENSITY {
                return Err(BuilderError::InvalidIntensity {
                    provided: intensity,
                });
            }
        }
        for message in [
            self.boot_message,
            self.stressed_message,
            self.high_stress_message,
        ] {
            if message.len() > MAX_MESSAGE_LEN {
                return Err(BuilderError::MessageTooLong {
                    max: MAX_MESSAGE_LEN,
                    provided: message.len(),
                });
            }
        }
        Ok(Config {
            intensity: self.intensity,
            relaxed_intensity: self.relaxed_intensity,
            scroll_delay_ms: self.scroll_delay_ms,
            relaxed_beat_ms: self.relaxed_beat_ms,
            mild_beat_ms: self.mild_beat_ms,
            invader_delay_ms: self.invader_delay_ms,
            fade_delay_ms: self.fade_delay_ms,
            fade_window_ms: self.fade_window_ms,
            boot_message: self.boot_message,
            stressed_message: self.stressed_message,
            high_stress_message: self.high_stress_message,
        })
    }
}
