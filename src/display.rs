//! Top-level animation controller
//!
//! [`StressDisplay`] owns a [`Canvas`], a [`Config`] and one renderer per
//! stress level. Callers feed it raw level readings through
//! [`set_level`](StressDisplay::set_level) and drive the active animation
//! with [`tick`](StressDisplay::tick) from their main loop. Neither call
//! blocks; all pacing happens against the millisecond clock the caller
//! passes in.

use crate::canvas::Canvas;
use crate::config::Config;
use crate::modes::{BootMode, HighStressMode, MildMode, RelaxedMode, StressedMode};
use crate::scroll::Scroller;

/// Stress level of the wearer, as shown on the display
///
/// Produced from raw sensor readings with [`Level::from_raw`]. Each level
/// maps to exactly one animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// No reading yet, show the boot banner
    Boot,
    /// Calm; slow mirrored heartbeat
    Relaxed,
    /// Mildly elevated; fast full-tile heartbeat
    Mild,
    /// Elevated; invader walk plus warning message
    Stressed,
    /// Critical; pulsing alarm plus urgent message
    HighStress,
}

impl Level {
    /// Map a raw reading to a level, clamping out-of-range values to
    /// [`Level::HighStress`]
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Boot,
            1 => Self::Relaxed,
            2 => Self::Mild,
            3 => Self::Stressed,
            _ => Self::HighStress,
        }
    }
}

/// Non-blocking stress-level animation driver
///
/// Generic over any [`Canvas`], so the same controller runs against real
/// hardware through [`Max7219`](crate::interface::Max7219) or against a
/// memory-only canvas in tests.
///
/// ```
/// # use stressled::{Builder, Canvas, StressDisplay};
/// # #[derive(Debug)]
/// # struct MemoryCanvas;
/// # impl Canvas for MemoryCanvas {
/// #     type Error = core::convert::Infallible;
/// #     fn device_count(&self) -> usize { 4 }
/// #     fn clear(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_column(&mut self, _: i16, _: u8) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_row(&mut self, _: usize, _: u8, _: u8) -> Result<(), Self::Error> { Ok(()) }
/// #     fn shift_left(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_buffered(&mut self, _: bool) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_intensity(&mut self, _: u8) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # fn main() -> Result<(), core::convert::Infallible> {
/// let config = Builder::new().intensity(10).build().unwrap();
/// let mut display = StressDisplay::new(MemoryCanvas, config);
/// display.init()?;
///
/// display.set_level(2)?;
/// loop {
///     let now_ms = 0; // read a millisecond clock here
///     display.tick(now_ms)?;
///     # break;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StressDisplay<C: Canvas> {
    canvas: C,
    config: Config,
    scroller: Scroller,
    level: Option<Level>,
    reinit: bool,
    boot: BootMode,
    relaxed: RelaxedMode,
    mild: MildMode,
    stressed: StressedMode,
    high_stress: HighStressMode,
}

impl<C: Canvas> StressDisplay<C> {
    /// Create a controller over the given canvas
    ///
    /// No animation runs until the first [`set_level`](Self::set_level)
    /// call; until then [`tick`](Self::tick) is a no-op.
    pub fn new(canvas: C, config: Config) -> Self {
        let scroller = Scroller::new(config.scroll_delay_ms);
        Self {
            canvas,
            config,
            scroller,
            level: None,
            reinit: false,
            boot: BootMode::default(),
            relaxed: RelaxedMode::default(),
            mild: MildMode::default(),
            stressed: StressedMode::default(),
            high_stress: HighStressMode::default(),
        }
    }

    /// Apply the configured intensity and blank the canvas
    ///
    /// # Errors
    ///
    /// Returns the canvas error if a write fails.
    pub fn init(&mut self) -> Result<(), C::Error> {
        self.canvas.set_intensity(self.config.intensity)?;
        self.canvas.clear()
    }

    /// Current level, if one has been set
    pub fn level(&self) -> Option<Level> {
        self.level
    }

    /// Feed a raw level reading
    ///
    /// Readings outside 0..=4 clamp to the highest level. Setting the level
    /// already shown changes nothing; a different level blanks the canvas
    /// and restarts its animation from the beginning on the next
    /// [`tick`](Self::tick).
    ///
    /// # Errors
    ///
    /// Returns the canvas error if the clear fails.
    pub fn set_level(&mut self, raw: u8) -> Result<(), C::Error> {
        let level = Level::from_raw(raw);
        if self.level == Some(level) {
            return Ok(());
        }
        log::debug!("stress level changed to {level:?} (raw {raw})");
        self.level = Some(level);
        self.reinit = true;
        self.canvas.set_intensity(self.config.intensity)?;
        self.canvas.clear()
    }

    /// Advance the active animation by one step
    ///
    /// Cheap to call at any rate; renderers skip work until their own
    /// delays have elapsed against `now_ms`. The clock may wrap.
    ///
    /// # Errors
    ///
    /// Returns the canvas error if a write fails.
    pub fn tick(&mut self, now_ms: u32) -> Result<(), C::Error> {
        let Some(level) = self.level else {
            return Ok(());
        };
        let reinit = self.reinit;
        self.reinit = false;
        match level {
            Level::Boot => self.boot.step(
                &mut self.canvas,
                &mut self.scroller,
                &self.config,
                now_ms,
                reinit,
            ),
            Level::Relaxed => self
                .relaxed
                .step(&mut self.canvas, &self.config, now_ms, reinit),
            Level::Mild => self
                .mild
                .step(&mut self.canvas, &self.config, now_ms, reinit),
            Level::Stressed => self.stressed.step(
                &mut self.canvas,
                &mut self.scroller,
                &self.config,
                now_ms,
                reinit,
            ),
            Level::HighStress => self.high_stress.step(
                &mut self.canvas,
                &mut self.scroller,
                &self.config,
                now_ms,
                reinit,
            ),
        }
    }

    /// Blank the canvas and forget the current level
    ///
    /// The next [`set_level`](Self::set_level) call restarts from scratch,
    /// even with the same reading.
    ///
    /// # Errors
    ///
    /// Returns the canvas error if the clear fails.
    pub fn reset(&mut self) -> Result<(), C::Error> {
        self.level = None;
        self.reinit = false;
        self.canvas.clear()
    }

    /// Consume the controller and return the canvas
    pub fn release(self) -> C {
        self.canvas
    }
}
