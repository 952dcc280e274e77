//! Mode renderers
//!
//! One small state machine per visual mode, re-entered once per tick while
//! its mode is active. Renderers never block: every time-gated action
//! compares the caller's clock against a stored timestamp and simply skips
//! work when it is not yet due. The `reinit` flag passed into each step
//! tells the renderer to discard in-flight state and restart cleanly; it is
//! raised by the [`StressDisplay`](crate::display::StressDisplay) whenever
//! the stress level changes.
//!
//! Timestamps are back-dated on reinit so the first frame of a mode appears
//! promptly instead of waiting out a full period.

use crate::canvas::Canvas;
use crate::config::Config;
use crate::pattern::{
    HEART_EMPTY, HEART_FULL, HEART_HOLLOW, HEART_SOLID, INVADER_A, INVADER_B, INVADER_START,
};
use crate::scroll::Scroller;

/// Back-dating applied to the relaxed heartbeat timestamp on reinit, so the
/// first heart shows 700 ms after the mode becomes active instead of a full
/// second later.
const RELAXED_BACKDATE_MS: u32 = 300;

/// Boot banner: loops the boot message through the scroller forever
#[derive(Debug, Default)]
pub struct BootMode {
    /// Whether the next step must begin a fresh scroll session
    restart: bool,
}

impl BootMode {
    /// Advance the banner by one tick
    pub fn step<C: Canvas>(
        &mut self,
        canvas: &mut C,
        scroller: &mut Scroller,
        config: &Config,
        now_ms: u32,
        reinit: bool,
    ) -> Result<(), C::Error> {
        if reinit || self.restart {
            scroller.start(config.boot_message, canvas, now_ms)?;
            self.restart = false;
        }
        if scroller.step(canvas, now_ms)? {
            self.restart = true;
        }
        Ok(())
    }
}

/// Relaxed heartbeat: mirrored half-hearts centered on the inner tiles,
/// alternating outline and filled once a second
#[derive(Debug, Default)]
pub struct RelaxedMode {
    /// Whether the next frame shows the outline heart
    empty: bool,
    /// Timestamp of the last toggle
    last_ms: u32,
}

impl RelaxedMode {
    /// Advance the heartbeat by one tick
    pub fn step<C: Canvas>(
        &mut self,
        canvas: &mut C,
        config: &Config,
        now_ms: u32,
        reinit: bool,
    ) -> Result<(), C::Error> {
        if reinit {
            canvas.clear()?;
            self.empty = true;
            self.last_ms = now_ms.wrapping_sub(RELAXED_BACKDATE_MS);
        }

        if now_ms.wrapping_sub(self.last_ms) >= config.relaxed_beat_ms {
            canvas.set_buffered(true)?;
            canvas.set_intensity(config.relaxed_intensity)?;
            let pattern = if self.empty { &HEART_EMPTY } else { &HEART_FULL };
            // One heart centered on each interior tile boundary
            let offset = canvas.column_count() / 4;
            for heart in 1..=3 {
                for (i, &bits) in pattern.iter().enumerate() {
                    let i = i as i16;
                    canvas.set_column(heart * offset - 4 + i, bits)?;
                    canvas.set_column(heart * offset + 4 - i - 1, bits)?;
                }
            }
            canvas.set_buffered(false)?;
            self.empty = !self.empty;
            self.last_ms = now_ms;
        }
        Ok(())
    }
}

/// Mild-stress heartbeat: a full-tile heart on every device, pulsing between
/// solid and hollow
#[derive(Debug, Default)]
pub struct MildMode {
    /// Whether the next frame shows the hollow heart
    hollow: bool,
    /// Timestamp of the last toggle
    last_ms: u32,
}

impl MildMode {
    /// Advance the heartbeat by one tick
    pub fn step<C: Canvas>(
        &mut self,
        canvas: &mut C,
        config: &Config,
        now_ms: u32,
        reinit: bool,
    ) -> Result<(), C::Error> {
        if reinit {
            canvas.clear()?;
            self.hollow = false;
            self.last_ms = now_ms.wrapping_sub(config.mild_beat_ms);
        }

        if now_ms.wrapping_sub(self.last_ms) >= config.mild_beat_ms {
            let pattern = if self.hollow { &HEART_HOLLOW } else { &HEART_SOLID };
            for device in 0..canvas.device_count() {
                for (row, &bits) in pattern.iter().enumerate() {
                    canvas.set_row(device, row as u8, bits)?;
                }
            }
            self.hollow = !self.hollow;
            self.last_ms = now_ms;
        }
        Ok(())
    }
}

/// Sub-phase of the stressed alert
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StressedPhase {
    /// Invader sprite walking across the grid
    Walk,
    /// Warning message scrolling
    Scroll,
}

/// Stress alert: a two-frame invader walks across the grid, then a warning
/// message scrolls past, looping forever
#[derive(Debug)]
pub struct StressedMode {
    /// Current sub-phase
    phase: StressedPhase,
    /// Sprite center position in columns, starts off-screen
    position: i16,
    /// Whether the next walk frame is the alternate one
    alternate: bool,
    /// Whether the next scroll step must begin a fresh session
    start_scroll: bool,
    /// Timestamp of the last walk step
    last_ms: u32,
}

impl Default for StressedMode {
    fn default() -> Self {
        Self {
            phase: StressedPhase::Walk,
            position: INVADER_START,
            alternate: false,
            start_scroll: false,
            last_ms: 0,
        }
    }
}

impl StressedMode {
    /// Advance the alert by one tick
    pub fn step<C: Canvas>(
        &mut self,
        canvas: &mut C,
        scroller: &mut Scroller,
        config: &Config,
        now_ms: u32,
        reinit: bool,
    ) -> Result<(), C::Error> {
        if reinit {
            *self = Self::default();
            canvas.clear()?;
            self.last_ms = now_ms.wrapping_sub(config.invader_delay_ms);
        }

        match self.phase {
            StressedPhase::Walk => {
                if now_ms.wrapping_sub(self.last_ms) >= config.invader_delay_ms {
                    canvas.set_buffered(true)?;
                    canvas.clear()?;
                    let frame = if self.alternate { &INVADER_B } else { &INVADER_A };
                    for (i, &bits) in frame.iter().enumerate() {
                        let i = i as i16;
                        canvas.set_column(self.position - 5 + i, bits)?;
                        canvas.set_column(self.position + 5 - i - 1, bits)?;
                    }
                    canvas.set_buffered(false)?;
                    self.position += 1;
                    self.alternate = !self.alternate;
                    if self.position >= canvas.column_count() - INVADER_START {
                        log::trace!("invader walk finished, scrolling warning");
                        self.phase = StressedPhase::Scroll;
                        self.start_scroll = true;
                    }
                    self.last_ms = now_ms;
                }
            }
            StressedPhase::Scroll => {
                if self.start_scroll {
                    scroller.start(config.stressed_message, canvas, now_ms)?;
                    self.start_scroll = false;
                }
                if scroller.step(canvas, now_ms)? {
                    self.phase = StressedPhase::Walk;
                    self.position = INVADER_START;
                    self.alternate = false;
                    canvas.clear()?;
                    self.last_ms = now_ms.wrapping_sub(config.invader_delay_ms);
                }
            }
        }
        Ok(())
    }
}

/// Sub-phase of the high-stress alarm
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AlarmPhase {
    /// Full canvas with bouncing intensity
    Fade,
    /// Urgent message scrolling
    Scroll,
}

/// High-stress alarm: the whole canvas lights up and pulses its intensity
/// between full and dark for a fixed window, then an urgent message scrolls
/// past, looping forever
#[derive(Debug)]
pub struct HighStressMode {
    /// Current sub-phase
    phase: AlarmPhase,
    /// Current intensity, 0..=15
    intensity: u8,
    /// Whether intensity is currently stepping down
    falling: bool,
    /// Whether the next scroll step must begin a fresh session
    start_scroll: bool,
    /// Timestamp of the last fade step
    last_ms: u32,
    /// Timestamp of the start of the current fade window
    started_ms: u32,
}

impl Default for HighStressMode {
    fn default() -> Self {
        Self {
            phase: AlarmPhase::Fade,
            intensity: 15,
            falling: true,
            start_scroll: false,
            last_ms: 0,
            started_ms: 0,
        }
    }
}

impl HighStressMode {
    /// Advance the alarm by one tick
    pub fn step<C: Canvas>(
        &mut self,
        canvas: &mut C,
        scroller: &mut Scroller,
        config: &Config,
        now_ms: u32,
        reinit: bool,
    ) -> Result<(), C::Error> {
        if reinit {
            *self = Self::default();
            self.enter_fade(canvas, config, now_ms)?;
        }

        match self.phase {
            AlarmPhase::Fade => {
                if now_ms.wrapping_sub(self.last_ms) >= config.fade_delay_ms {
                    self.intensity = if self.falling {
                        self.intensity.saturating_sub(1)
                    } else {
                        (self.intensity + 1).min(15)
                    };
                    if self.intensity == 0 || self.intensity == 15 {
                        self.falling = !self.falling;
                    }
                    canvas.set_intensity(self.intensity)?;
                    self.last_ms = now_ms;
                }
                // Exclusive boundary: the window ends strictly after it elapses
                if now_ms.wrapping_sub(self.started_ms) > config.fade_window_ms {
                    log::trace!("fade window elapsed, scrolling alert");
                    self.phase = AlarmPhase::Scroll;
                    self.start_scroll = true;
                }
            }
            AlarmPhase::Scroll => {
                if self.start_scroll {
                    scroller.start(config.high_stress_message, canvas, now_ms)?;
                    self.start_scroll = false;
                }
                if scroller.step(canvas, now_ms)? {
                    self.phase = AlarmPhase::Fade;
                    self.intensity = 15;
                    self.falling = true;
                    self.enter_fade(canvas, config, now_ms)?;
                }
            }
        }
        Ok(())
    }

    /// Fill the canvas, restore full intensity and restart the fade window
    fn enter_fade<C: Canvas>(
        &mut self,
        canvas: &mut C,
        config: &Config,
        now_ms: u32,
    ) -> Result<(), C::Error> {
        canvas.set_buffered(true)?;
        for column in 0..canvas.column_count() {
            canvas.set_column(column, 0xFF)?;
        }
        canvas.set_buffered(false)?;
        canvas.set_intensity(self.intensity)?;
        self.started_ms = now_ms;
        self.last_ms = now_ms.wrapping_sub(config.fade_delay_ms);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;

    /// Canvas recording every operation a renderer performs.
    #[derive(Debug, Default)]
    struct MockCanvas {
        clears: usize,
        shifts: usize,
        columns: alloc::vec::Vec<(i16, u8)>,
        rows: alloc::vec::Vec<(usize, u8, u8)>,
        intensities: alloc::vec::Vec<u8>,
        buffered: alloc::vec::Vec<bool>,
    }

    impl Canvas for MockCanvas {
        type Error = core::convert::Infallible;

        fn device_count(&self) -> usize {
            4
        }

        fn clear(&mut self) -> Result<(), Self::Error> {
            self.clears += 1;
            Ok(())
        }

        fn set_column(&mut self, column: i16, bits: u8) -> Result<(), Self::Error> {
            self.columns.push((column, bits));
            Ok(())
        }

        fn set_row(&mut self, device: usize, row: u8, bits: u8) -> Result<(), Self::Error> {
            self.rows.push((device, row, bits));
            Ok(())
        }

        fn shift_left(&mut self) -> Result<(), Self::Error> {
            self.shifts += 1;
            Ok(())
        }

        fn set_buffered(&mut self, buffered: bool) -> Result<(), Self::Error> {
            self.buffered.push(buffered);
            Ok(())
        }

        fn set_intensity(&mut self, intensity: u8) -> Result<(), Self::Error> {
            self.intensities.push(intensity);
            Ok(())
        }
    }

    fn config() -> Config {
        Builder::new().build().unwrap()
    }

    #[test]
    fn test_boot_restarts_message_when_done() {
        let config = config();
        let mut canvas = MockCanvas::default();
        let mut scroller = Scroller::new(config.scroll_delay_ms);
        let mut boot = BootMode::default();

        let mut now = 0;
        boot.step(&mut canvas, &mut scroller, &config, now, true).unwrap();
        assert_eq!(canvas.clears, 1);

        // Drive until the message has looped at least once
        let mut restarts = 0;
        for _ in 0..2000 {
            now += config.scroll_delay_ms;
            let clears_before = canvas.clears;
            boot.step(&mut canvas, &mut scroller, &config, now, false).unwrap();
            if canvas.clears > clears_before {
                restarts += 1;
            }
        }
        assert!(restarts >= 1, "boot message never looped");
    }

    #[test]
    fn test_relaxed_first_heart_after_backdated_period() {
        let config = config();
        let mut canvas = MockCanvas::default();
        let mut relaxed = RelaxedMode::default();

        relaxed.step(&mut canvas, &config, 1000, true).unwrap();
        assert!(canvas.columns.is_empty());

        // 300 ms of the period are pre-elapsed on reinit
        relaxed.step(&mut canvas, &config, 1699, false).unwrap();
        assert!(canvas.columns.is_empty());
        relaxed.step(&mut canvas, &config, 1700, false).unwrap();
        assert_eq!(canvas.columns.len(), 24); // 3 hearts x 8 columns
    }

    #[test]
    fn test_relaxed_toggles_once_per_period() {
        let config = config();
        let mut canvas = MockCanvas::default();
        let mut relaxed = RelaxedMode::default();

        relaxed.step(&mut canvas, &config, 0, true).unwrap();
        relaxed.step(&mut canvas, &config, 700, false).unwrap();

        // Outline heart first: leftmost column of the first heart
        assert_eq!(canvas.columns[0], (4, HEART_EMPTY[0]));

        // Less than a full period later nothing changes
        canvas.columns.clear();
        relaxed.step(&mut canvas, &config, 1400, false).unwrap();
        assert!(canvas.columns.is_empty());

        // A full period later the filled heart draws exactly once
        relaxed.step(&mut canvas, &config, 1700, false).unwrap();
        assert_eq!(canvas.columns[0], (4, HEART_FULL[0]));
        assert_eq!(canvas.columns.len(), 24);
    }

    #[test]
    fn test_relaxed_draws_under_buffered_writes() {
        let config = config();
        let mut canvas = MockCanvas::default();
        let mut relaxed = RelaxedMode::default();

        relaxed.step(&mut canvas, &config, 0, true).unwrap();
        relaxed.step(&mut canvas, &config, 700, false).unwrap();

        assert_eq!(canvas.buffered, [true, false]);
        assert_eq!(canvas.intensities, [config.relaxed_intensity]);
    }

    #[test]
    fn test_mild_alternates_solid_and_hollow_tiles() {
        let config = config();
        let mut canvas = MockCanvas::default();
        let mut mild = MildMode::default();

        // Reinit back-dates, so the first frame draws on the same tick
        mild.step(&mut canvas, &config, 100, true).unwrap();
        assert_eq!(canvas.rows.len(), 4 * 8);
        assert_eq!(canvas.rows[0], (0, 0, HEART_SOLID[0]));
        assert_eq!(canvas.rows[2], (0, 2, HEART_SOLID[2]));

        canvas.rows.clear();
        mild.step(&mut canvas, &config, 100 + config.mild_beat_ms, false).unwrap();
        assert_eq!(canvas.rows[2], (0, 2, HEART_HOLLOW[2]));

        // Between beats nothing draws
        canvas.rows.clear();
        mild.step(&mut canvas, &config, 110 + config.mild_beat_ms, false).unwrap();
        assert!(canvas.rows.is_empty());
    }

    #[test]
    fn test_stressed_walk_advances_and_alternates_frames() {
        let config = config();
        let mut canvas = MockCanvas::default();
        let mut scroller = Scroller::new(config.scroll_delay_ms);
        let mut stressed = StressedMode::default();

        // First frame draws immediately, sprite still off-screen
        stressed
            .step(&mut canvas, &mut scroller, &config, 0, true)
            .unwrap();
        assert_eq!(canvas.columns.len(), 10);
        assert_eq!(canvas.columns[0], (-10, INVADER_A[0]));

        canvas.columns.clear();
        stressed
            .step(&mut canvas, &mut scroller, &config, config.invader_delay_ms, false)
            .unwrap();
        // One column further along, alternate frame
        assert_eq!(canvas.columns[0], (-9, INVADER_B[0]));
    }

    #[test]
    fn test_stressed_hands_over_to_scroll_after_crossing() {
        let config = config();
        let mut canvas = MockCanvas::default();
        let mut scroller = Scroller::new(config.scroll_delay_ms);
        let mut stressed = StressedMode::default();

        let mut now = 0;
        stressed
            .step(&mut canvas, &mut scroller, &config, now, true)
            .unwrap();

        // Walk spans from -5 to column_count() + 5: 42 steps total
        for _ in 0..41 {
            now += config.invader_delay_ms;
            stressed
                .step(&mut canvas, &mut scroller, &config, now, false)
                .unwrap();
        }
        assert_eq!(canvas.shifts, 0);

        // Next steps belong to the scroller
        for _ in 0..3 {
            now += config.invader_delay_ms;
            stressed
                .step(&mut canvas, &mut scroller, &config, now, false)
                .unwrap();
        }
        assert!(canvas.shifts > 0, "warning message never started scrolling");
    }

    #[test]
    fn test_stressed_scroll_completion_restarts_walk() {
        let config = config();
        let mut canvas = MockCanvas::default();
        let mut scroller = Scroller::new(config.scroll_delay_ms);
        let mut stressed = StressedMode::default();

        let mut now = 0;
        stressed
            .step(&mut canvas, &mut scroller, &config, now, true)
            .unwrap();
        for _ in 0..41 {
            now += config.invader_delay_ms;
            stressed
                .step(&mut canvas, &mut scroller, &config, now, false)
                .unwrap();
        }

        // Drive the warning message all the way off the grid; the scroller
        // only ever writes column 0, so a draw at -10 is the sprite again
        canvas.columns.clear();
        let mut resumed = false;
        for _ in 0..2000 {
            now += config.invader_delay_ms;
            stressed
                .step(&mut canvas, &mut scroller, &config, now, false)
                .unwrap();
            if canvas.columns.contains(&(-10, INVADER_A[0])) {
                resumed = true;
                break;
            }
        }
        assert!(resumed, "walk never restarted after the warning scroll");
        // Fresh walk frame: first (non-alternate) sprite, mirrored around
        // the initial off-screen position
        assert_eq!(canvas.columns.last().unwrap(), &(-5, INVADER_A[4]));
    }

    #[test]
    fn test_high_stress_scroll_completion_refills_and_resumes_fade() {
        let config = config();
        let mut canvas = MockCanvas::default();
        let mut scroller = Scroller::new(config.scroll_delay_ms);
        let mut alarm = HighStressMode::default();

        let mut now = 0;
        alarm
            .step(&mut canvas, &mut scroller, &config, now, true)
            .unwrap();
        // Run out the fade window plus the step that crosses it
        while now <= config.fade_window_ms {
            now += config.fade_delay_ms;
            alarm
                .step(&mut canvas, &mut scroller, &config, now, false)
                .unwrap();
        }

        // The alert scroll writes no intensity, so the next intensity write
        // is the refill restoring full brightness
        canvas.columns.clear();
        canvas.intensities.clear();
        let mut refilled = false;
        for _ in 0..2000 {
            now += config.fade_delay_ms;
            alarm
                .step(&mut canvas, &mut scroller, &config, now, false)
                .unwrap();
            if !canvas.intensities.is_empty() {
                refilled = true;
                break;
            }
        }
        assert!(refilled, "alarm never refilled after the alert scroll");
        assert_eq!(canvas.intensities, [15]);
        // Refill lights the whole canvas again
        let refill = &canvas.columns[canvas.columns.len() - 32..];
        assert!(refill.iter().all(|&(_, bits)| bits == 0xFF));

        // Fade resumes stepping down from full on the next tick
        now += config.fade_delay_ms;
        alarm
            .step(&mut canvas, &mut scroller, &config, now, false)
            .unwrap();
        assert_eq!(canvas.intensities, [15, 14]);
    }

    #[test]
    fn test_high_stress_reinit_fills_and_starts_fading() {
        let config = config();
        let mut canvas = MockCanvas::default();
        let mut scroller = Scroller::new(config.scroll_delay_ms);
        let mut alarm = HighStressMode::default();

        alarm
            .step(&mut canvas, &mut scroller, &config, 0, true)
            .unwrap();

        // Full canvas under buffered writes
        assert_eq!(canvas.columns.len(), 32);
        assert!(canvas.columns.iter().all(|&(_, bits)| bits == 0xFF));
        // Intensity restored to full, then the first fade step lands on the
        // same tick thanks to the back-dated timestamp
        assert_eq!(canvas.intensities, [15, 14]);
    }

    #[test]
    fn test_high_stress_intensity_bounces_within_range() {
        let config = config();
        let mut canvas = MockCanvas::default();
        let mut scroller = Scroller::new(config.scroll_delay_ms);
        let mut alarm = HighStressMode::default();

        let mut now = 0;
        alarm
            .step(&mut canvas, &mut scroller, &config, now, true)
            .unwrap();

        for _ in 0..100 {
            now += config.fade_delay_ms;
            alarm
                .step(&mut canvas, &mut scroller, &config, now, false)
                .unwrap();
        }

        assert!(canvas.intensities.iter().all(|&i| i <= 15));
        assert!(canvas.intensities.contains(&0), "fade never reached dark");
        // After hitting 0 the direction reverses
        let dark = canvas.intensities.iter().position(|&i| i == 0).unwrap();
        assert_eq!(canvas.intensities[dark + 1], 1);
    }

    #[test]
    fn test_high_stress_window_boundary_is_exclusive() {
        let config = config();
        let mut canvas = MockCanvas::default();
        let mut scroller = Scroller::new(config.scroll_delay_ms);
        let mut alarm = HighStressMode::default();

        alarm
            .step(&mut canvas, &mut scroller, &config, 0, true)
            .unwrap();

        // At exactly the window boundary the fade keeps running
        alarm
            .step(&mut canvas, &mut scroller, &config, config.fade_window_ms, false)
            .unwrap();
        assert_eq!(canvas.shifts, 0);

        // One past the boundary hands over to the scroller
        let mut now = config.fade_window_ms + 1;
        alarm
            .step(&mut canvas, &mut scroller, &config, now, false)
            .unwrap();
        let shifts_before = canvas.shifts;
        for _ in 0..2 {
            now += config.scroll_delay_ms;
            alarm
                .step(&mut canvas, &mut scroller, &config, now, false)
                .unwrap();
        }
        assert!(canvas.shifts > shifts_before, "alert never started scrolling");
    }
}
