//! Simulation time control.
//!
//! The clock is plain application state owned by the view and passed into the
//! frame assembler each tick. It only ever produces values inside its view
//! window; the phase resolver itself never clamps.

use crate::constants::SPEED_MULTIPLIERS;
use crate::models::{ServicePeriod, ViewWindow};
use crate::time::{add_seconds, format_clock, parse_clock, short_label, try_parse_clock};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    current: f64,
    window: ViewWindow,
    speed: f64,
    playing: bool,
}

impl SimulationClock {
    /// Paused clock at the start of `window`, running at 1x
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(window: ViewWindow) -> Self {
        Self {
            current: window.start as f64,
            window,
            speed: SPEED_MULTIPLIERS[0],
            playing: false,
        }
    }

    #[must_use]
    pub fn for_period(period: ServicePeriod) -> Self {
        Self::new(period.window())
    }

    /// Whole simulated seconds since midnight
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn seconds(&self) -> i64 {
        self.current.floor() as i64
    }

    /// Current time as `HH:MM:SS`
    #[must_use]
    pub fn current_time(&self) -> String {
        format_clock(self.seconds())
    }

    #[must_use]
    pub fn current_label(&self) -> String {
        short_label(self.seconds())
    }

    #[must_use]
    pub const fn window(&self) -> ViewWindow {
        self.window
    }

    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        if self.seconds() >= self.window.end {
            self.set_seconds(self.window.start);
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Pick the supported multiplier closest to `speed`
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = SPEED_MULTIPLIERS
            .iter()
            .copied()
            .min_by(|a, b| (a - speed).abs().total_cmp(&(b - speed).abs()))
            .unwrap_or(1.0);
    }

    /// Jump to a clock string; unparseable input is ignored
    pub fn seek(&mut self, time: &str) {
        if let Some(t) = try_parse_clock(time) {
            self.set_seconds(t);
        }
    }

    /// Jump to a fraction of the window, as dragged on the scrubber
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn seek_fraction(&mut self, fraction: f64) {
        let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
        let offset = (self.window.duration() as f64 * fraction).round() as i64;
        self.set_seconds(self.window.start + offset);
    }

    /// Move by `delta` seconds, staying inside the window
    pub fn skip(&mut self, delta: i64) {
        let target = add_seconds(&self.current_time(), delta);
        // add_seconds can leave the day on either side; clamp instead of wrapping
        let t = if target.starts_with('-') {
            self.window.start
        } else {
            parse_clock(&target)
        };
        self.set_seconds(t);
    }

    /// Advance by `real_ms` of wall-clock time at the current speed
    ///
    /// Pauses automatically at the end of the window.
    #[allow(clippy::cast_precision_loss)]
    pub fn advance(&mut self, real_ms: u64) {
        if !self.playing {
            return;
        }
        let end = self.window.end as f64;
        self.current = (self.current + real_ms as f64 * self.speed / 1000.0).min(end);
        if self.current >= end {
            self.playing = false;
        }
    }

    /// Switch to another view window, keeping the time if it still fits
    pub fn set_window(&mut self, window: ViewWindow) {
        self.window = window;
        self.set_seconds(self.seconds());
    }

    /// Position inside the window, 0 at the start and 1 at the end
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        let duration = self.window.duration().max(1) as f64;
        ((self.current - self.window.start as f64) / duration).clamp(0.0, 1.0)
    }

    #[allow(clippy::cast_precision_loss)]
    fn set_seconds(&mut self, t: i64) {
        self.current = self.window.clamp(t) as f64;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::for_period(ServicePeriod::default())
    }
}
