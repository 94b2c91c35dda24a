//! Shared simulation clock.
//!
//! The clock is read by the anchor manager, anchors and bodies during a tick
//! and advanced by the main loop between ticks. Everything runs on one
//! thread, so the clock is shared as `Rc<TimeMgr>` with `Cell` fields.

use std::cell::Cell;

use crate::util::frame::{J2000_JD, SECONDS_PER_DAY};

/// Simulation time in Julian days plus the rate it advances at.
#[derive(Debug)]
pub struct TimeMgr {
    jday: Cell<f64>,
    time_speed: Cell<f64>,
}

impl TimeMgr {
    /// Clock at `jday` running at real-time speed.
    #[must_use]
    pub fn new(jday: f64) -> Self {
        Self {
            jday: Cell::new(jday),
            time_speed: Cell::new(1.0),
        }
    }

    /// Current Julian day.
    #[must_use]
    pub fn jday(&self) -> f64 {
        self.jday.get()
    }

    /// Jump to `jday`.
    pub fn set_jday(&self, jday: f64) {
        self.jday.set(jday);
    }

    /// Simulated seconds per real second.
    #[must_use]
    pub fn time_speed(&self) -> f64 {
        self.time_speed.get()
    }

    /// Set simulated seconds per real second (0 pauses the clock).
    pub fn set_time_speed(&self, speed: f64) {
        self.time_speed.set(speed);
    }

    /// Advance the clock by `real_seconds` of wall time scaled by the time
    /// speed.
    pub fn advance(&self, real_seconds: f64) {
        let delta = real_seconds * self.time_speed.get() / SECONDS_PER_DAY;
        self.jday.set(self.jday.get() + delta);
    }
}

impl Default for TimeMgr {
    fn default() -> Self {
        Self::new(J2000_JD)
    }
}
