//! Simulation clock with a live speed multiplier.
//!
//! `base_time_scale` is simulated days per wall-clock second; the multiplier
//! scales it, and a multiplier of exactly zero means paused.

use crate::types::{days_to_years, format_elapsed_days};

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationClock {
    /// Cumulative simulated days.
    time: f64,
    base_time_scale: f64,
    speed_multiplier: f64,
}

impl SimulationClock {
    pub fn new(base_time_scale: f64, speed_multiplier: f64) -> Self {
        let mut clock = Self {
            time: 0.0,
            base_time_scale: if base_time_scale.is_finite() && base_time_scale > 0.0 {
                base_time_scale
            } else {
                1.0
            },
            speed_multiplier: 0.0,
        };
        clock.set_speed(speed_multiplier);
        clock
    }

    /// Advance by one frame and return the simulated days that elapsed.
    ///
    /// Returns zero (and leaves `time` untouched) for a zero, negative or
    /// non-finite multiplier or frame delta.
    pub fn advance(&mut self, delta_seconds: f64, speed_multiplier: f64) -> f64 {
        if !is_positive(delta_seconds) || !is_positive(speed_multiplier) {
            return 0.0;
        }
        let elapsed = delta_seconds * self.base_time_scale * speed_multiplier;
        if !elapsed.is_finite() {
            return 0.0;
        }
        self.time += elapsed;
        elapsed
    }

    /// Set the live multiplier. Returns `true` on a paused → playing transition.
    pub fn set_speed(&mut self, multiplier: f64) -> bool {
        let was_paused = self.is_paused();
        self.speed_multiplier = if multiplier.is_finite() {
            multiplier.max(0.0)
        } else {
            0.0
        };
        was_paused && !self.is_paused()
    }

    pub fn speed(&self) -> f64 {
        self.speed_multiplier
    }

    /// Exactly zero speed.
    pub fn is_paused(&self) -> bool {
        self.speed_multiplier == 0.0
    }

    pub fn base_time_scale(&self) -> f64 {
        self.base_time_scale
    }

    pub fn elapsed_days(&self) -> f64 {
        self.time
    }

    pub fn elapsed_years(&self) -> f64 {
        days_to_years(self.time)
    }

    /// Elapsed time as `"12d"`, `"3m 4d"` or `"2y 17d"`.
    pub fn formatted(&self) -> String {
        format_elapsed_days(self.time)
    }

    /// Rewind to zero. Speed is left as-is.
    pub fn reset(&mut self) {
        self.time = 0.0;
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
