//! Global simulation parameters the UI can change between frames

use std::ops::RangeInclusive;

use log::warn;

/// Gravitational constant used when nothing else is configured.
pub const DEFAULT_G: f32 = 0.1;

/// Range accepted for the gravitational constant.
pub const GRAVITY_RANGE: RangeInclusive<f32> = 0.01..=1.0;

/// Range accepted for the time dilation multiplier (0 pauses physics).
pub const TIME_SCALE_RANGE: RangeInclusive<f32> = 0.0..=5.0;

/// Longest wall-clock frame the loop will integrate, in seconds.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Configuration handed to every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    time_scale: f32,
    gravity: f32,
}

impl SimConfig {
    pub fn new(time_scale: f32, gravity: f32) -> Self {
        let mut config = Self::default();
        config.set_time_scale(time_scale);
        config.set_gravity(gravity);
        config
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Set the speed multiplier, clamped into [`TIME_SCALE_RANGE`].
    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.time_scale = clamp_into("time scale", time_scale, &TIME_SCALE_RANGE, self.time_scale);
    }

    /// Set G, clamped into [`GRAVITY_RANGE`].
    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = clamp_into("gravity", gravity, &GRAVITY_RANGE, self.gravity);
    }

    /// Simulated time to integrate for a frame that took `wall_dt` seconds.
    pub fn frame_dt(&self, wall_dt: f32) -> f32 {
        wall_dt.clamp(0.0, MAX_FRAME_DT) * self.time_scale
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            gravity: DEFAULT_G,
        }
    }
}

fn clamp_into(what: &str, value: f32, range: &RangeInclusive<f32>, current: f32) -> f32 {
    if value.is_nan() {
        warn!("ignoring NaN {what}, keeping {current}");
        return current;
    }
    if !range.contains(&value) {
        let clamped = value.clamp(*range.start(), *range.end());
        warn!("{what} {value} outside {range:?}, clamped to {clamped}");
        return clamped;
    }
    value
}
