//! Throttle / boost configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Coast while time-to-target is above this share of lead time (default: 0.4)
    pub coast_window: f32,
    /// Throttle per second saved, scaled by lead time (default: 10.0)
    pub savings_gain: f32,
    /// Keep at least this much boost in the tank (default: 12)
    pub min_boost: f32,
    /// Only boost when the correction angle is below this (rad) (default: 0.5)
    pub boost_max_angle: f32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self { coast_window: 0.4, savings_gain: 10.0, min_boost: 12.0, boost_max_angle: 0.5 }
    }
}
