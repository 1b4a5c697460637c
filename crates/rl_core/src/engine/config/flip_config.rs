//! Flip trigger configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipConfig {
    /// Request flips at all (default: true)
    pub enabled: bool,
    /// Minimum ground speed (default: 1100)
    pub min_flip_speed: f32,
    /// Speed added by the dodge, used to budget straight distance (default: 400)
    pub flip_speed_bonus: f32,
    /// Seconds of straight road needed after the dodge (default: 1.0)
    pub min_straight_seconds: f32,
    /// Steer must be below this magnitude (default: 0.25)
    pub max_steer: f32,
    /// Angle between nose and velocity must be below this (rad) (default: 0.5)
    pub max_heading_error: f32,
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_flip_speed: 1100.0,
            flip_speed_bonus: 400.0,
            min_straight_seconds: 1.0,
            max_steer: 0.25,
            max_heading_error: 0.5,
        }
    }
}
