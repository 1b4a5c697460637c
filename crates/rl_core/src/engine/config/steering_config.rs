//! Steering controller configuration

use serde::{Deserialize, Serialize};

/// PD steering parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Lookahead horizon in bot ticks (default: 12)
    pub lead_frames: f32,
    /// Proportional gain on desired/max yaw rate (default: 1.0)
    pub proportional_gain: f32,
    /// Derivative gain per lead frame (default: 0.1)
    pub derivative_per_lead_frame: f32,
    /// Steering multiplier on straight segments (default: 0.5)
    pub straight_gain: f32,
    /// Steering multiplier on arcs and jumps (default: 2.0)
    pub arc_gain: f32,
    /// Slide once desired curvature exceeds max curvature by this factor (default: 1.1)
    pub slide_curvature_margin: f32,
    /// No sliding below this ground speed (default: 1000)
    pub min_slide_speed: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            lead_frames: 12.0,
            proportional_gain: 1.0,
            derivative_per_lead_frame: 0.1,
            straight_gain: 0.5,
            arc_gain: 2.0,
            slide_curvature_margin: 1.1,
            min_slide_speed: 1000.0,
        }
    }
}
