//! Tactic completion and simple-path heuristics

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TacticConfig {
    /// A ball-tracking tactic is obsolete once no forecast sample comes this close (default: 50)
    pub prediction_tolerance: f32,
    /// A tactic is reached inside this radius (default: 150)
    pub arrival_radius: f32,
    /// Steering per radian of correction on the simple path (default: 2.0)
    pub simple_steer_gain: f32,
    /// Slide above this correction angle on the simple path (rad) (default: 1.0)
    pub simple_slide_angle: f32,
    /// ...and only while yaw rate is below this (rad/s) (default: 3.0)
    pub simple_slide_max_yaw_rate: f32,
    /// Do not boost for targets closer than this (default: 1000)
    pub simple_min_boost_distance: f32,
    /// Brake when ahead of schedule by more than this factor (default: 1.1)
    pub schedule_slack: f32,
    /// Rolling tactician slides above this correction angle (rad) (default: 1.2)
    pub rolling_slide_angle: f32,
    /// Rolling tactician boosts below this correction angle (rad) (default: 0.2)
    pub rolling_boost_angle: f32,
}

impl Default for TacticConfig {
    fn default() -> Self {
        Self {
            prediction_tolerance: 50.0,
            arrival_radius: 150.0,
            simple_steer_gain: 2.0,
            simple_slide_angle: 1.0,
            simple_slide_max_yaw_rate: 3.0,
            simple_min_boost_distance: 1000.0,
            schedule_slack: 1.1,
            rolling_slide_angle: 1.2,
            rolling_boost_angle: 0.2,
        }
    }
}
