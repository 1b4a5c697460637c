//! # Control Configuration
//!
//! Every tuning constant of the control loop lives here so that behavior can be
//! adjusted without touching the controllers.
//!
//! ## Usage
//! ```rust
//! use rl_core::engine::config::ControlConfig;
//!
//! let config = ControlConfig::default();
//! let aggressive = ControlConfig::aggressive();
//! assert!(aggressive.flip.min_flip_speed < config.flip.min_flip_speed);
//! ```

mod env;
mod flip_config;
mod steering_config;
mod tactic_config;
mod throttle_config;

pub use env::{load_from_env, CONTROL_CONFIG_PATH_ENV};
pub use flip_config::FlipConfig;
pub use steering_config::SteeringConfig;
pub use tactic_config::TacticConfig;
pub use throttle_config::ThrottleConfig;

use super::physics_constants::{speed, tick};
use crate::error::{ControlError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ControlConfig {
    pub steering: SteeringConfig,
    pub throttle: ThrottleConfig,
    pub flip: FlipConfig,
    pub tactic: TacticConfig,
}

impl ControlConfig {
    /// Flips earlier, burns boost sooner, steers harder on arcs
    pub fn aggressive() -> Self {
        let mut cfg = Self::default();
        cfg.steering.arc_gain = 2.5;
        cfg.throttle.min_boost = 0.0;
        cfg.throttle.boost_max_angle = 0.7;
        cfg.flip.min_flip_speed = 1000.0;
        cfg.flip.max_steer = 0.4;
        cfg
    }

    /// Longer lookahead, no flips, keeps a boost reserve
    pub fn cautious() -> Self {
        let mut cfg = Self::default();
        cfg.steering.lead_frames = 18.0;
        cfg.throttle.min_boost = 30.0;
        cfg.flip.enabled = false;
        cfg
    }

    /// Lookahead horizon in seconds.
    pub fn lead_time(&self) -> f32 {
        self.steering.lead_frames / tick::BOT_TICK_HZ
    }

    pub fn derivative_gain(&self) -> f32 {
        self.steering.derivative_per_lead_frame * self.steering.lead_frames
    }

    /// Lookahead gap beyond which the car cannot be on plan any more.
    pub fn off_course_threshold(&self) -> f32 {
        speed::BOOSTED_MAX_SPEED * 2.0 * self.lead_time()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("steering.lead_frames", self.steering.lead_frames),
            ("steering.slide_curvature_margin", self.steering.slide_curvature_margin),
            ("throttle.savings_gain", self.throttle.savings_gain),
            ("tactic.prediction_tolerance", self.tactic.prediction_tolerance),
            ("tactic.arrival_radius", self.tactic.arrival_radius),
            ("tactic.schedule_slack", self.tactic.schedule_slack),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ControlError::InvalidConfig(format!("{name} must be > 0, got {value}")));
            }
        }

        let non_negative = [
            ("steering.proportional_gain", self.steering.proportional_gain),
            ("steering.derivative_per_lead_frame", self.steering.derivative_per_lead_frame),
            ("steering.straight_gain", self.steering.straight_gain),
            ("steering.arc_gain", self.steering.arc_gain),
            ("throttle.min_boost", self.throttle.min_boost),
            ("flip.min_flip_speed", self.flip.min_flip_speed),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ControlError::InvalidConfig(format!("{name} must be >= 0, got {value}")));
            }
        }

        if !(self.throttle.coast_window > 0.0 && self.throttle.coast_window < 1.0) {
            return Err(ControlError::InvalidConfig(format!(
                "throttle.coast_window must be in (0, 1), got {}",
                self.throttle.coast_window
            )));
        }
        Ok(())
    }
}

// ========== Tests ==========
