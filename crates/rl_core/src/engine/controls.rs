//! Control output for one tick

use serde::{Deserialize, Serialize};

/// Actuator commands handed back to the host.
///
/// Analog inputs are clamped to `[-1, 1]` on every write; a NaN input is
/// treated as neutral.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlOutput {
    steer: f32,
    throttle: f32,
    pitch: f32,
    yaw: f32,
    roll: f32,
    boost: bool,
    slide: bool,
    jump: bool,
}

fn clamp_analog(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

impl ControlOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_steer(mut self, steer: f32) -> Self {
        self.steer = clamp_analog(steer);
        self
    }

    pub fn with_throttle(mut self, throttle: f32) -> Self {
        self.throttle = clamp_analog(throttle);
        self
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = clamp_analog(pitch);
        self
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = clamp_analog(yaw);
        self
    }

    pub fn with_roll(mut self, roll: f32) -> Self {
        self.roll = clamp_analog(roll);
        self
    }

    pub fn with_boost(mut self, boost: bool) -> Self {
        self.boost = boost;
        self
    }

    pub fn with_slide(mut self, slide: bool) -> Self {
        self.slide = slide;
        self
    }

    pub fn with_jump(mut self, jump: bool) -> Self {
        self.jump = jump;
        self
    }

    pub fn steer(&self) -> f32 {
        self.steer
    }

    pub fn throttle(&self) -> f32 {
        self.throttle
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn roll(&self) -> f32 {
        self.roll
    }

    pub fn boost(&self) -> bool {
        self.boost
    }

    pub fn slide(&self) -> bool {
        self.slide
    }

    pub fn jump(&self) -> bool {
        self.jump
    }

    /// True when no actuator is engaged.
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}
