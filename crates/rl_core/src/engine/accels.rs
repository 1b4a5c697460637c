//! Time-to-distance integration over the kinematic model

use super::kinematics::throttle_acceleration;
use super::physics_constants::{accel, speed, tick};
use crate::error::Result;

/// Longest horizon simulated before giving up (seconds)
const MAX_HORIZON_SEC: f32 = 10.0;

/// Outcome of integrating straight-line acceleration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelResult {
    /// Seconds needed (capped at the horizon)
    pub time: f32,
    /// Speed on arrival
    pub speed: f32,
    /// Distance covered
    pub distance: f32,
}

/// Time to cover `distance` from `initial_speed` at full throttle and boost.
pub fn boosted_time_to_distance(initial_speed: f32, distance: f32) -> Result<AccelResult> {
    time_to_distance(initial_speed, distance, true)
}

/// Time to cover `distance` from `initial_speed` at full throttle, no boost.
pub fn non_boosted_time_to_distance(initial_speed: f32, distance: f32) -> Result<AccelResult> {
    time_to_distance(initial_speed, distance, false)
}

fn time_to_distance(initial_speed: f32, distance: f32, boosted: bool) -> Result<AccelResult> {
    let max_speed = if boosted { speed::BOOSTED_MAX_SPEED } else { speed::MAX_SPEED };
    let mut velocity = initial_speed.max(0.0);
    let mut covered = 0.0_f32;
    let mut time = 0.0_f32;

    while covered < distance && time < MAX_HORIZON_SEC {
        let mut acceleration = 0.0;
        if velocity < max_speed {
            // Never ask the model about speeds it rejects.
            acceleration = throttle_acceleration(velocity.min(speed::BOOSTED_MAX_SPEED - 1.0))?;
            if boosted {
                acceleration += accel::BOOSTED_ACCELERATION;
            }
        }

        velocity = (velocity + acceleration * tick::PHYSICS_DT).min(max_speed.max(initial_speed));
        covered += velocity * tick::PHYSICS_DT;
        time += tick::PHYSICS_DT;
    }

    Ok(AccelResult { time: time.min(MAX_HORIZON_SEC), speed: velocity, distance: covered })
}
