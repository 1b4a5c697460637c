//! Kinematic model of a grounded car
//!
//! Stateless functions of ground speed, fitted from observed vehicle dynamics.
//! Speeds are in uu/s, angles in radians.

use crate::error::{ControlError, Result};

/// Curvature table: (lower breakpoint, a, b) with curvature = a - b * speed
const CURVATURE_TABLE: [(f32, f32, f32); 5] = [
    (0.0, 0.006900, 5.84e-6),
    (500.0, 0.005610, 3.26e-6),
    (1000.0, 0.004300, 1.95e-6),
    (1500.0, 0.003025, 1.10e-6),
    (1750.0, 0.001800, 0.40e-6),
];

/// Upper bound of the last curvature segment
const CURVATURE_MAX_SPEED: f32 = 2500.0;

/// Maximum curvature (1/uu) the car can hold at the given speed.
///
/// Returns 0 outside `[0, 2500)`.
pub fn curvature(speed: f32) -> f32 {
    if !(0.0..CURVATURE_MAX_SPEED).contains(&speed) {
        return 0.0;
    }

    let (_, a, b) = CURVATURE_TABLE
        .iter()
        .rev()
        .find(|(lower, _, _)| speed >= *lower)
        .copied()
        .unwrap_or(CURVATURE_TABLE[0]);

    a - b * speed
}

/// Tightest turning radius at the given speed.
///
/// A stationary car has no meaningful radius, so `speed == 0` yields 0 rather
/// than the radius implied by `curvature(0)`.
pub fn turn_radius(speed: f32) -> f32 {
    if speed == 0.0 {
        return 0.0;
    }
    let k = curvature(speed);
    if k <= 0.0 {
        return 0.0;
    }
    1.0 / k
}

/// Forward distance covered while turning through `angle` at full lock.
pub fn turn_depth(speed: f32, angle: f32) -> f32 {
    turn_radius(speed) * angle.sin()
}

/// Lateral distance covered while turning through `angle` at full lock.
pub fn turn_width(speed: f32, angle: f32) -> f32 {
    turn_radius(speed) * angle.cos()
}

/// Length of the arc driven while turning through `angle` at full lock.
pub fn arc_length(speed: f32, angle: f32) -> f32 {
    (turn_radius(speed) * angle).abs()
}

/// Acceleration (uu/s²) from full throttle alone.
///
/// # Errors
/// `OutOfDomain` for speeds at or above the boosted maximum (2300), which the
/// throttle cannot produce.
pub fn throttle_acceleration(speed: f32) -> Result<f32> {
    if speed < 1400.0 {
        Ok(1600.0 - speed)
    } else if speed < 1410.0 {
        Ok((speed - 1400.0) * 20.0)
    } else if speed < 2300.0 {
        // Already at max throttle speed.
        Ok(0.0)
    } else {
        Err(ControlError::OutOfDomain { quantity: "throttle speed", value: speed })
    }
}

/// Max yaw rate (rad/s) at the given speed.
pub fn max_angular_velocity(speed: f32) -> f32 {
    curvature(speed) * speed
}
