//! Heading and attitude helpers
//!
//! Sign convention: a positive correction angle means the target lies toward
//! the car's `right` vector, which is also the direction of positive steer and
//! positive yaw input.

use super::controls::ControlOutput;
use super::state::{flatten, CarState};
use nalgebra::{Vector2, Vector3};

const AERIAL_P: f32 = 2.5;
const AERIAL_D: f32 = 0.3;

/// Signed ground-plane angle from the car nose to `target`.
pub fn flat_correction_angle(car: &CarState, target: &Vector3<f32>) -> f32 {
    flat_correction_angle_from(
        &flatten(&car.position),
        &flatten(&car.orientation.nose()),
        &flatten(target),
    )
}

/// Signed angle from `heading` to the direction `position -> target`.
pub fn flat_correction_angle_from(
    position: &Vector2<f32>,
    heading: &Vector2<f32>,
    target: &Vector2<f32>,
) -> f32 {
    let to_target = target - position;
    if to_target.norm() == 0.0 || heading.norm() == 0.0 {
        return 0.0;
    }
    let cross = heading.x * to_target.y - heading.y * to_target.x;
    let dot = heading.dot(&to_target);
    cross.atan2(dot)
}

/// Sets pitch/yaw/roll to swing the nose toward `direction` with the roof up.
pub fn point_any_direction(
    car: &CarState,
    direction: &Vector3<f32>,
    output: ControlOutput,
) -> ControlOutput {
    if direction.norm() == 0.0 {
        return output;
    }

    let local = car.orientation.to_local(&direction.normalize());
    let local_up = car.orientation.to_local(&Vector3::z());
    let local_spin = car.orientation.to_local(&car.angular_velocity);

    let pitch_error = local.z.atan2(local.x);
    let yaw_error = local.y.atan2(local.x);
    let roll_error = local_up.y.atan2(local_up.z);

    output
        .with_pitch(AERIAL_P * pitch_error + AERIAL_D * local_spin.y)
        .with_yaw(AERIAL_P * yaw_error - AERIAL_D * local_spin.z)
        .with_roll(AERIAL_P * roll_error - AERIAL_D * local_spin.x)
}

/// Attitude for landing on all four wheels, nose along the ground velocity.
pub fn flat_landing(car: &CarState, output: ControlOutput) -> ControlOutput {
    let ground_velocity = Vector3::new(car.velocity.x, car.velocity.y, 0.0);
    let heading = if ground_velocity.norm() > 1.0 {
        ground_velocity
    } else {
        let nose = car.orientation.nose();
        Vector3::new(nose.x, nose.y, 0.0)
    };
    point_any_direction(car, &heading, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::Orientation;
    use std::f32::consts::FRAC_PI_2;

    fn car_facing_y() -> CarState {
        CarState { orientation: Orientation::from_euler(0.0, FRAC_PI_2, 0.0), ..Default::default() }
    }

    #[test]
    fn test_target_straight_ahead() {
        let car = car_facing_y();
        let angle = flat_correction_angle(&car, &Vector3::new(0.0, 2000.0, 0.0));
        assert!(angle.abs() < 1e-5);
    }

    #[test]
    fn test_target_toward_right_is_positive() {
        let car = car_facing_y();
        let right = car.orientation.right();
        let angle = flat_correction_angle(&car, &(right * 500.0));
        assert!((angle - FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn test_target_behind() {
        let car = car_facing_y();
        let angle = flat_correction_angle(&car, &Vector3::new(0.0, -100.0, 0.0));
        assert!((angle.abs() - std::f32::consts::PI).abs() < 1e-4);
    }

    #[test]
    fn test_point_up_pitches_up() {
        let car = CarState { has_wheel_contact: false, ..Default::default() };
        let out = point_any_direction(&car, &Vector3::new(1.0, 0.0, 1.0), ControlOutput::new());
        assert!(out.pitch() > 0.0);
        assert!(out.yaw().abs() < 1e-5);
        assert!(out.roll().abs() < 1e-5);
    }

    #[test]
    fn test_point_right_yaws_right() {
        let car = CarState::default();
        let out = point_any_direction(&car, &car.orientation.right(), ControlOutput::new());
        assert!(out.yaw() > 0.0);
    }

    #[test]
    fn test_flat_landing_levels_pitched_car() {
        let car = CarState {
            orientation: Orientation::from_euler(0.6, 0.0, 0.0),
            velocity: Vector3::new(800.0, 0.0, -300.0),
            has_wheel_contact: false,
            ..Default::default()
        };
        let out = flat_landing(&car, ControlOutput::new());
        assert!(out.pitch() < 0.0);
    }
}
