//! Property-based test generators for car and ball snapshots

use super::state::{BallState, CarState, Orientation};
use nalgebra::Vector3;
use proptest::prelude::*;

pub fn field_position_strategy() -> impl Strategy<Value = Vector3<f32>> {
    (-4000.0f32..=4000.0, -5000.0f32..=5000.0, 17.0f32..=20.0)
        .prop_map(|(x, y, z)| Vector3::new(x, y, z))
}

pub fn ground_velocity_strategy() -> impl Strategy<Value = Vector3<f32>> {
    (0.0f32..=2300.0, -std::f32::consts::PI..std::f32::consts::PI)
        .prop_map(|(speed, heading)| Vector3::new(speed * heading.cos(), speed * heading.sin(), 0.0))
}

pub fn car_state_strategy() -> impl Strategy<Value = CarState> {
    (
        field_position_strategy(),
        ground_velocity_strategy(),
        -std::f32::consts::PI..std::f32::consts::PI, // yaw
        -5.0f32..=5.0,                               // yaw rate
        0.0f32..=100.0,                              // boost
        0.0f32..=300.0,                              // elapsed seconds
    )
        .prop_map(|(position, velocity, yaw, yaw_rate, boost, elapsed_seconds)| CarState {
            position,
            velocity,
            angular_velocity: Vector3::new(0.0, 0.0, yaw_rate),
            orientation: Orientation::from_euler(0.0, yaw, 0.0),
            boost,
            has_wheel_contact: true,
            is_supersonic: velocity.norm() > 2200.0,
            elapsed_seconds,
        })
}

pub fn ball_state_strategy() -> impl Strategy<Value = BallState> {
    (
        field_position_strategy(),
        (-2000.0f32..=2000.0, -2000.0f32..=2000.0, -500.0f32..=1500.0),
    )
        .prop_map(|(position, (vx, vy, vz))| BallState {
            position: position + Vector3::new(0.0, 0.0, 80.0),
            velocity: Vector3::new(vx, vy, vz),
        })
}
