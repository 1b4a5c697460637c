//! Per-tick snapshots handed over by the host
//!
//! Everything here is a plain value: rebuilt every tick, never mutated after.

use crate::error::{ControlError, Result};
use nalgebra::{Matrix3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Car rotation as a 3x3 matrix with rows nose, right, roof.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    matrix: Matrix3<f32>,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::from_euler(0.0, 0.0, 0.0)
    }
}

impl Orientation {
    /// Builds the rotation from game euler angles (radians).
    pub fn from_euler(pitch: f32, yaw: f32, roll: f32) -> Self {
        let (sp, cp) = pitch.sin_cos();
        let (sy, cy) = yaw.sin_cos();
        let (sr, cr) = roll.sin_cos();

        let nose = Vector3::new(cp * cy, cp * sy, sp);
        let right = Vector3::new(cy * sp * sr - cr * sy, sy * sp * sr + cr * cy, -cp * sr);
        let roof = Vector3::new(-cr * cy * sp - sr * sy, -cr * sy * sp + sr * cy, cp * cr);

        Self::from_rows(nose, right, roof)
    }

    /// Builds the rotation from its row vectors.
    pub fn from_rows(nose: Vector3<f32>, right: Vector3<f32>, roof: Vector3<f32>) -> Self {
        Self { matrix: Matrix3::from_rows(&[nose.transpose(), right.transpose(), roof.transpose()]) }
    }

    /// Flat car pointing along `direction` (projected to the ground plane).
    pub fn facing(direction: Vector3<f32>) -> Self {
        Self::from_euler(0.0, direction.y.atan2(direction.x), 0.0)
    }

    pub fn nose(&self) -> Vector3<f32> {
        self.matrix.row(0).transpose()
    }

    pub fn right(&self) -> Vector3<f32> {
        self.matrix.row(1).transpose()
    }

    pub fn roof(&self) -> Vector3<f32> {
        self.matrix.row(2).transpose()
    }

    pub fn matrix(&self) -> &Matrix3<f32> {
        &self.matrix
    }

    /// Expresses a world vector in car coordinates (x nose, y right, z roof).
    pub fn to_local(&self, world: &Vector3<f32>) -> Vector3<f32> {
        self.matrix * world
    }

    /// Inverse rotation, refusing singular matrices.
    pub fn inverse(&self) -> Result<Matrix3<f32>> {
        if self.matrix.determinant() == 0.0 {
            return Err(ControlError::DegenerateGeometry("orientation has no inverse"));
        }
        self.matrix
            .try_inverse()
            .ok_or(ControlError::DegenerateGeometry("orientation has no inverse"))
    }
}

/// Vehicle snapshot for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarState {
    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub angular_velocity: Vector3<f32>,
    #[serde(default)]
    pub orientation: Orientation,
    pub boost: f32,
    pub has_wheel_contact: bool,
    #[serde(default)]
    pub is_supersonic: bool,
    pub elapsed_seconds: f32,
}

impl Default for CarState {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            orientation: Orientation::default(),
            boost: 0.0,
            has_wheel_contact: true,
            is_supersonic: false,
            elapsed_seconds: 0.0,
        }
    }
}

impl CarState {
    /// Speed along the ground plane.
    pub fn ground_speed(&self) -> f32 {
        flatten(&self.velocity).norm()
    }

    pub fn speed(&self) -> f32 {
        self.velocity.norm()
    }

    pub fn yaw_rate(&self) -> f32 {
        self.angular_velocity.z
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BallState {
    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,
}

/// Input for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DataPacket {
    pub car: CarState,
    pub ball: BallState,
}

impl DataPacket {
    pub fn new(car: CarState, ball: BallState) -> Self {
        Self { car, ball }
    }

    pub fn now(&self) -> f32 {
        self.car.elapsed_seconds
    }
}

/// A place to be at a given game time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    pub position: Vector3<f32>,
    pub time: f32,
}

impl Moment {
    pub fn new(position: Vector3<f32>, time: f32) -> Self {
        Self { position, time }
    }
}

/// Drops the z component.
pub fn flatten(v: &Vector3<f32>) -> Vector2<f32> {
    Vector2::new(v.x, v.y)
}

/// Unsigned angle between two vectors; 0 when either is zero.
pub fn angle_between(a: &Vector3<f32>, b: &Vector3<f32>) -> f32 {
    if a.norm() == 0.0 || b.norm() == 0.0 {
        return 0.0;
    }
    a.angle(b)
}
