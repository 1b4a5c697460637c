//! Physics constants for vehicle control
//!
//! Reference values from the RLBot "Useful Game Values" wiki, in unreal units (uu).

// ============================================================
// Tick timing
// ============================================================
pub mod tick {
    /// Physics tick frequency (Hz)
    pub const PHYSICS_TICK_HZ: f32 = 120.0;

    /// Seconds per physics tick
    pub const PHYSICS_DT: f32 = 1.0 / PHYSICS_TICK_HZ;

    /// Rate at which the host hands us packets (Hz)
    pub const BOT_TICK_HZ: f32 = 60.0;
}

/// Field dimensions (uu)
pub mod field {
    use nalgebra::Vector3;

    pub const HALF_WIDTH: f32 = 4096.0;
    pub const HALF_LENGTH: f32 = 5120.0;
    pub const FIELD_WIDTH: f32 = 2.0 * HALF_WIDTH;
    pub const FIELD_LENGTH: f32 = 2.0 * HALF_LENGTH;
    pub const FIELD_HEIGHT: f32 = 2044.0;

    /// Blue goal center (negative y)
    pub fn blue_goal_center() -> Vector3<f32> {
        Vector3::new(0.0, -HALF_LENGTH, 0.0)
    }

    /// Orange goal center (positive y)
    pub fn orange_goal_center() -> Vector3<f32> {
        Vector3::new(0.0, HALF_LENGTH, 0.0)
    }

    pub fn left_side_wall() -> Vector3<f32> {
        Vector3::new(HALF_WIDTH, 0.0, 1000.0)
    }

    pub fn right_side_wall() -> Vector3<f32> {
        Vector3::new(-HALF_WIDTH, 0.0, 1000.0)
    }
}

/// Ball constants
pub mod ball {
    pub const RADIUS: f32 = 92.75;
    /// Share of the surface-normal velocity kept after a bounce
    pub const COEFFICIENT_OF_RESTITUTION: f32 = 0.6;
}

/// Car body (octane hitbox)
pub mod car {
    pub const AT_REST_Z: f32 = 16.99;
    pub const HEIGHT: f32 = 36.16;
    pub const LENGTH: f32 = 118.01;
    pub const WIDTH: f32 = 84.2;
    /// Distance from the front bumper to the rear axle joint
    pub const FRONT_TO_RJ: f32 = 73.0;
}

/// Speed limits (uu/s)
pub mod speed {
    pub const BOOSTED_MAX_SPEED: f32 = 2300.0;
    /// Max speed reachable with throttle only
    pub const MAX_SPEED: f32 = 1410.0;
    /// Top of the curvature table
    pub const CURVATURE_TABLE_MAX: f32 = 2500.0;
}

/// Accelerations (uu/s²)
pub mod accel {
    pub const GRAVITY: f32 = 650.0;
    pub const BOOSTED_ACCELERATION: f32 = 991.666;
    /// Approximate acceleration at 1.0 throttle
    pub const ACCELERATION: f32 = 500.0;
    pub const COASTING_ACCELERATION: f32 = -525.0;
    pub const BRAKING_ACCELERATION: f32 = -3500.0;

    /// Instant velocity along the roof on the first jump frame
    pub const JUMP_ACCELERATION_INSTANT: f32 = 300.0;
    pub const JUMP_HOLD_TIME: f32 = 0.2;
    pub const JUMP_ACCELERATION_HELD: f32 = 1400.0;
}

/// Boost resource
pub mod boost {
    /// Minimum boost before the executors will spend it
    pub const MIN_BOOST: f32 = 12.0;
    pub const FULL: f32 = 100.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_centers_are_opposite() {
        let blue = field::blue_goal_center();
        let orange = field::orange_goal_center();
        assert_eq!(blue, -orange);
        assert!((orange.y - field::HALF_LENGTH).abs() < f32::EPSILON);
    }

    #[test]
    fn test_physics_dt() {
        assert!((tick::PHYSICS_DT * tick::PHYSICS_TICK_HZ - 1.0).abs() < 1e-6);
    }
}
