//! Drive-at-the-ball tactician, with a side-wall variant

use super::tactic::TacticianState;
use super::tactician::{TacticContext, TacticOutcome, TacticRequest, Tactician};
use crate::engine::angles::{flat_correction_angle, flat_correction_angle_from};
use crate::engine::controls::ControlOutput;
use crate::engine::state::{flatten, CarState};
use crate::error::Result;
use nalgebra::{Vector2, Vector3};

/// Target this far above the car means climbing the wall
const WALL_CLIMB_HEIGHT: f32 = 500.0;
/// Beyond this |x| the car is beside a side wall
const NEAR_SIDE_WALL_X: f32 = 3000.0;
const ON_GROUND_Z: f32 = 20.0;

/// Full throttle at the subject, sliding through sharp corrections.
///
/// Boost has hysteresis: once boosting, the car keeps boosting while it
/// points at the target even after the tank drops below the reserve.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollingTactician;

impl RollingTactician {
    fn wants_wall(car: &CarState, target: &Vector3<f32>) -> bool {
        car.has_wheel_contact
            && (target.z - car.position.z).abs() > WALL_CLIMB_HEIGHT
            && car.position.x.abs() > NEAR_SIDE_WALL_X
            && car.position.z < ON_GROUND_Z
    }

    /// Ground-plane aim point with the target's height unrolled onto the
    /// side wall it is closest to.
    fn wall_projection(target: &Vector3<f32>) -> Vector2<f32> {
        Vector2::new(target.x + target.x.signum() * target.z, target.y)
    }
}

impl Tactician for RollingTactician {
    fn execute(
        &self,
        ctx: &mut TacticContext<'_>,
        request: TacticRequest<'_>,
    ) -> Result<TacticOutcome> {
        let car = &ctx.input.car;
        let target = request.subject.position;

        let angle = if Self::wants_wall(car, &target) {
            let projection = Self::wall_projection(&target);
            ctx.renderer.set_branch_info("wall ride");
            ctx.renderer.render_projection(car.position, projection);
            flat_correction_angle_from(
                &flatten(&car.position),
                &flatten(&car.orientation.nose()),
                &projection,
            )
        } else {
            ctx.renderer.set_branch_info("flat correction");
            flat_correction_angle(car, &target)
        };

        let config = ctx.config();
        let am_boosting = (car.boost > config.throttle.min_boost || request.state.am_boosting)
            && angle.abs() < config.tactic.rolling_boost_angle;

        let controls = ControlOutput::new()
            .with_steer(angle)
            .with_throttle(1.0)
            .with_slide(angle.abs() > config.tactic.rolling_slide_angle)
            .with_boost(am_boosting);

        Ok(TacticOutcome::handled(controls, TacticianState { am_boosting }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::LineColor;
    use crate::engine::state::{BallState, DataPacket, Moment};
    use crate::tactics::tactician::harness::Harness;
    use crate::tactics::{Tactic, TacticType};

    fn step(harness: &mut Harness, tactic: &mut Tactic) -> (ControlOutput, TacticianState) {
        match harness.run(&RollingTactician, tactic) {
            TacticOutcome::Handled(step) => (step.controls, step.state),
            TacticOutcome::NotHandled => panic!("rolling tactician always handles"),
        }
    }

    #[test]
    fn test_drives_at_target() {
        let car = CarState { boost: 50.0, ..Default::default() };
        let mut harness = Harness::new(DataPacket::new(car, BallState::default()));
        let mut tactic = Tactic::new(TacticType::HitBall, Moment::new(Vector3::new(2000.0, 0.0, 93.0), 2.0));

        let (controls, state) = step(&mut harness, &mut tactic);
        assert_eq!(controls.throttle(), 1.0);
        assert!(controls.steer().abs() < 1e-5);
        assert!(controls.boost());
        assert!(state.am_boosting);
        assert_eq!(harness.renderer.branch_info.as_deref(), Some("flat correction"));
    }

    #[test]
    fn test_boost_hysteresis() {
        let car = CarState { boost: 5.0, ..Default::default() };
        let mut harness = Harness::new(DataPacket::new(car, BallState::default()));
        let mut tactic = Tactic::new(TacticType::HitBall, Moment::new(Vector3::new(2000.0, 0.0, 93.0), 2.0));

        let (controls, _) = step(&mut harness, &mut tactic);
        assert!(!controls.boost());

        tactic.state = TacticianState { am_boosting: true };
        let (controls, state) = step(&mut harness, &mut tactic);
        assert!(controls.boost());
        assert!(state.am_boosting);
    }

    #[test]
    fn test_sharp_turn_slides_and_stops_boosting() {
        let car = CarState { boost: 80.0, ..Default::default() };
        let mut harness = Harness::new(DataPacket::new(car, BallState::default()));
        let mut tactic = Tactic::new(TacticType::HitBall, Moment::new(Vector3::new(-100.0, 1000.0, 93.0), 2.0));
        tactic.state = TacticianState { am_boosting: true };

        let (controls, state) = step(&mut harness, &mut tactic);
        assert!(controls.slide());
        assert_eq!(controls.steer(), 1.0);
        assert!(!controls.boost());
        assert!(!state.am_boosting);
    }

    #[test]
    fn test_wall_ride_projects_target() {
        let car = CarState { position: Vector3::new(3500.0, 0.0, 17.0), ..Default::default() };
        let mut harness = Harness::new(DataPacket::new(car, BallState::default()));
        let mut tactic = Tactic::new(TacticType::WallRide, Moment::new(Vector3::new(4000.0, 1500.0, 800.0), 2.0));

        let (controls, _) = step(&mut harness, &mut tactic);
        assert_eq!(harness.renderer.branch_info.as_deref(), Some("wall ride"));
        assert_eq!(harness.renderer.lines.len(), 1);
        assert_eq!(harness.renderer.lines[0].color, LineColor::Cyan);
        assert_eq!(harness.renderer.lines[0].to, Vector3::new(4800.0, 1500.0, 17.0));
        assert!(controls.steer() > 0.0);
    }

    #[test]
    fn test_wall_projection_ignores_travel_direction() {
        let target = Vector3::new(4000.0, 1500.0, 800.0);
        let mut aims = Vec::new();
        for vy in [1000.0, -1000.0] {
            let car = CarState {
                position: Vector3::new(3500.0, 0.0, 17.0),
                velocity: Vector3::new(0.0, vy, 0.0),
                ..Default::default()
            };
            let mut harness = Harness::new(DataPacket::new(car, BallState::default()));
            let mut tactic = Tactic::new(TacticType::WallRide, Moment::new(target, 2.0));
            let (controls, _) = step(&mut harness, &mut tactic);
            aims.push((harness.renderer.lines[0].to, controls.steer()));
        }
        assert_eq!(aims[0], aims[1]);
    }
}
