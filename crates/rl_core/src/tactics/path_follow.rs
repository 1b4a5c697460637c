//! Tactician for positional tactics: follow the planned path while it is
//! usable, otherwise head straight for the subject.

use super::tactician::{TacticContext, TacticOutcome, TacticRequest, Tactician};
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct PathTactician;

impl Tactician for PathTactician {
    fn execute(
        &self,
        ctx: &mut TacticContext<'_>,
        request: TacticRequest<'_>,
    ) -> Result<TacticOutcome> {
        let controls = match request.path {
            Some(path) if !path.is_off_course() && !path.is_complete() => {
                ctx.executor.execute_path(ctx.input, path, &mut *ctx.maneuvers, &mut *ctx.renderer)?
            }
            _ => ctx.executor.execute_simple_path(ctx.input, &request.subject, &mut *ctx.renderer)?,
        };
        Ok(TacticOutcome::handled(controls, request.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::{BallState, CarState, DataPacket, Moment, Orientation};
    use crate::path::{Path, Segment};
    use crate::tactics::tactician::harness::Harness;
    use crate::tactics::{Tactic, TacticType};
    use nalgebra::Vector3;
    use std::f32::consts::FRAC_PI_2;

    fn moving_car(position: Vector3<f32>) -> CarState {
        CarState {
            position,
            orientation: Orientation::from_euler(0.0, FRAC_PI_2, 0.0),
            velocity: Vector3::new(0.0, 1000.0, 0.0),
            boost: 50.0,
            ..Default::default()
        }
    }

    fn dribble_with_path() -> Tactic {
        let end = Vector3::new(0.0, 3000.0, 0.0);
        let path = Path::new(vec![Segment::straight(Vector3::zeros(), end)], Moment::new(end, 1.0), 0.0)
            .unwrap();
        Tactic::new(TacticType::Dribble, Moment::new(end, 1.0)).with_path(path)
    }

    #[test]
    fn test_follows_path_on_course() {
        let mut harness = Harness::new(DataPacket::new(moving_car(Vector3::zeros()), BallState::default()));
        let mut tactic = dribble_with_path();

        let outcome = harness.run(&PathTactician, &mut tactic);
        assert!(matches!(outcome, TacticOutcome::Handled(_)));
        assert_eq!(harness.renderer.branch_info.as_deref(), Some("path: straight"));
        assert!(!tactic.path().unwrap().is_off_course());
    }

    #[test]
    fn test_falls_back_once_off_course() {
        let far = Vector3::new(3000.0, 0.0, 17.0);
        let mut harness = Harness::new(DataPacket::new(moving_car(far), BallState::default()));
        let mut tactic = dribble_with_path();

        harness.run(&PathTactician, &mut tactic);
        assert!(tactic.path().unwrap().is_off_course());

        harness.run(&PathTactician, &mut tactic);
        assert_eq!(harness.renderer.branch_info.as_deref(), Some("simple"));
    }

    #[test]
    fn test_driven_path_hands_over_to_simple() {
        let car = moving_car(Vector3::new(0.0, 1500.0, 0.0));
        let mut harness = Harness::new(DataPacket::new(car, BallState::default()));
        let mut tactic = dribble_with_path();
        harness.run(&PathTactician, &mut tactic);
        assert_eq!(harness.renderer.branch_info.as_deref(), Some("path: straight"));

        harness.input.car.position = Vector3::new(0.0, 3100.0, 0.0);
        harness.run(&PathTactician, &mut tactic);
        assert!(tactic.path().unwrap().is_complete());
        harness.run(&PathTactician, &mut tactic);
        assert_eq!(harness.renderer.branch_info.as_deref(), Some("simple"));
    }

    #[test]
    fn test_without_path_uses_simple() {
        let mut harness = Harness::new(DataPacket::new(moving_car(Vector3::zeros()), BallState::default()));
        let mut tactic = Tactic::new(TacticType::Defend, Moment::new(Vector3::new(0.0, -5120.0, 0.0), 3.0));

        harness.run(&PathTactician, &mut tactic);
        assert_eq!(harness.renderer.branch_info.as_deref(), Some("simple"));
    }
}
