use super::tactician::{TacticContext, TacticOutcome, TacticRequest, Tactician};
use crate::engine::angles::{flat_correction_angle, flat_landing};
use crate::engine::controls::ControlOutput;
use crate::engine::maneuver::Maneuver;
use crate::error::Result;

/// Hands a front flip toward the subject to the maneuver runner.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlipTactician;

impl Tactician for FlipTactician {
    fn execute(
        &self,
        ctx: &mut TacticContext<'_>,
        request: TacticRequest<'_>,
    ) -> Result<TacticOutcome> {
        let car = &ctx.input.car;
        if !car.has_wheel_contact {
            ctx.renderer.set_branch_info("flip: landing");
            let controls = flat_landing(car, ControlOutput::new().with_throttle(1.0));
            return Ok(TacticOutcome::handled(controls, request.state));
        }

        log::debug!("Front flip toward {:?}", request.subject.position);
        ctx.maneuvers.request(Maneuver::FrontFlip { target: request.subject.position, flip_early: false });
        ctx.renderer.add_alert_text("Flip!", ctx.input.now());
        ctx.renderer.set_branch_info("flip");

        let controls = ControlOutput::new()
            .with_steer(flat_correction_angle(car, &request.subject.position))
            .with_throttle(1.0);
        Ok(TacticOutcome::handled(controls, request.state))
    }
}
