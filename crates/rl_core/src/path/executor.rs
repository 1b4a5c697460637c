//! # Path Executor
//!
//! Turns a planned [`Path`] (or a bare target moment) into one tick of
//! controls: PD steering toward a lookahead point, throttle and boost from a
//! time-to-target comparison, flip requests on long straights and jump
//! handling.

use super::segment::{Segment, SegmentType};
use super::trajectory::Path;
use crate::engine::accels::{boosted_time_to_distance, non_boosted_time_to_distance};
use crate::engine::angles::{flat_correction_angle, flat_landing, point_any_direction};
use crate::engine::config::ControlConfig;
use crate::engine::controls::ControlOutput;
use crate::engine::kinematics::{curvature, max_angular_velocity};
use crate::engine::maneuver::{Maneuver, ManeuverSink};
use crate::engine::physics_constants::car;
use crate::engine::renderer::DebugRenderer;
use crate::engine::state::{angle_between, flatten, CarState, DataPacket, Moment};
use crate::error::Result;
use nalgebra::Vector3;

/// Yaw rates below this are treated as "cannot turn" (rad/s)
const MIN_YAW_AUTHORITY: f32 = 1e-3;
/// Target distances worth a debug line (uu)
const DIAGNOSTIC_MIN_DISTANCE: f32 = 10.0;
const DIAGNOSTIC_MAX_DISTANCE: f32 = 6000.0;

#[derive(Debug, Clone, Copy)]
struct Steering {
    steer: f32,
    slide: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PathExecutor {
    config: ControlConfig,
}

impl PathExecutor {
    pub fn new(config: ControlConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Follows `path` for one tick.
    ///
    /// Marks the path off course when its end time has passed or the
    /// lookahead point drifts beyond the off-course threshold. Controls are
    /// still produced for that tick; re-planning is the caller's business.
    pub fn execute_path(
        &self,
        input: &DataPacket,
        path: &mut Path,
        maneuvers: &mut dyn ManeuverSink,
        renderer: &mut dyn DebugRenderer,
    ) -> Result<ControlOutput> {
        let car = &input.car;
        let now = input.now();
        let lead_time = self.config.lead_time();

        if path.end_time() < now && path.mark_off_course() {
            log::debug!("Path expired at {:.2}s (now {:.2}s), marked off course", path.end_time(), now);
        }

        path.advance(&car.position);
        let target = path.current_target(now, lead_time);
        let distance_diff = target - car.position;

        if distance_diff.norm() > self.config.off_course_threshold() {
            if path.mark_off_course() {
                log::debug!("Lookahead {:.0}uu away, marked off course", distance_diff.norm());
            }
        } else {
            let delta = path.distance_to_target(&car.position);
            if delta > DIAGNOSTIC_MIN_DISTANCE && delta < DIAGNOSTIC_MAX_DISTANCE {
                log::debug!("Distance to target: {delta:.1}");
            }
        }

        let segment = *path.active_segment().root();
        let next_segment = path.next_segment().copied();
        let remaining_on_segment = path.remaining_on_segment();

        let correction_angle = flat_correction_angle(car, &target);
        let steering = self.steer(car, &distance_diff, correction_angle, segment.kind);
        let mut output = ControlOutput::new().with_steer(steering.steer).with_slide(steering.slide);
        output = self.throttle(car, distance_diff.norm(), correction_angle, output)?;

        if self.should_flip(car, &segment, remaining_on_segment, output.steer()) {
            log::debug!("Requesting front flip toward {:?}", segment.end);
            maneuvers.request(Maneuver::FrontFlip { target: segment.end, flip_early: true });
            renderer.add_alert_text("Flip!", now);
        }

        if segment.kind == SegmentType::Jump {
            let heading = next_segment.map(|s| s.direction()).unwrap_or(car.velocity);
            output = point_any_direction(car, &heading, output.with_jump(true));
        }

        renderer.set_branch_info(match segment.kind {
            SegmentType::Straight => "path: straight",
            SegmentType::Arc => "path: arc",
            SegmentType::Jump => "path: jump",
        });
        Ok(output)
    }

    /// Drives straight at `target` without a planned path.
    pub fn execute_simple_path(
        &self,
        input: &DataPacket,
        target: &Moment,
        renderer: &mut dyn DebugRenderer,
    ) -> Result<ControlOutput> {
        let car = &input.car;
        let tactic = &self.config.tactic;

        if !car.has_wheel_contact {
            renderer.set_branch_info("simple: airborne");
            let output = ControlOutput::new().with_throttle(1.0);
            return Ok(if car.velocity.z > 0.0 {
                point_any_direction(car, &(input.ball.position - car.position), output)
            } else {
                flat_landing(car, output)
            });
        }

        let correction_angle = flat_correction_angle(car, &target.position);
        let distance = (target.position - car.position).norm() - car::FRONT_TO_RJ;
        let time_to_tactic = target.time - input.now();
        let ground_speed = car.ground_speed();
        let time_to_target = if ground_speed > 0.0 { distance / ground_speed } else { f32::INFINITY };

        let throttle = if time_to_target > time_to_tactic {
            1.0
        } else if time_to_target * tactic.schedule_slack < time_to_tactic {
            -1.0
        } else {
            0.0
        };

        let boost = correction_angle.abs() < self.config.throttle.boost_max_angle
            && car.boost > self.config.throttle.min_boost
            && !car.is_supersonic
            && distance > tactic.simple_min_boost_distance
            && non_boosted_time_to_distance(ground_speed, distance)?.time > time_to_tactic;

        let slide = correction_angle.abs() > tactic.simple_slide_angle
            && car.yaw_rate() < tactic.simple_slide_max_yaw_rate
            && ground_speed > self.config.steering.min_slide_speed;

        renderer.set_branch_info("simple");
        Ok(ControlOutput::new()
            .with_steer(tactic.simple_steer_gain * correction_angle)
            .with_throttle(throttle)
            .with_boost(boost)
            .with_slide(slide))
    }

    fn steer(
        &self,
        car: &CarState,
        distance_diff: &Vector3<f32>,
        correction_angle: f32,
        kind: SegmentType,
    ) -> Steering {
        let steering = &self.config.steering;
        let ground_speed = car.ground_speed();
        let flat_distance = flatten(distance_diff).norm();

        let desired_curvature =
            if flat_distance > 0.0 { 2.0 * correction_angle.sin() / flat_distance } else { 0.0 };
        let desired_rate = desired_curvature * ground_speed;
        let max_rate = max_angular_velocity(ground_speed);
        let gain = if kind == SegmentType::Straight { steering.straight_gain } else { steering.arc_gain };

        let steer = if max_rate.abs() < MIN_YAW_AUTHORITY {
            gain * correction_angle
        } else {
            let error = desired_rate - car.yaw_rate();
            gain * (steering.proportional_gain * desired_rate / max_rate
                + self.config.derivative_gain() * error / max_rate)
        };

        let slide = desired_curvature.abs() > steering.slide_curvature_margin * curvature(ground_speed)
            && ground_speed > steering.min_slide_speed;

        Steering { steer, slide }
    }

    fn throttle(
        &self,
        car: &CarState,
        distance: f32,
        correction_angle: f32,
        output: ControlOutput,
    ) -> Result<ControlOutput> {
        let throttle = &self.config.throttle;
        let lead_time = self.config.lead_time();
        let speed = car.speed();
        let time_to_target = if speed > 0.0 { distance / speed } else { f32::INFINITY };

        if time_to_target > lead_time {
            if boosted_time_to_distance(speed, distance)?.time > lead_time {
                let boost = car.boost >= throttle.min_boost
                    && correction_angle.abs() < throttle.boost_max_angle;
                return Ok(output.with_throttle(1.0).with_boost(boost));
            }
            let unboosted = non_boosted_time_to_distance(speed, distance)?;
            let savings = (time_to_target - unboosted.time) * throttle.savings_gain / lead_time;
            Ok(output.with_throttle(savings))
        } else if time_to_target > throttle.coast_window * lead_time {
            Ok(output.with_throttle(0.0))
        } else {
            Ok(output.with_throttle(-1.0))
        }
    }

    fn should_flip(&self, car: &CarState, segment: &Segment, remaining: f32, steer: f32) -> bool {
        let flip = &self.config.flip;
        let ground_speed = car.ground_speed();

        flip.enabled
            && car.has_wheel_contact
            && segment.is_straight()
            && ground_speed > flip.min_flip_speed
            && remaining / (ground_speed + flip.flip_speed_bonus) > flip.min_straight_seconds
            && steer.abs() < flip.max_steer
            && angle_between(&car.orientation.nose(), &car.velocity) < flip.max_heading_error
    }
}
