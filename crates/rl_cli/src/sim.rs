//! Flat-ground integrator
//!
//! Drives the car with the kinematic model only: no jumps, no aerials, no
//! car-ball contact. The ball follows the same ballistic model the predictor
//! uses.

use crate::scenario::Scenario;
use anyhow::{Context, Result};
use nalgebra::Vector3;
use rl_core::engine::ball_prediction::{BallPredictionSource, BallisticPredictor};
use rl_core::engine::kinematics::{max_angular_velocity, throttle_acceleration};
use rl_core::engine::maneuver::{Maneuver, ManeuverLog};
use rl_core::engine::physics_constants::{accel, ball, speed, tick};
use rl_core::engine::renderer::RecordingRenderer;
use rl_core::engine::state::{BallState, CarState, Orientation};
use rl_core::{ControlConfig, ControlOutput, DataPacket, TacticManager, TacticianRegistry};
use serde::Serialize;
use std::collections::VecDeque;

/// Boost burned per second while boosting
const BOOST_CONSUMPTION: f32 = 33.3;
/// Yaw authority multiplier while sliding
const SLIDE_YAW_FACTOR: f32 = 1.5;
const SUPERSONIC_SPEED: f32 = 2200.0;

pub struct GroundSim {
    car: CarState,
    ball: BallState,
    yaw: f32,
}

impl GroundSim {
    pub fn new(car: CarState, ball: BallState, yaw: f32) -> Self {
        Self { car, ball, yaw }
    }

    pub fn packet(&self) -> DataPacket {
        DataPacket::new(self.car, self.ball)
    }

    pub fn car(&self) -> &CarState {
        &self.car
    }

    /// Advances one bot tick under `controls`.
    pub fn step(&mut self, controls: &ControlOutput) -> Result<()> {
        let dt = 1.0 / tick::BOT_TICK_HZ;
        let car = &mut self.car;

        let forward = car.velocity.dot(&car.orientation.nose()).max(0.0);
        let boosting = controls.boost() && car.boost > 0.0;
        let drive = throttle_acceleration(forward.min(speed::BOOSTED_MAX_SPEED - 1.0))
            .context("throttle model rejected sim speed")?;

        let acceleration = if boosting {
            car.boost = (car.boost - BOOST_CONSUMPTION * dt).max(0.0);
            drive + accel::BOOSTED_ACCELERATION
        } else if controls.throttle() > 0.0 {
            controls.throttle() * drive
        } else if controls.throttle() < 0.0 {
            -controls.throttle() * accel::BRAKING_ACCELERATION
        } else {
            accel::COASTING_ACCELERATION
        };
        let new_speed = (forward + acceleration * dt).clamp(0.0, speed::BOOSTED_MAX_SPEED);

        let mut yaw_rate = controls.steer() * max_angular_velocity(new_speed);
        if controls.slide() {
            yaw_rate *= SLIDE_YAW_FACTOR;
        }
        self.yaw += yaw_rate * dt;

        car.orientation = Orientation::from_euler(0.0, self.yaw, 0.0);
        car.velocity = car.orientation.nose() * new_speed;
        car.position += car.velocity * dt;
        car.angular_velocity = Vector3::new(0.0, 0.0, yaw_rate);
        car.is_supersonic = new_speed > SUPERSONIC_SPEED;
        car.elapsed_seconds += dt;

        self.step_ball(dt);
        Ok(())
    }

    fn step_ball(&mut self, dt: f32) {
        let ball_state = &mut self.ball;
        ball_state.velocity.z -= accel::GRAVITY * dt;
        ball_state.position += ball_state.velocity * dt;
        if ball_state.position.z < ball::RADIUS {
            ball_state.position.z = ball::RADIUS;
            ball_state.velocity.z = -ball_state.velocity.z * ball::COEFFICIENT_OF_RESTITUTION;
        }
    }
}

/// One line of `run` output.
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub tick: usize,
    pub time: f32,
    pub position: Vector3<f32>,
    pub speed: f32,
    pub boost: f32,
    pub controls: ControlOutput,
    pub branch: Option<String>,
    pub pending: usize,
    pub maneuvers: Vec<Maneuver>,
}

/// Runs `scenario` to completion, handing every tick's report to `on_tick`.
///
/// The scenario plan stands in for a planner: its unfinished tactics are
/// re-submitted before every tick, the head as the manager last left it so
/// path progress and tactician state carry over. An off-course path is kept
/// and the manager falls back to driving straight at the target.
pub fn run_scenario(
    scenario: &Scenario,
    config: ControlConfig,
    mut on_tick: impl FnMut(&TickReport),
) -> Result<CarState> {
    let mut manager = TacticManager::new(scenario.team, TacticianRegistry::standard())
        .context("incomplete tactician registry")?
        .with_config(config);
    manager.set_end_goal(scenario.end_goal);

    let mut plan: VecDeque<_> = scenario.tactics()?.into();
    let mut sim = GroundSim::new(scenario.initial_car(), scenario.ball, scenario.car.yaw);
    let mut predictor = BallisticPredictor::new();
    let mut maneuvers = ManeuverLog::new();
    let mut renderer = RecordingRenderer::new();

    for tick in 0..scenario.ticks {
        let packet = sim.packet();
        predictor.observe(packet.ball, packet.now());

        let prediction = predictor.ball_prediction();
        while plan
            .front()
            .is_some_and(|t| t.is_done(&packet, prediction.as_ref(), &manager.config().tactic))
        {
            if let Some(done) = plan.pop_front() {
                log::info!("tick {tick}: {} tactic complete", done.kind);
            }
        }
        manager.clear_tactics();
        for tactic in &plan {
            manager.add_tactic(tactic.clone());
        }

        renderer.clear();
        let controls = manager
            .execute(&packet, &predictor, &mut maneuvers, &mut renderer)
            .with_context(|| format!("control loop failed at tick {tick}"))?;

        if let (Some(ran), Some(head)) = (manager.take_last_run(), plan.front_mut()) {
            if ran.kind == head.kind && ran.subject == head.subject {
                let newly_off_course = ran.path().is_some_and(|p| p.is_off_course())
                    && !head.path().is_some_and(|p| p.is_off_course());
                if newly_off_course {
                    log::info!("tick {tick}: {} path off course", ran.kind);
                }
                *head = ran;
            }
        }

        on_tick(&TickReport {
            tick,
            time: packet.now(),
            position: packet.car.position,
            speed: packet.car.speed(),
            boost: packet.car.boost,
            controls,
            branch: renderer.branch_info.clone(),
            pending: plan.len(),
            maneuvers: maneuvers.drain(),
        });

        sim.step(&controls)?;
    }

    Ok(*sim.car())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_run() -> Scenario {
        Scenario::from_json(
            r#"{
                "ticks": 90,
                "car": { "position": [0.0, -3000.0, 17.0], "yaw": 1.5708, "boost": 50.0 },
                "plan": [
                    { "kind": "Kickoff", "target": [0.0, -100.0, 17.0], "time": 3.0,
                      "waypoints": [[0.0, -3000.0, 17.0]] }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_stationary_coast_stays_put() {
        let car = CarState { position: Vector3::new(0.0, 0.0, 17.0), ..Default::default() };
        let mut sim = GroundSim::new(car, BallState::default(), 0.0);
        sim.step(&ControlOutput::new()).unwrap();
        assert_eq!(sim.car().position, Vector3::new(0.0, 0.0, 17.0));
    }

    #[test]
    fn test_full_throttle_accelerates_along_nose() {
        let mut sim = GroundSim::new(CarState::default(), BallState::default(), 0.0);
        for _ in 0..60 {
            sim.step(&ControlOutput::new().with_throttle(1.0)).unwrap();
        }
        let car = sim.car();
        assert!(car.velocity.x > 800.0);
        assert!(car.velocity.y.abs() < 1e-3);
        assert!((car.elapsed_seconds - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_steering_turns_toward_right() {
        let car = CarState { velocity: Vector3::new(1000.0, 0.0, 0.0), ..Default::default() };
        let mut sim = GroundSim::new(car, BallState::default(), 0.0);
        sim.step(&ControlOutput::new().with_throttle(1.0).with_steer(1.0)).unwrap();
        // Identity heading: right is +y.
        assert!(sim.car().velocity.y > 0.0);
        assert!(sim.car().yaw_rate() > 0.0);
    }

    #[test]
    fn test_boost_drains_tank() {
        let car = CarState { boost: 10.0, ..Default::default() };
        let mut sim = GroundSim::new(car, BallState::default(), 0.0);
        for _ in 0..60 {
            sim.step(&ControlOutput::new().with_throttle(1.0).with_boost(true)).unwrap();
        }
        assert_eq!(sim.car().boost, 0.0);
    }

    fn first_ticks(json: &str, ticks: usize) -> Vec<TickReport> {
        let scenario = Scenario::from_json(json).unwrap();
        let mut reports = Vec::new();
        run_scenario(&scenario, ControlConfig::default(), |r| reports.push(r.clone())).unwrap();
        assert_eq!(reports.len(), ticks);
        reports
    }

    #[test]
    fn test_hit_keeps_boosting_below_reserve() {
        let reports = first_ticks(
            r#"{
                "ticks": 20,
                "car": { "position": [0.0, -3000.0, 17.0], "yaw": 1.5707964, "boost": 13.0 },
                "ball": { "position": [0.0, 3000.0, 92.75], "velocity": [0.0, 0.0, 0.0] },
                "plan": [{ "kind": "HitBall", "target": [0.0, 3000.0, 92.75], "time": 4.0 }]
            }"#,
            20,
        );

        assert!(reports.iter().all(|r| r.pending == 1));
        assert!(reports[2].boost < 12.0);
        for report in &reports {
            assert!(report.controls.boost(), "boost dropped at tick {} with {} left", report.tick, report.boost);
        }
    }

    #[test]
    fn test_off_course_path_falls_back_to_simple() {
        let reports = first_ticks(
            r#"{
                "ticks": 5,
                "car": { "position": [3000.0, -3000.0, 17.0], "yaw": 1.5707964, "boost": 50.0 },
                "plan": [
                    { "kind": "Dribble", "target": [0.0, 0.0, 17.0], "time": 3.0,
                      "waypoints": [[0.0, -3000.0, 17.0]] }
                ]
            }"#,
            5,
        );

        assert_eq!(reports[0].branch.as_deref(), Some("path: straight"));
        for report in &reports[1..] {
            assert_eq!(report.branch.as_deref(), Some("simple"));
        }
    }

    #[test]
    fn test_straight_run_makes_progress() {
        let scenario = straight_run();
        let mut reports = Vec::new();
        let car = run_scenario(&scenario, ControlConfig::default(), |r| reports.push(r.clone())).unwrap();

        assert_eq!(reports.len(), 90);
        assert_eq!(reports[0].controls.throttle(), 1.0);
        assert!(reports[0].controls.boost());
        assert!(car.position.y > -2000.0);
        assert!(car.position.x.abs() < 50.0);
    }
}
