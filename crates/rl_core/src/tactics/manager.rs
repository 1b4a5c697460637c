//! # Tactic Manager
//!
//! Owns the queue of upcoming tactics and turns the active one into controls
//! every tick.
//!
//! ## Tick
//! 1. Query the ball forecast once
//! 2. Retire the active tactic if it is done
//! 3. Dispatch it to its tactician and store the returned state
//! 4. Draw the tactic chain
//! 5. Drop the head of the queue: queued tactics get one tick each unless
//!    re-queued by the planner
//!
//! The dropped head keeps its path progress, off-course flag and tactician
//! state. The planner takes it back with [`TacticManager::take_last_run`] and
//! re-queues it, or re-plans when its path went off course.
//!
//! With an empty queue the dribble tactic toward the opponent goal is active.

use super::tactic::{Tactic, TacticType};
use super::tactician::{TacticContext, TacticOutcome, TacticRequest, TacticianRegistry};
use crate::engine::ball_prediction::BallPredictionSource;
use crate::engine::config::ControlConfig;
use crate::engine::controls::ControlOutput;
use crate::engine::maneuver::ManeuverSink;
use crate::engine::physics_constants::field;
use crate::engine::renderer::{DebugRenderer, LineColor};
use crate::engine::state::{DataPacket, Moment};
use crate::error::Result;
use crate::path::PathExecutor;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Blue,
    Orange,
}

impl Team {
    pub fn own_goal(self) -> Vector3<f32> {
        match self {
            Team::Blue => field::blue_goal_center(),
            Team::Orange => field::orange_goal_center(),
        }
    }

    pub fn opponent_goal(self) -> Vector3<f32> {
        match self {
            Team::Blue => field::orange_goal_center(),
            Team::Orange => field::blue_goal_center(),
        }
    }
}

pub struct TacticManager {
    team: Team,
    registry: TacticianRegistry,
    executor: PathExecutor,
    tactics: VecDeque<Tactic>,
    defend: Tactic,
    /// Active whenever the queue is empty
    fallback: Tactic,
    end_goal: Option<Vector3<f32>>,
    /// Queued tactic dispatched on the last tick
    last_run: Option<Tactic>,
}

impl TacticManager {
    /// # Errors
    /// `MissingTactician` when `registry` does not cover every tactic type.
    pub fn new(team: Team, registry: TacticianRegistry) -> Result<Self> {
        registry.validate()?;
        Ok(Self {
            team,
            registry,
            executor: PathExecutor::default(),
            tactics: VecDeque::new(),
            defend: Tactic::new(TacticType::Defend, Moment::new(team.own_goal(), 0.0)),
            fallback: Tactic::new(TacticType::Dribble, Moment::new(team.opponent_goal(), 0.0)),
            end_goal: None,
            last_run: None,
        })
    }

    pub fn with_config(mut self, config: ControlConfig) -> Self {
        self.executor = PathExecutor::new(config);
        self
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn config(&self) -> &ControlConfig {
        self.executor.config()
    }

    pub fn add_tactic(&mut self, tactic: Tactic) {
        self.tactics.push_back(tactic);
    }

    /// Replaces the whole queue with `tactic`.
    pub fn set_tactic(&mut self, tactic: Tactic) {
        self.tactics.clear();
        self.tactics.push_back(tactic);
    }

    pub fn clear_tactics(&mut self) {
        self.tactics.clear();
    }

    /// Head of the queue, or the fallback when the queue is empty.
    pub fn active_tactic(&self) -> &Tactic {
        self.tactics.front().unwrap_or(&self.fallback)
    }

    pub fn next_target(&self) -> Vector3<f32> {
        self.active_tactic().subject.position
    }

    pub fn pending_len(&self) -> usize {
        self.tactics.len()
    }

    pub fn is_idle(&self) -> bool {
        self.tactics.is_empty()
    }

    pub fn defend_tactic(&self) -> &Tactic {
        &self.defend
    }

    pub fn set_end_goal(&mut self, end_goal: Option<Vector3<f32>>) {
        self.end_goal = end_goal;
    }

    /// The queued tactic the last tick ran and then dropped, as it was left
    /// by its tactician. `None` when the fallback ran.
    pub fn take_last_run(&mut self) -> Option<Tactic> {
        self.last_run.take()
    }

    pub fn execute(
        &mut self,
        input: &DataPacket,
        predictions: &dyn BallPredictionSource,
        maneuvers: &mut dyn ManeuverSink,
        renderer: &mut dyn DebugRenderer,
    ) -> Result<ControlOutput> {
        let prediction = predictions.ball_prediction();
        self.last_run = None;

        if let Some(head) = self.tactics.front() {
            if head.is_done(input, prediction.as_ref(), &self.executor.config().tactic) {
                log::debug!("{} tactic done, retiring", head.kind);
                self.tactics.pop_front();
            }
        }

        let tactic = match self.tactics.front_mut() {
            Some(tactic) => tactic,
            None => &mut self.fallback,
        };
        let tactician = self.registry.dispatch(tactic.kind)?;

        let mut ctx = TacticContext {
            input,
            prediction: prediction.as_ref(),
            maneuvers: &mut *maneuvers,
            renderer: &mut *renderer,
            executor: &self.executor,
        };
        let request = TacticRequest {
            kind: tactic.kind,
            subject: tactic.subject,
            state: tactic.state,
            path: tactic.path_mut(),
        };

        let controls = match tactician.execute(&mut ctx, request)? {
            TacticOutcome::Handled(step) => {
                tactic.state = step.state;
                step.controls
            }
            TacticOutcome::NotHandled => {
                log::debug!("{} not handled, sending neutral controls", tactic.kind);
                ControlOutput::new()
            }
        };

        self.render_chain(input.car.position, renderer);

        if let Some(ran) = self.tactics.pop_front() {
            log::debug!("{} tactics left in queue", self.tactics.len());
            self.last_run = Some(ran);
        }
        Ok(controls)
    }

    /// Head green, the rest orange, then red to the end goal.
    fn render_chain(&self, car_position: Vector3<f32>, renderer: &mut dyn DebugRenderer) {
        let mut previous = car_position;

        if self.tactics.is_empty() {
            let next = self.fallback.subject.position;
            renderer.draw_line(LineColor::Green, previous, next);
            previous = next;
        } else {
            for (i, tactic) in self.tactics.iter().enumerate() {
                let color = if i == 0 { LineColor::Green } else { LineColor::Orange };
                renderer.draw_line(color, previous, tactic.subject.position);
                previous = tactic.subject.position;
            }
        }

        if let Some(end_goal) = self.end_goal {
            renderer.draw_line(LineColor::Red, previous, end_goal);
        }
    }
}
