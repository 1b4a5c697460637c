//! Scenario files
//!
//! ```json
//! {
//!   "ticks": 120,
//!   "car": { "position": [0.0, -3000.0, 17.0], "yaw": 1.5708, "boost": 50.0 },
//!   "ball": { "position": [0.0, 0.0, 93.0], "velocity": [0.0, 0.0, 0.0] },
//!   "plan": [{ "kind": "Kickoff", "target": [0.0, -100.0, 17.0], "time": 3.0 }]
//! }
//! ```

use anyhow::{bail, Context, Result};
use nalgebra::Vector3;
use rl_core::engine::state::{BallState, CarState, Orientation};
use rl_core::{Moment, Path, Segment, Tactic, TacticType, Team};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarSetup {
    pub position: Vector3<f32>,
    #[serde(default = "zero_vector")]
    pub velocity: Vector3<f32>,
    /// Heading in radians, 0 is +x
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub boost: f32,
}

/// One tactic the scenario's planner keeps submitting until it is done.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedTactic {
    pub kind: TacticType,
    pub target: Vector3<f32>,
    /// Game time the target should be reached at
    pub time: f32,
    /// Straight-line path from the first waypoint through the rest to the target
    #[serde(default)]
    pub waypoints: Vec<Vector3<f32>>,
}

impl PlannedTactic {
    pub fn to_tactic(&self, start_time: f32) -> Result<Tactic> {
        let subject = Moment::new(self.target, self.time);
        let tactic = Tactic::new(self.kind, subject);
        if self.waypoints.is_empty() {
            return Ok(tactic);
        }

        let mut points = self.waypoints.clone();
        points.push(self.target);
        let segments = points.windows(2).map(|pair| Segment::straight(pair[0], pair[1])).collect();
        let path = Path::new(segments, subject, start_time)
            .with_context(|| format!("invalid path for {} tactic", self.kind))?;
        Ok(tactic.with_path(path))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_team")]
    pub team: Team,
    pub ticks: usize,
    pub car: CarSetup,
    #[serde(default)]
    pub ball: BallState,
    #[serde(default)]
    pub plan: Vec<PlannedTactic>,
    #[serde(default)]
    pub end_goal: Option<Vector3<f32>>,
}

fn zero_vector() -> Vector3<f32> {
    Vector3::zeros()
}

fn default_team() -> Team {
    Team::Blue
}

impl Scenario {
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("in scenario {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(json).context("malformed scenario JSON")?;
        if scenario.ticks == 0 {
            bail!("scenario must run for at least one tick");
        }
        Ok(scenario)
    }

    pub fn initial_car(&self) -> CarState {
        CarState {
            position: self.car.position,
            velocity: self.car.velocity,
            orientation: Orientation::from_euler(0.0, self.car.yaw, 0.0),
            boost: self.car.boost,
            ..Default::default()
        }
    }

    pub fn tactics(&self) -> Result<Vec<Tactic>> {
        self.plan.iter().map(|planned| planned.to_tactic(0.0)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const STRAIGHT: &str = r#"{
        "ticks": 60,
        "car": { "position": [0.0, -3000.0, 17.0], "yaw": 1.5708, "boost": 50.0 },
        "plan": [
            { "kind": "Kickoff", "target": [0.0, -100.0, 17.0], "time": 3.0,
              "waypoints": [[0.0, -3000.0, 17.0], [0.0, -1500.0, 17.0]] }
        ]
    }"#;

    #[test]
    fn test_parse_with_defaults() {
        let scenario = Scenario::from_json(STRAIGHT).unwrap();
        assert_eq!(scenario.team, Team::Blue);
        assert_eq!(scenario.ball, BallState::default());
        assert!(scenario.end_goal.is_none());

        let tactics = scenario.tactics().unwrap();
        assert_eq!(tactics.len(), 1);
        assert_eq!(tactics[0].path().unwrap().segments().len(), 2);
        assert!((tactics[0].path().unwrap().length() - 2900.0).abs() < 1e-2);
    }

    #[test]
    fn test_zero_ticks_rejected() {
        let json = STRAIGHT.replace("\"ticks\": 60", "\"ticks\": 0");
        assert!(Scenario::from_json(&json).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{STRAIGHT}").unwrap();
        let scenario = Scenario::load(file.path()).unwrap();
        assert_eq!(scenario.ticks, 60);
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = Scenario::load(std::path::Path::new("/nonexistent/scenario.json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read scenario"));
    }
}
