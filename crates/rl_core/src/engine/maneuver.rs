//! Maneuver requests handed to the host's maneuver runner

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Maneuver {
    /// Forward dodge toward `target`; `flip_early` skips the jump hold.
    FrontFlip { target: Vector3<f32>, flip_early: bool },
}

/// Fire-and-forget receiver of maneuver requests.
pub trait ManeuverSink {
    fn request(&mut self, maneuver: Maneuver);
}

/// Drops every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreManeuvers;

impl ManeuverSink for IgnoreManeuvers {
    fn request(&mut self, _maneuver: Maneuver) {}
}

/// Keeps requests in order for inspection.
#[derive(Debug, Clone, Default)]
pub struct ManeuverLog {
    requests: Vec<Maneuver>,
}

impl ManeuverLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[Maneuver] {
        &self.requests
    }

    /// Hands back and forgets the collected requests.
    pub fn drain(&mut self) -> Vec<Maneuver> {
        std::mem::take(&mut self.requests)
    }
}

impl ManeuverSink for ManeuverLog {
    fn request(&mut self, maneuver: Maneuver) {
        self.requests.push(maneuver);
    }
}
