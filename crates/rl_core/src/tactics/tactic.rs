//! Tactic values: what the car should do next and where

use crate::engine::ball_prediction::PredictionSequence;
use crate::engine::config::TacticConfig;
use crate::engine::state::{DataPacket, Moment};
use crate::path::Path;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TacticType {
    FrontFlip,
    WallRide,
    HitBall,
    Defend,
    Dribble,
    Kickoff,
    WaveDash,
    Shadow,
    TakeTheShot,
}

impl TacticType {
    pub const ALL: [TacticType; 9] = [
        TacticType::FrontFlip,
        TacticType::WallRide,
        TacticType::HitBall,
        TacticType::Defend,
        TacticType::Dribble,
        TacticType::Kickoff,
        TacticType::WaveDash,
        TacticType::Shadow,
        TacticType::TakeTheShot,
    ];

    /// Tactics whose subject moves with the ball forecast.
    pub fn tracks_ball(self) -> bool {
        matches!(self, TacticType::HitBall | TacticType::WallRide)
    }
}

impl fmt::Display for TacticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// State a tactician carries from one tick to the next for one tactic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TacticianState {
    pub am_boosting: bool,
}

#[derive(Debug, Clone)]
pub struct Tactic {
    pub kind: TacticType,
    pub subject: Moment,
    path: Option<Path>,
    pub state: TacticianState,
}

impl Tactic {
    pub fn new(kind: TacticType, subject: Moment) -> Self {
        Self { kind, subject, path: None, state: TacticianState::default() }
    }

    pub fn with_path(mut self, path: Path) -> Self {
        self.path = Some(path);
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    pub(crate) fn path_mut(&mut self) -> Option<&mut Path> {
        self.path.as_mut()
    }

    /// Reached, or no longer reachable.
    ///
    /// A ball-tracking tactic is obsolete once no forecast sample passes
    /// within tolerance of its subject. Without a forecast that check is
    /// skipped.
    pub fn is_done(
        &self,
        input: &DataPacket,
        prediction: Option<&PredictionSequence>,
        config: &TacticConfig,
    ) -> bool {
        if (input.car.position - self.subject.position).norm() < config.arrival_radius {
            return true;
        }

        match prediction {
            Some(prediction) if self.kind.tracks_ball() => {
                !prediction.passes_near(&self.subject.position, config.prediction_tolerance)
            }
            _ => false,
        }
    }
}
