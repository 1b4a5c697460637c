//! Tactician seam and the type -> tactician dispatch table

use super::tactic::{TacticType, TacticianState};
use super::{FlipTactician, PathTactician, RollingTactician, UnhandledTactician};
use crate::engine::ball_prediction::PredictionSequence;
use crate::engine::config::ControlConfig;
use crate::engine::controls::ControlOutput;
use crate::engine::maneuver::ManeuverSink;
use crate::engine::renderer::DebugRenderer;
use crate::engine::state::{DataPacket, Moment};
use crate::error::{ControlError, Result};
use crate::path::{Path, PathExecutor};
use std::collections::HashMap;

/// Everything a tactician may read or notify during one tick.
pub struct TacticContext<'a> {
    pub input: &'a DataPacket,
    pub prediction: Option<&'a PredictionSequence>,
    pub maneuvers: &'a mut dyn ManeuverSink,
    pub renderer: &'a mut dyn DebugRenderer,
    pub executor: &'a PathExecutor,
}

impl TacticContext<'_> {
    pub fn config(&self) -> &ControlConfig {
        self.executor.config()
    }
}

/// The active tactic as handed to its tactician.
#[derive(Debug)]
pub struct TacticRequest<'t> {
    pub kind: TacticType,
    pub subject: Moment,
    pub state: TacticianState,
    pub path: Option<&'t mut Path>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TacticStep {
    pub controls: ControlOutput,
    /// Replaces the tactic's stored state
    pub state: TacticianState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TacticOutcome {
    Handled(TacticStep),
    /// The tactician has no behavior for this tactic yet
    NotHandled,
}

impl TacticOutcome {
    pub fn handled(controls: ControlOutput, state: TacticianState) -> Self {
        TacticOutcome::Handled(TacticStep { controls, state })
    }
}

pub trait Tactician {
    fn execute(
        &self,
        ctx: &mut TacticContext<'_>,
        request: TacticRequest<'_>,
    ) -> Result<TacticOutcome>;
}

/// Dispatch table from tactic type to tactician.
#[derive(Default)]
pub struct TacticianRegistry {
    tacticians: HashMap<TacticType, Box<dyn Tactician>>,
}

impl TacticianRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The full built-in table.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(TacticType::FrontFlip, Box::new(FlipTactician));
        registry.register(TacticType::WallRide, Box::new(RollingTactician));
        registry.register(TacticType::HitBall, Box::new(RollingTactician));
        registry.register(TacticType::Defend, Box::new(PathTactician));
        registry.register(TacticType::Dribble, Box::new(PathTactician));
        registry.register(TacticType::Kickoff, Box::new(PathTactician));
        registry.register(TacticType::WaveDash, Box::new(UnhandledTactician));
        registry.register(TacticType::Shadow, Box::new(UnhandledTactician));
        registry.register(TacticType::TakeTheShot, Box::new(UnhandledTactician));
        registry
    }

    /// Adds or replaces the tactician for `kind`.
    pub fn register(&mut self, kind: TacticType, tactician: Box<dyn Tactician>) -> &mut Self {
        self.tacticians.insert(kind, tactician);
        self
    }

    pub fn get(&self, kind: TacticType) -> Option<&dyn Tactician> {
        self.tacticians.get(&kind).map(|t| t.as_ref())
    }

    /// Fails on the first tactic type without a tactician.
    pub fn validate(&self) -> Result<()> {
        match TacticType::ALL.iter().find(|kind| !self.tacticians.contains_key(kind)) {
            Some(kind) => Err(ControlError::MissingTactician(*kind)),
            None => Ok(()),
        }
    }

    /// Looks up the tactician for `kind`.
    ///
    /// # Errors
    /// `MissingTactician` when nothing is registered for `kind`.
    pub fn dispatch(&self, kind: TacticType) -> Result<&dyn Tactician> {
        self.get(kind).ok_or(ControlError::MissingTactician(kind))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_is_complete() {
        assert!(TacticianRegistry::standard().validate().is_ok());
    }

    #[test]
    fn test_missing_entry_reported() {
        let mut registry = TacticianRegistry::standard();
        registry.tacticians.remove(&TacticType::WaveDash);

        let err = registry.validate().unwrap_err();
        assert!(matches!(err, ControlError::MissingTactician(TacticType::WaveDash)));
        assert!(registry.dispatch(TacticType::WaveDash).is_err());
        assert!(registry.dispatch(TacticType::HitBall).is_ok());
    }

    #[test]
    fn test_empty_registry_fails_on_first_type() {
        let err = TacticianRegistry::empty().validate().unwrap_err();
        assert!(matches!(err, ControlError::MissingTactician(TacticType::FrontFlip)));
    }
}
