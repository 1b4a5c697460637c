use crate::tactics::TacticType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControlError {
    /// A physical quantity the kinematic model cannot produce under normal play.
    #[error("{quantity} out of domain: {value}")]
    OutOfDomain { quantity: &'static str, value: f32 },

    #[error("No tactician registered for {0:?}")]
    MissingTactician(TacticType),

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),

    #[error("Path has no segments")]
    EmptyPath,

    #[error("Path is discontinuous after segment {index} (gap {gap:.3})")]
    DiscontinuousPath { index: usize, gap: f32 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config IO error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl ControlError {
    /// Whether the tick loop can keep running after this error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ControlError::OutOfDomain { .. } => false,
            ControlError::MissingTactician(_) => false,
            ControlError::DegenerateGeometry(_) => true,
            // The planner can hand over a new path next tick.
            ControlError::EmptyPath => true,
            ControlError::DiscontinuousPath { .. } => true,
            ControlError::InvalidConfig(_) => false,
            ControlError::ConfigIo(_) => true,
            ControlError::ConfigParse(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ControlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverability_taxonomy() {
        assert!(!ControlError::OutOfDomain { quantity: "speed", value: 2300.0 }.is_recoverable());
        assert!(!ControlError::MissingTactician(TacticType::Kickoff).is_recoverable());
        assert!(ControlError::DegenerateGeometry("singular").is_recoverable());
        assert!(ControlError::DiscontinuousPath { index: 0, gap: 3.0 }.is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let err = ControlError::OutOfDomain { quantity: "speed", value: 2300.0 };
        assert_eq!(err.to_string(), "speed out of domain: 2300");

        let err = ControlError::MissingTactician(TacticType::WaveDash);
        assert_eq!(err.to_string(), "No tactician registered for WaveDash");
    }
}
