//! Vehicle physics model and the per-tick data it works on

pub mod accels;
pub mod angles;
pub mod ball_prediction;
pub mod config;
pub mod controls;
pub mod kinematics;
pub mod maneuver;
pub mod physics_constants;
pub mod renderer;
pub mod state;

#[cfg(test)]
pub(crate) mod proptest_gen;

pub use ball_prediction::{BallPredictionSource, BallSample, PredictionSequence};
pub use controls::ControlOutput;
pub use state::{BallState, CarState, DataPacket, Moment, Orientation};
