//! Offline driver for the control core: scenario files and a flat-ground
//! integrator to run them against.

pub mod scenario;
pub mod sim;

pub use scenario::{PlannedTactic, Scenario};
pub use sim::{run_scenario, GroundSim, TickReport};
