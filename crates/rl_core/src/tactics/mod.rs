//! Tactic layer
//!
//! A [`Tactic`] says what to do and where; a [`Tactician`] knows how. The
//! [`TacticManager`] keeps the queue and dispatches the active tactic to the
//! tactician registered for its type.

pub mod flip;
pub mod manager;
pub mod path_follow;
pub mod rolling;
pub mod tactic;
pub mod tactician;
pub mod unhandled;

pub use flip::FlipTactician;
pub use manager::{TacticManager, Team};
pub use path_follow::PathTactician;
pub use rolling::RollingTactician;
pub use tactic::{Tactic, TacticType, TacticianState};
pub use tactician::{
    TacticContext, TacticOutcome, TacticRequest, TacticStep, Tactician, TacticianRegistry,
};
pub use unhandled::UnhandledTactician;
