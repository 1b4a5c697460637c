//! # rl_core - Tick-Driven Vehicle Control Core
//!
//! Turns a per-tick snapshot of car and ball into actuator commands for a
//! soccar bot.
//!
//! ## Features
//! - Fitted kinematic model (curvature, turn radius, throttle acceleration)
//! - Path following with PD steering and time-budgeted throttle/boost
//! - Tactic queue with a validated type -> tactician dispatch table
//! - JSON-loadable tuning config
//!
//! ## Usage
//! ```rust
//! use rl_core::engine::ball_prediction::NoPrediction;
//! use rl_core::engine::maneuver::IgnoreManeuvers;
//! use rl_core::engine::renderer::NullRenderer;
//! use rl_core::{DataPacket, TacticManager, TacticianRegistry, Team};
//!
//! let mut manager = TacticManager::new(Team::Blue, TacticianRegistry::standard()).unwrap();
//! let controls = manager
//!     .execute(&DataPacket::default(), &NoPrediction, &mut IgnoreManeuvers, &mut NullRenderer)
//!     .unwrap();
//! assert!((-1.0..=1.0).contains(&controls.steer()));
//! ```

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Controllers take many collaborators per call
#![allow(clippy::too_many_arguments)]

pub mod engine;
pub mod error;
pub mod path;
pub mod tactics;

pub use engine::config::ControlConfig;
pub use engine::{BallState, CarState, ControlOutput, DataPacket, Moment, Orientation};
pub use error::{ControlError, Result};
pub use path::{Path, PathExecutor, Segment, SegmentType};
pub use tactics::{Tactic, TacticManager, TacticType, Tactician, TacticianRegistry, Team};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
