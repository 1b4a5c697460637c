//! Path following
//!
//! - `segment`: straight, arc and jump primitives
//! - `trajectory`: the chained [`Path`] with its progress cursor
//! - `executor`: per-tick controls for a path or a bare target

pub mod executor;
pub mod segment;
pub mod trajectory;

pub use executor::PathExecutor;
pub use segment::{ArcDirection, ArcGeometry, Segment, SegmentType};
pub use trajectory::{ActiveSegment, Path};
