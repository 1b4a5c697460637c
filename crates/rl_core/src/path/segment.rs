//! Trajectory primitives

use crate::engine::state::flatten;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Largest angle covered by one chord when an arc is subdivided (rad)
const MAX_ARC_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentType {
    Straight,
    Arc,
    /// Marker: jump when the car reaches this piece of the path
    Jump,
}

/// Turning direction of an arc, seen from above in field coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcDirection {
    Clockwise,
    CounterClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcGeometry {
    pub center: Vector3<f32>,
    pub direction: ArcDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentType,
    pub start: Vector3<f32>,
    pub end: Vector3<f32>,
    arc: Option<ArcGeometry>,
}

impl Segment {
    pub fn straight(start: Vector3<f32>, end: Vector3<f32>) -> Self {
        Self { kind: SegmentType::Straight, start, end, arc: None }
    }

    pub fn jump(start: Vector3<f32>, end: Vector3<f32>) -> Self {
        Self { kind: SegmentType::Jump, start, end, arc: None }
    }

    /// Circular arc around `center` from `start` to `end`.
    ///
    /// The radius is taken from `start`; `end` is expected on the same circle.
    pub fn arc(
        start: Vector3<f32>,
        end: Vector3<f32>,
        center: Vector3<f32>,
        direction: ArcDirection,
    ) -> Self {
        Self { kind: SegmentType::Arc, start, end, arc: Some(ArcGeometry { center, direction }) }
    }

    pub fn is_straight(&self) -> bool {
        self.kind == SegmentType::Straight
    }

    pub fn arc_geometry(&self) -> Option<&ArcGeometry> {
        self.arc.as_ref()
    }

    /// Ground-plane length of the segment.
    pub fn flat_distance(&self) -> f32 {
        match self.arc {
            Some(geometry) => self.radius(&geometry) * self.sweep(&geometry).abs(),
            None => flatten(&(self.end - self.start)).norm(),
        }
    }

    /// Overall travel direction (start to end).
    pub fn direction(&self) -> Vector3<f32> {
        self.end - self.start
    }

    fn radius(&self, geometry: &ArcGeometry) -> f32 {
        flatten(&(self.start - geometry.center)).norm()
    }

    /// Signed sweep angle, negative for clockwise arcs.
    fn sweep(&self, geometry: &ArcGeometry) -> f32 {
        let from = self.start - geometry.center;
        let to = self.end - geometry.center;
        let mut ccw = (to.y.atan2(to.x) - from.y.atan2(from.x)).rem_euclid(TAU);
        match geometry.direction {
            ArcDirection::CounterClockwise => ccw,
            ArcDirection::Clockwise => {
                if ccw == 0.0 {
                    ccw = TAU;
                }
                ccw - TAU
            }
        }
    }

    /// Polyline approximation: consecutive points from `start` to `end`.
    pub fn sample_points(&self) -> Vec<Vector3<f32>> {
        let Some(geometry) = self.arc else {
            return vec![self.start, self.end];
        };

        let radius = self.radius(&geometry);
        let sweep = self.sweep(&geometry);
        let steps = ((sweep.abs() / MAX_ARC_STEP).ceil() as usize).max(1);
        let from = self.start - geometry.center;
        let base_angle = from.y.atan2(from.x);

        let mut points = Vec::with_capacity(steps + 1);
        points.push(self.start);
        for i in 1..steps {
            let t = i as f32 / steps as f32;
            let angle = base_angle + sweep * t;
            let z = self.start.z + (self.end.z - self.start.z) * t;
            points.push(Vector3::new(
                geometry.center.x + radius * angle.cos(),
                geometry.center.y + radius * angle.sin(),
                z,
            ));
        }
        points.push(self.end);
        points
    }
}
