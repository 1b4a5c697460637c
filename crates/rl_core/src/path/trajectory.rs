//! Planned trajectory: an ordered chain of segments toward a target moment

use super::segment::Segment;
use crate::engine::state::{flatten, Moment};
use crate::error::{ControlError, Result};
use nalgebra::Vector3;

/// Largest allowed gap between one segment's end and the next one's start (uu)
const CONTINUITY_TOLERANCE: f32 = 1.0;

/// One chord of the subdivided chain.
#[derive(Debug, Clone, Copy)]
struct Piece {
    root: usize,
    start: Vector3<f32>,
    end: Vector3<f32>,
    /// Chain distance at `start`
    offset: f32,
    length: f32,
}

impl Piece {
    fn point_at(&self, distance_into: f32) -> Vector3<f32> {
        if self.length <= 0.0 {
            return self.end;
        }
        let t = (distance_into / self.length).clamp(0.0, 1.0);
        self.start + (self.end - self.start) * t
    }

    /// Ground-plane projection of `position`: (distance along piece, squared gap).
    fn project(&self, position: &Vector3<f32>) -> (f32, f32) {
        let along = flatten(&(self.end - self.start));
        let rel = flatten(&(position - self.start));
        let t = if self.length > 0.0 {
            (rel.dot(&along) / (self.length * self.length)).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let gap = rel - along * t;
        (t * self.length, gap.norm_squared())
    }
}

/// The segment the car is currently on.
#[derive(Debug, Clone, Copy)]
pub struct ActiveSegment<'a> {
    pub index: usize,
    root: &'a Segment,
}

impl<'a> ActiveSegment<'a> {
    /// The planner's segment, independent of subdivision.
    pub fn root(&self) -> &'a Segment {
        self.root
    }
}

#[derive(Debug, Clone)]
pub struct Path {
    segments: Vec<Segment>,
    pieces: Vec<Piece>,
    /// Chain distance at the end of each root segment
    segment_ends: Vec<f32>,
    length: f32,
    target: Moment,
    start_time: f32,
    progress: f32,
    piece_index: usize,
    off_course: bool,
}

impl Path {
    /// Builds a path from chained segments.
    ///
    /// # Errors
    /// `EmptyPath` without segments, `DiscontinuousPath` when a segment does
    /// not start where the previous one ended.
    pub fn new(segments: Vec<Segment>, target: Moment, start_time: f32) -> Result<Self> {
        if segments.is_empty() {
            return Err(ControlError::EmptyPath);
        }
        for (index, pair) in segments.windows(2).enumerate() {
            let gap = (pair[0].end - pair[1].start).norm();
            if gap > CONTINUITY_TOLERANCE {
                return Err(ControlError::DiscontinuousPath { index, gap });
            }
        }

        let mut pieces = Vec::new();
        let mut segment_ends = Vec::with_capacity(segments.len());
        let mut offset = 0.0;
        for (root, segment) in segments.iter().enumerate() {
            let points = segment.sample_points();
            for pair in points.windows(2) {
                let length = flatten(&(pair[1] - pair[0])).norm();
                pieces.push(Piece { root, start: pair[0], end: pair[1], offset, length });
                offset += length;
            }
            segment_ends.push(offset);
        }

        Ok(Self {
            segments,
            pieces,
            segment_ends,
            length: offset,
            target,
            start_time,
            progress: 0.0,
            piece_index: 0,
            off_course: false,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn target(&self) -> &Moment {
        &self.target
    }

    /// Scheduled arrival time.
    pub fn end_time(&self) -> f32 {
        self.target.time
    }

    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    /// Total ground-plane length.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Chain distance already covered.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// The whole chain has been driven.
    pub fn is_complete(&self) -> bool {
        self.progress >= self.length - 1e-3
    }

    pub fn is_off_course(&self) -> bool {
        self.off_course
    }

    /// Flags the path for re-planning. Returns true only on the first call.
    pub fn mark_off_course(&mut self) -> bool {
        if self.off_course {
            return false;
        }
        self.off_course = true;
        true
    }

    /// Moves the progress cursor to the car's projection. Never moves backwards.
    pub fn advance(&mut self, position: &Vector3<f32>) {
        let mut best = (self.piece_index, f32::INFINITY, 0.0);
        for (i, piece) in self.pieces.iter().enumerate().skip(self.piece_index) {
            let (along, gap) = piece.project(position);
            if gap < best.1 {
                best = (i, gap, piece.offset + along);
            }
        }
        self.piece_index = best.0;
        self.progress = self.progress.max(best.2);
    }

    /// Point at a chain distance, clamped to the path.
    pub fn point_at(&self, distance: f32) -> Vector3<f32> {
        let distance = distance.clamp(0.0, self.length);
        let piece = self
            .pieces
            .iter()
            .find(|p| distance <= p.offset + p.length)
            .or_else(|| self.pieces.last());
        match piece {
            Some(p) => p.point_at(distance - p.offset),
            None => self.target.position,
        }
    }

    /// Lookahead target `lead_time` seconds ahead of the current progress.
    ///
    /// Speed along the chain is whatever is needed to cover the remaining
    /// length by the end time; late paths aim as if one lead time remained.
    pub fn current_target(&self, now: f32, lead_time: f32) -> Vector3<f32> {
        let remaining = (self.length - self.progress).max(0.0);
        let remaining_time = (self.end_time() - now).max(lead_time);
        let required_speed = if remaining_time > 0.0 { remaining / remaining_time } else { 0.0 };
        self.point_at(self.progress + required_speed * lead_time)
    }

    /// Straight-line distance from `position` to the final target.
    pub fn distance_to_target(&self, position: &Vector3<f32>) -> f32 {
        (self.target.position - position).norm()
    }

    /// Where a uniform schedule puts the car at `now`.
    pub fn scheduled_position(&self, now: f32) -> Vector3<f32> {
        let duration = self.end_time() - self.start_time;
        if duration <= 0.0 {
            return self.point_at(self.length);
        }
        let share = ((now - self.start_time) / duration).clamp(0.0, 1.0);
        self.point_at(self.length * share)
    }

    fn active_piece(&self) -> &Piece {
        let index = self
            .pieces
            .iter()
            .skip(self.piece_index)
            .position(|p| p.offset + p.length > self.progress)
            .map(|i| i + self.piece_index)
            .unwrap_or(self.pieces.len() - 1);
        &self.pieces[index]
    }

    /// The segment under the car given the current progress.
    pub fn active_segment(&self) -> ActiveSegment<'_> {
        let piece = self.active_piece();
        ActiveSegment { index: piece.root, root: &self.segments[piece.root] }
    }

    /// The segment after the active one, if any.
    pub fn next_segment(&self) -> Option<&Segment> {
        self.segments.get(self.active_piece().root + 1)
    }

    /// Ground distance left on the active segment.
    pub fn remaining_on_segment(&self) -> f32 {
        let root = self.active_piece().root;
        (self.segment_ends[root] - self.progress).max(0.0)
    }
}
