//! Ball Prediction
//!
//! The host owns the real prediction service; this module defines its data
//! shape, the query seam, and a ballistic stand-in for offline runs.
//!
//! Absence of a prediction is a normal, frequent outcome (stale data, ball at
//! rest before kickoff) and is modelled as `None`, never as an error.

use super::physics_constants::{accel, ball, field, tick};
use super::state::BallState;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// One time-stamped ball forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSample {
    pub game_seconds: f32,
    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,
}

impl BallSample {
    pub fn new(game_seconds: f32, position: Vector3<f32>, velocity: Vector3<f32>) -> Self {
        Self { game_seconds, position, velocity }
    }

    pub fn as_ball(&self) -> BallState {
        BallState { position: self.position, velocity: self.velocity }
    }
}

/// Time-ordered ball forecast covering a few seconds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredictionSequence {
    samples: Vec<BallSample>,
}

impl PredictionSequence {
    /// Wraps raw samples from the host.
    ///
    /// Returns `None` when there is nothing usable: no samples, or a first
    /// sample with zero velocity (the service reports that before it has a
    /// velocity signal).
    pub fn from_samples(samples: Vec<BallSample>) -> Option<Self> {
        let first = samples.first()?;
        if first.velocity.norm() == 0.0 {
            return None;
        }
        Some(Self { samples })
    }

    pub fn samples(&self) -> &[BallSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True when at least one sample passes within `tolerance` of `target`.
    pub fn passes_near(&self, target: &Vector3<f32>, tolerance: f32) -> bool {
        self.samples.iter().any(|s| (s.position - target).norm() < tolerance)
    }

    /// First sample strictly after `game_seconds`, else the last one.
    pub fn at_time(&self, game_seconds: f32) -> Option<&BallSample> {
        self.samples
            .iter()
            .find(|s| s.game_seconds > game_seconds)
            .or_else(|| self.samples.last())
    }
}

/// Ball state at `game_seconds`, falling back to the current ball when no
/// prediction is available.
pub fn predicted_ball_at_time(
    prediction: Option<&PredictionSequence>,
    current: &BallState,
    game_seconds: f32,
) -> BallState {
    prediction
        .and_then(|p| p.at_time(game_seconds))
        .map(BallSample::as_ball)
        .unwrap_or(*current)
}

/// Query seam for the external prediction service.
pub trait BallPredictionSource {
    /// Fresh forecast for this tick, or `None` when unavailable.
    fn ball_prediction(&self) -> Option<PredictionSequence>;
}

/// Source that never has data.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrediction;

impl BallPredictionSource for NoPrediction {
    fn ball_prediction(&self) -> Option<PredictionSequence> {
        None
    }
}

/// Fixed forecast, mostly for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct StaticPrediction {
    samples: Vec<BallSample>,
}

impl StaticPrediction {
    pub fn new(samples: Vec<BallSample>) -> Self {
        Self { samples }
    }
}

impl BallPredictionSource for StaticPrediction {
    fn ball_prediction(&self) -> Option<PredictionSequence> {
        PredictionSequence::from_samples(self.samples.clone())
    }
}

/// Prediction window (seconds)
pub const PREDICTION_WINDOW_SEC: f32 = 6.0;
/// Spacing between forecast samples (physics ticks)
pub const PREDICTION_STEP_TICKS: usize = 2;

/// Gravity + floor bounce ball integrator with a one-entry cache.
///
/// Ignores walls, spin and car contact. Good enough to drive the control
/// loop offline; the host's service replaces it in a match.
#[derive(Debug, Default)]
pub struct BallisticPredictor {
    current: Option<(BallState, f32)>,
    cache: RefCell<Option<((BallState, f32), Vec<BallSample>)>>,
}

impl BallisticPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the observed ball for this tick.
    pub fn observe(&mut self, ball: BallState, game_seconds: f32) {
        self.current = Some((ball, game_seconds));
    }

    fn simulate(ball: &BallState, start_seconds: f32) -> Vec<BallSample> {
        let steps = (PREDICTION_WINDOW_SEC / tick::PHYSICS_DT) as usize;
        let floor = ball::RADIUS;
        let mut position = ball.position;
        let mut velocity = ball.velocity;
        let mut samples = Vec::with_capacity(steps / PREDICTION_STEP_TICKS + 1);

        for step in 1..=steps {
            velocity.z -= accel::GRAVITY * tick::PHYSICS_DT;
            position += velocity * tick::PHYSICS_DT;

            if position.z < floor {
                position.z = floor;
                velocity.z = -velocity.z * ball::COEFFICIENT_OF_RESTITUTION;
            }
            position.x = position.x.clamp(-field::HALF_WIDTH, field::HALF_WIDTH);
            position.y = position.y.clamp(-field::HALF_LENGTH, field::HALF_LENGTH);

            if step % PREDICTION_STEP_TICKS == 0 {
                let t = start_seconds + step as f32 * tick::PHYSICS_DT;
                samples.push(BallSample::new(t, position, velocity));
            }
        }
        samples
    }
}

impl BallPredictionSource for BallisticPredictor {
    fn ball_prediction(&self) -> Option<PredictionSequence> {
        let key = self.current?;
        if key.0.velocity.norm() == 0.0 {
            return None;
        }

        let mut cache = self.cache.borrow_mut();
        let stale = cache.as_ref().map_or(true, |(cached, _)| *cached != key);
        if stale {
            *cache = Some((key, Self::simulate(&key.0, key.1)));
        }

        let samples = cache.as_ref().map(|(_, s)| s.clone()).unwrap_or_default();
        PredictionSequence::from_samples(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving_ball() -> BallState {
        BallState {
            position: Vector3::new(0.0, 0.0, 500.0),
            velocity: Vector3::new(0.0, 1000.0, 0.0),
        }
    }

    #[test]
    fn test_empty_samples_unavailable() {
        assert!(PredictionSequence::from_samples(Vec::new()).is_none());
    }

    #[test]
    fn test_zero_velocity_unavailable() {
        let samples = vec![BallSample::new(0.0, Vector3::zeros(), Vector3::zeros())];
        assert!(PredictionSequence::from_samples(samples).is_none());
    }

    #[test]
    fn test_at_time_picks_next_sample() {
        let samples = (0..5)
            .map(|i| {
                BallSample::new(i as f32, Vector3::new(0.0, i as f32 * 100.0, 0.0), Vector3::y())
            })
            .collect();
        let prediction = PredictionSequence::from_samples(samples).unwrap();
        assert_eq!(prediction.at_time(1.5).unwrap().game_seconds, 2.0);
        assert_eq!(prediction.at_time(99.0).unwrap().game_seconds, 4.0);
    }

    #[test]
    fn test_predicted_ball_falls_back_to_current() {
        let current = moving_ball();
        assert_eq!(predicted_ball_at_time(None, &current, 3.0), current);
    }

    #[test]
    fn test_ballistic_predictor_needs_observation() {
        let predictor = BallisticPredictor::new();
        assert!(predictor.ball_prediction().is_none());
    }

    #[test]
    fn test_ballistic_ball_falls_and_bounces() {
        let mut predictor = BallisticPredictor::new();
        predictor.observe(moving_ball(), 10.0);

        let prediction = predictor.ball_prediction().unwrap();
        assert!(!prediction.is_empty());
        assert!(prediction.samples()[0].game_seconds > 10.0);
        for sample in prediction.samples() {
            assert!(sample.position.z >= ball::RADIUS - 1e-3);
        }
        let later = prediction.at_time(11.0).unwrap();
        assert!(later.position.y > 900.0);
    }

    #[test]
    fn test_ballistic_cache_reused() {
        let mut predictor = BallisticPredictor::new();
        predictor.observe(moving_ball(), 0.0);
        let first = predictor.ball_prediction().unwrap();
        let second = predictor.ball_prediction().unwrap();
        assert_eq!(first, second);

        predictor.observe(BallState { velocity: Vector3::x() * 500.0, ..moving_ball() }, 0.5);
        let third = predictor.ball_prediction().unwrap();
        assert_ne!(first, third);
    }

    #[test]
    fn test_resting_ball_unavailable() {
        let mut predictor = BallisticPredictor::new();
        predictor.observe(BallState::default(), 0.0);
        assert!(predictor.ball_prediction().is_none());
    }
}
