//! Debug overlay seam
//!
//! Nothing in the control loop reads back from the renderer.

use nalgebra::{Vector2, Vector3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineColor {
    Green,
    Orange,
    Red,
    Cyan,
}

pub trait DebugRenderer {
    fn draw_line(&mut self, color: LineColor, from: Vector3<f32>, to: Vector3<f32>);

    /// Short label for the branch the controller took this tick.
    fn set_branch_info(&mut self, _info: &str) {}

    fn add_alert_text(&mut self, _text: &str, _game_seconds: f32) {}

    /// Ground-plane point a wall ride is aiming for.
    fn render_projection(&mut self, from: Vector3<f32>, projection: Vector2<f32>) {
        self.draw_line(LineColor::Cyan, from, Vector3::new(projection.x, projection.y, from.z));
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl DebugRenderer for NullRenderer {
    fn draw_line(&mut self, _color: LineColor, _from: Vector3<f32>, _to: Vector3<f32>) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLine {
    pub color: LineColor,
    pub from: Vector3<f32>,
    pub to: Vector3<f32>,
}

/// Collects everything drawn; the owner clears it between ticks.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub lines: Vec<RenderedLine>,
    pub branch_info: Option<String>,
    pub alerts: Vec<(String, f32)>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.branch_info = None;
        self.alerts.clear();
    }
}

impl DebugRenderer for RecordingRenderer {
    fn draw_line(&mut self, color: LineColor, from: Vector3<f32>, to: Vector3<f32>) {
        self.lines.push(RenderedLine { color, from, to });
    }

    fn set_branch_info(&mut self, info: &str) {
        self.branch_info = Some(info.to_string());
    }

    fn add_alert_text(&mut self, text: &str, game_seconds: f32) {
        self.alerts.push((text.to_string(), game_seconds));
    }
}
