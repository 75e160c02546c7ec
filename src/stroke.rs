use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::geometry::{Smoothing, points_to_svg_path};

/// A captured pointer sample: logical position plus capture time in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub pos: Pos2,
    pub time: f64,
}

impl StrokePoint {
    pub fn new(pos: Pos2, time: f64) -> Self {
        Self { pos, time }
    }
}

/// A committed pen gesture. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    color: String,
    size: f32,
    points: Vec<Pos2>,
    times: Vec<f64>,
}

impl Stroke {
    /// Build a stroke from captured samples. Returns `None` for an empty gesture.
    pub fn from_samples(color: impl Into<String>, size: f32, samples: &[StrokePoint]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        Some(Self {
            color: color.into(),
            size,
            points: samples.iter().map(|s| s.pos).collect(),
            times: samples.iter().map(|s| s.time).collect(),
        })
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Line width in logical pixels
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    /// Samples with their capture times, for velocity-aware smoothing
    pub fn samples(&self) -> Vec<StrokePoint> {
        self.points
            .iter()
            .zip(&self.times)
            .map(|(&pos, &time)| StrokePoint::new(pos, time))
            .collect()
    }

    pub fn is_dot(&self) -> bool {
        self.points.len() == 1
    }

    /// Vector path data for hosts that draw strokes as SVG paths
    pub fn svg_path(&self, smoothing: Smoothing) -> String {
        points_to_svg_path(&smoothing.apply(&self.samples()))
    }
}

/// Samples of the gesture currently being drawn.
///
/// Lives only between pointer-down and pointer-up; sealed into a [`Stroke`]
/// on commit.
#[derive(Debug, Clone)]
pub struct StrokeBuffer {
    color: String,
    size: f32,
    samples: Vec<StrokePoint>,
}

impl StrokeBuffer {
    pub fn new(color: impl Into<String>, size: f32) -> Self {
        Self {
            color: color.into(),
            size,
            samples: Vec::new(),
        }
    }

    pub fn add_sample(&mut self, sample: StrokePoint) {
        self.samples.push(sample);
    }

    pub fn last_pos(&self) -> Option<Pos2> {
        self.samples.last().map(|s| s.pos)
    }

    /// Up to the last three positions: all the incremental renderer needs
    pub fn positions_tail(&self) -> Vec<Pos2> {
        let start = self.samples.len().saturating_sub(3);
        self.samples[start..].iter().map(|s| s.pos).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Seal into an immutable stroke
    pub fn into_stroke(self) -> Option<Stroke> {
        Stroke::from_samples(self.color, self.size, &self.samples)
    }
}
