use egui::Color32;
use log::{debug, trace, warn};

use crate::geometry::distance;
use crate::raster::{RasterSurface, color_or_black};
use crate::renderer::{draw_dot, draw_incremental};
use crate::stroke::{Stroke, StrokeBuffer, StrokePoint};

/// Pen gesture state. Committing happens inside [`StrokeRecorder::finish`]
/// and is never observable from outside.
#[derive(Debug, Clone, Default)]
pub enum RecorderState {
    #[default]
    Idle,
    Recording {
        buffer: StrokeBuffer,
        color: Color32,
    },
}

/// Turns pointer samples into a stroke, painting each new segment as it arrives
#[derive(Debug, Clone)]
pub struct StrokeRecorder {
    state: RecorderState,
    min_distance: f32,
}

impl StrokeRecorder {
    /// `min_distance` is the spacing below which pointer moves are dropped
    pub fn new(min_distance: f32) -> Self {
        Self {
            state: RecorderState::Idle,
            min_distance,
        }
    }

    /// Start a stroke at `sample` and paint its dot immediately
    pub fn begin(
        &mut self,
        sample: StrokePoint,
        color: &str,
        size: f32,
        surface: &mut RasterSurface,
    ) {
        if self.is_recording() {
            warn!("Pointer down while a stroke is open; discarding the open stroke");
        }

        let paint = color_or_black(color);
        let mut buffer = StrokeBuffer::new(color, size);
        buffer.add_sample(sample);
        draw_dot(surface, sample.pos, size, paint);

        debug!("Stroke started at {:?}", sample.pos);
        self.state = RecorderState::Recording {
            buffer,
            color: paint,
        };
    }

    /// Append a sample and paint the newest segment.
    ///
    /// Returns false when idle or when the sample is too close to the last
    /// accepted one.
    pub fn extend(&mut self, sample: StrokePoint, surface: &mut RasterSurface) -> bool {
        let RecorderState::Recording { buffer, color } = &mut self.state else {
            return false;
        };

        if let Some(last) = buffer.last_pos() {
            if distance(last, sample.pos) < self.min_distance {
                trace!("Dropping sample {:?}, too close to {:?}", sample.pos, last);
                return false;
            }
        }

        buffer.add_sample(sample);
        draw_incremental(surface, &buffer.positions_tail(), buffer.size(), *color);
        true
    }

    /// Seal the buffered samples into a stroke and return to idle
    pub fn finish(&mut self) -> Option<Stroke> {
        match std::mem::take(&mut self.state) {
            RecorderState::Idle => None,
            RecorderState::Recording { buffer, .. } => {
                debug!("Stroke finished with {} points", buffer.len());
                buffer.into_stroke()
            }
        }
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecorderState::Recording { .. })
    }

    pub fn state(&self) -> &RecorderState {
        &self.state
    }

    pub fn current_state_name(&self) -> &'static str {
        match self.state {
            RecorderState::Idle => "Idle",
            RecorderState::Recording { .. } => "Recording",
        }
    }

    /// Samples buffered for the open stroke
    pub fn buffered_len(&self) -> usize {
        match &self.state {
            RecorderState::Idle => 0,
            RecorderState::Recording { buffer, .. } => buffer.len(),
        }
    }
}
