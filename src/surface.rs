use std::fmt;

use egui::Pos2;
use image::RgbaImage;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::config::SurfaceConfig;
use crate::document::StrokeList;
use crate::error::SurfaceError;
use crate::event::{EventBus, EventHandler, SurfaceEvent};
use crate::fill::{FillOutcome, flood_fill};
use crate::geometry::Smoothing;
use crate::history::SnapshotHistory;
use crate::raster::{RasterSurface, color_or_black};
use crate::renderer::replay;
use crate::stroke::StrokePoint;
use crate::tools::{StrokeRecorder, ToolKind, ToolState};
use crate::util::time;

/// Identifies one canvas in log output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasId(Uuid);

impl CanvasId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CanvasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // short form is enough to tell canvases apart in logs
        let s = self.0.simple().to_string();
        f.write_str(&s[..8])
    }
}

/// The drawing surface: owns the strokes, the raster and the undo history,
/// and routes pointer input to the pen or the bucket.
///
/// All operations are synchronous and never fail; anything the surface
/// cannot do is a logged no-op.
pub struct SurfaceController {
    id: CanvasId,
    config: SurfaceConfig,
    tools: ToolState,
    strokes: StrokeList,
    history: SnapshotHistory,
    recorder: StrokeRecorder,
    /// Tool fixed at pointer-down for the running gesture
    gesture: Option<ToolKind>,
    raster: RasterSurface,
    events: EventBus,
}

impl fmt::Debug for SurfaceController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceController")
            .field("id", &self.id)
            .field("tools", &self.tools)
            .field("strokes", &self.strokes.len())
            .field("undo_depth", &self.history.len())
            .field("gesture", &self.gesture)
            .field("raster", &self.raster)
            .finish()
    }
}

impl SurfaceController {
    /// Create a surface of `width` x `height` logical pixels, painted with the background
    pub fn new(
        width: f32,
        height: f32,
        pixel_ratio: f32,
        config: SurfaceConfig,
    ) -> Result<Self, SurfaceError> {
        let mut raster = RasterSurface::new(width, height, pixel_ratio)?;
        let strokes = StrokeList::new();
        replay(&mut raster, &strokes, &config.background);

        let id = CanvasId::new();
        info!(
            "[{id}] Created {}x{} surface ({}x{} device pixels)",
            width,
            height,
            raster.width(),
            raster.height()
        );

        Ok(Self {
            id,
            history: SnapshotHistory::new(config.history_depth),
            recorder: StrokeRecorder::new(config.min_point_distance),
            config,
            tools: ToolState::default(),
            strokes,
            gesture: None,
            raster,
            events: EventBus::new(),
        })
    }

    pub fn with_defaults(width: f32, height: f32, pixel_ratio: f32) -> Result<Self, SurfaceError> {
        Self::new(width, height, pixel_ratio, SurfaceConfig::default())
    }

    // ---- configuration ----

    /// Takes effect at the next pointer-down; a running gesture keeps its tool
    pub fn set_tool(&mut self, tool: ToolKind) {
        let old = self.tools.tool;
        if old != tool {
            self.tools.tool = tool;
            self.events.emit(SurfaceEvent::ToolChanged { old, new: tool });
        }
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.tools.color = color.into();
    }

    pub fn set_size(&mut self, size: f32) {
        self.tools.size = size;
    }

    pub fn set_tool_state(&mut self, state: ToolState) {
        self.set_tool(state.tool);
        self.tools = state;
    }

    // ---- pointer input ----

    pub fn pointer_down(&mut self, pos: Pos2) {
        self.pointer_down_at(pos, time::current_time_millis());
    }

    /// Pointer-down with an explicit capture time in milliseconds
    pub fn pointer_down_at(&mut self, pos: Pos2, time_ms: f64) {
        if self.gesture.is_some() {
            self.finish_gesture();
        }

        let tool = self.tools.tool;
        self.history.snapshot(&self.strokes);
        self.gesture = Some(tool);

        match tool {
            ToolKind::Pen => {
                self.recorder.begin(
                    StrokePoint::new(pos, time_ms),
                    &self.tools.color,
                    self.tools.size,
                    &mut self.raster,
                );
            }
            ToolKind::Bucket => {
                let outcome = self.fill_at(pos);
                debug!("[{}] Bucket at {pos:?}: {outcome:?}", self.id);
                self.events.emit(SurfaceEvent::FillApplied { outcome });
            }
        }
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        self.pointer_move_at(pos, time::current_time_millis());
    }

    pub fn pointer_move_at(&mut self, pos: Pos2, time_ms: f64) {
        if self.gesture == Some(ToolKind::Pen) {
            self.recorder
                .extend(StrokePoint::new(pos, time_ms), &mut self.raster);
        }
    }

    pub fn pointer_up(&mut self) {
        self.finish_gesture();
    }

    /// Ends the gesture exactly like [`Self::pointer_up`]; an empty gesture commits nothing
    pub fn pointer_cancel(&mut self) {
        self.finish_gesture();
    }

    fn finish_gesture(&mut self) {
        match self.gesture.take() {
            Some(ToolKind::Pen) => {
                if let Some(stroke) = self.recorder.finish() {
                    self.strokes.push(stroke);
                    self.events.emit(SurfaceEvent::StrokeCommitted {
                        stroke_count: self.strokes.len(),
                    });
                }
            }
            Some(ToolKind::Bucket) | None => {}
        }
    }

    fn fill_at(&mut self, pos: Pos2) -> FillOutcome {
        let [r, g, b, _] = color_or_black(&self.tools.color).to_srgba_unmultiplied();
        let seed = self.raster.to_device(pos);
        let fill_config = &self.config.fill;

        let mut outcome = FillOutcome::OutOfBounds;
        self.raster.edit_pixels(|buf, width, height| {
            outcome = flood_fill(buf, width, height, seed, [r, g, b], fill_config);
            outcome.is_filled()
        });
        outcome
    }

    // ---- lifecycle ----

    /// Restore the stroke list from before the last mutating operation and
    /// redraw from it. Returns false when there was nothing to undo.
    ///
    /// Flood-fill pixels are not part of the stroke list, so they do not
    /// survive the redraw.
    pub fn undo(&mut self) -> bool {
        self.finish_gesture();

        let Some(previous) = self.history.undo() else {
            debug!("[{}] Nothing to undo", self.id);
            return false;
        };

        self.strokes = previous;
        replay(&mut self.raster, &self.strokes, &self.config.background);
        info!(
            "[{}] Undo: {} strokes, {} snapshots left",
            self.id,
            self.strokes.len(),
            self.history.len()
        );
        self.events.emit(SurfaceEvent::UndoPerformed {
            stroke_count: self.strokes.len(),
            can_undo: self.history.can_undo(),
        });
        true
    }

    /// Snapshot, then wipe strokes and pixels to the background color
    pub fn clear(&mut self) {
        self.finish_gesture();

        self.history.snapshot(&self.strokes);
        self.strokes = StrokeList::new();
        replay(&mut self.raster, &self.strokes, &self.config.background);
        info!("[{}] Cleared", self.id);
        self.events.emit(SurfaceEvent::ClearPerformed);
    }

    /// Reallocate the raster for a new logical size and pixel ratio, then
    /// redraw every stroke. An open stroke is committed first. Invalid sizes
    /// keep the current surface.
    pub fn resize(&mut self, width: f32, height: f32, pixel_ratio: f32) {
        self.finish_gesture();

        match RasterSurface::new(width, height, pixel_ratio) {
            Ok(raster) => {
                self.raster = raster;
                replay(&mut self.raster, &self.strokes, &self.config.background);
                info!(
                    "[{}] Resized to {width}x{height} @{pixel_ratio} ({}x{} device pixels)",
                    self.id,
                    self.raster.width(),
                    self.raster.height()
                );
                self.events.emit(SurfaceEvent::Resized {
                    device_width: self.raster.width(),
                    device_height: self.raster.height(),
                });
            }
            Err(err) => warn!("[{}] Ignoring resize: {err}", self.id),
        }
    }

    /// Register a callback for informational events
    pub fn subscribe(&self, handler: impl EventHandler + 'static) {
        self.events.subscribe(Box::new(handler));
    }

    // ---- queries ----

    pub fn id(&self) -> CanvasId {
        self.id
    }

    pub fn tool_state(&self) -> &ToolState {
        &self.tools
    }

    pub fn strokes(&self) -> &StrokeList {
        &self.strokes
    }

    pub fn background(&self) -> &str {
        &self.config.background
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.raster
    }

    pub fn to_image(&self) -> RgbaImage {
        self.raster.to_image()
    }

    /// Every committed stroke as SVG path data, in draw order
    pub fn svg_paths(&self, smoothing: Smoothing) -> Vec<String> {
        self.strokes.iter().map(|s| s.svg_path(smoothing)).collect()
    }
}
