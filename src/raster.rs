use egui::{Color32, Pos2, Vec2};
use image::RgbaImage;
use log::warn;
use tiny_skia::{
    Color, ColorU8, FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap,
    Stroke as PenStroke, Transform,
};

use crate::error::SurfaceError;

/// Parse a `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` color string
pub fn parse_color(hex: &str) -> Option<Color32> {
    Color32::from_hex(hex.trim()).ok()
}

/// Like [`parse_color`], but falls back to black so a bad color still draws
pub fn color_or_black(hex: &str) -> Color32 {
    parse_color(hex).unwrap_or_else(|| {
        warn!("Unparseable color {hex:?}, drawing black");
        Color32::BLACK
    })
}

/// Device-pixel raster that strokes and fills are drawn into.
///
/// Callers work in logical pixels; every draw call is scaled by the device
/// pixel ratio. A second straight-alpha RGBA buffer of the same resolution is
/// kept for pixel readback.
pub struct RasterSurface {
    pixmap: Pixmap,
    logical_size: Vec2,
    pixel_ratio: f32,
    readback: Vec<u8>,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("logical_size", &self.logical_size)
            .field("pixel_ratio", &self.pixel_ratio)
            .field("device_size", &(self.width(), self.height()))
            .finish()
    }
}

impl RasterSurface {
    /// Allocate a transparent surface of `width * pixel_ratio` by `height * pixel_ratio` pixels
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Result<Self, SurfaceError> {
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Err(SurfaceError::InvalidPixelRatio(pixel_ratio));
        }
        let invalid = || SurfaceError::InvalidDimensions { width, height };
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(invalid());
        }

        let device_w = (width * pixel_ratio).round().max(1.0) as u32;
        let device_h = (height * pixel_ratio).round().max(1.0) as u32;
        let pixmap = Pixmap::new(device_w, device_h).ok_or_else(invalid)?;

        Ok(Self {
            pixmap,
            logical_size: Vec2::new(width, height),
            pixel_ratio,
            readback: vec![0; device_w as usize * device_h as usize * 4],
        })
    }

    /// Width in device pixels
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height in device pixels
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn logical_size(&self) -> Vec2 {
        self.logical_size
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Logical point to device pixel, rounded
    pub fn to_device(&self, p: Pos2) -> (f32, f32) {
        (
            (p.x * self.pixel_ratio).round(),
            (p.y * self.pixel_ratio).round(),
        )
    }

    fn transform(&self) -> Transform {
        Transform::from_scale(self.pixel_ratio, self.pixel_ratio)
    }

    /// Overwrite every pixel with `color`
    pub fn fill_background(&mut self, color: Color32) {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        self.pixmap.fill(Color::from_rgba8(r, g, b, a));
    }

    /// Filled circle of the given diameter, in logical pixels
    pub fn fill_circle(&mut self, center: Pos2, diameter: f32, color: Color32) {
        let Some(path) = PathBuilder::from_circle(center.x, center.y, diameter / 2.0) else {
            return;
        };
        let transform = self.transform();
        self.pixmap
            .fill_path(&path, &paint_for(color), FillRule::Winding, transform, None);
    }

    /// Round-capped straight segment
    pub fn stroke_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        if let Some(path) = pb.finish() {
            self.stroke_path(&path, width, color);
        }
    }

    /// Round-capped quadratic segment from `from` to `to` bent toward `ctrl`
    pub fn stroke_quad(&mut self, from: Pos2, ctrl: Pos2, to: Pos2, width: f32, color: Color32) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.quad_to(ctrl.x, ctrl.y, to.x, to.y);
        if let Some(path) = pb.finish() {
            self.stroke_path(&path, width, color);
        }
    }

    fn stroke_path(&mut self, path: &Path, width: f32, color: Color32) {
        let pen = PenStroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..PenStroke::default()
        };
        let transform = self.transform();
        self.pixmap
            .stroke_path(path, &paint_for(color), &pen, transform, None);
    }

    /// Straight-alpha RGBA of one device pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Read the whole surface into the readback buffer, hand it to `edit`
    /// and write it back in one pass if `edit` reports a change.
    pub fn edit_pixels(&mut self, edit: impl FnOnce(&mut [u8], u32, u32) -> bool) -> bool {
        let (w, h) = (self.width(), self.height());
        for (dst, px) in self.readback.chunks_exact_mut(4).zip(self.pixmap.pixels()) {
            let c = px.demultiply();
            dst.copy_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }

        if !edit(&mut self.readback, w, h) {
            return false;
        }

        for (px, src) in self.pixmap.pixels_mut().iter_mut().zip(self.readback.chunks_exact(4)) {
            *px = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }
        true
    }

    /// Straight-alpha copy of the surface
    pub fn to_image(&self) -> RgbaImage {
        let (w, h) = (self.width(), self.height());
        let mut bytes = Vec::with_capacity(w as usize * h as usize * 4);
        for px in self.pixmap.pixels() {
            let c = px.demultiply();
            bytes.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        RgbaImage::from_raw(w, h, bytes).unwrap_or_else(|| RgbaImage::new(w, h))
    }
}

fn paint_for(color: Color32) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}
