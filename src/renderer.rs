use egui::{Color32, Pos2};
use log::trace;

use crate::document::StrokeList;
use crate::geometry::midpoint;
use crate::raster::{RasterSurface, color_or_black};
use crate::stroke::Stroke;

/// Paint the pointer-down dot: a filled circle of diameter `size`
pub fn draw_dot(surface: &mut RasterSurface, at: Pos2, size: f32, color: Color32) {
    surface.fill_circle(at, size, color);
}

/// Paint only the newest segment of a stroke whose samples so far are `points`.
///
/// Two samples get a straight line. Three or more get a quadratic through the
/// midpoints of the last three samples, bent toward the middle one.
pub fn draw_incremental(surface: &mut RasterSurface, points: &[Pos2], size: f32, color: Color32) {
    match points {
        [] | [_] => {}
        [a, b] => surface.stroke_line(*a, *b, size, color),
        [.., a, b, c] => {
            surface.stroke_quad(midpoint(*a, *b), *b, midpoint(*b, *c), size, color);
        }
    }
}

/// Redraw one committed stroke exactly the way it was drawn live:
/// the initial dot, then every incremental segment in order.
pub fn draw_stroke(surface: &mut RasterSurface, stroke: &Stroke) {
    let color = color_or_black(stroke.color());
    let points = stroke.points();
    let Some(&first) = points.first() else {
        return;
    };

    draw_dot(surface, first, stroke.size(), color);
    for end in 2..=points.len() {
        draw_incremental(surface, &points[..end], stroke.size(), color);
    }
}

/// Rebuild the surface from scratch: background, then every stroke in order
pub fn replay(surface: &mut RasterSurface, strokes: &StrokeList, background: &str) {
    trace!("Replaying {} strokes", strokes.len());
    surface.fill_background(color_or_black(background));
    for stroke in strokes {
        draw_stroke(surface, stroke);
    }
}
