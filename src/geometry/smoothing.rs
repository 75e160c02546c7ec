use egui::Pos2;

use super::{PathElement, distance, midpoint};
use crate::stroke::StrokePoint;

/// Segment sampling density for spline interpolation, in logical pixels per step
const SPLINE_STEP: f32 = 5.0;

/// Upper bound on samples per spline segment
const MAX_SEGMENT_STEPS: usize = 256;

/// Speed (logical px per ms) at or above which velocity smoothing is weakest
const MAX_REFERENCE_VELOCITY: f32 = 10.0;

/// Cardinal (Catmull-Rom for `tension == 0.5`) spline through every input point.
///
/// Each segment is subdivided into `max(2, ceil(len / 5))` steps, capped at
/// [`MAX_SEGMENT_STEPS`]. A segment of non-finite length gets the minimum.
/// Input points are emitted verbatim at segment boundaries.
pub fn catmull_rom(points: &[Pos2], tension: f32) -> Vec<Pos2> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut out = Vec::with_capacity(points.len() * 4);
    out.push(points[0]);

    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];

        let m1 = (p2 - p0) * tension;
        let m2 = (p3 - p1) * tension;

        let steps = segment_steps(distance(p1, p2));
        for step in 1..steps {
            let t = step as f32 / steps as f32;
            let t2 = t * t;
            let t3 = t2 * t;

            let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
            let h10 = t3 - 2.0 * t2 + t;
            let h01 = -2.0 * t3 + 3.0 * t2;
            let h11 = t3 - t2;

            out.push(Pos2::new(
                h00 * p1.x + h10 * m1.x + h01 * p2.x + h11 * m2.x,
                h00 * p1.y + h10 * m1.y + h01 * p2.y + h11 * m2.y,
            ));
        }
        out.push(p2);
    }

    out
}

fn segment_steps(len: f32) -> usize {
    if !len.is_finite() {
        return 2;
    }
    ((len / SPLINE_STEP).ceil() as usize).clamp(2, MAX_SEGMENT_STEPS)
}

/// Piecewise cubic Bezier stream through the midpoints between samples.
///
/// Every interior sample becomes the shared apex of a cubic whose two
/// control points lie 2/3 of the way from the neighbouring midpoints
/// toward it, which is the exact cubic form of a quadratic through
/// midpoints. The stream opens and closes with straight runs to the
/// first and last samples.
pub fn bezier(points: &[Pos2]) -> Vec<PathElement> {
    if points.len() < 3 {
        return points.iter().copied().map(PathElement::OnCurve).collect();
    }

    let last = points.len() - 1;
    let mut out = Vec::with_capacity(points.len() * 3);
    out.push(PathElement::OnCurve(points[0]));
    out.push(PathElement::OnCurve(midpoint(points[0], points[1])));

    for i in 1..last {
        let apex = points[i];
        let start = midpoint(points[i - 1], apex);
        let end = midpoint(apex, points[i + 1]);
        out.push(PathElement::Control(start.lerp(apex, 2.0 / 3.0)));
        out.push(PathElement::Control(end.lerp(apex, 2.0 / 3.0)));
        out.push(PathElement::OnCurve(end));
    }

    out.push(PathElement::OnCurve(points[last]));
    out
}

/// Pull slow samples toward the midpoint of their neighbours.
///
/// Smoothing strength falls linearly from `max_smoothing` at rest to
/// `min_smoothing` at [`MAX_REFERENCE_VELOCITY`]. Endpoints and timestamps
/// pass through unchanged.
pub fn velocity_smooth(
    points: &[StrokePoint],
    min_smoothing: f32,
    max_smoothing: f32,
) -> Vec<StrokePoint> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);

    for i in 1..last {
        let prev = points[i - 1];
        let curr = points[i];
        let next = points[i + 1];

        let dt = (curr.time - prev.time).max(1.0) as f32;
        let velocity = (distance(prev.pos, curr.pos) / dt).min(MAX_REFERENCE_VELOCITY);
        let strength =
            max_smoothing - (max_smoothing - min_smoothing) * (velocity / MAX_REFERENCE_VELOCITY);

        let target = midpoint(prev.pos, next.pos);
        out.push(StrokePoint::new(curr.pos.lerp(target, strength), curr.time));
    }

    out.push(points[last]);
    out
}

/// Sliding-window weighted average to suppress hand tremor.
///
/// The sample at offset `k` behind the current one is weighted `weight^k`.
/// Samples before the window fills, and the final sample, pass through.
pub fn stabilize(points: &[Pos2], window_size: usize, weight: f32) -> Vec<Pos2> {
    let window_size = window_size.max(1);
    if points.len() < 3 || window_size == 1 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    points
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            if i + 1 < window_size || i == last {
                return p;
            }
            let mut sum = egui::Vec2::ZERO;
            let mut total = 0.0;
            for offset in 0..window_size {
                let w = weight.powi(offset as i32);
                sum += points[i - offset].to_vec2() * w;
                total += w;
            }
            if total > 0.0 {
                (sum / total).to_pos2()
            } else {
                p
            }
        })
        .collect()
}
