//! Point math and curve smoothing for pen input.
//!
//! Everything in here is a pure function over logical-pixel coordinates.
//! Nothing mutates its input; smoothing strategies return fresh sequences.

use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::stroke::StrokePoint;

mod smoothing;
pub mod svg_path;

pub use smoothing::{bezier, catmull_rom, stabilize, velocity_smooth};
pub use svg_path::points_to_svg_path;

/// Euclidean distance between two points
pub fn distance(a: Pos2, b: Pos2) -> f32 {
    a.distance(b)
}

/// Bearing from `a` to `b` in radians
pub fn angle(a: Pos2, b: Pos2) -> f32 {
    (b.y - a.y).atan2(b.x - a.x)
}

pub fn midpoint(a: Pos2, b: Pos2) -> Pos2 {
    a.lerp(b, 0.5)
}

/// One element of a smoothed point stream.
///
/// Renderers and serializers match on this exhaustively: on-curve points are
/// passed through by the curve, control points only shape it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    OnCurve(Pos2),
    Control(Pos2),
}

impl PathElement {
    pub fn pos(&self) -> Pos2 {
        match self {
            Self::OnCurve(p) | Self::Control(p) => *p,
        }
    }

    pub fn is_control(&self) -> bool {
        matches!(self, Self::Control(_))
    }
}

/// Selects which smoothing strategy turns raw samples into a path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Smoothing {
    /// Raw samples, joined by straight segments
    #[default]
    None,
    CatmullRom { tension: f32 },
    Bezier,
    Velocity { min: f32, max: f32 },
    Stabilized { window: usize, weight: f32 },
}

impl Smoothing {
    /// Apply the strategy and return a tagged point stream
    pub fn apply(&self, points: &[StrokePoint]) -> Vec<PathElement> {
        let on_curve = |pts: Vec<Pos2>| -> Vec<PathElement> {
            pts.into_iter().map(PathElement::OnCurve).collect()
        };
        match *self {
            Self::None => on_curve(positions(points)),
            Self::CatmullRom { tension } => on_curve(catmull_rom(&positions(points), tension)),
            Self::Bezier => bezier(&positions(points)),
            Self::Velocity { min, max } => {
                on_curve(positions(&velocity_smooth(points, min, max)))
            }
            Self::Stabilized { window, weight } => {
                on_curve(stabilize(&positions(points), window, weight))
            }
        }
    }
}

fn positions(points: &[StrokePoint]) -> Vec<Pos2> {
    points.iter().map(|p| p.pos).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_distance_and_angle() {
        let a = pos2(0.0, 0.0);
        let b = pos2(3.0, 4.0);
        assert_eq!(distance(a, b), 5.0);
        assert!((angle(a, pos2(0.0, 1.0)) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(angle(a, pos2(1.0, 0.0)), 0.0);
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(midpoint(pos2(0.0, 0.0), pos2(10.0, 4.0)), pos2(5.0, 2.0));
    }

    #[test]
    fn test_smoothing_none_passes_samples_through() {
        let points = vec![
            StrokePoint::new(pos2(1.0, 1.0), 0.0),
            StrokePoint::new(pos2(5.0, 5.0), 16.0),
        ];
        let out = Smoothing::None.apply(&points);
        assert_eq!(
            out,
            vec![PathElement::OnCurve(pos2(1.0, 1.0)), PathElement::OnCurve(pos2(5.0, 5.0))]
        );
    }

    fn wobble(n: usize) -> Vec<StrokePoint> {
        (0..n)
            .map(|i| {
                let t = i as f32;
                StrokePoint::new(pos2(t * 7.0, (t * 0.8).sin() * 20.0), i as f64 * 12.0)
            })
            .collect()
    }

    #[test]
    fn test_every_strategy_keeps_endpoints() {
        let strategies = [
            Smoothing::None,
            Smoothing::CatmullRom { tension: 0.5 },
            Smoothing::Bezier,
            Smoothing::Velocity { min: 0.1, max: 0.8 },
            Smoothing::Stabilized { window: 3, weight: 0.5 },
            Smoothing::Stabilized { window: 5, weight: 0.5 },
        ];
        for n in [3, 4, 8] {
            let points = wobble(n);
            for strategy in strategies {
                let out = strategy.apply(&points);
                let first = out.first().map(PathElement::pos);
                let last = out.last().map(PathElement::pos);
                assert_eq!(first, Some(points[0].pos), "{strategy:?} n={n}");
                assert_eq!(last, Some(points[n - 1].pos), "{strategy:?} n={n}");
            }
        }
    }

    #[test]
    fn test_window_wider_than_input_passes_through() {
        let points = wobble(3);
        let out = Smoothing::Stabilized { window: 5, weight: 0.5 }.apply(&points);
        let expected: Vec<_> = points.iter().map(|p| PathElement::OnCurve(p.pos)).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_catmull_rom_export_survives_extreme_coordinates() {
        let points = vec![
            StrokePoint::new(pos2(0.0, 0.0), 0.0),
            StrokePoint::new(pos2(f32::INFINITY, 0.0), 16.0),
            StrokePoint::new(pos2(1e7, 5.0), 32.0),
            StrokePoint::new(pos2(5.0, 5.0), 48.0),
        ];
        let path = points_to_svg_path(&Smoothing::CatmullRom { tension: 0.5 }.apply(&points));
        assert!(path.starts_with("M 0 0"));
        assert!(!path.contains("inf") && !path.contains("NaN"));
        assert!(path.len() < 64 * 1024, "path is {} bytes", path.len());
    }
}
