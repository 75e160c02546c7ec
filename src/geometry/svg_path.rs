use std::fmt::Write as _;

use egui::Pos2;

use super::PathElement;

/// Serialize a tagged point stream as SVG path data.
///
/// The first element always becomes a move. On-curve points become line
/// segments unless they close a pair of control points, in which case a
/// cubic segment is emitted.
pub fn points_to_svg_path(elements: &[PathElement]) -> String {
    let Some((first, rest)) = elements.split_first() else {
        return String::new();
    };

    let mut path = String::new();
    push_command(&mut path, 'M', &[first.pos()]);

    let mut controls: Vec<Pos2> = Vec::with_capacity(2);
    for element in rest {
        match *element {
            PathElement::Control(c) => {
                if controls.len() == 2 {
                    // A third control has no curve to belong to; flush the oldest as a line
                    push_command(&mut path, 'L', &[controls.remove(0)]);
                }
                controls.push(c);
            }
            PathElement::OnCurve(p) => {
                match controls.as_slice() {
                    [] => push_command(&mut path, 'L', &[p]),
                    [c] => push_command(&mut path, 'C', &[*c, *c, p]),
                    [c1, c2, ..] => push_command(&mut path, 'C', &[*c1, *c2, p]),
                }
                controls.clear();
            }
        }
    }

    for c in controls {
        push_command(&mut path, 'L', &[c]);
    }

    path
}

fn push_command(path: &mut String, command: char, points: &[Pos2]) {
    if !path.is_empty() {
        path.push(' ');
    }
    path.push(command);
    for p in points {
        let _ = write!(path, " {} {}", fmt_coord(p.x), fmt_coord(p.y));
    }
}

/// Round to two decimals; NaN and infinities collapse to zero
fn fmt_coord(v: f32) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = ((v as f64) * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_empty_stream() {
        assert_eq!(points_to_svg_path(&[]), "");
    }

    #[test]
    fn test_lines_only() {
        let path = points_to_svg_path(&[
            PathElement::OnCurve(pos2(1.0, 2.0)),
            PathElement::OnCurve(pos2(3.5, 4.25)),
        ]);
        assert_eq!(path, "M 1 2 L 3.5 4.25");
    }

    #[test]
    fn test_cubic_segment() {
        let path = points_to_svg_path(&[
            PathElement::OnCurve(pos2(0.0, 0.0)),
            PathElement::Control(pos2(1.0, 1.0)),
            PathElement::Control(pos2(2.0, 1.0)),
            PathElement::OnCurve(pos2(3.0, 0.0)),
        ]);
        assert_eq!(path, "M 0 0 C 1 1 2 1 3 0");
    }

    #[test]
    fn test_rounding_and_non_finite() {
        let path = points_to_svg_path(&[
            PathElement::OnCurve(pos2(f32::NAN, 1.004)),
            PathElement::OnCurve(pos2(f32::INFINITY, 2.5)),
        ]);
        assert_eq!(path, "M 0 1 L 0 2.5");
    }

    #[test]
    fn test_leading_control_still_moves_first() {
        let path = points_to_svg_path(&[
            PathElement::Control(pos2(5.0, 5.0)),
            PathElement::OnCurve(pos2(6.0, 6.0)),
        ]);
        assert_eq!(path, "M 5 5 L 6 6");
    }
}
