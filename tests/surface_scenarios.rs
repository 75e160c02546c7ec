use std::cell::RefCell;
use std::rc::Rc;

use doodle_surface::{Smoothing, SurfaceController, SurfaceEvent, ToolKind};
use egui::{Pos2, pos2};
use image::RgbaImage;

const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

fn controller() -> SurfaceController {
    SurfaceController::with_defaults(100.0, 100.0, 1.0).unwrap()
}

fn draw(surface: &mut SurfaceController, points: &[Pos2]) {
    let (first, rest) = points.split_first().unwrap();
    surface.pointer_down_at(*first, 0.0);
    for (i, p) in rest.iter().enumerate() {
        surface.pointer_move_at(*p, (i + 1) as f64 * 16.0);
    }
    surface.pointer_up();
}

fn is_blank(image: &RgbaImage) -> bool {
    image.pixels().all(|p| p.0 == WHITE)
}

#[test]
fn test_single_tap_makes_a_dot() {
    let mut surface = controller();
    surface.set_tool(ToolKind::Pen);
    surface.set_color("#000000");
    surface.set_size(5.0);

    surface.pointer_down(pos2(50.0, 50.0));
    surface.pointer_up();

    assert_eq!(surface.strokes().len(), 1);
    assert_eq!(surface.strokes().strokes()[0].points().len(), 1);

    let image = surface.to_image();
    assert_eq!(image.get_pixel(50, 50).0, BLACK);
    assert_eq!(image.get_pixel(49, 49).0, BLACK);
    assert_eq!(image.get_pixel(53, 50).0, WHITE);
    assert_eq!(image.get_pixel(46, 50).0, WHITE);
    assert_eq!(image.get_pixel(50, 46).0, WHITE);
}

#[test]
fn test_drag_then_undo_returns_to_blank() {
    let mut surface = controller();
    let points: Vec<Pos2> = (0..10).map(|i| pos2(10.0 + i as f32 * 8.0, 40.0 + (i % 3) as f32 * 4.0)).collect();
    draw(&mut surface, &points);

    assert_eq!(surface.strokes().len(), 1);
    assert_eq!(surface.strokes().strokes()[0].points().len(), 10);
    assert!(!is_blank(&surface.to_image()));

    assert!(surface.undo());
    assert!(surface.strokes().is_empty());
    assert!(is_blank(&surface.to_image()));
}

#[test]
fn test_undo_restores_previous_pixels() {
    let mut surface = controller();
    draw(&mut surface, &[pos2(10.0, 10.0), pos2(40.0, 20.0), pos2(60.0, 50.0)]);
    let strokes_before = surface.strokes().clone();
    let image_before = surface.to_image();

    surface.set_color("#3366cc");
    surface.set_size(9.0);
    draw(&mut surface, &[pos2(80.0, 10.0), pos2(50.0, 60.0), pos2(20.0, 90.0), pos2(15.0, 95.0)]);
    assert_ne!(surface.to_image(), image_before);

    surface.undo();
    assert_eq!(*surface.strokes(), strokes_before);
    assert_eq!(surface.to_image(), image_before);
}

#[test]
fn test_clear_and_undo_clear() {
    let mut surface = controller();
    draw(&mut surface, &[pos2(20.0, 20.0), pos2(80.0, 80.0)]);
    let image_before = surface.to_image();

    surface.clear();
    assert!(surface.strokes().is_empty());
    assert!(is_blank(&surface.to_image()));

    surface.undo();
    assert_eq!(surface.strokes().len(), 1);
    assert_eq!(surface.to_image(), image_before);
}

#[test]
fn test_undo_with_empty_history_is_noop() {
    let mut surface = controller();
    assert!(!surface.can_undo());
    assert!(!surface.undo());
    assert!(is_blank(&surface.to_image()));
}

#[test]
fn test_pointer_cancel_never_leaves_recording() {
    let mut surface = controller();
    surface.pointer_down_at(pos2(10.0, 10.0), 0.0);
    surface.pointer_move_at(pos2(20.0, 20.0), 16.0);
    surface.pointer_cancel();
    assert!(!surface.is_recording());
    assert_eq!(surface.strokes().len(), 1);

    // nothing open: cancel commits nothing
    surface.pointer_cancel();
    assert_eq!(surface.strokes().len(), 1);

    // moves after the gesture ended are ignored
    surface.pointer_move_at(pos2(30.0, 30.0), 32.0);
    assert_eq!(surface.strokes().strokes()[0].points().len(), 2);
}

#[test]
fn test_close_moves_are_undersampled() {
    let mut surface = controller();
    surface.pointer_down_at(pos2(10.0, 10.0), 0.0);
    surface.pointer_move_at(pos2(10.5, 10.5), 1.0);
    surface.pointer_move_at(pos2(11.0, 11.0), 2.0);
    surface.pointer_move_at(pos2(13.0, 10.0), 3.0);
    surface.pointer_up();
    assert_eq!(
        surface.strokes().strokes()[0].points(),
        &[pos2(10.0, 10.0), pos2(13.0, 10.0)]
    );
}

#[test]
fn test_resize_before_any_stroke_renders_background() {
    let mut surface = controller();
    surface.resize(30.0, 20.0, 3.0);
    surface.resize(30.0, 20.0, 3.0);
    let image = surface.to_image();
    assert_eq!(image.dimensions(), (90, 60));
    assert!(is_blank(&image));
}

#[test]
fn test_resize_keeps_strokes_at_new_resolution() {
    let mut surface = controller();
    surface.set_size(6.0);
    draw(&mut surface, &[pos2(20.0, 50.0), pos2(50.0, 50.0), pos2(80.0, 50.0)]);

    surface.resize(100.0, 100.0, 2.0);
    let image = surface.to_image();
    assert_eq!(image.dimensions(), (200, 200));
    assert_eq!(image.get_pixel(60, 100).0, BLACK);
    assert_eq!(image.get_pixel(60, 20).0, WHITE);
    assert_eq!(surface.strokes().len(), 1);
}

#[test]
fn test_host_callbacks_fire() {
    let mut surface = controller();
    let events = Rc::new(RefCell::new(Vec::new()));
    {
        let events = Rc::clone(&events);
        surface.subscribe(move |event: &SurfaceEvent| events.borrow_mut().push(event.clone()));
    }

    draw(&mut surface, &[pos2(10.0, 10.0), pos2(20.0, 20.0)]);
    surface.undo();
    surface.clear();

    let events = events.borrow();
    assert_eq!(events[0], SurfaceEvent::StrokeCommitted { stroke_count: 1 });
    assert_eq!(
        events[1],
        SurfaceEvent::UndoPerformed {
            stroke_count: 0,
            can_undo: false
        }
    );
    assert_eq!(events[2], SurfaceEvent::ClearPerformed);
}

#[test]
fn test_invalid_color_draws_black() {
    let mut surface = controller();
    surface.set_color("not-a-color");
    surface.pointer_down(pos2(50.0, 50.0));
    surface.pointer_up();
    assert_eq!(surface.strokes().strokes()[0].color(), "not-a-color");
    assert_eq!(surface.to_image().get_pixel(50, 50).0, BLACK);
}

#[test]
fn test_svg_export_of_committed_strokes() {
    let mut surface = controller();
    draw(&mut surface, &[pos2(10.0, 10.0), pos2(20.0, 15.0), pos2(30.0, 10.0)]);
    surface.pointer_down(pos2(70.0, 70.0));
    surface.pointer_up();

    let paths = surface.svg_paths(Smoothing::None);
    assert_eq!(paths, vec!["M 10 10 L 20 15 L 30 10".to_string(), "M 70 70".to_string()]);

    let curved = surface.svg_paths(Smoothing::Bezier);
    assert!(curved[0].starts_with("M 10 10 L 15 12.5 C"));
    assert!(curved[0].ends_with("L 30 10"));
}

#[test]
fn test_independent_canvases() {
    let mut a = controller();
    let b = controller();
    draw(&mut a, &[pos2(10.0, 10.0), pos2(20.0, 20.0)]);
    assert_eq!(a.strokes().len(), 1);
    assert!(b.strokes().is_empty());
    assert!(is_blank(&b.to_image()));
}
