// tests/toroidal_canvas.rs
use glam::Vec2;
use lsystem_plotter::ToroidalCanvas;

const W: usize = 100;
const H: usize = 80;

#[test]
fn test_segment_within_one_tile_is_drawn() {
    let mut canvas = ToroidalCanvas::new(W, H).unwrap();

    assert!(canvas.draw_segment(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0)));
    assert_eq!(canvas.segments_drawn(), 1);
    assert_eq!(canvas.pixel(10, 10), Some(1));
    assert_eq!(canvas.pixel(20, 20), Some(1));
    assert_eq!(canvas.lit_pixels(), 11, "diagonal covers one pixel per column");
}

#[test]
fn test_segment_crossing_tile_edge_is_not_drawn() {
    let mut canvas = ToroidalCanvas::new(W, H).unwrap();

    // (-10, -10) wraps to (W - 10, H - 10): drawing between the wrapped endpoints would
    // streak across the whole buffer.
    let far = Vec2::new(-10.0, -10.0);
    assert_eq!(canvas.wrap(far), Vec2::new(W as f32 - 10.0, H as f32 - 10.0));
    assert!(!canvas.draw_segment(Vec2::new(10.0, 10.0), far));

    assert_eq!(canvas.lit_pixels(), 0);
    assert_eq!(canvas.segments_clipped(), 1);
}

#[test]
fn test_segment_in_distant_tile_draws_at_wrapped_position() {
    let mut canvas = ToroidalCanvas::new(W, H).unwrap();
    let offset = Vec2::new(3.0 * W as f32, -2.0 * H as f32);

    assert!(canvas.draw_segment(
        Vec2::new(5.0, 5.0) + offset,
        Vec2::new(15.0, 5.0) + offset
    ));
    for x in 5..=15 {
        assert_eq!(canvas.pixel(x, 5), Some(1), "x = {x}");
    }
    assert_eq!(canvas.lit_pixels(), 11);
}

#[test]
fn test_strokes_accumulate_and_clear() {
    let mut canvas = ToroidalCanvas::new(W, H).unwrap();
    canvas.draw_segment(Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0));
    canvas.draw_segment(Vec2::new(0.0, 5.0), Vec2::new(0.0, 15.0));
    assert_eq!(canvas.pixel(0, 7), Some(2));

    canvas.clear();
    assert!(canvas.pixels().iter().all(|&p| p == 0));
    assert_eq!(canvas.segments_drawn(), 0);
}

#[test]
fn test_out_of_bounds_pixel_lookup() {
    let canvas = ToroidalCanvas::new(W, H).unwrap();
    assert_eq!(canvas.pixel(W, 0), None);
    assert_eq!(canvas.pixel(0, H), None);
}
