use approx::assert_relative_eq;

use docscan_core::consts::{MAX_ZOOM, MIN_ZOOM};
use docscan_core::viewport::{CursorHint, EventDisposition, Rect, Vec2, ViewportState};

fn zoomed(steps: usize) -> ViewportState {
    let mut v = ViewportState::new();
    for _ in 0..steps {
        v.zoom_in();
    }
    v
}

#[test]
fn test_new_viewport_is_identity() {
    let v = ViewportState::new();
    assert_eq!(v.zoom(), 1.0);
    assert_eq!(v.pan_offset(), Vec2::ZERO);
    assert!(!v.is_dragging());
    assert_eq!(v.zoom_percent(), 100);
}

#[test]
fn test_zoom_in_steps_and_clamps_at_ceiling() {
    let mut v = ViewportState::new();
    v.zoom_in();
    assert_relative_eq!(v.zoom(), 1.25);
    for _ in 0..20 {
        v.zoom_in();
    }
    assert_eq!(v.zoom(), MAX_ZOOM);
    assert!(!v.can_zoom_in());
    v.zoom_in();
    assert_eq!(v.zoom(), MAX_ZOOM);
}

#[test]
fn test_zoom_out_clamps_at_floor() {
    let mut v = ViewportState::new();
    v.zoom_out();
    assert_relative_eq!(v.zoom(), 0.75);
    v.zoom_out();
    v.zoom_out();
    assert_eq!(v.zoom(), MIN_ZOOM);
    assert!(!v.can_zoom_out());
}

#[test]
fn test_wheel_direction_and_consumption() {
    let mut v = ViewportState::new();
    assert_eq!(v.on_wheel(-120.0), EventDisposition::Consumed);
    assert_relative_eq!(v.zoom(), 1.1);
    assert_eq!(v.on_wheel(53.0), EventDisposition::Consumed);
    assert_relative_eq!(v.zoom(), 1.0, epsilon = 1e-6);
}

#[test]
fn test_wheel_round_trip_returns_to_exact_identity() {
    let mut v = ViewportState::new();
    for _ in 0..5 {
        v.on_wheel(1.0);
    }
    for _ in 0..5 {
        v.on_wheel(-1.0);
    }
    assert_eq!(v.zoom(), 1.0);
    assert_eq!(v.cursor(), CursorHint::Default);
    v.begin_drag(Vec2::new(10.0, 10.0));
    assert!(!v.is_dragging());
}

#[test]
fn test_zero_wheel_delta_is_ignored() {
    let mut v = ViewportState::new();
    assert_eq!(v.on_wheel(0.0), EventDisposition::Ignored);
    assert_eq!(v.zoom(), 1.0);
}

#[test]
fn test_zoom_stays_in_bounds_for_mixed_sequences() {
    let mut v = ViewportState::new();
    // Deterministic pseudo-random mix of inputs.
    let mut seed: u32 = 0x2545_f491;
    for _ in 0..2_000 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        match seed % 4 {
            0 => v.zoom_in(),
            1 => v.zoom_out(),
            2 => {
                v.on_wheel(1.0);
            }
            _ => {
                v.on_wheel(-1.0);
            }
        }
        assert!(v.zoom() >= MIN_ZOOM && v.zoom() <= MAX_ZOOM, "zoom {}", v.zoom());
    }
}

#[test]
fn test_drag_ignored_when_not_zoomed_in() {
    let mut v = ViewportState::new();
    v.begin_drag(Vec2::new(10.0, 10.0));
    assert!(!v.is_dragging());
    v.continue_drag(Vec2::new(50.0, 80.0));
    assert_eq!(v.pan_offset(), Vec2::ZERO);

    v.zoom_out();
    v.begin_drag(Vec2::new(10.0, 10.0));
    v.continue_drag(Vec2::new(50.0, 80.0));
    assert_eq!(v.pan_offset(), Vec2::ZERO);
}

#[test]
fn test_continue_drag_without_begin_has_no_effect() {
    let mut v = zoomed(2);
    v.continue_drag(Vec2::new(40.0, 40.0));
    assert_eq!(v.pan_offset(), Vec2::ZERO);
}

#[test]
fn test_drag_pans_relative_to_anchor() {
    let mut v = zoomed(2);
    v.begin_drag(Vec2::new(100.0, 100.0));
    assert!(v.is_dragging());
    v.continue_drag(Vec2::new(130.0, 90.0));
    assert_eq!(v.pan_offset(), Vec2::new(30.0, -10.0));
    v.end_drag();

    // A second drag continues from the current offset.
    v.begin_drag(Vec2::new(0.0, 0.0));
    v.continue_drag(Vec2::new(5.0, 5.0));
    assert_eq!(v.pan_offset(), Vec2::new(35.0, -5.0));
}

#[test]
fn test_pan_is_unbounded() {
    let mut v = zoomed(1);
    v.begin_drag(Vec2::ZERO);
    v.continue_drag(Vec2::new(-10_000.0, 25_000.0));
    assert_eq!(v.pan_offset(), Vec2::new(-10_000.0, 25_000.0));
}

#[test]
fn test_end_drag_is_always_safe() {
    let mut v = ViewportState::new();
    v.end_drag();
    v.pointer_left();
    assert!(!v.is_dragging());

    let mut v = zoomed(1);
    v.begin_drag(Vec2::ZERO);
    v.pointer_left();
    assert!(!v.is_dragging());
    v.continue_drag(Vec2::new(9.0, 9.0));
    assert_eq!(v.pan_offset(), Vec2::ZERO);
}

#[test]
fn test_drag_stops_panning_after_zooming_back_out() {
    let mut v = zoomed(1);
    v.begin_drag(Vec2::ZERO);
    v.zoom_out();
    v.continue_drag(Vec2::new(20.0, 20.0));
    assert_eq!(v.pan_offset(), Vec2::ZERO);
}

#[test]
fn test_reset_restores_identity_from_any_state() {
    let mut v = zoomed(5);
    v.begin_drag(Vec2::ZERO);
    v.continue_drag(Vec2::new(77.0, -3.0));
    v.reset();
    assert_eq!(v.zoom(), 1.0);
    assert_eq!(v.pan_offset(), Vec2::ZERO);

    let mut v = ViewportState::new();
    v.zoom_out();
    v.reset();
    assert_eq!(v.zoom(), 1.0);
    assert_eq!(v.pan_offset(), Vec2::ZERO);
}

#[test]
fn test_cursor_hint_follows_state() {
    let mut v = ViewportState::new();
    assert_eq!(v.cursor(), CursorHint::Default);
    v.zoom_in();
    assert_eq!(v.cursor(), CursorHint::Grab);
    v.begin_drag(Vec2::ZERO);
    assert_eq!(v.cursor(), CursorHint::Grabbing);
}

#[test]
fn test_transform_divides_pan_by_zoom() {
    let mut v = zoomed(4); // 2.0
    v.begin_drag(Vec2::ZERO);
    v.continue_drag(Vec2::new(40.0, 20.0));
    let t = v.transform();
    assert_relative_eq!(t.scale, 2.0);
    assert_eq!(t.translate, Vec2::new(20.0, 10.0));
}

#[test]
fn test_display_rect_fits_and_scales_about_center() {
    let container = Rect::from_min_size(Vec2::ZERO, Vec2::new(400.0, 300.0));
    let image = Vec2::new(800.0, 300.0);

    let v = ViewportState::new();
    let r = v.display_rect(container, image);
    assert_relative_eq!(r.size.x, 400.0);
    assert_relative_eq!(r.size.y, 150.0);
    assert_eq!(r.center(), container.center());

    let mut v = zoomed(4);
    v.begin_drag(Vec2::ZERO);
    v.continue_drag(Vec2::new(10.0, 0.0));
    let r = v.display_rect(container, image);
    assert_relative_eq!(r.size.x, 800.0);
    assert_relative_eq!(r.center().x, 210.0);
    assert_relative_eq!(r.center().y, 150.0);
}
