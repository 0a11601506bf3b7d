use kokaton_musou::config::{HEIGHT, WIDTH};
use kokaton_musou::geometry::*;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn from_center_round_trips_center() {
    let r = Rect::from_center((100.0, 50.0), (40.0, 20.0));
    assert_eq!((r.left(), r.top()), (80.0, 40.0));
    assert_eq!((r.right(), r.bottom()), (120.0, 60.0));
    assert_eq!(r.center(), (100.0, 50.0));
}

#[test]
fn overlaps_is_strict() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
    let inside = Rect::new(5.0, 5.0, 10.0, 10.0);
    assert!(!a.overlaps(&touching));
    assert!(a.overlaps(&inside));
    assert!(inside.overlaps(&a));
}

// ── in_bounds ─────────────────────────────────────────────────────────────────

#[test]
fn in_bounds_reports_each_axis() {
    let inside = Rect::new(0.0, 0.0, WIDTH, HEIGHT);
    assert_eq!(in_bounds(&inside), (true, true));

    let left_out = Rect::new(-1.0, 10.0, 20.0, 20.0);
    assert_eq!(in_bounds(&left_out), (false, true));

    let bottom_out = Rect::new(10.0, HEIGHT - 10.0, 20.0, 20.0);
    assert_eq!(in_bounds(&bottom_out), (true, false));
    assert!(!fully_in_bounds(&bottom_out));
}

// ── orientation ───────────────────────────────────────────────────────────────

#[test]
fn orientation_is_unit_length() {
    let from = Rect::from_center((0.0, 0.0), (10.0, 10.0));
    let to = Rect::from_center((30.0, 40.0), (10.0, 10.0));
    let (x, y) = orientation(&from, &to);
    assert!(close(x, 0.6));
    assert!(close(y, 0.8));
}

#[test]
fn orientation_of_coincident_centres_is_default() {
    let a = Rect::from_center((200.0, 200.0), (10.0, 10.0));
    let b = Rect::from_center((200.0, 200.0), (60.0, 20.0));
    let o = orientation(&a, &b);
    assert_eq!(o, DEFAULT_ORIENTATION);
    assert!(!o.0.is_nan() && !o.1.is_nan());
}

// ── fan_angles ────────────────────────────────────────────────────────────────

#[test]
fn fan_of_five() {
    assert_eq!(fan_angles(5), vec![-50.0, -25.0, 0.0, 25.0, 50.0]);
}

#[test]
fn fan_of_three() {
    assert_eq!(fan_angles(3), vec![-50.0, 0.0, 50.0]);
}

#[test]
fn fan_has_exactly_num_entries() {
    for num in 2..12 {
        let angles = fan_angles(num);
        assert_eq!(angles.len(), num);
        assert!(close(angles[0], -FAN_HALF_ARC));
        assert!(close(angles[num - 1], FAN_HALF_ARC));
    }
}

#[test]
fn fan_degenerate_sizes() {
    assert!(fan_angles(0).is_empty());
    assert_eq!(fan_angles(1), vec![0.0]);
}

// ── rotated_size ──────────────────────────────────────────────────────────────

#[test]
fn rotated_size_quarter_turn_swaps() {
    let (w, h) = rotated_size(40.0, 12.0, 90.0);
    assert!(close(w, 12.0));
    assert!(close(h, 40.0));
}

#[test]
fn rotated_size_unrotated_is_identity() {
    assert_eq!(rotated_size(40.0, 12.0, 0.0), (40.0, 12.0));
}
