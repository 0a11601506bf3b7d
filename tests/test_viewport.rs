use std::time::Duration;

use kokaton_musou::config::*;
use kokaton_musou::geometry::Rect;
use kokaton_musou::viewport::*;

// ── FrameRate ─────────────────────────────────────────────────────────────────

#[test]
fn frame_rate_bounds() {
    assert_eq!(
        FrameRate::new(0),
        Err(ConfigError::FrameRate { got: 0, max: MAX_FPS })
    );
    assert!(FrameRate::new(MAX_FPS + 1).is_err());
    assert!(FrameRate::new(MAX_FPS).is_ok());
}

#[test]
fn frame_rate_period() {
    let rate = FrameRate::default();
    assert_eq!(rate.fps(), DEFAULT_FPS);
    assert_eq!(rate.period(), Duration::from_millis(20));
}

// ── Viewport ──────────────────────────────────────────────────────────────────

#[test]
fn viewport_rejects_small_terminal() {
    let err = Viewport::new(MIN_COLS - 1, 30).unwrap_err();
    assert!(matches!(err, ConfigError::TerminalTooSmall { .. }));
    assert!(err.to_string().contains("need at least"));
    assert!(Viewport::new(80, MIN_ROWS - 1).is_err());
}

#[test]
fn viewport_play_area() {
    let v = Viewport::new(102, 24).unwrap();
    assert_eq!(v.play_cols(), 100);
    assert_eq!(v.play_rows(), 20);
}

#[test]
fn to_cell_corners() {
    let v = Viewport::new(102, 24).unwrap();
    assert_eq!(v.to_cell((0.0, 0.0)), (1, 2));
    // Far edge clamps into the last play cell
    assert_eq!(v.to_cell((WIDTH, HEIGHT)), (100, 21));
    assert_eq!(v.to_cell((-50.0, -50.0)), (1, 2));
}

#[test]
fn to_logical_is_cell_centre() {
    let v = Viewport::new(102, 24).unwrap();
    assert_eq!(v.to_logical(1, 2), (5.5, 16.25));
    // Clicks on the walls clamp into the play area
    assert_eq!(v.to_logical(0, 0), (5.5, 16.25));
    let (col, row) = v.to_cell(v.to_logical(50, 10));
    assert_eq!((col, row), (50, 10));
}

#[test]
fn cell_span_covers_rect() {
    let v = Viewport::new(102, 24).unwrap();
    let r = Rect::new(0.0, 0.0, 115.0, 70.0);
    assert_eq!(v.cell_span(&r), (1, 2, 11, 4));
}
