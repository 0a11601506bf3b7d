/// Rectangles and the little bit of trigonometry the game needs.

use crate::config::{HEIGHT, WIDTH};

/// Axis-aligned rectangle in logical play-area units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn from_center(center: (f32, f32), size: (f32, f32)) -> Self {
        Rect {
            x: center.0 - size.0 / 2.0,
            y: center.1 - size.1 / 2.0,
            w: size.0,
            h: size.1,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn set_center(&mut self, center: (f32, f32)) {
        self.x = center.0 - self.w / 2.0;
        self.y = center.1 - self.h / 2.0;
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Strict overlap; rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Returns `(horizontally_in_bounds, vertically_in_bounds)` for the play area.
pub fn in_bounds(rect: &Rect) -> (bool, bool) {
    let horizontal = rect.left() >= 0.0 && rect.right() <= WIDTH;
    let vertical = rect.top() >= 0.0 && rect.bottom() <= HEIGHT;
    (horizontal, vertical)
}

/// Shorthand for "inside on both axes".
pub fn fully_in_bounds(rect: &Rect) -> bool {
    in_bounds(rect) == (true, true)
}

/// Direction used when two centres coincide.
pub const DEFAULT_ORIENTATION: (f32, f32) = (0.0, 1.0);

/// Unit vector from the centre of `from` to the centre of `to`.
///
/// Coincident centres have no direction; they get `DEFAULT_ORIENTATION`
/// (straight down) so callers never see NaN.
pub fn orientation(from: &Rect, to: &Rect) -> (f32, f32) {
    let (fx, fy) = from.center();
    let (tx, ty) = to.center();
    let (dx, dy) = (tx - fx, ty - fy);
    let norm = (dx * dx + dy * dy).sqrt();
    if norm <= f32::EPSILON {
        return DEFAULT_ORIENTATION;
    }
    (dx / norm, dy / norm)
}

pub const FAN_HALF_ARC: f32 = 50.0;

/// `num` angle offsets (degrees) spread evenly over −50°..=50°.
///
/// The step is `100 / (num - 1)`, so five entries land on
/// −50, −25, 0, 25, 50.  A single entry fires straight ahead.
pub fn fan_angles(num: usize) -> Vec<f32> {
    match num {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = 2.0 * FAN_HALF_ARC / (num - 1) as f32;
            (0..num).map(|i| -FAN_HALF_ARC + step * i as f32).collect()
        }
    }
}

/// Size of the bounding box of a `w`×`h` rectangle rotated by `degrees`.
pub fn rotated_size(w: f32, h: f32, degrees: f32) -> (f32, f32) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    (w * cos + h * sin, w * sin + h * cos)
}
