/// Mapping between logical play-area units and terminal cells.
///
/// Screen layout:
///   row 0            HUD
///   row 1            top border
///   rows 2..h-2      play area
///   row h-2          bottom border
///   row h-1          controls hint
/// Columns 0 and w-1 are the side walls.

use crate::config::{ConfigError, HEIGHT, WIDTH};
use crate::geometry::Rect;

pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 16;

const PLAY_LEFT: u16 = 1;
const PLAY_TOP: u16 = 2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Result<Self, ConfigError> {
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(ConfigError::TerminalTooSmall {
                cols,
                rows,
                min_cols: MIN_COLS,
                min_rows: MIN_ROWS,
            });
        }
        Ok(Viewport { cols, rows })
    }

    pub fn play_cols(&self) -> u16 {
        self.cols - 2
    }

    pub fn play_rows(&self) -> u16 {
        self.rows - 4
    }

    /// Terminal cell containing the logical point, clamped to the play area.
    pub fn to_cell(&self, point: (f32, f32)) -> (u16, u16) {
        let col = scale(point.0, WIDTH, self.play_cols());
        let row = scale(point.1, HEIGHT, self.play_rows());
        (PLAY_LEFT + col, PLAY_TOP + row)
    }

    /// Logical centre of a terminal cell, clamped to the play area.
    pub fn to_logical(&self, col: u16, row: u16) -> (f32, f32) {
        let cx = unscale(col.saturating_sub(PLAY_LEFT), self.play_cols(), WIDTH);
        let cy = unscale(row.saturating_sub(PLAY_TOP), self.play_rows(), HEIGHT);
        (cx, cy)
    }

    /// Inclusive cell span `(left, top, right, bottom)` covered by `rect`.
    pub fn cell_span(&self, rect: &Rect) -> (u16, u16, u16, u16) {
        let (left, top) = self.to_cell((rect.left(), rect.top()));
        let (right, bottom) = self.to_cell((rect.right(), rect.bottom()));
        (left, top, right, bottom)
    }
}

fn scale(value: f32, extent: f32, cells: u16) -> u16 {
    let cell = (value / extent * cells as f32).floor();
    cell.clamp(0.0, (cells - 1) as f32) as u16
}

fn unscale(cell: u16, cells: u16, extent: f32) -> f32 {
    let cell = cell.min(cells - 1);
    (cell as f32 + 0.5) * extent / cells as f32
}
