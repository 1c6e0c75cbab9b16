use ratatui::layout::Rect;

use crate::config::{HEIGHT, WIDTH};
use crate::game;

/// Maps the logical 800×600 screen onto a block of terminal cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub area: Rect,
}

impl Viewport {
    pub fn new(area: Rect) -> Self {
        Self { area }
    }

    fn scale(&self) -> (f32, f32) {
        (
            WIDTH / self.area.width.max(1) as f32,
            HEIGHT / self.area.height.max(1) as f32,
        )
    }

    /// Logical position of the center of a terminal cell, if the cell is inside.
    pub fn to_logical(&self, column: u16, row: u16) -> Option<(f32, f32)> {
        let a = self.area;
        if column < a.x || row < a.y || column >= a.x + a.width || row >= a.y + a.height {
            return None;
        }
        let (sx, sy) = self.scale();
        Some((
            (column - a.x) as f32 * sx + sx / 2.0,
            (row - a.y) as f32 * sy + sy / 2.0,
        ))
    }

    /// Cells whose centers fall inside `rect`, at least one cell each way,
    /// clipped to the viewport.
    pub fn to_cells(&self, rect: &game::Rect) -> Rect {
        let a = self.area;
        if a.is_empty() {
            return a;
        }
        let (sx, sy) = self.scale();
        let x0 = first_cell(rect.left(), sx).min(a.width - 1);
        let y0 = first_cell(rect.top(), sy).min(a.height - 1);
        let x1 = first_cell(rect.right(), sx).min(a.width);
        let y1 = first_cell(rect.bottom(), sy).min(a.height);
        Rect::new(
            a.x + x0,
            a.y + y0,
            x1.saturating_sub(x0).max(1),
            y1.saturating_sub(y0).max(1),
        )
    }

    /// Terminal row for a logical y, clamped to the viewport.
    pub fn row(&self, y: f32) -> u16 {
        let (_, sy) = self.scale();
        let r = ((y / sy) as u16).min(self.area.height.saturating_sub(1));
        self.area.y + r
    }

    /// Terminal column for a logical x, clamped to the viewport.
    pub fn column(&self, x: f32) -> u16 {
        let (sx, _) = self.scale();
        let c = ((x / sx) as u16).min(self.area.width.saturating_sub(1));
        self.area.x + c
    }
}

/// Index of the first cell whose center is at or past logical `edge`.
fn first_cell(edge: f32, scale: f32) -> u16 {
    (edge / scale - 0.5).ceil().max(0.0) as u16
}
