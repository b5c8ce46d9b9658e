//! Table geometry: margins → interior rectangle → 5×5 cells

use serde::{Deserialize, Serialize};

use crate::error::{BingoError, BingoResult};
use crate::grid::GRID_SIZE;
use crate::types::Rect;

/// Page margins as fractions of the page size (each in `[0, 1)`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left, right, top, bottom }
    }

    fn check_fraction(name: &str, value: f64) -> BingoResult<()> {
        if !value.is_finite() || !(0.0..1.0).contains(&value) {
            return Err(BingoError::InvalidMargins(format!(
                "{} margin {} is not a fraction in [0, 1)",
                name, value
            )));
        }
        Ok(())
    }

    pub fn validate(&self) -> BingoResult<()> {
        Self::check_fraction("left", self.left)?;
        Self::check_fraction("right", self.right)?;
        Self::check_fraction("top", self.top)?;
        Self::check_fraction("bottom", self.bottom)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 0.10,
            right: 0.10,
            top: 0.245,
            bottom: 0.115,
        }
    }
}

/// Interior table rectangle of `page` after applying `margins`.
///
/// Fails with `InvalidMargins` when the fractions collapse or invert
/// the interior (right edge ≤ left edge, or top ≤ bottom).
pub fn table_rect(page: Rect, margins: &Margins) -> BingoResult<Rect> {
    margins.validate()?;

    let left_x = page.x + page.width * margins.left;
    let right_x = page.x + page.width * (1.0 - margins.right);
    let top_y = page.y + page.height * (1.0 - margins.top);
    let bottom_y = page.y + page.height * margins.bottom;

    if right_x <= left_x || top_y <= bottom_y {
        return Err(BingoError::InvalidMargins(format!(
            "left={} right={} top={} bottom={} leave no room on a {}x{} page",
            margins.left, margins.right, margins.top, margins.bottom, page.width, page.height
        )));
    }

    Ok(Rect::new(left_x, bottom_y, right_x - left_x, top_y - bottom_y))
}

/// Cell at `row`/`col` of the table. Row 0 is the top row.
pub fn cell_rect(table: Rect, row: usize, col: usize) -> Rect {
    let cell_w = table.width / GRID_SIZE as f64;
    let cell_h = table.height / GRID_SIZE as f64;
    Rect::new(
        table.left() + col as f64 * cell_w,
        table.top() - (row + 1) as f64 * cell_h,
        cell_w,
        cell_h,
    )
}
