//! Pointer coordinates to `(offset, deflection)`.
//!
//! Inverse of `GridLayoutEngine::cell_rect`; both read the same
//! `GridGeometry` so a click on a drawn cell lands on that cell.

use crate::layout::{GridConfig, GridGeometry};
use core_state::Deflection;

#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper<'a> {
    pub config: &'a GridConfig,
    pub geometry: &'a GridGeometry,
    pub scroll_row: u64,
    pub visible_rows: u64,
}

impl<'a> CoordinateMapper<'a> {
    pub fn new(
        config: &'a GridConfig,
        geometry: &'a GridGeometry,
        scroll_row: u64,
        visible_rows: u64,
    ) -> Self {
        Self {
            config,
            geometry,
            scroll_row,
            visible_rows,
        }
    }

    /// Unclamped offset for a point; callers clamp to the file size through
    /// the cursor model.
    pub fn map(&self, x: i32, y: i32) -> (u64, Deflection) {
        let geo = self.geometry;
        let cw = i64::from(geo.cell_width.max(1));
        let ch = i64::from(geo.cell_height.max(1));
        let rw = i64::from(self.config.row_width);

        let mut rel_x = i64::from(x.max(geo.grid_x)) - i64::from(geo.grid_x);
        let rel_y = i64::from(y.max(geo.grid_y)) - i64::from(geo.grid_y);

        if self.config.has_split() {
            let split_x = i64::from(self.config.split_column) * cw;
            let sg = i64::from(geo.split_gap);
            if rel_x >= split_x + sg {
                rel_x -= sg;
            } else if rel_x >= split_x {
                rel_x = split_x;
            }
        }

        let (col, deflection) = match rel_x / cw {
            c if c >= rw => (rw, Deflection::ToPrevious),
            c => (c, Deflection::None),
        };
        let max_row = i64::try_from(self.visible_rows).unwrap_or(i64::MAX);
        let row = (rel_y / ch).clamp(0, max_row) as u64;

        let offset = self
            .scroll_row
            .saturating_add(row)
            .saturating_mul(rw as u64)
            .saturating_add(col as u64);
        (offset, deflection)
    }
}
