//! Grid layout engine.
//!
//! Single source of truth for where bytes land on screen. The renderer asks
//! for a `GridGeometry` once per layout pass (after a resize or font change)
//! and the coordinate mapper reuses the very same geometry for the inverse
//! direction, so a click on a drawn cell always resolves to that cell.
//!
//! Horizontal structure of one row, left to right:
//!
//! ```text
//! [offset column] big_gap [c0] gap [c1] gap ... [c7] big_gap [c8] ... [c15] gap big_gap [ascii]
//! ```
//!
//! A *cell* is the glyph plus the gap before it (`cell_width = glyph + gap`),
//! so the caret for column `c` sits in the gap in front of the glyph. The
//! extra space introduced after `split_column - 1` is `split_gap`.
//!
//! Units are abstract: pixels for a GUI front-end, terminal columns/rows for
//! the terminal renderer.

/// Immutable grid shape for the life of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub row_width: u32,
    /// Rendering gap marker only; never affects offsets.
    pub split_column: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_width: 16,
            split_column: 8,
        }
    }
}

impl GridConfig {
    /// Build a config, forcing `row_width >= 1` and `split_column <= row_width`.
    pub fn new(row_width: u32, split_column: u32) -> Self {
        let row_width = row_width.max(1);
        Self {
            row_width,
            split_column: split_column.min(row_width),
        }
    }

    /// True when a visible split gap exists inside the row.
    pub fn has_split(&self) -> bool {
        self.split_column > 0 && self.split_column < self.row_width
    }
}

/// Font / cell metrics supplied by the renderer on each layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    /// Left edge of the offset column.
    pub origin_x: i32,
    /// Top edge of the first data row.
    pub origin_y: i32,
    /// Width of the rendered offset column text.
    pub offset_width: i32,
    /// Width of one two-digit hex glyph pair.
    pub glyph_width: i32,
    pub line_height: i32,
    pub gap: i32,
    pub big_gap: i32,
}

/// Geometry computed once per layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    /// X of the first hex glyph.
    pub byte_start: i32,
    /// X of the ASCII column.
    pub ascii_start: i32,
    /// Top-left of the clickable grid (first cell, including its leading gap).
    pub grid_x: i32,
    pub grid_y: i32,
    pub cell_width: i32,
    pub cell_height: i32,
    /// Extra width inserted before `split_column`.
    pub split_gap: i32,
    /// Gap between a cell's left edge and its glyph.
    pub gap: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Byte range shown on one screen row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub screen_row: usize,
    pub offset: u64,
    pub len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayoutEngine {
    config: GridConfig,
}

impl GridLayoutEngine {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn row_width(&self) -> u64 {
        u64::from(self.config.row_width)
    }

    /// `ceil(size / row_width)`.
    pub fn total_rows(&self, size: u64) -> u64 {
        size.div_ceil(self.row_width())
    }

    pub fn geometry(&self, m: &CellMetrics) -> GridGeometry {
        let cell_width = (m.glyph_width + m.gap).max(1);
        let cell_height = m.line_height.max(1);
        let split_gap = if self.config.has_split() {
            (m.big_gap - m.gap).max(0)
        } else {
            0
        };
        let byte_start = m.origin_x + m.offset_width + m.big_gap;
        let row_w = self.config.row_width as i32;
        let ascii_start = byte_start + row_w * cell_width + split_gap + m.big_gap;
        GridGeometry {
            byte_start,
            ascii_start,
            grid_x: byte_start - m.gap,
            grid_y: m.origin_y,
            cell_width,
            cell_height,
            split_gap,
            gap: m.gap,
        }
    }

    /// Rectangle of cell `col` on screen row `screen_row`.
    pub fn cell_rect(&self, geo: &GridGeometry, screen_row: usize, col: u32) -> Rect {
        let split = if self.config.has_split() && col >= self.config.split_column {
            geo.split_gap
        } else {
            0
        };
        Rect {
            x: geo.grid_x + col as i32 * geo.cell_width + split,
            y: geo.grid_y + screen_row as i32 * geo.cell_height,
            width: geo.cell_width,
            height: geo.cell_height,
        }
    }

    /// X at which the glyph of `col` is drawn.
    pub fn glyph_x(&self, geo: &GridGeometry, col: u32) -> i32 {
        self.cell_rect(geo, 0, col).x + geo.gap
    }

    /// Per-row byte ranges for `visible_rows` rows starting at `scroll_row`.
    /// Rows past end-of-file are omitted; the last row may be short.
    pub fn row_spans(&self, scroll_row: u64, visible_rows: u64, size: u64) -> Vec<RowSpan> {
        let rw = self.row_width();
        let total = self.total_rows(size);
        let first = scroll_row.min(total);
        let last = first.saturating_add(visible_rows).min(total);
        (first..last)
            .enumerate()
            .map(|(screen_row, row)| {
                let offset = row * rw;
                let len = (size - offset).min(rw) as usize;
                RowSpan {
                    screen_row,
                    offset,
                    len,
                }
            })
            .collect()
    }
}
