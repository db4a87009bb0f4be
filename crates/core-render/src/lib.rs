//! Terminal rendering for hex views.
//!
//! Pipeline per frame:
//! 1. `hex_frame::compose` builds a `Frame` (tab bar, hex grid, ASCII column,
//!    status line) from the active view's `RowView`s and returns the caret
//!    position for the hardware cursor.
//! 2. `RenderEngine::render` hashes each frame row, repaints only rows whose
//!    hash changed since the previous frame and places the cursor.
//! 3. `writer::Writer` batches the terminal commands and flushes once.
//!
//! The terminal grid uses `TERMINAL_METRICS`: one cell per character, the
//! first screen row reserved for tabs and the last for the status line.
//!
//! Invariants:
//! - Every cell holds exactly one printable ASCII character.
//! - A frame row is repainted as a whole; the cache never holds partial rows.
//! - Resize invalidates the cache so the next frame repaints every row.

use bitflags::bitflags;
use core_model::CellMetrics;

pub mod hex_frame;
pub mod line_cache;
pub mod render_engine;
pub mod status;
pub mod writer;

pub use hex_frame::{Composed, TabLabel, compose};
pub use render_engine::{RenderEngine, RenderStats};
pub use status::{StatusContext, build_status};

/// Cell metrics for a character-cell terminal: 8-column offset, two-digit
/// hex cells separated by one space, a two-column gap at the split and
/// before the ASCII column. Row 0 is the tab bar.
pub const TERMINAL_METRICS: CellMetrics = CellMetrics {
    origin_x: 0,
    origin_y: 1,
    offset_width: 8,
    glyph_width: 2,
    line_height: 1,
    gap: 1,
    big_gap: 2,
};

/// Screen rows not available to the grid (tab bar and status line).
pub const CHROME_ROWS: u16 = 2;

/// Grid rows available on a terminal `height` rows tall.
pub fn grid_rows(height: u16) -> u64 {
    u64::from(height.saturating_sub(CHROME_ROWS))
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CellFlags: u8 {
        const REVERSE   = 0b0000_0001; // selection, active tab
        const UNDERLINE = 0b0000_0010; // caret mirror in the ASCII column
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub flags: CellFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            flags: CellFlags::empty(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Write `text` starting at (x, y); characters past the right edge are dropped.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, flags: CellFlags) {
        for (dx, ch) in text.chars().enumerate() {
            let Ok(dx) = u16::try_from(dx) else { break };
            let Some(idx) = x.checked_add(dx).and_then(|cx| self.index(cx, y)) else {
                break;
            };
            self.cells[idx] = Cell { ch, flags };
        }
    }

    /// OR `flags` into `span_width` cells starting at (x, y).
    pub fn apply_flags_span(&mut self, x: u16, y: u16, span_width: u16, flags: CellFlags) {
        let span = span_width.min(self.width.saturating_sub(x));
        for dx in 0..span {
            if let Some(idx) = self.index(x + dx, y) {
                self.cells[idx].flags |= flags;
            }
        }
    }

    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Row text without styling (tests and diagnostics).
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|c| c.ch).collect()
    }
}
