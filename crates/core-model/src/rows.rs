//! Per-row snapshot handed to renderers.

use core_state::{Cursor, Deflection, Selection};

/// Which edge of a cell the caret is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretEdge {
    Leading,
    Trailing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub screen_row: usize,
    pub offset: u64,
    pub bytes: Vec<u8>,
    pub cursor: Cursor,
    pub selection: Selection,
}

impl RowView {
    pub fn caret_at(&self, col: usize) -> Option<CaretEdge> {
        let cell = self.offset + col as u64;
        match self.cursor.deflection {
            Deflection::None if self.cursor.position == cell => Some(CaretEdge::Leading),
            Deflection::ToPrevious if self.cursor.position == cell + 1 => {
                Some(CaretEdge::Trailing)
            }
            _ => None,
        }
    }

    pub fn is_selected(&self, col: usize) -> bool {
        self.selection.in_range(self.offset + col as u64)
    }

    /// Column holding the caret on this row, if any.
    pub fn caret_column(&self) -> Option<(usize, CaretEdge)> {
        (0..self.bytes.len()).find_map(|col| self.caret_at(col).map(|edge| (col, edge)))
    }
}
