//! Cursor and selection value types for a hex grid view.
//!
//! A grid cursor sits *between* two byte cells, like a text caret. Its scalar
//! `position` is a boundary index in `[0, size]`, where `size` itself means
//! "after the last byte". At row edges the scalar is ambiguous: offset
//! `k * row_width` is both the start of row `k` and the end of row `k - 1`.
//! `Deflection` records which side the caret renders against.
//!
//! Only the stored deflection lives here. The transient navigation hint
//! (`DeflectHint::PreserveEol`) is resolved by the cursor model in
//! `core-model` and never reaches a stored `Cursor`.
//!
//! Invariants (maintained by `core-model`, not enforced here):
//! * `cursor.position <= size`.
//! * `selection.pivot <= size` and `selection.bound <= size`.

mod selection;
pub use selection::Selection;

/// Which visual cell a boundary position renders against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Deflection {
    /// Caret renders before the byte at `position`.
    #[default]
    None,
    /// Caret renders after the byte at `position - 1` (line ends, end-of-file,
    /// trailing edge of a forward selection).
    ToPrevious,
}

impl Deflection {
    /// Offset correction for the cell the caret visually belongs to: 1 when
    /// the caret renders one cell earlier than its stored scalar.
    pub fn as_offset(self) -> u64 {
        match self {
            Deflection::None => 0,
            Deflection::ToPrevious => 1,
        }
    }
}

/// Deflection requested by a navigation intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeflectHint {
    None,
    ToPrevious,
    /// Keep end-of-line deflection across vertical moves.
    PreserveEol,
}

impl From<Deflection> for DeflectHint {
    fn from(d: Deflection) -> Self {
        match d {
            Deflection::None => DeflectHint::None,
            Deflection::ToPrevious => DeflectHint::ToPrevious,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub position: u64,
    pub deflection: Deflection,
}

impl Cursor {
    pub fn new(position: u64, deflection: Deflection) -> Self {
        Self {
            position,
            deflection,
        }
    }

    pub fn origin() -> Self {
        Self::default()
    }

    /// Offset of the cell the caret is drawn against, accounting for
    /// deflection. Saturates at 0 (an empty file parks the caret at 0).
    pub fn visual_offset(&self) -> u64 {
        if self.deflection == Deflection::ToPrevious {
            self.position.saturating_sub(1)
        } else {
            self.position
        }
    }

    /// True when the position sits exactly on a row boundary.
    pub fn at_row_boundary(&self, row_width: u64) -> bool {
        row_width != 0 && self.position % row_width == 0
    }
}
