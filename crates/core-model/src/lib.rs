//! Navigation model for a fixed-width hex grid.
//!
//! Four pieces of state are kept consistent here: the scroll row, the cursor
//! (a byte *boundary* plus its `Deflection`), the pivot/bound selection and
//! the geometry that maps screen points to offsets. Front-ends feed events in
//! and read `RowView`s out; they never mutate cursor state directly.
//!
//! Transition pipeline for every move (keys, pointer, goto):
//!
//! ```text
//! target + DeflectHint -> HexView::move_to -> Selection -> ViewportScroller
//! ```
//!
//! Core invariants (must hold after every public call on `HexView`):
//! * `cursor.position <= size`; `position == size` implies `ToPrevious`
//!   unless the file is empty.
//! * `selection.pivot <= size` and `selection.bound <= size`.
//! * A non-empty selection with `position > pivot` renders `ToPrevious`.
//! * `scroll_row <= max(total_rows, 1) - 1`.
//! * After `move_to`, the cursor's effective row is on screen.
//!
//! Views never touch file handles directly; all reads go through the shared
//! `ByteSource`, whose lock scopes each seek+read pair.
//!
//! Geometry is computed once per layout pass (`HexView::set_layout`) and kept
//! on the view, so the renderer and the pointer mapper never disagree about
//! where a cell is.

use core_source::SourceError;
use thiserror::Error;

mod layout;
mod manager;
mod mapper;
mod rows;
pub mod scroll;
mod view;

pub use layout::{CellMetrics, GridConfig, GridGeometry, GridLayoutEngine, Rect, RowSpan};
pub use manager::ViewManager;
pub use mapper::CoordinateMapper;
pub use rows::{CaretEdge, RowView};
pub use scroll::ViewportScroller;
pub use view::{HexView, MoveOutcome, NavKey};

/// Largest row count a view accepts; scroll indicators address rows with a
/// signed 32-bit range.
pub const MAX_TOTAL_ROWS: u64 = i32::MAX as u64;

/// Stable identifier for a `HexView` within one `ViewManager`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub usize);

#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("file too large: {rows} rows exceeds the maximum of {max}")]
    FileTooLarge { rows: u64, max: u64 },
}
