//! Minimal-motion autoscroll.
//!
//! Two tiers:
//! * The cursor moved off screen from an on-screen row (arrow / page keys):
//!   shift the scroll row by exactly the cursor's row delta, so arrow keys
//!   scroll one row at a time and page keys keep the cursor's screen line.
//! * The cursor was already off screen (goto, file open, after a wheel
//!   scroll): jump so the cursor row becomes the top row.
//!
//! Rows are *effective* rows: a `ToPrevious` caret belongs to the row of the
//! byte before its scalar position.
//!
//! Invariants (after every public call):
//! * `scroll_row <= max(total_rows, 1) - 1`.
//! * After `ensure_visible`, the cursor's effective row lies within
//!   `[scroll_row, scroll_row + visible_rows)` (with `visible_rows` treated as
//!   at least one row).

use core_state::Deflection;
use tracing::trace;

/// Effective row of a caret at `pos` rendered with `deflection`.
pub fn effective_row(pos: u64, deflection: Deflection, row_width: u64) -> u64 {
    let pos = if deflection == Deflection::ToPrevious && pos > 0 {
        pos - 1
    } else {
        pos
    };
    pos / row_width.max(1)
}

/// Compute the new first visible row keeping `target_row` visible.
///
/// Returns `Some(new_first)` when a scroll is needed, else `None`. The result
/// is not clamped to the document; callers clamp against their row count.
pub fn compute_scroll(
    first: u64,
    visible_rows: u64,
    previous_row: u64,
    target_row: u64,
) -> Option<u64> {
    let h = visible_rows.max(1);
    let on_screen = |row: u64| row >= first && row < first.saturating_add(h);
    if on_screen(target_row) {
        return None;
    }
    if on_screen(previous_row) {
        // Same screen line as before the move.
        let new_first = if target_row >= previous_row {
            first.saturating_add(target_row - previous_row)
        } else {
            first.saturating_sub(previous_row - target_row)
        };
        return Some(new_first);
    }
    Some(target_row)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportScroller {
    scroll_row: u64,
    visible_rows: u64,
    total_rows: u64,
    row_width: u64,
    /// Effective cursor row seen by the last `ensure_visible`.
    last_cursor_row: u64,
}

impl ViewportScroller {
    pub fn new(total_rows: u64, row_width: u64, visible_rows: u64) -> Self {
        Self {
            scroll_row: 0,
            visible_rows,
            total_rows,
            row_width: row_width.max(1),
            last_cursor_row: 0,
        }
    }

    pub fn scroll_row(&self) -> u64 {
        self.scroll_row
    }

    pub fn visible_rows(&self) -> u64 {
        self.visible_rows
    }

    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    pub fn max_scroll_row(&self) -> u64 {
        self.total_rows.saturating_sub(1)
    }

    pub fn is_row_visible(&self, row: u64) -> bool {
        row >= self.scroll_row && row < self.scroll_row.saturating_add(self.visible_rows.max(1))
    }

    /// Keep the caret at `pos` visible. Returns true if the scroll row changed.
    pub fn ensure_visible(&mut self, pos: u64, deflection: Deflection) -> bool {
        let target = effective_row(pos, deflection, self.row_width);
        let previous = self.last_cursor_row;
        self.last_cursor_row = target;
        let Some(new_first) = compute_scroll(self.scroll_row, self.visible_rows, previous, target)
        else {
            return false;
        };
        let before = self.scroll_row;
        self.scroll_row = new_first.min(self.max_scroll_row());
        trace!(
            target: "model.scroll",
            from = before,
            to = self.scroll_row,
            previous_row = previous,
            target_row = target,
            "ensure_visible"
        );
        self.scroll_row != before
    }

    /// Scroll without moving the cursor (wheel / scrollbar). Returns true if
    /// the scroll row changed.
    pub fn scroll_by(&mut self, rows: i64) -> bool {
        let before = self.scroll_row;
        let next = if rows >= 0 {
            self.scroll_row.saturating_add(rows.unsigned_abs())
        } else {
            self.scroll_row.saturating_sub(rows.unsigned_abs())
        };
        self.scroll_row = next.min(self.max_scroll_row());
        self.scroll_row != before
    }

    /// Record a new visible row count (resize) for a caret at `pos`. An
    /// on-screen caret keeps its screen line, clamped to the new height; an
    /// off-screen caret is jumped to. Returns true if anything changed.
    pub fn set_visible_rows(
        &mut self,
        visible_rows: u64,
        pos: u64,
        deflection: Deflection,
    ) -> bool {
        let row = effective_row(pos, deflection, self.row_width);
        let screen_line = self.is_row_visible(row).then(|| row - self.scroll_row);
        let before = self.scroll_row;
        let changed = self.visible_rows != visible_rows;
        self.visible_rows = visible_rows;
        self.last_cursor_row = row;
        let h = visible_rows.max(1);
        let first = match screen_line {
            Some(line) => row - line.min(h - 1),
            None => row,
        };
        self.scroll_row = first.min(self.max_scroll_row());
        if self.scroll_row != before {
            trace!(
                target: "model.scroll",
                from = before,
                to = self.scroll_row,
                cursor_row = row,
                visible_rows,
                "resize"
            );
        }
        changed || self.scroll_row != before
    }
}
