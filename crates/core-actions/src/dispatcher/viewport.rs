//! Viewport events that never move the cursor.

use super::ViewUpdate;
use core_model::{CellMetrics, HexView};

pub(crate) fn handle_scroll(view: &mut HexView, rows: i64) -> ViewUpdate {
    if view.scroll_by(rows) {
        ViewUpdate::scrolled()
    } else {
        ViewUpdate::clean()
    }
}

pub(crate) fn handle_resize(view: &mut HexView, visible_rows: u64) -> ViewUpdate {
    if view.resize(visible_rows) {
        ViewUpdate::dirty()
    } else {
        ViewUpdate::clean()
    }
}

pub(crate) fn handle_layout(view: &mut HexView, metrics: &CellMetrics) -> ViewUpdate {
    let changed = view.geometry().copied() != Some(view.layout().geometry(metrics));
    view.set_layout(metrics);
    if changed {
        ViewUpdate::dirty()
    } else {
        ViewUpdate::clean()
    }
}
