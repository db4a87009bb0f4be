//! Key and pointer moves.

use super::ViewUpdate;
use core_model::{HexView, NavKey};

pub(crate) fn handle_key(view: &mut HexView, key: NavKey, extend: bool) -> ViewUpdate {
    view.apply_key(key, extend).into()
}

/// Presses and drags share one path; a drag is a press that extends.
/// Before the first layout pass there is no geometry and the event is
/// dropped.
pub(crate) fn handle_pointer(view: &mut HexView, x: i32, y: i32, extend: bool) -> ViewUpdate {
    view.pointer(x, y, extend).into()
}
