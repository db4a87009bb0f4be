//! Single entry point applying a `ViewEvent` to a `HexView`.
//!
//! Every event runs to completion before the next is handled; handlers
//! never block on anything but the `ByteSource` lock. A rejected event
//! (invalid goto text) leaves cursor, selection and viewport untouched.
//!
//! Sub-modules:
//! * `motion`   - keys and pointer presses/drags
//! * `jump`     - validated goto
//! * `viewport` - wheel scroll, resize and layout passes

use crate::ViewEvent;
use crate::goto::InvalidOffsetError;
use core_model::{HexView, MoveOutcome};
use tracing::trace;

mod jump;
mod motion;
mod viewport;

/// Result of handling a single `ViewEvent`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewUpdate {
    /// A redraw is needed.
    pub dirty: bool,
    /// The scroll row changed.
    pub scrolled: bool,
    /// Goto text that was rejected; nothing else changed.
    pub rejected: Option<InvalidOffsetError>,
}

impl ViewUpdate {
    pub fn clean() -> Self {
        Self::default()
    }

    pub fn dirty() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }

    pub fn scrolled() -> Self {
        Self {
            dirty: true,
            scrolled: true,
            rejected: None,
        }
    }

    pub fn rejected(err: InvalidOffsetError) -> Self {
        Self {
            rejected: Some(err),
            ..Self::default()
        }
    }
}

impl From<MoveOutcome> for ViewUpdate {
    fn from(o: MoveOutcome) -> Self {
        Self {
            dirty: o.changed(),
            scrolled: o.scrolled,
            rejected: None,
        }
    }
}

pub fn handle(view: &mut HexView, event: ViewEvent) -> ViewUpdate {
    trace!(target: "actions.dispatch", view = view.id().0, ?event, "handle");
    match event {
        ViewEvent::KeyMove { key, extend } => motion::handle_key(view, key, extend),
        ViewEvent::PointerDown { x, y, extend } => motion::handle_pointer(view, x, y, extend),
        ViewEvent::PointerDrag { x, y } => motion::handle_pointer(view, x, y, true),
        ViewEvent::GotoRequest { text } => jump::handle_goto(view, &text),
        ViewEvent::ScrollBy(rows) => viewport::handle_scroll(view, rows),
        ViewEvent::Resize { visible_rows } => viewport::handle_resize(view, visible_rows),
        ViewEvent::Layout(metrics) => viewport::handle_layout(view, &metrics),
    }
}
