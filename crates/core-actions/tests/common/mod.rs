#![allow(dead_code)] // Each test binary uses a subset of helpers.

use core_actions::{Action, ViewEvent, ViewUpdate, handle, translate_key, translate_mouse};
use core_events::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use core_model::{CellMetrics, GridConfig, HexView, ViewId};
use core_source::ByteSource;
use std::io::Write;
use std::sync::Arc;

pub fn terminal_metrics() -> CellMetrics {
    CellMetrics {
        origin_x: 0,
        origin_y: 1,
        offset_width: 8,
        glyph_width: 2,
        line_height: 1,
        gap: 1,
        big_gap: 2,
    }
}

/// View over a real temp file holding `size` bytes `i % 256`. The file
/// handle is returned so it outlives the view.
pub fn file_view(size: usize, visible_rows: u64) -> (tempfile::NamedTempFile, HexView) {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    let data: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();
    tmp.write_all(&data).unwrap();
    tmp.flush().unwrap();
    let src = Arc::new(ByteSource::open(tmp.path()).unwrap());
    let mut view = HexView::open(ViewId(0), src, GridConfig::default(), visible_rows).unwrap();
    view.set_layout(&terminal_metrics());
    (tmp, view)
}

/// Translate a key and apply it when it targets the view.
pub fn press(view: &mut HexView, code: KeyCode, mods: KeyModifiers) -> Option<ViewUpdate> {
    match translate_key(&KeyEvent::new(code, mods), false)? {
        Action::View(ev) => Some(handle(view, ev)),
        _ => None,
    }
}

pub fn mouse(view: &mut HexView, ev: MouseEvent) -> Option<ViewUpdate> {
    match translate_mouse(&ev, 3)? {
        Action::View(ev) => Some(handle(view, ev)),
        _ => None,
    }
}

pub fn goto(view: &mut HexView, text: &str) -> ViewUpdate {
    handle(view, ViewEvent::GotoRequest { text: text.into() })
}
