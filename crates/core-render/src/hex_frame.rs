//! Frame composition for one hex view.
//!
//! Screen layout (terminal cells):
//!
//! ```text
//! row 0            tab bar: " 1:name  2:other "
//! rows 1..h-1      %08x offset, %02X cells, split gap, ASCII column
//! row h-1          status line
//! ```
//!
//! Cell positions come from the view's `GridGeometry`, so the painted grid
//! and the pointer mapper agree on every column.

use crate::status::{StatusContext, build_status, prompt_cursor_column};
use crate::{CellFlags, Frame, TERMINAL_METRICS};
use core_model::{CaretEdge, GridGeometry, GridLayoutEngine, HexView, RowView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabLabel<'a> {
    pub name: &'a str,
    pub active: bool,
}

#[derive(Debug)]
pub struct Composed {
    pub frame: Frame,
    /// Where the hardware cursor goes; `None` hides it.
    pub cursor: Option<(u16, u16)>,
}

fn screen(v: i32) -> Option<u16> {
    u16::try_from(v).ok()
}

fn ascii_glyph(b: u8) -> char {
    if b.is_ascii_graphic() || b == b' ' {
        b as char
    } else {
        '.'
    }
}

pub fn compose(
    width: u16,
    height: u16,
    tabs: &[TabLabel<'_>],
    view: Option<&HexView>,
    rows: &[RowView],
    status: &StatusContext<'_>,
) -> Composed {
    let mut frame = Frame::new(width, height);
    draw_tabs(&mut frame, tabs);

    let mut cursor = None;
    if let Some((view, geo)) = view.and_then(|v| v.geometry().map(|g| (v, *g))) {
        let layout = view.layout();
        for row in rows {
            if let Some(caret) = draw_row(&mut frame, layout, &geo, row) {
                cursor = Some(caret);
            }
        }
        if view.size() == 0 {
            cursor = caret_cell(layout, &geo, 0, 0, CaretEdge::Leading);
        }
    }

    if let Some(status_y) = height.checked_sub(1) {
        frame.put_str(0, status_y, &build_status(status), CellFlags::empty());
        if let Some(text) = status.prompt {
            cursor = u16::try_from(prompt_cursor_column(text))
                .ok()
                .map(|x| (x.min(width.saturating_sub(1)), status_y));
        }
    }

    Composed { frame, cursor }
}

fn draw_tabs(frame: &mut Frame, tabs: &[TabLabel<'_>]) {
    let mut x: u16 = 0;
    for (i, tab) in tabs.iter().enumerate() {
        let label = format!(" {}:{} ", i + 1, tab.name);
        let flags = if tab.active {
            CellFlags::REVERSE
        } else {
            CellFlags::empty()
        };
        frame.put_str(x, 0, &label, flags);
        let Ok(len) = u16::try_from(label.chars().count()) else {
            break;
        };
        x = x.saturating_add(len);
        if x >= frame.width {
            break;
        }
    }
}

/// Paint one grid row; returns the caret position when it sits on this row.
fn draw_row(
    frame: &mut Frame,
    layout: &GridLayoutEngine,
    geo: &GridGeometry,
    row: &RowView,
) -> Option<(u16, u16)> {
    let y = screen(geo.grid_y + row.screen_row as i32 * geo.cell_height)?;
    let offset_x = screen(TERMINAL_METRICS.origin_x)?;
    frame.put_str(offset_x, y, &format!("{:08x}", row.offset), CellFlags::empty());

    let mut caret = None;
    for (col, &byte) in row.bytes.iter().enumerate() {
        let c = col as u32;
        let Some(x) = screen(layout.glyph_x(geo, c)) else {
            continue;
        };
        let selected = row.is_selected(col);
        let flags = if selected {
            CellFlags::REVERSE
        } else {
            CellFlags::empty()
        };
        frame.put_str(x, y, &format!("{byte:02X}"), flags);

        // close the gap between adjacent selected cells
        if selected && row.is_selected(col + 1) && col + 1 < row.bytes.len() {
            let glyph_end = x.saturating_add(glyph_width(geo));
            if let Some(next) = screen(layout.glyph_x(geo, c + 1)) {
                frame.apply_flags_span(
                    glyph_end,
                    y,
                    next.saturating_sub(glyph_end),
                    CellFlags::REVERSE,
                );
            }
        }

        let ascii_x = screen(geo.ascii_start + col as i32);
        if let Some(ax) = ascii_x {
            let mut buf = [0u8; 4];
            frame.put_str(ax, y, ascii_glyph(byte).encode_utf8(&mut buf), flags);
        }

        if let Some(edge) = row.caret_at(col) {
            if let Some(ax) = ascii_x {
                frame.apply_flags_span(ax, y, 1, CellFlags::UNDERLINE);
            }
            caret = caret_cell(layout, geo, row.screen_row, c, edge);
        }
    }
    caret
}

fn glyph_width(geo: &GridGeometry) -> u16 {
    u16::try_from(geo.cell_width - geo.gap).unwrap_or(1)
}

fn caret_cell(
    layout: &GridLayoutEngine,
    geo: &GridGeometry,
    screen_row: usize,
    col: u32,
    edge: CaretEdge,
) -> Option<(u16, u16)> {
    let rect = layout.cell_rect(geo, screen_row, col);
    let glyph_x = rect.x + geo.gap;
    let x = match edge {
        CaretEdge::Leading => glyph_x,
        CaretEdge::Trailing => glyph_x + (geo.cell_width - geo.gap),
    };
    Some((screen(x)?, screen(rect.y)?))
}
