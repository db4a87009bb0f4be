use crate::layout::{CellMetrics, GridConfig, GridGeometry, GridLayoutEngine};
use crate::mapper::CoordinateMapper;
use crate::rows::RowView;
use crate::scroll::ViewportScroller;
use crate::{MAX_TOTAL_ROWS, ViewError, ViewId};
use core_source::{ByteSource, SourceError};
use core_state::{Cursor, DeflectHint, Deflection, Selection};
use std::sync::Arc;
use tracing::debug;

/// Navigation keys understood by the cursor model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

/// What a transition changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// Cursor or selection changed.
    pub moved: bool,
    pub scrolled: bool,
}

impl MoveOutcome {
    pub fn changed(&self) -> bool {
        self.moved || self.scrolled
    }
}

/// One open file: cursor, selection and viewport over a shared `ByteSource`.
#[derive(Debug)]
pub struct HexView {
    id: ViewId,
    source: Arc<ByteSource>,
    layout: GridLayoutEngine,
    geometry: Option<GridGeometry>,
    cursor: Cursor,
    selection: Selection,
    scroller: ViewportScroller,
}

impl HexView {
    pub fn open(
        id: ViewId,
        source: Arc<ByteSource>,
        config: GridConfig,
        visible_rows: u64,
    ) -> Result<Self, ViewError> {
        let layout = GridLayoutEngine::new(config);
        let rows = layout.total_rows(source.size());
        if rows > MAX_TOTAL_ROWS {
            return Err(ViewError::FileTooLarge {
                rows,
                max: MAX_TOTAL_ROWS,
            });
        }
        debug!(
            target: "model.cursor",
            view = id.0,
            name = source.name(),
            size = source.size(),
            rows,
            "view_open"
        );
        Ok(Self {
            id,
            scroller: ViewportScroller::new(rows, layout.row_width(), visible_rows),
            source,
            layout,
            geometry: None,
            cursor: Cursor::origin(),
            selection: Selection::default(),
        })
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn source(&self) -> &Arc<ByteSource> {
        &self.source
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    pub fn size(&self) -> u64 {
        self.source.size()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn config(&self) -> &GridConfig {
        self.layout.config()
    }

    pub fn layout(&self) -> &GridLayoutEngine {
        &self.layout
    }

    pub fn scroller(&self) -> &ViewportScroller {
        &self.scroller
    }

    pub fn scroll_row(&self) -> u64 {
        self.scroller.scroll_row()
    }

    pub fn visible_row_count(&self) -> u64 {
        self.scroller.visible_rows()
    }

    /// Geometry from the last layout pass, if one happened.
    pub fn geometry(&self) -> Option<&GridGeometry> {
        self.geometry.as_ref()
    }

    /// Move the cursor to `target`.
    ///
    /// Targets at or past the end clamp to the end-of-file boundary, which is
    /// always drawn against the last byte. A non-empty forward selection
    /// keeps the caret on the trailing edge of its last byte.
    pub fn move_to(&mut self, target: u64, hint: DeflectHint, extend: bool) -> MoveOutcome {
        let size = self.size();
        let before = (self.cursor, self.selection);

        let (position, mut deflection) = if target >= size {
            (size, Deflection::ToPrevious)
        } else {
            (target, self.resolve_hint(target, hint))
        };

        if extend {
            self.selection.extend(position);
        } else {
            self.selection.set_pivot(position);
        }
        if self.selection.is_valid() && position > self.selection.pivot() {
            deflection = Deflection::ToPrevious;
        }

        self.cursor = Cursor::new(position, deflection);
        let scrolled = self.scroller.ensure_visible(position, deflection);
        let moved = before != (self.cursor, self.selection);
        debug!(
            target: "model.cursor",
            view = self.id.0,
            requested = target,
            position,
            ?deflection,
            extend,
            scroll_row = self.scroller.scroll_row(),
            "move_to"
        );
        MoveOutcome { moved, scrolled }
    }

    fn resolve_hint(&self, target: u64, hint: DeflectHint) -> Deflection {
        match hint {
            DeflectHint::None => Deflection::None,
            DeflectHint::ToPrevious => Deflection::ToPrevious,
            DeflectHint::PreserveEol => {
                let rw = self.layout.row_width();
                if target % rw == 0
                    && self.cursor.at_row_boundary(rw)
                    && self.cursor.deflection == Deflection::ToPrevious
                {
                    Deflection::ToPrevious
                } else {
                    Deflection::None
                }
            }
        }
    }

    /// Target and hint for a navigation key, or `None` when the move would
    /// go before the start of the file.
    pub fn nav_target(&self, key: NavKey) -> Option<(u64, DeflectHint)> {
        let pos = self.cursor.position;
        let rw = self.layout.row_width();
        let page = rw.saturating_mul(self.scroller.visible_rows().max(1));
        let row_start = || {
            let p = pos.saturating_sub(self.cursor.deflection.as_offset());
            p - p % rw
        };
        match key {
            NavKey::Left => pos.checked_sub(1).map(|t| (t, DeflectHint::None)),
            NavKey::Right => Some((pos.saturating_add(1), DeflectHint::None)),
            NavKey::Up => pos.checked_sub(rw).map(|t| (t, DeflectHint::PreserveEol)),
            NavKey::Down => Some((pos.saturating_add(rw), DeflectHint::PreserveEol)),
            NavKey::PageUp => pos.checked_sub(page).map(|t| (t, DeflectHint::PreserveEol)),
            NavKey::PageDown => Some((pos.saturating_add(page), DeflectHint::PreserveEol)),
            NavKey::Home => Some((row_start(), DeflectHint::None)),
            NavKey::End => Some((row_start().saturating_add(rw), DeflectHint::ToPrevious)),
        }
    }

    pub fn apply_key(&mut self, key: NavKey, extend: bool) -> MoveOutcome {
        match self.nav_target(key) {
            Some((target, hint)) => self.move_to(target, hint, extend),
            None => MoveOutcome::default(),
        }
    }

    /// Place the cursor under a pointer. Ignored until a layout pass has
    /// produced geometry.
    pub fn pointer(&mut self, x: i32, y: i32, extend: bool) -> MoveOutcome {
        let Some(geo) = self.geometry else {
            return MoveOutcome::default();
        };
        let mapper = CoordinateMapper::new(
            self.layout.config(),
            &geo,
            self.scroller.scroll_row(),
            self.scroller.visible_rows(),
        );
        let (target, deflection) = mapper.map(x, y);
        self.move_to(target, deflection.into(), extend)
    }

    /// Recompute geometry from renderer metrics and keep it for the mapper.
    pub fn set_layout(&mut self, metrics: &CellMetrics) -> GridGeometry {
        let geo = self.layout.geometry(metrics);
        self.geometry = Some(geo);
        geo
    }

    /// New viewport height. The cursor is kept on screen, on the same
    /// screen line when that line still exists.
    pub fn resize(&mut self, visible_rows: u64) -> bool {
        self.scroller
            .set_visible_rows(visible_rows, self.cursor.position, self.cursor.deflection)
    }

    /// Wheel scroll; cursor and selection stay where they are.
    pub fn scroll_by(&mut self, rows: i64) -> bool {
        self.scroller.scroll_by(rows)
    }

    /// Bytes for every on-screen row, read under one source lock.
    pub fn visible_rows(&self) -> Result<Vec<RowView>, SourceError> {
        let spans = self.layout.row_spans(
            self.scroller.scroll_row(),
            self.scroller.visible_rows(),
            self.size(),
        );
        let (Some(first), Some(last)) = (spans.first(), spans.last()) else {
            return Ok(Vec::new());
        };
        let data = self
            .source
            .read_range(first.offset, last.offset + last.len as u64)?;
        let mut rest = data.as_slice();
        let mut rows = Vec::with_capacity(spans.len());
        for span in &spans {
            let take = span.len.min(rest.len());
            let (bytes, tail) = rest.split_at(take);
            rest = tail;
            rows.push(RowView {
                screen_row: span.screen_row,
                offset: span.offset,
                bytes: bytes.to_vec(),
                cursor: self.cursor,
                selection: self.selection,
            });
        }
        Ok(rows)
    }

    /// At most `limit` leading bytes of the selection, or `None` when
    /// nothing is selected. Only the returned prefix is read.
    pub fn read_selected_bytes(&self, limit: u64) -> Result<Option<Vec<u8>>, SourceError> {
        match self.selection.selected_range() {
            Some((begin, end)) => {
                let end = end.min(begin.saturating_add(limit));
                self.source.read_range(begin, end).map(Some)
            }
            None => Ok(None),
        }
    }
}
