use crate::layout::GridConfig;
use crate::view::HexView;
use crate::{ViewError, ViewId};
use core_source::ByteSource;
use std::sync::Arc;
use tracing::info;

/// Owns the open views (one per tab) and tracks which one has focus.
///
/// Unlike a text editor there is no scratch buffer to fall back on: the
/// manager may be empty, and callers treat an empty manager as "quit".
#[derive(Debug, Default)]
pub struct ViewManager {
    views: Vec<HexView>,
    active: usize,
    next_id: usize,
}

impl ViewManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a view over `source` and focus it.
    pub fn open(
        &mut self,
        source: Arc<ByteSource>,
        config: GridConfig,
        visible_rows: u64,
    ) -> Result<ViewId, ViewError> {
        let id = ViewId(self.next_id);
        let view = HexView::open(id, source, config, visible_rows)?;
        self.next_id += 1;
        self.views.push(view);
        self.active = self.views.len() - 1;
        info!(target: "model.cursor", view = id.0, count = self.views.len(), "view_added");
        Ok(id)
    }

    pub fn active(&self) -> Option<&HexView> {
        self.views.get(self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut HexView> {
        self.views.get_mut(self.active)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Focus the view at `index`. Out of range indices are ignored.
    pub fn focus(&mut self, index: usize) -> bool {
        if index >= self.views.len() || index == self.active {
            return false;
        }
        self.active = index;
        true
    }

    /// Close the focused view. Focus moves to the view that took its slot,
    /// or the new last view.
    pub fn close_active(&mut self) -> Option<HexView> {
        if self.views.is_empty() {
            return None;
        }
        let closed = self.views.remove(self.active);
        self.active = self.active.min(self.views.len().saturating_sub(1));
        info!(
            target: "model.cursor",
            view = closed.id().0,
            remaining = self.views.len(),
            "view_closed"
        );
        Some(closed)
    }

    pub fn views(&self) -> &[HexView] {
        &self.views
    }

    pub fn views_mut(&mut self) -> &mut [HexView] {
        &mut self.views
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
