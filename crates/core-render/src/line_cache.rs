//! Per-row hash cache used to skip repainting unchanged frame rows.
//!
//! Each entry is `(len, ahash64)` over the row's cells (character and
//! flags). The cache is keyed by frame dimensions; a size change or an
//! explicit `clear` makes every row dirty on the next frame.

use crate::{Cell, Frame};
use ahash::AHasher;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHash {
    pub hash: u64,
    pub len: usize,
}

impl RowHash {
    pub fn of(cells: &[Cell]) -> Self {
        let mut h = AHasher::default();
        cells.hash(&mut h);
        Self {
            hash: h.finish(),
            len: cells.len(),
        }
    }
}

#[derive(Debug, Default)]
pub struct LineCache {
    width: u16,
    height: u16,
    rows: Vec<Option<RowHash>>,
}

impl LineCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.rows.clear();
    }

    pub fn is_warm_for(&self, frame: &Frame) -> bool {
        self.width == frame.width && self.height == frame.height && !self.rows.is_empty()
    }

    /// Rows of `frame` whose content differs from the cached snapshot, in
    /// top-to-bottom order. Updates the snapshot.
    pub fn changed_rows(&mut self, frame: &Frame) -> Vec<u16> {
        if !self.is_warm_for(frame) {
            self.width = frame.width;
            self.height = frame.height;
            self.rows = vec![None; frame.height as usize];
        }
        let mut changed = Vec::new();
        for y in 0..frame.height {
            let hash = RowHash::of(frame.row(y));
            let slot = &mut self.rows[y as usize];
            if *slot != Some(hash) {
                *slot = Some(hash);
                changed.push(y);
            }
        }
        changed
    }
}
