//! Frame emission with row-level change detection.
//!
//! The engine keeps a `LineCache` of the previous frame. Each render hashes
//! the new frame's rows, repaints only the rows that changed (a full frame
//! when the cache is cold) and then positions or hides the hardware cursor.

use crate::line_cache::LineCache;
use crate::writer::Writer;
use crate::{CellFlags, Frame};
use anyhow::Result;
use std::io::Write;
use std::time::Instant;
use tracing::trace;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub full: bool,
    pub rows_repainted: usize,
    pub print_commands: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderMetrics {
    pub full_frames: u64,
    pub partial_frames: u64,
    pub rows_repainted: u64,
    pub rows_skipped: u64,
    pub last_render_ns: u64,
}

#[derive(Debug, Default)]
pub struct RenderEngine {
    cache: LineCache,
    metrics: RenderMetrics,
}

impl RenderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metrics(&self) -> RenderMetrics {
        self.metrics
    }

    /// Force the next frame to repaint every row.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    pub fn render<W: Write>(
        &mut self,
        out: &mut W,
        frame: &Frame,
        cursor: Option<(u16, u16)>,
    ) -> Result<RenderStats> {
        let started = Instant::now();
        let full = !self.cache.is_warm_for(frame);
        let changed = self.cache.changed_rows(frame);

        let mut w = Writer::new();
        w.hide_cursor();
        for &y in &changed {
            w.move_to(0, y);
            w.clear_line();
            emit_row(&mut w, frame, y);
        }
        if let Some((x, y)) = cursor {
            w.move_to(x, y);
            w.show_cursor();
        }
        let stats = RenderStats {
            full,
            rows_repainted: changed.len(),
            print_commands: w.print_count(),
        };
        w.flush_to(out)?;

        let skipped = frame.height as usize - changed.len();
        if full {
            self.metrics.full_frames += 1;
        } else {
            self.metrics.partial_frames += 1;
        }
        self.metrics.rows_repainted += changed.len() as u64;
        self.metrics.rows_skipped += skipped as u64;
        self.metrics.last_render_ns = started.elapsed().as_nanos() as u64;
        trace!(
            target: "render",
            full,
            repainted = changed.len(),
            skipped,
            ns = self.metrics.last_render_ns,
            "frame"
        );
        Ok(stats)
    }
}

/// One `Print` per run of equally styled cells.
fn emit_row(w: &mut Writer, frame: &Frame, y: u16) {
    let mut run = String::new();
    let mut run_flags = CellFlags::empty();
    w.style(run_flags);
    for cell in frame.row(y) {
        if cell.flags != run_flags {
            w.print(std::mem::take(&mut run));
            run_flags = cell.flags;
            w.style(run_flags);
        }
        run.push(cell.ch);
    }
    // trailing blanks are already cleared
    let trimmed = if run_flags.is_empty() {
        run.trim_end()
    } else {
        run.as_str()
    };
    w.print(trimmed.to_string());
    if !run_flags.is_empty() {
        w.style(CellFlags::empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(text: &str) -> Frame {
        let mut f = Frame::new(12, 3);
        f.put_str(0, 1, text, CellFlags::empty());
        f
    }

    #[test]
    fn first_frame_is_full_then_only_changes_repaint() {
        let mut engine = RenderEngine::new();
        let mut out = Vec::new();
        let stats = engine.render(&mut out, &frame_with("00 01"), None).unwrap();
        assert!(stats.full);
        assert_eq!(stats.rows_repainted, 3);

        let stats = engine.render(&mut out, &frame_with("00 01"), Some((3, 1))).unwrap();
        assert!(!stats.full);
        assert_eq!(stats.rows_repainted, 0);

        let stats = engine.render(&mut out, &frame_with("00 FF"), None).unwrap();
        assert_eq!(stats.rows_repainted, 1);

        let m = engine.metrics();
        assert_eq!(m.full_frames, 1);
        assert_eq!(m.partial_frames, 2);
        assert_eq!(m.rows_repainted, 4);
    }

    #[test]
    fn invalidate_forces_full_repaint() {
        let mut engine = RenderEngine::new();
        let mut out = Vec::new();
        engine.render(&mut out, &frame_with("x"), None).unwrap();
        engine.invalidate();
        let stats = engine.render(&mut out, &frame_with("x"), None).unwrap();
        assert!(stats.full);
        assert_eq!(stats.rows_repainted, 3);
    }

    #[test]
    fn styled_runs_are_batched() {
        let mut f = Frame::new(8, 1);
        f.put_str(0, 0, "ab", CellFlags::empty());
        f.put_str(2, 0, "cd", CellFlags::REVERSE);
        f.put_str(4, 0, "ef", CellFlags::empty());
        let mut w = Writer::new();
        emit_row(&mut w, &f, 0);
        let prints: Vec<_> = w
            .commands()
            .iter()
            .filter_map(|c| match c {
                crate::writer::Command::Print(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(prints, vec!["ab", "cd", "ef"]);
    }
}
