use core_model::scroll::effective_row;
use core_model::{
    CellMetrics, GridConfig, GridLayoutEngine, HexView, MAX_TOTAL_ROWS, NavKey, ViewError, ViewId,
};
use core_source::ByteSource;
use core_state::{DeflectHint, Deflection};
use proptest::prelude::*;
use std::io::{self, Read, Seek, SeekFrom};
use std::sync::Arc;

fn view(size: usize, visible_rows: u64) -> HexView {
    let data = (0..size).map(|i| (i % 256) as u8).collect();
    let src = Arc::new(ByteSource::from_bytes("prop", data));
    HexView::open(ViewId(0), src, GridConfig::default(), visible_rows).unwrap()
}

fn assert_cursor_on_screen(v: &HexView) {
    let c = v.cursor();
    let row = effective_row(c.position, c.deflection, 16);
    let first = v.scroll_row();
    let h = v.visible_row_count().max(1);
    assert!(
        row >= first && row < first + h,
        "row {row} outside [{first}, {})",
        first + h
    );
}

#[derive(Debug, Clone)]
enum Op {
    Key(NavKey, bool),
    Goto(u64),
    Wheel(i64),
}

fn nav_key() -> impl Strategy<Value = NavKey> {
    prop_oneof![
        Just(NavKey::Left),
        Just(NavKey::Right),
        Just(NavKey::Up),
        Just(NavKey::Down),
        Just(NavKey::PageUp),
        Just(NavKey::PageDown),
        Just(NavKey::Home),
        Just(NavKey::End),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (nav_key(), any::<bool>()).prop_map(|(k, e)| Op::Key(k, e)),
        1 => (0u64..5000).prop_map(Op::Goto),
        1 => (-50i64..50).prop_map(Op::Wheel),
    ]
}

proptest! {
    #[test]
    fn in_range_move_lands_exactly(size in 1usize..4096, frac in 0.0f64..=1.0) {
        let mut v = view(size, 8);
        let k = ((size as f64) * frac) as u64;
        v.move_to(k, DeflectHint::None, false);
        prop_assert_eq!(v.cursor().position, k);
        prop_assert!(!v.selection().is_valid());
    }

    #[test]
    fn past_end_clamps_to_size(size in 0usize..4096, extra in 1u64..1_000_000) {
        let mut v = view(size, 8);
        v.move_to(size as u64 + extra, DeflectHint::None, false);
        prop_assert_eq!(v.cursor().position, size as u64);
        prop_assert_eq!(v.cursor().deflection, Deflection::ToPrevious);
    }

    #[test]
    fn vertical_round_trip_preserves_deflection(
        row in 1u64..20,
        col in 0u64..16,
        eol in any::<bool>(),
        k in 1usize..20,
    ) {
        let mut v = view(16 * 64 + 5, 10);
        // Deflected carets only exist on row boundaries (reached via End or
        // a click past the last column).
        let start = row * 16 + col;
        let hint = if col == 0 && eol { DeflectHint::ToPrevious } else { DeflectHint::None };
        v.move_to(start, hint, false);
        let before = v.cursor();
        for _ in 0..k {
            v.apply_key(NavKey::Down, false);
        }
        for _ in 0..k {
            v.apply_key(NavKey::Up, false);
        }
        prop_assert_eq!(v.cursor(), before);
    }

    #[test]
    fn cursor_stays_on_screen(
        size in 0usize..5000,
        visible in 0u64..30,
        ops in prop::collection::vec(op(), 1..60),
    ) {
        let mut v = view(size, visible);
        for op in ops {
            match op {
                Op::Key(key, extend) => {
                    // Blocked keys (Left at 0) leave a wheel-scrolled view alone.
                    if let Some((target, hint)) = v.nav_target(key) {
                        v.move_to(target, hint, extend);
                        assert_cursor_on_screen(&v);
                    }
                }
                Op::Goto(offset) => {
                    v.move_to(offset, DeflectHint::None, false);
                    assert_cursor_on_screen(&v);
                }
                Op::Wheel(rows) => {
                    v.scroll_by(rows);
                }
            }
            let max = v.scroller().total_rows().max(1) - 1;
            prop_assert!(v.scroll_row() <= max);
            prop_assert!(v.cursor().position <= size as u64);
        }
    }

    #[test]
    fn pointer_round_trips_cell_centres(
        scroll in 0u64..50,
        row in 0usize..10,
        col in 0u32..16,
    ) {
        let mut v = view(16 * 200, 10);
        v.scroll_by(scroll as i64);
        let geo = v.set_layout(&CellMetrics {
            origin_x: 0,
            origin_y: 1,
            offset_width: 8,
            glyph_width: 2,
            line_height: 1,
            gap: 1,
            big_gap: 2,
        });
        let (x, y) = v.layout().cell_rect(&geo, row, col).center();
        let scroll_row = v.scroll_row();
        v.pointer(x, y, false);
        prop_assert_eq!(
            v.cursor().position,
            (scroll_row + row as u64) * 16 + u64::from(col)
        );
        prop_assert_eq!(v.cursor().deflection, Deflection::None);
    }
}

#[test]
fn mapper_round_trip_at_row_two_col_five() {
    let eng = GridLayoutEngine::new(GridConfig::default());
    let mut v = view(16 * 100, 10);
    v.scroll_by(4);
    let geo = v.set_layout(&CellMetrics {
        origin_x: 3,
        origin_y: 2,
        offset_width: 80,
        glyph_width: 14,
        line_height: 18,
        gap: 6,
        big_gap: 12,
    });
    let (x, y) = eng.cell_rect(&geo, 2, 5).center();
    v.pointer(x, y, false);
    assert_eq!(v.cursor().position, 4 * 16 + 2 * 16 + 5);
    assert_eq!(v.cursor().deflection, Deflection::None);
}

/// Reports a huge size without backing storage.
struct Sparse(u64, u64);

impl Read for Sparse {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        buf.fill(0);
        Ok(buf.len())
    }
}

impl Seek for Sparse {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.1 = match pos {
            SeekFrom::Start(p) => p,
            SeekFrom::End(d) => self.0.saturating_add_signed(d),
            SeekFrom::Current(d) => self.1.saturating_add_signed(d),
        };
        Ok(self.1)
    }
}

#[test]
fn oversized_file_is_rejected_before_view_exists() {
    let size = (MAX_TOTAL_ROWS + 1) * 16;
    let src = Arc::new(ByteSource::from_reader("huge", Sparse(size, 0)).unwrap());
    match HexView::open(ViewId(0), src, GridConfig::default(), 10) {
        Err(ViewError::FileTooLarge { rows, max }) => {
            assert_eq!(rows, MAX_TOTAL_ROWS + 1);
            assert_eq!(max, MAX_TOTAL_ROWS);
        }
        other => panic!("expected FileTooLarge, got {other:?}"),
    }
}

#[test]
fn largest_accepted_file_navigates_to_end() {
    let size = MAX_TOTAL_ROWS * 16;
    let src = Arc::new(ByteSource::from_reader("big", Sparse(size, 0)).unwrap());
    let mut v = HexView::open(ViewId(0), src, GridConfig::default(), 10).unwrap();
    v.move_to(u64::MAX, DeflectHint::None, false);
    assert_eq!(v.cursor().position, size);
    assert_eq!(v.scroll_row(), MAX_TOTAL_ROWS - 1);
    let rows = v.visible_rows().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].bytes.len(), 16);
}
