//! Clipboard payloads.

use core_model::HexView;
use core_source::SourceError;
use std::fmt::Write;

/// `DE AD BE EF`: uppercase pairs separated by single spaces.
pub fn format_hex_pairs(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{b:02X}");
    }
    out
}

/// `0x`-prefixed uppercase hex, accepted back by the goto prompt.
pub fn format_offset(offset: u64) -> String {
    format!("0x{offset:X}")
}

/// Number of whole hex pairs that fit in `chars` characters of
/// `format_hex_pairs` output (`3n - 1` characters for `n` bytes).
pub fn hex_pairs_capacity(chars: usize) -> u64 {
    (chars.saturating_add(1) / 3) as u64
}

/// Clipboard text for a selection, possibly cut short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCopy {
    pub text: String,
    /// Bytes present in `text`.
    pub copied: u64,
    /// Bytes in the selection.
    pub selected: u64,
}

impl SelectionCopy {
    pub fn is_truncated(&self) -> bool {
        self.copied < self.selected
    }
}

/// Leading `max_bytes` of the selection as hex pairs; `None` when nothing
/// is selected.
pub fn copy_selection_text(
    view: &HexView,
    max_bytes: u64,
) -> Result<Option<SelectionCopy>, SourceError> {
    let selected = view.selection().len();
    Ok(view.read_selected_bytes(max_bytes)?.map(|bytes| SelectionCopy {
        text: format_hex_pairs(&bytes),
        copied: bytes.len() as u64,
        selected,
    }))
}

pub fn copy_offset_text(view: &HexView) -> String {
    format_offset(view.cursor().position)
}
