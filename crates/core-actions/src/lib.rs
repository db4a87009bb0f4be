//! Actions produced from input and their application to a `HexView`.
//!
//! Layers:
//! * `key_translator` turns normalized terminal events into `Action`s.
//! * `dispatcher::handle` applies a `ViewEvent` to one view and reports what
//!   changed through `ViewUpdate`.
//! * `goto` validates user supplied offsets; `export` formats copy payloads.
//!
//! `Command`s and prompt edits act on application state (tabs, clipboard,
//! the goto prompt) and are executed by the binary, not here.

use core_model::{CellMetrics, NavKey};

pub mod dispatcher;
pub mod export;
pub mod goto;
pub mod key_translator;

pub use dispatcher::{ViewUpdate, handle};
pub use export::{
    SelectionCopy, copy_offset_text, copy_selection_text, format_hex_pairs, format_offset,
    hex_pairs_capacity,
};
pub use goto::{InvalidOffsetError, validate_offset};
pub use key_translator::{translate_key, translate_mouse};

/// Input directed at the active view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    KeyMove { key: NavKey, extend: bool },
    /// Pointer press; `extend` when Shift is held.
    PointerDown { x: i32, y: i32, extend: bool },
    /// Pointer motion with the primary button held; always extends.
    PointerDrag { x: i32, y: i32 },
    GotoRequest { text: String },
    ScrollBy(i64),
    Resize { visible_rows: u64 },
    Layout(CellMetrics),
}

/// Application level commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Copy the selected bytes as hex pairs.
    Copy,
    /// Copy the cursor offset.
    CopyOffset,
    OpenGoto,
    CloseView,
    /// Focus the view at this 0-based index.
    FocusView(usize),
    Quit,
}

/// Editing of the inline goto prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEdit {
    Char(char),
    Backspace,
    Submit,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    View(ViewEvent),
    Command(Command),
    Prompt(PromptEdit),
}
