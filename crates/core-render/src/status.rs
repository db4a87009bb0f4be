//! Status line composition.
//!
//! Two stages: `compose_status` produces ordered `StatusSegment`s and
//! `format_status` renders them. Formats:
//!
//! * browsing: `<name>  0x0000001F (31) / 64  sel 4  | <message>`
//! * goto prompt: `Goto offset: <text>  | <message>`
//!
//! The selection segment is omitted when nothing is selected and the
//! message segment when no message is pending.

use std::fmt::Write as _;

pub struct StatusContext<'a> {
    pub file_name: &'a str,
    pub offset: u64,
    pub size: u64,
    pub selection_len: u64,
    /// Text typed into the goto prompt, `Some` while the prompt is open.
    pub prompt: Option<&'a str>,
    pub message: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    FileName(&'a str),
    Offset { offset: u64, size: u64 },
    Selection(u64),
    Prompt(&'a str),
    Message(&'a str),
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let mut out = Vec::with_capacity(4);
    if let Some(text) = ctx.prompt {
        out.push(StatusSegment::Prompt(text));
    } else {
        out.push(StatusSegment::FileName(ctx.file_name));
        out.push(StatusSegment::Offset {
            offset: ctx.offset,
            size: ctx.size,
        });
        if ctx.selection_len > 0 {
            out.push(StatusSegment::Selection(ctx.selection_len));
        }
    }
    if let Some(msg) = ctx.message {
        out.push(StatusSegment::Message(msg));
    }
    out
}

pub fn format_status(segments: &[StatusSegment<'_>]) -> String {
    let mut s = String::with_capacity(64);
    for seg in segments {
        match seg {
            StatusSegment::FileName(name) => s.push_str(name),
            StatusSegment::Offset { offset, size } => {
                let _ = write!(s, "  0x{offset:08X} ({offset}) / {size}");
            }
            StatusSegment::Selection(len) => {
                let _ = write!(s, "  sel {len}");
            }
            StatusSegment::Prompt(text) => {
                let _ = write!(s, "Goto offset: {text}");
            }
            StatusSegment::Message(msg) => {
                let _ = write!(s, "  | {msg}");
            }
        }
    }
    s
}

pub fn build_status(ctx: &StatusContext<'_>) -> String {
    format_status(&compose_status(ctx))
}

/// Screen column of the prompt's text cursor (after the typed text).
pub fn prompt_cursor_column(text: &str) -> usize {
    "Goto offset: ".len() + text.chars().count()
}
