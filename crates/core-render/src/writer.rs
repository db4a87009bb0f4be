//! Terminal writer: batches primitive terminal operations and flushes once.
//!
//! Invariants:
//! * Commands preserve ordering; nothing is written before `flush_to`.
//! * All positions are absolute with a (0,0) origin; callers ensure bounds.
//! * Styling is reset at the start of every styled run, so runs never
//!   inherit attributes from earlier output.

use crate::CellFlags;
use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    ClearLine,
    Style(CellFlags),
    Print(String),
    HideCursor,
    ShowCursor,
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }
    pub fn clear_line(&mut self) {
        self.cmds.push(Command::ClearLine);
    }
    pub fn style(&mut self, flags: CellFlags) {
        self.cmds.push(Command::Style(flags));
    }
    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }
    pub fn hide_cursor(&mut self) {
        self.cmds.push(Command::HideCursor);
    }
    pub fn show_cursor(&mut self) {
        self.cmds.push(Command::ShowCursor);
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    /// Number of `Print` commands queued.
    pub fn print_count(&self) -> usize {
        self.cmds
            .iter()
            .filter(|c| matches!(c, Command::Print(_)))
            .count()
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                // caller moves to column 0 of the row first
                Command::ClearLine => queue!(out, Clear(ClearType::CurrentLine))?,
                Command::Style(flags) => {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                    if flags.contains(CellFlags::REVERSE) {
                        queue!(out, SetAttribute(Attribute::Reverse))?;
                    }
                    if flags.contains(CellFlags::UNDERLINE) {
                        queue!(out, SetAttribute(Attribute::Underlined))?;
                    }
                }
                Command::Print(s) => queue!(out, Print(s))?,
                Command::HideCursor => queue!(out, Hide)?,
                Command::ShowCursor => queue!(out, Show)?,
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prints_are_dropped() {
        let mut w = Writer::new();
        w.print("");
        w.print("ab");
        assert_eq!(w.print_count(), 1);
    }

    #[test]
    fn flush_emits_in_order() {
        let mut w = Writer::new();
        w.move_to(0, 2);
        w.style(CellFlags::REVERSE);
        w.print("DE");
        let mut out = Vec::new();
        w.flush_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        // CSI row;col H is 1-based
        let pos = text.find("\x1b[3;1H").unwrap();
        let reverse = text.find("\x1b[7m").unwrap();
        let payload = text.find("DE").unwrap();
        assert!(pos < reverse && reverse < payload);
    }
}
