//! Terminal input to `Action` translation.
//!
//! Stateless: the only context is whether the goto prompt currently owns the
//! keyboard. Bindings:
//!
//! * arrows, Home/End, PageUp/PageDown move; Shift extends the selection
//! * Ctrl+G goto, Ctrl+C copy selection, Alt+C copy cursor offset
//! * Ctrl+W close view, Alt+1..9 focus view, Ctrl+Q quit
//! * left press/drag places the cursor, wheel scrolls

use crate::{Action, Command, PromptEdit, ViewEvent};
use core_events::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use core_model::NavKey;

pub fn translate_key(key: &KeyEvent, prompt_active: bool) -> Option<Action> {
    tracing::trace!(target: "actions.translate", prompt_active, key = ?key.code, mods = ?key.mods, "translate_key");
    if prompt_active {
        return prompt_key(key);
    }
    let ctrl = key.mods.contains(KeyModifiers::CTRL);
    let alt = key.mods.contains(KeyModifiers::ALT);
    let extend = key.mods.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'g' => Some(Action::Command(Command::OpenGoto)),
            'c' => Some(Action::Command(Command::Copy)),
            'w' => Some(Action::Command(Command::CloseView)),
            'q' => Some(Action::Command(Command::Quit)),
            _ => None,
        },
        KeyCode::Char(c) if alt => match c {
            '1'..='9' => Some(Action::Command(Command::FocusView(
                (c as u8 - b'1') as usize,
            ))),
            'c' | 'C' => Some(Action::Command(Command::CopyOffset)),
            _ => None,
        },
        code => nav_key(code).map(|key| Action::View(ViewEvent::KeyMove { key, extend })),
    }
}

fn nav_key(code: KeyCode) -> Option<NavKey> {
    Some(match code {
        KeyCode::Left => NavKey::Left,
        KeyCode::Right => NavKey::Right,
        KeyCode::Up => NavKey::Up,
        KeyCode::Down => NavKey::Down,
        KeyCode::PageUp => NavKey::PageUp,
        KeyCode::PageDown => NavKey::PageDown,
        KeyCode::Home => NavKey::Home,
        KeyCode::End => NavKey::End,
        _ => return None,
    })
}

fn prompt_key(key: &KeyEvent) -> Option<Action> {
    let edit = match key.code {
        KeyCode::Enter => PromptEdit::Submit,
        KeyCode::Esc => PromptEdit::Cancel,
        KeyCode::Backspace => PromptEdit::Backspace,
        KeyCode::Char(c) if !key.mods.contains(KeyModifiers::CTRL) && !c.is_control() => {
            PromptEdit::Char(c)
        }
        _ => return None,
    };
    Some(Action::Prompt(edit))
}

/// Mouse reports are in terminal cells, the same unit the terminal renderer
/// lays the grid out in.
pub fn translate_mouse(ev: &MouseEvent, wheel_rows: u16) -> Option<Action> {
    let x = i32::from(ev.column);
    let y = i32::from(ev.row);
    let view = match ev.kind {
        MouseEventKind::Down(MouseButton::Left) => ViewEvent::PointerDown {
            x,
            y,
            extend: ev.mods.contains(KeyModifiers::SHIFT),
        },
        MouseEventKind::Drag(MouseButton::Left) => ViewEvent::PointerDrag { x, y },
        MouseEventKind::ScrollUp => ViewEvent::ScrollBy(-i64::from(wheel_rows)),
        MouseEventKind::ScrollDown => ViewEvent::ScrollBy(i64::from(wheel_rows)),
        _ => return None,
    };
    Some(Action::View(view))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent { code, mods }
    }

    fn mouse(kind: MouseEventKind, mods: KeyModifiers) -> MouseEvent {
        MouseEvent {
            kind,
            column: 12,
            row: 3,
            mods,
        }
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(
            translate_key(&key(KeyCode::End, KeyModifiers::empty()), false),
            Some(Action::View(ViewEvent::KeyMove {
                key: NavKey::End,
                extend: false
            }))
        );
        assert_eq!(
            translate_key(&key(KeyCode::Down, KeyModifiers::SHIFT), false),
            Some(Action::View(ViewEvent::KeyMove {
                key: NavKey::Down,
                extend: true
            }))
        );
    }

    #[test]
    fn command_chords() {
        let ctrl = KeyModifiers::CTRL;
        let alt = KeyModifiers::ALT;
        assert_eq!(
            translate_key(&key(KeyCode::Char('g'), ctrl), false),
            Some(Action::Command(Command::OpenGoto))
        );
        assert_eq!(
            translate_key(&key(KeyCode::Char('W'), ctrl), false),
            Some(Action::Command(Command::CloseView))
        );
        assert_eq!(
            translate_key(&key(KeyCode::Char('3'), alt), false),
            Some(Action::Command(Command::FocusView(2)))
        );
        assert_eq!(
            translate_key(&key(KeyCode::Char('c'), alt), false),
            Some(Action::Command(Command::CopyOffset))
        );
        assert_eq!(translate_key(&key(KeyCode::Char('0'), alt), false), None);
        assert_eq!(
            translate_key(&key(KeyCode::Char('x'), KeyModifiers::empty()), false),
            None
        );
    }

    #[test]
    fn prompt_owns_keyboard() {
        let none = KeyModifiers::empty();
        assert_eq!(
            translate_key(&key(KeyCode::Char('x'), none), true),
            Some(Action::Prompt(PromptEdit::Char('x')))
        );
        assert_eq!(
            translate_key(&key(KeyCode::Enter, none), true),
            Some(Action::Prompt(PromptEdit::Submit))
        );
        assert_eq!(
            translate_key(&key(KeyCode::Esc, none), true),
            Some(Action::Prompt(PromptEdit::Cancel))
        );
        // navigation is swallowed while typing
        assert_eq!(translate_key(&key(KeyCode::Left, none), true), None);
    }

    #[test]
    fn left_button_only() {
        let none = KeyModifiers::empty();
        assert_eq!(
            translate_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), none), 3),
            Some(Action::View(ViewEvent::PointerDown {
                x: 12,
                y: 3,
                extend: false
            }))
        );
        assert_eq!(
            translate_mouse(
                &mouse(MouseEventKind::Down(MouseButton::Left), KeyModifiers::SHIFT),
                3
            ),
            Some(Action::View(ViewEvent::PointerDown {
                x: 12,
                y: 3,
                extend: true
            }))
        );
        assert_eq!(
            translate_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), none), 3),
            Some(Action::View(ViewEvent::PointerDrag { x: 12, y: 3 }))
        );
        assert_eq!(
            translate_mouse(&mouse(MouseEventKind::Down(MouseButton::Right), none), 3),
            None
        );
        assert_eq!(
            translate_mouse(&mouse(MouseEventKind::Drag(MouseButton::Middle), none), 3),
            None
        );
    }

    #[test]
    fn wheel_scrolls_by_configured_rows() {
        let none = KeyModifiers::empty();
        assert_eq!(
            translate_mouse(&mouse(MouseEventKind::ScrollDown, none), 5),
            Some(Action::View(ViewEvent::ScrollBy(5)))
        );
        assert_eq!(
            translate_mouse(&mouse(MouseEventKind::ScrollUp, none), 5),
            Some(Action::View(ViewEvent::ScrollBy(-5)))
        );
    }
}
