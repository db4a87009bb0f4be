use core_config::Effective;
use core_events::{
    InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use core_source::ByteSource;
use core_terminal::osc52_sequence;
use hexnav::{App, AppOutcome};
use std::io::Write;
use std::time::{Duration, Instant};

fn app_with(files: &[(&str, usize)]) -> App {
    let mut app = App::new(Effective::default(), 80, 24);
    for (name, size) in files {
        let data: Vec<u8> = (0..*size).map(|i| (i % 256) as u8).collect();
        app.open_source(ByteSource::from_bytes(*name, data)).unwrap();
    }
    app
}

fn key(app: &mut App, code: KeyCode, mods: KeyModifiers) -> AppOutcome {
    app.handle_input(&InputEvent::Key(KeyEvent::new(code, mods)), Instant::now())
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        key(app, KeyCode::Char(c), KeyModifiers::empty());
    }
}

fn cursor(app: &App) -> u64 {
    app.views().active().unwrap().cursor().position
}

#[test]
fn goto_prompt_accepts_and_rejects() {
    let mut app = app_with(&[("a.bin", 64)]);
    key(&mut app, KeyCode::Char('g'), KeyModifiers::CTRL);
    assert_eq!(app.prompt(), Some(""));

    type_text(&mut app, "0x1F");
    key(&mut app, KeyCode::Enter, KeyModifiers::empty());
    assert_eq!(app.prompt(), None);
    assert_eq!(cursor(&app), 31);

    key(&mut app, KeyCode::Char('g'), KeyModifiers::CTRL);
    type_text(&mut app, "64");
    key(&mut app, KeyCode::Enter, KeyModifiers::empty());
    // rejected: prompt stays open with its text and the error message
    assert_eq!(app.prompt(), Some("64"));
    assert!(app.message().unwrap().starts_with("Invalid offset!"));
    assert_eq!(cursor(&app), 31);

    key(&mut app, KeyCode::Backspace, KeyModifiers::empty());
    key(&mut app, KeyCode::Backspace, KeyModifiers::empty());
    type_text(&mut app, "010");
    key(&mut app, KeyCode::Enter, KeyModifiers::empty());
    assert_eq!(app.prompt(), None);
    assert_eq!(app.message(), None);
    assert_eq!(cursor(&app), 8);
}

#[test]
fn escape_cancels_prompt_without_moving() {
    let mut app = app_with(&[("a.bin", 64)]);
    key(&mut app, KeyCode::Char('g'), KeyModifiers::CTRL);
    type_text(&mut app, "12");
    // arrows are swallowed while the prompt is open
    key(&mut app, KeyCode::Right, KeyModifiers::empty());
    key(&mut app, KeyCode::Esc, KeyModifiers::empty());
    assert_eq!(app.prompt(), None);
    assert_eq!(cursor(&app), 0);
}

#[test]
fn copy_selection_and_offset() {
    let mut app = app_with(&[("a.bin", 64)]);
    let out = key(&mut app, KeyCode::Char('c'), KeyModifiers::CTRL);
    assert_eq!(out.clipboard, None);
    assert_eq!(app.message(), Some("Nothing selected"));

    key(&mut app, KeyCode::Right, KeyModifiers::SHIFT);
    key(&mut app, KeyCode::Right, KeyModifiers::SHIFT);
    key(&mut app, KeyCode::Right, KeyModifiers::SHIFT);
    let out = key(&mut app, KeyCode::Char('c'), KeyModifiers::CTRL);
    assert_eq!(out.clipboard.as_deref(), Some("00 01 02"));
    assert_eq!(app.message(), Some("Copied 3 bytes"));

    let out = key(&mut app, KeyCode::Char('c'), KeyModifiers::ALT);
    assert_eq!(out.clipboard.as_deref(), Some("0x3"));
}

#[test]
fn large_selection_copy_is_capped_on_whole_pairs() {
    let mut app = app_with(&[("big.bin", 64 * 1024)]);
    for _ in 0..300 {
        key(&mut app, KeyCode::PageDown, KeyModifiers::SHIFT);
    }
    assert_eq!(app.views().active().unwrap().selection().len(), 65536);

    let out = key(&mut app, KeyCode::Char('c'), KeyModifiers::CTRL);
    let text = out.clipboard.unwrap();
    assert_eq!(app.message(), Some("Copied 34133 of 65536 bytes"));
    assert_eq!(text.len(), 34133 * 3 - 1);
    assert!(text.starts_with("00 01 02"));
    // byte 34132 is the last one copied
    assert!(text.ends_with(" 53 54"));

    let (_, truncated) = osc52_sequence(&text);
    assert!(!truncated);
}

#[test]
fn tabs_focus_and_close() {
    let mut app = app_with(&[("a.bin", 64), ("b.bin", 32)]);
    assert_eq!(app.views().active_index(), 1);

    let out = key(&mut app, KeyCode::Char('1'), KeyModifiers::ALT);
    assert!(out.full);
    assert_eq!(app.views().active().unwrap().name(), "a.bin");
    // focusing a missing tab is a no-op
    assert!(!key(&mut app, KeyCode::Char('9'), KeyModifiers::ALT).redraw);

    let out = key(&mut app, KeyCode::Char('w'), KeyModifiers::CTRL);
    assert!(!out.quit);
    assert_eq!(app.views().active().unwrap().name(), "b.bin");
    let out = key(&mut app, KeyCode::Char('w'), KeyModifiers::CTRL);
    assert!(out.quit);
}

#[test]
fn views_keep_independent_cursors() {
    let mut app = app_with(&[("a.bin", 64), ("b.bin", 64)]);
    key(&mut app, KeyCode::End, KeyModifiers::empty());
    assert_eq!(cursor(&app), 16);
    key(&mut app, KeyCode::Char('1'), KeyModifiers::ALT);
    assert_eq!(cursor(&app), 0);
}

#[test]
fn status_message_expires_on_tick() {
    let mut app = app_with(&[("a.bin", 64)]);
    let start = Instant::now();
    key(&mut app, KeyCode::Char('c'), KeyModifiers::ALT);
    assert!(app.message().is_some());
    assert!(!app.tick(start + Duration::from_millis(10)).redraw);
    assert!(app.tick(start + Duration::from_secs(10)).redraw);
    assert_eq!(app.message(), None);
}

#[test]
fn wheel_scrolls_and_prompt_blocks_mouse() {
    let mut app = app_with(&[("big.bin", 4096)]);
    let wheel = InputEvent::Mouse(MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 20,
        row: 5,
        mods: KeyModifiers::empty(),
    });
    assert!(app.handle_input(&wheel, Instant::now()).redraw);
    assert_eq!(app.views().active().unwrap().scroll_row(), 3);
    assert_eq!(cursor(&app), 0);

    key(&mut app, KeyCode::Char('g'), KeyModifiers::CTRL);
    let click = InputEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 13,
        row: 1,
        mods: KeyModifiers::empty(),
    });
    assert_eq!(app.handle_input(&click, Instant::now()), AppOutcome::default());
    assert_eq!(cursor(&app), 0);
}

#[test]
fn click_places_cursor_on_scrolled_row() {
    let mut app = app_with(&[("big.bin", 4096)]);
    let wheel = InputEvent::Mouse(MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 0,
        row: 0,
        mods: KeyModifiers::empty(),
    });
    app.handle_input(&wheel, Instant::now());
    // screen row 1 is grid row 0, column 13 is the second cell's glyph
    let click = InputEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 13,
        row: 1,
        mods: KeyModifiers::empty(),
    });
    app.handle_input(&click, Instant::now());
    assert_eq!(cursor(&app), 3 * 16 + 1);
}

#[test]
fn resize_updates_grid_rows_and_frame() {
    let mut app = app_with(&[("a.bin", 4096)]);
    let out = app.handle_input(&InputEvent::Resize(100, 10), Instant::now());
    assert!(out.full);
    assert_eq!(app.views().active().unwrap().visible_row_count(), 8);

    let composed = app.compose().unwrap();
    assert_eq!((composed.frame.width, composed.frame.height), (100, 10));
    assert!(composed.frame.row_text(9).starts_with("a.bin  0x00000000 (0) / 4096"));
    assert!(composed.frame.row_text(8).starts_with("00000070"));
}

#[test]
fn open_path_reports_missing_file() {
    let mut app = App::new(Effective::default(), 80, 24);
    let err = app
        .open_path(std::path::Path::new("/nonexistent/hexnav-test.bin"))
        .unwrap_err();
    assert!(!err.to_string().is_empty());
    assert!(app.views().is_empty());

    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(b"hexnav").unwrap();
    tmp.flush().unwrap();
    app.open_path(tmp.path()).unwrap();
    assert_eq!(app.views().active().unwrap().size(), 6);
}
