//! End-to-end session tests over the in-memory surface

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::rc::Rc;

use editor_core::{Key, Position};
use editor_screen::{MemorySurface, ScreenEvent};
use editor_session::{EditorIo, IoError, Session, SessionControl};

/// In-memory storage shared with the test through an Rc handle
#[derive(Clone, Default)]
struct FakeIo {
    files: Rc<RefCell<HashMap<String, Vec<String>>>>,
    fail_saves: bool,
}

impl FakeIo {
    fn with_file(path: &str, lines: &[&str]) -> Self {
        let io = Self::default();
        io.files.borrow_mut().insert(
            path.to_string(),
            lines.iter().map(|s| s.to_string()).collect(),
        );
        io
    }

    fn file(&self, path: &str) -> Option<Vec<String>> {
        self.files.borrow().get(path).cloned()
    }
}

impl EditorIo for FakeIo {
    fn load(&mut self, path: &str) -> Result<Vec<String>, IoError> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| IoError::NotFound(path.into()))
    }

    fn save(&mut self, path: &str, lines: &[String]) -> Result<(), IoError> {
        if self.fail_saves {
            return Err(IoError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "read-only storage",
            )));
        }
        self.files.borrow_mut().insert(path.into(), lines.to_vec());
        Ok(())
    }
}

fn session_with(
    lines: &[&str],
    width: usize,
    height: usize,
) -> (Session<MemorySurface, FakeIo>, FakeIo) {
    let io = FakeIo::with_file("test.txt", lines);
    let surface = MemorySurface::new(width, height);
    let session = Session::new(surface, io.clone(), "test.txt".into()).unwrap();
    (session, io)
}

fn press(session: &mut Session<MemorySurface, FakeIo>, key: Key) -> SessionControl {
    session.handle_event(ScreenEvent::Key(key)).unwrap()
}

/// Feed an ASCII byte trace through the session, the way simulated
/// input is injected
fn type_str(session: &mut Session<MemorySurface, FakeIo>, text: &str) -> SessionControl {
    let mut control = SessionControl::Continue;
    for byte in text.bytes() {
        control = press(session, Key::from_ascii(byte).unwrap());
    }
    control
}

#[test]
fn opening_a_file_shows_content_and_banner() {
    let (session, _) = session_with(&["hello", "world"], 30, 5);
    let surface = session.surface();
    assert_eq!(surface.row_text(0), "hello");
    assert_eq!(surface.row_text(1), "world");
    assert_eq!(surface.row_text(4), "\"test.txt\" 2L, 12C");
    assert_eq!(surface.cursor(), (0, 0));
}

#[test]
fn opening_a_missing_file_starts_empty() {
    let surface = MemorySurface::new(30, 5);
    let session = Session::new(surface, FakeIo::default(), "fresh.txt".into()).unwrap();
    assert_eq!(session.core().buffer().line_count(), 1);
    assert_eq!(session.surface().row_text(4), "\"fresh.txt\" [New File]");
}

#[test]
fn rows_past_the_buffer_carry_fill_markers() {
    let (session, _) = session_with(&["only"], 30, 5);
    let surface = session.surface();
    // Frame rows 1..4 are past the one-line buffer; the status row is
    // row 4 and never marked
    assert_ne!(surface.cell(0, 0), '~');
    for row in 1..4 {
        assert_eq!(surface.cell(row, 0), '~', "row {}", row);
    }
    assert_ne!(surface.cell(4, 0), '~');
}

#[test]
fn typed_text_appears_on_the_surface() {
    let (mut session, _) = session_with(&[], 30, 5);
    press(&mut session, Key::Char('i'));
    assert_eq!(session.surface().row_text(4), "-- INSERT --");

    type_str(&mut session, "hi");
    assert_eq!(session.surface().row_text(0), "hi");
    assert_eq!(session.surface().cursor(), (0, 2));

    press(&mut session, Key::Escape);
    assert_eq!(session.core().cursor(), Position::new(0, 1));
    assert_eq!(session.surface().row_text(4), "");
}

#[test]
fn newline_splits_the_visible_line() {
    let (mut session, _) = session_with(&["abc", "de"], 80, 4);
    press(&mut session, Key::Char('i'));
    press(&mut session, Key::Right);
    press(&mut session, Key::Enter);

    assert_eq!(session.core().buffer().as_string(), "a\nbc\nde");
    assert_eq!(session.core().cursor(), Position::new(1, 0));
    let surface = session.surface();
    assert_eq!(surface.row_text(0), "a");
    assert_eq!(surface.row_text(1), "bc");
    assert_eq!(surface.row_text(2), "de");
    assert_eq!(surface.cursor(), (1, 0));
}

#[test]
fn long_lines_wrap_on_narrow_surfaces() {
    let (mut session, _) = session_with(&["hello"], 3, 3);
    let surface = session.surface();
    assert_eq!(surface.row_text(0), "hel");
    assert_eq!(surface.row_text(1), "lo");

    // Walking right lands the cursor on the wrapped row
    for _ in 0..4 {
        press(&mut session, Key::Right);
    }
    assert_eq!(session.core().cursor(), Position::new(0, 4));
    assert_eq!(session.surface().cursor(), (1, 1));
}

#[test]
fn moving_past_the_bottom_scrolls_the_window() {
    let lines: Vec<String> = (0..20).map(|i| format!("l{}", i)).collect();
    let refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
    let (mut session, _) = session_with(&refs, 30, 5);

    for _ in 0..9 {
        press(&mut session, Key::Down);
    }
    let surface = session.surface();
    assert_eq!(surface.row_text(0), "l6");
    assert_eq!(surface.row_text(3), "l9");
    assert_eq!(surface.cursor(), (3, 0));

    // And back up past the top
    for _ in 0..9 {
        press(&mut session, Key::Up);
    }
    assert_eq!(session.surface().row_text(0), "l0");
    assert_eq!(session.surface().cursor(), (0, 0));
}

#[test]
fn resize_rebuilds_the_frame_around_the_cursor() {
    let lines: Vec<String> = (0..20).map(|i| format!("l{}", i)).collect();
    let refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
    let (mut session, _) = session_with(&refs, 30, 10);

    for _ in 0..8 {
        press(&mut session, Key::Down);
    }
    session.surface_mut().resize(30, 4);
    session
        .handle_event(ScreenEvent::Resize(30, 4))
        .unwrap();

    let first = session.core().viewport().first_line();
    let last = session.core().viewport().last_line();
    assert!(first <= 8 && 8 <= last);
    assert!(last - first < 3);
    let (row, _) = session.surface().cursor();
    assert!(row < 3);
}

#[test]
fn command_line_echoes_on_the_status_row() {
    let (mut session, _) = session_with(&["x"], 30, 5);
    press(&mut session, Key::Char(':'));
    assert_eq!(session.surface().row_text(4), ":");
    assert_eq!(session.surface().cursor(), (4, 1));

    press(&mut session, Key::Char('w'));
    assert_eq!(session.surface().row_text(4), ":w");
    assert_eq!(session.surface().cursor(), (4, 2));

    press(&mut session, Key::Escape);
    assert_eq!(session.surface().row_text(4), "");
}

#[test]
fn quit_on_a_clean_buffer_exits() {
    let (mut session, _) = session_with(&["x"], 30, 5);
    press(&mut session, Key::Char(':'));
    press(&mut session, Key::Char('q'));
    assert_eq!(press(&mut session, Key::Enter), SessionControl::Exit);
}

#[test]
fn quit_with_unsaved_changes_is_refused() {
    let (mut session, _) = session_with(&["x"], 60, 5);
    press(&mut session, Key::Char('i'));
    press(&mut session, Key::Char('y'));
    press(&mut session, Key::Escape);

    press(&mut session, Key::Char(':'));
    press(&mut session, Key::Char('q'));
    assert_eq!(press(&mut session, Key::Enter), SessionControl::Continue);
    assert_eq!(
        session.surface().row_text(4),
        "E37: No write since last change (add ! to override)"
    );

    // q! overrides
    press(&mut session, Key::Char(':'));
    type_str(&mut session, "q!");
    assert_eq!(press(&mut session, Key::Enter), SessionControl::Exit);
}

#[test]
fn write_saves_the_buffer() {
    let (mut session, io) = session_with(&["x"], 60, 5);
    press(&mut session, Key::Char('i'));
    press(&mut session, Key::Char('y'));
    press(&mut session, Key::Escape);
    assert!(session.core().is_dirty());

    press(&mut session, Key::Char(':'));
    press(&mut session, Key::Char('w'));
    assert_eq!(press(&mut session, Key::Enter), SessionControl::Continue);

    assert_eq!(io.file("test.txt"), Some(vec!["yx".to_string()]));
    assert!(!session.core().is_dirty());
    assert_eq!(session.surface().row_text(4), "\"test.txt\" 1L, 3C written");
}

#[test]
fn write_to_an_explicit_path() {
    let (mut session, io) = session_with(&["data"], 60, 5);
    press(&mut session, Key::Char(':'));
    type_str(&mut session, "w copy.txt");
    press(&mut session, Key::Enter);
    assert_eq!(io.file("copy.txt"), Some(vec!["data".to_string()]));
}

#[test]
fn write_quit_saves_then_exits() {
    let (mut session, io) = session_with(&["x"], 60, 5);
    press(&mut session, Key::Char('i'));
    press(&mut session, Key::Char('z'));
    press(&mut session, Key::Escape);

    press(&mut session, Key::Char(':'));
    type_str(&mut session, "wq");
    assert_eq!(press(&mut session, Key::Enter), SessionControl::Exit);
    assert_eq!(io.file("test.txt"), Some(vec!["zx".to_string()]));
}

#[test]
fn failed_save_lands_in_the_status_row() {
    let mut io = FakeIo::with_file("test.txt", &["x"]);
    io.fail_saves = true;
    let surface = MemorySurface::new(60, 5);
    let mut session = Session::new(surface, io, "test.txt".into()).unwrap();

    press(&mut session, Key::Char('i'));
    press(&mut session, Key::Char('y'));
    press(&mut session, Key::Escape);
    press(&mut session, Key::Char(':'));
    press(&mut session, Key::Char('w'));
    assert_eq!(press(&mut session, Key::Enter), SessionControl::Continue);
    assert!(session
        .surface()
        .row_text(4)
        .starts_with("E212: Can't open file for writing"));
    assert!(session.core().is_dirty());
}

#[test]
fn unknown_command_reports_and_stays() {
    let (mut session, _) = session_with(&["x"], 60, 5);
    press(&mut session, Key::Char(':'));
    type_str(&mut session, "nope");
    assert_eq!(press(&mut session, Key::Enter), SessionControl::Continue);
    assert_eq!(
        session.surface().row_text(4),
        "E492: Not an editor command: nope"
    );
}

#[test]
fn ascii_trace_drives_a_whole_session() {
    // A raw byte trace, escape and carriage return included, carries a
    // session from insert through save-and-quit
    let (mut session, io) = session_with(&[], 30, 5);
    let control = type_str(&mut session, "iab\x1b:wq\r");
    assert_eq!(control, SessionControl::Exit);
    assert_eq!(io.file("test.txt"), Some(vec!["ab".to_string()]));
}

#[test]
fn backspace_at_buffer_start_changes_nothing() {
    let (mut session, _) = session_with(&["abc"], 30, 5);
    let before = session.core().snapshot();
    press(&mut session, Key::Char('i'));
    press(&mut session, Key::Backspace);
    press(&mut session, Key::Escape);
    let after = session.core().snapshot();
    assert_eq!(before.lines, after.lines);
    assert_eq!(before.cursor, after.cursor);
    assert!(!after.dirty);
}
