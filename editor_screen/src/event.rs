//! Terminal event translation and the input pump

use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use editor_core::Key;

/// Bound on buffered input events; a stalled consumer backpressures the
/// pump instead of growing a queue
pub const EVENT_QUEUE_DEPTH: usize = 64;

/// Input event delivered to the session loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    Key(Key),
    /// New terminal size in cells
    Resize(usize, usize),
}

/// Translate a terminal key event, dropping releases, repeats, and
/// modified chords the editor has no binding for
pub fn translate_key(event: KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    match event.code {
        KeyCode::Char(ch) => {
            if event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                None
            } else {
                Some(Key::Char(ch))
            }
        }
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

/// Translate any terminal event into a session event, if it maps to one
pub fn translate_event(event: Event) -> Option<ScreenEvent> {
    match event {
        Event::Key(key) => translate_key(key).map(ScreenEvent::Key),
        Event::Resize(width, height) => {
            Some(ScreenEvent::Resize(width as usize, height as usize))
        }
        _ => None,
    }
}

/// Start the single producer thread reading terminal events
///
/// The pump exits when the terminal event stream fails or the receiver
/// is dropped.
pub fn spawn_event_pump() -> (Receiver<ScreenEvent>, JoinHandle<()>) {
    let (tx, rx) = sync_channel(EVENT_QUEUE_DEPTH);
    let handle = thread::spawn(move || pump_events(tx));
    (rx, handle)
}

fn pump_events(tx: SyncSender<ScreenEvent>) {
    loop {
        let event = match event::read() {
            Ok(event) => event,
            Err(_) => return,
        };
        if let Some(translated) = translate_event(event) {
            if tx.send(translated).is_err() {
                return;
            }
        }
    }
}
