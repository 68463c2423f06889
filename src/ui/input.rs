/// Input state tracker.
///
/// Drains every pending terminal event once per frame without blocking and
/// turns it into browser-style key names: printable keys become the
/// character itself ("a", "A", " "), everything else a longer name
/// ("Enter", "ArrowLeft", "Ctrl+a"). Only single-character names ever reach
/// the typing buffer, so the naming alone keeps non-text keys out of it.
///
/// Release events are ignored; Press and Repeat both count as a keystroke.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(String),
    /// The terminal changed size; the renderer re-reads it this frame.
    Resize,
    /// Esc or Ctrl+C.
    Quit,
}

pub struct InputState {
    /// Events collected during the most recent `drain_events`.
    pub events: Vec<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { events: Vec::with_capacity(8) }
    }

    /// Drain all pending terminal events.
    /// Call this once per frame, before the simulation tick.
    pub fn drain_events(&mut self) {
        self.events.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if let Some(ev) = translate_key(&key) {
                        self.events.push(ev);
                    }
                }
                Ok(Event::Resize(_, _)) => self.events.push(InputEvent::Resize),
                Ok(_) => {}
                Err(e) => {
                    log::debug!("event read failed: {e}");
                    break;
                }
            }
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.events.contains(&InputEvent::Quit)
    }

    pub fn resized(&self) -> bool {
        self.events.contains(&InputEvent::Resize)
    }

    /// Key names drained this frame, in arrival order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|e| match e {
            InputEvent::Key(k) => Some(k.as_str()),
            _ => None,
        })
    }
}

pub fn translate_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let name = match key.code {
        KeyCode::Esc => return Some(InputEvent::Quit),
        KeyCode::Char(c) if ctrl && c.eq_ignore_ascii_case(&'c') => return Some(InputEvent::Quit),
        KeyCode::Char(c) if ctrl => format!("Ctrl+{c}"),
        KeyCode::Char(c) if alt => format!("Alt+{c}"),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::BackTab => "Shift+Tab".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Insert => "Insert".into(),
        KeyCode::Left => "ArrowLeft".into(),
        KeyCode::Right => "ArrowRight".into(),
        KeyCode::Up => "ArrowUp".into(),
        KeyCode::Down => "ArrowDown".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        _ => "Unidentified".into(),
    };
    Some(InputEvent::Key(name))
}
