/// MatchEngine: turns keystrokes into alien destruction.
///
/// States:
///   Idle:         buffer empty
///   Accumulating: buffer holds characters typed since the last clear
///
/// A single printable character is appended; the buffer is then compared
/// (exact, case-sensitive) against every live alien in spawn order. The
/// first hit is flash-armed, counted, and the buffer goes back to Idle.
/// Named keys ("Enter", "Backspace", ...) and control characters change
/// nothing. There is no rejection of wrong characters: the buffer keeps
/// growing until it matches or a miss clears it.

use crate::config::SessionConfig;
use crate::domain::alien::AlienArena;
use super::event::GameEvent;
use super::session::Score;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MatchState {
    Idle,
    Accumulating,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        InputBuffer { text: String::new() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> MatchState {
        if self.text.is_empty() { MatchState::Idle } else { MatchState::Accumulating }
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Append `key` if it is a single printable character.
    /// Returns whether the buffer changed.
    pub fn push_key(&mut self, key: &str) -> bool {
        match printable_char(key) {
            Some(c) => {
                self.text.push(c);
                true
            }
            None => false,
        }
    }
}

/// The character of a length-1, non-control key name.
fn printable_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() => Some(c),
        _ => None,
    }
}

/// Feed one key event through the state machine.
pub fn on_key(
    key: &str,
    now: f64,
    cfg: &SessionConfig,
    buffer: &mut InputBuffer,
    aliens: &mut AlienArena,
    score: &mut Score,
) -> Option<GameEvent> {
    let before = buffer.state();
    if !buffer.push_key(key) {
        return None;
    }
    if before == MatchState::Idle {
        log::trace!("typing started: {:?}", buffer.as_str());
    }

    let id = aliens.first_live_matching(buffer.as_str())?;
    let alien = aliens.get_mut(id)?;
    alien.flash_until = Some(now + cfg.flash_ms);
    score.matched += 1;
    buffer.clear();

    Some(GameEvent::Matched { id, code: alien.code.clone() })
}
