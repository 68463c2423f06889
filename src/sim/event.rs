/// Events emitted during a simulation step or a keystroke.
/// The presentation layer consumes these for sound and logging.

use crate::domain::alien::AlienId;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Spawned { id: AlienId, code: String },
    Matched { id: AlienId, code: String },
    /// One per alien that reached the bottom, even within a single tick.
    Missed { id: AlienId, code: String },
}
