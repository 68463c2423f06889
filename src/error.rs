/// Fatal errors. Anything not listed here is a normal state transition.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Raw mode / alternate screen could not be set up. The loop never starts.
    #[error("terminal init failed: {0}")]
    TerminalInit(#[source] io::Error),

    /// The terminal reported no drawable area.
    #[error("no drawable surface ({cols}x{rows} terminal)")]
    SurfaceUnavailable { cols: u16, rows: u16 },

    #[error("terminal I/O: {0}")]
    Io(#[from] io::Error),
}
