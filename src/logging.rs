/// Logging setup.
///
/// The terminal is in raw mode on the alternate screen while the game runs,
/// so log lines go to a file instead of stderr. Level comes from `RUST_LOG`
/// (default `info`).

use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Start logging to `path` (appending). If the file can't be opened the
/// game runs without a log.
pub fn init(path: &Path) {
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: could not open log file {}: {e}", path.display());
            return;
        }
    };

    let result = Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
    if let Err(e) = result {
        eprintln!("Warning: logger already initialised: {e}");
    }
}
