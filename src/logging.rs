use crate::error::{Error, Result};
use tracing::Level;

/// Maps `-v` occurrences to a level: none shows warnings, then info, debug, trace.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Log to stderr so stdout stays clean for transcripts and JSON.
pub fn init(verbosity: u8) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level_for(verbosity))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::custom(format!("Setting default subscriber failed: {e}")))
}
