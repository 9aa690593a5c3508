//! Host-facing initialization: wire the logger, sink, and watcher together.

use crate::core::{parse_level_file, ApplyPhase, LoggerHandle};
use crate::error::{Result, SetupError};
use crate::sink::DailyRotatingFileSink;
use crate::watch::{LevelWatcher, WatcherTask};
use std::path::Path;

/// Build a logger with a daily-rotating file sink, establish the initial
/// level from `config_path`, and spawn the background level watcher.
///
/// `rotation_hour` (0–23) is the local-time hour offset past midnight at
/// which the log file rotates. The initial `level=` directive is parsed
/// synchronously before this returns; from then on the watcher picks up
/// edits within one polling quantum.
///
/// Must be called from within a tokio runtime (the watcher is spawned on
/// it).
///
/// # Errors
///
/// The only fatal configuration problem lives here: if `config_path`
/// cannot be read for the initial parse (or its baseline mtime), no usable
/// level has ever been established and the host should abort. An invalid
/// or missing directive is NOT an error — the level falls back to `INFO`
/// with critical diagnostics in the log stream, and startup proceeds.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> levelswap::error::Result<()> {
/// let (logger, _watcher) = levelswap::setup::initialize("log.conf", "app.log", 0)?;
/// logger.info("up and running");
/// # Ok(())
/// # }
/// ```
pub fn initialize(
    config_path: impl AsRef<Path>,
    log_file_path: impl AsRef<Path>,
    rotation_hour: u8,
) -> Result<(LoggerHandle, WatcherTask)> {
    let config_path = config_path.as_ref();

    let logger = LoggerHandle::new();
    logger.attach_sink(DailyRotatingFileSink::new(
        log_file_path.as_ref(),
        rotation_hour,
    )?);

    // The one synchronous parse that may abort startup.
    let directive =
        parse_level_file(config_path).map_err(|source| SetupError::InitialConfigUnreadable {
            path: config_path.to_path_buf(),
            source,
        })?;
    directive.apply_to(&logger, config_path, ApplyPhase::Startup);

    // Captures the baseline mtime of the file we just read.
    let watcher = LevelWatcher::new(config_path, logger.clone()).map_err(|source| {
        SetupError::InitialConfigUnreadable {
            path: config_path.to_path_buf(),
            source,
        }
    })?;

    Ok((logger, watcher.spawn()))
}
