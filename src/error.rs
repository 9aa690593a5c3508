//! Error types for levelswap.

use std::path::PathBuf;

/// Result type alias for levelswap setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;

/// Errors that can occur while wiring up the logging subsystem.
///
/// These surface only from [`crate::setup::initialize`] and sink
/// construction. Once the watcher is running, every failure is contained
/// within its poll iteration and reported through the log stream instead
/// of being returned.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The configuration file could not be read for the initial level.
    ///
    /// This is the one fatal configuration problem: no usable threshold has
    /// ever been established, so the host should abort rather than run with
    /// an undefined level.
    #[error("Cannot read configuration file {path} at startup: {source}")]
    InitialConfigUnreadable {
        /// Path of the configuration file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The requested rotation hour is outside 0..=23.
    #[error("Rotation hour {0} is out of range (expected 0-23)")]
    RotationHourOutOfRange(u8),

    /// The log file could not be opened for appending.
    #[error("Failed to open log file {path}: {source}")]
    LogFileOpen {
        /// Path of the log file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
