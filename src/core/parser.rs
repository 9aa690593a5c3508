//! Parsing of the `level=` directive from a plain-text config file.

use crate::core::{LoggerHandle, Severity};
use std::fs;
use std::io;
use std::path::Path;

/// Outcome of parsing a configuration file for a level directive.
///
/// Replaces implicit "looped without finding anything" control flow with
/// an explicit variant consumed by one decision table ([`LevelDirective::apply_to`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelDirective {
    /// A directive was found and its value named a valid severity.
    Recognized(Severity),
    /// A directive was found but its value is not a severity name.
    /// Carries the offending token verbatim for diagnostics.
    InvalidToken(String),
    /// No `level=` directive exists anywhere in the file.
    Missing,
}

/// Whether a directive is being applied at startup or on a reload.
///
/// Only changes the wording of the success message; the fallback policy
/// is identical in both phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyPhase {
    /// The one synchronous parse performed by [`crate::setup::initialize`].
    Startup,
    /// A parse triggered by the watcher observing a modified file.
    Reload,
}

/// Parse `path` for a `level=` directive.
///
/// Comment handling: a line is dropped when, after skipping leading
/// whitespace, it is empty or starts with `#`. Of the remaining lines, the
/// first one containing the substring `level=` is the directive; its value
/// is everything after the first `=`, compared exactly against the five
/// severity names. Later directive lines are ignored regardless of outcome.
///
/// # Errors
///
/// Returns the I/O error unchanged if the file cannot be opened or read.
/// How the caller treats that error depends on the phase: fatal at startup,
/// logged-and-retried from the watcher.
pub fn parse_level_file(path: impl AsRef<Path>) -> io::Result<LevelDirective> {
    let contents = fs::read_to_string(path)?;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !line.contains("level=") {
            continue;
        }
        // First directive line wins. No trimming of the value: a trailing
        // `#comment` makes the token invalid rather than being stripped.
        let candidate = match line.split_once('=') {
            Some((_, value)) => value,
            None => continue,
        };
        return Ok(match candidate.parse::<Severity>() {
            Ok(severity) => LevelDirective::Recognized(severity),
            Err(_) => LevelDirective::InvalidToken(candidate.to_string()),
        });
    }

    Ok(LevelDirective::Missing)
}

impl LevelDirective {
    /// Apply this parse outcome to `logger`, reporting through its own
    /// log stream.
    ///
    /// - `Recognized`: the threshold becomes the named severity and an
    ///   informational record announces it.
    /// - `InvalidToken` / `Missing`: the threshold is forced to `INFO` and
    ///   two critical records identify the cause. The operator clearly tried
    ///   to configure the level, so keeping a stale value would mask the
    ///   mistake; `INFO` is the documented safe default.
    pub fn apply_to(&self, logger: &LoggerHandle, config_path: &Path, phase: ApplyPhase) {
        match self {
            LevelDirective::Recognized(severity) => {
                logger.set_threshold(*severity);
                match phase {
                    ApplyPhase::Startup => {
                        logger.info(format!("Log level started as: {severity}"));
                    }
                    ApplyPhase::Reload => {
                        logger.info(format!("Log level changed to: {severity}"));
                    }
                }
            }
            LevelDirective::InvalidToken(token) => {
                logger.critical(format!(
                    "Bad option in {}. Level: {token} is not valid",
                    config_path.display()
                ));
                logger.set_threshold(Severity::Info);
                logger.critical("Level has been set to INFO");
            }
            LevelDirective::Missing => {
                logger.critical(format!(
                    "There is no level configuration in {}",
                    config_path.display()
                ));
                logger.set_threshold(Severity::Info);
                logger.critical("Level has been set to INFO");
            }
        }
    }
}
