//! The mtime-polling watcher that applies level changes at runtime.

use crate::core::{parse_level_file, ApplyPhase, LoggerHandle};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Default polling interval. Bounds reload latency to this order of
/// magnitude while keeping CPU overhead negligible.
pub const DEFAULT_QUANTUM: Duration = Duration::from_millis(250);

/// Polls a configuration file's modification time and re-applies the
/// `level=` directive when the file changes.
///
/// The watcher is the sole writer of the logger's threshold; emitting call
/// sites only read it. Exactly one watcher per logger is supported.
///
/// Every failure after construction is contained within its poll
/// iteration: unreadable mtime or file contents are reported through the
/// logger's own stream and retried on the next tick, never escalated. A
/// transient read error never resets the level; only a successful parse
/// yielding an invalid or missing directive forces the `INFO` fallback.
///
/// # Examples
///
/// ```rust,no_run
/// use levelswap::core::LoggerHandle;
/// use levelswap::watch::LevelWatcher;
///
/// # async fn example() -> std::io::Result<()> {
/// let logger = LoggerHandle::new();
/// let task = LevelWatcher::new("log.conf", logger)?.spawn();
///
/// // ... later, stop it deterministically:
/// task.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct LevelWatcher {
    config_path: PathBuf,
    logger: LoggerHandle,
    quantum: Duration,
    last_seen_mtime: SystemTime,
}

impl LevelWatcher {
    /// Create a watcher, capturing the file's current modification time as
    /// the baseline. The file is not parsed here; the initial level is the
    /// caller's concern (see [`crate::setup::initialize`]).
    ///
    /// # Errors
    ///
    /// Fails if the modification time cannot be read — the same fatal
    /// class as an unreadable initial config, since no baseline exists.
    pub fn new(config_path: impl Into<PathBuf>, logger: LoggerHandle) -> io::Result<Self> {
        let config_path = config_path.into();
        let last_seen_mtime = mtime(&config_path)?;
        Ok(Self {
            config_path,
            logger,
            quantum: DEFAULT_QUANTUM,
            last_seen_mtime,
        })
    }

    /// Override the polling interval. Intended for tests; production use
    /// keeps [`DEFAULT_QUANTUM`].
    pub fn with_quantum(mut self, quantum: Duration) -> Self {
        self.quantum = quantum;
        self
    }

    /// Spawn the polling loop on the current tokio runtime.
    ///
    /// The returned [`WatcherTask`] can stop the loop deterministically;
    /// dropping it instead leaves the watcher running until process exit.
    pub fn spawn(self) -> WatcherTask {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(self.run(cancel.clone()));
        WatcherTask { cancel, task }
    }

    async fn run(mut self, cancel: CancellationToken) {
        loop {
            // Sleep first so every continue path below shares one delay,
            // and check for cancellation once per tick.
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(self.quantum) => {}
            }
            self.tick();
        }
    }

    /// One poll iteration: compare mtimes, re-parse and apply on change.
    fn tick(&mut self) {
        let current = match mtime(&self.config_path) {
            Ok(time) => time,
            Err(err) => {
                self.logger.error(format!(
                    "Conflict while getting mod time for {}: {err}",
                    self.config_path.display()
                ));
                self.logger.error("Retrying on next poll");
                return;
            }
        };
        if current == self.last_seen_mtime {
            return;
        }
        // Advance the baseline before parsing: a failed read must not be
        // retried forever against the same stale timestamp.
        self.last_seen_mtime = current;

        match parse_level_file(&self.config_path) {
            Ok(directive) => {
                directive.apply_to(&self.logger, &self.config_path, ApplyPhase::Reload);
            }
            Err(err) => {
                self.logger.error(format!(
                    "Conflict while reading {}: {err}",
                    self.config_path.display()
                ));
                self.logger
                    .error("Keeping the current level, retrying on next poll");
            }
        }
    }
}

/// Handle to a spawned watcher loop.
///
/// Dropping the handle detaches the loop (it keeps polling until the
/// process exits); [`WatcherTask::shutdown`] stops it deterministically.
pub struct WatcherTask {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl WatcherTask {
    /// Cancel the loop and wait for it to finish its current iteration.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        // The loop only ends via cancellation, so join errors can only be
        // runtime-shutdown races.
        let _ = self.task.await;
    }

    /// Whether the loop is still running.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

fn mtime(path: &Path) -> io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}
