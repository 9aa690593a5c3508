//! # levelswap
//!
//! Runtime log-level reloads driven by a plain-text configuration file.
//!
//! ## Overview
//!
//! `levelswap` provides a small logging subsystem whose verbosity threshold
//! can be changed while the host process is running, by editing a config
//! file on disk:
//! - Lock-free threshold reads on every emit path (a single atomic word)
//! - A background watcher that polls the config file's modification time
//!   and atomically applies level changes
//! - A daily-rotating file sink with a configurable rotation hour
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use levelswap::prelude::*;
//!
//! # async fn example() -> levelswap::error::Result<()> {
//! // Reads `level=...` from log.conf, attaches a rotating file sink, and
//! // spawns the watcher. Rotation happens daily at local 02:00.
//! let (logger, watcher) = initialize("log.conf", "app.log", 2)?;
//!
//! logger.info("service started");
//! logger.debug("only emitted while log.conf says level=DEBUG");
//!
//! // The watcher runs until process exit unless shut down explicitly.
//! watcher.shutdown().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration file format
//!
//! Line-oriented plain text. Lines that are blank or whose first
//! non-whitespace character is `#` are ignored. The first remaining line
//! containing `level=` sets the threshold; the value after the first `=`
//! must be exactly one of `DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL`.
//! An invalid or missing directive falls back to `INFO` with a critical
//! diagnostic in the log stream.
//!
//! ```text
//! # log.conf
//! level=DEBUG
//! ```
//!
//! ## Failure policy
//!
//! Only the very first, synchronous config read at [`setup::initialize`]
//! can fail the host. Every later problem — the file disappearing, a parse
//! error, a bad level name — is reported through the log stream itself and
//! the watcher keeps polling.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod setup;
pub mod sink;
pub mod watch;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{LevelDirective, LoggerHandle, Severity};
    pub use crate::error::{Result, SetupError};
    pub use crate::setup::initialize;
    pub use crate::sink::Sink;
    pub use crate::watch::{LevelWatcher, WatcherTask};
}
