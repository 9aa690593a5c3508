//! The shared logger handle providing lock-free threshold access.

use crate::core::Severity;
use crate::sink::Sink;
use arc_swap::ArcSwapOption;
use chrono::Local;
use std::fmt::Display;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Timestamp prefix for emitted records.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

struct LoggerInner {
    /// Current threshold as a severity index. Written only by the watcher
    /// (or explicit `set_threshold` calls); read on every emit.
    threshold: AtomicUsize,
    /// The attached output sink. A single slot, installed once at setup;
    /// arc-swapped so emitters load it without locking.
    sink: ArcSwapOption<Box<dyn Sink>>,
}

/// A cheaply clonable handle to one logger.
///
/// All clones share the same threshold and sink. The threshold is a single
/// atomic word: the watcher's update is one atomic store, and concurrent
/// emitters never observe a torn value and never take a lock.
///
/// # Examples
///
/// ```rust
/// use levelswap::core::{LoggerHandle, Severity};
/// use levelswap::sink::MemorySink;
///
/// let logger = LoggerHandle::new();
/// let sink = MemorySink::new();
/// logger.attach_sink(sink.clone());
///
/// logger.set_threshold(Severity::Warning);
/// logger.info("filtered out");
/// logger.error("kept");
///
/// assert_eq!(sink.records().len(), 1);
/// ```
pub struct LoggerHandle {
    inner: Arc<LoggerInner>,
}

impl LoggerHandle {
    /// Create a logger with no sink attached and an `INFO` threshold.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                threshold: AtomicUsize::new(Severity::Info.index()),
                sink: ArcSwapOption::empty(),
            }),
        }
    }

    /// Install the output sink. Records emitted before a sink is attached
    /// are dropped.
    pub fn attach_sink(&self, sink: impl Sink + 'static) {
        let sink: Box<dyn Sink> = Box::new(sink);
        self.inner.sink.store(Some(Arc::new(sink)));
    }

    /// The current verbosity threshold.
    pub fn threshold(&self) -> Severity {
        let index = self.inner.threshold.load(Ordering::Acquire);
        // The word only ever holds values written by set_threshold.
        Severity::from_index(index).unwrap_or(Severity::Info)
    }

    /// Atomically replace the threshold.
    pub fn set_threshold(&self, severity: Severity) {
        self.inner
            .threshold
            .store(severity.index(), Ordering::Release);
    }

    /// Whether a record at `severity` would currently be emitted.
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.threshold()
    }

    /// Emit a record if `severity` meets the threshold.
    ///
    /// The record is formatted as `"<local timestamp> <LEVEL> <message>"`.
    /// Sink write failures are discarded: a logger has nowhere to report
    /// its own output failure.
    pub fn log(&self, severity: Severity, message: impl Display) {
        if !self.enabled(severity) {
            return;
        }
        if let Some(sink) = self.inner.sink.load_full() {
            let line = format!(
                "{} {} {}",
                Local::now().format(TIMESTAMP_FORMAT),
                severity,
                message
            );
            let _ = sink.write_record(&line);
        }
    }

    /// Emit at `DEBUG`.
    pub fn debug(&self, message: impl Display) {
        self.log(Severity::Debug, message);
    }

    /// Emit at `INFO`.
    pub fn info(&self, message: impl Display) {
        self.log(Severity::Info, message);
    }

    /// Emit at `WARNING`.
    pub fn warning(&self, message: impl Display) {
        self.log(Severity::Warning, message);
    }

    /// Emit at `ERROR`.
    pub fn error(&self, message: impl Display) {
        self.log(Severity::Error, message);
    }

    /// Emit at `CRITICAL`.
    pub fn critical(&self, message: impl Display) {
        self.log(Severity::Critical, message);
    }
}

impl Default for LoggerHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerHandle {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
