//! In-memory sink for tests and record capture.

use super::Sink;
use std::io;
use std::sync::{Arc, Mutex};

/// A sink that stores records in memory.
///
/// Clonable; all clones share the same buffer, so a test can attach one
/// clone to a logger and keep another for assertions.
#[derive(Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records written so far, in order.
    pub fn records(&self) -> Vec<String> {
        self.records.lock().expect("memory sink poisoned").clone()
    }

    /// Whether any stored record contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.records().iter().any(|r| r.contains(needle))
    }

    /// Number of records written so far.
    pub fn len(&self) -> usize {
        self.records.lock().expect("memory sink poisoned").len()
    }

    /// True when no records have been written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for MemorySink {
    fn write_record(&self, line: &str) -> io::Result<()> {
        self.records
            .lock()
            .expect("memory sink poisoned")
            .push(line.to_string());
        Ok(())
    }
}
