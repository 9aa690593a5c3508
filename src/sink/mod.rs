//! Output sinks for formatted log records.
//!
//! The logger core hands each formatted record line to a [`Sink`]; where the
//! bytes end up (a rotating file, memory, somewhere else) is the sink's
//! concern.

mod memory;
mod rotating;

pub use memory::MemorySink;
pub use rotating::DailyRotatingFileSink;

use std::io;

/// Destination for formatted log records.
///
/// Implementations must be safe to call from any thread; the logger handle
/// is cloned freely across tasks.
pub trait Sink: Send + Sync {
    /// Write one formatted record line (no trailing newline).
    fn write_record(&self, line: &str) -> io::Result<()>;
}
