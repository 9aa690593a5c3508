//! Core logging types: severity, config parsing, and the logger handle.

mod handle;
mod parser;
mod severity;

pub use handle::LoggerHandle;
pub use parser::{parse_level_file, ApplyPhase, LevelDirective};
pub use severity::{Severity, UnknownSeverityError};
