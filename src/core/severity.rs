//! The severity enumeration for log records and the threshold.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record, ordered by increasing importance.
///
/// Also used as the logger's threshold: a record is emitted only when its
/// severity is greater than or equal to the threshold.
///
/// # Examples
///
/// ```rust
/// use levelswap::core::Severity;
///
/// assert!(Severity::Error > Severity::Info);
/// assert_eq!("WARNING".parse::<Severity>().unwrap(), Severity::Warning);
/// assert!("warning".parse::<Severity>().is_err()); // names are case-sensitive
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Fine-grained diagnostic detail.
    Debug,
    /// Routine operational messages. The fallback threshold.
    Info,
    /// Something unexpected, but the process continues normally.
    Warning,
    /// A failure of some operation.
    Error,
    /// A failure severe enough that it is always worth recording.
    Critical,
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// The uppercase name, as written in configuration files and records.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Stable small-integer form used for the atomic threshold word.
    pub(crate) fn index(self) -> usize {
        match self {
            Severity::Debug => 0,
            Severity::Info => 1,
            Severity::Warning => 2,
            Severity::Error => 3,
            Severity::Critical => 4,
        }
    }

    pub(crate) fn from_index(index: usize) -> Option<Severity> {
        Severity::ALL.get(index).copied()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string did not name one of the five severities.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unrecognized severity name: {0:?}")]
pub struct UnknownSeverityError(
    /// The offending name, verbatim.
    pub String,
);

impl FromStr for Severity {
    type Err = UnknownSeverityError;

    /// Case-sensitive: only the exact uppercase names are valid.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARNING" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            "CRITICAL" => Ok(Severity::Critical),
            other => Err(UnknownSeverityError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        let mut sorted = Severity::ALL;
        sorted.sort();
        assert_eq!(sorted, Severity::ALL);
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Critical > Severity::Error);
    }

    #[test]
    fn test_parse_all_names() {
        for severity in Severity::ALL {
            assert_eq!(severity.as_str().parse::<Severity>().unwrap(), severity);
        }
    }

    #[test]
    fn test_parse_rejects_case_variants() {
        assert!("debug".parse::<Severity>().is_err());
        assert!("Info".parse::<Severity>().is_err());
        assert!("WARN".parse::<Severity>().is_err());
        assert!("".parse::<Severity>().is_err());
    }

    #[test]
    fn test_index_round_trip() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_index(severity.index()), Some(severity));
        }
        assert_eq!(Severity::from_index(5), None);
    }
}
