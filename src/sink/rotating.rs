//! Daily-rotating file sink.

use super::Sink;
use crate::error::SetupError;
use chrono::{DateTime, Local, NaiveTime, TimeZone};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotated files carry this timestamp as a suffix on the base file name.
const ROTATION_SUFFIX_FORMAT: &str = "%Y%m%dT%H%M%S";

struct RotationState {
    file: File,
    next_rotation: DateTime<Local>,
}

/// Append-mode file sink that rotates once per day.
///
/// Rotation happens at local midnight plus a configurable hour offset: the
/// first record written at or after that instant closes the current file,
/// renames it to `<name>.<YYYYmmddTHHMMSS>`, and opens a fresh file at the
/// original path. Writers are serialized by an interior mutex.
///
/// # Examples
///
/// ```rust,no_run
/// use levelswap::sink::DailyRotatingFileSink;
///
/// # fn example() -> levelswap::error::Result<()> {
/// // Rotate daily at 04:00 local time.
/// let sink = DailyRotatingFileSink::new("app.log", 4)?;
/// # Ok(())
/// # }
/// ```
pub struct DailyRotatingFileSink {
    path: PathBuf,
    rotation_hour: u8,
    state: Mutex<RotationState>,
}

impl DailyRotatingFileSink {
    /// Open (or create) the log file at `path`, rotating daily at
    /// `rotation_hour` o'clock local time.
    ///
    /// # Errors
    ///
    /// Fails if `rotation_hour` is not in `0..=23` or the file cannot be
    /// opened for appending.
    pub fn new(path: impl Into<PathBuf>, rotation_hour: u8) -> Result<Self, SetupError> {
        if rotation_hour > 23 {
            return Err(SetupError::RotationHourOutOfRange(rotation_hour));
        }
        let path = path.into();
        let file = open_append(&path)?;
        Ok(Self {
            state: Mutex::new(RotationState {
                file,
                next_rotation: next_rotation_after(Local::now(), rotation_hour),
            }),
            path,
            rotation_hour,
        })
    }

    /// Path of the active log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The configured rotation hour.
    pub fn rotation_hour(&self) -> u8 {
        self.rotation_hour
    }

    fn rotate(&self, state: &mut RotationState, now: DateTime<Local>) -> io::Result<()> {
        state.file.flush()?;

        let mut rotated = self.path.clone().into_os_string();
        rotated.push(format!(".{}", now.format(ROTATION_SUFFIX_FORMAT)));
        std::fs::rename(&self.path, PathBuf::from(rotated))?;

        state.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        state.next_rotation = next_rotation_after(now, self.rotation_hour);
        Ok(())
    }
}

impl Sink for DailyRotatingFileSink {
    fn write_record(&self, line: &str) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("rotating sink lock poisoned"))?;
        let now = Local::now();
        if now >= state.next_rotation {
            self.rotate(&mut state, now)?;
        }
        writeln!(state.file, "{line}")
    }
}

fn open_append(path: &Path) -> Result<File, SetupError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| SetupError::LogFileOpen {
            path: path.to_path_buf(),
            source,
        })
}

/// First instant strictly after `now` that falls on `hour`:00:00 local time.
fn next_rotation_after(now: DateTime<Local>, hour: u8) -> DateTime<Local> {
    // Hour is validated at sink construction.
    let time = NaiveTime::from_hms_opt(u32::from(hour), 0, 0).unwrap_or(NaiveTime::MIN);
    let mut date = now.date_naive();
    loop {
        // earliest() skips instants that do not exist locally (DST gap).
        if let Some(candidate) = Local.from_local_datetime(&date.and_time(time)).earliest() {
            if candidate > now {
                return candidate;
            }
        }
        date = match date.succ_opt() {
            Some(next) => next,
            None => return now,
        };
    }
}
