use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};

use std::{fs, io::ErrorKind, path::PathBuf};

/// ISO format used for the persisted date and for dates stored in records.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The tool's persisted notion of "today", independent of the real system
/// clock.
///
/// The date lives in a single-line text file. The clock is an explicit value
/// passed to whoever needs the current date; there is no hidden global. If
/// two processes write the file simultaneously, the last writer wins.
#[derive(Clone, Debug)]
pub struct Clock {
    path: PathBuf,
}

impl Clock {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the simulated current date.
    ///
    /// If the date file does not exist, this returns the real current date;
    /// absence is not an error here, unlike for the record stores.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read for any other reason, or
    /// if its contents are not a valid `YYYY-MM-DD` date.
    pub fn current(&self) -> Result<NaiveDate> {
        match fs::read_to_string(&self.path) {
            Ok(text) => NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).with_context(|| {
                format!(
                    "invalid date {:?} in {}",
                    text.trim(),
                    self.path.display()
                )
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Local::now().date_naive()),
            Err(e) => Err(e).with_context(|| format!("reading {}", self.path.display())),
        }
    }

    /// Persists `base + days` as the new simulated date, overwriting any
    /// prior value, and returns it.
    ///
    /// `days` may be zero (direct "set to" semantics) or negative (move
    /// backward).
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting date is out of range or the file
    /// cannot be written.
    pub fn set(&self, base: NaiveDate, days: i64) -> Result<NaiveDate> {
        let delta = Duration::try_days(days)
            .with_context(|| format!("{days} days is out of range"))?;
        let day = base
            .checked_add_signed(delta)
            .with_context(|| format!("date {base} {days:+} days is out of range"))?;
        fs::write(&self.path, day.format(DATE_FORMAT).to_string())
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(day)
    }
}
