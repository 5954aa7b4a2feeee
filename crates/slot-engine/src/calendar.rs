//! Strict calendar value types: [`Ymd`] dates and [`Hhmm`] times of day.
//!
//! Both parse only their canonical zero-padded form. Loosely formatted input
//! (`"2026-3-9"`, `"9:00"`) is rejected, never coerced.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// A calendar date in canonical `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ymd(NaiveDate);

impl Ymd {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Day of week, read from the date at UTC noon.
    ///
    /// Anchoring at noon keeps the weekday stable no matter which offset a
    /// caller later applies to the date.
    pub fn weekday(&self) -> Weekday {
        self.0
            .and_hms_opt(12, 0, 0)
            .map_or(self.0.weekday(), |noon| noon.and_utc().weekday())
    }

    /// The following calendar date, or `None` at the end of chrono's range.
    pub fn succ(&self) -> Option<Ymd> {
        self.0.succ_opt().map(Ymd)
    }

    /// Whole days from `self` to `other` (negative if `other` is earlier).
    pub fn days_until(&self, other: Ymd) -> i64 {
        (other.0 - self.0).num_days()
    }
}

impl FromStr for Ymd {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SlotError::InvalidArgument(format!("invalid date '{}': expected YYYY-MM-DD", s));

        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(invalid());
        }
        let year = parse_digits(&s[0..4]).ok_or_else(invalid)?;
        let month = parse_digits(&s[5..7]).ok_or_else(invalid)?;
        let day = parse_digits(&s[8..10]).ok_or_else(invalid)?;

        NaiveDate::from_ymd_opt(year as i32, month, day)
            .map(Ymd)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Ymd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl TryFrom<String> for Ymd {
    type Error = SlotError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Ymd> for String {
    fn from(ymd: Ymd) -> Self {
        ymd.to_string()
    }
}

impl From<NaiveDate> for Ymd {
    fn from(date: NaiveDate) -> Self {
        Ymd(date)
    }
}

/// A 24-hour local time of day in canonical `HH:MM` form (`00:00`..=`23:59`).
///
/// Ordering agrees with lexical ordering of the canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hhmm(NaiveTime);

impl Hhmm {
    /// Build from hour and minute, rejecting anything outside `00:00`..=`23:59`.
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Hhmm)
            .ok_or_else(|| {
                SlotError::InvalidArgument(format!("invalid time {:02}:{:02}", hour, minute))
            })
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl FromStr for Hhmm {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SlotError::InvalidArgument(format!("invalid time '{}': expected HH:MM", s));

        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        let hour = parse_digits(&s[0..2]).ok_or_else(invalid)?;
        let minute = parse_digits(&s[3..5]).ok_or_else(invalid)?;

        Hhmm::new(hour, minute).map_err(|_| invalid())
    }
}

impl fmt::Display for Hhmm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl TryFrom<String> for Hhmm {
    type Error = SlotError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Hhmm> for String {
    fn from(hhmm: Hhmm) -> Self {
        hhmm.to_string()
    }
}

/// Parse a fixed-width run of ASCII digits. Signs and whitespace are rejected,
/// which `str::parse` alone would not do for `"+1"`.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
