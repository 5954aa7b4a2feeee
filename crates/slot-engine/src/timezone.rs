//! Conversion between local wall-clock times in an IANA timezone and UTC instants.
//!
//! The offset is always resolved at the target instant, never at "now", so a
//! date on the far side of a DST boundary converts with its own offset.
//! Functions that need "today" take an explicit anchor (`*_at` variants); the
//! plain variants read the system clock.

use chrono::{DateTime, LocalResult, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::calendar::{Hhmm, Ymd};
use crate::dst::DstPolicy;
use crate::error::{Result, SlotError};

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(time_zone: &str) -> Result<Tz> {
    time_zone
        .parse::<Tz>()
        .map_err(|_| SlotError::InvalidTimeZone(format!("'{}'", time_zone)))
}

/// Convert a local date and time of day in `time_zone` to a UTC instant.
///
/// Uses [`DstPolicy::Reject`]: a time skipped by spring-forward is an error.
///
/// # Errors
///
/// Returns [`SlotError::InvalidArgument`] for a malformed `ymd` or `hhmm`, or a
/// nonexistent local time, and [`SlotError::InvalidTimeZone`] for an unknown zone.
///
/// # Examples
///
/// ```
/// use slot_engine::timezone::zoned_datetime_to_utc;
///
/// // March 16 2026 is PDT (UTC-7).
/// let utc = zoned_datetime_to_utc("2026-03-16", "09:00", "America/Los_Angeles").unwrap();
/// assert_eq!(utc.to_rfc3339(), "2026-03-16T16:00:00+00:00");
/// ```
pub fn zoned_datetime_to_utc(ymd: &str, hhmm: &str, time_zone: &str) -> Result<DateTime<Utc>> {
    zoned_datetime_to_utc_with_policy(ymd, hhmm, time_zone, DstPolicy::default())
}

/// Same as [`zoned_datetime_to_utc`] with an explicit DST gap policy.
pub fn zoned_datetime_to_utc_with_policy(
    ymd: &str,
    hhmm: &str,
    time_zone: &str,
    policy: DstPolicy,
) -> Result<DateTime<Utc>> {
    let date: Ymd = ymd.parse()?;
    let time: Hhmm = hhmm.parse()?;
    let tz = parse_timezone(time_zone)?;
    local_to_utc(date, time, &tz, policy)
}

/// Resolve an already-validated local date/time against `tz`.
pub(crate) fn local_to_utc(
    date: Ymd,
    time: Hhmm,
    tz: &Tz,
    policy: DstPolicy,
) -> Result<DateTime<Utc>> {
    let naive = date.date().and_time(time.time());

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        // Fall-back overlap: take the first occurrence.
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => match policy {
            DstPolicy::Reject => Err(SlotError::InvalidArgument(format!(
                "nonexistent local time {} {} in {}: skipped by a DST transition",
                date,
                time,
                tz.name()
            ))),
            DstPolicy::ShiftForward => {
                // Transitions are never less than a day apart, so the offset a
                // day earlier is the one in force just before the gap.
                let before = tz
                    .offset_from_utc_datetime(&(naive - TimeDelta::days(1)))
                    .fix();
                let shifted = naive - TimeDelta::seconds(i64::from(before.local_minus_utc()));
                Ok(shifted.and_utc())
            }
        },
    }
}

/// Render `instant` as a local `YYYY-MM-DDTHH:MM:SS` string in `time_zone`
/// (no offset suffix).
pub fn utc_to_zoned_iso(instant: DateTime<Utc>, time_zone: &str) -> Result<String> {
    let tz = parse_timezone(time_zone)?;
    Ok(instant
        .with_timezone(&tz)
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string())
}

/// The calendar date of `instant` in `time_zone`, or in UTC when `None`.
pub fn format_ymd(instant: DateTime<Utc>, time_zone: Option<&str>) -> Result<Ymd> {
    match time_zone {
        Some(name) => {
            let tz = parse_timezone(name)?;
            Ok(Ymd::new(instant.with_timezone(&tz).date_naive()))
        }
        None => Ok(Ymd::new(instant.date_naive())),
    }
}

/// The local time of day of `instant` in `time_zone`, truncated to the minute.
pub fn format_hhmm(instant: DateTime<Utc>, time_zone: &str) -> Result<Hhmm> {
    use chrono::Timelike;

    let tz = parse_timezone(time_zone)?;
    let local = instant.with_timezone(&tz);
    Hhmm::new(local.hour(), local.minute())
}

/// True if `ymd` is strictly earlier than today in `time_zone` (UTC when `None`).
///
/// Reads the system clock; see [`is_past_ymd_at`] for a deterministic variant.
pub fn is_past_ymd(ymd: &str, time_zone: Option<&str>) -> Result<bool> {
    is_past_ymd_at(ymd, time_zone, Utc::now())
}

/// True if `ymd` is strictly earlier than the date of `now` in `time_zone`.
pub fn is_past_ymd_at(ymd: &str, time_zone: Option<&str>, now: DateTime<Utc>) -> Result<bool> {
    let date: Ymd = ymd.parse()?;
    let today = format_ymd(now, time_zone)?;
    Ok(date < today)
}
