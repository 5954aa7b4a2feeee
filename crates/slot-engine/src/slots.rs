//! Slot generation for a single date or a short date range.
//!
//! A day's open/close local times are resolved to UTC, the window between them
//! is cut into fixed-width candidates, and each candidate is flagged
//! unavailable if it overlaps an existing booking. Everything here is a pure
//! function of its arguments.

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::calendar::Ymd;
use crate::dst::DstPolicy;
use crate::error::{Result, SlotError};
use crate::hours::BusinessHours;
use crate::overlap::{ranges_overlap, ExistingBooking};
use crate::timezone::local_to_utc;

/// Longest date range (in days, inclusive) accepted by [`generate_slots_for_range`].
pub const MAX_RANGE_DAYS: i64 = 62;

/// A candidate slot before booking overlap is considered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSlot {
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
    /// Display-only local start, e.g. `"9:00 AM"`. Never compare on this.
    pub local_label: String,
}

/// A candidate slot annotated with availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
    pub local_label: String,
    pub is_available: bool,
}

/// The slots of one date in a range query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub ymd: Ymd,
    pub slots: Vec<TimeSlot>,
}

impl DayAvailability {
    /// True if at least one slot on this date can still be booked.
    pub fn has_availability(&self) -> bool {
        self.slots.iter().any(|s| s.is_available)
    }
}

/// Cut the business hours of `ymd` into fixed-width candidate slots.
///
/// The weekday is derived from `ymd` at UTC noon and looked up in `hours`.
/// A closed day (or one whose open time is not before its close time) yields
/// an empty list. Slots are emitted from the open instant in steps of
/// `slot_interval_minutes`; a slot whose end would pass the close instant is
/// never emitted.
///
/// Uses [`DstPolicy::Reject`] for open/close times skipped by spring-forward.
///
/// # Errors
///
/// - [`SlotError::InvalidArgument`] if `ymd` is malformed, the interval is not
///   positive, or an open/close time does not exist on that date.
/// - [`SlotError::InvalidTimeZone`] if `hours.timezone` does not resolve.
pub fn generate_candidate_starts(
    ymd: &str,
    hours: &BusinessHours,
    slot_interval_minutes: i64,
) -> Result<Vec<CandidateSlot>> {
    generate_candidate_starts_with_policy(ymd, hours, slot_interval_minutes, DstPolicy::default())
}

/// Same as [`generate_candidate_starts`] with an explicit DST gap policy.
pub fn generate_candidate_starts_with_policy(
    ymd: &str,
    hours: &BusinessHours,
    slot_interval_minutes: i64,
    policy: DstPolicy,
) -> Result<Vec<CandidateSlot>> {
    let step = slot_step(slot_interval_minutes)?;
    let date: Ymd = ymd.parse()?;
    let tz = hours.tz()?;
    candidates_for_day(date, hours, &tz, step, policy)
}

/// Flag each candidate unavailable if it overlaps any booking.
pub fn annotate_slots(candidates: Vec<CandidateSlot>, bookings: &[ExistingBooking]) -> Vec<TimeSlot> {
    let slots: Vec<TimeSlot> = candidates
        .into_iter()
        .map(|c| {
            let is_available = !bookings
                .iter()
                .any(|b| ranges_overlap(c.start_utc, c.end_utc, b.start_utc, b.end_utc));
            TimeSlot {
                start_utc: c.start_utc,
                end_utc: c.end_utc,
                local_label: c.local_label,
                is_available,
            }
        })
        .collect();

    tracing::trace!(
        slots = slots.len(),
        booked = slots.iter().filter(|s| !s.is_available).count(),
        "annotated slots"
    );
    slots
}

/// Generate and annotate the slots of one date.
///
/// `bookings` should be fetched immediately before the call; the result is a
/// snapshot and does not stop a concurrent booking from taking a slot.
pub fn generate_slots(
    ymd: &str,
    hours: &BusinessHours,
    slot_interval_minutes: i64,
    bookings: &[ExistingBooking],
) -> Result<Vec<TimeSlot>> {
    generate_slots_with_policy(ymd, hours, slot_interval_minutes, bookings, DstPolicy::default())
}

/// Same as [`generate_slots`] with an explicit DST gap policy.
pub fn generate_slots_with_policy(
    ymd: &str,
    hours: &BusinessHours,
    slot_interval_minutes: i64,
    bookings: &[ExistingBooking],
    policy: DstPolicy,
) -> Result<Vec<TimeSlot>> {
    let candidates =
        generate_candidate_starts_with_policy(ymd, hours, slot_interval_minutes, policy)?;
    Ok(annotate_slots(candidates, bookings))
}

/// Generate and annotate slots for every date from `from` through `to`.
///
/// Closed days appear with an empty slot list so the result always has one
/// entry per date.
///
/// # Errors
///
/// Fails fast on the first invalid day. Also returns
/// [`SlotError::InvalidArgument`] if `from` is after `to` or the range spans
/// more than [`MAX_RANGE_DAYS`] days.
pub fn generate_slots_for_range(
    from: &str,
    to: &str,
    hours: &BusinessHours,
    slot_interval_minutes: i64,
    bookings: &[ExistingBooking],
    policy: DstPolicy,
) -> Result<Vec<DayAvailability>> {
    let step = slot_step(slot_interval_minutes)?;
    let first: Ymd = from.parse()?;
    let last: Ymd = to.parse()?;

    let span = first.days_until(last) + 1;
    if span < 1 {
        return Err(SlotError::InvalidArgument(format!(
            "range start {} is after range end {}",
            first, last
        )));
    }
    if span > MAX_RANGE_DAYS {
        return Err(SlotError::InvalidArgument(format!(
            "range {}..={} spans {} days, max is {}",
            first, last, span, MAX_RANGE_DAYS
        )));
    }

    let tz = hours.tz()?;
    let mut days = Vec::with_capacity(span as usize);
    let mut current = Some(first);

    while let Some(date) = current.filter(|d| *d <= last) {
        let candidates = candidates_for_day(date, hours, &tz, step, policy)?;
        days.push(DayAvailability {
            ymd: date,
            slots: annotate_slots(candidates, bookings),
        });
        current = date.succ();
    }

    Ok(days)
}

/// Keep only the slots that can still be booked.
pub fn available_only(slots: Vec<TimeSlot>) -> Vec<TimeSlot> {
    slots.into_iter().filter(|s| s.is_available).collect()
}

fn slot_step(slot_interval_minutes: i64) -> Result<TimeDelta> {
    if slot_interval_minutes <= 0 {
        return Err(SlotError::InvalidArgument(format!(
            "slot interval must be a positive number of minutes, got {}",
            slot_interval_minutes
        )));
    }
    TimeDelta::try_minutes(slot_interval_minutes).ok_or_else(|| {
        SlotError::InvalidArgument(format!(
            "slot interval of {} minutes is out of range",
            slot_interval_minutes
        ))
    })
}

fn candidates_for_day(
    date: Ymd,
    hours: &BusinessHours,
    tz: &Tz,
    step: TimeDelta,
    policy: DstPolicy,
) -> Result<Vec<CandidateSlot>> {
    let weekday = date.weekday();
    let Some(day) = hours.day(weekday) else {
        tracing::debug!(%date, ?weekday, "closed");
        return Ok(Vec::new());
    };

    let open = local_to_utc(date, day.open, tz, policy)?;
    let close = local_to_utc(date, day.close, tz, policy)?;

    let mut slots = Vec::new();
    let mut start = open;
    // An interval large enough to overflow the calendar simply fits no slot.
    while let Some(end) = start.checked_add_signed(step).filter(|end| *end <= close) {
        slots.push(CandidateSlot {
            start_utc: start,
            end_utc: end,
            local_label: local_label(start, tz),
        });
        start = end;
    }

    tracing::debug!(
        %date,
        open = %open,
        close = %close,
        slots = slots.len(),
        "generated candidate slots"
    );
    Ok(slots)
}

/// 12-hour local clock label with AM/PM marker.
fn local_label(instant: DateTime<Utc>, tz: &Tz) -> String {
    instant.with_timezone(tz).format("%-I:%M %p").to_string()
}
