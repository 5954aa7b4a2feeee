//! Half-open interval overlap between slots and existing bookings.
//!
//! Intervals are `[start, end)`. Ranges that merely touch (one ends exactly
//! when the other starts) do NOT overlap, so back-to-back bookings can abut.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reserved interval owned by the booking store. Read-only here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingBooking {
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
}

impl ExistingBooking {
    pub fn new(start_utc: DateTime<Utc>, end_utc: DateTime<Utc>) -> Self {
        Self { start_utc, end_utc }
    }
}

/// A booking that collides with a proposed interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub booking: ExistingBooking,
    pub overlap_minutes: i64,
}

/// `a_start < b_end && b_start < a_end`.
pub fn ranges_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Every booking overlapping `[start, end)`, with the overlap length in minutes.
///
/// The overlap duration is `min(end, b.end) - max(start, b.start)`. Bookings are
/// reported in input order.
pub fn find_conflicts(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    bookings: &[ExistingBooking],
) -> Vec<Conflict> {
    bookings
        .iter()
        .filter(|b| ranges_overlap(start, end, b.start_utc, b.end_utc))
        .map(|b| {
            let overlap_start = start.max(b.start_utc);
            let overlap_end = end.min(b.end_utc);
            Conflict {
                booking: *b,
                overlap_minutes: (overlap_end - overlap_start).num_minutes(),
            }
        })
        .collect()
}
