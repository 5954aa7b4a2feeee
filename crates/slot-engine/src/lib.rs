//! # slot-engine
//!
//! Timezone-aware booking availability for the PawSpace marketplace.
//!
//! Given a provider's weekly business hours (in the provider's local IANA
//! timezone), a calendar date, a slot length, and the bookings already taken,
//! the engine produces the ordered list of bookable windows for that date in
//! UTC, each flagged available or not. All functions are pure and safe to call
//! from any thread.
//!
//! ## Modules
//!
//! - [`timezone`] — Local date + `HH:MM` in an IANA zone ⇄ UTC instant
//! - [`dst`] — Policy for local times skipped by spring-forward
//! - [`calendar`] — Strict `Ymd` and `Hhmm` value types
//! - [`hours`] — Weekly business-hours templates
//! - [`overlap`] — Half-open overlap checks against existing bookings
//! - [`slots`] — Candidate generation and availability annotation
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use chrono::Weekday;
//! use slot_engine::{generate_slots, BusinessHours, DayHours};
//!
//! let hours = BusinessHours::new("America/Los_Angeles")
//!     .with_day(Weekday::Mon, DayHours::parse("09:00", "12:00").unwrap());
//!
//! let slots = generate_slots("2026-03-16", &hours, 60, &[]).unwrap();
//! let labels: Vec<&str> = slots.iter().map(|s| s.local_label.as_str()).collect();
//! assert_eq!(labels, ["9:00 AM", "10:00 AM", "11:00 AM"]);
//! ```

pub mod calendar;
pub mod dst;
pub mod error;
pub mod hours;
pub mod overlap;
pub mod slots;
pub mod timezone;

pub use calendar::{Hhmm, Ymd};
pub use dst::DstPolicy;
pub use error::SlotError;
pub use hours::{BusinessHours, DayHours};
pub use overlap::{find_conflicts, ranges_overlap, Conflict, ExistingBooking};
pub use slots::{
    annotate_slots, available_only, generate_candidate_starts,
    generate_candidate_starts_with_policy, generate_slots, generate_slots_for_range,
    generate_slots_with_policy, CandidateSlot, DayAvailability, TimeSlot, MAX_RANGE_DAYS,
};
pub use timezone::{
    format_hhmm, format_ymd, is_past_ymd, is_past_ymd_at, parse_timezone, utc_to_zoned_iso,
    zoned_datetime_to_utc, zoned_datetime_to_utc_with_policy,
};
