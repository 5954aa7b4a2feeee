//! WASM bindings for slot-engine.
//!
//! Exposes slot generation, timezone conversion, and overlap checks to the
//! JavaScript booking UI via `wasm-bindgen`. All complex types are passed as
//! JSON strings; slots come back as `[{startUtc, endUtc, localLabel, isAvailable}]`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::Deserialize;
use slot_engine::{BusinessHours, DstPolicy, ExistingBooking};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Input DTOs
// ---------------------------------------------------------------------------

/// Booking format passed from JavaScript.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingInput {
    start_utc: String,
    end_utc: String,
}

// ---------------------------------------------------------------------------
// Helpers (plain `String` errors so they run on native targets too)
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with offset, e.g., "2026-03-16T16:00:00Z") and naive
/// time (e.g., "2026-03-16T16:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

/// Convert a JSON array of `{startUtc, endUtc}` objects into bookings.
fn parse_bookings_json(json: &str) -> Result<Vec<ExistingBooking>, String> {
    let inputs: Vec<BookingInput> =
        serde_json::from_str(json).map_err(|e| format!("Invalid bookings JSON: {}", e))?;

    inputs
        .into_iter()
        .map(|input| {
            let start = parse_datetime(&input.start_utc)?;
            let end = parse_datetime(&input.end_utc)?;
            Ok(ExistingBooking::new(start, end))
        })
        .collect()
}

/// `"reject"` (the default when omitted) or `"shift-forward"`.
fn parse_policy(name: Option<&str>) -> Result<DstPolicy, String> {
    match name {
        None => Ok(DstPolicy::default()),
        Some(name) => serde_json::from_value(serde_json::Value::String(name.to_string()))
            .map_err(|_| {
                format!(
                    "Invalid DST policy '{}': expected 'reject' or 'shift-forward'",
                    name
                )
            }),
    }
}

fn slots_json(
    ymd: &str,
    business_hours_json: &str,
    slot_interval_minutes: i32,
    bookings_json: &str,
    dst_policy: Option<&str>,
) -> Result<String, String> {
    let policy = parse_policy(dst_policy)?;
    let hours = BusinessHours::from_json(business_hours_json).map_err(|e| e.to_string())?;
    let bookings = parse_bookings_json(bookings_json)?;

    let slots = slot_engine::generate_slots_with_policy(
        ymd,
        &hours,
        i64::from(slot_interval_minutes),
        &bookings,
        policy,
    )
    .map_err(|e| e.to_string())?;

    serde_json::to_string(&slots).map_err(|e| format!("Serialization error: {}", e))
}

fn range_json(
    from_ymd: &str,
    to_ymd: &str,
    business_hours_json: &str,
    slot_interval_minutes: i32,
    bookings_json: &str,
    dst_policy: Option<&str>,
) -> Result<String, String> {
    let policy = parse_policy(dst_policy)?;
    let hours = BusinessHours::from_json(business_hours_json).map_err(|e| e.to_string())?;
    let bookings = parse_bookings_json(bookings_json)?;

    let days = slot_engine::generate_slots_for_range(
        from_ymd,
        to_ymd,
        &hours,
        i64::from(slot_interval_minutes),
        &bookings,
        policy,
    )
    .map_err(|e| e.to_string())?;

    serde_json::to_string(&days).map_err(|e| format!("Serialization error: {}", e))
}

fn overlap(a_start: &str, a_end: &str, b_start: &str, b_end: &str) -> Result<bool, String> {
    Ok(slot_engine::ranges_overlap(
        parse_datetime(a_start)?,
        parse_datetime(a_end)?,
        parse_datetime(b_start)?,
        parse_datetime(b_end)?,
    ))
}

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate the slots of one date, flagged against existing bookings.
///
/// `businessHoursJson` is `{timezone, monday: {open, close}, ...}`;
/// `bookingsJson` is an array of `{startUtc, endUtc}`. Returns a JSON array of
/// `{startUtc, endUtc, localLabel, isAvailable}`.
///
/// `dstPolicy` is `"reject"` (default) or `"shift-forward"` and decides what
/// happens when an open or close time falls in a spring-forward gap.
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots(
    ymd: &str,
    business_hours_json: &str,
    slot_interval_minutes: i32,
    bookings_json: &str,
    dst_policy: Option<String>,
) -> Result<String, JsValue> {
    slots_json(
        ymd,
        business_hours_json,
        slot_interval_minutes,
        bookings_json,
        dst_policy.as_deref(),
    )
    .map_err(js_err)
}

/// Generate slots for every date from `fromYmd` through `toYmd` (inclusive).
///
/// Returns a JSON array of `{ymd, slots}` with one entry per date. `dstPolicy`
/// is as for `generateSlots`.
#[wasm_bindgen(js_name = "generateSlotsForRange")]
pub fn generate_slots_for_range(
    from_ymd: &str,
    to_ymd: &str,
    business_hours_json: &str,
    slot_interval_minutes: i32,
    bookings_json: &str,
    dst_policy: Option<String>,
) -> Result<String, JsValue> {
    range_json(
        from_ymd,
        to_ymd,
        business_hours_json,
        slot_interval_minutes,
        bookings_json,
        dst_policy.as_deref(),
    )
    .map_err(js_err)
}

/// Convert a local date and `HH:MM` time in an IANA timezone to an RFC 3339 UTC string.
#[wasm_bindgen(js_name = "zonedDateTimeToUtc")]
pub fn zoned_date_time_to_utc(ymd: &str, hhmm: &str, time_zone: &str) -> Result<String, JsValue> {
    slot_engine::zoned_datetime_to_utc(ymd, hhmm, time_zone)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .map_err(|e| js_err(e.to_string()))
}

/// Render a UTC instant as a local `YYYY-MM-DDTHH:MM:SS` string.
#[wasm_bindgen(js_name = "utcToZonedIso")]
pub fn utc_to_zoned_iso(instant: &str, time_zone: &str) -> Result<String, JsValue> {
    let dt = parse_datetime(instant).map_err(js_err)?;
    slot_engine::utc_to_zoned_iso(dt, time_zone).map_err(|e| js_err(e.to_string()))
}

/// True if `ymd` is before today in `timeZone` (UTC if omitted).
#[wasm_bindgen(js_name = "isPastYmd")]
pub fn is_past_ymd(ymd: &str, time_zone: Option<String>) -> Result<bool, JsValue> {
    slot_engine::is_past_ymd(ymd, time_zone.as_deref()).map_err(|e| js_err(e.to_string()))
}

/// Half-open overlap test on four ISO 8601 datetime strings.
#[wasm_bindgen(js_name = "rangesOverlap")]
pub fn ranges_overlap(
    a_start: &str,
    a_end: &str,
    b_start: &str,
    b_end: &str,
) -> Result<bool, JsValue> {
    overlap(a_start, a_end, b_start, b_end).map_err(js_err)
}
