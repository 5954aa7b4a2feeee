//! Tests for candidate generation, annotation, and range queries.

use chrono::{DateTime, TimeZone, Utc, Weekday};
use slot_engine::{
    annotate_slots, available_only, generate_candidate_starts,
    generate_candidate_starts_with_policy, generate_slots, generate_slots_for_range,
    zoned_datetime_to_utc, BusinessHours, DayHours, DstPolicy, ExistingBooking, SlotError,
    MAX_RANGE_DAYS,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0).unwrap()
}

fn hours_in(tz: &str, weekday: Weekday, open: &str, close: &str) -> BusinessHours {
    BusinessHours::new(tz).with_day(weekday, DayHours::parse(open, close).unwrap())
}

fn local_booking(ymd: &str, start: &str, end: &str, tz: &str) -> ExistingBooking {
    ExistingBooking::new(
        zoned_datetime_to_utc(ymd, start, tz).unwrap(),
        zoned_datetime_to_utc(ymd, end, tz).unwrap(),
    )
}

// ── Candidate generation ────────────────────────────────────────────────────

#[test]
fn two_hour_slots_stop_before_close() {
    // 09:00-17:00 in 120-minute steps: 09, 11, 13, 15. Never 17:00-19:00.
    let hours = hours_in("UTC", Weekday::Mon, "09:00", "17:00");

    let slots = generate_candidate_starts("2026-03-16", &hours, 120).unwrap();

    let starts: Vec<_> = slots.iter().map(|s| s.start_utc).collect();
    assert_eq!(
        starts,
        vec![
            utc(2026, 3, 16, 9, 0),
            utc(2026, 3, 16, 11, 0),
            utc(2026, 3, 16, 13, 0),
            utc(2026, 3, 16, 15, 0),
        ]
    );
    assert_eq!(slots.last().unwrap().end_utc, utc(2026, 3, 16, 17, 0));
}

#[test]
fn partial_trailing_slot_is_not_emitted() {
    // 09:00-10:30 in 60-minute steps: only 09:00-10:00 fits.
    let hours = hours_in("UTC", Weekday::Mon, "09:00", "10:30");
    let slots = generate_candidate_starts("2026-03-16", &hours, 60).unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].end_utc, utc(2026, 3, 16, 10, 0));
}

#[test]
fn interval_longer_than_the_day_yields_nothing() {
    let hours = hours_in("UTC", Weekday::Mon, "09:00", "10:00");
    assert!(generate_candidate_starts("2026-03-16", &hours, 90)
        .unwrap()
        .is_empty());
}

#[test]
fn huge_interval_never_panics() {
    // Intervals far beyond the open window either fit no slot or are rejected.
    let hours = hours_in("UTC", Weekday::Mon, "09:00", "17:00");

    for interval in [24 * 60, 1_000_000, 1_000_000_000_000, i64::MAX / 60_000] {
        let slots = generate_candidate_starts("2026-03-16", &hours, interval).unwrap();
        assert!(slots.is_empty(), "interval {interval} should fit no slot");
    }

    // Too large to be a duration at all.
    for interval in [i64::MAX / 60, i64::MAX] {
        assert!(matches!(
            generate_candidate_starts("2026-03-16", &hours, interval),
            Err(SlotError::InvalidArgument(_))
        ));
    }
}

#[test]
fn huge_interval_in_range_query_is_empty() {
    let hours = hours_in("UTC", Weekday::Mon, "09:00", "17:00");
    let days = generate_slots_for_range(
        "2026-03-16",
        "2026-03-22",
        &hours,
        1_000_000_000_000,
        &[],
        DstPolicy::default(),
    )
    .unwrap();

    assert_eq!(days.len(), 7);
    assert!(days.iter().all(|d| d.slots.is_empty()));
}

#[test]
fn closed_day_is_empty_not_an_error() {
    // Only Monday is open; 2026-03-17 is a Tuesday.
    let hours = hours_in("America/Los_Angeles", Weekday::Mon, "09:00", "12:00");
    assert_eq!(generate_candidate_starts("2026-03-17", &hours, 30).unwrap(), vec![]);
}

#[test]
fn inverted_hours_are_closed() {
    let hours = hours_in("UTC", Weekday::Mon, "17:00", "09:00");
    assert!(generate_candidate_starts("2026-03-16", &hours, 30)
        .unwrap()
        .is_empty());
}

#[test]
fn slots_are_converted_from_provider_zone() {
    // Los Angeles Monday in PDT: 09:00 local = 16:00Z.
    let hours = hours_in("America/Los_Angeles", Weekday::Mon, "09:00", "10:00");
    let slots = generate_candidate_starts("2026-03-16", &hours, 30).unwrap();

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].start_utc, utc(2026, 3, 16, 16, 0));
    assert_eq!(slots[0].local_label, "9:00 AM");
    assert_eq!(slots[1].start_utc, utc(2026, 3, 16, 16, 30));
    assert_eq!(slots[1].local_label, "9:30 AM");
}

#[test]
fn weekday_follows_the_calendar_date_not_the_utc_date() {
    // Tokyo Monday 08:00 local is still Sunday in UTC; the Monday entry applies.
    let hours = hours_in("Asia/Tokyo", Weekday::Mon, "08:00", "09:00");
    let slots = generate_candidate_starts("2026-03-16", &hours, 60).unwrap();

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start_utc, utc(2026, 3, 15, 23, 0));
}

#[test]
fn generation_is_idempotent() {
    let hours = hours_in("Europe/London", Weekday::Fri, "08:00", "18:00");
    let first = generate_candidate_starts("2026-10-23", &hours, 25).unwrap();
    let second = generate_candidate_starts("2026-10-23", &hours, 25).unwrap();
    assert_eq!(first, second);
}

// ── DST days ────────────────────────────────────────────────────────────────

#[test]
fn fall_back_day_has_an_extra_hour_of_slots() {
    // 2026-11-01 (Sunday): New York 00:00-04:00 local spans 5 real hours.
    let hours = hours_in("America/New_York", Weekday::Sun, "00:00", "04:00");
    let slots = generate_candidate_starts("2026-11-01", &hours, 60).unwrap();

    assert_eq!(slots.len(), 5);
    let labels: Vec<&str> = slots.iter().map(|s| s.local_label.as_str()).collect();
    assert_eq!(labels, ["12:00 AM", "1:00 AM", "1:00 AM", "2:00 AM", "3:00 AM"]);
}

#[test]
fn spring_forward_day_loses_an_hour_of_slots() {
    // 2026-03-08 (Sunday): New York 00:00-04:00 local spans 3 real hours.
    let hours = hours_in("America/New_York", Weekday::Sun, "00:00", "04:00");
    let slots = generate_candidate_starts("2026-03-08", &hours, 60).unwrap();
    assert_eq!(slots.len(), 3);
}

#[test]
fn opening_inside_the_gap_follows_policy() {
    let hours = hours_in("America/New_York", Weekday::Sun, "02:30", "05:00");

    let rejected = generate_candidate_starts("2026-03-08", &hours, 30).unwrap_err();
    assert!(matches!(rejected, SlotError::InvalidArgument(_)));

    // Shifted open is 03:30 EDT (07:30Z); close 05:00 EDT (09:00Z): three 30-min slots.
    let shifted =
        generate_candidate_starts_with_policy("2026-03-08", &hours, 30, DstPolicy::ShiftForward)
            .unwrap();
    assert_eq!(shifted.len(), 3);
    assert_eq!(shifted[0].start_utc, utc(2026, 3, 8, 7, 30));
    assert_eq!(shifted[0].local_label, "3:30 AM");
}

// ── Invalid input ───────────────────────────────────────────────────────────

#[test]
fn non_positive_interval_is_rejected_even_on_closed_days() {
    let hours = hours_in("UTC", Weekday::Mon, "09:00", "17:00");
    for interval in [0, -30] {
        for date in ["2026-03-16", "2026-03-17"] {
            let err = generate_candidate_starts(date, &hours, interval).unwrap_err();
            assert!(matches!(err, SlotError::InvalidArgument(_)));
        }
    }
}

#[test]
fn malformed_date_is_rejected() {
    let hours = hours_in("UTC", Weekday::Mon, "09:00", "17:00");
    assert!(matches!(
        generate_candidate_starts("03/16/2026", &hours, 30),
        Err(SlotError::InvalidArgument(_))
    ));
}

#[test]
fn unknown_timezone_is_rejected() {
    let hours = hours_in("Pacific/Atlantis", Weekday::Mon, "09:00", "17:00");
    assert!(matches!(
        generate_candidate_starts("2026-03-16", &hours, 30),
        Err(SlotError::InvalidTimeZone(_))
    ));
}

// ── Annotation ──────────────────────────────────────────────────────────────

#[test]
fn end_to_end_los_angeles_monday() {
    // Open 09:00-12:00, 60-minute slots, one booking 10:00-11:00 local.
    let tz = "America/Los_Angeles";
    let hours = hours_in(tz, Weekday::Mon, "09:00", "12:00");
    let bookings = vec![local_booking("2026-03-16", "10:00", "11:00", tz)];

    let slots = generate_slots("2026-03-16", &hours, 60, &bookings).unwrap();

    let summary: Vec<(&str, bool)> = slots
        .iter()
        .map(|s| (s.local_label.as_str(), s.is_available))
        .collect();
    assert_eq!(
        summary,
        [("9:00 AM", true), ("10:00 AM", false), ("11:00 AM", true)]
    );
}

#[test]
fn booking_spanning_several_slots_blocks_each() {
    let hours = hours_in("UTC", Weekday::Mon, "09:00", "12:00");
    let bookings = vec![ExistingBooking::new(
        utc(2026, 3, 16, 9, 15),
        utc(2026, 3, 16, 10, 15),
    )];

    let slots = generate_slots("2026-03-16", &hours, 30, &bookings).unwrap();
    let available: Vec<bool> = slots.iter().map(|s| s.is_available).collect();

    // 09:00 09:30 10:00 blocked; 10:30.. free.
    assert_eq!(available, [false, false, false, true, true, true]);
}

#[test]
fn annotate_with_no_bookings_marks_all_available() {
    let hours = hours_in("UTC", Weekday::Mon, "09:00", "11:00");
    let candidates = generate_candidate_starts("2026-03-16", &hours, 30).unwrap();
    let slots = annotate_slots(candidates.clone(), &[]);

    assert_eq!(slots.len(), candidates.len());
    assert!(slots.iter().all(|s| s.is_available));
}

#[test]
fn available_only_drops_booked_slots() {
    let hours = hours_in("UTC", Weekday::Mon, "09:00", "12:00");
    let bookings = vec![ExistingBooking::new(
        utc(2026, 3, 16, 10, 0),
        utc(2026, 3, 16, 11, 0),
    )];

    let slots = available_only(generate_slots("2026-03-16", &hours, 60, &bookings).unwrap());

    let starts: Vec<_> = slots.iter().map(|s| s.start_utc).collect();
    assert_eq!(starts, [utc(2026, 3, 16, 9, 0), utc(2026, 3, 16, 11, 0)]);
}

#[test]
fn time_slot_json_shape() {
    let hours = hours_in("UTC", Weekday::Mon, "09:00", "09:30");
    let slots = generate_slots("2026-03-16", &hours, 30, &[]).unwrap();
    let json = serde_json::to_string(&slots).unwrap();
    assert_eq!(
        json,
        r#"[{"startUtc":"2026-03-16T09:00:00Z","endUtc":"2026-03-16T09:30:00Z","localLabel":"9:00 AM","isAvailable":true}]"#
    );
}

// ── Range queries ───────────────────────────────────────────────────────────

#[test]
fn range_has_one_entry_per_date_including_closed_days() {
    let hours = BusinessHours::new("UTC")
        .with_day(Weekday::Mon, DayHours::parse("09:00", "10:00").unwrap())
        .with_day(Weekday::Wed, DayHours::parse("09:00", "11:00").unwrap());
    let bookings = vec![ExistingBooking::new(
        utc(2026, 3, 16, 9, 0),
        utc(2026, 3, 16, 10, 0),
    )];

    // Monday 16th through Sunday 22nd.
    let days = generate_slots_for_range(
        "2026-03-16",
        "2026-03-22",
        &hours,
        60,
        &bookings,
        DstPolicy::default(),
    )
    .unwrap();

    assert_eq!(days.len(), 7);
    assert_eq!(days[0].ymd.to_string(), "2026-03-16");
    assert_eq!(days[6].ymd.to_string(), "2026-03-22");

    let counts: Vec<usize> = days.iter().map(|d| d.slots.len()).collect();
    assert_eq!(counts, [1, 0, 2, 0, 0, 0, 0]);

    // Monday's only slot is booked.
    assert!(!days[0].has_availability());
    assert!(days[2].has_availability());
}

#[test]
fn single_day_range_matches_generate_slots() {
    let hours = hours_in("America/Denver", Weekday::Thu, "08:00", "12:00");
    let direct = generate_slots("2026-03-19", &hours, 45, &[]).unwrap();
    let ranged = generate_slots_for_range(
        "2026-03-19",
        "2026-03-19",
        &hours,
        45,
        &[],
        DstPolicy::default(),
    )
    .unwrap();

    assert_eq!(ranged.len(), 1);
    assert_eq!(ranged[0].slots, direct);
}

#[test]
fn range_rejects_reversed_and_oversized_ranges() {
    let hours = hours_in("UTC", Weekday::Mon, "09:00", "10:00");

    let reversed = generate_slots_for_range(
        "2026-03-20",
        "2026-03-16",
        &hours,
        30,
        &[],
        DstPolicy::default(),
    );
    assert!(matches!(reversed, Err(SlotError::InvalidArgument(_))));

    let oversized = generate_slots_for_range(
        "2026-01-01",
        "2026-12-31",
        &hours,
        30,
        &[],
        DstPolicy::default(),
    );
    assert!(matches!(oversized, Err(SlotError::InvalidArgument(_))));

    // Exactly MAX_RANGE_DAYS is accepted: Jan 1 + 61 days = Mar 3.
    assert_eq!(MAX_RANGE_DAYS, 62);
    let max = generate_slots_for_range(
        "2026-01-01",
        "2026-03-03",
        &hours,
        30,
        &[],
        DstPolicy::default(),
    )
    .unwrap();
    assert_eq!(max.len(), 62);
}
