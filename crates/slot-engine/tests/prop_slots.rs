//! Property-based tests for slot generation using proptest.
//!
//! These verify invariants that should hold for *any* well-formed schedule,
//! duration and reservation set, not just the scenarios in `slots_tests.rs`.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use slot_engine::slots::{shift_candidates, SLOT_STEP_MINUTES};
use slot_engine::{
    compute_time_slots, is_working_day, DaySchedule, Reservation, Shift, TimeOfDay, WeeklySchedule,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn minute_to_time(minute: u32) -> TimeOfDay {
    TimeOfDay::new(minute / 60, minute % 60).unwrap()
}

/// A valid shift with start < end, on a 5-minute grid within one day.
fn arb_shift() -> impl Strategy<Value = Shift> {
    (0u32..282, 1u32..=96).prop_map(|(start_slot, len_slots)| {
        let start = start_slot * 5;
        let end = (start + len_slots * 5).min(23 * 60 + 59);
        Shift::new(minute_to_time(start), minute_to_time(end.max(start + 1)))
    })
}

/// One to three chronologically ordered, non-overlapping shifts.
fn arb_day_shifts() -> impl Strategy<Value = Vec<Shift>> {
    prop::collection::vec(arb_shift(), 1..=3).prop_map(|mut shifts| {
        shifts.sort_by_key(|s| s.start);
        let mut ordered: Vec<Shift> = Vec::new();
        for s in shifts {
            match ordered.last() {
                Some(prev) if s.start < prev.end => continue,
                _ => ordered.push(s),
            }
        }
        ordered
    })
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2025i32..=2027, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_duration() -> impl Strategy<Value = u32> {
    1u32..=180
}

/// Reservations anywhere within the target date.
fn arb_reservations(date: NaiveDate) -> impl Strategy<Value = Vec<Reservation>> {
    prop::collection::vec((0i64..1380, 5i64..=120), 0..6).prop_map(move |raw| {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap();
        raw.into_iter()
            .map(|(offset, len)| {
                let start = midnight + Duration::minutes(offset);
                Reservation::new(start, start + Duration::minutes(len))
            })
            .collect()
    })
}

fn arb_inputs() -> impl Strategy<Value = (NaiveDate, Vec<Shift>, u32, Vec<Reservation>)> {
    (arb_date(), arb_day_shifts(), arb_duration()).prop_flat_map(|(date, shifts, duration)| {
        (
            Just(date),
            Just(shifts),
            Just(duration),
            arb_reservations(date),
        )
    })
}

fn schedule_for(date: NaiveDate, shifts: Vec<Shift>) -> WeeklySchedule {
    let dow = slot_engine::time::day_of_week(date);
    WeeklySchedule::new(vec![DaySchedule::new(dow, shifts)])
}

fn shift_bounds(date: NaiveDate, shift: &Shift) -> (NaiveDateTime, NaiveDateTime) {
    (shift.start.on(date), shift.end.on(date))
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn day_off_never_yields_slots(
        (date, _, duration, reservations) in arb_inputs()
    ) {
        let dow = slot_engine::time::day_of_week(date);
        let off = WeeklySchedule::new(vec![DaySchedule::day_off(dow)]);
        prop_assert!(!is_working_day(&off, date));
        prop_assert!(compute_time_slots(&off, date, duration, &reservations).is_empty());
    }

    #[test]
    fn every_slot_has_exact_duration(
        (date, shifts, duration, reservations) in arb_inputs()
    ) {
        let schedule = schedule_for(date, shifts);
        for slot in compute_time_slots(&schedule, date, duration, &reservations) {
            prop_assert_eq!(slot.end - slot.start, Duration::minutes(i64::from(duration)));
        }
    }

    #[test]
    fn every_slot_fits_inside_a_shift(
        (date, shifts, duration, reservations) in arb_inputs()
    ) {
        let schedule = schedule_for(date, shifts.clone());
        for slot in compute_time_slots(&schedule, date, duration, &reservations) {
            let inside = shifts.iter().any(|s| {
                let (start, end) = shift_bounds(date, s);
                slot.start >= start && slot.end <= end
            });
            prop_assert!(inside, "slot {} escapes every shift", slot.label);
        }
    }

    #[test]
    fn no_slot_overlaps_a_reservation(
        (date, shifts, duration, reservations) in arb_inputs()
    ) {
        let schedule = schedule_for(date, shifts);
        for slot in compute_time_slots(&schedule, date, duration, &reservations) {
            for r in &reservations {
                prop_assert!(
                    !(slot.start < r.end && slot.end > r.start),
                    "slot {} overlaps reservation {:?}", slot.label, r
                );
            }
        }
    }

    #[test]
    fn computation_is_idempotent(
        (date, shifts, duration, reservations) in arb_inputs()
    ) {
        let schedule = schedule_for(date, shifts);
        let first = compute_time_slots(&schedule, date, duration, &reservations);
        let second = compute_time_slots(&schedule, date, duration, &reservations);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn candidates_step_by_ten_minutes(
        date in arb_date(),
        shift in arb_shift(),
        duration in arb_duration(),
    ) {
        let (shift_start, _) = shift_bounds(date, &shift);
        let starts: Vec<NaiveDateTime> =
            shift_candidates(date, &shift, duration).map(|(s, _)| s).collect();

        if let Some(first) = starts.first() {
            prop_assert_eq!(*first, shift_start);
        }
        for pair in starts.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], Duration::minutes(SLOT_STEP_MINUTES));
        }
    }

    #[test]
    fn without_reservations_every_candidate_is_offered(
        (date, shifts, duration, _) in arb_inputs()
    ) {
        let schedule = schedule_for(date, shifts.clone());
        let expected: usize = shifts
            .iter()
            .map(|s| shift_candidates(date, s, duration).count())
            .sum();
        prop_assert_eq!(compute_time_slots(&schedule, date, duration, &[]).len(), expected);
    }

    #[test]
    fn shift_order_is_preserved(
        (date, shifts, duration, reservations) in arb_inputs()
    ) {
        let schedule = schedule_for(date, shifts);
        let slots = compute_time_slots(&schedule, date, duration, &reservations);
        for pair in slots.windows(2) {
            prop_assert!(pair[0].start < pair[1].start);
        }
    }
}
