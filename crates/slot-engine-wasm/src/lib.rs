//! WASM bindings for slot-engine.
//!
//! Exposes working-day lookup, time slot computation (flat or split into
//! morning/afternoon tabs) and the upcoming date strip to the booking UI via
//! `wasm-bindgen`. Complex types cross the boundary as JSON strings.
//!
//! Inputs are validated here, before the engine runs: schedules must pass
//! [`WeeklySchedule::validate`] and a zero duration is rejected. The engine
//! itself asserts these preconditions and would otherwise panic.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use slot_engine::{DayPeriod, ReservationRecord, TimeSlot, WeeklySchedule};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct TimeSlotDto {
    start: String,
    end: String,
    label: String,
}

impl From<&TimeSlot> for TimeSlotDto {
    fn from(s: &TimeSlot) -> Self {
        Self {
            start: s.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            end: s.end.format("%Y-%m-%dT%H:%M:%S").to_string(),
            label: s.label.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PeriodSlotsDto {
    default_period: DayPeriod,
    morning: Vec<TimeSlotDto>,
    afternoon: Vec<TimeSlotDto>,
}

// ---------------------------------------------------------------------------
// Helpers: parse and validate boundary inputs
// ---------------------------------------------------------------------------

/// Parse a calendar date.
///
/// Accepts `"YYYY-MM-DD"` as well as a local datetime (`"YYYY-MM-DDTHH:MM:SS"`,
/// optionally with fractional seconds), whose time part is ignored.
fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

/// Parse and validate a JSON array of day schedules.
fn parse_schedule_json(json: &str) -> Result<WeeklySchedule, JsValue> {
    let schedule: WeeklySchedule = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid schedule JSON: {}", e)))?;
    schedule
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(schedule)
}

/// Parse a JSON array of `{start, end, status?}` reservations, keeping only
/// the ones that hold the barber's time.
fn parse_reservations_json(json: &str) -> Result<Vec<slot_engine::Reservation>, JsValue> {
    let records: Vec<ReservationRecord> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid reservations JSON: {}", e)))?;
    Ok(slot_engine::blocking_reservations(&records))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Whether the barber works on `date` according to `schedule_json`.
#[wasm_bindgen(js_name = "isWorkingDay")]
pub fn is_working_day(schedule_json: &str, date: &str) -> Result<bool, JsValue> {
    let schedule = parse_schedule_json(schedule_json)?;
    let date = parse_date(date)?;
    Ok(slot_engine::is_working_day(&schedule, date))
}

/// Compute bookable slots for a service on a date.
///
/// `reservations_json` is a JSON array of `{start, end, status?}` objects with
/// local datetime strings; cancelled entries are ignored. Returns a JSON array
/// of `{start, end, label}` objects.
#[wasm_bindgen(js_name = "computeTimeSlots")]
pub fn compute_time_slots(
    schedule_json: &str,
    date: &str,
    duration_minutes: u32,
    reservations_json: &str,
) -> Result<String, JsValue> {
    let slots = slots_for(schedule_json, date, duration_minutes, reservations_json)?;
    let dtos: Vec<TimeSlotDto> = slots.iter().map(TimeSlotDto::from).collect();

    to_json(&dtos)
}

/// Compute bookable slots and split them into the morning/afternoon tabs.
///
/// Takes the same arguments as `computeTimeSlots`. Returns a JSON object
/// `{defaultPeriod, morning, afternoon}`, where `defaultPeriod` is
/// `"afternoon"` only when the morning has no slots and the afternoon does.
#[wasm_bindgen(js_name = "computeTimeSlotsByPeriod")]
pub fn compute_time_slots_by_period(
    schedule_json: &str,
    date: &str,
    duration_minutes: u32,
    reservations_json: &str,
) -> Result<String, JsValue> {
    let slots = slots_for(schedule_json, date, duration_minutes, reservations_json)?;
    let periods = slot_engine::partition_by_period(&slots);

    to_json(&PeriodSlotsDto {
        default_period: periods.default_period(),
        morning: periods.morning.iter().map(TimeSlotDto::from).collect(),
        afternoon: periods.afternoon.iter().map(TimeSlotDto::from).collect(),
    })
}

/// Validate the inputs shared by the slot exports and run the engine.
fn slots_for(
    schedule_json: &str,
    date: &str,
    duration_minutes: u32,
    reservations_json: &str,
) -> Result<Vec<TimeSlot>, JsValue> {
    if duration_minutes == 0 {
        return Err(JsValue::from_str("Service duration must be positive"));
    }

    let schedule = parse_schedule_json(schedule_json)?;
    let date = parse_date(date)?;
    let reservations = parse_reservations_json(reservations_json)?;

    Ok(slot_engine::compute_time_slots(
        &schedule,
        date,
        duration_minutes,
        &reservations,
    ))
}

/// The next `count` dates from `from`, flagged with whether the barber works.
///
/// Returns a JSON array of `{date, isWorkingDay}` objects.
#[wasm_bindgen(js_name = "upcomingDays")]
pub fn upcoming_days(schedule_json: &str, from: &str, count: u32) -> Result<String, JsValue> {
    let schedule = parse_schedule_json(schedule_json)?;
    let from = parse_date(from)?;

    to_json(&slot_engine::upcoming_days(&schedule, from, count as usize))
}

/// Render a service duration in minutes as `"1h 30min"`, `"1h"` or `"45 min"`.
#[wasm_bindgen(js_name = "formatDuration")]
pub fn format_duration(minutes: u32) -> String {
    slot_engine::format_duration(minutes)
}

// Only success paths are exercised here: building a `JsValue` needs a wasm
// host, so error cases are covered through the engine crate instead.
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const SCHEDULE: &str = r#"[
        {"dayOfWeek": 1, "shifts": [{"start": "11:00", "end": "12:00"}, {"start": "14:00", "end": "15:00"}]},
        {"dayOfWeek": 2, "shifts": []}
    ]"#;

    fn labels(value: &Value) -> Vec<&str> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["label"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn date_only_and_datetime_resolve_to_same_day() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        assert_eq!(parse_date("2026-03-16").unwrap(), expected);
        assert_eq!(parse_date("2026-03-16T18:45:00").unwrap(), expected);
        assert_eq!(parse_date("2026-03-16T18:45:00.123").unwrap(), expected);
    }

    #[test]
    fn working_day_lookup() {
        assert!(is_working_day(SCHEDULE, "2026-03-16").unwrap());
        assert!(!is_working_day(SCHEDULE, "2026-03-17T09:00:00").unwrap());
    }

    #[test]
    fn cancelled_reservation_does_not_block() {
        let reservations = r#"[
            {"start": "2026-03-16T11:00:00", "end": "2026-03-16T11:30:00", "status": "cancelled"},
            {"start": "2026-03-16T14:00:00", "end": "2026-03-16T14:30:00"}
        ]"#;

        let json = compute_time_slots(SCHEDULE, "2026-03-16", 30, reservations).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            labels(&value),
            vec!["11:00", "11:10", "11:20", "11:30", "14:30"]
        );
        assert_eq!(value[0]["start"], "2026-03-16T11:00:00");
        assert_eq!(value[0]["end"], "2026-03-16T11:30:00");
    }

    #[test]
    fn slots_split_by_period() {
        let json = compute_time_slots_by_period(SCHEDULE, "2026-03-16", 30, "[]").unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["defaultPeriod"], "morning");
        assert_eq!(labels(&value["morning"]), vec!["11:00", "11:10", "11:20", "11:30"]);
        assert_eq!(labels(&value["afternoon"]), vec!["14:00", "14:10", "14:20", "14:30"]);
    }

    #[test]
    fn afternoon_tab_when_morning_is_booked() {
        let reservations = r#"[{"start": "2026-03-16T10:00:00", "end": "2026-03-16T12:00:00"}]"#;
        let json = compute_time_slots_by_period(SCHEDULE, "2026-03-16", 30, reservations).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["defaultPeriod"], "afternoon");
        assert!(value["morning"].as_array().unwrap().is_empty());
    }

    #[test]
    fn upcoming_days_use_camel_case_flag() {
        let json = upcoming_days(SCHEDULE, "2026-03-15", 3).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[1]["date"], "2026-03-16");
        let flags: Vec<bool> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["isWorkingDay"].as_bool().unwrap())
            .collect();
        assert_eq!(flags, vec![false, true, false]);
    }
}
