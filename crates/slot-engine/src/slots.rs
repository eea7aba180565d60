//! Bookable time slot generation.
//!
//! For each shift of the requested day, candidate start times are generated
//! every [`SLOT_STEP_MINUTES`] from the shift opening. A candidate is offered
//! when the whole service fits before the shift closes and it does not overlap
//! any existing reservation. The step is independent of the service duration,
//! so consecutive offered slots may overlap each other: they are alternatives,
//! and picking one is the booking flow's business.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::conflict::conflicts_with_any;
use crate::reservation::Reservation;
use crate::schedule::{Shift, WeeklySchedule};
use crate::time::{day_of_week, format_label};

/// Distance between two consecutive candidate start times.
pub const SLOT_STEP_MINUTES: i64 = 10;

/// Number of days shown in the date strip by default.
pub const DEFAULT_UPCOMING_DAYS: usize = 15;

/// A bookable interval of exactly the requested service duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Start time formatted as `"HH:mm"`.
    pub label: String,
}

impl TimeSlot {
    /// The part of the day this slot starts in.
    pub fn period(&self) -> DayPeriod {
        if self.start.hour() < AFTERNOON_START_HOUR {
            DayPeriod::Morning
        } else {
            DayPeriod::Afternoon
        }
    }
}

/// First hour counted as afternoon.
pub const AFTERNOON_START_HOUR: u32 = 12;

/// Tabs the booking grid groups slots under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DayPeriod {
    /// Slots starting before 12:00.
    Morning,
    /// Slots starting at 12:00 or later.
    Afternoon,
}

/// Slots split by the period they start in, each half in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSlots {
    pub morning: Vec<TimeSlot>,
    pub afternoon: Vec<TimeSlot>,
}

impl PeriodSlots {
    /// The period to show first: afternoon only when the morning is empty and
    /// the afternoon is not, morning otherwise.
    pub fn default_period(&self) -> DayPeriod {
        if self.morning.is_empty() && !self.afternoon.is_empty() {
            DayPeriod::Afternoon
        } else {
            DayPeriod::Morning
        }
    }
}

/// Split slots into morning and afternoon by their start hour.
pub fn partition_by_period(slots: &[TimeSlot]) -> PeriodSlots {
    let (morning, afternoon) = slots
        .iter()
        .cloned()
        .partition(|slot| slot.period() == DayPeriod::Morning);
    PeriodSlots { morning, afternoon }
}

/// A calendar date flagged with whether the barber works on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_working_day: bool,
}

/// Whether the schedule has at least one shift on the weekday of `date`.
///
/// Returns `false` both when the weekday has no entry and when its entry has
/// an empty shift list.
pub fn is_working_day(schedule: &WeeklySchedule, date: NaiveDate) -> bool {
    !schedule.shifts_on(date).is_empty()
}

/// Compute the bookable slots for a service on a given date.
///
/// Slots are returned shift by shift in the order the shifts are listed, each
/// shift's slots in chronological order. No global sort is applied.
///
/// # Preconditions
/// - Shifts within a day are listed chronologically and do not overlap. This
///   is not checked; violating it only changes the output order.
/// - `existing_reservations` contains exactly the reservations that should
///   block time (see [`crate::reservation::blocking_reservations`]).
///
/// # Panics
/// Panics if `service_duration_minutes` is zero, or if a shift of the
/// requested day does not start before it ends. Validate schedules with
/// [`WeeklySchedule::validate`] where they enter the system.
pub fn compute_time_slots(
    schedule: &WeeklySchedule,
    date: NaiveDate,
    service_duration_minutes: u32,
    existing_reservations: &[Reservation],
) -> Vec<TimeSlot> {
    assert!(
        service_duration_minutes > 0,
        "service duration must be positive"
    );

    let shifts = schedule.shifts_on(date);
    if shifts.is_empty() {
        debug!(%date, day_of_week = day_of_week(date), "not a working day");
        return Vec::new();
    }

    let mut slots = Vec::new();

    for shift in shifts {
        let before = slots.len();

        slots.extend(
            shift_candidates(date, shift, service_duration_minutes)
                .filter(|&(start, end)| !conflicts_with_any(start, end, existing_reservations))
                .map(|(start, end)| TimeSlot {
                    start,
                    end,
                    label: format_label(start),
                }),
        );

        trace!(
            %date,
            shift_start = %shift.start,
            shift_end = %shift.end,
            offered = slots.len() - before,
            "generated slots for shift"
        );
    }

    debug!(
        %date,
        duration = service_duration_minutes,
        reservations = existing_reservations.len(),
        slots = slots.len(),
        "computed time slots"
    );

    slots
}

/// Every candidate `(start, end)` interval of a shift, before conflict filtering.
///
/// Starts at the shift opening and advances by [`SLOT_STEP_MINUTES`] until the
/// next candidate would end after the shift closes.
///
/// # Panics
/// Panics if `service_duration_minutes` is zero or if `shift.start >= shift.end`.
pub fn shift_candidates(
    date: NaiveDate,
    shift: &Shift,
    service_duration_minutes: u32,
) -> impl Iterator<Item = (NaiveDateTime, NaiveDateTime)> {
    assert!(
        service_duration_minutes > 0,
        "service duration must be positive"
    );
    assert!(
        shift.is_valid(),
        "shift {}-{} does not start before it ends",
        shift.start,
        shift.end
    );

    let shift_start = shift.start.on(date);
    let shift_end = shift.end.on(date);
    let duration = Duration::minutes(i64::from(service_duration_minutes));
    let step = Duration::minutes(SLOT_STEP_MINUTES);

    std::iter::successors(Some(shift_start), move |&start| Some(start + step))
        .map(move |start| (start, start + duration))
        .take_while(move |&(_, end)| end <= shift_end)
}

/// The next `count` dates starting at `from`, each flagged with
/// [`is_working_day`]. Used to disable non-working days in a date picker.
pub fn upcoming_days(schedule: &WeeklySchedule, from: NaiveDate, count: usize) -> Vec<CalendarDay> {
    from.iter_days()
        .take(count)
        .map(|date| CalendarDay {
            date,
            is_working_day: is_working_day(schedule, date),
        })
        .collect()
}
