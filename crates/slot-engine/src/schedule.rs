//! Weekly working schedule of a barber.
//!
//! A [`WeeklySchedule`] holds at most one [`DaySchedule`] per day of week
//! (0=Sunday … 6=Saturday). Each day carries zero or more [`Shift`]s; an empty
//! list is an explicit day off, a missing entry means the same thing.
//!
//! The engine in [`crate::slots`] assumes the schedule is well formed. Call
//! [`WeeklySchedule::validate`] where schedules enter the system (editor,
//! JSON boundary) so malformed data is rejected there.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::time::{day_of_week, TimeOfDay};

/// A continuous working interval within a day. `start < end` is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Shift {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Length of the shift in minutes. Negative for an inverted shift.
    pub fn duration_minutes(&self) -> i64 {
        (self.end.as_naive_time() - self.start.as_naive_time()).num_minutes()
    }
}

/// The shifts assigned to one day of week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    /// 0 = Sunday, 1 = Monday, …, 6 = Saturday.
    pub day_of_week: u8,
    #[serde(default)]
    pub shifts: Vec<Shift>,
}

impl DaySchedule {
    pub fn new(day_of_week: u8, shifts: Vec<Shift>) -> Self {
        Self {
            day_of_week,
            shifts,
        }
    }

    pub fn day_off(day_of_week: u8) -> Self {
        Self::new(day_of_week, Vec::new())
    }

    pub fn is_day_off(&self) -> bool {
        self.shifts.is_empty()
    }
}

/// The recurring weekly availability template of a barber.
///
/// Serialized as a plain JSON array of day entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    days: Vec<DaySchedule>,
}

impl WeeklySchedule {
    pub fn new(days: Vec<DaySchedule>) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    /// The entry for a day-of-week index, if one exists.
    pub fn day(&self, day_of_week: u8) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.day_of_week == day_of_week)
    }

    /// Shifts that apply on a calendar date. Empty when the barber is off.
    pub fn shifts_on(&self, date: NaiveDate) -> &[Shift] {
        self.day(day_of_week(date))
            .map(|d| d.shifts.as_slice())
            .unwrap_or(&[])
    }

    /// Check the invariants the slot engine relies on.
    ///
    /// # Errors
    /// - `SlotError::InvalidDayOfWeek` if an entry uses an index above 6.
    /// - `SlotError::DuplicateDay` if two entries share a day of week.
    /// - `SlotError::InvalidShift` if a shift does not start before it ends.
    ///
    /// Shift ordering within a day is not checked.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for day in &self.days {
            if day.day_of_week > 6 {
                return Err(SlotError::InvalidDayOfWeek(day.day_of_week));
            }
            if !seen.insert(day.day_of_week) {
                return Err(SlotError::DuplicateDay(day.day_of_week));
            }
            if let Some(shift) = day.shifts.iter().find(|s| !s.is_valid()) {
                return Err(SlotError::InvalidShift {
                    day_of_week: day.day_of_week,
                    start: shift.start.to_string(),
                    end: shift.end.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Build a schedule from the flat shift list produced by the schedule
    /// editor (`{"dayOfWeek": "MONDAY", "startTime": "09:00", "endTime": "17:00"}`).
    ///
    /// Days are ordered Sunday through Saturday; shifts keep their request order
    /// within a day. Days without any request get no entry.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidDayName` for an unknown day name, or any
    /// error from [`WeeklySchedule::validate`].
    pub fn from_shift_requests(requests: &[ShiftRequest]) -> Result<Self> {
        let mut buckets: [Vec<Shift>; 7] = Default::default();

        for request in requests {
            let index = parse_day_name(&request.day_of_week)?;
            buckets[index as usize].push(Shift::new(request.start_time, request.end_time));
        }

        let days = buckets
            .into_iter()
            .enumerate()
            .filter(|(_, shifts)| !shifts.is_empty())
            .map(|(index, shifts)| DaySchedule::new(index as u8, shifts))
            .collect();

        let schedule = Self::new(days);
        schedule.validate()?;
        Ok(schedule)
    }
}

/// One shift as emitted by the schedule editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRequest {
    /// Upper-case English day name, e.g. `"MONDAY"`.
    pub day_of_week: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

fn parse_day_name(name: &str) -> Result<u8> {
    let index = match name.trim().to_ascii_uppercase().as_str() {
        "SUNDAY" => 0,
        "MONDAY" => 1,
        "TUESDAY" => 2,
        "WEDNESDAY" => 3,
        "THURSDAY" => 4,
        "FRIDAY" => 5,
        "SATURDAY" => 6,
        _ => return Err(SlotError::InvalidDayName(name.to_string())),
    };
    Ok(index)
}
