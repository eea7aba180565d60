//! Time arithmetic helpers.
//!
//! Shifts are expressed as wall-clock [`TimeOfDay`] values; reservations and
//! slots are absolute [`NaiveDateTime`] instants. [`TimeOfDay::on`] is the only
//! way to go from the former to the latter. No timezone is attached to either:
//! all values are assumed to share the caller's local representation.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// A wall-clock time of day with minute precision (seconds are always zero).
///
/// Serialized as `"HH:mm"` (24h).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Build a time of day from a 24h hour and a minute.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTime` if `hour > 23` or `minute > 59`.
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| SlotError::InvalidTime(format!("{:02}:{:02}", hour, minute)))
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Anchor this time of day on a calendar date.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.0)
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    /// Parse `"HH:mm"`. `"HH:mm:ss"` is accepted only when the seconds are zero,
    /// which is how backends usually echo `LocalTime` values.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map_err(|_| SlotError::InvalidTime(s.to_string()))?;

        if time.second() != 0 || time.nanosecond() != 0 {
            return Err(SlotError::InvalidTime(s.to_string()));
        }
        Ok(Self(time))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Day-of-week index of a date, counted from Sunday (0) to Saturday (6).
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Human-readable start label for a slot: `"HH:mm"`, 24h.
pub fn format_label(instant: NaiveDateTime) -> String {
    instant.format("%H:%M").to_string()
}

/// Render a service duration for display.
///
/// `90` → `"1h 30min"`, `60` → `"1h"`, `45` → `"45 min"`, `0` → `"0 min"`.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;

    match (hours, rest) {
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}min", h, m),
    }
}
