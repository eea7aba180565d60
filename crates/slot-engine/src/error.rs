//! Error types for slot-engine parsing and validation.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid shift on day {day_of_week}: start {start} is not before end {end}")]
    InvalidShift {
        day_of_week: u8,
        start: String,
        end: String,
    },

    #[error("Invalid day of week: {0} (expected 0=Sunday through 6=Saturday)")]
    InvalidDayOfWeek(u8),

    #[error("Duplicate schedule entry for day of week {0}")]
    DuplicateDay(u8),

    #[error("Invalid day name: {0}")]
    InvalidDayName(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
