//! # slot-engine
//!
//! Deterministic appointment slot calculation for barbershop booking.
//!
//! Given a barber's recurring weekly schedule, a target date, the duration of
//! the requested service and the reservations already on the barber's agenda,
//! the engine computes which start times can still be offered to a client.
//! Everything here is a pure function over caller-supplied values: no I/O, no
//! clock reads, no caching.
//!
//! ## Modules
//!
//! - [`slots`] — Working-day lookup, time slot generation, morning/afternoon split
//! - [`conflict`] — Half-open interval overlap checks against reservations
//! - [`schedule`] — Weekly schedule model and boundary validation
//! - [`reservation`] — Reservations as consumed by the engine, status filtering
//! - [`time`] — Time-of-day type, date/time combination, label formatting
//! - [`error`] — Error types

pub mod conflict;
pub mod error;
pub mod reservation;
pub mod schedule;
pub mod slots;
pub mod time;

pub use conflict::{conflicts_with_any, find_conflicts, Conflict};
pub use error::SlotError;
pub use reservation::{blocking_reservations, Reservation, ReservationRecord, ReservationStatus};
pub use schedule::{DaySchedule, Shift, ShiftRequest, WeeklySchedule};
pub use slots::{
    compute_time_slots, is_working_day, partition_by_period, upcoming_days, CalendarDay, DayPeriod,
    PeriodSlots, TimeSlot,
};
pub use time::{format_duration, TimeOfDay};
