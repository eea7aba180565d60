//! Reservations as seen by the slot engine.
//!
//! The engine reads only the `[start, end)` interval of a reservation. Which
//! reservations hold the barber's time is decided by the caller; the
//! [`blocking_reservations`] helper applies the usual rule (everything except
//! cancelled bookings).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An occupied interval on a barber's agenda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Reservation {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Confirmed and waiting to happen.
    #[default]
    Pending,
    /// The client did not show up.
    NoShow,
    /// The service is being performed right now.
    InProgress,
    /// The service was completed.
    Finished,
    /// Cancelled by the client or an admin before it took place.
    Cancelled,
}

impl ReservationStatus {
    /// Whether a reservation in this state keeps the barber's time occupied.
    pub fn blocks_time(&self) -> bool {
        !matches!(self, ReservationStatus::Cancelled)
    }
}

/// A reservation together with its status, as returned by booking storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub status: ReservationStatus,
}

impl ReservationRecord {
    pub fn reservation(&self) -> Reservation {
        Reservation::new(self.start, self.end)
    }
}

/// Keep only the records whose status holds the barber's time.
pub fn blocking_reservations(records: &[ReservationRecord]) -> Vec<Reservation> {
    records
        .iter()
        .filter(|r| r.status.blocks_time())
        .map(ReservationRecord::reservation)
        .collect()
}
