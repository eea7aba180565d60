//! Detect overlaps between a proposed interval and existing reservations.
//!
//! Intervals are half-open: `[start, end)`. Two intervals overlap iff
//! `a.start < b.end && a.end > b.start`, so a booking that ends exactly when
//! another starts is NOT a conflict.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::reservation::Reservation;

/// A reservation that collides with a proposed interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub reservation: Reservation,
    pub overlap_minutes: i64,
}

/// Half-open interval overlap test.
pub fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Whether `[start, end)` overlaps any of the given reservations.
pub fn conflicts_with_any(
    start: NaiveDateTime,
    end: NaiveDateTime,
    reservations: &[Reservation],
) -> bool {
    reservations
        .iter()
        .any(|r| overlaps(start, end, r.start, r.end))
}

/// List every reservation overlapping `[start, end)`, in input order.
///
/// The overlap duration is `min(end, r.end) - max(start, r.start)`.
pub fn find_conflicts(
    start: NaiveDateTime,
    end: NaiveDateTime,
    reservations: &[Reservation],
) -> Vec<Conflict> {
    reservations
        .iter()
        .filter(|r| overlaps(start, end, r.start, r.end))
        .map(|r| {
            let overlap_start = start.max(r.start);
            let overlap_end = end.min(r.end);
            Conflict {
                reservation: *r,
                overlap_minutes: (overlap_end - overlap_start).num_minutes(),
            }
        })
        .collect()
}
