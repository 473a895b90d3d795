//! DatePair - Check-in/check-out (or departure/return) dates
//!
//! Intended invariant: `end > start`. Edits go through `DateRangeGuard`,
//! which restores it when `start` moves, except at the last representable
//! day. `DateRangeGuard::validate_for_submit` is the final check.

use chrono::{Days, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Start/end date pair owned by a single search form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePair {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DatePair {
    /// Build a pair as given, without checking order
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// `start` and the same wall-clock time one day later
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: next_day(start),
        }
    }

    /// Pair starting now (local wall clock)
    pub fn now() -> Self {
        Self::starting_at(Local::now().naive_local())
    }

    /// `end` strictly after `start`
    pub fn is_ordered(&self) -> bool {
        self.end > self.start
    }

    /// Whole calendar days between start and end dates
    pub fn nights(&self) -> i64 {
        (self.end.date() - self.start.date()).num_days()
    }
}

impl Default for DatePair {
    fn default() -> Self {
        Self::now()
    }
}

/// Same time of day, one calendar day later.
///
/// Saturates at the maximum representable date; the resulting pair is then
/// rejected by `DateRangeGuard::validate_for_submit`.
pub fn next_day(at: NaiveDateTime) -> NaiveDateTime {
    at.checked_add_days(Days::new(1)).unwrap_or(at)
}
