//! Date Range Guard
//!
//! Keeps a `DatePair` consistent while start and end are edited
//! independently.

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::domain::{errors::DomainError, next_day, DatePair};

/// Transition rules for `DatePair`
pub struct DateRangeGuard;

impl DateRangeGuard {
    /// Move the start date. If end is no longer after it, end becomes
    /// `new_start` plus one calendar day at the same time of day.
    ///
    /// At the last representable day there is no next day: `end` is left
    /// equal to `new_start`, so `end > start` does not hold and
    /// `validate_for_submit` rejects the pair.
    pub fn set_start(pair: DatePair, new_start: NaiveDateTime) -> DatePair {
        let mut updated = DatePair {
            start: new_start,
            end: pair.end,
        };

        if updated.end <= new_start {
            updated.end = next_day(new_start);
            debug!(
                start = %updated.start,
                previous_end = %pair.end,
                end = %updated.end,
                "Moved end date past new start"
            );
        }

        updated
    }

    /// Move the end date as given. The picker already constrains the
    /// selectable minimum; ordering is enforced by `validate_for_submit`.
    pub fn set_end(pair: DatePair, new_end: NaiveDateTime) -> DatePair {
        if new_end <= pair.start {
            warn!(
                start = %pair.start,
                end = %new_end,
                "End date set at or before start; submit will reject it"
            );
        }

        DatePair {
            start: pair.start,
            end: new_end,
        }
    }

    /// Final check before a search is issued. Equal dates are rejected.
    pub fn validate_for_submit(pair: &DatePair) -> Result<(), DomainError> {
        if pair.end <= pair.start {
            return Err(DomainError::invalid_range(pair.start, pair.end));
        }
        Ok(())
    }
}
