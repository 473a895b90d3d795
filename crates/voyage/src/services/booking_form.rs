//! Booking Form
//!
//! State behind one hotel, tour or transport search form: location, date
//! pair and occupancy. Dates are edited directly or through a
//! `DatePickerHost`, and `submit` produces the search request.

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use crate::domain::{
    errors::DomainError, next_day, BookingSearch, DatePair, Occupancy, SearchDomain,
};
use crate::ports::{DatePickerHost, DatePickerResult};
use crate::services::DateRangeGuard;

/// Search form for one booking domain
#[derive(Debug, Clone)]
pub struct BookingForm {
    domain: SearchDomain,
    location: String,
    dates: DatePair,
    occupancy: Occupancy,
    earliest: NaiveDateTime,
}

impl BookingForm {
    /// Form starting now, ending tomorrow, with default occupancy
    pub fn new(domain: SearchDomain) -> Result<Self, DomainError> {
        Self::starting_at(domain, Local::now().naive_local())
    }

    /// Form whose dates default to `now` / `now` + 1 day. `now` is also
    /// the earliest start the picker offers.
    pub fn starting_at(domain: SearchDomain, now: NaiveDateTime) -> Result<Self, DomainError> {
        if !domain.is_booking() {
            return Err(DomainError::Validation(format!(
                "{} search has no booking form",
                domain
            )));
        }

        Ok(Self {
            domain,
            location: String::new(),
            dates: DatePair::starting_at(now),
            occupancy: Occupancy::default(),
            earliest: now,
        })
    }

    pub fn domain(&self) -> SearchDomain {
        self.domain
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn dates(&self) -> &DatePair {
        &self.dates
    }

    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    pub fn occupancy_mut(&mut self) -> &mut Occupancy {
        &mut self.occupancy
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn set_occupancy(&mut self, occupancy: Occupancy) {
        self.occupancy = occupancy;
    }

    pub fn set_start(&mut self, start: NaiveDateTime) {
        self.dates = DateRangeGuard::set_start(self.dates, start);
    }

    pub fn set_end(&mut self, end: NaiveDateTime) {
        self.dates = DateRangeGuard::set_end(self.dates, end);
    }

    /// Ask the host for a start date. Returns whether the dates changed.
    pub async fn pick_start(&mut self, picker: &dyn DatePickerHost) -> bool {
        match picker.pick_date(self.dates.start, self.earliest).await {
            DatePickerResult::Picked(start) => {
                self.set_start(start);
                true
            }
            DatePickerResult::Cancelled => {
                debug!(domain = %self.domain, "Start date picker cancelled");
                false
            }
        }
    }

    /// Ask the host for an end date no earlier than the day after start
    pub async fn pick_end(&mut self, picker: &dyn DatePickerHost) -> bool {
        let min = next_day(self.dates.start);
        match picker.pick_date(self.dates.end, min).await {
            DatePickerResult::Picked(end) => {
                self.set_end(end);
                true
            }
            DatePickerResult::Cancelled => {
                debug!(domain = %self.domain, "End date picker cancelled");
                false
            }
        }
    }

    /// Validate and build the search request
    pub fn submit(&self) -> Result<BookingSearch, DomainError> {
        let location = self.location.trim();
        if location.is_empty() {
            return Err(DomainError::Validation(format!(
                "{} search needs a location",
                self.domain
            )));
        }
        DateRangeGuard::validate_for_submit(&self.dates)?;

        let search = BookingSearch {
            domain: self.domain,
            location: location.to_string(),
            dates: self.dates,
            occupancy: self.occupancy,
        };

        info!(
            domain = %self.domain,
            location = %search.location,
            start = %search.dates.start,
            end = %search.dates.end,
            guests = search.occupancy.guests(),
            "Booking search submitted"
        );

        Ok(search)
    }
}
