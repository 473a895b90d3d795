//! BookingSearch - A validated hotel/tour/transport search request

use serde::{Deserialize, Serialize};

use crate::domain::entities::{DatePair, SearchQuery};
use crate::domain::value_objects::{Occupancy, SearchDomain};

/// Search request ready to hand to a booking provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSearch {
    pub domain: SearchDomain,
    pub location: String,
    pub dates: DatePair,
    pub occupancy: Occupancy,
}

impl BookingSearch {
    /// Cache key for this request
    pub fn query(&self) -> SearchQuery {
        SearchQuery::booking(self.domain, &self.location, &self.dates, &self.occupancy)
    }
}
