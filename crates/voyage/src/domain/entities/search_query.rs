//! SearchQuery - Opaque cache key for a search request

use serde::{Deserialize, Serialize};

use crate::domain::entities::DatePair;
use crate::domain::value_objects::{Occupancy, SearchDomain};

const KEY_SEPARATOR: &str = "|";
const KEY_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Search request key. Two queries are the same request iff their keys match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Composite key for a booking search (location + dates + guests)
    pub fn booking(
        domain: SearchDomain,
        location: &str,
        dates: &DatePair,
        occupancy: &Occupancy,
    ) -> Self {
        let key = [
            domain.to_string(),
            location.trim().to_lowercase(),
            dates.start.format(KEY_DATE_FORMAT).to_string(),
            dates.end.format(KEY_DATE_FORMAT).to_string(),
            format!(
                "{}-{}-{}",
                occupancy.adults(),
                occupancy.children(),
                occupancy.rooms()
            ),
        ]
        .join(KEY_SEPARATOR);

        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SearchQuery {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SearchQuery {
    fn from(value: String) -> Self {
        Self(value)
    }
}
