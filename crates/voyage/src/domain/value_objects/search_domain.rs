//! SearchDomain - Which search feature a cache or form belongs to

use serde::{Deserialize, Serialize};

/// Logical search feature. Each one owns at most one result cache.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SearchDomain {
    #[default]
    Content,
    Hotel,
    Tour,
    Transport,
}

impl SearchDomain {
    /// Whether searches in this domain carry a date pair
    pub fn is_booking(&self) -> bool {
        !matches!(self, SearchDomain::Content)
    }
}

impl std::fmt::Display for SearchDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchDomain::Content => write!(f, "content"),
            SearchDomain::Hotel => write!(f, "hotel"),
            SearchDomain::Tour => write!(f, "tour"),
            SearchDomain::Transport => write!(f, "transport"),
        }
    }
}

impl std::str::FromStr for SearchDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "content" => Ok(SearchDomain::Content),
            "hotel" => Ok(SearchDomain::Hotel),
            "tour" => Ok(SearchDomain::Tour),
            "transport" => Ok(SearchDomain::Transport),
            _ => Err(format!("Unknown search domain: {}", s)),
        }
    }
}
