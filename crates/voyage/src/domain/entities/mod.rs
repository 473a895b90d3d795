//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - SearchQuery: Cache key for a search request
//! - ResultItem: One entry of a content search result set
//! - DatePair: Start/end dates with an ordering invariant
//! - BookingSearch: A validated hotel/tour/transport search request

mod booking_search;
mod date_pair;
mod result_item;
mod search_query;

pub use booking_search::*;
pub use date_pair::*;
pub use result_item::*;
pub use search_query::*;
