//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod occupancy;
mod search_domain;

pub use occupancy::*;
pub use search_domain::*;
