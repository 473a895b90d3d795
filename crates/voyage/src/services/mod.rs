//! Services
//!
//! Stateful orchestration over the domain and ports.

mod booking_form;
mod content_search_flow;
mod date_range_guard;
mod query_cache;

pub use booking_form::*;
pub use content_search_flow::*;
pub use date_range_guard::*;
pub use query_cache::*;
