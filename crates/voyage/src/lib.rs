//! Voyage Domain Library
//!
//! Search result caching and booking date rules for the Voyage travel app.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure entities and rules
//!   - `entities/`: SearchQuery, ResultItem, DatePair, BookingSearch
//!   - `value_objects/`: SearchDomain, Occupancy
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `services/`: Search provider and date picker capabilities
//!
//! - **Services** (`services/`): Stateful orchestration built on the ports
//!   - `QueryResultCache`, `DateRangeGuard`, `ContentSearchFlow`, `BookingForm`
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use voyage::{ContentSearchFlow, QueryResultCache, SearchDomain};
//!
//! let cache = QueryResultCache::shared(SearchDomain::Content);
//! let flow = ContentSearchFlow::new(cache, Arc::new(provider), vec!["instagram".into()]);
//! let outcome = flow.search("Paris").await?;
//! ```

pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types
pub use domain::{
    BookingSearch, DatePair, DomainError, Occupancy, ResultItem, SearchDomain, SearchQuery,
};
pub use ports::{ContentSearchService, DatePickerHost, DatePickerResult};
pub use services::{
    BookingForm, ContentSearchFlow, DateRangeGuard, FetchOutcome, FetchTicket,
    QueryResultCache, SearchOutcome, SharedCache,
};
