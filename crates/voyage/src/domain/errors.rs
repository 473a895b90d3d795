//! Domain Errors
//!
//! Error types for domain operations.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid date range: end {end} must be after start {start}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn invalid_range(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::InvalidRange { start, end }
    }

    pub fn fetch_failed<T: AsRef<str>>(message: T) -> Self {
        Self::FetchFailed(message.as_ref().to_string())
    }

    /// Whether the user can retry the same operation unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::FetchFailed(_))
    }
}
