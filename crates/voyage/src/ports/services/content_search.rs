//! Content Search Service Port
//!
//! Abstract interface for the remote content search provider.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, ResultItem};

/// Service interface for content search operations
#[async_trait]
pub trait ContentSearchService: Send + Sync {
    /// Search content for a query across the given sources.
    ///
    /// Provider failures come back as `DomainError::FetchFailed` with a
    /// message fit for showing to the user.
    async fn search_content(
        &self,
        query: &str,
        sources: &[String],
    ) -> Result<Vec<ResultItem>, DomainError>;
}
