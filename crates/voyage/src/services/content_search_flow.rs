//! Content Search Flow
//!
//! Cache check, provider call, dedup and store for the content search view.
//! The cache lock is never held across the provider call.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{errors::DomainError, ResultItem, SearchQuery};
use crate::ports::ContentSearchService;
use crate::services::{FetchOutcome, SharedCache};

/// How a search was answered
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Served from the cache without calling the provider
    Cached(Vec<ResultItem>),
    /// Fresh, deduplicated provider results
    Fetched(Vec<ResultItem>),
    /// A newer search or teardown overtook this one; nothing was stored
    Superseded,
}

impl SearchOutcome {
    pub fn items(&self) -> &[ResultItem] {
        match self {
            SearchOutcome::Cached(items) | SearchOutcome::Fetched(items) => items,
            SearchOutcome::Superseded => &[],
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, SearchOutcome::Cached(_))
    }
}

/// Content search wired to an injected cache and provider
pub struct ContentSearchFlow {
    cache: SharedCache,
    provider: Arc<dyn ContentSearchService>,
    sources: Vec<String>,
}

impl ContentSearchFlow {
    pub fn new(
        cache: SharedCache,
        provider: Arc<dyn ContentSearchService>,
        sources: Vec<String>,
    ) -> Self {
        Self {
            cache,
            provider,
            sources,
        }
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Run a search, answering from the cache when the query is unchanged.
    ///
    /// Provider errors are returned as `DomainError::FetchFailed`; the cache
    /// keeps its previous results so the search can be retried.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, DomainError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation(
                "Search query cannot be empty".to_string(),
            ));
        }
        let key = SearchQuery::from(trimmed);

        let ticket = {
            let mut cache = self.cache.lock().await;
            if cache.is_detached() {
                debug!(query = %key, "Search on closed view ignored");
                return Ok(SearchOutcome::Superseded);
            }
            if !cache.should_fetch(&key) {
                cache.supersede();
                info!(query = %key, count = cache.results().len(), "Serving search from cache");
                return Ok(SearchOutcome::Cached(cache.results().to_vec()));
            }
            cache.begin_fetch(key)
        };

        let response = self.provider.search_content(trimmed, &self.sources).await;

        let mut cache = self.cache.lock().await;
        match response {
            Ok(items) => match cache.complete_fetch(ticket, items) {
                FetchOutcome::Applied => {
                    info!(query = %trimmed, count = cache.results().len(), "Search results stored");
                    Ok(SearchOutcome::Fetched(cache.results().to_vec()))
                }
                FetchOutcome::Stale | FetchOutcome::Detached => Ok(SearchOutcome::Superseded),
            },
            Err(err) => {
                let outcome = cache.fail_fetch(&ticket);
                warn!(query = %trimmed, error = %err, ?outcome, "Content search failed");
                match outcome {
                    FetchOutcome::Applied => Err(into_fetch_failed(err)),
                    FetchOutcome::Stale | FetchOutcome::Detached => Ok(SearchOutcome::Superseded),
                }
            }
        }
    }

    /// Tear down: later completions for this view are dropped
    pub async fn close(&self) {
        self.cache.lock().await.detach();
    }
}

fn into_fetch_failed(err: DomainError) -> DomainError {
    match err {
        DomainError::FetchFailed(_) => err,
        other => DomainError::FetchFailed(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SearchDomain;
    use crate::services::QueryResultCache;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Provider returning canned items per query, optionally delayed
    #[derive(Default)]
    struct StubProvider {
        responses: HashMap<String, Result<Vec<ResultItem>, DomainError>>,
        delays: HashMap<String, Duration>,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn with(mut self, query: &str, ids: &[&str]) -> Self {
            let items = ids.iter().map(|id| ResultItem::new(*id, *id)).collect();
            self.responses.insert(query.to_string(), Ok(items));
            self
        }

        fn failing(mut self, query: &str, message: &str) -> Self {
            self.responses
                .insert(query.to_string(), Err(DomainError::fetch_failed(message)));
            self
        }

        fn delayed(mut self, query: &str, millis: u64) -> Self {
            self.delays
                .insert(query.to_string(), Duration::from_millis(millis));
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ContentSearchService for StubProvider {
        async fn search_content(
            &self,
            query: &str,
            _sources: &[String],
        ) -> Result<Vec<ResultItem>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delays.get(query) {
                tokio::time::sleep(*delay).await;
            }
            self.responses
                .get(query)
                .cloned()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn flow(provider: Arc<StubProvider>) -> ContentSearchFlow {
        ContentSearchFlow::new(
            QueryResultCache::shared(SearchDomain::Content),
            provider,
            vec!["instagram".to_string()],
        )
    }

    fn ids(outcome: &SearchOutcome) -> Vec<&str> {
        outcome.items().iter().map(|i| i.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_repeat_query_served_from_cache() {
        let provider = Arc::new(StubProvider::default().with("Paris", &["1", "2"]));
        let flow = flow(Arc::clone(&provider));

        let first = flow.search("Paris").await.unwrap();
        assert!(matches!(first, SearchOutcome::Fetched(_)));
        assert_eq!(ids(&first), vec!["1", "2"]);

        let second = flow.search("  Paris ").await.unwrap();
        assert!(second.is_cached());
        assert_eq!(ids(&second), vec!["1", "2"]);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_new_query_fetches_and_dedups() {
        let provider = Arc::new(
            StubProvider::default()
                .with("Paris", &["1"])
                .with("London", &["a", "b", "a"]),
        );
        let flow = flow(Arc::clone(&provider));

        flow.search("Paris").await.unwrap();
        let london = flow.search("London").await.unwrap();

        assert_eq!(ids(&london), vec!["a", "b"]);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_result_is_refetched() {
        let provider = Arc::new(StubProvider::default());
        let flow = flow(Arc::clone(&provider));

        flow.search("Atlantis").await.unwrap();
        flow.search("Atlantis").await.unwrap();
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_results() {
        let provider = Arc::new(
            StubProvider::default()
                .with("Paris", &["1"])
                .failing("London", "network unreachable"),
        );
        let flow = flow(Arc::clone(&provider));

        flow.search("Paris").await.unwrap();
        let err = flow.search("London").await.unwrap_err();
        assert_eq!(err, DomainError::fetch_failed("network unreachable"));
        assert!(err.is_retryable());

        let cache = flow.cache().lock().await;
        assert!(!cache.is_loading());
        assert_eq!(cache.results().len(), 1);
        assert!(!cache.should_fetch(&SearchQuery::from("Paris")));
    }

    #[tokio::test]
    async fn test_empty_query_rejected_before_provider() {
        let provider = Arc::new(StubProvider::default());
        let flow = flow(Arc::clone(&provider));

        let err = flow.search("   ").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_late_response_does_not_overwrite_newer() {
        let provider = Arc::new(
            StubProvider::default()
                .with("Paris", &["p1"])
                .delayed("Paris", 50)
                .with("London", &["l1"]),
        );
        let flow = flow(Arc::clone(&provider));

        let (paris, london) = tokio::join!(flow.search("Paris"), flow.search("London"));

        assert_eq!(paris.unwrap(), SearchOutcome::Superseded);
        assert_eq!(ids(&london.unwrap()), vec!["l1"]);

        let cache = flow.cache().lock().await;
        assert_eq!(cache.last_query(), Some(&SearchQuery::from("London")));
        assert_eq!(cache.results()[0].id, "l1");
    }

    #[tokio::test]
    async fn test_switch_back_to_cached_query_drops_in_flight_fetch() {
        let provider = Arc::new(
            StubProvider::default()
                .with("Paris", &["p1"])
                .with("London", &["l1"])
                .delayed("London", 50),
        );
        let flow = flow(Arc::clone(&provider));
        flow.search("Paris").await.unwrap();

        let (london, paris) = tokio::join!(flow.search("London"), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            flow.search("Paris").await
        });

        assert_eq!(ids(&paris.unwrap()), vec!["p1"]);
        assert_eq!(london.unwrap(), SearchOutcome::Superseded);

        let cache = flow.cache().lock().await;
        assert!(!cache.is_loading());
        assert_eq!(cache.last_query(), Some(&SearchQuery::from("Paris")));
        assert_eq!(cache.results()[0].id, "p1");
    }

    #[tokio::test]
    async fn test_close_drops_in_flight_result() {
        let provider = Arc::new(
            StubProvider::default()
                .with("Paris", &["p1"])
                .delayed("Paris", 50),
        );
        let flow = flow(Arc::clone(&provider));

        let (paris, ()) = tokio::join!(flow.search("Paris"), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            flow.close().await;
        });

        assert_eq!(paris.unwrap(), SearchOutcome::Superseded);
        let cache = flow.cache().lock().await;
        assert!(cache.results().is_empty());
        assert!(cache.last_query().is_none());
    }
}
