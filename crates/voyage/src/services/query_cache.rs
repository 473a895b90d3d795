//! Query Result Cache
//!
//! Holds the last completed query and its deduplicated results for one
//! search domain. A repeat of an unchanged query is answered from here
//! instead of the provider.
//!
//! Every fetch is issued a `FetchTicket` with a sequence number. Only the
//! latest ticket may complete or fail the fetch; an older one resolving late
//! is reported as `FetchOutcome::Stale` and leaves the cache alone.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::{dedup_by_id, ResultItem, SearchDomain, SearchQuery};

/// Cache shared between a search view and whatever composed it
pub type SharedCache = Arc<Mutex<QueryResultCache>>;

/// Handle for one in-flight fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    sequence: u64,
    query: SearchQuery,
}

impl FetchTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }
}

/// What happened to a completion or failure report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The cache was updated
    Applied,
    /// A newer fetch was started after this one; ignored
    Stale,
    /// The owning view is gone; ignored
    Detached,
}

/// Single-slot result cache for one search domain
#[derive(Debug)]
pub struct QueryResultCache {
    domain: SearchDomain,
    last_query: Option<SearchQuery>,
    results: Vec<ResultItem>,
    loading: bool,
    latest_sequence: u64,
    detached: bool,
}

impl QueryResultCache {
    pub fn new(domain: SearchDomain) -> Self {
        Self {
            domain,
            last_query: None,
            results: Vec::new(),
            loading: false,
            latest_sequence: 0,
            detached: false,
        }
    }

    /// New empty cache wrapped for sharing
    pub fn shared(domain: SearchDomain) -> SharedCache {
        Arc::new(Mutex::new(Self::new(domain)))
    }

    pub fn domain(&self) -> SearchDomain {
        self.domain
    }

    pub fn last_query(&self) -> Option<&SearchQuery> {
        self.last_query.as_ref()
    }

    /// Results of the last completed fetch, stable while a new one is loading
    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// `false` only when `query` matches the last completed one and it
    /// produced results. An empty result set never counts as a hit.
    pub fn should_fetch(&self, query: &SearchQuery) -> bool {
        let hit = self.last_query.as_ref() == Some(query) && !self.results.is_empty();
        debug!(
            domain = %self.domain,
            query = %query,
            hit,
            "Checked query cache"
        );
        !hit
    }

    /// Mark a fetch for `query` as in flight. Supersedes any earlier ticket.
    /// Current results stay readable until the fetch completes.
    pub fn begin_fetch(&mut self, query: SearchQuery) -> FetchTicket {
        self.latest_sequence += 1;
        if !self.detached {
            self.loading = true;
        }

        FetchTicket {
            sequence: self.latest_sequence,
            query,
        }
    }

    /// Store the provider's items for `ticket`, deduplicated by id.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, items: Vec<ResultItem>) -> FetchOutcome {
        if let Some(outcome) = self.reject(&ticket) {
            return outcome;
        }

        let received = items.len();
        self.results = dedup_by_id(items);
        self.last_query = Some(ticket.query);
        self.loading = false;

        debug!(
            domain = %self.domain,
            sequence = ticket.sequence,
            received,
            stored = self.results.len(),
            "Stored fetch results"
        );

        FetchOutcome::Applied
    }

    /// Clear the loading flag after a provider failure. Results and
    /// `last_query` are kept so prior good data survives.
    pub fn fail_fetch(&mut self, ticket: &FetchTicket) -> FetchOutcome {
        if let Some(outcome) = self.reject(ticket) {
            return outcome;
        }

        self.loading = false;
        debug!(
            domain = %self.domain,
            sequence = ticket.sequence,
            "Fetch failed, keeping previous results"
        );

        FetchOutcome::Applied
    }

    /// Retire any in-flight ticket without starting a new fetch. Used when
    /// the view switches to a query answered from the cache.
    pub fn supersede(&mut self) {
        if !self.loading {
            return;
        }
        self.latest_sequence += 1;
        self.loading = false;
        debug!(
            domain = %self.domain,
            latest = self.latest_sequence,
            "Retired in-flight fetch"
        );
    }

    /// Stop honoring completions. Called when the owning view is torn down.
    pub fn detach(&mut self) {
        self.detached = true;
        self.loading = false;
    }

    fn reject(&self, ticket: &FetchTicket) -> Option<FetchOutcome> {
        if self.detached {
            debug!(
                domain = %self.domain,
                sequence = ticket.sequence,
                "Dropping fetch result for detached cache"
            );
            return Some(FetchOutcome::Detached);
        }

        if ticket.sequence != self.latest_sequence {
            warn!(
                domain = %self.domain,
                sequence = ticket.sequence,
                latest = self.latest_sequence,
                query = %ticket.query,
                "Ignoring stale fetch result"
            );
            return Some(FetchOutcome::Stale);
        }

        None
    }
}
