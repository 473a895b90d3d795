//! ResultItem - One entry of a content search result set

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single search result. Only `id` matters to the cache; the rest is payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    /// Identifier, unique within a deduplicated result set
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    /// Platform the item came from (instagram, tiktok, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub views: u64,
    /// Provider-specific fields passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
}

impl ResultItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            media_url: None,
            source: None,
            likes: 0,
            views: 0,
            extra: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_media_url(mut self, url: impl Into<String>) -> Self {
        self.media_url = Some(url.into());
        self
    }

    pub fn with_engagement(mut self, likes: u64, views: u64) -> Self {
        self.likes = likes;
        self.views = views;
        self
    }
}

/// Drop items whose `id` was already seen, keeping first-seen order.
pub fn dedup_by_id(items: Vec<ResultItem>) -> Vec<ResultItem> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut unique = Vec::with_capacity(items.len());

    for item in items {
        if !seen.insert(item.id.clone()) {
            continue;
        }
        unique.push(item);
    }

    unique
}
