//! Voyage Content API Client
//!
//! HTTP implementation of the `ContentSearchService` port.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use voyage::{ContentSearchService, DomainError, ResultItem};

use crate::config::Config;

/// API Client for the content search endpoint
pub struct ContentApiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Deserialize)]
pub struct SearchContentResponse {
    #[serde(default)]
    pub items: Vec<ResultItem>,
}

/// Content API error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    EmptyQuery,
    RequestFailed(String),
    ParseError(String),
    ApiError { status: u16, message: String },
    RateLimited { retry_after: Option<Duration> },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::EmptyQuery => write!(f, "Search query cannot be empty"),
            ApiError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            ApiError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ApiError::ApiError { status, message } => {
                write!(f, "API error ({}): {}", status, message)
            }
            ApiError::RateLimited { retry_after } => {
                if let Some(duration) = retry_after {
                    write!(f, "Rate limited, retry after {:?}", duration)
                } else {
                    write!(f, "Rate limited")
                }
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for DomainError {
    fn from(err: ApiError) -> Self {
        DomainError::FetchFailed(err.to_string())
    }
}

impl ContentApiClient {
    /// Create a new API client from configuration
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Search content across sources
    pub async fn search(&self, query: &str, sources: &[String]) -> Result<Vec<ResultItem>, ApiError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(ApiError::EmptyQuery);
        }

        let url = build_search_url(&self.base_url, trimmed, sources);
        debug!(url = %url, "Requesting content search");

        let mut request = self.client.get(&url);
        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request
            .send()
            .await
            .map_err(|err| ApiError::RequestFailed(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body, retry_after));
        }

        let payload: SearchContentResponse = response
            .json()
            .await
            .map_err(|err| ApiError::ParseError(err.to_string()))?;

        Ok(payload.items)
    }
}

#[async_trait]
impl ContentSearchService for ContentApiClient {
    async fn search_content(
        &self,
        query: &str,
        sources: &[String],
    ) -> Result<Vec<ResultItem>, DomainError> {
        Ok(self.search(query, sources).await?)
    }
}

// ============================================
// Helper Functions
// ============================================

fn build_search_url(base_url: &str, query: &str, sources: &[String]) -> String {
    let mut url = format!(
        "{}/content/search?q={}",
        base_url,
        urlencoding::encode(query)
    );
    if !sources.is_empty() {
        url.push_str("&sources=");
        url.push_str(&urlencoding::encode(&sources.join(",")));
    }
    url
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> ApiError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return ApiError::RateLimited { retry_after };
    }

    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message").or(Some(err)))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or(body);

    ApiError::ApiError {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_query_and_sources() {
        let url = build_search_url(
            "http://localhost:8080",
            "Café de Flore",
            &["instagram".to_string(), "tiktok".to_string()],
        );
        assert_eq!(
            url,
            "http://localhost:8080/content/search?q=Caf%C3%A9%20de%20Flore&sources=instagram%2Ctiktok"
        );
    }

    #[test]
    fn test_search_url_without_sources() {
        let url = build_search_url("http://localhost:8080", "Paris", &[]);
        assert_eq!(url, "http://localhost:8080/content/search?q=Paris");
    }

    #[test]
    fn test_map_http_error_reads_nested_message() {
        let err = map_http_error(
            StatusCode::BAD_GATEWAY,
            r#"{"error":{"message":"upstream timeout"}}"#.to_string(),
            None,
        );
        assert_eq!(
            err,
            ApiError::ApiError {
                status: 502,
                message: "upstream timeout".to_string()
            }
        );
    }

    #[test]
    fn test_map_http_error_reads_flat_message() {
        let err = map_http_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":"unknown source"}"#.to_string(),
            None,
        );
        assert_eq!(err.to_string(), "API error (400): unknown source");
    }

    #[test]
    fn test_map_http_error_plain_body() {
        let err = map_http_error(StatusCode::INTERNAL_SERVER_ERROR, "oops".to_string(), None);
        assert_eq!(err.to_string(), "API error (500): oops");
    }

    #[test]
    fn test_rate_limited() {
        let err = map_http_error(
            StatusCode::TOO_MANY_REQUESTS,
            String::new(),
            Some(Duration::from_secs(30)),
        );
        assert_eq!(
            err,
            ApiError::RateLimited {
                retry_after: Some(Duration::from_secs(30))
            }
        );
    }

    #[test]
    fn test_api_error_becomes_fetch_failed() {
        let err: DomainError = ApiError::RequestFailed("connection refused".to_string()).into();
        assert_eq!(
            err,
            DomainError::FetchFailed("Request failed: connection refused".to_string())
        );
    }

    #[test]
    fn test_response_without_items() {
        let response: SearchContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.items.is_empty());
    }
}
