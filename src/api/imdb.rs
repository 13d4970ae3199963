//! IMDb autocomplete search client
//!
//! Free-text title search through the imdb236 RapidAPI endpoint.

use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{ConfigError, SEARCH_KEY_ENV};
use crate::models::Title;

pub const SEARCH_API_HOST: &str = "imdb236.p.rapidapi.com";

const BODY_EXCERPT_CHARS: usize = 100;

/// Search client error types
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Please enter a search query.")]
    EmptyQuery,

    #[error(transparent)]
    NotConfigured(#[from] ConfigError),

    #[error("API error: {status}\n{excerpt}...")]
    Status { status: StatusCode, excerpt: String },

    #[error("Unexpected response format (expected list): {excerpt}...")]
    UnexpectedShape { excerpt: String },

    #[error("Failed to parse search response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Connection error (search): {0}")]
    Transport(#[from] reqwest::Error),
}

/// Autocomplete search client
#[derive(Debug, Clone)]
pub struct SearchClient {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl SearchClient {
    /// Create a new search client. `None` means the key is not configured.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, format!("https://{}", SEARCH_API_HOST))
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search titles. Entries without an identifier are dropped; order is kept.
    pub async fn search(&self, query: &str) -> Result<Vec<Title>, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let api_key = self.api_key.as_deref().ok_or(ConfigError::MissingApiKey {
            service: "IMDb search",
            env: SEARCH_KEY_ENV,
        })?;

        let url = format!(
            "{}/imdb/autocomplete?query={}",
            self.base_url,
            urlencoding::encode(query)
        );
        debug!(%url, "searching titles");

        let response = self
            .client
            .get(&url)
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", SEARCH_API_HOST)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%status, "search request failed");
            return Err(SearchError::Status {
                status,
                excerpt: excerpt(&body, BODY_EXCERPT_CHARS),
            });
        }

        parse_titles(&body)
    }
}

/// Parse a search response body into titles
pub fn parse_titles(body: &str) -> Result<Vec<Title>, SearchError> {
    let value: Value = serde_json::from_str(body)?;
    let items = value.as_array().ok_or_else(|| SearchError::UnexpectedShape {
        excerpt: excerpt(body, BODY_EXCERPT_CHARS),
    })?;

    let titles: Vec<Title> = items.iter().filter_map(Title::from_value).collect();
    if titles.len() < items.len() {
        debug!(dropped = items.len() - titles.len(), "dropped entries without an id");
    }
    Ok(titles)
}

/// First `max` characters of a response body
pub(crate) fn excerpt(body: &str, max: usize) -> String {
    body.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_titles_filters_missing_ids() {
        let body = r#"[
            {"id": "tt1", "primaryTitle": "One"},
            {"primaryTitle": "No Id"},
            {"id": "", "primaryTitle": "Blank Id"},
            {"id": "tt2", "primaryTitle": "Two"}
        ]"#;

        let titles = parse_titles(body).unwrap();
        let ids: Vec<_> = titles.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt2"]);
    }

    #[test]
    fn test_parse_titles_rejects_object() {
        let err = parse_titles(r#"{"message": "nope"}"#).unwrap_err();
        assert!(matches!(err, SearchError::UnexpectedShape { .. }));
    }

    #[test]
    fn test_parse_titles_rejects_garbage() {
        let err = parse_titles("<html>").unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn test_excerpt_counts_chars() {
        assert_eq!(excerpt("héllo wörld", 5), "héllo");
        assert_eq!(excerpt("ab", 10), "ab");
    }
}
