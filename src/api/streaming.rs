//! Streaming Availability client
//!
//! Looks up where a title can be watched in one region. The upstream
//! payload is not a fixed contract, so everything after the status check
//! degrades to an explanatory string instead of failing.

use reqwest::StatusCode;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::imdb::excerpt;
use crate::config::DEFAULT_REGION;
use crate::models::OfferType;

pub const STREAMING_API_HOST: &str = "streaming-availability.p.rapidapi.com";

pub const NOT_FOUND_MESSAGE: &str = "Streaming info not found for this title (404).";

const BODY_EXCERPT_CHARS: usize = 150;

/// Streaming client error types. Only transport, status and JSON failures
/// end up here; shape mismatches are reported as text.
#[derive(Error, Debug)]
pub enum StreamingError {
    #[error("IMDb ID required for streaming lookup.")]
    MissingTitleId,

    #[error("Streaming API error: {status}\n{excerpt}")]
    Status { status: StatusCode, excerpt: String },

    #[error("Failed to parse streaming response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Connection error (streaming): {0}")]
    Transport(#[from] reqwest::Error),
}

/// Streaming Availability API client
#[derive(Debug, Clone)]
pub struct StreamingClient {
    api_key: Option<String>,
    base_url: String,
    region: String,
    client: reqwest::Client,
}

impl StreamingClient {
    /// Create a new client. `None` means the key is not configured.
    pub fn new(api_key: Option<String>, region: impl Into<String>) -> Self {
        Self::with_base_url(api_key, region, format!("https://{}", STREAMING_API_HOST))
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(
        api_key: Option<String>,
        region: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let region = region.into().trim().to_lowercase();
        Self {
            api_key,
            base_url: base_url.into(),
            region: if region.is_empty() {
                DEFAULT_REGION.to_string()
            } else {
                region
            },
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Human-readable availability summary for a title.
    ///
    /// Missing configuration and 404 are informational results, not errors.
    pub async fn fetch_availability(&self, title_id: &str) -> Result<String, StreamingError> {
        if title_id.is_empty() {
            return Err(StreamingError::MissingTitleId);
        }
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("streaming key not configured, skipping lookup");
            return Ok(unconfigured_message());
        };

        let url = format!(
            "{}/shows/{}?country={}",
            self.base_url,
            urlencoding::encode(title_id),
            urlencoding::encode(&self.region)
        );
        debug!(%url, "fetching streaming availability");

        let response = self
            .client
            .get(&url)
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", STREAMING_API_HOST)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(NOT_FOUND_MESSAGE.to_string());
        }

        let body = response.text().await?;
        if !status.is_success() {
            warn!(%status, title_id, "streaming request failed");
            return Err(StreamingError::Status {
                status,
                excerpt: excerpt(&body, BODY_EXCERPT_CHARS),
            });
        }

        let payload: Value = serde_json::from_str(&body)?;
        Ok(summarize(&payload, &self.region))
    }
}

/// Explanation shown when no streaming key is set
pub fn unconfigured_message() -> String {
    format!(
        "Streaming info requires a separate API subscription/key. \
         Configure the streaming key for '{}' to see where-to-watch data.",
        STREAMING_API_HOST
    )
}

// =============================================================================
// Payload Probing
// =============================================================================

/// Where `streamingOptions` may live in the payload
type ShapeProbe = fn(&Map<String, Value>) -> Option<&Map<String, Value>>;

const SHAPE_PROBES: &[ShapeProbe] = &[top_level_options, nested_result_options];

fn top_level_options(payload: &Map<String, Value>) -> Option<&Map<String, Value>> {
    payload.get("streamingOptions")?.as_object()
}

fn nested_result_options(payload: &Map<String, Value>) -> Option<&Map<String, Value>> {
    payload
        .get("result")?
        .as_object()?
        .get("streamingOptions")?
        .as_object()
}

/// Summarise a successful payload into "Available in (REGION): ..."
pub fn summarize(payload: &Value, region: &str) -> String {
    let label = region.to_uppercase();
    let none_found = || format!("None found in {}.", label);

    let text = match payload.as_object() {
        None => "Not found or parsing failed.".to_string(),
        Some(obj) => match SHAPE_PROBES.iter().find_map(|probe| probe(obj)) {
            None => "Streaming data structure not recognized.".to_string(),
            Some(options) => {
                let services = region_services(options, region);
                if services.is_empty() {
                    none_found()
                } else {
                    services.into_iter().collect::<Vec<_>>().join(", ")
                }
            }
        },
    };

    format!("Available in ({}): {}", label, text)
}

/// Deduplicated, sorted display labels for one region's options
fn region_services(options: &Map<String, Value>, region: &str) -> BTreeSet<String> {
    let Some(entries) = options.get(region).and_then(Value::as_array) else {
        return BTreeSet::new();
    };

    entries
        .iter()
        .filter_map(Value::as_object)
        .map(|option| {
            let service = option
                .get("service")
                .and_then(|s| s.get("id"))
                .and_then(Value::as_str)
                .unwrap_or("Unknown");
            let offer = option.get("type").and_then(Value::as_str).unwrap_or("N/A");
            OfferType::parse(offer).label(&capitalize(service))
        })
        .collect()
}

/// Upper-case the first letter, lower-case the rest
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("netflix"), "Netflix");
        assert_eq!(capitalize("HBO"), "Hbo");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_summarize_top_level() {
        let payload = json!({
            "streamingOptions": {
                "in": [
                    {"service": {"id": "netflix"}, "type": "subscription"},
                    {"service": {"id": "apple"}, "type": "rent"},
                    {"service": {"id": "apple"}, "type": "buy"},
                    {"service": {"id": "netflix"}, "type": "subscription"}
                ]
            }
        });

        assert_eq!(
            summarize(&payload, "in"),
            "Available in (IN): Apple (buy), Apple (rent), Netflix"
        );
    }

    #[test]
    fn test_summarize_nested_result() {
        let payload = json!({
            "result": {
                "streamingOptions": {
                    "in": [{"service": {"id": "hotstar"}, "type": "addon"}]
                }
            }
        });

        assert_eq!(summarize(&payload, "in"), "Available in (IN): Hotstar (addon)");
    }

    #[test]
    fn test_summarize_missing_fields_use_defaults() {
        let payload = json!({"streamingOptions": {"in": [{}]}});
        assert_eq!(summarize(&payload, "in"), "Available in (IN): Unknown (N/A)");
    }

    #[test]
    fn test_summarize_uses_requested_region() {
        let payload = json!({
            "streamingOptions": {
                "in": [{"service": {"id": "zee5"}, "type": "subscription"}],
                "us": [{"service": {"id": "hulu"}, "type": "subscription"}]
            }
        });

        assert_eq!(summarize(&payload, "us"), "Available in (US): Hulu");
    }

    #[test]
    fn test_summarize_fallbacks() {
        assert_eq!(
            summarize(&json!({"streamingOptions": {"us": []}}), "in"),
            "Available in (IN): None found in IN."
        );
        assert_eq!(
            summarize(&json!({"streamingOptions": {"in": []}}), "in"),
            "Available in (IN): None found in IN."
        );
        assert_eq!(
            summarize(&json!({"title": "x"}), "in"),
            "Available in (IN): Streaming data structure not recognized."
        );
        assert_eq!(
            summarize(&json!({"streamingOptions": ["in"]}), "in"),
            "Available in (IN): Streaming data structure not recognized."
        );
        assert_eq!(
            summarize(&json!([1, 2]), "in"),
            "Available in (IN): Not found or parsing failed."
        );
    }
}
