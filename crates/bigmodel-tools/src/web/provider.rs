//! BigModel `web_search` wire types and HTTP call

use super::params::{ContentSize, RecencyFilter, SearchEngine, SearchOptions, DEFAULT_COUNT};
use crate::errors::SearchError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Request body sent to the provider
///
/// Every field except the domain filter is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderRequest {
    /// Query text
    pub search_query: String,
    /// Engine
    pub search_engine: SearchEngine,
    /// Provider-side intent recognition, always disabled
    pub search_intent: bool,
    /// Number of results
    pub count: u32,
    /// Recency restriction
    pub search_recency_filter: RecencyFilter,
    /// Content verbosity
    pub content_size: ContentSize,
    /// Domain restriction, omitted from the body when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_domain_filter: Option<String>,
}

impl ProviderRequest {
    /// Build the body, substituting defaults for omitted options
    pub fn new(query: &str, options: &SearchOptions) -> Self {
        Self {
            search_query: query.to_string(),
            search_engine: options.effective_engine(),
            search_intent: false,
            count: options.count.unwrap_or(DEFAULT_COUNT),
            search_recency_filter: options.search_recency_filter.unwrap_or_default(),
            content_size: options.content_size.unwrap_or_default(),
            search_domain_filter: options
                .search_domain_filter
                .clone()
                .filter(|domain| !domain.trim().is_empty()),
        }
    }
}

/// Intent classification for one sub-query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIntent {
    /// Query as understood by the provider
    #[serde(default)]
    pub query: String,
    /// Intent label
    #[serde(default)]
    pub intent: String,
    /// Extracted keywords
    #[serde(default)]
    pub keywords: String,
}

/// One search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Page title
    #[serde(default)]
    pub title: String,
    /// Page content or summary
    #[serde(default)]
    pub content: String,
    /// Page URL
    #[serde(default)]
    pub link: String,
    /// Site or media name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    /// Site icon URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Reference marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refer: Option<String>,
    /// Publication date as given by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
}

/// Successful provider response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Response id
    pub id: String,
    /// Creation time, unix seconds
    pub created: i64,
    /// Request id echoed by the provider
    #[serde(default)]
    pub request_id: Option<String>,
    /// Intent classification (empty when intent recognition is off)
    #[serde(default)]
    pub search_intent: Option<Vec<SearchIntent>>,
    /// Results in relevance order
    #[serde(default)]
    pub search_result: Vec<SearchResultItem>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Pull the provider's message out of an error body
fn provider_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ProviderErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("HTTP {status}"))
}

/// HTTP client for the provider endpoint
#[derive(Debug, Clone)]
pub struct BigModelClient {
    client: Client,
    endpoint: String,
}

impl BigModelClient {
    /// Create a client posting to `endpoint`
    #[must_use]
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint receiving requests
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one search request
    ///
    /// No retries; transport defaults apply for timeouts.
    pub async fn search(
        &self,
        api_key: &str,
        request: &ProviderRequest,
    ) -> Result<SearchResponse, SearchError> {
        debug!(
            engine = %request.search_engine,
            count = request.count,
            recency = %request.search_recency_filter,
            "Sending BigModel web search request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = provider_error_message(status.as_u16(), &body);
            warn!(status = status.as_u16(), "BigModel API error: {}", message);
            return Err(SearchError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: SearchResponse = response.json().await?;
        debug!(
            id = %body.id,
            results = body.search_result.len(),
            "Received BigModel web search response"
        );
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_fill_every_field() {
        let body = serde_json::to_value(ProviderRequest::new("test", &SearchOptions::default()))
            .unwrap();

        assert_eq!(
            body,
            json!({
                "search_query": "test",
                "search_engine": "search_std",
                "search_intent": false,
                "count": 10,
                "search_recency_filter": "noLimit",
                "content_size": "medium",
            })
        );
        assert!(body.get("search_domain_filter").is_none());
    }

    #[test]
    fn supplied_options_are_kept() {
        let options = SearchOptions::default()
            .with_engine(SearchEngine::Pro)
            .with_count(3)
            .with_recency(RecencyFilter::OneMonth)
            .with_content_size(ContentSize::High)
            .with_domain_filter("docs.rs");
        let body = serde_json::to_value(ProviderRequest::new("tokio", &options)).unwrap();

        assert_eq!(body["search_engine"], json!("search_pro"));
        assert_eq!(body["count"], json!(3));
        assert_eq!(body["search_recency_filter"], json!("oneMonth"));
        assert_eq!(body["content_size"], json!("high"));
        assert_eq!(body["search_domain_filter"], json!("docs.rs"));
        assert_eq!(body["search_intent"], json!(false));
    }

    #[test]
    fn empty_domain_filter_is_omitted() {
        let options = SearchOptions::default().with_domain_filter("  ");
        let body = serde_json::to_value(ProviderRequest::new("q", &options)).unwrap();
        assert!(body.get("search_domain_filter").is_none());
    }

    #[test]
    fn error_message_from_body() {
        let body = r#"{"error":{"code":"1001","message":"Authentication failed"}}"#;
        assert_eq!(provider_error_message(401, body), "Authentication failed");
    }

    #[test]
    fn error_message_falls_back_to_status() {
        assert_eq!(provider_error_message(502, "<html>bad gateway</html>"), "HTTP 502");
        assert_eq!(provider_error_message(500, r#"{"error":{}}"#), "HTTP 500");
        assert_eq!(provider_error_message(500, ""), "HTTP 500");
    }

    #[test]
    fn response_parses_optional_fields() {
        let response: SearchResponse = serde_json::from_value(json!({
            "id": "resp-1",
            "created": 1_727_000_000,
            "request_id": "req-1",
            "search_intent": [{"query": "rust", "intent": "SEARCH_ALL", "keywords": "rust"}],
            "search_result": [
                {"title": "Rust", "content": "A language", "link": "https://rust-lang.org",
                 "media": "rust-lang.org", "icon": "https://rust-lang.org/favicon.ico",
                 "refer": "ref_1", "publish_date": "2024-01-01"},
                {"title": "Docs", "content": "Docs", "link": "https://docs.rs"}
            ]
        }))
        .unwrap();

        assert_eq!(response.request_id.as_deref(), Some("req-1"));
        assert_eq!(response.search_intent.as_ref().map(Vec::len), Some(1));
        assert_eq!(response.search_result.len(), 2);
        assert_eq!(response.search_result[0].media.as_deref(), Some("rust-lang.org"));
        assert!(response.search_result[1].publish_date.is_none());
    }
}
