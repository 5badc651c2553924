//! The `web_search` tool

use super::format::{format_results, heading};
use super::params::{
    parameters_schema, validate_request, SearchOptions, SearchParams, RECOMMENDED_QUERY_CHARS,
};
use super::provider::{BigModelClient, ProviderRequest};
use crate::errors::SearchError;
use crate::registry::Tool;
use crate::types::ToolOutcome;
use async_trait::async_trait;
use bigmodel_config::{ConfigCredentials, CredentialProvider, WebSearchConfig};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Name the tool registers under
pub const TOOL_NAME: &str = "web_search";

/// Label shown by hosts
pub const TOOL_LABEL: &str = "Web Search";

const TOOL_DESCRIPTION: &str = "Search the web with BigModel. Returns numbered results with \
title, source, publish date, URL, and content. Keep queries under 70 characters for best results.";

/// Web search backed by the BigModel API
///
/// Stateless between invocations: the credential is looked up on every call
/// and nothing from a response is retained.
#[derive(Clone)]
pub struct WebSearchTool {
    client: BigModelClient,
    credentials: Arc<dyn CredentialProvider>,
}

impl WebSearchTool {
    /// Create from config, resolving the key from env then config
    pub fn new(config: &WebSearchConfig) -> Self {
        Self::with_credentials(
            Client::new(),
            config.endpoint.clone(),
            Arc::new(ConfigCredentials::new(config)),
        )
    }

    /// Create with an explicit HTTP client and credential source
    pub fn with_credentials(
        client: Client,
        endpoint: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            client: BigModelClient::new(client, endpoint),
            credentials,
        }
    }

    /// Run one search
    ///
    /// Always returns an outcome; missing credentials, bad parameters,
    /// network failures, and provider errors all come back as
    /// [`ToolOutcome::Error`].
    pub async fn execute(&self, query: &str, options: SearchOptions) -> ToolOutcome {
        match self.search(query, &options).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "Web search failed");
                ToolOutcome::failure(err)
            }
        }
    }

    async fn search(&self, query: &str, options: &SearchOptions) -> Result<ToolOutcome, SearchError> {
        validate_request(query, options)?;

        if query.chars().count() > RECOMMENDED_QUERY_CHARS {
            debug!(
                chars = query.chars().count(),
                "Query longer than the recommended {} characters", RECOMMENDED_QUERY_CHARS
            );
        }

        let api_key = self
            .credentials
            .api_key()
            .ok_or_else(|| SearchError::MissingCredential {
                key_name: self.credentials.key_name().to_string(),
            })?;

        let request = ProviderRequest::new(query, options);
        let response = self.client.search(&api_key, &request).await?;
        let results = &response.search_result;

        if results.is_empty() {
            info!("Web search returned no results");
        }

        let text = format!("{}\n\n{}", heading(query), format_results(results));
        let details = json!({
            "query": query,
            "result_count": results.len(),
            "engine": request.search_engine,
            "response_id": response.id,
            "request_id": response.request_id,
        });

        Ok(ToolOutcome::success(text, details))
    }
}

impl std::fmt::Debug for WebSearchTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSearchTool")
            .field("endpoint", &self.client.endpoint())
            .field("key_name", &self.credentials.key_name())
            .finish()
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn label(&self) -> &str {
        TOOL_LABEL
    }

    fn description(&self) -> &str {
        TOOL_DESCRIPTION
    }

    fn parameters(&self) -> Value {
        parameters_schema()
    }

    async fn call(&self, params: Value) -> ToolOutcome {
        match SearchParams::from_value(params).and_then(SearchParams::into_validated) {
            Ok((query, options)) => self.execute(&query, options).await,
            Err(err) => {
                warn!(error = %err, "Rejected web search parameters");
                ToolOutcome::failure(err)
            }
        }
    }
}
