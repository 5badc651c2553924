//! Search parameters and their validation
//!
//! Optional fields stay `None` through validation. Defaults are substituted
//! only when the provider request is built (see
//! [`ProviderRequest::new`](super::provider::ProviderRequest::new)).

use crate::errors::SearchError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use validator::Validate;

/// Smallest accepted result count
pub const MIN_COUNT: u32 = 1;
/// Largest accepted result count
pub const MAX_COUNT: u32 = 50;
/// Result count when none is given
pub const DEFAULT_COUNT: u32 = 10;
/// Provider's recommended query length; longer queries are still sent
pub const RECOMMENDED_QUERY_CHARS: usize = 70;

/// Search engine offered by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum SearchEngine {
    /// Standard engine
    #[default]
    #[serde(rename = "search_std")]
    Standard,
    /// Advanced engine
    #[serde(rename = "search_pro")]
    Pro,
    /// Sogou-backed engine
    #[serde(rename = "search_pro_sogou")]
    ProSogou,
    /// Quark-backed engine
    #[serde(rename = "search_pro_quark")]
    ProQuark,
}

impl SearchEngine {
    /// Every engine, in schema order
    pub const ALL: [SearchEngine; 4] = [
        SearchEngine::Standard,
        SearchEngine::Pro,
        SearchEngine::ProSogou,
        SearchEngine::ProQuark,
    ];

    /// Wire name
    pub const fn as_str(self) -> &'static str {
        match self {
            SearchEngine::Standard => "search_std",
            SearchEngine::Pro => "search_pro",
            SearchEngine::ProSogou => "search_pro_sogou",
            SearchEngine::ProQuark => "search_pro_quark",
        }
    }
}

/// How recent results must be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum RecencyFilter {
    /// Past day
    OneDay,
    /// Past week
    OneWeek,
    /// Past month
    OneMonth,
    /// Past year
    OneYear,
    /// Any time
    #[default]
    NoLimit,
}

impl RecencyFilter {
    /// Every filter, in schema order
    pub const ALL: [RecencyFilter; 5] = [
        RecencyFilter::OneDay,
        RecencyFilter::OneWeek,
        RecencyFilter::OneMonth,
        RecencyFilter::OneYear,
        RecencyFilter::NoLimit,
    ];

    /// Wire name
    pub const fn as_str(self) -> &'static str {
        match self {
            RecencyFilter::OneDay => "oneDay",
            RecencyFilter::OneWeek => "oneWeek",
            RecencyFilter::OneMonth => "oneMonth",
            RecencyFilter::OneYear => "oneYear",
            RecencyFilter::NoLimit => "noLimit",
        }
    }
}

/// Verbosity of each result's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentSize {
    /// Summary
    #[default]
    Medium,
    /// Detailed
    High,
}

impl ContentSize {
    /// Every size, in schema order
    pub const ALL: [ContentSize; 2] = [ContentSize::Medium, ContentSize::High];

    /// Wire name
    pub const fn as_str(self) -> &'static str {
        match self {
            ContentSize::Medium => "medium",
            ContentSize::High => "high",
        }
    }
}

macro_rules! display_as_wire_name {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_wire_name!(SearchEngine, RecencyFilter, ContentSize);

/// Optional search settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SearchOptions {
    /// Engine to use
    pub search_engine: Option<SearchEngine>,

    /// Number of results, 1-50
    #[validate(range(min = 1, max = 50))]
    pub count: Option<u32>,

    /// Recency restriction
    pub search_recency_filter: Option<RecencyFilter>,

    /// Content verbosity
    pub content_size: Option<ContentSize>,

    /// Restrict results to this domain
    pub search_domain_filter: Option<String>,
}

impl SearchOptions {
    /// Set the engine
    pub fn with_engine(mut self, engine: SearchEngine) -> Self {
        self.search_engine = Some(engine);
        self
    }

    /// Set the result count
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Set the recency filter
    pub fn with_recency(mut self, recency: RecencyFilter) -> Self {
        self.search_recency_filter = Some(recency);
        self
    }

    /// Set the content size
    pub fn with_content_size(mut self, size: ContentSize) -> Self {
        self.content_size = Some(size);
        self
    }

    /// Set the domain filter
    pub fn with_domain_filter(mut self, domain: impl Into<String>) -> Self {
        self.search_domain_filter = Some(domain.into());
        self
    }

    /// Engine that will actually be used
    pub fn effective_engine(&self) -> SearchEngine {
        self.search_engine.unwrap_or_default()
    }
}

/// Raw tool parameters as received from the host
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Search query, ideally no longer than 70 characters
    pub query: String,

    /// Search engine: search_std (default), search_pro, search_pro_sogou, search_pro_quark
    #[serde(default)]
    pub search_engine: Option<SearchEngine>,

    /// Number of results to return (1-50, default 10)
    #[serde(default)]
    pub count: Option<u32>,

    /// Time window: oneDay, oneWeek, oneMonth, oneYear, noLimit (default)
    #[serde(default)]
    pub search_recency_filter: Option<RecencyFilter>,

    /// Content detail: medium (default) or high
    #[serde(default)]
    pub content_size: Option<ContentSize>,

    /// Only return results from this domain, e.g. www.example.com
    #[serde(default)]
    pub search_domain_filter: Option<String>,
}

impl SearchParams {
    /// Parse raw JSON parameters
    pub fn from_value(value: Value) -> Result<Self, SearchError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Validate and split into query and typed options
    pub fn into_validated(self) -> Result<(String, SearchOptions), SearchError> {
        let options = SearchOptions {
            search_engine: self.search_engine,
            count: self.count,
            search_recency_filter: self.search_recency_filter,
            content_size: self.content_size,
            search_domain_filter: self.search_domain_filter,
        };
        validate_request(&self.query, &options)?;
        Ok((self.query, options))
    }
}

/// Check a query and options before anything leaves the process
pub fn validate_request(query: &str, options: &SearchOptions) -> Result<(), SearchError> {
    if query.trim().is_empty() {
        return Err(SearchError::InvalidParameters(
            "query must be a non-empty string".to_string(),
        ));
    }
    options.validate()?;
    Ok(())
}

/// JSON Schema for [`SearchParams`] with enum sets, bounds, and defaults
pub fn parameters_schema() -> Value {
    let mut schema = schemars::schema_for!(SearchParams).to_value();

    if let Some(properties) = schema.get_mut("properties").and_then(Value::as_object_mut) {
        if let Some(query) = properties.get_mut("query").and_then(Value::as_object_mut) {
            query.insert("minLength".to_string(), json!(1));
        }

        set_property(
            properties,
            "search_engine",
            json!({
                "type": "string",
                "enum": SearchEngine::ALL.map(SearchEngine::as_str),
                "default": SearchEngine::default().as_str(),
            }),
        );
        set_property(
            properties,
            "count",
            json!({
                "type": "integer",
                "minimum": MIN_COUNT,
                "maximum": MAX_COUNT,
                "default": DEFAULT_COUNT,
            }),
        );
        set_property(
            properties,
            "search_recency_filter",
            json!({
                "type": "string",
                "enum": RecencyFilter::ALL.map(RecencyFilter::as_str),
                "default": RecencyFilter::default().as_str(),
            }),
        );
        set_property(
            properties,
            "content_size",
            json!({
                "type": "string",
                "enum": ContentSize::ALL.map(ContentSize::as_str),
                "default": ContentSize::default().as_str(),
            }),
        );
        set_property(properties, "search_domain_filter", json!({ "type": "string" }));
    }

    if let Some(object) = schema.as_object_mut() {
        object.insert("required".to_string(), json!(["query"]));
        object.remove("$defs");
    }

    schema
}

/// Replace a property with a flat definition, keeping its description
fn set_property(properties: &mut Map<String, Value>, name: &str, mut definition: Value) {
    let description = properties
        .get(name)
        .and_then(|p| p.get("description"))
        .cloned();

    if let (Some(description), Some(object)) = (description, definition.as_object_mut()) {
        object.insert("description".to_string(), description);
    }

    properties.insert(name.to_string(), definition);
}
