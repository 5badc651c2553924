//! BigModel web search
//!
//! Provides one tool, `web_search`:
//! - [`params`] - parameter types, closed enums, and boundary validation
//! - [`provider`] - wire types and the HTTP call to the provider
//! - [`format`] - rendering results as text for the model
//! - [`tool`] - the tool itself, which never fails past its boundary
//!
//! ## Configuration
//!
//! The API key is read from `BIGMODEL_API_KEY` at invocation time unless the
//! config names another variable:
//!
//! ```toml
//! [web_search]
//! api_key_env = "BIGMODEL_API_KEY"
//! ```

pub mod format;
pub mod params;
pub mod provider;
pub mod tool;

pub use format::{format_results, heading, NO_RESULTS, RESULT_SEPARATOR};
pub use params::{ContentSize, RecencyFilter, SearchEngine, SearchOptions, SearchParams};
pub use provider::{
    BigModelClient, ProviderRequest, SearchIntent, SearchResponse, SearchResultItem,
};
pub use tool::{WebSearchTool, TOOL_LABEL, TOOL_NAME};
