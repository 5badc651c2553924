//! BigModel Tools - web search for agent runtimes
//!
//! This crate exposes the BigModel `web_search` API as a single tool that a
//! host runtime can discover, validate parameters for, and invoke.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bigmodel_config::WebSearchConfig;
//! use bigmodel_tools::{SearchOptions, WebSearchTool};
//!
//! # async fn run() {
//! let tool = WebSearchTool::new(&WebSearchConfig::default());
//! let outcome = tool.execute("rust async runtimes", SearchOptions::default()).await;
//! println!("{}", outcome.text());
//! # }
//! ```
//!
//! ## Registering with a host
//!
//! ```rust,no_run
//! use bigmodel_config::WebSearchConfig;
//! use bigmodel_tools::{ToolRegistry, WebSearchTool};
//! use std::sync::Arc;
//!
//! let mut registry = ToolRegistry::new();
//! registry
//!     .register(Arc::new(WebSearchTool::new(&WebSearchConfig::default())))
//!     .expect("fresh registry");
//! for def in registry.definitions() {
//!     println!("{} ({})", def.name, def.label);
//! }
//! ```
//!
//! Every invocation yields a [`ToolOutcome`]; failures are reported inside it
//! rather than returned as errors.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod registry;
pub mod types;
pub mod web;

pub use errors::SearchError;
pub use registry::{Tool, ToolError, ToolRegistry};
pub use types::{FailureKind, ToolDefinition, ToolFailure, ToolOutcome};
pub use web::{
    ContentSize, RecencyFilter, SearchEngine, SearchOptions, SearchParams, SearchResponse,
    SearchResultItem, WebSearchTool,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
