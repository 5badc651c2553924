//! Web search configuration
//!
//! ```toml
//! [web_search]
//! endpoint = "https://open.bigmodel.cn/api/paas/v4/web_search"
//! api_key_env = "BIGMODEL_API_KEY"
//! # api_key = "{file:~/.secrets/bigmodel.key}"
//! ```
//!
//! Every field is optional. A file holding only the bare keys (no section
//! header) is accepted too, so the table can live in its own file.
//!
//! `{env:VAR}` and `{file:path}` in `api_key` are resolved once, when the
//! config loads: the key is fixed from then on, and an unset variable fails the
//! load. To pick up a key that may change or appear later, name the variable
//! in `api_key_env` instead; it is read on every invocation, and a missing key
//! is reported by the tool rather than by the loader.

use crate::references::{resolve_references, ReferenceError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Default provider endpoint
pub const DEFAULT_ENDPOINT: &str = "https://open.bigmodel.cn/api/paas/v4/web_search";

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "BIGMODEL_API_KEY";

/// Section name used in a shared config file
pub const SECTION_NAME: &str = "web_search";

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config is not valid TOML or has the wrong shape
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// One or more `{env:}` / `{file:}` references could not be resolved
    #[error("failed to resolve config references: {}", join_errors(.0))]
    References(Vec<ReferenceError>),
}

fn join_errors(errors: &[ReferenceError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration for the web search tool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WebSearchConfig {
    /// Provider endpoint receiving the search POST
    pub endpoint: String,

    /// Environment variable checked for the API key at invocation time
    pub api_key_env: String,

    /// Inline API key (after `{env:}` / `{file:}` resolution), used when the
    /// environment variable is unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
        }
    }
}

impl WebSearchConfig {
    /// Override the endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the environment variable name
    pub fn with_api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = var.into();
        self
    }

    /// Set an inline API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Parse config from TOML text
    ///
    /// Relative `{file:}` references resolve against `base_dir`. When the text
    /// has a `[web_search]` section, only that section is read and resolved.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let value: toml::Value = toml::from_str(content)?;

        let mut section = match value {
            toml::Value::Table(mut table) if table.contains_key(SECTION_NAME) => table
                .remove(SECTION_NAME)
                .unwrap_or_else(|| toml::Value::Table(toml::map::Map::new())),
            other => other,
        };
        resolve_references(&mut section, base_dir).map_err(ConfigError::References)?;

        let config = section.try_into::<WebSearchConfig>()?;
        debug!(endpoint = %config.endpoint, api_key_env = %config.api_key_env, "Loaded web search config");
        Ok(config)
    }

    /// Load config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_toml_str(&content, base_dir)
    }
}
