//! # BigModel Configuration
//!
//! Configuration for the BigModel web search tool: where the provider lives,
//! which configuration key carries the API credential, and how that credential
//! is resolved at invocation time.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bigmodel_config::{ConfigCredentials, CredentialProvider, WebSearchConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WebSearchConfig::load("config.toml")?;
//!     let credentials = ConfigCredentials::new(&config);
//!     if credentials.api_key().is_none() {
//!         eprintln!("set {} to enable web search", credentials.key_name());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod credentials;
mod references;

pub use config::{
    ConfigError, WebSearchConfig, DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, SECTION_NAME,
};
pub use credentials::{
    ConfigCredentials, CredentialProvider, CredentialSource, EnvCredentials, StaticCredentials,
};
pub use references::{resolve_reference_path, ReferenceError};
