//! API credential resolution
//!
//! The tool never reads the environment directly. It asks a
//! [`CredentialProvider`] for the key on every invocation, which keeps the
//! search logic testable without touching process state.
//!
//! # Resolution Priority
//!
//! [`ConfigCredentials`] checks sources in this order:
//! 1. Environment variable named by `api_key_env` (e.g., `BIGMODEL_API_KEY`)
//! 2. Config file value (already resolved from `{env:VAR}` / `{file:path}`)
//!
//! Empty values are treated as missing.

use crate::config::WebSearchConfig;
use std::fmt;
use tracing::debug;

/// Source of an API key
pub trait CredentialProvider: Send + Sync {
    /// Name of the configuration key, shown to users when the key is missing
    fn key_name(&self) -> &str;

    /// Current API key, if any
    fn api_key(&self) -> Option<String>;
}

/// Reads the key from an environment variable on each call
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    /// Read the key from `var`
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_API_KEY_ENV)
    }
}

impl CredentialProvider for EnvCredentials {
    fn key_name(&self) -> &str {
        &self.var
    }

    fn api_key(&self) -> Option<String> {
        non_empty(std::env::var(&self.var).ok())
    }
}

/// A fixed key supplied by the embedding host
#[derive(Clone)]
pub struct StaticCredentials {
    key_name: String,
    key: Option<String>,
}

impl StaticCredentials {
    /// Provider that always returns `key`
    pub fn new(key_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            key: Some(key.into()),
        }
    }

    /// Provider with no key
    pub fn missing(key_name: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            key: None,
        }
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("key_name", &self.key_name)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CredentialProvider for StaticCredentials {
    fn key_name(&self) -> &str {
        &self.key_name
    }

    fn api_key(&self) -> Option<String> {
        non_empty(self.key.clone())
    }
}

/// Where a resolved key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// From the environment variable
    EnvVar,
    /// From the config file
    Config,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::EnvVar => write!(f, "env"),
            CredentialSource::Config => write!(f, "config"),
        }
    }
}

/// Environment first, then the config value
#[derive(Clone)]
pub struct ConfigCredentials {
    env: EnvCredentials,
    config_key: Option<String>,
}

impl ConfigCredentials {
    /// Build from a loaded config
    pub fn new(config: &WebSearchConfig) -> Self {
        Self {
            env: EnvCredentials::new(config.api_key_env.clone()),
            config_key: config.api_key.clone(),
        }
    }

    /// Resolve the key along with its source
    pub fn resolve(&self) -> Option<(String, CredentialSource)> {
        let resolved = self
            .env
            .api_key()
            .map(|key| (key, CredentialSource::EnvVar))
            .or_else(|| {
                non_empty(self.config_key.clone()).map(|key| (key, CredentialSource::Config))
            });

        match &resolved {
            Some((_, source)) => {
                debug!(%source, key_name = self.env.key_name(), "Resolved BigModel API key")
            }
            None => debug!(key_name = self.env.key_name(), "No BigModel API key configured"),
        }
        resolved
    }
}

impl fmt::Debug for ConfigCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigCredentials")
            .field("env", &self.env)
            .field("config_key", &self.config_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CredentialProvider for ConfigCredentials {
    fn key_name(&self) -> &str {
        self.env.key_name()
    }

    fn api_key(&self) -> Option<String> {
        self.resolve().map(|(key, _)| key)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const TEST_VAR: &str = "BIGMODEL_CREDENTIALS_TEST_KEY";

    #[test]
    fn static_credentials_return_key() {
        let creds = StaticCredentials::new("BIGMODEL_API_KEY", "sk-test");
        assert_eq!(creds.api_key(), Some("sk-test".to_string()));
        assert_eq!(creds.key_name(), "BIGMODEL_API_KEY");
    }

    #[test]
    fn static_empty_key_counts_as_missing() {
        assert_eq!(StaticCredentials::new("K", "   ").api_key(), None);
        assert_eq!(StaticCredentials::missing("K").api_key(), None);
    }

    #[test]
    fn debug_output_redacts_key() {
        let creds = StaticCredentials::new("K", "sk-very-secret");
        let printed = format!("{creds:?}");
        assert!(!printed.contains("sk-very-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    #[serial]
    fn env_credentials_read_at_call_time() {
        std::env::remove_var(TEST_VAR);
        let creds = EnvCredentials::new(TEST_VAR);
        assert_eq!(creds.api_key(), None);

        std::env::set_var(TEST_VAR, "sk-late");
        assert_eq!(creds.api_key(), Some("sk-late".to_string()));

        std::env::remove_var(TEST_VAR);
    }

    #[test]
    #[serial]
    fn env_takes_priority_over_config() {
        std::env::set_var(TEST_VAR, "sk-env");
        let config = WebSearchConfig::default()
            .with_api_key_env(TEST_VAR)
            .with_api_key("sk-config");

        let resolved = ConfigCredentials::new(&config).resolve();
        assert_eq!(resolved, Some(("sk-env".to_string(), CredentialSource::EnvVar)));

        std::env::remove_var(TEST_VAR);
    }

    #[test]
    #[serial]
    fn falls_back_to_config_value() {
        std::env::remove_var(TEST_VAR);
        let config = WebSearchConfig::default()
            .with_api_key_env(TEST_VAR)
            .with_api_key("sk-config");

        let creds = ConfigCredentials::new(&config);
        assert_eq!(
            creds.resolve(),
            Some(("sk-config".to_string(), CredentialSource::Config))
        );
        assert_eq!(creds.key_name(), TEST_VAR);
    }

    #[test]
    fn source_displays_as_short_label() {
        assert_eq!(CredentialSource::EnvVar.to_string(), "env");
        assert_eq!(CredentialSource::Config.to_string(), "config");
    }

    #[test]
    #[serial]
    #[tracing_test::traced_test]
    fn resolution_logs_its_source() {
        std::env::remove_var(TEST_VAR);
        let config = WebSearchConfig::default()
            .with_api_key_env(TEST_VAR)
            .with_api_key("sk-config");

        assert!(ConfigCredentials::new(&config).api_key().is_some());
        assert!(logs_contain("source=config"));
        assert!(!logs_contain("sk-config"));
    }

    #[test]
    #[serial]
    fn nothing_configured_resolves_to_none() {
        std::env::remove_var(TEST_VAR);
        let config = WebSearchConfig::default().with_api_key_env(TEST_VAR);
        assert_eq!(ConfigCredentials::new(&config).api_key(), None);
    }
}
