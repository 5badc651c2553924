//! `{env:VAR}` and `{file:path}` references in config values
//!
//! Any string value in the config can point somewhere else instead of holding
//! the value inline:
//!
//! ```toml
//! [web_search]
//! api_key = "{env:ZHIPU_KEY}"
//! # or
//! api_key = "{file:~/.secrets/bigmodel.key}"
//! ```
//!
//! - A `.toml` file is parsed and spliced in as structured data
//! - Any other file is used as a trimmed string (useful for secrets)
//! - Paths can be relative to the config file, absolute, or start with `~`
//! - A referenced env var must be set or loading fails

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const FILE_REF_PREFIX: &str = "{file:";
const ENV_REF_PREFIX: &str = "{env:";
const REF_SUFFIX: &str = "}";

/// Errors raised while resolving references
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReferenceError {
    /// Referenced file does not exist
    #[error("Referenced file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Referenced file could not be read
    #[error("IO error reading {}: {error}", .path.display())]
    Io {
        /// Path to the file
        path: PathBuf,
        /// Error message
        error: String,
    },

    /// Referenced `.toml` file is not valid TOML
    #[error("Parse error in {}: {error}", .path.display())]
    Parse {
        /// Path to the file
        path: PathBuf,
        /// Error message
        error: String,
    },

    /// Referenced environment variable is not set
    #[error("Environment variable not found: {var_name} (referenced as {{env:{var_name}}})")]
    EnvVarNotFound {
        /// Name of the environment variable
        var_name: String,
    },
}

/// Resolve a referenced path against the directory of the config file
///
/// - `/abs/path` is used as is
/// - `~` and `~/rest` expand to the home directory
/// - Anything else is joined onto `base_dir`
pub fn resolve_reference_path(reference: &str, base_dir: &Path) -> PathBuf {
    if reference.starts_with('/') {
        return PathBuf::from(reference);
    }

    if let Some(home) = dirs::home_dir() {
        if reference == "~" {
            return home;
        }
        if let Some(rest) = reference.strip_prefix("~/") {
            return home.join(rest);
        }
    }

    base_dir.join(reference)
}

fn strip_reference<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    s.strip_prefix(prefix)?.strip_suffix(REF_SUFFIX)
}

fn read_file_as_value(path: &Path) -> Result<toml::Value, ReferenceError> {
    if !path.exists() {
        return Err(ReferenceError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| ReferenceError::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&content).map_err(|e| ReferenceError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    } else {
        Ok(toml::Value::String(content.trim().to_string()))
    }
}

/// What a single string value points at, if anything
fn reference_target(s: &str, base_dir: &Path) -> Option<Result<toml::Value, ReferenceError>> {
    if let Some(reference) = strip_reference(s, FILE_REF_PREFIX) {
        let resolved = resolve_reference_path(reference, base_dir);
        debug!("Resolving file reference: {} -> {}", reference, resolved.display());
        return Some(read_file_as_value(&resolved));
    }

    let var_name = strip_reference(s, ENV_REF_PREFIX)?;
    debug!("Resolving env reference: {}", var_name);
    Some(
        std::env::var(var_name)
            .map(toml::Value::String)
            .map_err(|_| ReferenceError::EnvVarNotFound {
                var_name: var_name.to_string(),
            }),
    )
}

/// Replace every `{file:path}` and `{env:VAR}` string inside the web search
/// section
///
/// Only the section being loaded is touched, so references elsewhere in a
/// shared config file never fail this load. Every failure is collected rather
/// than stopping at the first one. Values spliced in from a file are not
/// resolved again.
pub(crate) fn resolve_references(
    section: &mut toml::Value,
    base_dir: &Path,
) -> Result<(), Vec<ReferenceError>> {
    let mut errors = Vec::new();
    let mut pending = vec![section];

    while let Some(value) = pending.pop() {
        match value {
            toml::Value::String(s) => match reference_target(s, base_dir) {
                Some(Ok(target)) => *value = target,
                Some(Err(e)) => {
                    warn!("Unresolved web search config reference: {}", e);
                    errors.push(e);
                }
                None => {}
            },
            toml::Value::Array(items) => pending.extend(items.iter_mut()),
            toml::Value::Table(table) => pending.extend(table.iter_mut().map(|(_, v)| v)),
            _ => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn strip_reference_requires_both_ends() {
        assert_eq!(strip_reference("{env:FOO}", ENV_REF_PREFIX), Some("FOO"));
        assert_eq!(strip_reference("{env:FOO", ENV_REF_PREFIX), None);
        assert_eq!(strip_reference("env:FOO}", ENV_REF_PREFIX), None);
        assert_eq!(strip_reference("{file:a.key}", ENV_REF_PREFIX), None);
    }

    #[test]
    fn relative_paths_join_base_dir() {
        let base = Path::new("/etc/bigmodel");
        assert_eq!(
            resolve_reference_path("secrets/key", base),
            PathBuf::from("/etc/bigmodel/secrets/key")
        );
        assert_eq!(
            resolve_reference_path("/abs/key", base),
            PathBuf::from("/abs/key")
        );
    }

    #[test]
    fn file_reference_is_trimmed_string() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("api.key"), "  secret-value\n").expect("write");

        let mut value = toml::Value::String("{file:api.key}".to_string());
        resolve_references(&mut value, dir.path()).expect("resolve");

        assert_eq!(value, toml::Value::String("secret-value".to_string()));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new().expect("temp dir");
        let mut value = toml::Value::String("{file:nope.key}".to_string());

        let errors = resolve_references(&mut value, dir.path()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ReferenceError::FileNotFound(_)));
    }

    #[test]
    #[serial]
    fn env_reference_inside_nested_table() {
        std::env::set_var("BIGMODEL_REF_TEST", "from-env");

        let mut value: toml::Value =
            toml::from_str("[web_search]\napi_key = \"{env:BIGMODEL_REF_TEST}\"").expect("parse");
        resolve_references(&mut value, Path::new(".")).expect("resolve");

        assert_eq!(
            value["web_search"]["api_key"].as_str(),
            Some("from-env")
        );

        std::env::remove_var("BIGMODEL_REF_TEST");
    }

    #[test]
    #[serial]
    fn all_missing_env_vars_are_collected() {
        std::env::remove_var("BIGMODEL_REF_MISSING_A");
        std::env::remove_var("BIGMODEL_REF_MISSING_B");

        let mut value: toml::Value = toml::from_str(
            "a = \"{env:BIGMODEL_REF_MISSING_A}\"\nb = [\"{env:BIGMODEL_REF_MISSING_B}\"]",
        )
        .expect("parse");

        let errors = resolve_references(&mut value, Path::new(".")).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
