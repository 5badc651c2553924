//! Errors raised inside a web search invocation
//!
//! These never leave the tool: [`crate::WebSearchTool::execute`] folds every
//! variant into a [`crate::ToolOutcome`].

use thiserror::Error;

/// Failure while performing a web search
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// API credential is not configured
    #[error(
        "{key_name} is not set. Set it with `export {key_name}=<your BigModel API key>` to enable web search."
    )]
    MissingCredential {
        /// Configuration key that should hold the credential
        key_name: String,
    },

    /// Parameters failed schema validation
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Network failure or a success response that could not be decoded
    #[error("{0}")]
    Transport(String),

    /// Provider answered with a non-success status
    #[error("BigModel API error: {message}")]
    Provider {
        /// HTTP status code
        status: u16,
        /// Provider message, or `HTTP <status>` when the body had none
        message: String,
    },
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Transport(error_chain(&err))
    }
}

impl From<validator::ValidationErrors> for SearchError {
    fn from(err: validator::ValidationErrors) -> Self {
        SearchError::InvalidParameters(err.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::InvalidParameters(err.to_string())
    }
}

/// Render an error with its sources, `outer: inner: root`
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
