//! Tool-facing types shared by every tool in the registry

use crate::errors::SearchError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// What a host needs to list and validate a tool before calling it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    /// Fixed tool name/identifier
    pub name: String,
    /// Human-readable label
    pub label: String,
    /// What the tool does, written for an LLM
    pub description: String,
    /// Parameter schema (JSON Schema format)
    pub parameters: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// Category of a failed invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Credential or other required configuration is missing
    Configuration,
    /// Parameters were rejected before any request was made
    InvalidParameters,
    /// Network failure or undecodable response
    Transport,
    /// Remote API reported an error
    Provider,
}

/// Error half of [`ToolOutcome`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolFailure {
    /// What went wrong
    pub kind: FailureKind,
    /// Human-readable message without any prefix
    pub message: String,
}

impl ToolFailure {
    /// Single line shown to the user or model
    ///
    /// Configuration and parameter problems read `Error: ...`; anything that
    /// happened while talking to the provider reads
    /// `Error performing web search: ...`.
    pub fn display_text(&self) -> String {
        let message = single_line(&self.message);
        match self.kind {
            FailureKind::Configuration | FailureKind::InvalidParameters => {
                format!("Error: {message}")
            }
            FailureKind::Transport | FailureKind::Provider => {
                format!("Error performing web search: {message}")
            }
        }
    }
}

/// Collapse every run of whitespace, line breaks included, into one space
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl From<SearchError> for ToolFailure {
    fn from(err: SearchError) -> Self {
        let kind = match &err {
            SearchError::MissingCredential { .. } => FailureKind::Configuration,
            SearchError::InvalidParameters(_) => FailureKind::InvalidParameters,
            SearchError::Transport(_) => FailureKind::Transport,
            SearchError::Provider { .. } => FailureKind::Provider,
        };
        Self {
            kind,
            message: single_line(&err.to_string()),
        }
    }
}

/// Result of one tool invocation
///
/// Built fresh for every call and never shared.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// Formatted text plus structured details
    Success {
        /// Text payload for the model
        text: String,
        /// Structured metadata
        details: Value,
    },
    /// The invocation failed
    Error(ToolFailure),
}

impl ToolOutcome {
    /// Successful outcome
    pub fn success(text: impl Into<String>, details: Value) -> Self {
        ToolOutcome::Success {
            text: text.into(),
            details,
        }
    }

    /// Failed outcome
    pub fn failure(failure: impl Into<ToolFailure>) -> Self {
        ToolOutcome::Error(failure.into())
    }

    /// Whether this outcome is an error
    pub fn is_error(&self) -> bool {
        matches!(self, ToolOutcome::Error(_))
    }

    /// Text as displayed to the user or model
    pub fn text(&self) -> String {
        match self {
            ToolOutcome::Success { text, .. } => text.clone(),
            ToolOutcome::Error(failure) => failure.display_text(),
        }
    }

    /// Structured details of a success
    pub fn details(&self) -> Option<&Value> {
        match self {
            ToolOutcome::Success { details, .. } => Some(details),
            ToolOutcome::Error(_) => None,
        }
    }

    /// Failure of an error outcome
    pub fn failure_ref(&self) -> Option<&ToolFailure> {
        match self {
            ToolOutcome::Success { .. } => None,
            ToolOutcome::Error(failure) => Some(failure),
        }
    }

    /// Host-facing JSON envelope
    ///
    /// ```json
    /// { "content": [{"type": "text", "text": "..."}], "details": {...}, "isError": false }
    /// ```
    pub fn to_json(&self) -> Value {
        let details = match self {
            ToolOutcome::Success { details, .. } => details.clone(),
            ToolOutcome::Error(failure) => json!({
                "error": true,
                "kind": failure.kind,
                "message": failure.message,
            }),
        };

        json!({
            "content": [{ "type": "text", "text": self.text() }],
            "details": details,
            "isError": self.is_error(),
        })
    }
}
