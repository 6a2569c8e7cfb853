//! Error types for query execution.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Network failure details captured from the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpErrorInfo {
    /// Error message.
    pub message: String,
    /// Whether the error was a timeout.
    pub is_timeout: bool,
    /// Whether the error was a connection failure.
    pub is_connect: bool,
}

impl From<reqwest::Error> for HttpErrorInfo {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            is_timeout: err.is_timeout(),
            is_connect: err.is_connect(),
        }
    }
}

/// GraphQL error location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphqlErrorLocation {
    pub line: u32,
    pub column: u32,
}

/// Error entry from a GraphQL response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    /// Human-readable error message.
    pub message: String,
    #[serde(default)]
    pub locations: Vec<GraphqlErrorLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

impl GraphqlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            extensions: None,
        }
    }
}

/// Failure of a single query execution.
///
/// The `Display` text is what the list view shows to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// Network-level failure.
    #[error("Network error: {}", .0.message)]
    Http(HttpErrorInfo),

    /// Non-success HTTP status.
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Response body was not valid JSON for the expected shape.
    #[error("Malformed response: {0}")]
    Json(String),

    /// GraphQL errors reported by the server.
    #[error("{}", join_messages(.errors))]
    Graphql { errors: Vec<GraphqlError> },

    /// Response violated the GraphQL response contract.
    #[error("GraphQL protocol error: {message}")]
    Protocol { message: String },
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(HttpErrorInfo::from(err))
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl QueryError {
    /// Shorthand for a single GraphQL error message.
    pub fn graphql(message: impl Into<String>) -> Self {
        Self::Graphql {
            errors: vec![GraphqlError::new(message)],
        }
    }

    /// Returns `true` for transport failures, as opposed to server-reported errors.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::HttpStatus { .. })
    }
}

fn join_messages(errors: &[GraphqlError]) -> String {
    if errors.is_empty() {
        return "GraphQL error".to_string();
    }
    errors
        .iter()
        .map(|err| err.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
