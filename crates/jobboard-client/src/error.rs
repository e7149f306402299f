//! Client error types

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::cache::CacheError;

/// Error code the server attaches to authentication failures
pub const UNAUTHENTICATED_CODE: &str = "UNAUTHENTICATED";

/// One entry of a GraphQL `errors` array
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<GraphQlErrorExtensions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphQlErrorExtensions {
    pub code: Option<String>,
}

impl GraphQlError {
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.code.as_deref()
    }
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{} ({code})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server refused the credential or requires a login
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    #[error("Invalid email or password")]
    LoginRejected,

    #[error("GraphQL error: {}", join_errors(.0))]
    GraphQl(Vec<GraphQlError>),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("{mutation} does not select {} required by {read}", .missing.join(", "))]
    ShapeMismatch {
        mutation: String,
        read: String,
        missing: Vec<String>,
    },

    #[error("Response lacks selected fields: {}", .missing.join(", "))]
    IncompleteShape { missing: Vec<String> },

    #[error("Response has no {0}")]
    MissingData(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn join_errors(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ClientError {
    /// The user should log in (again) rather than see a generic failure
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthenticated(_) | Self::LoginRejected)
    }

    #[must_use]
    pub const fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Http { .. })
    }

    #[must_use]
    pub const fn is_cache_error(&self) -> bool {
        matches!(
            self,
            Self::Cache(_) | Self::ShapeMismatch { .. } | Self::IncompleteShape { .. }
        )
    }

    /// Classify a non-empty GraphQL `errors` array
    #[must_use]
    pub fn from_graphql(errors: Vec<GraphQlError>) -> Self {
        match errors
            .iter()
            .find(|e| e.code() == Some(UNAUTHENTICATED_CODE))
        {
            Some(err) => Self::Unauthenticated(err.message.clone()),
            None => Self::GraphQl(errors),
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
