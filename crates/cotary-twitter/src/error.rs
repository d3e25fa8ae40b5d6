//! Client error types.

use serde::Deserialize;

/// One `(code, message)` entry from a Twitter error payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    pub code: i64,
    pub message: String,
}

/// Error body shape: `{"errors": [{"code": ..., "message": ...}]}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

/// Errors from the Twitter API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with an error status.
    ///
    /// `errors` holds the structured details when the body was parseable
    /// and is empty otherwise.
    #[error("twitter api returned HTTP {status}")]
    Api { status: u16, errors: Vec<ErrorDetail> },

    /// The API answered success with a body we could not interpret.
    #[error("unexpected response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Structured error details; empty when none were recoverable.
    pub fn error_details(&self) -> &[ErrorDetail] {
        match self {
            ApiError::Api { errors, .. } => errors,
            _ => &[],
        }
    }
}
