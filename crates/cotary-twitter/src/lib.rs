//! Minimal Twitter v1.1 REST client.
//!
//! Covers the single call cotary needs: posting a status update with
//! OAuth 1.0a request signing. One request per call, no retry.

mod client;
mod error;
mod oauth;

pub use client::{PostedUpdate, TwitterClient, DEFAULT_API_BASE};
pub use error::{ApiError, ErrorDetail};
pub use oauth::OauthKeys;
