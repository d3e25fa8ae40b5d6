//! Publish a checksum through a remote status client.
//!
//! Decides whether publishing is possible, renders the outbound message,
//! performs a single publish attempt, and maps any remote failure into a
//! deterministic `(code, message)` outcome.

mod client;

pub use client::{PostedStatus, RemoteErrorDetail, RemoteFailure, StatusClient};

use crate::checksum::Checksum;
use crate::config::{Config, ConfigError};

/// Twitter error code for "Status is a duplicate."
pub const DUPLICATE_STATUS_CODE: i64 = 187;

/// Synthetic code used when the remote failure payload is absent or
/// malformed.
pub const UNKNOWN_ERROR_CODE: i64 = 8;

/// Message substituted for duplicate-content failures.
pub const DUPLICATE_MESSAGE: &str = "This checksum was already published.";

const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Placeholder in the message template replaced by the rendered checksum.
const CHECKSUM_PLACEHOLDER: &str = "{checksum}";

/// The four credential values needed to reach the Twitter API.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token_key: String,
    pub access_token_secret: String,
}

/// A successfully published checksum.
#[derive(Debug, Clone)]
pub struct Published {
    /// Remote identifier of the published status.
    pub remote_id: String,

    /// Publish time in Unix epoch seconds.
    pub created_at: i64,
}

/// Errors from a publish attempt.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Credentials are incomplete; no network call was attempted.
    #[error("twitter credentials are not configured")]
    NotConfigured,

    /// The remote service rejected the publish call.
    #[error("{message}")]
    Remote { code: i64, message: String },
}

/// Publish coordinator for a resolved configuration.
///
/// No state is retained across publish attempts; each call is independent.
#[derive(Debug)]
pub struct Publisher {
    message: String,
    credentials: Option<Credentials>,
}

impl Publisher {
    /// Build a publisher from a resolved configuration.
    ///
    /// The message template is required. Credentials are optional; their
    /// absence only shows up in [`Publisher::is_configured`].
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let message = config.get_str("twitter.message")?.to_string();
        Ok(Self {
            message,
            credentials: read_credentials(config),
        })
    }

    /// True only when all four credential values are present and non-empty.
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// The credentials, when fully configured.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Render the outbound status text for a checksum.
    pub fn render_message(&self, checksum: &Checksum) -> String {
        self.message
            .replace(CHECKSUM_PLACEHOLDER, &checksum.to_string())
    }

    /// Publish a checksum through the given client.
    ///
    /// Exactly one remote call is made, and none at all when the
    /// credentials are incomplete.
    pub fn publish(
        &self,
        client: &dyn StatusClient,
        checksum: &Checksum,
    ) -> Result<Published, PublishError> {
        if !self.is_configured() {
            return Err(PublishError::NotConfigured);
        }

        let text = self.render_message(checksum);
        match client.post_update(&text) {
            Ok(status) => Ok(Published {
                remote_id: status.id,
                created_at: status.created_at_epoch,
            }),
            Err(failure) => Err(map_remote_failure(failure)),
        }
    }
}

/// Read the four credential values; null, missing, and empty-string values
/// all count as unset.
fn read_credentials(config: &Config) -> Option<Credentials> {
    let field = |key: &str| {
        config
            .get_opt_str(key)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    Some(Credentials {
        consumer_key: field("twitter.consumer.key")?,
        consumer_secret: field("twitter.consumer.secret")?,
        access_token_key: field("twitter.access_token.key")?,
        access_token_secret: field("twitter.access_token.secret")?,
    })
}

/// Map a remote failure payload onto a deterministic `(code, message)`.
///
/// The first structured pair wins; an absent or malformed payload becomes
/// `(8, "Unknown error")`. Code 187 keeps its code but gets a fixed
/// user-facing message.
fn map_remote_failure(failure: RemoteFailure) -> PublishError {
    let (code, message) = match failure.errors.into_iter().next() {
        Some(detail) => (detail.code, detail.message),
        None => (UNKNOWN_ERROR_CODE, UNKNOWN_ERROR_MESSAGE.to_string()),
    };

    let message = if code == DUPLICATE_STATUS_CODE {
        DUPLICATE_MESSAGE.to_string()
    } else {
        message
    };

    PublishError::Remote { code, message }
}
