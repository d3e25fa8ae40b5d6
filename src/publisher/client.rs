//! Remote status-client boundary.
//!
//! The publisher only requires the capability to post a single status
//! update; the concrete HTTP client lives in the `cotary-twitter` crate and
//! tests substitute mocks.

use cotary_twitter::TwitterClient;

/// A successfully posted status, as reported by the remote service.
#[derive(Debug, Clone)]
pub struct PostedStatus {
    /// Remote identifier of the published status.
    pub id: String,

    /// Publish time in Unix epoch seconds.
    pub created_at_epoch: i64,
}

/// Structured failure payload from the remote service.
///
/// `errors` holds the `(code, message)` pairs the service reported; it is
/// empty when the payload was absent or unparseable.
#[derive(Debug, Clone, Default)]
pub struct RemoteFailure {
    pub errors: Vec<RemoteErrorDetail>,
}

/// One `(code, message)` pair from a remote failure payload.
#[derive(Debug, Clone)]
pub struct RemoteErrorDetail {
    pub code: i64,
    pub message: String,
}

/// Capability to publish one status update.
///
/// A single call per publish attempt; no retry happens at this boundary.
pub trait StatusClient {
    fn post_update(&self, text: &str) -> Result<PostedStatus, RemoteFailure>;
}

impl StatusClient for TwitterClient {
    fn post_update(&self, text: &str) -> Result<PostedStatus, RemoteFailure> {
        match TwitterClient::post_update(self, text) {
            Ok(update) => Ok(PostedStatus {
                id: update.id,
                created_at_epoch: update.created_at_epoch,
            }),
            Err(err) => Err(RemoteFailure {
                errors: err
                    .error_details()
                    .iter()
                    .map(|d| RemoteErrorDetail {
                        code: d.code,
                        message: d.message.clone(),
                    })
                    .collect(),
            }),
        }
    }
}
