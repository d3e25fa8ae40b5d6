//! Blocking client for the `statuses/update` call.

use chrono::DateTime;
use serde::Deserialize;

use crate::error::{ApiError, ErrorBody};
use crate::oauth::{self, OauthKeys};

/// Production API base.
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com/1.1";

/// Twitter's `created_at` timestamp format, e.g.
/// `Wed Oct 10 20:19:24 +0000 2018`.
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// A posted status update.
#[derive(Debug, Clone)]
pub struct PostedUpdate {
    /// Status id (`id_str` in the response).
    pub id: String,

    /// `created_at` converted to Unix epoch seconds.
    pub created_at_epoch: i64,
}

/// Success body shape for `statuses/update.json`.
#[derive(Debug, Deserialize)]
struct UpdateBody {
    id_str: String,
    created_at: String,
}

/// Blocking Twitter client for a single account.
pub struct TwitterClient {
    keys: OauthKeys,
    api_base: String,
    http: reqwest::blocking::Client,
}

impl TwitterClient {
    /// Create a client for the production API.
    pub fn new(keys: OauthKeys) -> Self {
        Self::with_api_base(keys, DEFAULT_API_BASE)
    }

    /// Create a client against an alternate API base.
    pub fn with_api_base(keys: OauthKeys, api_base: impl Into<String>) -> Self {
        Self {
            keys,
            api_base: api_base.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Post a status update. One request, no retry.
    pub fn post_update(&self, status: &str) -> Result<PostedUpdate, ApiError> {
        let url = format!("{}/statuses/update.json", self.api_base);
        let params = [("status", status)];

        let authorization = oauth::authorization_header(
            &self.keys,
            "POST",
            &url,
            &params,
            &oauth::nonce(),
            chrono::Utc::now().timestamp(),
        );

        let response = self
            .http
            .post(&url)
            .header("Authorization", authorization)
            .form(&params)
            .send()?;

        let status_code = response.status().as_u16();
        let body = response.text()?;

        if !(200..300).contains(&status_code) {
            return Err(parse_error_body(status_code, &body));
        }
        parse_update_body(&body)
    }
}

/// Parse a success body into a [`PostedUpdate`].
fn parse_update_body(body: &str) -> Result<PostedUpdate, ApiError> {
    let update: UpdateBody =
        serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))?;

    let created_at = DateTime::parse_from_str(&update.created_at, CREATED_AT_FORMAT)
        .map_err(|e| ApiError::Malformed(format!("created_at: {}", e)))?;

    Ok(PostedUpdate {
        id: update.id_str,
        created_at_epoch: created_at.timestamp(),
    })
}

/// Parse an error body; unparseable bodies yield empty error details.
fn parse_error_body(status: u16, body: &str) -> ApiError {
    let errors = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.errors)
        .unwrap_or_default();
    ApiError::Api { status, errors }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_update_body() {
        let body = r#"{
            "id_str": "1050118621198921728",
            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
            "text": "I own a file with checksum sha256:abc (cotary)"
        }"#;

        let update = parse_update_body(body).unwrap();
        assert_eq!(update.id, "1050118621198921728");
        assert_eq!(update.created_at_epoch, 1539202764);
    }

    #[test]
    fn test_parse_update_body_bad_timestamp() {
        let body = r#"{"id_str": "1", "created_at": "not a date"}"#;
        assert!(matches!(
            parse_update_body(body),
            Err(ApiError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_update_body_missing_fields() {
        assert!(matches!(
            parse_update_body("{}"),
            Err(ApiError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_error_body_duplicate() {
        let err = parse_error_body(
            403,
            r#"{"errors":[{"code":187,"message":"Status is a duplicate."}]}"#,
        );

        match err {
            ApiError::Api { status, errors } => {
                assert_eq!(status, 403);
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].code, 187);
                assert_eq!(errors[0].message, "Status is a duplicate.");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_body_unparseable() {
        let err = parse_error_body(500, "<html>Internal Server Error</html>");

        match err {
            ApiError::Api { status, errors } => {
                assert_eq!(status, 500);
                assert!(errors.is_empty());
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_details_accessor() {
        let err = parse_error_body(403, r#"{"errors":[{"code":187,"message":"dup"}]}"#);
        assert_eq!(err.error_details().len(), 1);

        let malformed = ApiError::Malformed("nope".to_string());
        assert!(malformed.error_details().is_empty());
    }
}
