//! Built-in configuration defaults
//!
//! Constructed directly as a typed value; no document parsing happens at
//! startup for constants known at build time.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default status message template. `{checksum}` is replaced with the
/// rendered checksum at publish time.
pub const DEFAULT_MESSAGE: &str = "I own a file with checksum {checksum} (cotary)";

/// Built-in default configuration values.
///
/// The credential fields default to `None`: a fresh install can compute
/// checksums but is not configured to publish until all four are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Status message template.
    pub message: String,

    /// Twitter API consumer key.
    pub consumer_key: Option<String>,

    /// Twitter API consumer secret.
    pub consumer_secret: Option<String>,

    /// Twitter access token key.
    pub access_token_key: Option<String>,

    /// Twitter access token secret.
    pub access_token_secret: Option<String>,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            consumer_key: None,
            consumer_secret: None,
            access_token_key: None,
            access_token_secret: None,
        }
    }
}

impl BuiltinDefaults {
    /// Convert to a JSON tree for merging.
    pub fn to_value(&self) -> Value {
        json!({
            "twitter": {
                "message": self.message,
                "consumer": {
                    "key": self.consumer_key,
                    "secret": self.consumer_secret
                },
                "access_token": {
                    "key": self.access_token_key,
                    "secret": self.access_token_secret
                }
            }
        })
    }
}
