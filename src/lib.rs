//! cotary - prove possession of a file's content without disclosing it.
//!
//! Computes a cryptographic checksum of a file and publishes it through a
//! Twitter account, producing a timestamped public record that the content
//! existed.

pub mod checksum;
pub mod config;
pub mod publisher;

pub use checksum::{Checksum, ChecksumError};
pub use config::{Config, ConfigError};
pub use publisher::{PublishError, Published, Publisher, StatusClient};
