//! Configuration resolution integration tests
//!
//! Exercises file loading, deep-merge precedence, and dotted lookup through
//! the public API.

use cotary::config::{Config, ConfigError};
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_defaults_without_file() {
    let config = Config::from_defaults();

    assert_eq!(
        config.get_str("twitter.message").unwrap(),
        "I own a file with checksum {checksum} (cotary)"
    );
    // credentials default to null: failing lookup reports them missing,
    // optional lookup yields None
    assert!(matches!(
        config.get("twitter.consumer.key"),
        Err(ConfigError::KeyNotFound { .. })
    ));
    assert_eq!(config.get_opt_str("twitter.access_token.secret"), None);
}

#[test]
fn test_file_overrides_defaults() {
    let file = config_file(
        r#"
[twitter]
message = "Proof of possession: {checksum}"

[twitter.consumer]
key = "consumer-key"
secret = "consumer-secret"

[twitter.access_token]
key = "token-key"
secret = "token-secret"
"#,
    );

    let config = Config::load(file.path()).unwrap();

    assert_eq!(
        config.get_str("twitter.message").unwrap(),
        "Proof of possession: {checksum}"
    );
    assert_eq!(config.get_str("twitter.consumer.key").unwrap(), "consumer-key");
    assert_eq!(
        config.get_str("twitter.access_token.secret").unwrap(),
        "token-secret"
    );
}

#[test]
fn test_partial_override_keeps_other_defaults() {
    let file = config_file(
        r#"
[twitter.consumer]
key = "only-this"
"#,
    );

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.get_str("twitter.consumer.key").unwrap(), "only-this");
    // siblings keep their defaults
    assert_eq!(config.get_opt_str("twitter.consumer.secret"), None);
    assert_eq!(
        config.get_str("twitter.message").unwrap(),
        "I own a file with checksum {checksum} (cotary)"
    );
}

#[test]
fn test_malformed_file_is_fatal() {
    let file = config_file("[twitter\nmessage = ");

    match Config::load(file.path()) {
        Err(ConfigError::Parse(_)) => {}
        other => panic!("expected Parse error, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-config.toml");

    assert!(matches!(Config::load(&path), Err(ConfigError::Io(_))));
}

#[test]
fn test_lookup_failure_names_first_missing_segment() {
    let config = Config::from_defaults();

    match config.get("twitter.oops.key") {
        Err(ConfigError::KeyNotFound { segment, key }) => {
            assert_eq!(segment, "oops");
            assert_eq!(key, "twitter.oops.key");
        }
        other => panic!("expected KeyNotFound, got {:?}", other),
    }
}

#[test]
fn test_lookup_stops_at_scalar() {
    let file = config_file(
        r#"
[twitter]
message = "plain"
"#,
    );
    let config = Config::load(file.path()).unwrap();

    // "message" is a scalar; descending further fails on the next segment
    match config.get("twitter.message.deeper") {
        Err(ConfigError::KeyNotFound { segment, .. }) => assert_eq!(segment, "deeper"),
        other => panic!("expected KeyNotFound, got {:?}", other),
    }
}
