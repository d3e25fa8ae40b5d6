//! Resolved configuration with dotted-path lookup
//!
//! A user config file is parsed, converted to a JSON tree, and merged over
//! the built-in defaults. The merged tree is immutable and queried through
//! a two-phase lookup: a key is first tried literally, and only on a miss
//! is it split on `.` and walked segment by segment.

use serde_json::Value;
use std::fs;
use std::path::Path;

use super::defaults::BuiltinDefaults;
use super::merge::deep_merge;

/// Commented starter config written on first run.
pub const CONFIG_TEMPLATE: &str = r#"# cotary configuration
#
# Twitter API keys. Create an app at https://developer.twitter.com/apps and
# fill in all four credential values to enable publishing.

[twitter]
message = "I own a file with checksum {checksum} (cotary)"

[twitter.consumer]
# key = ""
# secret = ""

[twitter.access_token]
# key = ""
# secret = ""
"#;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(String),

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("unknown config part {segment} in key {key}")]
    KeyNotFound { segment: String, key: String },

    #[error("config value {key} is not a string")]
    NotAString { key: String },
}

/// Merged configuration tree, immutable after construction.
#[derive(Debug, Clone)]
pub struct Config {
    tree: Value,
}

impl Config {
    /// Built-in defaults only.
    pub fn from_defaults() -> Self {
        Self {
            tree: BuiltinDefaults::default().to_value(),
        }
    }

    /// Merge an override tree over a default tree.
    pub fn resolve(defaults: Value, overrides: Value) -> Self {
        Self {
            tree: deep_merge(defaults, overrides),
        }
    }

    /// Load a config file and merge it over the built-in defaults.
    ///
    /// A malformed document aborts resolution; no partial merge is applied.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        let toml_value: toml::Value = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;

        Ok(Self::resolve(
            BuiltinDefaults::default().to_value(),
            toml_to_json(toml_value),
        ))
    }

    /// Look up a value by key.
    ///
    /// The key is first tried as a literal top-level key, so keys that
    /// legitimately contain dots shadow the dotted interpretation. Only on
    /// a literal miss is the key split on `.` and walked segment by
    /// segment, failing at the first missing segment. A `null` leaf counts
    /// as not found; optional fields go through [`Config::get_opt`]
    /// instead.
    pub fn get(&self, key: &str) -> Result<&Value, ConfigError> {
        if let Some(value) = self.tree.get(key) {
            return found(value, key, key);
        }

        let mut current = &self.tree;
        let mut last = key;
        for segment in key.split('.') {
            current = current
                .get(segment)
                .ok_or_else(|| ConfigError::KeyNotFound {
                    segment: segment.to_string(),
                    key: key.to_string(),
                })?;
            last = segment;
        }
        found(current, last, key)
    }

    /// Non-failing lookup; `None` for missing paths and null leaves.
    pub fn get_opt(&self, key: &str) -> Option<&Value> {
        self.get(key).ok()
    }

    /// Non-failing string lookup; `None` for missing, null, or non-string
    /// values. Used for optional fields such as the credentials.
    pub fn get_opt_str(&self, key: &str) -> Option<&str> {
        self.get_opt(key).and_then(Value::as_str)
    }

    /// Required string lookup.
    pub fn get_str(&self, key: &str) -> Result<&str, ConfigError> {
        self.get(key)?
            .as_str()
            .ok_or_else(|| ConfigError::NotAString {
                key: key.to_string(),
            })
    }

    /// The underlying merged tree.
    pub fn tree(&self) -> &Value {
        &self.tree
    }
}

fn found<'a>(value: &'a Value, segment: &str, key: &str) -> Result<&'a Value, ConfigError> {
    if value.is_null() {
        return Err(ConfigError::KeyNotFound {
            segment: segment.to_string(),
            key: key.to_string(),
        });
    }
    Ok(value)
}

/// Convert a TOML document to a JSON tree.
fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            Value::Object(map)
        }
    }
}
