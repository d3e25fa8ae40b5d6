//! Layered configuration
//!
//! Built-in defaults deep-merged with an optional user config file:
//! 1. Built-in defaults (compiled in)
//! 2. User config (~/.config/cotary/config.toml)
//!
//! The merged tree is immutable for the rest of the run and queried through
//! dotted-path lookup.

mod defaults;
mod merge;
mod resolved;

pub use defaults::{BuiltinDefaults, DEFAULT_MESSAGE};
pub use merge::deep_merge;
pub use resolved::{Config, ConfigError, CONFIG_TEMPLATE};
