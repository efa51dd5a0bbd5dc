//! Key/value source interface definitions
//!
//! A source is a plain lookup table: it hands back the raw string stored under
//! a key, or nothing. Type conversion never happens at this layer.

use std::sync::Arc;
use thiserror::Error;

/// Result type for source lookups
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors raised by the source contract itself
///
/// A missing key is *not* an error at this layer; it is reported as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The caller passed an empty key
    #[error("Configuration key must not be empty")]
    EmptyKey,

    /// The backing store holds a value that is not valid UTF-8
    #[error("Value for key '{key}' is not valid unicode")]
    NotUnicode { key: String },
}

/// Key/value lookup provider
///
/// Implementations wrap dictionaries, environment maps, closures or any other
/// backend. They must be deterministic for a fixed snapshot of their backing
/// data and must return values verbatim.
///
/// Resolvers may be shared across threads; a source used that way must itself
/// be safe for concurrent reads.
pub trait ConfigSource {
    /// Get the raw value stored under `key`
    ///
    /// Returns `Ok(None)` when the key is undefined and
    /// [`SourceError::EmptyKey`] when `key` is empty.
    fn lookup(&self, key: &str) -> SourceResult<Option<String>>;

    /// Human readable description used in diagnostics
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

/// Reject keys that can never name a configuration value
pub fn validate_key(key: &str) -> SourceResult<()> {
    if key.is_empty() {
        return Err(SourceError::EmptyKey);
    }
    Ok(())
}

impl<S: ConfigSource + ?Sized> ConfigSource for &S {
    fn lookup(&self, key: &str) -> SourceResult<Option<String>> {
        (**self).lookup(key)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Box<S> {
    fn lookup(&self, key: &str) -> SourceResult<Option<String>> {
        (**self).lookup(key)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Arc<S> {
    fn lookup(&self, key: &str) -> SourceResult<Option<String>> {
        (**self).lookup(key)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
