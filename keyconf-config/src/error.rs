//! Resolution error types

use keyconf_interfaces::SourceError;
use thiserror::Error;

/// Resolution result type
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Resolution errors
///
/// `MissingKey`, `BadFormat` and `Unparseable` are the three kinds callers are
/// expected to tell apart. `InvalidKey` covers argument errors raised by the
/// source contract before any lookup happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The key has no value in the source
    #[error("The key '{key}' could not be found in the configuration '{source_name}'")]
    MissingKey { key: String, source_name: String },

    /// The value exists but does not conform to the target type's format
    #[error("Value '{value}' for key '{key}' is not a valid {target}: {reason}")]
    BadFormat {
        key: String,
        target: &'static str,
        value: String,
        reason: String,
    },

    /// The target type has no conversion strategy at all
    #[error("No conversion strategy is available for {target} (key '{key}')")]
    Unparseable { key: String, target: &'static str },

    /// The source rejected the key itself
    #[error("Invalid configuration key: {0}")]
    InvalidKey(#[from] SourceError),
}

impl ResolveError {
    /// Key the failed resolution was asked for, when known
    pub fn key(&self) -> Option<&str> {
        match self {
            ResolveError::MissingKey { key, .. }
            | ResolveError::BadFormat { key, .. }
            | ResolveError::Unparseable { key, .. } => Some(key),
            ResolveError::InvalidKey(SourceError::NotUnicode { key }) => Some(key),
            ResolveError::InvalidKey(SourceError::EmptyKey) => None,
        }
    }

    pub fn is_missing_key(&self) -> bool {
        matches!(self, ResolveError::MissingKey { .. })
    }

    pub fn is_bad_format(&self) -> bool {
        matches!(self, ResolveError::BadFormat { .. })
    }

    pub fn is_unparseable(&self) -> bool {
        matches!(self, ResolveError::Unparseable { .. })
    }

    /// Resolution is a pure function of the source snapshot, so repeating a
    /// failed call can never change its outcome.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
