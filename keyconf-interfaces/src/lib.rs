//! # Keyconf Interfaces
//!
//! The key/value source contract that every keyconf backend satisfies.
//!
//! This crate is the neutral ground between the stock source adapters and the
//! typed resolver: both depend on it, neither depends on the other's internals.
//!
//! ## Main Interfaces
//!
//! - [`ConfigSource`] - "given a key, return a raw string or absence"
//! - [`SourceError`] - argument errors raised by the contract itself

pub mod source;

// Re-export commonly used types
pub use source::{validate_key, ConfigSource, SourceError, SourceResult};
