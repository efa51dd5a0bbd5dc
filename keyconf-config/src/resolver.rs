//! Typed value resolution on top of a key/value source

use crate::context::FormatContext;
use crate::convert::{self, FromConfig};
use crate::error::{ResolveError, ResolveResult};
use crate::registry::ParserRegistry;
use keyconf_interfaces::{validate_key, ConfigSource};
use log::debug;
use std::str::FromStr;

/// Converts raw source values into typed results
///
/// The resolver holds no mutable state; every call is an independent lookup
/// followed by a conversion, so one instance can be shared freely between
/// threads as long as the sources it reads from allow concurrent reads.
#[derive(Debug, Default)]
pub struct Resolver {
    parsers: ParserRegistry,
    default_context: Option<FormatContext>,
}

impl Resolver {
    /// Resolver with no custom parse entry points and no default context
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::default()
    }

    pub fn parsers(&self) -> &ParserRegistry {
        &self.parsers
    }

    /// Context used when a call does not supply one
    pub fn default_context(&self) -> Option<&FormatContext> {
        self.default_context.as_ref()
    }

    /// Get the raw value for `key`, failing with `MissingKey` when absent
    pub fn require_string(
        &self,
        source: &(impl ConfigSource + ?Sized),
        key: &str,
    ) -> ResolveResult<String> {
        self.fetch(source, key)?
            .ok_or_else(|| missing_key(source, key))
    }

    /// Get and convert the value for `key`; `Ok(None)` means the key is absent
    pub fn try_get<T: FromConfig>(
        &self,
        source: &(impl ConfigSource + ?Sized),
        key: &str,
    ) -> ResolveResult<Option<T>> {
        self.try_get_in(source, key, None)
    }

    /// [`Resolver::try_get`] with an explicit format context
    pub fn try_get_in<T: FromConfig>(
        &self,
        source: &(impl ConfigSource + ?Sized),
        key: &str,
        context: Option<&FormatContext>,
    ) -> ResolveResult<Option<T>> {
        let Some(raw) = self.fetch(source, key)? else {
            return Ok(None);
        };

        let context = context.or(self.default_context.as_ref());
        convert::convert(key, &raw, context, &self.parsers).map(Some)
    }

    /// Get and convert the value for `key`, failing with `MissingKey` when absent
    pub fn require<T: FromConfig>(
        &self,
        source: &(impl ConfigSource + ?Sized),
        key: &str,
    ) -> ResolveResult<T> {
        self.require_in(source, key, None)
    }

    /// [`Resolver::require`] with an explicit format context
    pub fn require_in<T: FromConfig>(
        &self,
        source: &(impl ConfigSource + ?Sized),
        key: &str,
        context: Option<&FormatContext>,
    ) -> ResolveResult<T> {
        self.try_get_in(source, key, context)?
            .ok_or_else(|| missing_key(source, key))
    }

    /// Get and convert the value for `key`, using `default` when absent
    ///
    /// Malformed values still fail; only absence falls back.
    pub fn get_or<T: FromConfig>(
        &self,
        source: &(impl ConfigSource + ?Sized),
        key: &str,
        default: T,
    ) -> ResolveResult<T> {
        Ok(self.try_get(source, key)?.unwrap_or(default))
    }

    fn fetch(
        &self,
        source: &(impl ConfigSource + ?Sized),
        key: &str,
    ) -> ResolveResult<Option<String>> {
        validate_key(key)?;
        let raw = source.lookup(key)?;
        if raw.is_none() {
            debug!("Configuration key '{}' not found in {}", key, source.describe());
        }
        Ok(raw)
    }
}

fn missing_key(source: &(impl ConfigSource + ?Sized), key: &str) -> ResolveError {
    ResolveError::MissingKey {
        key: key.to_string(),
        source_name: source.describe(),
    }
}

/// Builder for [`Resolver`]
#[derive(Debug, Default)]
pub struct ResolverBuilder {
    parsers: ParserRegistry,
    default_context: Option<FormatContext>,
}

impl ResolverBuilder {
    /// Replace the parse entry point table
    pub fn with_parsers(mut self, parsers: ParserRegistry) -> Self {
        self.parsers = parsers;
        self
    }

    pub fn with_parse<T: 'static>(
        self,
        parse: impl Fn(&str) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            parsers: self.parsers.with_parse(parse),
            ..self
        }
    }

    pub fn with_parse_in_context<T: 'static>(
        self,
        parse: impl Fn(&str, &FormatContext) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            parsers: self.parsers.with_parse_in_context(parse),
            ..self
        }
    }

    pub fn with_from_str<T: FromStr + 'static>(self) -> Self {
        Self {
            parsers: self.parsers.with_from_str::<T>(),
            ..self
        }
    }

    pub fn with_default_context(mut self, context: FormatContext) -> Self {
        self.default_context = Some(context);
        self
    }

    pub fn build(self) -> Resolver {
        Resolver {
            parsers: self.parsers,
            default_context: self.default_context,
        }
    }
}

/// Typed accessors on every [`ConfigSource`], backed by a default [`Resolver`]
pub trait ConfigSourceExt: ConfigSource {
    /// Raw value for `key`; fails with `MissingKey` when absent
    fn get_value(&self, key: &str) -> ResolveResult<String> {
        Resolver::new().require_string(self, key)
    }

    /// Converted value for `key`; `Ok(None)` when absent
    fn try_get_value<T: FromConfig>(&self, key: &str) -> ResolveResult<Option<T>> {
        Resolver::new().try_get(self, key)
    }

    fn try_get_value_in<T: FromConfig>(
        &self,
        key: &str,
        context: &FormatContext,
    ) -> ResolveResult<Option<T>> {
        Resolver::new().try_get_in(self, key, Some(context))
    }

    /// Converted value for `key`; fails with `MissingKey` when absent
    fn get_value_as<T: FromConfig>(&self, key: &str) -> ResolveResult<T> {
        Resolver::new().require(self, key)
    }

    fn get_value_in<T: FromConfig>(&self, key: &str, context: &FormatContext) -> ResolveResult<T> {
        Resolver::new().require_in(self, key, Some(context))
    }

    fn get_value_or<T: FromConfig>(&self, key: &str, default: T) -> ResolveResult<T> {
        Resolver::new().get_or(self, key, default)
    }
}

impl<S: ConfigSource + ?Sized> ConfigSourceExt for S {}
