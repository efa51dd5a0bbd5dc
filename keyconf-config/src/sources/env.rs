//! Process environment sources

use super::map::MapSource;
use keyconf_interfaces::{validate_key, ConfigSource, SourceError, SourceResult};
use std::collections::BTreeMap;
use std::env::VarError;

/// Source reading the live process environment
///
/// With a prefix, key `NAME` is read from the variable `{PREFIX}_NAME`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSource {
    prefix: Option<String>,
}

impl EnvSource {
    /// Read variables by their plain names
    pub fn new() -> Self {
        Self::default()
    }

    /// Read variables named `{prefix}_{key}`
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Copy the matching variables into a map so later reads are stable
    ///
    /// Prefixed variables are stored under their unprefixed key. Variables
    /// whose name or value is not valid unicode are skipped.
    pub fn snapshot(&self) -> MapSource<BTreeMap<String, String>> {
        let vars = std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .filter_map(|(name, value)| match &self.prefix {
                Some(prefix) => name
                    .strip_prefix(prefix.as_str())
                    .and_then(|rest| rest.strip_prefix('_'))
                    .filter(|key| !key.is_empty())
                    .map(|key| (key.to_string(), value)),
                None => Some((name, value)),
            })
            .collect();

        MapSource::new(vars)
    }

    fn variable_name(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, key),
            None => key.to_string(),
        }
    }
}

impl ConfigSource for EnvSource {
    fn lookup(&self, key: &str) -> SourceResult<Option<String>> {
        validate_key(key)?;
        match std::env::var(self.variable_name(key)) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(SourceError::NotUnicode {
                key: key.to_string(),
            }),
        }
    }

    fn describe(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("environment (prefix '{}')", prefix),
            None => "environment".to_string(),
        }
    }
}
