//! Closure-backed sources

use keyconf_interfaces::{validate_key, ConfigSource, SourceResult};
use std::fmt;

/// Source that asks a closure for each value
pub struct FnSource<F> {
    getter: F,
}

impl<F> FnSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new(getter: F) -> Self {
        Self { getter }
    }
}

impl<F> ConfigSource for FnSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> SourceResult<Option<String>> {
        validate_key(key)?;
        Ok((self.getter)(key))
    }

    fn describe(&self) -> String {
        "delegate".to_string()
    }
}

impl<F> fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSource").finish_non_exhaustive()
    }
}
