//! Dictionary-backed sources

use keyconf_interfaces::{validate_key, ConfigSource, SourceResult};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};

/// Map whose values can be looked up by string key and rendered as text
pub trait StringMap {
    fn get_string(&self, key: &str) -> Option<String>;

    fn entry_count(&self) -> usize;
}

impl<K, V, S> StringMap for HashMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: Display,
    S: BuildHasher,
{
    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).map(ToString::to_string)
    }

    fn entry_count(&self) -> usize {
        self.len()
    }
}

impl<K, V> StringMap for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: Display,
{
    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).map(ToString::to_string)
    }

    fn entry_count(&self) -> usize {
        self.len()
    }
}

impl<M: StringMap + ?Sized> StringMap for &M {
    fn get_string(&self, key: &str) -> Option<String> {
        (**self).get_string(key)
    }

    fn entry_count(&self) -> usize {
        (**self).entry_count()
    }
}

/// Source reading from an in-memory map
#[derive(Debug, Clone, Default)]
pub struct MapSource<M> {
    map: M,
}

impl<M: StringMap> MapSource<M> {
    pub fn new(map: M) -> Self {
        Self { map }
    }

    pub fn inner(&self) -> &M {
        &self.map
    }

    pub fn into_inner(self) -> M {
        self.map
    }
}

impl<M: StringMap> ConfigSource for MapSource<M> {
    fn lookup(&self, key: &str) -> SourceResult<Option<String>> {
        validate_key(key)?;
        Ok(self.map.get_string(key))
    }

    fn describe(&self) -> String {
        format!("map ({} entries)", self.map.entry_count())
    }
}
