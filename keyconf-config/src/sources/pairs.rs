//! Ordered name/value collections

use keyconf_interfaces::{validate_key, ConfigSource, SourceResult};

/// Separator placed between the values of a repeated key
const VALUE_SEPARATOR: &str = ",";

/// Source over an ordered list of name/value pairs
///
/// Names match ASCII case-insensitively. A name that occurs more than once
/// yields all of its values joined with `,` in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairsSource {
    pairs: Vec<(String, String)>,
}

impl PairsSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for PairsSource {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl ConfigSource for PairsSource {
    fn lookup(&self, key: &str) -> SourceResult<Option<String>> {
        validate_key(key)?;
        let values: Vec<&str> = self
            .pairs
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
            .collect();

        if values.is_empty() {
            return Ok(None);
        }
        Ok(Some(values.join(VALUE_SEPARATOR)))
    }

    fn describe(&self) -> String {
        format!("name/value pairs ({} entries)", self.pairs.len())
    }
}
