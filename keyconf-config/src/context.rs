//! Format context: the locale-like conventions applied to numeric text

use std::borrow::Cow;
use std::fmt;

/// Locale/format conventions used while interpreting raw text
///
/// A call without a context behaves as if [`FormatContext::invariant`] had
/// been supplied. Date layouts are fixed literals and are not affected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatContext {
    name: Cow<'static, str>,
    decimal_separator: char,
    group_separator: Option<char>,
}

impl FormatContext {
    /// Culture-neutral conventions: `.` for decimals, `,` for digit groups
    pub const fn invariant() -> Self {
        Self {
            name: Cow::Borrowed("invariant"),
            decimal_separator: '.',
            group_separator: Some(','),
        }
    }

    /// Create a named context starting from invariant separators
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Self::invariant()
        }
    }

    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    pub fn with_group_separator(mut self, separator: char) -> Self {
        self.group_separator = Some(separator);
        self
    }

    pub fn without_group_separator(mut self) -> Self {
        self.group_separator = None;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn group_separator(&self) -> Option<char> {
        self.group_separator
    }

    /// Trimmed integer text; digit groups are not accepted for integers
    pub fn normalize_integer<'a>(&self, raw: &'a str) -> &'a str {
        raw.trim()
    }

    /// Rewrite floating point text into the `.`-decimal form Rust parses
    pub fn normalize_float(&self, raw: &str) -> String {
        raw.trim()
            .chars()
            .filter(|c| Some(*c) != self.group_separator || *c == self.decimal_separator)
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect()
    }
}

impl Default for FormatContext {
    fn default() -> Self {
        Self::invariant()
    }
}

impl fmt::Display for FormatContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
