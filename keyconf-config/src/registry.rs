//! Parse entry points registered for types without a built-in conversion
//!
//! Each type may register a context-aware entry point, a context-free one, or
//! both. When a format context is supplied and a context-aware entry point
//! exists, it is the only one invoked.

use crate::context::FormatContext;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

type InContextParser<T> = Box<dyn Fn(&str, &FormatContext) -> Option<T> + Send + Sync>;
type PlainParser<T> = Box<dyn Fn(&str) -> Option<T> + Send + Sync>;

/// Entry points registered for one target type
struct ParseEntry<T> {
    in_context: Option<InContextParser<T>>,
    plain: Option<PlainParser<T>>,
}

impl<T> Default for ParseEntry<T> {
    fn default() -> Self {
        Self {
            in_context: None,
            plain: None,
        }
    }
}

/// Which entry point produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    InContext,
    Plain,
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryPoint::InContext => f.write_str("context-aware"),
            EntryPoint::Plain => f.write_str("context-free"),
        }
    }
}

/// Result of running the parse protocol
#[derive(Debug, PartialEq, Eq)]
pub enum ParseOutcome<T> {
    Parsed(T),
    /// An entry point ran and reported failure
    Rejected(EntryPoint),
    /// No applicable entry point is registered for the type
    NoEntryPoint,
}

/// Table mapping target types to their parse entry points
#[derive(Default)]
pub struct ParserRegistry {
    entries: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a context-free entry point for `T`
    pub fn with_parse<T: 'static>(
        mut self,
        parse: impl Fn(&str) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        self.register_parse(parse);
        self
    }

    /// Register a context-aware entry point for `T`
    pub fn with_parse_in_context<T: 'static>(
        mut self,
        parse: impl Fn(&str, &FormatContext) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        self.register_parse_in_context(parse);
        self
    }

    /// Use `T`'s [`FromStr`] implementation as its context-free entry point
    pub fn with_from_str<T: FromStr + 'static>(self) -> Self {
        self.with_parse::<T>(|raw| raw.parse().ok())
    }

    pub fn register_parse<T: 'static>(
        &mut self,
        parse: impl Fn(&str) -> Option<T> + Send + Sync + 'static,
    ) {
        self.update_entry::<T>(|entry| entry.plain = Some(Box::new(parse)));
    }

    pub fn register_parse_in_context<T: 'static>(
        &mut self,
        parse: impl Fn(&str, &FormatContext) -> Option<T> + Send + Sync + 'static,
    ) {
        self.update_entry::<T>(|entry| entry.in_context = Some(Box::new(parse)));
    }

    /// Whether any entry point is registered for `T`
    pub fn contains<T: 'static>(&self) -> bool {
        self.entry::<T>().is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the parse protocol for `T`
    pub fn parse<T: 'static>(&self, raw: &str, context: Option<&FormatContext>) -> ParseOutcome<T> {
        let Some(entry) = self.entry::<T>() else {
            return ParseOutcome::NoEntryPoint;
        };

        if let (Some(context), Some(parse)) = (context, entry.in_context.as_ref()) {
            return match parse(raw, context) {
                Some(value) => ParseOutcome::Parsed(value),
                None => ParseOutcome::Rejected(EntryPoint::InContext),
            };
        }

        match entry.plain.as_ref() {
            Some(parse) => match parse(raw) {
                Some(value) => ParseOutcome::Parsed(value),
                None => ParseOutcome::Rejected(EntryPoint::Plain),
            },
            None => ParseOutcome::NoEntryPoint,
        }
    }

    fn entry<T: 'static>(&self) -> Option<&ParseEntry<T>> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<ParseEntry<T>>())
    }

    fn update_entry<T: 'static>(&mut self, update: impl FnOnce(&mut ParseEntry<T>)) {
        let id = TypeId::of::<T>();
        let mut entry = self
            .entries
            .remove(&id)
            .and_then(|entry| entry.downcast::<ParseEntry<T>>().ok())
            .map(|entry| *entry)
            .unwrap_or_default();
        update(&mut entry);
        self.entries.insert(id, Box::new(entry));
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("types", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    struct Parseable(u8);

    fn both() -> ParserRegistry {
        ParserRegistry::new()
            .with_parse_in_context::<Parseable>(|_, _| Some(Parseable(1)))
            .with_parse::<Parseable>(|_| Some(Parseable(2)))
    }

    #[test]
    fn test_context_aware_entry_wins_when_context_given() {
        let registry = both();
        let ctx = FormatContext::invariant();

        assert_eq!(registry.parse::<Parseable>("Bar", Some(&ctx)), ParseOutcome::Parsed(Parseable(1)));
        assert_eq!(registry.parse::<Parseable>("Bar", None), ParseOutcome::Parsed(Parseable(2)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_plain_entry_serves_calls_with_context() {
        let registry = ParserRegistry::new().with_parse::<Parseable>(|_| Some(Parseable(2)));
        let ctx = FormatContext::invariant();

        assert_eq!(registry.parse::<Parseable>("Bar", Some(&ctx)), ParseOutcome::Parsed(Parseable(2)));
    }

    #[test]
    fn test_context_only_entry_needs_a_context() {
        let registry =
            ParserRegistry::new().with_parse_in_context::<Parseable>(|_, _| Some(Parseable(1)));

        assert_eq!(registry.parse::<Parseable>("Bar", None), ParseOutcome::NoEntryPoint);
    }

    #[test]
    fn test_rejection_and_absence() {
        let registry = ParserRegistry::new().with_parse::<Parseable>(|_| None);

        assert_eq!(
            registry.parse::<Parseable>("Bar", None),
            ParseOutcome::Rejected(EntryPoint::Plain)
        );
        assert_eq!(registry.parse::<u8>("1", None), ParseOutcome::NoEntryPoint);
        assert!(!registry.contains::<u8>());
    }

    #[test]
    fn test_from_str_entry() {
        let registry = ParserRegistry::new().with_from_str::<std::net::IpAddr>();

        assert!(matches!(
            registry.parse::<std::net::IpAddr>("127.0.0.1", None),
            ParseOutcome::Parsed(_)
        ));
        assert_eq!(
            registry.parse::<std::net::IpAddr>("not-an-ip", None),
            ParseOutcome::Rejected(EntryPoint::Plain)
        );
    }
}
