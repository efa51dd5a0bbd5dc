//! Integration tests for keyconf-config

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use keyconf_config::*;
use mockall::mock;
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use temp_env::with_vars;

mock! {
    pub Source {}

    impl ConfigSource for Source {
        fn lookup(&self, key: &str) -> SourceResult<Option<String>>;
        fn describe(&self) -> String;
    }
}

/// Source answering `value` for the key "Foo" and nothing else
fn source_with(value: Option<&str>) -> MockSource {
    let value = value.map(str::to_string);
    let mut source = MockSource::new();
    source
        .expect_lookup()
        .withf(|key: &str| key == "Foo")
        .returning(move |_| Ok(value.clone()));
    source
        .expect_describe()
        .return_const("mock configuration".to_string());
    source
}

fn offset(hours: i32, minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(hours * 3600 + minutes * 60).unwrap()
}

fn at(offset: FixedOffset, h: u32, m: u32, s: u32, ms: u32) -> DateTime<FixedOffset> {
    offset.from_local_datetime(&naive(h, m, s, ms)).single().unwrap()
}

fn naive(h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2001, 2, 3)
        .unwrap()
        .and_hms_milli_opt(h, m, s, ms)
        .unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FooBar {
    Bar,
    Baz,
}

config_enum!(FooBar { Bar, Baz });

#[derive(Debug, PartialEq, Eq)]
struct Parseable {
    value: i32,
}

impl FromConfig for Parseable {
    fn strategy() -> Strategy<Self> {
        Strategy::Custom
    }
}

/// Type with neither a built-in rule nor registered entry points
#[derive(Debug)]
struct Opaque;

impl FromConfig for Opaque {
    fn strategy() -> Strategy<Self> {
        Strategy::Custom
    }
}

fn parseable_resolver() -> Resolver {
    Resolver::builder()
        .with_parse_in_context::<Parseable>(|_, _| Some(Parseable { value: 1 }))
        .with_parse::<Parseable>(|_| Some(Parseable { value: 2 }))
        .build()
}

#[test]
fn test_get_value_string_missing_raises_missing_key() {
    let source = source_with(None);

    let err = source.get_value("Foo").unwrap_err();
    assert_eq!(
        err,
        ResolveError::MissingKey {
            key: "Foo".to_string(),
            source_name: "mock configuration".to_string(),
        }
    );
}

#[test]
fn test_get_value_string_exists() {
    let source = source_with(Some("Bar"));
    assert_eq!(source.get_value("Foo").unwrap(), "Bar");
}

#[test]
fn test_require_missing_raises_missing_key_for_every_target() {
    let source = source_with(None);

    assert!(source.get_value_as::<i32>("Foo").unwrap_err().is_missing_key());
    assert!(source.get_value_as::<NaiveDateTime>("Foo").unwrap_err().is_missing_key());
    assert!(source.get_value_as::<ConfigUri>("Foo").unwrap_err().is_missing_key());
    assert!(source.get_value_as::<FooBar>("Foo").unwrap_err().is_missing_key());
    assert!(source.get_value_as::<Opaque>("Foo").unwrap_err().is_missing_key());
    assert_eq!(
        source.get_value_as::<i32>("Foo").unwrap_err().key(),
        Some("Foo")
    );
}

#[test]
fn test_try_get_missing_returns_none() {
    let source = source_with(None);
    let ctx = FormatContext::invariant();

    assert_eq!(source.try_get_value::<i32>("Foo").unwrap(), None);
    assert_eq!(source.try_get_value_in::<i32>("Foo", &ctx).unwrap(), None);
    assert!(source.try_get_value::<Opaque>("Foo").unwrap().is_none());
}

#[test]
fn test_offsetless_layouts() {
    let cases = [
        ("2001-02-03T12:39:23.987", naive(12, 39, 23, 987)),
        ("2001-02-03T12:39:23", naive(12, 39, 23, 0)),
        ("2001-02-03T12:39", naive(12, 39, 0, 0)),
        ("2001-02-03", naive(0, 0, 0, 0)),
    ];

    for (raw, expected) in cases {
        let source = source_with(Some(raw));
        assert_eq!(source.get_value_as::<NaiveDateTime>("Foo").unwrap(), expected, "{raw}");
        assert_eq!(
            source
                .get_value_in::<NaiveDateTime>("Foo", &FormatContext::invariant())
                .unwrap(),
            expected,
            "{raw}"
        );
    }
}

/// The twelve offset-bearing layouts with the instant each one names
fn offset_cases() -> [(&'static str, DateTime<FixedOffset>); 12] {
    let one = offset(1, 0);
    let one_thirty = offset(1, 30);
    [
        ("2001-02-03T12:39:23.987Z+1", at(one, 12, 39, 23, 987)),
        ("2001-02-03T12:39:23Z+1", at(one, 12, 39, 23, 0)),
        ("2001-02-03T12:39Z+1", at(one, 12, 39, 0, 0)),
        ("2001-02-03Z+1", at(one, 0, 0, 0, 0)),
        ("2001-02-03T12:39:23.987Z+01", at(one, 12, 39, 23, 987)),
        ("2001-02-03T12:39:23Z+01", at(one, 12, 39, 23, 0)),
        ("2001-02-03T12:39Z+01", at(one, 12, 39, 0, 0)),
        ("2001-02-03Z+01", at(one, 0, 0, 0, 0)),
        ("2001-02-03T12:39:23.987Z+01:30", at(one_thirty, 12, 39, 23, 987)),
        ("2001-02-03T12:39:23Z+01:30", at(one_thirty, 12, 39, 23, 0)),
        ("2001-02-03T12:39Z+01:30", at(one_thirty, 12, 39, 0, 0)),
        ("2001-02-03Z+01:30", at(one_thirty, 0, 0, 0, 0)),
    ]
}

#[test]
fn test_offset_layouts() {
    for (raw, expected) in offset_cases() {
        let source = source_with(Some(raw));
        let value = source.get_value_as::<DateTime<FixedOffset>>("Foo").unwrap();

        assert_eq!(value, expected, "{raw}");
        assert_eq!(value.offset(), expected.offset(), "{raw}");
    }
}

#[test]
fn test_offset_layouts_for_local_targets() {
    for (raw, expected) in offset_cases() {
        let source = source_with(Some(raw));
        let local_wall_clock = expected.with_timezone(&Local).naive_local();

        assert_eq!(
            source.get_value_as::<NaiveDateTime>("Foo").unwrap(),
            local_wall_clock,
            "{raw}"
        );

        let local = source.get_value_as::<DateTime<Local>>("Foo").unwrap();
        assert_eq!(local.with_timezone(&Utc), expected.with_timezone(&Utc), "{raw}");
        assert_eq!(local.naive_local(), local_wall_clock, "{raw}");
    }
}

#[test]
fn test_local_target_keeps_instant_inside_a_fold() {
    // 00:30 UTC on this date is an ambiguous wall-clock time in European zones
    let source = source_with(Some("2001-10-28T00:30Z+00"));
    let local = source.get_value_as::<DateTime<Local>>("Foo").unwrap();

    assert_eq!(
        local.with_timezone(&Utc),
        Utc.with_ymd_and_hms(2001, 10, 28, 0, 30, 0).unwrap()
    );
}

#[test]
fn test_offsetless_layouts_for_local_target() {
    let source = source_with(Some("2001-02-03T12:39:23.987"));
    let local = source.get_value_as::<DateTime<Local>>("Foo").unwrap();
    assert_eq!(local.naive_local(), naive(12, 39, 23, 987));
}

#[test]
fn test_offsetless_text_for_offset_target_keeps_wall_clock() {
    let source = source_with(Some("2001-02-03T12:39"));
    let value = source.get_value_as::<DateTime<FixedOffset>>("Foo").unwrap();
    assert_eq!(value.naive_local(), naive(12, 39, 0, 0));
}

#[test]
fn test_unmatched_date_text_is_bad_format() {
    for raw in ["abc", "2001/02/03", "2001-02-03 12:39", "2001-02-03T12:39:23.9", "20010203"] {
        let source = source_with(Some(raw));
        assert!(source.get_value_as::<NaiveDateTime>("Foo").unwrap_err().is_bad_format(), "{raw}");
        assert!(
            source
                .get_value_as::<DateTime<FixedOffset>>("Foo")
                .unwrap_err()
                .is_bad_format(),
            "{raw}"
        );
    }
}

#[test]
fn test_scalars_with_context() {
    let ctx = FormatContext::invariant();

    assert_eq!(source_with(Some("1.0")).get_value_in::<f64>("Foo", &ctx).unwrap(), 1.0);
    assert_eq!(source_with(Some("1.0")).get_value_in::<f32>("Foo", &ctx).unwrap(), 1.0);
    assert_eq!(source_with(Some("1")).get_value_in::<i32>("Foo", &ctx).unwrap(), 1);
    for (raw, expected) in [("true", true), ("false", false), ("True", true), ("False", false)] {
        assert_eq!(source_with(Some(raw)).get_value_in::<bool>("Foo", &ctx).unwrap(), expected);
        assert_eq!(source_with(Some(raw)).get_value_as::<bool>("Foo").unwrap(), expected);
    }
}

#[test]
fn test_invalid_number_is_bad_format() {
    let source = source_with(Some("abc"));
    let ctx = FormatContext::invariant();

    assert!(source.get_value_as::<i32>("Foo").unwrap_err().is_bad_format());
    assert!(source.get_value_in::<i32>("Foo", &ctx).unwrap_err().is_bad_format());
    assert!(source.try_get_value::<i32>("Foo").unwrap_err().is_bad_format());
    assert!(source.try_get_value_in::<i32>("Foo", &ctx).unwrap_err().is_bad_format());
}

#[test]
fn test_uri_absolute_and_relative() {
    let absolute = source_with(Some("http://localhost"))
        .get_value_as::<ConfigUri>("Foo")
        .unwrap();
    assert!(absolute.is_absolute());
    assert_eq!(absolute.as_str(), "http://localhost");
    assert_eq!(absolute, "http://localhost".parse().unwrap());

    let relative = source_with(Some("localhost"))
        .get_value_as::<ConfigUri>("Foo")
        .unwrap();
    assert!(relative.is_relative());
    assert_eq!(relative.as_str(), "localhost");
}

#[test]
fn test_uri_malformed_and_url_target() {
    assert!(source_with(Some("http://[::1"))
        .get_value_as::<ConfigUri>("Foo")
        .unwrap_err()
        .is_bad_format());
    assert!(source_with(Some("localhost"))
        .get_value_as::<url::Url>("Foo")
        .unwrap_err()
        .is_bad_format());
    assert_eq!(
        source_with(Some("https://example.com/a"))
            .get_value_as::<url::Url>("Foo")
            .unwrap()
            .path(),
        "/a"
    );
}

#[test]
fn test_enum_member_names_any_case() {
    for raw in ["Bar", "bar", "BAR"] {
        assert_eq!(source_with(Some(raw)).get_value_as::<FooBar>("Foo").unwrap(), FooBar::Bar);
    }
    assert_eq!(source_with(Some("baz")).get_value_as::<FooBar>("Foo").unwrap(), FooBar::Baz);
}

#[test]
fn test_enum_numeric_text_is_bad_format() {
    for raw in ["0", "1", "123", "Qux"] {
        assert!(source_with(Some(raw))
            .get_value_as::<FooBar>("Foo")
            .unwrap_err()
            .is_bad_format());
    }
}

#[test]
fn test_context_aware_entry_point_used_with_context() {
    let source = source_with(Some("Bar"));
    let value = parseable_resolver()
        .require_in::<Parseable>(&source, "Foo", Some(&FormatContext::invariant()))
        .unwrap();
    assert_eq!(value.value, 1);
}

#[test]
fn test_context_free_entry_point_used_without_context() {
    let source = source_with(Some("Bar"));
    let value = parseable_resolver().require::<Parseable>(&source, "Foo").unwrap();
    assert_eq!(value.value, 2);
}

#[test]
fn test_default_context_selects_context_aware_entry_point() {
    let source = source_with(Some("Bar"));
    let resolver = Resolver::builder()
        .with_parse_in_context::<Parseable>(|_, _| Some(Parseable { value: 1 }))
        .with_parse::<Parseable>(|_| Some(Parseable { value: 2 }))
        .with_default_context(FormatContext::invariant())
        .build();

    assert_eq!(resolver.require::<Parseable>(&source, "Foo").unwrap().value, 1);
}

#[test]
fn test_no_strategy_is_unparseable() {
    let source = source_with(Some("abc"));
    let ctx = FormatContext::invariant();

    assert!(source.get_value_as::<Opaque>("Foo").unwrap_err().is_unparseable());
    assert!(source.get_value_in::<Opaque>("Foo", &ctx).unwrap_err().is_unparseable());
    assert!(source.try_get_value::<Opaque>("Foo").unwrap_err().is_unparseable());
    assert!(source.try_get_value_in::<Opaque>("Foo", &ctx).unwrap_err().is_unparseable());
}

#[test]
fn test_rejecting_context_free_entry_point_is_bad_format() {
    let source = source_with(Some("abc"));
    let resolver = Resolver::builder()
        .with_parse::<Opaque>(|raw| (raw == "opaque").then_some(Opaque))
        .build();

    assert!(resolver.require::<Opaque>(&source, "Foo").unwrap_err().is_bad_format());
    assert!(resolver
        .require_in::<Opaque>(&source, "Foo", Some(&FormatContext::invariant()))
        .unwrap_err()
        .is_bad_format());
}

#[test]
fn test_from_str_types_via_registry() {
    let resolver = Resolver::builder().with_from_str::<std::net::SocketAddr>().build();
    let source = sources::from_pairs([("Listen", "127.0.0.1:8080"), ("Broken", "nope")]);

    assert_eq!(
        resolver.require::<std::net::SocketAddr>(&source, "Listen").unwrap().port(),
        8080
    );
    assert!(resolver
        .require::<std::net::SocketAddr>(&source, "Broken")
        .unwrap_err()
        .is_bad_format());
}

#[test]
fn test_environment_source_end_to_end() {
    let vars = vec![
        ("KEYCONF_IT_PORT", Some("9090")),
        ("KEYCONF_IT_STARTS", Some("2001-02-03T12:39")),
        ("KEYCONF_IT_MODE", Some("baz")),
        ("KEYCONF_IT_MISSING", None),
    ];

    with_vars(vars, || {
        let source = EnvSource::with_prefix("KEYCONF_IT");

        assert_eq!(source.get_value_as::<u16>("PORT").unwrap(), 9090);
        assert_eq!(source.get_value_as::<NaiveDateTime>("STARTS").unwrap(), naive(12, 39, 0, 0));
        assert_eq!(source.get_value_as::<FooBar>("MODE").unwrap(), FooBar::Baz);
        assert_eq!(source.try_get_value::<u16>("MISSING").unwrap(), None);

        let err = source.get_value_as::<u16>("MISSING").unwrap_err();
        assert_eq!(err.to_string(), "The key 'MISSING' could not be found in the configuration 'environment (prefix 'KEYCONF_IT')'");
    });
}

#[test]
fn test_resolver_is_shareable_across_threads() {
    let resolver = Arc::new(parseable_resolver());
    let source = Arc::new(MapSource::new(HashMap::from([
        ("Port".to_string(), "8080".to_string()),
        ("Custom".to_string(), "x".to_string()),
    ])));

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let resolver = Arc::clone(&resolver);
            let source = Arc::clone(&source);
            scope.spawn(move || {
                assert_eq!(resolver.require::<u16>(&source, "Port").unwrap(), 8080);
                assert_eq!(resolver.require::<Parseable>(&source, "Custom").unwrap().value, 2);
            });
        }
    });
}

proptest! {
    #[test]
    fn prop_resolution_is_idempotent(raw in ".*", with_context in any::<bool>()) {
        let source = sources::from_pairs([("Foo", raw.as_str())]);
        let resolver = parseable_resolver();
        let ctx = FormatContext::invariant();
        let ctx = with_context.then_some(&ctx);

        prop_assert_eq!(
            resolver.require_in::<i64>(&source, "Foo", ctx),
            resolver.require_in::<i64>(&source, "Foo", ctx)
        );
        prop_assert_eq!(
            resolver.require_in::<NaiveDateTime>(&source, "Foo", ctx),
            resolver.require_in::<NaiveDateTime>(&source, "Foo", ctx)
        );
        prop_assert_eq!(
            resolver.require_in::<FooBar>(&source, "Foo", ctx),
            resolver.require_in::<FooBar>(&source, "Foo", ctx)
        );
        prop_assert_eq!(
            resolver.try_get_in::<Parseable>(&source, "Absent", ctx),
            Ok(None)
        );
    }

    #[test]
    fn prop_integers_round_trip(value in any::<i64>()) {
        let source = sources::from_pairs([("Foo", value.to_string())]);
        prop_assert_eq!(source.get_value_as::<i64>("Foo"), Ok(value));
    }
}
