//! Conversion dispatch from raw configuration text to typed values
//!
//! Every target type names exactly one [`Strategy`]. The dispatcher applies it
//! and, for scalar types that declare themselves incompatible and for
//! [`Strategy::Custom`] types, escalates to the parse protocol held by the
//! [`ParserRegistry`].

pub mod datetime;
pub mod enums;
pub mod scalar;
pub mod uri;

use crate::context::FormatContext;
use crate::error::{ResolveError, ResolveResult};
use crate::registry::{ParseOutcome, ParserRegistry};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use log::{debug, trace};
use std::fmt;

pub use enums::EnumMembers;
pub use scalar::ScalarError;
pub use uri::ConfigUri;

static INVARIANT: FormatContext = FormatContext::invariant();

/// Type that can be produced from a configuration value
///
/// Implemented for the date/time, URI and scalar types this crate knows about.
/// Enumerations get an implementation from [`config_enum!`](crate::config_enum);
/// any other type implements it with [`Strategy::Custom`] and registers its
/// parse entry points in a [`ParserRegistry`].
pub trait FromConfig: Sized + 'static {
    /// Conversion strategy for this type
    fn strategy() -> Strategy<Self>;
}

/// Conversion strategy selected by the target type
pub enum Strategy<T> {
    /// Wall-clock date/time without an offset
    LocalDateTime(fn(NaiveDateTime) -> Option<T>),
    /// Date/time carrying an explicit UTC offset
    OffsetDateTime(fn(DateTime<FixedOffset>) -> T),
    /// Absolute or relative resource identifier
    Uri(fn(ConfigUri) -> Result<T, String>),
    /// Case-insensitive match against declared member names
    Enum(EnumMembers<T>),
    /// Built-in scalar conversion honoring the format context
    Scalar(fn(&str, &FormatContext) -> Result<T, ScalarError>),
    /// No built-in rule; only registered parse entry points apply
    Custom,
}

/// Tag naming which strategy a target type uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    LocalDateTime,
    OffsetDateTime,
    Uri,
    Enum,
    Scalar,
    Custom,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::LocalDateTime => "local date/time",
            TargetKind::OffsetDateTime => "offset date/time",
            TargetKind::Uri => "uri",
            TargetKind::Enum => "enum",
            TargetKind::Scalar => "scalar",
            TargetKind::Custom => "custom",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T> Strategy<T> {
    pub fn kind(&self) -> TargetKind {
        match self {
            Strategy::LocalDateTime(_) => TargetKind::LocalDateTime,
            Strategy::OffsetDateTime(_) => TargetKind::OffsetDateTime,
            Strategy::Uri(_) => TargetKind::Uri,
            Strategy::Enum(_) => TargetKind::Enum,
            Strategy::Scalar(_) => TargetKind::Scalar,
            Strategy::Custom => TargetKind::Custom,
        }
    }
}

/// Kind of strategy `T` converts with
pub fn target_kind<T: FromConfig>() -> TargetKind {
    T::strategy().kind()
}

/// Convert `raw`, the value stored under `key`, into `T`
pub(crate) fn convert<T: FromConfig>(
    key: &str,
    raw: &str,
    context: Option<&FormatContext>,
    parsers: &ParserRegistry,
) -> ResolveResult<T> {
    let target = std::any::type_name::<T>();
    let bad_format = |reason: String| ResolveError::BadFormat {
        key: key.to_string(),
        target,
        value: raw.to_string(),
        reason,
    };

    let strategy = T::strategy();
    trace!("Converting key '{}' to {} ({})", key, target, strategy.kind());

    match strategy {
        Strategy::LocalDateTime(wrap) => {
            let parsed = datetime::parse(raw).ok_or_else(|| bad_format(datetime::no_layout_reason()))?;
            parsed
                .to_local_naive()
                .and_then(wrap)
                .ok_or_else(|| bad_format("the local time does not exist".to_string()))
        }
        Strategy::OffsetDateTime(wrap) => {
            let parsed = datetime::parse(raw).ok_or_else(|| bad_format(datetime::no_layout_reason()))?;
            parsed
                .to_fixed_offset()
                .map(wrap)
                .ok_or_else(|| bad_format("the local time does not exist".to_string()))
        }
        Strategy::Uri(wrap) => {
            let uri = raw.parse::<ConfigUri>().map_err(|e| bad_format(e.to_string()))?;
            wrap(uri).map_err(bad_format)
        }
        Strategy::Enum(members) => members.resolve(raw).ok_or_else(|| {
            bad_format(format!("expected one of: {}", members.names().join(", ")))
        }),
        Strategy::Scalar(parse) => match parse(raw, context.unwrap_or(&INVARIANT)) {
            Ok(value) => Ok(value),
            Err(ScalarError::Malformed(reason)) => Err(bad_format(reason)),
            Err(ScalarError::Incompatible) => {
                debug!("Built-in conversion cannot produce {}, trying parse entry points", target);
                parse_protocol(key, raw, context, parsers, target)
            }
        },
        Strategy::Custom => parse_protocol(key, raw, context, parsers, target),
    }
}

fn parse_protocol<T: FromConfig>(
    key: &str,
    raw: &str,
    context: Option<&FormatContext>,
    parsers: &ParserRegistry,
    target: &'static str,
) -> ResolveResult<T> {
    match parsers.parse::<T>(raw, context) {
        ParseOutcome::Parsed(value) => Ok(value),
        ParseOutcome::Rejected(entry_point) => Err(ResolveError::BadFormat {
            key: key.to_string(),
            target,
            value: raw.to_string(),
            reason: format!("rejected by the {} parse entry point", entry_point),
        }),
        ParseOutcome::NoEntryPoint => Err(ResolveError::Unparseable {
            key: key.to_string(),
            target,
        }),
    }
}
