//! Typed configuration value resolution for keyconf
//!
//! A [`Resolver`] reads raw strings from any [`ConfigSource`] and converts
//! them into dates, URIs, enums, numbers, booleans or caller-registered
//! types. Failures are reported as one of three distinct kinds:
//! [`ResolveError::MissingKey`], [`ResolveError::BadFormat`] and
//! [`ResolveError::Unparseable`].
//!
//! ```
//! use keyconf_config::{sources, ConfigSourceExt};
//!
//! let source = sources::from_pairs([("Port", "8080"), ("Debug", "True")]);
//!
//! assert_eq!(source.get_value_as::<u16>("Port").unwrap(), 8080);
//! assert!(source.get_value_as::<bool>("Debug").unwrap());
//! assert_eq!(source.try_get_value::<u16>("Missing").unwrap(), None);
//! ```

pub mod context;
pub mod convert;
pub mod error;
pub mod registry;
pub mod resolver;

// Stock source adapters
pub mod sources;

// Re-export main types
pub use context::FormatContext;
pub use convert::{target_kind, ConfigUri, EnumMembers, FromConfig, ScalarError, Strategy, TargetKind};
pub use error::{ResolveError, ResolveResult};
pub use registry::{EntryPoint, ParseOutcome, ParserRegistry};
pub use resolver::{ConfigSourceExt, Resolver, ResolverBuilder};

// Re-export the source contract and adapters
pub use keyconf_interfaces::{ConfigSource, SourceError, SourceResult};
pub use sources::{EnvSource, FnSource, MapSource, PairsSource};
