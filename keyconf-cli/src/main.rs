use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use clap::Parser;
use keyconf_config::{
    sources, ConfigUri, FormatContext, FromConfig, ResolveResult, Resolver,
};
use keyconf_interfaces::ConfigSource;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

mod cli;
use cli::{Cli, Commands, ValueKind};

/// Initialize stderr-only logging so stdout carries nothing but values
fn init_simple_tracing(log_level: Option<&String>) -> Result<()> {
    let env_filter = match log_level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| {
            eprintln!("Invalid log level '{}', falling back to 'warn'", level);
            EnvFilter::new("warn")
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    debug!("Simple tracing initialized");
    Ok(())
}

fn build_source(cli: &Cli) -> Box<dyn ConfigSource> {
    if cli.pairs.is_empty() {
        Box::new(sources::from_env(cli.prefix.as_deref()))
    } else {
        Box::new(sources::from_pairs(cli.pairs.iter().cloned()))
    }
}

/// One key read from one source
struct Lookup<'a> {
    resolver: &'a Resolver,
    source: &'a dyn ConfigSource,
    key: &'a str,
    context: Option<&'a FormatContext>,
    /// Absence is a `MissingKey` failure rather than `None`
    required: bool,
}

impl Lookup<'_> {
    /// Resolve the key as `kind` and render it for printing
    fn resolve(&self, kind: ValueKind) -> ResolveResult<Option<String>> {
        match kind {
            ValueKind::String => self.render::<String>(|v| v),
            ValueKind::Bool => self.render::<bool>(|v| v.to_string()),
            ValueKind::I64 => self.render::<i64>(|v| v.to_string()),
            ValueKind::U64 => self.render::<u64>(|v| v.to_string()),
            ValueKind::F64 => self.render::<f64>(|v| v.to_string()),
            ValueKind::Datetime => {
                self.render::<NaiveDateTime>(|v| v.format("%Y-%m-%dT%H:%M:%S%.3f").to_string())
            }
            ValueKind::DatetimeOffset => self.render::<DateTime<FixedOffset>>(|v| v.to_rfc3339()),
            ValueKind::Uri => self.render::<ConfigUri>(|v| v.to_string()),
            ValueKind::Url => self.render::<Url>(|v| v.to_string()),
        }
    }

    fn render<T: FromConfig>(&self, show: impl Fn(T) -> String) -> ResolveResult<Option<String>> {
        let value = if self.required {
            Some(self.resolver.require_in::<T>(self.source, self.key, self.context)?)
        } else {
            self.resolver.try_get_in::<T>(self.source, self.key, self.context)?
        };
        Ok(value.map(show))
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let source = build_source(&cli);
    let resolver = Resolver::new();
    debug!("Reading from {}", source.describe());

    let (key, kind, required) = match &cli.command {
        Commands::Get { key, kind } => (key, *kind, false),
        Commands::Require { key, kind } => (key, *kind, true),
    };
    let lookup = Lookup {
        resolver: &resolver,
        source: source.as_ref(),
        key,
        context: cli.context.as_ref(),
        required,
    };

    match lookup
        .resolve(kind)
        .with_context(|| format!("Failed to read '{}'", key))?
    {
        Some(value) => {
            println!("{}", value);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            debug!("Key '{}' is absent", key);
            Ok(ExitCode::from(1))
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_simple_tracing(cli.log_level.as_ref())?;
    run(cli)
}
