//! CLI argument parsing definitions

use clap::{Parser, Subcommand, ValueEnum};
use keyconf_config::FormatContext;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read environment variables named PREFIX_KEY
    #[arg(long, value_name = "PREFIX", global = true)]
    pub prefix: Option<String>,

    /// Format context: "invariant" or NAME:DECIMAL[:GROUP] (example: --context=de:,:.)
    #[arg(long, value_name = "CONTEXT", global = true, value_parser = parse_context)]
    pub context: Option<FormatContext>,

    /// Inline KEY=VALUE pair; when given, the environment is not read
    #[arg(long = "pair", value_name = "KEY=VALUE", global = true, value_parser = parse_pair)]
    pub pairs: Vec<(String, String)>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the converted value of a key, exiting with status 1 when it is absent
    Get {
        /// Configuration key
        key: String,

        /// Target type of the conversion
        #[arg(long = "as", value_name = "TYPE", value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,
    },

    /// Print the value of a key, failing when it is absent
    Require {
        /// Configuration key
        key: String,

        /// Target type of the conversion
        #[arg(long = "as", value_name = "TYPE", value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,
    },
}

/// Target types selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    String,
    Bool,
    I64,
    U64,
    F64,
    /// Date and time without offset
    Datetime,
    /// Date and time with UTC offset
    DatetimeOffset,
    /// Absolute or relative URI
    Uri,
    /// Absolute URL
    Url,
}

fn parse_context(token: &str) -> Result<FormatContext, String> {
    if token.eq_ignore_ascii_case("invariant") {
        return Ok(FormatContext::invariant());
    }

    let mut parts = token.splitn(3, ':');
    let name = parts.next().filter(|name| !name.is_empty());
    let decimal = parts.next().and_then(single_char);
    let (Some(name), Some(decimal)) = (name, decimal) else {
        return Err(format!(
            "expected 'invariant' or NAME:DECIMAL[:GROUP], got '{}'",
            token
        ));
    };

    let context = FormatContext::new(name.to_string()).with_decimal_separator(decimal);
    match parts.next() {
        None | Some("") => Ok(context.without_group_separator()),
        Some(group) => single_char(group)
            .map(|group| context.with_group_separator(group))
            .ok_or_else(|| format!("group separator must be a single character, got '{}'", group)),
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn parse_pair(text: &str) -> Result<(String, String), String> {
    match text.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", text)),
    }
}
