//! Typed lookup demo
//!
//! A minimal example showing typed reads over an in-memory source

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use keyconf_config::{
    config_enum, sources, ConfigSourceExt, ConfigUri, FormatContext, ResolveResult, Resolver,
};
use std::net::SocketAddr;

#[derive(Debug, Clone, Copy)]
enum Mode {
    Fast,
    Safe,
}

config_enum!(Mode { Fast, Safe });

fn main() -> ResolveResult<()> {
    println!("🚀 Keyconf Typed Lookup Demo");

    let source = sources::from_pairs([
        ("Listen", "127.0.0.1:8080"),
        ("Mode", "safe"),
        ("Ratio", "0,75"),
        ("Starts", "2001-02-03T12:39:23.987"),
        ("Expires", "2001-02-03T12:39Z+01:30"),
        ("Endpoint", "http://localhost/api"),
        ("Callback", "hooks/done"),
        ("Verbose", "True"),
    ]);

    let resolver = Resolver::builder().with_from_str::<SocketAddr>().build();
    let comma = FormatContext::new("comma-decimal")
        .with_decimal_separator(',')
        .with_group_separator('.');

    let listen: SocketAddr = resolver.require(&source, "Listen")?;
    let mode: Mode = source.get_value_as("Mode")?;
    let ratio: f64 = source.get_value_in("Ratio", &comma)?;
    let starts: NaiveDateTime = source.get_value_as("Starts")?;
    let expires: DateTime<FixedOffset> = source.get_value_as("Expires")?;
    let endpoint: ConfigUri = source.get_value_as("Endpoint")?;
    let callback: ConfigUri = source.get_value_as("Callback")?;
    let verbose: bool = source.get_value_as("Verbose")?;
    let retries: u32 = source.get_value_or("Retries", 3)?;

    println!("✅ Configuration resolved successfully!");
    println!("   Listen: {}", listen);
    println!("   Mode: {:?}", mode);
    println!("   Ratio: {}", ratio);
    println!("   Starts: {}", starts);
    println!("   Expires: {}", expires.to_rfc3339());
    println!("   Endpoint: {} (absolute: {})", endpoint, endpoint.is_absolute());
    println!("   Callback: {} (absolute: {})", callback, callback.is_absolute());
    println!("   Verbose: {}", verbose);
    println!("   Retries: {}", retries);

    match source.get_value_as::<u16>("Missing") {
        Err(e) => println!("❌ {}", e),
        Ok(value) => println!("   Missing: {}", value),
    }

    Ok(())
}
