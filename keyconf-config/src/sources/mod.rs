//! Stock source adapters
//!
//! These only expose "get string by key, or absent"; conversion is the
//! resolver's job.

pub mod delegate;
pub mod env;
pub mod map;
pub mod pairs;

pub use delegate::FnSource;
pub use env::EnvSource;
pub use map::{MapSource, StringMap};
pub use pairs::PairsSource;

/// Source over a dictionary
pub fn from_map<M: StringMap>(map: M) -> MapSource<M> {
    MapSource::new(map)
}

/// Source over name/value pairs
pub fn from_pairs<N, V>(pairs: impl IntoIterator<Item = (N, V)>) -> PairsSource
where
    N: Into<String>,
    V: Into<String>,
{
    pairs.into_iter().collect()
}

/// Source over a getter closure
pub fn from_fn<F>(getter: F) -> FnSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    FnSource::new(getter)
}

/// Source over the process environment, optionally prefixed
pub fn from_env(prefix: Option<&str>) -> EnvSource {
    match prefix {
        Some(prefix) => EnvSource::with_prefix(prefix),
        None => EnvSource::new(),
    }
}
