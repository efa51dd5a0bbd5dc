//! Enumerations converted by member name

/// Declared member names of an enumeration and how to build each member
///
/// Numeric text is never interpreted as a discriminant; only names listed
/// here convert.
pub struct EnumMembers<T> {
    names: &'static [&'static str],
    from_name: fn(&str) -> Option<T>,
}

impl<T> EnumMembers<T> {
    /// `from_name` receives one of `names` exactly as declared
    pub const fn new(names: &'static [&'static str], from_name: fn(&str) -> Option<T>) -> Self {
        Self { names, from_name }
    }

    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }

    /// Case-insensitive lookup of `raw` among the declared names
    pub fn resolve(&self, raw: &str) -> Option<T> {
        self.names
            .iter()
            .find(|name| name.eq_ignore_ascii_case(raw))
            .and_then(|name| (self.from_name)(name))
    }
}

/// Implement [`FromConfig`](crate::FromConfig) for a fieldless enum by member name
///
/// ```
/// use keyconf_config::{config_enum, ConfigSourceExt, MapSource};
/// use std::collections::HashMap;
///
/// #[derive(Debug, PartialEq)]
/// enum Mode {
///     Fast,
///     Safe,
/// }
///
/// config_enum!(Mode { Fast, Safe });
///
/// let source = MapSource::new(HashMap::from([("Mode", "safe")]));
/// assert_eq!(source.get_value_as::<Mode>("Mode").unwrap(), Mode::Safe);
/// ```
#[macro_export]
macro_rules! config_enum {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::FromConfig for $ty {
            fn strategy() -> $crate::Strategy<Self> {
                $crate::Strategy::Enum($crate::EnumMembers::new(
                    &[$(stringify!($variant)),+],
                    |name| match name {
                        $(stringify!($variant) => Some($ty::$variant),)+
                        _ => None,
                    },
                ))
            }
        }
    };
}
