//! Built-in scalar conversions: numbers, booleans, characters and strings

use super::{FromConfig, Strategy};
use thiserror::Error;

/// Failure reported by a scalar conversion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScalarError {
    /// The text is not a valid representation of the target
    #[error("{0}")]
    Malformed(String),

    /// No text can ever convert to the target through this path
    #[error("the built-in conversion is incompatible with the target type")]
    Incompatible,
}

macro_rules! integer_scalars {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromConfig for $ty {
                fn strategy() -> Strategy<Self> {
                    Strategy::Scalar(|raw, context| {
                        context
                            .normalize_integer(raw)
                            .parse::<$ty>()
                            .map_err(|e| ScalarError::Malformed(e.to_string()))
                    })
                }
            }
        )+
    };
}

macro_rules! float_scalars {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromConfig for $ty {
                fn strategy() -> Strategy<Self> {
                    Strategy::Scalar(|raw, context| {
                        context
                            .normalize_float(raw)
                            .parse::<$ty>()
                            .map_err(|e| ScalarError::Malformed(e.to_string()))
                    })
                }
            }
        )+
    };
}

integer_scalars!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
float_scalars!(f32, f64);

impl FromConfig for bool {
    fn strategy() -> Strategy<Self> {
        Strategy::Scalar(|raw, _| {
            let raw = raw.trim();
            if raw.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if raw.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err(ScalarError::Malformed(
                    "expected 'true' or 'false'".to_string(),
                ))
            }
        })
    }
}

impl FromConfig for char {
    fn strategy() -> Strategy<Self> {
        Strategy::Scalar(|raw, _| {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(ScalarError::Malformed(
                    "expected exactly one character".to_string(),
                )),
            }
        })
    }
}

impl FromConfig for String {
    fn strategy() -> Strategy<Self> {
        Strategy::Scalar(|raw, _| Ok(raw.to_string()))
    }
}
