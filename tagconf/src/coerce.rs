//! Conversion of raw strings into field values.
//!
//! Every supported field type maps to exactly one [`Target`] variant through
//! its [`Value`](crate::Value) impl, so the conversion strategy is fixed at
//! compile time and dispatched here with a plain `match`.

use std::time::Duration;

use crate::duration::parse_duration;
use crate::error::{CoerceError, Error};
use crate::value::CustomTarget;

/// A mutable view of a field, tagged with how raw strings convert into it.
pub enum Target<'a> {
    /// A single value.
    Scalar(Scalar<'a>),
    /// A delimited list of values.
    List(List<'a>),
    /// A type that converts itself, see [`Setter`](crate::Setter).
    Custom(Box<dyn CustomTarget + 'a>),
}

macro_rules! targets {
    ($($variant:ident => $ty:ty, $parse:expr;)*) => {
        /// Scalar field kinds.
        pub enum Scalar<'a> {
            /// Raw bytes of the string, not decoded.
            Bytes(&'a mut Vec<u8>),
            $($variant(&'a mut $ty),)*
        }

        /// List field kinds, one per scalar kind. A list of `u8` is not a
        /// list kind: `Vec<u8>` is [`Scalar::Bytes`].
        pub enum List<'a> {
            /// List of raw byte strings.
            Bytes(&'a mut Vec<Vec<u8>>),
            $($variant(&'a mut Vec<$ty>),)*
        }

        impl Scalar<'_> {
            /// Convert `raw` and store it.
            pub fn assign(self, raw: &str) -> Result<(), CoerceError> {
                match self {
                    Scalar::Bytes(slot) => *slot = raw.as_bytes().to_vec(),
                    $(Scalar::$variant(slot) => *slot = $parse(raw)?,)*
                }
                Ok(())
            }
        }

        impl List<'_> {
            /// Split `raw` on `delimiter`, convert every element and store
            /// the list. The field is left untouched when an element fails.
            pub fn assign(
                self,
                raw: &str,
                delimiter: &str,
            ) -> Result<(), (usize, CoerceError)> {
                let parts = split(raw, delimiter);
                match self {
                    List::Bytes(slot) => {
                        *slot = parts.iter().map(|p| p.as_bytes().to_vec()).collect();
                    }
                    $(List::$variant(slot) => *slot = parse_list(&parts, $parse)?,)*
                }
                Ok(())
            }
        }
    };
}

targets! {
    Bool => bool, parse_bool;
    Str => String, |raw: &str| Ok::<_, CoerceError>(raw.to_string());
    I8 => i8, parse_signed::<i8>;
    I16 => i16, parse_signed::<i16>;
    I32 => i32, parse_signed::<i32>;
    I64 => i64, parse_signed::<i64>;
    I128 => i128, parse_signed::<i128>;
    Isize => isize, parse_signed::<isize>;
    U8 => u8, parse_unsigned::<u8>;
    U16 => u16, parse_unsigned::<u16>;
    U32 => u32, parse_unsigned::<u32>;
    U64 => u64, parse_unsigned::<u64>;
    U128 => u128, parse_unsigned::<u128>;
    Usize => usize, parse_unsigned::<usize>;
    F32 => f32, parse_float::<f32>;
    F64 => f64, parse_float::<f64>;
    Duration => Duration, parse_duration_value;
}

fn parse_list<T>(
    parts: &[&str],
    parse: impl Fn(&str) -> Result<T, CoerceError>,
) -> Result<Vec<T>, (usize, CoerceError)> {
    parts
        .iter()
        .enumerate()
        .map(|(index, part)| parse(part).map_err(|e| (index, e)))
        .collect()
}

/// Split `raw` on `delimiter`. An empty delimiter splits into characters.
pub(crate) fn split<'a>(raw: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return raw
            .char_indices()
            .map(|(i, c)| &raw[i..i + c.len_utf8()])
            .collect();
    }
    raw.split(delimiter).collect()
}

/// Parse a boolean token: `1 t T TRUE true True` or `0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Result<bool, CoerceError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoerceError::Bool(raw.to_string())),
    }
}

fn parse_signed<T>(raw: &str) -> Result<T, CoerceError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    raw.parse::<T>().map_err(|source| CoerceError::Int {
        kind: std::any::type_name::<T>(),
        value: raw.to_string(),
        source,
    })
}

fn parse_unsigned<T>(raw: &str) -> Result<T, CoerceError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    // `FromStr` for unsigned integers accepts a leading `+`.
    if raw.starts_with(['+', '-']) {
        return Err(CoerceError::Signed {
            kind: std::any::type_name::<T>(),
            value: raw.to_string(),
        });
    }
    parse_signed(raw)
}

fn parse_float<T>(raw: &str) -> Result<T, CoerceError>
where
    T: std::str::FromStr<Err = std::num::ParseFloatError>,
{
    raw.parse::<T>().map_err(|source| CoerceError::Float {
        kind: std::any::type_name::<T>(),
        value: raw.to_string(),
        source,
    })
}

fn parse_duration_value(raw: &str) -> Result<Duration, CoerceError> {
    parse_duration(raw).map_err(|source| CoerceError::Duration {
        value: raw.to_string(),
        source,
    })
}

/// Convert `raw` into the field behind `target`.
///
/// `type_name` is the declared type, reported in conversion errors.
/// `delimiter` only matters for list targets.
pub fn coerce(
    field: &'static str,
    type_name: &'static str,
    target: Target<'_>,
    raw: &str,
    delimiter: &str,
) -> Result<(), Error> {
    match target {
        Target::Custom(mut custom) => custom
            .assign_fresh(raw)
            .map_err(|source| Error::CustomSetter { field, source }),
        Target::List(list) => list
            .assign(raw, delimiter)
            .map_err(|(index, source)| Error::Element {
                field,
                type_name,
                index,
                source,
            }),
        Target::Scalar(scalar) => scalar
            .assign(raw)
            .map_err(|source| Error::Conversion {
                field,
                type_name,
                source,
            }),
    }
}
