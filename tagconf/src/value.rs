//! Field types the engine can write, and the custom conversion capability.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::coerce::{List, Scalar, Target};

/// A field type that can be populated from a raw string.
///
/// Implemented for `bool`, `String`, `Vec<u8>` (raw bytes), every integer
/// and float primitive, [`Duration`], `Vec`s of those (other than `u8`),
/// every [`Setter`] and `Option` of a [`Setter`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be populated by tagconf",
    label = "unsupported field type",
    note = "supported types are bool, String, Vec<u8>, integers, floats, Duration, Vec of those, and types implementing `tagconf::Setter`"
)]
pub trait Value {
    /// Borrow `self` as a write target.
    fn target(&mut self) -> Target<'_>;
}

/// A type that converts a raw string into itself.
///
/// Before `set_from_str` runs, the field is replaced by a fresh
/// `Default::default()` instance, so implementations start from a clean value.
///
/// ```rust
/// use tagconf::{Setter, TagConf};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Level(u8);
///
/// impl Setter for Level {
///     fn set_from_str(&mut self, raw: &str) -> anyhow::Result<()> {
///         self.0 = match raw {
///             "low" => 1,
///             "high" => 9,
///             other => anyhow::bail!("unknown level {other:?}"),
///         };
///         Ok(())
///     }
/// }
///
/// #[derive(TagConf)]
/// struct Config {
///     #[conf(env = "LEVEL", default = "low")]
///     level: Level,
/// }
///
/// # fn main() -> anyhow::Result<()> {
/// let mut config = Config { level: Level(0) };
/// let source = std::collections::HashMap::<String, String>::new();
/// tagconf::set_from(&source, &mut config)?;
/// assert_eq!(config.level, Level(1));
/// # Ok(())
/// # }
/// ```
pub trait Setter: Default {
    /// Populate `self` from `raw`.
    fn set_from_str(&mut self, raw: &str) -> anyhow::Result<()>;
}

/// Object-safe face of a custom conversion, used by [`Target::Custom`].
pub trait CustomTarget {
    /// Replace the field with a fresh instance and let it convert `raw`.
    fn assign_fresh(&mut self, raw: &str) -> anyhow::Result<()>;
}

struct Fresh<'a, T>(&'a mut T);

impl<T: Setter> CustomTarget for Fresh<'_, T> {
    fn assign_fresh(&mut self, raw: &str) -> anyhow::Result<()> {
        *self.0 = T::default();
        self.0.set_from_str(raw)
    }
}

/// `Option` of a custom type: the field becomes `Some(T::default())` first.
struct FreshSome<'a, T>(&'a mut Option<T>);

impl<T: Setter> CustomTarget for FreshSome<'_, T> {
    fn assign_fresh(&mut self, raw: &str) -> anyhow::Result<()> {
        self.0.insert(T::default()).set_from_str(raw)
    }
}

impl<T: Setter> Value for T {
    fn target(&mut self) -> Target<'_> {
        Target::Custom(Box::new(Fresh(self)))
    }
}

impl<T: Setter> Value for Option<T> {
    fn target(&mut self) -> Target<'_> {
        Target::Custom(Box::new(FreshSome(self)))
    }
}

macro_rules! impl_value {
    ($($variant:ident => $ty:ty;)*) => {
        $(
            impl Value for $ty {
                fn target(&mut self) -> Target<'_> {
                    Target::Scalar(Scalar::$variant(self))
                }
            }

            impl Value for Vec<$ty> {
                fn target(&mut self) -> Target<'_> {
                    Target::List(List::$variant(self))
                }
            }
        )*
    };
}

impl_value! {
    Bool => bool;
    Str => String;
    I8 => i8;
    I16 => i16;
    I32 => i32;
    I64 => i64;
    I128 => i128;
    Isize => isize;
    U16 => u16;
    U32 => u32;
    U64 => u64;
    U128 => u128;
    Usize => usize;
    F32 => f32;
    F64 => f64;
    Duration => Duration;
}

impl Value for u8 {
    fn target(&mut self) -> Target<'_> {
        Target::Scalar(Scalar::U8(self))
    }
}

impl Value for Vec<u8> {
    fn target(&mut self) -> Target<'_> {
        Target::Scalar(Scalar::Bytes(self))
    }
}

impl Value for Vec<Vec<u8>> {
    fn target(&mut self) -> Target<'_> {
        Target::List(List::Bytes(self))
    }
}

/// A value parsed from JSON with `serde_json`.
///
/// Useful for maps and nested structures that have no delimited form.
///
/// ```rust
/// use std::collections::HashMap;
/// use tagconf::{Json, TagConf};
///
/// #[derive(TagConf)]
/// struct Config {
///     #[conf(env = "LABELS", default = r#"{"tier":"web"}"#)]
///     labels: Json<HashMap<String, String>>,
/// }
///
/// # fn main() -> anyhow::Result<()> {
/// let mut config = Config { labels: Json::default() };
/// tagconf::set_from(&HashMap::<String, String>::new(), &mut config)?;
/// assert_eq!(config.labels["tier"], "web");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Unwrap the parsed value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Json<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: DeserializeOwned + Default> Setter for Json<T> {
    fn set_from_str(&mut self, raw: &str) -> anyhow::Result<()> {
        self.0 = serde_json::from_str(raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::coerce;
    use crate::error::Error;

    #[derive(Debug, Default, PartialEq)]
    struct Pair(String, String);

    impl Setter for Pair {
        fn set_from_str(&mut self, raw: &str) -> anyhow::Result<()> {
            let (left, right) = raw
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("expected key=value"))?;
            self.0 = left.to_string();
            self.1 = right.to_string();
            Ok(())
        }
    }

    #[test]
    fn test_setter_starts_from_fresh_instance() {
        let mut pair = Pair("stale".to_string(), "stale".to_string());
        coerce("pair", "Pair", pair.target(), "a=b", ",").unwrap();
        assert_eq!(pair, Pair("a".to_string(), "b".to_string()));
    }

    #[test]
    fn test_setter_failure_is_wrapped() {
        let mut pair = Pair::default();
        let err = coerce("pair", "Pair", pair.target(), "ab", ",").unwrap_err();
        match err {
            Error::CustomSetter { field, source } => {
                assert_eq!(field, "pair");
                assert_eq!(source.to_string(), "expected key=value");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_optional_setter_is_allocated() {
        let mut pair: Option<Pair> = None;
        coerce("pair", "Pair", pair.target(), "k=v", ",").unwrap();
        assert_eq!(pair, Some(Pair("k".to_string(), "v".to_string())));
    }

    #[test]
    fn test_json_setter() {
        let mut ids: Json<Vec<u32>> = Json::default();
        coerce("ids", "Json<Vec<u32>>", ids.target(), "[1, 2, 3]", ",").unwrap();
        assert_eq!(ids.into_inner(), vec![1, 2, 3]);

        let mut broken: Json<Vec<u32>> = Json(vec![7]);
        let err = coerce("ids", "Json<Vec<u32>>", broken.target(), "[1,", ",").unwrap_err();
        assert!(matches!(err, Error::CustomSetter { field: "ids", .. }));
        // Reset happens before the setter runs.
        assert!(broken.is_empty());
    }
}
