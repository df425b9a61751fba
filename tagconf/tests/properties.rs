//! Property-based tests for resolution and coercion.
//!
//! Uses proptest to check that the resolution rules hold across many random
//! inputs rather than a handful of picked values.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;
use tagconf::{
    coerce, format_duration, resolve_field, Error, Field, Outcome, Tags, Value,
};

/// Coerce `raw` into a fresh `T` the way a scalar field would be.
fn round_trip<T: Value + Default>(raw: &str) -> Result<T, Error> {
    let mut value = T::default();
    coerce("field", std::any::type_name::<T>(), value.target(), raw, ",")?;
    Ok(value)
}

/// Resolve a single `u16` field tagged with `tags`, starting from `initial`.
fn resolve_port(
    pairs: &[(&str, &str)],
    tags: Tags,
    initial: u16,
) -> (Result<Outcome, String>, u16) {
    let source: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let mut port = initial;
    let field = Field::new("port", "u16", tags, Some(port.target()));
    let outcome = resolve_field(&source, field).map_err(|e| e.to_string());
    (outcome, port)
}

/// Tags take `&'static str`; the few bytes per case are fine in a test.
fn leak(raw: String) -> &'static str {
    raw.leak()
}

macro_rules! round_trip_integers {
    ($($name:ident => $ty:ty,)*) => {
        proptest! {
            $(
                #[test]
                fn $name(v in any::<$ty>()) {
                    prop_assert_eq!(round_trip::<$ty>(&v.to_string()).unwrap(), v);
                }
            )*
        }
    };
}

// ============================================================================
// Scalar round-trips
// ============================================================================

round_trip_integers! {
    round_trip_i8 => i8,
    round_trip_i16 => i16,
    round_trip_i32 => i32,
    round_trip_i64 => i64,
    round_trip_i128 => i128,
    round_trip_isize => isize,
    round_trip_u8 => u8,
    round_trip_u16 => u16,
    round_trip_u32 => u32,
    round_trip_u64 => u64,
    round_trip_u128 => u128,
    round_trip_usize => usize,
}

proptest! {
    #[test]
    fn round_trip_bool(v in any::<bool>()) {
        prop_assert_eq!(round_trip::<bool>(&v.to_string()).unwrap(), v);
    }

    #[test]
    fn round_trip_string(v in any::<String>()) {
        prop_assert_eq!(round_trip::<String>(&v).unwrap(), v);
    }

    #[test]
    fn round_trip_f32(v in any::<f32>()) {
        prop_assume!(!v.is_nan());
        prop_assert_eq!(round_trip::<f32>(&v.to_string()).unwrap(), v);
    }

    #[test]
    fn round_trip_f64(v in any::<f64>()) {
        prop_assume!(!v.is_nan());
        prop_assert_eq!(round_trip::<f64>(&v.to_string()).unwrap(), v);
    }

    #[test]
    fn round_trip_duration(secs in any::<u64>(), nanos in 0u32..1_000_000_000) {
        let d = Duration::new(secs, nanos);
        prop_assert_eq!(round_trip::<Duration>(&format_duration(d)).unwrap(), d);
    }
}

// ============================================================================
// Precedence
// ============================================================================

proptest! {
    /// A non-empty source value wins over any default.
    #[test]
    fn source_overrides_default(
        value in any::<u16>(),
        default in any::<u16>(),
        initial in any::<u16>(),
    ) {
        let tags = Tags::new()
            .with_env("PORT")
            .with_default(leak(default.to_string()));
        let (outcome, port) = resolve_port(&[("PORT", &value.to_string())], tags, initial);
        prop_assert_eq!(outcome, Ok(Outcome::Source));
        prop_assert_eq!(port, value);
    }

    /// An empty source value resolves exactly like a missing key.
    #[test]
    fn empty_value_is_absent(
        default in proptest::option::of("[0-9a-z]{0,6}"),
        required in proptest::option::of(prop_oneof![Just("true"), Just("false"), Just("maybe")]),
        initial in any::<u16>(),
    ) {
        let mut tags = Tags::new().with_env("PORT");
        if let Some(default) = default {
            tags = tags.with_default(leak(default));
        }
        if let Some(required) = required {
            tags = tags.with_required(required);
        }
        let empty = resolve_port(&[("PORT", "")], tags, initial);
        let absent = resolve_port(&[], tags, initial);
        prop_assert_eq!(empty, absent);
    }
}

// ============================================================================
// Choices
// ============================================================================

proptest! {
    /// A scalar value is compared whole, so joining two choices never matches.
    #[test]
    fn scalar_choice_is_never_split(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        let tags = Tags::new()
            .with_env("MODE")
            .with_choices(leak(format!("{a},{b}")));
        let source: HashMap<String, String> =
            [("MODE".to_string(), format!("{a},{b}"))].into_iter().collect();
        let mut mode = String::new();
        let field = Field::new("mode", "String", tags, Some(mode.target()));
        let err = resolve_field(&source, field).unwrap_err();
        prop_assert!(matches!(err, Error::InvalidChoice { .. }), "unexpected error: {err}");
        prop_assert!(mode.is_empty());
    }
}
