//! Populate configuration structs from environment variables, driven by field tags
//!
//! `tagconf` fills the fields of a struct from a key/value source (the process
//! environment by default). Which fields take part, where their values come
//! from and how those values are checked and converted is declared per field
//! with `#[conf(...)]` tags; no parsing code is written by hand.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use tagconf::TagConf;
//!
//! #[derive(Debug, Default, TagConf)]
//! struct Config {
//!     #[conf(env = "HOST", default = "127.0.0.1")]
//!     host: String,
//!
//!     #[conf(env = "PORT", required = true)]
//!     port: u16,
//!
//!     #[conf(env = "TIMEOUT", default = "10s")]
//!     timeout: Duration,
//!
//!     #[conf(env = "PEERS", delimiter = " ")]
//!     peers: Vec<String>,
//!
//!     // No env tag: never touched
//!     started: bool,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("PORT", "8080");
//! #     std::env::set_var("PEERS", "a b c");
//! #     std::env::remove_var("TIMEOUT");
//! let config: Config = tagconf::load()?;
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.timeout, Duration::from_secs(10));
//! assert_eq!(config.peers, ["a", "b", "c"]);
//! #     Ok(())
//! # }
//! ```
//!
//! # Resolution
//!
//! For every field carrying an `env` tag, in declaration order:
//!
//! 1. A non-empty source value for the `env` key wins. An empty value is
//!    treated exactly like a missing one.
//! 2. Otherwise the `default` tag is used, if present.
//! 3. Otherwise the `required` tag decides: `true` fails with
//!    [`Error::MissingRequiredValue`], `false` or no tag leaves the field as it
//!    was.
//!
//! A value taken from the source or the default must pass the `choices` tag
//! before it is converted.
//!
//! The first failing field aborts the pass. Fields resolved before it keep
//! their new values; use [`load`] to get all-or-nothing behaviour.
//!
//! # Tags
//!
//! | tag | meaning |
//! |-----|---------|
//! | `env = "KEY"` | source key; fields without it are skipped |
//! | `default = "raw"` | raw value used when the source has none |
//! | `required = true` | fail when neither source nor default has a value |
//! | `choices = "a,b"` | permitted raw values; a scalar value must be one of them, a list value a subset |
//! | `delimiter = ";"` | separator for `choices` and list values (default `,`) |
//!
//! Tag values may be written as string, integer, float or boolean literals;
//! they are kept as their raw text. Unknown tags are ignored. A struct-level
//! `#[conf(prefix = "APP_")]` prepends a prefix to every `env` key.
//!
//! # Supported field types
//!
//! - `bool`, accepting `1 t T TRUE true True` and `0 f F FALSE false False`
//! - `String`, taken verbatim
//! - `Vec<u8>`, the raw bytes of the value
//! - every integer and float primitive; unsigned integers reject a sign
//! - [`std::time::Duration`], written like `1h30m`, `1.5s` or `250ms`
//! - `Vec` of any of the above (a `Vec<u8>` is bytes, not a list), split on
//!   the field's delimiter
//! - any type implementing [`Setter`], and `Option` of such a type
//!
//! Tagging a field of any other type is a compile error.
//!
//! # Concurrency
//!
//! Population takes `&mut` to the record, so a record cannot be populated
//! from two places at once. Nothing global is written; populating distinct
//! records concurrently is fine.

mod choice;
mod coerce;
mod duration;
mod error;
mod field;
mod resolve;
mod source;
mod value;

pub use choice::{is_choice_member, is_valid_choice};
pub use coerce::{coerce, parse_bool, List, Scalar, Target};
pub use duration::{format_duration, parse_duration, DurationError};
pub use error::{CoerceError, Error, Origin};
pub use field::{Field, Tags, DEFAULT_DELIMITER};
pub use resolve::{resolve_field, Outcome};
pub use source::{Environment, Source};
pub use tagconf_derive::TagConf;
pub use value::{CustomTarget, Json, Setter, Value};

// Lets the derive's `::tagconf` paths resolve inside this crate's own tests.
extern crate self as tagconf;

/// A record whose fields can be populated by [`set`].
///
/// Usually derived with `#[derive(TagConf)]`. A hand-written impl lists the
/// fields in declaration order:
///
/// ```rust
/// use tagconf::{Field, TagConf, Tags, Value};
///
/// struct Config {
///     port: u16,
/// }
///
/// impl TagConf for Config {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![Field::new(
///             "port",
///             "u16",
///             Tags::new().with_env("PORT").with_default("8080"),
///             Some(self.port.target()),
///         )]
///     }
/// }
///
/// # fn main() -> Result<(), tagconf::Error> {
/// let mut config = Config { port: 0 };
/// tagconf::set_from(&std::collections::HashMap::<String, String>::new(), &mut config)?;
/// assert_eq!(config.port, 8080);
/// # Ok(())
/// # }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a tagconf record",
    label = "cannot populate this target",
    note = "derive `TagConf` on a struct with named fields"
)]
pub trait TagConf {
    /// Descriptors for every field, in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// Populate `record` from the process environment.
///
/// # Errors
///
/// Returns the first field error; see [`Error`].
pub fn set<R: TagConf + ?Sized>(record: &mut R) -> Result<(), Error> {
    set_from(&Environment, record)
}

/// Populate `record` from `source`.
///
/// Stops at the first failing field. Fields before it stay populated.
///
/// # Errors
///
/// Returns the first field error; see [`Error`].
pub fn set_from<S, R>(source: &S, record: &mut R) -> Result<(), Error>
where
    S: Source + ?Sized,
    R: TagConf + ?Sized,
{
    for field in record.fields() {
        resolve_field(source, field)?;
    }
    Ok(())
}

/// Build a record from the process environment, starting from `R::default()`.
///
/// Unlike [`set`], nothing is observable unless every field resolves.
///
/// # Errors
///
/// Returns the first field error; see [`Error`].
pub fn load<R: TagConf + Default>() -> Result<R, Error> {
    load_from(&Environment)
}

/// Build a record from `source`, starting from `R::default()`.
///
/// # Errors
///
/// Returns the first field error; see [`Error`].
pub fn load_from<S, R>(source: &S) -> Result<R, Error>
where
    S: Source + ?Sized,
    R: TagConf + Default,
{
    let mut record = R::default();
    set_from(source, &mut record)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Default, TagConf)]
    struct Config {
        #[conf(env = "NAME", default = "svc")]
        name: String,
        #[conf(env = "PORT", required = true)]
        port: u16,
        #[conf(env = "DEBUG")]
        debug: bool,
    }

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_set_from_populates_in_place() {
        let mut config = Config {
            debug: true,
            ..Config::default()
        };
        set_from(&source(&[("PORT", "80")]), &mut config).unwrap();
        assert_eq!(config.name, "svc");
        assert_eq!(config.port, 80);
        assert!(config.debug);
    }

    #[test]
    fn test_set_from_stops_at_first_failure() {
        let mut config = Config::default();
        let err = set_from(&source(&[("DEBUG", "1")]), &mut config).unwrap_err();
        assert!(err.is_missing());
        // Earlier fields keep their values, later ones were never reached.
        assert_eq!(config.name, "svc");
        assert!(!config.debug);
    }

    #[test]
    fn test_load_from() {
        let config: Config = load_from(&source(&[("PORT", "1"), ("NAME", "x")])).unwrap();
        assert_eq!(config.name, "x");
        assert_eq!(config.port, 1);

        let result: Result<Config, _> = load_from(&source(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn test_fields_follow_declaration_order() {
        let mut config = Config::default();
        let names: Vec<_> = config.fields().iter().map(|f| f.name).collect();
        assert_eq!(names, ["name", "port", "debug"]);
    }
}
