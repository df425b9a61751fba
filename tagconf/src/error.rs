//! Error types for tag-driven configuration

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use crate::duration::DurationError;

/// Where a raw value rejected by a `choices` tag came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The value was read from the source.
    Source,
    /// The value was taken from the field's `default` tag.
    Default,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Source => f.write_str("value"),
            Origin::Default => f.write_str("default value"),
        }
    }
}

/// Errors that can occur while populating a record.
///
/// Every error is fatal to the pass that produced it. Fields resolved before
/// the failing one keep their new values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field carries an `env` tag but exposes no write target.
    #[error("field '{field}' cannot be set")]
    Unsettable {
        /// Name of the field
        field: &'static str,
    },

    /// The resolved raw value is not allowed by the field's `choices` tag.
    #[error("{origin} of '{key}' is '{value}', but not a set or subset of '{choices}'")]
    InvalidChoice {
        /// Whether the rejected value came from the source or the default
        origin: Origin,
        /// Source key named by the `env` tag
        key: String,
        /// The rejected raw value
        value: String,
        /// Raw `choices` tag
        choices: String,
    },

    /// The `required` tag is not a boolean token.
    #[error("invalid required tag {value:?} on field '{field}': {source}")]
    InvalidRequiredTag {
        /// Name of the field
        field: &'static str,
        /// Raw `required` tag
        value: String,
        /// Why the tag was rejected
        source: CoerceError,
    },

    /// No source value, no default, and the field is required.
    #[error("{key} {kind} configuration was missing")]
    MissingRequiredValue {
        /// Source key named by the `env` tag
        key: String,
        /// Kind of source consulted, e.g. `"environment"`
        kind: &'static str,
    },

    /// The raw value could not be converted to the field's type.
    #[error("error setting {field:?} as {type_name}: {source}")]
    Conversion {
        /// Name of the field
        field: &'static str,
        /// Declared type of the field
        type_name: &'static str,
        /// Underlying conversion failure
        source: CoerceError,
    },

    /// One element of a list value could not be converted.
    #[error("error setting {field:?} as {type_name}: element {index}: {source}")]
    Element {
        /// Name of the field
        field: &'static str,
        /// Declared type of the field
        type_name: &'static str,
        /// Zero-based position of the failing element
        index: usize,
        /// Underlying conversion failure
        source: CoerceError,
    },

    /// The field type's own [`Setter`](crate::Setter) reported a failure.
    #[error("error in custom setter for {field:?}: {source}")]
    CustomSetter {
        /// Name of the field
        field: &'static str,
        /// Error returned by the setter
        source: anyhow::Error,
    },
}

/// Failure to convert a single raw string into a scalar value.
#[derive(Debug, thiserror::Error)]
pub enum CoerceError {
    /// Not one of the recognized boolean tokens.
    #[error("invalid boolean {0:?}")]
    Bool(String),

    /// Not an integer, or out of range for the target width.
    #[error("invalid {kind} {value:?}: {source}")]
    Int {
        /// Integer type parsed into
        kind: &'static str,
        /// The rejected raw value
        value: String,
        /// Error from the integer parser
        source: ParseIntError,
    },

    /// An unsigned integer written with `+` or `-`.
    #[error("invalid {kind} {value:?}: unsigned values cannot carry a sign")]
    Signed {
        /// Integer type parsed into
        kind: &'static str,
        /// The rejected raw value
        value: String,
    },

    /// Not a floating point number.
    #[error("invalid {kind} {value:?}: {source}")]
    Float {
        /// Float type parsed into
        kind: &'static str,
        /// The rejected raw value
        value: String,
        /// Error from the float parser
        source: ParseFloatError,
    },

    /// Not a valid duration expression.
    #[error("invalid duration {value:?}: {source}")]
    Duration {
        /// The rejected raw value
        value: String,
        /// Why the expression was rejected
        source: DurationError,
    },
}

impl Error {
    /// Whether this error reports a missing required value.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::MissingRequiredValue { .. })
    }
}
