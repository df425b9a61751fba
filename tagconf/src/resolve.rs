//! Per-field resolution: source, then default, then the missing-policy.

use crate::choice::{is_choice_member, is_valid_choice};
use crate::coerce::{coerce, parse_bool, Target};
use crate::error::{Error, Origin};
use crate::field::Field;
use crate::source::Source;

/// How a field was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The field has no `env` tag and was not touched.
    Skipped,
    /// The value came from the source.
    Source,
    /// The value came from the `default` tag.
    Default,
    /// Nothing resolved and the field is optional; it keeps its value.
    Unset,
}

/// Resolve a single field against `source`.
///
/// An empty source value counts as absent.
pub fn resolve_field<S: Source + ?Sized>(source: &S, field: Field<'_>) -> Result<Outcome, Error> {
    let Field {
        name,
        type_name,
        tags,
        target,
    } = field;

    let Some(key) = tags.env else {
        tracing::trace!(field = name, "skipping field without env tag");
        return Ok(Outcome::Skipped);
    };

    let Some(target) = target else {
        return Err(Error::Unsettable { field: name });
    };

    let delimiter = tags.delimiter();
    // Lists are checked element-wise, everything else as one value.
    let is_list = matches!(target, Target::List(_));
    let allowed = |choices: &str, value: &str| {
        if is_list {
            is_valid_choice(choices, value, delimiter)
        } else {
            is_choice_member(choices, value, delimiter)
        }
    };
    let check_choices = |value: &str, origin: Origin| match tags.choices {
        Some(choices) if !allowed(choices, value) => {
            Err(Error::InvalidChoice {
                origin,
                key: key.to_string(),
                value: value.to_string(),
                choices: choices.to_string(),
            })
        }
        _ => Ok(()),
    };

    if let Some(value) = source.get(key).filter(|v| !v.is_empty()) {
        check_choices(&value, Origin::Source)?;
        coerce(name, type_name, target, &value, delimiter)?;
        tracing::debug!(field = name, key, "resolved from source");
        return Ok(Outcome::Source);
    }

    if let Some(value) = tags.default {
        check_choices(value, Origin::Default)?;
        coerce(name, type_name, target, value, delimiter)?;
        tracing::debug!(field = name, key, "resolved from default");
        return Ok(Outcome::Default);
    }

    let Some(required) = tags.required else {
        tracing::debug!(field = name, key, "left unset");
        return Ok(Outcome::Unset);
    };

    match parse_bool(required) {
        Err(err) => Err(Error::InvalidRequiredTag {
            field: name,
            value: required.to_string(),
            source: err,
        }),
        Ok(true) => Err(Error::MissingRequiredValue {
            key: key.to_string(),
            kind: source.kind(),
        }),
        Ok(false) => {
            tracing::debug!(field = name, key, "left unset");
            Ok(Outcome::Unset)
        }
    }
}
