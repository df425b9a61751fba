//! Validation of raw values against a `choices` tag.

use crate::coerce::split;

/// Whether `value` is one of the delimited `choices`, compared whole.
///
/// Used for scalar fields: the value is never split, so `"a,b"` is not a
/// member of `"a,b"`. An empty value is never valid.
pub fn is_choice_member(choices: &str, value: &str, delimiter: &str) -> bool {
    !value.is_empty() && split(choices, delimiter).contains(&value)
}

/// Whether every delimited token of `values` appears in `choices`.
///
/// Used for list fields: both sides are split on `delimiter` before
/// comparing, so a list value is accepted only when it is a subset of the
/// choices. Empty inputs are never valid.
pub fn is_valid_choice(choices: &str, values: &str, delimiter: &str) -> bool {
    if choices.is_empty() || values.is_empty() {
        return false;
    }

    let allowed = split(choices, delimiter);
    split(values, delimiter)
        .iter()
        .all(|value| allowed.contains(value))
}
