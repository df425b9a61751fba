//! Compound duration expressions such as `1h30m`, `1.5s` or `250ms`.
//!
//! A duration is an optional `+` followed by one or more `<number><unit>`
//! components, where a number may carry a fractional part. The bare string
//! `0` is also accepted. Components are summed, so `1h1h` is two hours.

use std::fmt::Write as _;
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Fraction digits past this many are ignored; they cannot change the
/// nanosecond result of any unit.
const MAX_FRACTION_DIGITS: usize = 20;

/// Failure to parse a duration expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    /// The input is empty.
    #[error("empty duration")]
    Empty,
    /// The input starts with `-`.
    #[error("negative durations are not supported")]
    Negative,
    /// A component has no number before its unit.
    #[error("expected a number at offset {0}")]
    MissingNumber(usize),
    /// A number is not followed by a unit.
    #[error("missing unit after number at offset {0}")]
    MissingUnit(usize),
    #[error("unknown unit {0:?}")]
    UnknownUnit(String),
    #[error("duration overflows")]
    Overflow,
}

fn unit_nanos(unit: &str) -> Option<u128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "\u{00b5}s" | "\u{03bc}s" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SEC,
        "m" => 60 * NANOS_PER_SEC,
        "h" => 3_600 * NANOS_PER_SEC,
        _ => return None,
    };
    Some(nanos)
}

/// Parse a duration expression.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let mut rest = input;
    if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    } else if rest.starts_with('-') {
        return Err(DurationError::Negative);
    }

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationError::Empty);
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let offset = input.len() - rest.len();

        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_digits, after_int) = rest.split_at(int_len);

        let mut frac_digits = "";
        let mut after_number = after_int;
        if let Some(after_dot) = after_int.strip_prefix('.') {
            let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
            let (digits, tail) = after_dot.split_at(frac_len);
            frac_digits = digits;
            after_number = tail;
        }
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(DurationError::MissingNumber(offset));
        }

        let unit_len = after_number
            .char_indices()
            .find(|(_, c)| *c == '.' || c.is_ascii_digit())
            .map_or(after_number.len(), |(i, _)| i);
        if unit_len == 0 {
            return Err(DurationError::MissingUnit(offset));
        }
        let (unit, tail) = after_number.split_at(unit_len);
        let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit(unit.to_string()))?;

        let whole = parse_digits(int_digits)?
            .checked_mul(scale)
            .ok_or(DurationError::Overflow)?;
        let fraction = fraction_nanos(frac_digits, scale);
        total = total
            .checked_add(whole)
            .and_then(|t| t.checked_add(fraction))
            .ok_or(DurationError::Overflow)?;

        rest = tail;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| DurationError::Overflow)?;
    // Remainder is below one second, so it fits.
    let nanos = (total % NANOS_PER_SEC) as u32;
    Ok(Duration::new(secs, nanos))
}

fn parse_digits(digits: &str) -> Result<u128, DurationError> {
    digits.bytes().try_fold(0u128, |acc, b| {
        acc.checked_mul(10)
            .and_then(|acc| acc.checked_add(u128::from(b - b'0')))
            .ok_or(DurationError::Overflow)
    })
}

fn fraction_nanos(digits: &str, scale: u128) -> u128 {
    let mut value: u128 = 0;
    let mut denominator: u128 = 1;
    for b in digits.bytes().take(MAX_FRACTION_DIGITS) {
        value = value * 10 + u128::from(b - b'0');
        denominator *= 10;
    }
    value * scale / denominator
}

/// Render a duration in the grammar accepted by [`parse_duration`].
///
/// Durations of a second or more are written as hours, minutes and
/// (fractional) seconds, e.g. `1h2m3.5s`; shorter ones use the largest of
/// `ms`, `us` or `ns` that represents them exactly.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let nanos = duration.subsec_nanos();

    if secs == 0 {
        return match nanos {
            0 => "0s".to_string(),
            n if n % 1_000_000 == 0 => format!("{}ms", n / 1_000_000),
            n if n % 1_000 == 0 => format!("{}us", n / 1_000),
            n => format!("{n}ns"),
        };
    }

    let mut out = String::new();
    let (hours, minutes, seconds) = (secs / 3_600, secs / 60 % 60, secs % 60);
    if hours > 0 {
        let _ = write!(out, "{hours}h");
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    let _ = write!(out, "{seconds}");
    if nanos > 0 {
        let fraction = format!("{nanos:09}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out.push('s');
    out
}
