//! Lenient numeric coercion.
//!
//! Every number that reaches the invoice model is coerced: non-finite values
//! and unparseable input become `0` instead of an error.

use serde::{Deserialize, Deserializer};

/// Coerce a number to a finite value (`NaN`/`±inf` become `0`).
pub fn numeric(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Parse user-entered text the way a browser number field does.
///
/// Leading whitespace is skipped and the longest numeric prefix is used
/// (`"12abc"` is `12`). Anything without a leading number is `0`.
pub fn parse_numeric(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - (end + 1);
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().map(numeric).unwrap_or(0.0)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumericRepr {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Serde adapter for numeric document fields.
///
/// Accepts numbers, numeric strings and `null`; anything else becomes `0`.
/// Combine with `#[serde(default)]` so a missing field is `0` as well.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<NumericRepr>::deserialize(deserializer)?;
    Ok(match repr {
        Some(NumericRepr::Number(n)) => numeric(n),
        Some(NumericRepr::Text(s)) => parse_numeric(&s),
        Some(NumericRepr::Other(_)) | None => 0.0,
    })
}
