// Named format predicates
//
// Formats are semantic refinements checked after the structural
// constraints. String formats apply to string values and utc-millisec
// to numeric values; a format that does not apply to the value's type
// is skipped, as is a format name nothing here recognizes.

use chrono::{DateTime, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Zero-padded YYYY-MM-DD; chrono alone also admits unpadded and signed parts
static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Zero-padded HH:MM:SS
static TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}$").unwrap());

/// Hex color, #RGB or #RRGGBB, case-insensitive
static COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").unwrap());

/// One or more CSS `property: value` declarations separated by semicolons
static STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(-?[A-Za-z][A-Za-z0-9-]*\s*:\s*[^;]+;?\s*)+$").unwrap());

/// Digits with optional separators and an optional leading plus
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9() .\-]+$").unwrap());

/// Characters admissible in an absolute or relative URI reference
static URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=%]+$").unwrap());

/// Check a string value against a named format.
///
/// Returns `None` when the name is not a recognized string format; the
/// caller skips that case.
pub(crate) fn check_string(format: &str, value: &str) -> Option<bool> {
    match format {
        "date-time" => Some(DateTime::parse_from_rfc3339(value).is_ok()),
        "date" => Some(
            DATE.is_match(value) && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
        ),
        "time" => Some(
            TIME.is_match(value) && NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok(),
        ),
        "color" => Some(COLOR.is_match(value)),
        "style" => Some(STYLE.is_match(value)),
        "phone" => Some(is_phone(value)),
        "uri" => Some(URI.is_match(value)),
        _ => None,
    }
}

/// Check a numeric value against a named format.
pub(crate) fn check_number(format: &str, value: f64) -> Option<bool> {
    match format {
        "utc-millisec" => Some(value >= 0.0),
        _ => None,
    }
}

fn is_phone(value: &str) -> bool {
    PHONE.is_match(value) && value.chars().any(|c| c.is_ascii_digit())
}
