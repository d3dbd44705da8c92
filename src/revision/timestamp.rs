//! Commit timestamp normalization to UTC.

use chrono::{DateTime, Utc};

use crate::error::TimestampParseError;

/// Layout of git's `%ci` output and of every timestamp in the report.
const LAYOUT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Shape of [`LAYOUT`]: `d` is an ASCII digit, `s` a sign, anything else literal.
const SHAPE: &[u8] = b"dddd-dd-dd dd:dd:dd sdddd";

/// Converts `YYYY-MM-DD HH:MM:SS ±HHMM` to the same layout in UTC.
///
/// The instant is converted, not relabeled: `-0700` shifts the clock time
/// forward seven hours.
///
/// # Errors
///
/// Returns [`TimestampParseError`] if `input` deviates from the layout in
/// any way (extra whitespace, `±HH:MM` offsets, missing seconds) or names an
/// impossible date.
pub fn normalize_utc(input: &str) -> Result<String, TimestampParseError> {
    Ok(format_utc(&parse(input)?))
}

/// Parses a timestamp in the exact git `%ci` layout.
///
/// # Errors
///
/// Returns [`TimestampParseError`] on any deviation from the layout.
pub fn parse(input: &str) -> Result<DateTime<Utc>, TimestampParseError> {
    let err = |reason: String| TimestampParseError { input: input.to_string(), reason };
    check_shape(input).map_err(err)?;
    DateTime::parse_from_str(input, LAYOUT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| err(e.to_string()))
}

/// Renders an instant in the report layout with a `+0000` offset.
#[must_use]
pub fn format_utc(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M:%S +0000").to_string()
}

fn check_shape(input: &str) -> Result<(), String> {
    let bytes = input.as_bytes();
    if bytes.len() != SHAPE.len() {
        return Err(format!("expected {} characters, got {}", SHAPE.len(), bytes.len()));
    }
    for (i, (&b, &expected)) in bytes.iter().zip(SHAPE).enumerate() {
        let ok = match expected {
            b'd' => b.is_ascii_digit(),
            b's' => b == b'+' || b == b'-',
            literal => b == literal,
        };
        if !ok {
            return Err(format!("unexpected character at position {i}"));
        }
    }
    Ok(())
}
