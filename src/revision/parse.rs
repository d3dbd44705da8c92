//! Line-oriented `KEY = value` parser for the revision file.
//!
//! Grammar for one line:
//!
//! ```text
//! line  := ws* ("export" ws+)? KEY ws* "=" ws* value
//! value := <rest of line>, trimmed, minus one layer of matching quotes
//! ```
//!
//! The key must be a whole identifier token: `XKEY = 1` and `KEY_X = 1` do
//! not assign `KEY`. The first assigning line in document order wins.

/// Extracts the value assigned to `key` in `content`.
///
/// Returns `None` when no line assigns the key. A line that assigns an empty
/// value yields `Some("")`; callers decide whether that is acceptable.
#[must_use]
pub fn extract_value<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    content.lines().find_map(|line| parse_line(line, key))
}

/// Parses one line, returning the unquoted value if it assigns `key`.
#[must_use]
pub fn parse_line<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let rest = line.trim_start();
    let rest = strip_export(rest).unwrap_or(rest);
    let rest = rest.strip_prefix(key)?;
    if rest.starts_with(is_ident_char) {
        return None;
    }
    let rest = rest.trim_start_matches(is_inline_ws).strip_prefix('=')?;
    Some(unquote(rest.trim()))
}

/// Removes one layer of matching `"` or `'` quotes.
#[must_use]
pub fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote)) {
            return inner;
        }
    }
    value
}

fn strip_export(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("export")?;
    rest.starts_with(is_inline_ws).then(|| rest.trim_start_matches(is_inline_ws))
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_inline_ws(c: char) -> bool {
    c == ' ' || c == '\t'
}
