//! # Title Formatting
//!
//! Turns identifiers such as `getKey` or `requestId-30` into display titles.

use regex::Regex;
use std::sync::OnceLock;

/// Converts an identifier into a space-separated, capitalized title.
///
/// Boundaries are inserted before an uppercase letter that follows a
/// lowercase letter or digit, and at every hyphen or whitespace run.
/// Digits glued to letters stay in their segment.
///
/// ```
/// use mdxgen_core::format_title;
///
/// assert_eq!(format_title("getKey"), "Get Key");
/// assert_eq!(format_title("requestId30"), "Request Id30");
/// assert_eq!(format_title("requestId-30"), "Request Id 30");
/// ```
pub fn format_title(identifier: &str) -> String {
    static CAMEL_RE: OnceLock<Regex> = OnceLock::new();
    let camel_re =
        CAMEL_RE.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").expect("Invalid regex"));

    let split = camel_re.replace_all(identifier, "$1 $2");

    split
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
