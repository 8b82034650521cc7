//! Tag splitting and joining
//!
//! Tag strings are the interchange format between nodes: tags joined by
//! `", "`. Users also type tags by hand, one per line or comma separated,
//! so splitting accepts either separator.

use once_cell::sync::Lazy;
use regex::Regex;

/// Separator used when joining tags into a tag string
pub const TAG_SEPARATOR: &str = ", ";

/// A comma or a newline, with any surrounding whitespace
static SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*,\s*|\s*\n\s*").expect("tag separator pattern"));

/// Split free-form text into trimmed, non-empty tags, in order.
pub fn split_tags(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join tags with `", "`, skipping blank ones.
pub fn join_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(AsRef::as_ref)
        .filter(|tag| !tag.trim().is_empty())
        .collect::<Vec<_>>()
        .join(TAG_SEPARATOR)
}
