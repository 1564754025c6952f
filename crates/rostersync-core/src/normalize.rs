//! Group label canonicalization.
//!
//! Raw roster group fields are free text: a separator-delimited list of
//! human-readable labels with arbitrary casing, whitespace and accents.
//! The directory only accepts machine-safe group names, so every label is
//! reduced to a canonical identifier before any comparison happens.
//!
//! The pipeline runs over the whole field, each step on the previous
//! step's output, with the separator split last:
//!
//! 1. trim leading/trailing whitespace and separator characters;
//! 2. collapse internal whitespace runs to single underscores, lowercase;
//! 3. transliterate the lowercase umlauts ä/ö/ü to ae/oe/ue;
//! 4. NFKD-decompose and drop every non-ASCII codepoint;
//! 5. drop every character that is not `[A-Za-z0-9_-]` or the separator;
//! 6. split on the separator, discarding empty segments.

use unicode_normalization::UnicodeNormalization;

use crate::ids::GroupId;

/// Canonicalize a raw group membership field.
///
/// Returns one `(canonical id, original label)` pair per surviving
/// segment, in field order. The original label is the whitespace-trimmed
/// pre-normalization segment at the same separator position; segments
/// that reduce to nothing are dropped and contribute no pair.
///
/// The function is pure: equal inputs always produce equal outputs.
///
/// # Example
///
/// ```
/// use rostersync_core::normalize_group_field;
///
/// let pairs = normalize_group_field("Büro/Team", '/');
/// assert_eq!(pairs[0].0.as_str(), "buero");
/// assert_eq!(pairs[0].1, "Büro");
/// assert_eq!(pairs[1].0.as_str(), "team");
/// ```
#[must_use]
pub fn normalize_group_field(raw: &str, separator: char) -> Vec<(GroupId, String)> {
    let stripped = raw.trim_matches(|c: char| c.is_whitespace() || c == separator);

    let collapsed = stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();

    // Lowercase only: the previous step already folded case.
    let transliterated = collapsed
        .replace('ä', "ae")
        .replace('ö', "oe")
        .replace('ü', "ue");

    let ascii: String = transliterated
        .nfkd()
        .filter(char::is_ascii)
        .collect();

    let cleaned: String = ascii
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || *c == separator)
        .collect();

    // No step adds or removes separator characters, so segments line up
    // positionally with the segments of the stripped original.
    let originals: Vec<&str> = stripped.split(separator).collect();

    cleaned
        .split(separator)
        .enumerate()
        .filter(|(_, segment)| !segment.is_empty())
        .map(|(idx, segment)| {
            let label = originals.get(idx).map_or("", |s| s.trim());
            (GroupId::new(segment), label.to_string())
        })
        .collect()
}
