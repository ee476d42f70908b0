use unicode_normalization::UnicodeNormalization as _;

use crate::locale::Locale;

/// The marker which, at the start of a value, means that the value was intentionally left to be filled in later.
pub const PLACEHOLDER_MARKER: &str = "TODO";

/// Returns whether the value is a placeholder sentinel, such as `"TODO: add the phone number"`.
pub fn is_placeholder(value: &str) -> bool {
    value.trim().starts_with(PLACEHOLDER_MARKER)
}

/// Sanitizes a scalar value pulled from the résumé. Absent, blank and placeholder values are all
/// treated as not provided and return `None`, everything else is trimmed and normalized in the NFC form.
pub fn safe_text(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    if is_placeholder(value) {
        log::trace!("Suppressing the placeholder value {:?}", value);
        return None;
    }

    Some(value.nfc().collect())
}

/// Collapses every run of whitespace into a single space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Greedily packs the characters of the (whitespace-collapsed) text into fragments holding at most
/// `maximum_characters` characters each. Words are not kept together: this mirrors how CJK text
/// flows, and for mixed text it trades prettiness for a predictable page count.
pub fn wrap_text(text: &str, maximum_characters: usize) -> Vec<String> {
    let text = collapse_whitespace(text);
    if text.is_empty() {
        return Vec::new();
    }
    let maximum_characters = maximum_characters.max(1);

    let mut fragments = Vec::new();
    let mut current_fragment = String::new();
    let mut current_length = 0;
    for character in text.chars() {
        if current_length >= maximum_characters {
            fragments.push(std::mem::take(&mut current_fragment));
            current_length = 0;
        }
        current_fragment.push(character);
        current_length += 1;
    }
    if !current_fragment.is_empty() {
        fragments.push(current_fragment);
    }

    fragments
}

/// Formats the period between the start and the end dates, both of which are sanitized beforehand.
/// An open-ended period is closed by the localized "present" marker, while an empty string means
/// that the line holding the range should be suppressed.
pub fn format_range(start: Option<&str>, end: Option<&str>, locale: Locale) -> String {
    match (safe_text(start), safe_text(end)) {
        (Some(start), Some(end)) => format!("{} – {}", start, end),
        (Some(start), None) => format!("{} – {}", start, locale.labels().present),
        (None, Some(end)) => end,
        (None, None) => String::new(),
    }
}

/// Joins the provided parts with the separator, skipping the ones which are not provided.
pub fn join_present(parts: &[Option<String>], separator: &str) -> Option<String> {
    let parts: Vec<&str> = parts
        .iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(separator))
    }
}
