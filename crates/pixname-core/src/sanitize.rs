//! Filename sanitization for model suggestions.
//!
//! Turns an arbitrary string into a token that is safe as a filename
//! component on Windows, macOS and Linux.

/// Default maximum length of a sanitized name.
pub const DEFAULT_MAX_LENGTH: usize = 200;

/// Characters rejected by at least one common filesystem.
const ILLEGAL_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Characters stripped from both ends of the result.
const EDGE_CHARS: &[char] = &['.', '_', ' '];

/// Sanitize a suggested name for use as a filename component.
///
/// Steps, in order: remove illegal characters, collapse whitespace runs into
/// a single `_`, drop anything outside printable ASCII, trim `.`/`_`/space
/// from both ends, truncate to `max_length`.
///
/// The result may be empty when the input had nothing usable in it.
pub fn sanitize_filename(name: &str, max_length: usize) -> String {
    let mut collapsed = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.chars().filter(|c| !ILLEGAL_CHARS.contains(c)) {
        if c.is_whitespace() {
            if !in_whitespace {
                collapsed.push('_');
            }
            in_whitespace = true;
        } else {
            collapsed.push(c);
            in_whitespace = false;
        }
    }

    let ascii: String = collapsed.chars().filter(|c| c.is_ascii_graphic()).collect();
    let trimmed = ascii.trim_matches(EDGE_CHARS);

    // Only ASCII remains, so byte offsets are char offsets.
    let truncated = &trimmed[..trimmed.len().min(max_length)];
    truncated.trim_matches(EDGE_CHARS).to_string()
}
