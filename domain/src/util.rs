//! Shared utility functions.

use std::borrow::Cow;

/// Shorten `s` to at most `max_chars` characters for log output, marking the
/// cut with `...`. Data URIs are reduced to their header.
pub fn preview(s: &str, max_chars: usize) -> Cow<'_, str> {
    if let Some(rest) = s.strip_prefix("data:")
        && let Some((header, payload)) = rest.split_once(',')
    {
        return Cow::Owned(format!("data:{},<{} bytes>", header, payload.len()));
    }

    match s.char_indices().nth(max_chars) {
        None => Cow::Borrowed(s),
        Some((end, _)) => Cow::Owned(format!("{}...", &s[..end])),
    }
}
