//! Channel display-name formatting.
//!
//! A tracked channel is named `{emoji}│{base}`. Re-applying a status replaces
//! only a recognized emoji prefix and leaves the rest of the name untouched,
//! so the formatter is idempotent.

use crate::status::Status;

/// Separator between the status emoji and the base channel name.
pub const SEPARATOR: char = '│';

/// Maximum display-name length, in characters, imposed by the platform.
pub const MAX_NAME_CHARS: usize = 100;

const TRUNCATION_MARKER: char = '…';

/// Returns the channel name with any recognized status prefix removed.
pub fn strip_status_prefix(name: &str) -> &str {
    if let Some((head, rest)) = name.split_once(SEPARATOR)
        && Status::from_emoji(head.trim()).is_some()
    {
        return rest.trim_start();
    }
    name
}

/// Formats a channel name for the given status.
///
/// Replaces a recognized `{emoji}│` prefix or prepends one, then truncates to
/// [`MAX_NAME_CHARS`] characters, reserving one for the truncation marker.
pub fn with_status(name: &str, status: Status) -> String {
    let base = strip_status_prefix(name);
    let full = format!("{}{}{}", status.emoji(), SEPARATOR, base);

    if full.chars().count() <= MAX_NAME_CHARS {
        return full;
    }
    let truncated: String = full.chars().take(MAX_NAME_CHARS - 1).collect();
    format!("{truncated}{TRUNCATION_MARKER}")
}
