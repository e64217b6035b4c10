//! Stable exit codes for sidebyside CLI commands.

use crate::core::error::DocError;

/// Command succeeded.
pub const OK: i32 = 0;
/// Unreadable or unparseable input, bad config, or other errors.
pub const INVALID: i32 = 1;
/// `sidebyside show` found no entry with the requested title.
pub const NOT_FOUND: i32 = 2;
/// Malformed entries or duplicate titles (`check`, strict `render`).
pub const MALFORMED: i32 = 3;

/// Exit code for a failed command, based on the domain error it carries.
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<DocError>() {
        Some(DocError::NotFound(_)) => NOT_FOUND,
        Some(DocError::MalformedEntry { .. } | DocError::DuplicateTitle { .. }) => MALFORMED,
        Some(DocError::Parse { .. }) | None => INVALID,
    }
}
