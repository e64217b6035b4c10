//! Domain errors for document handling.
//!
//! Orchestration code wraps these in `anyhow` with file context; `main`
//! recovers them via `downcast_ref` to pick an exit code.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocError {
    /// Entry lacks a title, or lacks code samples without a note covering the gap.
    #[error("malformed entry #{position} '{title}': {reason}")]
    MalformedEntry {
        position: usize,
        title: String,
        reason: String,
    },

    #[error("entry not found: '{0}'")]
    NotFound(String),

    #[error("duplicate title '{title}' at #{first} and #{second}")]
    DuplicateTitle {
        title: String,
        first: usize,
        second: usize,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}
