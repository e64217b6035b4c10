//! Structural checks for `sidebyside check`.

use std::path::Path;

use anyhow::Result;

use crate::core::error::DocError;
use crate::core::invariants::{check_unique_titles, malformed_entries};
use crate::document::Document;
use crate::io::document_store::load_document;

/// Structured check outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Every entry is well-formed and titles are unique.
    Clean { entries: usize },
    /// Problems in document order (duplicate titles first).
    Problems(Vec<DocError>),
}

/// Check an in-memory document.
pub fn check_document(document: &Document) -> CheckOutcome {
    let mut problems = Vec::new();
    if let Err(err) = check_unique_titles(&document.entries) {
        problems.push(err);
    }
    problems.extend(malformed_entries(document));
    if problems.is_empty() {
        CheckOutcome::Clean {
            entries: document.entries.len(),
        }
    } else {
        CheckOutcome::Problems(problems)
    }
}

/// Load a document from disk and check it.
pub fn check_path(path: &Path) -> Result<CheckOutcome> {
    let document = load_document(path)?;
    Ok(check_document(&document))
}
