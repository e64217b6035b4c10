//! Structural invariants for topic entries and documents.

use std::collections::HashMap;

use crate::core::error::DocError;
use crate::document::{Document, Entry};

/// Check one entry at `position`:
/// - title is non-blank, a single line, with no surrounding whitespace
/// - at least one code sample is present
/// - an empty sample is only allowed when a note explains it
pub fn check_entry(position: usize, entry: &Entry) -> Result<(), DocError> {
    let malformed = |reason: &str| DocError::MalformedEntry {
        position,
        title: entry.title.trim().to_string(),
        reason: reason.to_string(),
    };

    if entry.title.trim().is_empty() {
        return Err(malformed("missing title"));
    }
    if entry.title.contains(['\n', '\r']) {
        return Err(malformed("title spans multiple lines"));
    }
    if entry.title.trim() != entry.title {
        return Err(malformed("title has leading or trailing whitespace"));
    }

    let new_empty = entry.new_syntax.trim().is_empty();
    let old_empty = entry.old_syntax.trim().is_empty();
    match (new_empty, old_empty) {
        (true, true) => Err(malformed("missing both code samples")),
        (true, false) if entry.note().is_none() => {
            Err(malformed("empty new sample without a note"))
        }
        (false, true) if entry.note().is_none() => {
            Err(malformed("empty old sample without a note"))
        }
        _ => Ok(()),
    }
}

/// Every malformed entry in document order (empty when all entries are well-formed).
pub fn malformed_entries(document: &Document) -> Vec<DocError> {
    document
        .entries
        .iter()
        .enumerate()
        .filter_map(|(position, entry)| check_entry(position, entry).err())
        .collect()
}

/// First repeated title, reported with both positions.
///
/// Blank titles are skipped; those are reported by [`check_entry`].
pub fn check_unique_titles(entries: &[Entry]) -> Result<(), DocError> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (position, entry) in entries.iter().enumerate() {
        let title = entry.title.as_str();
        if title.trim().is_empty() {
            continue;
        }
        if let Some(&first) = seen.get(title) {
            return Err(DocError::DuplicateTitle {
                title: title.to_string(),
                first,
                second: position,
            });
        }
        seen.insert(title, position);
    }
    Ok(())
}
