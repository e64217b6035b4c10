//! Immutable, ordered entry store with exact-title lookup.

use std::collections::HashMap;

use crate::core::error::DocError;
use crate::core::invariants::check_unique_titles;
use crate::document::{Document, Entry, FrontMatter};

/// Read-only view over a document's entries.
///
/// Built once from a [`Document`]; titles are indexed for exact,
/// case-sensitive lookup.
#[derive(Debug, Clone)]
pub struct EntryStore {
    document: Document,
    by_title: HashMap<String, usize>,
}

impl EntryStore {
    /// Fails with [`DocError::DuplicateTitle`] if two entries share a title.
    pub fn new(document: Document) -> Result<Self, DocError> {
        check_unique_titles(&document.entries)?;
        let by_title = document
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.title.trim().is_empty())
            .map(|(position, entry)| (entry.title.clone(), position))
            .collect();
        Ok(Self { document, by_title })
    }

    /// All entries in document order.
    pub fn get_all(&self) -> &[Entry] {
        &self.document.entries
    }

    pub fn get(&self, position: usize) -> Option<&Entry> {
        self.document.entries.get(position)
    }

    /// Exact-match lookup; no trimming, case folding or prefix matching.
    pub fn find_by_title(&self, title: &str) -> Result<&Entry, DocError> {
        self.by_title
            .get(title)
            .map(|&position| &self.document.entries[position])
            .ok_or_else(|| DocError::NotFound(title.to_string()))
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.document.entries.iter().map(|entry| entry.title.as_str())
    }

    pub fn front_matter(&self) -> &FrontMatter {
        &self.document.front_matter
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn len(&self) -> usize {
        self.document.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.entries.is_empty()
    }
}
