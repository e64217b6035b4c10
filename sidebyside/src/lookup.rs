//! Title listing and single-entry lookup for `sidebyside list` / `show`.

use std::path::Path;

use anyhow::Result;

use crate::core::store::EntryStore;
use crate::io::document_store::load_store;
use crate::render::{language, render_entry};

/// Titles in document order.
pub fn list_titles(path: &Path) -> Result<Vec<String>> {
    let store = load_store(path)?;
    Ok(store.titles().map(str::to_string).collect())
}

/// Render the entry titled exactly `title` as a markdown section.
///
/// Fails with [`crate::core::error::DocError::NotFound`] when absent.
pub fn show_entry(path: &Path, title: &str) -> Result<String> {
    let store = load_store(path)?;
    show_from_store(&store, title)
}

pub fn show_from_store(store: &EntryStore, title: &str) -> Result<String> {
    let entry = store.find_by_title(title)?;
    render_entry(entry, language(store.front_matter()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::DocError;
    use crate::test_support::bundled_document;

    #[test]
    fn show_bundled_nameof() {
        let store = EntryStore::new(bundled_document().expect("bundled")).expect("store");
        let text = show_from_store(&store, "nameof operator").expect("show");
        assert!(text.starts_with("## nameof operator\n"));
        assert!(text.contains("nameof("));
    }

    #[test]
    fn show_unknown_title_is_not_found() {
        let store = EntryStore::new(bundled_document().expect("bundled")).expect("store");
        let err = show_from_store(&store, "nonexistent").expect_err("missing");
        assert_eq!(
            err.downcast_ref::<DocError>(),
            Some(&DocError::NotFound("nonexistent".to_string()))
        );
    }
}
