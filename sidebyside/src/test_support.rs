//! Test-only helpers for constructing documents and loading fixtures.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::document::{Document, Entry, FrontMatter};
use crate::io::parse::parse_document;

/// Create a deterministic, well-formed entry.
///
/// Description and samples never repeat the title, so tests can count title
/// occurrences in rendered output.
pub fn entry(title: &str) -> Entry {
    Entry {
        title: title.to_string(),
        description: "Shows the shorter form.".to_string(),
        new_syntax: "var x = 1;".to_string(),
        old_syntax: "int x = 1;".to_string(),
        notes: None,
    }
}

/// Create an entry with explicit samples and a note.
pub fn entry_with_note(title: &str, new_syntax: &str, old_syntax: &str, note: &str) -> Entry {
    Entry {
        new_syntax: new_syntax.to_string(),
        old_syntax: old_syntax.to_string(),
        notes: Some(note.to_string()),
        ..entry(title)
    }
}

/// Wrap entries in a document with fixed front matter.
pub fn document_with(entries: Vec<Entry>) -> Document {
    Document {
        front_matter: FrontMatter {
            title: "Test document".to_string(),
            attribution: "Test authors".to_string(),
            license: "MIT".to_string(),
            language: None,
        },
        preamble: String::new(),
        entries,
    }
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Parse a markdown fixture from `tests/fixtures/`.
pub fn load_fixture(name: &str) -> Result<Document> {
    let path = fixture_path(name);
    let contents =
        fs::read_to_string(&path).with_context(|| format!("read fixture {}", path.display()))?;
    Ok(parse_document(&contents)?)
}

/// The bundled feature-comparison document shipped in `content/`.
pub fn bundled_document() -> Result<Document> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../content/csharp6.md");
    let contents = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    Ok(parse_document(&contents)?)
}

/// Write `contents` to `name` inside a fresh temp directory.
///
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn temp_document(name: &str, contents: &str) -> Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create tempdir")?;
    let path = dir.path().join(name);
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}
