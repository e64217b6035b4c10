//! Document loading: markdown source or schema-validated JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde_json::Value;
use tracing::debug;

use crate::core::store::EntryStore;
use crate::document::Document;
use crate::io::parse::parse_document;

pub const DOCUMENT_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/document/v1.schema.json"
));

/// Load a document from disk.
///
/// `.json` files are checked against the bundled schema before
/// deserialization; anything else is parsed as markdown.
pub fn load_document(path: &Path) -> Result<Document> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let document = if is_json {
        document_from_json(&contents).with_context(|| format!("load {}", path.display()))?
    } else {
        parse_document(&contents).with_context(|| format!("parse {}", path.display()))?
    };
    debug!(
        path = %path.display(),
        entries = document.entries.len(),
        "loaded document"
    );
    Ok(document)
}

/// Load a document and index it for lookup.
pub fn load_store(path: &Path) -> Result<EntryStore> {
    let document = load_document(path)?;
    let store =
        EntryStore::new(document).with_context(|| format!("index {}", path.display()))?;
    Ok(store)
}

/// Deserialize a JSON document after schema validation.
pub fn document_from_json(contents: &str) -> Result<Document> {
    let value: Value = serde_json::from_str(contents).context("parse document json")?;
    validate_schema(&value)?;
    let document: Document =
        serde_json::from_value(value).context("deserialize document json")?;
    Ok(document)
}

fn validate_schema(document: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(DOCUMENT_SCHEMA).context("parse document schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(document) {
        let messages = compiled
            .iter_errors(document)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!(
            "document schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::DocError;
    use crate::test_support::temp_document;

    #[test]
    fn loads_markdown_by_default() {
        let (_dir, path) =
            temp_document("doc.md", "## A\n\n### New\n\n```\nx\n```\n").expect("doc");
        let doc = load_document(&path).expect("load");
        assert_eq!(doc.titles(), vec!["A"]);
    }

    #[test]
    fn loads_valid_json() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("doc.json");
        fs::write(
            &path,
            r#"{
  "front_matter": { "title": "T", "language": "csharp" },
  "entries": [
    { "title": "nameof operator", "new_syntax": "nameof(x)", "old_syntax": "\"x\"" }
  ]
}"#,
        )
        .expect("write");
        let doc = load_document(&path).expect("load");
        assert_eq!(doc.front_matter.language.as_deref(), Some("csharp"));
        assert_eq!(doc.entries[0].old_syntax, "\"x\"");
        assert_eq!(doc.entries[0].notes, None);
    }

    #[test]
    fn json_schema_rejects_missing_samples() {
        let err = document_from_json(r#"{ "entries": [ { "title": "A" } ] }"#)
            .expect_err("schema should fail");
        assert!(err.to_string().contains("schema validation failed"));
    }

    #[test]
    fn parse_errors_keep_doc_error() {
        let (_dir, path) = temp_document("doc.md", "## A\n\n```\nopen\n").expect("doc");
        let err = load_document(&path).expect_err("unterminated");
        assert!(matches!(
            err.root_cause().downcast_ref::<DocError>(),
            Some(DocError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn load_store_rejects_duplicates() {
        let (_dir, path) = temp_document("doc.md", "## A\n\n## A\n").expect("doc");
        let err = load_store(&path).expect_err("duplicates");
        assert!(format!("{err:#}").contains("duplicate title 'A'"));
    }
}
