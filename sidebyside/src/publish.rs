//! `sidebyside render`: load, render and write a document.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::io::document_store::load_document;
use crate::io::output::write_output;
use crate::render::{Format, RenderOptions, Rendered, render};

/// Pick the output format: explicit flag, then output extension, then config.
pub fn resolve_format(flag: Option<Format>, output: Option<&Path>, configured: Format) -> Format {
    flag.or_else(|| {
        output
            .and_then(|path| path.extension())
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    })
    .unwrap_or(configured)
}

/// Render `input` and write it to `output` (stdout when `None`).
///
/// Nothing is written when rendering fails.
pub fn publish(input: &Path, output: Option<&Path>, options: &RenderOptions) -> Result<Rendered> {
    let document = load_document(input)?;
    let rendered =
        render(&document, options).with_context(|| format!("render {}", input.display()))?;
    write_output(output, &rendered.text)?;
    if let Some(path) = output {
        info!(
            input = %input.display(),
            output = %path.display(),
            format = ?options.format,
            "wrote rendered document"
        );
    }
    Ok(rendered)
}
