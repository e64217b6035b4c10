//! Document renderer: markdown (re-parseable), standalone HTML, or JSON.
//!
//! Templates are compiled into the binary and rendered with minijinja. HTML
//! output is auto-escaped by template name.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use clap::ValueEnum;
use minijinja::{Environment, context};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::DocError;
use crate::core::invariants::{check_entry, check_unique_titles};
use crate::document::{Document, Entry, FrontMatter};
use crate::io::parse::escape_prose;

const DOCUMENT_MD_TEMPLATE: &str = include_str!("templates/document.md");
const ENTRY_MD_TEMPLATE: &str = include_str!("templates/entry.md");
const DOCUMENT_HTML_TEMPLATE: &str = include_str!("templates/document.html");

/// Output format for `render`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Markdown,
    Html,
    Json,
}

impl Format {
    /// Guess a format from an output file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "html" | "htm" => Some(Self::Html),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Section headings used for the two samples in HTML output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Labels {
    pub new: String,
    pub old: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            new: "New".to_string(),
            old: "Old".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: Format,
    /// Fail the whole render on the first malformed entry instead of skipping it.
    pub strict: bool,
    pub labels: Labels,
}

/// Rendered artifact plus the entries left out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Malformed entries skipped in lenient mode, in document order.
    pub skipped: Vec<DocError>,
}

#[derive(Debug, Clone, Serialize)]
struct FieldContext<'a> {
    key: &'static str,
    value: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct EntryContext<'a> {
    position: usize,
    title: &'a str,
    description: &'a str,
    /// Description with heading and fence lines escaped for markdown output.
    description_md: String,
    paragraphs: Vec<&'a str>,
    new_syntax: &'a str,
    old_syntax: &'a str,
    new_block: String,
    old_block: String,
    note: Option<&'a str>,
    note_quoted: Option<String>,
}

impl<'a> EntryContext<'a> {
    fn from_entry(position: usize, entry: &'a Entry, language: &str) -> Self {
        let description = entry.description.trim();
        Self {
            position,
            title: entry.title.as_str(),
            description,
            description_md: escape_prose(description),
            paragraphs: paragraphs(description),
            new_syntax: &entry.new_syntax,
            old_syntax: &entry.old_syntax,
            new_block: fenced(&entry.new_syntax, language),
            old_block: fenced(&entry.old_syntax, language),
            note: entry.note(),
            note_quoted: entry.note().map(quote),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonDocument<'a> {
    front_matter: &'a FrontMatter,
    #[serde(skip_serializing_if = "Option::is_none")]
    preamble: Option<&'a str>,
    entries: Vec<&'a Entry>,
}

/// Template engine wrapper around minijinja.
struct RenderEngine {
    env: Environment<'static>,
}

impl RenderEngine {
    fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template("entry.md", ENTRY_MD_TEMPLATE)
            .expect("entry template should be valid");
        env.add_template("document.md", DOCUMENT_MD_TEMPLATE)
            .expect("markdown template should be valid");
        env.add_template("document.html", DOCUMENT_HTML_TEMPLATE)
            .expect("html template should be valid");
        Self { env }
    }

    fn render_markdown(&self, document: &Document, entries: &[EntryContext<'_>]) -> Result<String> {
        let template = self.env.get_template("document.md")?;
        let front = &document.front_matter;
        let rendered = template.render(context! {
            front => front,
            front_fields => front_fields(front),
            preamble => escape_prose(document.preamble.trim()),
            entries => entries,
        })?;
        Ok(rendered)
    }

    fn render_html(
        &self,
        document: &Document,
        entries: &[EntryContext<'_>],
        labels: &Labels,
    ) -> Result<String> {
        let template = self.env.get_template("document.html")?;
        let front = &document.front_matter;
        let rendered = template.render(context! {
            front => front,
            language => language(front),
            preamble => paragraphs(document.preamble.trim()),
            entries => entries,
            labels => labels,
        })?;
        Ok(rendered)
    }

    fn render_entry(&self, entry: &EntryContext<'_>) -> Result<String> {
        let template = self.env.get_template("entry.md")?;
        Ok(template.render(context! { entry => entry })?)
    }
}

/// Render `document` in the requested format.
///
/// Duplicate titles always fail. A malformed entry fails the render in strict
/// mode; otherwise it is left out and reported in [`Rendered::skipped`].
pub fn render(document: &Document, options: &RenderOptions) -> Result<Rendered> {
    check_unique_titles(&document.entries)?;

    let language = language(&document.front_matter);
    let mut skipped = Vec::new();
    let mut valid: Vec<(usize, &Entry)> = Vec::with_capacity(document.entries.len());
    for (position, entry) in document.entries.iter().enumerate() {
        match check_entry(position, entry) {
            Ok(()) => valid.push((position, entry)),
            Err(err) if options.strict => return Err(err.into()),
            Err(err) => {
                debug!(position, error = %err, "skipping malformed entry");
                skipped.push(err);
            }
        }
    }

    let mut text = match options.format {
        Format::Markdown | Format::Html => {
            let engine = RenderEngine::new();
            let contexts: Vec<EntryContext<'_>> = valid
                .iter()
                .map(|&(position, entry)| EntryContext::from_entry(position, entry, language))
                .collect();
            if options.format == Format::Markdown {
                engine
                    .render_markdown(document, &contexts)
                    .context("render markdown")?
            } else {
                engine
                    .render_html(document, &contexts, &options.labels)
                    .context("render html")?
            }
        }
        Format::Json => {
            let doc = JsonDocument {
                front_matter: &document.front_matter,
                preamble: Some(document.preamble.trim()).filter(|p| !p.is_empty()),
                entries: valid.iter().map(|&(_, entry)| entry).collect(),
            };
            serde_json::to_string_pretty(&doc).context("serialize json")?
        }
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }

    debug!(
        format = ?options.format,
        rendered = valid.len(),
        skipped = skipped.len(),
        "rendered document"
    );
    Ok(Rendered { text, skipped })
}

/// Render a single entry as a markdown section.
pub fn render_entry(entry: &Entry, language: &str) -> Result<String> {
    let ctx = EntryContext::from_entry(0, entry, language);
    let mut text = RenderEngine::new()
        .render_entry(&ctx)
        .context("render entry")?;
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

/// Fence info string for code blocks (empty when the document names no language).
pub fn language(front: &FrontMatter) -> &str {
    front.language.as_deref().map(str::trim).unwrap_or("")
}

fn front_fields(front: &FrontMatter) -> Vec<FieldContext<'_>> {
    [
        ("title", front.title.as_str()),
        ("attribution", front.attribution.as_str()),
        ("license", front.license.as_str()),
        ("language", language(front)),
    ]
    .into_iter()
    .filter(|(_, value)| !value.trim().is_empty())
    .map(|(key, value)| FieldContext {
        key,
        value: value.trim(),
    })
    .collect()
}

/// Wrap `code` in a backtick fence longer than any backtick run inside it.
///
/// The code is kept byte for byte, trailing newlines included.
fn fenced(code: &str, language: &str) -> String {
    static BACKTICKS_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"`+").expect("backtick regex should be valid"));

    let longest = BACKTICKS_RE
        .find_iter(code)
        .map(|m| m.len())
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest.max(2) + 1);
    if code.is_empty() {
        format!("{fence}{language}\n{fence}")
    } else {
        format!("{fence}{language}\n{code}\n{fence}")
    }
}

fn quote(note: &str) -> String {
    note.lines()
        .map(|line| {
            let line = line.trim_end();
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn paragraphs(description: &str) -> Vec<&str> {
    description
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
