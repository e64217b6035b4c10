//! Markdown source format for feature-comparison documents.
//!
//! Layout: optional `---` front matter with `key: value` lines, then one
//! `## Title` section per entry. Inside an entry, prose up to the first
//! `### New…` / `### Old…` heading is the description, the first fenced block
//! under each of those headings is the sample, and `>` lines after the samples
//! form the note. Headings inside fenced blocks are plain text. Prose before
//! the first entry (other than the `#` heading) is the preamble.
//!
//! Prose lines that would read as headings or fences are written with a
//! leading backslash (`\## x`); the parser strips exactly one.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::core::error::DocError;
use crate::document::{Document, Entry, FrontMatter};

static ENTRY_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##(?:[ \t]+(.*?))?[ \t]*$").expect("entry heading regex"));
static SAMPLE_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^###[ \t]+(.*?)[ \t]*$").expect("sample heading regex"));
static FENCE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(`{3,})[ \t]*([^`]*?)[ \t]*$").expect("fence regex"));
static QUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}>[ \t]?(.*)$").expect("quote regex"));
static TITLE_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[ \t]|$)").expect("title heading regex"));
static STRUCTURAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^( {0,3})(\\*(?:#|```))").expect("structural line regex"));
static ESCAPED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^( {0,3})\\(\\*(?:#|```))").expect("escaped line regex"));

/// Backslash-escape prose lines the parser would treat as headings or fences.
pub fn escape_prose(text: &str) -> String {
    text.lines()
        .map(|line| STRUCTURAL_RE.replace(line, r"$1\$2").into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

fn unescape_prose_line(line: &str) -> String {
    ESCAPED_RE.replace(line, "$1$2").into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Description,
    New,
    Old,
}

#[derive(Debug)]
struct OpenFence {
    len: usize,
    line: usize,
    lines: Vec<String>,
}

#[derive(Debug)]
struct EntryBuilder {
    title: String,
    section: Section,
    description: Vec<String>,
    new_syntax: Option<String>,
    old_syntax: Option<String>,
    notes: Vec<String>,
}

impl EntryBuilder {
    fn new(title: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            section: Section::Description,
            description: Vec::new(),
            new_syntax: None,
            old_syntax: None,
            notes: Vec::new(),
        }
    }

    fn finish(self) -> Entry {
        let notes = self.notes.join("\n").trim().to_string();
        Entry {
            title: self.title,
            description: self.description.join("\n").trim().to_string(),
            new_syntax: self.new_syntax.unwrap_or_default(),
            old_syntax: self.old_syntax.unwrap_or_default(),
            notes: (!notes.is_empty()).then_some(notes),
        }
    }
}

/// Parse a markdown document into front matter and ordered entries.
///
/// Structural problems in entries (blank titles, missing samples) are left
/// for validation; only unterminated front matter or fences fail here.
pub fn parse_document(contents: &str) -> Result<Document, DocError> {
    let normalized = contents.replace("\r\n", "\n");
    let (front_matter, body, body_start) = split_front_matter(&normalized)?;

    let mut entries = Vec::new();
    let mut preamble: Vec<String> = Vec::new();
    let mut current: Option<EntryBuilder> = None;
    let mut fence: Option<OpenFence> = None;

    for (offset, line) in body.lines().enumerate() {
        let line_no = body_start + offset;

        if let Some(open) = fence.as_mut() {
            if is_closing_fence(line, open.len) {
                let closed = fence.take().map(|f| f.lines.join("\n")).unwrap_or_default();
                close_fence(current.as_mut(), &mut preamble, closed, line);
            } else {
                open.lines.push(line.to_string());
            }
            continue;
        }

        if let Some(caps) = FENCE_OPEN_RE.captures(line) {
            match current.as_mut() {
                Some(entry) if entry.section == Section::Description => {
                    entry.description.push(line.to_string());
                }
                Some(_) => {}
                None => preamble.push(line.to_string()),
            }
            fence = Some(OpenFence {
                len: caps[1].len(),
                line: line_no,
                lines: Vec::new(),
            });
            continue;
        }

        if let Some(caps) = ENTRY_HEADING_RE.captures(line) {
            if let Some(done) = current.take() {
                entries.push(done.finish());
            }
            let title = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            current = Some(EntryBuilder::new(title));
            continue;
        }

        let Some(entry) = current.as_mut() else {
            if TITLE_HEADING_RE.is_match(line) {
                debug!(line = line_no, "skipping document heading");
            } else {
                preamble.push(unescape_prose_line(line));
            }
            continue;
        };

        if let Some(caps) = SAMPLE_HEADING_RE.captures(line) {
            let label = caps[1].to_ascii_lowercase();
            if label.starts_with("new") {
                entry.section = Section::New;
                continue;
            }
            if label.starts_with("old") {
                entry.section = Section::Old;
                continue;
            }
        }

        match entry.section {
            Section::Description => entry.description.push(unescape_prose_line(line)),
            Section::New | Section::Old => {
                if let Some(caps) = QUOTE_RE.captures(line) {
                    entry.notes.push(caps[1].to_string());
                } else if !line.trim().is_empty() {
                    debug!(line = line_no, title = %entry.title, "ignoring text outside sample");
                }
            }
        }
    }

    if let Some(open) = fence {
        return Err(DocError::Parse {
            line: open.line,
            message: "unterminated code fence".to_string(),
        });
    }
    if let Some(done) = current.take() {
        entries.push(done.finish());
    }

    debug!(entries = entries.len(), "parsed document");
    Ok(Document {
        front_matter,
        preamble: preamble.join("\n").trim().to_string(),
        entries,
    })
}

fn close_fence(
    current: Option<&mut EntryBuilder>,
    preamble: &mut Vec<String>,
    code: String,
    closing_line: &str,
) {
    let Some(entry) = current else {
        // Fenced blocks in the preamble stay verbatim.
        preamble.extend(code.lines().map(unescape_prose_line));
        preamble.push(closing_line.to_string());
        return;
    };
    let slot = match entry.section {
        Section::New => &mut entry.new_syntax,
        Section::Old => &mut entry.old_syntax,
        Section::Description => {
            // Fenced blocks inside the description stay verbatim.
            entry.description.extend(code.lines().map(unescape_prose_line));
            entry.description.push(closing_line.to_string());
            return;
        }
    };
    if slot.is_none() {
        *slot = Some(code);
    } else {
        debug!(title = %entry.title, "ignoring extra code block in sample section");
    }
}

fn is_closing_fence(line: &str, open_len: usize) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= open_len && trimmed.chars().all(|c| c == '`')
}

/// Split off front matter. Returns (front matter, body, 1-based line number of the body).
fn split_front_matter(contents: &str) -> Result<(FrontMatter, &str, usize), DocError> {
    let Some(after) = contents.strip_prefix("---\n") else {
        return Ok((FrontMatter::default(), contents, 1));
    };
    let (raw, rest) = if let Some(rest) = after.strip_prefix("---\n") {
        ("", rest)
    } else if let Some(end) = after.find("\n---\n") {
        (&after[..end], &after[end + 5..])
    } else if let Some(raw) = after.strip_suffix("\n---") {
        (raw, "")
    } else {
        return Err(DocError::Parse {
            line: 1,
            message: "unterminated front matter".to_string(),
        });
    };

    let mut front = FrontMatter::default();
    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once(':') else {
            continue;
        };
        let value = unquote(value.trim()).to_string();
        match key.trim() {
            "title" => front.title = value,
            "attribution" => front.attribution = value,
            "license" => front.license = value,
            "language" => front.language = (!value.is_empty()).then_some(value),
            other => debug!(key = other, "ignoring unknown front matter key"),
        }
    }

    let consumed = contents.len() - rest.len();
    let body_start = contents[..consumed].lines().count() + 1;
    Ok((front, rest, body_start))
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        return &value[1..value.len() - 1];
    }
    value
}
