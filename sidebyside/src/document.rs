use serde::{Deserialize, Serialize};

/// One language-feature comparison.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Entry {
    pub title: String,
    pub description: String,
    pub new_syntax: String,
    pub old_syntax: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entry {
    /// Note text with surrounding whitespace removed, if any remains.
    pub fn note(&self) -> Option<&str> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|note| !note.is_empty())
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FrontMatter {
    pub title: String,
    pub attribution: String,
    pub license: String,
    /// Fence info string for code samples (e.g. `csharp`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Front matter plus the ordered topic entries.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Document {
    pub front_matter: FrontMatter,
    /// Introductory prose shown before the first entry.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub preamble: String,
    pub entries: Vec<Entry>,
}

impl Document {
    pub fn titles(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.title.as_str()).collect()
    }
}
