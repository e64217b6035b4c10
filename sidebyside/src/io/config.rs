//! Tool configuration stored in `sidebyside.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::render::{Format, Labels, RenderOptions};

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "sidebyside.toml";

/// Render configuration (TOML).
///
/// Command-line flags override these values. Missing fields default to
/// markdown output in lenient mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DocConfig {
    /// Output format used when neither `--format` nor the output extension decides.
    pub format: Format,

    /// Fail the whole render on the first malformed entry.
    pub strict: bool,

    /// Sample headings for HTML output. Markdown always uses `New` / `Old`
    /// so the output stays re-parseable.
    pub labels: Labels,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            format: Format::Markdown,
            strict: false,
            labels: Labels::default(),
        }
    }
}

impl DocConfig {
    pub fn validate(&self) -> Result<()> {
        if self.labels.new.trim().is_empty() {
            return Err(anyhow!("labels.new must not be empty"));
        }
        if self.labels.old.trim().is_empty() {
            return Err(anyhow!("labels.old must not be empty"));
        }
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            format: self.format,
            strict: self.strict,
            labels: self.labels.clone(),
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `DocConfig::default()`.
pub fn load_config(path: &Path) -> Result<DocConfig> {
    if !path.exists() {
        let cfg = DocConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DocConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &DocConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    super::output::write_atomic(path, &buf)
}

/// Write a default config to `path`.
///
/// Fails if the file already exists unless `force` is set.
pub fn init_config(path: &Path, force: bool) -> Result<DocConfig> {
    if path.exists() && !force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    let cfg = DocConfig::default();
    write_config(path, &cfg)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, DocConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("sidebyside.toml");
        let cfg = DocConfig {
            format: Format::Html,
            strict: true,
            labels: Labels {
                new: "C# 6".to_string(),
                old: "C# 5".to_string(),
            },
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("sidebyside.toml");
        fs::write(&path, "format = \"html\"\n[labels]\nnew = \"After\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.format, Format::Html);
        assert!(!cfg.strict);
        assert_eq!(cfg.labels.new, "After");
        assert_eq!(cfg.labels.old, "Old");
    }

    #[test]
    fn blank_label_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("sidebyside.toml");
        fs::write(&path, "[labels]\nold = \" \"\n").expect("write");
        let err = load_config(&path).expect_err("blank label");
        assert!(format!("{err:#}").contains("labels.old must not be empty"));
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("sidebyside.toml");
        fs::write(&path, "strict = true\n").expect("write");
        let err = init_config(&path, false).expect_err("exists");
        assert!(err.to_string().contains("--force"));

        init_config(&path, true).expect("force");
        assert_eq!(load_config(&path).expect("load"), DocConfig::default());
    }
}
