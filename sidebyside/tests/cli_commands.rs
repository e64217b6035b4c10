//! CLI tests: spawn the binary and check stdout and exit codes.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use sidebyside::exit_codes;
use sidebyside::test_support::fixture_path;

fn bundled() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../content/csharp6.md")
}

fn sidebyside(dir: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sidebyside"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("run sidebyside")
}

fn path_arg(path: &std::path::Path) -> &str {
    path.to_str().expect("utf-8 path")
}

#[test]
fn list_prints_titles_in_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    let bundled = bundled();
    let out = sidebyside(temp.path(), &["list", path_arg(&bundled)]);
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8(out.stdout).expect("utf-8");
    let titles: Vec<&str> = stdout.lines().collect();
    assert_eq!(titles.len(), 12);
    assert_eq!(titles[0], "Auto-property initializers");
    assert_eq!(titles[1], "Getter-only properties");
}

#[test]
fn show_found_and_not_found() {
    let temp = tempfile::tempdir().expect("tempdir");
    let bundled = bundled();

    let out = sidebyside(temp.path(), &["show", path_arg(&bundled), "nameof operator"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("## nameof operator"));

    let out = sidebyside(temp.path(), &["show", path_arg(&bundled), "nonexistent"]);
    assert_eq!(out.status.code(), Some(exit_codes::NOT_FOUND));
    assert!(String::from_utf8_lossy(&out.stderr).contains("entry not found"));
}

#[test]
fn check_reports_malformed_entries() {
    let temp = tempfile::tempdir().expect("tempdir");
    let fixture = fixture_path("malformed.md");
    let out = sidebyside(temp.path(), &["check", path_arg(&fixture)]);
    assert_eq!(out.status.code(), Some(exit_codes::MALFORMED));
    let stdout = String::from_utf8(out.stdout).expect("utf-8");
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.contains("malformed entry #1 '': missing title"));
    assert!(stdout.contains("#2 'Static local functions': missing both code samples"));
}

#[test]
fn check_clean_document() {
    let temp = tempfile::tempdir().expect("tempdir");
    let bundled = bundled();
    let out = sidebyside(temp.path(), &["check", path_arg(&bundled)]);
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "ok: entries=12\n");
}

#[test]
fn check_duplicate_titles() {
    let temp = tempfile::tempdir().expect("tempdir");
    let fixture = fixture_path("duplicate.md");
    let out = sidebyside(temp.path(), &["check", path_arg(&fixture)]);
    assert_eq!(out.status.code(), Some(exit_codes::MALFORMED));
    assert!(String::from_utf8_lossy(&out.stdout).contains("duplicate title 'nameof operator'"));
}

#[test]
fn render_html_by_output_extension() {
    let temp = tempfile::tempdir().expect("tempdir");
    let bundled = bundled();
    let output = temp.path().join("site").join("index.html");
    let out = sidebyside(
        temp.path(),
        &["render", path_arg(&bundled), "-o", path_arg(&output)],
    );
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    let html = fs::read_to_string(&output).expect("read html");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h2>nameof operator</h2>"));
    assert!(html.contains("class=\"language-csharp\""));
}

#[test]
fn render_uses_config_labels() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(
        temp.path().join("sidebyside.toml"),
        "format = \"html\"\n\n[labels]\nnew = \"C# 6\"\nold = \"C# 5\"\n",
    )
    .expect("write config");
    let bundled = bundled();
    let out = sidebyside(temp.path(), &["render", path_arg(&bundled)]);
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    let html = String::from_utf8(out.stdout).expect("utf-8");
    assert!(html.contains("<h3>C# 6</h3>"));
    assert!(html.contains("<h3>C# 5</h3>"));
}

#[test]
fn render_lenient_warns_and_strict_fails() {
    let temp = tempfile::tempdir().expect("tempdir");
    let fixture = fixture_path("malformed.md");

    let out = sidebyside(temp.path(), &["render", path_arg(&fixture)]);
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stderr.matches("warning: skipped").count(), 2);
    assert!(String::from_utf8_lossy(&out.stdout).contains("## Exception filters"));

    let output = temp.path().join("out.md");
    let out = sidebyside(
        temp.path(),
        &["render", path_arg(&fixture), "--strict", "-o", path_arg(&output)],
    );
    assert_eq!(out.status.code(), Some(exit_codes::MALFORMED));
    assert!(!output.exists());
}

#[test]
fn missing_input_is_invalid() {
    let temp = tempfile::tempdir().expect("tempdir");
    let out = sidebyside(temp.path(), &["list", "does-not-exist.md"]);
    assert_eq!(out.status.code(), Some(exit_codes::INVALID));
}

#[test]
fn init_writes_default_config_once() {
    let temp = tempfile::tempdir().expect("tempdir");
    let out = sidebyside(temp.path(), &["init"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    let written = fs::read_to_string(temp.path().join("sidebyside.toml")).expect("config");
    assert!(written.contains("format = \"markdown\""));

    let out = sidebyside(temp.path(), &["init"]);
    assert_eq!(out.status.code(), Some(exit_codes::INVALID));
}
