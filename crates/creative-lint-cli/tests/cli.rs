//! Runs the built binary against snapshots in a temporary directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const CLEAN: &str = r##"{"canvasSize":{"width":1080,"height":1920},"pages":[{"background":"#ffffff","elements":[]}]}"##;

const SMALL_TEXT: &str = r##"{
  "canvasSize": {"width": 1080, "height": 1920},
  "pages": [{
    "background": "#ffffff",
    "elements": [
      {"id": "t1", "type": "text", "text": "Fresh bakes", "fontSize": 14, "x": 100, "y": 50, "width": 400, "height": 40}
    ]
  }]
}"##;

fn creative_lint(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_creative-lint"))
        .args(args)
        .current_dir(dir)
        .env("CREATIVE_LINT_CONFIG_DIR", dir.join("no-global"))
        .output()
        .unwrap()
}

#[test]
fn check_exit_code_follows_hard_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("clean.json"), CLEAN).unwrap();
    fs::write(tmp.path().join("small.json"), SMALL_TEXT).unwrap();

    let clean = creative_lint(tmp.path(), &["check", "clean.json"]);
    assert!(clean.status.success());

    let small = creative_lint(tmp.path(), &["check", "--format", "compact", "small.json"]);
    assert_eq!(small.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&small.stdout);
    assert!(stdout.contains("CL001"), "{stdout}");
    assert!(stdout.contains("CL003"), "{stdout}");
}

#[test]
fn check_json_lists_every_snapshot() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("clean.json"), CLEAN).unwrap();
    fs::write(tmp.path().join("small.json"), SMALL_TEXT).unwrap();

    let out = creative_lint(tmp.path(), &["check", "--format", "json", "."]);
    let reports: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["compliant"], true);
    assert_eq!(reports[1]["score"], 70);
}

#[test]
fn disabled_rule_in_project_config_is_skipped() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("small.json"), SMALL_TEXT).unwrap();
    fs::write(
        tmp.path().join("creative-lint.toml"),
        "[rules.safe-zone]\nenabled = false\n[rules.min-font-size]\nenabled = false\n",
    )
    .unwrap();

    let out = creative_lint(tmp.path(), &["check", "small.json"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stdout));
}

#[test]
fn fix_writes_corrected_snapshot() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("small.json"), SMALL_TEXT).unwrap();

    let out = creative_lint(tmp.path(), &["fix", "small.json"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stdout));

    let fixed = fs::read_to_string(tmp.path().join("small.fixed.json")).unwrap();
    let recheck = creative_lint(tmp.path(), &["check", "small.fixed.json"]);
    assert!(recheck.status.success(), "{fixed}");
}

#[test]
fn malformed_snapshot_is_an_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("bad.json"), "{not json").unwrap();

    let out = creative_lint(tmp.path(), &["check", "bad.json"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid snapshot"));
}

#[test]
fn place_over_missing_image_falls_back() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("clean.json"), CLEAN).unwrap();

    let out = creative_lint(
        tmp.path(),
        &[
            "place",
            "--element-type",
            "headline",
            "--width",
            "600",
            "--height",
            "80",
            "--over-image",
            "missing.png",
            "clean.json",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("[default placement]"));
}
