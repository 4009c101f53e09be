//! Check command implementation.

use anyhow::{bail, Context, Result};
use creative_lint_core::ValidationReport;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::{OutputFormat, TargetArgs};

/// Validation result of one snapshot file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Snapshot path.
    pub file: PathBuf,
    /// Findings.
    #[serde(flatten)]
    pub report: ValidationReport,
}

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    target: &TargetArgs,
    source: &ConfigSource,
) -> Result<()> {
    let config = source.load()?;
    let fail_on = config.fail_on();
    let options = super::options(&config, target)?;
    let validator = super::validator(config, options, rules_filter.as_deref())?;

    let files = discover(path, &exclude)?;
    if files.is_empty() {
        bail!("No snapshot files found under {}", path.display());
    }
    tracing::info!(
        "Checking {} snapshot(s) with {} rules",
        files.len(),
        validator.rule_count()
    );

    let mut reports = Vec::with_capacity(files.len());
    for file in files {
        let document = super::read_snapshot(&file)?;
        let report = validator.validate(&document);
        reports.push(FileReport { file, report });
    }

    super::output::print(&reports, format)?;

    if reports.iter().any(|r| r.report.has_violations_at(fail_on)) {
        std::process::exit(1);
    }

    Ok(())
}

/// Snapshot files under `path`, sorted, minus those matching `exclude`.
pub fn discover(path: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let excluded = exclude
        .iter()
        .map(|p| glob::Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
        .collect::<Result<Vec<_>>>()?;

    let pattern = path.join("**").join("*.json");
    let pattern = pattern.to_string_lossy();
    let mut files = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("Invalid path: {}", path.display()))? {
        let file = entry.context("Failed to read directory entry")?;
        let relative = file.strip_prefix(path).unwrap_or(&file);
        if excluded
            .iter()
            .any(|p| p.matches_path(&file) || p.matches_path(relative))
        {
            tracing::debug!("Excluded: {}", file.display());
            continue;
        }
        files.push(file);
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn single_file_is_returned_as_is() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("ad.json");
        fs::write(&file, "{}").unwrap();
        assert_eq!(discover(&file, &[]).unwrap(), vec![file]);
    }

    #[test]
    fn directories_are_searched_recursively() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("spring/drafts")).unwrap();
        fs::write(tmp.path().join("a.json"), "{}").unwrap();
        fs::write(tmp.path().join("spring/b.json"), "{}").unwrap();
        fs::write(tmp.path().join("spring/drafts/c.json"), "{}").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();

        let files = discover(tmp.path(), &["**/drafts/**".to_string()]).unwrap();
        assert_eq!(
            files,
            vec![tmp.path().join("a.json"), tmp.path().join("spring/b.json")]
        );
    }

    #[test]
    fn bad_exclude_pattern_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(discover(tmp.path(), &["[".to_string()]).is_err());
    }
}
