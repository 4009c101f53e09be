//! Fix command implementation.

use anyhow::{Context, Result};
use creative_lint::{snapshot, Corrector};
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::TargetArgs;

/// Runs the fix command.
pub fn run(
    file: &Path,
    output: Option<&Path>,
    target: &TargetArgs,
    source: &ConfigSource,
) -> Result<()> {
    let config = source.load()?;
    let options = super::options(&config, target)?;
    let validator = super::validator(config, options, None)?;

    let document = super::read_snapshot(file)?;
    let report = validator.validate(&document);
    let corrector = Corrector::new(validator);
    let outcome = corrector.apply(&document, &report.all().cloned().collect::<Vec<_>>());

    let out = output.map_or_else(|| fixed_path(file), Path::to_path_buf);
    let json = snapshot::to_json(&outcome.corrected).context("Failed to serialize snapshot")?;
    std::fs::write(&out, json).with_context(|| format!("Failed to write {}", out.display()))?;

    for fix in &outcome.fixes_applied {
        println!("\x1b[32mfixed\x1b[0m [{}] {}", fix.rule, fix.description);
    }
    for v in outcome
        .remaining_issues
        .iter()
        .chain(outcome.remaining_warnings.iter())
    {
        println!("\x1b[33mremaining\x1b[0m {v}");
    }
    println!(
        "Score {} -> {}: applied {} fix(es), wrote {}",
        report.score,
        outcome.score(),
        outcome.fixes_applied.len(),
        out.display()
    );

    if !outcome.is_compliant() {
        std::process::exit(1);
    }
    Ok(())
}

/// `ad.json` becomes `ad.fixed.json`.
fn fixed_path(file: &Path) -> PathBuf {
    file.with_extension("fixed.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_path_keeps_directory() {
        assert_eq!(
            fixed_path(Path::new("ads/spring.json")),
            PathBuf::from("ads/spring.fixed.json")
        );
        assert_eq!(fixed_path(Path::new("ad")), PathBuf::from("ad.fixed.json"));
    }
}
