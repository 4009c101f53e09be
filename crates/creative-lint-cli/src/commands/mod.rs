//! Subcommand implementations.

pub mod check;
pub mod fix;
pub mod init;
pub mod list_rules;
pub mod output;
pub mod place;

use anyhow::{Context, Result};
use creative_lint_core::{
    handles, snapshot, Config, Document, RuleKind, ValidationOptions, Validator,
};
use creative_lint_rules::rules_from_config;
use std::path::Path;

use crate::TargetArgs;

/// Reads and loads a snapshot file.
pub fn read_snapshot(path: &Path) -> Result<Document> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    snapshot::load_document(&json)
        .with_context(|| format!("Invalid snapshot: {}", path.display()))
}

/// Configured validation options with command-line overrides applied.
pub fn options(config: &Config, target: &TargetArgs) -> Result<ValidationOptions> {
    let mut options = config
        .validation_options()
        .context("Invalid [validation] settings")?;
    if let Some(format) = target.format_type {
        options.format = format;
    }
    if target.alcohol {
        options.is_alcohol_campaign = true;
    }
    Ok(options)
}

/// Builds a validator for the configured preset and options.
///
/// With `only`, keeps the configured rules that report one of the named
/// rules (names, codes or identifiers).
pub fn validator(
    config: Config,
    options: ValidationOptions,
    only: Option<&str>,
) -> Result<Validator> {
    let mut rules = rules_from_config(&config)?;
    if let Some(names) = only {
        let kinds: Vec<RuleKind> = names
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .filter_map(|n| {
                let kind = RuleKind::lookup(n);
                if kind.is_none() {
                    tracing::warn!("Unknown rule: {n}");
                }
                kind
            })
            .collect();
        rules.retain(|rule| kinds.iter().any(|k| handles(rule.as_ref(), *k)));
    }
    Validator::builder()
        .rules(rules)
        .options(options)
        .config(config)
        .build()
        .context("Failed to build validator")
}
