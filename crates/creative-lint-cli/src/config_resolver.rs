//! Locating and loading `creative-lint.toml`.
//!
//! Lookup order, first hit wins:
//!
//! 1. `--config <FILE>`
//! 2. `creative-lint.toml`, then `.creative-lint.toml`, next to the snapshot
//! 3. `config.toml` in the global directory (`$CREATIVE_LINT_CONFIG_DIR` or
//!    `~/.creative-lint/`)
//! 4. built-in defaults

use anyhow::{Context, Result};
use creative_lint_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found beside the snapshots.
    Project(PathBuf),
    /// Found in the global directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// File backing this source.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads and parses the configuration, or returns defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            return Ok(Config::default());
        };
        if let Self::Global(p) = self {
            tracing::info!("Using global config: {}", p.display());
        }
        let config = Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        for key in config.unknown_rule_keys() {
            tracing::warn!("Unknown rule in config: {key}");
        }
        Ok(config)
    }
}

const PROJECT_FILES: [&str; 2] = ["creative-lint.toml", ".creative-lint.toml"];
const GLOBAL_FILE: &str = "config.toml";

/// Resolves the configuration for snapshots under `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    lookup(project_dir, explicit, global_config_dir().as_deref())
}

fn lookup(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_FILES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|p| p.is_file())
    {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_FILE)) {
        Some(global) if global.is_file() => {
            tracing::debug!("Found global config: {}", global.display());
            ConfigSource::Global(global)
        }
        _ => ConfigSource::Default,
    }
}

/// Global configuration directory.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os("CREATIVE_LINT_CONFIG_DIR") {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|h| h.join(".creative-lint")),
    }
}
