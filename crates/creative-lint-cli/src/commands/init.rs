//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# creative-lint configuration

# Rule set: "recommended" (default), "strict" or "minimal"
preset = "recommended"

# Fail the run on "hard" findings only, or on "warning" as well
fail_on = "hard"

[validation]
# social, brand, checkout-double, checkout-single, say
format = "social"
alcohol = false
face_detection = false
# density = "double"
# face_detection_timeout_ms = 500
# large_text_threshold = 24.0
# brand_tag_text = "Available at Tesco"
# headline_placeholder = "Your headline here"
# subheading_placeholder = "Supporting copy"
# logo_placeholder_src = "logo.png"

# Per-format minimum font sizes
# [font_minimums]
# checkout-single = 12.0

# Placement heuristics
# [layout]
# subzone_bonus = 30.0
# lower_region_bonus = 10.0
# edge_penalty = 5.0

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.blocked-keyword]
enabled = true
# extra_terms = ["limited edition"]

[rules.contrast]
# severity = "warning"

# [rules.min-font-size]
# minimum = 24.0

# [rules.packshot-safe-zone]
# gap = 24.0
"#;

const CONFIG_FILE: &str = "creative-lint.toml";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let path = write_config(Path::new("."), force)?;

    println!("Created {}", path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: creative-lint check <snapshot.json>");

    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
