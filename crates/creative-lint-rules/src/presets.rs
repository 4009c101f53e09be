//! Rule presets for common configurations.

use std::fmt;
use std::str::FromStr;

use crate::{
    BlockedKeywords, Contrast, CtaNotAllowed, Drinkaware, ElementOverlap, MinFontSize,
    PackshotGap, RequiredElements, SafeZone, ValueTileEndDate,
};
use creative_lint_core::{handles, Config, Rule, RuleBox, RuleKind};
use tracing::debug;

/// Preset configurations for creative-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Every check except required-element presence.
    #[default]
    Recommended,
    /// All rules, for finished creatives.
    Strict,
    /// Minimal rules for work-in-progress canvases.
    Minimal,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }

    /// Preset name as used in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::Minimal => "minimal",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown preset name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset '{0}' (expected one of: recommended, strict, minimal)")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            "minimal" => Ok(Self::Minimal),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes every rule except `tag-required` (CL009-CL012), which would
/// fail any canvas that is still being designed.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![
        Box::new(SafeZone::new()),
        Box::new(ElementOverlap::new()),
        Box::new(MinFontSize::new()),
        Box::new(CtaNotAllowed::new()),
        Box::new(PackshotGap::new()),
        Box::new(Contrast::new()),
        Box::new(Drinkaware::new()),
        Box::new(BlockedKeywords::new()),
        Box::new(ValueTileEndDate::new()),
    ]
}

/// Returns the strict set of rules.
///
/// Includes all recommended rules plus required-element presence.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    all_rules()
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only includes:
/// - `safe-zone` (CL001)
/// - `min-font-size` (CL003)
/// - `contrast` (CL006)
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![
        Box::new(SafeZone::new()),
        Box::new(MinFontSize::new()),
        Box::new(Contrast::new()),
    ]
}

/// Returns all available rules in check order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(SafeZone::new()),
        Box::new(ElementOverlap::new()),
        Box::new(MinFontSize::new()),
        Box::new(CtaNotAllowed::new()),
        Box::new(PackshotGap::new()),
        Box::new(Contrast::new()),
        Box::new(Drinkaware::new()),
        Box::new(RequiredElements::new()),
        Box::new(BlockedKeywords::new()),
        Box::new(ValueTileEndDate::new()),
    ]
}

/// Finds the rule reporting `key`, given as a name, code or identifier.
#[must_use]
pub fn rule_by_name(key: &str) -> Option<RuleBox> {
    let kind = RuleKind::lookup(key)?;
    all_rules().into_iter().find(|r| handles(r.as_ref(), kind))
}

/// Builds the rule set described by a configuration.
///
/// Starts from the configured preset (recommended when unset) and applies
/// rule options: `extra_terms` for `blocked-keyword`, `minimum` for
/// `min-font-size` and `gap` for `packshot-safe-zone`. Enabling and severity
/// overrides are left to the validator.
///
/// # Errors
///
/// Returns an error if the preset name is unknown.
pub fn rules_from_config(config: &Config) -> Result<Vec<RuleBox>, UnknownPreset> {
    let preset = match config.preset.as_deref() {
        Some(name) => name.parse()?,
        None => Preset::default(),
    };
    debug!(%preset, "building rule set");

    let rules = preset
        .rules()
        .into_iter()
        .map(|rule| -> RuleBox {
            let Some(options) = config.rule_config(rule.kind()) else {
                return rule;
            };
            match rule.kind() {
                RuleKind::BlockedKeyword => {
                    Box::new(BlockedKeywords::new().extra_terms(options.get_str_array("extra_terms")))
                }
                RuleKind::MinFontSize => match options.get_option::<f64>("minimum") {
                    Some(min) => Box::new(MinFontSize::new().minimum(min)),
                    None => rule,
                },
                RuleKind::PackshotSafeZone => match options.get_option::<f64>("gap") {
                    Some(gap) => Box::new(PackshotGap::new().gap(gap)),
                    None => rule,
                },
                _ => rule,
            }
        })
        .collect();

    Ok(rules)
}
