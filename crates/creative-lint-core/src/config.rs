//! Configuration types for creative-lint.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::time::Duration;

use crate::format::{Density, FormatType, SafeZoneSpec, UnknownFormat, ValidationOptions};
use crate::layout::LayoutTuning;
use crate::types::{RuleKind, Severity};

/// Top-level configuration for creative-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "strict", "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity at or above which a run fails (default: hard).
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Default validation options.
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Per-format minimum font size overrides, keyed by format name.
    #[serde(default)]
    pub font_minimums: BTreeMap<String, f64>,

    /// Per-format safe-zone overrides, keyed by format name.
    #[serde(default)]
    pub safe_zones: BTreeMap<String, SafeZoneSpec>,

    /// Placement heuristics.
    #[serde(default)]
    pub layout: LayoutTuning,

    /// Per-rule configurations, keyed by rule name, code or identifier.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Looks up the configuration of a rule.
    ///
    /// Keys may be the rule name (`min-font-size`), its code (`CL003`) or its
    /// identifier (`MIN_FONT_SIZE`).
    #[must_use]
    pub fn rule_config(&self, kind: RuleKind) -> Option<&RuleConfig> {
        self.rules
            .iter()
            .find(|(key, _)| RuleKind::lookup(key) == Some(kind))
            .map(|(_, c)| c)
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, kind: RuleKind) -> bool {
        self.rule_config(kind)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, kind: RuleKind) -> Option<Severity> {
        self.rule_config(kind).and_then(|c| c.severity)
    }

    /// Severity threshold for failing a run.
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Hard)
    }

    /// Rule keys that match no known rule.
    #[must_use]
    pub fn unknown_rule_keys(&self) -> Vec<&str> {
        self.rules
            .keys()
            .filter(|k| RuleKind::lookup(k).is_none())
            .map(String::as_str)
            .collect()
    }

    /// Builds the validation options described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a per-format table names an unknown format.
    pub fn validation_options(&self) -> Result<ValidationOptions, ConfigError> {
        let v = &self.validation;
        let defaults = ValidationOptions::default();

        let mut font_minimums = BTreeMap::new();
        for (name, size) in &self.font_minimums {
            font_minimums.insert(name.parse::<FormatType>()?, *size);
        }
        let mut safe_zones = BTreeMap::new();
        for (name, spec) in &self.safe_zones {
            safe_zones.insert(name.parse::<FormatType>()?, *spec);
        }

        Ok(ValidationOptions {
            format: v.format,
            is_alcohol_campaign: v.alcohol,
            enable_face_detection: v.face_detection,
            density: v.density,
            large_text_threshold: v
                .large_text_threshold
                .unwrap_or(defaults.large_text_threshold),
            face_detection_timeout: v
                .face_detection_timeout_ms
                .map_or(defaults.face_detection_timeout, Duration::from_millis),
            brand_tag_text: v.brand_tag_text.clone().unwrap_or(defaults.brand_tag_text),
            headline_placeholder: v
                .headline_placeholder
                .clone()
                .unwrap_or(defaults.headline_placeholder),
            subheading_placeholder: v
                .subheading_placeholder
                .clone()
                .unwrap_or(defaults.subheading_placeholder),
            logo_placeholder_src: v.logo_placeholder_src.clone(),
            font_minimums,
            safe_zones,
            layout: self.layout.clone(),
        })
    }
}

/// `[validation]` section: default options for every pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Target format.
    #[serde(default)]
    pub format: FormatType,

    /// Treat creatives as alcohol campaigns.
    #[serde(default)]
    pub alcohol: bool,

    /// Run the people check.
    #[serde(default)]
    pub face_detection: bool,

    /// Packshot density; derived from the format when absent.
    #[serde(default)]
    pub density: Option<Density>,

    /// Large-text threshold for contrast, in pixels.
    #[serde(default)]
    pub large_text_threshold: Option<f64>,

    /// Per-image face detection budget in milliseconds.
    #[serde(default)]
    pub face_detection_timeout_ms: Option<u64>,

    /// Text used for a synthesized brand tag.
    #[serde(default)]
    pub brand_tag_text: Option<String>,

    /// Text used for a synthesized headline.
    #[serde(default)]
    pub headline_placeholder: Option<String>,

    /// Text used for a synthesized subheading.
    #[serde(default)]
    pub subheading_placeholder: Option<String>,

    /// Image source used for a synthesized logo.
    #[serde(default)]
    pub logo_placeholder_src: Option<String>,
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets an option value as a specific type.
    #[must_use]
    pub fn get_option<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.options
            .get(key)
            .and_then(|v| v.clone().try_into().ok())
    }

    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.options
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A per-format table names an unknown format.
    #[error(transparent)]
    UnknownFormat(#[from] UnknownFormat),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.rules.is_empty());
        assert_eq!(config.fail_on(), Severity::Hard);
        let options = config.validation_options().unwrap();
        assert_eq!(options.format, FormatType::Social);
        assert_eq!(options.face_detection_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "strict"
fail_on = "warning"

[validation]
format = "checkout-single"
alcohol = true
face_detection_timeout_ms = 500
subheading_placeholder = "Fresh every morning"

[font_minimums]
checkout-single = 14

[layout]
subzone_bonus = 40.0

[rules.contrast]
severity = "warning"

[rules.CL004]
enabled = false

[rules.blocked-keyword]
extra_terms = ["limited edition"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert_eq!(config.fail_on(), Severity::Warning);
        assert!(!config.is_rule_enabled(RuleKind::CtaNotAllowed));
        assert!(config.is_rule_enabled(RuleKind::SafeZone));
        assert_eq!(
            config.rule_severity(RuleKind::ContrastFail),
            Some(Severity::Warning)
        );
        assert_eq!(
            config
                .rule_config(RuleKind::BlockedKeyword)
                .unwrap()
                .get_str_array("extra_terms"),
            vec!["limited edition".to_string()]
        );

        let options = config.validation_options().unwrap();
        assert_eq!(options.format, FormatType::CheckoutSingle);
        assert!(options.is_alcohol_campaign);
        assert!((options.min_font_size() - 14.0).abs() < f64::EPSILON);
        assert_eq!(options.face_detection_timeout, Duration::from_millis(500));
        assert_eq!(options.subheading_placeholder, "Fresh every morning");
        assert_eq!(options.headline_placeholder, "Your headline here");
        assert!((options.layout.subzone_bonus - 40.0).abs() < f64::EPSILON);
        assert!((options.layout.base_score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_format_key_is_an_error() {
        let config = Config::parse("[font_minimums]\nbillboard = 30\n").unwrap();
        assert!(matches!(
            config.validation_options(),
            Err(ConfigError::UnknownFormat(_))
        ));
    }

    #[test]
    fn unknown_format_value_fails_to_parse() {
        assert!(matches!(
            Config::parse("[validation]\nformat = \"billboard\"\n"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn reports_unknown_rule_keys() {
        let config = Config::parse("[rules.no-such-rule]\nenabled = false\n").unwrap();
        assert_eq!(config.unknown_rule_keys(), vec!["no-such-rule"]);
    }
}
