//! Validator for orchestrating rule execution over a document.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{Config, ConfigError};
use crate::context::CheckContext;
use crate::detect::{detect_people, FaceDetector, NoopFaceDetector};
use crate::element::Document;
use crate::format::ValidationOptions;
use crate::rule::{handles, Rule, RuleBox};
use crate::types::{RuleKind, ValidationReport, Violation};

/// Errors that can occur while building a validator.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Two registered rules report the same kind.
    #[error("rule '{0}' is registered more than once")]
    DuplicateRule(&'static str),
}

/// Builder for configuring a [`Validator`].
#[derive(Default)]
pub struct ValidatorBuilder {
    rules: Vec<RuleBox>,
    options: Option<ValidationOptions>,
    config: Option<Config>,
    face_detector: Option<Arc<dyn FaceDetector>>,
}

impl ValidatorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the validator.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the validator.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds multiple boxed rules, keeping their order.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the validation options.
    ///
    /// Takes precedence over options derived from [`ValidatorBuilder::config`].
    #[must_use]
    pub fn options(mut self, options: ValidationOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the detector used by [`Validator::validate_async`].
    #[must_use]
    pub fn face_detector(mut self, detector: Arc<dyn FaceDetector>) -> Self {
        self.face_detector = Some(detector);
        self
    }

    /// Builds the validator.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration names an unknown format or a
    /// rule kind is registered twice.
    pub fn build(self) -> Result<Validator, ValidatorError> {
        let config = self.config.unwrap_or_default();
        let options = match self.options {
            Some(options) => options,
            None => config.validation_options()?,
        };

        for (i, rule) in self.rules.iter().enumerate() {
            if self.rules[..i].iter().any(|r| r.kind() == rule.kind()) {
                return Err(ValidatorError::DuplicateRule(rule.name()));
            }
        }

        Ok(Validator {
            rules: self.rules,
            options,
            config,
            face_detector: self
                .face_detector
                .unwrap_or_else(|| Arc::new(NoopFaceDetector)),
        })
    }
}

/// Runs an ordered rule registry against documents.
///
/// Use [`Validator::builder()`] to construct an instance.
pub struct Validator {
    rules: Vec<RuleBox>,
    options: ValidationOptions,
    config: Config,
    face_detector: Arc<dyn FaceDetector>,
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("rules", &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Validator {
    /// Creates a new builder for configuring a validator.
    #[must_use]
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// Registered rules in check order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| &**r)
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// The rule that reports `kind`, if registered.
    #[must_use]
    pub fn rule_for(&self, kind: RuleKind) -> Option<&dyn Rule> {
        self.rules().find(|r| handles(*r, kind))
    }

    /// Options used by every pass.
    #[must_use]
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Configuration the validator was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs every enabled rule in order and aggregates the findings.
    ///
    /// Validation is pure: the same document always yields the same report.
    #[must_use]
    pub fn validate(&self, document: &Document) -> ValidationReport {
        info!(
            pages = document.pages.len(),
            elements = document.element_count(),
            format = %self.options.format,
            "validating document"
        );

        let ctx = CheckContext::new(document, &self.options);
        let mut all = Vec::new();
        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.kind()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }
            let mut found = rule.check(&ctx);
            found.retain(|v| self.config.is_rule_enabled(v.rule));
            debug!(rule = rule.name(), count = found.len(), "rule checked");
            all.extend(self.apply_severity_override(found));
        }

        let report =
            ValidationReport::from_violations(all, document.element_count(), document.pages.len());
        info!(
            score = report.score,
            hard = report.summary.hard_fails,
            warnings = report.summary.warnings,
            "validation complete"
        );
        report
    }

    /// Runs [`Validator::validate`], then the people check when enabled.
    pub async fn validate_async(&self, document: &Document) -> ValidationReport {
        let mut report = self.validate(document);
        if !self.options.enable_face_detection
            || !self.config.is_rule_enabled(RuleKind::PeopleDetected)
        {
            return report;
        }

        let found = detect_people(
            document.elements().map(|(_, e)| e),
            self.face_detector.as_ref(),
            self.options.face_detection_timeout,
        )
        .await;
        report.extend(self.apply_severity_override(found));
        report
    }

    /// Applies severity overrides from configuration.
    ///
    /// Overrides are keyed by the reported kind, so a rule reporting several
    /// kinds can have each one overridden separately.
    fn apply_severity_override(&self, mut violations: Vec<Violation>) -> Vec<Violation> {
        for v in &mut violations {
            if let Some(severity) = self.config.rule_severity(v.rule) {
                v.severity = severity;
            }
        }
        violations
    }
}
