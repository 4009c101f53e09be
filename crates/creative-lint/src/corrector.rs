//! Application of auto-fixes followed by a single re-validation.

use serde::Serialize;
use tracing::{debug, info};

use creative_lint_core::{
    compliance_score, handles, Document, FixContext, Rule, RuleBox, RuleKind, Severity,
    ValidationReport, Validator, Violation,
};

/// A fix that was applied to the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFix {
    /// Kind of the violation that was fixed.
    pub rule: RuleKind,
    /// Element the fix targeted, if any.
    pub element_id: Option<String>,
    /// What the fix did.
    pub description: String,
}

/// Result of a correction pass.
#[derive(Debug, Clone)]
pub struct FixOutcome {
    /// The corrected document. The input document is never modified.
    pub corrected: Document,
    /// Fixes applied, in application order.
    pub fixes_applied: Vec<AppliedFix>,
    /// Hard fails remaining after re-validation.
    pub remaining_issues: Vec<Violation>,
    /// Warnings remaining after re-validation.
    pub remaining_warnings: Vec<Violation>,
}

impl FixOutcome {
    /// Whether no hard fail remains.
    #[must_use]
    pub fn is_compliant(&self) -> bool {
        self.remaining_issues.is_empty()
    }

    /// Compliance score of the corrected document.
    #[must_use]
    pub fn score(&self) -> u32 {
        compliance_score(self.remaining_issues.len(), self.remaining_warnings.len())
    }
}

/// Applies the fixes attached to violations and re-validates once.
///
/// Fixes are dispatched by [`RuleKind`] to the validator's registry, then to
/// any extra fixers. There is no fixed-point loop: a fix that introduces a
/// new violation is reported in the outcome rather than fixed again.
pub struct Corrector {
    validator: Validator,
    fixers: Vec<RuleBox>,
}

impl std::fmt::Debug for Corrector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Corrector")
            .field("validator", &self.validator)
            .field("fixers", &self.fixers.iter().map(|r| r.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl Corrector {
    /// Creates a corrector around a validator.
    #[must_use]
    pub fn new(validator: Validator) -> Self {
        Self {
            validator,
            fixers: Vec::new(),
        }
    }

    /// Adds rules that apply fixes without taking part in re-validation.
    ///
    /// Used when the incoming violations come from a wider rule set than the
    /// validator runs. Kinds disabled in the validator's config stay
    /// unfixed.
    #[must_use]
    pub fn with_fixers(mut self, fixers: impl IntoIterator<Item = RuleBox>) -> Self {
        self.fixers.extend(fixers);
        self
    }

    fn fixer_for(&self, kind: RuleKind) -> Option<&dyn Rule> {
        self.validator.rule_for(kind).or_else(|| {
            if !self.validator.config().is_rule_enabled(kind) {
                return None;
            }
            self.fixers.iter().map(|r| &**r).find(|r| handles(*r, kind))
        })
    }

    /// The validator used for dispatch and re-validation.
    #[must_use]
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Applies every fixable violation to a copy of `document`.
    ///
    /// Violations whose kind has no registered rule (including
    /// [`RuleKind::Unrecognized`] and people warnings) and fixes that no
    /// longer apply are carried into the outcome unchanged, unless
    /// re-validation reports them again.
    #[must_use]
    pub fn apply(&self, document: &Document, violations: &[Violation]) -> FixOutcome {
        info!(violations = violations.len(), "applying auto-fixes");

        let ctx = FixContext::new(document.canvas_size, self.validator.options());
        let mut working = document.clone();
        let mut fixes_applied = Vec::new();
        let mut carried: Vec<&Violation> = Vec::new();

        for violation in violations {
            let Some(rule) = self.fixer_for(violation.rule) else {
                debug!(rule = %violation.rule, "no registered rule, passing through");
                carried.push(violation);
                continue;
            };
            let Some(fix) = violation.auto_fix.as_ref() else {
                continue;
            };
            match rule.fix(&working, violation, &ctx) {
                Some(next) => {
                    working = next;
                    fixes_applied.push(AppliedFix {
                        rule: violation.rule,
                        element_id: fix.element_id().map(str::to_string),
                        description: fix.describe(),
                    });
                }
                None => carried.push(violation),
            }
        }

        let report = self.validator.validate(&working);
        let outcome = Self::merge(working, fixes_applied, report, &carried);
        info!(
            fixed = outcome.fixes_applied.len(),
            remaining = outcome.remaining_issues.len(),
            warnings = outcome.remaining_warnings.len(),
            "correction complete"
        );
        outcome
    }

    fn merge(
        corrected: Document,
        fixes_applied: Vec<AppliedFix>,
        report: ValidationReport,
        carried: &[&Violation],
    ) -> FixOutcome {
        let ValidationReport {
            violations: mut remaining_issues,
            warnings: mut remaining_warnings,
            ..
        } = report;

        let reported: Vec<(RuleKind, Option<String>)> = remaining_issues
            .iter()
            .chain(remaining_warnings.iter())
            .map(|r| (r.rule, r.element_id.clone()))
            .collect();

        for &v in carried {
            if reported
                .iter()
                .any(|(rule, id)| *rule == v.rule && *id == v.element_id)
            {
                continue;
            }
            match v.severity {
                Severity::Hard => remaining_issues.push(v.clone()),
                Severity::Warning => remaining_warnings.push(v.clone()),
            }
        }

        FixOutcome {
            corrected,
            fixes_applied,
            remaining_issues,
            remaining_warnings,
        }
    }
}
