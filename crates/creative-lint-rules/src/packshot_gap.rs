//! Rule to enforce clearance around packshots.
//!
//! The required gap depends on screen density: 12px for single density and
//! 24px for double. Overlapping boxes are measured as a gap of 0.

use creative_lint_core::geometry::{bounding_box, min_distance};
use creative_lint_core::{
    CanvasElement, CheckContext, ElementRole, Label, Rule, RuleKind, Severity, Violation,
};

/// Rule kind reported by this rule.
pub const KIND: RuleKind = RuleKind::PackshotSafeZone;

/// Reports elements closer to a packshot than the required gap.
#[derive(Debug, Clone, Default)]
pub struct PackshotGap {
    gap: Option<f64>,
}

impl PackshotGap {
    /// Creates the rule using the density of the validation options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the required gap.
    #[must_use]
    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = Some(gap);
        self
    }
}

impl Rule for PackshotGap {
    fn kind(&self) -> RuleKind {
        KIND
    }

    fn description(&self) -> &'static str {
        "Enforces clearance around packshots"
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Violation> {
        let required = self
            .gap
            .unwrap_or_else(|| ctx.options.effective_density().packshot_gap());
        let mut violations = Vec::new();

        for page in ctx.pages() {
            let elements: Vec<&CanvasElement> = page
                .iter()
                .filter(|e| e.role() != ElementRole::Background)
                .collect();

            for (i, packshot) in elements.iter().enumerate() {
                if packshot.role() != ElementRole::Packshot {
                    continue;
                }
                for (j, other) in elements.iter().enumerate() {
                    // packshot pairs are visited once, from the lower index
                    if i == j || (other.role() == ElementRole::Packshot && j < i) {
                        continue;
                    }
                    let distance = min_distance(&bounding_box(packshot), &bounding_box(other));
                    if distance >= required {
                        continue;
                    }
                    let actual = distance.max(0.0);
                    violations.push(
                        Violation::new(
                            KIND,
                            Severity::Hard,
                            format!(
                                "'{}' is {actual:.0}px from packshot '{}', {required}px required",
                                other.id, packshot.id
                            ),
                        )
                        .on_element(&other.id)
                        .with_measurement(required, actual)
                        .with_label(Label::new(&packshot.id, "packshot")),
                    );
                }
            }
        }

        violations
    }
}
