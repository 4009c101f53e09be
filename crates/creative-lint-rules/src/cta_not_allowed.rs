//! Rule to forbid call-to-action buttons.

use creative_lint_core::{AutoFix, CheckContext, ElementRole, Rule, RuleKind, Severity, Violation};

/// Rule kind reported by this rule.
pub const KIND: RuleKind = RuleKind::CtaNotAllowed;

/// Reports every CTA element; the fix removes it.
#[derive(Debug, Clone, Default)]
pub struct CtaNotAllowed;

impl CtaNotAllowed {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for CtaNotAllowed {
    fn kind(&self) -> RuleKind {
        KIND
    }

    fn description(&self) -> &'static str {
        "Forbids call-to-action buttons"
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Violation> {
        ctx.elements()
            .filter(|(_, e)| e.role() == ElementRole::Cta)
            .map(|(_, e)| {
                Violation::new(
                    KIND,
                    Severity::Hard,
                    format!("call-to-action '{}' is not allowed", e.id),
                )
                .on_element(&e.id)
                .with_fix(AutoFix::Remove {
                    element_id: e.id.clone(),
                })
            })
            .collect()
    }
}
