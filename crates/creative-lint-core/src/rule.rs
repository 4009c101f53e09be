//! Rule trait for defining compliance checks.

use crate::context::{CheckContext, FixContext};
use crate::element::Document;
use crate::types::{RuleKind, Severity, Violation};

/// A compliance rule: a check plus, optionally, a fix.
///
/// Rules are pure. `check` inspects the document through a [`CheckContext`]
/// and returns findings; `fix` produces a new document and never mutates
/// its input.
///
/// # Example
///
/// ```ignore
/// use creative_lint_core::{CheckContext, Rule, RuleKind, Severity, Violation};
///
/// pub struct NoStickers;
///
/// impl Rule for NoStickers {
///     fn kind(&self) -> RuleKind { RuleKind::CtaNotAllowed }
///
///     fn check(&self, ctx: &CheckContext) -> Vec<Violation> {
///         ctx.elements()
///             .filter(|(_, e)| e.kind.type_name() == "sticker")
///             .map(|(_, e)| {
///                 Violation::new(self.kind(), Severity::Hard, "no stickers")
///                     .on_element(&e.id)
///             })
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// The taxonomy entry this rule reports.
    fn kind(&self) -> RuleKind;

    /// Returns the kebab-case name of this rule (e.g., "min-font-size").
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns the rule code (e.g., "CL003").
    fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Hard
    }

    /// Other kinds this rule may also report.
    ///
    /// A rule that reports several related kinds (e.g. missing versus
    /// undersized) lists the extra ones here so the corrector can route
    /// their fixes back to it.
    fn also_reports(&self) -> &'static [RuleKind] {
        &[]
    }

    /// Checks the document and returns any violations found.
    fn check(&self, ctx: &CheckContext) -> Vec<Violation>;

    /// Applies the fix attached to `violation`.
    ///
    /// Returns `None` when the violation carries no fix or the fix no longer
    /// applies (e.g. its target element is gone).
    fn fix(&self, document: &Document, violation: &Violation, ctx: &FixContext) -> Option<Document> {
        crate::fix::apply(document, violation.auto_fix.as_ref()?, ctx)
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Whether `rule` reports violations of `kind`.
#[must_use]
pub fn handles(rule: &dyn Rule, kind: RuleKind) -> bool {
    rule.kind() == kind || rule.also_reports().contains(&kind)
}
