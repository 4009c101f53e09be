//! Rule requiring the elements every finished creative carries.
//!
//! A creative needs a retailer brand tag, a headline and a logo somewhere in
//! the document, and every page needs a background (a color or a background
//! element). Missing pieces are synthesized by the fix: placeholders are
//! positioned through the layout engine and use stable ids, so applying the
//! fix twice replaces rather than duplicates them.

use creative_lint_core::color::WHITE;
use creative_lint_core::{
    AutoFix, CanvasElement, CheckContext, ElementRole, Page, Rule, RuleKind, Severity,
    SyntheticKind, Violation,
};

/// Rule kind reported for a missing brand tag.
pub const KIND: RuleKind = RuleKind::TagRequired;

/// Reports missing brand tag, headline, logo and background.
#[derive(Debug, Clone, Default)]
pub struct RequiredElements;

impl RequiredElements {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn is_brand_tag(element: &CanvasElement, tag_text: &str) -> bool {
    if element.role() == ElementRole::BrandTag {
        return true;
    }
    let needle = tag_text.trim().to_lowercase();
    !needle.is_empty()
        && element
            .visible_text()
            .is_some_and(|text| text.to_lowercase().contains(&needle))
}

fn has_background(page: &Page) -> bool {
    page.background.as_deref().is_some_and(|c| !c.trim().is_empty())
        || page.iter().any(|e| e.role() == ElementRole::Background)
}

fn missing(kind: RuleKind, what: &str, synthetic: SyntheticKind) -> Violation {
    Violation::new(kind, Severity::Hard, format!("creative has no {what}"))
        .with_fix(AutoFix::Synthesize { synthetic })
}

impl Rule for RequiredElements {
    fn kind(&self) -> RuleKind {
        KIND
    }

    fn description(&self) -> &'static str {
        "Requires a brand tag, headline, logo and background"
    }

    fn also_reports(&self) -> &'static [RuleKind] {
        &[
            RuleKind::HeadlineRequired,
            RuleKind::LogoRequired,
            RuleKind::BackgroundRequired,
        ]
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        let tag_text = ctx.options.brand_tag_text.as_str();

        if !ctx.any_element(|e| is_brand_tag(e, tag_text)) {
            violations.push(missing(KIND, "retailer brand tag", SyntheticKind::BrandTag));
        }
        if !ctx.any_element(|e| e.role() == ElementRole::Headline) {
            violations.push(missing(
                RuleKind::HeadlineRequired,
                "headline",
                SyntheticKind::Headline,
            ));
        }
        if !ctx.any_element(|e| e.role() == ElementRole::Logo) {
            violations.push(missing(RuleKind::LogoRequired, "logo", SyntheticKind::Logo));
        }

        violations.extend(ctx.pages().filter(|p| !has_background(p)).map(|page| {
            Violation::new(
                RuleKind::BackgroundRequired,
                Severity::Hard,
                format!("page '{}' has no background", page.id),
            )
            .with_fix(AutoFix::SetBackground {
                page_id: page.id.clone(),
                color: WHITE.to_string(),
            })
        }));

        violations
    }
}
