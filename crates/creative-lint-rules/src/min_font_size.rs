//! Rule to enforce the per-format minimum font size.

use creative_lint_core::{
    AutoFix, CheckContext, Property, PropertyValue, Rule, RuleKind, Severity, Violation,
};

/// Rule kind reported by this rule.
pub const KIND: RuleKind = RuleKind::MinFontSize;

/// Reports text and buttons set below the format's minimum font size.
///
/// Elements without a recorded font size pass. The minimum comes from
/// [`ValidationOptions::min_font_size`](creative_lint_core::ValidationOptions::min_font_size)
/// unless overridden on the rule.
#[derive(Debug, Clone, Default)]
pub struct MinFontSize {
    minimum: Option<f64>,
}

impl MinFontSize {
    /// Creates the rule using the format's minimum.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the minimum for every format.
    #[must_use]
    pub fn minimum(mut self, size: f64) -> Self {
        self.minimum = Some(size);
        self
    }
}

impl Rule for MinFontSize {
    fn kind(&self) -> RuleKind {
        KIND
    }

    fn description(&self) -> &'static str {
        "Enforces the minimum font size of the creative's format"
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Violation> {
        let min = self
            .minimum
            .unwrap_or_else(|| ctx.options.min_font_size());

        ctx.elements()
            .filter_map(|(_, e)| {
                let size = e.text_style()?.font_size?;
                (size < min).then(|| {
                    Violation::new(
                        KIND,
                        Severity::Hard,
                        format!(
                            "'{}' uses {size}px text, below the {min}px minimum for {}",
                            e.id, ctx.options.format
                        ),
                    )
                    .on_element(&e.id)
                    .with_measurement(min, size)
                    .with_fix(AutoFix::SetProperty {
                        element_id: e.id.clone(),
                        property: Property::FontSize,
                        value: PropertyValue::Number(min),
                    })
                })
            })
            .collect()
    }
}
