//! Rule to keep elements out of the no-go bands.
//!
//! Only canvases whose aspect ratio matches a recognized story format have
//! bands; on any other canvas this rule reports nothing. Backgrounds are
//! expected to bleed through the bands and are skipped.

use creative_lint_core::geometry::bounding_box;
use creative_lint_core::zones::Band;
use creative_lint_core::{
    AutoFix, CheckContext, ElementRole, Property, PropertyValue, Rule, RuleKind, Severity,
    Violation,
};

/// Rule kind reported by this rule.
pub const KIND: RuleKind = RuleKind::SafeZone;

/// Reports elements intruding into the top or bottom no-go band.
#[derive(Debug, Clone, Default)]
pub struct SafeZone;

impl SafeZone {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for SafeZone {
    fn kind(&self) -> RuleKind {
        KIND
    }

    fn description(&self) -> &'static str {
        "Keeps elements out of the top and bottom no-go bands"
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Violation> {
        if !ctx.zones.has_safe_zone() {
            return Vec::new();
        }

        ctx.elements()
            .filter(|(_, e)| e.role() != ElementRole::Background)
            .filter_map(|(_, e)| {
                let intrusion = ctx.zones.intrusion(&bounding_box(e))?;
                let band = match intrusion.band {
                    Band::Top => "top",
                    Band::Bottom => "bottom",
                };
                Some(
                    Violation::new(
                        KIND,
                        Severity::Hard,
                        format!(
                            "'{}' intrudes into the {}px {band} safe zone",
                            e.id,
                            intrusion.thickness.round()
                        ),
                    )
                    .on_element(&e.id)
                    .with_fix(AutoFix::SetProperty {
                        element_id: e.id.clone(),
                        property: Property::Y,
                        value: PropertyValue::Number(intrusion.suggested_y),
                    }),
                )
            })
            .collect()
    }
}
