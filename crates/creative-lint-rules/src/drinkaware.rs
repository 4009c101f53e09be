//! Rule for the responsible-drinking lock-up on alcohol creatives.
//!
//! Reports [`RuleKind::DrinkawareMissing`] when no lock-up is present and
//! [`RuleKind::DrinkawareSize`] for each lock-up below the minimum height.
//! Creatives that are not alcohol campaigns are skipped entirely.

use creative_lint_core::{
    AutoFix, CanvasElement, CheckContext, ElementRole, FormatType, Property, PropertyValue, Rule,
    RuleKind, Severity, Violation,
};

/// Rule kind reported when the lock-up is absent.
pub const KIND: RuleKind = RuleKind::DrinkawareMissing;

/// Minimum lock-up height in pixels.
pub const MIN_HEIGHT: f64 = 20.0;
/// Minimum lock-up height on "say" placements.
pub const SAY_MIN_HEIGHT: f64 = 12.0;

/// Checks presence and size of the responsible-drinking lock-up.
#[derive(Debug, Clone, Default)]
pub struct Drinkaware;

impl Drinkaware {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn min_height(format: FormatType) -> f64 {
        match format {
            FormatType::Say => SAY_MIN_HEIGHT,
            _ => MIN_HEIGHT,
        }
    }
}

fn is_lockup(element: &CanvasElement) -> bool {
    element.role() == ElementRole::Drinkaware
        || element
            .src()
            .is_some_and(|src| src.to_ascii_lowercase().contains("drinkaware"))
}

fn size_violation(element: &CanvasElement, min: f64) -> Option<Violation> {
    let g = &element.geometry;
    let (measured, fix) = match element.text_style() {
        Some(style) => {
            let measured = g.height.max(style.font_size.unwrap_or(0.0));
            let fix = AutoFix::SetProperty {
                element_id: element.id.clone(),
                property: Property::FontSize,
                value: PropertyValue::Number(min),
            };
            (measured, fix)
        }
        None => {
            let width = if g.height > 0.0 {
                g.width * min / g.height
            } else {
                g.width
            };
            let fix = AutoFix::Resize {
                element_id: element.id.clone(),
                width,
                height: min,
            };
            (g.height, fix)
        }
    };

    (measured < min).then(|| {
        Violation::new(
            RuleKind::DrinkawareSize,
            Severity::Hard,
            format!(
                "responsible-drinking lock-up '{}' is {measured}px tall, {min}px required",
                element.id
            ),
        )
        .on_element(&element.id)
        .with_measurement(min, measured)
        .with_fix(fix)
    })
}

impl Rule for Drinkaware {
    fn kind(&self) -> RuleKind {
        KIND
    }

    fn description(&self) -> &'static str {
        "Requires a legible responsible-drinking lock-up on alcohol creatives"
    }

    fn also_reports(&self) -> &'static [RuleKind] {
        &[RuleKind::DrinkawareSize]
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Violation> {
        if !ctx.options.is_alcohol_campaign {
            return Vec::new();
        }

        let lockups: Vec<&CanvasElement> = ctx
            .elements()
            .map(|(_, e)| e)
            .filter(|e| is_lockup(e))
            .collect();

        if lockups.is_empty() {
            return vec![Violation::new(
                KIND,
                Severity::Hard,
                "alcohol creative is missing the responsible-drinking lock-up",
            )];
        }

        let min = Self::min_height(ctx.options.format);
        lockups
            .into_iter()
            .filter_map(|e| size_violation(e, min))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{check, check_with, square};
    use creative_lint_core::{handles, Document, ElementKind, FixContext, TextStyle, ValidationOptions};

    fn alcohol() -> ValidationOptions {
        ValidationOptions::default().alcohol(true)
    }

    fn badge_image(height: f64) -> CanvasElement {
        CanvasElement::new(
            "da",
            ElementKind::Image {
                src: Some("assets/Drinkaware-logo.png".to_string()),
            },
        )
        .with_rect(40.0, 900.0, 160.0, height)
    }

    fn fix_with(doc: &Document, v: &Violation, options: &ValidationOptions) -> Option<Document> {
        Drinkaware::new().fix(doc, v, &FixContext::new(doc.canvas_size, options))
    }

    #[test]
    fn test_skipped_for_non_alcohol() {
        let doc = square(Vec::new());
        assert!(check(&Drinkaware::new(), &doc).is_empty());
    }

    #[test]
    fn test_missing_lockup() {
        let doc = square(Vec::new());
        let violations = check_with(&Drinkaware::new(), &doc, &alcohol());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, RuleKind::DrinkawareMissing);
        assert!(violations[0].element_id.is_none());
        assert!(!violations[0].auto_fixable);
    }

    #[test]
    fn test_small_image_is_resized_keeping_aspect() {
        let doc = square(vec![badge_image(10.0)]);
        let options = alcohol();
        let violations = check_with(&Drinkaware::new(), &doc, &options);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, RuleKind::DrinkawareSize);
        assert!(matches!(
            violations[0].auto_fix,
            Some(AutoFix::Resize { width, height, .. })
                if (width - 320.0).abs() < 1e-9 && (height - 20.0).abs() < 1e-9
        ));

        let fixed = fix_with(&doc, &violations[0], &options).unwrap();
        assert!(check_with(&Drinkaware::new(), &fixed, &options).is_empty());
    }

    #[test]
    fn test_text_lockup_uses_font_size() {
        let text = CanvasElement::text("da", TextStyle::new("drinkaware.co.uk").font_size(14.0))
            .with_rect(40.0, 900.0, 300.0, 14.0);
        let doc = square(vec![text]);
        let violations = check_with(&Drinkaware::new(), &doc, &alcohol());
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].auto_fix.as_ref().and_then(AutoFix::value),
            Some(PropertyValue::Number(20.0))
        );
    }

    #[test]
    fn test_say_format_minimum() {
        let doc = square(vec![badge_image(14.0)]);
        let say = ValidationOptions::for_format(FormatType::Say).alcohol(true);
        assert!(check_with(&Drinkaware::new(), &doc, &say).is_empty());
        assert_eq!(check_with(&Drinkaware::new(), &doc, &alcohol()).len(), 1);
    }

    #[test]
    fn test_rule_handles_both_kinds() {
        let rule = Drinkaware::new();
        assert!(handles(&rule, RuleKind::DrinkawareMissing));
        assert!(handles(&rule, RuleKind::DrinkawareSize));
        assert!(!handles(&rule, RuleKind::ContrastFail));
    }
}
