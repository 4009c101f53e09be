//! Rule to enforce WCAG contrast against the page background.
//!
//! Text and buttons are checked, along with shapes tagged as icons. Large
//! text (at or above the configured threshold) needs 3:1, everything else
//! 4.5:1. A missing fill is treated as black.

use creative_lint_core::color::{best_contrasting_color, contrast_ratio, is_dark, BLACK};
use creative_lint_core::{
    AutoFix, CanvasElement, CheckContext, ElementKind, Rule, RuleKind, Severity, Violation,
};

/// Rule kind reported by this rule.
pub const KIND: RuleKind = RuleKind::ContrastFail;

/// Minimum ratio for normal text and icons.
pub const NORMAL_RATIO: f64 = 4.5;
/// Minimum ratio for large text.
pub const LARGE_RATIO: f64 = 3.0;

/// Reports text and icons with insufficient contrast.
#[derive(Debug, Clone, Default)]
pub struct Contrast;

impl Contrast {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn is_checked(element: &CanvasElement) -> bool {
    match element.kind {
        ElementKind::Text(_) | ElementKind::Button(_) => true,
        ElementKind::Shape { .. } => element.tags.is_icon,
        _ => false,
    }
}

impl Rule for Contrast {
    fn kind(&self) -> RuleKind {
        KIND
    }

    fn description(&self) -> &'static str {
        "Enforces WCAG contrast of text and icons against the page background"
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Violation> {
        ctx.elements()
            .filter(|(_, e)| is_checked(e))
            .filter_map(|(page, e)| {
                let background = page.background_color();
                let fill = e.fill().unwrap_or(BLACK);
                let large = e
                    .text_style()
                    .and_then(|s| s.font_size)
                    .is_some_and(|size| size >= ctx.options.large_text_threshold);
                let required = if large { LARGE_RATIO } else { NORMAL_RATIO };
                let ratio = contrast_ratio(fill, background);
                if ratio >= required {
                    return None;
                }
                Some(
                    Violation::new(
                        KIND,
                        Severity::Hard,
                        format!(
                            "'{}' has contrast {ratio:.2}:1 against {background}, {required}:1 required",
                            e.id
                        ),
                    )
                    .on_element(&e.id)
                    .with_measurement(required, (ratio * 100.0).round() / 100.0)
                    .with_fix(AutoFix::Recolor {
                        element_id: e.id.clone(),
                        fill: best_contrasting_color(background).to_string(),
                        drop_shadow: is_dark(background),
                    }),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{check, fix, story};
    use creative_lint_core::{ElementTags, PropertyValue, TextStyle};

    fn text(id: &str, fill: &str, size: f64) -> CanvasElement {
        CanvasElement::text(id, TextStyle::new("Offer").font_size(size).fill(fill))
            .with_rect(100.0, 600.0, 400.0, 80.0)
    }

    #[test]
    fn test_dark_on_dark_recolors_white() {
        let doc = story("#1a1a1a", vec![text("t", "#222222", 32.0)]);
        let violations = check(&Contrast::new(), &doc);
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(
            v.auto_fix.as_ref().and_then(AutoFix::value),
            Some(PropertyValue::Text("#ffffff".to_string()))
        );
        assert!(matches!(
            v.auto_fix,
            Some(AutoFix::Recolor { drop_shadow: true, .. })
        ));
    }

    #[test]
    fn test_large_text_threshold() {
        // #949494 on white is roughly 3.03:1
        let doc = story(
            "#ffffff",
            vec![text("large", "#949494", 24.0), text("small", "#949494", 20.0)],
        );
        let violations = check(&Contrast::new(), &doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].element_id.as_deref(), Some("small"));
        assert!((violations[0].measurement.unwrap().required - NORMAL_RATIO).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_fill_is_black() {
        let plain = CanvasElement::text("t", TextStyle::new("Hi").font_size(30.0));
        assert!(check(&Contrast::new(), &story("#ffffff", vec![plain.clone()])).is_empty());
        assert_eq!(check(&Contrast::new(), &story("#000000", vec![plain])).len(), 1);
    }

    #[test]
    fn test_icons_checked_images_ignored() {
        let icon = CanvasElement::new(
            "icon",
            ElementKind::Shape {
                fill: Some("#fefefe".to_string()),
            },
        )
        .with_tags(ElementTags {
            is_icon: true,
            ..ElementTags::default()
        });
        let shape = CanvasElement::new(
            "shape",
            ElementKind::Shape {
                fill: Some("#fefefe".to_string()),
            },
        );
        let doc = story("#ffffff", vec![icon, shape, CanvasElement::image("img")]);
        let violations = check(&Contrast::new(), &doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].element_id.as_deref(), Some("icon"));
    }

    #[test]
    fn test_fix_resolves_violation() {
        let doc = story("#1a1a1a", vec![text("t", "#222222", 16.0)]);
        let rule = Contrast::new();
        let v = check(&rule, &doc);
        let fixed = fix(&rule, &doc, &v[0]).unwrap();
        let (_, el) = fixed.find_element("t").unwrap();
        assert_eq!(el.fill(), Some("#ffffff"));
        assert!(el.text_style().unwrap().shadow.is_some());
        assert!(check(&rule, &fixed).is_empty());
    }
}
