//! Validation of a single proposed placement.

use serde::Serialize;

use crate::element::{CanvasElement, CanvasSize, ElementRole};
use crate::format::ValidationOptions;
use crate::geometry::{bounding_box, BoundingBox};
use crate::types::{AutoFix, Label, Property, PropertyValue, RuleKind, Severity, Violation};
use crate::zones::Zones;

use super::priority::priority_of;

/// Outcome of validating a placement.
///
/// The violations use the same shape as validator findings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementReport {
    /// No violations.
    pub is_valid: bool,
    /// Problems with the placement.
    pub violations: Vec<Violation>,
}

pub(super) fn validate<'a>(
    element: &CanvasElement,
    existing: impl IntoIterator<Item = &'a CanvasElement>,
    canvas: CanvasSize,
    zones: &Zones,
    options: &ValidationOptions,
) -> PlacementReport {
    let rect = bounding_box(element);
    let mut violations = Vec::new();

    if let Some(intrusion) = zones.intrusion(&rect) {
        violations.push(
            Violation::new(
                RuleKind::SafeZone,
                Severity::Hard,
                format!(
                    "'{}' would sit inside the {}px no-go band",
                    element.id,
                    intrusion.thickness.round()
                ),
            )
            .on_element(&element.id)
            .with_fix(AutoFix::SetProperty {
                element_id: element.id.clone(),
                property: Property::Y,
                value: PropertyValue::Number(intrusion.suggested_y),
            }),
        );
    }

    if let Some(style) = element.text_style() {
        let min = options.min_font_size();
        if let Some(size) = style.font_size.filter(|s| *s < min) {
            violations.push(
                Violation::new(
                    RuleKind::MinFontSize,
                    Severity::Hard,
                    format!("font size {size}px is below the {min}px minimum"),
                )
                .on_element(&element.id)
                .with_measurement(min, size)
                .with_fix(AutoFix::SetProperty {
                    element_id: element.id.clone(),
                    property: Property::FontSize,
                    value: PropertyValue::Number(min),
                }),
            );
        }
    }

    let own = priority_of(element.role());
    for other in existing {
        if other.id == element.id || other.role() == ElementRole::Background {
            continue;
        }
        let theirs = priority_of(other.role());
        if (own.can_overlap && theirs.can_overlap) || !rect.overlaps(&bounding_box(other), 0.0) {
            continue;
        }
        violations.push(
            Violation::new(
                RuleKind::ElementOverlap,
                Severity::Hard,
                format!("'{}' would overlap {} '{}'", element.id, other.role(), other.id),
            )
            .on_element(&element.id)
            .with_label(Label::new(&other.id, "overlapped element")),
        );
    }

    let bounds = BoundingBox::from_rect(0.0, 0.0, canvas.width, canvas.height);
    if !bounds.contains(&rect) {
        violations.push(
            Violation::new(
                RuleKind::OutOfBounds,
                Severity::Hard,
                format!("'{}' extends beyond the canvas", element.id),
            )
            .on_element(&element.id),
        );
    }

    PlacementReport {
        is_valid: violations.is_empty(),
        violations,
    }
}

#[cfg(test)]
mod tests {
    use crate::element::{CanvasElement, CanvasSize, ElementKind, ElementTags, TextStyle};
    use crate::format::ValidationOptions;
    use crate::layout::LayoutEngine;
    use crate::types::RuleKind;

    fn engine() -> LayoutEngine {
        LayoutEngine::new(CanvasSize::new(1080.0, 1920.0), &ValidationOptions::default())
    }

    #[test]
    fn clean_placement_is_valid() {
        let el = CanvasElement::text("t", TextStyle::new("Hi").font_size(32.0))
            .with_rect(100.0, 400.0, 300.0, 50.0);
        let report = engine().validate_placement(&el, std::iter::empty());
        assert!(report.is_valid, "{:?}", report.violations);
    }

    #[test]
    fn reports_no_go_font_and_bounds() {
        let el = CanvasElement::text("t", TextStyle::new("Hi").font_size(12.0))
            .with_rect(1000.0, 50.0, 300.0, 50.0);
        let report = engine().validate_placement(&el, std::iter::empty());
        let rules: Vec<RuleKind> = report.violations.iter().map(|v| v.rule).collect();
        assert_eq!(
            rules,
            vec![RuleKind::SafeZone, RuleKind::MinFontSize, RuleKind::OutOfBounds]
        );
        assert!(!report.is_valid);
    }

    #[test]
    fn overlap_with_non_overlappable_type() {
        let logo = CanvasElement::new("logo", ElementKind::Logo { src: None })
            .with_rect(100.0, 400.0, 200.0, 200.0)
            .with_tags(ElementTags {
                is_logo: true,
                ..ElementTags::default()
            });
        let badge = CanvasElement::new("b", ElementKind::Badge { text: None, fill: None })
            .with_rect(150.0, 450.0, 100.0, 100.0);
        let report = engine().validate_placement(&badge, [&logo]);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].rule, RuleKind::ElementOverlap);

        let deco = CanvasElement::new("d", ElementKind::Decorative { fill: None })
            .with_rect(150.0, 450.0, 100.0, 100.0);
        assert!(engine().validate_placement(&badge, [&deco]).is_valid);
    }
}
