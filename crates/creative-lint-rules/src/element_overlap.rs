//! Rule to flag overlap with protected elements.
//!
//! Logos, CTAs, packshots and value tiles must stay unobstructed. Any other
//! element overlapping one of them is reported once per pair. Overlap with a
//! value tile is a hard fail; everything else is a warning, since the
//! designer may have intended the layering.

use creative_lint_core::geometry::bounding_box;
use creative_lint_core::{
    CanvasElement, CheckContext, ElementRole, Label, Rule, RuleKind, Severity, Violation,
};

/// Rule kind reported by this rule.
pub const KIND: RuleKind = RuleKind::ElementOverlap;

/// Reports elements overlapping a protected element.
#[derive(Debug, Clone, Default)]
pub struct ElementOverlap;

impl ElementOverlap {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn severity_for(a: &CanvasElement, b: &CanvasElement) -> Severity {
    if a.role() == ElementRole::ValueTile || b.role() == ElementRole::ValueTile {
        Severity::Hard
    } else {
        Severity::Warning
    }
}

impl Rule for ElementOverlap {
    fn kind(&self) -> RuleKind {
        KIND
    }

    fn description(&self) -> &'static str {
        "Flags elements overlapping logos, CTAs, packshots or value tiles"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        for page in ctx.pages() {
            let elements: Vec<&CanvasElement> = page
                .iter()
                .filter(|e| e.role() != ElementRole::Background)
                .collect();

            for (i, a) in elements.iter().enumerate() {
                for b in &elements[i + 1..] {
                    let (ra, rb) = (a.role(), b.role());
                    if !ra.is_protected() && !rb.is_protected() {
                        continue;
                    }
                    if !bounding_box(a).overlaps(&bounding_box(b), 0.0) {
                        continue;
                    }
                    // report against the unprotected side when there is one
                    let (subject, protected) = if ra.is_protected() && !rb.is_protected() {
                        (*b, *a)
                    } else {
                        (*a, *b)
                    };
                    violations.push(
                        Violation::new(
                            KIND,
                            severity_for(a, b),
                            format!(
                                "'{}' overlaps {} '{}'",
                                subject.id,
                                protected.role(),
                                protected.id
                            ),
                        )
                        .on_element(&subject.id)
                        .with_label(Label::new(&protected.id, format!("protected {}", protected.role()))),
                    );
                }
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{check, square};
    use creative_lint_core::{ElementKind, ElementTags, TextStyle, ValueTile, ValueTileKind};

    fn logo(x: f64, y: f64) -> CanvasElement {
        CanvasElement::new("logo", ElementKind::Logo { src: None }).with_rect(x, y, 200.0, 100.0)
    }

    fn text(id: &str, x: f64, y: f64) -> CanvasElement {
        CanvasElement::text(id, TextStyle::new("Summer")).with_rect(x, y, 300.0, 60.0)
    }

    #[test]
    fn test_overlap_with_logo_is_warning() {
        let doc = square(vec![logo(800.0, 900.0), text("copy", 700.0, 920.0)]);
        let violations = check(&ElementOverlap::new(), &doc);
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.severity, Severity::Warning);
        assert_eq!(v.element_id.as_deref(), Some("copy"));
        assert_eq!(v.labels[0].element_id, "logo");
        assert!(!v.auto_fixable);
    }

    #[test]
    fn test_overlap_with_value_tile_is_hard() {
        let tile = CanvasElement::new(
            "tile",
            ElementKind::ValueTile(ValueTile {
                tile: ValueTileKind::White,
                price: Some("£2".to_string()),
                end_date: None,
            }),
        )
        .with_rect(700.0, 900.0, 200.0, 150.0);
        let doc = square(vec![tile, text("copy", 650.0, 950.0)]);
        let violations = check(&ElementOverlap::new(), &doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Hard);
    }

    #[test]
    fn test_unprotected_pairs_and_touching_edges_pass() {
        let doc = square(vec![
            text("a", 0.0, 0.0),
            text("b", 100.0, 20.0),
            logo(400.0, 0.0),
        ]);
        assert!(check(&ElementOverlap::new(), &doc).is_empty());
    }

    #[test]
    fn test_background_never_overlaps() {
        let bg = CanvasElement::image("bg")
            .with_rect(0.0, 0.0, 1080.0, 1080.0)
            .with_tags(ElementTags {
                is_background: true,
                ..ElementTags::default()
            });
        let doc = square(vec![bg, logo(0.0, 0.0)]);
        assert!(check(&ElementOverlap::new(), &doc).is_empty());
    }
}
