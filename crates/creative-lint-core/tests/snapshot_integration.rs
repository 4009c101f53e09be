//! Integration test: snapshot JSON through the validator and layout engine.
//!
//! Uses fixture files under `tests/fixtures/` to exercise the full
//! JSON → DTO → Document → Rule → Validator pipeline with a rule defined
//! here, independent of the built-in rule crate.

use creative_lint_core::geometry::bounding_box;
use creative_lint_core::{
    snapshot, AutoFix, CanvasElement, CheckContext, Config, Document, ElementKind, ElementRole,
    LayoutEngine, Property, PropertyValue, Rule, RuleKind, Severity, Size, ValidationOptions,
    ValueTileKind, Validator, Violation,
};
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

fn spring_story() -> Document {
    snapshot::load_document(&fixture("spring_story.json")).unwrap()
}

/// Flags text smaller than a fixed size.
struct TextAtLeast(f64);

impl Rule for TextAtLeast {
    fn kind(&self) -> RuleKind {
        RuleKind::MinFontSize
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Violation> {
        ctx.elements()
            .filter_map(|(_, e)| {
                let size = e.text_style()?.font_size?;
                (size < self.0).then(|| {
                    Violation::new(self.kind(), self.default_severity(), "too small")
                        .on_element(&e.id)
                        .with_measurement(self.0, size)
                        .with_fix(AutoFix::SetProperty {
                            element_id: e.id.clone(),
                            property: Property::FontSize,
                            value: PropertyValue::Number(self.0),
                        })
                })
            })
            .collect()
    }
}

// ── Loading ──

#[test]
fn fixture_loads_with_aliases() {
    let doc = spring_story();
    assert_eq!(doc.pages.len(), 1);
    assert_eq!(doc.element_count(), 5);

    let page = &doc.pages[0];
    assert_eq!(page.id, "story");
    assert_eq!(page.background_color(), "#0b3d2e");

    let roles: Vec<ElementRole> = page.iter().map(CanvasElement::role).collect();
    assert_eq!(
        roles,
        vec![
            ElementRole::Image,
            ElementRole::Headline,
            ElementRole::BrandTag,
            ElementRole::Logo,
            ElementRole::ValueTile,
        ]
    );

    let (_, tile) = doc.find_element("price").unwrap();
    match &tile.kind {
        ElementKind::ValueTile(t) => {
            assert_eq!(t.tile, ValueTileKind::Clubcard);
            assert_eq!(t.end_date.as_deref(), Some("24/05"));
        }
        other => panic!("expected a value tile, got {other:?}"),
    }
}

#[test]
fn written_snapshot_loads_again() {
    let doc = spring_story();
    let json = snapshot::to_json(&doc).unwrap();
    let again = snapshot::load_document(&json).unwrap();

    assert_eq!(again.canvas_size, doc.canvas_size);
    let ids = |d: &Document| d.pages[0].iter().map(|e| e.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&again), ids(&doc));
    assert_eq!(again.pages[0].background, doc.pages[0].background);
}

#[test]
fn duplicate_ids_across_pages_are_rejected() {
    let err = snapshot::load_document(&fixture("duplicate_ids.json")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "pages[1].elements[0].id: duplicate element id `a`"
    );
}

// ── Validation ──

#[test]
fn custom_rule_runs_over_fixture() {
    let validator = Validator::builder().rule(TextAtLeast(32.0)).build().unwrap();
    let report = validator.validate(&spring_story());

    assert_eq!(report.summary.elements_checked, 5);
    assert_eq!(report.summary.pages_checked, 1);
    assert_eq!(report.violations.len(), 1);

    let v = &report.violations[0];
    assert_eq!(v.element_id.as_deref(), Some("tag"));
    assert_eq!(v.code, "CL003");
    assert!(v.auto_fixable);
    assert_eq!(report.score, 85);
}

#[test]
fn config_downgrades_and_disables() {
    let downgraded = Config::parse("[rules.min-font-size]\nseverity = \"warning\"\n").unwrap();
    let report = Validator::builder()
        .rule(TextAtLeast(32.0))
        .config(downgraded)
        .build()
        .unwrap()
        .validate(&spring_story());
    assert!(report.compliant);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].severity, Severity::Warning);

    let disabled = Config::parse("[rules.CL003]\nenabled = false\n").unwrap();
    let report = Validator::builder()
        .rule(TextAtLeast(32.0))
        .config(disabled)
        .build()
        .unwrap()
        .validate(&spring_story());
    assert!(report.all().next().is_none());
}

#[test]
fn fix_through_rule_resolves_finding() {
    let doc = spring_story();
    let validator = Validator::builder().rule(TextAtLeast(32.0)).build().unwrap();
    let report = validator.validate(&doc);

    let rule = validator.rule_for(RuleKind::MinFontSize).unwrap();
    let options = ValidationOptions::default();
    let ctx = creative_lint_core::FixContext::new(doc.canvas_size, &options);
    let fixed = rule.fix(&doc, &report.violations[0], &ctx).unwrap();

    assert!(validator.validate(&fixed).compliant);
    assert_eq!(
        doc.find_element("tag").unwrap().1.text_style().unwrap().font_size,
        Some(28.0)
    );
}

// ── Layout ──

#[test]
fn badge_placement_clears_fixture_elements() {
    let doc = spring_story();
    let engine = LayoutEngine::new(doc.canvas_size, &ValidationOptions::default());
    let size = Size::new(200.0, 120.0);

    let spot = engine.find_optimal_position(ElementRole::Badge, size, doc.pages[0].iter());
    assert!(!spot.is_vetoed(), "{}", spot.reason);

    let badge = CanvasElement::new(
        "new-badge",
        ElementKind::Badge {
            text: Some("New".to_string()),
            fill: None,
        },
    )
    .with_rect(spot.x, spot.y, size.width, size.height);

    let (_, tile) = doc.find_element("price").unwrap();
    assert!(!bounding_box(&badge).overlaps(&bounding_box(tile), 0.0));
}

#[test]
fn badge_on_value_tile_is_rejected() {
    let doc = spring_story();
    let engine = LayoutEngine::new(doc.canvas_size, &ValidationOptions::default());
    let badge = CanvasElement::new(
        "new-badge",
        ElementKind::Badge {
            text: None,
            fill: None,
        },
    )
    .with_rect(720.0, 1320.0, 200.0, 120.0);

    let report = engine.validate_placement(&badge, doc.pages[0].iter());
    assert!(!report.is_valid);
}
