//! Correction passes through the facade's `Corrector`.

use creative_lint::rules::{all_rules, Preset};
use creative_lint::{
    apply_auto_fixes, validate_canvas, validate_canvas_with_preset, AutoFix, CanvasElement,
    CanvasSize, Config, Corrector, Document, ElementKind, ElementTags, FormatType, Page, RuleKind,
    Severity, SyntheticKind, TextStyle, ValidationOptions, Validator, Violation,
};

fn social() -> ValidationOptions {
    ValidationOptions::for_format(FormatType::Social)
}

fn corrector(preset: Preset) -> Corrector {
    let validator = Validator::builder()
        .rules(preset.rules())
        .options(ValidationOptions::for_format(FormatType::Social))
        .build()
        .unwrap();
    Corrector::new(validator)
}

fn story(background: Option<&str>, elements: Vec<CanvasElement>) -> Document {
    let page = match background {
        Some(bg) => Page::new("p1").with_background(bg),
        None => Page::new("p1"),
    };
    let page = elements.into_iter().fold(page, Page::with_element);
    Document::new(CanvasSize::new(1080.0, 1920.0)).with_page(page)
}

#[test]
fn fixes_are_applied_to_a_copy() {
    let doc = story(
        Some("#ffffff"),
        vec![CanvasElement::text("t1", TextStyle::new("Fresh").font_size(14.0))
            .with_rect(100.0, 50.0, 400.0, 40.0)],
    );
    let corrector = corrector(Preset::Recommended);
    let report = corrector.validator().validate(&doc);

    let outcome = corrector.apply(&doc, &report.violations);

    assert_eq!(outcome.fixes_applied.len(), 2);
    assert!(outcome.is_compliant());
    assert_eq!(outcome.score(), 100);

    let (_, fixed) = outcome.corrected.find_element("t1").unwrap();
    assert_eq!(fixed.text_style().unwrap().font_size, Some(20.0));
    assert!(fixed.geometry.y >= 200.0);

    let (_, original) = doc.find_element("t1").unwrap();
    assert_eq!(original.text_style().unwrap().font_size, Some(14.0));
    assert!((original.geometry.y - 50.0).abs() < f64::EPSILON);
}

#[test]
fn cta_is_removed() {
    let doc = story(
        Some("#ffffff"),
        vec![CanvasElement::new("buy", ElementKind::Button(TextStyle::new("Buy now")))
            .with_rect(100.0, 800.0, 300.0, 80.0)],
    );
    let corrector = corrector(Preset::Recommended);
    let report = corrector.validator().validate(&doc);
    let outcome = corrector.apply(&doc, &report.violations);

    assert!(outcome.corrected.find_element("buy").is_none());
    assert_eq!(outcome.fixes_applied[0].rule, RuleKind::CtaNotAllowed);
    assert_eq!(outcome.fixes_applied[0].description, "remove 'buy'");
}

#[test]
fn missing_elements_are_synthesized_once() {
    let doc = story(None, Vec::new());
    let corrector = corrector(Preset::Strict);
    let report = corrector.validator().validate(&doc);
    assert_eq!(report.summary.hard_fails, 4);

    let outcome = corrector.apply(&doc, &report.violations);
    assert_eq!(outcome.fixes_applied.len(), 4);
    assert!(outcome.remaining_issues.is_empty(), "{:?}", outcome.remaining_issues);
    assert_eq!(outcome.corrected.element_count(), 3);
    assert_eq!(outcome.corrected.pages[0].background.as_deref(), Some("#ffffff"));

    // a second pass over stale descriptors replaces rather than duplicates
    let again = corrector.apply(&outcome.corrected, &report.violations);
    assert_eq!(again.corrected.element_count(), 3);
}

#[test]
fn non_fixable_findings_remain() {
    let packshot = |id: &str, x: f64| {
        CanvasElement::image(id)
            .with_rect(x, 600.0, 300.0, 400.0)
            .with_tags(ElementTags {
                is_packshot: true,
                ..ElementTags::default()
            })
    };
    let doc = story(Some("#ffffff"), vec![packshot("a", 100.0), packshot("b", 400.0)]);
    let corrector = corrector(Preset::Recommended);
    let report = corrector.validator().validate(&doc);
    let outcome = corrector.apply(&doc, &report.violations);

    assert!(outcome.fixes_applied.is_empty());
    assert_eq!(outcome.remaining_issues.len(), 1);
    assert_eq!(outcome.remaining_issues[0].rule, RuleKind::PackshotSafeZone);
}

#[test]
fn unknown_and_people_findings_pass_through() {
    let doc = story(Some("#ffffff"), Vec::new());
    let unknown = Violation::new(RuleKind::Unrecognized, Severity::Hard, "from another tool")
        .on_element("x")
        .with_fix(AutoFix::Remove {
            element_id: "x".to_string(),
        });
    let people = Violation::new(RuleKind::PeopleDetected, Severity::Warning, "people").on_element("hero");

    let outcome = corrector(Preset::Recommended).apply(&doc, &[unknown.clone(), people.clone()]);

    assert!(outcome.fixes_applied.is_empty());
    assert_eq!(outcome.remaining_issues, vec![unknown]);
    assert_eq!(outcome.remaining_warnings, vec![people]);
    assert_eq!(outcome.score(), 80);
}

#[test]
fn stale_fix_is_reported_not_applied() {
    let doc = story(Some("#ffffff"), Vec::new());
    let stale = Violation::new(RuleKind::MinFontSize, Severity::Hard, "gone")
        .on_element("deleted")
        .with_fix(AutoFix::Remove {
            element_id: "deleted".to_string(),
        });

    let outcome = corrector(Preset::Recommended).apply(&doc, std::slice::from_ref(&stale));
    assert!(outcome.fixes_applied.is_empty());
    assert_eq!(outcome.remaining_issues, vec![stale]);
}

#[test]
fn disabled_rules_are_not_reintroduced() {
    let config = Config::parse(
        r#"
[rules.min-font-size]
enabled = false
"#,
    )
    .unwrap();
    let validator = Validator::builder()
        .rules(Preset::Recommended.rules())
        .config(config)
        .build()
        .unwrap();
    let doc = story(
        Some("#ffffff"),
        vec![CanvasElement::text("t1", TextStyle::new("Tiny").font_size(8.0))
            .with_rect(100.0, 600.0, 200.0, 20.0)],
    );
    let report = validator.validate(&doc);
    assert!(report.compliant);

    let outcome = Corrector::new(validator).apply(&doc, &report.violations);
    assert!(outcome.is_compliant());
    assert!(outcome.fixes_applied.is_empty());
}

#[test]
fn applied_fixes_serialize_for_the_editor() {
    let doc = story(
        Some("#ffffff"),
        vec![CanvasElement::new("buy", ElementKind::Button(TextStyle::new("Buy now")))
            .with_rect(100.0, 800.0, 300.0, 80.0)],
    );
    let minimal = corrector(Preset::Minimal);
    let outcome = minimal.apply(&doc, &minimal.validator().validate(&doc).violations);
    assert!(outcome.fixes_applied.is_empty());

    let cta = Violation::new(RuleKind::CtaNotAllowed, Severity::Hard, "cta")
        .on_element("buy")
        .with_fix(AutoFix::Remove {
            element_id: "buy".to_string(),
        });
    let outcome = corrector(Preset::Recommended).apply(&doc, &[cta]);
    let json = serde_json::to_value(&outcome.fixes_applied).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "rule": "CTA_NOT_ALLOWED",
            "elementId": "buy",
            "description": "remove 'buy'"
        }])
    );
}

#[test]
fn entry_point_synthesizes_a_missing_tag() {
    let doc = story(Some("#ffffff"), Vec::new());
    let missing_tag = Violation::new(RuleKind::TagRequired, Severity::Hard, "no tag")
        .with_fix(AutoFix::Synthesize {
            synthetic: SyntheticKind::BrandTag,
        });

    let outcome = apply_auto_fixes(&doc, &[missing_tag], social()).unwrap();

    assert_eq!(outcome.fixes_applied.len(), 1);
    assert_eq!(outcome.fixes_applied[0].rule, RuleKind::TagRequired);
    assert!(outcome.remaining_issues.is_empty(), "{:?}", outcome.remaining_issues);
    assert!(outcome.corrected.find_element("auto-brand-tag").is_some());
}

#[test]
fn entry_point_fixes_every_required_element() {
    let doc = story(None, Vec::new());
    assert!(validate_canvas(&doc, social()).unwrap().compliant);

    let report = validate_canvas_with_preset(&doc, social(), Preset::Strict).unwrap();
    assert_eq!(report.summary.hard_fails, 4);

    let outcome = apply_auto_fixes(&doc, &report.violations, social()).unwrap();
    assert_eq!(outcome.fixes_applied.len(), 4);
    assert!(outcome.is_compliant());
    assert_eq!(outcome.corrected.element_count(), 3);
    assert_eq!(outcome.corrected.pages[0].background.as_deref(), Some("#ffffff"));

    let recheck = validate_canvas_with_preset(&outcome.corrected, social(), Preset::Strict).unwrap();
    assert!(recheck.compliant, "{:?}", recheck.violations);
}

#[test]
fn fixers_respect_disabled_rules() {
    let config = Config::parse(
        r#"
[rules.tag-required]
enabled = false
"#,
    )
    .unwrap();
    let validator = Validator::builder()
        .rules(Preset::Recommended.rules())
        .options(social())
        .config(config)
        .build()
        .unwrap();
    let corrector = Corrector::new(validator).with_fixers(all_rules());
    let doc = story(Some("#ffffff"), Vec::new());
    let missing_tag = Violation::new(RuleKind::TagRequired, Severity::Hard, "no tag")
        .with_fix(AutoFix::Synthesize {
            synthetic: SyntheticKind::BrandTag,
        });

    let outcome = corrector.apply(&doc, std::slice::from_ref(&missing_tag));
    assert!(outcome.fixes_applied.is_empty());
    assert_eq!(outcome.remaining_issues, vec![missing_tag]);
}

#[test]
fn foreign_findings_are_carried_verbatim() {
    let incoming = serde_json::json!([
        {"code": "X1", "rule": "FOO_RULE", "severity": "hard", "elementId": null,
         "message": "foo", "autoFixable": false},
        {"code": "X2", "rule": "BAR_RULE", "severity": "hard", "elementId": null,
         "message": "bar", "autoFixable": false},
        {"code": "X3", "rule": "BAZ_RULE", "severity": "warning", "elementId": "hero",
         "message": "baz", "autoFixable": false}
    ]);
    let violations: Vec<Violation> = serde_json::from_value(incoming.clone()).unwrap();
    let doc = story(Some("#ffffff"), Vec::new());

    let outcome = apply_auto_fixes(&doc, &violations, social()).unwrap();

    assert!(outcome.fixes_applied.is_empty());
    assert_eq!(outcome.remaining_issues.len(), 2);
    assert_eq!(outcome.remaining_warnings.len(), 1);
    let ids: Vec<&str> = outcome
        .remaining_issues
        .iter()
        .chain(&outcome.remaining_warnings)
        .map(Violation::rule_identifier)
        .collect();
    assert_eq!(ids, ["FOO_RULE", "BAR_RULE", "BAZ_RULE"]);

    let carried: Vec<&Violation> = outcome
        .remaining_issues
        .iter()
        .chain(&outcome.remaining_warnings)
        .collect();
    assert_eq!(serde_json::to_value(carried).unwrap(), incoming);
}
