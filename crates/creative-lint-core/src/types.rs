//! Core types for compliance violations and reports.

use std::fmt;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};

/// Severity level for compliance violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory only, does not block export.
    Warning,
    /// Blocks export and counts against compliance.
    Hard,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Closed taxonomy of compliance rules.
///
/// Identifiers that are not part of the taxonomy deserialize to
/// [`RuleKind::Unrecognized`] so that foreign violations can be carried
/// through a correction pass untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    /// Element intrudes into a no-go band.
    SafeZone,
    /// Protected elements overlap.
    ElementOverlap,
    /// Text is smaller than the format minimum.
    MinFontSize,
    /// Call-to-action elements are not allowed.
    CtaNotAllowed,
    /// Packshot clearance is too small.
    PackshotSafeZone,
    /// Text or icon contrast is too low.
    ContrastFail,
    /// Responsible-drinking logo is missing.
    DrinkawareMissing,
    /// Responsible-drinking logo is too small.
    DrinkawareSize,
    /// Retailer brand tag is missing.
    TagRequired,
    /// Headline is missing.
    HeadlineRequired,
    /// Brand logo is missing.
    LogoRequired,
    /// Page background is missing.
    BackgroundRequired,
    /// Text contains blocked claims.
    BlockedKeyword,
    /// Value tile offer lacks a valid end date.
    ValueTileEndDate,
    /// People were detected in imagery.
    PeopleDetected,
    /// Placement leaves the canvas.
    OutOfBounds,
    /// Identifier outside this taxonomy.
    #[serde(other)]
    Unrecognized,
}

impl RuleKind {
    /// Every recognized kind, in check order.
    pub const ALL: [Self; 16] = [
        Self::SafeZone,
        Self::ElementOverlap,
        Self::MinFontSize,
        Self::CtaNotAllowed,
        Self::PackshotSafeZone,
        Self::ContrastFail,
        Self::DrinkawareMissing,
        Self::DrinkawareSize,
        Self::TagRequired,
        Self::HeadlineRequired,
        Self::LogoRequired,
        Self::BackgroundRequired,
        Self::BlockedKeyword,
        Self::ValueTileEndDate,
        Self::PeopleDetected,
        Self::OutOfBounds,
    ];

    /// Kebab-case rule name used in configuration.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SafeZone => "safe-zone",
            Self::ElementOverlap => "element-overlap",
            Self::MinFontSize => "min-font-size",
            Self::CtaNotAllowed => "cta-not-allowed",
            Self::PackshotSafeZone => "packshot-safe-zone",
            Self::ContrastFail => "contrast",
            Self::DrinkawareMissing => "drinkaware-missing",
            Self::DrinkawareSize => "drinkaware-size",
            Self::TagRequired => "tag-required",
            Self::HeadlineRequired => "headline-required",
            Self::LogoRequired => "logo-required",
            Self::BackgroundRequired => "background-required",
            Self::BlockedKeyword => "blocked-keyword",
            Self::ValueTileEndDate => "value-tile-end-date",
            Self::PeopleDetected => "people-detected",
            Self::OutOfBounds => "out-of-bounds",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Rule code (e.g. "CL001").
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::SafeZone => "CL001",
            Self::ElementOverlap => "CL002",
            Self::MinFontSize => "CL003",
            Self::CtaNotAllowed => "CL004",
            Self::PackshotSafeZone => "CL005",
            Self::ContrastFail => "CL006",
            Self::DrinkawareMissing => "CL007",
            Self::DrinkawareSize => "CL008",
            Self::TagRequired => "CL009",
            Self::HeadlineRequired => "CL010",
            Self::LogoRequired => "CL011",
            Self::BackgroundRequired => "CL012",
            Self::BlockedKeyword => "CL013",
            Self::ValueTileEndDate => "CL014",
            Self::PeopleDetected => "CL015",
            Self::OutOfBounds => "CL016",
            Self::Unrecognized => "CL000",
        }
    }

    /// Wire identifier (e.g. "MIN_FONT_SIZE").
    #[must_use]
    pub fn identifier(self) -> &'static str {
        match self {
            Self::SafeZone => "SAFE_ZONE",
            Self::ElementOverlap => "ELEMENT_OVERLAP",
            Self::MinFontSize => "MIN_FONT_SIZE",
            Self::CtaNotAllowed => "CTA_NOT_ALLOWED",
            Self::PackshotSafeZone => "PACKSHOT_SAFE_ZONE",
            Self::ContrastFail => "CONTRAST_FAIL",
            Self::DrinkawareMissing => "DRINKAWARE_MISSING",
            Self::DrinkawareSize => "DRINKAWARE_SIZE",
            Self::TagRequired => "TAG_REQUIRED",
            Self::HeadlineRequired => "HEADLINE_REQUIRED",
            Self::LogoRequired => "LOGO_REQUIRED",
            Self::BackgroundRequired => "BACKGROUND_REQUIRED",
            Self::BlockedKeyword => "BLOCKED_KEYWORD",
            Self::ValueTileEndDate => "VALUE_TILE_END_DATE",
            Self::PeopleDetected => "PEOPLE_DETECTED",
            Self::OutOfBounds => "OUT_OF_BOUNDS",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }

    /// Looks a kind up by name, code or identifier.
    #[must_use]
    pub fn lookup(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|k| {
            k.name().eq_ignore_ascii_case(key)
                || k.code().eq_ignore_ascii_case(key)
                || k.identifier().eq_ignore_ascii_case(key)
        })
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Element property targeted by a [`AutoFix::SetProperty`] descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
    /// Width.
    Width,
    /// Height.
    Height,
    /// Font size of a text-bearing element.
    FontSize,
    /// Fill color.
    Fill,
    /// Opacity.
    Opacity,
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Width => "width",
            Self::Height => "height",
            Self::FontSize => "fontSize",
            Self::Fill => "fill",
            Self::Opacity => "opacity",
        };
        f.write_str(name)
    }
}

/// Value written by a [`AutoFix::SetProperty`] descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Numeric value.
    Number(f64),
    /// Textual value (colors).
    Text(String),
}

impl PropertyValue {
    /// Numeric payload, if any.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Textual payload, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Placeholder element kinds the corrector can synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyntheticKind {
    /// Retailer brand tag.
    BrandTag,
    /// Headline text.
    Headline,
    /// Subheading text.
    Subheading,
    /// Brand logo.
    Logo,
}

impl SyntheticKind {
    /// Stable id of the synthesized element.
    #[must_use]
    pub fn element_id(self) -> &'static str {
        match self {
            Self::BrandTag => "auto-brand-tag",
            Self::Headline => "auto-headline",
            Self::Subheading => "auto-subheading",
            Self::Logo => "auto-logo",
        }
    }
}

/// Declarative remediation attached to a violation.
///
/// A descriptor carries everything needed to reproduce the fix from the
/// document alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum AutoFix {
    /// Overwrite one property of an element.
    #[serde(rename_all = "camelCase")]
    SetProperty {
        /// Target element.
        element_id: String,
        /// Property to write.
        property: Property,
        /// New value.
        value: PropertyValue,
    },
    /// Recolor an element, optionally adding a legibility shadow.
    #[serde(rename_all = "camelCase")]
    Recolor {
        /// Target element.
        element_id: String,
        /// New fill color.
        fill: String,
        /// Whether to add a drop shadow.
        drop_shadow: bool,
    },
    /// Resize an element.
    #[serde(rename_all = "camelCase")]
    Resize {
        /// Target element.
        element_id: String,
        /// New width.
        width: f64,
        /// New height.
        height: f64,
    },
    /// Delete an element.
    #[serde(rename_all = "camelCase")]
    Remove {
        /// Target element.
        element_id: String,
    },
    /// Insert a placeholder element.
    Synthesize {
        /// What to insert.
        synthetic: SyntheticKind,
    },
    /// Set a page background color.
    #[serde(rename_all = "camelCase")]
    SetBackground {
        /// Target page.
        page_id: String,
        /// Background color.
        color: String,
    },
}

impl AutoFix {
    /// Element targeted by the fix, if it targets one.
    #[must_use]
    pub fn element_id(&self) -> Option<&str> {
        match self {
            Self::SetProperty { element_id, .. }
            | Self::Recolor { element_id, .. }
            | Self::Resize { element_id, .. }
            | Self::Remove { element_id } => Some(element_id),
            Self::Synthesize { synthetic } => Some(synthetic.element_id()),
            Self::SetBackground { .. } => None,
        }
    }

    /// The primary value written by the fix.
    #[must_use]
    pub fn value(&self) -> Option<PropertyValue> {
        match self {
            Self::SetProperty { value, .. } => Some(value.clone()),
            Self::Recolor { fill, .. } => Some(PropertyValue::Text(fill.clone())),
            Self::Resize { height, .. } => Some(PropertyValue::Number(*height)),
            Self::SetBackground { color, .. } => Some(PropertyValue::Text(color.clone())),
            Self::Remove { .. } | Self::Synthesize { .. } => None,
        }
    }

    /// Human-readable summary.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::SetProperty {
                element_id,
                property,
                value,
            } => format!("set {property} of '{element_id}' to {value}"),
            Self::Recolor {
                element_id,
                fill,
                drop_shadow,
            } => {
                if *drop_shadow {
                    format!("recolor '{element_id}' to {fill} with drop shadow")
                } else {
                    format!("recolor '{element_id}' to {fill}")
                }
            }
            Self::Resize {
                element_id,
                width,
                height,
            } => format!("resize '{element_id}' to {width}x{height}"),
            Self::Remove { element_id } => format!("remove '{element_id}'"),
            Self::Synthesize { synthetic } => format!("insert '{}'", synthetic.element_id()),
            Self::SetBackground { page_id, color } => {
                format!("set background of page '{page_id}' to {color}")
            }
        }
    }
}

/// Secondary element referenced by a violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Related element.
    pub element_id: String,
    /// Message for this label.
    pub message: String,
}

impl Label {
    /// Creates a new label.
    #[must_use]
    pub fn new(element_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            message: message.into(),
        }
    }
}

/// Required versus measured quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Threshold the rule requires.
    pub required: f64,
    /// Value found on the canvas.
    pub actual: f64,
}

/// A compliance finding.
///
/// A `rule` identifier outside the taxonomy is kept verbatim in
/// [`Violation::foreign_rule`] and written back unchanged on serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireViolation", into = "WireViolation")]
pub struct Violation {
    /// Rule code (e.g. "CL003").
    pub code: String,
    /// Rule kind.
    pub rule: RuleKind,
    /// Identifier as received when `rule` is [`RuleKind::Unrecognized`].
    pub foreign_rule: Option<String>,
    /// Severity.
    pub severity: Severity,
    /// Offending element; `None` for canvas-level findings.
    pub element_id: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// Whether [`Violation::auto_fix`] can be applied mechanically.
    pub auto_fixable: bool,
    /// Remediation descriptor.
    pub auto_fix: Option<AutoFix>,
    /// Required versus measured value.
    pub measurement: Option<Measurement>,
    /// Related elements.
    pub labels: Vec<Label>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireViolation {
    #[serde(default)]
    code: String,
    rule: String,
    severity: Severity,
    #[serde(default)]
    element_id: Option<String>,
    message: String,
    #[serde(default)]
    auto_fixable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auto_fix: Option<AutoFix>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    measurement: Option<Measurement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    labels: Vec<Label>,
}

impl From<WireViolation> for Violation {
    fn from(w: WireViolation) -> Self {
        let known = RuleKind::ALL
            .into_iter()
            .find(|k| k.identifier() == w.rule);
        let (rule, foreign_rule) = match known {
            Some(kind) => (kind, None),
            None => (RuleKind::Unrecognized, Some(w.rule)),
        };
        Self {
            code: w.code,
            rule,
            foreign_rule,
            severity: w.severity,
            element_id: w.element_id,
            message: w.message,
            auto_fixable: w.auto_fixable,
            auto_fix: w.auto_fix,
            measurement: w.measurement,
            labels: w.labels,
        }
    }
}

impl From<Violation> for WireViolation {
    fn from(v: Violation) -> Self {
        Self {
            rule: v.foreign_rule.unwrap_or_else(|| v.rule.identifier().to_string()),
            code: v.code,
            severity: v.severity,
            element_id: v.element_id,
            message: v.message,
            auto_fixable: v.auto_fixable,
            auto_fix: v.auto_fix,
            measurement: v.measurement,
            labels: v.labels,
        }
    }
}

impl Violation {
    /// Creates a violation without a fix.
    #[must_use]
    pub fn new(rule: RuleKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code: rule.code().to_string(),
            rule,
            foreign_rule: None,
            severity,
            element_id: None,
            message: message.into(),
            auto_fixable: false,
            auto_fix: None,
            measurement: None,
            labels: Vec::new(),
        }
    }

    /// Sets the offending element.
    #[must_use]
    pub fn on_element(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = Some(element_id.into());
        self
    }

    /// Attaches a remediation and marks the violation auto-fixable.
    #[must_use]
    pub fn with_fix(mut self, fix: AutoFix) -> Self {
        self.auto_fix = Some(fix);
        self.auto_fixable = true;
        self
    }

    /// Attaches a measurement.
    #[must_use]
    pub fn with_measurement(mut self, required: f64, actual: f64) -> Self {
        self.measurement = Some(Measurement { required, actual });
        self
    }

    /// Adds a label.
    #[must_use]
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Rule identifier as it appears on the wire.
    #[must_use]
    pub fn rule_identifier(&self) -> &str {
        self.foreign_rule
            .as_deref()
            .unwrap_or_else(|| self.rule.identifier())
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}\n",
            self.code,
            self.rule_identifier(),
            self.element_id.as_deref().unwrap_or("<canvas>"),
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(m) = &self.measurement {
            let _ = writeln!(output, "  = required {}, found {}", m.required, m.actual);
        }
        if let Some(fix) = &self.auto_fix {
            let _ = writeln!(output, "  = fix: {}", fix.describe());
        }
        output
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.element_id.as_deref().unwrap_or("<canvas>"),
            self.severity,
            self.code,
            self.message
        )
    }
}

/// Converts a Violation to a miette Diagnostic for rich terminal display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        let target = v.element_id.as_deref().unwrap_or("canvas");
        Self {
            message: format!("[{}] {} ({target})", v.code, v.message),
            help: v.auto_fix.as_ref().map(AutoFix::describe),
        }
    }
}

/// Counts attached to a [`ValidationReport`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Number of hard fails.
    pub hard_fails: usize,
    /// Number of warnings.
    pub warnings: usize,
    /// Number of auto-fixable findings.
    pub auto_fixable: usize,
    /// Elements inspected.
    pub elements_checked: usize,
    /// Pages inspected.
    pub pages_checked: usize,
}

/// Result of validating a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// No hard fails.
    pub compliant: bool,
    /// `max(0, 100 - 15 * hard - 5 * warnings)`.
    pub score: u32,
    /// Hard fails in check order.
    pub violations: Vec<Violation>,
    /// Warnings in check order.
    pub warnings: Vec<Violation>,
    /// Counts.
    pub summary: Summary,
}

/// Points lost per hard fail.
pub const HARD_FAIL_PENALTY: u32 = 15;
/// Points lost per warning.
pub const WARNING_PENALTY: u32 = 5;

/// Compliance score for the given counts.
#[must_use]
pub fn compliance_score(hard_fails: usize, warnings: usize) -> u32 {
    let hard = u32::try_from(hard_fails).unwrap_or(u32::MAX);
    let warn = u32::try_from(warnings).unwrap_or(u32::MAX);
    100u32
        .saturating_sub(hard.saturating_mul(HARD_FAIL_PENALTY))
        .saturating_sub(warn.saturating_mul(WARNING_PENALTY))
}

impl ValidationReport {
    /// Builds a report by splitting findings on severity.
    #[must_use]
    pub fn from_violations(
        all: Vec<Violation>,
        elements_checked: usize,
        pages_checked: usize,
    ) -> Self {
        let mut report = Self {
            summary: Summary {
                elements_checked,
                pages_checked,
                ..Summary::default()
            },
            ..Self::default()
        };
        report.extend(all);
        report
    }

    /// Adds findings and recomputes the aggregate fields.
    pub fn extend(&mut self, more: impl IntoIterator<Item = Violation>) {
        for v in more {
            match v.severity {
                Severity::Hard => self.violations.push(v),
                Severity::Warning => self.warnings.push(v),
            }
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.summary.hard_fails = self.violations.len();
        self.summary.warnings = self.warnings.len();
        self.summary.auto_fixable = self
            .all()
            .filter(|v| v.auto_fixable)
            .count();
        self.compliant = self.violations.is_empty();
        self.score = compliance_score(self.violations.len(), self.warnings.len());
    }

    /// Hard fails followed by warnings.
    pub fn all(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().chain(self.warnings.iter())
    }

    /// Returns `(hard, warnings)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        (self.violations.len(), self.warnings.len())
    }

    /// Checks if any finding meets or exceeds the given severity.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.all().any(|v| v.severity >= severity)
    }

    /// Findings of a single rule.
    #[must_use]
    pub fn by_rule(&self, rule: RuleKind) -> Vec<&Violation> {
        self.all().filter(|v| v.rule == rule).collect()
    }

    /// Multi-line human-readable report.
    #[must_use]
    pub fn format_report(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        for v in self.all() {
            let _ = writeln!(report, "{}", v.format());
        }
        let _ = writeln!(
            report,
            "Score {}/100: {} hard fail(s), {} warning(s) across {} element(s)",
            self.score, self.summary.hard_fails, self.summary.warnings, self.summary.elements_checked
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hard(rule: RuleKind) -> Violation {
        Violation::new(rule, Severity::Hard, "hard").on_element("e1")
    }

    fn warning(rule: RuleKind) -> Violation {
        Violation::new(rule, Severity::Warning, "warn").on_element("e2")
    }

    #[test]
    fn score_formula() {
        assert_eq!(compliance_score(0, 0), 100);
        assert_eq!(compliance_score(2, 0), 70);
        assert_eq!(compliance_score(1, 2), 75);
        assert_eq!(compliance_score(7, 0), 0);
        assert_eq!(compliance_score(usize::MAX, usize::MAX), 0);
    }

    #[test]
    fn report_splits_by_severity() {
        let report = ValidationReport::from_violations(
            vec![
                hard(RuleKind::SafeZone),
                warning(RuleKind::ElementOverlap),
                hard(RuleKind::MinFontSize).with_fix(AutoFix::SetProperty {
                    element_id: "e1".into(),
                    property: Property::FontSize,
                    value: PropertyValue::Number(20.0),
                }),
            ],
            3,
            1,
        );
        assert!(!report.compliant);
        assert_eq!(report.count_by_severity(), (2, 1));
        assert_eq!(report.summary.auto_fixable, 1);
        assert_eq!(report.score, 65);
        assert_eq!(report.violations[0].rule, RuleKind::SafeZone);
        assert!(report.has_violations_at(Severity::Warning));
    }

    #[test]
    fn unknown_rule_identifier_deserializes() {
        let v: Violation = serde_json::from_str(
            r#"{"rule":"MISSING_TESCO_TAG","severity":"hard","message":"legacy","autoFixable":true}"#,
        )
        .unwrap();
        assert_eq!(v.rule, RuleKind::Unrecognized);
        assert_eq!(v.rule_identifier(), "MISSING_TESCO_TAG");
        assert!(v.auto_fix.is_none());

        let back = serde_json::to_value(&v).unwrap();
        assert_eq!(back["rule"], "MISSING_TESCO_TAG");
        assert_eq!(back["message"], "legacy");
    }

    #[test]
    fn known_rule_identifier_has_no_foreign_copy() {
        let v: Violation = serde_json::from_str(
            r#"{"rule":"SAFE_ZONE","severity":"warning","message":"near edge","elementId":"t1"}"#,
        )
        .unwrap();
        assert_eq!(v.rule, RuleKind::SafeZone);
        assert!(v.foreign_rule.is_none());
        assert_eq!(serde_json::to_value(&v).unwrap()["rule"], "SAFE_ZONE");
    }

    #[test]
    fn auto_fix_wire_shape() {
        let fix = AutoFix::SetProperty {
            element_id: "t1".into(),
            property: Property::FontSize,
            value: PropertyValue::Number(20.0),
        };
        let json = serde_json::to_value(&fix).unwrap();
        assert_eq!(json["action"], "set-property");
        assert_eq!(json["elementId"], "t1");
        assert_eq!(json["property"], "fontSize");
        assert_eq!(json["value"], 20.0);
    }

    #[test]
    fn lookup_accepts_all_spellings() {
        assert_eq!(RuleKind::lookup("min-font-size"), Some(RuleKind::MinFontSize));
        assert_eq!(RuleKind::lookup("CL001"), Some(RuleKind::SafeZone));
        assert_eq!(RuleKind::lookup("contrast-fail"), None);
        assert_eq!(RuleKind::lookup("CONTRAST_FAIL"), Some(RuleKind::ContrastFail));
    }

    #[test]
    fn violation_format_mentions_fix() {
        let v = hard(RuleKind::CtaNotAllowed).with_fix(AutoFix::Remove {
            element_id: "e1".into(),
        });
        insta::assert_snapshot!(v.format().trim_end(), @r"
        CL004 CTA_NOT_ALLOWED at e1
          hard: hard
          = fix: remove 'e1'
        ");
    }
}
