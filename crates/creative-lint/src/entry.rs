//! Entry points for an editing surface.
//!
//! Each function builds what it needs from plain arguments, so a caller can
//! validate or place elements without assembling a [`Validator`] itself.

use std::sync::Arc;
use std::time::Duration;

use creative_lint_core::layout::image_grid::{self, TextPlacement};
use creative_lint_core::{
    CanvasElement, CanvasSize, Document, ElementRole, FaceDetector, FormatType, LayoutEngine,
    PlacementReport, ScoredCandidate, Size, ValidationOptions, ValidationReport, Validator,
    ValidatorError, Violation,
};
use creative_lint_rules::{all_rules, Preset};

use crate::corrector::{Corrector, FixOutcome};

/// Time allowed for loading a background image before falling back.
const IMAGE_BUDGET: Duration = Duration::from_secs(3);

/// Builds a validator running the rules of `preset` with `options`.
///
/// # Errors
///
/// Returns an error if the registry is misconfigured.
pub fn preset_validator(
    preset: Preset,
    options: ValidationOptions,
) -> Result<Validator, ValidatorError> {
    Validator::builder()
        .rules(preset.rules())
        .options(options)
        .build()
}

/// Builds a validator running the recommended rules with `options`.
///
/// # Errors
///
/// Returns an error if the registry is misconfigured.
pub fn default_validator(options: ValidationOptions) -> Result<Validator, ValidatorError> {
    preset_validator(Preset::default(), options)
}

/// Validates a document with the recommended rules.
///
/// # Errors
///
/// Returns an error if the registry is misconfigured; findings are never
/// errors.
pub fn validate_canvas(
    document: &Document,
    options: ValidationOptions,
) -> Result<ValidationReport, ValidatorError> {
    Ok(default_validator(options)?.validate(document))
}

/// Validates a document with the rules of `preset`.
///
/// [`Preset::Strict`] adds the required-element checks for finished
/// creatives.
///
/// # Errors
///
/// Returns an error if the registry is misconfigured.
pub fn validate_canvas_with_preset(
    document: &Document,
    options: ValidationOptions,
    preset: Preset,
) -> Result<ValidationReport, ValidatorError> {
    Ok(preset_validator(preset, options)?.validate(document))
}

/// Like [`validate_canvas`], then runs the people check with `detector`
/// when `options.enable_face_detection` is set.
///
/// # Errors
///
/// Returns an error if the registry is misconfigured.
pub async fn validate_canvas_async(
    document: &Document,
    options: ValidationOptions,
    detector: Arc<dyn FaceDetector>,
) -> Result<ValidationReport, ValidatorError> {
    let validator = Validator::builder()
        .rules(Preset::default().rules())
        .options(options)
        .face_detector(detector)
        .build()?;
    Ok(validator.validate_async(document).await)
}

/// Applies the fixes attached to `violations` and re-validates once.
///
/// Every built-in rule can apply its fix, including the required-element
/// placeholders; re-validation uses the recommended rules.
///
/// # Errors
///
/// Returns an error if the registry is misconfigured.
pub fn apply_auto_fixes(
    document: &Document,
    violations: &[Violation],
    options: ValidationOptions,
) -> Result<FixOutcome, ValidatorError> {
    let corrector = Corrector::new(default_validator(options)?).with_fixers(all_rules());
    Ok(corrector.apply(document, violations))
}

/// Picks the best position for a new element of `role`.
#[must_use]
pub fn find_optimal_position(
    role: ElementRole,
    size: Size,
    existing: &[CanvasElement],
    canvas: CanvasSize,
    format: FormatType,
) -> ScoredCandidate {
    LayoutEngine::new(canvas, &ValidationOptions::for_format(format))
        .find_optimal_position(role, size, existing)
}

/// Suggests where text of `size` reads best over the image at `src`.
///
/// Images that fail to load within a few seconds produce the fixed
/// bottom-center placement.
pub async fn suggest_text_placement(
    src: &str,
    size: Size,
    existing: &[CanvasElement],
    canvas: CanvasSize,
    format: FormatType,
) -> TextPlacement {
    let options = ValidationOptions::for_format(format);
    image_grid::suggest_text_placement(src, size, canvas, existing, &options, IMAGE_BUDGET).await
}

/// Re-checks a proposed placement of `element` among `existing`.
#[must_use]
pub fn validate_placement(
    element: &CanvasElement,
    existing: &[CanvasElement],
    canvas: CanvasSize,
    format: FormatType,
) -> PlacementReport {
    LayoutEngine::new(canvas, &ValidationOptions::for_format(format))
        .validate_placement(element, existing)
}
