//! Injected people/face detection capability.
//!
//! Detection is best-effort: every image gets a bounded time budget, and
//! detector errors or timeouts are logged and skipped so the rest of the
//! validation pass always completes.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::element::{CanvasElement, ElementKind, ElementRole};
use crate::types::{RuleKind, Severity, Violation};

/// Errors a detector may report.
#[derive(Debug, Error)]
pub enum DetectorError {
    /// The image could not be loaded.
    #[error("failed to load image: {0}")]
    Image(#[from] crate::imaging::ImageLoadError),

    /// The model failed.
    #[error("detector failed: {0}")]
    Model(String),
}

/// Counts faces in an image source.
#[async_trait]
pub trait FaceDetector: Send + Sync {
    /// Returns the number of faces found in `src`.
    async fn count_faces(&self, src: &str) -> Result<usize, DetectorError>;
}

/// Detector that never finds anyone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFaceDetector;

#[async_trait]
impl FaceDetector for NoopFaceDetector {
    async fn count_faces(&self, _src: &str) -> Result<usize, DetectorError> {
        Ok(0)
    }
}

fn is_photographic(element: &CanvasElement) -> bool {
    matches!(
        element.kind,
        ElementKind::Image { .. } | ElementKind::Sticker { .. }
    ) && !matches!(element.role(), ElementRole::Logo | ElementRole::Background)
}

/// Runs `detector` over every photographic element.
///
/// Produces one warning per element in which people were found.
pub async fn detect_people<'a>(
    elements: impl IntoIterator<Item = &'a CanvasElement>,
    detector: &dyn FaceDetector,
    budget: Duration,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for element in elements.into_iter().filter(|e| is_photographic(e)) {
        let Some(src) = element.src() else {
            continue;
        };
        match tokio::time::timeout(budget, detector.count_faces(src)).await {
            Ok(Ok(0)) => {}
            Ok(Ok(faces)) => {
                debug!(element = %element.id, faces, "people detected");
                violations.push(
                    Violation::new(
                        RuleKind::PeopleDetected,
                        Severity::Warning,
                        format!(
                            "'{}' appears to show {faces} person(s); confirm model releases are in place",
                            element.id
                        ),
                    )
                    .on_element(&element.id),
                );
            }
            Ok(Err(e)) => warn!(element = %element.id, "face detection skipped: {e}"),
            Err(_) => warn!(element = %element.id, ?budget, "face detection timed out"),
        }
    }
    violations
}
