//! Scoring-based placement of new elements.
//!
//! The [`LayoutEngine`] enumerates a fixed, role-specific list of anchors,
//! scores each one against existing elements and zones, and returns the best.
//! It is greedy and candidate-limited: it never searches beyond the declared
//! anchors.

mod anchors;
pub mod density;
pub mod image_grid;
mod placement;
mod priority;
mod scoring;

pub use anchors::{candidates_for, resolve as resolve_anchor, Anchor};
pub use placement::PlacementReport;
pub use priority::{priority_of, Priority};
pub use scoring::{score_position, PositionScore};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::element::{CanvasElement, CanvasSize, ElementRole, Size};
use crate::format::ValidationOptions;
use crate::geometry::BoundingBox;
use crate::zones::Zones;

/// Tunable placement heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutTuning {
    /// Starting score of every candidate.
    pub base_score: f64,
    /// Bonus for lying fully inside the role's preferred sub-zone.
    pub subzone_bonus: f64,
    /// Bonus for badge-like roles in the lower half of the content area.
    pub lower_region_bonus: f64,
    /// Penalty for lying within `edge_distance` of the content edge.
    pub edge_penalty: f64,
    /// Distance from the content edge that triggers `edge_penalty`.
    pub edge_distance: f64,
    /// Anchor inset as a fraction of canvas width.
    pub anchor_padding_ratio: f64,
    /// Gap between a headline and a subheading placed below it.
    pub below_headline_gap: f64,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            base_score: 100.0,
            subzone_bonus: 30.0,
            lower_region_bonus: 10.0,
            edge_penalty: 5.0,
            edge_distance: 20.0,
            anchor_padding_ratio: 0.04,
            below_headline_gap: 20.0,
        }
    }
}

/// A scored placement candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    /// Anchor the candidate was derived from.
    pub anchor: Anchor,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Score; negative infinity is a veto.
    pub score: f64,
    /// Scoring explanation.
    pub reason: String,
}

impl ScoredCandidate {
    /// Whether the candidate was vetoed.
    #[must_use]
    pub fn is_vetoed(&self) -> bool {
        self.score == f64::NEG_INFINITY
    }
}

/// Placement engine bound to one canvas.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    canvas: CanvasSize,
    zones: Zones,
    options: ValidationOptions,
}

impl LayoutEngine {
    /// Creates an engine for a canvas.
    #[must_use]
    pub fn new(canvas: CanvasSize, options: &ValidationOptions) -> Self {
        Self {
            canvas,
            zones: options.zones(canvas),
            options: options.clone(),
        }
    }

    /// Zones of the bound canvas.
    #[must_use]
    pub fn zones(&self) -> &Zones {
        &self.zones
    }

    /// Canvas the engine is bound to.
    #[must_use]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Scores every candidate anchor of `role`, in declaration order.
    ///
    /// Anchors that cannot be resolved (e.g. below a missing headline) are skipped.
    #[must_use]
    pub fn candidates<'a>(
        &self,
        role: ElementRole,
        size: Size,
        existing: impl IntoIterator<Item = &'a CanvasElement>,
    ) -> Vec<ScoredCandidate> {
        let existing: Vec<&CanvasElement> = existing.into_iter().collect();
        let tuning = &self.options.layout;
        candidates_for(role)
            .iter()
            .filter_map(|&anchor| {
                let rect =
                    anchors::resolve(anchor, size, &self.zones, self.canvas, &existing, tuning)?;
                let scored = score_position(&rect, role, &existing, &self.zones, tuning);
                debug!(%anchor, score = scored.score, "candidate");
                Some(ScoredCandidate {
                    anchor,
                    x: rect.x1,
                    y: rect.y1,
                    score: scored.score,
                    reason: scored.reason,
                })
            })
            .collect()
    }

    /// Returns the best candidate for `role`.
    ///
    /// Ties go to the first declared anchor. When every candidate is vetoed
    /// the first one is returned with its `-inf` score so the caller can see
    /// the veto.
    #[must_use]
    pub fn find_optimal_position<'a>(
        &self,
        role: ElementRole,
        size: Size,
        existing: impl IntoIterator<Item = &'a CanvasElement>,
    ) -> ScoredCandidate {
        let candidates = self.candidates(role, size, existing);
        let mut best: Option<ScoredCandidate> = None;
        for candidate in candidates {
            match &best {
                Some(current) if candidate.score <= current.score => {}
                _ => best = Some(candidate),
            }
        }
        best.unwrap_or_else(|| self.fallback(role, size))
    }

    fn fallback(&self, role: ElementRole, size: Size) -> ScoredCandidate {
        let content = self.zones.content.bounds();
        let rect = BoundingBox::from_rect(
            content.x1 + (content.width - size.width) / 2.0,
            content.y1 + (content.height - size.height) / 2.0,
            size.width,
            size.height,
        );
        let scored = score_position(&rect, role, &[], &self.zones, &self.options.layout);
        ScoredCandidate {
            anchor: Anchor::MiddleCenter,
            x: rect.x1,
            y: rect.y1,
            score: scored.score,
            reason: scored.reason,
        }
    }

    /// Re-checks a final placement. See [`PlacementReport`].
    #[must_use]
    pub fn validate_placement<'a>(
        &self,
        element: &CanvasElement,
        existing: impl IntoIterator<Item = &'a CanvasElement>,
    ) -> PlacementReport {
        placement::validate(element, existing, self.canvas, &self.zones, &self.options)
    }
}
