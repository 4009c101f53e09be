//! Multi-criterion scoring of a candidate rectangle.

use tracing::trace;

use crate::element::{CanvasElement, ElementRole};
use crate::geometry::{bounding_box, BoundingBox};
use crate::zones::Zones;

use super::priority::priority_of;
use super::LayoutTuning;

/// Score and explanation for one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionScore {
    /// Score; `f64::NEG_INFINITY` is an absolute veto.
    pub score: f64,
    /// Why the candidate scored the way it did.
    pub reason: String,
}

impl PositionScore {
    fn veto(reason: impl Into<String>) -> Self {
        Self {
            score: f64::NEG_INFINITY,
            reason: reason.into(),
        }
    }

    /// Whether the candidate was vetoed.
    #[must_use]
    pub fn is_vetoed(&self) -> bool {
        self.score == f64::NEG_INFINITY
    }
}

fn lower_region_bonus_applies(role: ElementRole) -> bool {
    matches!(
        role,
        ElementRole::Badge | ElementRole::Sticker | ElementRole::BrandTag
    )
}

/// Scores placing an element of `role` at `rect`.
#[must_use]
pub fn score_position(
    rect: &BoundingBox,
    role: ElementRole,
    existing: &[&CanvasElement],
    zones: &Zones,
    tuning: &LayoutTuning,
) -> PositionScore {
    if zones.intersects_no_go(rect) {
        return PositionScore::veto("intersects a no-go zone");
    }

    let own = priority_of(role);
    let mut score = tuning.base_score;
    let mut notes: Vec<String> = Vec::new();

    for other in existing {
        let other_role = other.role();
        if other_role == ElementRole::Background {
            continue;
        }
        if !rect.overlaps(&bounding_box(other), 0.0) {
            continue;
        }
        let theirs = priority_of(other_role);
        if theirs.rank < own.rank {
            if theirs.penalty.is_infinite() {
                return PositionScore::veto(format!("overlaps {other_role} '{}'", other.id));
            }
            score -= theirs.penalty;
            notes.push(format!("-{} overlaps {other_role} '{}'", theirs.penalty, other.id));
        }
    }

    if let Some(zone) = zones.preferred_for(role) {
        if zone.bounds().contains(rect) {
            score += tuning.subzone_bonus;
            notes.push(format!("+{} inside {}", tuning.subzone_bonus, zone.reason));
        }
    }

    let content = zones.content.bounds();
    if lower_region_bonus_applies(role) && rect.center().y > content.center().y {
        score += tuning.lower_region_bonus;
        notes.push(format!("+{} lower region", tuning.lower_region_bonus));
    }

    let edge_gap = (rect.x1 - content.x1)
        .min(content.x2 - rect.x2)
        .min(rect.y1 - content.y1)
        .min(content.y2 - rect.y2);
    if edge_gap < tuning.edge_distance {
        score -= tuning.edge_penalty;
        notes.push(format!("-{} near content edge", tuning.edge_penalty));
    }

    trace!(score, ?role, "scored candidate");

    let reason = if notes.is_empty() {
        "clear position".to_string()
    } else {
        notes.join(", ")
    };
    PositionScore { score, reason }
}
