//! Named candidate positions and their pixel rectangles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::{CanvasElement, CanvasSize, ElementRole, Size};
use crate::geometry::{bounding_box, BoundingBox};
use crate::zones::Zones;

use super::LayoutTuning;

/// Named candidate position inside the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    /// Top-left corner.
    TopLeft,
    /// Top edge, centered.
    TopCenter,
    /// Top-right corner.
    TopRight,
    /// Left edge, vertically centered.
    MiddleLeft,
    /// Center of the content area.
    MiddleCenter,
    /// Right edge, vertically centered.
    MiddleRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom edge, centered.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
    /// Centered just below the existing headline.
    BelowHeadline,
}

impl Anchor {
    /// The nine grid anchors.
    pub const GRID: [Self; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::MiddleLeft,
        Self::MiddleCenter,
        Self::MiddleRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// Kebab-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::MiddleLeft => "middle-left",
            Self::MiddleCenter => "middle-center",
            Self::MiddleRight => "middle-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
            Self::BelowHeadline => "below-headline",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate anchors for a role, in preference order.
#[must_use]
pub fn candidates_for(role: ElementRole) -> &'static [Anchor] {
    use Anchor::{
        BelowHeadline, BottomCenter, BottomLeft, BottomRight, MiddleCenter, MiddleLeft,
        MiddleRight, TopCenter, TopLeft, TopRight,
    };
    match role {
        ElementRole::Badge => &[BottomLeft, BottomRight, MiddleLeft, MiddleRight, TopLeft],
        ElementRole::Sticker => &[BottomRight, BottomLeft, TopRight, TopLeft, MiddleRight],
        ElementRole::Headline => &[TopCenter, MiddleCenter, BottomCenter],
        ElementRole::Subheading => &[BelowHeadline, TopCenter, MiddleCenter],
        ElementRole::Logo => &[BottomRight, TopRight, BottomLeft, TopLeft],
        ElementRole::BrandTag => &[BottomCenter, BottomLeft, BottomRight],
        ElementRole::ValueTile => &[TopRight, BottomRight],
        _ => &Anchor::GRID,
    }
}

/// Pixel rectangle of `anchor` for an element of `size`.
///
/// Returns `None` for [`Anchor::BelowHeadline`] when no headline exists.
#[must_use]
pub fn resolve(
    anchor: Anchor,
    size: Size,
    zones: &Zones,
    canvas: CanvasSize,
    existing: &[&CanvasElement],
    tuning: &LayoutTuning,
) -> Option<BoundingBox> {
    let content = zones.content.bounds();
    let pad = tuning.anchor_padding_ratio * canvas.width;

    let left = content.x1 + pad;
    let center_x = content.x1 + (content.width - size.width) / 2.0;
    let right = content.x2 - size.width - pad;
    let top = content.y1 + pad;
    let middle = content.y1 + (content.height - size.height) / 2.0;
    let bottom = content.y2 - size.height - pad;

    let (x, y) = match anchor {
        Anchor::TopLeft => (left, top),
        Anchor::TopCenter => (center_x, top),
        Anchor::TopRight => (right, top),
        Anchor::MiddleLeft => (left, middle),
        Anchor::MiddleCenter => (center_x, middle),
        Anchor::MiddleRight => (right, middle),
        Anchor::BottomLeft => (left, bottom),
        Anchor::BottomCenter => (center_x, bottom),
        Anchor::BottomRight => (right, bottom),
        Anchor::BelowHeadline => {
            let headline = existing
                .iter()
                .find(|e| e.role() == ElementRole::Headline)?;
            (center_x, bounding_box(headline).y2 + tuning.below_headline_gap)
        }
    };
    Some(BoundingBox::from_rect(x, y, size.width, size.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementTags, TextStyle};
    use crate::zones::zones_for;

    #[test]
    fn badge_candidates_start_bottom_left() {
        assert_eq!(
            candidates_for(ElementRole::Badge),
            &[
                Anchor::BottomLeft,
                Anchor::BottomRight,
                Anchor::MiddleLeft,
                Anchor::MiddleRight,
                Anchor::TopLeft
            ]
        );
    }

    #[test]
    fn corners_respect_padding_and_content() {
        let canvas = CanvasSize::new(1080.0, 1920.0);
        let zones = zones_for(1080.0, 1920.0);
        let tuning = LayoutTuning::default();
        let size = Size::new(100.0, 50.0);
        let rect = resolve(Anchor::BottomRight, size, &zones, canvas, &[], &tuning).unwrap();
        let pad = 0.04 * 1080.0;
        assert!((rect.x2 - (1080.0 - pad)).abs() < 1e-9);
        assert!((rect.y2 - (1670.0 - pad)).abs() < 1e-9);

        let top = resolve(Anchor::TopLeft, size, &zones, canvas, &[], &tuning).unwrap();
        assert!((top.y1 - (200.0 + pad)).abs() < 1e-9);
    }

    #[test]
    fn below_headline_needs_a_headline() {
        let canvas = CanvasSize::new(1080.0, 1080.0);
        let zones = zones_for(1080.0, 1080.0);
        let tuning = LayoutTuning::default();
        let size = Size::new(400.0, 40.0);
        assert!(resolve(Anchor::BelowHeadline, size, &zones, canvas, &[], &tuning).is_none());

        let headline = CanvasElement::text("h", TextStyle::new("Big news"))
            .with_rect(100.0, 100.0, 800.0, 120.0)
            .with_tags(ElementTags {
                is_headline: true,
                ..ElementTags::default()
            });
        let rect =
            resolve(Anchor::BelowHeadline, size, &zones, canvas, &[&headline], &tuning).unwrap();
        assert!((rect.y1 - 240.0).abs() < 1e-9);
    }
}
