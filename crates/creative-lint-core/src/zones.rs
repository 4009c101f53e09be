//! No-go bands and preferred placement regions.
//!
//! Zones are derived from the canvas size on every call and are never cached,
//! so the same engine can validate canvases of different resolutions.

use serde::Serialize;

use crate::element::{CanvasSize, ElementRole};
use crate::format::SafeZoneSpec;
use crate::geometry::BoundingBox;
use crate::layout::Anchor;

/// Kind of zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneKind {
    /// Nothing may be placed here.
    NoGo,
    /// Area available for content.
    Content,
    /// Preferred headline region.
    Headline,
    /// Preferred subheading region.
    Subheading,
    /// Preferred badge region.
    Badge,
    /// Preferred logo region.
    Logo,
}

/// A rectangular canvas region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Zone {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Zone kind.
    #[serde(rename = "type")]
    pub kind: ZoneKind,
    /// Why the zone exists.
    pub reason: &'static str,
    /// Preferred anchor inside the zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Anchor>,
}

impl Zone {
    fn new(kind: ZoneKind, rect: BoundingBox, reason: &'static str) -> Self {
        Self {
            x: rect.x1,
            y: rect.y1,
            width: rect.width,
            height: rect.height,
            kind,
            reason,
            anchor: None,
        }
    }

    fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Zone rectangle as a bounding box.
    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_rect(self.x, self.y, self.width, self.height)
    }
}

/// Band a box intrudes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Top no-go band.
    Top,
    /// Bottom no-go band.
    Bottom,
}

/// Result of testing a box against the no-go bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intrusion {
    /// Offending band.
    pub band: Band,
    /// Band thickness in pixels.
    pub thickness: f64,
    /// `y` that moves the box clear of the band.
    pub suggested_y: f64,
}

/// All zones of a canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Zones {
    /// Top no-go band, if the aspect ratio has one.
    pub no_go_top: Option<Zone>,
    /// Bottom no-go band, if the aspect ratio has one.
    pub no_go_bottom: Option<Zone>,
    /// Area between the bands.
    pub content: Zone,
    /// Headline region.
    pub headline_zone: Zone,
    /// Subheading region.
    pub subheading_zone: Zone,
    /// Badge region.
    pub badge_zone: Zone,
    /// Logo region.
    pub logo_zone: Zone,
    #[serde(skip)]
    margin: f64,
}

impl Zones {
    /// Computes zones for a canvas.
    #[must_use]
    pub fn compute(canvas: CanvasSize, spec: &SafeZoneSpec) -> Self {
        let (w, h) = (canvas.width, canvas.height);
        let (top, bottom) = if spec.applies_to(canvas) {
            spec.scaled(canvas)
        } else {
            (0.0, 0.0)
        };

        let no_go_top = (top > 0.0).then(|| {
            Zone::new(
                ZoneKind::NoGo,
                BoundingBox::from_rect(0.0, 0.0, w, top),
                "top safe zone",
            )
        });
        let no_go_bottom = (bottom > 0.0).then(|| {
            Zone::new(
                ZoneKind::NoGo,
                BoundingBox::from_rect(0.0, h - bottom, w, bottom),
                "bottom safe zone",
            )
        });

        let content_box = BoundingBox::from_rect(0.0, top, w, (h - top - bottom).max(0.0));
        let (cx, cy, cw, ch) = (
            content_box.x1,
            content_box.y1,
            content_box.width,
            content_box.height,
        );

        let headline_zone = Zone::new(
            ZoneKind::Headline,
            BoundingBox::from_rect(cx + cw * 0.05, cy, cw * 0.9, ch * 0.25),
            "headline region",
        )
        .anchored(Anchor::TopCenter);
        let subheading_zone = Zone::new(
            ZoneKind::Subheading,
            BoundingBox::from_rect(cx + cw * 0.05, cy + ch * 0.25, cw * 0.9, ch * 0.15),
            "subheading region",
        )
        .anchored(Anchor::TopCenter);
        let badge_zone = Zone::new(
            ZoneKind::Badge,
            BoundingBox::from_rect(cx, cy + ch * 0.7, cw, ch * 0.3),
            "badge region",
        )
        .anchored(Anchor::BottomLeft);
        let logo_zone = Zone::new(
            ZoneKind::Logo,
            BoundingBox::from_rect(cx + cw * 0.6, cy + ch * 0.75, cw * 0.4, ch * 0.25),
            "logo region",
        )
        .anchored(Anchor::BottomRight);

        Self {
            no_go_top,
            no_go_bottom,
            content: Zone::new(ZoneKind::Content, content_box, "content area"),
            headline_zone,
            subheading_zone,
            badge_zone,
            logo_zone,
            margin: spec.margin,
        }
    }

    /// Whether the canvas has any no-go band.
    #[must_use]
    pub fn has_safe_zone(&self) -> bool {
        self.no_go_top.is_some() || self.no_go_bottom.is_some()
    }

    /// Iterates over the no-go bands.
    pub fn no_go(&self) -> impl Iterator<Item = &Zone> {
        self.no_go_top.iter().chain(self.no_go_bottom.iter())
    }

    /// Whether `rect` overlaps any no-go band.
    #[must_use]
    pub fn intersects_no_go(&self, rect: &BoundingBox) -> bool {
        self.no_go().any(|z| z.bounds().overlaps(rect, 0.0))
    }

    /// Preferred sub-zone for a role.
    #[must_use]
    pub fn preferred_for(&self, role: ElementRole) -> Option<&Zone> {
        match role {
            ElementRole::Headline => Some(&self.headline_zone),
            ElementRole::Subheading => Some(&self.subheading_zone),
            ElementRole::Badge | ElementRole::Sticker | ElementRole::BrandTag => {
                Some(&self.badge_zone)
            }
            ElementRole::Logo => Some(&self.logo_zone),
            _ => None,
        }
    }

    /// Tests `rect` against the bands and suggests a clear `y`.
    ///
    /// The top band is tested first; a box taller than the content area is
    /// reported against the top band.
    #[must_use]
    pub fn intrusion(&self, rect: &BoundingBox) -> Option<Intrusion> {
        if let Some(top) = &self.no_go_top {
            if rect.y1 < top.y + top.height {
                return Some(Intrusion {
                    band: Band::Top,
                    thickness: top.height,
                    suggested_y: top.y + top.height + self.margin,
                });
            }
        }
        if let Some(bottom) = &self.no_go_bottom {
            if rect.y2 > bottom.y {
                return Some(Intrusion {
                    band: Band::Bottom,
                    thickness: bottom.height,
                    suggested_y: bottom.y - rect.height - self.margin,
                });
            }
        }
        None
    }
}

/// Zones for a canvas of `width` x `height` using the default safe-zone geometry.
#[must_use]
pub fn zones_for(width: f64, height: f64) -> Zones {
    Zones::compute(CanvasSize::new(width, height), &SafeZoneSpec::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_canvas_has_bands() {
        let zones = zones_for(1080.0, 1920.0);
        let top = zones.no_go_top.as_ref().unwrap();
        let bottom = zones.no_go_bottom.as_ref().unwrap();
        assert!((top.height - 200.0).abs() < 1e-9);
        assert!((bottom.y - 1670.0).abs() < 1e-9);
        assert!((zones.content.y - 200.0).abs() < 1e-9);
        assert!((zones.content.height - 1470.0).abs() < 1e-9);
    }

    #[test]
    fn square_canvas_has_no_bands() {
        let zones = zones_for(1080.0, 1080.0);
        assert!(!zones.has_safe_zone());
        assert!((zones.content.height - 1080.0).abs() < 1e-9);
        assert!(zones.intrusion(&BoundingBox::from_rect(0.0, 0.0, 10.0, 10.0)).is_none());
    }

    #[test]
    fn bands_scale_with_resolution() {
        let zones = zones_for(540.0, 960.0);
        assert!((zones.no_go_top.unwrap().height - 100.0).abs() < 1e-9);
    }

    #[test]
    fn intrusion_suggests_clear_position() {
        let zones = zones_for(1080.0, 1920.0);
        let top = zones
            .intrusion(&BoundingBox::from_rect(0.0, 50.0, 100.0, 40.0))
            .unwrap();
        assert_eq!(top.band, Band::Top);
        assert!(top.suggested_y > 200.0);

        let bottom = zones
            .intrusion(&BoundingBox::from_rect(0.0, 1650.0, 100.0, 100.0))
            .unwrap();
        assert_eq!(bottom.band, Band::Bottom);
        assert!(bottom.suggested_y + 100.0 < 1670.0);
    }

    #[test]
    fn sub_zones_sit_inside_content() {
        let zones = zones_for(1080.0, 1920.0);
        let content = zones.content.bounds().inflate(1e-6);
        for zone in [
            &zones.headline_zone,
            &zones.subheading_zone,
            &zones.badge_zone,
            &zones.logo_zone,
        ] {
            assert!(content.contains(&zone.bounds()), "{:?}", zone.kind);
        }
    }
}
