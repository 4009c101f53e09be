//! Creative formats and the options that drive a validation pass.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::element::CanvasSize;
use crate::layout::LayoutTuning;
use crate::zones::Zones;

/// Named creative format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatType {
    /// Social media placements.
    #[default]
    Social,
    /// Brand-owned placements.
    Brand,
    /// Double-density checkout screens.
    CheckoutDouble,
    /// Single-density checkout screens.
    CheckoutSingle,
    /// "Say" in-store displays.
    Say,
}

impl FormatType {
    /// All formats.
    pub const ALL: [Self; 5] = [
        Self::Social,
        Self::Brand,
        Self::CheckoutDouble,
        Self::CheckoutSingle,
        Self::Say,
    ];

    /// Kebab-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Social => "social",
            Self::Brand => "brand",
            Self::CheckoutDouble => "checkout-double",
            Self::CheckoutSingle => "checkout-single",
            Self::Say => "say",
        }
    }

    /// Default minimum font size in pixels.
    #[must_use]
    pub fn min_font_size(self) -> f64 {
        match self {
            Self::Social | Self::Brand | Self::CheckoutDouble => 20.0,
            Self::CheckoutSingle => 10.0,
            Self::Say => 12.0,
        }
    }

    /// Packshot density assumed when none is given.
    #[must_use]
    pub fn default_density(self) -> Density {
        match self {
            Self::CheckoutSingle => Density::Single,
            _ => Density::Double,
        }
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format '{0}' (expected one of: social, brand, checkout-double, checkout-single, say)")]
pub struct UnknownFormat(pub String);

impl FromStr for FormatType {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// Screen density governing the packshot clearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    /// 12px clearance.
    Single,
    /// 24px clearance.
    Double,
}

impl Density {
    /// Required gap around packshots, in pixels.
    #[must_use]
    pub fn packshot_gap(self) -> f64 {
        match self {
            Self::Single => 12.0,
            Self::Double => 24.0,
        }
    }
}

/// Safe-zone geometry for a recognized aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafeZoneSpec {
    /// Aspect ratio (width / height) the bands apply to.
    #[serde(default = "default_aspect")]
    pub aspect_ratio: f64,
    /// Allowed deviation from `aspect_ratio`.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Top band thickness at the reference height.
    #[serde(default = "default_top")]
    pub top: f64,
    /// Bottom band thickness at the reference height.
    #[serde(default = "default_bottom")]
    pub bottom: f64,
    /// Canvas height the thicknesses are expressed for.
    #[serde(default = "default_reference_height")]
    pub reference_height: f64,
    /// Clearance added to a suggested position outside a band.
    #[serde(default = "default_margin")]
    pub margin: f64,
}

fn default_aspect() -> f64 {
    9.0 / 16.0
}
fn default_tolerance() -> f64 {
    0.05
}
fn default_top() -> f64 {
    200.0
}
fn default_bottom() -> f64 {
    250.0
}
fn default_reference_height() -> f64 {
    1920.0
}
fn default_margin() -> f64 {
    10.0
}

impl Default for SafeZoneSpec {
    fn default() -> Self {
        Self {
            aspect_ratio: default_aspect(),
            tolerance: default_tolerance(),
            top: default_top(),
            bottom: default_bottom(),
            reference_height: default_reference_height(),
            margin: default_margin(),
        }
    }
}

impl SafeZoneSpec {
    /// Whether a canvas of this size gets no-go bands.
    #[must_use]
    pub fn applies_to(&self, canvas: CanvasSize) -> bool {
        (canvas.aspect_ratio() - self.aspect_ratio).abs() <= self.tolerance
    }

    /// Band thicknesses `(top, bottom)` scaled to the canvas height.
    #[must_use]
    pub fn scaled(&self, canvas: CanvasSize) -> (f64, f64) {
        let factor = if self.reference_height > 0.0 {
            canvas.height / self.reference_height
        } else {
            1.0
        };
        (self.top * factor, self.bottom * factor)
    }
}

/// Options recognized by a validation pass.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Target format.
    pub format: FormatType,
    /// Whether the creative advertises alcohol.
    pub is_alcohol_campaign: bool,
    /// Whether to run the asynchronous people check.
    pub enable_face_detection: bool,
    /// Explicit packshot density; derived from the format when `None`.
    pub density: Option<Density>,
    /// Font size at or above which text counts as large for contrast.
    pub large_text_threshold: f64,
    /// Per-image budget for the people check.
    pub face_detection_timeout: Duration,
    /// Text of a synthesized brand tag.
    pub brand_tag_text: String,
    /// Text of a synthesized headline.
    pub headline_placeholder: String,
    /// Text of a synthesized subheading.
    pub subheading_placeholder: String,
    /// Image source of a synthesized logo.
    pub logo_placeholder_src: Option<String>,
    /// Per-format minimum font overrides.
    pub font_minimums: BTreeMap<FormatType, f64>,
    /// Per-format safe-zone overrides.
    pub safe_zones: BTreeMap<FormatType, SafeZoneSpec>,
    /// Placement scoring heuristics.
    pub layout: LayoutTuning,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            format: FormatType::default(),
            is_alcohol_campaign: false,
            enable_face_detection: false,
            density: None,
            large_text_threshold: 24.0,
            face_detection_timeout: Duration::from_secs(3),
            brand_tag_text: "Available at Tesco".to_string(),
            headline_placeholder: "Your headline here".to_string(),
            subheading_placeholder: "Supporting copy".to_string(),
            logo_placeholder_src: None,
            font_minimums: BTreeMap::new(),
            safe_zones: BTreeMap::new(),
            layout: LayoutTuning::default(),
        }
    }
}

impl ValidationOptions {
    /// Default options for a format.
    #[must_use]
    pub fn for_format(format: FormatType) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Marks the creative as an alcohol campaign.
    #[must_use]
    pub fn alcohol(mut self, enabled: bool) -> Self {
        self.is_alcohol_campaign = enabled;
        self
    }

    /// Enables the people check.
    #[must_use]
    pub fn face_detection(mut self, enabled: bool) -> Self {
        self.enable_face_detection = enabled;
        self
    }

    /// Sets the packshot density.
    #[must_use]
    pub fn density(mut self, density: Density) -> Self {
        self.density = Some(density);
        self
    }

    /// Effective minimum font size for the configured format.
    #[must_use]
    pub fn min_font_size(&self) -> f64 {
        self.font_minimums
            .get(&self.format)
            .copied()
            .unwrap_or_else(|| self.format.min_font_size())
    }

    /// Effective packshot density.
    #[must_use]
    pub fn effective_density(&self) -> Density {
        self.density
            .unwrap_or_else(|| self.format.default_density())
    }

    /// Safe-zone geometry for the configured format.
    #[must_use]
    pub fn safe_zone(&self) -> SafeZoneSpec {
        self.safe_zones
            .get(&self.format)
            .copied()
            .unwrap_or_default()
    }

    /// Computes the zones for a canvas.
    #[must_use]
    pub fn zones(&self, canvas: CanvasSize) -> Zones {
        Zones::compute(canvas, &self.safe_zone())
    }
}
