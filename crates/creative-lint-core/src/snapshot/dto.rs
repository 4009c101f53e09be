//! JSON wire types (DTO layer).
//!
//! These mirror the editor's records: camelCase, every field optional except
//! `id` and `type`. They are converted to the model by the loader and
//! produced back from it for output.

use serde::{Deserialize, Serialize};

/// Raw snapshot of a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDto {
    /// Canvas dimensions.
    pub canvas_size: CanvasSizeDto,
    /// Pages in order.
    #[serde(default)]
    pub pages: Vec<PageDto>,
}

/// Raw canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSizeDto {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

/// Raw page record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto {
    /// Page id; generated from the index when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Background color.
    #[serde(
        default,
        alias = "backgroundColor",
        skip_serializing_if = "Option::is_none"
    )]
    pub background: Option<String>,
    /// Elements in z-order.
    #[serde(default, alias = "children")]
    pub elements: Vec<ElementDto>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Raw element record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDto {
    /// Element id.
    pub id: String,
    /// Element type name (e.g. "text", "image", "value-tile").
    #[serde(rename = "type")]
    pub kind: String,

    /// Left edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Top edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Horizontal scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    /// Vertical scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    /// Opacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    /// Text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Font size in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Font family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font weight, as a name ("bold") or a number (700).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<serde_json::Value>,
    /// Text alignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    /// Fill color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Image source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Shadow color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<String>,
    /// Shadow blur.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_blur: Option<f64>,
    /// Shadow x offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_offset_x: Option<f64>,
    /// Shadow y offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_offset_y: Option<f64>,
    /// Shadow opacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_opacity: Option<f64>,

    /// Brand logo flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_logo: bool,
    /// Retailer brand tag flag.
    #[serde(default, alias = "isTescoTag", skip_serializing_if = "is_false")]
    pub is_brand_tag: bool,
    /// Background flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_background: bool,
    /// Packshot flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_packshot: bool,
    /// Call-to-action flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_cta: bool,
    /// Responsible-drinking logo flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_drinkaware: bool,
    /// Headline flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_headline: bool,
    /// Subheading flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_subheading: bool,
    /// Icon flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_icon: bool,
    /// Editor-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,

    /// Value tile variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_type: Option<String>,
    /// Value tile price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Value tile end date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}
