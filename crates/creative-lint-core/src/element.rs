//! Design document model.
//!
//! A [`Document`] is an immutable snapshot handed over by the editing
//! surface. Pages and elements are shared through [`Arc`], so producing a
//! modified document only clones the page and element that actually change
//! (see [`Document::update_element`]).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl CanvasSize {
    /// Creates a new canvas size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height, or 0 for a degenerate canvas.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        if self.height <= 0.0 {
            0.0
        } else {
            self.width / self.height
        }
    }
}

/// Size of an element to be placed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Common geometric record shared by every element type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            opacity: 1.0,
        }
    }
}

impl Geometry {
    /// Creates a geometry from position and size.
    #[must_use]
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Self::default()
        }
    }
}

/// Drop shadow applied to text.
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    /// Shadow color.
    pub color: String,
    /// Blur radius.
    pub blur: f64,
    /// Horizontal offset.
    pub offset_x: f64,
    /// Vertical offset.
    pub offset_y: f64,
    /// Shadow opacity.
    pub opacity: f64,
}

impl Shadow {
    /// Soft dark shadow used to keep light text legible on dark artwork.
    #[must_use]
    pub fn legibility() -> Self {
        Self {
            color: "#000000".to_string(),
            blur: 4.0,
            offset_x: 2.0,
            offset_y: 2.0,
            opacity: 0.5,
        }
    }
}

/// Typography payload shared by text and button elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyle {
    /// Text content.
    pub text: String,
    /// Font size in pixels, `None` when the editor did not record one.
    pub font_size: Option<f64>,
    /// Font family.
    pub font_family: Option<String>,
    /// Font weight (e.g. "bold", "400").
    pub font_weight: Option<String>,
    /// Horizontal alignment.
    pub align: Option<String>,
    /// Fill color as hex.
    pub fill: Option<String>,
    /// Optional drop shadow.
    pub shadow: Option<Shadow>,
}

impl TextStyle {
    /// Creates a text payload with the given content.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the font size.
    #[must_use]
    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Sets the fill color.
    #[must_use]
    pub fn fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }
}

/// Value tile variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueTileKind {
    /// "New" flash.
    New,
    /// White price tile.
    White,
    /// Loyalty-card price tile, requires an end date.
    Clubcard,
}

impl ValueTileKind {
    /// Wire name of the tile variant.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::White => "white",
            Self::Clubcard => "clubcard",
        }
    }
}

/// Value tile payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTile {
    /// Tile variant.
    pub tile: ValueTileKind,
    /// Displayed price.
    pub price: Option<String>,
    /// Offer end date, expected as `DD/MM`.
    pub end_date: Option<String>,
}

/// Per-type payload of a canvas element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Text block.
    Text(TextStyle),
    /// Raster image.
    Image {
        /// Image source (URL, path or data URI).
        src: Option<String>,
    },
    /// Rectangle or other vector shape.
    Shape {
        /// Fill color.
        fill: Option<String>,
    },
    /// Sticker artwork.
    Sticker {
        /// Image source.
        src: Option<String>,
    },
    /// Brand logo.
    Logo {
        /// Image source.
        src: Option<String>,
    },
    /// Promotional badge.
    Badge {
        /// Badge label.
        text: Option<String>,
        /// Badge fill.
        fill: Option<String>,
    },
    /// Purely decorative vector art.
    Decorative {
        /// Fill color.
        fill: Option<String>,
    },
    /// Retailer value tile.
    ValueTile(ValueTile),
    /// Call-to-action button.
    Button(TextStyle),
}

impl ElementKind {
    /// Wire name of the element type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image { .. } => "image",
            Self::Shape { .. } => "shape",
            Self::Sticker { .. } => "sticker",
            Self::Logo { .. } => "logo",
            Self::Badge { .. } => "badge",
            Self::Decorative { .. } => "decorative",
            Self::ValueTile(_) => "value-tile",
            Self::Button(_) => "button",
        }
    }
}

/// Semantic tags set by the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementTags {
    /// Marked as the brand logo.
    pub is_logo: bool,
    /// Marked as the retailer brand tag ("Available at ...").
    pub is_brand_tag: bool,
    /// Marked as the page background.
    pub is_background: bool,
    /// Marked as a product packshot.
    pub is_packshot: bool,
    /// Marked as a call to action.
    pub is_cta: bool,
    /// Marked as the responsible-drinking logo.
    pub is_drinkaware: bool,
    /// Marked as the headline.
    pub is_headline: bool,
    /// Marked as the subheading.
    pub is_subheading: bool,
    /// Marked as an icon (contrast-checked like text).
    pub is_icon: bool,
    /// Free-form identifier assigned by the editor.
    pub custom_id: Option<String>,
}

/// Semantic role derived from an element's type and tags.
///
/// Rules and the layout engine reason about roles rather than raw types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementRole {
    /// Value tile.
    ValueTile,
    /// Brand logo.
    Logo,
    /// Call to action.
    Cta,
    /// Product packshot.
    Packshot,
    /// Headline text.
    Headline,
    /// Retailer brand tag.
    BrandTag,
    /// Subheading text.
    Subheading,
    /// Body text.
    Text,
    /// Badge.
    Badge,
    /// Sticker.
    Sticker,
    /// Responsible-drinking logo.
    Drinkaware,
    /// Image.
    Image,
    /// Vector shape.
    Shape,
    /// Decorative art.
    Decorative,
    /// Page background.
    Background,
}

impl ElementRole {
    /// All roles in declaration order.
    pub const ALL: [Self; 15] = [
        Self::ValueTile,
        Self::Logo,
        Self::Cta,
        Self::Packshot,
        Self::Headline,
        Self::BrandTag,
        Self::Subheading,
        Self::Text,
        Self::Badge,
        Self::Sticker,
        Self::Drinkaware,
        Self::Image,
        Self::Shape,
        Self::Decorative,
        Self::Background,
    ];

    /// Kebab-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValueTile => "value-tile",
            Self::Logo => "logo",
            Self::Cta => "cta",
            Self::Packshot => "packshot",
            Self::Headline => "headline",
            Self::BrandTag => "brand-tag",
            Self::Subheading => "subheading",
            Self::Text => "text",
            Self::Badge => "badge",
            Self::Sticker => "sticker",
            Self::Drinkaware => "drinkaware",
            Self::Image => "image",
            Self::Shape => "shape",
            Self::Decorative => "decorative",
            Self::Background => "background",
        }
    }

    /// Roles whose overlap with other elements is always reported.
    #[must_use]
    pub fn is_protected(self) -> bool {
        matches!(
            self,
            Self::Logo | Self::Cta | Self::Packshot | Self::ValueTile
        )
    }
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown element type '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for ElementRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        let role = match normalized.as_str() {
            "tag" | "brand-tag" | "tesco-tag" => Self::BrandTag,
            "value-tile" | "valuetile" | "tile" => Self::ValueTile,
            "button" | "cta" => Self::Cta,
            "rect" | "shape" => Self::Shape,
            other => {
                return Self::ALL
                    .into_iter()
                    .find(|r| r.as_str() == other)
                    .ok_or_else(|| UnknownRole(s.to_string()))
            }
        };
        Ok(role)
    }
}

/// A single element on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasElement {
    /// Identifier, unique within the document.
    pub id: String,
    /// Position and size.
    pub geometry: Geometry,
    /// Type-specific payload.
    pub kind: ElementKind,
    /// Semantic tags.
    pub tags: ElementTags,
}

impl CanvasElement {
    /// Creates an element at the origin with zero size.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            geometry: Geometry::default(),
            kind,
            tags: ElementTags::default(),
        }
    }

    /// Creates a text element.
    #[must_use]
    pub fn text(id: impl Into<String>, style: TextStyle) -> Self {
        Self::new(id, ElementKind::Text(style))
    }

    /// Creates an image element.
    #[must_use]
    pub fn image(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Image { src: None })
    }

    /// Sets position and size.
    #[must_use]
    pub fn with_rect(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.geometry.x = x;
        self.geometry.y = y;
        self.geometry.width = width;
        self.geometry.height = height;
        self
    }

    /// Replaces the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: ElementTags) -> Self {
        self.tags = tags;
        self
    }

    /// Derives the semantic role.
    #[must_use]
    pub fn role(&self) -> ElementRole {
        let tags = &self.tags;
        if tags.is_background {
            return ElementRole::Background;
        }
        match &self.kind {
            ElementKind::ValueTile(_) => return ElementRole::ValueTile,
            ElementKind::Button(_) => return ElementRole::Cta,
            _ => {}
        }
        if tags.is_cta {
            ElementRole::Cta
        } else if tags.is_drinkaware {
            ElementRole::Drinkaware
        } else if tags.is_logo {
            ElementRole::Logo
        } else if tags.is_packshot {
            ElementRole::Packshot
        } else if tags.is_brand_tag {
            ElementRole::BrandTag
        } else if tags.is_headline {
            ElementRole::Headline
        } else if tags.is_subheading {
            ElementRole::Subheading
        } else {
            match &self.kind {
                ElementKind::Text(style) if mentions_drinkaware(&style.text) => {
                    ElementRole::Drinkaware
                }
                ElementKind::Text(_) => ElementRole::Text,
                ElementKind::Logo { .. } => ElementRole::Logo,
                ElementKind::Badge { .. } => ElementRole::Badge,
                ElementKind::Sticker { .. } => ElementRole::Sticker,
                ElementKind::Image { .. } => ElementRole::Image,
                ElementKind::Shape { .. } => ElementRole::Shape,
                ElementKind::Decorative { .. } => ElementRole::Decorative,
                ElementKind::ValueTile(_) => ElementRole::ValueTile,
                ElementKind::Button(_) => ElementRole::Cta,
            }
        }
    }

    /// Typography payload for text and button elements.
    #[must_use]
    pub fn text_style(&self) -> Option<&TextStyle> {
        match &self.kind {
            ElementKind::Text(style) | ElementKind::Button(style) => Some(style),
            _ => None,
        }
    }

    /// Mutable typography payload.
    pub fn text_style_mut(&mut self) -> Option<&mut TextStyle> {
        match &mut self.kind {
            ElementKind::Text(style) | ElementKind::Button(style) => Some(style),
            _ => None,
        }
    }

    /// Visible text carried by the element, if any.
    #[must_use]
    pub fn visible_text(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text(style) | ElementKind::Button(style) => Some(style.text.as_str()),
            ElementKind::Badge { text, .. } => text.as_deref(),
            ElementKind::ValueTile(tile) => tile.price.as_deref(),
            _ => None,
        }
    }

    /// Fill color for elements that carry one.
    #[must_use]
    pub fn fill(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text(style) | ElementKind::Button(style) => style.fill.as_deref(),
            ElementKind::Shape { fill }
            | ElementKind::Badge { fill, .. }
            | ElementKind::Decorative { fill } => fill.as_deref(),
            _ => None,
        }
    }

    /// Overwrites the fill color. Returns `false` for element types without a fill.
    pub fn set_fill(&mut self, color: impl Into<String>) -> bool {
        let color = color.into();
        match &mut self.kind {
            ElementKind::Text(style) | ElementKind::Button(style) => style.fill = Some(color),
            ElementKind::Shape { fill }
            | ElementKind::Badge { fill, .. }
            | ElementKind::Decorative { fill } => *fill = Some(color),
            _ => return false,
        }
        true
    }

    /// Image source for image-like elements.
    #[must_use]
    pub fn src(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Image { src } | ElementKind::Sticker { src } | ElementKind::Logo { src } => {
                src.as_deref()
            }
            _ => None,
        }
    }
}

fn mentions_drinkaware(text: &str) -> bool {
    text.to_ascii_lowercase().contains("drinkaware")
}

/// A page of the design.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Page identifier.
    pub id: String,
    /// Background color.
    pub background: Option<String>,
    /// Elements in z-order (first is bottom-most).
    pub elements: Vec<Arc<CanvasElement>>,
}

impl Page {
    /// Background color assumed when a page has none.
    pub const DEFAULT_BACKGROUND: &'static str = "#ffffff";

    /// Creates an empty page.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            background: None,
            elements: Vec::new(),
        }
    }

    /// Sets the background color.
    #[must_use]
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Appends an element.
    #[must_use]
    pub fn with_element(mut self, element: CanvasElement) -> Self {
        self.elements.push(Arc::new(element));
        self
    }

    /// Effective background color used for contrast checks.
    #[must_use]
    pub fn background_color(&self) -> &str {
        self.background
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(Self::DEFAULT_BACKGROUND)
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> impl Iterator<Item = &CanvasElement> {
        self.elements.iter().map(|e| &**e)
    }

    /// Looks up an element by id.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&CanvasElement> {
        self.iter().find(|e| e.id == id)
    }
}

/// The design snapshot validated by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Pages in order.
    pub pages: Vec<Arc<Page>>,
    /// Canvas dimensions shared by every page.
    pub canvas_size: CanvasSize,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new(canvas_size: CanvasSize) -> Self {
        Self {
            pages: Vec::new(),
            canvas_size,
        }
    }

    /// Appends a page.
    #[must_use]
    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(Arc::new(page));
        self
    }

    /// Iterates over `(page, element)` pairs across all pages.
    pub fn elements(&self) -> impl Iterator<Item = (&Page, &CanvasElement)> {
        self.pages
            .iter()
            .flat_map(|page| page.elements.iter().map(move |e| (&**page, &**e)))
    }

    /// Total number of elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.pages.iter().map(|p| p.elements.len()).sum()
    }

    /// Finds the first element with the given id.
    #[must_use]
    pub fn find_element(&self, id: &str) -> Option<(&Page, &CanvasElement)> {
        self.elements().find(|(_, e)| e.id == id)
    }

    fn locate(&self, id: &str) -> Option<(usize, usize)> {
        self.pages.iter().enumerate().find_map(|(pi, page)| {
            page.elements
                .iter()
                .position(|e| e.id == id)
                .map(|ei| (pi, ei))
        })
    }

    /// Applies `f` to the element with the given id.
    ///
    /// Only the affected page and element are cloned; every other page stays
    /// shared with `self`'s previous owners. Returns `false` when the element
    /// does not exist.
    pub fn update_element(&mut self, id: &str, f: impl FnOnce(&mut CanvasElement)) -> bool {
        let Some((pi, ei)) = self.locate(id) else {
            return false;
        };
        let page = Arc::make_mut(&mut self.pages[pi]);
        f(Arc::make_mut(&mut page.elements[ei]));
        true
    }

    /// Removes the element with the given id.
    pub fn remove_element(&mut self, id: &str) -> bool {
        let Some((pi, ei)) = self.locate(id) else {
            return false;
        };
        Arc::make_mut(&mut self.pages[pi]).elements.remove(ei);
        true
    }

    /// Inserts `element` on page `page_index`, replacing an element with the
    /// same id on that page if present.
    pub fn upsert_element(&mut self, page_index: usize, element: CanvasElement) -> bool {
        let Some(slot) = self.pages.get_mut(page_index) else {
            return false;
        };
        let page = Arc::make_mut(slot);
        match page.elements.iter().position(|e| e.id == element.id) {
            Some(pos) => page.elements[pos] = Arc::new(element),
            None => page.elements.push(Arc::new(element)),
        }
        true
    }

    /// Sets the background color of the page with the given id.
    pub fn set_page_background(&mut self, page_id: &str, color: impl Into<String>) -> bool {
        let Some(slot) = self.pages.iter_mut().find(|p| p.id == page_id) else {
            return false;
        };
        Arc::make_mut(slot).background = Some(color.into());
        true
    }
}
