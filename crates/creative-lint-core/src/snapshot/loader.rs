//! DTO → model conversion with validation, and back.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;

use crate::element::{
    CanvasElement, CanvasSize, Document, ElementKind, ElementTags, Geometry, Page, Shadow,
    TextStyle, ValueTile, ValueTileKind,
};

use super::dto::{CanvasSizeDto, DocumentDto, ElementDto, PageDto};

/// Field-level problems found in a snapshot.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Id is empty or whitespace.
    #[error("id must not be empty")]
    EmptyId,

    /// Id was already used by another element.
    #[error("duplicate element id `{0}`")]
    DuplicateId(String),

    /// Value tile variant is not recognized.
    #[error("unknown tile type `{0}`, expected: new, white, clubcard")]
    UnknownTileType(String),

    /// Number is NaN or infinite.
    #[error("number must be finite, got {0}")]
    NonFinite(f64),

    /// Canvas dimension is not positive.
    #[error("canvas dimensions must be positive, got {0}")]
    NonPositive(f64),
}

/// Errors during DTO → model conversion.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A field-level validation error.
    #[error("{context}: {source}")]
    Validation {
        /// Where the error occurred (e.g., "pages[0].elements[2].fontSize").
        context: String,
        /// The underlying model error.
        source: ModelError,
    },
}

impl LoadError {
    fn at(context: impl Into<String>, source: ModelError) -> Self {
        Self::Validation {
            context: context.into(),
            source,
        }
    }

    /// Path of the offending field.
    #[must_use]
    pub fn context(&self) -> &str {
        match self {
            Self::Validation { context, .. } => context,
        }
    }
}

fn finite(value: Option<f64>, context: &str, field: &str) -> Result<Option<f64>, LoadError> {
    match value {
        Some(v) if !v.is_finite() => Err(LoadError::at(
            format!("{context}.{field}"),
            ModelError::NonFinite(v),
        )),
        other => Ok(other),
    }
}

/// Converts a `DocumentDto` to a validated [`Document`].
///
/// Element ids must be unique across the whole document.
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: DocumentDto) -> Result<Document, LoadError> {
    let canvas = convert_canvas(dto.canvas_size)?;
    let mut seen = HashSet::new();
    let pages = dto
        .pages
        .into_iter()
        .enumerate()
        .map(|(i, p)| convert_page(p, i, &mut seen).map(Arc::new))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Document {
        pages,
        canvas_size: canvas,
    })
}

fn convert_canvas(dto: CanvasSizeDto) -> Result<CanvasSize, LoadError> {
    for (field, v) in [("width", dto.width), ("height", dto.height)] {
        let context = format!("canvasSize.{field}");
        if !v.is_finite() {
            return Err(LoadError::at(context, ModelError::NonFinite(v)));
        }
        if v <= 0.0 {
            return Err(LoadError::at(context, ModelError::NonPositive(v)));
        }
    }
    Ok(CanvasSize::new(dto.width, dto.height))
}

fn convert_page(dto: PageDto, index: usize, seen: &mut HashSet<String>) -> Result<Page, LoadError> {
    let ctx = format!("pages[{index}]");
    let id = match dto.id {
        Some(id) if id.trim().is_empty() => {
            return Err(LoadError::at(format!("{ctx}.id"), ModelError::EmptyId))
        }
        Some(id) => id,
        None => format!("page-{}", index + 1),
    };

    let elements = dto
        .elements
        .into_iter()
        .enumerate()
        .map(|(j, e)| {
            let el_ctx = format!("{ctx}.elements[{j}]");
            let element = convert_element(e, &el_ctx)?;
            if !seen.insert(element.id.clone()) {
                return Err(LoadError::at(
                    format!("{el_ctx}.id"),
                    ModelError::DuplicateId(element.id),
                ));
            }
            Ok(Arc::new(element))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Page {
        id,
        background: dto.background.filter(|c| !c.trim().is_empty()),
        elements,
    })
}

fn convert_element(dto: ElementDto, ctx: &str) -> Result<CanvasElement, LoadError> {
    if dto.id.trim().is_empty() {
        return Err(LoadError::at(format!("{ctx}.id"), ModelError::EmptyId));
    }

    let defaults = Geometry::default();
    let geometry = Geometry {
        x: finite(dto.x, ctx, "x")?.unwrap_or(defaults.x),
        y: finite(dto.y, ctx, "y")?.unwrap_or(defaults.y),
        width: finite(dto.width, ctx, "width")?.unwrap_or(defaults.width),
        height: finite(dto.height, ctx, "height")?.unwrap_or(defaults.height),
        rotation: finite(dto.rotation, ctx, "rotation")?.unwrap_or(defaults.rotation),
        scale_x: finite(dto.scale_x, ctx, "scaleX")?.unwrap_or(defaults.scale_x),
        scale_y: finite(dto.scale_y, ctx, "scaleY")?.unwrap_or(defaults.scale_y),
        opacity: finite(dto.opacity, ctx, "opacity")?.unwrap_or(defaults.opacity),
    };

    let kind = match dto.kind.as_str() {
        "text" | "textbox" => ElementKind::Text(text_style(&dto, ctx)?),
        "button" | "cta" => ElementKind::Button(text_style(&dto, ctx)?),
        "image" => ElementKind::Image {
            src: dto.src.clone(),
        },
        "shape" | "rect" | "circle" => ElementKind::Shape {
            fill: dto.fill.clone(),
        },
        "sticker" => ElementKind::Sticker {
            src: dto.src.clone(),
        },
        "logo" => ElementKind::Logo {
            src: dto.src.clone(),
        },
        "badge" => ElementKind::Badge {
            text: dto.text.clone(),
            fill: dto.fill.clone(),
        },
        "decorative" => ElementKind::Decorative {
            fill: dto.fill.clone(),
        },
        "value-tile" | "valueTile" | "value_tile" => ElementKind::ValueTile(ValueTile {
            tile: tile_kind(dto.tile_type.as_deref(), ctx)?,
            price: dto.price.clone(),
            end_date: dto.end_date.clone(),
        }),
        other => {
            warn!("{ctx}.type: unknown element type `{other}`, treating as decorative");
            ElementKind::Decorative {
                fill: dto.fill.clone(),
            }
        }
    };

    Ok(CanvasElement {
        tags: ElementTags {
            is_logo: dto.is_logo,
            is_brand_tag: dto.is_brand_tag,
            is_background: dto.is_background,
            is_packshot: dto.is_packshot,
            is_cta: dto.is_cta,
            is_drinkaware: dto.is_drinkaware,
            is_headline: dto.is_headline,
            is_subheading: dto.is_subheading,
            is_icon: dto.is_icon,
            custom_id: dto.custom_id,
        },
        id: dto.id,
        geometry,
        kind,
    })
}

fn text_style(dto: &ElementDto, ctx: &str) -> Result<TextStyle, LoadError> {
    let shadow = match &dto.shadow_color {
        Some(color) => {
            let base = Shadow::legibility();
            Some(Shadow {
                color: color.clone(),
                blur: finite(dto.shadow_blur, ctx, "shadowBlur")?.unwrap_or(base.blur),
                offset_x: finite(dto.shadow_offset_x, ctx, "shadowOffsetX")?
                    .unwrap_or(base.offset_x),
                offset_y: finite(dto.shadow_offset_y, ctx, "shadowOffsetY")?
                    .unwrap_or(base.offset_y),
                opacity: finite(dto.shadow_opacity, ctx, "shadowOpacity")?
                    .unwrap_or(base.opacity),
            })
        }
        None => None,
    };

    Ok(TextStyle {
        text: dto.text.clone().unwrap_or_default(),
        font_size: finite(dto.font_size, ctx, "fontSize")?,
        font_family: dto.font_family.clone(),
        font_weight: dto.font_weight.as_ref().and_then(|w| match w {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }),
        align: dto.align.clone(),
        fill: dto.fill.clone(),
        shadow,
    })
}

fn tile_kind(value: Option<&str>, ctx: &str) -> Result<ValueTileKind, LoadError> {
    match value.map(str::to_ascii_lowercase).as_deref() {
        None | Some("white") => Ok(ValueTileKind::White),
        Some("new") => Ok(ValueTileKind::New),
        Some("clubcard") => Ok(ValueTileKind::Clubcard),
        Some(_) => Err(LoadError::at(
            format!("{ctx}.tileType"),
            ModelError::UnknownTileType(value.unwrap_or_default().to_string()),
        )),
    }
}

/// Converts a [`Document`] back to its wire form.
#[must_use]
pub fn to_dto(document: &Document) -> DocumentDto {
    DocumentDto {
        canvas_size: CanvasSizeDto {
            width: document.canvas_size.width,
            height: document.canvas_size.height,
        },
        pages: document
            .pages
            .iter()
            .map(|page| PageDto {
                id: Some(page.id.clone()),
                background: page.background.clone(),
                elements: page.iter().map(element_to_dto).collect(),
            })
            .collect(),
    }
}

fn element_to_dto(element: &CanvasElement) -> ElementDto {
    let g = &element.geometry;
    let t = &element.tags;
    let mut dto = ElementDto {
        id: element.id.clone(),
        kind: element.kind.type_name().to_string(),
        x: Some(g.x),
        y: Some(g.y),
        width: Some(g.width),
        height: Some(g.height),
        rotation: Some(g.rotation).filter(|r| r.abs() > f64::EPSILON),
        scale_x: Some(g.scale_x).filter(|s| (*s - 1.0).abs() > f64::EPSILON),
        scale_y: Some(g.scale_y).filter(|s| (*s - 1.0).abs() > f64::EPSILON),
        opacity: Some(g.opacity).filter(|o| (*o - 1.0).abs() > f64::EPSILON),
        is_logo: t.is_logo,
        is_brand_tag: t.is_brand_tag,
        is_background: t.is_background,
        is_packshot: t.is_packshot,
        is_cta: t.is_cta,
        is_drinkaware: t.is_drinkaware,
        is_headline: t.is_headline,
        is_subheading: t.is_subheading,
        is_icon: t.is_icon,
        custom_id: t.custom_id.clone(),
        ..ElementDto::default()
    };

    match &element.kind {
        ElementKind::Text(style) | ElementKind::Button(style) => {
            dto.text = Some(style.text.clone());
            dto.font_size = style.font_size;
            dto.font_family = style.font_family.clone();
            dto.font_weight = style.font_weight.clone().map(serde_json::Value::String);
            dto.align = style.align.clone();
            dto.fill = style.fill.clone();
            if let Some(shadow) = &style.shadow {
                dto.shadow_color = Some(shadow.color.clone());
                dto.shadow_blur = Some(shadow.blur);
                dto.shadow_offset_x = Some(shadow.offset_x);
                dto.shadow_offset_y = Some(shadow.offset_y);
                dto.shadow_opacity = Some(shadow.opacity);
            }
        }
        ElementKind::Image { src } | ElementKind::Sticker { src } | ElementKind::Logo { src } => {
            dto.src = src.clone();
        }
        ElementKind::Shape { fill } | ElementKind::Decorative { fill } => dto.fill = fill.clone(),
        ElementKind::Badge { text, fill } => {
            dto.text = text.clone();
            dto.fill = fill.clone();
        }
        ElementKind::ValueTile(tile) => {
            dto.tile_type = Some(tile.tile.as_str().to_string());
            dto.price = tile.price.clone();
            dto.end_date = tile.end_date.clone();
        }
    }
    dto
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementRole;

    fn parse_and_load(json: &str) -> Result<Document, LoadError> {
        let dto: DocumentDto = serde_json::from_str(json).unwrap();
        load(dto)
    }

    #[test]
    fn loads_minimal_document_with_defaults() {
        let doc = parse_and_load(
            r#"{
                "canvasSize": {"width": 1080, "height": 1920},
                "pages": [{"children": [
                    {"id": "t1", "type": "text", "text": "Hi", "fontSize": 24},
                    {"id": "tag", "type": "text", "text": "Available at Tesco", "isTescoTag": true},
                    {"id": "v", "type": "valueTile", "tileType": "Clubcard", "endDate": "01/02"}
                ]}]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.pages[0].id, "page-1");
        let (_, t1) = doc.find_element("t1").unwrap();
        assert!((t1.geometry.opacity - 1.0).abs() < f64::EPSILON);
        assert!((t1.geometry.scale_x - 1.0).abs() < f64::EPSILON);
        assert_eq!(t1.text_style().unwrap().font_size, Some(24.0));
        assert_eq!(doc.find_element("tag").unwrap().1.role(), ElementRole::BrandTag);
        assert!(matches!(
            &doc.find_element("v").unwrap().1.kind,
            ElementKind::ValueTile(ValueTile { tile: ValueTileKind::Clubcard, .. })
        ));
    }

    #[test]
    fn unknown_type_loads_as_decorative() {
        let doc = parse_and_load(
            r#"{"canvasSize": {"width": 10, "height": 10},
                "pages": [{"id": "p", "elements": [
                    {"id": "a", "type": "image"},
                    {"id": "b", "type": "video", "x": 2, "width": 5, "height": 5}
                ]}]}"#,
        )
        .unwrap();
        assert_eq!(doc.element_count(), 2);
        let (_, video) = doc.find_element("b").unwrap();
        assert!(matches!(video.kind, ElementKind::Decorative { fill: None }));
        assert!((video.geometry.x - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_duplicate_ids_across_pages() {
        let err = parse_and_load(
            r#"{"canvasSize": {"width": 10, "height": 10},
                "pages": [
                    {"elements": [{"id": "a", "type": "image"}]},
                    {"elements": [{"id": "a", "type": "image"}]}
                ]}"#,
        )
        .unwrap_err();
        assert_eq!(err.context(), "pages[1].elements[0].id");
    }

    #[test]
    fn rejects_empty_id_and_bad_canvas() {
        let err = parse_and_load(
            r#"{"canvasSize": {"width": 10, "height": 10},
                "pages": [{"elements": [{"id": " ", "type": "image"}]}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.context(), "pages[0].elements[0].id");

        let err = parse_and_load(r#"{"canvasSize": {"width": 0, "height": 10}}"#).unwrap_err();
        assert_eq!(err.context(), "canvasSize.width");
    }

    #[test]
    fn rejects_non_finite_numbers() {
        let dto = DocumentDto {
            canvas_size: CanvasSizeDto {
                width: 100.0,
                height: 100.0,
            },
            pages: vec![PageDto {
                elements: vec![ElementDto {
                    id: "t".into(),
                    kind: "text".into(),
                    font_size: Some(f64::NAN),
                    ..ElementDto::default()
                }],
                ..PageDto::default()
            }],
        };
        let err = load(dto).unwrap_err();
        assert_eq!(err.context(), "pages[0].elements[0].fontSize");
    }

    #[test]
    fn model_converts_back_to_wire_form() {
        let json = r##"{"canvasSize": {"width": 1080, "height": 1080},
            "pages": [{"id": "p1", "background": "#000000", "elements": [
                {"id": "t", "type": "text", "text": "Hi", "fontSize": 30, "fill": "#ffffff",
                 "x": 10, "y": 20, "width": 100, "height": 40, "isHeadline": true}
            ]}]}"##;
        let doc = parse_and_load(json).unwrap();
        let dto = to_dto(&doc);
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["pages"][0]["elements"][0]["isHeadline"], true);
        assert_eq!(value["pages"][0]["elements"][0]["fontSize"], 30.0);
        assert!(value["pages"][0]["elements"][0].get("isLogo").is_none());
        assert_eq!(load(dto).unwrap(), doc);
    }
}
