//! Mechanical application of [`AutoFix`] descriptors.
//!
//! Every function here takes a document by reference and returns a new one;
//! untouched pages stay shared with the input.

use tracing::debug;

use crate::color::best_contrasting_color;
use crate::context::FixContext;
use crate::element::{
    CanvasElement, Document, ElementKind, ElementRole, ElementTags, Shadow, Size, TextStyle,
};
use crate::layout::LayoutEngine;
use crate::types::{AutoFix, Property, PropertyValue, SyntheticKind};

/// Applies `fix` to a copy of `document`.
///
/// Returns `None` when the target no longer exists or the descriptor does
/// not fit the target (e.g. a font size on an image).
#[must_use]
pub fn apply(document: &Document, fix: &AutoFix, ctx: &FixContext) -> Option<Document> {
    let mut next = document.clone();
    let applied = match fix {
        AutoFix::SetProperty {
            element_id,
            property,
            value,
        } => set_property(&mut next, element_id, *property, value),
        AutoFix::Recolor {
            element_id,
            fill,
            drop_shadow,
        } => recolor(&mut next, element_id, fill, *drop_shadow),
        AutoFix::Resize {
            element_id,
            width,
            height,
        } => next.update_element(element_id, |el| {
            el.geometry.width = *width;
            el.geometry.height = *height;
        }),
        AutoFix::Remove { element_id } => next.remove_element(element_id),
        AutoFix::Synthesize { synthetic } => synthesize(&mut next, *synthetic, ctx),
        AutoFix::SetBackground { page_id, color } => next.set_page_background(page_id, color),
    };

    if applied {
        debug!(fix = %fix.describe(), "applied");
        Some(next)
    } else {
        debug!(fix = %fix.describe(), "fix did not apply");
        None
    }
}

fn set_property(doc: &mut Document, id: &str, property: Property, value: &PropertyValue) -> bool {
    let mut fits = false;
    let found = doc.update_element(id, |el| {
        fits = match (property, value) {
            (Property::FontSize, PropertyValue::Number(n)) => match el.text_style_mut() {
                Some(style) => {
                    style.font_size = Some(*n);
                    true
                }
                None => false,
            },
            (Property::X, PropertyValue::Number(n)) => {
                el.geometry.x = *n;
                true
            }
            (Property::Y, PropertyValue::Number(n)) => {
                el.geometry.y = *n;
                true
            }
            (Property::Width, PropertyValue::Number(n)) => {
                el.geometry.width = *n;
                true
            }
            (Property::Height, PropertyValue::Number(n)) => {
                el.geometry.height = *n;
                true
            }
            (Property::Opacity, PropertyValue::Number(n)) => {
                el.geometry.opacity = n.clamp(0.0, 1.0);
                true
            }
            (Property::Fill, PropertyValue::Text(color)) => el.set_fill(color.as_str()),
            _ => false,
        };
    });
    found && fits
}

fn recolor(doc: &mut Document, id: &str, fill: &str, drop_shadow: bool) -> bool {
    let mut fits = false;
    let found = doc.update_element(id, |el| {
        fits = el.set_fill(fill);
        if drop_shadow {
            if let Some(style) = el.text_style_mut() {
                style.shadow = Some(Shadow::legibility());
            }
        }
    });
    found && fits
}

/// Builds the placeholder element for `synthetic`, positioned by the
/// layout engine on the first page.
fn synthesize(doc: &mut Document, synthetic: SyntheticKind, ctx: &FixContext) -> bool {
    let Some(page) = doc.pages.first() else {
        return false;
    };
    let options = ctx.options;
    let canvas = doc.canvas_size;
    let fill = best_contrasting_color(page.background_color());
    let min_font = options.min_font_size();

    let (role, size, kind, tags) = match synthetic {
        SyntheticKind::BrandTag => {
            let font = min_font.max(24.0);
            (
                ElementRole::BrandTag,
                Size::new(canvas.width * 0.4, font * 1.5),
                ElementKind::Text(
                    TextStyle::new(options.brand_tag_text.as_str())
                        .font_size(font)
                        .fill(fill),
                ),
                ElementTags {
                    is_brand_tag: true,
                    ..ElementTags::default()
                },
            )
        }
        SyntheticKind::Headline => {
            let font = min_font.max(48.0);
            (
                ElementRole::Headline,
                Size::new(canvas.width * 0.8, font * 1.4),
                ElementKind::Text(
                    TextStyle::new(options.headline_placeholder.as_str())
                        .font_size(font)
                        .fill(fill),
                ),
                ElementTags {
                    is_headline: true,
                    ..ElementTags::default()
                },
            )
        }
        SyntheticKind::Subheading => {
            let font = min_font.max(28.0);
            (
                ElementRole::Subheading,
                Size::new(canvas.width * 0.7, font * 1.4),
                ElementKind::Text(
                    TextStyle::new(options.subheading_placeholder.as_str())
                        .font_size(font)
                        .fill(fill),
                ),
                ElementTags {
                    is_subheading: true,
                    ..ElementTags::default()
                },
            )
        }
        SyntheticKind::Logo => (
            ElementRole::Logo,
            Size::new(canvas.width * 0.18, canvas.width * 0.09),
            ElementKind::Logo {
                src: options.logo_placeholder_src.clone(),
            },
            ElementTags {
                is_logo: true,
                ..ElementTags::default()
            },
        ),
    };

    let id = synthetic.element_id();
    let engine = LayoutEngine::new(canvas, options);
    let existing = page.iter().filter(|e| e.id != id);
    let spot = engine.find_optimal_position(role, size, existing);

    let element = CanvasElement::new(id, kind)
        .with_rect(spot.x, spot.y, size.width, size.height)
        .with_tags(tags);
    doc.upsert_element(0, element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{CanvasSize, Page};
    use crate::format::ValidationOptions;

    fn doc() -> Document {
        Document::new(CanvasSize::new(1080.0, 1920.0)).with_page(
            Page::new("p1")
                .with_background("#111111")
                .with_element(
                    CanvasElement::text("t1", TextStyle::new("Hello").font_size(12.0))
                        .with_rect(100.0, 50.0, 300.0, 40.0),
                )
                .with_element(CanvasElement::image("i1").with_rect(0.0, 600.0, 200.0, 200.0)),
        )
    }

    fn run(doc: &Document, fix: &AutoFix) -> Option<Document> {
        let options = ValidationOptions::default();
        apply(doc, fix, &FixContext::new(doc.canvas_size, &options))
    }

    #[test]
    fn set_font_size_leaves_original_untouched() {
        let original = doc();
        let fixed = run(
            &original,
            &AutoFix::SetProperty {
                element_id: "t1".into(),
                property: Property::FontSize,
                value: PropertyValue::Number(20.0),
            },
        )
        .unwrap();

        let size = |d: &Document| d.find_element("t1").unwrap().1.text_style().unwrap().font_size;
        assert_eq!(size(&fixed), Some(20.0));
        assert_eq!(size(&original), Some(12.0));
    }

    #[test]
    fn font_size_on_image_does_not_apply() {
        let fix = AutoFix::SetProperty {
            element_id: "i1".into(),
            property: Property::FontSize,
            value: PropertyValue::Number(20.0),
        };
        assert!(run(&doc(), &fix).is_none());
    }

    #[test]
    fn missing_target_does_not_apply() {
        assert!(run(&doc(), &AutoFix::Remove { element_id: "ghost".into() }).is_none());
    }

    #[test]
    fn recolor_adds_shadow() {
        let fixed = run(
            &doc(),
            &AutoFix::Recolor {
                element_id: "t1".into(),
                fill: "#ffffff".into(),
                drop_shadow: true,
            },
        )
        .unwrap();
        let style = fixed.find_element("t1").unwrap().1.text_style().unwrap().clone();
        assert_eq!(style.fill.as_deref(), Some("#ffffff"));
        assert_eq!(style.shadow, Some(Shadow::legibility()));
    }

    #[test]
    fn synthesized_tag_is_legible_and_outside_no_go() {
        let fixed = run(
            &doc(),
            &AutoFix::Synthesize {
                synthetic: SyntheticKind::BrandTag,
            },
        )
        .unwrap();
        let (_, tag) = fixed.find_element("auto-brand-tag").unwrap();
        assert_eq!(tag.role(), ElementRole::BrandTag);
        assert_eq!(tag.fill(), Some("#ffffff"));
        assert!(tag.geometry.y >= 200.0);
        assert!(tag.geometry.y + tag.geometry.height <= 1920.0 - 250.0);

        // applying twice replaces rather than duplicates
        let again = run(
            &fixed,
            &AutoFix::Synthesize {
                synthetic: SyntheticKind::BrandTag,
            },
        )
        .unwrap();
        assert_eq!(again.element_count(), fixed.element_count());
    }

    #[test]
    fn synthesized_subheading_joins_headline() {
        let headline = AutoFix::Synthesize {
            synthetic: SyntheticKind::Headline,
        };
        let subheading = AutoFix::Synthesize {
            synthetic: SyntheticKind::Subheading,
        };
        let with_headline = run(&doc(), &headline).unwrap();
        let fixed = run(&with_headline, &subheading).unwrap();
        assert_eq!(fixed.element_count(), with_headline.element_count() + 1);

        let (_, sub) = fixed.find_element("auto-subheading").unwrap();
        assert_eq!(sub.role(), ElementRole::Subheading);
        assert_eq!(sub.visible_text(), Some("Supporting copy"));
        assert_eq!(sub.text_style().unwrap().font_size, Some(28.0));
        assert_eq!(sub.fill(), Some("#ffffff"));
    }

    #[test]
    fn synthesize_without_pages_does_not_apply() {
        let empty = Document::new(CanvasSize::new(100.0, 100.0));
        let fix = AutoFix::Synthesize {
            synthetic: SyntheticKind::Logo,
        };
        assert!(run(&empty, &fix).is_none());
    }
}
