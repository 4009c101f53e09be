//! Text placement driven by the brightness of a background image.
//!
//! The image is split into a 3x3 grid. The calmest cell (lowest luminance
//! variance, penalized by how crowded it already is) receives the text, and
//! the text color is chosen from the cell's mean brightness. Any failure to
//! load the image falls back to a fixed placement.

use std::time::Duration;

use image::DynamicImage;
use serde::Serialize;
use tracing::{debug, warn};

use crate::color::{BLACK, WHITE};
use crate::element::{CanvasElement, CanvasSize, Size};
use crate::format::ValidationOptions;
use crate::geometry::BoundingBox;
use crate::imaging;

use super::anchors::{self, Anchor};
use super::density::{cell_rect, density_map, GRID};
use super::LayoutEngine;

/// Weight of element coverage relative to luminance variance.
const CROWDING_WEIGHT: f64 = 0.25;

/// Luminance statistics of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellStats {
    /// Grid row.
    pub row: usize,
    /// Grid column.
    pub col: usize,
    /// Mean luminance in `[0, 1]`.
    pub mean: f64,
    /// Luminance variance.
    pub variance: f64,
}

/// Per-cell statistics, row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridAnalysis {
    /// Cells in row-major order.
    pub cells: Vec<CellStats>,
}

/// How a [`TextPlacement`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementSource {
    /// Derived from image analysis.
    Analyzed,
    /// Image unavailable; fixed default used.
    Fallback,
}

/// Suggested position and color for a text element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPlacement {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Suggested text color.
    pub fill: &'static str,
    /// Chosen grid cell.
    pub cell: Option<(usize, usize)>,
    /// Origin of the suggestion.
    pub source: PlacementSource,
}

/// Computes per-cell luminance statistics.
#[must_use]
pub fn analyze(img: &DynamicImage) -> GridAnalysis {
    let luma = img.to_luma8();
    let (w, h) = luma.dimensions();
    let mut cells = Vec::with_capacity(GRID * GRID);

    for row in 0..GRID {
        for col in 0..GRID {
            let x0 = cell_bound(w, col);
            let x1 = cell_bound(w, col + 1);
            let y0 = cell_bound(h, row);
            let y1 = cell_bound(h, row + 1);

            let mut sum = 0.0;
            let mut sum_sq = 0.0;
            let mut count = 0.0;
            for y in y0..y1 {
                for x in x0..x1 {
                    let v = f64::from(luma.get_pixel(x, y).0[0]) / 255.0;
                    sum += v;
                    sum_sq += v * v;
                    count += 1.0;
                }
            }
            let (mean, variance) = if count > 0.0 {
                let mean = sum / count;
                (mean, (sum_sq / count - mean * mean).max(0.0))
            } else {
                (0.0, 0.0)
            };
            cells.push(CellStats {
                row,
                col,
                mean,
                variance,
            });
        }
    }
    GridAnalysis { cells }
}

fn cell_bound(extent: u32, index: usize) -> u32 {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    #[allow(clippy::cast_possible_truncation)]
    let grid = GRID as u32;
    extent.saturating_mul(index) / grid
}

/// Picks the calmest usable cell.
///
/// Cells that do not intersect the content area are skipped.
#[must_use]
pub fn choose_cell<'a>(
    analysis: &GridAnalysis,
    existing: impl IntoIterator<Item = &'a CanvasElement>,
    engine: &LayoutEngine,
) -> Option<CellStats> {
    let canvas = engine.canvas();
    let density = density_map(existing, canvas);
    let content = engine.zones().content.bounds();

    analysis
        .cells
        .iter()
        .filter(|c| cell_rect(canvas, c.row, c.col).overlap_area(&content) > 0.0)
        .map(|c| (c, c.variance + CROWDING_WEIGHT * density[c.row][c.col]))
        .fold(None::<(&CellStats, f64)>, |best, (cell, cost)| match best {
            Some((_, best_cost)) if best_cost <= cost => best,
            _ => Some((cell, cost)),
        })
        .map(|(cell, _)| *cell)
}

fn place_in_cell(cell: &CellStats, size: Size, engine: &LayoutEngine) -> BoundingBox {
    let rect = cell_rect(engine.canvas(), cell.row, cell.col);
    let content = engine.zones().content.bounds();
    let max_x = (content.x2 - size.width).max(content.x1);
    let max_y = (content.y2 - size.height).max(content.y1);
    let x = (rect.center().x - size.width / 2.0).clamp(content.x1, max_x);
    let y = (rect.center().y - size.height / 2.0).clamp(content.y1, max_y);
    BoundingBox::from_rect(x, y, size.width, size.height)
}

/// Fixed placement used when the image cannot be analyzed.
#[must_use]
pub fn default_placement(size: Size, engine: &LayoutEngine, options: &ValidationOptions) -> TextPlacement {
    let rect = anchors::resolve(
        Anchor::BottomCenter,
        size,
        engine.zones(),
        engine.canvas(),
        &[],
        &options.layout,
    )
    .unwrap_or_else(|| BoundingBox::from_rect(0.0, 0.0, size.width, size.height));
    TextPlacement {
        x: rect.x1,
        y: rect.y1,
        fill: BLACK,
        cell: None,
        source: PlacementSource::Fallback,
    }
}

/// Places text on top of the image at `src`.
///
/// The image is loaded under `budget`; timeouts and load errors are logged
/// and produce [`default_placement`].
pub async fn suggest_text_placement(
    src: &str,
    size: Size,
    canvas: CanvasSize,
    existing: &[CanvasElement],
    options: &ValidationOptions,
    budget: Duration,
) -> TextPlacement {
    let engine = LayoutEngine::new(canvas, options);
    let img = match imaging::load_with_timeout(src, budget).await {
        Ok(img) => img,
        Err(e) => {
            warn!("image analysis unavailable, using default placement: {e}");
            return default_placement(size, &engine, options);
        }
    };

    let analysis = analyze(&img);
    let Some(cell) = choose_cell(&analysis, existing, &engine) else {
        return default_placement(size, &engine, options);
    };
    debug!(row = cell.row, col = cell.col, variance = cell.variance, "chose calm cell");

    let rect = place_in_cell(&cell, size, &engine);
    TextPlacement {
        x: rect.x1,
        y: rect.y1,
        fill: if cell.mean > 0.5 { BLACK } else { WHITE },
        cell: Some((cell.row, cell.col)),
        source: PlacementSource::Analyzed,
    }
}
