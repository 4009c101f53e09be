//! Coverage of a 3x3 canvas grid by existing elements.

use crate::element::{CanvasElement, CanvasSize, ElementRole};
use crate::geometry::{bounding_box, BoundingBox};

/// Grid resolution along each axis.
pub const GRID: usize = 3;

/// Fraction of each cell covered by elements, row-major.
///
/// Coverage is summed per element and clamped to 1, so stacked elements do
/// not push a cell past "full".
pub type DensityMap = [[f64; GRID]; GRID];

/// Rectangle of grid cell `(row, col)`.
#[must_use]
pub fn cell_rect(canvas: CanvasSize, row: usize, col: usize) -> BoundingBox {
    #[allow(clippy::cast_precision_loss)]
    let n = GRID as f64;
    let (cw, ch) = (canvas.width / n, canvas.height / n);
    #[allow(clippy::cast_precision_loss)]
    let (r, c) = (row as f64, col as f64);
    BoundingBox::from_rect(c * cw, r * ch, cw, ch)
}

/// Computes the density map of `elements` on `canvas`, ignoring backgrounds.
#[must_use]
pub fn density_map<'a>(
    elements: impl IntoIterator<Item = &'a CanvasElement>,
    canvas: CanvasSize,
) -> DensityMap {
    let mut map = [[0.0; GRID]; GRID];
    let boxes: Vec<BoundingBox> = elements
        .into_iter()
        .filter(|e| e.role() != ElementRole::Background)
        .map(bounding_box)
        .collect();

    for (row, cells) in map.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            let rect = cell_rect(canvas, row, col);
            let area = rect.width * rect.height;
            if area <= 0.0 {
                continue;
            }
            let covered: f64 = boxes.iter().map(|b| b.overlap_area(&rect)).sum();
            *cell = (covered / area).min(1.0);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_canvas_has_zero_density() {
        let map = density_map(std::iter::empty(), CanvasSize::new(900.0, 900.0));
        assert!(map.iter().flatten().all(|d| d.abs() < f64::EPSILON));
    }

    #[test]
    fn element_fills_its_cell() {
        let el = CanvasElement::image("i").with_rect(0.0, 0.0, 300.0, 300.0);
        let map = density_map([&el], CanvasSize::new(900.0, 900.0));
        assert!((map[0][0] - 1.0).abs() < 1e-9);
        assert!(map[1][1].abs() < 1e-9);
    }

    #[test]
    fn backgrounds_are_ignored() {
        let mut bg = CanvasElement::image("bg").with_rect(0.0, 0.0, 900.0, 900.0);
        bg.tags.is_background = true;
        let map = density_map([&bg], CanvasSize::new(900.0, 900.0));
        assert!(map.iter().flatten().all(|d| d.abs() < f64::EPSILON));
    }
}
