//! Bounding-box primitives over rectangle-shaped elements.

use crate::element::CanvasElement;

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Left edge.
    pub x1: f64,
    /// Top edge.
    pub y1: f64,
    /// Right edge.
    pub x2: f64,
    /// Bottom edge.
    pub y2: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl BoundingBox {
    /// Builds a box from its top-left corner and size.
    #[must_use]
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
            width,
            height,
        }
    }

    /// Grows the box by `padding` on every side.
    #[must_use]
    pub fn inflate(&self, padding: f64) -> Self {
        Self::from_rect(
            self.x1 - padding,
            self.y1 - padding,
            self.width + 2.0 * padding,
            self.height + 2.0 * padding,
        )
    }

    /// Strict overlap test; boxes sharing only an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self, padding: f64) -> bool {
        let a = if padding == 0.0 {
            *self
        } else {
            self.inflate(padding)
        };
        a.x1 < other.x2 && a.x2 > other.x1 && a.y1 < other.y2 && a.y2 > other.y1
    }

    /// Area of the intersection, 0 when disjoint.
    #[must_use]
    pub fn overlap_area(&self, other: &Self) -> f64 {
        let w = self.x2.min(other.x2) - self.x1.max(other.x1);
        let h = self.y2.min(other.y2) - self.y1.max(other.y1);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }

    /// Minimum separation between two boxes.
    ///
    /// Returns `-1.0` when the boxes overlap, the orthogonal gap when they
    /// line up along one axis, and the corner-to-corner distance otherwise.
    #[must_use]
    pub fn min_distance(&self, other: &Self) -> f64 {
        if self.overlaps(other, 0.0) {
            return -1.0;
        }
        let dx = (other.x1 - self.x2).max(self.x1 - other.x2).max(0.0);
        let dy = (other.y1 - self.y2).max(self.y1 - other.y2).max(0.0);
        if dx == 0.0 {
            dy
        } else if dy == 0.0 {
            dx
        } else {
            dx.hypot(dy)
        }
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point {
            x: self.x1 + self.width / 2.0,
            y: self.y1 + self.height / 2.0,
        }
    }

    /// Whether `other` lies entirely inside this box.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.x1 >= self.x1 && other.y1 >= self.y1 && other.x2 <= self.x2 && other.y2 <= self.y2
    }
}

/// Bounding box of an element from its `x`, `y`, `width` and `height`.
#[must_use]
pub fn bounding_box(element: &CanvasElement) -> BoundingBox {
    let g = &element.geometry;
    BoundingBox::from_rect(g.x, g.y, g.width, g.height)
}

/// See [`BoundingBox::overlaps`].
#[must_use]
pub fn overlaps(a: &BoundingBox, b: &BoundingBox, padding: f64) -> bool {
    a.overlaps(b, padding)
}

/// See [`BoundingBox::overlap_area`].
#[must_use]
pub fn overlap_area(a: &BoundingBox, b: &BoundingBox) -> f64 {
    a.overlap_area(b)
}

/// See [`BoundingBox::min_distance`].
#[must_use]
pub fn min_distance(a: &BoundingBox, b: &BoundingBox) -> f64 {
    a.min_distance(b)
}

/// Center of an element's bounding box.
#[must_use]
pub fn center(element: &CanvasElement) -> Point {
    bounding_box(element).center()
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p2.x - p1.x).hypot(p2.y - p1.y)
}
