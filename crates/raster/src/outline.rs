//! Polygonal glyph outlines.

use kurbo::{Affine, BezPath, PathEl, Point, Rect, Shape};

use crate::error::{Error, Result};

/// A glyph outline made of closed polygonal contours.
///
/// Coordinates are in font units with y increasing upward. Outlines produced
/// by the tracer contain one axis-aligned rectangle per run of opaque pixels;
/// outlines parsed from path strings may hold arbitrary polygons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphOutline {
    path: BezPath,
}

impl GlyphOutline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing path. Curve segments are rejected.
    pub fn from_path(path: BezPath) -> Result<Self> {
        let has_curves = path
            .elements()
            .iter()
            .any(|el| matches!(el, PathEl::QuadTo(..) | PathEl::CurveTo(..)));
        if has_curves {
            return Err(Error::CurvedPath);
        }
        Ok(Self { path })
    }

    /// Build an outline from rectangles, one closed contour each.
    pub fn from_rects(rects: impl IntoIterator<Item = Rect>) -> Self {
        let mut outline = Self::new();
        for rect in rects {
            outline.push_rect(rect);
        }
        outline
    }

    /// Append a rectangle as a closed contour starting at its bottom-left
    /// corner: bottom-left, bottom-right, top-right, top-left.
    pub fn push_rect(&mut self, rect: Rect) {
        self.push_polygon(&[
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ]);
    }

    /// Append a closed polygon. Fewer than three points are ignored.
    pub fn push_polygon(&mut self, points: &[Point]) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.len() < 2 {
            return;
        }
        self.path.move_to(*first);
        for point in rest {
            self.path.line_to(*point);
        }
        self.path.close_path();
    }

    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Vertex lists of every contour. A closing vertex that repeats the start
    /// point is dropped; contours with fewer than three vertices are skipped.
    pub fn contours(&self) -> Vec<Vec<Point>> {
        let mut contours = Vec::new();
        let mut current: Vec<Point> = Vec::new();

        let mut finish = |points: &mut Vec<Point>| {
            if points.len() > 1 && points.first() == points.last() {
                points.pop();
            }
            if points.len() >= 3 {
                contours.push(std::mem::take(points));
            } else {
                points.clear();
            }
        };

        for el in self.path.elements() {
            match *el {
                PathEl::MoveTo(p) => {
                    finish(&mut current);
                    current.push(p);
                }
                PathEl::LineTo(p) => current.push(p),
                PathEl::ClosePath => finish(&mut current),
                // Rejected on construction.
                PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
            }
        }
        finish(&mut current);

        contours
    }

    pub fn contour_count(&self) -> usize {
        self.contours().len()
    }

    pub fn point_count(&self) -> usize {
        self.contours().iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.contours().is_empty()
    }

    /// Bounding box of all contours, or `None` for an empty outline.
    pub fn bounds(&self) -> Option<Rect> {
        (!self.is_empty()).then(|| self.path.bounding_box())
    }

    /// Whether `point` is inside the outline (non-zero winding).
    pub fn contains(&self, point: Point) -> bool {
        self.path.winding(point) != 0
    }

    /// Scale about the local origin, then translate by `(dx, dy)`.
    pub fn transformed(&self, scale: f64, dx: f64, dy: f64) -> Self {
        let affine = Affine::translate((dx, dy)) * Affine::scale(scale);
        let mut path = self.path.clone();
        path.apply_affine(affine);
        Self { path }
    }

    /// SVG path data describing the outline, e.g. `M0,0 L2,0 L2,1 L0,1 Z`.
    pub fn to_path_string(&self) -> String {
        self.path.to_svg()
    }

    /// Parse SVG path data produced by [`GlyphOutline::to_path_string`] or
    /// any other polygonal path description.
    pub fn from_path_string(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Ok(Self::new());
        }
        Self::from_path(BezPath::from_svg(data)?)
    }
}
