// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrilateral hit polygons and horizontal ray casting.

use kurbo::{Affine, Line, Point, Rect, Vec2};

/// Four corners of a (possibly rotated or skewed) rectangle.
///
/// Corners are stored in drawing order `tl → tr → br → bl`, where the names
/// refer to the shape's own, untransformed frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Quad {
    /// Top-left corner.
    pub tl: Point,
    /// Top-right corner.
    pub tr: Point,
    /// Bottom-right corner.
    pub br: Point,
    /// Bottom-left corner.
    pub bl: Point,
}

impl Quad {
    /// Creates a quad from its corners in `tl, tr, br, bl` order.
    #[must_use]
    pub const fn new(tl: Point, tr: Point, br: Point, bl: Point) -> Self {
        Self { tl, tr, br, bl }
    }

    /// The corners of an axis-aligned rectangle.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        )
    }

    /// Corners as an array in `tl, tr, br, bl` order.
    #[must_use]
    pub const fn points(&self) -> [Point; 4] {
        [self.tl, self.tr, self.br, self.bl]
    }

    /// The four edges, each paired with the next corner clockwise.
    #[must_use]
    pub fn edges(&self) -> [Line; 4] {
        [
            Line::new(self.tl, self.tr),
            Line::new(self.tr, self.br),
            Line::new(self.br, self.bl),
            Line::new(self.bl, self.tl),
        ]
    }

    /// Applies `t` to every corner.
    #[must_use]
    pub fn transform(&self, t: Affine) -> Self {
        Self::new(t * self.tl, t * self.tr, t * self.br, t * self.bl)
    }

    /// Offsets every corner by `delta`.
    #[must_use]
    pub fn translate(&self, delta: Vec2) -> Self {
        Self::new(
            self.tl + delta,
            self.tr + delta,
            self.br + delta,
            self.bl + delta,
        )
    }

    /// Axis-aligned bounds of the corners.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        Rect::from_points(self.tl, self.br)
            .union_pt(self.tr)
            .union_pt(self.bl)
    }

    /// Whether `pt` is inside, by an odd number of ray crossings.
    #[must_use]
    pub fn contains_point(&self, pt: Point) -> bool {
        find_cross_points(pt, self) % 2 == 1
    }

    /// Whether every corner lies inside `rect` (edges inclusive).
    #[must_use]
    pub fn is_within_rect(&self, rect: Rect) -> bool {
        self.points().iter().all(|p| {
            p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
        })
    }

    /// Whether any edge of `self` crosses an edge of `rect`.
    ///
    /// Containment without crossing is not an intersection here; combine with
    /// [`contains_point`](Self::contains_point) and
    /// [`is_within_rect`](Self::is_within_rect) for overlap tests.
    #[must_use]
    pub fn intersects_rect_edges(&self, rect: Rect) -> bool {
        let other = Self::from_rect(rect).edges();
        self.edges()
            .iter()
            .any(|a| other.iter().any(|b| segments_intersect(*a, *b)))
    }
}

/// Proper or touching intersection between two segments.
fn segments_intersect(a: Line, b: Line) -> bool {
    let r = a.p1 - a.p0;
    let s = b.p1 - b.p0;
    let denom = r.cross(s);
    if denom == 0.0 {
        return false;
    }
    let qp = b.p0 - a.p0;
    let t = qp.cross(s) / denom;
    let u = qp.cross(r) / denom;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Counts crossings of a horizontal ray cast towards `+x` from `pt` with the
/// edges of `quad`.
///
/// Edges entirely above or below `pt` are skipped. The count stops at `2`:
/// a convex quad can never be crossed more than twice, so an odd result
/// means inside.
#[must_use]
pub fn find_cross_points(pt: Point, quad: &Quad) -> u32 {
    let mut crossings = 0;
    for edge in quad.edges() {
        let (o, d) = (edge.p0, edge.p1);
        if (o.y < pt.y && d.y < pt.y) || (o.y >= pt.y && d.y >= pt.y) {
            continue;
        }
        let xi = if o.x == d.x {
            o.x
        } else {
            let b1 = 0.0;
            let b2 = (d.y - o.y) / (d.x - o.x);
            let a1 = pt.y - b1 * pt.x;
            let a2 = o.y - b2 * o.x;
            -(a1 - a2) / (b1 - b2)
        };
        if xi >= pt.x {
            crossings += 1;
        }
        if crossings == 2 {
            break;
        }
    }
    crossings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Quad {
        Quad::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0))
    }

    #[test]
    fn square_inside_and_outside() {
        let q = unit_square();
        assert_eq!(find_cross_points(Point::new(5.0, 5.0), &q), 1);
        assert!(q.contains_point(Point::new(5.0, 5.0)));
        assert!(!q.contains_point(Point::new(15.0, 5.0)));
        assert!(!q.contains_point(Point::new(-1.0, 5.0)));
        assert!(!q.contains_point(Point::new(5.0, 11.0)));
    }

    #[test]
    fn rotated_quad_uses_sloped_edges() {
        let q = Quad::new(
            Point::new(50.0, 0.0),
            Point::new(100.0, 50.0),
            Point::new(50.0, 100.0),
            Point::new(0.0, 50.0),
        );
        assert!(q.contains_point(Point::new(50.0, 50.0)));
        assert!(q.contains_point(Point::new(80.0, 45.0)));
        assert!(!q.contains_point(Point::new(90.0, 10.0)));
        assert!(!q.contains_point(Point::new(10.0, 90.0)));
    }

    #[test]
    fn crossing_count_is_capped() {
        let q = unit_square();
        assert!(find_cross_points(Point::new(-5.0, 5.0), &q) <= 2);
        assert_eq!(find_cross_points(Point::new(-5.0, 5.0), &q), 2);
    }

    #[test]
    fn rect_relations() {
        let q = unit_square();
        assert!(q.is_within_rect(Rect::new(-1.0, -1.0, 11.0, 11.0)));
        assert!(!q.is_within_rect(Rect::new(1.0, 1.0, 11.0, 11.0)));
        assert!(q.intersects_rect_edges(Rect::new(5.0, 5.0, 20.0, 20.0)));
        assert!(!q.intersects_rect_edges(Rect::new(20.0, 20.0, 30.0, 30.0)));
        assert_eq!(q.bounding_box(), Rect::new(0.0, 0.0, 10.0, 10.0));
    }
}
