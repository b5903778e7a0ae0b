// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

use crate::matrix::transform_point;
use crate::trig::{cos, sin};

/// Point helpers used by the manipulation math.
///
/// Every method returns a new value; the `*_assign` variants update `self`
/// in place.
pub trait PointExt: Sized {
    /// Rotates `self` by `radians` about `origin`, with quadrant-exact trig.
    #[must_use]
    fn rotate_about(self, origin: Point, radians: f64) -> Self;

    /// Applies `t`, optionally ignoring its translation.
    #[must_use]
    fn transform_by(self, t: Affine, ignore_offset: bool) -> Self;

    /// Adds `value` to both coordinates.
    #[must_use]
    fn scalar_add(self, value: f64) -> Self;

    /// Multiplies component-wise.
    #[must_use]
    fn multiply(self, factor: Vec2) -> Self;

    /// Divides component-wise.
    #[must_use]
    fn divide(self, divisor: Vec2) -> Self;

    /// Point halfway between `self` and `other`.
    #[must_use]
    fn mid_point_from(self, other: Point) -> Self;

    /// In-place [`rotate_about`](Self::rotate_about).
    fn rotate_about_assign(&mut self, origin: Point, radians: f64);

    /// In-place [`scalar_add`](Self::scalar_add).
    fn scalar_add_assign(&mut self, value: f64);

    /// In-place [`multiply`](Self::multiply).
    fn multiply_assign(&mut self, factor: Vec2);

    /// In-place [`divide`](Self::divide).
    fn divide_assign(&mut self, divisor: Vec2);
}

impl PointExt for Point {
    fn rotate_about(self, origin: Point, radians: f64) -> Self {
        let s = sin(radians);
        let c = cos(radians);
        let d = self - origin;
        origin + Vec2::new(d.x * c - d.y * s, d.x * s + d.y * c)
    }

    fn transform_by(self, t: Affine, ignore_offset: bool) -> Self {
        transform_point(self, t, ignore_offset)
    }

    fn scalar_add(self, value: f64) -> Self {
        Self::new(self.x + value, self.y + value)
    }

    fn multiply(self, factor: Vec2) -> Self {
        Self::new(self.x * factor.x, self.y * factor.y)
    }

    fn divide(self, divisor: Vec2) -> Self {
        Self::new(self.x / divisor.x, self.y / divisor.y)
    }

    fn mid_point_from(self, other: Point) -> Self {
        self.midpoint(other)
    }

    fn rotate_about_assign(&mut self, origin: Point, radians: f64) {
        *self = self.rotate_about(origin, radians);
    }

    fn scalar_add_assign(&mut self, value: f64) {
        *self = self.scalar_add(value);
    }

    fn multiply_assign(&mut self, factor: Vec2) {
        *self = self.multiply(factor);
    }

    fn divide_assign(&mut self, divisor: Vec2) {
        *self = self.divide(divisor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    #[test]
    fn rotate_about_quarter_turn_is_exact() {
        let p = Point::new(2.0, 1.0).rotate_about(Point::new(1.0, 1.0), FRAC_PI_2);
        assert_eq!(p, Point::new(1.0, 2.0));
    }

    #[test]
    fn assign_variants_match_pure_ones() {
        let mut p = Point::new(3.0, 4.0);
        p.scalar_add_assign(1.0);
        assert_eq!(p, Point::new(4.0, 5.0));
        p.multiply_assign(Vec2::new(2.0, 3.0));
        assert_eq!(p, Point::new(8.0, 15.0));
        p.divide_assign(Vec2::new(4.0, 5.0));
        assert_eq!(p, Point::new(2.0, 3.0));
        p.rotate_about_assign(Point::ORIGIN, 2.0 * FRAC_PI_2);
        assert_eq!(p, Point::new(-2.0, -3.0));
    }

    #[test]
    fn mid_point() {
        let m = Point::new(0.0, 0.0).mid_point_from(Point::new(10.0, -4.0));
        assert_eq!(m, Point::new(5.0, -2.0));
    }
}
