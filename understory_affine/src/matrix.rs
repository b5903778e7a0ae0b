// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Matrix composition, decomposition and coefficient-level algebra.

use kurbo::{Affine, Point, Rect, Size};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::trig::{cos_deg, degrees_to_radians, radians_to_degrees, sin_deg};

/// The scale, flip and skew part of an object transform.
///
/// Angles are in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DimensionsOptions {
    /// Horizontal scale factor (magnitude; see [`flip_x`](Self::flip_x)).
    pub scale_x: f64,
    /// Vertical scale factor (magnitude; see [`flip_y`](Self::flip_y)).
    pub scale_y: f64,
    /// Horizontal skew angle, in degrees.
    pub skew_x: f64,
    /// Vertical skew angle, in degrees.
    pub skew_y: f64,
    /// Mirror horizontally.
    pub flip_x: bool,
    /// Mirror vertically.
    pub flip_y: bool,
}

impl Default for DimensionsOptions {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            skew_x: 0.0,
            skew_y: 0.0,
            flip_x: false,
            flip_y: false,
        }
    }
}

/// Every component [`compose`] understands.
///
/// `angle`, `skew_x` and `skew_y` are in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComposeOptions {
    /// Horizontal translation.
    pub translate_x: f64,
    /// Vertical translation.
    pub translate_y: f64,
    /// Rotation in degrees, clockwise in a y-down plane.
    pub angle: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Horizontal skew angle, in degrees.
    pub skew_x: f64,
    /// Vertical skew angle, in degrees.
    pub skew_y: f64,
    /// Mirror horizontally.
    pub flip_x: bool,
    /// Mirror vertically.
    pub flip_y: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            angle: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            skew_x: 0.0,
            skew_y: 0.0,
            flip_x: false,
            flip_y: false,
        }
    }
}

impl ComposeOptions {
    /// The scale/flip/skew subset of these options.
    #[must_use]
    pub fn dimensions(&self) -> DimensionsOptions {
        DimensionsOptions {
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            skew_x: self.skew_x,
            skew_y: self.skew_y,
            flip_x: self.flip_x,
            flip_y: self.flip_y,
        }
    }
}

/// Result of [`qr_decompose`].
///
/// `skew_y` is always `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Decomposed {
    /// Rotation in degrees.
    pub angle: f64,
    /// Horizontal scale factor, always non-negative.
    pub scale_x: f64,
    /// Vertical scale factor; negative when the matrix mirrors.
    pub scale_y: f64,
    /// Horizontal skew, in degrees.
    pub skew_x: f64,
    /// Always `0`.
    pub skew_y: f64,
    /// Horizontal translation.
    pub translate_x: f64,
    /// Vertical translation.
    pub translate_y: f64,
}

/// Multiplies `a` by `b` (`a ∘ b`: `b` is applied first).
///
/// With `is_2x2` set, only the linear parts are combined and the result has
/// no translation.
#[must_use]
pub fn multiply(a: Affine, b: Affine, is_2x2: bool) -> Affine {
    let [a0, a1, a2, a3, a4, a5] = a.as_coeffs();
    let [b0, b1, b2, b3, b4, b5] = b.as_coeffs();
    let (e, f) = if is_2x2 {
        (0.0, 0.0)
    } else {
        (a0 * b4 + a2 * b5 + a4, a1 * b4 + a3 * b5 + a5)
    };
    Affine::new([
        a0 * b0 + a2 * b1,
        a1 * b0 + a3 * b1,
        a0 * b2 + a2 * b3,
        a1 * b2 + a3 * b3,
        e,
        f,
    ])
}

/// Applies `t` to `p`.
///
/// With `ignore_offset` set, the translation is skipped so `p` is treated as
/// a vector.
#[must_use]
pub fn transform_point(p: Point, t: Affine, ignore_offset: bool) -> Point {
    let [a, b, c, d, e, f] = t.as_coeffs();
    if ignore_offset {
        Point::new(a * p.x + c * p.y, b * p.x + d * p.y)
    } else {
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }
}

/// Inverts `t` without checking for singularity.
///
/// A singular input yields non-finite coefficients. Callers that cannot
/// guarantee invertibility should use [`try_invert`].
#[must_use]
pub fn invert(t: Affine) -> Affine {
    let [t0, t1, t2, t3, t4, t5] = t.as_coeffs();
    let a = 1.0 / (t0 * t3 - t1 * t2);
    let linear = Affine::new([a * t3, -a * t1, -a * t2, a * t0, 0.0, 0.0]);
    let offset = transform_point(Point::new(t4, t5), linear, true);
    Affine::new([a * t3, -a * t1, -a * t2, a * t0, -offset.x, -offset.y])
}

/// Inverts `t`, returning `None` when it is singular or not finite.
#[must_use]
pub fn try_invert(t: Affine) -> Option<Affine> {
    let [a, b, c, d, _, _] = t.as_coeffs();
    let det = a * d - b * c;
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    let inv = invert(t);
    inv.as_coeffs().iter().all(|v| v.is_finite()).then_some(inv)
}

/// Pure translation.
#[must_use]
pub fn translate_matrix(x: f64, y: f64) -> Affine {
    Affine::new([1.0, 0.0, 0.0, 1.0, x, y])
}

/// Rotation by `angle` degrees about `pivot`.
#[must_use]
pub fn rotate_matrix(angle: f64, pivot: Point) -> Affine {
    let c = cos_deg(angle);
    let s = sin_deg(angle);
    Affine::new([
        c,
        s,
        -s,
        c,
        pivot.x - (c * pivot.x - s * pivot.y),
        pivot.y - (s * pivot.x + c * pivot.y),
    ])
}

/// Pure scale.
#[must_use]
pub fn scale_matrix(scale_x: f64, scale_y: f64) -> Affine {
    Affine::new([scale_x, 0.0, 0.0, scale_y, 0.0, 0.0])
}

/// Tangent of a skew angle given in degrees.
#[must_use]
pub fn angle_to_skew(angle: f64) -> f64 {
    degrees_to_radians(angle).tan()
}

/// Horizontal skew by `angle` degrees.
#[must_use]
pub fn skew_x_matrix(angle: f64) -> Affine {
    Affine::new([1.0, 0.0, angle_to_skew(angle), 1.0, 0.0, 0.0])
}

/// Vertical skew by `angle` degrees.
#[must_use]
pub fn skew_y_matrix(angle: f64) -> Affine {
    Affine::new([1.0, angle_to_skew(angle), 0.0, 1.0, 0.0, 0.0])
}

/// Scale (with flips) followed by horizontal then vertical skew.
///
/// The result has no translation.
#[must_use]
pub fn dimensions_matrix(opts: &DimensionsOptions) -> Affine {
    let sx = if opts.flip_x { -opts.scale_x } else { opts.scale_x };
    let sy = if opts.flip_y { -opts.scale_y } else { opts.scale_y };
    let mut matrix = scale_matrix(sx, sy);
    if opts.skew_x != 0.0 {
        matrix = multiply(matrix, skew_x_matrix(opts.skew_x), true);
    }
    if opts.skew_y != 0.0 {
        matrix = multiply(matrix, skew_y_matrix(opts.skew_y), true);
    }
    matrix
}

/// Builds `translate ∘ rotate ∘ dimensions` from `opts`.
///
/// Rotation is about the translated origin, so `compose` places the local
/// origin at `(translate_x, translate_y)`.
#[must_use]
pub fn compose(opts: &ComposeOptions) -> Affine {
    let mut matrix = translate_matrix(opts.translate_x, opts.translate_y);
    if opts.angle != 0.0 {
        matrix = multiply(matrix, rotate_matrix(opts.angle, Point::ORIGIN), false);
    }
    let dims = dimensions_matrix(&opts.dimensions());
    if !is_identity(dims) {
        matrix = multiply(matrix, dims, false);
    }
    matrix
}

/// QR-style decomposition into rotation, scale, horizontal skew and
/// translation.
///
/// Vertical skew is never reported; it ends up in `angle` and `skew_x`.
#[must_use]
pub fn qr_decompose(t: Affine) -> Decomposed {
    let [a, b, c, d, e, f] = t.as_coeffs();
    let angle = b.atan2(a);
    let denom = a * a + b * b;
    let scale_x = denom.sqrt();
    let scale_y = (a * d - c * b) / scale_x;
    let skew_x = (a * c + b * d).atan2(denom);
    Decomposed {
        angle: radians_to_degrees(angle),
        scale_x,
        scale_y,
        skew_x: radians_to_degrees(skew_x),
        skew_y: 0.0,
        translate_x: e,
        translate_y: f,
    }
}

/// Whether every coefficient equals the identity's.
#[must_use]
pub fn is_identity(t: Affine) -> bool {
    t.as_coeffs() == Affine::IDENTITY.as_coeffs()
}

/// Size of the axis-aligned box around a `width × height` rectangle after the
/// linear part of `t`.
#[must_use]
pub fn size_after_transform(width: f64, height: f64, t: Affine) -> Size {
    let corners = [
        Point::ORIGIN,
        Point::new(width, 0.0),
        Point::new(0.0, height),
        Point::new(width, height),
    ]
    .map(|p| transform_point(p, t, true));
    bounding_box(&corners).size()
}

/// Axis-aligned bounds of `points`; [`Rect::ZERO`] when empty.
#[must_use]
pub fn bounding_box(points: &[Point]) -> Rect {
    let Some((first, rest)) = points.split_first() else {
        return Rect::ZERO;
    };
    rest.iter().fold(
        Rect::from_points(*first, *first),
        |acc, p| acc.union_pt(*p),
    )
}
