// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Affine: matrix helpers for interactive 2D manipulation.
//!
//! This crate is a thin, opinionated layer over [`kurbo::Affine`] that
//! provides the operations an object-manipulation engine needs on every
//! pointer event:
//!
//! - [`compose`] and [`qr_decompose`]: build a matrix from translate, rotate,
//!   scale (with flips) and skew components, and recover them again.
//! - [`multiply`], [`invert`], [`try_invert`] and [`transform_point`]:
//!   coefficient-level matrix algebra, including the "linear part only"
//!   variants used for vectors and sizes.
//! - [`cos`], [`sin`], [`cos_deg`] and [`sin_deg`]: trigonometry that returns
//!   exact `1`, `0` and `-1` at multiples of 90° so that repeated composition
//!   of axis-aligned rotations does not accumulate drift.
//! - [`PointExt`]: small point helpers (rotation about a pivot, scalar
//!   offsets, component-wise products) with in-place variants.
//!
//! Matrices use the same coefficient order as `kurbo`: `[a, b, c, d, e, f]`
//! maps `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_affine::{compose, qr_decompose, ComposeOptions};
//!
//! let opts = ComposeOptions {
//!     translate_x: 10.0,
//!     translate_y: 20.0,
//!     angle: 90.0,
//!     scale_x: 2.0,
//!     scale_y: 3.0,
//!     ..ComposeOptions::default()
//! };
//! let matrix = compose(&opts);
//! let parts = qr_decompose(matrix);
//!
//! assert!((parts.angle - 90.0).abs() < 1e-9);
//! assert!((parts.scale_x - 2.0).abs() < 1e-9);
//! assert!((parts.scale_y - 3.0).abs() < 1e-9);
//! assert_eq!(parts.skew_y, 0.0);
//! ```
//!
//! ## Decomposition is intentionally partial
//!
//! [`qr_decompose`] always reports `skew_y == 0`. Any vertical skew present in
//! the input is folded into the rotation and horizontal skew terms. Code that
//! round-trips object properties through a matrix relies on this shape, so it
//! is not a general "recover every input" decomposition.
//!
//! This crate is `no_std`.

#![no_std]

mod matrix;
mod point;
mod trig;

pub use matrix::{
    ComposeOptions, Decomposed, DimensionsOptions, angle_to_skew, bounding_box, compose,
    dimensions_matrix, invert, is_identity, multiply, qr_decompose, rotate_matrix, scale_matrix,
    size_after_transform, skew_x_matrix, skew_y_matrix, transform_point, translate_matrix,
    try_invert,
};
pub use point::PointExt;
pub use trig::{cos, cos_deg, degrees_to_radians, radians_to_degrees, sin, sin_deg};
