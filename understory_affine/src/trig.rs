// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrant-exact trigonometry.

use core::f64::consts::{FRAC_PI_2, PI};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

const PI_BY_180: f64 = PI / 180.0;

/// Converts degrees to radians.
#[inline]
#[must_use]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI_BY_180
}

/// Converts radians to degrees.
#[inline]
#[must_use]
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians / PI_BY_180
}

/// Number of whole quarter turns in `slice`, reduced to `0..4`.
///
/// Returns `None` when `slice` is not an integral number of quarter turns.
#[expect(
    clippy::cast_possible_truncation,
    reason = "only integral, finite values reach the cast"
)]
fn quarter_turns(slice: f64) -> Option<i64> {
    if !slice.is_finite() || slice != slice.round() {
        return None;
    }
    Some((slice as i64).rem_euclid(4))
}

/// Cosine of `angle` (radians), exact at multiples of `π/2`.
#[must_use]
pub fn cos(angle: f64) -> f64 {
    if angle == 0.0 {
        return 1.0;
    }
    match quarter_turns(angle / FRAC_PI_2) {
        Some(0) => 1.0,
        Some(1 | 3) => 0.0,
        Some(2) => -1.0,
        _ => angle.cos(),
    }
}

/// Sine of `angle` (radians), exact at multiples of `π/2`.
#[must_use]
pub fn sin(angle: f64) -> f64 {
    if angle == 0.0 {
        return 0.0;
    }
    match quarter_turns(angle / FRAC_PI_2) {
        Some(0 | 2) => 0.0,
        Some(1) => 1.0,
        Some(3) => -1.0,
        _ => angle.sin(),
    }
}

/// Cosine of an angle given in degrees, exact at multiples of 90°.
///
/// Checking the quadrant in degrees avoids the rounding introduced by the
/// degree → radian conversion for angles such as 270°.
#[must_use]
pub fn cos_deg(degrees: f64) -> f64 {
    match quarter_turns(degrees / 90.0) {
        Some(0) => 1.0,
        Some(1 | 3) => 0.0,
        Some(2) => -1.0,
        _ => degrees_to_radians(degrees).cos(),
    }
}

/// Sine of an angle given in degrees, exact at multiples of 90°.
#[must_use]
pub fn sin_deg(degrees: f64) -> f64 {
    match quarter_turns(degrees / 90.0) {
        Some(0 | 2) => 0.0,
        Some(1) => 1.0,
        Some(3) => -1.0,
        _ => degrees_to_radians(degrees).sin(),
    }
}
