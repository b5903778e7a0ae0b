// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform origins.

use core::fmt;
use core::str::FromStr;

/// Position of a reference point along one axis of an object's box.
///
/// Stored as an offset from the box center in units of the box size:
/// `-0.5` is the left/top edge, `0` the center and `0.5` the right/bottom
/// edge. Values outside that range are allowed and describe points outside
/// the box.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Origin(f64);

impl Origin {
    /// Left edge.
    pub const LEFT: Self = Self(-0.5);
    /// Top edge.
    pub const TOP: Self = Self(-0.5);
    /// Center.
    pub const CENTER: Self = Self(0.0);
    /// Right edge.
    pub const RIGHT: Self = Self(0.5);
    /// Bottom edge.
    pub const BOTTOM: Self = Self(0.5);

    /// Creates an origin from an offset relative to the center.
    #[must_use]
    pub const fn from_offset(offset: f64) -> Self {
        Self(offset)
    }

    /// Offset relative to the center, in units of the box size.
    #[must_use]
    pub const fn offset(self) -> f64 {
        self.0
    }

    /// The mirrored origin: left ↔ right, top ↔ bottom, center stays.
    #[must_use]
    pub fn opposite(self) -> Self {
        Self(-self.0)
    }

    /// Whether this is the center.
    #[must_use]
    pub fn is_center(self) -> bool {
        self.0 == 0.0
    }
}

/// Error returned when parsing an [`Origin`] fails.
#[derive(Clone, PartialEq, Eq)]
pub struct ParseOriginError {
    input: alloc::string::String,
}

impl ParseOriginError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Debug for ParseOriginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseOriginError {{ input: {:?} }}", self.input)
    }
}

impl fmt::Display for ParseOriginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` is not an origin: expected a keyword or a fraction of the box size",
            self.input
        )
    }
}

impl core::error::Error for ParseOriginError {}

impl FromStr for Origin {
    type Err = ParseOriginError;

    /// Parses a keyword (`left`, `top`, `center`, `right`, `bottom`) or a
    /// fraction of the box size measured from the left/top edge, so `"0.5"`
    /// is the center.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "left" | "top" => Ok(Self::LEFT),
            "center" => Ok(Self::CENTER),
            "right" | "bottom" => Ok(Self::RIGHT),
            _ => match trimmed.parse::<f64>() {
                Ok(fraction) if fraction.is_finite() => Ok(Self(fraction - 0.5)),
                _ => Err(ParseOriginError {
                    input: trimmed.into(),
                }),
            },
        }
    }
}
