// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_precise_hit --heading-base-level=0

//! Understory Precise Hit: geometry-level hit testing for transformed shapes.
//!
//! Coarse spatial queries (an index, a box tree) answer "which candidates
//! might be under the pointer". This crate answers the follow-up question
//! exactly, for the shapes an object-manipulation layer deals with: an
//! arbitrarily rotated and skewed quadrilateral (an object outline or a
//! control's hit polygon).
//!
//! - [`Quad`]: four corners in `tl, tr, br, bl` order.
//! - [`find_cross_points`]: horizontal ray casting against the four edges;
//!   an odd count means the point is inside.
//! - [`Quad::intersects_rect_edges`] and [`Quad::is_within_rect`]: relations
//!   to an axis-aligned selection rectangle.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_precise_hit::Quad;
//!
//! // A diamond centered at (50, 50).
//! let quad = Quad::new(
//!     Point::new(50.0, 0.0),
//!     Point::new(100.0, 50.0),
//!     Point::new(50.0, 100.0),
//!     Point::new(0.0, 50.0),
//! );
//!
//! assert!(quad.contains_point(Point::new(50.0, 50.0)));
//! assert!(!quad.contains_point(Point::new(5.0, 5.0)));
//! assert_eq!(understory_precise_hit::find_cross_points(Point::new(60.0, 40.0), &quad), 1);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod quad;

pub use quad::{Quad, find_cross_points};
