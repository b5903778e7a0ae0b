// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Vec2};
use understory_affine::{bounding_box, try_invert};

/// 2D viewport over a world‑space plane.
///
/// `Viewport2D` tracks a rectangular region in device/view space and an
/// affine viewport transform mapping world coordinates into that region.
/// The transform is usually a uniform pan+zoom, but any invertible affine is
/// accepted through [`Viewport2D::set_transform`].
///
/// It can be used to:
/// - Convert points and rectangles between world and view coordinates.
/// - Pan to an absolute offset or by a relative delta.
/// - Zoom around a chosen anchor point.
#[derive(Clone, Debug)]
pub struct Viewport2D {
    view_rect: Rect,
    min_zoom: f64,
    max_zoom: f64,
    world_to_view: Affine,
    view_to_world: Affine,
}

impl Viewport2D {
    /// Creates a new viewport covering `view_rect` with the identity transform.
    ///
    /// Zoom is clamped to the range `[1e-3, 1e3]` by default.
    #[must_use]
    pub fn new(view_rect: Rect) -> Self {
        Self {
            view_rect,
            min_zoom: 1e-3,
            max_zoom: 1e3,
            world_to_view: Affine::IDENTITY,
            view_to_world: Affine::IDENTITY,
        }
    }

    /// Returns the current view rectangle in device coordinates.
    #[must_use]
    pub fn view_rect(&self) -> Rect {
        self.view_rect
    }

    /// Sets the view rectangle in device coordinates.
    ///
    /// This does not change the transform, but it changes the visible world
    /// region.
    pub fn set_view_rect(&mut self, rect: Rect) {
        self.view_rect = rect;
    }

    /// Returns the world → view transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.world_to_view
    }

    /// Returns the view → world transform.
    #[must_use]
    pub fn inverse_transform(&self) -> Affine {
        self.view_to_world
    }

    /// Replaces the world → view transform.
    ///
    /// Returns `false` and leaves the viewport unchanged when `transform` is
    /// not invertible.
    pub fn set_transform(&mut self, transform: Affine) -> bool {
        let Some(inverse) = try_invert(transform) else {
            return false;
        };
        self.world_to_view = transform;
        self.view_to_world = inverse;
        true
    }

    /// Returns the current zoom factor: the horizontal scale coefficient of
    /// the transform.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.world_to_view.as_coeffs()[0]
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The provided range is normalized so that `min_zoom <= max_zoom`.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
    }

    /// Returns the configured zoom range.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Sets the zoom factor, keeping the view origin fixed.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        self.zoom_to_point(Point::ORIGIN, zoom)
    }

    /// Sets the zoom factor so that `anchor_view` (in view coordinates) shows
    /// the same world point before and after.
    ///
    /// Both diagonal coefficients are set to the clamped `zoom`; rotation or
    /// skew in the previous transform is discarded. Returns `false` when
    /// `zoom` is not a positive finite number.
    pub fn zoom_to_point(&mut self, anchor_view: Point, zoom: f64) -> bool {
        if !(zoom.is_finite() && zoom > 0.0) {
            return false;
        }
        let zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        let world = self.view_to_world * anchor_view;
        let [_, b, c, _, e, f] = self.world_to_view.as_coeffs();
        let scaled = Affine::new([zoom, b, c, zoom, e, f]);
        let after = scaled * world;
        let [a, b, c, d, e, f] = scaled.as_coeffs();
        self.set_transform(Affine::new([
            a,
            b,
            c,
            d,
            e + anchor_view.x - after.x,
            f + anchor_view.y - after.y,
        ]))
    }

    /// Moves the view so that the world origin lands at `-offset` in view
    /// coordinates.
    pub fn absolute_pan(&mut self, offset: Point) -> bool {
        let [a, b, c, d, _, _] = self.world_to_view.as_coeffs();
        self.set_transform(Affine::new([a, b, c, d, -offset.x, -offset.y]))
    }

    /// Pans the view by a delta in view/device space.
    pub fn relative_pan(&mut self, delta: Vec2) -> bool {
        let [_, _, _, _, e, f] = self.world_to_view.as_coeffs();
        self.absolute_pan(Point::new(-delta.x - e, -delta.y - f))
    }

    /// Returns the visible world‑space rectangle.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        self.view_to_world_rect(self.view_rect)
    }

    /// Converts a world‑space point into view/device coordinates.
    #[must_use]
    pub fn world_to_view_point(&self, pt: Point) -> Point {
        self.world_to_view * pt
    }

    /// Converts a view/device‑space point into world coordinates.
    #[must_use]
    pub fn view_to_world_point(&self, pt: Point) -> Point {
        self.view_to_world * pt
    }

    /// Converts a world‑space rectangle into the view‑space bounds of its
    /// transformed corners.
    #[must_use]
    pub fn world_to_view_rect(&self, rect: Rect) -> Rect {
        transform_rect_bounds(self.world_to_view, rect)
    }

    /// Converts a view/device‑space rectangle into the world‑space bounds of
    /// its transformed corners.
    #[must_use]
    pub fn view_to_world_rect(&self, rect: Rect) -> Rect {
        transform_rect_bounds(self.view_to_world, rect)
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> Viewport2DDebugInfo {
        Viewport2DDebugInfo {
            view_rect: self.view_rect,
            visible_world_rect: self.visible_world_rect(),
            transform: self.world_to_view,
            zoom: self.zoom(),
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
        }
    }
}

fn transform_rect_bounds(t: Affine, rect: Rect) -> Rect {
    let corners = [
        rect.origin(),
        Point::new(rect.max_x(), rect.y0),
        Point::new(rect.x0, rect.max_y()),
        Point::new(rect.max_x(), rect.max_y()),
    ]
    .map(|p| t * p);
    bounding_box(&corners)
}

/// Debug snapshot of a [`Viewport2D`] state.
#[derive(Clone, Copy, Debug)]
pub struct Viewport2DDebugInfo {
    /// Current view rectangle in device coordinates.
    pub view_rect: Rect,
    /// World‑space rectangle currently visible through the view.
    pub visible_world_rect: Rect,
    /// Current world → view transform.
    pub transform: Affine,
    /// Current zoom factor.
    pub zoom: f64,
    /// Minimum zoom factor.
    pub min_zoom: f64,
    /// Maximum zoom factor.
    pub max_zoom: f64,
}
