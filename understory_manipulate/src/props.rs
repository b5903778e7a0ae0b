// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Object transform properties, gesture snapshots and lock flags.

use crate::origin::Origin;

/// The transform-affecting properties of an object.
///
/// `left`/`top` locate the point selected by `origin_x`/`origin_y` in the
/// parent plane. Angles are in degrees. `scale_x`/`scale_y` are magnitudes;
/// mirroring is expressed through `flip_x`/`flip_y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformProps {
    /// Horizontal position of the origin point.
    pub left: f64,
    /// Vertical position of the origin point.
    pub top: f64,
    /// Untransformed width.
    pub width: f64,
    /// Untransformed height.
    pub height: f64,
    /// Horizontal scale.
    pub scale_x: f64,
    /// Vertical scale.
    pub scale_y: f64,
    /// Horizontal skew, in degrees.
    pub skew_x: f64,
    /// Vertical skew, in degrees.
    pub skew_y: f64,
    /// Rotation, in degrees.
    pub angle: f64,
    /// Mirror horizontally.
    pub flip_x: bool,
    /// Mirror vertically.
    pub flip_y: bool,
    /// Horizontal reference point for `left`.
    pub origin_x: Origin,
    /// Vertical reference point for `top`.
    pub origin_y: Origin,
    /// Outline width, included in the transformed dimensions.
    pub stroke_width: f64,
    /// When set, the outline keeps its width regardless of scale.
    pub stroke_uniform: bool,
}

impl Default for TransformProps {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            skew_x: 0.0,
            skew_y: 0.0,
            angle: 0.0,
            flip_x: false,
            flip_y: false,
            origin_x: Origin::LEFT,
            origin_y: Origin::TOP,
            stroke_width: 0.0,
            stroke_uniform: false,
        }
    }
}

impl TransformProps {
    /// A `width × height` box with its top-left corner at `(left, top)`.
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
            ..Self::default()
        }
    }

    /// Whether every numeric field is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [
            self.left,
            self.top,
            self.width,
            self.height,
            self.scale_x,
            self.scale_y,
            self.skew_x,
            self.skew_y,
            self.angle,
            self.origin_x.offset(),
            self.origin_y.offset(),
            self.stroke_width,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// The properties captured when a gesture starts.
///
/// `origin_x`/`origin_y` record the anchor chosen for the gesture, not the
/// object's own origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformSnapshot {
    /// Horizontal position at gesture start.
    pub left: f64,
    /// Vertical position at gesture start.
    pub top: f64,
    /// Width at gesture start.
    pub width: f64,
    /// Height at gesture start.
    pub height: f64,
    /// Horizontal scale at gesture start.
    pub scale_x: f64,
    /// Vertical scale at gesture start.
    pub scale_y: f64,
    /// Horizontal skew at gesture start.
    pub skew_x: f64,
    /// Vertical skew at gesture start.
    pub skew_y: f64,
    /// Rotation at gesture start.
    pub angle: f64,
    /// Horizontal mirroring at gesture start.
    pub flip_x: bool,
    /// Vertical mirroring at gesture start.
    pub flip_y: bool,
    /// Gesture anchor, horizontal.
    pub origin_x: Origin,
    /// Gesture anchor, vertical.
    pub origin_y: Origin,
}

impl TransformSnapshot {
    /// Captures `props` with the given gesture anchor.
    #[must_use]
    pub fn capture(props: &TransformProps, origin_x: Origin, origin_y: Origin) -> Self {
        Self {
            left: props.left,
            top: props.top,
            width: props.width,
            height: props.height,
            scale_x: props.scale_x,
            scale_y: props.scale_y,
            skew_x: props.skew_x,
            skew_y: props.skew_y,
            angle: props.angle,
            flip_x: props.flip_x,
            flip_y: props.flip_y,
            origin_x,
            origin_y,
        }
    }

    /// Whether any captured geometric property differs from `props`.
    ///
    /// The anchor is not compared.
    #[must_use]
    pub fn differs_from(&self, props: &TransformProps) -> bool {
        self.left != props.left
            || self.top != props.top
            || self.width != props.width
            || self.height != props.height
            || self.scale_x != props.scale_x
            || self.scale_y != props.scale_y
            || self.skew_x != props.skew_x
            || self.skew_y != props.skew_y
            || self.angle != props.angle
            || self.flip_x != props.flip_x
            || self.flip_y != props.flip_y
    }

    /// Writes the captured geometry back into `props`, keeping its origin
    /// and stroke settings.
    pub fn restore_into(&self, props: &mut TransformProps) {
        props.left = self.left;
        props.top = self.top;
        props.width = self.width;
        props.height = self.height;
        props.scale_x = self.scale_x;
        props.scale_y = self.scale_y;
        props.skew_x = self.skew_x;
        props.skew_y = self.skew_y;
        props.angle = self.angle;
        props.flip_x = self.flip_x;
        props.flip_y = self.flip_y;
    }
}

bitflags::bitflags! {
    /// Per-object restrictions on interactive manipulation.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Locks: u16 {
        /// `left` cannot be changed by dragging.
        const MOVEMENT_X   = 1 << 0;
        /// `top` cannot be changed by dragging.
        const MOVEMENT_Y   = 1 << 1;
        /// `scale_x` cannot be changed by scaling handles.
        const SCALING_X    = 1 << 2;
        /// `scale_y` cannot be changed by scaling handles.
        const SCALING_Y    = 1 << 3;
        /// Scaling may not cross the anchor and mirror the object.
        const SCALING_FLIP = 1 << 4;
        /// `skew_x` cannot be changed by skewing handles.
        const SKEWING_X    = 1 << 5;
        /// `skew_y` cannot be changed by skewing handles.
        const SKEWING_Y    = 1 << 6;
        /// `angle` cannot be changed by the rotation handle.
        const ROTATION     = 1 << 7;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_detects_changes_but_ignores_anchor() {
        let mut props = TransformProps::new(10.0, 20.0, 100.0, 50.0);
        let snap = TransformSnapshot::capture(&props, Origin::RIGHT, Origin::BOTTOM);
        assert!(!snap.differs_from(&props));

        props.origin_x = Origin::CENTER;
        assert!(!snap.differs_from(&props));

        props.scale_x = 2.0;
        assert!(snap.differs_from(&props));

        snap.restore_into(&mut props);
        assert!(!snap.differs_from(&props));
        assert_eq!(props.origin_x, Origin::CENTER);
    }

    #[test]
    fn finiteness_check() {
        let mut props = TransformProps::default();
        assert!(props.is_finite());
        props.angle = f64::INFINITY;
        assert!(!props.is_finite());
    }
}
