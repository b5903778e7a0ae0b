// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Objects that can be manipulated, and their cached coordinates.
//!
//! An [`InteractiveObject`] owns its [`TransformProps`] and three derived
//! coordinate sets:
//!
//! - absolute corners (`a_coords`) in the parent plane,
//! - line corners (`line_coords`) in view space, inflated by the padding,
//!   used for body hit testing,
//! - per-control coordinates (`o_coords`) in view space, used for handle
//!   placement and handle hit testing.
//!
//! Derived coordinates are only refreshed by [`InteractiveObject::set_coords`].
//! Setters bump [`InteractiveObject::geometry_revision`]; compare it with
//! [`InteractiveObject::coords_revision`] to detect stale coordinates.

use core::cell::Cell;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Rect, Vec2};
use smallvec::SmallVec;
use understory_affine::{
    ComposeOptions, DimensionsOptions, PointExt, bounding_box, compose, cos, degrees_to_radians,
    dimensions_matrix, multiply, qr_decompose, rotate_matrix, sin, size_after_transform,
    transform_point, translate_matrix,
};
use understory_precise_hit::Quad;

use crate::catalog::ControlCatalog;
use crate::control::{Control, ControlKey};
use crate::options::ObjectOptions;
use crate::origin::Origin;
use crate::props::TransformProps;

/// Property overrides for [`InteractiveObject::transformed_dimensions`].
///
/// `None` fields use the object's current value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DimensionOverrides {
    /// Replaces `scale_x`.
    pub scale_x: Option<f64>,
    /// Replaces `scale_y`.
    pub scale_y: Option<f64>,
    /// Replaces `skew_x`.
    pub skew_x: Option<f64>,
    /// Replaces `skew_y`.
    pub skew_y: Option<f64>,
    /// Replaces `width`.
    pub width: Option<f64>,
    /// Replaces `height`.
    pub height: Option<f64>,
    /// Replaces `stroke_width`.
    pub stroke_width: Option<f64>,
}

/// Screen-space coordinates of one control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlCoords {
    /// Handle center.
    pub position: Point,
    /// Mouse hit area.
    pub corner: Quad,
    /// Touch hit area.
    pub touch_corner: Quad,
}

/// An object on the canvas that handles can move, scale, skew and rotate.
#[derive(Clone, Debug)]
pub struct InteractiveObject {
    props: TransformProps,
    options: ObjectOptions,
    controls: ControlCatalog,
    control_visibility: SmallVec<[(ControlKey, bool); 2]>,
    group_matrix: Option<Affine>,
    viewport: Affine,
    own_matrix: Cell<Option<Affine>>,
    a_coords: Option<Quad>,
    line_coords: Option<Quad>,
    o_coords: SmallVec<[(ControlKey, ControlCoords); 9]>,
    geometry_revision: u64,
    coords_revision: Option<u64>,
}

fn accept_finite(name: &str, value: f64) -> bool {
    if value.is_finite() {
        true
    } else {
        tracing::warn!("ignoring non-finite {name}: {value}");
        false
    }
}

impl InteractiveObject {
    /// An object with default options and the standard control set.
    ///
    /// Coordinates are not computed until [`set_coords`](Self::set_coords).
    #[must_use]
    pub fn new(props: TransformProps) -> Self {
        Self::with_options(props, ObjectOptions::default())
    }

    /// An object with the given options and the standard control set.
    #[must_use]
    pub fn with_options(props: TransformProps, options: ObjectOptions) -> Self {
        let mut object = Self {
            props: TransformProps::default(),
            options,
            controls: ControlCatalog::object(),
            control_visibility: SmallVec::new(),
            group_matrix: None,
            viewport: Affine::IDENTITY,
            own_matrix: Cell::new(None),
            a_coords: None,
            line_coords: None,
            o_coords: SmallVec::new(),
            geometry_revision: 0,
            coords_revision: None,
        };
        if !object.set_props(props) {
            tracing::warn!("object created with non-finite properties, using defaults");
        }
        object
    }

    /// Replaces the control catalog.
    #[must_use]
    pub fn with_controls(mut self, controls: ControlCatalog) -> Self {
        self.set_controls(controls);
        self
    }

    // --- properties ---

    /// Current transform properties.
    #[must_use]
    pub fn props(&self) -> &TransformProps {
        &self.props
    }

    /// Replaces every property at once. Scales go through the same clamping
    /// and flip handling as [`set_scale_x`](Self::set_scale_x).
    ///
    /// Returns `false` and leaves the object untouched if any value is not
    /// finite.
    pub fn set_props(&mut self, props: TransformProps) -> bool {
        if !props.is_finite() {
            tracing::warn!("ignoring non-finite transform properties");
            return false;
        }
        self.props = props;
        let (scale_x, flip_x) = self.normalize_scale(props.scale_x, props.flip_x);
        let (scale_y, flip_y) = self.normalize_scale(props.scale_y, props.flip_y);
        self.props.scale_x = scale_x;
        self.props.flip_x = flip_x;
        self.props.scale_y = scale_y;
        self.props.flip_y = flip_y;
        self.invalidate();
        true
    }

    fn invalidate(&mut self) {
        self.own_matrix.set(None);
        self.geometry_revision = self.geometry_revision.wrapping_add(1);
    }

    fn update(
        &mut self,
        name: &str,
        value: f64,
        field: impl FnOnce(&mut TransformProps) -> &mut f64,
    ) -> bool {
        if !accept_finite(name, value) {
            return false;
        }
        let slot = field(&mut self.props);
        if *slot != value {
            *slot = value;
            self.invalidate();
        }
        true
    }

    /// Sets `left`. Non-finite values are logged and ignored.
    pub fn set_left(&mut self, left: f64) -> bool {
        self.update("left", left, |p| &mut p.left)
    }

    /// Sets `top`.
    pub fn set_top(&mut self, top: f64) -> bool {
        self.update("top", top, |p| &mut p.top)
    }

    /// Sets the untransformed width.
    pub fn set_width(&mut self, width: f64) -> bool {
        self.update("width", width, |p| &mut p.width)
    }

    /// Sets the untransformed height.
    pub fn set_height(&mut self, height: f64) -> bool {
        self.update("height", height, |p| &mut p.height)
    }

    /// Sets the horizontal skew, in degrees.
    pub fn set_skew_x(&mut self, skew_x: f64) -> bool {
        self.update("skew_x", skew_x, |p| &mut p.skew_x)
    }

    /// Sets the vertical skew, in degrees.
    pub fn set_skew_y(&mut self, skew_y: f64) -> bool {
        self.update("skew_y", skew_y, |p| &mut p.skew_y)
    }

    /// Sets the rotation, in degrees, about the object's origin point.
    ///
    /// See [`rotate`](Self::rotate) for rotation about the center.
    pub fn set_angle(&mut self, angle: f64) -> bool {
        self.update("angle", angle, |p| &mut p.angle)
    }

    /// Sets the outline width.
    pub fn set_stroke_width(&mut self, stroke_width: f64) -> bool {
        self.update("stroke_width", stroke_width, |p| &mut p.stroke_width)
    }

    /// Sets the horizontal origin without moving `left`.
    pub fn set_origin_x(&mut self, origin_x: Origin) -> bool {
        if !accept_finite("origin_x", origin_x.offset()) {
            return false;
        }
        if self.props.origin_x != origin_x {
            self.props.origin_x = origin_x;
            self.invalidate();
        }
        true
    }

    /// Sets the vertical origin without moving `top`.
    pub fn set_origin_y(&mut self, origin_y: Origin) -> bool {
        if !accept_finite("origin_y", origin_y.offset()) {
            return false;
        }
        if self.props.origin_y != origin_y {
            self.props.origin_y = origin_y;
            self.invalidate();
        }
        true
    }

    /// Sets horizontal mirroring.
    pub fn set_flip_x(&mut self, flip_x: bool) {
        if self.props.flip_x != flip_x {
            self.props.flip_x = flip_x;
            self.invalidate();
        }
    }

    /// Sets vertical mirroring.
    pub fn set_flip_y(&mut self, flip_y: bool) {
        if self.props.flip_y != flip_y {
            self.props.flip_y = flip_y;
            self.invalidate();
        }
    }

    /// Sets whether the outline keeps its width under scaling.
    pub fn set_stroke_uniform(&mut self, stroke_uniform: bool) {
        if self.props.stroke_uniform != stroke_uniform {
            self.props.stroke_uniform = stroke_uniform;
            self.invalidate();
        }
    }

    /// Keeps a scale away from zero: magnitudes under the minimum scale limit
    /// snap to it, and an exact zero becomes `0.0001`.
    #[must_use]
    pub fn constrain_scale(&self, value: f64) -> f64 {
        let min = self.options.min_scale_limit;
        if value.abs() < min {
            if value < 0.0 { -min } else { min }
        } else if value == 0.0 {
            0.0001
        } else {
            value
        }
    }

    fn normalize_scale(&self, value: f64, flip: bool) -> (f64, bool) {
        let value = self.constrain_scale(value);
        if value < 0.0 {
            (-value, !flip)
        } else {
            (value, flip)
        }
    }

    /// Sets the horizontal scale.
    ///
    /// The value is clamped with [`constrain_scale`](Self::constrain_scale);
    /// a negative value toggles `flip_x` and stores the magnitude.
    pub fn set_scale_x(&mut self, scale_x: f64) -> bool {
        if !accept_finite("scale_x", scale_x) {
            return false;
        }
        let (scale_x, flip_x) = self.normalize_scale(scale_x, self.props.flip_x);
        if self.props.scale_x != scale_x || self.props.flip_x != flip_x {
            self.props.scale_x = scale_x;
            self.props.flip_x = flip_x;
            self.invalidate();
        }
        true
    }

    /// Sets the vertical scale, like [`set_scale_x`](Self::set_scale_x).
    pub fn set_scale_y(&mut self, scale_y: f64) -> bool {
        if !accept_finite("scale_y", scale_y) {
            return false;
        }
        let (scale_y, flip_y) = self.normalize_scale(scale_y, self.props.flip_y);
        if self.props.scale_y != scale_y || self.props.flip_y != flip_y {
            self.props.scale_y = scale_y;
            self.props.flip_y = flip_y;
            self.invalidate();
        }
        true
    }

    // --- options, controls and planes ---

    /// Interaction settings.
    #[must_use]
    pub fn options(&self) -> &ObjectOptions {
        &self.options
    }

    /// Mutable interaction settings.
    ///
    /// Counts as a geometry change, since padding and handle sizes feed the
    /// cached coordinates.
    pub fn options_mut(&mut self) -> &mut ObjectOptions {
        self.geometry_revision = self.geometry_revision.wrapping_add(1);
        &mut self.options
    }

    /// The control catalog.
    #[must_use]
    pub fn controls(&self) -> &ControlCatalog {
        &self.controls
    }

    /// Replaces the control catalog. Per-object visibility overrides are kept.
    pub fn set_controls(&mut self, controls: ControlCatalog) {
        self.controls = controls;
        self.o_coords.clear();
        self.geometry_revision = self.geometry_revision.wrapping_add(1);
    }

    /// Looks up a control.
    #[must_use]
    pub fn control(&self, key: ControlKey) -> Option<&Control> {
        self.controls.get(key)
    }

    /// Shows or hides one control on this object only.
    pub fn set_control_visible(&mut self, key: ControlKey, visible: bool) {
        match self.control_visibility.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = visible,
            None => self.control_visibility.push((key, visible)),
        }
    }

    /// Whether a control exists and is visible, taking per-object overrides
    /// into account.
    #[must_use]
    pub fn is_control_visible(&self, key: ControlKey) -> bool {
        let Some(control) = self.controls.get(key) else {
            return false;
        };
        self.control_visibility
            .iter()
            .find_map(|(k, v)| (*k == key).then_some(*v))
            .unwrap_or(control.visible())
    }

    /// The transform of the enclosing group, if the object is nested.
    #[must_use]
    pub fn group_matrix(&self) -> Option<Affine> {
        self.group_matrix
    }

    /// Nests the object in a group with the given transform, or un-nests it.
    pub fn set_group_matrix(&mut self, matrix: Option<Affine>) {
        self.group_matrix = matrix;
        self.geometry_revision = self.geometry_revision.wrapping_add(1);
    }

    /// Whether the object is nested in a group.
    #[must_use]
    pub fn is_in_group(&self) -> bool {
        self.group_matrix.is_some()
    }

    /// The world-to-view transform used for `line_coords` and `o_coords`.
    #[must_use]
    pub fn viewport_transform(&self) -> Affine {
        self.viewport
    }

    /// Replaces the world-to-view transform. The canvas keeps this in sync
    /// with its viewport.
    pub fn set_viewport_transform(&mut self, viewport: Affine) {
        self.viewport = viewport;
        self.geometry_revision = self.geometry_revision.wrapping_add(1);
    }

    /// Horizontal viewport scale.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.viewport.as_coeffs()[0]
    }

    /// Bumped by every geometry-affecting change.
    #[must_use]
    pub fn geometry_revision(&self) -> u64 {
        self.geometry_revision
    }

    /// The geometry revision the cached coordinates were computed at.
    #[must_use]
    pub fn coords_revision(&self) -> Option<u64> {
        self.coords_revision
    }

    /// Whether the cached coordinates reflect the current geometry.
    #[must_use]
    pub fn has_fresh_coords(&self) -> bool {
        self.coords_revision == Some(self.geometry_revision)
    }

    // --- geometry ---

    /// Size of the object after scale and skew, outline included.
    #[must_use]
    pub fn transformed_dimensions(&self, overrides: &DimensionOverrides) -> Vec2 {
        let p = &self.props;
        let scale_x = overrides.scale_x.unwrap_or(p.scale_x);
        let scale_y = overrides.scale_y.unwrap_or(p.scale_y);
        let skew_x = overrides.skew_x.unwrap_or(p.skew_x);
        let skew_y = overrides.skew_y.unwrap_or(p.skew_y);
        let width = overrides.width.unwrap_or(p.width);
        let height = overrides.height.unwrap_or(p.height);
        let stroke = overrides.stroke_width.unwrap_or(p.stroke_width);
        let (pre, post) = if p.stroke_uniform {
            (0.0, stroke)
        } else {
            (stroke, 0.0)
        };
        let dim_x = width + pre;
        let dim_y = height + pre;
        let scaled = if skew_x == 0.0 && skew_y == 0.0 {
            Vec2::new(dim_x * scale_x, dim_y * scale_y)
        } else {
            let size = size_after_transform(
                dim_x,
                dim_y,
                dimensions_matrix(&DimensionsOptions {
                    scale_x,
                    scale_y,
                    skew_x,
                    skew_y,
                    flip_x: false,
                    flip_y: false,
                }),
            );
            Vec2::new(size.width, size.height)
        };
        scaled + Vec2::new(post, post)
    }

    /// Transformed width.
    #[must_use]
    pub fn scaled_width(&self) -> f64 {
        self.transformed_dimensions(&DimensionOverrides::default()).x
    }

    /// Transformed height.
    #[must_use]
    pub fn scaled_height(&self) -> f64 {
        self.transformed_dimensions(&DimensionOverrides::default()).y
    }

    /// Moves `point` from one origin of the transformed, unrotated box to
    /// another.
    #[must_use]
    pub fn translate_to_given_origin(
        &self,
        point: Point,
        from_x: Origin,
        from_y: Origin,
        to_x: Origin,
        to_y: Origin,
    ) -> Point {
        let offset_x = to_x.offset() - from_x.offset();
        let offset_y = to_y.offset() - from_y.offset();
        if offset_x == 0.0 && offset_y == 0.0 {
            return point;
        }
        let dim = self.transformed_dimensions(&DimensionOverrides::default());
        point + Vec2::new(offset_x * dim.x, offset_y * dim.y)
    }

    /// The center, given the position of the point at `origin_x`/`origin_y`.
    #[must_use]
    pub fn translate_to_center_point(
        &self,
        point: Point,
        origin_x: Origin,
        origin_y: Origin,
    ) -> Point {
        let p = self.translate_to_given_origin(
            point,
            origin_x,
            origin_y,
            Origin::CENTER,
            Origin::CENTER,
        );
        if self.props.angle == 0.0 {
            p
        } else {
            p.rotate_about(point, degrees_to_radians(self.props.angle))
        }
    }

    /// The point at `origin_x`/`origin_y`, given the center.
    #[must_use]
    pub fn translate_to_origin_point(
        &self,
        center: Point,
        origin_x: Origin,
        origin_y: Origin,
    ) -> Point {
        let p = self.translate_to_given_origin(
            center,
            Origin::CENTER,
            Origin::CENTER,
            origin_x,
            origin_y,
        );
        if self.props.angle == 0.0 {
            p
        } else {
            p.rotate_about(center, degrees_to_radians(self.props.angle))
        }
    }

    /// Center in the parent plane.
    #[must_use]
    pub fn relative_center_point(&self) -> Point {
        self.translate_to_center_point(
            Point::new(self.props.left, self.props.top),
            self.props.origin_x,
            self.props.origin_y,
        )
    }

    /// Center in the world plane.
    #[must_use]
    pub fn center_point(&self) -> Point {
        let center = self.relative_center_point();
        match self.group_matrix {
            Some(group) => group * center,
            None => center,
        }
    }

    /// Where the point at `origin_x`/`origin_y` currently is.
    #[must_use]
    pub fn position_by_origin(&self, origin_x: Origin, origin_y: Origin) -> Point {
        self.translate_to_origin_point(self.relative_center_point(), origin_x, origin_y)
    }

    /// Moves the object so the point at `origin_x`/`origin_y` lands on `pos`.
    pub fn set_position_by_origin(&mut self, pos: Point, origin_x: Origin, origin_y: Origin) {
        let center = self.translate_to_center_point(pos, origin_x, origin_y);
        let position =
            self.translate_to_origin_point(center, self.props.origin_x, self.props.origin_y);
        self.set_left(position.x);
        self.set_top(position.y);
    }

    /// `point` in the object's unrotated frame, relative to the point at
    /// `origin_x`/`origin_y`.
    #[must_use]
    pub fn to_local_point(&self, point: Point, origin_x: Origin, origin_y: Origin) -> Point {
        let center = self.relative_center_point();
        let anchor = self.translate_to_given_origin(
            center,
            Origin::CENTER,
            Origin::CENTER,
            origin_x,
            origin_y,
        );
        let unrotated = if self.props.angle == 0.0 {
            point
        } else {
            point.rotate_about(center, -degrees_to_radians(self.props.angle))
        };
        (unrotated - anchor).to_point()
    }

    /// Rotation relative to the world plane, including any group rotation.
    #[must_use]
    pub fn total_angle(&self) -> f64 {
        if self.group_matrix.is_some() {
            qr_decompose(self.calc_transform_matrix(false)).angle
        } else {
            self.props.angle
        }
    }

    /// Scales both axes to `value`, then refreshes the coordinates.
    pub fn scale(&mut self, value: f64) -> bool {
        let accepted = self.set_scale_x(value) && self.set_scale_y(value);
        self.set_coords(false);
        accepted
    }

    /// Scales uniformly so the world bounding box is `value` wide.
    pub fn scale_to_width(&mut self, value: f64) -> bool {
        let factor = self.bounding_rect(true, true).width() / self.scaled_width();
        self.scale(value / self.props.width / factor)
    }

    /// Scales uniformly so the world bounding box is `value` tall.
    pub fn scale_to_height(&mut self, value: f64) -> bool {
        let factor = self.bounding_rect(true, true).height() / self.scaled_height();
        self.scale(value / self.props.height / factor)
    }

    /// Sets the angle, keeping the center fixed when
    /// [`centered_rotation`](ObjectOptions::centered_rotation) is set.
    pub fn rotate(&mut self, angle: f64) -> bool {
        if !self.options.centered_rotation {
            return self.set_angle(angle);
        }
        let center = self.relative_center_point();
        if !self.set_angle(angle) {
            return false;
        }
        let position =
            self.translate_to_origin_point(center, self.props.origin_x, self.props.origin_y);
        self.set_left(position.x);
        self.set_top(position.y);
        true
    }

    // --- matrices ---

    /// `translate(center) ∘ rotate ∘ scale/skew/flip`, cached until the next
    /// property change.
    #[must_use]
    pub fn calc_own_matrix(&self) -> Affine {
        if let Some(matrix) = self.own_matrix.get() {
            return matrix;
        }
        let center = self.relative_center_point();
        let p = &self.props;
        let matrix = compose(&ComposeOptions {
            translate_x: center.x,
            translate_y: center.y,
            angle: p.angle,
            scale_x: p.scale_x,
            scale_y: p.scale_y,
            skew_x: p.skew_x,
            skew_y: p.skew_y,
            flip_x: p.flip_x,
            flip_y: p.flip_y,
        });
        self.own_matrix.set(Some(matrix));
        matrix
    }

    /// The own matrix, preceded by the group transform unless `skip_group`.
    #[must_use]
    pub fn calc_transform_matrix(&self, skip_group: bool) -> Affine {
        let own = self.calc_own_matrix();
        match self.group_matrix {
            Some(group) if !skip_group => multiply(group, own, false),
            _ => own,
        }
    }

    // --- coordinates ---

    /// Corners of the transformed box in the parent plane.
    #[must_use]
    pub fn calc_a_coords(&self) -> Quad {
        let center = self.relative_center_point();
        let matrix = multiply(
            translate_matrix(center.x, center.y),
            rotate_matrix(self.props.angle, Point::ORIGIN),
            false,
        );
        let dim = self.transformed_dimensions(&DimensionOverrides::default());
        let (w, h) = (dim.x / 2.0, dim.y / 2.0);
        Quad::new(
            matrix * Point::new(-w, -h),
            matrix * Point::new(w, -h),
            matrix * Point::new(w, h),
            matrix * Point::new(-w, h),
        )
    }

    /// Absolute corners in view space, pushed outwards by the padding along
    /// the rotated axes.
    #[must_use]
    pub fn calc_line_coords(&self) -> Quad {
        let mut q = self.calc_a_coords().transform(self.viewport);
        let padding = self.options.padding;
        if padding != 0.0 {
            let angle = degrees_to_radians(self.total_angle());
            let cos_p = cos(angle) * padding;
            let sin_p = sin(angle) * padding;
            let sum = cos_p + sin_p;
            let diff = cos_p - sin_p;
            q.tl += Vec2::new(-diff, -sum);
            q.tr += Vec2::new(sum, -diff);
            q.bl += Vec2::new(-sum, diff);
            q.br += Vec2::new(diff, sum);
        }
        q
    }

    /// Screen-space coordinates for every control, in catalog order.
    #[must_use]
    pub fn calc_o_coords(&self) -> SmallVec<[(ControlKey, ControlCoords); 9]> {
        let vpt = self.viewport;
        let [a, _, _, d, _, _] = vpt.as_coeffs();
        let inverse_scale = Affine::new([
            if a != 0.0 { 1.0 / a } else { 1.0 },
            0.0,
            0.0,
            if d != 0.0 { 1.0 / d } else { 1.0 },
            0.0,
            0.0,
        ]);
        let center = self.center_point();
        let start = multiply(vpt, translate_matrix(center.x, center.y), false);
        let rotated = multiply(start, rotate_matrix(self.props.angle, Point::ORIGIN), false);
        let matrix = multiply(rotated, inverse_scale, false);

        let dim = transform_point(
            self.transformed_dimensions(&DimensionOverrides::default())
                .to_point(),
            vpt,
            true,
        )
        .scalar_add(2.0 * self.options.padding)
        .to_vec2();

        self.controls
            .iter()
            .map(|(key, control)| {
                let position = control.position(dim, matrix, self);
                let coords = ControlCoords {
                    position,
                    corner: control.calc_corner_coords(
                        self.props.angle,
                        self.options.corner_size,
                        position,
                        false,
                    ),
                    touch_corner: control.calc_corner_coords(
                        self.props.angle,
                        self.options.touch_corner_size,
                        position,
                        true,
                    ),
                };
                (key, coords)
            })
            .collect()
    }

    /// Refreshes the cached coordinates.
    ///
    /// With `skip_controls`, only the absolute and line corners are updated;
    /// use it when handles are not needed, e.g. for objects that are not
    /// active.
    pub fn set_coords(&mut self, skip_controls: bool) {
        let a_coords = self.calc_a_coords();
        self.a_coords = Some(a_coords);
        self.line_coords = Some(if self.is_in_group() {
            a_coords
        } else {
            self.calc_line_coords()
        });
        if !skip_controls {
            self.o_coords = self.calc_o_coords();
        }
        self.coords_revision = Some(self.geometry_revision);
    }

    /// Cached absolute corners.
    #[must_use]
    pub fn a_coords(&self) -> Option<&Quad> {
        self.a_coords.as_ref()
    }

    /// Cached line corners.
    #[must_use]
    pub fn line_coords(&self) -> Option<&Quad> {
        self.line_coords.as_ref()
    }

    /// Cached control coordinates, in catalog order.
    pub fn o_coords(&self) -> impl DoubleEndedIterator<Item = (ControlKey, &ControlCoords)> {
        self.o_coords.iter().map(|(k, c)| (*k, c))
    }

    /// Cached coordinates of one control.
    #[must_use]
    pub fn control_coords(&self, key: ControlKey) -> Option<&ControlCoords> {
        self.o_coords
            .iter()
            .find_map(|(k, c)| (*k == key).then_some(c))
    }

    fn coords(&self, absolute: bool, calculate: bool) -> Quad {
        if absolute {
            match self.a_coords {
                Some(q) if !calculate => q,
                _ => self.calc_a_coords(),
            }
        } else {
            match self.line_coords {
                Some(q) if !calculate => q,
                _ if self.is_in_group() => self.calc_a_coords(),
                _ => self.calc_line_coords(),
            }
        }
    }

    /// Corners `[tl, tr, br, bl]`, absolute or in view space.
    ///
    /// With `calculate`, or when nothing is cached yet, the corners are
    /// computed from the current geometry instead of read from the cache.
    #[must_use]
    pub fn get_coords(&self, absolute: bool, calculate: bool) -> [Point; 4] {
        self.coords(absolute, calculate).points()
    }

    /// Axis-aligned bounds of [`get_coords`](Self::get_coords).
    #[must_use]
    pub fn bounding_rect(&self, absolute: bool, calculate: bool) -> Rect {
        bounding_box(&self.get_coords(absolute, calculate))
    }

    /// Whether `point`, in view space, is inside the padded body.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.coords(false, false).contains_point(point)
    }

    /// Whether an edge of the object crosses an edge of `rect`.
    #[must_use]
    pub fn intersects_with_rect(&self, rect: Rect, absolute: bool, calculate: bool) -> bool {
        self.coords(absolute, calculate).intersects_rect_edges(rect)
    }

    /// Whether the object's bounds lie inside `rect`.
    #[must_use]
    pub fn is_contained_within_rect(&self, rect: Rect, absolute: bool, calculate: bool) -> bool {
        self.coords(absolute, calculate).is_within_rect(rect)
    }

    /// Whether any part of the object is inside `visible_world_rect`.
    #[must_use]
    pub fn is_on_screen(&self, visible_world_rect: Rect, calculate: bool) -> bool {
        let quad = self.coords(true, calculate);
        let r = visible_world_rect;
        if quad
            .points()
            .iter()
            .any(|p| p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1)
        {
            return true;
        }
        if quad.intersects_rect_edges(r) {
            return true;
        }
        quad.contains_point(r.center())
    }

    /// The visible control whose hit area contains `point` (view space).
    ///
    /// Controls are tested from last to first. Only the active object has
    /// targetable controls, and never while nested in a group.
    #[must_use]
    pub fn find_target_corner(
        &self,
        point: Point,
        for_touch: bool,
        is_active: bool,
    ) -> Option<ControlKey> {
        if !self.options.has_controls || !is_active || self.is_in_group() {
            return None;
        }
        self.o_coords
            .iter()
            .rev()
            .filter(|(key, _)| self.is_control_visible(*key))
            .find(|(_, coords)| {
                let area = if for_touch {
                    &coords.touch_corner
                } else {
                    &coords.corner
                };
                area.contains_point(point)
            })
            .map(|(key, _)| *key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    fn square() -> InteractiveObject {
        let mut object = InteractiveObject::new(TransformProps::new(0.0, 0.0, 100.0, 100.0));
        object.set_coords(false);
        object
    }

    #[test]
    fn absolute_corners_follow_origin() {
        let object = InteractiveObject::new(TransformProps::new(10.0, 20.0, 100.0, 50.0));
        let [tl, tr, br, bl] = object.get_coords(true, false);
        assert!(close(tl, Point::new(10.0, 20.0)));
        assert!(close(tr, Point::new(110.0, 20.0)));
        assert!(close(br, Point::new(110.0, 70.0)));
        assert!(close(bl, Point::new(10.0, 70.0)));

        let mut centered = TransformProps::new(60.0, 45.0, 100.0, 50.0);
        centered.origin_x = Origin::CENTER;
        centered.origin_y = Origin::CENTER;
        let object = InteractiveObject::new(centered);
        assert!(close(object.get_coords(true, true)[0], Point::new(10.0, 20.0)));
    }

    #[test]
    fn line_coords_include_padding_and_viewport() {
        let mut object = InteractiveObject::with_options(
            TransformProps::new(0.0, 0.0, 10.0, 10.0),
            ObjectOptions {
                padding: 2.0,
                ..ObjectOptions::default()
            },
        );
        object.set_viewport_transform(Affine::scale(2.0));
        object.set_coords(true);
        let q = *object.line_coords().unwrap();
        assert!(close(q.tl, Point::new(-2.0, -2.0)));
        assert!(close(q.br, Point::new(22.0, 22.0)));
        assert!(object.contains_point(Point::new(21.0, 21.0)));
        assert!(!object.contains_point(Point::new(23.0, 10.0)));
    }

    #[test]
    fn stroke_enters_dimensions() {
        let mut props = TransformProps::new(0.0, 0.0, 100.0, 50.0);
        props.stroke_width = 2.0;
        props.scale_x = 2.0;
        let mut object = InteractiveObject::new(props);
        assert_eq!(object.scaled_width(), 204.0);
        object.set_stroke_uniform(true);
        assert_eq!(object.scaled_width(), 202.0);
        assert_eq!(object.scaled_height(), 52.0);
    }

    #[test]
    fn skew_widens_dimensions() {
        let mut object = InteractiveObject::new(TransformProps::new(0.0, 0.0, 100.0, 100.0));
        object.set_skew_x(45.0);
        let dim = object.transformed_dimensions(&DimensionOverrides::default());
        assert!((dim.x - 200.0).abs() < 1e-9);
        assert!((dim.y - 100.0).abs() < 1e-9);
        let unskewed = object.transformed_dimensions(&DimensionOverrides {
            skew_x: Some(0.0),
            ..DimensionOverrides::default()
        });
        assert!((unskewed.x - 100.0).abs() < 1e-9);
    }

    #[test]
    fn scale_setter_clamps_and_flips() {
        let mut object = InteractiveObject::new(TransformProps::new(0.0, 0.0, 10.0, 10.0));
        object.set_scale_x(0.0);
        assert_eq!(object.props().scale_x, 0.0001);
        object.set_scale_x(-2.0);
        assert_eq!(object.props().scale_x, 2.0);
        assert!(object.props().flip_x);

        object.options_mut().min_scale_limit = 0.5;
        object.set_scale_y(0.1);
        assert_eq!(object.props().scale_y, 0.5);
        object.set_scale_y(-0.1);
        assert_eq!(object.props().scale_y, 0.5);
        assert!(object.props().flip_y);

        assert!(!object.set_scale_y(f64::NAN));
        assert_eq!(object.props().scale_y, 0.5);
    }

    #[test]
    fn setters_invalidate_own_matrix_and_revision() {
        let mut object = square();
        assert!(object.has_fresh_coords());
        let before = object.calc_own_matrix();
        assert!(object.set_left(10.0));
        assert!(!object.has_fresh_coords());
        let after = object.calc_own_matrix();
        assert_eq!(after.as_coeffs()[4] - before.as_coeffs()[4], 10.0);
        assert!(!object.set_top(f64::INFINITY));
    }

    #[test]
    fn controls_are_placed_in_view_space() {
        let object = square();
        let br = object.control_coords(ControlKey::BR).unwrap();
        assert!(close(br.position, Point::new(100.0, 100.0)));
        let mtr = object.control_coords(ControlKey::MTR).unwrap();
        assert!(close(mtr.position, Point::new(50.0, -40.0)));
        assert!(br.corner.contains_point(Point::new(105.0, 105.0)));
        assert!(!br.corner.contains_point(Point::new(108.0, 108.0)));
        assert!(br.touch_corner.contains_point(Point::new(108.0, 108.0)));
    }

    #[test]
    fn handle_offsets_are_not_zoomed() {
        let mut object = InteractiveObject::new(TransformProps::new(0.0, 0.0, 100.0, 100.0));
        object.set_viewport_transform(Affine::scale(2.0));
        object.set_coords(false);
        let mtr = object.control_coords(ControlKey::MTR).unwrap();
        assert!(close(mtr.position, Point::new(100.0, -40.0)));
        let br = object.control_coords(ControlKey::BR).unwrap();
        assert!(close(br.position, Point::new(200.0, 200.0)));
    }

    #[test]
    fn target_corner_requires_active_and_visible() {
        let mut object = square();
        let p = Point::new(100.0, 100.0);
        assert_eq!(object.find_target_corner(p, false, true), Some(ControlKey::BR));
        assert_eq!(object.find_target_corner(p, false, false), None);
        object.set_control_visible(ControlKey::BR, false);
        assert!(!object.is_control_visible(ControlKey::BR));
        assert_eq!(object.find_target_corner(p, false, true), None);
        object.set_control_visible(ControlKey::BR, true);
        object.set_group_matrix(Some(Affine::IDENTITY));
        assert_eq!(object.find_target_corner(p, false, true), None);
    }

    #[test]
    fn local_point_undoes_rotation() {
        let mut props = TransformProps::new(50.0, 50.0, 100.0, 100.0);
        props.origin_x = Origin::CENTER;
        props.origin_y = Origin::CENTER;
        props.angle = 90.0;
        let object = InteractiveObject::new(props);
        let local = object.to_local_point(Point::new(50.0, 100.0), Origin::CENTER, Origin::CENTER);
        assert!(close(local, Point::new(50.0, 0.0)));
        let from_tl = object.to_local_point(Point::new(50.0, 100.0), Origin::LEFT, Origin::TOP);
        assert!(close(from_tl, Point::new(100.0, 50.0)));
    }

    #[test]
    fn position_by_origin_round_trips() {
        let mut object = InteractiveObject::new(TransformProps::new(10.0, 10.0, 40.0, 20.0));
        object.set_angle(30.0);
        let br = object.position_by_origin(Origin::RIGHT, Origin::BOTTOM);
        object.set_scale_x(3.0);
        object.set_position_by_origin(br, Origin::RIGHT, Origin::BOTTOM);
        assert!(close(object.position_by_origin(Origin::RIGHT, Origin::BOTTOM), br));
    }

    #[test]
    fn centered_rotation_keeps_center() {
        let mut object = InteractiveObject::new(TransformProps::new(0.0, 0.0, 100.0, 50.0));
        let center = object.center_point();
        assert!(object.rotate(90.0));
        assert!(close(object.center_point(), center));
        assert_eq!(object.props().angle, 90.0);
    }

    #[test]
    fn scale_to_width_uses_bounds() {
        let mut object = InteractiveObject::new(TransformProps::new(0.0, 0.0, 100.0, 50.0));
        assert!(object.scale_to_width(300.0));
        assert!((object.props().scale_x - 3.0).abs() < 1e-9);
        assert!((object.props().scale_y - 3.0).abs() < 1e-9);
        assert!(object.has_fresh_coords());
    }

    #[test]
    fn bounding_queries() {
        let object = square();
        assert!(object.is_contained_within_rect(Rect::new(-1.0, -1.0, 101.0, 101.0), true, false));
        assert!(object.intersects_with_rect(Rect::new(50.0, 50.0, 150.0, 150.0), true, false));
        assert!(object.is_on_screen(Rect::new(90.0, 90.0, 500.0, 500.0), false));
        assert!(object.is_on_screen(Rect::new(10.0, 10.0, 20.0, 20.0), false));
        assert!(!object.is_on_screen(Rect::new(200.0, 200.0, 300.0, 300.0), false));
    }
}
