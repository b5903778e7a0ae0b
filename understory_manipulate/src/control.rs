// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative handle descriptors.
//!
//! A [`Control`] describes one handle: where it sits on the object's box,
//! how big its hit area is, what it does when dragged and which cursor it
//! shows. Controls carry no per-gesture state and are shared by every object
//! that uses the same [`ControlCatalog`](crate::ControlCatalog).

use core::f64::consts::FRAC_PI_2;
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Vec2};
use understory_affine::{cos, degrees_to_radians, sin};
use understory_precise_hit::Quad;

use crate::actions::{ActionHandler, MouseHandler, noop_action};
use crate::cursor::CursorStyle;
use crate::input::PointerInput;
use crate::object::InteractiveObject;
use crate::options::CanvasOptions;

/// Half the diagonal of a unit square.
const HALF_DIAGONAL: f64 = 0.707_106_781_2;

/// Key of a control within a catalog.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlKey(&'static str);

impl ControlKey {
    /// Middle of the left side.
    pub const ML: Self = Self("ml");
    /// Middle of the right side.
    pub const MR: Self = Self("mr");
    /// Middle of the bottom side.
    pub const MB: Self = Self("mb");
    /// Middle of the top side.
    pub const MT: Self = Self("mt");
    /// Top-left corner.
    pub const TL: Self = Self("tl");
    /// Top-right corner.
    pub const TR: Self = Self("tr");
    /// Bottom-left corner.
    pub const BL: Self = Self("bl");
    /// Bottom-right corner.
    pub const BR: Self = Self("br");
    /// Rotation handle above the top side.
    pub const MTR: Self = Self("mtr");

    /// A custom key.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The key's name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for ControlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ControlKey({})", self.0)
    }
}

impl fmt::Display for ControlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// What a gesture does, as reported to observers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActionName {
    /// Moving the whole object.
    Drag,
    /// Scaling both axes.
    #[default]
    Scale,
    /// Scaling the horizontal axis.
    ScaleX,
    /// Scaling the vertical axis.
    ScaleY,
    /// Skewing horizontally.
    SkewX,
    /// Skewing vertically.
    SkewY,
    /// Rotating.
    Rotate,
    /// Changing the width without scaling.
    Resizing,
}

impl ActionName {
    /// Stable identifier for logs and undo history.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::Scale => "scale",
            Self::ScaleX => "scaleX",
            Self::ScaleY => "scaleY",
            Self::SkewX => "skewX",
            Self::SkewY => "skewY",
            Self::Rotate => "rotate",
            Self::Resizing => "resizing",
        }
    }

    /// Whether the action scales or resizes the object.
    #[must_use]
    pub const fn is_scaling(self) -> bool {
        matches!(
            self,
            Self::Scale | Self::ScaleX | Self::ScaleY | Self::Resizing
        )
    }
}

/// Chooses the cursor shown over a control.
pub type CursorStyleHandler =
    fn(&PointerInput, &Control, &InteractiveObject, &CanvasOptions) -> CursorStyle;

/// Chooses the action a control performs for the given input.
pub type ActionNameHandler =
    fn(&PointerInput, &Control, &InteractiveObject, &CanvasOptions) -> ActionName;

/// Places a control: `dim` is the object's on-screen size, `matrix` maps the
/// object's centered, unrotated frame to the screen.
pub type PositionHandler = fn(&Control, Vec2, Affine, &InteractiveObject) -> Point;

/// Returns the control's static cursor.
pub fn default_cursor_style(
    _input: &PointerInput,
    control: &Control,
    _object: &InteractiveObject,
    _options: &CanvasOptions,
) -> CursorStyle {
    control.cursor()
}

/// Returns the control's static action name.
pub fn default_action_name(
    _input: &PointerInput,
    control: &Control,
    _object: &InteractiveObject,
    _options: &CanvasOptions,
) -> ActionName {
    control.action_name()
}

/// Places the control at `(x · dim.x + offset_x, y · dim.y + offset_y)` in
/// the object frame, then maps it through `matrix`.
pub fn default_position_handler(
    control: &Control,
    dim: Vec2,
    matrix: Affine,
    _object: &InteractiveObject,
) -> Point {
    let local = Point::new(
        control.x * dim.x + control.offset_x,
        control.y * dim.y + control.offset_y,
    );
    matrix * local
}

/// One handle on an object's box.
///
/// Built with `const` builder methods so catalogs can live in statics:
///
/// ```
/// use understory_manipulate::{ActionName, Control, actions};
///
/// const ROTATE: Control = Control::new(0.0, -0.5)
///     .with_offset(0.0, -40.0)
///     .with_action(ActionName::Rotate, actions::rotation_with_snapping)
///     .with_connection(true);
/// assert_eq!(ROTATE.offset(), (0.0, -40.0));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Control {
    x: f64,
    y: f64,
    offset_x: f64,
    offset_y: f64,
    size_x: Option<f64>,
    size_y: Option<f64>,
    touch_size_x: Option<f64>,
    touch_size_y: Option<f64>,
    visible: bool,
    action_name: ActionName,
    cursor: CursorStyle,
    with_connection: bool,
    action_handler: ActionHandler,
    mouse_down_handler: Option<MouseHandler>,
    mouse_up_handler: Option<MouseHandler>,
    cursor_style_handler: CursorStyleHandler,
    action_name_handler: ActionNameHandler,
    position_handler: PositionHandler,
}

impl Control {
    /// A visible control at `(x, y)` on the box, where `-0.5`/`0.5` are the
    /// edges, with no action.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            offset_x: 0.0,
            offset_y: 0.0,
            size_x: None,
            size_y: None,
            touch_size_x: None,
            touch_size_y: None,
            visible: true,
            action_name: ActionName::Scale,
            cursor: CursorStyle::Crosshair,
            with_connection: false,
            action_handler: noop_action,
            mouse_down_handler: None,
            mouse_up_handler: None,
            cursor_style_handler: default_cursor_style,
            action_name_handler: default_action_name,
            position_handler: default_position_handler,
        }
    }

    /// Offsets the handle by a fixed amount in view pixels.
    #[must_use]
    pub const fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Sets a mouse hit area of `x × y` view pixels; by default the object's
    /// square corner size is used.
    #[must_use]
    pub const fn with_size(mut self, x: f64, y: f64) -> Self {
        self.size_x = Some(x);
        self.size_y = Some(y);
        self
    }

    /// Sets a touch hit area of `x × y` view pixels.
    #[must_use]
    pub const fn with_touch_size(mut self, x: f64, y: f64) -> Self {
        self.touch_size_x = Some(x);
        self.touch_size_y = Some(y);
        self
    }

    /// Sets the default visibility.
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets the action name and handler.
    #[must_use]
    pub const fn with_action(mut self, name: ActionName, handler: ActionHandler) -> Self {
        self.action_name = name;
        self.action_handler = handler;
        self
    }

    /// Sets the handler without changing the action name.
    #[must_use]
    pub const fn with_action_handler(mut self, handler: ActionHandler) -> Self {
        self.action_handler = handler;
        self
    }

    /// Sets the static cursor.
    #[must_use]
    pub const fn with_cursor(mut self, cursor: CursorStyle) -> Self {
        self.cursor = cursor;
        self
    }

    /// Draws a line from the handle back to the box.
    #[must_use]
    pub const fn with_connection(mut self, with_connection: bool) -> Self {
        self.with_connection = with_connection;
        self
    }

    /// Runs `handler` when a gesture starts on this control.
    #[must_use]
    pub const fn with_mouse_down_handler(mut self, handler: MouseHandler) -> Self {
        self.mouse_down_handler = Some(handler);
        self
    }

    /// Runs `handler` when a gesture that involved this control ends.
    #[must_use]
    pub const fn with_mouse_up_handler(mut self, handler: MouseHandler) -> Self {
        self.mouse_up_handler = Some(handler);
        self
    }

    /// Replaces the cursor resolution.
    #[must_use]
    pub const fn with_cursor_style_handler(mut self, handler: CursorStyleHandler) -> Self {
        self.cursor_style_handler = handler;
        self
    }

    /// Replaces the action name resolution.
    #[must_use]
    pub const fn with_action_name_handler(mut self, handler: ActionNameHandler) -> Self {
        self.action_name_handler = handler;
        self
    }

    /// Replaces the placement function.
    #[must_use]
    pub const fn with_position_handler(mut self, handler: PositionHandler) -> Self {
        self.position_handler = handler;
        self
    }

    /// Horizontal position on the box.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Vertical position on the box.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Fixed offset in view pixels.
    #[must_use]
    pub const fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    /// Default visibility.
    #[must_use]
    pub const fn visible(&self) -> bool {
        self.visible
    }

    /// Static action name.
    #[must_use]
    pub const fn action_name(&self) -> ActionName {
        self.action_name
    }

    /// Static cursor.
    #[must_use]
    pub const fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    /// Whether a connecting line is drawn.
    #[must_use]
    pub const fn has_connection(&self) -> bool {
        self.with_connection
    }

    /// Handler run on every pointer move of a gesture on this control.
    #[must_use]
    pub const fn action_handler(&self) -> ActionHandler {
        self.action_handler
    }

    /// Handler run when a gesture starts, if any.
    #[must_use]
    pub const fn mouse_down_handler(&self) -> Option<MouseHandler> {
        self.mouse_down_handler
    }

    /// Handler run when a gesture ends, if any.
    #[must_use]
    pub const fn mouse_up_handler(&self) -> Option<MouseHandler> {
        self.mouse_up_handler
    }

    /// Resolves the cursor for `input`.
    #[must_use]
    pub fn cursor_style(
        &self,
        input: &PointerInput,
        object: &InteractiveObject,
        options: &CanvasOptions,
    ) -> CursorStyle {
        (self.cursor_style_handler)(input, self, object, options)
    }

    /// Resolves the action for `input`.
    #[must_use]
    pub fn resolve_action_name(
        &self,
        input: &PointerInput,
        object: &InteractiveObject,
        options: &CanvasOptions,
    ) -> ActionName {
        (self.action_name_handler)(input, self, object, options)
    }

    /// Handle center in screen space.
    #[must_use]
    pub fn position(&self, dim: Vec2, matrix: Affine, object: &InteractiveObject) -> Point {
        (self.position_handler)(self, dim, matrix, object)
    }

    /// Hit polygon for a handle centered at `center`, rotated by `angle`
    /// degrees.
    ///
    /// Handles with distinct explicit width and height are rectangles; all
    /// others are squares of the explicit size or, failing that,
    /// `object_corner_size`.
    #[must_use]
    pub fn calc_corner_coords(
        &self,
        angle: f64,
        object_corner_size: f64,
        center: Point,
        is_touch: bool,
    ) -> Quad {
        let (size_x, size_y) = if is_touch {
            (self.touch_size_x, self.touch_size_y)
        } else {
            (self.size_x, self.size_y)
        };
        let explicit = match (size_x, size_y) {
            (Some(x), Some(y)) if x != 0.0 && y != 0.0 => Some((x, y)),
            _ => None,
        };
        let angle = degrees_to_radians(angle);
        let (cos_half, sin_half, cos_half_comp, sin_half_comp) = match explicit {
            Some((x, y)) if x != y => {
                let triangle = y.atan2(x);
                let hypotenuse = (x * x + y * y).sqrt() / 2.0;
                let theta = triangle - angle;
                let theta_comp = FRAC_PI_2 - triangle - angle;
                (
                    hypotenuse * cos(theta),
                    hypotenuse * sin(theta),
                    hypotenuse * cos(theta_comp),
                    hypotenuse * sin(theta_comp),
                )
            }
            _ => {
                let size = explicit.map_or(object_corner_size, |(x, _)| x);
                let hypotenuse = size * HALF_DIAGONAL;
                let theta = degrees_to_radians(45.0) - angle;
                let c = hypotenuse * cos(theta);
                let s = hypotenuse * sin(theta);
                (c, s, c, s)
            }
        };
        Quad::new(
            Point::new(center.x - sin_half_comp, center.y - cos_half_comp),
            Point::new(center.x + cos_half, center.y - sin_half),
            Point::new(center.x + sin_half_comp, center.y + cos_half_comp),
            Point::new(center.x - cos_half, center.y + sin_half),
        )
    }
}
