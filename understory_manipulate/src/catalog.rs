// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared, ordered control tables.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::actions::{
    change_width, rotation_style_handler, rotation_with_snapping, scale_cursor_style_handler,
    scale_or_skew_action_name, scale_skew_cursor_style_handler, scaling_equally,
    scaling_x_or_skewing_y, scaling_y_or_skewing_x,
};
use crate::control::{ActionName, Control, ControlKey};

/// Side handles: scale along one axis, or skew along the other while the
/// alternate action key is held.
const fn side(x: f64, y: f64, horizontal: bool) -> Control {
    let control = Control::new(x, y)
        .with_cursor_style_handler(scale_skew_cursor_style_handler)
        .with_action_name_handler(scale_or_skew_action_name);
    if horizontal {
        control.with_action_handler(scaling_x_or_skewing_y)
    } else {
        control.with_action_handler(scaling_y_or_skewing_x)
    }
}

const fn corner(x: f64, y: f64) -> Control {
    Control::new(x, y)
        .with_cursor_style_handler(scale_cursor_style_handler)
        .with_action(ActionName::Scale, scaling_equally)
}

const ROTATION: Control = Control::new(0.0, -0.5)
    .with_offset(0.0, -40.0)
    .with_action(ActionName::Rotate, rotation_with_snapping)
    .with_cursor_style_handler(rotation_style_handler)
    .with_connection(true);

const fn width_side(x: f64) -> Control {
    Control::new(x, 0.0)
        .with_cursor_style_handler(scale_skew_cursor_style_handler)
        .with_action(ActionName::Resizing, change_width)
}

/// The standard nine handles: four sides, four corners and the rotation
/// handle.
pub static OBJECT_CONTROLS: &[(ControlKey, Control)] = &[
    (ControlKey::ML, side(-0.5, 0.0, true)),
    (ControlKey::MR, side(0.5, 0.0, true)),
    (ControlKey::MB, side(0.0, 0.5, false)),
    (ControlKey::MT, side(0.0, -0.5, false)),
    (ControlKey::TL, corner(-0.5, -0.5)),
    (ControlKey::TR, corner(0.5, -0.5)),
    (ControlKey::BL, corner(-0.5, 0.5)),
    (ControlKey::BR, corner(0.5, 0.5)),
    (ControlKey::MTR, ROTATION),
];

/// [`OBJECT_CONTROLS`] with the left and right handles changing the width of
/// a fixed-height box instead of scaling it.
pub static TEXTBOX_CONTROLS: &[(ControlKey, Control)] = &[
    (ControlKey::ML, width_side(-0.5)),
    (ControlKey::MR, width_side(0.5)),
    (ControlKey::MB, side(0.0, 0.5, false)),
    (ControlKey::MT, side(0.0, -0.5, false)),
    (ControlKey::TL, corner(-0.5, -0.5)),
    (ControlKey::TR, corner(0.5, -0.5)),
    (ControlKey::BL, corner(-0.5, 0.5)),
    (ControlKey::BR, corner(0.5, 0.5)),
    (ControlKey::MTR, ROTATION),
];

#[derive(Clone)]
enum Table {
    Static(&'static [(ControlKey, Control)]),
    Shared(Arc<[(ControlKey, Control)]>),
}

/// An ordered set of controls shared by every object of a kind.
///
/// Declaration order matters: hit testing walks the table back to front, so
/// later controls win where hit areas overlap. Cloning is cheap.
#[derive(Clone)]
pub struct ControlCatalog {
    table: Table,
}

impl ControlCatalog {
    /// A catalog with no controls.
    #[must_use]
    pub const fn empty() -> Self {
        Self::from_static(&[])
    }

    /// Wraps a static table.
    #[must_use]
    pub const fn from_static(table: &'static [(ControlKey, Control)]) -> Self {
        Self {
            table: Table::Static(table),
        }
    }

    /// Builds a shared table at runtime.
    #[must_use]
    pub fn from_entries(entries: Vec<(ControlKey, Control)>) -> Self {
        Self {
            table: Table::Shared(entries.into()),
        }
    }

    /// [`OBJECT_CONTROLS`].
    #[must_use]
    pub const fn object() -> Self {
        Self::from_static(OBJECT_CONTROLS)
    }

    /// [`TEXTBOX_CONTROLS`].
    #[must_use]
    pub const fn textbox() -> Self {
        Self::from_static(TEXTBOX_CONTROLS)
    }

    /// The entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[(ControlKey, Control)] {
        match &self.table {
            Table::Static(t) => t,
            Table::Shared(t) => t,
        }
    }

    /// Looks up a control.
    #[must_use]
    pub fn get(&self, key: ControlKey) -> Option<&Control> {
        self.entries()
            .iter()
            .find_map(|(k, c)| (*k == key).then_some(c))
    }

    /// Iterates entries in declaration order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (ControlKey, &Control)> {
        self.entries().iter().map(|(k, c)| (*k, c))
    }

    /// Number of controls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether there are no controls.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Returns a copy of this catalog with `control` stored under `key`,
    /// replacing an existing entry in place or appending a new one.
    #[must_use]
    pub fn with(&self, key: ControlKey, control: Control) -> Self {
        let mut entries: Vec<_> = self.entries().to_vec();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = control,
            None => entries.push((key, control)),
        }
        Self::from_entries(entries)
    }
}

impl Default for ControlCatalog {
    fn default() -> Self {
        Self::object()
    }
}

impl fmt::Debug for ControlCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries().iter().map(|(k, _)| k))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_order() {
        let keys: Vec<_> = ControlCatalog::object().iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            [
                ControlKey::ML,
                ControlKey::MR,
                ControlKey::MB,
                ControlKey::MT,
                ControlKey::TL,
                ControlKey::TR,
                ControlKey::BL,
                ControlKey::BR,
                ControlKey::MTR,
            ]
        );
    }

    #[test]
    fn rotation_handle_sits_above_the_box() {
        let catalog = ControlCatalog::object();
        let mtr = catalog.get(ControlKey::MTR).unwrap();
        assert_eq!((mtr.x(), mtr.y()), (0.0, -0.5));
        assert_eq!(mtr.offset(), (0.0, -40.0));
        assert_eq!(mtr.action_name(), ActionName::Rotate);
        assert!(mtr.has_connection());
    }

    #[test]
    fn textbox_sides_resize() {
        let catalog = ControlCatalog::textbox();
        assert_eq!(
            catalog.get(ControlKey::ML).unwrap().action_name(),
            ActionName::Resizing
        );
        assert_eq!(
            catalog.get(ControlKey::MT).unwrap().action_name(),
            ActionName::Scale
        );
    }

    #[test]
    fn with_replaces_or_appends() {
        let custom = ControlKey::new("custom");
        let catalog = ControlCatalog::object()
            .with(ControlKey::TL, Control::new(-0.5, -0.5).with_visible(false))
            .with(custom, Control::new(0.0, 0.0));
        assert_eq!(catalog.len(), 10);
        assert!(!catalog.get(ControlKey::TL).unwrap().visible());
        assert_eq!(catalog.iter().next_back().map(|(k, _)| k), Some(custom));
        assert!(ControlCatalog::empty().is_empty());
    }
}
