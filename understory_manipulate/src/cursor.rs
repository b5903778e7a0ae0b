// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer cursors.

/// A pointer cursor, named after its CSS keyword.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorStyle {
    /// Platform default arrow.
    #[default]
    Default,
    /// Move/drag cross.
    Move,
    /// Action is forbidden.
    NotAllowed,
    /// Precise crosshair, used for rotation handles.
    Crosshair,
    /// Link/hand pointer.
    Pointer,
    /// Resize towards the east edge.
    EResize,
    /// Resize towards the south-east corner.
    SeResize,
    /// Resize towards the south edge.
    SResize,
    /// Resize towards the south-west corner.
    SwResize,
    /// Resize towards the west edge.
    WResize,
    /// Resize towards the north-west corner.
    NwResize,
    /// Resize towards the north edge.
    NResize,
    /// Resize towards the north-east corner.
    NeResize,
    /// Bidirectional north–south.
    NsResize,
    /// Bidirectional north-east–south-west.
    NeswResize,
    /// Bidirectional east–west.
    EwResize,
    /// Bidirectional north-west–south-east.
    NwseResize,
}

impl CursorStyle {
    /// The CSS `cursor` keyword.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Move => "move",
            Self::NotAllowed => "not-allowed",
            Self::Crosshair => "crosshair",
            Self::Pointer => "pointer",
            Self::EResize => "e-resize",
            Self::SeResize => "se-resize",
            Self::SResize => "s-resize",
            Self::SwResize => "sw-resize",
            Self::WResize => "w-resize",
            Self::NwResize => "nw-resize",
            Self::NResize => "n-resize",
            Self::NeResize => "ne-resize",
            Self::NsResize => "ns-resize",
            Self::NeswResize => "nesw-resize",
            Self::EwResize => "ew-resize",
            Self::NwseResize => "nwse-resize",
        }
    }
}

/// Scale cursors by octant, starting east and turning clockwise.
pub(crate) const SCALE_MAP: [CursorStyle; 9] = [
    CursorStyle::EResize,
    CursorStyle::SeResize,
    CursorStyle::SResize,
    CursorStyle::SwResize,
    CursorStyle::WResize,
    CursorStyle::NwResize,
    CursorStyle::NResize,
    CursorStyle::NeResize,
    CursorStyle::EResize,
];

/// Skew cursors by octant modulo four.
pub(crate) const SKEW_MAP: [CursorStyle; 4] = [
    CursorStyle::NsResize,
    CursorStyle::NeswResize,
    CursorStyle::EwResize,
    CursorStyle::NwseResize,
];
