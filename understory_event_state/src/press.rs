// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press/release symmetry: remember what a press started on so the release
//! can be delivered to it even when the pointer ends up elsewhere.
//!
//! ## Usage
//!
//! 1) On pointer down, call [`PressState::on_down`] with the pressed target and position.
//! 2) On pointer move, call [`PressState::on_move`]; once the pointer leaves the
//!    click tolerance the press is no longer a click.
//! 3) On pointer up, call [`PressState::on_up`] with whatever is under the pointer now.
//!    The returned [`Release`] says whether the original target also needs a release.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_event_state::press::{PressState, Release};
//!
//! let mut press = PressState::new(0.0);
//! press.on_down("handle-br", Point::new(100.0, 100.0));
//! press.on_move(Point::new(180.0, 140.0));
//!
//! // Released over a different handle: the original still gets its release.
//! let release = press.on_up(Some(&"handle-tl"));
//! assert_eq!(release, Release::Elsewhere { original: "handle-br", is_click: false });
//! ```

use kurbo::Point;

/// Outcome of [`PressState::on_up`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release<T> {
    /// No press was being tracked.
    Untracked,
    /// Released over the target that was pressed.
    Same {
        /// The pointer never left the click tolerance.
        is_click: bool,
    },
    /// Released somewhere else; `original` still needs its release delivered.
    Elsewhere {
        /// The target the press started on.
        original: T,
        /// The pointer never left the click tolerance.
        is_click: bool,
    },
}

/// Tracks the target of the current press.
#[derive(Clone, Debug)]
pub struct PressState<T> {
    pressed: Option<T>,
    down_pos: Option<Point>,
    is_click: bool,
    tolerance: f64,
}

impl<T: PartialEq> Default for PressState<T> {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl<T: PartialEq> PressState<T> {
    /// Creates a tracker; moves farther than `tolerance` from the press
    /// position turn the press into a drag.
    pub const fn new(tolerance: f64) -> Self {
        Self {
            pressed: None,
            down_pos: None,
            is_click: false,
            tolerance,
        }
    }

    /// Starts tracking a press on `target` at `pos`, replacing any earlier one.
    pub fn on_down(&mut self, target: T, pos: Point) {
        self.pressed = Some(target);
        self.down_pos = Some(pos);
        self.is_click = true;
    }

    /// Records pointer movement during the press.
    pub fn on_move(&mut self, pos: Point) {
        if let Some(down) = self.down_pos
            && (pos - down).hypot2() > self.tolerance * self.tolerance
        {
            self.is_click = false;
        }
    }

    /// Ends the press. `released` is the target under the pointer now.
    pub fn on_up(&mut self, released: Option<&T>) -> Release<T> {
        let is_click = self.is_click;
        self.down_pos = None;
        self.is_click = false;
        match self.pressed.take() {
            None => Release::Untracked,
            Some(original) if released == Some(&original) => Release::Same { is_click },
            Some(original) => Release::Elsewhere { original, is_click },
        }
    }

    /// The target of the current press.
    pub fn pressed(&self) -> Option<&T> {
        self.pressed.as_ref()
    }

    /// Returns `true` while a press is tracked.
    pub fn is_pressed(&self) -> bool {
        self.pressed.is_some()
    }

    /// Whether the current press is still within the click tolerance.
    pub fn is_click(&self) -> bool {
        self.is_click
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_over_same_target() {
        let mut p = PressState::new(2.0);
        p.on_down(3_u32, Point::new(10.0, 10.0));
        p.on_move(Point::new(11.0, 11.0));
        assert_eq!(p.on_up(Some(&3)), Release::Same { is_click: true });
        assert!(!p.is_pressed());
    }

    #[test]
    fn release_elsewhere_returns_original_once() {
        let mut p = PressState::new(2.0);
        p.on_down(3_u32, Point::ORIGIN);
        assert_eq!(
            p.on_up(Some(&4)),
            Release::Elsewhere {
                original: 3,
                is_click: true
            }
        );
        assert_eq!(p.on_up(Some(&4)), Release::Untracked);
    }

    #[test]
    fn release_over_nothing_is_elsewhere() {
        let mut p = PressState::new(0.0);
        p.on_down('x', Point::ORIGIN);
        assert!(matches!(
            p.on_up(None),
            Release::Elsewhere { original: 'x', .. }
        ));
    }

    #[test]
    fn moving_past_tolerance_cancels_click() {
        let mut p = PressState::new(2.0);
        p.on_down(1_u8, Point::ORIGIN);
        p.on_move(Point::new(1.0, 1.0));
        assert!(p.is_click());
        p.on_move(Point::new(3.0, 0.0));
        assert!(!p.is_click());
        p.on_move(Point::ORIGIN);
        assert_eq!(p.on_up(Some(&1)), Release::Same { is_click: false });
    }

    #[test]
    fn untracked_release() {
        let mut p = PressState::<u8>::default();
        assert_eq!(p.on_up(Some(&1)), Release::Untracked);
        assert!(p.pressed().is_none());
    }
}
