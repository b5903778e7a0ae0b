// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Main touch tracking: serialize multi-touch input onto one pointer.
//!
//! The first touch to go down becomes the *main* touch. Until it is released,
//! every other touch is reported as secondary so callers can ignore it for
//! single-pointer interactions such as dragging a handle.
//!
//! ## Minimal example
//!
//! ```
//! use understory_event_state::touch::MainTouchState;
//!
//! let mut touches = MainTouchState::new();
//!
//! assert!(touches.on_down(7));
//! // A second finger lands while 7 is still down.
//! assert!(!touches.on_down(9));
//! assert!(!touches.is_main(&9));
//!
//! // Lifting the main finger frees the slot.
//! assert!(touches.on_up(&7));
//! assert_eq!(touches.main(), None);
//! ```

/// Tracks which touch pointer currently drives single-pointer interactions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MainTouchState<P> {
    main: Option<P>,
}

impl<P> Default for MainTouchState<P> {
    fn default() -> Self {
        Self { main: None }
    }
}

impl<P: Copy + PartialEq> MainTouchState<P> {
    /// Creates a tracker with no main touch.
    pub const fn new() -> Self {
        Self { main: None }
    }

    /// Records a touch going down, returning `true` if it is the main touch.
    ///
    /// The first touch down claims the main slot; later touches are secondary
    /// until the main touch is released.
    pub fn on_down(&mut self, id: P) -> bool {
        match self.main {
            None => {
                self.main = Some(id);
                true
            }
            Some(main) => main == id,
        }
    }

    /// Returns `true` if `id` is the main touch.
    ///
    /// With no main touch recorded every pointer is accepted, so a move that
    /// arrives without a preceding down is not dropped.
    pub fn is_main(&self, id: &P) -> bool {
        self.main.is_none_or(|main| main == *id)
    }

    /// Records a touch going up, returning `true` if it was the main touch.
    ///
    /// Releasing the main touch frees the slot for the next touch down.
    pub fn on_up(&mut self, id: &P) -> bool {
        match self.main {
            Some(main) if main == *id => {
                self.main = None;
                true
            }
            Some(_) => false,
            None => true,
        }
    }

    /// The current main touch, if any.
    pub fn main(&self) -> Option<P> {
        self.main
    }

    /// Forgets the main touch, for example after a cancelled gesture.
    pub fn reset(&mut self) {
        self.main = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_touch_becomes_main() {
        let mut t = MainTouchState::new();
        assert!(t.on_down(1_u64));
        assert_eq!(t.main(), Some(1));
        assert!(t.is_main(&1));
    }

    #[test]
    fn secondary_touches_are_ignored_until_main_lifts() {
        let mut t = MainTouchState::new();
        t.on_down(1_u64);
        assert!(!t.on_down(2));
        assert!(!t.is_main(&2));
        assert!(!t.on_up(&2));
        assert_eq!(t.main(), Some(1));

        assert!(t.on_up(&1));
        assert!(t.on_down(2));
        assert_eq!(t.main(), Some(2));
    }

    #[test]
    fn repeated_down_of_main_stays_main() {
        let mut t = MainTouchState::new();
        t.on_down(5_u32);
        assert!(t.on_down(5));
    }

    #[test]
    fn empty_tracker_accepts_everything() {
        let mut t = MainTouchState::<u8>::default();
        assert!(t.is_main(&3));
        assert!(t.on_up(&3));
    }

    #[test]
    fn reset_clears_main() {
        let mut t = MainTouchState::new();
        t.on_down('a');
        t.reset();
        assert_eq!(t.main(), None);
        assert!(t.on_down('b'));
    }
}
