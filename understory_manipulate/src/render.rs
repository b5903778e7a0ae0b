// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coalescing paint requests.

/// Collects paint requests between frames.
///
/// Any number of [`request_render_all`](Self::request_render_all) calls
/// before the next [`take_render_request`](Self::take_render_request) yield a
/// single pending paint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderRequest {
    pending: bool,
    immediate: u64,
}

impl RenderRequest {
    /// No paint pending.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: false,
            immediate: 0,
        }
    }

    /// Schedules a paint for the next frame.
    pub fn request_render_all(&mut self) {
        self.pending = true;
    }

    /// Whether a paint is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consumes the pending paint, returning whether there was one.
    pub fn take_render_request(&mut self) -> bool {
        core::mem::take(&mut self.pending)
    }

    /// Records a synchronous paint. A pending request is satisfied by it.
    pub fn render_now(&mut self) {
        self.pending = false;
        self.immediate = self.immediate.wrapping_add(1);
    }

    /// Number of synchronous paints so far.
    #[must_use]
    pub fn immediate_renders(&self) -> u64 {
        self.immediate
    }
}
