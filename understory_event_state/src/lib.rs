// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: pointer bookkeeping for direct manipulation.
//!
//! This crate provides small, focused state machines for pointer interactions
//! that need memory across several events. Each module handles one pattern:
//!
//! - [`touch`]: Serialize multi-touch input onto a single *main* touch
//! - [`press`]: Remember what a press started on, so its release is delivered
//!   there even when the pointer is released over something else
//!
//! ## Design Philosophy
//!
//! Each state manager is designed to be:
//!
//! - **Minimal and focused**: Each handles one specific interaction pattern
//! - **Stateful but simple**: Track just enough state to compute transitions
//! - **Generic**: Accept application-specific pointer and target ID types
//!
//! The crate does not assume any particular event system or scene structure.
//! Callers feed it pointer ids, hit-test results and positions, and act on the
//! answers.
//!
//! ## Usage Patterns
//!
//! ### Main touch
//!
//! ```rust
//! use understory_event_state::touch::MainTouchState;
//!
//! let mut touches = MainTouchState::new();
//! assert!(touches.on_down(1));
//! assert!(!touches.on_down(2)); // second finger is ignored
//! assert!(touches.on_up(&1));
//! ```
//!
//! ### Press/release symmetry
//!
//! ```rust
//! use kurbo::Point;
//! use understory_event_state::press::{PressState, Release};
//!
//! let mut press = PressState::new(3.0);
//! press.on_down(42, Point::new(10.0, 20.0));
//!
//! // Released over element 99: element 42 still gets its release.
//! match press.on_up(Some(&99)) {
//!     Release::Elsewhere { original, .. } => assert_eq!(original, 42),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod press;
pub mod touch;
