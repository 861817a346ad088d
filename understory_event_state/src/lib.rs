// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: host-agnostic input primitives for gesture recognizers.
//!
//! This crate provides the small, stateful building blocks that sit between a
//! host's raw input and a gesture recognizer:
//!
//! - [`pointer`]: Contact identifiers, device kinds, button masks and pointer events
//! - [`track`]: Two-slot contact tracking with slop measurement and primary promotion
//! - [`wheel`]: Wheel delta formats and their normalization into unit steps
//!
//! ## Design Philosophy
//!
//! Each piece is designed to be:
//!
//! - **Minimal and focused**: Each handles one specific concern
//! - **Stateful but simple**: Track just enough state to compute transitions
//! - **Integration-friendly**: Hosts translate native events once, at the edge
//!
//! The crate does not assume any particular UI framework or event system.
//! Hosts convert DOM, `winit`, or `ui-events` input into [`pointer::PointerEvent`]
//! and [`wheel::WheelEvent`] and feed them to a recognizer such as
//! `understory_gesture`.
//!
//! ## Contact Tracking
//!
//! ```rust
//! use kurbo::Point;
//! use understory_event_state::pointer::PointerId;
//! use understory_event_state::track::PointerTracks;
//!
//! let mut tracks = PointerTracks::new();
//! tracks.begin(PointerId(1), Point::new(100.0, 100.0));
//! tracks.update(PointerId(1), Point::new(104.0, 103.0));
//!
//! // Still within an 8px slop: treat as a click, not a drag.
//! assert!(!tracks.primary().unwrap().exceeds(8.0));
//! ```
//!
//! ## Wheel Normalization
//!
//! ```rust
//! use understory_event_state::wheel::WheelDelta;
//!
//! assert_eq!(WheelDelta::Lines(-3.0).step(), 1);
//! assert_eq!(WheelDelta::LegacyDetail(3.0).step(), -1);
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`pointer::PointerId`] and [`pointer::PointerKind`]
//!
//! This crate is `no_std` compatible.

#![no_std]

pub mod pointer;
pub mod track;
pub mod wheel;
