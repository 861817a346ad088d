// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: pointer and wheel gestures to a clamped 2D transform.
//!
//! ## Overview
//!
//! [`GestureTransformer`] recognizes drag-to-pan, pinch-to-zoom, two-finger
//! rotate and wheel-to-zoom on one target element, and maintains a
//! [`Transform`] (`x`, `y`, uniform `scale`, `rotate`) for it. The transform
//! is always clamped: scale to [`GestureConfig::min_scale`]..=[`GestureConfig::max_scale`],
//! offset to an optional bounding box.
//!
//! The crate is headless. It does not render, does not read a clock and does
//! not own an event loop. The embedding application implements [`GestureHost`]
//! to provide:
//!
//! - event subscription (so the transformer can ask for surface-wide moves
//!   while a gesture is open),
//! - an interaction lock arbiter that grants one recognizer at a time the
//!   ownership of a pointer's stream,
//! - the target's layout box,
//! - a one-shot timer, used to detect the end of a wheel burst.
//!
//! and forwards events to the `on_*` entry points. Lifecycle notifications go
//! to a [`TransformObserver`].
//!
//! ## Gesture model
//!
//! ```text
//! Idle --press--> Pending --travel >= threshold, lock granted--> Pan <--> Pinch
//!   ^                |                                              |
//!   +----------------+------ release all / cancel / lock denied ----+
//! ```
//!
//! - A press opens a session. Travel below [`GestureConfig::threshold`] is
//!   treated as jitter; past it, the transformer requests the pointer's lock.
//!   A denied lock means another recognizer (a scrolling ancestor, say) owns
//!   the input, and the session aborts silently. The same happens without
//!   asking when [`GestureConfig::axis`] is set and the travel runs mostly
//!   along the other axis.
//! - A second contact upgrades to [`GesturePhase::Pinch`] once it travels
//!   past the threshold and its own lock is granted.
//! - When the primary contact lifts during a pinch, the secondary is promoted
//!   and the gesture continues as a pan without a jump.
//! - Wheel events zoom about the cursor by one step each; the wheel gesture
//!   ends after [`GestureConfig::wheel_end_delay`] of silence.
//!
//! Starts and ends reported to the observer are balanced, and every lock,
//! subscription and timer is returned to the host before the end is
//! reported, including when the transformer is dropped.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//!
//! use kurbo::Rect;
//! use understory_event_state::pointer::{PointerEvent, PointerId};
//! use understory_gesture::{
//!     EventKind, GestureHost, GestureTransformer, ObserverFn, Scope, TransformEvent,
//! };
//!
//! /// The element being transformed; the transformer only ever borrows it.
//! struct Canvas;
//!
//! /// Grants every lock; subscriptions and timers are plain counters.
//! #[derive(Default)]
//! struct Host {
//!     next: u32,
//! }
//!
//! impl GestureHost for Host {
//!     type Target = Canvas;
//!     type Subscription = u32;
//!     type Lock = PointerId;
//!     type Timer = u32;
//!
//!     fn subscribe(&mut self, _: &Canvas, _: Scope, _: EventKind) -> u32 {
//!         self.next += 1;
//!         self.next
//!     }
//!     fn unsubscribe(&mut self, _: u32) {}
//!     fn request_lock(&mut self, _: &Canvas, pointer_id: PointerId) -> Option<PointerId> {
//!         Some(pointer_id)
//!     }
//!     fn release_lock(&mut self, _: PointerId) {}
//!     fn bounding_rect(&self, _: &Canvas) -> Rect {
//!         Rect::new(0.0, 0.0, 400.0, 300.0)
//!     }
//!     fn set_timeout(&mut self, _: Duration) -> u32 {
//!         self.next += 1;
//!         self.next
//!     }
//!     fn clear_timeout(&mut self, _: u32) {}
//! }
//!
//! let mut events = Vec::new();
//! let observer = ObserverFn(|ev: TransformEvent| events.push(ev));
//! let mut gestures = GestureTransformer::new(Host::default(), observer);
//! gestures.attach(Canvas).unwrap();
//!
//! let finger = PointerEvent::touch(1, (100.0, 100.0));
//! gestures.on_pointer_down(&finger);
//! gestures.on_pointer_move(&finger.at((104.0, 100.0))); // within the 8px slop
//! gestures.on_pointer_move(&finger.at((110.0, 100.0)));
//! gestures.on_pointer_up(&finger.at((110.0, 100.0)));
//! assert_eq!(gestures.transform().x, 10.0);
//! drop(gestures);
//!
//! assert_eq!(events.len(), 3);
//! assert_eq!(events[0], TransformEvent::Start);
//! assert!(matches!(events[1], TransformEvent::Update(t) if t.x == 10.0));
//! assert_eq!(events[2], TransformEvent::End);
//! ```
//!
//! ## Two-pointer math
//!
//! With `V0`/`V1` the primary-to-secondary vectors when the pinch began and
//! now, scale is `start_scale * |V1|² / |V0|²`, rotation adds
//! `atan2(V0.x, V0.y) - atan2(V1.x, V1.y)`, and translation adds `V1 - V0`.
//! See [`transform::pinch`].
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Transform`] and [`GestureConfig`]
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod error;
pub mod host;
pub mod transform;
mod transformer;

pub use config::{
    Axis, Capabilities, DEFAULT_THRESHOLD, DEFAULT_WHEEL_END_DELAY, GestureConfig,
    WHEEL_ZOOM_STEP,
};
pub use error::GestureError;
pub use host::{
    EventKind, EventResponse, GestureHost, ObserverFn, Scope, TransformEvent, TransformObserver,
};
pub use transform::Transform;
pub use transformer::{GesturePhase, GestureTransformer};
