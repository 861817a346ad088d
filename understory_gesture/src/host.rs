// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams between the transformer and the application embedding it.
//!
//! [`GestureHost`] covers the collaborators the transformer consumes: event
//! subscription, the interaction lock arbiter, target geometry and a one-shot
//! timer. [`TransformObserver`] receives the gesture lifecycle.
//!
//! Subscriptions, locks and timers are handed out as owned values. The
//! transformer keeps them until it gives them back, so each one is returned
//! exactly once.

use core::fmt;
use core::time::Duration;

use kurbo::Rect;
use understory_event_state::pointer::PointerId;

use crate::transform::Transform;

/// Where a subscription listens.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Only events dispatched to the attached target.
    Target,
    /// Every event on the input surface (for example the window), so moves
    /// keep arriving after the pointer leaves the target.
    Surface,
}

/// Kind of event a subscription delivers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Forward to [`GestureTransformer::on_pointer_down`](crate::GestureTransformer::on_pointer_down).
    PointerDown,
    /// Forward to [`GestureTransformer::on_pointer_move`](crate::GestureTransformer::on_pointer_move).
    PointerMove,
    /// Forward to [`GestureTransformer::on_pointer_up`](crate::GestureTransformer::on_pointer_up).
    PointerUp,
    /// Forward to [`GestureTransformer::on_pointer_cancel`](crate::GestureTransformer::on_pointer_cancel).
    PointerCancel,
    /// Forward to [`GestureTransformer::on_wheel`](crate::GestureTransformer::on_wheel).
    Wheel,
}

/// Services the embedding application provides to a
/// [`GestureTransformer`](crate::GestureTransformer).
///
/// All calls happen synchronously from inside the transformer's entry points.
pub trait GestureHost {
    /// Handle to the element being transformed.
    type Target;
    /// Active event subscription.
    type Subscription;
    /// Exclusive ownership of one pointer's event stream.
    type Lock;
    /// Scheduled one-shot timer.
    type Timer: PartialEq;

    /// Starts delivering `kind` events from `scope`.
    fn subscribe(&mut self, target: &Self::Target, scope: Scope, kind: EventKind)
    -> Self::Subscription;

    /// Stops a subscription returned by [`subscribe`](Self::subscribe).
    fn unsubscribe(&mut self, subscription: Self::Subscription);

    /// Asks for exclusive ownership of `pointer_id`'s stream on behalf of `target`.
    ///
    /// Returns `None` when another recognizer already owns it.
    fn request_lock(&mut self, target: &Self::Target, pointer_id: PointerId)
    -> Option<Self::Lock>;

    /// Gives back a lock returned by [`request_lock`](Self::request_lock).
    fn release_lock(&mut self, lock: Self::Lock);

    /// Layout box of `target` in pointer (client) coordinates, ignoring the
    /// gesture transform.
    fn bounding_rect(&self, target: &Self::Target) -> Rect;

    /// Schedules a one-shot timer. When it fires, the host calls
    /// [`GestureTransformer::on_timer`](crate::GestureTransformer::on_timer) with it.
    fn set_timeout(&mut self, delay: Duration) -> Self::Timer;

    /// Cancels a timer that has not fired yet.
    fn clear_timeout(&mut self, timer: Self::Timer);
}

/// Receives the gesture lifecycle.
///
/// Every method defaults to a no-op; implement only what you need. Starts
/// and ends are balanced: each `on_transform_start` is followed by exactly one
/// `on_transform_end` unless the transformer is dropped in between.
pub trait TransformObserver {
    /// A gesture began changing the transform.
    fn on_transform_start(&mut self) {}

    /// The transform changed.
    fn on_transform(&mut self, _transform: &Transform) {}

    /// The gesture finished.
    fn on_transform_end(&mut self) {}
}

impl TransformObserver for () {}

/// Lifecycle notification, as delivered to [`ObserverFn`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TransformEvent {
    /// See [`TransformObserver::on_transform_start`].
    Start,
    /// See [`TransformObserver::on_transform`].
    Update(Transform),
    /// See [`TransformObserver::on_transform_end`].
    End,
}

/// Adapts a closure into a [`TransformObserver`].
///
/// ```
/// use understory_gesture::{ObserverFn, TransformEvent, TransformObserver};
///
/// let mut seen = Vec::new();
/// let mut observer = ObserverFn(|ev: TransformEvent| seen.push(ev));
/// observer.on_transform_start();
/// observer.on_transform_end();
/// drop(observer);
/// assert_eq!(seen, vec![TransformEvent::Start, TransformEvent::End]);
/// ```
pub struct ObserverFn<F>(pub F);

impl<F> fmt::Debug for ObserverFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverFn").finish_non_exhaustive()
    }
}

impl<F: FnMut(TransformEvent)> TransformObserver for ObserverFn<F> {
    fn on_transform_start(&mut self) {
        (self.0)(TransformEvent::Start);
    }

    fn on_transform(&mut self, transform: &Transform) {
        (self.0)(TransformEvent::Update(*transform));
    }

    fn on_transform_end(&mut self) {
        (self.0)(TransformEvent::End);
    }
}

/// What the host should do with an event after the transformer saw it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventResponse {
    /// The event is not relevant to this transformer.
    Ignored,
    /// The event was recorded but the gesture has not claimed it; let the
    /// default action and propagation proceed.
    Observed,
    /// The gesture claimed the event; prevent the default action and stop
    /// propagation.
    Consumed,
}

impl EventResponse {
    /// Returns `true` if the host should prevent the default action.
    #[must_use]
    pub fn is_consumed(self) -> bool {
        self == Self::Consumed
    }
}
