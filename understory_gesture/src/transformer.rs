// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Rect};
use log::{debug, trace};
use understory_event_state::pointer::PointerEvent;
use understory_event_state::track::{PointerTracks, Release, Slot};
use understory_event_state::wheel::WheelEvent;

use crate::config::{GestureConfig, WHEEL_ZOOM_STEP};
use crate::error::GestureError;
use crate::host::{EventKind, EventResponse, GestureHost, Scope, TransformObserver};
use crate::transform::{self, Transform};

/// Subscriptions held while attached.
const TARGET_EVENTS: [EventKind; 2] = [EventKind::PointerDown, EventKind::Wheel];

/// Surface-wide subscriptions held while a pointer gesture is open.
///
/// `PointerDown` is included so a second contact landing outside the target
/// still joins the gesture.
const SESSION_EVENTS: [EventKind; 4] = [
    EventKind::PointerMove,
    EventKind::PointerUp,
    EventKind::PointerCancel,
    EventKind::PointerDown,
];

/// Where a pointer gesture stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// No contact is tracked.
    Idle,
    /// Contacts are tracked but none has travelled past the threshold yet.
    Pending,
    /// One contact owns the gesture and drags the element.
    Pan,
    /// Two contacts own the gesture and pinch/rotate the element.
    Pinch,
}

/// A fixed set of subscriptions, returned to the host together.
struct Subscriptions<S, const N: usize>([Option<S>; N]);

impl<S, const N: usize> Subscriptions<S, N> {
    fn none() -> Self {
        Self(core::array::from_fn(|_| None))
    }

    fn subscribe<H>(host: &mut H, target: &H::Target, scope: Scope, kinds: [EventKind; N]) -> Self
    where
        H: GestureHost<Subscription = S>,
    {
        Self(kinds.map(|kind| Some(host.subscribe(target, scope, kind))))
    }

    fn release<H>(&mut self, host: &mut H)
    where
        H: GestureHost<Subscription = S>,
    {
        for slot in &mut self.0 {
            if let Some(subscription) = slot.take() {
                host.unsubscribe(subscription);
            }
        }
    }
}

/// State from the first qualifying press until every contact is gone.
struct Session<H: GestureHost> {
    /// Configuration snapshot taken when the session opened.
    config: GestureConfig,
    tracks: PointerTracks,
    /// Past the threshold with the primary contact's lock held.
    transforming: bool,
    /// Two-contact mode.
    pinching: bool,
    /// Transform the current contact measurements are relative to.
    baseline: Transform,
    primary_lock: Option<H::Lock>,
    secondary_lock: Option<H::Lock>,
    subscriptions: Subscriptions<H::Subscription, 4>,
}

/// A run of wheel events closed by a debounce timer.
struct WheelBurst<T> {
    timer: T,
    /// Origin of the target's layout box, queried when the burst started.
    origin: Point,
}

/// Turns pointer and wheel input into a clamped [`Transform`].
///
/// See the [crate documentation](crate) for the gesture model. The
/// transformer owns every subscription, lock and timer it obtains from the
/// host and returns them on [`detach`](Self::detach), when a gesture ends, and
/// on drop.
pub struct GestureTransformer<H: GestureHost, O: TransformObserver = ()> {
    host: H,
    observer: O,
    config: GestureConfig,
    transform: Transform,
    bounds: Option<Rect>,
    target: Option<H::Target>,
    target_subscriptions: Subscriptions<H::Subscription, 2>,
    session: Option<Session<H>>,
    wheel: Option<WheelBurst<H::Timer>>,
    /// The observer has seen a start without a matching end.
    notified: bool,
}

impl<H: GestureHost, O: TransformObserver> GestureTransformer<H, O> {
    /// Creates a detached transformer with the default configuration and the
    /// identity transform.
    pub fn new(host: H, observer: O) -> Self {
        Self {
            host,
            observer,
            config: GestureConfig::default(),
            transform: Transform::IDENTITY,
            bounds: None,
            target: None,
            target_subscriptions: Subscriptions::none(),
            session: None,
            wheel: None,
            notified: false,
        }
    }

    /// The host services.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host services.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The lifecycle observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access to the lifecycle observer.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Configuration used by the next gesture.
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Current transform.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Current translation bounds.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.bounds
    }

    /// Returns `true` between [`attach`](Self::attach) and [`detach`](Self::detach).
    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }

    /// Where the pointer gesture stands.
    pub fn phase(&self) -> GesturePhase {
        match &self.session {
            None => GesturePhase::Idle,
            Some(s) if !s.transforming => GesturePhase::Pending,
            Some(s) if s.pinching => GesturePhase::Pinch,
            Some(_) => GesturePhase::Pan,
        }
    }

    /// Returns `true` while a pointer gesture owns its input.
    pub fn is_transforming(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.transforming)
    }

    /// Returns `true` while a wheel burst awaits its debounce timer.
    pub fn is_wheel_active(&self) -> bool {
        self.wheel.is_some()
    }

    /// Number of contacts currently tracked.
    pub fn tracked_pointers(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.tracks.len())
    }

    /// Replaces the configuration.
    ///
    /// A gesture already in progress keeps the configuration it started with.
    ///
    /// # Errors
    ///
    /// Returns the error from [`GestureConfig::validate`]; the previous
    /// configuration stays in effect.
    pub fn configure(&mut self, config: GestureConfig) -> Result<(), GestureError> {
        self.config = config.validate()?;
        debug!("gesture configuration updated: {:?}", self.config);
        Ok(())
    }

    /// Replaces the translation bounds, re-clamping the transform right away.
    ///
    /// The observer receives an update only if the transform changed.
    pub fn set_bounding_box(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
        let clamped = transform::clamp(self.transform, &self.active_config(), bounds);
        if clamped != self.transform {
            self.transform = clamped;
            self.observer.on_transform(&clamped);
        }
    }

    /// Sets the transform directly, for example when restoring a saved view.
    ///
    /// The state is clamped but the observer is not notified. A gesture in
    /// progress continues from the new state.
    pub fn set_initial_state(&mut self, state: Transform) {
        self.transform = transform::clamp(state, &self.active_config(), self.bounds);
        self.rebase_session();
    }

    /// Subscribes to pointer presses and wheel events on `target`.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::AlreadyAttached`] if a target is already attached.
    pub fn attach(&mut self, target: H::Target) -> Result<(), GestureError> {
        if self.target.is_some() {
            return Err(GestureError::AlreadyAttached);
        }
        self.target_subscriptions =
            Subscriptions::subscribe(&mut self.host, &target, Scope::Target, TARGET_EVENTS);
        self.target = Some(target);
        debug!("gesture transformer attached");
        Ok(())
    }

    /// Aborts any gesture and returns every subscription, lock and timer.
    ///
    /// If a gesture had started, the observer receives its end.
    pub fn detach(&mut self) {
        self.teardown(true);
    }

    /// Handles a press on the target, or anywhere on the surface while a
    /// gesture is open.
    pub fn on_pointer_down(&mut self, event: &PointerEvent) -> EventResponse {
        if self.target.is_none() {
            return EventResponse::Ignored;
        }
        if self.session.is_none() {
            return self.open_session(event);
        }
        let Some(session) = self.session.as_mut() else {
            return EventResponse::Ignored;
        };
        if !session.config.uses_second_pointer() {
            return EventResponse::Ignored;
        }
        match session.tracks.begin(event.pointer_id, event.position) {
            Some(Slot::Secondary) => {
                debug!("pointer {:?} joined as secondary", event.pointer_id);
                EventResponse::Observed
            }
            _ => EventResponse::Ignored,
        }
    }

    /// Handles movement of a tracked contact.
    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> EventResponse {
        let Some(session) = self.session.as_mut() else {
            return EventResponse::Ignored;
        };
        let Some(slot) = session.tracks.update(event.pointer_id, event.position) else {
            return EventResponse::Ignored;
        };
        let threshold = session.config.threshold;

        if slot == Slot::Primary && !session.transforming {
            let Some(track) = session.tracks.get(slot).filter(|t| t.exceeds(threshold)) else {
                return EventResponse::Observed;
            };
            if !session.config.allows_start(track.total_offset()) {
                self.finish_session("travel along the restricted axis");
                return EventResponse::Ignored;
            }
            if !self.claim(Slot::Primary) {
                self.finish_session("primary lock denied");
                return EventResponse::Ignored;
            }
            self.begin_transforming();
        }

        if slot == Slot::Secondary
            && self.session.as_ref().is_some_and(|s| {
                !s.pinching && s.tracks.get(slot).is_some_and(|t| t.exceeds(threshold))
            })
        {
            if !(self.claim(Slot::Primary) && self.claim(Slot::Secondary)) {
                self.finish_session("lock denied for two-pointer gesture");
                return EventResponse::Ignored;
            }
            if let Some(session) = self.session.as_mut() {
                session.pinching = true;
                session.tracks.rebase_primary();
                session.baseline = self.transform;
                debug!("gesture upgraded to two pointers");
            }
            self.begin_transforming();
        }

        let Some(session) = self.session.as_ref() else {
            return EventResponse::Ignored;
        };
        // A secondary contact drives nothing until it owns its stream.
        if !session.transforming || (slot == Slot::Secondary && !session.pinching) {
            return EventResponse::Observed;
        }
        let config = session.config;
        let candidate = match (session.pinching, session.tracks.span()) {
            (true, Some((v0, v1))) => transform::pinch(session.baseline, v0, v1, &config),
            _ => {
                let travel = session
                    .tracks
                    .primary()
                    .map(|t| t.total_offset())
                    .unwrap_or_default();
                transform::pan(session.baseline, travel, &config)
            }
        };
        self.apply(candidate, &config);
        EventResponse::Consumed
    }

    /// Handles release of a tracked contact.
    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> EventResponse {
        let Some(session) = self.session.as_mut() else {
            return EventResponse::Ignored;
        };
        let Some(release) = session.tracks.end(event.pointer_id) else {
            return EventResponse::Ignored;
        };
        let transforming = session.transforming;
        let response = if transforming {
            EventResponse::Consumed
        } else {
            EventResponse::Observed
        };

        match release {
            Release::Last => {
                self.finish_session("released");
                return response;
            }
            Release::Secondary => {
                if let Some(lock) = session.secondary_lock.take() {
                    self.host.release_lock(lock);
                }
                debug!("secondary pointer {:?} released", event.pointer_id);
            }
            Release::Promoted => {
                let released = session.primary_lock.take();
                session.primary_lock = session.secondary_lock.take();
                if let Some(lock) = released {
                    self.host.release_lock(lock);
                }
                debug!(
                    "primary pointer {:?} released, secondary promoted",
                    event.pointer_id
                );
            }
        }
        session.pinching = false;
        session.tracks.rebase_primary();
        session.baseline = self.transform;

        let needs_lock = transforming && session.primary_lock.is_none();
        if needs_lock && !self.claim(Slot::Primary) {
            self.finish_session("promoted pointer lock denied");
            return EventResponse::Ignored;
        }
        response
    }

    /// Handles cancellation of a tracked contact by aborting the gesture.
    pub fn on_pointer_cancel(&mut self, event: &PointerEvent) -> EventResponse {
        let tracked = self
            .session
            .as_ref()
            .is_some_and(|s| s.tracks.slot_of(event.pointer_id).is_some());
        if !tracked {
            return EventResponse::Ignored;
        }
        self.finish_session("cancelled");
        EventResponse::Observed
    }

    /// Zooms about the cursor by one normalized wheel step.
    ///
    /// Wheel events have no natural end; the gesture ends once no wheel event
    /// has arrived for [`GestureConfig::wheel_end_delay`].
    pub fn on_wheel(&mut self, event: &WheelEvent) -> EventResponse {
        let config = self.active_config();
        let Some(target) = self.target.as_ref() else {
            return EventResponse::Ignored;
        };
        let step = event.delta.step();
        if step == 0 || !config.scales() {
            return EventResponse::Ignored;
        }

        let origin = match self.wheel.take() {
            Some(burst) => {
                self.host.clear_timeout(burst.timer);
                burst.origin
            }
            None => {
                debug!("wheel gesture started");
                self.host.bounding_rect(target).origin()
            }
        };
        let timer = self.host.set_timeout(config.wheel_end_delay);
        self.wheel = Some(WheelBurst { timer, origin });
        self.notify_start();

        let scale = config.clamp_scale(self.transform.scale + f64::from(step) * WHEEL_ZOOM_STEP);
        let anchor = (event.position - origin).to_point();
        trace!("wheel step {step} at {anchor:?} -> scale {scale}");
        let zoomed = transform::zoom_about(self.transform, anchor, scale);
        self.apply(zoomed, &config);
        // An open pointer gesture continues from the zoomed state.
        self.rebase_session();
        EventResponse::Consumed
    }

    /// Handles a timer scheduled through [`GestureHost::set_timeout`].
    ///
    /// Only the most recently scheduled timer counts; earlier ones are ignored.
    pub fn on_timer(&mut self, timer: H::Timer) {
        if !self.wheel.as_ref().is_some_and(|b| b.timer == timer) {
            return;
        }
        self.wheel = None;
        debug!("wheel gesture settled");
        self.settle();
    }

    fn active_config(&self) -> GestureConfig {
        self.session.as_ref().map_or(self.config, |s| s.config)
    }

    /// Restarts the open session's measurements from the current transform.
    fn rebase_session(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.baseline = self.transform;
            session.tracks.rebase();
        }
    }

    fn open_session(&mut self, event: &PointerEvent) -> EventResponse {
        let Some(target) = self.target.as_ref() else {
            return EventResponse::Ignored;
        };
        if self.config.translates() && !event.is_primary_press() {
            return EventResponse::Ignored;
        }
        let mut tracks = PointerTracks::new();
        tracks.begin(event.pointer_id, event.position);
        let subscriptions =
            Subscriptions::subscribe(&mut self.host, target, Scope::Surface, SESSION_EVENTS);
        self.session = Some(Session {
            config: self.config,
            tracks,
            transforming: false,
            pinching: false,
            baseline: self.transform,
            primary_lock: None,
            secondary_lock: None,
            subscriptions,
        });
        debug!("gesture session opened by pointer {:?}", event.pointer_id);
        EventResponse::Observed
    }

    /// Ensures the lock for the contact in `slot` is held, requesting it if needed.
    fn claim(&mut self, slot: Slot) -> bool {
        let (Some(target), Some(session)) = (self.target.as_ref(), self.session.as_mut()) else {
            return false;
        };
        let Some(pointer_id) = session.tracks.get(slot).map(|t| t.pointer_id) else {
            return false;
        };
        let held = match slot {
            Slot::Primary => &mut session.primary_lock,
            Slot::Secondary => &mut session.secondary_lock,
        };
        if held.is_some() {
            return true;
        }
        match self.host.request_lock(target, pointer_id) {
            Some(lock) => {
                *held = Some(lock);
                true
            }
            None => {
                debug!("lock for pointer {pointer_id:?} denied");
                false
            }
        }
    }

    fn begin_transforming(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.transforming {
            return;
        }
        session.transforming = true;
        debug!("gesture started");
        self.notify_start();
    }

    fn apply(&mut self, candidate: Transform, config: &GestureConfig) {
        let next = transform::clamp(candidate, config, self.bounds);
        self.transform = next;
        trace!("transform updated: {next:?}");
        self.observer.on_transform(&next);
    }

    /// Closes the pointer session, returning its locks and subscriptions
    /// before the observer hears about it.
    fn finish_session(&mut self, reason: &str) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.release_session(session);
        debug!("gesture session closed: {reason}");
        self.settle();
    }

    fn release_session(&mut self, mut session: Session<H>) {
        if let Some(lock) = session.primary_lock.take() {
            self.host.release_lock(lock);
        }
        if let Some(lock) = session.secondary_lock.take() {
            self.host.release_lock(lock);
        }
        session.subscriptions.release(&mut self.host);
    }

    fn teardown(&mut self, notify: bool) {
        if let Some(session) = self.session.take() {
            self.release_session(session);
        }
        if let Some(burst) = self.wheel.take() {
            self.host.clear_timeout(burst.timer);
        }
        self.target_subscriptions.release(&mut self.host);
        if self.target.take().is_some() {
            debug!("gesture transformer detached");
        }
        if notify {
            self.notify_end();
        } else {
            self.notified = false;
        }
    }

    fn notify_start(&mut self) {
        if !self.notified {
            self.notified = true;
            self.observer.on_transform_start();
        }
    }

    fn notify_end(&mut self) {
        if self.notified {
            self.notified = false;
            self.observer.on_transform_end();
        }
    }

    /// Ends a pending notification once neither pointers nor the wheel hold it open.
    fn settle(&mut self) {
        if self.session.is_none() && self.wheel.is_none() {
            self.notify_end();
        }
    }
}

impl<H: GestureHost, O: TransformObserver> Drop for GestureTransformer<H, O> {
    fn drop(&mut self) {
        // No observer calls here: this may run while unwinding out of one.
        self.teardown(false);
    }
}

impl<H: GestureHost, O: TransformObserver> fmt::Debug for GestureTransformer<H, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureTransformer")
            .field("config", &self.config)
            .field("transform", &self.transform)
            .field("bounds", &self.bounds)
            .field("attached", &self.target.is_some())
            .field("phase", &self.phase())
            .field("wheel_active", &self.wheel.is_some())
            .finish_non_exhaustive()
    }
}
