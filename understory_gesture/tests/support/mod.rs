// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording host and observer shared by the integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::Rect;
use understory_event_state::pointer::PointerId;
use understory_gesture::{
    EventKind, GestureConfig, GestureHost, GestureTransformer, Scope, Transform, TransformEvent,
    TransformObserver,
};

/// Lock handed out by [`FakeHost`]; deliberately not `Clone`.
#[derive(Debug, PartialEq, Eq)]
pub struct FakeLock(pub PointerId);

#[derive(Debug, Default)]
pub struct Ledger {
    next_id: u32,
    subscriptions: Vec<(u32, Scope, EventKind)>,
    held_locks: Vec<PointerId>,
    denied: Vec<PointerId>,
    timers: Vec<u32>,
    pub locks_requested: usize,
    pub locks_granted: usize,
    pub locks_released: usize,
    pub rect_queries: usize,
    pub rect: Rect,
}

/// Host whose bookkeeping outlives the transformer through a shared ledger.
#[derive(Clone, Debug, Default)]
pub struct FakeHost(pub Rc<RefCell<Ledger>>);

impl FakeHost {
    pub fn with_rect(rect: Rect) -> Self {
        let host = Self::default();
        host.0.borrow_mut().rect = rect;
        host
    }

    pub fn deny(&self, pointer: u64) {
        self.0.borrow_mut().denied.push(PointerId(pointer));
    }

    pub fn subscriptions(&self) -> usize {
        self.0.borrow().subscriptions.len()
    }

    pub fn surface_subscriptions(&self) -> usize {
        self.0
            .borrow()
            .subscriptions
            .iter()
            .filter(|(_, scope, _)| *scope == Scope::Surface)
            .count()
    }

    pub fn held_locks(&self) -> usize {
        self.0.borrow().held_locks.len()
    }

    pub fn holds_lock(&self, pointer: u64) -> bool {
        self.0.borrow().held_locks.contains(&PointerId(pointer))
    }

    pub fn pending_timers(&self) -> usize {
        self.0.borrow().timers.len()
    }

    pub fn locks_requested(&self) -> usize {
        self.0.borrow().locks_requested
    }

    pub fn locks_granted(&self) -> usize {
        self.0.borrow().locks_granted
    }

    pub fn locks_released(&self) -> usize {
        self.0.borrow().locks_released
    }

    pub fn rect_queries(&self) -> usize {
        self.0.borrow().rect_queries
    }

    /// Fires the pending timer, returning its id for `on_timer`.
    pub fn fire_timer(&self) -> Option<u32> {
        self.0.borrow_mut().timers.pop()
    }

    fn next_id(&self) -> u32 {
        let mut ledger = self.0.borrow_mut();
        ledger.next_id += 1;
        ledger.next_id
    }
}

impl GestureHost for FakeHost {
    type Target = &'static str;
    type Subscription = u32;
    type Lock = FakeLock;
    type Timer = u32;

    fn subscribe(&mut self, _target: &&'static str, scope: Scope, kind: EventKind) -> u32 {
        let id = self.next_id();
        self.0.borrow_mut().subscriptions.push((id, scope, kind));
        id
    }

    fn unsubscribe(&mut self, subscription: u32) {
        let mut ledger = self.0.borrow_mut();
        let before = ledger.subscriptions.len();
        ledger.subscriptions.retain(|(id, _, _)| *id != subscription);
        assert_eq!(before, ledger.subscriptions.len() + 1, "unknown subscription");
    }

    fn request_lock(&mut self, _target: &&'static str, pointer_id: PointerId) -> Option<FakeLock> {
        let mut ledger = self.0.borrow_mut();
        ledger.locks_requested += 1;
        if ledger.denied.contains(&pointer_id) || ledger.held_locks.contains(&pointer_id) {
            return None;
        }
        ledger.locks_granted += 1;
        ledger.held_locks.push(pointer_id);
        Some(FakeLock(pointer_id))
    }

    fn release_lock(&mut self, lock: FakeLock) {
        let mut ledger = self.0.borrow_mut();
        ledger.locks_released += 1;
        ledger.held_locks.retain(|p| *p != lock.0);
    }

    fn bounding_rect(&self, _target: &&'static str) -> Rect {
        let mut ledger = self.0.borrow_mut();
        ledger.rect_queries += 1;
        ledger.rect
    }

    fn set_timeout(&mut self, _delay: Duration) -> u32 {
        let id = self.next_id();
        self.0.borrow_mut().timers.push(id);
        id
    }

    fn clear_timeout(&mut self, timer: u32) {
        self.0.borrow_mut().timers.retain(|t| *t != timer);
    }
}

/// Observer that keeps every notification.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<TransformEvent>,
}

impl Recorder {
    pub fn starts(&self) -> usize {
        self.count(|ev| matches!(ev, TransformEvent::Start))
    }

    pub fn updates(&self) -> usize {
        self.count(|ev| matches!(ev, TransformEvent::Update(_)))
    }

    pub fn ends(&self) -> usize {
        self.count(|ev| matches!(ev, TransformEvent::End))
    }

    pub fn last_update(&self) -> Option<Transform> {
        self.events.iter().rev().find_map(|ev| match ev {
            TransformEvent::Update(t) => Some(*t),
            _ => None,
        })
    }

    fn count(&self, f: impl Fn(&TransformEvent) -> bool) -> usize {
        self.events.iter().filter(|ev| f(ev)).count()
    }
}

impl TransformObserver for Recorder {
    fn on_transform_start(&mut self) {
        self.events.push(TransformEvent::Start);
    }

    fn on_transform(&mut self, transform: &Transform) {
        self.events.push(TransformEvent::Update(*transform));
    }

    fn on_transform_end(&mut self) {
        self.events.push(TransformEvent::End);
    }
}

pub type Gestures = GestureTransformer<FakeHost, Recorder>;

pub const TARGET: &str = "canvas";

/// An attached transformer using `config` over a 400x300 target at the origin.
pub fn attached(config: GestureConfig) -> (Gestures, FakeHost) {
    let host = FakeHost::with_rect(Rect::new(0.0, 0.0, 400.0, 300.0));
    let mut gestures = GestureTransformer::new(host.clone(), Recorder::default());
    gestures.configure(config).unwrap();
    gestures.attach(TARGET).unwrap();
    (gestures, host)
}

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
