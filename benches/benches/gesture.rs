// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Rect;
use std::time::Duration;
use understory_event_state::pointer::{PointerEvent, PointerId};
use understory_event_state::wheel::{WheelDelta, WheelEvent};
use understory_gesture::{EventKind, GestureHost, GestureTransformer, Scope};

/// Grants everything; the cost of a real host is not what is measured here.
#[derive(Debug, Default)]
struct NullHost {
    next: u32,
}

impl GestureHost for NullHost {
    type Target = ();
    type Subscription = u32;
    type Lock = PointerId;
    type Timer = u32;

    fn subscribe(&mut self, _: &(), _: Scope, _: EventKind) -> u32 {
        self.next += 1;
        self.next
    }

    fn unsubscribe(&mut self, _: u32) {}

    fn request_lock(&mut self, _: &(), pointer_id: PointerId) -> Option<PointerId> {
        Some(pointer_id)
    }

    fn release_lock(&mut self, _: PointerId) {}

    fn bounding_rect(&self, _: &()) -> Rect {
        Rect::new(0.0, 0.0, 1024.0, 768.0)
    }

    fn set_timeout(&mut self, _: Duration) -> u32 {
        self.next += 1;
        self.next
    }

    fn clear_timeout(&mut self, _: u32) {}
}

fn attached() -> GestureTransformer<NullHost> {
    let mut gestures = GestureTransformer::new(NullHost::default(), ());
    gestures
        .attach(())
        .expect("a fresh transformer is detached");
    gestures
}

fn bench_pointer_streams(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/pointer");

    for moves in [64usize, 512, 4_096] {
        group.throughput(Throughput::Elements(moves as u64));

        group.bench_with_input(BenchmarkId::new("pan", moves), &moves, |b, &moves| {
            b.iter_batched(
                attached,
                |mut gestures| {
                    let finger = PointerEvent::touch(1, (0.0, 0.0));
                    gestures.on_pointer_down(&finger);
                    for i in 0..moves {
                        let x = i as f64 * 0.5;
                        black_box(gestures.on_pointer_move(&finger.at((x, x * 0.25))));
                    }
                    gestures.on_pointer_up(&finger);
                    black_box(gestures.transform());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("pinch", moves), &moves, |b, &moves| {
            b.iter_batched(
                attached,
                |mut gestures| {
                    let thumb = PointerEvent::touch(1, (300.0, 300.0));
                    let finger = PointerEvent::touch(2, (400.0, 300.0));
                    gestures.on_pointer_down(&thumb);
                    gestures.on_pointer_down(&finger);
                    for i in 0..moves {
                        let spread = 100.0 + (i % 200) as f64;
                        black_box(gestures.on_pointer_move(&finger.at((300.0 + spread, 300.0))));
                    }
                    gestures.on_pointer_up(&finger);
                    gestures.on_pointer_up(&thumb);
                    black_box(gestures.transform());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_wheel_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/wheel");

    for events in [16usize, 256] {
        group.throughput(Throughput::Elements(events as u64));
        group.bench_with_input(BenchmarkId::new("burst", events), &events, |b, &events| {
            b.iter_batched(
                attached,
                |mut gestures| {
                    for i in 0..events {
                        let delta = if i % 3 == 0 { 53.0 } else { -53.0 };
                        let event = WheelEvent::new((512.0, 384.0), WheelDelta::Pixels(delta));
                        black_box(gestures.on_wheel(&event));
                    }
                    black_box(gestures.transform());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pointer_streams, bench_wheel_burst);
criterion_main!(benches);
