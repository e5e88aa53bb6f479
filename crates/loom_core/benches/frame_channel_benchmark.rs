//! # Frame Channel Benchmark
//!
//! Measures the per-frame cost of the lock-free handoff:
//! 1. Publish alone (consumer idle)
//! 2. Publish + acquire on the same thread
//! 3. Acquire with nothing pending (the common render-thread path)
//!
//! Target: handoff cost invisible next to filling a draw list.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use loom_core::frame_channel;

fn bench_publish(c: &mut Criterion) {
    let (mut producer, _consumer) = frame_channel(|| vec![0_u32; 1024]);

    c.bench_function("frame_channel_publish", |b| {
        b.iter(|| {
            producer.write_buffer()[0] = black_box(1);
            producer.publish();
        });
    });
}

fn bench_publish_acquire(c: &mut Criterion) {
    let (mut producer, mut consumer) = frame_channel(|| vec![0_u32; 1024]);

    c.bench_function("frame_channel_publish_acquire", |b| {
        b.iter(|| {
            producer.write_buffer()[0] = black_box(1);
            producer.publish();
            black_box(consumer.acquire_front()[0]);
        });
    });
}

fn bench_acquire_idle(c: &mut Criterion) {
    let (_producer, mut consumer) = frame_channel(|| vec![0_u32; 1024]);

    c.bench_function("frame_channel_acquire_idle", |b| {
        b.iter(|| black_box(consumer.acquire_front().len()));
    });
}

criterion_group!(benches, bench_publish, bench_publish_acquire, bench_acquire_idle);
criterion_main!(benches);
