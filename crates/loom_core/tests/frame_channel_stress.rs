//! # Frame Channel Stress Tests
//!
//! Verifies the two guarantees the render thread relies on:
//!
//! 1. **No tearing**: every buffer the consumer sees was completely written
//!    before it was published.
//! 2. **Freshness**: generation stamps only ever move forward.
//!
//! Run with: cargo test -p loom_core --test frame_channel_stress -- --nocapture

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use loom_core::frame_channel;

const WORDS_PER_FRAME: usize = 4096;
const FRAMES: u64 = 20_000;

#[test]
fn verify_no_torn_frames_under_contention() {
    let (mut producer, mut consumer) = frame_channel(|| vec![0_u64; WORDS_PER_FRAME]);
    let done = Arc::new(AtomicBool::new(false));

    let producer_done = Arc::clone(&done);
    let logic = thread::spawn(move || {
        for generation in 1..=FRAMES {
            let buffer = producer.write_buffer();
            for word in buffer.iter_mut() {
                *word = generation;
            }
            producer.publish();
        }
        producer_done.store(true, Ordering::Release);
        producer.frames_published()
    });

    let mut last_seen = 0_u64;
    let mut distinct_frames = 0_u64;
    loop {
        let finished = done.load(Ordering::Acquire);
        let frame = consumer.acquire_front();

        let stamp = frame[0];
        assert!(
            frame.iter().all(|&word| word == stamp),
            "torn frame: first word {stamp}, buffer mixes generations"
        );
        assert!(stamp >= last_seen, "stamp went backwards: {stamp} < {last_seen}");
        if stamp != last_seen {
            distinct_frames += 1;
        }
        last_seen = stamp;

        if finished && !consumer.has_pending() {
            let _ = consumer.acquire_front();
            break;
        }
    }

    let published = logic.join().expect("producer thread panicked");
    assert_eq!(published, FRAMES);
    assert_eq!(*consumer.acquire_front().first().unwrap(), FRAMES);

    println!("consumer observed {distinct_frames} distinct frames out of {FRAMES}");
}

#[test]
fn verify_stalled_producer_keeps_previous_frame() {
    let (mut producer, mut consumer) = frame_channel(|| 0_u64);

    *producer.write_buffer() = 7;
    producer.publish();
    assert_eq!(*consumer.acquire_front(), 7);

    // Producer falls behind: the consumer keeps presenting frame 7.
    for _ in 0..10 {
        assert_eq!(*consumer.acquire_front(), 7);
    }
    assert_eq!(consumer.frames_latched(), 1);
}
