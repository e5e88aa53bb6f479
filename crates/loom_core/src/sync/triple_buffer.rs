//! # Triple-Buffered Frame Channel
//!
//! Lock-free single-producer / single-consumer snapshot handoff.
//!
//! ## Safety Note
//!
//! This module requires unsafe code to hand out references into shared
//! buffers. Exclusivity is guaranteed by index ownership: the producer's write
//! index and the consumer's front index are never equal, and neither is ever
//! stored in the shared back slot while its owner still uses it.

#![allow(unsafe_code)]
//!
//! ## Architecture
//!
//! ```text
//!                    ┌──────────────────────────────────┐
//!                    │          Shared<T>               │
//!                    │  ┌────────┐┌────────┐┌────────┐  │
//!                    │  │ buf 0  ││ buf 1  ││ buf 2  │  │
//!                    │  └────────┘└────────┘└────────┘  │
//!                    │  ┌────────────────────────────┐  │
//!                    │  │ back: AtomicU8 (idx|DIRTY) │  │
//!                    │  └────────────────────────────┘  │
//!                    └──────────────────────────────────┘
//!                          ▲                      ▲
//!              ┌───────────┴─────┐      ┌─────────┴────────┐
//!              │ FrameProducer   │      │ FrameConsumer    │
//!              │ (write_index)   │      │ (front_index)    │
//!              └─────────────────┘      └──────────────────┘
//! ```

use std::cell::UnsafeCell;
use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;

/// Number of buffers in a frame channel.
pub const SLOT_COUNT: usize = 3;

const INDEX_MASK: u8 = 0b011;
const DIRTY: u8 = 0b100;

struct Shared<T> {
    buffers: [UnsafeCell<T>; SLOT_COUNT],

    /// Index of the spare buffer, with `DIRTY` set while it holds a frame
    /// the consumer has not latched yet.
    back: AtomicU8,

    /// Mirror of the consumer's front index, for diagnostics only.
    front: AtomicUsize,

    published: AtomicU64,
    latched: AtomicU64,
}

// SAFETY: buffers are only reached through the producer's write index or the
// consumer's front index, which never alias; ownership of a buffer moves
// between threads only through the AcqRel exchange on `back`.
unsafe impl<T: Send> Sync for Shared<T> {}

impl<T> Shared<T> {
    fn pending_index(&self) -> Option<usize> {
        let back = self.back.load(Ordering::Acquire);
        (back & DIRTY != 0).then_some(usize::from(back & INDEX_MASK))
    }
}

/// Creates a frame channel, building each of the three buffers with `init`.
///
/// Before the first publish the consumer sees the buffer built first.
///
/// ## Usage
///
/// ```rust
/// use std::thread;
/// use loom_core::frame_channel;
///
/// let (mut producer, mut consumer) = frame_channel(|| 0_u64);
///
/// let logic = thread::spawn(move || {
///     for frame in 1..=100 {
///         *producer.write_buffer() = frame;
///         producer.publish();
///     }
/// });
///
/// let mut last = 0;
/// while last < 100 {
///     let seen = *consumer.acquire_front();
///     assert!(seen >= last);
///     last = seen;
/// }
/// logic.join().unwrap();
/// ```
pub fn frame_channel<T>(mut init: impl FnMut() -> T) -> (FrameProducer<T>, FrameConsumer<T>) {
    let shared = Arc::new(Shared {
        buffers: [
            UnsafeCell::new(init()),
            UnsafeCell::new(init()),
            UnsafeCell::new(init()),
        ],
        back: AtomicU8::new(1),
        front: AtomicUsize::new(0),
        published: AtomicU64::new(0),
        latched: AtomicU64::new(0),
    });

    (
        FrameProducer {
            shared: Arc::clone(&shared),
            write_index: 2,
        },
        FrameConsumer {
            shared,
            front_index: 0,
        },
    )
}

/// Producer half of a frame channel (logic thread).
///
/// Owns one buffer at a time. [`FrameProducer::publish`] hands it over and
/// takes back a buffer that is neither front nor pending.
pub struct FrameProducer<T> {
    shared: Arc<Shared<T>>,
    write_index: usize,
}

impl<T> FrameProducer<T> {
    /// Returns the buffer currently being filled.
    ///
    /// The buffer still holds whatever frame last occupied it; callers are
    /// expected to reset it before writing a new frame.
    #[inline]
    pub fn write_buffer(&mut self) -> &mut T {
        // SAFETY: write_index is owned by this producer; the consumer never
        // reads it and it is not in the back slot.
        unsafe { &mut *self.shared.buffers[self.write_index].get() }
    }

    /// Publishes the current write buffer as the newest frame.
    ///
    /// If the consumer has not latched the previously published frame, that
    /// frame is dropped and its buffer becomes the next write buffer.
    pub fn publish(&mut self) {
        // Index is 0..3 by construction.
        #[allow(clippy::cast_possible_truncation)]
        let published = self.write_index as u8 | DIRTY;

        let previous = self.shared.back.swap(published, Ordering::AcqRel);
        self.write_index = usize::from(previous & INDEX_MASK);
        self.shared.published.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the index of the buffer being filled (for debugging).
    #[inline]
    #[must_use]
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Returns the index of the published-but-unlatched buffer, if any.
    #[inline]
    #[must_use]
    pub fn pending_index(&self) -> Option<usize> {
        self.shared.pending_index()
    }

    /// Returns the consumer's last latched index (may lag by one exchange).
    #[inline]
    #[must_use]
    pub fn front_index_hint(&self) -> usize {
        self.shared.front.load(Ordering::Relaxed)
    }

    /// Returns the total number of frames published.
    #[inline]
    #[must_use]
    pub fn frames_published(&self) -> u64 {
        self.shared.published.load(Ordering::Relaxed)
    }
}

/// Consumer half of a frame channel (render thread).
pub struct FrameConsumer<T> {
    shared: Arc<Shared<T>>,
    front_index: usize,
}

impl<T> FrameConsumer<T> {
    /// Latches the newest published frame (if any) and returns the front buffer.
    ///
    /// Never blocks. Without a new publish this returns the same buffer as the
    /// previous call.
    pub fn acquire_front(&mut self) -> &T {
        if self.shared.back.load(Ordering::Relaxed) & DIRTY != 0 {
            #[allow(clippy::cast_possible_truncation)]
            let returned = self.front_index as u8;

            let previous = self.shared.back.swap(returned, Ordering::AcqRel);
            self.front_index = usize::from(previous & INDEX_MASK);
            self.shared.front.store(self.front_index, Ordering::Relaxed);
            self.shared.latched.fetch_add(1, Ordering::Relaxed);
        }

        // SAFETY: front_index is owned by this consumer; the producer only
        // ever writes its own write_index, which is never the front index.
        unsafe { &*self.shared.buffers[self.front_index].get() }
    }

    /// Returns true if a published frame is waiting to be latched.
    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.shared.pending_index().is_some()
    }

    /// Returns the index of the current front buffer (for debugging).
    #[inline]
    #[must_use]
    pub fn front_index(&self) -> usize {
        self.front_index
    }

    /// Returns the total number of frames latched.
    #[inline]
    #[must_use]
    pub fn frames_latched(&self) -> u64 {
        self.shared.latched.load(Ordering::Relaxed)
    }
}

impl<T> fmt::Debug for FrameProducer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameProducer")
            .field("write_index", &self.write_index)
            .field("pending", &self.pending_index())
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Debug for FrameConsumer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameConsumer")
            .field("front_index", &self.front_index)
            .field("pending", &self.has_pending())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_front_is_first_buffer() {
        let mut counter = 0;
        let (_producer, mut consumer) = frame_channel(|| {
            counter += 1;
            counter
        });

        assert_eq!(*consumer.acquire_front(), 1);
        assert!(!consumer.has_pending());
        assert_eq!(consumer.frames_latched(), 0);
    }

    #[test]
    fn test_publish_then_acquire() {
        let (mut producer, mut consumer) = frame_channel(Vec::<u32>::new);

        producer.write_buffer().push(42);
        producer.publish();
        assert!(consumer.has_pending());

        assert_eq!(consumer.acquire_front().as_slice(), &[42]);
        assert!(!consumer.has_pending());

        // Repeated acquires return the same snapshot.
        assert_eq!(consumer.acquire_front().as_slice(), &[42]);
        assert_eq!(consumer.frames_latched(), 1);
    }

    #[test]
    fn test_latest_publish_wins() {
        let (mut producer, mut consumer) = frame_channel(|| 0_u32);

        for frame in 1..=5 {
            *producer.write_buffer() = frame;
            producer.publish();
        }

        assert_eq!(*consumer.acquire_front(), 5);
        assert_eq!(producer.frames_published(), 5);
    }

    #[test]
    fn test_producer_never_holds_front_or_pending() {
        let (mut producer, mut consumer) = frame_channel(|| 0_u32);

        for step in 0..64_u32 {
            producer.publish();
            let pending = producer.pending_index();
            assert_ne!(Some(producer.write_index()), pending);

            if step % 3 == 0 {
                let _ = consumer.acquire_front();
            }
            assert_ne!(producer.write_index(), consumer.front_index());
            assert_ne!(producer.pending_index(), Some(consumer.front_index()));
        }
    }
}
