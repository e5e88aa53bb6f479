//! # LOOM Core
//!
//! Engine-agnostic building blocks shared by the UI crate:
//! - A generational slot arena whose handles go stale instead of dangling
//! - A lock-free triple buffer for handing frames from the logic thread to
//!   the render thread
//!
//! ## Architecture Rules
//!
//! 1. **No locks on the frame path** - producer and consumer only touch atomics
//! 2. **No dangling references** - every handle is checked against its slot generation
//! 3. **Pre-allocate** - arenas and frame buffers are sized up front and reused
//!
//! ## Example
//!
//! ```rust
//! use loom_core::{frame_channel, SlotArena};
//!
//! let mut arena = SlotArena::with_capacity(16);
//! let handle = arena.insert("panel");
//! assert_eq!(arena.get(handle), Some(&"panel"));
//!
//! let (mut producer, mut consumer) = frame_channel(Vec::<u32>::new);
//! producer.write_buffer().push(7);
//! producer.publish();
//! assert_eq!(consumer.acquire_front().as_slice(), &[7]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod memory;
pub mod sync;

pub use memory::{Handle, SlotArena};
pub use sync::{frame_channel, FrameConsumer, FrameProducer, SLOT_COUNT};
