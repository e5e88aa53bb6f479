//! # Frame Handoff Between Logic and Render Threads
//!
//! No locks. No torn frames. No stalls on either side.
//!
//! ## The Problem
//!
//! ```text
//! Thread 1 (Logic):   routes input, fills a draw list
//! Thread 2 (Render):  presents the newest complete draw list
//!
//! Without synchronization: RACE CONDITION → torn frame
//! With Mutex:              render waits on logic → dropped frames
//! ```
//!
//! ## The Solution: Triple Buffering
//!
//! ```text
//!   producer ──fills──▶ [write]   publish(): swap write ⇄ back, mark dirty
//!                       [back ]   (pending when dirty, otherwise spare)
//!   consumer ◀─reads─── [front]   acquire_front(): if dirty, swap front ⇄ back
//! ```
//!
//! Each side owns its index outright; the only shared word is the back index
//! plus a dirty bit, exchanged atomically. A slow producer means the consumer
//! keeps presenting the previous front buffer.

mod triple_buffer;

pub use triple_buffer::{frame_channel, FrameConsumer, FrameProducer, SLOT_COUNT};
