//! # Memory Management
//!
//! Slot storage with generation-checked handles.
//!
//! A handle stays valid only while the slot it points at holds the value it
//! was issued for. Removing the value bumps the slot generation, so every old
//! handle fails lookups from then on.

mod slot_arena;

pub use slot_arena::{Handle, SlotArena};
