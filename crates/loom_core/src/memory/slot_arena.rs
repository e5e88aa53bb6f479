//! # Slot Arena
//!
//! Growable slot storage addressed by generational handles.

use std::fmt;

/// Generation-checked reference into a [`SlotArena`].
///
/// The ID is split into two parts:
/// - Lower 32 bits: slot index
/// - Upper 32 bits: generation counter for detecting stale references
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Handle(u64);

impl Handle {
    /// Null/invalid handle.
    pub const NULL: Self = Self(u64::MAX);

    /// Creates a handle from index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation the handle was issued for.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Returns true for [`Handle::NULL`].
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }

    /// Returns the packed representation.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("Handle(null)")
        } else {
            write!(f, "Handle({}v{})", self.index(), self.generation())
        }
    }
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot storage with O(1) insert, remove and lookup.
///
/// Freed slots are recycled LIFO. Each removal bumps the slot generation,
/// which invalidates every handle issued for the previous occupant.
///
/// # Thread Safety
///
/// Not thread-safe. The arena is owned by one thread (the UI logic thread).
///
/// # Example
///
/// ```rust
/// use loom_core::SlotArena;
///
/// let mut arena = SlotArena::with_capacity(4);
/// let a = arena.insert(1_u32);
/// arena.remove(a);
/// let b = arena.insert(2_u32);
///
/// assert_eq!(a.index(), b.index());
/// assert!(arena.get(a).is_none());
/// assert_eq!(arena.get(b), Some(&2));
/// ```
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    len: usize,
}

impl<T> SlotArena<T> {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an arena with room for `capacity` values before reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Returns the number of live values.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the arena holds no live values.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores a value and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` slots are requested.
    pub fn insert(&mut self, value: T) -> Handle {
        self.len += 1;

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return Handle::new(index, slot.generation);
        }

        let index = u32::try_from(self.slots.len()).expect("slot arena exhausted the u32 index space");
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        Handle::new(index, 0)
    }

    /// Removes a value, returning it if the handle was live.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index() as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }

        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(handle.index());
        self.len -= 1;

        Some(value)
    }

    /// Returns true if the handle points at a live value.
    #[inline]
    #[must_use]
    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Gets a reference to a live value.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        let slot = self.slots.get(handle.index() as usize)?;
        if slot.generation == handle.generation() {
            slot.value.as_ref()
        } else {
            None
        }
    }

    /// Gets a mutable reference to a live value.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index() as usize)?;
        if slot.generation == handle.generation() {
            slot.value.as_mut()
        } else {
            None
        }
    }

    /// Removes every value. All outstanding handles become stale.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            // Indices fit: insert() refuses to grow past u32::MAX.
            #[allow(clippy::cast_possible_truncation)]
            self.free_list.push(index as u32);
        }
        self.len = 0;
    }

    /// Iterates over live values with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            #[allow(clippy::cast_possible_truncation)]
            let handle = Handle::new(index as u32, slot.generation);
            slot.value.as_ref().map(|value| (handle, value))
        })
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SlotArena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotArena")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_roundtrip() {
        let handle = Handle::new(12345, 67890);
        assert_eq!(handle.index(), 12345);
        assert_eq!(handle.generation(), 67890);
        assert!(!handle.is_null());
        assert!(Handle::default().is_null());
    }

    #[test]
    fn test_insert_remove() {
        let mut arena = SlotArena::new();

        let h1 = arena.insert(42_u32);
        assert_eq!(arena.get(h1), Some(&42));
        assert_eq!(arena.len(), 1);

        assert_eq!(arena.remove(h1), Some(42));
        assert!(arena.is_empty());
        assert_eq!(arena.remove(h1), None);
    }

    #[test]
    fn test_stale_handle_after_reuse() {
        let mut arena = SlotArena::with_capacity(1);

        let old = arena.insert("old");
        arena.remove(old);
        let new = arena.insert("new");

        assert_eq!(old.index(), new.index());
        assert_ne!(old.generation(), new.generation());
        assert!(!arena.contains(old));
        assert!(arena.get_mut(old).is_none());
        assert_eq!(arena.get(new), Some(&"new"));
    }

    #[test]
    fn test_clear_invalidates_everything() {
        let mut arena = SlotArena::new();
        let handles: Vec<_> = (0..8).map(|i| arena.insert(i)).collect();

        arena.clear();

        assert!(arena.is_empty());
        assert!(handles.iter().all(|&h| !arena.contains(h)));

        let reused = arena.insert(99);
        assert_eq!(reused.index(), 0);
        assert_eq!(arena.iter().count(), 1);
    }
}
