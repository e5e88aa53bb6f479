//! Bounded record of widget deliveries.

use std::collections::VecDeque;

use crate::event::{Phase, UiEvent};
use crate::scene::NodeId;

/// One delivery to one widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delivery {
    /// Receiving node.
    pub node: NodeId,
    /// Phase it was delivered in.
    pub phase: Phase,
    /// Event delivered.
    pub event: UiEvent,
}

/// Ring of the most recent deliveries. Capacity 0 records nothing.
#[derive(Debug, Clone, Default)]
pub struct DispatchLog {
    entries: VecDeque<Delivery>,
    capacity: usize,
}

impl DispatchLog {
    /// Creates a log keeping at most `capacity` deliveries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of entries kept.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records a delivery, evicting the oldest when full.
    pub fn record(&mut self, node: NodeId, phase: Phase, event: UiEvent) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Delivery { node, phase, event });
    }

    /// Entries oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Delivery> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loom_core::Handle;

    #[test]
    fn test_log_is_bounded() {
        let mut log = DispatchLog::new(2);
        let node = NodeId::from_handle(Handle::new(0, 0));
        log.record(node, Phase::Capture, UiEvent::PointerEnter);
        log.record(node, Phase::Target, UiEvent::PointerEnter);
        log.record(node, Phase::Bubble, UiEvent::PointerEnter);

        let phases: Vec<_> = log.iter().map(|d| d.phase).collect();
        assert_eq!(phases, vec![Phase::Target, Phase::Bubble]);
    }

    #[test]
    fn test_zero_capacity_disabled() {
        let mut log = DispatchLog::new(0);
        log.record(NodeId::NULL, Phase::Target, UiEvent::FocusGained);
        assert!(log.is_empty());
    }
}
