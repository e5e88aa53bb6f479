//! Delivery to widgets along a path.

use std::sync::Arc;

use super::log::DispatchLog;
use crate::drag::DragPayload;
use crate::event::{Phase, UiEvent};
use crate::scene::{NodeId, Scene};
use crate::signal::SignalBus;
use crate::widget::{self, EventContext, Requests};

/// Delivers events and collects the requests handlers post.
#[derive(Debug, Default)]
pub(super) struct Dispatcher {
    pub(super) log: DispatchLog,
    pub(super) requests: Requests,
    pub(super) bus: Option<Arc<SignalBus>>,
}

impl Dispatcher {
    pub(super) fn new(log_capacity: usize) -> Self {
        Self {
            log: DispatchLog::new(log_capacity),
            requests: Requests::default(),
            bus: None,
        }
    }

    /// Delivers to a single node. Dead nodes consume nothing.
    pub(super) fn deliver(
        &mut self,
        scene: &mut Scene,
        node: NodeId,
        event: UiEvent,
        phase: Phase,
        payload: Option<&DragPayload>,
    ) -> bool {
        let Some(target) = scene.get_mut(node) else {
            return false;
        };
        self.log.record(node, phase, event);
        tracing::trace!(?node, ?phase, ?event, "deliver");

        let mut ctx = EventContext::new(node, phase, &mut self.requests, self.bus.as_deref(), payload);
        widget::handle_event(target, &event, &mut ctx)
    }

    /// Capture (root → parent), target, bubble (parent → root). Stops at the
    /// first handler returning true.
    pub(super) fn dispatch_path(&mut self, scene: &mut Scene, path: &[NodeId], event: UiEvent) -> bool {
        let Some((&target, ancestors)) = path.split_last() else {
            return false;
        };
        for &node in ancestors {
            if self.deliver(scene, node, event, Phase::Capture, None) {
                return true;
            }
        }
        if self.deliver(scene, target, event, Phase::Target, None) {
            return true;
        }
        ancestors
            .iter()
            .rev()
            .any(|&node| self.deliver(scene, node, event, Phase::Bubble, None))
    }

    /// Target then bubble, without a capture phase.
    pub(super) fn dispatch_target_bubble(&mut self, scene: &mut Scene, path: &[NodeId], event: UiEvent) -> bool {
        let Some((&target, ancestors)) = path.split_last() else {
            return false;
        };
        if self.deliver(scene, target, event, Phase::Target, None) {
            return true;
        }
        ancestors
            .iter()
            .rev()
            .any(|&node| self.deliver(scene, node, event, Phase::Bubble, None))
    }
}
