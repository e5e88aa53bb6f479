//! Pointer flow: drag gestures, the modal gate, capture, hover and hit paths.

use super::Router;
use crate::event::{CloseReason, DragPhase, InputEvent, Phase, UiEvent};
use crate::geometry::Point;
use crate::scene::{Forest, NodeId, Scene};
use crate::widget;

impl Router {
    pub(super) fn route_pointer(&mut self, scene: &mut Scene, forest: &Forest, event: InputEvent) -> bool {
        let pos = self.pointer;

        if self.drag.is_active() {
            match event {
                InputEvent::PointerMove { .. } => {
                    self.drag.update_pointer(pos);
                    self.drag_move(scene, forest, pos);
                }
                InputEvent::PointerUp { .. } => self.drag_drop(scene, pos),
                _ => {}
            }
            return true;
        }

        if self.drag.is_armed() {
            match event {
                InputEvent::PointerMove { .. } if self.drag.update_pointer(pos) => {
                    self.begin_drag(scene, forest, pos);
                    return true;
                }
                // Released before the threshold: an ordinary click.
                InputEvent::PointerUp { .. } => {
                    self.drag.finish();
                }
                _ => {}
            }
        }

        if let Some(popup) = self.modal.popup() {
            return self.route_modal(scene, popup, event);
        }
        if let Some(capture) = self.capture {
            return self.route_captured(scene, capture, event);
        }
        if let (InputEvent::Scroll { .. }, Some(hover)) = (event, self.hover) {
            let mut path = std::mem::take(&mut self.path);
            path.clear();
            scene.path_to(hover, &mut path);
            let consumed = self.dispatcher.dispatch_target_bubble(scene, &path, UiEvent::Input(event));
            self.path = path;
            return consumed;
        }
        self.route_through(scene, forest.topmost_first(), event)
    }

    /// While a popup is open nothing below it sees pointer input.
    fn route_modal(&mut self, scene: &mut Scene, popup: NodeId, event: InputEvent) -> bool {
        match self.capture {
            Some(capture) if scene.is_in_subtree(capture, popup) => {
                self.route_captured(scene, capture, event);
                return true;
            }
            Some(_) => self.drop_capture(scene),
            None => {}
        }

        let inside = scene.hit_test(popup, self.pointer);
        if !inside && matches!(event, InputEvent::PointerDown { .. }) {
            tracing::debug!(?popup, "pointer down outside modal");
            self.close_modal_inner(scene, CloseReason::Cancelled, true);
            return true;
        }
        if !self.route_through(scene, [popup], event) && inside && self.path.is_empty() {
            // Inside the popup's clip but nothing hit-testable: the root takes it.
            self.dispatcher
                .deliver(scene, popup, UiEvent::Input(event), Phase::Target, None);
        }
        true
    }

    fn route_captured(&mut self, scene: &mut Scene, capture: NodeId, event: InputEvent) -> bool {
        let consumed = self
            .dispatcher
            .deliver(scene, capture, UiEvent::Input(event), Phase::Target, None);
        if matches!(event, InputEvent::PointerUp { .. }) {
            self.capture = None;
        }
        consumed
    }

    /// Hit-tests `roots` in order, updates hover and focus, then dispatches
    /// along the first hit path.
    fn route_through(&mut self, scene: &mut Scene, roots: impl IntoIterator<Item = NodeId>, event: InputEvent) -> bool {
        let pos = self.pointer;
        let mut path = std::mem::take(&mut self.path);
        path.clear();
        for root in roots {
            if scene.hit_path(root, pos, &mut path) {
                break;
            }
        }

        if !matches!(event, InputEvent::Scroll { .. }) {
            self.update_hover(scene, &path, pos);
        }
        if matches!(event, InputEvent::PointerDown { .. }) {
            let focus = path
                .iter()
                .rev()
                .copied()
                .find(|&id| scene.get(id).is_some_and(|n| n.focusable));
            self.set_focus(scene, focus);
        }

        let consumed = self.dispatcher.dispatch_path(scene, &path, UiEvent::Input(event));
        self.path = path;
        consumed
    }

    fn update_hover(&mut self, scene: &mut Scene, path: &[NodeId], pos: Point) {
        let target = path.last().copied();
        if target == self.hover {
            return;
        }
        if let Some(old) = self.hover.take() {
            self.dispatcher
                .deliver(scene, old, UiEvent::PointerLeave, Phase::Target, None);
        }
        self.tooltips.hide();
        self.hover = target;

        let Some(new) = target else {
            return;
        };
        self.dispatcher
            .deliver(scene, new, UiEvent::PointerEnter, Phase::Target, None);
        let text = path
            .iter()
            .rev()
            .find_map(|&id| scene.get(id).and_then(|n| n.tooltip.as_deref()));
        if let Some(text) = text {
            self.tooltips.arm(text, pos);
            self.invalidated = true;
        }
    }

    // =========================================================================
    // Drag
    // =========================================================================

    fn begin_drag(&mut self, scene: &mut Scene, forest: &Forest, pos: Point) {
        let Some(session) = self.drag.session() else {
            return;
        };
        let source = session.source;
        tracing::debug!(?source, kind = ?session.payload.kind, "drag started");
        self.dispatcher.deliver(
            scene,
            source,
            UiEvent::Drag {
                phase: DragPhase::Begin,
                pos,
            },
            Phase::Target,
            Some(&session.payload),
        );
        self.tooltips.hide();
        self.drop_capture(scene);
        self.drag_move(scene, forest, pos);
    }

    /// Tracks the node under the cursor and asks it about the payload.
    fn drag_move(&mut self, scene: &mut Scene, forest: &Forest, pos: Point) {
        let mut path = std::mem::take(&mut self.path);
        path.clear();
        match self.modal.popup() {
            Some(popup) => {
                scene.hit_path(popup, pos, &mut path);
            }
            None => {
                forest.hit_path(scene, pos, &mut path);
            }
        }
        let target = path.last().copied();
        self.path = path;

        let change = self.drag.set_hover_target(target);
        let Some(session) = self.drag.session() else {
            return;
        };
        let payload = Some(&session.payload);
        if let Some(change) = change {
            if let Some(left) = change.left {
                let leave = UiEvent::Drag {
                    phase: DragPhase::Leave,
                    pos,
                };
                self.dispatcher.deliver(scene, left, leave, Phase::Target, payload);
            }
            if let Some(entered) = change.entered {
                let enter = UiEvent::Drag {
                    phase: DragPhase::Enter,
                    pos,
                };
                self.dispatcher.deliver(scene, entered, enter, Phase::Target, payload);
            }
        }
        if let Some(target) = target {
            let over = UiEvent::Drag {
                phase: DragPhase::Over,
                pos,
            };
            self.dispatcher.deliver(scene, target, over, Phase::Target, payload);
        }

        let accepted = target
            .and_then(|t| scene.get(t))
            .is_some_and(|node| widget::accepts(&node.kind, &session.payload));
        self.drag.set_acceptance(accepted);
        self.invalidated = true;
    }

    fn drag_drop(&mut self, scene: &mut Scene, pos: Point) {
        let Some(session) = self.drag.finish() else {
            return;
        };
        let payload = Some(&session.payload);
        let target = session
            .drop_target
            .filter(|&t| scene.get(t).is_some_and(|n| widget::accepts(&n.kind, &session.payload)));

        match target {
            Some(target) => {
                tracing::debug!(source = ?session.source, ?target, "drag dropped");
                let drop = UiEvent::Drag {
                    phase: DragPhase::Drop,
                    pos,
                };
                self.dispatcher.deliver(scene, target, drop, Phase::Target, payload);
            }
            None => {
                tracing::debug!(source = ?session.source, "drag released without a target");
                if let Some(hover) = session.hover_target {
                    let leave = UiEvent::Drag {
                        phase: DragPhase::Leave,
                        pos,
                    };
                    self.dispatcher.deliver(scene, hover, leave, Phase::Target, payload);
                }
                let cancel = UiEvent::Drag {
                    phase: DragPhase::Cancel,
                    pos,
                };
                self.dispatcher
                    .deliver(scene, session.source, cancel, Phase::Target, payload);
            }
        }

        let end = UiEvent::Drag {
            phase: DragPhase::End,
            pos,
        };
        self.dispatcher
            .deliver(scene, session.source, end, Phase::Target, payload);
        self.invalidated = true;
    }

    /// Sends `Leave` to a hover target that can no longer receive the drop
    /// and forgets it.
    pub(super) fn drag_leave(&mut self, scene: &mut Scene, target: NodeId) {
        self.drag.set_hover_target(None);
        let Some(session) = self.drag.session() else {
            return;
        };
        let leave = UiEvent::Drag {
            phase: DragPhase::Leave,
            pos: session.current,
        };
        self.dispatcher
            .deliver(scene, target, leave, Phase::Target, Some(&session.payload));
        self.invalidated = true;
    }

    /// Aborts the drag in flight: Leave to the hover target, then Cancel and
    /// End to the source.
    pub(super) fn drag_cancel(&mut self, scene: &mut Scene) {
        let Some(session) = self.drag.finish() else {
            return;
        };
        let pos = session.current;
        let payload = Some(&session.payload);
        tracing::debug!(source = ?session.source, "drag cancelled");

        if let Some(hover) = session.hover_target {
            let leave = UiEvent::Drag {
                phase: DragPhase::Leave,
                pos,
            };
            self.dispatcher.deliver(scene, hover, leave, Phase::Target, payload);
        }
        for phase in [DragPhase::Cancel, DragPhase::End] {
            self.dispatcher
                .deliver(scene, session.source, UiEvent::Drag { phase, pos }, Phase::Target, payload);
        }
        self.invalidated = true;
    }
}
