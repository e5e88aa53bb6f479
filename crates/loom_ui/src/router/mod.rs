//! # Event Router
//!
//! Turns raw input into widget deliveries.
//!
//! ```text
//! InputEvent
//!    │ sanitize slots (dead / unreachable nodes are dropped)
//!    ├─ drag active?         → drag flow (pointer + Escape)
//!    ├─ keyboard-like?       → focus widget → modal → navigation
//!    ├─ modal open?          → captured popup widget or the popup subtree
//!    ├─ pointer captured?    → captured widget
//!    ├─ scroll with hover?   → hover chain (target, bubble)
//!    └─ otherwise            → topmost hit path (capture, target, bubble)
//! ```
//!
//! The router is an explicit context owned by the run loop. It owns the
//! capture, hover and focus slots plus the drag, modal and tooltip state.

mod dispatch;
mod keyboard;
mod log;
mod pointer;

use std::sync::Arc;

use crate::config::UiConfig;
use crate::drag::DragController;
use crate::error::UiResult;
use crate::event::{CloseReason, InputEvent, Phase, UiEvent};
use crate::geometry::{Point, Rect};
use crate::modal::ModalLayer;
use crate::render::{DrawList, SpriteLookup, SpriteRegion};
use crate::scene::{Forest, NodeId, Scene};
use crate::signal::SignalBus;
use crate::style::Theme;
use crate::widget::{self, Requests, TooltipManager, WidgetKind};

use dispatch::Dispatcher;
pub use log::{Delivery, DispatchLog};

// Follow-up requests (focus changes posting invalidation, ...) settle within a few rounds.
const MAX_REQUEST_ROUNDS: usize = 4;
const FOCUS_RING_WIDTH: f32 = 2.0;

/// Input dispatcher for one scene.
#[derive(Debug)]
pub struct Router {
    capture: Option<NodeId>,
    hover: Option<NodeId>,
    focus: Option<NodeId>,
    drag: DragController,
    modal: ModalLayer,
    tooltips: TooltipManager,
    dispatcher: Dispatcher,
    invalidated: bool,
    pointer: Point,
    viewport: Rect,
    path: Vec<NodeId>,
}

impl Router {
    /// Creates a router from configuration.
    #[must_use]
    pub fn new(config: &UiConfig) -> Self {
        let viewport = config.viewport_rect();
        Self {
            capture: None,
            hover: None,
            focus: None,
            drag: DragController::new(config.drag.threshold),
            modal: ModalLayer::new(config.modal.gap, viewport),
            tooltips: TooltipManager::new(config.tooltip, viewport),
            dispatcher: Dispatcher::new(config.diagnostics.dispatch_log_capacity),
            invalidated: true,
            pointer: Point::ZERO,
            viewport,
            path: Vec::with_capacity(32),
        }
    }

    /// Attaches the bus widgets publish on.
    pub fn set_signal_bus(&mut self, bus: Arc<SignalBus>) {
        self.dispatcher.bus = Some(bus);
    }

    /// Updates the viewport used by the modal layer and tooltips.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
        self.modal.set_viewport(viewport);
        self.tooltips.set_viewport(viewport);
        self.invalidated = true;
    }

    // =========================================================================
    // Routing
    // =========================================================================

    /// Routes one input event. Returns true if a widget consumed it.
    pub fn route(&mut self, scene: &mut Scene, forest: &Forest, event: InputEvent) -> bool {
        self.sanitize(scene, forest);
        if let Some(pos) = event.position() {
            self.pointer = pos;
        }
        tracing::trace!(?event, "route");

        let consumed = if event.is_pointer() {
            self.route_pointer(scene, forest, event)
        } else {
            self.route_keyboard(scene, forest, event)
        };
        self.apply_requests(scene);
        consumed
    }

    /// Advances time-based state (tooltip delay).
    pub fn update(&mut self, dt: f32) {
        if self.tooltips.update(dt) {
            self.invalidated = true;
        }
    }

    /// Drops every slot whose node is dead or no longer reachable from a
    /// visible forest root or the open popup.
    ///
    /// Live nodes losing a slot are told: capture holders get `CaptureLost`,
    /// a gesture whose source went away is cancelled.
    pub fn sanitize(&mut self, scene: &mut Scene, forest: &Forest) {
        if self.modal.popup().is_some_and(|p| !scene.contains(p)) {
            tracing::debug!("modal popup destroyed externally");
            self.modal.take();
        }
        let popup = self.modal.popup();
        let reachable = |id: NodeId| {
            scene
                .visible_root(id)
                .is_some_and(|root| forest.contains_root(root) || Some(root) == popup)
        };

        let capture_lost = self.capture.is_some_and(|c| !reachable(c));
        let hover_lost = self.hover.is_some_and(|h| !reachable(h));
        let focus_lost = self.focus.is_some_and(|f| !reachable(f));
        let drag = self
            .drag
            .session()
            .map(|s| (reachable(s.source), s.hover_target.filter(|&t| !reachable(t))));

        if capture_lost {
            self.drop_capture(scene);
        }
        if hover_lost {
            self.hover = None;
            self.tooltips.hide();
        }
        if focus_lost {
            tracing::debug!(focus = ?self.focus, "focus node unreachable, cleared");
            self.focus = None;
        }
        match drag {
            Some((false, _)) => {
                tracing::debug!("drag source unreachable, gesture cancelled");
                self.drag_cancel(scene);
            }
            Some((true, Some(target))) => self.drag_leave(scene, target),
            Some((true, None)) | None => {}
        }
        self.apply_requests(scene);
    }

    /// Takes pointer capture away from its holder before the pointer is
    /// released.
    fn drop_capture(&mut self, scene: &mut Scene) {
        if let Some(old) = self.capture.take() {
            self.dispatcher
                .deliver(scene, old, UiEvent::CaptureLost, Phase::Target, None);
            self.invalidated = true;
        }
    }

    fn apply_requests(&mut self, scene: &mut Scene) {
        for _ in 0..MAX_REQUEST_ROUNDS {
            let requests = std::mem::take(&mut self.dispatcher.requests);
            if requests == Requests::default() {
                return;
            }
            if requests.invalidate {
                self.invalidated = true;
            }
            if requests.release_capture {
                self.capture = None;
            }
            if let Some(node) = requests.capture {
                if self.capture != Some(node) {
                    self.drop_capture(scene);
                }
                self.capture = Some(node);
                self.tooltips.hide();
            }
            if let Some(node) = requests.focus {
                self.set_focus(scene, Some(node));
            }
            if let Some(source) = requests.arm_drag {
                if let Some(WidgetKind::DragSource(state)) = scene.get(source).map(|n| &n.kind) {
                    self.drag
                        .arm(source, self.pointer, state.payload.clone(), state.visual.clone());
                    tracing::debug!(?source, "drag armed");
                }
            }
            if let Some(reason) = requests.close_modal {
                self.close_modal_inner(scene, reason, true);
            }
        }
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Moves keyboard focus. Non-focusable or hidden targets clear it.
    pub fn set_focus(&mut self, scene: &mut Scene, target: Option<NodeId>) {
        let target = target.filter(|&t| scene.get(t).is_some_and(|n| n.focusable && n.visible));
        if target == self.focus {
            return;
        }
        if let Some(old) = self.focus.take() {
            self.dispatcher
                .deliver(scene, old, UiEvent::FocusLost, Phase::Target, None);
        }
        self.focus = target;
        if let Some(new) = target {
            self.dispatcher
                .deliver(scene, new, UiEvent::FocusGained, Phase::Target, None);
        }
        tracing::debug!(focus = ?target, "focus changed");
        self.invalidated = true;
    }

    // =========================================================================
    // Modal
    // =========================================================================

    /// Opens `popup` (a detached root) anchored to `anchor`.
    ///
    /// An open popup is closed first with [`CloseReason::Cancelled`].
    ///
    /// # Errors
    ///
    /// As [`ModalLayer::install`].
    pub fn open_modal(
        &mut self,
        scene: &mut Scene,
        popup: NodeId,
        anchor: Rect,
        sprites: &dyn SpriteLookup,
    ) -> UiResult<()> {
        if self.modal.is_active() {
            self.close_modal_inner(scene, CloseReason::Cancelled, true);
        }
        self.modal.install(scene, popup, anchor, sprites)?;

        if let Some(hover) = self.hover.take() {
            self.dispatcher
                .deliver(scene, hover, UiEvent::PointerLeave, Phase::Target, None);
        }
        self.tooltips.hide();
        self.drop_capture(scene);
        self.dispatcher
            .deliver(scene, popup, UiEvent::PopupOpened, Phase::Target, None);
        self.invalidated = true;
        self.apply_requests(scene);
        Ok(())
    }

    /// Closes the open popup and destroys its subtree.
    ///
    /// With `notify`, the popup root receives `PopupClosed(reason)` first.
    /// Returns false if no popup was open.
    pub fn close_modal(&mut self, scene: &mut Scene, reason: CloseReason, notify: bool) -> bool {
        let closed = self.close_modal_inner(scene, reason, notify);
        self.apply_requests(scene);
        closed
    }

    fn close_modal_inner(&mut self, scene: &mut Scene, reason: CloseReason, notify: bool) -> bool {
        let Some(popup) = self.modal.take() else {
            return false;
        };
        if notify {
            self.dispatcher
                .deliver(scene, popup, UiEvent::PopupClosed(reason), Phase::Target, None);
        }

        if self.capture.is_some_and(|c| scene.is_in_subtree(c, popup)) {
            self.drop_capture(scene);
        }
        if self.hover.is_some_and(|h| scene.is_in_subtree(h, popup)) {
            self.tooltips.hide();
        }
        for slot in [&mut self.hover, &mut self.focus] {
            if slot.is_some_and(|n| scene.is_in_subtree(n, popup)) {
                *slot = None;
            }
        }
        let drag = self.drag.session().map(|s| {
            (
                scene.is_in_subtree(s.source, popup),
                s.hover_target.filter(|&t| scene.is_in_subtree(t, popup)),
            )
        });
        match drag {
            Some((true, _)) => self.drag_cancel(scene),
            Some((false, Some(target))) => self.drag_leave(scene, target),
            Some((false, None)) | None => {}
        }

        if let Err(err) = scene.destroy(popup) {
            tracing::warn!(%err, "closing modal");
        }
        tracing::debug!(?popup, ?reason, "modal closed");
        self.invalidated = true;
        true
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Node holding pointer capture.
    #[must_use]
    pub fn capture(&self) -> Option<NodeId> {
        self.capture
    }

    /// Node under the pointer.
    #[must_use]
    pub fn hover(&self) -> Option<NodeId> {
        self.hover
    }

    /// Node with keyboard focus.
    #[must_use]
    pub fn focus(&self) -> Option<NodeId> {
        self.focus
    }

    /// Drag gesture state.
    #[must_use]
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Modal layer state.
    #[must_use]
    pub fn modal(&self) -> &ModalLayer {
        &self.modal
    }

    /// Tooltip state.
    #[must_use]
    pub fn tooltips(&self) -> &TooltipManager {
        &self.tooltips
    }

    /// Recent deliveries.
    #[must_use]
    pub fn log(&self) -> &DispatchLog {
        &self.dispatcher.log
    }

    /// Clears the dispatch log.
    pub fn clear_log(&mut self) {
        self.dispatcher.log.clear();
    }

    /// Last known pointer position.
    #[must_use]
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Returns true if the frame needs redrawing.
    #[must_use]
    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    /// Marks the frame dirty.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Returns and clears the dirty flag.
    pub fn take_invalidated(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }

    // =========================================================================
    // Overlays
    // =========================================================================

    /// Draws a ring around the focus widget.
    pub fn draw_focus_ring(&self, scene: &Scene, theme: &Theme, list: &mut DrawList) {
        let Some(node) = self.focus.and_then(|f| scene.get(f)) else {
            return;
        };
        let r = node.visual_rect().expand(FOCUS_RING_WIDTH);
        let w = FOCUS_RING_WIDTH;
        for edge in [
            Rect::new(r.x, r.y, r.width, w),
            Rect::new(r.x, r.bottom() - w, r.width, w),
            Rect::new(r.x, r.y, w, r.height),
            Rect::new(r.right() - w, r.y, w, r.height),
        ] {
            list.push_quad(edge, SpriteRegion::SOLID, theme.focus, self.viewport);
        }
    }

    /// Draws what sits above the views: modal popup, focus ring, drag visual
    /// and tooltip, in that order.
    pub fn draw_overlays(&self, scene: &Scene, sprites: &dyn SpriteLookup, theme: &Theme, list: &mut DrawList) {
        if let Some(popup) = self.modal.popup() {
            scene.draw(popup, sprites, theme, list);
        }
        self.draw_focus_ring(scene, theme, list);
        if let Some(session) = self.drag.session().filter(|_| self.drag.is_active()) {
            widget::draw_drag_visual(&session.visual, session.current, self.viewport, sprites, list);
        }
        self.tooltips.draw(list);
    }
}
