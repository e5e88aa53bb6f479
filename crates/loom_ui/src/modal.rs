//! # Modal Layer
//!
//! Full-viewport gate over the forest holding at most one popup subtree.
//! While a popup is open, pointer events never reach the views below.
//!
//! The layer only owns placement and the popup handle. Notifications
//! (`PopupOpened`, `PopupClosed`) are delivered by the router so they show up
//! in its dispatch log like every other delivery.

use crate::error::{UiError, UiResult};
use crate::geometry::{Anchors, Rect};
use crate::render::SpriteLookup;
use crate::scene::{NodeId, Scene};

/// Modal popup state.
#[derive(Debug, Clone)]
pub struct ModalLayer {
    popup: Option<NodeId>,
    anchor: Rect,
    gap: f32,
    viewport: Rect,
}

impl ModalLayer {
    /// Creates an inactive layer.
    #[must_use]
    pub fn new(gap: f32, viewport: Rect) -> Self {
        Self {
            popup: None,
            anchor: Rect::ZERO,
            gap,
            viewport,
        }
    }

    /// Returns true while a popup is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.popup.is_some()
    }

    /// Root of the open popup.
    #[must_use]
    pub fn popup(&self) -> Option<NodeId> {
        self.popup
    }

    /// Rect the open popup was anchored to.
    #[must_use]
    pub fn anchor(&self) -> Rect {
        self.anchor
    }

    /// Updates the viewport used for placement.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Places a popup of `size` next to `anchor`.
    ///
    /// Below the anchor by default, above it when it does not fit below, then
    /// clamped inside the viewport.
    #[must_use]
    pub fn place(&self, size: (f32, f32), anchor: Rect) -> Rect {
        let (width, height) = size;
        let below = anchor.bottom() + self.gap;
        let above = anchor.y - self.gap - height;
        let y = if below + height > self.viewport.bottom() && above >= self.viewport.y {
            above
        } else {
            below
        };
        Rect::new(anchor.x, y, width, height).clamp_inside(&self.viewport)
    }

    /// Installs `popup` as the open popup, placed against `anchor` and laid out.
    ///
    /// The caller must have closed any previous popup.
    ///
    /// # Errors
    ///
    /// [`UiError::StaleNode`] for a dead handle, [`UiError::AlreadyAttached`]
    /// if the popup is not a detached root.
    pub fn install(
        &mut self,
        scene: &mut Scene,
        popup: NodeId,
        anchor: Rect,
        sprites: &dyn SpriteLookup,
    ) -> UiResult<Rect> {
        let node = scene.get(popup).ok_or(UiError::StaleNode(popup))?;
        if node.parent().is_some() {
            return Err(UiError::AlreadyAttached(popup));
        }

        let rect = self.place((node.local.width, node.local.height), anchor);
        if let Some(node) = scene.get_mut(popup) {
            node.local = rect;
            node.anchors = Anchors::NONE;
            node.visible = true;
        }
        scene.layout(popup, self.viewport, sprites);

        self.popup = Some(popup);
        self.anchor = anchor;
        tracing::debug!(?popup, ?rect, "modal opened");
        Ok(rect)
    }

    /// Forgets the popup without touching the scene. Returns it.
    pub fn take(&mut self) -> Option<NodeId> {
        self.popup.take()
    }

    /// Lays out the open popup again.
    pub fn layout(&self, scene: &mut Scene, sprites: &dyn SpriteLookup) {
        if let Some(popup) = self.popup {
            scene.layout(popup, self.viewport, sprites);
        }
    }
}
