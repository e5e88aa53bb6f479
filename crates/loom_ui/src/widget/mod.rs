//! # Widgets
//!
//! A closed set of widget kinds. Behavior is an exhaustive match over
//! [`WidgetKind`], so adding a kind means every dispatch site is revisited.
//!
//! Handlers never touch the tree. Anything structural (capture, focus, drag
//! arming, closing a modal) is posted to the [`EventContext`] and applied by
//! the router once the event has been delivered.

mod tooltip;

use crate::drag::{DragPayload, DragVisual, PayloadKind};
use crate::event::{CloseReason, DragPhase, InputEvent, MouseButton, Phase, UiEvent};
use crate::geometry::{Layout, Point, Rect};
use crate::render::{DrawList, SpriteLookup, SpriteRegion};
use crate::scene::{NodeId, SceneNode};
use crate::signal::{SignalBus, SignalValue};
use crate::style::{Color, Theme};

pub use tooltip::{Tooltip, TooltipManager};

/// Push button.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonState {
    /// Caption.
    pub label: String,
    /// Pointer is over the button.
    pub hovered: bool,
    /// Pressed and waiting for release.
    pub pressed: bool,
    /// Completed clicks.
    pub clicks: u32,
    /// Topic to publish the click count on.
    pub topic: Option<String>,
    /// Closes the active modal with this reason when clicked.
    pub closes_modal: Option<CloseReason>,
}

/// Widget that starts drag gestures.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSourceState {
    /// Data handed to the drag session.
    pub payload: DragPayload,
    /// Cursor visual while dragging.
    pub visual: DragVisual,
    /// A drag from this source is in flight.
    pub dragging: bool,
}

/// Widget that receives drops.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTargetState {
    /// Payload kinds this target accepts.
    pub accepts: Vec<PayloadKind>,
    /// An accepting drag hovers the target.
    pub highlighted: bool,
    /// Most recent accepted payload.
    pub last_drop: Option<DragPayload>,
    /// Topic to publish accepted payloads on.
    pub topic: Option<String>,
}

/// Closed set of widget kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    /// Background surface.
    Panel {
        /// Tint.
        tint: Color,
        /// Optional sprite.
        sprite: Option<String>,
        /// Swallows pointer presses that reach it.
        opaque: bool,
    },
    /// Single text run.
    Label {
        /// Text.
        text: String,
        /// Text color.
        color: Color,
    },
    /// Sprite. A zero local size takes the sprite's natural size.
    Image {
        /// Sprite name.
        sprite: String,
        /// Tint.
        tint: Color,
    },
    /// Push button.
    Button(ButtonState),
    /// Linear container.
    Stack {
        /// Arrangement.
        layout: Layout,
    },
    /// Vertically scrolling container.
    ScrollView {
        /// Scroll offset, clamped to `[0, content_height - height]`.
        offset: f32,
        /// Virtual units per wheel notch.
        step: f32,
        /// Extent of the children measured at the last layout.
        content_height: f32,
    },
    /// Drag source.
    DragSource(DragSourceState),
    /// Drop target.
    DropTarget(DropTargetState),
    /// Root of a modal popup.
    Popup {
        /// Currently shown by the modal layer.
        open: bool,
        /// Reason of the last close.
        last_close: Option<CloseReason>,
    },
}

impl WidgetKind {
    /// Plain panel.
    #[must_use]
    pub fn panel(tint: Color) -> Self {
        Self::Panel {
            tint,
            sprite: None,
            opaque: false,
        }
    }

    /// Text label.
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label {
            text: text.into(),
            color: Color::WHITE,
        }
    }

    /// Untinted image.
    #[must_use]
    pub fn image(sprite: impl Into<String>) -> Self {
        Self::Image {
            sprite: sprite.into(),
            tint: Color::WHITE,
        }
    }

    /// Button with a caption.
    #[must_use]
    pub fn button(label: impl Into<String>) -> Self {
        Self::Button(ButtonState {
            label: label.into(),
            hovered: false,
            pressed: false,
            clicks: 0,
            topic: None,
            closes_modal: None,
        })
    }

    /// Scroll view moving `step` units per wheel notch.
    #[must_use]
    pub fn scroll_view(step: f32) -> Self {
        Self::ScrollView {
            offset: 0.0,
            step,
            content_height: 0.0,
        }
    }

    /// Drag source.
    #[must_use]
    pub fn drag_source(payload: DragPayload, visual: DragVisual) -> Self {
        Self::DragSource(DragSourceState {
            payload,
            visual,
            dragging: false,
        })
    }

    /// Drop target accepting the given kinds.
    #[must_use]
    pub fn drop_target(accepts: impl IntoIterator<Item = PayloadKind>) -> Self {
        Self::DropTarget(DropTargetState {
            accepts: accepts.into_iter().collect(),
            highlighted: false,
            last_drop: None,
            topic: None,
        })
    }

    /// Popup root.
    #[must_use]
    pub fn popup() -> Self {
        Self::Popup {
            open: false,
            last_close: None,
        }
    }

    /// Publishes clicks (buttons) or drops (drop targets) on `topic`.
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        match &mut self {
            Self::Button(ButtonState { topic: slot, .. }) | Self::DropTarget(DropTargetState { topic: slot, .. }) => {
                *slot = Some(topic.into());
            }
            _ => {}
        }
        self
    }

    /// Makes a button close the active modal with `reason`.
    #[must_use]
    pub fn closing_modal(mut self, reason: CloseReason) -> Self {
        if let Self::Button(button) = &mut self {
            button.closes_modal = Some(reason);
        }
        self
    }

    /// Makes a panel swallow pointer presses.
    #[must_use]
    pub fn opaque(mut self) -> Self {
        if let Self::Panel { opaque, .. } = &mut self {
            *opaque = true;
        }
        self
    }

    pub(crate) fn focusable_by_default(&self) -> bool {
        matches!(self, Self::Button(_))
    }

    pub(crate) fn hit_test_by_default(&self) -> bool {
        !matches!(self, Self::Label { .. } | Self::Stack { .. })
    }
}

// =============================================================================
// Event context
// =============================================================================

/// Structural requests posted by handlers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Requests {
    /// Capture the pointer for this node.
    pub capture: Option<NodeId>,
    /// Release pointer capture.
    pub release_capture: bool,
    /// Move keyboard focus here.
    pub focus: Option<NodeId>,
    /// Arm a drag gesture from this source.
    pub arm_drag: Option<NodeId>,
    /// Close the active modal.
    pub close_modal: Option<CloseReason>,
    /// Visible state changed.
    pub invalidate: bool,
}

/// What a handler sees besides its own node.
pub struct EventContext<'a> {
    node: NodeId,
    phase: Phase,
    requests: &'a mut Requests,
    bus: Option<&'a SignalBus>,
    payload: Option<&'a DragPayload>,
}

impl<'a> EventContext<'a> {
    /// Creates a context for one delivery.
    pub fn new(
        node: NodeId,
        phase: Phase,
        requests: &'a mut Requests,
        bus: Option<&'a SignalBus>,
        payload: Option<&'a DragPayload>,
    ) -> Self {
        Self {
            node,
            phase,
            requests,
            bus,
            payload,
        }
    }

    /// Node receiving the event.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Delivery phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Payload of the drag in flight, for drag notifications.
    #[must_use]
    pub fn payload(&self) -> Option<&'a DragPayload> {
        self.payload
    }

    /// Routes later pointer events straight to this node.
    pub fn capture_pointer(&mut self) {
        self.requests.capture = Some(self.node);
    }

    /// Releases pointer capture.
    pub fn release_pointer(&mut self) {
        self.requests.release_capture = true;
    }

    /// Moves keyboard focus to this node.
    pub fn request_focus(&mut self) {
        self.requests.focus = Some(self.node);
    }

    /// Arms a drag gesture with this node as the source.
    pub fn arm_drag(&mut self) {
        self.requests.arm_drag = Some(self.node);
    }

    /// Closes the active modal after this event.
    pub fn close_modal(&mut self, reason: CloseReason) {
        self.requests.close_modal = Some(reason);
    }

    /// Marks the frame dirty.
    pub fn invalidate(&mut self) {
        self.requests.invalidate = true;
    }

    /// Publishes on the signal bus, if one is attached.
    pub fn publish(&self, topic: &str, value: SignalValue) {
        if let Some(bus) = self.bus {
            bus.publish(topic, value);
        }
    }
}

// =============================================================================
// Behavior
// =============================================================================

/// Delivers an event to a node. Returns true if consumed.
pub fn handle_event(node: &mut SceneNode, event: &UiEvent, ctx: &mut EventContext<'_>) -> bool {
    let pointer_inside = match event {
        UiEvent::Input(input) => input.position().map(|p| node.hit_test(p)),
        _ => None,
    };
    let height = node.rect().height;

    match &mut node.kind {
        WidgetKind::Panel { opaque, .. } => {
            *opaque
                && ctx.phase() != Phase::Capture
                && matches!(
                    event,
                    UiEvent::Input(InputEvent::PointerDown { .. } | InputEvent::PointerUp { .. })
                )
        }
        WidgetKind::Label { .. } | WidgetKind::Image { .. } | WidgetKind::Stack { .. } => false,
        WidgetKind::Button(button) => button.handle(event, pointer_inside.unwrap_or(false), ctx),
        WidgetKind::ScrollView {
            offset,
            step,
            content_height,
        } => {
            let UiEvent::Input(InputEvent::Scroll { delta, .. }) = event else {
                return false;
            };
            if ctx.phase() == Phase::Capture {
                return false;
            }
            let max_offset = (*content_height - height).max(0.0);
            let next = (*offset + delta.1 * *step).clamp(0.0, max_offset);
            if (next - *offset).abs() <= f32::EPSILON {
                return false;
            }
            *offset = next;
            ctx.invalidate();
            true
        }
        WidgetKind::DragSource(source) => source.handle(event, ctx),
        WidgetKind::DropTarget(target) => target.handle(event, ctx),
        WidgetKind::Popup { open, last_close } => match event {
            UiEvent::PopupOpened => {
                *open = true;
                ctx.invalidate();
                true
            }
            UiEvent::PopupClosed(reason) => {
                *open = false;
                *last_close = Some(*reason);
                true
            }
            UiEvent::Input(InputEvent::PointerDown { .. } | InputEvent::PointerUp { .. }) => {
                ctx.phase() == Phase::Target
            }
            _ => false,
        },
    }
}

impl ButtonState {
    fn handle(&mut self, event: &UiEvent, pointer_inside: bool, ctx: &mut EventContext<'_>) -> bool {
        match *event {
            UiEvent::PointerEnter => {
                self.hovered = true;
                ctx.invalidate();
                false
            }
            UiEvent::PointerLeave => {
                self.hovered = false;
                ctx.invalidate();
                false
            }
            UiEvent::FocusGained | UiEvent::FocusLost => {
                ctx.invalidate();
                false
            }
            UiEvent::CaptureLost => {
                self.pressed = false;
                ctx.invalidate();
                true
            }
            UiEvent::Input(InputEvent::PointerDown {
                button: MouseButton::Left,
                ..
            }) if ctx.phase() == Phase::Target => {
                self.pressed = true;
                ctx.capture_pointer();
                ctx.invalidate();
                true
            }
            UiEvent::Input(InputEvent::PointerUp {
                button: MouseButton::Left,
                ..
            }) if ctx.phase() == Phase::Target && self.pressed => {
                self.pressed = false;
                ctx.release_pointer();
                ctx.invalidate();
                if pointer_inside {
                    self.click(ctx);
                }
                true
            }
            UiEvent::Input(input) if input.is_activate() && ctx.phase() == Phase::Target => {
                self.click(ctx);
                true
            }
            _ => false,
        }
    }

    fn click(&mut self, ctx: &mut EventContext<'_>) {
        self.clicks += 1;
        tracing::debug!(node = ?ctx.node(), label = %self.label, clicks = self.clicks, "button clicked");
        if let Some(topic) = &self.topic {
            ctx.publish(topic, SignalValue::Int(i64::from(self.clicks)));
        }
        if let Some(reason) = self.closes_modal {
            ctx.close_modal(reason);
        }
        ctx.invalidate();
    }
}

impl DragSourceState {
    fn handle(&mut self, event: &UiEvent, ctx: &mut EventContext<'_>) -> bool {
        match *event {
            UiEvent::Input(InputEvent::PointerDown {
                button: MouseButton::Left,
                ..
            }) if ctx.phase() == Phase::Target => {
                ctx.arm_drag();
                true
            }
            UiEvent::Drag {
                phase: DragPhase::Begin,
                ..
            } => {
                self.dragging = true;
                ctx.invalidate();
                true
            }
            UiEvent::Drag {
                phase: DragPhase::End,
                ..
            } => {
                self.dragging = false;
                ctx.invalidate();
                true
            }
            UiEvent::Drag {
                phase: DragPhase::Cancel,
                ..
            } => true,
            _ => false,
        }
    }
}

impl DropTargetState {
    fn handle(&mut self, event: &UiEvent, ctx: &mut EventContext<'_>) -> bool {
        let UiEvent::Drag { phase, .. } = *event else {
            return false;
        };
        match phase {
            DragPhase::Enter => {
                self.highlighted = ctx.payload().is_some_and(|p| self.accepts(p));
                ctx.invalidate();
                true
            }
            DragPhase::Leave => {
                self.highlighted = false;
                ctx.invalidate();
                true
            }
            DragPhase::Over => true,
            DragPhase::Drop => {
                self.highlighted = false;
                if let Some(payload) = ctx.payload() {
                    tracing::debug!(node = ?ctx.node(), kind = ?payload.kind, "payload dropped");
                    if let Some(topic) = &self.topic {
                        ctx.publish(topic, payload.to_signal());
                    }
                    self.last_drop = Some(payload.clone());
                }
                ctx.invalidate();
                true
            }
            DragPhase::Begin | DragPhase::Cancel | DragPhase::End => false,
        }
    }

    fn accepts(&self, payload: &DragPayload) -> bool {
        self.accepts.contains(&payload.kind)
    }
}

/// Acceptance query for a drag payload. Pure.
#[must_use]
pub fn accepts(kind: &WidgetKind, payload: &DragPayload) -> bool {
    match kind {
        WidgetKind::DropTarget(target) => target.accepts(payload),
        WidgetKind::Panel { .. }
        | WidgetKind::Label { .. }
        | WidgetKind::Image { .. }
        | WidgetKind::Button(_)
        | WidgetKind::Stack { .. }
        | WidgetKind::ScrollView { .. }
        | WidgetKind::DragSource(_)
        | WidgetKind::Popup { .. } => false,
    }
}

// =============================================================================
// Drawing
// =============================================================================

const LABEL_INSET: f32 = 6.0;

/// Emits the node's primitive. Buttons add their caption as a text run.
pub fn draw(node: &SceneNode, sprites: &dyn SpriteLookup, theme: &Theme, list: &mut DrawList) {
    let dest = node.visual_rect();
    let clip = node.visual_clip();

    match &node.kind {
        WidgetKind::Panel { tint, sprite, .. } => {
            let region = sprite
                .as_deref()
                .and_then(|name| sprites.sprite(name))
                .map_or(SpriteRegion::SOLID, |s| s.region);
            list.push_quad(dest, region, *tint, clip);
        }
        WidgetKind::Label { text, color } => {
            list.push_text(text, Point::new(dest.x, dest.y), *color, clip);
        }
        WidgetKind::Image { sprite, tint } => {
            if let Some(info) = sprites.sprite(sprite) {
                list.push_quad(dest, info.region, *tint, clip);
            }
        }
        WidgetKind::Button(button) => {
            let color = if button.pressed {
                theme.button_pressed
            } else if button.hovered {
                theme.button_hover
            } else {
                theme.button
            };
            list.push_quad(dest, SpriteRegion::SOLID, color, clip);
            list.push_text(
                &button.label,
                Point::new(dest.x + LABEL_INSET, dest.y + LABEL_INSET),
                Color::WHITE,
                clip,
            );
        }
        WidgetKind::Stack { .. } | WidgetKind::ScrollView { .. } => {}
        WidgetKind::DragSource(source) => {
            let region = sprites
                .sprite(&source.visual.sprite)
                .map_or(SpriteRegion::SOLID, |s| s.region);
            let tint = if source.dragging {
                source.visual.tint.with_alpha(0.35)
            } else {
                source.visual.tint
            };
            list.push_quad(dest, region, tint, clip);
        }
        WidgetKind::DropTarget(target) => {
            let color = if target.highlighted {
                theme.drop_highlight
            } else {
                theme.surface
            };
            list.push_quad(dest, SpriteRegion::SOLID, color, clip);
        }
        WidgetKind::Popup { .. } => {
            list.push_quad(dest, SpriteRegion::SOLID, theme.surface, clip);
        }
    }
}

/// Draws a drag visual at the cursor.
pub fn draw_drag_visual(visual: &DragVisual, cursor: Point, viewport: Rect, sprites: &dyn SpriteLookup, list: &mut DrawList) {
    let region = sprites.sprite(&visual.sprite).map_or(SpriteRegion::SOLID, |s| s.region);
    list.push_quad(visual.rect_at(cursor), region, visual.tint, viewport);
}
