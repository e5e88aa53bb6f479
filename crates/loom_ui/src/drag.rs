//! # Drag and Drop
//!
//! ```text
//!            press on DragSource          travel >= threshold
//!   Idle ───────────────────────> Armed ───────────────────────> Active
//!    ^                              │                              │
//!    │         release (a click)    │     release / Escape         │
//!    └──────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! The controller only holds gesture state. The router turns transitions into
//! widget notifications.

use std::collections::BTreeMap;

use crate::geometry::{Point, Rect};
use crate::scene::NodeId;
use crate::signal::SignalValue;
use crate::style::Color;

/// What a payload represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// Inventory item.
    Item,
    /// Citizen.
    Citizen,
    /// Building.
    Building,
    /// Resource stack.
    Resource,
    /// Application-defined kind.
    Custom(u32),
}

/// Data carried by a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    /// Payload kind, matched against drop target filters.
    pub kind: PayloadKind,
    /// First integer field (usually an ID).
    pub i0: i64,
    /// Second integer field (usually a count).
    pub i1: i64,
    /// Application flags.
    pub flags: u32,
    /// String field (usually an entity key).
    pub s0: String,
}

impl DragPayload {
    /// Creates a payload of the given kind with empty fields.
    #[must_use]
    pub fn new(kind: PayloadKind) -> Self {
        Self {
            kind,
            i0: 0,
            i1: 0,
            flags: 0,
            s0: String::new(),
        }
    }

    /// Sets the integer fields.
    #[must_use]
    pub fn with_ints(mut self, i0: i64, i1: i64) -> Self {
        self.i0 = i0;
        self.i1 = i1;
        self
    }

    /// Sets the string field.
    #[must_use]
    pub fn with_str(mut self, s0: impl Into<String>) -> Self {
        self.s0 = s0.into();
        self
    }

    /// Sets the flag bits.
    #[must_use]
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Converts the payload into a signal object.
    #[must_use]
    pub fn to_signal(&self) -> SignalValue {
        let kind = match self.kind {
            PayloadKind::Item => "Item".to_owned(),
            PayloadKind::Citizen => "Citizen".to_owned(),
            PayloadKind::Building => "Building".to_owned(),
            PayloadKind::Resource => "Resource".to_owned(),
            PayloadKind::Custom(id) => format!("Custom({id})"),
        };
        let mut map = BTreeMap::new();
        map.insert("kind".to_owned(), SignalValue::Str(kind));
        map.insert("i0".to_owned(), SignalValue::Int(self.i0));
        map.insert("i1".to_owned(), SignalValue::Int(self.i1));
        map.insert("flags".to_owned(), SignalValue::Int(i64::from(self.flags)));
        map.insert("s0".to_owned(), SignalValue::Str(self.s0.clone()));
        SignalValue::Object(map)
    }
}

/// What follows the cursor during a drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragVisual {
    /// Sprite name; an unknown sprite draws a solid quad.
    pub sprite: String,
    /// Tint.
    pub tint: Color,
    /// Size in virtual units.
    pub size: (f32, f32),
    /// Grab point inside the visual, as a fraction of its size.
    pub anchor: (f32, f32),
}

impl DragVisual {
    /// Rect the visual occupies with the cursor at `cursor`.
    #[must_use]
    pub fn rect_at(&self, cursor: Point) -> Rect {
        Rect::new(
            cursor.x - self.size.0 * self.anchor.0,
            cursor.y - self.size.1 * self.anchor.1,
            self.size.0,
            self.size.1,
        )
    }
}

impl Default for DragVisual {
    fn default() -> Self {
        Self {
            sprite: String::new(),
            tint: Color::WHITE.with_alpha(0.8),
            size: (32.0, 32.0),
            anchor: (0.5, 0.5),
        }
    }
}

/// Gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    /// Pressed on a source, threshold not reached yet.
    Armed,
    /// Dragging.
    Active,
}

/// An armed or active drag gesture.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Gesture state.
    pub state: DragState,
    /// True once the pointer travelled past the threshold.
    pub threshold_met: bool,
    /// Press position.
    pub start: Point,
    /// Latest pointer position.
    pub current: Point,
    /// Pointer position before the latest move.
    pub previous: Point,
    /// Node the gesture started on.
    pub source: NodeId,
    /// Node under the cursor.
    pub hover_target: Option<NodeId>,
    /// `hover_target` when it accepted the payload on the latest query.
    pub drop_target: Option<NodeId>,
    /// Carried data.
    pub payload: DragPayload,
    /// Cursor visual.
    pub visual: DragVisual,
}

/// Outcome of a hover target update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverChange {
    /// Target the cursor left.
    pub left: Option<NodeId>,
    /// Target the cursor entered.
    pub entered: Option<NodeId>,
}

/// Drag gesture state machine.
#[derive(Debug, Clone)]
pub struct DragController {
    session: Option<DragSession>,
    threshold: f32,
}

impl DragController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            session: None,
            threshold: threshold.max(0.0),
        }
    }

    /// Travel needed before a press becomes a drag.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Current session, if armed or active.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Returns true if a session is armed but not dragging.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        matches!(self.session, Some(DragSession { state: DragState::Armed, .. }))
    }

    /// Returns true while dragging.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.session, Some(DragSession { state: DragState::Active, .. }))
    }

    /// Arms a gesture on `source`. Replaces any armed session; ignored while active.
    pub fn arm(&mut self, source: NodeId, at: Point, payload: DragPayload, visual: DragVisual) {
        if self.is_active() {
            return;
        }
        self.session = Some(DragSession {
            state: DragState::Armed,
            threshold_met: false,
            start: at,
            current: at,
            previous: at,
            source,
            hover_target: None,
            drop_target: None,
            payload,
            visual,
        });
    }

    /// Records pointer movement.
    ///
    /// Returns true exactly once: on the move that crosses the threshold.
    pub fn update_pointer(&mut self, pos: Point) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.previous = session.current;
        session.current = pos;

        if session.state == DragState::Armed && session.start.distance_sq(pos) >= self.threshold * self.threshold {
            session.state = DragState::Active;
            session.threshold_met = true;
            return true;
        }
        false
    }

    /// Updates the node under the cursor.
    ///
    /// A change clears the drop target until the new target accepts.
    pub fn set_hover_target(&mut self, target: Option<NodeId>) -> Option<HoverChange> {
        let session = self.session.as_mut()?;
        if session.hover_target == target {
            return None;
        }
        let left = session.hover_target;
        session.hover_target = target;
        session.drop_target = None;
        Some(HoverChange { left, entered: target })
    }

    /// Records the acceptance answer for the current hover target.
    pub fn set_acceptance(&mut self, accepted: bool) {
        if let Some(session) = self.session.as_mut() {
            session.drop_target = if accepted { session.hover_target } else { None };
        }
    }

    /// Ends the gesture and returns it.
    pub fn finish(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(4.0)
    }
}
