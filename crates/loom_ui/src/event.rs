//! Input and widget event types.
//!
//! [`InputEvent`] is what the platform layer feeds the router.
//! [`UiEvent`] is what widgets receive: either a routed input event or one the
//! router synthesizes (hover, focus, drag, popup lifecycle).

use crate::geometry::Point;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// Keyboard key.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Tab key.
    Tab,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Space bar.
    Space,
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Control key is held.
    pub ctrl: bool,
    /// Alt key is held.
    pub alt: bool,
    /// Super/Command key is held.
    pub super_key: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        super_key: false,
    };

    /// Only shift held.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };
}

/// Gamepad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    /// Bottom face button (confirm).
    South,
    /// Right face button (back).
    East,
    /// Left face button.
    West,
    /// Top face button.
    North,
    /// D-pad up.
    DPadUp,
    /// D-pad down.
    DPadDown,
    /// D-pad left.
    DPadLeft,
    /// D-pad right.
    DPadRight,
    /// Left shoulder.
    LeftShoulder,
    /// Right shoulder.
    RightShoulder,
    /// Start/menu.
    Start,
}

/// Raw input, one value per platform event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved.
    PointerMove {
        /// New pointer position.
        pos: Point,
    },
    /// Pointer button pressed.
    PointerDown {
        /// Pointer position.
        pos: Point,
        /// Button pressed.
        button: MouseButton,
    },
    /// Pointer button released.
    PointerUp {
        /// Pointer position.
        pos: Point,
        /// Button released.
        button: MouseButton,
    },
    /// Wheel scrolled.
    Scroll {
        /// Pointer position.
        pos: Point,
        /// Scroll delta (x, y); positive y scrolls content up.
        delta: (f32, f32),
    },
    /// Keyboard key changed state.
    Key {
        /// Key.
        key: Key,
        /// Modifiers held at the time.
        modifiers: Modifiers,
        /// True on press, false on release.
        pressed: bool,
    },
    /// Text character committed.
    Text {
        /// Character.
        ch: char,
    },
    /// Gamepad button changed state.
    Gamepad {
        /// Button.
        button: GamepadButton,
        /// True on press, false on release.
        pressed: bool,
    },
}

impl InputEvent {
    /// Returns the pointer position for pointer-like events.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::PointerMove { pos }
            | Self::PointerDown { pos, .. }
            | Self::PointerUp { pos, .. }
            | Self::Scroll { pos, .. } => Some(pos),
            Self::Key { .. } | Self::Text { .. } | Self::Gamepad { .. } => None,
        }
    }

    /// Returns true for pointer-like events (including scroll).
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        self.position().is_some()
    }

    /// Returns true for keyboard, text and gamepad events.
    #[must_use]
    pub fn is_keyboard_like(&self) -> bool {
        !self.is_pointer()
    }

    /// Returns true for a key press of Escape or a gamepad back press.
    #[must_use]
    pub fn is_cancel(&self) -> bool {
        matches!(
            self,
            Self::Key {
                key: Key::Escape,
                pressed: true,
                ..
            } | Self::Gamepad {
                button: GamepadButton::East,
                pressed: true,
            }
        )
    }

    /// Returns true for a key press of Enter/Space or a gamepad confirm press.
    #[must_use]
    pub fn is_activate(&self) -> bool {
        matches!(
            self,
            Self::Key {
                key: Key::Enter | Key::Space,
                pressed: true,
                ..
            } | Self::Gamepad {
                button: GamepadButton::South,
                pressed: true,
            }
        )
    }
}

/// Delivery phase of a routed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Root → parent of target.
    Capture,
    /// The target itself.
    Target,
    /// Parent of target → root.
    Bubble,
}

/// Drag-and-drop notification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// Threshold crossed; sent once to the source.
    Begin,
    /// Cursor entered a potential target.
    Enter,
    /// Cursor moved over the current target.
    Over,
    /// Cursor left a potential target.
    Leave,
    /// Payload dropped on an accepting target.
    Drop,
    /// Gesture ended without a drop; sent to the source.
    Cancel,
    /// Gesture finished, whatever the outcome; sent to the source.
    End,
}

/// Why a modal popup closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseReason {
    /// Closed by code.
    Explicit,
    /// Closed by a confirming action inside the popup.
    Confirmed,
    /// Dismissed by an outside click, Escape or replacement.
    Cancelled,
}

/// Event delivered to a widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// Routed input.
    Input(InputEvent),
    /// Pointer started hovering the widget.
    PointerEnter,
    /// Pointer stopped hovering the widget.
    PointerLeave,
    /// Widget became the focus widget.
    FocusGained,
    /// Widget stopped being the focus widget.
    FocusLost,
    /// Pointer capture was taken away before the matching pointer up.
    CaptureLost,
    /// Drag-and-drop notification.
    Drag {
        /// What happened.
        phase: DragPhase,
        /// Pointer position.
        pos: Point,
    },
    /// The popup rooted at this widget was opened by the modal layer.
    PopupOpened,
    /// The popup rooted at this widget is about to be released.
    PopupClosed(CloseReason),
}
