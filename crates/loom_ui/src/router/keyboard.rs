//! Keyboard and gamepad flow: focus widget, modal, then navigation.

use super::Router;
use crate::event::{CloseReason, GamepadButton, InputEvent, Key, Phase, UiEvent};
use crate::focus::{self, NavDirection};
use crate::scene::{Forest, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Navigation {
    Next,
    Previous,
    Toward(NavDirection),
}

fn navigation(event: &InputEvent) -> Option<Navigation> {
    let nav = match *event {
        InputEvent::Key {
            key,
            modifiers,
            pressed: true,
        } => match key {
            Key::Tab if modifiers.shift => Navigation::Previous,
            Key::Tab => Navigation::Next,
            Key::Up => Navigation::Toward(NavDirection::Up),
            Key::Down => Navigation::Toward(NavDirection::Down),
            Key::Left => Navigation::Toward(NavDirection::Left),
            Key::Right => Navigation::Toward(NavDirection::Right),
            _ => return None,
        },
        InputEvent::Gamepad { button, pressed: true } => match button {
            GamepadButton::DPadUp => Navigation::Toward(NavDirection::Up),
            GamepadButton::DPadDown => Navigation::Toward(NavDirection::Down),
            GamepadButton::DPadLeft => Navigation::Toward(NavDirection::Left),
            GamepadButton::DPadRight => Navigation::Toward(NavDirection::Right),
            GamepadButton::LeftShoulder => Navigation::Previous,
            GamepadButton::RightShoulder => Navigation::Next,
            _ => return None,
        },
        _ => return None,
    };
    Some(nav)
}

impl Router {
    pub(super) fn route_keyboard(&mut self, scene: &mut Scene, forest: &Forest, event: InputEvent) -> bool {
        if self.drag.is_active() && event.is_cancel() {
            self.drag_cancel(scene);
            return true;
        }

        let popup = self.modal.popup();
        let current = self
            .focus
            .filter(|&f| popup.map_or(true, |p| scene.is_in_subtree(f, p)));
        if let Some(focused) = current {
            if self
                .dispatcher
                .deliver(scene, focused, UiEvent::Input(event), Phase::Target, None)
            {
                return true;
            }
        }

        if let Some(popup) = popup {
            if event.is_cancel() {
                self.close_modal_inner(scene, CloseReason::Cancelled, true);
                return true;
            }
            if self
                .dispatcher
                .deliver(scene, popup, UiEvent::Input(event), Phase::Target, None)
            {
                return true;
            }
        }

        let Some(nav) = navigation(&event) else {
            return false;
        };
        let scope = popup
            .or_else(|| {
                self.focus
                    .and_then(|f| scene.root_of(f))
                    .filter(|&root| forest.contains_root(root))
            })
            .or_else(|| forest.topmost());
        let Some(scope) = scope else {
            return false;
        };

        let next = match (nav, current) {
            (Navigation::Next, _) => focus::next_by_tab(scene, scope, current),
            (Navigation::Previous, _) => focus::prev_by_tab(scene, scope, current),
            (Navigation::Toward(direction), Some(from)) => focus::best_in_direction(scene, scope, from, direction),
            (Navigation::Toward(_), None) => focus::next_by_tab(scene, scope, None),
        };
        tracing::trace!(?nav, ?next, "navigate");
        match next {
            Some(next) => {
                self.set_focus(scene, Some(next));
                true
            }
            None => false,
        }
    }
}
