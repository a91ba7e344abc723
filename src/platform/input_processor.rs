//=========================================================================
// Input Processor
//=========================================================================
//
// Translates winit keyboard, mouse-button and cursor events into
// `InputEvent`s.
//
//   WindowEvent ──► InputProcessor ──► InputEvent ──► InputBuffer
//
// Modifier state arrives separately (`ModifiersChanged`) and is stamped
// onto every key and button event until it changes again. Key auto-repeat
// and keys without a mapping are dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    modifiers: Modifiers,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self { modifiers: Modifiers::NONE }
    }

    pub(crate) fn set_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = Modifiers {
            shift: state.shift_key(),
            ctrl: state.control_key() || (cfg!(target_os = "macos") && state.super_key()),
            alt: state.alt_key(),
        };
    }

    pub(crate) fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    //--- Translation ------------------------------------------------------

    /// Key transition, or `None` for repeats and unmapped keys.
    pub(crate) fn key(&self, key: PhysicalKey, state: ElementState, repeat: bool) -> Option<InputEvent> {
        if repeat {
            return None;
        }

        let PhysicalKey::Code(code) = key else {
            return None;
        };

        let key = key_code(code);
        if key == KeyCode::Unidentified {
            return None;
        }

        let modifiers = self.modifiers;
        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        })
    }

    pub(crate) fn button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = mouse_button(button);
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        }
    }

    /// Cursor position in window pixels.
    pub(crate) fn cursor(&self, position: PhysicalPosition<f64>) -> InputEvent {
        InputEvent::MouseMoved { x: position.x, y: position.y }
    }
}

//=== Conversions =========================================================

/// Maps variants that share a name in both enums; the rest are unmapped.
macro_rules! same_named_keys {
    ($code:expr; $($name:ident),* $(,)?) => {
        match $code {
            $(WinitKeyCode::$name => KeyCode::$name,)*
            _ => KeyCode::Unidentified,
        }
    };
}

fn key_code(code: WinitKeyCode) -> KeyCode {
    same_named_keys!(code;
        Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9,
        KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM,
        KeyN, KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
        ArrowDown, ArrowLeft, ArrowRight, ArrowUp,
        Space, Enter, Escape, Tab, Backspace, Delete,
    )
}

fn mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
