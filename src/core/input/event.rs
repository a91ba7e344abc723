//=========================================================================
// Input Event Types
//
// Portable representation of raw keyboard, mouse and gamepad input.
//
// The platform layer converts OS events (winit) into these types; the
// `InputSnapshot` folds them into per-frame edge state that windows and
// focus rings read.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    InputSnapshot (edge detection, one refresh per frame)
//         ↓
//    Window pointer dispatch / FocusRing navigation
// ```
//
// Equality is payload-based except for `MouseMoved`, which compares equal
// to any other `MouseMoved` so the platform buffer can coalesce cursor
// motion into a single latest-position event.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical mouse button.
///
/// `Left` drives the primary pointer button and `Right` the secondary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,

    /// Side, thumb and macro buttons.
    Other,
}

//=== GamepadButton =======================================================

/// Gamepad button, reported together with the pad index (0..4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    A,
    B,
    X,
    Y,
    Start,
    Back,
}

/// Number of gamepads tracked by the input snapshot.
pub const MAX_GAMEPADS: u8 = 4;

//=== KeyCode =============================================================

/// Physical keyboard key (location, not the produced character).
///
/// Covers letters, digits, arrows and the keys the toolkit navigates
/// with. Anything else arrives as `Unidentified` and is dropped by the
/// platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Navigation -------------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Key without a mapping in this enum.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Raw input event delivered by the platform layer.
///
/// ```text
/// KeyDown{A, CTRL}   == KeyDown{A, CTRL}        ✓
/// KeyDown{A, CTRL}   == KeyDown{A, SHIFT}       ✗
/// PadDown{0, A}      == PadDown{1, A}           ✗ (different pad)
/// MouseMoved{..}     == MouseMoved{..}          ✓ (coordinates ignored)
/// ```
#[derive(Debug, Clone)]
pub enum InputEvent {
    KeyDown { key: KeyCode, modifiers: Modifiers },
    KeyUp { key: KeyCode, modifiers: Modifiers },
    MouseButtonDown { button: MouseButton, modifiers: Modifiers },
    MouseButtonUp { button: MouseButton, modifiers: Modifiers },

    /// Cursor position in screen space (pixels, top-left origin).
    MouseMoved { x: f64, y: f64 },

    GamepadButtonDown { pad: u8, button: GamepadButton },
    GamepadButtonUp { pad: u8, button: GamepadButton },

    /// Event the platform layer could not classify; ignored downstream.
    Unidentified,
}

impl InputEvent {
    /// Returns a copy carrying `modifiers`. Events without modifier state
    /// are returned unchanged.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        match &mut self {
            Self::KeyDown { modifiers: m, .. }
            | Self::KeyUp { modifiers: m, .. }
            | Self::MouseButtonDown { modifiers: m, .. }
            | Self::MouseButtonUp { modifiers: m, .. } => *m = modifiers,
            _ => {}
        }
        self
    }

    /// Returns `true` for continuous events that the platform buffer
    /// coalesces (latest wins).
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::MouseMoved { .. })
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a, modifiers: ma }, KeyDown { key: b, modifiers: mb })
            | (KeyUp { key: a, modifiers: ma }, KeyUp { key: b, modifiers: mb }) => {
                a == b && ma == mb
            }
            (
                MouseButtonDown { button: a, modifiers: ma },
                MouseButtonDown { button: b, modifiers: mb },
            )
            | (
                MouseButtonUp { button: a, modifiers: ma },
                MouseButtonUp { button: b, modifiers: mb },
            ) => a == b && ma == mb,
            (
                GamepadButtonDown { pad: pa, button: a },
                GamepadButtonDown { pad: pb, button: b },
            )
            | (GamepadButtonUp { pad: pa, button: a }, GamepadButtonUp { pad: pb, button: b }) => {
                pa == pb && a == b
            }
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Hashes the discriminant and payload; `MouseMoved` coordinates are left
/// out to agree with `PartialEq`.
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown { key, modifiers } | Self::KeyUp { key, modifiers } => {
                key.hash(state);
                modifiers.hash(state);
            }
            Self::MouseButtonDown { button, modifiers }
            | Self::MouseButtonUp { button, modifiers } => {
                button.hash(state);
                modifiers.hash(state);
            }
            Self::GamepadButtonDown { pad, button } | Self::GamepadButtonUp { pad, button } => {
                pad.hash(state);
                button.hash(state);
            }
            Self::MouseMoved { .. } | Self::Unidentified => {}
        }
    }
}

//=== Modifiers ===========================================================

/// Modifier keys held while a key or button event fired.
///
/// Left and right variants are not distinguished. On macOS, Command maps
/// to `ctrl` and Option to `alt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };

    /// Returns `true` when no modifier is held.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
