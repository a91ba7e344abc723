//=========================================================================
// Input Snapshot
//=========================================================================
//
// Per-frame raw device state with edge detection.
//
// Architecture:
//   InputEvent batches → refresh() → held sets + this-frame edges → query
//
// Frame lifecycle: begin_frame() → apply() → end_frame() → query
//
// Exactly one owner (the desktop root) refreshes the snapshot once per
// frame. Windows, focus rings and widgets only borrow it immutably, so
// every reader in a frame sees the same edges and the same cursor pair.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::trace;

//=== Internal Dependencies ===============================================

use super::event::{GamepadButton, InputEvent, KeyCode, Modifiers, MouseButton, MAX_GAMEPADS};
use crate::core::geometry::{Point, Vec2};

//=== InputSnapshot =======================================================

/// Keyboard, mouse and gamepad state for the current frame.
pub struct InputSnapshot {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    pad_buttons_down: HashSet<(u8, GamepadButton)>,
    cursor: Point,
    modifiers: Modifiers,

    //--- Frame Edges (reset by begin_frame) -------------------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    pad_buttons_pressed: HashSet<(u8, GamepadButton)>,
    pad_buttons_released: HashSet<(u8, GamepadButton)>,

    //--- Cursor Motion ----------------------------------------------------
    last_cursor: Point,
    cursor_delta: Vec2,
}

impl InputSnapshot {
    /// Creates an empty snapshot with the cursor at the origin.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            buttons_down: HashSet::new(),
            pad_buttons_down: HashSet::new(),
            cursor: Point::ZERO,
            modifiers: Modifiers::NONE,
            keys_pressed: HashSet::new(),
            keys_released: HashSet::new(),
            buttons_pressed: HashSet::new(),
            buttons_released: HashSet::new(),
            pad_buttons_pressed: HashSet::new(),
            pad_buttons_released: HashSet::new(),
            last_cursor: Point::ZERO,
            cursor_delta: Vec2::ZERO,
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Runs one full frame: clears edges, applies every batch in order and
    /// computes cursor motion.
    pub fn refresh(&mut self, batches: &[Vec<InputEvent>]) {
        self.begin_frame();
        for batch in batches {
            self.apply(batch);
        }
        self.end_frame();
    }

    /// Clears this-frame edges and remembers the cursor as last position.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.pad_buttons_pressed.clear();
        self.pad_buttons_released.clear();
        self.last_cursor = self.cursor;
    }

    /// Folds events into the held sets and this-frame edges.
    pub fn apply(&mut self, events: &[InputEvent]) {
        for event in events {
            self.apply_event(event);
        }
    }

    /// Computes the cursor delta for the frame.
    pub fn end_frame(&mut self) {
        self.cursor_delta = self.cursor - self.last_cursor;
    }

    //--- Internal Helpers -------------------------------------------------

    fn apply_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                // A repeat while held is not a new press
                if self.keys_down.insert(*key) {
                    self.keys_pressed.insert(*key);
                }
            }

            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.remove(key) {
                    self.keys_released.insert(*key);
                }
            }

            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.buttons_down.insert(*button) {
                    self.buttons_pressed.insert(*button);
                }
            }

            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.buttons_down.remove(button) {
                    self.buttons_released.insert(*button);
                }
            }

            InputEvent::MouseMoved { x, y } => {
                self.cursor = Point::new(*x, *y);
            }

            InputEvent::GamepadButtonDown { pad, button } => {
                if *pad >= MAX_GAMEPADS {
                    trace!(target: "input", "Ignoring button on pad {}", pad);
                    return;
                }
                if self.pad_buttons_down.insert((*pad, *button)) {
                    self.pad_buttons_pressed.insert((*pad, *button));
                }
            }

            InputEvent::GamepadButtonUp { pad, button } => {
                if self.pad_buttons_down.remove(&(*pad, *button)) {
                    self.pad_buttons_released.insert((*pad, *button));
                }
            }

            InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// Returns `true` only on the frame the key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` only on the frame the key came up.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Returns the modifier state seen with the latest key or button event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    /// Like [`is_key_pressed`](Self::is_key_pressed) but for mouse buttons.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    /// Like [`is_key_down`](Self::is_key_down) but for mouse buttons.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Like [`is_key_released`](Self::is_key_released) but for mouse buttons.
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    /// Cursor position at the end of this frame.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Cursor position at the end of the previous frame.
    pub fn last_cursor(&self) -> Point {
        self.last_cursor
    }

    /// Cursor motion over this frame (zero when still).
    pub fn cursor_delta(&self) -> Vec2 {
        self.cursor_delta
    }

    /// Returns `true` if the cursor position changed this frame.
    pub fn has_pointer_moved(&self) -> bool {
        self.cursor != self.last_cursor
    }

    //=====================================================================
    // Query API - Gamepad
    //=====================================================================

    /// Returns `true` only on the frame `button` went down on `pad`.
    pub fn is_pad_button_pressed(&self, button: GamepadButton, pad: u8) -> bool {
        self.pad_buttons_pressed.contains(&(pad, button))
    }

    /// Returns `true` while `button` is held on `pad`.
    pub fn is_pad_button_down(&self, button: GamepadButton, pad: u8) -> bool {
        self.pad_buttons_down.contains(&(pad, button))
    }

    /// Returns `true` only on the frame `button` came up on `pad`.
    pub fn is_pad_button_released(&self, button: GamepadButton, pad: u8) -> bool {
        self.pad_buttons_released.contains(&(pad, button))
    }
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
