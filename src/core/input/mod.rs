//=========================================================================
// Input
//=========================================================================
//
// Raw device events and the per-frame snapshot built from them.
//
// - `event`: portable keyboard, mouse and gamepad events
// - `snapshot`: held state plus this-frame edges, refreshed by the root
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
pub mod snapshot;

//=== Public API ==========================================================

pub use event::{GamepadButton, InputEvent, KeyCode, Modifiers, MouseButton, MAX_GAMEPADS};
pub use snapshot::InputSnapshot;
