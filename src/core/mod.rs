//=========================================================================
// Core
//
// Everything that runs on the frame loop, independent of the OS layer.
//
// Layers (leaf first):
// ```text
//   geometry, services      kurbo re-exports, renderer/audio seams
//   input                   raw events → per-frame InputSnapshot
//   ui                      Component, Container, FocusRing, widgets, Cursor
//   window                  Window, WindowGroup, commands, registry
//   tracking                PlayerTracker (players, hands, device)
//   gesture                 GestureWindow: hands → window events
// ```
//
// `context` carries one frame's snapshot, tracker and command queue down
// the window tree. `platform_bridge` is the channel contract with the
// winit layer.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod context;
pub mod geometry;
pub mod gesture;
pub mod input;
pub mod platform_bridge;
pub mod services;
pub mod tracking;
pub mod ui;
pub mod window;

//=== Public API ==========================================================

pub use context::UpdateContext;
pub use gesture::{update_gesture_window, GestureAdapter, GestureWindow, InteractionMode};
pub use window::{draw_window, update_window, Window, WindowCore, WindowGroup, WindowId};
