//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use gesture_wnd::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Desktop
pub use crate::core::platform_bridge::{PlatformError, TickControl};
pub use crate::desktop::{Desktop, DesktopBuilder};

// Geometry and services
pub use crate::core::geometry::{Color, Point, Rect, Size, Vec2};
pub use crate::core::services::{
    AudioService, ContentLoader, FontId, Renderer, SharedAudio, SoundId, TextureId,
};

// Input
pub use crate::core::input::{InputSnapshot, KeyCode, Modifiers, MouseButton};

// Components
pub use crate::core::ui::{
    AsAny, Button, ButtonCollection, CheckBox, Component, ComponentBase, Container, Cursor,
    DragPanel, Drawable, FocusRing, Focusable, Label, PointerButton, PointerTarget, Slider,
    TextAlign, ToggleOption, Updatable,
};

// Windows
pub use crate::core::context::UpdateContext;
pub use crate::core::window::{
    draw_window, update_window, Window, WindowCommand, WindowCore, WindowGroup, WindowId,
    WindowKind, WindowRegistry,
};

// Tracking and gestures
pub use crate::core::gesture::{update_gesture_window, GestureAdapter, GestureWindow, InteractionMode};
pub use crate::core::tracking::{GripState, Hand, PlayerState, PlayerTracker, TrackerConfig};
