//=========================================================================
// UI Components
//=========================================================================
//
// The component tree that lives inside every window.
//
// Components:
// - `component`: the `Component` trait, its capability traits and base
// - `container`: ordered owner of child components
// - `focus`: keyboard / gamepad focus order over a container
// - `widgets`: stock `Button` and `Label`
// - `options`: `ToggleOption`, `CheckBox` and `ButtonCollection`
// - `drag`: pointer-dragged `DragPanel` and `Slider`
// - `cursor`: hand-following `Cursor`
//
//=========================================================================

//=== Module Declarations =================================================

pub mod component;
pub mod container;
pub mod cursor;
pub mod drag;
pub mod focus;
pub mod options;
pub mod widgets;

//=== Public API ==========================================================

pub use component::{
    AsAny, Component, ComponentBase, ComponentId, Drawable, Focusable, PointerButton,
    PointerTarget, Updatable,
};
pub use container::Container;
pub use cursor::Cursor;
pub use drag::{DragPanel, Slider};
pub use focus::FocusRing;
pub use options::{ButtonCollection, CheckBox, ToggleOption};
pub use widgets::{Button, Label, TextAlign};
