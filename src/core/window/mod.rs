//=========================================================================
// Window
//=========================================================================
//
// Top-level owners of components, and groups of them.
//
// Architecture:
// ```text
//   Desktop
//     └─ WindowGroup (root: begins/ends the render batch, ticks audio)
//          ├─ Window ── WindowCore ── Container ── components
//          ├─ WindowGroup
//          │    └─ Window ...
//          └─ GestureWindow (mouse + hand dispatch)
// ```
//
// A window converts the frame's pointer transitions into events for
// itself and its visible components (see `pointer`). Groups add, remove
// and reorder child windows only at their commit point (see `group`).
//
// Components:
// - `command`: deferred structural requests posted through the context
// - `group`: `WindowGroup`, a window that owns child windows
// - `pointer`: per-frame pointer transitions and their delivery order
// - `registry`: tagged constructors for `WindowGroup::set_window`
//
//=========================================================================

//=== Module Declarations =================================================

pub mod command;
pub mod group;
pub mod pointer;
pub mod registry;

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU64, Ordering};

//=== Internal Dependencies ===============================================

use crate::core::context::UpdateContext;
use crate::core::geometry::{Point, Rect, Vec2};
use crate::core::services::{Renderer, SharedAudio};
use crate::core::ui::{AsAny, Component, Container, Drawable, PointerButton, Updatable};

//=== Public API ==========================================================

pub use command::{CommandQueue, WindowCommand};
pub use group::WindowGroup;
pub use pointer::PointerFrame;
pub use registry::{WindowKind, WindowRegistry};

//=== WindowId ============================================================

static NEXT_WINDOW_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique window identity.
///
/// Unlike the window `code`, which is a user tag and may repeat, the id
/// names exactly one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed))
    }
}

//=== WindowCore ==========================================================

/// State every window embeds: identity, flags, components and services.
pub struct WindowCore {
    id: WindowId,
    code: i32,
    visible: bool,
    enabled: bool,
    mouse_interaction: bool,
    container: Container,
    audio: Option<SharedAudio>,
    parent: Option<WindowId>,
}

impl WindowCore {
    /// Creates a visible, enabled, mouse-interactive window core with code 0.
    pub fn new(rect: Rect) -> Self {
        Self {
            id: WindowId::fresh(),
            code: 0,
            visible: true,
            enabled: true,
            mouse_interaction: true,
            container: Container::new(rect),
            audio: None,
            parent: None,
        }
    }

    /// Sets the lookup tag.
    pub fn with_code(mut self, code: i32) -> Self {
        self.code = code;
        self
    }

    //--- Identity ---------------------------------------------------------

    pub fn id(&self) -> WindowId {
        self.id
    }

    /// User tag used by the group's by-code lookups. Not unique.
    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn set_code(&mut self, code: i32) {
        self.code = code;
    }

    /// Group holding this window, or `None` for a root.
    pub fn parent(&self) -> Option<WindowId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub(crate) fn set_parent(&mut self, parent: Option<WindowId>) {
        self.parent = parent;
    }

    //--- Geometry ---------------------------------------------------------

    /// Bounding rectangle (shared with the component container).
    pub fn rect(&self) -> Rect {
        self.container.rect()
    }

    /// Resizes or moves the window without moving its components.
    pub fn set_rect(&mut self, rect: Rect) {
        self.container.set_rect(rect);
    }

    /// Moves the window and its components by `by`.
    pub fn translate(&mut self, by: Vec2) {
        self.container.translate(by);
    }

    /// Moves the window and its components so its top-left is `location`.
    pub fn move_to(&mut self, location: Point) {
        let by = location - self.rect().origin();
        self.translate(by);
    }

    //--- Flags ------------------------------------------------------------

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// A disabled window skips component updates and pointer dispatch.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn mouse_interaction(&self) -> bool {
        self.mouse_interaction
    }

    pub fn set_mouse_interaction(&mut self, enabled: bool) {
        self.mouse_interaction = enabled;
    }

    //--- Components & Services --------------------------------------------

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    pub fn audio(&self) -> Option<&SharedAudio> {
        self.audio.as_ref()
    }

    pub(crate) fn set_audio(&mut self, audio: Option<SharedAudio>) {
        self.audio = audio;
    }
}

//=== Window ==============================================================

/// A top-level owner of components.
///
/// Implementors embed a [`WindowCore`] and return it from `core` and
/// `core_mut`. Overriding `update` or `draw` should still call
/// [`update_window`] / [`draw_window`] so components and pointer events
/// keep working.
///
/// # Examples
///
/// ```
/// use gesture_wnd::prelude::*;
///
/// struct Counter {
///     core: WindowCore,
///     clicks: u32,
/// }
///
/// impl Window for Counter {
///     fn core(&self) -> &WindowCore { &self.core }
///     fn core_mut(&mut self) -> &mut WindowCore { &mut self.core }
///
///     fn pointer_released(&mut self, at: Point, button: PointerButton) {
///         if button == PointerButton::Primary && self.core.rect().contains(at) {
///             self.clicks += 1;
///         }
///     }
/// }
///
/// let mut counter = Counter { core: WindowCore::new(Rect::new(0.0, 0.0, 100.0, 100.0)), clicks: 0 };
/// counter.pointer_released(Point::new(10.0, 10.0), PointerButton::Primary);
/// assert_eq!(counter.clicks, 1);
/// ```
pub trait Window: AsAny {
    fn core(&self) -> &WindowCore;
    fn core_mut(&mut self) -> &mut WindowCore;

    //--- Frame ------------------------------------------------------------

    fn update(&mut self, ctx: &UpdateContext<'_>) {
        update_window(self, ctx);
    }

    fn draw(&self, renderer: &mut dyn Renderer) {
        draw_window(self, renderer);
    }

    //--- Hooks ------------------------------------------------------------

    /// Called once, while still attached, right before the group detaches
    /// this window.
    fn on_closing(&mut self) {}

    fn pointer_moved(&mut self, _old: Point, _new: Point) {}
    fn pointer_pressed(&mut self, _at: Point, _button: PointerButton) {}
    fn pointer_released(&mut self, _at: Point, _button: PointerButton) {}

    fn next(&mut self) {}
    fn previous(&mut self) {}

    //--- Tree Plumbing ----------------------------------------------------

    /// Replaces the shared audio handle. Groups forward it to children.
    fn set_audio(&mut self, audio: Option<SharedAudio>) {
        self.core_mut().set_audio(audio);
    }

    /// Moves the window and everything it owns by `by`.
    fn translate(&mut self, by: Vec2) {
        self.core_mut().translate(by);
    }

    /// Group view of this window, for routing commands down the tree.
    fn as_group_mut(&mut self) -> Option<&mut WindowGroup> {
        None
    }

    //--- Provided ---------------------------------------------------------

    fn id(&self) -> WindowId {
        self.core().id()
    }

    fn code(&self) -> i32 {
        self.core().code()
    }

    fn rect(&self) -> Rect {
        self.core().rect()
    }

    fn is_visible(&self) -> bool {
        self.core().is_visible()
    }

    fn is_enabled(&self) -> bool {
        self.core().is_enabled()
    }
}

//=== Default Behaviour ===================================================

/// Standard window update: components, then mouse pointer events.
///
/// Does nothing when the window is disabled. Pointer events are read from
/// the context's snapshot and only delivered when mouse interaction is on.
pub fn update_window<W: Window + ?Sized>(window: &mut W, ctx: &UpdateContext<'_>) {
    if !window.core().is_enabled() {
        return;
    }

    window.core_mut().container_mut().update(ctx);

    if window.core().mouse_interaction() {
        let frame = PointerFrame::from_input(ctx.input());
        if !frame.is_empty() {
            frame.deliver(window);
        }
    }
}

/// Standard window draw: the container, when visible.
pub fn draw_window<W: Window + ?Sized>(window: &W, renderer: &mut dyn Renderer) {
    if window.core().is_visible() {
        window.core().container().draw(renderer);
    }
}

//=========================================================================
// Test Doubles
//=========================================================================

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::core::ui::component::testing::EventLog;

    /// Callback run after a probe window's standard update.
    pub(crate) type UpdateHook = Box<dyn FnMut(WindowId, &UpdateContext<'_>)>;

    /// Window that appends `"<name>:<hook>"` entries to a log.
    pub(crate) struct ProbeWindow {
        pub(crate) core: WindowCore,
        pub(crate) name: &'static str,
        pub(crate) log: EventLog,
        pub(crate) on_update: Option<UpdateHook>,
    }

    impl ProbeWindow {
        pub(crate) fn new(name: &'static str, rect: Rect, log: &EventLog) -> Self {
            Self { core: WindowCore::new(rect), name, log: log.clone(), on_update: None }
        }

        pub(crate) fn with_code(mut self, code: i32) -> Self {
            self.core.set_code(code);
            self
        }

        pub(crate) fn on_update(mut self, hook: impl FnMut(WindowId, &UpdateContext<'_>) + 'static) -> Self {
            self.on_update = Some(Box::new(hook));
            self
        }

        fn record(&self, entry: String) {
            self.log.borrow_mut().push(format!("{}:{}", self.name, entry));
        }
    }

    impl Window for ProbeWindow {
        fn core(&self) -> &WindowCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut WindowCore {
            &mut self.core
        }

        fn update(&mut self, ctx: &UpdateContext<'_>) {
            self.record("update".to_string());
            update_window(self, ctx);
            let id = self.core.id();
            if let Some(hook) = self.on_update.as_mut() {
                hook(id, ctx);
            }
        }

        fn draw(&self, renderer: &mut dyn Renderer) {
            self.record("draw".to_string());
            draw_window(self, renderer);
        }

        fn on_closing(&mut self) {
            self.record("closing".to_string());
        }

        fn pointer_moved(&mut self, old: Point, new: Point) {
            self.record(format!("moved({},{})->({},{})", old.x, old.y, new.x, new.y));
        }

        fn pointer_pressed(&mut self, at: Point, button: PointerButton) {
            self.record(format!("pressed {:?} ({},{})", button, at.x, at.y));
        }

        fn pointer_released(&mut self, at: Point, button: PointerButton) {
            self.record(format!("released {:?} ({},{})", button, at.x, at.y));
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
