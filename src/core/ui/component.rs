//=========================================================================
// Component
//=========================================================================
//
// Base node of the component tree: something with a rectangle that can be
// updated, drawn, hit-tested and handed pointer and focus events.
//
// Architecture:
// ```text
//   Updatable ─┐
//   Drawable  ─┤
//   PointerTarget ─┼──► Component ──► Container / Button / Label / ...
//   Focusable ─┘          │
//                         └─ base() ──► ComponentBase (rect, flags, owner)
// ```
//
// Behaviour is split into four capability traits so a widget only
// overrides the hooks it cares about. Geometry and flags live in a
// `ComponentBase` every component embeds and exposes through `base()`.
//
// Callers check visibility before delivering pointer events; a handler
// never has to test its own `visible` flag.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};

//=== Internal Dependencies ===============================================

use crate::core::context::UpdateContext;
use crate::core::geometry::{Point, Rect, Size, Vec2};
use crate::core::services::{Renderer, TextureId};

//=== ComponentId =========================================================

static NEXT_COMPONENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique component identity, assigned at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    fn next() -> Self {
        Self(NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

//=== PointerButton =======================================================

/// Logical pointer button shared by mouse and hand-gesture input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button, or a grip of the dominant hand.
    Primary,

    /// Right mouse button, or a grip of the other hand.
    Secondary,
}

//=== Capability Traits ===================================================

/// Per-frame logic.
pub trait Updatable {
    fn update(&mut self, _ctx: &UpdateContext<'_>) {}
}

/// Rendering into the current batch.
pub trait Drawable {
    fn draw(&self, renderer: &mut dyn Renderer);
}

/// Pointer event hooks. All default to no-ops.
///
/// `pointer_moved` is delivered without hit-testing; a widget that only
/// reacts inside its bounds checks [`Component::hit_test`] itself.
pub trait PointerTarget {
    fn pointer_moved(&mut self, _old: Point, _new: Point) {}
    fn pointer_pressed(&mut self, _at: Point, _button: PointerButton) {}
    fn pointer_released(&mut self, _at: Point, _button: PointerButton) {}
}

/// Focus and ordinal selection hooks. All default to no-ops.
pub trait Focusable {
    /// Called after the focus flag changed.
    fn focus_changed(&mut self, _focused: bool) {}

    /// Selects the next option (toggle groups, sliders driven by keys).
    fn next(&mut self) {}

    /// Selects the previous option.
    fn previous(&mut self) {}
}

/// Downcasting support for boxed trait objects.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=== Component ===========================================================

/// A node of the component tree.
///
/// Implementors embed a [`ComponentBase`] and return it from `base` and
/// `base_mut`. The provided methods keep the cached location and size in
/// step with the rectangle, so always move and resize through them.
///
/// # Examples
///
/// ```
/// use gesture_wnd::prelude::*;
///
/// struct Swatch {
///     base: ComponentBase,
///     hovered: bool,
/// }
///
/// impl Updatable for Swatch {}
/// impl Focusable for Swatch {}
///
/// impl Drawable for Swatch {
///     fn draw(&self, renderer: &mut dyn Renderer) {
///         self.base.draw_background(renderer);
///     }
/// }
///
/// impl PointerTarget for Swatch {
///     fn pointer_moved(&mut self, _old: Point, new: Point) {
///         self.hovered = self.hit_test(new);
///     }
/// }
///
/// impl Component for Swatch {
///     fn base(&self) -> &ComponentBase { &self.base }
///     fn base_mut(&mut self) -> &mut ComponentBase { &mut self.base }
/// }
///
/// let mut swatch = Swatch { base: ComponentBase::new(Rect::new(0.0, 0.0, 10.0, 10.0)), hovered: false };
/// swatch.pointer_moved(Point::ZERO, Point::new(5.0, 5.0));
/// assert!(swatch.hovered);
/// ```
pub trait Component: Updatable + Drawable + PointerTarget + Focusable + AsAny {
    fn base(&self) -> &ComponentBase;
    fn base_mut(&mut self) -> &mut ComponentBase;

    /// Moves the component (and, for containers, its descendants) by `by`.
    fn translate(&mut self, by: Vec2) {
        self.base_mut().translate(by);
    }

    //--- Provided ---------------------------------------------------------

    fn id(&self) -> ComponentId {
        self.base().id()
    }

    fn rect(&self) -> Rect {
        self.base().rect()
    }

    fn set_rect(&mut self, rect: Rect) {
        self.base_mut().set_rect(rect);
    }

    fn is_visible(&self) -> bool {
        self.base().is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.base_mut().set_visible(visible);
    }

    /// Returns `true` if `point` lies in the focus rectangle, or the
    /// bounding rectangle when no focus rectangle is set.
    fn hit_test(&self, point: Point) -> bool {
        self.base().hit_test(point)
    }

    fn has_focus(&self) -> bool {
        self.base().has_focus()
    }

    /// Stores the focus flag and notifies [`Focusable::focus_changed`].
    fn set_focus(&mut self, focused: bool) {
        self.base_mut().focused = focused;
        self.focus_changed(focused);
    }
}

//=== ComponentBase =======================================================

/// Geometry and flags shared by every component.
#[derive(Debug)]
pub struct ComponentBase {
    id: ComponentId,
    rect: Rect,
    location: Point,
    size: Size,
    visible: bool,
    focused: bool,
    focus_rect: Option<Rect>,
    owner: Option<ComponentId>,
    background: Option<TextureId>,
}

impl ComponentBase {
    //--- Construction -----------------------------------------------------

    /// Creates a visible, unfocused base covering `rect`.
    pub fn new(rect: Rect) -> Self {
        Self {
            id: ComponentId::next(),
            rect,
            location: rect.origin(),
            size: rect.size(),
            visible: true,
            focused: false,
            focus_rect: None,
            owner: None,
            background: None,
        }
    }

    /// Creates a base that draws `texture` over its rectangle.
    pub fn with_background(rect: Rect, texture: TextureId) -> Self {
        let mut base = Self::new(rect);
        base.background = Some(texture);
        base
    }

    //--- Geometry ---------------------------------------------------------

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Top-left corner of the bounding rectangle.
    pub fn location(&self) -> Point {
        self.location
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Replaces the bounding rectangle and the cached location and size.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.location = rect.origin();
        self.size = rect.size();
    }

    /// Moves the rectangle so its top-left corner is `location`.
    pub fn set_location(&mut self, location: Point) {
        self.set_rect(Rect::from_origin_size(location, self.size));
    }

    /// Resizes the rectangle, keeping its top-left corner.
    pub fn set_size(&mut self, size: Size) {
        self.set_rect(Rect::from_origin_size(self.location, size));
    }

    /// Shifts the bounding rectangle and any focus rectangle by `by`.
    pub fn translate(&mut self, by: Vec2) {
        self.set_rect(self.rect + by);
        if let Some(focus_rect) = self.focus_rect.as_mut() {
            *focus_rect = *focus_rect + by;
        }
    }

    //--- Hit Testing ------------------------------------------------------

    /// Rectangle used for hit-testing (focus rectangle when set).
    pub fn focus_rect(&self) -> Rect {
        self.focus_rect.unwrap_or(self.rect)
    }

    /// Overrides the hit-test region. `None` falls back to the bounds.
    pub fn set_focus_rect(&mut self, focus_rect: Option<Rect>) {
        self.focus_rect = focus_rect;
    }

    pub fn hit_test(&self, point: Point) -> bool {
        self.focus_rect().contains(point)
    }

    //--- Flags ------------------------------------------------------------

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    //--- Ownership --------------------------------------------------------

    /// Container currently holding this component, if any.
    pub fn owner(&self) -> Option<ComponentId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Option<ComponentId>) {
        self.owner = owner;
    }

    //--- Background -------------------------------------------------------

    pub fn background(&self) -> Option<TextureId> {
        self.background
    }

    pub fn set_background(&mut self, texture: Option<TextureId>) {
        self.background = texture;
    }

    /// Draws the background texture over the bounds when visible and set.
    pub fn draw_background(&self, renderer: &mut dyn Renderer) {
        if let (true, Some(texture)) = (self.visible, self.background) {
            renderer.draw_sprite(texture, self.rect);
        }
    }
}

//=========================================================================
// Test Doubles
//=========================================================================


//=========================================================================
// Unit Tests
//=========================================================================
