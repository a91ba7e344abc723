//=========================================================================
// Container
//=========================================================================
//
// A component that exclusively owns an ordered list of child components.
//
// Insertion order is draw order and dispatch order. Every update, draw
// and pointer call runs the container's own behaviour first and then
// fans out to the visible children in order:
//
// ```text
//   Container::pointer_moved(old, new)
//     ├─ own hook (background panel: nothing)
//     ├─ child[0].pointer_moved(old, new)   if visible
//     ├─ child[1].pointer_moved(old, new)   if visible
//     └─ ...
// ```
//
// Adding and removing is synchronous. A child must not remove itself from
// inside its own callback; windows use the deferred command queue for
// that instead.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::component::{
    Component, ComponentBase, ComponentId, Drawable, Focusable, PointerButton, PointerTarget,
    Updatable,
};
use crate::core::context::UpdateContext;
use crate::core::geometry::{Point, Rect, Vec2};
use crate::core::services::Renderer;

//=== Container ===========================================================

/// Ordered owner of child components; also usable as a plain panel.
pub struct Container {
    base: ComponentBase,
    children: Vec<Box<dyn Component>>,
}

impl Container {
    //--- Construction -----------------------------------------------------

    /// Creates an empty container covering `rect`.
    pub fn new(rect: Rect) -> Self {
        Self {
            base: ComponentBase::new(rect),
            children: Vec::new(),
        }
    }

    //--- Mutation ---------------------------------------------------------

    /// Appends `component` and records this container as its owner.
    pub fn add(&mut self, mut component: Box<dyn Component>) -> ComponentId {
        component.base_mut().set_owner(Some(self.base.id()));
        let id = component.id();
        self.children.push(component);
        id
    }

    /// Boxes and appends `component`.
    pub fn push<C: Component>(&mut self, component: C) -> ComponentId {
        self.add(Box::new(component))
    }

    /// Detaches the child with `id`. Missing ids are a no-op (`None`).
    pub fn remove(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        let index = self.index_of(id)?;
        let mut component = self.children.remove(index);
        component.base_mut().set_owner(None);
        Some(component)
    }

    /// Detaches every child.
    pub fn clear(&mut self) {
        for mut component in self.children.drain(..) {
            component.base_mut().set_owner(None);
        }
    }

    //--- Lookup -----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.index_of(id).is_some()
    }

    /// Position of the child with `id` in dispatch order.
    pub fn index_of(&self, id: ComponentId) -> Option<usize> {
        self.children.iter().position(|c| c.id() == id)
    }

    pub fn children(&self) -> impl Iterator<Item = &(dyn Component + 'static)> {
        self.children.iter().map(|c| &**c)
    }

    pub fn child(&self, id: ComponentId) -> Option<&(dyn Component + 'static)> {
        self.children.iter().find(|c| c.id() == id).map(|c| &**c)
    }

    pub fn child_mut(&mut self, id: ComponentId) -> Option<&mut (dyn Component + 'static)> {
        self.children.iter_mut().find(|c| c.id() == id).map(|c| &mut **c)
    }

    pub fn child_at(&self, index: usize) -> Option<&(dyn Component + 'static)> {
        self.children.get(index).map(|c| &**c)
    }

    /// Returns the child with `id` downcast to `T`.
    pub fn get<T: Component>(&self, id: ComponentId) -> Option<&T> {
        self.child(id)?.as_any().downcast_ref::<T>()
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut<T: Component>(&mut self, id: ComponentId) -> Option<&mut T> {
        self.child_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    //--- Internal Helpers -------------------------------------------------

    fn visible_children_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Component>> {
        self.children.iter_mut().filter(|c| c.is_visible())
    }
}

//--- Capability Implementations ------------------------------------------

impl Updatable for Container {
    fn update(&mut self, ctx: &UpdateContext<'_>) {
        for child in self.visible_children_mut() {
            child.update(ctx);
        }
    }
}

impl Drawable for Container {
    fn draw(&self, renderer: &mut dyn Renderer) {
        self.base.draw_background(renderer);
        for child in self.children.iter().filter(|c| c.is_visible()) {
            child.draw(renderer);
        }
    }
}

impl PointerTarget for Container {
    fn pointer_moved(&mut self, old: Point, new: Point) {
        for child in self.visible_children_mut() {
            child.pointer_moved(old, new);
        }
    }

    fn pointer_pressed(&mut self, at: Point, button: PointerButton) {
        for child in self.visible_children_mut() {
            child.pointer_pressed(at, button);
        }
    }

    fn pointer_released(&mut self, at: Point, button: PointerButton) {
        for child in self.visible_children_mut() {
            child.pointer_released(at, button);
        }
    }
}

impl Focusable for Container {}

impl Component for Container {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    /// Moves the container and every descendant.
    fn translate(&mut self, by: Vec2) {
        self.base.translate(by);
        for child in &mut self.children {
            child.translate(by);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
