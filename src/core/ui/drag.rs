//=========================================================================
// Drag Widgets
//=========================================================================
//
// `DragPanel` is a container the pointer can pick up and move, optionally
// confined to a bounding rectangle. `Slider` builds a value control out of
// one: a handle dragged along a track, with the value read back from the
// handle's position at each update.
//
// ```text
//   pressed (drag button, inside) ──► dragging, grab offset stored
//   moved while dragging          ──► panel moved to cursor - offset,
//                                     clamped to the bounds
//   released (drag button)        ──► dragging ends
// ```
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::component::{
    Component, ComponentBase, Drawable, Focusable, PointerButton, PointerTarget, Updatable,
};
use super::container::Container;
use crate::core::context::UpdateContext;
use crate::core::geometry::{Point, Rect, Vec2};
use crate::core::services::{Renderer, TextureId};

//=== DragPanel ===========================================================

/// A container moved by dragging it with one pointer button.
///
/// Children move with the panel. Pointer events reach the children before
/// the panel reacts to them.
pub struct DragPanel {
    panel: Container,
    drag_button: PointerButton,
    dragging: bool,
    grab_offset: Vec2,
    bounds: Option<Rect>,
    require_target: bool,
}

impl DragPanel {
    /// Creates a panel dragged with the secondary button.
    pub fn new(rect: Rect) -> Self {
        Self {
            panel: Container::new(rect),
            drag_button: PointerButton::Secondary,
            dragging: false,
            grab_offset: Vec2::ZERO,
            bounds: None,
            require_target: true,
        }
    }

    pub fn with_background(mut self, texture: TextureId) -> Self {
        self.panel.base_mut().set_background(Some(texture));
        self
    }

    pub fn with_drag_button(mut self, button: PointerButton) -> Self {
        self.drag_button = button;
        self
    }

    /// Keeps the whole panel inside `bounds` while dragging.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
    }

    /// When `false`, a press anywhere starts a drag.
    pub fn set_require_target(&mut self, require: bool) {
        self.require_target = require;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn panel(&self) -> &Container {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Container {
        &mut self.panel
    }

    /// Moves the panel and its children so the top-left corner is `to`,
    /// clamped to the bounds.
    pub fn move_to(&mut self, to: Point) {
        let to = self.clamp(to);
        let by = to - self.panel.rect().origin();
        if by != Vec2::ZERO {
            self.panel.translate(by);
        }
    }

    fn clamp(&self, to: Point) -> Point {
        let Some(bounds) = self.bounds else {
            return to;
        };
        let size = self.panel.rect().size();
        let x = to.x.min(bounds.x1 - size.width).max(bounds.x0);
        let y = to.y.min(bounds.y1 - size.height).max(bounds.y0);
        Point::new(x, y)
    }
}

impl Updatable for DragPanel {
    fn update(&mut self, ctx: &UpdateContext<'_>) {
        self.panel.update(ctx);
    }
}

impl Drawable for DragPanel {
    fn draw(&self, renderer: &mut dyn Renderer) {
        if self.panel.is_visible() {
            self.panel.draw(renderer);
        }
    }
}

impl PointerTarget for DragPanel {
    fn pointer_moved(&mut self, old: Point, new: Point) {
        self.panel.pointer_moved(old, new);
        if self.dragging {
            self.move_to(new - self.grab_offset);
        }
    }

    fn pointer_pressed(&mut self, at: Point, button: PointerButton) {
        if button != self.drag_button {
            return;
        }
        self.panel.pointer_pressed(at, button);
        if !self.require_target || self.panel.rect().contains(at) {
            self.dragging = true;
            self.grab_offset = at - self.panel.rect().origin();
        }
    }

    fn pointer_released(&mut self, at: Point, button: PointerButton) {
        if button != self.drag_button {
            return;
        }
        self.panel.pointer_released(at, button);
        self.dragging = false;
    }
}

impl Focusable for DragPanel {}

impl Component for DragPanel {
    fn base(&self) -> &ComponentBase {
        self.panel.base()
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        self.panel.base_mut()
    }

    fn translate(&mut self, by: Vec2) {
        self.panel.translate(by);
    }
}

//=== Slider ==============================================================

/// Handle length along the track.
const HANDLE_LENGTH: f64 = 50.0;

/// Thickness of the drawn track.
const TRACK_THICKNESS: f64 = 10.0;

/// Integer value picked by dragging a handle along a track.
///
/// The handle is dragged with the primary button and kept inside the
/// slider. `next` / `previous` step the value by one. The value follows
/// the handle at each update, and [`is_changed`](Self::is_changed) reports
/// whether that update saw a different value than the one before.
pub struct Slider {
    base: ComponentBase,
    handle: DragPanel,
    track: Option<TextureId>,
    min: i32,
    max: i32,
    value: i32,
    reported: i32,
    vertical: bool,
    changed: bool,
}

impl Slider {
    /// Creates a horizontal slider over `min..=max` starting at `initial`.
    ///
    /// # Panics
    ///
    /// Panics if `max <= min`.
    pub fn new(rect: Rect, min: i32, max: i32, initial: i32, handle: TextureId) -> Self {
        assert!(max > min, "Slider range must not be empty");
        let mut slider = Self {
            base: ComponentBase::new(rect),
            handle: DragPanel::new(rect)
                .with_background(handle)
                .with_drag_button(PointerButton::Primary)
                .with_bounds(rect),
            track: None,
            min,
            max,
            value: initial.clamp(min, max),
            reported: initial.clamp(min, max),
            vertical: false,
            changed: false,
        };
        slider.layout_handle();
        slider
    }

    /// Runs the track top to bottom instead of left to right.
    pub fn with_vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self.layout_handle();
        self
    }

    /// Texture drawn as a thin bar along the track.
    pub fn with_track(mut self, texture: TextureId) -> Self {
        self.track = Some(texture);
        self
    }

    //--- Value ------------------------------------------------------------

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Moves the handle to `value`, clamped to the range. The change is
    /// reported by the next update.
    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max);
        let along = self.position_of(self.value);
        let rect = self.base.rect();
        let to = if self.vertical {
            Point::new(rect.x0, along)
        } else {
            Point::new(along, rect.y0)
        };
        self.handle.move_to(to);
    }

    pub fn range(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    /// Value differed from the previous update's.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn handle(&self) -> &DragPanel {
        &self.handle
    }

    //--- Geometry ---------------------------------------------------------

    /// Start and end of the handle's top-left corner along the track.
    fn travel(&self) -> (f64, f64) {
        let rect = self.base.rect();
        if self.vertical {
            (rect.y0, (rect.y1 - HANDLE_LENGTH).max(rect.y0))
        } else {
            (rect.x0, (rect.x1 - HANDLE_LENGTH).max(rect.x0))
        }
    }

    fn position_of(&self, value: i32) -> f64 {
        let (start, end) = self.travel();
        let t = f64::from(value - self.min) / f64::from(self.max - self.min);
        start + t * (end - start)
    }

    fn value_at(&self, position: f64) -> i32 {
        let (start, end) = self.travel();
        if end <= start {
            return self.min;
        }
        let t = ((position - start) / (end - start)).clamp(0.0, 1.0);
        self.min + (t * f64::from(self.max - self.min)).round() as i32
    }

    fn handle_position(&self) -> f64 {
        let origin = self.handle.rect().origin();
        if self.vertical {
            origin.y
        } else {
            origin.x
        }
    }

    fn layout_handle(&mut self) {
        let rect = self.base.rect();
        let handle_rect = if self.vertical {
            Rect::from_origin_size(rect.origin(), (rect.width(), HANDLE_LENGTH.min(rect.height())))
        } else {
            Rect::from_origin_size(rect.origin(), (HANDLE_LENGTH.min(rect.width()), rect.height()))
        };
        self.handle.set_rect(handle_rect);
        self.handle.set_bounds(Some(rect));
        self.set_value(self.value);
    }

    fn track_rect(&self) -> Rect {
        let rect = self.base.rect();
        let center = rect.center();
        let half = TRACK_THICKNESS / 2.0;
        if self.vertical {
            Rect::new(center.x - half, rect.y0, center.x + half, rect.y1)
        } else {
            Rect::new(rect.x0, center.y - half, rect.x1, center.y + half)
        }
    }
}

impl Updatable for Slider {
    fn update(&mut self, ctx: &UpdateContext<'_>) {
        self.handle.update(ctx);
        self.value = self.value_at(self.handle_position());
        self.changed = self.value != self.reported;
        self.reported = self.value;
    }
}

impl Drawable for Slider {
    fn draw(&self, renderer: &mut dyn Renderer) {
        if !self.base.is_visible() {
            return;
        }
        self.base.draw_background(renderer);
        if let Some(track) = self.track {
            renderer.draw_sprite(track, self.track_rect());
        }
        self.handle.draw(renderer);
    }
}

impl PointerTarget for Slider {
    fn pointer_moved(&mut self, old: Point, new: Point) {
        self.handle.pointer_moved(old, new);
    }

    fn pointer_pressed(&mut self, at: Point, button: PointerButton) {
        self.handle.pointer_pressed(at, button);
    }

    fn pointer_released(&mut self, at: Point, button: PointerButton) {
        self.handle.pointer_released(at, button);
    }
}

impl Focusable for Slider {
    fn next(&mut self) {
        self.set_value(self.value.saturating_add(1));
    }

    fn previous(&mut self) {
        self.set_value(self.value.saturating_sub(1));
    }
}

impl Component for Slider {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn translate(&mut self, by: Vec2) {
        self.base.translate(by);
        self.handle.translate(by);
        self.handle.set_bounds(Some(self.base.rect()));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
