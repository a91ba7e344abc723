//=========================================================================
// Option Widgets
//=========================================================================
//
// Components that hold one choice out of several and step through them
// with `next` / `previous`, so the focus ring's left/right keys and the
// pointer both drive them.
//
// - `ToggleOption`: a list of strings between two arrows
// - `CheckBox`: a two-state button with a caption
// - `ButtonCollection`: a row of buttons with exactly one selected
//
// Each widget raises a one-frame "changed" flag that the owning window
// reads after its update pass; the flag clears at the widget's next
// update.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::component::{
    Component, ComponentBase, Drawable, Focusable, PointerButton, PointerTarget, Updatable,
};
use super::widgets::{Button, Label, TextAlign};
use crate::core::context::UpdateContext;
use crate::core::geometry::{Color, Point, Rect, Vec2};
use crate::core::services::{FontId, Renderer, SharedAudio, SoundId, TextureId};

//=== ToggleOption ========================================================

/// Gap between an arrow and the option text.
const ARROW_GAP: f64 = 10.0;

/// A cycling list of strings with a left and a right arrow.
///
/// Arrows are square, as tall as the widget. A primary release on an arrow
/// steps the selection. Without looping, the arrow pointing past either
/// end is hidden and stepping past it does nothing.
pub struct ToggleOption {
    base: ComponentBase,
    items: Vec<String>,
    selected: usize,
    text: Label,
    arrow_left: TextureId,
    arrow_right: TextureId,
    looping: bool,
    changed: bool,
    shift_left: bool,
}

impl ToggleOption {
    /// Creates a non-looping option showing the first item in black.
    pub fn new(
        rect: Rect,
        items: Vec<String>,
        arrow_left: TextureId,
        arrow_right: TextureId,
        font: FontId,
    ) -> Self {
        let text_rect = Self::text_rect(rect);
        let first = items.first().cloned().unwrap_or_default();
        Self {
            base: ComponentBase::new(rect),
            items,
            selected: 0,
            text: Label::new(text_rect, first, font).with_align(TextAlign::CenterBoth),
            arrow_left,
            arrow_right,
            looping: false,
            changed: false,
            shift_left: false,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.text.set_color(color);
        self
    }

    /// Wraps around at both ends.
    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    //--- Selection --------------------------------------------------------

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Text of the selected item, or `None` for an empty list.
    pub fn selected_text(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    /// Selects `index` without raising the changed flag. Out-of-range
    /// indices are ignored.
    pub fn set_selection(&mut self, index: usize) {
        if index < self.items.len() {
            self.select(index);
        }
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Selection moved since the last update.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// The last change stepped towards the start of the list.
    pub fn is_shift_left(&self) -> bool {
        self.shift_left
    }

    //--- Layout -----------------------------------------------------------

    fn left_arrow_rect(&self) -> Rect {
        let rect = self.base.rect();
        Rect::from_origin_size(rect.origin(), (rect.height(), rect.height()))
    }

    fn right_arrow_rect(&self) -> Rect {
        let rect = self.base.rect();
        Rect::from_origin_size((rect.x1 - rect.height(), rect.y0), (rect.height(), rect.height()))
    }

    fn text_rect(rect: Rect) -> Rect {
        let inset = rect.height() + ARROW_GAP;
        Rect::new(rect.x0 + inset, rect.y0, (rect.x1 - inset).max(rect.x0 + inset), rect.y1)
    }

    fn at_start(&self) -> bool {
        self.selected == 0
    }

    fn at_end(&self) -> bool {
        self.selected + 1 >= self.items.len()
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        if let Some(item) = self.items.get(index) {
            self.text.set_text(item.as_str());
        }
    }
}

impl Updatable for ToggleOption {
    fn update(&mut self, _ctx: &UpdateContext<'_>) {
        self.changed = false;
    }
}

impl Drawable for ToggleOption {
    fn draw(&self, renderer: &mut dyn Renderer) {
        if !self.base.is_visible() {
            return;
        }
        self.base.draw_background(renderer);
        if self.looping || !self.at_start() {
            renderer.draw_sprite(self.arrow_left, self.left_arrow_rect());
        }
        if self.looping || !self.at_end() {
            renderer.draw_sprite(self.arrow_right, self.right_arrow_rect());
        }
        self.text.draw(renderer);
    }
}

impl PointerTarget for ToggleOption {
    fn pointer_released(&mut self, at: Point, button: PointerButton) {
        if button != PointerButton::Primary {
            return;
        }
        if self.left_arrow_rect().contains(at) {
            self.previous();
        } else if self.right_arrow_rect().contains(at) {
            self.next();
        }
    }
}

impl Focusable for ToggleOption {
    fn next(&mut self) {
        if self.items.is_empty() || (self.at_end() && !self.looping) {
            return;
        }
        let index = (self.selected + 1) % self.items.len();
        self.select(index);
        self.changed = true;
        self.shift_left = false;
    }

    fn previous(&mut self) {
        if self.items.is_empty() || (self.at_start() && !self.looping) {
            return;
        }
        let index = self.selected.checked_sub(1).unwrap_or(self.items.len() - 1);
        self.select(index);
        self.changed = true;
        self.shift_left = true;
    }
}

impl Component for ToggleOption {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn translate(&mut self, by: Vec2) {
        self.base.translate(by);
        self.text.translate(by);
    }
}

//=== CheckBox ============================================================

/// Gap between the box and its caption.
const CAPTION_GAP: f64 = 5.0;

/// A square two-face button followed by a caption.
///
/// The box takes the widget's full height on its left. Starts checked.
pub struct CheckBox {
    base: ComponentBase,
    check: Button,
    caption: Label,
    changed: bool,
}

impl CheckBox {
    pub fn new(
        rect: Rect,
        checked: TextureId,
        unchecked: TextureId,
        caption: &str,
        font: FontId,
    ) -> Self {
        let side = rect.height();
        let box_rect = Rect::from_origin_size(rect.origin(), (side, side));
        let mut check = Button::new(box_rect, checked, unchecked);
        check.set_selected(true);
        let caption_x = rect.x0 + side + CAPTION_GAP;
        let caption_rect = Rect::new(caption_x, rect.y0, rect.x1.max(caption_x), rect.y1);

        Self {
            base: ComponentBase::new(rect),
            check,
            caption: Label::new(caption_rect, caption, font).with_align(TextAlign::CenterVertical),
            changed: false,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.check.is_selected()
    }

    /// Sets the state without raising the changed flag.
    pub fn set_checked(&mut self, checked: bool) {
        self.check.set_selected(checked);
    }

    /// Toggled since the last update.
    pub fn is_changed(&self) -> bool {
        self.changed
    }
}

impl Updatable for CheckBox {
    fn update(&mut self, ctx: &UpdateContext<'_>) {
        self.changed = false;
        self.check.update(ctx);
    }
}

impl Drawable for CheckBox {
    fn draw(&self, renderer: &mut dyn Renderer) {
        if !self.base.is_visible() {
            return;
        }
        self.base.draw_background(renderer);
        self.check.draw(renderer);
        self.caption.draw(renderer);
    }
}

impl PointerTarget for CheckBox {
    fn pointer_released(&mut self, at: Point, button: PointerButton) {
        self.check.pointer_released(at, button);
        if self.check.is_clicked() {
            self.check.clear_click();
            self.next();
        }
    }
}

impl Focusable for CheckBox {
    fn next(&mut self) {
        let checked = self.check.is_selected();
        self.check.set_selected(!checked);
        self.changed = true;
    }

    fn previous(&mut self) {
        self.next();
    }
}

impl Component for CheckBox {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn translate(&mut self, by: Vec2) {
        self.base.translate(by);
        self.check.translate(by);
        self.caption.translate(by);
    }
}

//=== ButtonCollection ====================================================

/// A group of buttons of which one is selected.
///
/// Hovering a button selects it. With `keep_one_selected` off, leaving a
/// button deselects it, so the group can end up with no selection. A
/// primary click on a button selects it and raises the clicked flag.
pub struct ButtonCollection {
    base: ComponentBase,
    buttons: Vec<Button>,
    selected: usize,
    keep_one_selected: bool,
    clicked: bool,
    changed_sound: Option<(SharedAudio, SoundId)>,
    clicked_sound: Option<(SharedAudio, SoundId)>,
}

impl ButtonCollection {
    pub fn new(rect: Rect) -> Self {
        Self {
            base: ComponentBase::new(rect),
            buttons: Vec::new(),
            selected: 0,
            keep_one_selected: true,
            clicked: false,
            changed_sound: None,
            clicked_sound: None,
        }
    }

    /// Plays `sound` whenever the selection moves.
    pub fn with_changed_sound(mut self, audio: SharedAudio, sound: SoundId) -> Self {
        self.changed_sound = Some((audio, sound));
        self
    }

    /// Sound played by [`play_clicked_sound`](Self::play_clicked_sound).
    pub fn with_clicked_sound(mut self, audio: SharedAudio, sound: SoundId) -> Self {
        self.clicked_sound = Some((audio, sound));
        self
    }

    pub fn set_keep_one_selected(&mut self, keep: bool) {
        self.keep_one_selected = keep;
    }

    //--- Buttons ----------------------------------------------------------

    pub fn add(&mut self, button: Button) {
        self.buttons.push(button);
    }

    /// Removes the button at `index`; out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if index >= self.buttons.len() {
            return;
        }
        self.buttons.remove(index);
        if self.selected >= self.buttons.len() {
            self.selected = self.buttons.len().saturating_sub(1);
        }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    //--- Selection --------------------------------------------------------

    /// First button showing its selected face.
    pub fn selected(&self) -> Option<&Button> {
        self.buttons.iter().find(|b| b.is_selected())
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.buttons.iter().position(Button::is_selected)
    }

    /// Moves the selection to `index`; out-of-range indices are ignored.
    pub fn set_selected(&mut self, index: usize) {
        if index >= self.buttons.len() {
            return;
        }
        self.play(&self.changed_sound);
        if let Some(current) = self.buttons.get_mut(self.selected) {
            current.set_selected(false);
        }
        self.buttons[index].set_selected(true);
        self.selected = index;
    }

    /// A button was clicked since the last update.
    pub fn is_clicked(&self) -> bool {
        self.clicked
    }

    pub fn play_clicked_sound(&self) {
        self.play(&self.clicked_sound);
    }

    fn play(&self, sound: &Option<(SharedAudio, SoundId)>) {
        if let Some((audio, sound)) = sound {
            audio.borrow_mut().play(*sound);
        }
    }

    /// Steps the selection by one with wrap-around. Needs two buttons.
    fn step(&mut self, forward: bool) {
        let count = self.buttons.len();
        if count < 2 {
            return;
        }
        let Some(current) = self.selected_index() else {
            trace!(target: "input", "Button collection has no selection to step");
            return;
        };
        let index = if forward {
            (current + 1) % count
        } else {
            current.checked_sub(1).unwrap_or(count - 1)
        };

        self.play(&self.changed_sound);
        self.buttons[current].set_selected(false);
        self.buttons[index].set_selected(true);
        self.selected = index;
    }
}

impl Updatable for ButtonCollection {
    fn update(&mut self, ctx: &UpdateContext<'_>) {
        self.clicked = false;
        for button in &mut self.buttons {
            button.update(ctx);
        }
    }
}

impl Drawable for ButtonCollection {
    fn draw(&self, renderer: &mut dyn Renderer) {
        if !self.base.is_visible() {
            return;
        }
        self.base.draw_background(renderer);
        for button in &self.buttons {
            button.draw(renderer);
        }
    }
}

impl PointerTarget for ButtonCollection {
    fn pointer_moved(&mut self, _old: Point, new: Point) {
        for index in 0..self.buttons.len() {
            let inside = self.buttons[index].rect().contains(new);
            if inside && !self.buttons[index].is_selected() {
                self.set_selected(index);
            } else if !self.keep_one_selected && !inside {
                self.buttons[index].set_selected(false);
            }
        }
    }

    fn pointer_released(&mut self, at: Point, button: PointerButton) {
        for index in 0..self.buttons.len() {
            self.buttons[index].pointer_released(at, button);
            if self.buttons[index].is_clicked() {
                self.clicked = true;
                self.set_selected(index);
            }
        }
    }
}

impl Focusable for ButtonCollection {
    fn next(&mut self) {
        self.step(true);
    }

    fn previous(&mut self) {
        self.step(false);
    }
}

impl Component for ButtonCollection {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn translate(&mut self, by: Vec2) {
        self.base.translate(by);
        for button in &mut self.buttons {
            button.translate(by);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
