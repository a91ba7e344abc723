//=========================================================================
// Widgets
//=========================================================================
//
// Small stock components: a two-state texture `Button` and a text
// `Label`. Both are plain components and ride the normal container
// dispatch.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::component::{
    Component, ComponentBase, Drawable, Focusable, PointerButton, PointerTarget, Updatable,
};
use crate::core::context::UpdateContext;
use crate::core::geometry::{Color, Point, Rect};
use crate::core::services::{FontId, Renderer, TextureId};

//=== Button ==============================================================

/// Texture button with a selected and an unselected face.
///
/// A click is a primary release inside the bounds. It stays readable via
/// [`is_clicked`](Self::is_clicked) until the button's next update, so the
/// owning window sees it right after its own update pass.
pub struct Button {
    base: ComponentBase,
    selected_texture: TextureId,
    unselected_texture: TextureId,
    selected: bool,
    action_id: i32,
    clicked: bool,
    hover_select: bool,
}

impl Button {
    /// Creates an unselected button with action id 0.
    pub fn new(rect: Rect, selected: TextureId, unselected: TextureId) -> Self {
        Self {
            base: ComponentBase::new(rect),
            selected_texture: selected,
            unselected_texture: unselected,
            selected: false,
            action_id: 0,
            clicked: false,
            hover_select: false,
        }
    }

    /// Sets the action id reported to click handlers.
    pub fn with_action(mut self, action_id: i32) -> Self {
        self.action_id = action_id;
        self
    }

    /// Makes the selected face follow the cursor.
    pub fn with_hover_select(mut self, enabled: bool) -> Self {
        self.hover_select = enabled;
        self
    }

    pub fn is_clicked(&self) -> bool {
        self.clicked
    }

    pub fn clear_click(&mut self) {
        self.clicked = false;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn action_id(&self) -> i32 {
        self.action_id
    }

    pub fn set_action_id(&mut self, action_id: i32) {
        self.action_id = action_id;
    }

    pub fn hover_select(&self) -> bool {
        self.hover_select
    }

    pub fn set_hover_select(&mut self, enabled: bool) {
        self.hover_select = enabled;
    }

    fn face(&self) -> TextureId {
        if self.selected {
            self.selected_texture
        } else {
            self.unselected_texture
        }
    }
}

impl Updatable for Button {
    fn update(&mut self, _ctx: &UpdateContext<'_>) {
        self.clear_click();
    }
}

impl Drawable for Button {
    fn draw(&self, renderer: &mut dyn Renderer) {
        if self.base.is_visible() {
            renderer.draw_sprite(self.face(), self.base.rect());
        }
    }
}

impl PointerTarget for Button {
    fn pointer_moved(&mut self, _old: Point, new: Point) {
        if self.hover_select {
            self.selected = self.base.rect().contains(new);
        }
    }

    fn pointer_released(&mut self, at: Point, button: PointerButton) {
        if button == PointerButton::Primary {
            self.clicked = self.base.rect().contains(at);
        }
    }
}

impl Focusable for Button {}

impl Component for Button {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }
}

//=== Label ===============================================================

/// How a label places its text inside its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Text starts at the top-left corner.
    #[default]
    TopLeft,
    CenterHorizontal,
    CenterVertical,
    CenterBoth,
}

/// Single-line text drawn with a host font.
pub struct Label {
    base: ComponentBase,
    text: String,
    font: FontId,
    color: Color,
    align: TextAlign,
}

impl Label {
    /// Creates a black, top-left aligned label.
    pub fn new(rect: Rect, text: impl Into<String>, font: FontId) -> Self {
        Self {
            base: ComponentBase::new(rect),
            text: text.into(),
            font,
            color: Color::BLACK,
            align: TextAlign::TopLeft,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Top-left corner of the text for the current alignment.
    fn text_position(&self, renderer: &dyn Renderer) -> Point {
        let rect = self.base.rect();
        let measured = renderer.measure_text(self.font, &self.text);
        let centered_x = rect.x0 + (rect.width() - measured.width) / 2.0;
        let centered_y = rect.y0 + (rect.height() - measured.height) / 2.0;

        match self.align {
            TextAlign::TopLeft => rect.origin(),
            TextAlign::CenterHorizontal => Point::new(centered_x, rect.y0),
            TextAlign::CenterVertical => Point::new(rect.x0, centered_y),
            TextAlign::CenterBoth => Point::new(centered_x, centered_y),
        }
    }
}

impl Updatable for Label {}
impl PointerTarget for Label {}
impl Focusable for Label {}

impl Drawable for Label {
    fn draw(&self, renderer: &mut dyn Renderer) {
        if !self.base.is_visible() {
            return;
        }
        self.base.draw_background(renderer);
        let position = self.text_position(renderer);
        renderer.draw_text(self.font, &self.text, position, self.color);
    }
}

impl Component for Label {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::InputSnapshot;
    use crate::core::services::testing::{DrawCall, RecordingRenderer};
    use crate::core::ui::container::Container;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::from_origin_size((x, y), (w, h))
    }

    fn button() -> Button {
        Button::new(rect(10.0, 10.0, 80.0, 30.0), TextureId(1), TextureId(2))
    }

    //=====================================================================
    // Button
    //=====================================================================

    /// Tests that only a primary release inside the bounds clicks.
    #[test]
    fn click_requires_primary_release_inside() {
        let mut b = button();

        b.pointer_released(Point::new(200.0, 20.0), PointerButton::Primary);
        assert!(!b.is_clicked());

        b.pointer_released(Point::new(20.0, 20.0), PointerButton::Secondary);
        assert!(!b.is_clicked());

        b.pointer_released(Point::new(20.0, 20.0), PointerButton::Primary);
        assert!(b.is_clicked());
    }

    /// Tests that the click flag lasts until the next update.
    #[test]
    fn update_clears_click() {
        let mut container = Container::new(rect(0.0, 0.0, 100.0, 100.0));
        let id = container.push(button().with_action(4));
        container.pointer_released(Point::new(20.0, 20.0), PointerButton::Primary);
        assert!(container.get::<Button>(id).is_some_and(|b| b.is_clicked()));

        let input = InputSnapshot::new();
        container.update(&UpdateContext::new(Default::default(), &input, Rect::ZERO));

        let b = container.get::<Button>(id).expect("button");
        assert!(!b.is_clicked());
        assert_eq!(b.action_id(), 4);
    }

    /// Tests hover selection swapping the drawn face.
    #[test]
    fn hover_select_swaps_face() {
        let mut b = button().with_hover_select(true);
        let mut renderer = RecordingRenderer::default();

        b.pointer_moved(Point::ZERO, Point::new(50.0, 20.0));
        assert!(b.is_selected());
        b.draw(&mut renderer);

        b.pointer_moved(Point::new(50.0, 20.0), Point::new(500.0, 20.0));
        assert!(!b.is_selected());
        b.draw(&mut renderer);

        assert_eq!(
            renderer.calls,
            vec![
                DrawCall::Texture(TextureId(1), b.rect()),
                DrawCall::Texture(TextureId(2), b.rect()),
            ]
        );
    }

    /// Tests that hover selection is off by default.
    #[test]
    fn hover_select_disabled_by_default() {
        let mut b = button();
        b.pointer_moved(Point::ZERO, Point::new(50.0, 20.0));
        assert!(!b.is_selected());
    }

    //=====================================================================
    // Label
    //=====================================================================

    /// Tests the text position for each alignment (glyphs are 10x20).
    #[test]
    fn label_alignment_positions_text() {
        let bounds = rect(0.0, 0.0, 100.0, 60.0);
        let cases = [
            (TextAlign::TopLeft, Point::new(0.0, 0.0)),
            (TextAlign::CenterHorizontal, Point::new(30.0, 0.0)),
            (TextAlign::CenterVertical, Point::new(0.0, 20.0)),
            (TextAlign::CenterBoth, Point::new(30.0, 20.0)),
        ];

        for (align, expected) in cases {
            let label = Label::new(bounds, "four", FontId(0)).with_align(align);
            let mut renderer = RecordingRenderer::default();
            label.draw(&mut renderer);
            assert_eq!(renderer.calls, vec![DrawCall::Text("four".into(), expected)], "{:?}", align);
        }
    }

    /// Tests that hidden labels draw nothing.
    #[test]
    fn hidden_label_draws_nothing() {
        let mut label = Label::new(rect(0.0, 0.0, 10.0, 10.0), "x", FontId(0));
        label.set_visible(false);
        let mut renderer = RecordingRenderer::default();

        label.draw(&mut renderer);

        assert!(renderer.calls.is_empty());
    }
}
