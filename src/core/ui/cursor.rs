//=========================================================================
// Hand Cursor
//=========================================================================
//
// A texture that follows one tracked hand. Each update it reads the hand's
// position from the frame's tracker, maps it into a target rectangle
// (normally the owning window's) and centres itself there.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::component::{Component, ComponentBase, Drawable, Focusable, PointerTarget, Updatable};
use crate::core::context::UpdateContext;
use crate::core::geometry::{Rect, Size, Vec2};
use crate::core::services::{Renderer, TextureId};
use crate::core::tracking::Hand;

/// Default cursor edge length.
const CURSOR_SIZE: f64 = 50.0;

//=== Cursor ==============================================================

/// On-screen marker for a player's hand.
///
/// Starts just off the top-left corner so nothing shows before the first
/// tracked frame. Without a tracker in the update context it stays put.
pub struct Cursor {
    base: ComponentBase,
    hand: Hand,
    slot: usize,
    target: Rect,
}

impl Cursor {
    /// Follows `hand` of player 0, mapped into `target`.
    pub fn new(hand: Hand, texture: TextureId, target: Rect) -> Self {
        let rect = Rect::from_origin_size((-CURSOR_SIZE, -CURSOR_SIZE), (CURSOR_SIZE, CURSOR_SIZE));
        Self {
            base: ComponentBase::with_background(rect, texture),
            hand,
            slot: 0,
            target,
        }
    }

    pub fn with_slot(mut self, slot: usize) -> Self {
        self.slot = slot;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.base.set_size(size);
        self
    }

    pub fn hand(&self) -> Hand {
        self.hand
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Rectangle the normalized hand position is mapped into.
    pub fn target(&self) -> Rect {
        self.target
    }

    pub fn set_target(&mut self, target: Rect) {
        self.target = target;
    }
}

impl Updatable for Cursor {
    fn update(&mut self, ctx: &UpdateContext<'_>) {
        let Some(tracker) = ctx.tracker() else {
            return;
        };
        let at = tracker.hand_position_in(self.hand, self.slot, self.target);
        let half = self.base.size().to_vec2() / 2.0;
        self.base.set_location(at - half);
    }
}

impl Drawable for Cursor {
    fn draw(&self, renderer: &mut dyn Renderer) {
        self.base.draw_background(renderer);
    }
}

impl PointerTarget for Cursor {}
impl Focusable for Cursor {}

impl Component for Cursor {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    /// Moves the target with the cursor so the mapping follows its window.
    fn translate(&mut self, by: Vec2) {
        self.base.translate(by);
        self.target = self.target + by;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
