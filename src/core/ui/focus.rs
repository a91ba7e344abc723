//=========================================================================
// Focus Ring
//=========================================================================
//
// Keyboard and gamepad focus order over the children of a container.
//
// Architecture:
// ```text
//   InputSnapshot ──► FocusRing::update ──► Container children
//                        │
//                        ├─ cursor over focus rect  → focus that member
//                        ├─ ArrowDown / DPadDown    → focus next (wraps)
//                        ├─ ArrowUp   / DPadUp      → focus previous (wraps)
//                        └─ ArrowLeft / ArrowRight  → current.previous() / next()
// ```
//
// The ring stores component ids, not components. Members that are no
// longer in the container are skipped silently.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::component::ComponentId;
use super::container::Container;
use crate::core::input::{GamepadButton, InputSnapshot, KeyCode};

//=== FocusRing ===========================================================

/// Ordered focus list with a current member.
#[derive(Debug, Default)]
pub struct FocusRing {
    members: Vec<ComponentId>,
    current: usize,
}

impl FocusRing {
    /// Gamepad whose d-pad drives navigation.
    const NAVIGATION_PAD: u8 = 0;

    pub fn new() -> Self {
        Self::default()
    }

    //--- Membership -------------------------------------------------------

    /// Appends `id` to the end of the order.
    pub fn add(&mut self, id: ComponentId) {
        if !self.members.contains(&id) {
            self.members.push(id);
        }
    }

    /// Drops `id` from the order, keeping the current member when possible.
    pub fn remove(&mut self, id: ComponentId) {
        if let Some(index) = self.members.iter().position(|m| *m == id) {
            self.members.remove(index);
            if index < self.current || self.current >= self.members.len() {
                self.current = self.current.saturating_sub(1);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member holding focus, or `None` when the ring is empty.
    pub fn current(&self) -> Option<ComponentId> {
        self.members.get(self.current).copied()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    //--- Per-Frame Navigation ---------------------------------------------

    /// Applies hover focus and arrow-key / d-pad navigation for one frame.
    pub fn update(&mut self, container: &mut Container, input: &InputSnapshot) {
        if self.members.is_empty() {
            return;
        }

        if input.has_pointer_moved() {
            let cursor = input.cursor();
            let hovered = self.members.iter().rposition(|id| {
                container
                    .child(*id)
                    .is_some_and(|c| c.is_visible() && c.hit_test(cursor))
            });
            if let Some(index) = hovered {
                if index != self.current {
                    self.set_focus_index(index, container);
                }
            }
        }

        let pad = Self::NAVIGATION_PAD;
        if input.is_key_pressed(KeyCode::ArrowDown) || input.is_pad_button_pressed(GamepadButton::DPadDown, pad) {
            self.focus_next(container);
        } else if input.is_key_pressed(KeyCode::ArrowUp) || input.is_pad_button_pressed(GamepadButton::DPadUp, pad) {
            self.focus_previous(container);
        } else if input.is_key_pressed(KeyCode::ArrowLeft) || input.is_pad_button_pressed(GamepadButton::DPadLeft, pad) {
            if let Some(component) = self.current().and_then(|id| container.child_mut(id)) {
                component.previous();
            }
        } else if input.is_key_pressed(KeyCode::ArrowRight) || input.is_pad_button_pressed(GamepadButton::DPadRight, pad) {
            if let Some(component) = self.current().and_then(|id| container.child_mut(id)) {
                component.next();
            }
        }
    }

    //--- Focus Movement ---------------------------------------------------

    /// Moves focus one member forward, wrapping to the first.
    pub fn focus_next(&mut self, container: &mut Container) {
        if self.members.is_empty() {
            return;
        }
        let next = (self.current + 1) % self.members.len();
        self.set_focus_index(next, container);
    }

    /// Moves focus one member back, wrapping to the last.
    pub fn focus_previous(&mut self, container: &mut Container) {
        if self.members.is_empty() {
            return;
        }
        let previous = self.current.checked_sub(1).unwrap_or(self.members.len() - 1);
        self.set_focus_index(previous, container);
    }

    /// Focuses the member at `index`. Out-of-range indices are ignored.
    pub fn set_focus_index(&mut self, index: usize, container: &mut Container) {
        if index >= self.members.len() {
            return;
        }

        if let Some(old) = self.current().and_then(|id| container.child_mut(id)) {
            old.set_focus(false);
        }

        self.current = index;

        if let Some(new) = self.current().and_then(|id| container.child_mut(id)) {
            new.set_focus(true);
        }
    }

    /// Focuses the member with `id`. Non-members are ignored.
    pub fn set_focus(&mut self, id: ComponentId, container: &mut Container) {
        if let Some(index) = self.members.iter().position(|m| *m == id) {
            self.set_focus_index(index, container);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
