//=========================================================================
// Pointer Frame
//=========================================================================
//
// One frame of pointer transitions, ready for delivery to a window.
//
// Delivery order:
// ```text
//   moved ─► released(primary) ─► released(secondary)
//         ─► pressed(primary)  ─► pressed(secondary)
// ```
//
// Every event goes to the window's own hook first and then to each
// visible child of its container, all with the same coordinates.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Window;
use crate::core::geometry::Point;
use crate::core::input::{InputSnapshot, MouseButton};
use crate::core::ui::{PointerButton, PointerTarget};

//=== PointerFrame ========================================================

/// Pointer transitions detected for one frame.
///
/// Built from the mouse by [`from_input`](Self::from_input) or from a
/// tracked hand by the gesture adapter. Button events carry their own
/// position so an emulated secondary button can sit at the other hand.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerFrame {
    /// Pointer position before this frame's motion.
    pub old: Point,

    /// Pointer position after this frame's motion.
    pub new: Point,

    pub moved: bool,

    /// Where primary button events are reported.
    pub primary_at: Point,

    /// Where secondary button events are reported.
    pub secondary_at: Point,

    pub pressed_primary: bool,
    pub pressed_secondary: bool,
    pub released_primary: bool,
    pub released_secondary: bool,
}

impl PointerFrame {
    /// Reads the mouse transitions of the current snapshot frame.
    ///
    /// Left is the primary button and right the secondary.
    pub fn from_input(input: &InputSnapshot) -> Self {
        let cursor = input.cursor();
        Self {
            old: input.last_cursor(),
            new: cursor,
            moved: input.has_pointer_moved(),
            primary_at: cursor,
            secondary_at: cursor,
            pressed_primary: input.is_button_pressed(MouseButton::Left),
            pressed_secondary: input.is_button_pressed(MouseButton::Right),
            released_primary: input.is_button_released(MouseButton::Left),
            released_secondary: input.is_button_released(MouseButton::Right),
        }
    }

    /// Returns `true` if no event would be delivered.
    pub fn is_empty(&self) -> bool {
        !(self.moved
            || self.pressed_primary
            || self.pressed_secondary
            || self.released_primary
            || self.released_secondary)
    }

    /// Delivers every detected transition to `window`, then to its children.
    pub fn deliver<W: Window + ?Sized>(&self, window: &mut W) {
        if self.moved {
            window.pointer_moved(self.old, self.new);
            window.core_mut().container_mut().pointer_moved(self.old, self.new);
        }
        if self.released_primary {
            Self::release(window, self.primary_at, PointerButton::Primary);
        }
        if self.released_secondary {
            Self::release(window, self.secondary_at, PointerButton::Secondary);
        }
        if self.pressed_primary {
            Self::press(window, self.primary_at, PointerButton::Primary);
        }
        if self.pressed_secondary {
            Self::press(window, self.secondary_at, PointerButton::Secondary);
        }
    }

    fn press<W: Window + ?Sized>(window: &mut W, at: Point, button: PointerButton) {
        window.pointer_pressed(at, button);
        window.core_mut().container_mut().pointer_pressed(at, button);
    }

    fn release<W: Window + ?Sized>(window: &mut W, at: Point, button: PointerButton) {
        window.pointer_released(at, button);
        window.core_mut().container_mut().pointer_released(at, button);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, Modifiers};

    fn click(button: MouseButton) -> InputEvent {
        InputEvent::MouseButtonDown { button, modifiers: Modifiers::NONE }
    }

    /// Tests that mouse buttons map to primary and secondary edges.
    #[test]
    fn from_input_maps_mouse_edges() {
        let mut input = InputSnapshot::new();
        input.refresh(&[vec![
            InputEvent::MouseMoved { x: 30.0, y: 40.0 },
            click(MouseButton::Right),
        ]]);

        let frame = PointerFrame::from_input(&input);

        assert!(frame.moved);
        assert_eq!(frame.new, Point::new(30.0, 40.0));
        assert_eq!(frame.secondary_at, Point::new(30.0, 40.0));
        assert!(frame.pressed_secondary);
        assert!(!frame.pressed_primary);
        assert!(!frame.released_primary);
    }

    /// Tests that a quiet frame produces nothing to deliver.
    #[test]
    fn quiet_frame_is_empty() {
        let mut input = InputSnapshot::new();
        input.refresh(&[]);

        assert!(PointerFrame::from_input(&input).is_empty());
    }

    /// Tests that middle clicks are not pointer buttons.
    #[test]
    fn middle_button_ignored() {
        let mut input = InputSnapshot::new();
        input.refresh(&[vec![click(MouseButton::Middle)]]);

        assert!(PointerFrame::from_input(&input).is_empty());
    }
}
