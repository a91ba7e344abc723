//=========================================================================
// Input Buffer
//
// Holds the input gathered between two redraws.
//
// - `discrete`: key, button and pad transitions in arrival order;
//   an exact repeat of the previous event is dropped
// - `continuous`: cursor motion, coalesced so only the latest position
//   survives
//
// Drained once per frame into a `PlatformEvent::Inputs` message.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        Self {
            discrete: Vec::with_capacity(64),
            continuous: HashSet::with_capacity(4),
        }
    }

    /// Routes `event` by kind.
    pub(crate) fn push(&mut self, event: InputEvent) {
        if event.is_continuous() {
            // `replace`, not `insert`: motion events compare equal.
            self.continuous.replace(event);
        } else if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    /// Takes both halves, or `None` when nothing was buffered.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = std::mem::take(&mut self.discrete);
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, Modifiers};

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    /// Tests that only an immediate repeat is dropped.
    #[test]
    fn discrete_repeats_collapse() {
        let mut buffer = InputBuffer::new();

        buffer.push(key_down(KeyCode::KeyA));
        buffer.push(key_down(KeyCode::KeyA));
        buffer.push(key_down(KeyCode::KeyB));
        buffer.push(key_down(KeyCode::KeyA));

        let (discrete, _) = buffer.drain().unwrap();
        assert_eq!(discrete.len(), 3);
    }

    /// Tests that the last cursor position wins.
    #[test]
    fn motion_is_coalesced() {
        let mut buffer = InputBuffer::new();

        buffer.push(InputEvent::MouseMoved { x: 10.0, y: 10.0 });
        buffer.push(InputEvent::MouseMoved { x: 20.0, y: 30.0 });

        let (discrete, continuous) = buffer.drain().unwrap();
        assert!(discrete.is_empty());
        match continuous.as_slice() {
            [InputEvent::MouseMoved { x, y }] => assert_eq!((*x, *y), (20.0, 30.0)),
            other => panic!("Expected one MouseMoved, found {:?}", other),
        }
    }

    /// Tests that draining empties the buffer and an empty drain is `None`.
    #[test]
    fn drain_empties_buffer() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.drain().is_none());

        buffer.push(key_down(KeyCode::Space));
        buffer.push(InputEvent::MouseMoved { x: 1.0, y: 2.0 });

        assert!(buffer.drain().is_some());
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none());
    }
}
