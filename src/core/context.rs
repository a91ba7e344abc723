//=========================================================================
// Update Context
//=========================================================================
//
// Per-frame data handed down the window tree during `update`.
//
// Contains:
// - `dt`: time since the previous frame
// - `input`: the frame's input snapshot (keyboard, mouse, gamepads)
// - `tracker`: the player tracker, when one is attached
// - `display`: screen rectangle used to map normalized hand positions
// - a command queue windows use to close, open and reorder windows
//
// The desktop builds one context per frame after refreshing the snapshot
// and the tracker, so every window in the tree reads the same state.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Rect;
use crate::core::input::InputSnapshot;
use crate::core::tracking::PlayerTracker;
use crate::core::window::{CommandQueue, Window, WindowCommand, WindowId};

//=== UpdateContext =======================================================

/// Shared, read-mostly frame state for windows and components.
///
/// Windows receive `&UpdateContext` and may queue [`WindowCommand`]s
/// through it. Commands are applied by the owning window group at its
/// next commit point, never in the middle of an iteration.
pub struct UpdateContext<'a> {
    dt: Duration,
    input: &'a InputSnapshot,
    tracker: Option<&'a PlayerTracker>,
    display: Rect,
    commands: RefCell<CommandQueue>,
}

impl<'a> UpdateContext<'a> {
    /// Creates a context without a tracker.
    pub fn new(dt: Duration, input: &'a InputSnapshot, display: Rect) -> Self {
        Self {
            dt,
            input,
            tracker: None,
            display,
            commands: RefCell::new(CommandQueue::new()),
        }
    }

    /// Attaches the player tracker for this frame.
    pub fn with_tracker(mut self, tracker: &'a PlayerTracker) -> Self {
        self.tracker = Some(tracker);
        self
    }

    //--- Frame State ------------------------------------------------------

    pub fn dt(&self) -> Duration {
        self.dt
    }

    pub fn input(&self) -> &'a InputSnapshot {
        self.input
    }

    pub fn tracker(&self) -> Option<&'a PlayerTracker> {
        self.tracker
    }

    /// Screen rectangle normalized hand positions are mapped into.
    pub fn display(&self) -> Rect {
        self.display
    }

    //--- Window Commands --------------------------------------------------

    /// Requests removal of window `id` at its group's next commit.
    pub fn close(&self, id: WindowId) {
        self.post(WindowCommand::Close(id));
    }

    /// Requests that window `id` move to the top of its group.
    pub fn bring_to_front(&self, id: WindowId) {
        self.post(WindowCommand::BringToFront(id));
    }

    /// Requests that window `id` move to the bottom of its group.
    pub fn send_to_back(&self, id: WindowId) {
        self.post(WindowCommand::SendToBack(id));
    }

    /// Requests that `window` be added to the group `parent`.
    pub fn open(&self, parent: WindowId, window: Box<dyn Window>) {
        self.post(WindowCommand::Open { parent, window });
    }

    /// Queues an arbitrary command.
    pub fn post(&self, command: WindowCommand) {
        self.commands.borrow_mut().push(command);
    }

    /// Number of commands still waiting for a group to claim them.
    pub fn pending_commands(&self) -> usize {
        self.commands.borrow().len()
    }

    /// Removes and returns the commands matching `claim`.
    pub(crate) fn take_commands_where<F>(&self, claim: F) -> Vec<WindowCommand>
    where
        F: FnMut(&WindowCommand) -> bool,
    {
        self.commands.borrow_mut().drain_where(claim)
    }

    /// Consumes the context, returning every unclaimed command.
    pub(crate) fn into_commands(self) -> Vec<WindowCommand> {
        self.commands.into_inner().take()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::window::WindowId;

    /// Tests that the context exposes the frame state it was built with.
    #[test]
    fn exposes_frame_state() {
        let input = InputSnapshot::new();
        let display = Rect::new(0.0, 0.0, 800.0, 600.0);

        let ctx = UpdateContext::new(Duration::from_millis(16), &input, display);

        assert_eq!(ctx.dt(), Duration::from_millis(16));
        assert_eq!(ctx.display(), display);
        assert!(ctx.tracker().is_none());
    }

    /// Tests that claimed commands leave the queue and the rest remain.
    #[test]
    fn take_commands_where_claims_matching() {
        let input = InputSnapshot::new();
        let ctx = UpdateContext::new(Duration::ZERO, &input, Rect::ZERO);
        let a = WindowId::fresh();
        let b = WindowId::fresh();

        ctx.close(a);
        ctx.bring_to_front(b);
        ctx.send_to_back(a);

        let claimed = ctx.take_commands_where(|c| c.target() == a);

        assert_eq!(claimed.len(), 2);
        assert_eq!(ctx.pending_commands(), 1);
        let rest = ctx.into_commands();
        assert!(matches!(rest.as_slice(), [WindowCommand::BringToFront(id)] if *id == b));
    }
}
