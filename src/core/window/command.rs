//=========================================================================
// Window Commands
//=========================================================================
//
// Deferred requests that change the window tree.
//
// Windows queue commands through the update context while the tree is
// being iterated. A window group claims the commands addressed to its own
// children at its commit point; the desktop routes whatever is left after
// the root update down the tree.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::{Window, WindowId};

//=== WindowCommand =======================================================

/// A structural change requested during update.
pub enum WindowCommand {
    /// Remove the window with this id from its group.
    Close(WindowId),

    /// Move the window with this id to the top of its group.
    BringToFront(WindowId),

    /// Move the window with this id to the bottom of its group.
    SendToBack(WindowId),

    /// Add `window` to the group whose id is `parent`.
    Open {
        parent: WindowId,
        window: Box<dyn Window>,
    },
}

impl WindowCommand {
    /// Window the command acts on: the child for close and reorder, the
    /// receiving group for open.
    pub fn target(&self) -> WindowId {
        match self {
            WindowCommand::Close(id)
            | WindowCommand::BringToFront(id)
            | WindowCommand::SendToBack(id) => *id,
            WindowCommand::Open { parent, .. } => *parent,
        }
    }
}

impl fmt::Debug for WindowCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowCommand::Close(id) => f.debug_tuple("Close").field(id).finish(),
            WindowCommand::BringToFront(id) => f.debug_tuple("BringToFront").field(id).finish(),
            WindowCommand::SendToBack(id) => f.debug_tuple("SendToBack").field(id).finish(),
            WindowCommand::Open { parent, window } => f
                .debug_struct("Open")
                .field("parent", parent)
                .field("window", &window.core().id())
                .finish(),
        }
    }
}

//=== CommandQueue ========================================================

/// Ordered queue of pending window commands.
#[derive(Debug, Default)]
pub struct CommandQueue {
    queue: Vec<WindowCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a command to be applied at the next commit point.
    pub fn push(&mut self, command: WindowCommand) {
        self.queue.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes every command, leaving the queue empty.
    pub fn take(&mut self) -> Vec<WindowCommand> {
        std::mem::take(&mut self.queue)
    }

    /// Removes the commands matching `claim`, keeping the others in order.
    pub fn drain_where<F>(&mut self, claim: F) -> Vec<WindowCommand>
    where
        F: FnMut(&WindowCommand) -> bool,
    {
        let (claimed, kept) = self.take().into_iter().partition(claim);
        self.queue = kept;
        claimed
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that drain_where preserves the order of both halves.
    #[test]
    fn drain_where_preserves_order() {
        let ids: Vec<WindowId> = (0..4).map(|_| WindowId::fresh()).collect();
        let mut queue = CommandQueue::new();
        for (i, id) in ids.iter().enumerate() {
            if i % 2 == 0 {
                queue.push(WindowCommand::Close(*id));
            } else {
                queue.push(WindowCommand::SendToBack(*id));
            }
        }

        let closes = queue.drain_where(|c| matches!(c, WindowCommand::Close(_)));

        let closed: Vec<WindowId> = closes.iter().map(WindowCommand::target).collect();
        assert_eq!(closed, vec![ids[0], ids[2]]);
        let kept: Vec<WindowId> = queue.take().iter().map(WindowCommand::target).collect();
        assert_eq!(kept, vec![ids[1], ids[3]]);
        assert!(queue.is_empty());
    }
}
