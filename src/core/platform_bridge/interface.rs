//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Messages and errors shared by the winit layer and the desktop.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::error::EventLoopError;

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;

//=== PlatformEvent =======================================================

/// Messages sent from the platform layer to the desktop.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Input gathered between two redraws.
    ///
    /// `discrete` keeps key/button order; `continuous` holds the latest
    /// cursor position only.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// The OS window was asked to close.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Failures of the winit event loop. Both are fatal for the desktop.
#[derive(Debug)]
pub enum PlatformError {
    /// The event loop could not be created (OS-level issue).
    EventLoopCreation(EventLoopError),

    /// The event loop stopped with an error.
    EventLoopExecution(EventLoopError),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
