//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the winit layer and the desktop.
//
// Components:
// - `interface`: messages and errors crossing the boundary
// - `event_collector`: desktop-side bounded drain of those messages
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::EventCollector;
pub(crate) use interface::PlatformEvent;

//=== Public API ==========================================================

pub use event_collector::TickControl;
pub use interface::PlatformError;
