//=========================================================================
// Gesture Tracking
//=========================================================================
//
// Player and hand tracking on top of a depth-camera device.
//
// Components:
// - `frame`: skeleton and hand-pointer records sent by the driver
// - `latched`: input / current / previous triple for edge detection
// - `player`: per-slot lifecycle and per-hand grip, position and push
// - `device`: device discovery and connectivity state
// - `tracker`: the `PlayerTracker` that ties them together
//
//=========================================================================

//=== Module Declarations =================================================

pub mod device;
pub mod frame;
pub mod latched;
pub mod player;
pub mod tracker;

//=== Public API ==========================================================

pub use device::{DeviceDriver, DeviceId, DeviceMonitor, DeviceState, DeviceStatus, TrackerError};
pub use frame::{
    HandEvent, HandPointer, InteractionFrame, Joint, Position3, Skeleton, TrackerEvent,
    TrackingId, TrackingState, UserInfo,
};
pub use latched::Latched;
pub use player::{GripState, Hand, HandState, Player, PlayerState};
pub use tracker::{PlayerTracker, TrackerConfig, MAX_PLAYERS};
