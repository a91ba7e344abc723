//=========================================================================
// Tracker Frames
//=========================================================================
//
// Data delivered by the depth-camera driver.
//
// The driver runs on its own callback thread and pushes `TrackerEvent`s
// into the tracker's channel:
//
// ```text
//   driver thread                         frame loop
//   ─────────────                         ──────────
//   skeleton frame  ─► Skeletons(..)   ─┐
//   interaction     ─► Interaction(..) ─┼─► channel ─► PlayerTracker::update
//   status change   ─► Status{..}      ─┤
//   broken frame    ─► FrameError      ─┘
// ```
//
// Hand positions are normalized to 0..1 on both axes.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::device::{DeviceId, DeviceStatus};
use super::player::Hand;
use crate::core::geometry::Point;

//=== Skeleton ============================================================

/// Correlation id the device assigns to a tracked body. Zero means none.
pub type TrackingId = u32;

/// How well the device is following a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackingState {
    #[default]
    NotTracked,

    /// Only the body centre is known.
    PositionOnly,

    /// Every joint is tracked.
    Tracked,
}

/// Skeleton joints reported per body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    HipCenter,
    Spine,
    ShoulderCenter,
    Head,
    ShoulderLeft,
    ElbowLeft,
    WristLeft,
    HandLeft,
    ShoulderRight,
    ElbowRight,
    WristRight,
    HandRight,
    HipLeft,
    KneeLeft,
    AnkleLeft,
    FootLeft,
    HipRight,
    KneeRight,
    AnkleRight,
    FootRight,
}

impl Joint {
    pub const COUNT: usize = 20;
}

/// Camera-space position in metres (x right, y up, z away from the device).
pub type Position3 = [f32; 3];

/// One body from a skeleton frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    pub tracking_id: TrackingId,
    pub state: TrackingState,
    pub position: Position3,
    pub joints: [Position3; Joint::COUNT],
}

impl Skeleton {
    /// Creates a body at the origin with every joint at the origin.
    pub fn new(tracking_id: TrackingId, state: TrackingState) -> Self {
        Self {
            tracking_id,
            state,
            position: [0.0; 3],
            joints: [[0.0; 3]; Joint::COUNT],
        }
    }

    pub fn with_position(mut self, position: Position3) -> Self {
        self.position = position;
        self
    }

    pub fn is_tracked(&self) -> bool {
        self.state == TrackingState::Tracked
    }

    pub fn joint(&self, joint: Joint) -> Position3 {
        self.joints[joint as usize]
    }

    pub fn set_joint(&mut self, joint: Joint, position: Position3) {
        self.joints[joint as usize] = position;
    }
}

//=== Interaction =========================================================

/// Hand gesture reported with a hand pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HandEvent {
    /// No change this frame; the previous grip state stands.
    #[default]
    None,
    Grip,
    GripRelease,
}

/// One hand of one body in an interaction frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPointer {
    pub hand: Hand,

    /// Normalized position (0..1 per axis).
    pub position: Point,

    pub event: HandEvent,
    pub pressed: bool,

    /// Push depth, 0..1.
    pub press_extent: f64,
}

impl HandPointer {
    /// Creates an idle, unpressed pointer at `position`.
    pub fn new(hand: Hand, position: Point) -> Self {
        Self {
            hand,
            position,
            event: HandEvent::None,
            pressed: false,
            press_extent: 0.0,
        }
    }

    pub fn with_event(mut self, event: HandEvent) -> Self {
        self.event = event;
        self
    }

    pub fn with_press(mut self, pressed: bool, extent: f64) -> Self {
        self.pressed = pressed;
        self.press_extent = extent;
        self
    }
}

/// Hand pointers for one body.
#[derive(Debug, Clone, PartialEq)]
pub struct UserInfo {
    pub tracking_id: TrackingId,
    pub hands: Vec<HandPointer>,
}

/// Per-body hand data for one device frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionFrame {
    pub users: Vec<UserInfo>,
}

//=== TrackerEvent ========================================================

/// Messages from the device callback thread to the tracker.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    /// Every body in the latest skeleton frame.
    Skeletons(Vec<Skeleton>),

    /// Hand data for the latest frame.
    Interaction(InteractionFrame),

    /// A device changed connectivity.
    Status { device: DeviceId, status: DeviceStatus },

    /// The device delivered a frame it could not read.
    FrameError,
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joints_are_indexed_by_kind() {
        let mut skeleton = Skeleton::new(7, TrackingState::Tracked);

        skeleton.set_joint(Joint::HandRight, [0.5, 1.0, 2.0]);

        assert_eq!(skeleton.joint(Joint::HandRight), [0.5, 1.0, 2.0]);
        assert_eq!(skeleton.joint(Joint::FootRight), [0.0; 3]);
        assert!(skeleton.is_tracked());
    }

    #[test]
    fn hand_pointer_defaults_to_idle() {
        let pointer = HandPointer::new(Hand::Left, Point::new(0.2, 0.3));

        assert_eq!(pointer.event, HandEvent::None);
        assert!(!pointer.pressed);
        assert_eq!(pointer.press_extent, 0.0);
    }
}
