//=========================================================================
// Player
//=========================================================================
//
// One tracked person in a fixed player slot.
//
// Lifecycle (one step per tracker update):
// ```text
//            seen                 seen
//   Inactive ────► Entered ─────────────► Active ◄─┐
//      ▲  ▲           │ unseen              │ seen │
//      │  └──unseen───┼──────┐     unseen   ├──────┘
//      │              ▼      │              ▼
//      └──── unseen ──── Exited ◄───────────┘
//                          │ seen
//                          └─────► Entered
// ```
//
// Each hand carries latched grip, position and push values so edges are
// reported exactly once per transition.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

//=== Internal Dependencies ===============================================

use super::frame::{HandEvent, HandPointer, Skeleton, TrackingId};
use super::latched::Latched;
use crate::core::geometry::Point;

//=== Enums ===============================================================

/// Grip state of a hand.
///
/// The tracker only writes `Held` and `Released`; the begun and ended
/// edges are derived from consecutive frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GripState {
    Unknown,
    Begun,
    Held,
    Ended,
    Released,
}

/// Presence of a player in its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    #[default]
    Inactive,
    Entered,
    Active,
    Exited,
}

impl PlayerState {
    /// Next state given whether the player's body was seen this frame.
    pub fn step(self, seen: bool) -> Self {
        match (self, seen) {
            (PlayerState::Inactive | PlayerState::Exited, true) => PlayerState::Entered,
            (PlayerState::Entered | PlayerState::Active, true) => PlayerState::Active,
            (PlayerState::Entered | PlayerState::Active, false) => PlayerState::Exited,
            (PlayerState::Exited | PlayerState::Inactive, false) => PlayerState::Inactive,
        }
    }

    /// Returns `true` while a body is being followed.
    pub fn is_present(self) -> bool {
        matches!(self, PlayerState::Entered | PlayerState::Active)
    }
}

/// Which hand of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub fn other(self) -> Self {
        match self {
            Hand::Left => Hand::Right,
            Hand::Right => Hand::Left,
        }
    }
}

//=== HandState ===========================================================

/// Latched grip, position and push values for one hand.
#[derive(Debug, Clone, PartialEq)]
pub struct HandState {
    grip: Latched<GripState>,
    position: Latched<Point>,
    pressed: Latched<bool>,
    extent: Latched<f64>,
}

impl HandState {
    /// Released, at the origin, not pushing.
    pub fn new() -> Self {
        Self {
            grip: Latched::new(GripState::Released),
            position: Latched::new(Point::ZERO),
            pressed: Latched::new(false),
            extent: Latched::new(0.0),
        }
    }

    //--- Committed Values -------------------------------------------------

    pub fn grip(&self) -> GripState {
        self.grip.current()
    }

    pub fn previous_grip(&self) -> GripState {
        self.grip.previous()
    }

    /// Normalized hand position.
    pub fn position(&self) -> Point {
        self.position.current()
    }

    pub fn previous_position(&self) -> Point {
        self.position.previous()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.current()
    }

    pub fn press_extent(&self) -> f64 {
        self.extent.current()
    }

    pub fn previous_press_extent(&self) -> f64 {
        self.extent.previous()
    }

    //--- Edges ------------------------------------------------------------

    /// First frame of a grip.
    pub fn grip_begun(&self) -> bool {
        self.grip.entered(GripState::Held)
    }

    /// First frame after a grip let go.
    pub fn grip_ended(&self) -> bool {
        self.grip.entered(GripState::Released)
    }

    pub fn grip_held(&self) -> bool {
        self.grip() == GripState::Held
    }

    /// Exact comparison; no dead zone.
    pub fn moved(&self) -> bool {
        self.position.changed()
    }

    pub fn push_begun(&self) -> bool {
        self.pressed.entered(true)
    }

    pub fn push_ended(&self) -> bool {
        self.pressed.entered(false)
    }

    //--- Input ------------------------------------------------------------

    /// Writes one hand pointer record into the input phase.
    pub(crate) fn apply(&mut self, pointer: &HandPointer) {
        match pointer.event {
            HandEvent::Grip => self.grip.set(GripState::Held),
            HandEvent::GripRelease => self.grip.set(GripState::Released),
            HandEvent::None => {}
        }
        self.position.set(pointer.position);
        self.pressed.set(pointer.pressed);
        self.extent.set(pointer.press_extent);
    }

    pub(crate) fn release(&mut self) {
        self.grip.set(GripState::Released);
    }

    /// Back to released at the origin, with no pending edges.
    fn reset(&mut self) {
        self.grip.reset(GripState::Released);
        self.position.reset(Point::ZERO);
        self.pressed.reset(false);
        self.extent.reset(0.0);
    }

    fn shift(&mut self) {
        self.grip.shift();
        self.position.shift();
        self.pressed.shift();
        self.extent.shift();
    }
}

impl Default for HandState {
    fn default() -> Self {
        Self::new()
    }
}

//=== Player ==============================================================

/// A player slot and the body bound to it.
#[derive(Debug, Clone)]
pub struct Player {
    slot: usize,
    tracking_id: Option<TrackingId>,
    left: HandState,
    right: HandState,
    state: PlayerState,
    last_seen: Option<Instant>,
    skeleton: Option<Skeleton>,
    previous_skeleton: Option<Skeleton>,
}

impl Player {
    /// Creates an empty, inactive slot.
    pub fn new(slot: usize) -> Self {
        Self {
            slot,
            tracking_id: None,
            left: HandState::new(),
            right: HandState::new(),
            state: PlayerState::Inactive,
            last_seen: None,
            skeleton: None,
            previous_skeleton: None,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Body correlation id bound to this slot, if any.
    pub fn tracking_id(&self) -> Option<TrackingId> {
        self.tracking_id
    }

    pub fn is_bound(&self) -> bool {
        self.tracking_id.is_some()
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn hand(&self, hand: Hand) -> &HandState {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }

    /// Time of the last update that saw this player's body.
    pub fn last_seen(&self) -> Option<Instant> {
        self.last_seen
    }

    /// Body seen at the last update.
    pub fn skeleton(&self) -> Option<&Skeleton> {
        self.skeleton.as_ref()
    }

    /// Body seen at the update before the last one.
    pub fn previous_skeleton(&self) -> Option<&Skeleton> {
        self.previous_skeleton.as_ref()
    }

    //--- Tracker Plumbing -------------------------------------------------

    pub(crate) fn hand_mut(&mut self, hand: Hand) -> &mut HandState {
        match hand {
            Hand::Left => &mut self.left,
            Hand::Right => &mut self.right,
        }
    }

    pub(crate) fn bind(&mut self, tracking_id: TrackingId) {
        self.tracking_id = Some(tracking_id);
    }

    pub(crate) fn set_slot(&mut self, slot: usize) {
        self.slot = slot;
    }

    /// Advances one frame. `body` is this player's skeleton if it was seen.
    ///
    /// Hands shift first so edges reflect the input written since the
    /// previous update. On the exiting frame both grips are released, so a
    /// held grip ends before the slot is freed. Reaching `Inactive` frees
    /// the slot.
    pub(crate) fn update(&mut self, now: Instant, body: Option<&Skeleton>) {
        let next = self.state.step(body.is_some());
        if next == PlayerState::Exited {
            self.left.release();
            self.right.release();
        }

        self.left.shift();
        self.right.shift();

        self.state = next;
        self.previous_skeleton = std::mem::replace(&mut self.skeleton, body.cloned());
        if body.is_some() {
            self.last_seen = Some(now);
        }

        if self.state == PlayerState::Inactive && self.tracking_id.is_some() {
            self.free();
        }
    }

    fn free(&mut self) {
        self.tracking_id = None;
        self.left.reset();
        self.right.reset();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tracking::frame::TrackingState;

    fn body() -> Skeleton {
        Skeleton::new(9, TrackingState::Tracked)
    }

    fn states(player: &mut Player, seen: &[bool]) -> Vec<PlayerState> {
        let skeleton = body();
        seen.iter()
            .map(|&s| {
                player.update(Instant::now(), s.then_some(&skeleton));
                player.state()
            })
            .collect()
    }

    fn grip(event: HandEvent) -> HandPointer {
        HandPointer::new(Hand::Right, Point::ZERO).with_event(event)
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    /// Tests entry, activity and a two-frame exit.
    #[test]
    fn lifecycle_enter_active_exit_inactive() {
        let mut player = Player::new(0);
        player.bind(9);

        let seen = states(&mut player, &[true, true, false, false]);

        use PlayerState::*;
        assert_eq!(seen, vec![Entered, Active, Exited, Inactive]);
        assert!(!player.is_bound());
    }

    /// Tests that re-acquisition after one exited frame re-enters.
    #[test]
    fn reacquired_after_exit_reenters() {
        let mut player = Player::new(0);
        player.bind(9);

        let seen = states(&mut player, &[true, true, false, true, true]);

        use PlayerState::*;
        assert_eq!(seen, vec![Entered, Active, Exited, Entered, Active]);
        assert!(player.is_bound());
    }

    /// Tests that a grip held while the body leaves ends on the exit frame
    /// and leaves no edge behind once the slot is freed.
    #[test]
    fn held_grip_ends_when_player_exits() {
        let mut player = Player::new(0);
        player.bind(9);
        let skeleton = body();

        player.hand_mut(Hand::Right).apply(&grip(HandEvent::Grip));
        player.update(Instant::now(), Some(&skeleton));
        player.update(Instant::now(), Some(&skeleton));
        assert!(player.hand(Hand::Right).grip_held());

        player.update(Instant::now(), None);
        assert_eq!(player.state(), PlayerState::Exited);
        assert!(player.hand(Hand::Right).grip_ended());
        assert!(!player.hand(Hand::Left).grip_ended());

        player.update(Instant::now(), None);
        assert!(!player.is_bound());
        assert!(!player.hand(Hand::Right).grip_ended());
        assert_eq!(player.hand(Hand::Right).grip(), GripState::Released);
    }

    /// Tests that the exit frame still remembers the last body seen.
    #[test]
    fn exit_frame_keeps_previous_skeleton() {
        let mut player = Player::new(0);
        player.bind(9);

        states(&mut player, &[true, false]);

        assert!(player.skeleton().is_none());
        assert!(player.previous_skeleton().is_some_and(Skeleton::is_tracked));
    }

    /// Tests that an unseen inactive slot stays inactive.
    #[test]
    fn inactive_stays_inactive() {
        assert_eq!(PlayerState::Inactive.step(false), PlayerState::Inactive);
        let mut player = Player::new(3);
        assert_eq!(states(&mut player, &[false, false]), vec![PlayerState::Inactive; 2]);
        assert!(player.last_seen().is_none());
    }

    //=====================================================================
    // Hands
    //=====================================================================

    /// Tests the Released → Held → Held → Released grip edges.
    #[test]
    fn grip_edges_fire_once_per_transition() {
        let mut player = Player::new(0);
        let inputs = [None, Some(HandEvent::Grip), None, Some(HandEvent::GripRelease)];
        let mut begun = Vec::new();
        let mut ended = Vec::new();

        for input in inputs {
            if let Some(event) = input {
                player.hand_mut(Hand::Right).apply(&grip(event));
            }
            player.update(Instant::now(), None);
            begun.push(player.hand(Hand::Right).grip_begun());
            ended.push(player.hand(Hand::Right).grip_ended());
        }

        assert_eq!(begun, vec![false, true, false, false]);
        assert_eq!(ended, vec![false, false, false, true]);
    }

    /// Tests that repeated grip events while held do not re-trigger.
    #[test]
    fn noisy_grip_input_reports_single_begin() {
        let mut hand = HandState::new();
        let mut begins = 0;

        for _ in 0..4 {
            hand.apply(&grip(HandEvent::Grip));
            hand.shift();
            begins += usize::from(hand.grip_begun());
        }

        assert_eq!(begins, 1);
        assert!(hand.grip_held());
    }

    /// Tests exact-equality movement and push edges.
    #[test]
    fn movement_and_push_edges() {
        let mut hand = HandState::new();

        hand.apply(&HandPointer::new(Hand::Left, Point::new(0.5, 0.5)).with_press(true, 0.8));
        hand.shift();
        assert!(hand.moved());
        assert!(hand.push_begun());
        assert_eq!(hand.press_extent(), 0.8);

        hand.shift();
        assert!(!hand.moved());
        assert!(!hand.push_begun());

        hand.apply(&HandPointer::new(Hand::Left, Point::new(0.5, 0.5)));
        hand.shift();
        assert!(hand.push_ended());
        assert_eq!(hand.previous_press_extent(), 0.8);
    }

    #[test]
    fn other_hand() {
        assert_eq!(Hand::Left.other(), Hand::Right);
        assert_eq!(Hand::Right.other(), Hand::Left);
    }
}
