//=========================================================================
// Player Tracker
//=========================================================================
//
// Turns the device's skeleton and hand streams into per-player, per-hand
// signals that stay stable for a whole frame.
//
// Architecture:
// ```text
//   driver thread ──► Sender<TrackerEvent> ──► bounded channel
//                                                  │
//   PlayerTracker::update(now)                     ▼
//     1. drain events ──► latest skeletons / hand input / device status
//     2. bind tracked bodies to free player slots
//     3. optional two-slot swap by X position
//     4. step every player (hands shift, lifecycle advances)
//                                                  │
//   windows ◄── grip_begun / hand_position / push_begun / ... (queries)
// ```
//
// Every query takes `(hand, slot)` and returns a neutral value for slots
// out of range or without a device: Released, the origin, not pressed.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use log::{debug, info, trace, warn};
use std::time::Instant;

//=== Internal Dependencies ===============================================

use super::device::{DeviceDriver, DeviceId, DeviceMonitor, DeviceState, DeviceStatus};
use super::frame::{InteractionFrame, Skeleton, TrackerEvent, TrackingId};
use super::player::{GripState, Hand, HandState, Player, PlayerState};
use crate::core::geometry::{map_to_rect, Point, Rect};

//=== Constants ===========================================================

/// Bodies the device can follow at once.
pub const MAX_PLAYERS: usize = 6;

/// Events drained per update; the rest wait for the next frame.
const MAX_EVENTS_PER_UPDATE: usize = 64;

//=== TrackerConfig =======================================================

/// Tracker settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    channel_capacity: usize,
    player_detection: bool,
}

impl TrackerConfig {
    pub fn new() -> Self {
        Self {
            channel_capacity: 64,
            player_detection: false,
        }
    }

    /// Sets the device event channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Tracker channel capacity must be greater than 0");
        self.channel_capacity = capacity;
        self
    }

    /// Keeps the leftmost of two tracked players in slot 0.
    pub fn with_player_detection(mut self, enabled: bool) -> Self {
        self.player_detection = enabled;
        self
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    pub fn player_detection(&self) -> bool {
        self.player_detection
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new()
    }
}

//=== PlayerTracker =======================================================

/// Per-player lifecycle and hand state fed by a depth-camera device.
pub struct PlayerTracker {
    config: TrackerConfig,
    players: [Player; MAX_PLAYERS],
    latest_skeletons: Vec<Skeleton>,
    monitor: Option<DeviceMonitor>,
    sender: Sender<TrackerEvent>,
    receiver: Receiver<TrackerEvent>,
}

impl PlayerTracker {
    /// Creates a tracker without a device driver.
    ///
    /// Events can still be fed through [`PlayerTracker::sender`].
    pub fn new(config: TrackerConfig) -> Self {
        let (sender, receiver) = bounded(config.channel_capacity());
        Self {
            config,
            players: std::array::from_fn(Player::new),
            latest_skeletons: Vec::new(),
            monitor: None,
            sender,
            receiver,
        }
    }

    /// Attaches the driver used for discovery and status handling.
    pub fn with_driver(mut self, driver: Box<dyn DeviceDriver>) -> Self {
        self.monitor = Some(DeviceMonitor::new(driver));
        self
    }

    /// Runs device discovery.
    pub fn start(&mut self) {
        match self.monitor.as_mut() {
            Some(monitor) => {
                monitor.discover();
                info!(target: "tracking", "Tracker started: {}", monitor.status_text());
            }
            None => debug!(target: "tracking", "Tracker started without a driver"),
        }
    }

    /// Stops the bound device and frees every slot.
    pub fn shutdown(&mut self) {
        if let Some(monitor) = self.monitor.as_mut() {
            monitor.shutdown();
        }
        self.latest_skeletons.clear();
        self.players = std::array::from_fn(Player::new);
    }

    /// Handle for the driver's callback thread.
    pub fn sender(&self) -> Sender<TrackerEvent> {
        self.sender.clone()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    //=====================================================================
    // Frame Update
    //=====================================================================

    /// Commits one frame of tracker input.
    pub fn update(&mut self, now: Instant) {
        self.drain_events();
        self.bind_skeletons();
        if self.config.player_detection() {
            self.detect_players();
        }

        let skeletons = &self.latest_skeletons;
        for player in self.players.iter_mut() {
            let body = player.tracking_id().and_then(|id| {
                skeletons
                    .iter()
                    .find(|s| s.tracking_id == id && s.is_tracked())
            });

            let before = player.state();
            player.update(now, body);
            if player.state() != before {
                trace!(
                    target: "tracking",
                    "Player {}: {:?} -> {:?}",
                    player.slot(),
                    before,
                    player.state()
                );
            }
        }
    }

    fn drain_events(&mut self) {
        for _ in 0..MAX_EVENTS_PER_UPDATE {
            match self.receiver.try_recv() {
                Ok(event) => self.handle_event(event),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    debug!(target: "tracking", "Tracker channel disconnected");
                    return;
                }
            }
        }

        if !self.receiver.is_empty() {
            warn!(
                target: "tracking",
                "Tracker backlog: {} events deferred to next frame",
                self.receiver.len()
            );
        }
    }

    fn handle_event(&mut self, event: TrackerEvent) {
        match event {
            TrackerEvent::Skeletons(skeletons) => self.latest_skeletons = skeletons,
            TrackerEvent::Interaction(frame) => self.apply_interaction(&frame),
            TrackerEvent::Status { device, status } => self.apply_status(device, status),
            TrackerEvent::FrameError => match self.monitor.as_mut() {
                Some(monitor) => monitor.on_frame_error(),
                None => trace!(target: "tracking", "Frame error without a driver"),
            },
        }
    }

    fn apply_status(&mut self, device: DeviceId, status: DeviceStatus) {
        let Some(monitor) = self.monitor.as_mut() else {
            trace!(target: "tracking", "Status {:?} without a driver", status);
            return;
        };

        if monitor.on_status(device, status) {
            self.latest_skeletons.clear();
        }
    }

    //--- Hand Input -------------------------------------------------------

    fn apply_interaction(&mut self, frame: &InteractionFrame) {
        if frame.users.is_empty() {
            for player in self.players.iter_mut().filter(|p| p.is_bound()) {
                player.hand_mut(Hand::Left).release();
                player.hand_mut(Hand::Right).release();
            }
            return;
        }

        for user in &frame.users {
            if user.tracking_id == 0 {
                trace!(target: "tracking", "Ignoring hand data without a body");
                continue;
            }

            let Some(slot) = self.slot_for(user.tracking_id) else {
                debug!(
                    target: "tracking",
                    "No free slot for body {}",
                    user.tracking_id
                );
                continue;
            };

            let player = &mut self.players[slot];
            for pointer in &user.hands {
                player.hand_mut(pointer.hand).apply(pointer);
            }
        }
    }

    //--- Slot Assignment --------------------------------------------------

    fn slot_of(&self, tracking_id: TrackingId) -> Option<usize> {
        self.players
            .iter()
            .position(|p| p.tracking_id() == Some(tracking_id))
    }

    /// Slot bound to `tracking_id`, binding the first free slot if needed.
    fn slot_for(&mut self, tracking_id: TrackingId) -> Option<usize> {
        if let Some(slot) = self.slot_of(tracking_id) {
            return Some(slot);
        }

        let free = self.players.iter().position(|p| !p.is_bound())?;
        self.players[free].bind(tracking_id);
        debug!(target: "tracking", "Body {} bound to slot {}", tracking_id, free);
        Some(free)
    }

    fn bind_skeletons(&mut self) {
        let ids: Vec<TrackingId> = self
            .latest_skeletons
            .iter()
            .filter(|s| s.is_tracked() && s.tracking_id != 0)
            .map(|s| s.tracking_id)
            .collect();

        for id in ids {
            if self.slot_for(id).is_none() {
                trace!(target: "tracking", "Body {} ignored: every slot is taken", id);
            }
        }
    }

    // Two-slot heuristic only.
    fn detect_players(&mut self) {
        let x_of = |player: &Player| {
            player.tracking_id().and_then(|id| {
                self.latest_skeletons
                    .iter()
                    .find(|s| s.tracking_id == id && s.is_tracked())
                    .map(|s| s.position[0])
            })
        };

        if let (Some(x0), Some(x1)) = (x_of(&self.players[0]), x_of(&self.players[1])) {
            if x0 > x1 {
                self.players.swap(0, 1);
                self.players[0].set_slot(0);
                self.players[1].set_slot(1);
                debug!(target: "tracking", "Swapped players 0 and 1");
            }
        }
    }

    //=====================================================================
    // Queries
    //=====================================================================

    fn hand_state(&self, hand: Hand, slot: usize) -> Option<&HandState> {
        self.players.get(slot).map(|p| p.hand(hand))
    }

    //--- Grip -------------------------------------------------------------

    pub fn grip_state(&self, hand: Hand, slot: usize) -> GripState {
        self.hand_state(hand, slot)
            .map_or(GripState::Released, HandState::grip)
    }

    pub fn previous_grip_state(&self, hand: Hand, slot: usize) -> GripState {
        self.hand_state(hand, slot)
            .map_or(GripState::Released, HandState::previous_grip)
    }

    /// First frame of a grip.
    pub fn grip_begun(&self, hand: Hand, slot: usize) -> bool {
        self.hand_state(hand, slot).is_some_and(HandState::grip_begun)
    }

    /// First frame after a grip was released.
    pub fn grip_ended(&self, hand: Hand, slot: usize) -> bool {
        self.hand_state(hand, slot).is_some_and(HandState::grip_ended)
    }

    pub fn grip_held(&self, hand: Hand, slot: usize) -> bool {
        self.hand_state(hand, slot).is_some_and(HandState::grip_held)
    }

    /// Hand is gripping and moved this frame (a drag).
    pub fn grip_moved(&self, hand: Hand, slot: usize) -> bool {
        self.hand_state(hand, slot)
            .is_some_and(|h| h.grip_held() && h.moved())
    }

    //--- Position ---------------------------------------------------------

    pub fn hand_moved(&self, hand: Hand, slot: usize) -> bool {
        self.hand_state(hand, slot).is_some_and(HandState::moved)
    }

    /// Normalized hand position.
    pub fn hand_position(&self, hand: Hand, slot: usize) -> Point {
        self.hand_state(hand, slot)
            .map_or(Point::ZERO, HandState::position)
    }

    pub fn previous_hand_position(&self, hand: Hand, slot: usize) -> Point {
        self.hand_state(hand, slot)
            .map_or(Point::ZERO, HandState::previous_position)
    }

    /// Hand position mapped into `target`.
    pub fn hand_position_in(&self, hand: Hand, slot: usize, target: Rect) -> Point {
        map_to_rect(self.hand_position(hand, slot), target)
    }

    //--- Push -------------------------------------------------------------

    pub fn push_begun(&self, hand: Hand, slot: usize) -> bool {
        self.hand_state(hand, slot).is_some_and(HandState::push_begun)
    }

    pub fn push_ended(&self, hand: Hand, slot: usize) -> bool {
        self.hand_state(hand, slot).is_some_and(HandState::push_ended)
    }

    pub fn is_pressed(&self, hand: Hand, slot: usize) -> bool {
        self.hand_state(hand, slot).is_some_and(HandState::is_pressed)
    }

    /// Push depth in 0..1.
    pub fn press_extent(&self, hand: Hand, slot: usize) -> f64 {
        self.hand_state(hand, slot)
            .map_or(0.0, HandState::press_extent)
    }

    //--- Players ----------------------------------------------------------

    pub fn player(&self, slot: usize) -> Option<&Player> {
        self.players.get(slot)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_state(&self, slot: usize) -> PlayerState {
        self.players
            .get(slot)
            .map_or(PlayerState::Inactive, Player::state)
    }

    pub fn skeleton(&self, slot: usize) -> Option<&Skeleton> {
        self.players.get(slot).and_then(Player::skeleton)
    }

    /// Slots currently bound to a body.
    pub fn tracked_player_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_bound()).count()
    }

    //--- Device -----------------------------------------------------------

    pub fn device_state(&self) -> DeviceState {
        self.monitor
            .as_ref()
            .map_or(DeviceState::NoDevice, DeviceMonitor::state)
    }

    pub fn status_text(&self) -> &str {
        self.monitor
            .as_ref()
            .map_or(DeviceState::NoDevice.status_text(), DeviceMonitor::status_text)
    }
}

impl std::fmt::Debug for PlayerTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerTracker")
            .field("config", &self.config)
            .field("tracked", &self.tracked_player_count())
            .field("device", &self.device_state())
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
