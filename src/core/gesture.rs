//=========================================================================
// Gesture Windows
//=========================================================================
//
// Windows driven by tracked hands as well as the mouse.
//
// Per frame, after the standard window update:
// ```text
//   for slot in 0..max(max_players, tracked players):
//     Entered / Exited ──► player_entered / player_exited
//     slot 0, mouse emulation ──► PointerFrame ──► window, then components
//         main hand  = primary button (grip begun = press, ended = release)
//         other hand = secondary button
//     gesture mode ──► hand_moved / hand_grip_begun / hand_grip_ended /
//                      hand_pushed on the window only
// ```
//
// Hand positions are mapped into the window's rectangle. Gesture hooks are
// not forwarded to components; a window that wants that forwards them
// itself.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::context::UpdateContext;
use crate::core::geometry::{map_to_rect, Point, Rect};
use crate::core::tracking::{Hand, PlayerState, PlayerTracker, MAX_PLAYERS};
use crate::core::window::{update_window, PointerFrame, Window};

//=== InteractionMode =====================================================

/// Which automatic hand interactions a gesture window performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionMode {
    /// No automatic hand interaction; the tracker is still queryable.
    None,

    /// Player 0's hands drive the pointer events, like a mouse.
    #[default]
    MouseOnly,

    /// Only the dedicated gesture hooks fire.
    GestureOnly,

    /// Mouse emulation and gesture hooks.
    Both,
}

impl InteractionMode {
    pub fn emulates_mouse(self) -> bool {
        matches!(self, InteractionMode::MouseOnly | InteractionMode::Both)
    }

    pub fn dispatches_gestures(self) -> bool {
        matches!(self, InteractionMode::GestureOnly | InteractionMode::Both)
    }
}

//=== GestureAdapter ======================================================

/// Per-window hand interaction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureAdapter {
    mode: InteractionMode,
    left_as_primary: bool,
    max_players: usize,
}

impl GestureAdapter {
    /// Mouse emulation with the right hand as primary, one player.
    pub fn new() -> Self {
        Self {
            mode: InteractionMode::MouseOnly,
            left_as_primary: false,
            max_players: 1,
        }
    }

    pub fn with_mode(mut self, mode: InteractionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Makes the left hand the primary button.
    pub fn with_left_as_primary(mut self, left: bool) -> Self {
        self.left_as_primary = left;
        self
    }

    /// Slots polled even when fewer players are tracked.
    pub fn with_max_players(mut self, max_players: usize) -> Self {
        self.max_players = max_players;
        self
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    pub fn left_as_primary(&self) -> bool {
        self.left_as_primary
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    /// Hand mapped to the primary button.
    pub fn primary_hand(&self) -> Hand {
        if self.left_as_primary {
            Hand::Left
        } else {
            Hand::Right
        }
    }

    /// Number of slots to poll this frame, capped at the device limit.
    pub fn slots_to_poll(&self, tracker: &PlayerTracker) -> usize {
        self.max_players
            .max(tracker.tracked_player_count())
            .min(MAX_PLAYERS)
    }
}

impl Default for GestureAdapter {
    fn default() -> Self {
        Self::new()
    }
}

//=== GestureWindow =======================================================

/// A window that reacts to tracked players and hands.
///
/// Implementors call [`update_gesture_window`] from `update`.
///
/// # Examples
///
/// ```
/// use gesture_wnd::prelude::*;
///
/// struct Paint {
///     core: WindowCore,
///     adapter: GestureAdapter,
///     strokes: Vec<(Point, Point)>,
/// }
///
/// impl Window for Paint {
///     fn core(&self) -> &WindowCore { &self.core }
///     fn core_mut(&mut self) -> &mut WindowCore { &mut self.core }
///
///     fn update(&mut self, ctx: &UpdateContext<'_>) {
///         update_gesture_window(self, ctx);
///     }
/// }
///
/// impl GestureWindow for Paint {
///     fn adapter(&self) -> &GestureAdapter { &self.adapter }
///
///     fn hand_moved(&mut self, old: Point, new: Point, _hand: Hand, _slot: usize) {
///         self.strokes.push((old, new));
///     }
/// }
///
/// let paint = Paint {
///     core: WindowCore::new(Rect::new(0.0, 0.0, 640.0, 480.0)),
///     adapter: GestureAdapter::new().with_mode(InteractionMode::GestureOnly),
///     strokes: Vec::new(),
/// };
/// assert!(paint.adapter().mode().dispatches_gestures());
/// ```
pub trait GestureWindow: Window {
    fn adapter(&self) -> &GestureAdapter;

    /// A body started being followed in `slot`.
    fn player_entered(&mut self, _slot: usize, _is_tracked: bool) {}

    /// The body in `slot` was lost. `was_tracked` describes the last body
    /// seen before that.
    fn player_exited(&mut self, _slot: usize, _was_tracked: bool) {}

    fn hand_moved(&mut self, _old: Point, _new: Point, _hand: Hand, _slot: usize) {}
    fn hand_grip_begun(&mut self, _at: Point, _hand: Hand, _slot: usize) {}
    fn hand_grip_ended(&mut self, _at: Point, _hand: Hand, _slot: usize) {}

    /// Fires on the frame a push starts.
    fn hand_pushed(&mut self, _at: Point, _hand: Hand, _slot: usize) {}
}

//=== Dispatch ============================================================

/// Standard gesture window update.
///
/// Runs [`update_window`] and then, if enabled and a tracker is attached,
/// the player and hand dispatch described at the top of this module.
pub fn update_gesture_window<W: GestureWindow + ?Sized>(window: &mut W, ctx: &UpdateContext<'_>) {
    update_window(window, ctx);

    if !window.core().is_enabled() {
        return;
    }
    let Some(tracker) = ctx.tracker() else {
        return;
    };

    let adapter = *window.adapter();
    let target = window.rect();

    for slot in 0..adapter.slots_to_poll(tracker) {
        dispatch_lifecycle(window, tracker, slot);

        if slot == 0 && adapter.mode().emulates_mouse() {
            let frame = emulated_pointer(tracker, &adapter, target);
            if !frame.is_empty() {
                trace!(target: "gesture", "Hand pointer frame {:?}", frame);
                frame.deliver(window);
            }
        }

        if adapter.mode().dispatches_gestures() {
            for hand in [Hand::Left, Hand::Right] {
                dispatch_hand(window, tracker, hand, slot, target);
            }
        }
    }
}

/// The exit hook reports the last body seen before the player left.
fn dispatch_lifecycle<W: GestureWindow + ?Sized>(window: &mut W, tracker: &PlayerTracker, slot: usize) {
    let Some(player) = tracker.player(slot) else {
        return;
    };
    match player.state() {
        PlayerState::Entered => {
            let is_tracked = player.skeleton().is_some_and(|s| s.is_tracked());
            window.player_entered(slot, is_tracked);
        }
        PlayerState::Exited => {
            let was_tracked = player.previous_skeleton().is_some_and(|s| s.is_tracked());
            window.player_exited(slot, was_tracked);
        }
        PlayerState::Active | PlayerState::Inactive => {}
    }
}

/// Player 0's hands as a two-button pointer.
fn emulated_pointer(tracker: &PlayerTracker, adapter: &GestureAdapter, target: Rect) -> PointerFrame {
    let main = adapter.primary_hand();
    let other = main.other();
    let at = |hand: Hand| map_to_rect(tracker.hand_position(hand, 0), target);

    PointerFrame {
        old: map_to_rect(tracker.previous_hand_position(main, 0), target),
        new: at(main),
        moved: tracker.hand_moved(main, 0),
        primary_at: at(main),
        secondary_at: at(other),
        pressed_primary: tracker.grip_begun(main, 0),
        pressed_secondary: tracker.grip_begun(other, 0),
        released_primary: tracker.grip_ended(main, 0),
        released_secondary: tracker.grip_ended(other, 0),
    }
}

fn dispatch_hand<W: GestureWindow + ?Sized>(
    window: &mut W,
    tracker: &PlayerTracker,
    hand: Hand,
    slot: usize,
    target: Rect,
) {
    let at = tracker.hand_position_in(hand, slot, target);

    if tracker.hand_moved(hand, slot) {
        let old = map_to_rect(tracker.previous_hand_position(hand, slot), target);
        window.hand_moved(old, at, hand, slot);
    }
    if tracker.grip_begun(hand, slot) {
        window.hand_grip_begun(at, hand, slot);
    }
    if tracker.grip_ended(hand, slot) {
        window.hand_grip_ended(at, hand, slot);
    }
    if tracker.push_begun(hand, slot) {
        window.hand_pushed(at, hand, slot);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::core::input::InputSnapshot;
    use crate::core::tracking::{
        HandEvent, HandPointer, InteractionFrame, Skeleton, TrackerConfig, TrackerEvent,
        TrackingState, UserInfo,
    };
    use crate::core::ui::component::testing::{new_log, EventLog, Probe};
    use crate::core::window::WindowCore;

    //--- Test Window ------------------------------------------------------

    struct GestureProbe {
        core: WindowCore,
        adapter: GestureAdapter,
        log: EventLog,
    }

    impl GestureProbe {
        fn new(mode: InteractionMode, log: &EventLog) -> Self {
            Self {
                core: WindowCore::new(Rect::new(0.0, 0.0, 100.0, 100.0)),
                adapter: GestureAdapter::new().with_mode(mode),
                log: log.clone(),
            }
        }

        fn record(&self, entry: String) {
            self.log.borrow_mut().push(format!("w:{entry}"));
        }
    }

    impl Window for GestureProbe {
        fn core(&self) -> &WindowCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut WindowCore {
            &mut self.core
        }

        fn update(&mut self, ctx: &UpdateContext<'_>) {
            update_gesture_window(self, ctx);
        }

        fn pointer_moved(&mut self, old: Point, new: Point) {
            self.record(format!("moved({},{})->({},{})", old.x, old.y, new.x, new.y));
        }

        fn pointer_pressed(&mut self, at: Point, button: crate::core::ui::PointerButton) {
            self.record(format!("pressed {:?} ({},{})", button, at.x, at.y));
        }

        fn pointer_released(&mut self, at: Point, button: crate::core::ui::PointerButton) {
            self.record(format!("released {:?} ({},{})", button, at.x, at.y));
        }
    }

    impl GestureWindow for GestureProbe {
        fn adapter(&self) -> &GestureAdapter {
            &self.adapter
        }

        fn player_entered(&mut self, slot: usize, is_tracked: bool) {
            self.record(format!("entered {slot} {is_tracked}"));
        }

        fn player_exited(&mut self, slot: usize, was_tracked: bool) {
            self.record(format!("exited {slot} {was_tracked}"));
        }

        fn hand_moved(&mut self, _old: Point, new: Point, hand: Hand, slot: usize) {
            self.record(format!("hand moved {hand:?} {slot} ({},{})", new.x, new.y));
        }

        fn hand_grip_begun(&mut self, _at: Point, hand: Hand, slot: usize) {
            self.record(format!("grip begun {hand:?} {slot}"));
        }

        fn hand_grip_ended(&mut self, _at: Point, hand: Hand, slot: usize) {
            self.record(format!("grip ended {hand:?} {slot}"));
        }

        fn hand_pushed(&mut self, _at: Point, hand: Hand, slot: usize) {
            self.record(format!("pushed {hand:?} {slot}"));
        }
    }

    //--- Helpers ----------------------------------------------------------

    fn body(id: u32) -> Skeleton {
        Skeleton::new(id, TrackingState::Tracked)
    }

    fn hand(id: u32, hand: Hand, x: f64, y: f64, event: HandEvent) -> TrackerEvent {
        TrackerEvent::Interaction(InteractionFrame {
            users: vec![UserInfo {
                tracking_id: id,
                hands: vec![HandPointer::new(hand, Point::new(x, y)).with_event(event)],
            }],
        })
    }

    fn feed(tracker: &mut PlayerTracker, events: Vec<TrackerEvent>) {
        let sender = tracker.sender();
        for event in events {
            sender.send(event).unwrap();
        }
        tracker.update(Instant::now());
    }

    fn run(window: &mut GestureProbe, tracker: &PlayerTracker) {
        let input = InputSnapshot::new();
        let ctx = UpdateContext::new(Duration::from_millis(16), &input, Rect::ZERO)
            .with_tracker(tracker);
        window.update(&ctx);
    }

    //=====================================================================
    // Mouse Emulation
    //=====================================================================

    /// Tests that player 0's main hand drives the window and components.
    #[test]
    fn main_hand_emulates_primary_button() {
        let log = new_log();
        let mut window = GestureProbe::new(InteractionMode::MouseOnly, &log);
        window
            .core
            .container_mut()
            .push(Probe::new("a", Rect::new(0.0, 0.0, 10.0, 10.0), &log));
        let mut tracker = PlayerTracker::new(TrackerConfig::new());

        feed(
            &mut tracker,
            vec![
                TrackerEvent::Skeletons(vec![body(1)]),
                hand(1, Hand::Right, 0.5, 0.25, HandEvent::Grip),
            ],
        );
        log.borrow_mut().clear();
        run(&mut window, &tracker);

        assert_eq!(
            *log.borrow(),
            vec![
                "a:update",
                "w:entered 0 true",
                "w:moved(0,0)->(50,25)",
                "a:moved(0,0)->(50,25)",
                "w:pressed Primary (50,25)",
                "a:pressed Primary (50,25)",
            ]
        );
    }

    /// Tests that the other hand's grip is the secondary button.
    #[test]
    fn other_hand_emulates_secondary_button() {
        let log = new_log();
        let mut window = GestureProbe::new(InteractionMode::MouseOnly, &log);
        let mut tracker = PlayerTracker::new(TrackerConfig::new());
        feed(&mut tracker, vec![TrackerEvent::Skeletons(vec![body(1)])]);
        feed(
            &mut tracker,
            vec![hand(1, Hand::Left, 0.0, 0.0, HandEvent::Grip)],
        );
        feed(
            &mut tracker,
            vec![hand(1, Hand::Left, 0.0, 0.0, HandEvent::GripRelease)],
        );

        run(&mut window, &tracker);

        assert_eq!(*log.borrow(), vec!["w:released Secondary (0,0)"]);
    }

    /// Tests that a press held when the player leaves is released.
    #[test]
    fn leaving_player_releases_emulated_press() {
        let log = new_log();
        let mut window = GestureProbe::new(InteractionMode::MouseOnly, &log);
        let mut tracker = PlayerTracker::new(TrackerConfig::new());
        feed(
            &mut tracker,
            vec![
                TrackerEvent::Skeletons(vec![body(1)]),
                hand(1, Hand::Right, 0.5, 0.25, HandEvent::Grip),
            ],
        );
        run(&mut window, &tracker);
        log.borrow_mut().clear();

        feed(&mut tracker, vec![TrackerEvent::Skeletons(vec![])]);
        run(&mut window, &tracker);

        assert_eq!(
            *log.borrow(),
            vec!["w:exited 0 true", "w:released Primary (50,25)"]
        );
    }

    /// Tests that gesture-only mode sends no pointer events.
    #[test]
    fn gesture_only_skips_mouse_emulation() {
        let log = new_log();
        let mut window = GestureProbe::new(InteractionMode::GestureOnly, &log);
        let mut tracker = PlayerTracker::new(TrackerConfig::new());
        feed(&mut tracker, vec![TrackerEvent::Skeletons(vec![body(1)])]);
        feed(
            &mut tracker,
            vec![hand(1, Hand::Right, 0.5, 0.5, HandEvent::Grip)],
        );

        run(&mut window, &tracker);

        assert_eq!(
            *log.borrow(),
            vec!["w:hand moved Right 0 (50,50)", "w:grip begun Right 0"]
        );
    }

    //=====================================================================
    // Gesture Hooks
    //=====================================================================

    /// Tests the entered and exited hooks.
    #[test]
    fn lifecycle_hooks_fire_on_transitions() {
        let log = new_log();
        let mut window = GestureProbe::new(InteractionMode::None, &log);
        let mut tracker = PlayerTracker::new(TrackerConfig::new());

        feed(&mut tracker, vec![TrackerEvent::Skeletons(vec![body(1)])]);
        run(&mut window, &tracker);
        feed(&mut tracker, vec![]);
        run(&mut window, &tracker);
        feed(&mut tracker, vec![TrackerEvent::Skeletons(vec![])]);
        run(&mut window, &tracker);

        assert_eq!(*log.borrow(), vec!["w:entered 0 true", "w:exited 0 true"]);
    }

    /// Tests that gesture hooks reach the window but not its components.
    #[test]
    fn gesture_hooks_do_not_fan_out() {
        let log = new_log();
        let mut window = GestureProbe::new(InteractionMode::GestureOnly, &log);
        window.core.container_mut().push(Probe::new("a", Rect::ZERO, &log));
        let mut tracker = PlayerTracker::new(TrackerConfig::new());
        feed(&mut tracker, vec![TrackerEvent::Skeletons(vec![body(1)])]);
        feed(
            &mut tracker,
            vec![TrackerEvent::Interaction(InteractionFrame {
                users: vec![UserInfo {
                    tracking_id: 1,
                    hands: vec![HandPointer::new(Hand::Left, Point::ZERO).with_press(true, 1.0)],
                }],
            })],
        );
        log.borrow_mut().clear();

        run(&mut window, &tracker);

        assert_eq!(*log.borrow(), vec!["a:update", "w:pushed Left 0"]);
    }

    /// Tests that additional players are polled up to max_players.
    #[test]
    fn second_player_polled_when_configured() {
        let log = new_log();
        let mut window = GestureProbe::new(InteractionMode::None, &log);
        window.adapter = window.adapter.with_max_players(2);
        let mut tracker = PlayerTracker::new(TrackerConfig::new());

        feed(&mut tracker, vec![TrackerEvent::Skeletons(vec![body(1), body(2)])]);
        run(&mut window, &tracker);

        assert_eq!(*log.borrow(), vec!["w:entered 0 true", "w:entered 1 true"]);
    }

    /// Tests that nothing is dispatched without a tracker.
    #[test]
    fn no_tracker_behaves_like_plain_window() {
        let log = new_log();
        let mut window = GestureProbe::new(InteractionMode::Both, &log);
        let input = InputSnapshot::new();

        window.update(&UpdateContext::new(Duration::ZERO, &input, Rect::ZERO));

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn slots_to_poll_is_capped() {
        let tracker = PlayerTracker::new(TrackerConfig::new());
        let adapter = GestureAdapter::new().with_max_players(10);

        assert_eq!(adapter.slots_to_poll(&tracker), MAX_PLAYERS);
        assert_eq!(GestureAdapter::new().slots_to_poll(&tracker), 1);
    }
}
