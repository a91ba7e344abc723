//=========================================================================
// Desktop
//
// Root of a running window tree.
//
// Architecture:
// ```text
//     DesktopBuilder  ──build()──>  Desktop  ──run(renderer)──>  [winit loop]
//         │                           │
//         ├─ with_title()             ├─ update(dt)  once per redraw
//         ├─ with_size()              │    1. drain platform events
//         ├─ with_channel_capacity()  │    2. refresh InputSnapshot
//         ├─ with_tracker()           │    3. PlayerTracker::update
//         └─ with_audio()             │    4. root.update(ctx)
//                                     │    5. route leftover commands
//                                     └─ draw(renderer)
// ```
//
// The desktop owns the only input snapshot and the only tracker; windows
// borrow both through the frame's `UpdateContext`.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Sender};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

//=== Internal Dependencies ===============================================

use crate::core::context::UpdateContext;
use crate::core::geometry::{Point, Rect, Size};
use crate::core::input::InputSnapshot;
use crate::core::platform_bridge::{EventCollector, PlatformError, PlatformEvent, TickControl};
use crate::core::services::{Renderer, SharedAudio};
use crate::core::tracking::PlayerTracker;
use crate::core::window::{Window, WindowCommand, WindowGroup};
use crate::platform::Platform;

//=== DesktopBuilder ======================================================

/// Builder for configuring and constructing a [`Desktop`].
///
/// # Default Values
///
/// - **Title**: "Desktop"
/// - **Size**: 800 x 600
/// - **Channel capacity**: 128 events
/// - no tracker, no audio
///
/// # Examples
///
/// ```no_run
/// use gesture_wnd::prelude::*;
///
/// # struct NullRenderer;
/// # impl Renderer for NullRenderer {
/// #     fn begin(&mut self) {}
/// #     fn end(&mut self) {}
/// #     fn draw_texture(&mut self, _: TextureId, _: Rect, _: Option<Rect>, _: Color, _: f64, _: Point) {}
/// #     fn draw_text(&mut self, _: FontId, _: &str, _: Point, _: Color) {}
/// #     fn measure_text(&self, _: FontId, _: &str) -> Size { Size::ZERO }
/// # }
/// let tracker = PlayerTracker::new(TrackerConfig::new().with_player_detection(true));
///
/// DesktopBuilder::new()
///     .with_title("Arcade")
///     .with_size(1280.0, 720.0)
///     .with_tracker(tracker)
///     .build()
///     .run(NullRenderer)?;
/// # Ok::<(), PlatformError>(())
/// ```
pub struct DesktopBuilder {
    title: String,
    size: Size,
    channel_capacity: usize,
    tracker: Option<PlayerTracker>,
    audio: Option<SharedAudio>,
}

impl DesktopBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Desktop".to_string(),
            size: Size::new(800.0, 600.0),
            channel_capacity: 128,
            tracker: None,
            audio: None,
        }
    }

    /// Sets the OS window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the logical size of the OS window and the root group.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "Desktop size must be positive, got {}x{}",
            width,
            height
        );
        self.size = Size::new(width, height);
        self
    }

    /// Sets the channel capacity for platform → desktop communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Attaches a player tracker. It is started by [`build`](Self::build).
    pub fn with_tracker(mut self, tracker: PlayerTracker) -> Self {
        self.tracker = Some(tracker);
        self
    }

    /// Shares an audio service with every window in the tree.
    pub fn with_audio(mut self, audio: SharedAudio) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Builds the desktop with an empty root group covering the display.
    pub fn build(self) -> Desktop {
        info!(
            "Building desktop '{}' ({}x{}, channel: {}, tracker: {})",
            self.title,
            self.size.width,
            self.size.height,
            self.channel_capacity,
            self.tracker.is_some()
        );

        let (sender, receiver) = bounded(self.channel_capacity);
        let display = Rect::from_origin_size(Point::ZERO, self.size);

        let mut root = WindowGroup::new(display);
        if self.audio.is_some() {
            root.set_audio(self.audio);
        }

        let mut tracker = self.tracker;
        if let Some(tracker) = tracker.as_mut() {
            tracker.start();
        }

        Desktop {
            title: self.title,
            display,
            root,
            input: InputSnapshot::new(),
            collector: EventCollector::new(receiver),
            platform_sender: sender,
            tracker,
        }
    }
}

impl Default for DesktopBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Desktop =============================================================

/// A running window tree with its input and tracking state.
///
/// Create via [`DesktopBuilder`], add windows to [`root_mut`](Self::root_mut)
/// and call [`run`](Self::run), or drive [`update`](Self::update) and
/// [`draw`](Self::draw) from a host loop.
pub struct Desktop {
    title: String,
    display: Rect,
    root: WindowGroup,
    input: InputSnapshot,
    collector: EventCollector,
    platform_sender: Sender<PlatformEvent>,
    tracker: Option<PlayerTracker>,
}

impl Desktop {
    //--- Accessors --------------------------------------------------------

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Screen rectangle of the OS window.
    pub fn display(&self) -> Rect {
        self.display
    }

    /// Resizes the display and the root group.
    pub fn set_display(&mut self, display: Rect) {
        debug!(target: "window", "Display resized to {:?}", display.size());
        self.display = display;
        self.root.core_mut().set_rect(display);
    }

    pub fn root(&self) -> &WindowGroup {
        &self.root
    }

    /// Root group. Windows pushed here join at the end of the next update.
    pub fn root_mut(&mut self) -> &mut WindowGroup {
        &mut self.root
    }

    /// Input state of the last update.
    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    pub fn tracker(&self) -> Option<&PlayerTracker> {
        self.tracker.as_ref()
    }

    pub fn tracker_mut(&mut self) -> Option<&mut PlayerTracker> {
        self.tracker.as_mut()
    }

    /// Sender the platform layer feeds input batches into.
    pub(crate) fn platform_sender(&self) -> Sender<PlatformEvent> {
        self.platform_sender.clone()
    }

    //--- Frame ------------------------------------------------------------

    /// Runs one frame of input, tracking and window updates.
    ///
    /// Returns [`TickControl::Exit`] once the platform reports the window
    /// closed; the tree is not updated on that frame.
    pub fn update(&mut self, dt: Duration) -> TickControl {
        if self.collector.collect_frame() == TickControl::Exit {
            info!("Desktop closing");
            return TickControl::Exit;
        }

        self.input.refresh(self.collector.batches());
        if let Some(tracker) = self.tracker.as_mut() {
            tracker.update(Instant::now());
        }

        let mut ctx = UpdateContext::new(dt, &self.input, self.display);
        if let Some(tracker) = self.tracker.as_ref() {
            ctx = ctx.with_tracker(tracker);
        }

        self.root.update(&ctx);
        let leftovers = ctx.into_commands();
        self.route_leftovers(leftovers);

        TickControl::Continue
    }

    /// Draws the whole tree inside one render batch.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        self.root.draw(renderer);
    }

    /// Opens the OS window and runs until it closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the winit event loop cannot be created
    /// or stops with an error.
    pub fn run<R: Renderer + 'static>(self, renderer: R) -> Result<(), PlatformError> {
        info!("Starting desktop '{}'", self.title);
        Platform::new(self, renderer).run()
    }

    /// Closes every window and stops the tracking device.
    pub fn shutdown(&mut self) {
        self.root.on_closing();
        if let Some(tracker) = self.tracker.as_mut() {
            tracker.shutdown();
        }
        info!("Desktop shutdown complete");
    }

    // Commands addressed to windows whose group committed before the
    // command was posted. They apply at that group's next commit.
    fn route_leftovers(&mut self, commands: Vec<WindowCommand>) {
        for command in commands {
            if let Err(command) = self.root.deliver(command) {
                warn!(target: "window", "No window group owns {:?}, dropping", command);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
