//=========================================================================
// Platform Subsystem
//
// Drives a `Desktop` from the winit event loop.
//
// Architecture:
// ```text
//  Main Thread
//  ┌────────────────────────────────────────────────────────────┐
//  │  Winit Event Loop                                          │
//  │   ↓                                                        │
//  │  InputProcessor   (winit → InputEvent, sticky modifiers)   │
//  │   ↓                                                        │
//  │  InputBuffer      (discrete in order, motion coalesced)    │
//  │   ↓                                                        │
//  │  RedrawRequested ── flush ──► channel ──► Desktop::update  │
//  │                                           Desktop::draw    │
//  └────────────────────────────────────────────────────────────┘
// ```
//
// Frame boundary: `RedrawRequested`. All input buffered since the last
// redraw is sent as one batch, then the desktop runs one frame and the
// next redraw is requested. Empty buffers are not sent.
//
// The desktop still reads input through the bounded channel even though
// both ends live on the main thread, so input delivery stays identical
// for hosts that drive `Desktop::update` themselves.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::{debug, error, info, trace, warn};
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window as OsWindow, WindowAttributes, WindowId as OsWindowId},
};

//=== Internal Imports ====================================================

use crate::core::geometry::{Point, Rect, Size};
use crate::core::platform_bridge::{PlatformError, PlatformEvent, TickControl};
use crate::core::services::Renderer;
use crate::desktop::Desktop;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// OS window owner and frame driver.
///
/// Must run on the main thread (winit requirement on macOS/iOS).
pub(crate) struct Platform<R: Renderer> {
    /// Created lazily in `resumed()`.
    window: Option<OsWindow>,

    buffer: InputBuffer,
    input_processor: InputProcessor,
    event_sender: Sender<PlatformEvent>,

    desktop: Desktop,
    renderer: R,
    last_frame: Option<Instant>,
}

impl<R: Renderer> Platform<R> {
    //--- Construction -----------------------------------------------------

    /// Wraps `desktop`. The OS window is created in `resumed()`.
    pub(crate) fn new(desktop: Desktop, renderer: R) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            buffer: InputBuffer::new(),
            input_processor: InputProcessor::new(),
            event_sender: desktop.platform_sender(),
            desktop,
            renderer,
            last_frame: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends the buffered input as one `Inputs` message.
    ///
    /// A full or disconnected channel drops the batch with a warning.
    fn flush_input_buffer(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return;
        };

        let (discrete_count, continuous_count) = (discrete.len(), continuous.len());
        trace!(
            target: "platform::input",
            "Flushing {} discrete + {} continuous events",
            discrete_count,
            continuous_count
        );

        if self
            .event_sender
            .try_send(PlatformEvent::Inputs { discrete, continuous })
            .is_err()
        {
            warn!(
                target: "platform::input",
                "Channel unavailable, dropping {} discrete + {} continuous events",
                discrete_count,
                continuous_count
            );
        }
    }

    /// One desktop frame. Returns `Exit` when the desktop is done.
    fn frame(&mut self) -> TickControl {
        let now = Instant::now();
        let dt = self.last_frame.map_or_else(Default::default, |last| now - last);
        self.last_frame = Some(now);

        if self.desktop.update(dt) == TickControl::Exit {
            return TickControl::Exit;
        }
        self.desktop.draw(&mut self.renderer);
        TickControl::Continue
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.notify_closed();
        event_loop.exit();
    }

    /// Tells the desktop the window is gone. Returns `false` if the
    /// channel could not take the message.
    fn notify_closed(&self) -> bool {
        match self.event_sender.try_send(PlatformEvent::WindowClosed) {
            Ok(()) => true,
            Err(e) => {
                warn!(target: "platform", "Close notification not delivered: {}", e);
                false
            }
        }
    }
}

//=== Winit Integration ===================================================

impl<R: Renderer> ApplicationHandler for Platform<R> {
    /// Creates the window on first resume (mobile may resume repeatedly).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let display = self.desktop.display();
        let attrs = WindowAttributes::default()
            .with_title(self.desktop.title())
            .with_inner_size(LogicalSize::new(display.width(), display.height()));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.close(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: OsWindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.close(event_loop);
            }

            WindowEvent::Resized(size) => {
                let display = Rect::from_origin_size(
                    Point::ZERO,
                    Size::new(f64::from(size.width), f64::from(size.height)),
                );
                self.desktop.set_display(display);
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", modifiers);
                self.input_processor.set_modifiers(modifiers.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.buffer.push(self.input_processor.cursor(position));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                match self.input_processor.key(event.physical_key, event.state, event.repeat) {
                    Some(input) => self.buffer.push(input),
                    None => trace!(target: "platform::input", "Key event ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.buffer.push(self.input_processor.button(button, state));
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();

                if self.frame() == TickControl::Exit {
                    event_loop.exit();
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.desktop.shutdown();
        info!(target: "platform", "Event loop exiting");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, Modifiers};
    use crate::core::services::testing::{DrawCall, RecordingRenderer};
    use crate::desktop::DesktopBuilder;

    fn platform() -> Platform<RecordingRenderer> {
        Platform::new(DesktopBuilder::new().build(), RecordingRenderer::default())
    }

    fn space() -> InputEvent {
        InputEvent::KeyDown { key: KeyCode::Space, modifiers: Modifiers::NONE }
    }

    #[test]
    fn window_is_created_lazily() {
        assert!(platform().window.is_none());
    }

    /// Tests that flushed input is visible to the next desktop frame.
    #[test]
    fn flushed_input_reaches_desktop() {
        let mut platform = platform();
        platform.buffer.push(space());

        platform.flush_input_buffer();
        assert_eq!(platform.frame(), TickControl::Continue);

        assert!(platform.desktop.input().is_key_pressed(KeyCode::Space));
        assert_eq!(platform.renderer.calls, vec![DrawCall::Begin, DrawCall::End]);
    }

    /// Tests that an empty buffer sends nothing.
    #[test]
    fn flush_empty_buffer_is_noop() {
        let mut platform = platform();

        platform.flush_input_buffer();
        platform.frame();

        assert!(!platform.desktop.input().is_key_down(KeyCode::Space));
    }

    /// Tests that a close notification stops the next frame and skips drawing.
    #[test]
    fn window_closed_stops_frames() {
        let mut platform = platform();
        platform.event_sender.try_send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(platform.frame(), TickControl::Exit);
        assert!(platform.renderer.calls.is_empty());
    }

    /// Tests that the close notification reaches the desktop.
    #[test]
    fn notify_closed_stops_desktop() {
        let mut platform = platform();

        assert!(platform.notify_closed());
        assert_eq!(platform.frame(), TickControl::Exit);
    }

    /// Tests that a full channel reports the undelivered close notification.
    #[test]
    fn notify_closed_on_full_channel_reports_failure() {
        let desktop = DesktopBuilder::new().with_channel_capacity(1).build();
        let platform = Platform::new(desktop, RecordingRenderer::default());
        platform.event_sender.try_send(PlatformEvent::WindowClosed).unwrap();

        assert!(!platform.notify_closed());
    }

    /// Tests that a full channel drops the batch instead of blocking.
    #[test]
    fn full_channel_drops_batch() {
        let desktop = DesktopBuilder::new().with_channel_capacity(1).build();
        let mut platform = Platform::new(desktop, RecordingRenderer::default());

        platform.buffer.push(space());
        platform.flush_input_buffer();
        platform.buffer.push(InputEvent::MouseMoved { x: 1.0, y: 1.0 });
        platform.flush_input_buffer();

        assert!(platform.buffer.is_empty());
        platform.frame();
        assert_eq!(platform.desktop.input().cursor(), Point::ZERO);
    }
}
