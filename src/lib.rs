//=========================================================================
// Gesture Wnd: Library Root
//
// A retained-mode window and component toolkit where mouse input and
// tracked hand gestures reach windows through the same dispatch path.
//
// Responsibilities:
// - Expose the window tree (`core::window`) and its components
//   (`core::ui`)
// - Expose the player tracker (`core::tracking`) and the gesture adapter
//   that turns hands into window events (`core::gesture`)
// - Keep the winit integration (`platform`) hidden behind `Desktop`
//
// Typical usage:
// ```no_run
// use gesture_wnd::prelude::*;
//
// fn main() -> Result<(), PlatformError> {
//     let mut desktop = DesktopBuilder::new().with_title("Arcade").build();
//     desktop.root_mut().push(MyWindow::new());
//     desktop.run(MyRenderer::new())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds everything that runs on the frame loop. `desktop` owns a
// running tree and drives it from the OS window.
//
pub mod core;
pub mod desktop;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit event loop and input translation. It is
// not part of the public API surface.
//
mod platform;

//--- Public Exports ------------------------------------------------------

pub use desktop::{Desktop, DesktopBuilder};
