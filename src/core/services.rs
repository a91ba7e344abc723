//=========================================================================
// External Services
//=========================================================================
//
// Narrow interfaces to the collaborators the toolkit does not implement:
// the sprite renderer, the content loader and the audio service.
//
// Architecture:
// ```text
//   Desktop::draw ──► WindowGroup ──► Window ──► Component
//                          │                        │
//                          └──── &mut dyn Renderer ─┘
//
//   WindowGroup (root) ──update()──► SharedAudio
// ```
//
// Handles (`TextureId`, `FontId`, `SoundId`) are opaque numbers issued by
// the host. The toolkit never inspects them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::geometry::{Color, Point, Rect, Size};

//=== Handles =============================================================

/// Opaque texture handle issued by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Opaque font handle issued by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

/// Opaque sound handle issued by the host audio backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(pub u32);

//=== Renderer ============================================================

/// Sprite batch renderer.
///
/// Only the root window group calls [`begin`](Self::begin) and
/// [`end`](Self::end); everything below it draws inside that batch.
pub trait Renderer {
    /// Opens the render batch for this frame.
    fn begin(&mut self);

    /// Closes the render batch for this frame.
    fn end(&mut self);

    /// Draws `texture` (or the `source` region of it) stretched over `dest`.
    fn draw_texture(
        &mut self,
        texture: TextureId,
        dest: Rect,
        source: Option<Rect>,
        tint: Color,
        rotation: f64,
        origin: Point,
    );

    /// Draws a single line of text with its top-left corner at `position`.
    fn draw_text(&mut self, font: FontId, text: &str, position: Point, color: Color);

    /// Measures the extent `text` would occupy when drawn with `font`.
    fn measure_text(&self, font: FontId, text: &str) -> Size;

    /// Draws a whole texture over `dest` with no tint or rotation.
    fn draw_sprite(&mut self, texture: TextureId, dest: Rect) {
        self.draw_texture(texture, dest, None, Color::WHITE, 0.0, Point::ZERO);
    }
}

//=== ContentLoader =======================================================

/// Synchronous asset loader. Missing assets yield `None`.
pub trait ContentLoader {
    fn load_texture(&mut self, name: &str) -> Option<TextureId>;
    fn load_font(&mut self, name: &str) -> Option<FontId>;
    fn load_sound(&mut self, name: &str) -> Option<SoundId>;
}

//=== AudioService ========================================================

/// Playback control over the current track.
///
/// Track selection (sequential, random, repeat) belongs to the
/// implementation. The root window group calls [`update`](Self::update)
/// once per frame.
pub trait AudioService {
    fn play(&mut self, sound: SoundId);
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
    fn volume(&self) -> f32;
    fn set_muted(&mut self, muted: bool);
    fn is_muted(&self) -> bool;

    /// Advances playback state (track end detection, fades).
    fn update(&mut self);
}

/// Audio service handle shared by every window in a tree.
pub type SharedAudio = Rc<RefCell<dyn AudioService>>;

//=========================================================================
// Test Doubles
//=========================================================================

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// One recorded renderer call.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum DrawCall {
        Begin,
        End,
        Texture(TextureId, Rect),
        Text(String, Point),
    }

    /// Renderer that records every call in order.
    #[derive(Default)]
    pub(crate) struct RecordingRenderer {
        pub(crate) calls: Vec<DrawCall>,
    }

    impl Renderer for RecordingRenderer {
        fn begin(&mut self) {
            self.calls.push(DrawCall::Begin);
        }

        fn end(&mut self) {
            self.calls.push(DrawCall::End);
        }

        fn draw_texture(
            &mut self,
            texture: TextureId,
            dest: Rect,
            _source: Option<Rect>,
            _tint: Color,
            _rotation: f64,
            _origin: Point,
        ) {
            self.calls.push(DrawCall::Texture(texture, dest));
        }

        fn draw_text(&mut self, _font: FontId, text: &str, position: Point, _color: Color) {
            self.calls.push(DrawCall::Text(text.to_string(), position));
        }

        /// Every glyph is 10x20.
        fn measure_text(&self, _font: FontId, text: &str) -> Size {
            Size::new(text.chars().count() as f64 * 10.0, 20.0)
        }
    }

    /// Audio service counting `update` calls.
    #[derive(Default)]
    pub(crate) struct CountingAudio {
        pub(crate) updates: usize,
        pub(crate) playing: Option<SoundId>,
        volume: f32,
        muted: bool,
    }

    impl AudioService for CountingAudio {
        fn play(&mut self, sound: SoundId) {
            self.playing = Some(sound);
        }

        fn stop(&mut self) {
            self.playing = None;
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume;
        }

        fn volume(&self) -> f32 {
            self.volume
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn is_muted(&self) -> bool {
            self.muted
        }

        fn update(&mut self) {
            self.updates += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    /// Tests that draw_sprite forwards an untinted, unrotated draw.
    #[test]
    fn draw_sprite_forwards_to_draw_texture() {
        let mut renderer = RecordingRenderer::default();
        let dest = Rect::new(0.0, 0.0, 32.0, 32.0);

        renderer.draw_sprite(TextureId(7), dest);

        assert_eq!(renderer.calls, vec![DrawCall::Texture(TextureId(7), dest)]);
    }

    /// Tests that a shared audio handle observes updates from any holder.
    #[test]
    fn shared_audio_is_shared() {
        let audio = Rc::new(RefCell::new(CountingAudio::default()));
        let shared: SharedAudio = audio.clone();

        shared.borrow_mut().update();
        shared.borrow_mut().play(SoundId(3));

        assert_eq!(audio.borrow().updates, 1);
        assert_eq!(audio.borrow().playing, Some(SoundId(3)));
    }
}
