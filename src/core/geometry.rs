//=========================================================================
// Geometry
//=========================================================================
//
// Screen-space geometry shared by components, windows and the tracker.
//
// Points, sizes and rectangles come from `kurbo`. Screen space has its
// origin at the top-left corner with Y growing downward. Tracker space is
// normalized to 0..1 on both axes and is converted with `map_to_rect`.
//
//=========================================================================

//=== External Dependencies ===============================================

pub use kurbo::{Point, Rect, Size, Vec2};

//=== Color ===============================================================

/// RGBA tint passed to the renderer (each channel 0..=255).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Creates a color from its four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

impl Default for Color {
    /// Defaults to white, which leaves textures untinted.
    fn default() -> Self {
        Self::WHITE
    }
}

//=== Coordinate Mapping ==================================================

/// Maps a normalized tracker coordinate into `target`.
///
/// Computes `target.origin + normalized * target.size`. (0,0) lands on
/// the top-left corner and (1,1) on the bottom-right corner. Values
/// outside 0..1 are not clamped.
///
/// # Examples
///
/// ```
/// use gesture_wnd::core::geometry::{map_to_rect, Point, Rect};
///
/// let target = Rect::new(100.0, 50.0, 500.0, 350.0);
/// assert_eq!(map_to_rect(Point::new(0.5, 0.5), target), Point::new(300.0, 200.0));
/// ```
pub fn map_to_rect(normalized: Point, target: Rect) -> Point {
    Point::new(
        target.x0 + normalized.x * target.width(),
        target.y0 + normalized.y * target.height(),
    )
}

//=========================================================================
// Unit Tests
//=========================================================================
