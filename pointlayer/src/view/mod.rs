//! Orthographic view state.
//!
//! The host of the original demo owns a camera over the flat world: a
//! target point plus a fractional zoom, where `scale = 2^zoom` maps world
//! units to pixels. Here the camera is an explicit value type; a
//! [`Viewport`] pairs it with a pixel-sized output surface and derives the
//! visible world rectangle and the integer tile zoom.

use crate::geom::{BoundingBox, Position};

/// Camera state: where the view is centered and how far it is zoomed.
///
/// Zoom is fractional and typically negative for this demo (the initial
/// state is `target (13000, 13000), zoom -7`, showing the whole world).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// World-space point at the center of the view.
    pub target: Position,
    /// Fractional zoom; `scale = 2^zoom` pixels per world unit.
    pub zoom: f64,
}

impl ViewState {
    /// Create a new view state.
    pub fn new(target: Position, zoom: f64) -> Self {
        Self { target, zoom }
    }

    /// Pixels per world unit at this zoom.
    pub fn scale(&self) -> f64 {
        self.zoom.exp2()
    }
}

impl Default for ViewState {
    fn default() -> Self {
        // Whole-world view of the 24000-unit demo world.
        Self::new(Position::new(13_000.0, 13_000.0), -7.0)
    }
}

/// A view state projected onto a pixel surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Camera state.
    pub view: ViewState,
    /// Surface width in pixels.
    pub width_px: u32,
    /// Surface height in pixels.
    pub height_px: u32,
}

impl Viewport {
    /// Create a viewport from a view state and surface dimensions.
    pub fn new(view: ViewState, width_px: u32, height_px: u32) -> Self {
        Self {
            view,
            width_px,
            height_px,
        }
    }

    /// The world-space rectangle visible through this viewport.
    pub fn visible_bounds(&self) -> BoundingBox {
        let scale = self.view.scale();
        let half_w = self.width_px as f64 / (2.0 * scale);
        let half_h = self.height_px as f64 / (2.0 * scale);
        BoundingBox::new(
            self.view.target.x - half_w,
            self.view.target.x + half_w,
            self.view.target.y - half_h,
            self.view.target.y + half_h,
        )
    }

    /// Integer tile zoom for this viewport, clamped to `[min_zoom, max_zoom]`.
    ///
    /// The fractional camera zoom is rounded to the nearest pyramid level,
    /// matching how the original host picks its tile level.
    pub fn tile_zoom(&self, min_zoom: i32, max_zoom: i32) -> i32 {
        (self.view.zoom.round() as i32).clamp(min_zoom, max_zoom)
    }
}
