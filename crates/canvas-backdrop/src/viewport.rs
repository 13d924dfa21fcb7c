//! Viewport for canvas navigation

use serde::{Deserialize, Serialize};

use crate::error::{BackdropError, Result};
use crate::math::{Rect, Vec2};

/// Lower zoom limit used by the editor's zoom clamp
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;

/// Upper zoom limit used by the editor's zoom clamp
pub const DEFAULT_MAX_ZOOM: f64 = 4.0;

/// Viewport onto the infinite canvas
///
/// Supplied by the host on every pan/zoom change. The engine treats it as
/// read-only input. Mapping between spaces is
/// `screen = (world + pan) * zoom`, with pan in world units and screen in
/// device-independent pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Horizontal pan offset (world units)
    pub pan_x: f64,
    /// Vertical pan offset (world units)
    pub pan_y: f64,
    /// Zoom level (1.0 = 100%, 0.5 = zoomed out, 2.0 = zoomed in)
    pub zoom: f64,
    /// Visible width in device-independent pixels
    pub pixel_width: u32,
    /// Visible height in device-independent pixels
    pub pixel_height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
            pixel_width: 1920,
            pixel_height: 1080,
        }
    }
}

impl Viewport {
    /// Create a viewport at the origin, zoom 1
    pub fn new(pixel_width: u32, pixel_height: u32) -> Self {
        Self {
            pixel_width,
            pixel_height,
            ..Self::default()
        }
    }

    /// Builder-style pan setter
    pub fn with_pan(mut self, pan_x: f64, pan_y: f64) -> Self {
        self.pan_x = pan_x;
        self.pan_y = pan_y;
        self
    }

    /// Builder-style zoom setter
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Reject values that would produce NaN geometry
    ///
    /// `log2(zoom)` is undefined for zoom <= 0, so zoom must be a finite
    /// positive number; pan must be finite.
    pub fn validate(&self) -> Result<()> {
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(BackdropError::viewport(format!(
                "zoom must be finite and > 0, got {}",
                self.zoom
            )));
        }
        if !self.pan_x.is_finite() || !self.pan_y.is_finite() {
            return Err(BackdropError::viewport(format!(
                "pan must be finite, got ({}, {})",
                self.pan_x, self.pan_y
            )));
        }
        Ok(())
    }

    /// True when there is nothing to draw into
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixel_width == 0 || self.pixel_height == 0
    }

    /// Clamp zoom into `[min, max]`
    #[inline]
    pub fn clamp_zoom(&mut self, min: f64, max: f64) {
        self.zoom = self.zoom.clamp(min, max);
    }

    /// Convert world coordinates to screen coordinates
    #[inline]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(
            (world.x + self.pan_x) * self.zoom,
            (world.y + self.pan_y) * self.zoom,
        )
    }

    /// Convert screen coordinates to world coordinates
    #[inline]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / self.zoom - self.pan_x,
            screen.y / self.zoom - self.pan_y,
        )
    }

    /// Pan the viewport by a drag delta given in screen pixels
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx / self.zoom;
        self.pan_y += dy / self.zoom;
    }

    /// Zoom around an anchor point (in screen coordinates), clamped
    ///
    /// The world point under the anchor stays under the anchor.
    pub fn zoom_at(&mut self, factor: f64, anchor_x: f64, anchor_y: f64, min: f64, max: f64) {
        let anchor_screen = Vec2::new(anchor_x, anchor_y);
        let anchor_world = self.screen_to_world(anchor_screen);

        self.zoom = (self.zoom * factor).clamp(min, max);

        self.pan_x = anchor_screen.x / self.zoom - anchor_world.x;
        self.pan_y = anchor_screen.y / self.zoom - anchor_world.y;
    }

    /// Visible world-space rectangle
    pub fn visible_world_rect(&self) -> Rect {
        let top_left = self.screen_to_world(Vec2::ZERO);
        Rect::new(
            top_left.x,
            top_left.y,
            self.pixel_width as f64 / self.zoom,
            self.pixel_height as f64 / self.zoom,
        )
    }
}
