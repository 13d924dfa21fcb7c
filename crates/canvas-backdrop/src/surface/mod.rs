//! Abstract 2D drawing surface
//!
//! The engine issues canvas-style immediate-mode calls in screen pixels.
//! Hosts implement [`DrawSurface`] for their medium:
//!
//! - [`RecordingSurface`]: captures painted paths (tests, previews)
//! - [`svg::render_svg`]: turns a recording into an SVG document
//! - `CanvasSurface` (feature `wasm`): forwards to `CanvasRenderingContext2d`

mod recording;
pub mod svg;

#[cfg(feature = "wasm")]
mod canvas;
#[cfg(feature = "wasm")]
pub use canvas::CanvasSurface;

pub use recording::{PaintKind, PaintedPath, PathSegment, RecordingSurface};

use std::f64::consts::TAU;

use crate::math::{Rgba, Vec2};

/// Immediate-mode 2D drawing target, coordinates in screen pixels
pub trait DrawSurface {
    /// Reset the whole surface, optionally flood-filling it
    fn clear(&mut self, width: f64, height: f64, background: Option<Rgba>);

    /// Color used by [`DrawSurface::fill`]
    fn set_fill(&mut self, color: Rgba);

    /// Color used by [`DrawSurface::stroke`]
    fn set_stroke(&mut self, color: Rgba);

    /// Stroke width in pixels
    fn set_line_width(&mut self, width: f64);

    /// Global alpha multiplied into every following paint
    fn set_alpha(&mut self, alpha: f32);

    /// Start a new, empty path
    fn begin_path(&mut self);

    /// Start a new sub-path at `p`
    fn move_to(&mut self, p: Vec2);

    /// Straight segment to `p`
    fn line_to(&mut self, p: Vec2);

    /// Cubic Bezier segment to `to`
    fn bezier_to(&mut self, c1: Vec2, c2: Vec2, to: Vec2);

    /// Circular arc, angles in radians, clockwise in screen space
    fn arc(&mut self, center: Vec2, radius: f64, start: f64, end: f64);

    /// Close the current sub-path
    fn close_path(&mut self);

    /// Fill the current path
    fn fill(&mut self);

    /// Stroke the current path
    fn stroke(&mut self);

    /// Append a full circle as its own sub-path
    ///
    /// Starts with a `move_to` so batched circles are not joined by lines.
    fn circle(&mut self, center: Vec2, radius: f64) {
        self.move_to(Vec2::new(center.x + radius, center.y));
        self.arc(center, radius, 0.0, TAU);
    }

    /// Append an open polyline as its own sub-path
    fn polyline(&mut self, points: &[Vec2]) {
        if let Some((first, rest)) = points.split_first() {
            self.move_to(*first);
            for p in rest {
                self.line_to(*p);
            }
        }
    }

    /// Append a closed polygon as its own sub-path
    fn polygon(&mut self, points: &[Vec2]) {
        if points.len() >= 2 {
            self.polyline(points);
            self.close_path();
        }
    }
}
