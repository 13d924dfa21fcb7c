//! Stick figures for the fine tier
//!
//! A figure is a filled head and two filled body triangles plus four
//! limb strokes. All geometry is authored in world units around the
//! figure's base point and scaled by the figure scale; the viewport maps
//! it to the screen.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;
use crate::noise::JitterStream;
use crate::surface::DrawSurface;
use crate::viewport::Viewport;

/// World length covered by one wobble segment of a limb
pub const SKETCH_SEGMENT_LENGTH: f64 = 5.0;

/// Upper bound on wobble segments per limb
pub const MAX_SKETCH_SEGMENTS: usize = 8;

/// Peak wobble offset in world units
pub const SKETCH_WOBBLE: f64 = 1.0;

/// Limb stroke width in world units
pub const LIMB_WIDTH: f64 = 1.5;

const HEAD_Y: f64 = -15.0;
const HEAD_RADIUS: f64 = 3.0;

/// What a figure is doing; only the limbs differ
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureAction {
    Standing,
    Walking,
    Sitting,
}

impl FigureAction {
    /// Limb segments relative to the base point, at scale 1
    ///
    /// Order: left arm, right arm, left leg, right leg.
    fn limbs(self) -> [(Vec2, Vec2); 4] {
        const L_SHOULDER: Vec2 = Vec2::new(-4.0, -8.0);
        const R_SHOULDER: Vec2 = Vec2::new(4.0, -8.0);
        const L_HIP: Vec2 = Vec2::new(-3.0, 8.0);
        const R_HIP: Vec2 = Vec2::new(3.0, 8.0);

        match self {
            FigureAction::Standing => [
                (L_SHOULDER, Vec2::new(-8.0, -2.0)),
                (R_SHOULDER, Vec2::new(8.0, -2.0)),
                (L_HIP, Vec2::new(-4.0, 18.0)),
                (R_HIP, Vec2::new(4.0, 18.0)),
            ],
            FigureAction::Walking => [
                (L_SHOULDER, Vec2::new(-10.0, -5.0)),
                (R_SHOULDER, Vec2::new(10.0, -12.0)),
                (L_HIP, Vec2::new(-6.0, 18.0)),
                (R_HIP, Vec2::new(2.0, 18.0)),
            ],
            // Arms rest, legs fold out sideways
            FigureAction::Sitting => [
                (L_SHOULDER, Vec2::new(-8.0, -2.0)),
                (R_SHOULDER, Vec2::new(8.0, -2.0)),
                (L_HIP, Vec2::new(-9.0, 10.0)),
                (R_HIP, Vec2::new(9.0, 10.0)),
            ],
        }
    }
}

/// One placed figure in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Figure {
    /// Base point (waist) in world units
    pub base: Vec2,
    pub scale: f64,
    pub action: FigureAction,
}

impl Figure {
    pub fn new(base: Vec2, scale: f64, action: FigureAction) -> Self {
        Self {
            base,
            scale,
            action,
        }
    }

    #[inline]
    fn at(&self, local: Vec2) -> Vec2 {
        self.base + local * self.scale
    }

    /// Head center in world units
    pub fn head(&self) -> Vec2 {
        self.at(Vec2::new(0.0, HEAD_Y))
    }

    /// Limb segments in world units
    pub fn limbs(&self) -> [(Vec2, Vec2); 4] {
        self.action.limbs().map(|(a, b)| (self.at(a), self.at(b)))
    }

    /// Append head and torso to the current (fill) path
    pub fn fill_body<S: DrawSurface + ?Sized>(&self, surface: &mut S, viewport: &Viewport) {
        let screen = |local: Vec2| viewport.world_to_screen(self.at(local));

        surface.circle(
            viewport.world_to_screen(self.head()),
            HEAD_RADIUS * self.scale * viewport.zoom,
        );
        surface.polygon(&[
            screen(Vec2::new(0.0, -10.0)),
            screen(Vec2::new(-5.0, -2.0)),
            screen(Vec2::new(5.0, -2.0)),
        ]);
        surface.polygon(&[
            screen(Vec2::new(0.0, -2.0)),
            screen(Vec2::new(-6.0, 8.0)),
            screen(Vec2::new(6.0, 8.0)),
        ]);
    }

    /// Append the four limbs to the current (stroke) path
    pub fn stroke_limbs<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        viewport: &Viewport,
        jitter: &mut JitterStream,
    ) {
        for (from, to) in self.limbs() {
            sketchy_line(surface, viewport, from, to, jitter);
        }
    }
}

/// Number of wobble segments for a limb of `length` world units
#[inline]
pub fn sketch_segments(length: f64) -> usize {
    let n = (length / SKETCH_SEGMENT_LENGTH).floor();
    if n.is_finite() && n >= 1.0 {
        (n as usize).min(MAX_SKETCH_SEGMENTS)
    } else {
        1
    }
}

/// Hand-drawn line between two world points
///
/// Interior and end vertices are nudged by the cosmetic jitter stream; the
/// start vertex is exact.
pub fn sketchy_line<S: DrawSurface + ?Sized>(
    surface: &mut S,
    viewport: &Viewport,
    from: Vec2,
    to: Vec2,
    jitter: &mut JitterStream,
) {
    let segments = sketch_segments(from.distance(to));
    surface.move_to(viewport.world_to_screen(from));
    for i in 1..=segments {
        let t = i as f64 / segments as f64;
        let wobble = Vec2::new(jitter.offset(SKETCH_WOBBLE), jitter.offset(SKETCH_WOBBLE));
        surface.line_to(viewport.world_to_screen(Vec2::lerp(from, to, t) + wobble));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{PathSegment, RecordingSurface};

    #[test]
    fn test_sketch_segments() {
        assert_eq!(sketch_segments(0.0), 1);
        assert_eq!(sketch_segments(4.9), 1);
        assert_eq!(sketch_segments(10.0), 2);
        assert_eq!(sketch_segments(1e9), MAX_SKETCH_SEGMENTS);
        assert_eq!(sketch_segments(f64::NAN), 1);
    }

    #[test]
    fn test_sketchy_line_without_jitter_is_straight() {
        let viewport = Viewport::new(100, 100);
        let mut surface = RecordingSurface::new();
        let mut jitter = JitterStream::off();
        surface.begin_path();
        sketchy_line(
            &mut surface,
            &viewport,
            Vec2::ZERO,
            Vec2::new(20.0, 0.0),
            &mut jitter,
        );
        surface.stroke();

        let segments = &surface.paths()[0].segments;
        assert_eq!(segments.len(), 5);
        for seg in segments {
            if let PathSegment::LineTo(p) = seg {
                assert!(p.y.abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_sketchy_line_wobble_bounded() {
        let viewport = Viewport::new(100, 100).with_zoom(2.0);
        let mut surface = RecordingSurface::new();
        let mut jitter = JitterStream::seeded(9);
        surface.begin_path();
        sketchy_line(
            &mut surface,
            &viewport,
            Vec2::ZERO,
            Vec2::new(0.0, 30.0),
            &mut jitter,
        );
        surface.stroke();

        for p in surface.paths()[0].points() {
            // one world unit of wobble is two pixels at zoom 2
            assert!(p.x.abs() <= 2.0 + 1e-9);
        }
    }

    #[test]
    fn test_figure_scale_and_head() {
        let figure = Figure::new(Vec2::new(100.0, 50.0), 0.9, FigureAction::Standing);
        let head = figure.head();
        assert!((head.x - 100.0).abs() < 1e-12);
        assert!((head.y - (50.0 - 13.5)).abs() < 1e-12);
    }

    #[test]
    fn test_actions_share_shoulders_differ_in_limbs() {
        let standing = FigureAction::Standing.limbs();
        let walking = FigureAction::Walking.limbs();
        let sitting = FigureAction::Sitting.limbs();
        for i in 0..4 {
            assert_eq!(standing[i].0, walking[i].0);
            assert_eq!(standing[i].0, sitting[i].0);
        }
        assert_ne!(standing[0].1, walking[0].1);
        // sitting legs stay near hip height
        assert!(sitting[2].1.y < standing[2].1.y);
    }

    #[test]
    fn test_fill_body_subpaths() {
        let viewport = Viewport::new(100, 100);
        let mut surface = RecordingSurface::new();
        surface.begin_path();
        let figure = Figure::new(Vec2::new(10.0, 10.0), 1.0, FigureAction::Walking);
        figure.fill_body(&mut surface, &viewport);
        surface.fill();
        assert_eq!(surface.paths()[0].subpath_count(), 3);
    }
}
