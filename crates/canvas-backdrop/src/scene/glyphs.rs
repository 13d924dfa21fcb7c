//! Geometric glyph templates for the coarse tier

use std::f64::consts::{FRAC_PI_3, FRAC_PI_4};

use serde::{Deserialize, Serialize};

use crate::math::Vec2;
use crate::surface::DrawSurface;
use crate::viewport::Viewport;

/// Glyph radius as a fraction of the cell size
pub const GLYPH_RADIUS_RATIO: f64 = 0.35;

/// Center dot radius in screen pixels
pub const CENTER_DOT_RADIUS_PX: f64 = 3.0;

const SIN_60: f64 = 0.866;

/// The four fixed glyph templates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GlyphKind {
    /// Three triangles rotated by 60 degrees
    TriangleFan,
    /// Six circles around the center
    Flower,
    /// Two closed double loops, the second turned 45 degrees
    Knot,
    /// Square, the same square turned 45 degrees, and a circle
    Concentric,
}

impl GlyphKind {
    pub fn all() -> &'static [GlyphKind] {
        &[
            GlyphKind::TriangleFan,
            GlyphKind::Flower,
            GlyphKind::Knot,
            GlyphKind::Concentric,
        ]
    }

    /// Template for a hash pick in `0..4`
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => GlyphKind::TriangleFan,
            1 => GlyphKind::Flower,
            2 => GlyphKind::Knot,
            _ => GlyphKind::Concentric,
        }
    }
}

/// A glyph placed in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    pub kind: GlyphKind,
    /// Center in world units
    pub center: Vec2,
    /// Outer radius in world units
    pub radius: f64,
    /// Extra rotation in radians
    pub rotation: f64,
}

impl Glyph {
    /// Map a template point (relative to the center, unrotated) to screen
    #[inline]
    fn screen(&self, viewport: &Viewport, local: Vec2, turn: f64) -> Vec2 {
        viewport.world_to_screen(self.center + local.rotate(turn + self.rotation))
    }

    /// Append the outline to the current (stroke) path
    pub fn outline<S: DrawSurface + ?Sized>(&self, surface: &mut S, viewport: &Viewport) {
        let r = self.radius;
        match self.kind {
            GlyphKind::TriangleFan => {
                let tri = [
                    Vec2::new(0.0, -r),
                    Vec2::new(r * SIN_60, r * 0.5),
                    Vec2::new(-r * SIN_60, r * 0.5),
                ];
                for k in 0..3 {
                    let turn = k as f64 * FRAC_PI_3;
                    surface.polygon(&tri.map(|p| self.screen(viewport, p, turn)));
                }
            }
            GlyphKind::Flower => {
                let petal = r * 0.5;
                for k in 0..6 {
                    let c = self.screen(viewport, Vec2::new(petal, 0.0), k as f64 * FRAC_PI_3);
                    surface.circle(c, petal * viewport.zoom);
                }
            }
            GlyphKind::Knot => {
                for turn in [0.0, FRAC_PI_4] {
                    let p = |x: f64, y: f64| self.screen(viewport, Vec2::new(x, y), turn);
                    surface.move_to(p(-r, 0.0));
                    surface.bezier_to(p(-r, -r), p(r, -r), p(r, 0.0));
                    surface.bezier_to(p(r, r), p(-r, r), p(-r, 0.0));
                }
            }
            GlyphKind::Concentric => {
                let h = r * 0.5;
                let square = [
                    Vec2::new(-h, -h),
                    Vec2::new(h, -h),
                    Vec2::new(h, h),
                    Vec2::new(-h, h),
                ];
                for turn in [0.0, FRAC_PI_4] {
                    surface.polygon(&square.map(|p| self.screen(viewport, p, turn)));
                }
                let center = viewport.world_to_screen(self.center);
                surface.circle(center, r * 0.7 * viewport.zoom);
            }
        }
    }

    /// Append the center dot to the current (fill) path
    pub fn center_dot<S: DrawSurface + ?Sized>(&self, surface: &mut S, viewport: &Viewport) {
        surface.circle(viewport.world_to_screen(self.center), CENTER_DOT_RADIUS_PX);
    }
}
