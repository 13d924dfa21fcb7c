//! Fractal dot/line grid
//!
//! Each layer is emitted as one batched path and painted with a single
//! `fill` (dots) or `stroke` (lines). Mark positions are multiples of the
//! layer spacing in world space, so the pattern is anchored to the world
//! origin and a pan of whole periods leaves it unchanged on screen.

use serde::{Deserialize, Serialize};

use super::types::{BackgroundStyle, GridVariant};
use crate::error::{BackdropError, Result};
use crate::lod::{mark_size_world, FractalLevels, GridLevel};
use crate::math::Vec2;
use crate::surface::DrawSurface;
use crate::viewport::Viewport;

/// Screen-space constants of the grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridTuning {
    /// Dot diameter on screen
    pub dot_size_px: f64,
    /// Line width of the coarse layer (lines variant)
    pub major_line_width_px: f64,
    /// Line width of the fine layer (lines variant)
    pub minor_line_width_px: f64,
    /// Multiplier on both layer opacities for the dots variant
    pub dots_opacity_boost: f32,
    /// Overscan around the visible rectangle
    pub margin_px: f64,
    /// A layer needing more marks than this is skipped
    pub max_marks_per_layer: usize,
}

impl Default for GridTuning {
    fn default() -> Self {
        Self {
            dot_size_px: 2.5,
            major_line_width_px: 1.0,
            minor_line_width_px: 0.5,
            dots_opacity_boost: 1.5,
            margin_px: 4.0,
            max_marks_per_layer: 50_000,
        }
    }
}

impl GridTuning {
    /// Check every size is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        if !self.dot_size_px.is_finite() || self.dot_size_px <= 0.0 {
            return Err(BackdropError::config("dotSizePx must be finite and > 0"));
        }
        for (name, value) in [
            ("majorLineWidthPx", self.major_line_width_px),
            ("minorLineWidthPx", self.minor_line_width_px),
            ("marginPx", self.margin_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(BackdropError::config(format!(
                    "{} must be finite and >= 0, got {}",
                    name, value
                )));
            }
        }
        if !self.dots_opacity_boost.is_finite() || self.dots_opacity_boost < 0.0 {
            return Err(BackdropError::config(format!(
                "dotsOpacityBoost must be finite and >= 0, got {}",
                self.dots_opacity_boost
            )));
        }
        Ok(())
    }
}

/// Which of the two active layers is being drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerRole {
    /// Layer A, fading out
    Major,
    /// Layer B, fading in
    Minor,
}

/// What happened to one layer during a frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerStats {
    /// Opacity actually painted with (after the variant boost)
    pub alpha: f32,
    /// Dots, or lines, emitted
    pub marks: usize,
    /// True when the mark cap dropped the layer
    pub capped: bool,
}

/// Per-frame grid summary
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GridStats {
    pub coarse: LayerStats,
    pub fine: LayerStats,
}

impl GridStats {
    /// Total marks over both layers
    pub fn marks(&self) -> usize {
        self.coarse.marks + self.fine.marks
    }
}

/// Opacity a layer is painted with for a variant
///
/// Dots get a multiplicative boost, clamped to 1.
#[inline]
pub fn layer_alpha(variant: GridVariant, opacity: f32, dots_boost: f32) -> f32 {
    match variant {
        GridVariant::Dots => (opacity * dots_boost).clamp(0.0, 1.0),
        GridVariant::Lines => opacity.clamp(0.0, 1.0),
    }
}

/// Integer lattice indices `i` with `min <= i * spacing <= max`
fn lattice_span(min: f64, max: f64, spacing: f64) -> Option<(i64, i64)> {
    let first = (min / spacing).ceil();
    let last = (max / spacing).floor();
    if !first.is_finite() || !last.is_finite() || last < first {
        return None;
    }
    // `as` saturates, far pans clamp rather than wrap
    Some((first as i64, last as i64))
}

fn span_len(span: Option<(i64, i64)>) -> usize {
    match span {
        Some((first, last)) => (last as i128 - first as i128 + 1).max(0) as usize,
        None => 0,
    }
}

/// Draws the two cross-faded grid layers
pub struct GridRenderer<'a> {
    style: &'a BackgroundStyle,
    tuning: &'a GridTuning,
}

impl<'a> GridRenderer<'a> {
    pub fn new(style: &'a BackgroundStyle, tuning: &'a GridTuning) -> Self {
        Self { style, tuning }
    }

    /// Draw layer A then layer B
    pub fn render<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        viewport: &Viewport,
        levels: &FractalLevels,
    ) -> GridStats {
        GridStats {
            coarse: self.draw_layer(surface, viewport, &levels.coarse, LayerRole::Major),
            fine: self.draw_layer(surface, viewport, &levels.fine, LayerRole::Minor),
        }
    }

    fn draw_layer<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        viewport: &Viewport,
        layer: &GridLevel,
        role: LayerRole,
    ) -> LayerStats {
        let alpha = layer_alpha(
            self.style.variant,
            layer.opacity,
            self.tuning.dots_opacity_boost,
        );
        let mut stats = LayerStats {
            alpha,
            ..LayerStats::default()
        };
        if alpha <= 0.0 {
            return stats;
        }

        let radius_px = self.tuning.dot_size_px * 0.5;
        let margin_world = mark_size_world(self.tuning.margin_px + radius_px, viewport.zoom);
        let area = viewport.visible_world_rect().expand(margin_world);
        let spacing = layer.spacing_world;

        let cols = lattice_span(area.x, area.right(), spacing);
        let rows = lattice_span(area.y, area.bottom(), spacing);
        let (ncols, nrows) = (span_len(cols), span_len(rows));

        let marks = match self.style.variant {
            GridVariant::Dots => ncols.saturating_mul(nrows),
            GridVariant::Lines => ncols.saturating_add(nrows),
        };
        if marks > self.tuning.max_marks_per_layer {
            log::warn!(
                "grid layer {} ({:.2}px apart) needs {} marks (cap {}), skipped",
                layer.level,
                layer.spacing_screen(viewport.zoom),
                marks,
                self.tuning.max_marks_per_layer
            );
            stats.capped = true;
            return stats;
        }
        let (Some((c0, c1)), Some((r0, r1))) = (cols, rows) else {
            return stats;
        };

        surface.set_alpha(alpha);
        surface.begin_path();
        match self.style.variant {
            GridVariant::Dots => {
                surface.set_fill(self.style.color);
                for row in r0..=r1 {
                    let wy = row as f64 * spacing;
                    for col in c0..=c1 {
                        let p = viewport.world_to_screen(Vec2::new(col as f64 * spacing, wy));
                        surface.circle(p, radius_px);
                    }
                }
                surface.fill();
            }
            GridVariant::Lines => {
                surface.set_stroke(self.style.color);
                surface.set_line_width(match role {
                    LayerRole::Major => self.tuning.major_line_width_px,
                    LayerRole::Minor => self.tuning.minor_line_width_px,
                });
                let top_left = viewport.world_to_screen(Vec2::new(area.x, area.y));
                let bottom_right = viewport.world_to_screen(Vec2::new(area.right(), area.bottom()));
                for col in c0..=c1 {
                    let p = viewport.world_to_screen(Vec2::new(col as f64 * spacing, 0.0));
                    surface.move_to(Vec2::new(p.x, top_left.y));
                    surface.line_to(Vec2::new(p.x, bottom_right.y));
                }
                for row in r0..=r1 {
                    let p = viewport.world_to_screen(Vec2::new(0.0, row as f64 * spacing));
                    surface.move_to(Vec2::new(top_left.x, p.y));
                    surface.line_to(Vec2::new(bottom_right.x, p.y));
                }
                surface.stroke();
            }
        }

        stats.marks = marks;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lod::compute_levels;
    use crate::surface::RecordingSurface;

    fn render(variant: GridVariant, viewport: &Viewport) -> (RecordingSurface, GridStats) {
        let style = BackgroundStyle {
            variant,
            ..Default::default()
        };
        let tuning = GridTuning::default();
        let levels = compute_levels(viewport.zoom, style.base_gap);
        let mut surface = RecordingSurface::new();
        let stats = GridRenderer::new(&style, &tuning).render(&mut surface, viewport, &levels);
        (surface, stats)
    }

    #[test]
    fn test_layer_alpha_boost_clamped() {
        assert!((layer_alpha(GridVariant::Dots, 0.5, 1.5) - 0.75).abs() < 1e-6);
        assert!((layer_alpha(GridVariant::Dots, 0.9, 1.5) - 1.0).abs() < 1e-6);
        assert!((layer_alpha(GridVariant::Lines, 0.9, 1.5) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_lattice_span() {
        assert_eq!(lattice_span(-10.0, 130.0, 60.0), Some((0, 2)));
        assert_eq!(lattice_span(-60.0, -1.0, 60.0), Some((-1, -1)));
        assert_eq!(lattice_span(1.0, 59.0, 60.0), None);
        assert_eq!(span_len(Some((-2, 2))), 5);
    }

    #[test]
    fn test_dots_one_fill_per_visible_layer() {
        // zoom 1.5 is mid-octave, both layers visible
        let viewport = Viewport::new(800, 600).with_zoom(1.5);
        let (surface, stats) = render(GridVariant::Dots, &viewport);
        assert_eq!(surface.fill_count(), 2);
        assert_eq!(surface.stroke_count(), 0);
        assert!(stats.coarse.marks > 0 && stats.fine.marks > stats.coarse.marks);
        assert_eq!(surface.paths()[0].subpath_count(), stats.coarse.marks);
    }

    #[test]
    fn test_lines_one_stroke_per_layer_with_widths() {
        let viewport = Viewport::new(800, 600).with_zoom(1.5);
        let (surface, _) = render(GridVariant::Lines, &viewport);
        assert_eq!(surface.stroke_count(), 2);
        let paths = surface.paths();
        assert!((paths[0].line_width - 1.0).abs() < 1e-12);
        assert!((paths[1].line_width - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_invisible_layer_not_painted() {
        // t = 0: layer B has zero opacity
        let viewport = Viewport::new(800, 600);
        let (surface, stats) = render(GridVariant::Dots, &viewport);
        assert_eq!(surface.fill_count(), 1);
        assert_eq!(stats.fine.marks, 0);
    }

    #[test]
    fn test_dot_radius_constant_on_screen() {
        for zoom in [0.13, 1.0, 3.7] {
            let viewport = Viewport::new(400, 300).with_zoom(zoom);
            let (surface, _) = render(GridVariant::Dots, &viewport);
            for seg in &surface.paths()[0].segments {
                if let crate::surface::PathSegment::Arc { radius, .. } = seg {
                    assert!((radius - 1.25).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_overscan_margin_is_screen_sized() {
        // zoom 4: spacing 15 world units, 25 units visible, overscan 5.25px
        let viewport = Viewport::new(100, 100).with_zoom(4.0);
        let (_, stats) = render(GridVariant::Dots, &viewport);
        assert_eq!(stats.coarse.marks, 4);

        let viewport = Viewport::new(100, 100).with_zoom(0.25);
        let (_, stats) = render(GridVariant::Dots, &viewport);
        assert_eq!(stats.coarse.marks, 4);
    }

    #[test]
    fn test_mark_cap_skips_layer() {
        let style = BackgroundStyle::default();
        let tuning = GridTuning {
            max_marks_per_layer: 10,
            ..Default::default()
        };
        let viewport = Viewport::new(1920, 1080).with_zoom(1.5);
        let levels = compute_levels(viewport.zoom, style.base_gap);
        let mut surface = RecordingSurface::new();
        let stats = GridRenderer::new(&style, &tuning).render(&mut surface, &viewport, &levels);
        assert!(stats.coarse.capped && stats.fine.capped);
        assert!(surface.is_blank());
    }

    #[test]
    fn test_tuning_validate() {
        assert!(GridTuning::default().validate().is_ok());
        let bad = GridTuning {
            dot_size_px: 0.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        let bad = GridTuning {
            margin_px: f64::NAN,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
