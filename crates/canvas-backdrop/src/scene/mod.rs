//! Procedural scene generator
//!
//! Splits the world into square cells and asks each visible cell what it
//! draws. Zoomed out (coarse tier), every cell carries a constellation or a
//! geometric glyph. Zoomed in (fine tier), only cells on a narrow band of
//! the path noise carry small figure clusters, which gives sparse winding
//! corridors instead of uniform coverage.
//!
//! Per frame the generator collects the visible motifs, then paints them
//! with one fill (dots, heads, bodies) and one stroke (lines, outlines,
//! limbs).

mod cells;
mod figures;
mod glyphs;
mod motif;

pub use cells::{Cell, CellRange};
pub use figures::{
    sketch_segments, sketchy_line, Figure, FigureAction, LIMB_WIDTH, MAX_SKETCH_SEGMENTS,
};
pub use glyphs::{Glyph, GlyphKind, CENTER_DOT_RADIUS_PX, GLYPH_RADIUS_RATIO};
pub use motif::{Cluster, FigureSlot, Motif, MotifSelector, STAR_RADIUS_PX};

use serde::{Deserialize, Serialize};

use crate::background::DetailTier;
use crate::error::{BackdropError, Result};
use crate::math::Rgba;
use crate::noise::{JitterStream, NoiseSource};
use crate::surface::DrawSurface;
use crate::viewport::Viewport;

/// Ink color of the scene motifs
pub const INK: Rgba = Rgba::rgb(0x14, 0x42, 0x56);

/// Coarse motif stroke width in world units
const OUTLINE_WIDTH: f64 = 1.0;

/// Cells of overscan around the visible rectangle
const MARGIN_CELLS: u32 = 1;

/// Which motifs the coarse tier draws
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoarseStyle {
    /// Star constellations only
    Constellation,
    /// Geometric glyphs only
    Glyph,
    /// Either, chosen per cell
    #[default]
    Mixed,
}

impl CoarseStyle {
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "constellation" => Some(CoarseStyle::Constellation),
            "glyph" => Some(CoarseStyle::Glyph),
            "mixed" => Some(CoarseStyle::Mixed),
            _ => None,
        }
    }
}

/// Tuning of the procedural scene
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneConfig {
    pub enabled: bool,
    /// Fine tier cell size in world units
    pub cell_size: f64,
    /// Coarse tier cell size in world units
    pub coarse_cell_size: f64,
    /// Zoom below which the coarse tier is used
    pub tier_threshold: f64,
    pub coarse_style: CoarseStyle,
    /// World-to-noise frequency of the path gate
    pub noise_scale: f64,
    /// Cells draw while `|path noise| < path_band`
    pub path_band: f64,
    /// Activity noise above this is a pair, below its negation a solo walker
    pub activity_threshold: f64,
    pub coarse_alpha: f32,
    pub fine_alpha: f32,
    /// Motif color, the ink color when unset
    pub color: Option<Rgba>,
    /// The scene pass is skipped when more cells than this are visible
    pub max_cells: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cell_size: 200.0,
            coarse_cell_size: 300.0,
            tier_threshold: 0.5,
            coarse_style: CoarseStyle::Mixed,
            noise_scale: 0.002,
            path_band: 0.15,
            activity_threshold: 0.3,
            coarse_alpha: 0.08,
            fine_alpha: 0.15,
            color: None,
            max_cells: 10_000,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("cellSize", self.cell_size),
            ("coarseCellSize", self.coarse_cell_size),
            ("noiseScale", self.noise_scale),
            ("pathBand", self.path_band),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(BackdropError::config(format!(
                    "{} must be finite and > 0, got {}",
                    name, value
                )));
            }
        }
        if !self.tier_threshold.is_finite() || !self.activity_threshold.is_finite() {
            return Err(BackdropError::config("thresholds must be finite"));
        }
        for (name, alpha) in [
            ("coarseAlpha", self.coarse_alpha),
            ("fineAlpha", self.fine_alpha),
        ] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(BackdropError::config(format!(
                    "{} must be in [0, 1], got {}",
                    name, alpha
                )));
            }
        }
        Ok(())
    }

    /// Tier for a zoom factor
    #[inline]
    pub fn tier(&self, zoom: f64) -> DetailTier {
        DetailTier::for_zoom(zoom, self.tier_threshold)
    }

    /// Cell size used by a tier
    #[inline]
    pub fn cell_size_for(&self, tier: DetailTier) -> f64 {
        match tier {
            DetailTier::Coarse => self.coarse_cell_size,
            DetailTier::Fine => self.cell_size,
        }
    }

    /// Motif color
    #[inline]
    pub fn ink(&self) -> Rgba {
        self.color.unwrap_or(INK)
    }
}

/// Per-frame scene summary
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneStats {
    pub tier: DetailTier,
    /// Cells examined
    pub visited: u64,
    /// Cells that drew a motif
    pub drawn: usize,
    /// True when the cell cap skipped the pass
    pub capped: bool,
}

/// Draws the procedural motifs over the grid
pub struct SceneGenerator<'a> {
    noise: &'a NoiseSource,
    config: &'a SceneConfig,
}

impl<'a> SceneGenerator<'a> {
    pub fn new(noise: &'a NoiseSource, config: &'a SceneConfig) -> Self {
        Self { noise, config }
    }

    /// Visible cells for a viewport in a tier
    pub fn visible_cells(&self, viewport: &Viewport, tier: DetailTier) -> CellRange {
        CellRange::covering(
            &viewport.visible_world_rect(),
            self.config.cell_size_for(tier),
            MARGIN_CELLS,
        )
    }

    /// Motifs of every visible cell, in row-major cell order
    pub fn collect(&self, viewport: &Viewport, tier: DetailTier) -> Vec<(Cell, Motif)> {
        let selector = MotifSelector::new(self.noise, self.config);
        self.visible_cells(viewport, tier)
            .iter()
            .filter_map(|cell| selector.select(cell, tier).map(|m| (cell, m)))
            .collect()
    }

    /// Paint the scene for one frame
    pub fn render<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        viewport: &Viewport,
        jitter: &mut JitterStream,
    ) -> SceneStats {
        let tier = self.config.tier(viewport.zoom);
        let cells = self.visible_cells(viewport, tier);
        let mut stats = SceneStats {
            tier,
            visited: cells.len(),
            drawn: 0,
            capped: false,
        };

        if stats.visited > self.config.max_cells {
            log::warn!(
                "{} scene cells visible (cap {}), scene skipped",
                stats.visited,
                self.config.max_cells
            );
            stats.capped = true;
            return stats;
        }

        let motifs = self.collect(viewport, tier);
        stats.drawn = motifs.len();
        if motifs.is_empty() {
            return stats;
        }

        let (alpha, width) = match tier {
            DetailTier::Coarse => (self.config.coarse_alpha, OUTLINE_WIDTH),
            DetailTier::Fine => (self.config.fine_alpha, LIMB_WIDTH),
        };
        let ink = self.config.ink();
        surface.set_alpha(alpha);

        surface.set_fill(ink);
        surface.begin_path();
        for (_, motif) in &motifs {
            motif.fill(surface, viewport);
        }
        surface.fill();

        surface.set_stroke(ink);
        surface.set_line_width(width * viewport.zoom);
        surface.begin_path();
        for (_, motif) in &motifs {
            motif.stroke(surface, viewport, jitter);
        }
        surface.stroke();

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    #[test]
    fn test_config_defaults() {
        let config = SceneConfig::default();
        assert!((config.cell_size - 200.0).abs() < 1e-12);
        assert!((config.coarse_cell_size - 300.0).abs() < 1e-12);
        assert_eq!(config.ink(), INK);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_rejects() {
        let bad = SceneConfig {
            cell_size: 0.0,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(BackdropError::InvalidConfig { .. })));
        let bad = SceneConfig {
            path_band: 0.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        let bad = SceneConfig {
            fine_alpha: 1.5,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_coarse_style_from_id() {
        assert_eq!(CoarseStyle::from_id("Glyph"), Some(CoarseStyle::Glyph));
        assert_eq!(CoarseStyle::from_id("stars"), None);
    }

    #[test]
    fn test_render_batches_fill_and_stroke() {
        let noise = NoiseSource::new(42);
        let config = SceneConfig::default();
        let viewport = Viewport::new(1200, 800).with_zoom(0.3);
        let mut surface = RecordingSurface::new();
        let mut jitter = JitterStream::off();

        let generator = SceneGenerator::new(&noise, &config);
        let stats = generator.render(&mut surface, &viewport, &mut jitter);

        assert_eq!(stats.tier, DetailTier::Coarse);
        assert_eq!(stats.drawn as u64, stats.visited);
        assert_eq!(surface.fill_count(), 1);
        assert_eq!(surface.stroke_count(), 1);
        assert!((surface.paths()[0].alpha - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_render_cell_cap() {
        let noise = NoiseSource::new(42);
        let config = SceneConfig {
            max_cells: 4,
            ..Default::default()
        };
        let viewport = Viewport::new(1920, 1080);
        let mut surface = RecordingSurface::new();
        let stats = SceneGenerator::new(&noise, &config).render(
            &mut surface,
            &viewport,
            &mut JitterStream::off(),
        );
        assert!(stats.capped);
        assert!(surface.is_blank());
    }

    #[test]
    fn test_fine_tier_limb_width_scales_with_zoom() {
        let noise = NoiseSource::new(42);
        let config = SceneConfig::default();
        // origin cell is always on the path
        let viewport = Viewport::new(400, 400).with_zoom(2.0);
        let mut surface = RecordingSurface::new();
        let stats = SceneGenerator::new(&noise, &config).render(
            &mut surface,
            &viewport,
            &mut JitterStream::off(),
        );
        assert_eq!(stats.tier, DetailTier::Fine);
        assert!(stats.drawn >= 1);
        let stroke = surface
            .paths()
            .iter()
            .find(|p| p.kind == crate::surface::PaintKind::Stroke);
        assert!((stroke.unwrap().line_width - 3.0).abs() < 1e-12);
    }
}
