//! Backdrop engine: one `render` call per redraw
//!
//! Owns the configuration, the noise table and the cosmetic jitter stream.
//! Each call validates the viewport, clears the surface and paints grid
//! layer A, grid layer B and the scene motifs, in that order. Nothing is
//! retained between frames.

use crate::background::{BackgroundStyle, CanvasTheme, GridRenderer, GridStats, GridVariant};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::lod::{compute_levels, FractalLevels};
use crate::noise::{JitterMode, JitterStream, NoiseSource};
use crate::persistence::BackdropSnapshot;
use crate::scene::{SceneGenerator, SceneStats};
use crate::surface::DrawSurface;
use crate::viewport::Viewport;

/// What one `render` call did
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Grid levels, `None` when nothing was drawn
    pub levels: Option<FractalLevels>,
    pub grid: GridStats,
    /// `None` when the scene is disabled or nothing was drawn
    pub scene: Option<SceneStats>,
}

impl FrameStats {
    /// Whether the frame touched the surface at all
    pub fn is_drawn(&self) -> bool {
        self.levels.is_some()
    }
}

/// Procedural background renderer
pub struct BackdropEngine {
    config: EngineConfig,
    noise: NoiseSource,
    jitter: JitterStream,
}

impl BackdropEngine {
    /// Create an engine from a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let noise = NoiseSource::new(config.seed);
        let jitter = JitterStream::for_mode(config.jitter, config.seed);
        Ok(Self {
            config,
            noise,
            jitter,
        })
    }

    /// Create an engine from a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(EngineConfig::from_json(json)?)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn noise(&self) -> &NoiseSource {
        &self.noise
    }

    pub fn style(&self) -> &BackgroundStyle {
        &self.config.style
    }

    /// Re-seed the world; rebuilds the noise table and the jitter stream
    pub fn set_seed(&mut self, seed: u64) {
        if seed == self.config.seed {
            return;
        }
        self.config.seed = seed;
        self.reseed();
    }

    fn reseed(&mut self) {
        self.noise = NoiseSource::new(self.config.seed);
        self.jitter = JitterStream::for_mode(self.config.jitter, self.config.seed);
    }

    pub fn set_jitter(&mut self, mode: JitterMode) {
        self.config.jitter = mode;
        self.jitter = JitterStream::for_mode(mode, self.config.seed);
    }

    /// Replace the style, keeping the old one if the new one is invalid
    pub fn set_style(&mut self, style: BackgroundStyle) -> Result<()> {
        style.validate()?;
        self.config.style = style;
        Ok(())
    }

    /// Take grid and canvas colors from a theme preset
    pub fn apply_theme(&mut self, theme: &CanvasTheme) {
        self.config.style.color = theme.dot_color;
        self.config.style.background = Some(theme.background);
    }

    pub fn set_variant(&mut self, variant: GridVariant) {
        self.config.style.variant = variant;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.style.enabled = enabled;
    }

    /// Snapshot of the seed and style for the host to store
    pub fn snapshot(&self, theme: Option<&str>) -> BackdropSnapshot {
        BackdropSnapshot::from_config(&self.config, theme)
    }

    /// Restore seed and style from a stored snapshot
    pub fn restore(&mut self, snapshot: &BackdropSnapshot) -> Result<()> {
        snapshot.style.validate()?;
        let previous = self.config.seed;
        snapshot.apply_to(&mut self.config);
        if self.config.seed != previous {
            self.reseed();
        }
        Ok(())
    }

    /// Draw one frame
    ///
    /// An invalid viewport is rejected before any draw call. A disabled
    /// style, or an empty viewport, returns without touching the surface.
    pub fn render<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        viewport: &Viewport,
    ) -> Result<FrameStats> {
        if let Err(e) = viewport.validate() {
            log::warn!("frame rejected: {}", e);
            return Err(e);
        }
        let style = &self.config.style;
        if !style.enabled || viewport.is_empty() {
            return Ok(FrameStats::default());
        }

        surface.clear(
            viewport.pixel_width as f64,
            viewport.pixel_height as f64,
            style.background,
        );

        let levels = compute_levels(viewport.zoom, style.base_gap);
        let grid = GridRenderer::new(style, &self.config.grid).render(surface, viewport, &levels);

        let scene = if self.config.scene.enabled {
            Some(SceneGenerator::new(&self.noise, &self.config.scene).render(
                surface,
                viewport,
                &mut self.jitter,
            ))
        } else {
            None
        };

        log::debug!(
            "frame zoom={:.3} level={} crossfade={:.3} marks={} tier={} cells={} motifs={}",
            viewport.zoom,
            levels.coarse.level,
            levels.crossfade,
            grid.marks(),
            scene.map_or("off", |s| s.tier.id()),
            scene.map_or(0, |s| s.visited),
            scene.map_or(0, |s| s.drawn),
        );

        Ok(FrameStats {
            levels: Some(levels),
            grid,
            scene,
        })
    }
}
