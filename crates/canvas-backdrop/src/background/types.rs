use serde::{Deserialize, Serialize};

use super::theme::CanvasTheme;
use crate::error::{BackdropError, Result};
use crate::math::Rgba;

/// Grid mark variant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridVariant {
    /// Filled dots at every lattice point
    #[default]
    Dots,
    /// Horizontal and vertical lines through every lattice point
    Lines,
}

impl GridVariant {
    /// Get all available variants
    pub fn all() -> &'static [GridVariant] {
        &[GridVariant::Dots, GridVariant::Lines]
    }

    /// Get the display name for this variant
    pub fn name(&self) -> &'static str {
        match self {
            GridVariant::Dots => "Dots",
            GridVariant::Lines => "Lines",
        }
    }

    /// Parse from string ID (e.g., "dots", "lines")
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "dots" => Some(GridVariant::Dots),
            "lines" => Some(GridVariant::Lines),
            _ => None,
        }
    }

    /// Get the string ID for this variant
    pub fn id(&self) -> &'static str {
        match self {
            GridVariant::Dots => "dots",
            GridVariant::Lines => "lines",
        }
    }
}

/// Which family of procedural motifs a zoom level shows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailTier {
    /// Zoomed out: constellations and geometric glyphs
    Coarse,
    /// Zoomed in: noise-gated figure scenes
    Fine,
}

impl DetailTier {
    /// Select the tier for a zoom factor (`zoom < threshold` is coarse)
    #[inline]
    pub fn for_zoom(zoom: f64, threshold: f64) -> Self {
        if zoom < threshold {
            DetailTier::Coarse
        } else {
            DetailTier::Fine
        }
    }

    /// Get the string ID for this tier
    pub fn id(&self) -> &'static str {
        match self {
            DetailTier::Coarse => "coarse",
            DetailTier::Fine => "fine",
        }
    }
}

/// Style parameters handed over by the theming layer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundStyle {
    /// Grid mark color
    pub color: Rgba,
    /// Optional canvas fill painted before the grid
    pub background: Option<Rgba>,
    /// Grid spacing in world units at zoom 1
    pub base_gap: f64,
    /// Dots or lines
    pub variant: GridVariant,
    /// When false the engine draws nothing at all
    pub enabled: bool,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            color: Rgba::default(),
            background: None,
            base_gap: 60.0,
            variant: GridVariant::Dots,
            enabled: true,
        }
    }
}

impl BackgroundStyle {
    /// Style using a theme preset's canvas colors
    pub fn from_theme(theme: &CanvasTheme) -> Self {
        Self {
            color: theme.dot_color,
            background: Some(theme.background),
            ..Self::default()
        }
    }

    /// Check that the style can produce finite geometry
    pub fn validate(&self) -> Result<()> {
        if !self.base_gap.is_finite() || self.base_gap <= 0.0 {
            return Err(BackdropError::style(format!(
                "base gap must be finite and > 0, got {}",
                self.base_gap
            )));
        }
        Ok(())
    }
}
