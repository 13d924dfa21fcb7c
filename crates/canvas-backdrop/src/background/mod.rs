//! Grid background: style, theme palettes and the fractal grid renderer

mod grid;
mod theme;
mod types;

pub use grid::{layer_alpha, GridRenderer, GridStats, GridTuning, LayerRole, LayerStats};
pub use theme::CanvasTheme;
pub use types::{BackgroundStyle, DetailTier, GridVariant};
