//! Procedural Backdrop for an Infinite Canvas
//!
//! This crate draws the zoomable background behind a node-graph editor:
//! - A fractal dot/line grid whose two active octaves cross-fade, so marks
//!   keep a constant on-screen size and density at any zoom
//! - Seeded, coordinate-hashed motifs per world cell: constellations and
//!   geometric glyphs zoomed out, noise-gated figure scenes zoomed in
//! - A canvas-like drawing surface trait with recording, SVG and browser
//!   canvas implementations
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`math`]: Geometry and color types (`Vec2`, `Rect`, `Rgba`)
//! - [`lod`]: Octave levels and the cross-fade curve
//! - [`noise`]: Gradient noise, cell hashing and cosmetic jitter
//! - [`background`]: Grid style, theme palettes and the grid renderer
//! - [`scene`]: Cell culling, motif selection and motif drawing
//! - [`surface`]: The [`DrawSurface`] trait and its implementations
//! - [`persistence`]: Seed/style snapshots for storage
//!
//! ## Example
//!
//! ```rust
//! use canvas_backdrop::{BackdropEngine, EngineConfig, JitterMode, RecordingSurface, Viewport};
//!
//! let config = EngineConfig::default().with_seed(42).with_jitter(JitterMode::Off);
//! let mut engine = BackdropEngine::new(config).unwrap();
//!
//! let viewport = Viewport::new(1280, 720).with_pan(-300.0, 120.0).with_zoom(1.5);
//! let mut surface = RecordingSurface::new();
//! let stats = engine.render(&mut surface, &viewport).unwrap();
//!
//! assert!(stats.is_drawn());
//! assert!(surface.fill_count() >= 1);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: Rendering is a pure function of config and viewport, testable
//!    without a browser
//! 2. **Deterministic Structure**: What a cell draws depends only on the seed and its
//!    integer coordinate
//! 3. **Isolated Jitter**: Hand-drawn wobble comes from its own stream and can be switched off
//! 4. **Batched Paint**: Each grid layer and each scene pass is a single fill or stroke

pub mod background;
pub mod lod;
pub mod math;
pub mod noise;
pub mod persistence;
pub mod scene;
pub mod surface;

mod config;
mod engine;
mod error;
mod viewport;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use background::{BackgroundStyle, CanvasTheme, DetailTier, GridTuning, GridVariant};
pub use lod::{compute_levels, FractalLevels, GridLevel};
pub use math::{Rect, Rgba, Vec2};
pub use noise::{CellHash, JitterMode, JitterStream, NoiseSource, Seed};
pub use persistence::BackdropSnapshot;
pub use scene::{CoarseStyle, SceneConfig};
pub use surface::{DrawSurface, RecordingSurface};

pub use config::EngineConfig;
pub use engine::{BackdropEngine, FrameStats};
pub use error::{BackdropError, Result};
pub use viewport::{Viewport, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};
