//! Level-of-detail selection for the fractal grid

mod easing;
mod levels;

pub use easing::smoothstep;
pub use levels::{compute_levels, mark_size_world, octave_spacing, FractalLevels, GridLevel};
