//! Core geometry and color types

mod color;
mod rect;
mod vec2;

pub use color::Rgba;
pub use rect::Rect;
pub use vec2::Vec2;
