//! `CanvasRenderingContext2d` backed surface for browser hosts

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::DrawSurface;
use crate::math::{Rgba, Vec2};

/// Surface drawing straight into a 2D canvas context
///
/// The host is responsible for device-pixel-ratio scaling of the context
/// before handing it over.
pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    /// Wrap a context for the duration of one frame
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Set `fillStyle`/`strokeStyle` by property name
    ///
    /// A rejected assignment leaves the previous style active, so the frame
    /// still draws; it is logged rather than surfaced.
    fn set_style(&self, property: &str, color: Rgba) {
        let css = color.to_css();
        let result = js_sys::Reflect::set(
            self.ctx.as_ref(),
            &JsValue::from_str(property),
            &JsValue::from_str(&css),
        );
        if let Err(e) = result {
            log::warn!("canvas {} = {} rejected: {:?}", property, css, e);
        }
    }
}

impl DrawSurface for CanvasSurface<'_> {
    fn clear(&mut self, width: f64, height: f64, background: Option<Rgba>) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
        if let Some(color) = background {
            self.set_style("fillStyle", color);
            self.ctx.set_global_alpha(1.0);
            self.ctx.fill_rect(0.0, 0.0, width, height);
        }
    }

    fn set_fill(&mut self, color: Rgba) {
        self.set_style("fillStyle", color);
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.set_style("strokeStyle", color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Vec2) {
        self.ctx.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Vec2) {
        self.ctx.line_to(p.x, p.y);
    }

    fn bezier_to(&mut self, c1: Vec2, c2: Vec2, to: Vec2) {
        self.ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, to.x, to.y);
    }

    fn arc(&mut self, center: Vec2, radius: f64, start: f64, end: f64) {
        // Only fails for negative radii
        let radius = radius.max(0.0);
        if let Err(e) = self.ctx.arc(center.x, center.y, radius, start, end) {
            log::warn!("canvas arc rejected: {:?}", e);
        }
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }
}
