//! WASM exports for the backdrop engine
//!
//! This module provides wasm-bindgen exports for the BackdropEngine,
//! allowing the editor to hand over its viewport and a 2D canvas context.

use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use crate::background::{CanvasTheme, GridVariant};
use crate::engine::BackdropEngine;
use crate::error::BackdropError;
use crate::noise::Seed;
use crate::persistence::BackdropSnapshot;
use crate::surface::CanvasSurface;
use crate::viewport::{Viewport, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};

fn to_js(e: BackdropError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// `log` sink writing to the browser console
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[backdrop] {}", record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            _ => web_sys::console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

/// Route engine logs to the browser console
///
/// `level` is one of `error`, `warn`, `info`, `debug`, `trace`. Calling it
/// again only changes the level.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let filter = level.parse().unwrap_or(log::LevelFilter::Warn);
    let _ = log::set_logger(&CONSOLE_LOGGER);
    log::set_max_level(filter);
}

/// Backdrop controller for WASM - wraps BackdropEngine with JS-friendly API
#[wasm_bindgen]
pub struct BackdropController {
    engine: BackdropEngine,
    viewport: Viewport,
    theme: Option<String>,
}

#[wasm_bindgen]
impl BackdropController {
    /// Create a controller from a JSON configuration (empty string for defaults)
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<BackdropController, JsValue> {
        let engine = if config_json.trim().is_empty() {
            BackdropEngine::new(Default::default())
        } else {
            BackdropEngine::from_json(config_json)
        }
        .map_err(to_js)?;

        Ok(Self {
            engine,
            viewport: Viewport::default(),
            theme: None,
        })
    }

    // =========================================================================
    // Viewport
    // =========================================================================

    /// Replace the viewport; pan in world units, size in CSS pixels
    #[wasm_bindgen]
    pub fn set_viewport(&mut self, pan_x: f64, pan_y: f64, zoom: f64, width: u32, height: u32) {
        self.viewport = Viewport {
            pan_x,
            pan_y,
            zoom,
            pixel_width: width,
            pixel_height: height,
        };
    }

    /// Pan by a drag delta in screen pixels
    #[wasm_bindgen]
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
    }

    /// Zoom at anchor point, clamped to the editor's zoom range
    #[wasm_bindgen]
    pub fn zoom_at(&mut self, factor: f64, anchor_x: f64, anchor_y: f64) {
        self.viewport.zoom_at(
            factor,
            anchor_x,
            anchor_y,
            DEFAULT_MIN_ZOOM,
            DEFAULT_MAX_ZOOM,
        );
    }

    /// Get viewport state as JSON
    #[wasm_bindgen]
    pub fn get_viewport_json(&self) -> String {
        serde_json::to_string(&self.viewport).unwrap_or_else(|_| "{}".to_string())
    }

    // =========================================================================
    // Style
    // =========================================================================

    /// Apply a theme preset by id; returns false for unknown ids
    #[wasm_bindgen]
    pub fn set_theme(&mut self, id: &str) -> bool {
        match CanvasTheme::from_id(id) {
            Some(theme) => {
                self.engine.apply_theme(theme);
                self.theme = Some(theme.id.to_string());
                true
            }
            None => {
                log::warn!("unknown theme {:?}", id);
                false
            }
        }
    }

    /// Switch between `dots` and `lines`; returns false for unknown ids
    #[wasm_bindgen]
    pub fn set_variant(&mut self, id: &str) -> bool {
        match GridVariant::from_id(id) {
            Some(variant) => {
                self.engine.set_variant(variant);
                true
            }
            None => false,
        }
    }

    #[wasm_bindgen]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.engine.set_enabled(enabled);
    }

    /// Theme presets as JSON `[{ id, label, background, dotColor, dark }]`
    #[wasm_bindgen]
    pub fn get_themes_json(&self) -> String {
        let themes: Vec<_> = CanvasTheme::all()
            .iter()
            .map(|t| {
                serde_json::json!({
                    "id": t.id,
                    "label": t.label,
                    "background": t.background.to_hex(),
                    "dotColor": t.dot_color.to_hex(),
                    "dark": t.is_dark(),
                })
            })
            .collect();
        serde_json::to_string(&themes).unwrap_or_else(|_| "[]".to_string())
    }

    // =========================================================================
    // Seed & Persistence
    // =========================================================================

    #[wasm_bindgen]
    pub fn set_seed(&mut self, seed: u64) {
        self.engine.set_seed(seed);
    }

    /// Pick a fresh session-random seed and return it
    #[wasm_bindgen]
    pub fn randomize_seed(&mut self) -> u64 {
        let seed = Seed::random().0;
        self.engine.set_seed(seed);
        seed
    }

    /// Seed and style as JSON for the host to store
    #[wasm_bindgen]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.engine
            .snapshot(self.theme.as_deref())
            .to_json()
            .map_err(to_js)
    }

    /// Restore a stored snapshot
    #[wasm_bindgen]
    pub fn restore_snapshot(&mut self, json: &str) -> Result<(), JsValue> {
        let snapshot = BackdropSnapshot::from_json(json).map_err(to_js)?;
        self.engine.restore(&snapshot).map_err(to_js)?;
        self.theme = snapshot.theme;
        Ok(())
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Draw one frame into a 2D context already scaled for device pixels
    #[wasm_bindgen]
    pub fn render(&mut self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        if !self.engine.style().enabled {
            // the engine leaves the surface alone; drop the stale frame
            ctx.clear_rect(
                0.0,
                0.0,
                self.viewport.pixel_width as f64,
                self.viewport.pixel_height as f64,
            );
            return Ok(());
        }
        let mut surface = CanvasSurface::new(ctx);
        self.engine
            .render(&mut surface, &self.viewport)
            .map(|_| ())
            .map_err(to_js)
    }
}
