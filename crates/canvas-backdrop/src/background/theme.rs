//! Canvas palettes of the editor's theme registry

use crate::math::Rgba;

/// Canvas colors of one editor theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasTheme {
    /// Stable lowercase identifier
    pub id: &'static str,
    /// Display label
    pub label: &'static str,
    /// Canvas fill behind the grid
    pub background: Rgba,
    /// Grid mark color
    pub dot_color: Rgba,
}

const THEMES: [CanvasTheme; 10] = [
    CanvasTheme {
        id: "light",
        label: "Notion Light",
        background: Rgba::rgb(0xff, 0xff, 0xff),
        dot_color: Rgba::rgb(0xe5, 0xe5, 0xe5),
    },
    CanvasTheme {
        id: "linear",
        label: "Linear Dark",
        background: Rgba::rgb(0x0f, 0x11, 0x15),
        dot_color: Rgba::rgb(0x28, 0x2b, 0x32),
    },
    CanvasTheme {
        id: "nord",
        label: "Nord",
        background: Rgba::rgb(0x2e, 0x34, 0x40),
        dot_color: Rgba::rgb(0x4c, 0x56, 0x6a),
    },
    CanvasTheme {
        id: "dracula",
        label: "Dracula",
        background: Rgba::rgb(0x28, 0x2a, 0x36),
        dot_color: Rgba::rgb(0x44, 0x47, 0x5a),
    },
    CanvasTheme {
        id: "solarized",
        label: "Solarized Light",
        background: Rgba::rgb(0xfd, 0xf6, 0xe3),
        dot_color: Rgba::rgb(0xd8, 0xd3, 0xc0),
    },
    CanvasTheme {
        id: "gruvbox",
        label: "Gruvbox",
        background: Rgba::rgb(0x28, 0x28, 0x28),
        dot_color: Rgba::rgb(0x50, 0x49, 0x45),
    },
    CanvasTheme {
        id: "catppuccin",
        label: "Catppuccin",
        background: Rgba::rgb(0x1e, 0x1e, 0x2e),
        dot_color: Rgba::rgb(0x45, 0x47, 0x5a),
    },
    CanvasTheme {
        id: "tokyo",
        label: "Tokyo Night",
        background: Rgba::rgb(0x1a, 0x1b, 0x26),
        dot_color: Rgba::rgb(0x24, 0x28, 0x3b),
    },
    CanvasTheme {
        id: "monokai",
        label: "Monokai Pro",
        background: Rgba::rgb(0x2d, 0x2a, 0x2e),
        dot_color: Rgba::rgb(0x40, 0x3e, 0x41),
    },
    CanvasTheme {
        id: "blueprint",
        label: "Blueprint",
        background: Rgba::rgb(0x1e, 0x3a, 0x8a),
        dot_color: Rgba::rgb(0x3b, 0x82, 0xf6),
    },
];

impl CanvasTheme {
    /// Every built-in palette, light first
    pub fn all() -> &'static [CanvasTheme] {
        &THEMES
    }

    /// Look up a palette by id, ignoring case
    pub fn from_id(id: &str) -> Option<&'static CanvasTheme> {
        THEMES.iter().find(|t| t.id.eq_ignore_ascii_case(id))
    }

    /// Palette used when the host names none
    pub fn default_theme() -> &'static CanvasTheme {
        &THEMES[0]
    }

    /// True for palettes drawn on a dark canvas
    pub fn is_dark(&self) -> bool {
        let Rgba { r, g, b, .. } = self.background;
        // Rec. 601 luma
        let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
        luma < 128.0
    }
}
