//! Fractal grid level calculation
//!
//! Two grid layers are active at any zoom: the coarse layer `A` of the
//! current octave fading out and the fine layer `B` (half the spacing)
//! fading in. When zoom crosses a power of two, `B` becomes the next
//! octave's `A` with identical spacing and full opacity, so nothing pops.

use serde::{Deserialize, Serialize};

use super::easing::smoothstep;

/// One grid layer derived from the current zoom
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLevel {
    /// Octave index (`floor(log2(zoom))` for the coarse layer)
    pub level: i32,
    /// Distance between marks in world units
    pub spacing_world: f64,
    /// Layer opacity before any variant boost
    pub opacity: f32,
}

impl GridLevel {
    /// Distance between marks on screen
    #[inline]
    pub fn spacing_screen(&self, zoom: f64) -> f64 {
        self.spacing_world * zoom
    }
}

/// Both active layers plus the eased cross-fade weight
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FractalLevels {
    /// Coarse, expiring layer
    pub coarse: GridLevel,
    /// Fine, emerging layer
    pub fine: GridLevel,
    /// `smoothstep(t)`; equals the fine layer's opacity
    pub crossfade: f32,
    /// Raw progress `t` through the octave, in `[0, 1)`
    pub progress: f64,
}

/// World-space spacing of octave `level`
///
/// Both layers go through this one function, so the fine spacing at the top
/// of an octave is bit-identical to the coarse spacing of the next octave.
#[inline]
pub fn octave_spacing(base_gap: f64, level: i32) -> f64 {
    base_gap / 2f64.powi(level)
}

/// Compute both grid layers for a zoom factor
///
/// `zoom` must be finite and > 0 (see [`crate::Viewport::validate`]).
pub fn compute_levels(zoom: f64, base_gap: f64) -> FractalLevels {
    let log = zoom.log2();
    let level_f = log.floor();
    let level = level_f as i32;
    let progress = (log - level_f).clamp(0.0, 1.0 - f64::EPSILON);

    let crossfade = smoothstep(progress as f32);

    FractalLevels {
        coarse: GridLevel {
            level,
            spacing_world: octave_spacing(base_gap, level),
            opacity: 1.0 - crossfade,
        },
        fine: GridLevel {
            level: level.saturating_add(1),
            spacing_world: octave_spacing(base_gap, level.saturating_add(1)),
            opacity: crossfade,
        },
        crossfade,
        progress,
    }
}

/// World-space size of a mark that should look `target_px` wide on screen
#[inline]
pub fn mark_size_world(target_px: f64, zoom: f64) -> f64 {
    target_px / zoom
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_err(a: f64, b: f64) -> f64 {
        ((a - b) / b).abs()
    }

    #[test]
    fn test_levels_at_unit_zoom() {
        let levels = compute_levels(1.0, 60.0);
        assert_eq!(levels.coarse.level, 0);
        assert_eq!(levels.progress, 0.0);
        assert_eq!(levels.coarse.spacing_world, 60.0);
        assert_eq!(levels.fine.spacing_world, 30.0);
        assert!((levels.coarse.opacity - 1.0).abs() < 1e-6);
        assert!(levels.fine.opacity.abs() < 1e-6);
    }

    #[test]
    fn test_levels_at_octave_boundary() {
        let levels = compute_levels(2.0, 60.0);
        assert_eq!(levels.coarse.level, 1);
        assert_eq!(levels.progress, 0.0);
        assert_eq!(levels.coarse.spacing_world, 30.0);
        assert!((levels.coarse.opacity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_levels_zoomed_out() {
        let levels = compute_levels(0.25, 60.0);
        assert_eq!(levels.coarse.level, -2);
        assert_eq!(levels.coarse.spacing_world, 240.0);
        assert_eq!(levels.fine.spacing_world, 120.0);
    }

    #[test]
    fn test_levels_midway() {
        let levels = compute_levels(2f64.sqrt(), 60.0);
        assert_eq!(levels.coarse.level, 0);
        assert!((levels.progress - 0.5).abs() < 1e-9);
        assert!((levels.crossfade - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_octave_continuity() {
        for level in -6..6 {
            let top = 2f64.powi(level + 1);
            let below = compute_levels(top * (1.0 - 1e-12), 60.0);
            let at = compute_levels(top, 60.0);

            assert_eq!(below.coarse.level, level);
            assert_eq!(at.coarse.level, level + 1);
            assert!(rel_err(below.fine.spacing_world, at.coarse.spacing_world) < 1e-9);
            assert!(below.fine.opacity > 0.999);
            assert!(below.coarse.opacity < 0.001);
            assert!(at.coarse.opacity > 0.999);
        }
    }

    #[test]
    fn test_fine_spacing_matches_next_octave_exactly() {
        for level in -40..40 {
            let next = compute_levels(2f64.powi(level + 1), 60.0);
            assert_eq!(
                octave_spacing(60.0, level + 1).to_bits(),
                next.coarse.spacing_world.to_bits()
            );
        }
    }

    #[test]
    fn test_opacity_monotonic_within_octave() {
        let mut prev = compute_levels(1.0, 60.0);
        for i in 1..1000 {
            let zoom = 2f64.powf(i as f64 / 1000.0);
            let levels = compute_levels(zoom, 60.0);
            assert!(levels.coarse.opacity <= prev.coarse.opacity + 1e-6);
            assert!(levels.fine.opacity + 1e-6 >= prev.fine.opacity);
            assert!((0.0..=1.0).contains(&levels.coarse.opacity));
            assert!((0.0..=1.0).contains(&levels.fine.opacity));
            prev = levels;
        }
    }

    #[test]
    fn test_screen_spacing_stays_within_octave_band() {
        for i in 0..200 {
            let zoom = 0.1 * 1.03f64.powi(i);
            let levels = compute_levels(zoom, 60.0);
            let coarse_px = levels.coarse.spacing_screen(zoom);
            let band = 60.0 - 1e-9..120.0 + 1e-9;
            assert!(band.contains(&coarse_px), "{}", coarse_px);
        }
    }

    #[test]
    fn test_mark_size_world_constant_on_screen() {
        for zoom in [0.1, 0.5, 1.0, 3.7] {
            assert!((mark_size_world(2.5, zoom) * zoom - 2.5).abs() < 1e-12);
        }
    }
}
