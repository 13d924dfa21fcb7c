//! Integration tests for BackdropEngine
//!
//! These tests verify the full frame workflow including:
//! - Octave selection and cross-fade continuity across zoom
//! - Grid phase anchored to the world under pan
//! - Coarse/fine tier switching and motif reproducibility
//! - Cell culling against a brute-force reference
//! - Input rejection, disabled style and paint batching

use std::collections::HashMap;

use canvas_backdrop::scene::{Cell, CellRange, Motif, SceneGenerator};
use canvas_backdrop::surface::{svg, PaintKind};
use canvas_backdrop::{
    compute_levels, BackdropEngine, BackdropError, BackdropSnapshot, BackgroundStyle, CanvasTheme,
    DetailTier, EngineConfig, GridVariant, JitterMode, JitterStream, NoiseSource, RecordingSurface,
    SceneConfig, Vec2, Viewport,
};

fn engine_with(config: EngineConfig) -> BackdropEngine {
    BackdropEngine::new(config.with_jitter(JitterMode::Off)).unwrap()
}

fn grid_only() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.scene.enabled = false;
    config
}

fn dot_centers(surface: &RecordingSurface, layer: usize) -> Vec<Vec2> {
    let mut centers: Vec<Vec2> = surface.paths()[layer].arc_centers().collect();
    centers.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
    centers
}

// =============================================================================
// End-to-End Scenarios
// =============================================================================

#[test]
fn test_scenario_zoom_one() {
    let levels = compute_levels(1.0, 60.0);
    assert_eq!(levels.coarse.level, 0);
    assert!(levels.progress.abs() < 1e-12);
    assert!((levels.coarse.spacing_world - 60.0).abs() < 1e-12);
    assert!((levels.fine.spacing_world - 30.0).abs() < 1e-12);
    assert!((levels.coarse.opacity - 1.0).abs() < 1e-6);
    assert!(levels.fine.opacity.abs() < 1e-6);
}

#[test]
fn test_scenario_zoom_two_promotes_fine_layer() {
    let at_one = compute_levels(1.0, 60.0);
    let at_two = compute_levels(2.0, 60.0);
    assert_eq!(at_two.coarse.level, 1);
    assert!(at_two.progress.abs() < 1e-12);
    assert_eq!(at_two.coarse.spacing_world, at_one.fine.spacing_world);
    assert!((at_two.coarse.opacity - 1.0).abs() < 1e-6);
}

#[test]
fn test_scenario_zoom_point_three_uses_coarse_tier() {
    let mut engine = engine_with(EngineConfig::default());
    let mut surface = RecordingSurface::new();
    let viewport = Viewport::new(1280, 720).with_zoom(0.3);

    let stats = engine.render(&mut surface, &viewport).unwrap();
    let scene = stats.scene.unwrap();
    assert_eq!(scene.tier, DetailTier::Coarse);
    assert!(scene.drawn > 0);

    let noise = NoiseSource::new(42);
    let generator = SceneGenerator::new(&noise, &engine.config().scene);
    for (_, motif) in generator.collect(&viewport, DetailTier::Coarse) {
        assert!(matches!(motif, Motif::Constellation { .. } | Motif::Glyph(_)));
    }
}

#[test]
fn test_scenario_pan_reproduces_motifs() {
    let noise = NoiseSource::new(42);
    let config = SceneConfig {
        cell_size: 200.0,
        ..Default::default()
    };
    let generator = SceneGenerator::new(&noise, &config);

    // fine tier, wide enough to cross several path corridors
    let before = Viewport::new(1920, 1080).with_zoom(0.5);
    let after = before.with_pan(-700.0, 260.0);

    let first: HashMap<Cell, Motif> = generator
        .collect(&before, DetailTier::Fine)
        .into_iter()
        .collect();
    let second: HashMap<Cell, Motif> = generator
        .collect(&after, DetailTier::Fine)
        .into_iter()
        .collect();

    let after_cells = generator.visible_cells(&after, DetailTier::Fine);
    let mut shared = 0;
    for (cell, motif) in &first {
        if after_cells.contains(*cell) {
            assert_eq!(
                second.get(cell),
                Some(motif),
                "cell {:?} changed after pan",
                cell
            );
            shared += 1;
        }
    }
    assert!(shared > 0);
}

#[test]
fn test_redraw_is_bit_identical_without_jitter() {
    let viewport = Viewport::new(1024, 768)
        .with_pan(123.4, -56.7)
        .with_zoom(1.37);
    let mut first = engine_with(EngineConfig::default());
    let mut second = engine_with(EngineConfig::default());
    let mut a = RecordingSurface::new();
    let mut b = RecordingSurface::new();
    first.render(&mut a, &viewport).unwrap();
    second.render(&mut b, &viewport).unwrap();
    assert_eq!(a.paths(), b.paths());
}

// =============================================================================
// Octave Continuity
// =============================================================================

#[test]
fn test_octave_continuity_sweep() {
    for level in -6..6 {
        let boundary = 2f64.powi(level + 1);
        let below = compute_levels(boundary * (1.0 - 1e-12), 60.0);
        let at = compute_levels(boundary, 60.0);

        let jump = (below.fine.spacing_world - at.coarse.spacing_world).abs();
        let rel = jump / at.coarse.spacing_world;
        assert!(rel < 1e-9, "level {}: spacing jump {}", level, rel);
        assert!(below.fine.opacity > 0.999);
        assert!(at.coarse.opacity > 0.999);
    }
}

#[test]
fn test_opacity_monotonic_within_octave() {
    let mut prev = compute_levels(1.0, 60.0);
    for i in 1..200 {
        let zoom = 1.0 + i as f64 / 200.0;
        let next = compute_levels(zoom, 60.0);
        assert!(next.coarse.opacity <= prev.coarse.opacity + 1e-6);
        assert!(next.fine.opacity >= prev.fine.opacity - 1e-6);
        assert!((0.0..=1.0).contains(&next.coarse.opacity));
        assert!((0.0..=1.0).contains(&next.fine.opacity));
        prev = next;
    }
}

// =============================================================================
// Grid Phase & Batching
// =============================================================================

#[test]
fn test_grid_phase_invariant_under_whole_period_pan() {
    let mut engine = engine_with(grid_only());
    let base = Viewport::new(640, 480);

    let mut at_origin = RecordingSurface::new();
    engine.render(&mut at_origin, &base).unwrap();

    for k in [-3.0, 1.0, 7.0] {
        let mut shifted = RecordingSurface::new();
        let viewport = base.with_pan(k * 60.0, 0.0);
        engine.render(&mut shifted, &viewport).unwrap();

        let a = dot_centers(&at_origin, 0);
        let b = dot_centers(&shifted, 0);
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(&b) {
            assert!((p.x - q.x).abs() < 1e-6 && (p.y - q.y).abs() < 1e-6);
        }
    }
}

#[test]
fn test_grid_marks_sit_on_world_lattice() {
    let mut engine = engine_with(grid_only());
    let viewport = Viewport::new(800, 600).with_pan(-17.0, 41.0).with_zoom(1.5);
    let mut surface = RecordingSurface::new();
    let stats = engine.render(&mut surface, &viewport).unwrap();
    let spacing = stats.levels.unwrap().coarse.spacing_world;

    for center in surface.paths()[0].arc_centers() {
        let world = viewport.screen_to_world(center);
        let fx = world.x / spacing;
        let fy = world.y / spacing;
        assert!((fx - fx.round()).abs() < 1e-9);
        assert!((fy - fy.round()).abs() < 1e-9);
    }
}

#[test]
fn test_dots_batched_one_fill_per_layer() {
    let mut engine = engine_with(grid_only());
    let mut surface = RecordingSurface::new();
    engine
        .render(&mut surface, &Viewport::new(1920, 1080).with_zoom(1.5))
        .unwrap();
    assert_eq!(surface.fill_count(), 2);
    assert_eq!(surface.stroke_count(), 0);
}

#[test]
fn test_lines_batched_one_stroke_per_layer() {
    let mut config = grid_only();
    config.style.variant = GridVariant::Lines;
    let mut engine = engine_with(config);
    let mut surface = RecordingSurface::new();
    engine
        .render(&mut surface, &Viewport::new(1920, 1080).with_zoom(0.7))
        .unwrap();
    assert_eq!(surface.stroke_count(), 2);
    assert_eq!(surface.fill_count(), 0);
    assert!(surface.paths().iter().all(|p| p.kind == PaintKind::Stroke));
}

#[test]
fn test_scene_adds_one_fill_and_one_stroke() {
    let mut engine = engine_with(EngineConfig::default());
    let mut surface = RecordingSurface::new();
    engine
        .render(&mut surface, &Viewport::new(1280, 720).with_zoom(0.25))
        .unwrap();
    // grid layer A and B (t = 0 at zoom 0.25, so only A) plus scene fill/stroke
    assert_eq!(surface.fill_count(), 2);
    assert_eq!(surface.stroke_count(), 1);
}

// =============================================================================
// Cell Culling
// =============================================================================

#[test]
fn test_culling_matches_brute_force() {
    let cell_size = 200.0;
    let viewports = [
        Viewport::new(1280, 720),
        Viewport::new(1280, 720)
            .with_pan(-1234.5, 987.6)
            .with_zoom(0.73),
        Viewport::new(333, 999)
            .with_pan(40_000.0, -80_000.0)
            .with_zoom(2.9),
        Viewport::new(1920, 1080)
            .with_pan(199.999, 0.001)
            .with_zoom(0.5),
    ];

    for viewport in viewports {
        let visible = viewport.visible_world_rect();
        let range = CellRange::covering(&visible, cell_size, 1);
        let expanded = visible.expand(cell_size);

        let col0 = (expanded.x / cell_size).floor() as i64 - 3;
        let col1 = (expanded.right() / cell_size).ceil() as i64 + 3;
        let row0 = (expanded.y / cell_size).floor() as i64 - 3;
        let row1 = (expanded.bottom() / cell_size).ceil() as i64 + 3;

        let mut expected = 0u64;
        for row in row0..=row1 {
            for col in col0..=col1 {
                let cell = Cell::new(col, row);
                let hit = cell.bounds(cell_size).intersects(&expanded);
                assert_eq!(range.contains(cell), hit, "cell {:?}", cell);
                expected += u64::from(hit);
            }
        }
        assert_eq!(range.len(), expected);

        // bounded overscan: visible cells plus the margin ring
        let max_cols = (visible.width / cell_size).ceil() as u64 + 3;
        let max_rows = (visible.height / cell_size).ceil() as u64 + 3;
        assert!(range.len() <= max_cols * max_rows);
    }
}

// =============================================================================
// Error Handling & Disabled Style
// =============================================================================

#[test]
fn test_invalid_viewport_rejected_without_drawing() {
    let mut engine = engine_with(EngineConfig::default());
    let mut surface = RecordingSurface::new();
    let bad = [
        Viewport::default().with_zoom(0.0),
        Viewport::default().with_zoom(-2.0),
        Viewport::default().with_zoom(f64::NAN),
        Viewport::default().with_pan(f64::INFINITY, 0.0),
    ];
    for viewport in bad {
        let err = engine.render(&mut surface, &viewport).unwrap_err();
        assert!(matches!(err, BackdropError::InvalidViewport { .. }));
    }
    assert_eq!(surface.clear_count(), 0);
    assert!(surface.is_blank());
}

#[test]
fn test_disabled_style_draws_nothing() {
    let mut config = EngineConfig::default();
    config.style.enabled = false;
    let mut engine = engine_with(config);
    let mut surface = RecordingSurface::new();
    let stats = engine.render(&mut surface, &Viewport::default()).unwrap();
    assert!(!stats.is_drawn());
    assert_eq!(surface.clear_count(), 0);
}

#[test]
fn test_far_pan_stays_finite() {
    let mut engine = BackdropEngine::new(EngineConfig::default()).unwrap();
    for (pan, zoom) in [(1e9, 0.3), (-3.7e12, 1.0), (8.1e15, 3.9)] {
        let viewport = Viewport::new(800, 600).with_pan(pan, -pan).with_zoom(zoom);
        let mut surface = RecordingSurface::new();
        engine.render(&mut surface, &viewport).unwrap();
        for path in surface.paths() {
            assert!(path.points().all(|p| p.is_finite()));
        }
    }
}

// =============================================================================
// Jitter
// =============================================================================

#[test]
fn test_jitter_only_moves_limb_vertices() {
    let noise = NoiseSource::new(42);
    let config = SceneConfig::default();
    let generator = SceneGenerator::new(&noise, &config);
    let viewport = Viewport::new(1600, 900).with_zoom(1.0);

    let mut straight = RecordingSurface::new();
    let mut wobbly = RecordingSurface::new();
    generator.render(&mut straight, &viewport, &mut JitterStream::off());
    generator.render(&mut wobbly, &viewport, &mut JitterStream::seeded(5));

    // fills (heads, bodies) are identical, strokes share structure
    assert_eq!(straight.paths()[0], wobbly.paths()[0]);
    assert_eq!(
        straight.paths()[1].segments.len(),
        wobbly.paths()[1].segments.len()
    );
    assert_ne!(straight.paths()[1], wobbly.paths()[1]);
}

#[test]
fn test_seeded_jitter_is_reproducible() {
    let config = EngineConfig::default().with_jitter(JitterMode::Seeded);
    let viewport = Viewport::new(1600, 900);
    let mut a = RecordingSurface::new();
    let mut b = RecordingSurface::new();
    let mut first = BackdropEngine::new(config.clone()).unwrap();
    let mut second = BackdropEngine::new(config).unwrap();
    first.render(&mut a, &viewport).unwrap();
    second.render(&mut b, &viewport).unwrap();
    assert_eq!(a.paths(), b.paths());
}

// =============================================================================
// Configuration, Themes & Persistence
// =============================================================================

#[test]
fn test_engine_from_json_and_theme() {
    let json = r#"{
        "seed": 7,
        "jitter": "off",
        "style": { "variant": "lines", "baseGap": 40 },
        "scene": { "enabled": false }
    }"#;
    let mut engine = BackdropEngine::from_json(json).unwrap();
    let blueprint = CanvasTheme::from_id("blueprint").unwrap();
    engine.apply_theme(blueprint);

    let mut surface = RecordingSurface::new();
    let stats = engine
        .render(&mut surface, &Viewport::new(500, 500).with_zoom(1.0))
        .unwrap();
    assert!((stats.levels.unwrap().coarse.spacing_world - 40.0).abs() < 1e-12);
    assert_eq!(surface.background(), Some(blueprint.background));
    assert_eq!(surface.stroke_count(), 1);
}

#[test]
fn test_snapshot_restores_identical_frame() {
    let viewport = Viewport::new(900, 700).with_zoom(0.4);
    let mut original = engine_with(EngineConfig::default().with_seed(31337));
    let gruvbox = CanvasTheme::from_id("gruvbox").unwrap();
    let style = BackgroundStyle::from_theme(gruvbox);
    original.set_style(style).unwrap();
    let json = original.snapshot(Some("gruvbox")).to_json().unwrap();

    let mut restored = engine_with(EngineConfig::default());
    let snapshot = BackdropSnapshot::from_json(&json).unwrap();
    restored.restore(&snapshot).unwrap();

    let mut a = RecordingSurface::new();
    let mut b = RecordingSurface::new();
    original.render(&mut a, &viewport).unwrap();
    restored.render(&mut b, &viewport).unwrap();
    assert_eq!(a.paths(), b.paths());
}

#[test]
fn test_svg_export_of_full_frame() {
    let mut engine = engine_with(EngineConfig::default());
    engine.apply_theme(CanvasTheme::from_id("light").unwrap());
    let mut surface = RecordingSurface::new();
    let viewport = Viewport::new(320, 240);
    engine.render(&mut surface, &viewport).unwrap();

    let doc = svg::render_svg(&surface, 320, 240);
    assert!(doc.starts_with("<svg"));
    assert!(doc.contains(r##"fill="#ffffff""##));
    assert_eq!(doc.matches("<path").count(), surface.paths().len());
}
