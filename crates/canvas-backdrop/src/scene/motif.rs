//! Per-cell motif selection
//!
//! A [`Motif`] is a short-lived description of what one cell draws, in
//! world units. Selection depends only on the world seed, the integer cell
//! coordinate and the scene configuration; cosmetic jitter is applied later
//! while painting.

use std::f64::consts::PI;

use super::cells::Cell;
use super::figures::{Figure, FigureAction};
use super::glyphs::{Glyph, GlyphKind, GLYPH_RADIUS_RATIO};
use super::{CoarseStyle, SceneConfig};
use crate::background::DetailTier;
use crate::math::Vec2;
use crate::noise::{CellHash, JitterStream, NoiseSource};
use crate::surface::DrawSurface;
use crate::viewport::Viewport;

/// Star radius in screen pixels
pub const STAR_RADIUS_PX: f64 = 2.0;

/// Stars scatter over this fraction of the cell
const STAR_SPREAD: f64 = 0.8;

/// Figure anchors sit within this fraction of the cell
const ANCHOR_SPREAD: f64 = 0.8;

/// Offset of the activity noise channel, decorrelating it from the path gate
const ACTIVITY_OFFSET: f64 = 100.0;

// Sub-hash indices; stars use `SALT_STARS + 2k` and `+ 2k + 1`
const SALT_STYLE: u64 = 0;
const SALT_ROTATION: u64 = 1;
const SALT_ANCHOR_X: u64 = 2;
const SALT_ANCHOR_Y: u64 = 3;
const SALT_STARS: u64 = 16;

/// Figure placement inside a cluster, relative to the anchor
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FigureSlot {
    pub offset: Vec2,
    pub scale: f64,
    pub action: FigureAction,
}

const PAIR: [FigureSlot; 2] = [
    FigureSlot {
        offset: Vec2::new(0.0, 0.0),
        scale: 1.0,
        action: FigureAction::Standing,
    },
    FigureSlot {
        offset: Vec2::new(30.0, 0.0),
        scale: 1.0,
        action: FigureAction::Walking,
    },
];

const SOLO: [FigureSlot; 1] = [FigureSlot {
    offset: Vec2::new(0.0, 0.0),
    scale: 1.0,
    action: FigureAction::Walking,
}];

const TRIAD: [FigureSlot; 3] = [
    FigureSlot {
        offset: Vec2::new(0.0, 0.0),
        scale: 0.9,
        action: FigureAction::Standing,
    },
    FigureSlot {
        offset: Vec2::new(25.0, 10.0),
        scale: 0.9,
        action: FigureAction::Sitting,
    },
    FigureSlot {
        offset: Vec2::new(-20.0, 5.0),
        scale: 0.9,
        action: FigureAction::Standing,
    },
];

/// Figure group composition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cluster {
    /// Two figures, one standing and one walking past
    Pair,
    /// A lone walker
    Solo,
    /// Three figures gathered, one sitting
    Triad,
}

impl Cluster {
    /// Pick a composition from the activity noise value
    pub fn for_activity(activity: f64, threshold: f64) -> Self {
        if activity > threshold {
            Cluster::Pair
        } else if activity < -threshold {
            Cluster::Solo
        } else {
            Cluster::Triad
        }
    }

    pub fn slots(&self) -> &'static [FigureSlot] {
        match self {
            Cluster::Pair => &PAIR,
            Cluster::Solo => &SOLO,
            Cluster::Triad => &TRIAD,
        }
    }
}

/// What one cell draws
#[derive(Clone, Debug, PartialEq)]
pub enum Motif {
    /// Scattered stars joined in index order
    Constellation { stars: Vec<Vec2> },
    /// One geometric template
    Glyph(Glyph),
    /// A cluster of figures around an anchor point
    Figures { cluster: Cluster, anchor: Vec2 },
}

impl Motif {
    /// Figures of a cluster motif, empty for other motifs
    pub fn figures(&self) -> impl Iterator<Item = Figure> + '_ {
        let (slots, anchor): (&[FigureSlot], Vec2) = match self {
            Motif::Figures { cluster, anchor } => (cluster.slots(), *anchor),
            _ => (&[], Vec2::ZERO),
        };
        slots
            .iter()
            .map(move |s| Figure::new(anchor + s.offset, s.scale, s.action))
    }

    /// Append the filled parts to the current path
    pub fn fill<S: DrawSurface + ?Sized>(&self, surface: &mut S, viewport: &Viewport) {
        match self {
            Motif::Constellation { stars } => {
                for star in stars {
                    surface.circle(viewport.world_to_screen(*star), STAR_RADIUS_PX);
                }
            }
            Motif::Glyph(glyph) => glyph.center_dot(surface, viewport),
            Motif::Figures { .. } => {
                for figure in self.figures() {
                    figure.fill_body(surface, viewport);
                }
            }
        }
    }

    /// Append the stroked parts to the current path
    pub fn stroke<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        viewport: &Viewport,
        jitter: &mut JitterStream,
    ) {
        match self {
            Motif::Constellation { stars } => {
                let points: Vec<Vec2> = stars
                    .iter()
                    .map(|s| viewport.world_to_screen(*s))
                    .collect();
                surface.polyline(&points);
            }
            Motif::Glyph(glyph) => glyph.outline(surface, viewport),
            Motif::Figures { .. } => {
                for figure in self.figures() {
                    figure.stroke_limbs(surface, viewport, jitter);
                }
            }
        }
    }
}

/// Decides what each cell draws
pub struct MotifSelector<'a> {
    noise: &'a NoiseSource,
    config: &'a SceneConfig,
}

impl<'a> MotifSelector<'a> {
    pub fn new(noise: &'a NoiseSource, config: &'a SceneConfig) -> Self {
        Self { noise, config }
    }

    #[inline]
    fn hash(&self, cell: Cell) -> CellHash {
        CellHash::of(self.noise.seed(), cell.col, cell.row)
    }

    /// Motif for `cell` in `tier`, `None` when the cell stays empty
    pub fn select(&self, cell: Cell, tier: DetailTier) -> Option<Motif> {
        match tier {
            DetailTier::Coarse => Some(self.coarse(cell)),
            DetailTier::Fine => self.fine(cell),
        }
    }

    /// Constellation or glyph; every coarse cell draws one
    pub fn coarse(&self, cell: Cell) -> Motif {
        let h = self.hash(cell);
        let size = self.config.coarse_cell_size;
        let center = cell.bounds(size).center();

        let constellation = match self.config.coarse_style {
            CoarseStyle::Constellation => true,
            CoarseStyle::Glyph => false,
            CoarseStyle::Mixed => h.sub(SALT_STYLE).unit() < 0.5,
        };

        if constellation {
            let count = 3 + h.pick(5);
            let stars = (0..count as u64)
                .map(|k| {
                    let sx = h.sub(SALT_STARS + 2 * k).centered();
                    let sy = h.sub(SALT_STARS + 2 * k + 1).centered();
                    center + Vec2::new(sx, sy) * (size * STAR_SPREAD)
                })
                .collect();
            Motif::Constellation { stars }
        } else {
            Motif::Glyph(Glyph {
                kind: GlyphKind::from_index(h.pick(4)),
                center,
                radius: size * GLYPH_RADIUS_RATIO,
                // quarter of a 60 degree symmetry step
                rotation: h.sub(SALT_ROTATION).pick(4) as f64 * (PI / 12.0),
            })
        }
    }

    /// Figure cluster if the cell lies on a noise path
    pub fn fine(&self, cell: Cell) -> Option<Motif> {
        let size = self.config.cell_size;
        let scale = self.config.noise_scale;
        let corner = Vec2::new(cell.col as f64 * size, cell.row as f64 * size);

        let gate = self.noise.noise(corner.x * scale, corner.y * scale);
        if gate.abs() >= self.config.path_band {
            return None;
        }

        let activity = self.noise.noise(
            corner.x * scale * 2.0 + ACTIVITY_OFFSET,
            corner.y * scale * 2.0 + ACTIVITY_OFFSET,
        );
        let cluster = Cluster::for_activity(activity, self.config.activity_threshold);

        let h = self.hash(cell);
        let anchor = corner
            + Vec2::new(h.sub(SALT_ANCHOR_X).unit(), h.sub(SALT_ANCHOR_Y).unit())
                * (size * ANCHOR_SPREAD);

        Some(Motif::Figures { cluster, anchor })
    }
}
