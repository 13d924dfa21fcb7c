//! In-memory surface that records every painted path

use super::DrawSurface;
use crate::math::{Rgba, Vec2};

/// One path segment as issued by the engine
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    BezierTo { c1: Vec2, c2: Vec2, to: Vec2 },
    Arc {
        center: Vec2,
        radius: f64,
        start: f64,
        end: f64,
    },
    Close,
}

/// Whether a path was filled or stroked
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintKind {
    Fill,
    Stroke,
}

/// A path together with the paint state it was painted with
#[derive(Clone, Debug, PartialEq)]
pub struct PaintedPath {
    pub kind: PaintKind,
    pub color: Rgba,
    pub alpha: f32,
    pub line_width: f64,
    pub segments: Vec<PathSegment>,
}

impl PaintedPath {
    /// Centers of every arc in this path (dots, heads, circles)
    pub fn arc_centers(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.segments.iter().filter_map(|s| match s {
            PathSegment::Arc { center, .. } => Some(*center),
            _ => None,
        })
    }

    /// Every point this path touches (end points and arc centers)
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.segments.iter().filter_map(|s| match s {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => Some(*p),
            PathSegment::BezierTo { to, .. } => Some(*to),
            PathSegment::Arc { center, .. } => Some(*center),
            PathSegment::Close => None,
        })
    }

    /// Number of sub-paths (each starts with a move)
    pub fn subpath_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, PathSegment::MoveTo(_)))
            .count()
    }
}

/// Surface that keeps the painted paths instead of rasterizing them
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    fill: Rgba,
    stroke: Rgba,
    line_width: f64,
    alpha: f32,
    current: Vec<PathSegment>,
    paths: Vec<PaintedPath>,
    clears: usize,
    background: Option<Rgba>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    /// Create an empty recording
    pub fn new() -> Self {
        Self {
            fill: Rgba::rgb(0, 0, 0),
            stroke: Rgba::rgb(0, 0, 0),
            line_width: 1.0,
            alpha: 1.0,
            current: Vec::new(),
            paths: Vec::new(),
            clears: 0,
            background: None,
        }
    }

    /// All painted paths in paint order
    pub fn paths(&self) -> &[PaintedPath] {
        &self.paths
    }

    /// Number of fill operations
    pub fn fill_count(&self) -> usize {
        self.count(PaintKind::Fill)
    }

    /// Number of stroke operations
    pub fn stroke_count(&self) -> usize {
        self.count(PaintKind::Stroke)
    }

    /// Number of times the surface was cleared
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Background color of the last clear
    pub fn background(&self) -> Option<Rgba> {
        self.background
    }

    /// True when nothing has been painted
    pub fn is_blank(&self) -> bool {
        self.paths.is_empty()
    }

    fn count(&self, kind: PaintKind) -> usize {
        self.paths.iter().filter(|p| p.kind == kind).count()
    }

    fn paint(&mut self, kind: PaintKind) {
        if self.current.is_empty() {
            return;
        }
        let color = match kind {
            PaintKind::Fill => self.fill,
            PaintKind::Stroke => self.stroke,
        };
        self.paths.push(PaintedPath {
            kind,
            color,
            alpha: self.alpha,
            line_width: self.line_width,
            segments: self.current.clone(),
        });
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, _width: f64, _height: f64, background: Option<Rgba>) {
        self.paths.clear();
        self.current.clear();
        self.clears += 1;
        self.background = background;
    }

    fn set_fill(&mut self, color: Rgba) {
        self.fill = color;
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.stroke = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn begin_path(&mut self) {
        self.current.clear();
    }

    fn move_to(&mut self, p: Vec2) {
        self.current.push(PathSegment::MoveTo(p));
    }

    fn line_to(&mut self, p: Vec2) {
        self.current.push(PathSegment::LineTo(p));
    }

    fn bezier_to(&mut self, c1: Vec2, c2: Vec2, to: Vec2) {
        self.current.push(PathSegment::BezierTo { c1, c2, to });
    }

    fn arc(&mut self, center: Vec2, radius: f64, start: f64, end: f64) {
        self.current.push(PathSegment::Arc {
            center,
            radius,
            start,
            end,
        });
    }

    fn close_path(&mut self) {
        self.current.push(PathSegment::Close);
    }

    fn fill(&mut self) {
        self.paint(PaintKind::Fill);
    }

    fn stroke(&mut self) {
        self.paint(PaintKind::Stroke);
    }
}
