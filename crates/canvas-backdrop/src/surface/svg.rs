//! SVG export of a recorded frame

use std::f64::consts::{PI, TAU};
use std::fmt::Write as _;

use super::{PaintKind, PathSegment, RecordingSurface};
use crate::math::Vec2;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Render recorded paths into a standalone SVG document
///
/// Strokes share round caps and joins through a wrapping group.
pub fn render_svg(recording: &RecordingSurface, width: u32, height: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="{SVG_NS}" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );

    if let Some(bg) = recording.background() {
        let _ = writeln!(
            out,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            bg.to_hex()
        );
    }

    out.push_str("  <g stroke-linecap=\"round\" stroke-linejoin=\"round\">\n");
    for path in recording.paths() {
        let d = path_data(&path.segments);
        if d.is_empty() {
            continue;
        }
        let alpha = path.alpha * path.color.alpha();
        let hex = path.color.to_hex();
        let color = hex.get(..7).unwrap_or("#000000");
        let paint = match path.kind {
            PaintKind::Fill => format!(r#"fill="{color}" fill-opacity="{alpha:.3}""#),
            PaintKind::Stroke => format!(
                r#"fill="none" stroke="{color}" stroke-opacity="{alpha:.3}" stroke-width="{:.3}""#,
                path.line_width
            ),
        };
        let _ = writeln!(out, r#"    <path d="{d}" {paint}/>"#);
    }
    out.push_str("  </g>\n");

    out.push_str("</svg>\n");
    out
}

/// Convert path segments to SVG path data
fn path_data(segments: &[PathSegment]) -> String {
    let mut d = String::new();
    let mut has_point = false;

    for segment in segments {
        match *segment {
            PathSegment::MoveTo(p) => {
                let _ = write!(d, "M{:.2} {:.2} ", p.x, p.y);
                has_point = true;
            }
            PathSegment::LineTo(p) => {
                let cmd = if has_point { 'L' } else { 'M' };
                let _ = write!(d, "{}{:.2} {:.2} ", cmd, p.x, p.y);
                has_point = true;
            }
            PathSegment::BezierTo { c1, c2, to } => {
                let _ = write!(
                    d,
                    "C{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} ",
                    c1.x, c1.y, c2.x, c2.y, to.x, to.y
                );
                has_point = true;
            }
            PathSegment::Arc {
                center,
                radius,
                start,
                end,
            } => {
                write_arc(&mut d, center, radius, start, end, has_point);
                has_point = true;
            }
            PathSegment::Close => d.push_str("Z "),
        }
    }

    d.trim_end().to_string()
}

/// Append an arc; full turns are split in two because SVG cannot draw a
/// closed circle with a single `A` command
fn write_arc(d: &mut String, center: Vec2, r: f64, start: f64, end: f64, has_point: bool) {
    let at = |angle: f64| center + Vec2::new(angle.cos(), angle.sin()) * r;
    let from = at(start);
    let cmd = if has_point { 'L' } else { 'M' };
    let _ = write!(d, "{}{:.2} {:.2} ", cmd, from.x, from.y);

    let sweep = end - start;
    if sweep.abs() >= TAU - 1e-9 {
        let mid = at(start + PI);
        let back = at(start);
        let _ = write!(
            d,
            "A{r:.2} {r:.2} 0 1 1 {:.2} {:.2} A{r:.2} {r:.2} 0 1 1 {:.2} {:.2} ",
            mid.x, mid.y, back.x, back.y
        );
    } else {
        let to = at(end);
        let large = u8::from(sweep.abs() > PI);
        let clockwise = u8::from(sweep > 0.0);
        let _ = write!(
            d,
            "A{r:.2} {r:.2} 0 {} {} {:.2} {:.2} ",
            large, clockwise, to.x, to.y
        );
    }
}
