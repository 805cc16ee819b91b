//! SVG Rendering Module
//!
//! Turns a `DerivedGeometry` snapshot into a standalone SVG document
//! (`800×500` viewBox) and provides a consumer that writes it to disk on
//! every recomputation.

use std::fs;
use std::path::PathBuf;

use log::info;

use crate::diagram::{AngleArc, DerivedGeometry, Label, TextAnchor};
use crate::error::SpacingError;
use crate::geo::{CANVAS_HEIGHT, CANVAS_WIDTH, GROUND_Y, Point, Segment};
use crate::state::GeometryConsumer;
use crate::sun::{SUN_INNER_RADIUS, SUN_OUTER_RADIUS};

// ===================== STYLES =====================

const PANEL_FILL: &str = "#1E90FF";
const SHADOW_STROKE: &str = "#555";
const SUN_YELLOW: &str = "#FFD700";
const SUN_ORANGE: &str = "#FF8C00";

/// Stroke attributes for a line
struct Stroke {
    color: &'static str,
    width: f64,
    dash: Option<&'static str>,
}

impl Stroke {
    const fn solid(color: &'static str, width: f64) -> Self {
        Self { color, width, dash: None }
    }

    const fn dashed(color: &'static str, width: f64, dash: &'static str) -> Self {
        Self { color, width, dash: Some(dash) }
    }

    fn attrs(&self) -> String {
        match self.dash {
            Some(dash) => format!(
                r#"stroke="{}" stroke-width="{}" stroke-dasharray="{}""#,
                self.color, self.width, dash
            ),
            None => format!(r#"stroke="{}" stroke-width="{}""#, self.color, self.width),
        }
    }
}

/// Legend entries: (text, color)
const LEGEND: [(&str, &str); 8] = [
    ("D: Distance A to B", "#FF0000"),
    ("CB: Shadow length", "#800080"),
    ("H: Panel height", "#008000"),
    ("β: Panel tilt angle", "#9932CC"),
    ("α: Solar altitude", "#FFA500"),
    ("L: Panel length", "#0000FF"),
    ("---: Shadow line", "#555"),
    ("····: Sun ray", "#FFD700"),
];

// ===================== PRIMITIVES =====================

fn fmt(v: f64) -> String {
    let s = format!("{:.2}", v);
    // Trim trailing zeros to keep the markup short
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn line(seg: &Segment, stroke: &Stroke) -> String {
    format!(
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {} />"#,
        fmt(seg.from.x),
        fmt(seg.from.y),
        fmt(seg.to.x),
        fmt(seg.to.y),
        stroke.attrs()
    )
}

fn points_attr(points: &[Point]) -> String {
    points.iter().map(|p| format!("{},{}", fmt(p.x), fmt(p.y))).collect::<Vec<_>>().join(" ")
}

/// Closed path through the given points
fn closed_path(points: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{}{},{} ", cmd, fmt(p.x), fmt(p.y)));
    }
    d.push('Z');
    d
}

fn arc(a: &AngleArc, color: &str) -> String {
    format!(
        r#"<path d="M{},{} A{},{} 0 0,{} {},{}" fill="none" stroke="{}" stroke-width="2" />"#,
        fmt(a.start.x),
        fmt(a.start.y),
        fmt(a.radius),
        fmt(a.radius),
        u8::from(a.sweep),
        fmt(a.end.x),
        fmt(a.end.y),
        color
    )
}

fn circle(center: Point, r: f64, attrs: &str) -> String {
    format!(r#"<circle cx="{}" cy="{}" r="{}" {} />"#, fmt(center.x), fmt(center.y), fmt(r), attrs)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn text(label: &Label) -> String {
    let anchor = match label.align {
        TextAnchor::Start => "",
        TextAnchor::Middle => r#" text-anchor="middle""#,
    };
    let weight = if label.bold { r#" font-weight="bold""# } else { "" };
    format!(
        r#"<text x="{}" y="{}" font-size="{}"{}{} fill="{}">{}</text>"#,
        fmt(label.anchor.x),
        fmt(label.anchor.y),
        fmt(label.font_size),
        anchor,
        weight,
        label.color,
        escape(&label.text)
    )
}

// ===================== DOCUMENT =====================

/// Render the complete diagram as an SVG document
pub fn render(geometry: &DerivedGeometry) -> String {
    let d = &geometry.diagram;
    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = fmt(CANVAS_WIDTH),
        h = fmt(CANVAS_HEIGHT)
    ));
    svg.push('\n');

    let mut push = |element: String| {
        svg.push_str("  ");
        svg.push_str(&element);
        svg.push('\n');
    };

    // Ground
    push(line(&Segment::horizontal(50.0, 750.0, GROUND_Y), &Stroke::solid("#333", 2.0)));

    // Shadow triangle and shadow line
    push(format!(
        r#"<polygon points="{}" fill="rgba(100, 100, 100, 0.1)" {} />"#,
        points_attr(&d.shadow_triangle),
        Stroke::dashed(SHADOW_STROKE, 1.0, "4,2").attrs()
    ));
    push(line(&d.shadow_line, &Stroke::dashed(SHADOW_STROKE, 2.5, "6,3")));

    // Panels
    for outline in [&d.panel1, &d.panel2] {
        push(format!(
            r##"<path d="{}" fill="{}" stroke="#000" />"##,
            closed_path(outline),
            PANEL_FILL
        ));
    }

    // Sun and its ray
    push(circle(
        d.sun.center,
        SUN_OUTER_RADIUS,
        &format!(r#"fill="{}" stroke="{}" stroke-width="2""#, SUN_YELLOW, SUN_ORANGE),
    ));
    push(circle(d.sun.center, SUN_INNER_RADIUS, &format!(r#"fill="{}""#, SUN_ORANGE)));
    push(line(&d.sun_ray, &Stroke::dashed(SUN_YELLOW, 2.5, "6,3")));

    // Markers and dimension lines
    push(line(&d.height_marker, &Stroke::dashed("#008000", 2.0, "4,2")));
    push(line(&d.length_marker, &Stroke::dashed("#0000FF", 1.5, "3,1")));
    push(line(&d.point_c_marker, &Stroke::dashed("#800080", 1.5, "4,2")));
    push(line(&d.extension_dimension, &Stroke::solid("#800080", 1.5)));
    push(line(&d.width_dimension, &Stroke::solid("#0000FF", 1.5)));
    push(line(&d.spacing_dimension, &Stroke::solid("#FF0000", 2.0)));
    push(line(&d.baseline, &Stroke::dashed(SHADOW_STROKE, 1.5, "4,2")));

    // Ground points A, C, B
    let [point_a, point_c, point_b] = d.ground_points;
    push(circle(point_a, 4.0, r##"fill="#000""##));
    push(circle(point_c, 4.0, r##"fill="#800080""##));
    push(circle(point_b, 4.0, r##"fill="#000""##));

    // Angle arcs
    push(arc(&d.tilt_arc, "#9932CC"));
    push(arc(&d.altitude_arc, "#FFA500"));

    for label in &d.labels {
        push(text(label));
    }

    // Legend
    push(r##"<rect x="600" y="50" width="150" height="280" fill="white" stroke="#333" />"##.to_string());
    push(r#"<text x="610" y="70" font-size="14" font-weight="bold">Legend:</text>"#.to_string());
    for (i, (entry, color)) in LEGEND.iter().enumerate() {
        push(format!(
            r#"<text x="610" y="{}" font-size="14" fill="{}">{}</text>"#,
            95 + 20 * i,
            color,
            escape(entry)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

// ===================== FILE CONSUMER =====================

/// Rewrites an SVG file on every published snapshot
pub struct SvgFile {
    path: PathBuf,
}

impl SvgFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GeometryConsumer for SvgFile {
    fn publish(&mut self, geometry: &DerivedGeometry) -> Result<(), SpacingError> {
        fs::write(&self.path, render(geometry))
            .map_err(|source| SpacingError::WriteDiagram { path: self.path.clone(), source })?;
        info!("wrote diagram to {}", self.path.display());
        Ok(())
    }
}

// ===================== TESTS =====================
