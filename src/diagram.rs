//! Diagram Construction Module
//!
//! Collects every coordinate the renderer needs into one `DerivedGeometry`
//! snapshot, computed from a single input triple so that the numbers, the
//! drawing and the derivation always agree.

use serde::Serialize;

use crate::geo::{self, GROUND_Y, PANEL1_X, PanelOutline, Point, Segment};
use crate::spacing::{self, DerivedMetrics, SpacingInputs};
use crate::sun::{self, SunPosition};

/// Vertical offsets of the dimension lines below the ground
const BASELINE_OFFSET: f64 = 10.0;
const WIDTH_DIMENSION_OFFSET: f64 = 20.0;
const EXTENSION_DIMENSION_OFFSET: f64 = 40.0;
const SPACING_DIMENSION_OFFSET: f64 = 70.0;

const TILT_ARC_RADIUS: f64 = 30.0;
const ALTITUDE_ARC_RADIUS: f64 = 40.0;

// ===================== TYPES =====================

/// Circular arc marking an angle, as drawn by an SVG `A` command
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleArc {
    pub start: Point,
    pub end: Point,
    pub radius: f64,
    /// SVG sweep flag (true = clockwise on screen)
    pub sweep: bool,
}

/// Horizontal alignment of a label around its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAnchor {
    Start,
    Middle,
}

/// A text label placed in the drawing frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub anchor: Point,
    pub text: String,
    pub font_size: f64,
    pub color: &'static str,
    pub bold: bool,
    pub align: TextAnchor,
}

impl Label {
    fn new(anchor: Point, text: impl Into<String>, font_size: f64, color: &'static str) -> Self {
        Self { anchor, text: text.into(), font_size, color, bold: false, align: TextAnchor::Start }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn centered(mut self) -> Self {
        self.align = TextAnchor::Middle;
        self
    }
}

/// Every primitive of the two-row diagram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram {
    pub panel1: PanelOutline,
    pub panel2: PanelOutline,
    /// Base x of the back row (point B)
    pub panel2_x: f64,
    pub shadow_triangle: [Point; 3],
    pub shadow_line: Segment,
    pub sun: SunPosition,
    pub sun_ray: Segment,
    /// Vertical from A up to the height of E
    pub height_marker: Segment,
    /// A to E along the panel
    pub length_marker: Segment,
    /// E straight down to C
    pub point_c_marker: Segment,
    /// A to C, below the ground
    pub width_dimension: Segment,
    /// C to B, below the ground
    pub extension_dimension: Segment,
    /// A to the back row base, below the ground
    pub spacing_dimension: Segment,
    /// A to B, just under the ground line
    pub baseline: Segment,
    pub tilt_arc: AngleArc,
    pub altitude_arc: AngleArc,
    /// Ground points A, C and B
    pub ground_points: [Point; 3],
    pub labels: Vec<Label>,
}

/// One consistent snapshot of inputs, metrics and drawing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedGeometry {
    pub inputs: SpacingInputs,
    pub metrics: DerivedMetrics,
    pub diagram: Diagram,
}

impl DerivedGeometry {
    pub fn compute(inputs: SpacingInputs) -> Self {
        let metrics = DerivedMetrics::compute(&inputs);
        let diagram = Diagram::build(&inputs, &metrics);
        Self { inputs, metrics, diagram }
    }
}

// ===================== CONSTRUCTION =====================

impl Diagram {
    pub fn build(inputs: &SpacingInputs, metrics: &DerivedMetrics) -> Self {
        let tilt = inputs.tilt_deg;
        let altitude = inputs.altitude_deg;

        let point_a = Point::on_ground(PANEL1_X);
        let point_e = geo::top_of_panel(PANEL1_X, tilt);
        let point_c = Point::on_ground(point_e.x);
        let shadow_line = geo::shadow_line(PANEL1_X, tilt, altitude);
        let point_b = shadow_line.to;
        let panel2_x = spacing::back_row_x(tilt, altitude);

        let sun = sun::place_sun(tilt, altitude);
        let sun_ray = sun::sun_ray(&sun, tilt);

        let below = |offset: f64, from: f64, to: f64| Segment::horizontal(from, to, GROUND_Y + offset);

        let tilt_arc = AngleArc {
            start: Point::new(PANEL1_X + 20.0, GROUND_Y),
            end: Point::new(PANEL1_X + 40.0, GROUND_Y - 20.0),
            radius: TILT_ARC_RADIUS,
            sweep: false,
        };
        let altitude_arc = AngleArc {
            start: Point::new(point_b.x - 40.0, GROUND_Y),
            end: Point::new(point_b.x - 20.0, GROUND_Y - 20.0),
            radius: ALTITUDE_ARC_RADIUS,
            sweep: true,
        };

        let labels = build_labels(inputs, metrics, &sun, point_a, point_e, point_b, panel2_x);

        Self {
            panel1: geo::panel_outline(PANEL1_X, tilt),
            panel2: geo::panel_outline(panel2_x, tilt),
            panel2_x,
            shadow_triangle: geo::shadow_triangle(PANEL1_X, tilt, altitude),
            shadow_line,
            sun,
            sun_ray,
            height_marker: Segment::new(point_a, Point::new(PANEL1_X, point_e.y)),
            length_marker: Segment::new(point_a, point_e),
            point_c_marker: Segment::new(point_e, point_c),
            width_dimension: below(WIDTH_DIMENSION_OFFSET, point_a.x, point_c.x),
            extension_dimension: below(EXTENSION_DIMENSION_OFFSET, point_c.x, point_b.x),
            spacing_dimension: below(SPACING_DIMENSION_OFFSET, point_a.x, panel2_x),
            baseline: below(BASELINE_OFFSET, point_a.x, point_b.x),
            tilt_arc,
            altitude_arc,
            ground_points: [point_a, point_c, point_b],
            labels,
        }
    }
}

fn build_labels(
    inputs: &SpacingInputs,
    metrics: &DerivedMetrics,
    sun: &SunPosition,
    point_a: Point,
    point_e: Point,
    point_b: Point,
    panel2_x: f64,
) -> Vec<Label> {
    let half_run = (point_e.x - point_a.x) / 2.0;
    let half_rise = (point_a.y - point_e.y) / 2.0;

    // Spacing label is recomputed from the drawn back row position so the
    // drawing labels itself
    let drawn_spacing = (panel2_x - PANEL1_X) * inputs.meters_per_pixel();

    vec![
        Label::new(Point::new(sun.center.x + 20.0, sun.center.y + 15.0), "S", 16.0, "#FFD700")
            .bold(),
        Label::new(
            Point::new(PANEL1_X - 25.0, (GROUND_Y + point_e.y) / 2.0),
            format!("H = {:.2}m", metrics.panel_height),
            16.0,
            "#008000",
        )
        .centered(),
        Label::new(
            Point::new(point_a.x + half_run - 10.0, GROUND_Y - half_rise - 10.0),
            format!("L = {:.1}m", inputs.panel_length_m),
            14.0,
            "#0000FF",
        ),
        Label::new(Point::new(point_e.x, GROUND_Y + 15.0), "C", 16.0, "#800080").bold().centered(),
        Label::new(
            Point::new((point_e.x + point_b.x) / 2.0, GROUND_Y + 55.0),
            format!("CB = {:.2} m", metrics.shadow_extension),
            14.0,
            "#800080",
        )
        .centered(),
        Label::new(
            Point::new(point_a.x + half_run, GROUND_Y + 35.0),
            format!("L·cos(β) = {:.2}m", metrics.effective_width),
            14.0,
            "#0000FF",
        )
        .centered(),
        Label::new(Point::new(point_a.x, GROUND_Y + 15.0), "A", 16.0, "#000").bold().centered(),
        Label::new(Point::new(point_b.x, GROUND_Y + 15.0), "B", 16.0, "#000").bold().centered(),
        Label::new(
            Point::new((PANEL1_X + panel2_x) / 2.0, GROUND_Y + 85.0),
            format!("D = {:.2} m", drawn_spacing),
            16.0,
            "#FF0000",
        )
        .centered(),
        Label::new(
            Point::new(PANEL1_X + 25.0, GROUND_Y - 15.0),
            format!("β={}°", inputs.tilt_deg),
            16.0,
            "#9932CC",
        ),
        Label::new(
            Point::new(point_b.x - 40.0, GROUND_Y - 25.0),
            format!("α={}°", inputs.altitude_deg),
            16.0,
            "#FFA500",
        ),
    ]
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::PANEL_WIDTH;

    fn geometry(length: f64, tilt: f64, altitude: f64) -> DerivedGeometry {
        DerivedGeometry::compute(SpacingInputs::clamped(length, tilt, altitude))
    }

    #[test]
    fn test_back_row_starts_at_shadow_end() {
        let g = geometry(1.13, 24.0, 42.0);
        let d = &g.diagram;
        assert_eq!(d.panel2[0], Point::on_ground(d.panel2_x));
        assert!((d.panel2_x - d.shadow_line.to.x).abs() < 1e-12);
        assert_eq!(d.ground_points[2], d.shadow_line.to);
    }

    #[test]
    fn test_back_row_matches_displayed_spacing() {
        for tilt in (0..=60).step_by(6) {
            for altitude in (5..=45).step_by(8) {
                let g = geometry(2.2, tilt as f64, altitude as f64);
                let expected =
                    PANEL1_X + g.metrics.inter_row_spacing * (PANEL_WIDTH / g.inputs.panel_length_m);
                assert!((g.diagram.panel2_x - expected).abs() < 1e-6);
                assert!((g.diagram.spacing_dimension.to.x - expected).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_panels_share_shape() {
        let g = geometry(1.5, 35.0, 15.0);
        let shift = g.diagram.panel2_x - PANEL1_X;
        for (a, b) in g.diagram.panel1.iter().zip(g.diagram.panel2.iter()) {
            assert!((b.x - a.x - shift).abs() < 1e-9);
            assert!((b.y - a.y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_dimension_lines_sit_below_ground() {
        let d = geometry(1.13, 24.0, 42.0).diagram;
        for seg in [d.baseline, d.width_dimension, d.extension_dimension, d.spacing_dimension] {
            assert_eq!(seg.from.y, seg.to.y);
            assert!(seg.from.y > GROUND_Y);
        }
        assert_eq!(d.width_dimension.to.x, d.extension_dimension.from.x);
        assert_eq!(d.height_marker.to.y, d.length_marker.to.y);
        assert_eq!(d.point_c_marker.to, d.ground_points[1]);
    }

    #[test]
    fn test_labels_show_rounded_metrics() {
        let g = geometry(1.13, 24.0, 42.0);
        let texts: Vec<&str> = g.diagram.labels.iter().map(|l| l.text.as_str()).collect();
        assert!(texts.contains(&"H = 0.46m"), "labels: {:?}", texts);
        assert!(texts.contains(&"L = 1.1m"));
        assert!(texts.contains(&"CB = 0.51 m"));
        assert!(texts.contains(&"D = 1.54 m"));
        assert!(texts.contains(&"L·cos(β) = 1.03m"));
        assert!(texts.contains(&"β=24°"));
        assert!(texts.contains(&"α=42°"));
    }

    #[test]
    fn test_sun_ray_ends_at_panel_top() {
        let g = geometry(1.0, 50.0, 30.0);
        assert_eq!(g.diagram.sun_ray.to, g.diagram.shadow_line.from);
        assert_eq!(g.diagram.sun_ray.from, g.diagram.sun.center);
    }

    #[test]
    fn test_altitude_arc_follows_shadow_end() {
        let d = geometry(1.8, 30.0, 12.0).diagram;
        assert!((d.altitude_arc.start.x - (d.shadow_line.to.x - 40.0)).abs() < 1e-12);
        assert!(d.altitude_arc.sweep);
        assert!(!d.tilt_arc.sweep);
    }
}
