//! Drawing Frame and Panel Geometry Module
//!
//! Screen-space construction of the two-row diagram: the fixed canvas frame,
//! the tilted panel bodies, and the shadow cast by the front row.
//!
//! The drawn panel is always `PANEL_WIDTH` pixels long whatever the physical
//! panel length is. Physical lengths are recovered with the scale factor
//! `panel_length / PANEL_WIDTH` (see `spacing`).

use serde::Serialize;

// ===================== CONSTANTS =====================

/// Canvas width in pixels
pub const CANVAS_WIDTH: f64 = 800.0;

/// Canvas height in pixels
pub const CANVAS_HEIGHT: f64 = 500.0;

/// Y coordinate of the ground line (y grows downward)
pub const GROUND_Y: f64 = 350.0;

/// On-screen length of a panel body in pixels
pub const PANEL_WIDTH: f64 = 200.0;

/// On-screen thickness of a panel body in pixels
pub const PANEL_THICKNESS: f64 = 10.0;

/// X coordinate of the front row's base (point A)
pub const PANEL1_X: f64 = 100.0;

/// Smallest tangent used as a divisor when projecting shadows
pub const MIN_TAN: f64 = 1e-9;

// ===================== TYPES =====================

/// A point in the drawing frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point on the ground line at `x`
    pub const fn on_ground(x: f64) -> Self {
        Self { x, y: GROUND_Y }
    }
}

/// A straight line between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Horizontal segment at height `y` between `x1` and `x2`
    pub const fn horizontal(x1: f64, x2: f64, y: f64) -> Self {
        Self { from: Point::new(x1, y), to: Point::new(x2, y) }
    }

    /// Angle of the segment above the horizontal, in degrees
    ///
    /// Measured from `to` looking back at `from`, so a sun ray drawn from the
    /// sun down to the panel top reports the sun's apparent elevation.
    pub fn elevation_deg(&self) -> f64 {
        let dx = (self.from.x - self.to.x).abs();
        let dy = self.to.y - self.from.y;
        dy.atan2(dx).to_degrees()
    }
}

/// Four corners of a drawn panel body, in drawing order
pub type PanelOutline = [Point; 4];

// ===================== PANEL GEOMETRY =====================

/// Physical vertical rise of the panel's top edge (meters)
///
/// # Arguments
/// * `panel_length_m` - Physical panel length in meters
/// * `tilt_deg` - Panel tilt from horizontal in degrees
pub fn panel_height(panel_length_m: f64, tilt_deg: f64) -> f64 {
    panel_length_m * tilt_deg.to_radians().sin()
}

/// Top edge of a panel whose base sits on the ground at `base_x` (point E for
/// the front row)
pub fn top_of_panel(base_x: f64, tilt_deg: f64) -> Point {
    let tilt = tilt_deg.to_radians();
    Point::new(base_x + PANEL_WIDTH * tilt.cos(), GROUND_Y - PANEL_WIDTH * tilt.sin())
}

/// Ground projection of the panel's top edge (point C)
pub fn top_projection_x(base_x: f64, tilt_deg: f64) -> f64 {
    top_of_panel(base_x, tilt_deg).x
}

/// Thin tilted rectangle anchored at `(base_x, GROUND_Y)`.
///
/// Corners are base, top, top offset by the thickness along the panel normal,
/// and base offset likewise. The polygon closes back to the base.
pub fn panel_outline(base_x: f64, tilt_deg: f64) -> PanelOutline {
    let tilt = tilt_deg.to_radians();
    let (sin, cos) = tilt.sin_cos();

    let base = Point::on_ground(base_x);
    let top = top_of_panel(base_x, tilt_deg);
    let top_back = Point::new(top.x + PANEL_THICKNESS * sin, top.y + PANEL_THICKNESS * cos);
    let base_back = Point::new(base.x + PANEL_THICKNESS * sin, base.y + PANEL_THICKNESS * cos);

    [base, top, top_back, base_back]
}

// ===================== SHADOW GEOMETRY =====================

/// X coordinate where the shadow of a panel's top edge meets the ground
/// (point B for the front row).
///
/// The tangent of the sun altitude is floored at `MIN_TAN`, so a sun on the
/// horizon yields a very long but finite shadow.
pub fn shadow_end_x(base_x: f64, tilt_deg: f64, altitude_deg: f64) -> f64 {
    let top = top_of_panel(base_x, tilt_deg);
    let tan = altitude_deg.to_radians().tan().max(MIN_TAN);
    let shadow_length = (top.y - GROUND_Y).abs() / tan;
    top.x + shadow_length
}

/// Line from the top of the panel to the end of its shadow
pub fn shadow_line(base_x: f64, tilt_deg: f64, altitude_deg: f64) -> Segment {
    Segment::new(
        top_of_panel(base_x, tilt_deg),
        Point::on_ground(shadow_end_x(base_x, tilt_deg, altitude_deg)),
    )
}

/// Triangle spanned by the panel base, the panel top and the shadow end
pub fn shadow_triangle(base_x: f64, tilt_deg: f64, altitude_deg: f64) -> [Point; 3] {
    let line = shadow_line(base_x, tilt_deg, altitude_deg);
    [Point::on_ground(base_x), line.from, line.to]
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;

    fn length(seg: Segment) -> f64 {
        (seg.to.x - seg.from.x).hypot(seg.to.y - seg.from.y)
    }

    #[test]
    fn test_panel_height_matches_sine() {
        for tilt in 0..=60 {
            let tilt = tilt as f64;
            for length in [1.0, 1.13, 1.75, 2.5] {
                let expected = length * tilt.to_radians().sin();
                assert!((panel_height(length, tilt) - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_flat_panel_lies_on_ground() {
        let top = top_of_panel(PANEL1_X, 0.0);
        assert!((top.y - GROUND_Y).abs() < 1e-12);
        assert!((top.x - (PANEL1_X + PANEL_WIDTH)).abs() < 1e-12);
        assert_eq!(panel_height(2.0, 0.0), 0.0);
    }

    #[test]
    fn test_top_of_panel_keeps_screen_length() {
        for tilt in [0.0, 15.0, 24.0, 45.0, 60.0] {
            let top = top_of_panel(PANEL1_X, tilt);
            let drawn = length(Segment::new(Point::on_ground(PANEL1_X), top));
            assert!((drawn - PANEL_WIDTH).abs() < 1e-9, "tilt {} drew {}", tilt, drawn);
            assert!(top.y <= GROUND_Y);
        }
    }

    #[test]
    fn test_panel_outline_corners() {
        let outline = panel_outline(PANEL1_X, 30.0);
        assert_eq!(outline[0], Point::on_ground(PANEL1_X));
        assert_eq!(outline[1], top_of_panel(PANEL1_X, 30.0));

        // Opposite edges are parallel and the short edges have the thickness
        let short_a = length(Segment::new(outline[1], outline[2]));
        let short_b = length(Segment::new(outline[3], outline[0]));
        assert!((short_a - PANEL_THICKNESS).abs() < 1e-9);
        assert!((short_b - PANEL_THICKNESS).abs() < 1e-9);
        let long_b = length(Segment::new(outline[2], outline[3]));
        assert!((long_b - PANEL_WIDTH).abs() < 1e-9);

        // Thickness goes below the top surface
        assert!(outline[3].y > outline[0].y);
    }

    #[test]
    fn test_flat_panel_has_no_shadow() {
        for altitude in [5.0, 20.0, 45.0] {
            let end = shadow_end_x(PANEL1_X, 0.0, altitude);
            assert!((end - top_projection_x(PANEL1_X, 0.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_shadow_end_at_45_degrees_equals_rise() {
        // At 45° altitude the shadow beyond C is exactly as long as the rise
        let tilt = 30.0;
        let top = top_of_panel(PANEL1_X, tilt);
        let end = shadow_end_x(PANEL1_X, tilt, 45.0);
        assert!(((end - top.x) - (GROUND_Y - top.y)).abs() < 1e-9);
    }

    #[test]
    fn test_shadow_end_guards_horizon_sun() {
        let end = shadow_end_x(PANEL1_X, 30.0, 0.0);
        assert!(end.is_finite());
        assert!(end > 1e9);
    }

    #[test]
    fn test_shadow_triangle_vertices() {
        let tri = shadow_triangle(PANEL1_X, 24.0, 42.0);
        assert_eq!(tri[0], Point::on_ground(PANEL1_X));
        assert_eq!(tri[1], top_of_panel(PANEL1_X, 24.0));
        assert_eq!(tri[2].y, GROUND_Y);
        assert!((tri[2].x - shadow_end_x(PANEL1_X, 24.0, 42.0)).abs() < 1e-12);
    }

    #[test]
    fn test_shadow_line_reproduces_altitude() {
        for altitude in [5.0, 18.0, 33.0, 45.0] {
            let line = shadow_line(PANEL1_X, 40.0, altitude);
            // The shadow line descends from the top at the sun's altitude
            let angle = (line.to.y - line.from.y).atan2(line.to.x - line.from.x).to_degrees();
            assert!((angle - altitude).abs() < 1e-9, "got {} for {}", angle, altitude);
        }
    }
}
