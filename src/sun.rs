//! Sun Placement Module
//!
//! Places the sun glyph along the critical ray through the top of the front
//! panel (point E). Placement is purely cosmetic: nothing here feeds back
//! into the physical metrics.

use serde::Serialize;

use crate::geo::{self, CANVAS_WIDTH, GROUND_Y, PANEL1_X, Point, Segment};

// ===================== CONSTANTS =====================

/// Distance from E to the unclamped sun centre (pixels)
pub const SUN_DISTANCE: f64 = 250.0;

/// Minimum gap kept between the sun centre and the canvas edges / ground
pub const SUN_MARGIN: f64 = 60.0;

/// Radius of the outer sun disc
pub const SUN_OUTER_RADIUS: f64 = 30.0;

/// Radius of the inner sun disc
pub const SUN_INNER_RADIUS: f64 = 20.0;

// ===================== PLACEMENT =====================

/// Where the sun is drawn, and where it would have been without clamping
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SunPosition {
    /// Centre after clamping into the visible area
    pub center: Point,
    /// Centre on the ray at `SUN_DISTANCE` from E
    pub candidate: Point,
    /// Whether the clamp moved the sun off the true ray
    pub clamped: bool,
}

/// Place the sun for the given panel tilt and solar altitude.
///
/// The ray leaves E at `180° − altitude`, i.e. up and back over the front
/// row. The candidate is then clamped to `[60, 740] × [60, 290]`.
pub fn place_sun(tilt_deg: f64, altitude_deg: f64) -> SunPosition {
    let anchor = geo::top_of_panel(PANEL1_X, tilt_deg);
    let ray_angle = (180.0 - altitude_deg).to_radians();

    let candidate = Point::new(
        anchor.x + SUN_DISTANCE * ray_angle.cos(),
        anchor.y - SUN_DISTANCE * ray_angle.sin(),
    );
    let center = clamp_to_sky(candidate);

    SunPosition { center, candidate, clamped: center != candidate }
}

/// Keep a sun centre inside the visible sky area
pub fn clamp_to_sky(p: Point) -> Point {
    Point::new(
        p.x.clamp(SUN_MARGIN, CANVAS_WIDTH - SUN_MARGIN),
        p.y.clamp(SUN_MARGIN, GROUND_Y - SUN_MARGIN),
    )
}

/// Ray from the drawn sun to the top of the front panel.
///
/// Always ends at E, so with a clamped sun the drawn angle differs from the
/// solar altitude.
pub fn sun_ray(sun: &SunPosition, tilt_deg: f64) -> Segment {
    Segment::new(sun.center, geo::top_of_panel(PANEL1_X, tilt_deg))
}

// ===================== TESTS =====================
