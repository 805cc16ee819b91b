//! Row Spacing Calculations
//!
//! Converts the screen-space shadow construction from `geo` into physical
//! distances (meters) using the scale factor `panel_length / PANEL_WIDTH`.
//!
//! Terminology (points along the ground line):
//! - A: base of the front panel
//! - C: ground projection of the front panel's top edge
//! - B: end of the front panel's shadow, where the back row starts

use serde::Serialize;

use crate::geo::{self, PANEL_WIDTH, PANEL1_X};

// ===================== INPUT DOMAIN =====================

/// Allowed physical panel length (meters)
pub const PANEL_LENGTH_RANGE: (f64, f64) = (1.0, 2.5);

/// Allowed panel tilt (degrees)
pub const TILT_RANGE: (f64, f64) = (0.0, 60.0);

/// Allowed minimum solar altitude (degrees)
pub const ALTITUDE_RANGE: (f64, f64) = (5.0, 45.0);

pub const DEFAULT_PANEL_LENGTH: f64 = 1.13;
pub const DEFAULT_TILT: f64 = 24.0;
pub const DEFAULT_ALTITUDE: f64 = 42.0;

/// The three physical inputs of the calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpacingInputs {
    /// Panel length along the tilted surface (meters)
    pub panel_length_m: f64,
    /// Panel tilt from horizontal (degrees, β)
    pub tilt_deg: f64,
    /// Minimum solar altitude at the design time (degrees, α)
    pub altitude_deg: f64,
}

impl Default for SpacingInputs {
    fn default() -> Self {
        Self {
            panel_length_m: DEFAULT_PANEL_LENGTH,
            tilt_deg: DEFAULT_TILT,
            altitude_deg: DEFAULT_ALTITUDE,
        }
    }
}

impl SpacingInputs {
    /// Build inputs with every value clamped into its allowed range
    pub fn clamped(panel_length_m: f64, tilt_deg: f64, altitude_deg: f64) -> Self {
        Self {
            panel_length_m: clamp_panel_length(panel_length_m),
            tilt_deg: clamp_tilt(tilt_deg),
            altitude_deg: clamp_altitude(altitude_deg),
        }
    }

    /// Whether every value already lies in its allowed range
    pub fn in_domain(&self) -> bool {
        in_range(self.panel_length_m, PANEL_LENGTH_RANGE)
            && in_range(self.tilt_deg, TILT_RANGE)
            && in_range(self.altitude_deg, ALTITUDE_RANGE)
    }

    /// Physical meters per drawn pixel
    pub fn meters_per_pixel(&self) -> f64 {
        self.panel_length_m / PANEL_WIDTH
    }
}

fn in_range(v: f64, (min, max): (f64, f64)) -> bool {
    (min..=max).contains(&v)
}

pub fn clamp_panel_length(v: f64) -> f64 {
    v.clamp(PANEL_LENGTH_RANGE.0, PANEL_LENGTH_RANGE.1)
}

pub fn clamp_tilt(v: f64) -> f64 {
    v.clamp(TILT_RANGE.0, TILT_RANGE.1)
}

pub fn clamp_altitude(v: f64) -> f64 {
    v.clamp(ALTITUDE_RANGE.0, ALTITUDE_RANGE.1)
}

// ===================== DERIVED METRICS =====================

/// Physical results shown to the user (all in meters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    /// H = L·sin β
    pub panel_height: f64,
    /// Horizontal footprint of one panel, L·cos β
    pub effective_width: f64,
    /// Shadow overhang beyond the panel footprint (CB)
    pub shadow_extension: f64,
    /// Base-to-base distance between the rows (D, A to B)
    pub inter_row_spacing: f64,
    /// D plus one more panel footprint
    pub total_row_distance: f64,
    /// H·[cos β + sin β / tan α], the textbook formula
    pub closed_form_spacing: f64,
}

impl DerivedMetrics {
    pub fn compute(inputs: &SpacingInputs) -> Self {
        let SpacingInputs { panel_length_m, tilt_deg, altitude_deg } = *inputs;
        let effective_width = effective_width(panel_length_m, tilt_deg);
        let inter_row_spacing = inter_row_spacing(PANEL1_X, tilt_deg, altitude_deg, panel_length_m);

        Self {
            panel_height: geo::panel_height(panel_length_m, tilt_deg),
            effective_width,
            shadow_extension: shadow_extension(PANEL1_X, tilt_deg, altitude_deg, panel_length_m),
            inter_row_spacing,
            total_row_distance: inter_row_spacing + effective_width,
            closed_form_spacing: closed_form_spacing(panel_length_m, tilt_deg, altitude_deg),
        }
    }
}

/// Horizontal footprint of a tilted panel, L·cos β (meters)
pub fn effective_width(panel_length_m: f64, tilt_deg: f64) -> f64 {
    panel_length_m * tilt_deg.to_radians().cos()
}

/// Distance from C to B, scaled to meters
pub fn shadow_extension(base_x: f64, tilt_deg: f64, altitude_deg: f64, panel_length_m: f64) -> f64 {
    let point_c = geo::top_projection_x(base_x, tilt_deg);
    let point_b = geo::shadow_end_x(base_x, tilt_deg, altitude_deg);
    (point_b - point_c) / PANEL_WIDTH * panel_length_m
}

/// Distance from A to B, scaled to meters
///
/// Unlike `shadow_extension` this includes the panel's own footprint.
pub fn inter_row_spacing(base_x: f64, tilt_deg: f64, altitude_deg: f64, panel_length_m: f64) -> f64 {
    let point_b = geo::shadow_end_x(base_x, tilt_deg, altitude_deg);
    (point_b - base_x) / PANEL_WIDTH * panel_length_m
}

/// D = H·[cos β + sin β / tan α]
pub fn closed_form_spacing(panel_length_m: f64, tilt_deg: f64, altitude_deg: f64) -> f64 {
    let tilt = tilt_deg.to_radians();
    let tan_alpha = altitude_deg.to_radians().tan().max(geo::MIN_TAN);
    let height = geo::panel_height(panel_length_m, tilt_deg);
    height * (tilt.cos() + tilt.sin() / tan_alpha)
}

/// Base x of the back row, where the front row's shadow ends
pub fn back_row_x(tilt_deg: f64, altitude_deg: f64) -> f64 {
    geo::shadow_end_x(PANEL1_X, tilt_deg, altitude_deg)
}

// ===================== FORMATTING =====================

/// Format a length in meters the way the results are displayed
pub fn format_meters(meters: f64) -> String {
    format!("{:.2} m", meters)
}

// ===================== TESTS =====================
