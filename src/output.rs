//! Output Formatting Module
//!
//! Terminal and JSON consumers of the geometry snapshots.

use crate::derivation;
use crate::diagram::DerivedGeometry;
use crate::error::SpacingError;
use crate::spacing::format_meters;
use crate::state::GeometryConsumer;

// ===================== TERMINAL OUTPUT =====================

/// Format the input parameters and the result set.
///
/// All results are rounded to 2 decimals.
pub fn format_results(geometry: &DerivedGeometry) -> String {
    let inputs = &geometry.inputs;
    let m = &geometry.metrics;
    let sun = &geometry.diagram.sun;

    let mut lines = vec![
        "=== Input Parameters ===".to_string(),
        format!("Panel length (L)        : {:.2} m", inputs.panel_length_m),
        format!("Panel tilt angle (β)    : {}°", inputs.tilt_deg),
        format!("Winter solar altitude (α): {}°", inputs.altitude_deg),
        String::new(),
        "=== Results ===".to_string(),
        format!("Panel Height (H)              : {}", format_meters(m.panel_height)),
        format!("Effective Width               : {}", format_meters(m.effective_width)),
        format!("Shadow Extension (CB)         : {}", format_meters(m.shadow_extension)),
        format!("Minimum Inter-Row Spacing (D) : {}", format_meters(m.inter_row_spacing)),
        format!("Total Row-to-Row Distance     : {}", format_meters(m.total_row_distance)),
    ];

    if sun.clamped {
        lines.push(String::new());
        lines.push(format!(
            "Note: sun drawn at clamped position, ray shown at {:.1}° instead of {}°",
            geometry.diagram.sun_ray.elevation_deg(),
            inputs.altitude_deg
        ));
    }

    lines.join("\n")
}

/// Format the formula explanation followed by the detailed derivation
pub fn format_derivation(geometry: &DerivedGeometry) -> String {
    format!(
        "=== Formula Used ===\n{}\n=== Detailed Calculations ===\n{}",
        derivation::formula_legend(),
        derivation::render(geometry)
    )
}

/// Prints the result set (and optionally the derivation) for every snapshot
pub struct TerminalReport {
    show_derivation: bool,
}

impl TerminalReport {
    pub fn new(show_derivation: bool) -> Self {
        Self { show_derivation }
    }

    pub fn format(&self, geometry: &DerivedGeometry) -> String {
        let mut out = format_results(geometry);
        if self.show_derivation {
            out.push_str("\n\n");
            out.push_str(&format_derivation(geometry));
        }
        out
    }
}

impl GeometryConsumer for TerminalReport {
    fn publish(&mut self, geometry: &DerivedGeometry) -> Result<(), SpacingError> {
        println!("{}", self.format(geometry));
        println!();
        Ok(())
    }
}

// ===================== JSON OUTPUT =====================

/// Prints every snapshot as pretty JSON
pub struct JsonReport;

impl GeometryConsumer for JsonReport {
    fn publish(&mut self, geometry: &DerivedGeometry) -> Result<(), SpacingError> {
        println!("{}", serde_json::to_string_pretty(geometry)?);
        Ok(())
    }
}

// ===================== TESTS =====================
