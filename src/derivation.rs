//! Step-by-step Derivation Text
//!
//! Renders the arithmetic behind the results as a plain-text trace with
//! 4-decimal intermediate values. Final values come from `DerivedMetrics`,
//! so the trace can never disagree with the displayed results.

use crate::diagram::DerivedGeometry;

/// Build the full derivation trace for one geometry snapshot
pub fn render(geometry: &DerivedGeometry) -> String {
    let inputs = &geometry.inputs;
    let m = &geometry.metrics;

    let length = inputs.panel_length_m;
    let beta = inputs.tilt_deg;
    let alpha = inputs.altitude_deg;
    let (sin_b, cos_b) = beta.to_radians().sin_cos();
    let tan_a = alpha.to_radians().tan();

    let lines = vec![
        "// Input parameters".to_string(),
        format!("Panel length (L) = {:.2} m", length),
        format!("Panel tilt angle (β) = {}°", beta),
        format!("Solar altitude angle (α) = {}° (Noon, Dec 21st)", alpha),
        String::new(),
        "// Step 1: Calculate panel height".to_string(),
        "H = L × sin(β)".to_string(),
        format!("H = {:.2} × sin({}°)", length, beta),
        format!("H = {:.2} × {:.4}", length, sin_b),
        format!("H = {:.4} m", m.panel_height),
        String::new(),
        "// Step 2: Calculate panel width projection".to_string(),
        "Width = L × cos(β)".to_string(),
        format!("Width = {:.2} × cos({}°)", length, beta),
        format!("Width = {:.2} × {:.4}", length, cos_b),
        format!("Width = {:.4} m", m.effective_width),
        String::new(),
        "// Step 3: Calculate shadow extension (CB)".to_string(),
        "CB = H / tan(α)".to_string(),
        format!("CB = {:.4} / tan({}°)", m.panel_height, alpha),
        format!("CB = {:.4} / {:.4}", m.panel_height, tan_a),
        format!("CB = {:.4} m", m.shadow_extension),
        String::new(),
        "// Step 4: Calculate total spacing (D)".to_string(),
        "D = Width + CB".to_string(),
        format!("D = {:.4} + {:.4}", m.effective_width, m.shadow_extension),
        format!("D = {:.4} m", m.inter_row_spacing),
        String::new(),
        "// Alternative formula".to_string(),
        "D = H × [cos(β) + sin(β)/tan(α)]".to_string(),
        format!(
            "D = {:.4} × [cos({}°) + sin({}°)/tan({}°)]",
            m.panel_height, beta, beta, alpha
        ),
        format!("D = {:.4} × [{:.4} + {:.4}/{:.4}]", m.panel_height, cos_b, sin_b, tan_a),
        format!("D = {:.4} × [{:.4} + {:.4}]", m.panel_height, cos_b, sin_b / tan_a),
        format!("D = {:.4} × {:.4}", m.panel_height, cos_b + sin_b / tan_a),
        format!("D = {:.4} m", m.closed_form_spacing),
    ];

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Short description of the formula and its symbols
pub fn formula_legend() -> &'static str {
    "D = H × [cos(β) + sin(β)/tan(α)]\n\
     Where:\n\
     - D is the inter-row spacing\n\
     - H is the height difference between the top and bottom edges of the panel (H = L × sin(β))\n\
     - L is the length of the panel\n\
     - β is the tilt angle of the panel\n\
     - α is the minimum solar altitude angle (winter solstice)\n"
}

// ===================== TESTS =====================
