//! Input State Holder
//!
//! Owns the three calculator inputs and the geometry derived from them. Every
//! change recomputes the full `DerivedGeometry` from one clamped snapshot and
//! republishes it to all subscribed consumers.

use log::{debug, warn};

use crate::diagram::DerivedGeometry;
use crate::error::SpacingError;
use crate::spacing::{self, SpacingInputs};

/// Receives every freshly computed geometry snapshot
pub trait GeometryConsumer {
    fn publish(&mut self, geometry: &DerivedGeometry) -> Result<(), SpacingError>;
}

pub struct SpacingState {
    inputs: SpacingInputs,
    geometry: DerivedGeometry,
    consumers: Vec<Box<dyn GeometryConsumer>>,
}

impl SpacingState {
    /// Start from the given inputs, clamped into their domains
    pub fn new(inputs: SpacingInputs) -> Self {
        let inputs =
            SpacingInputs::clamped(inputs.panel_length_m, inputs.tilt_deg, inputs.altitude_deg);
        Self { inputs, geometry: DerivedGeometry::compute(inputs), consumers: Vec::new() }
    }

    pub fn inputs(&self) -> &SpacingInputs {
        &self.inputs
    }

    pub fn geometry(&self) -> &DerivedGeometry {
        &self.geometry
    }

    /// Register a consumer and hand it the current snapshot right away
    pub fn subscribe(&mut self, mut consumer: Box<dyn GeometryConsumer>) -> Result<(), SpacingError> {
        consumer.publish(&self.geometry)?;
        self.consumers.push(consumer);
        Ok(())
    }

    pub fn set_panel_length(&mut self, meters: f64) -> Result<(), SpacingError> {
        let clamped = spacing::clamp_panel_length(meters);
        warn_if_clamped("panel length", meters, clamped);
        self.update(SpacingInputs { panel_length_m: clamped, ..self.inputs })
    }

    pub fn set_tilt(&mut self, degrees: f64) -> Result<(), SpacingError> {
        let clamped = spacing::clamp_tilt(degrees);
        warn_if_clamped("tilt", degrees, clamped);
        self.update(SpacingInputs { tilt_deg: clamped, ..self.inputs })
    }

    pub fn set_solar_altitude(&mut self, degrees: f64) -> Result<(), SpacingError> {
        let clamped = spacing::clamp_altitude(degrees);
        warn_if_clamped("solar altitude", degrees, clamped);
        self.update(SpacingInputs { altitude_deg: clamped, ..self.inputs })
    }

    /// Publish the current snapshot again without changing anything
    pub fn refresh(&mut self) -> Result<(), SpacingError> {
        self.publish_all()
    }

    fn update(&mut self, inputs: SpacingInputs) -> Result<(), SpacingError> {
        debug_assert!(inputs.in_domain());
        self.inputs = inputs;
        self.geometry = DerivedGeometry::compute(inputs);
        debug!(
            "recomputed geometry for L={} β={} α={}: D={:.4}",
            inputs.panel_length_m,
            inputs.tilt_deg,
            inputs.altitude_deg,
            self.geometry.metrics.inter_row_spacing
        );
        if self.geometry.diagram.sun.clamped {
            debug!("sun glyph clamped into view; drawn ray angle differs from altitude");
        }
        self.publish_all()
    }

    fn publish_all(&mut self) -> Result<(), SpacingError> {
        for consumer in self.consumers.iter_mut() {
            consumer.publish(&self.geometry)?;
        }
        Ok(())
    }
}

fn warn_if_clamped(name: &str, requested: f64, clamped: f64) {
    if requested != clamped {
        warn!("{} {} is out of range, using {}", name, requested, clamped);
    }
}

// ===================== TESTS =====================
