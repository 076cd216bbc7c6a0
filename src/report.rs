//! Dual-source parameter lookup for report rendering.
//!
//! Reports prefer the record stored with a produced feature. When no feature of
//! the requested type exists they re-derive the record from the host's current
//! inputs through the same builders and schemas, so both paths yield records of
//! identical shape. This lives outside the builders; the engine itself never
//! sees host state.

use ifp_config::{CalculationRequest, EngineSettings};
use ifp_core::{CalculationType, ParameterRecord, ScalarInputSet};
use ifp_export::features::StoredFeature;
use tracing::debug;

use crate::calculation::build_feature;
use crate::feature::GeometryFeature;
use crate::record::validate_record;
use crate::EngineError;

/// Source of previously produced records, typically a layer store.
pub trait LayerLookup {
    /// Most recent record of `calculation`, if the store holds one.
    fn find_record(&self, calculation: CalculationType) -> Result<Option<ParameterRecord>, EngineError>;
}

/// The host's current, possibly not yet computed, inputs.
pub trait ParameterSource {
    fn current_inputs(&self) -> ScalarInputSet;
}

impl ParameterSource for ScalarInputSet {
    fn current_inputs(&self) -> ScalarInputSet {
        self.clone()
    }
}

impl ParameterSource for CalculationRequest {
    fn current_inputs(&self) -> ScalarInputSet {
        self.inputs.clone()
    }
}

impl LayerLookup for [GeometryFeature] {
    fn find_record(&self, calculation: CalculationType) -> Result<Option<ParameterRecord>, EngineError> {
        Ok(self
            .iter()
            .rev()
            .find(|f| f.calculation_type() == calculation)
            .map(|f| f.parameters().clone()))
    }
}

impl LayerLookup for [StoredFeature] {
    fn find_record(&self, calculation: CalculationType) -> Result<Option<ParameterRecord>, EngineError> {
        self.iter()
            .rev()
            .find(|f| CalculationType::from_name(&f.calculation_type) == Some(calculation))
            .map(|f| validate_record(&f.calculation_type, f.entries.clone()))
            .transpose()
    }
}

/// Which source produced a resolved record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterOrigin {
    Layer,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParameters {
    pub record: ParameterRecord,
    pub origin: ParameterOrigin,
}

pub fn resolve_parameters<L, F>(
    calculation: CalculationType,
    preferred: &L,
    fallback: &F,
    settings: &EngineSettings,
) -> Result<ResolvedParameters, EngineError>
where
    L: LayerLookup + ?Sized,
    F: ParameterSource + ?Sized,
{
    if let Some(record) = preferred.find_record(calculation)? {
        debug!(%calculation, "parameters taken from stored layer");
        return Ok(ResolvedParameters {
            record,
            origin: ParameterOrigin::Layer,
        });
    }
    debug!(%calculation, "no stored feature, re-deriving parameters from current inputs");
    let record = build_feature(calculation, &fallback.current_inputs(), settings)?.into_parameters();
    Ok(ResolvedParameters {
        record,
        origin: ParameterOrigin::Fallback,
    })
}
