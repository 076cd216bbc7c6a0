//! Builder dispatch.
//!
//! Every calculation type implements [`SurfaceBuilder`]: validate the raw
//! inputs, construct geometry plus derived scalars, then assemble the parameter
//! record through the shared schema registry. [`build_feature`] is the single
//! entry point that picks the builder for a [`CalculationType`].

mod ils;
mod visual;
mod wind_spiral;

use ifp_config::{CalculationRequest, EngineSettings};
use ifp_core::{
    CalculationType, DerivedScalarSet, Geometry, InputError, ParameterRecord, PlanarPoint, Quantity,
    ScalarInputSet, Unit,
};
use ifp_surfaces::RunwayFrame;
use tracing::info;

use crate::feature::GeometryFeature;
use crate::{EngineError, keys, record};

pub use ils::{BasicIlsBuilder, OasBuilder};
pub use visual::VisualSegmentBuilder;
pub use wind_spiral::WindSpiralBuilder;

/// Geometry and the derived scalars that sized it.
#[derive(Debug, Clone, PartialEq)]
pub struct Construction {
    pub geometry: Geometry,
    pub derived: DerivedScalarSet,
}

pub trait SurfaceBuilder {
    /// Inputs after parsing and validation.
    type Inputs;

    fn calculation_type(&self) -> CalculationType;

    fn validate(&self, inputs: &ScalarInputSet) -> Result<Self::Inputs, EngineError>;

    fn construct(&self, inputs: &Self::Inputs) -> Result<Construction, EngineError>;

    fn assemble(&self, inputs: &ScalarInputSet, derived: &DerivedScalarSet) -> Result<ParameterRecord, EngineError> {
        record::assemble(self.calculation_type(), inputs, derived)
    }
}

/// Run the builder registered for `calculation`.
pub fn build_feature(
    calculation: CalculationType,
    inputs: &ScalarInputSet,
    settings: &EngineSettings,
) -> Result<GeometryFeature, EngineError> {
    match calculation {
        CalculationType::WindSpiral => run(&WindSpiralBuilder::new(settings), inputs),
        CalculationType::IlsBasicSurfaces => run(&BasicIlsBuilder, inputs),
        CalculationType::IlsOasCategoryI => run(&OasBuilder, inputs),
        CalculationType::Vss => run(&VisualSegmentBuilder::straight_in(), inputs),
        CalculationType::VssLoc => run(&VisualSegmentBuilder::localizer(), inputs),
    }
}

/// Resolve the request's calculation name and run it.
pub fn build_request(request: &CalculationRequest) -> Result<GeometryFeature, EngineError> {
    let calculation = record::schema_for_name(&request.calculation)?.calculation_type;
    build_feature(calculation, &request.inputs, &request.settings)
}

fn run<B: SurfaceBuilder>(builder: &B, inputs: &ScalarInputSet) -> Result<GeometryFeature, EngineError> {
    let validated = builder.validate(inputs)?;
    let construction = builder.construct(&validated)?;
    let parameters = builder.assemble(inputs, &construction.derived)?;
    info!(
        calculation = %builder.calculation_type(),
        vertices = construction.geometry.vertex_count(),
        rows = parameters.len(),
        "built geometry feature"
    );
    Ok(GeometryFeature::new(
        builder.calculation_type(),
        construction.geometry,
        parameters,
    ))
}

/// Required quantity, checked for dimension and finiteness but kept in the host's unit.
fn required(inputs: &ScalarInputSet, key: &str, unit: Unit) -> Result<Quantity, InputError> {
    optional(inputs, key, unit)?.ok_or_else(|| InputError::Missing(key.to_string()))
}

fn optional(inputs: &ScalarInputSet, key: &str, unit: Unit) -> Result<Option<Quantity>, InputError> {
    match inputs.quantity(key)? {
        Some(q) => {
            q.expect_in(key, unit)?;
            Ok(Some(q))
        }
        None => Ok(None),
    }
}

fn runway_frame(inputs: &ScalarInputSet) -> Result<RunwayFrame, InputError> {
    let threshold = PlanarPoint::new(
        inputs.require_quantity(keys::THRESHOLD_X, Unit::Meters)?,
        inputs.require_quantity(keys::THRESHOLD_Y, Unit::Meters)?,
    );
    RunwayFrame::new(
        threshold,
        required(inputs, keys::RUNWAY_BEARING, Unit::Degrees)?,
        required(inputs, keys::THRESHOLD_ELEVATION, Unit::Meters)?,
        optional(inputs, keys::THRESHOLD_DISPLACEMENT, Unit::Meters)?,
    )
}
