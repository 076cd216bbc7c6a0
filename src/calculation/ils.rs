use ifp_core::{CalculationType, DerivedScalarSet, InputError, Quantity, ScalarInputSet, Unit};
use ifp_surfaces::{
    ApproachCategory, OasExtent, OasRequest, RunwayFrame, build_basic_surfaces, build_oas, oas_template,
};

use super::{Construction, SurfaceBuilder, optional, runway_frame};
use crate::{EngineError, keys};

/// ILS basic surfaces (obstacle limitation surfaces for precision approaches).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasicIlsBuilder;

/// Obstacle assessment surfaces for a CAT I ILS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OasBuilder;

#[derive(Debug, Clone, PartialEq)]
pub struct BasicIlsInputs {
    pub frame: RunwayFrame,
    pub category: ApproachCategory,
}

impl SurfaceBuilder for BasicIlsBuilder {
    type Inputs = BasicIlsInputs;

    fn calculation_type(&self) -> CalculationType {
        CalculationType::IlsBasicSurfaces
    }

    fn validate(&self, inputs: &ScalarInputSet) -> Result<BasicIlsInputs, EngineError> {
        Ok(BasicIlsInputs {
            frame: runway_frame(inputs)?,
            category: inputs.require_text(keys::APPROACH_CATEGORY)?.parse()?,
        })
    }

    fn construct(&self, inputs: &BasicIlsInputs) -> Result<Construction, EngineError> {
        let surfaces = build_basic_surfaces(&inputs.frame, inputs.category)?;
        let p = surfaces.profile;

        let mut derived = DerivedScalarSet::new();
        derived.insert(keys::INNER_HALF_WIDTH, Quantity::meters(p.inner_half_width_m));
        derived.insert(keys::APPROACH_DIVERGENCE, as_percent(p.approach_divergence));
        derived.insert(keys::APPROACH_FIRST_SLOPE, as_percent(p.approach_first_slope));
        derived.insert(keys::APPROACH_SECOND_SLOPE, as_percent(p.approach_second_slope));
        derived.insert(keys::MISSED_APPROACH_SLOPE, as_percent(p.missed_slope));
        derived.insert(keys::TRANSITIONAL_SLOPE, as_percent(p.transitional_slope));
        Ok(Construction {
            geometry: surfaces.geometry,
            derived,
        })
    }
}

impl SurfaceBuilder for OasBuilder {
    type Inputs = OasRequest;

    fn calculation_type(&self) -> CalculationType {
        CalculationType::IlsOasCategoryI
    }

    fn validate(&self, inputs: &ScalarInputSet) -> Result<OasRequest, EngineError> {
        let category: ApproachCategory = inputs.require_text(keys::APPROACH_CATEGORY)?.parse()?;
        oas_template(category)?;
        let frame = runway_frame(inputs)?;
        let fap_elevation = optional(inputs, keys::FAP_ELEVATION, Unit::Meters)?;
        let moc_intermediate = optional(inputs, keys::MOC_INTERMEDIATE, Unit::Meters)?;

        let cutoff_inputs = || -> Result<(Quantity, Quantity), InputError> {
            Ok((
                fap_elevation.ok_or_else(|| InputError::Missing(keys::FAP_ELEVATION.to_string()))?,
                moc_intermediate.ok_or_else(|| InputError::Missing(keys::MOC_INTERMEDIATE.to_string()))?,
            ))
        };

        let oas_type = inputs.require_text(keys::OAS_TYPE)?;
        let extent = match oas_type.trim().to_ascii_lowercase().as_str() {
            "template" | "template only" => OasExtent::Template,
            "extended" | "extended only" => {
                let (fap_elevation, moc_intermediate) = cutoff_inputs()?;
                OasExtent::Extended {
                    fap_elevation,
                    moc_intermediate,
                }
            }
            "both" => {
                let (fap_elevation, moc_intermediate) = cutoff_inputs()?;
                OasExtent::Both {
                    fap_elevation,
                    moc_intermediate,
                }
            }
            _ => {
                return Err(InputError::Unrecognised {
                    name: keys::OAS_TYPE.to_string(),
                    value: oas_type.to_string(),
                }
                .into());
            }
        };
        Ok(OasRequest { frame, category, extent })
    }

    fn construct(&self, inputs: &OasRequest) -> Result<Construction, EngineError> {
        let surfaces = build_oas(inputs)?;
        let mut derived = DerivedScalarSet::new();
        if let Some(cutoff) = surfaces.cutoff_height {
            derived.insert(keys::OAS_CUTOFF_HEIGHT, cutoff);
        }
        Ok(Construction {
            geometry: surfaces.geometry,
            derived,
        })
    }
}

fn as_percent(ratio: f64) -> Quantity {
    Quantity::percent(ratio * 100.0)
}
