use ifp_core::{CalculationType, DerivedScalarSet, ScalarInputSet, Unit};
use ifp_surfaces::{VisualSegmentRequest, VisualVariant, build_visual_segment};

use super::{Construction, SurfaceBuilder, optional, required, runway_frame};
use crate::{EngineError, keys};

/// Visual segment surface for straight-in or localizer-only approaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualSegmentBuilder {
    localizer: bool,
}

impl VisualSegmentBuilder {
    pub fn straight_in() -> Self {
        Self { localizer: false }
    }

    pub fn localizer() -> Self {
        Self { localizer: true }
    }
}

impl SurfaceBuilder for VisualSegmentBuilder {
    type Inputs = VisualSegmentRequest;

    fn calculation_type(&self) -> CalculationType {
        if self.localizer {
            CalculationType::VssLoc
        } else {
            CalculationType::Vss
        }
    }

    fn validate(&self, inputs: &ScalarInputSet) -> Result<VisualSegmentRequest, EngineError> {
        let variant = if self.localizer {
            VisualVariant::Localizer
        } else {
            VisualVariant::StraightIn {
                strip_width: required(inputs, keys::STRIP_WIDTH, Unit::Meters)?,
            }
        };
        Ok(VisualSegmentRequest {
            frame: runway_frame(inputs)?,
            variant,
            runway_width: required(inputs, keys::RUNWAY_WIDTH, Unit::Meters)?,
            och: required(inputs, keys::OCH, Unit::Meters)?,
            rdh: required(inputs, keys::RDH, Unit::Meters)?,
            vpa: required(inputs, keys::VPA, Unit::Degrees)?,
            eye_to_wheel_height: optional(inputs, keys::EYE_TO_WHEEL_HEIGHT, Unit::Meters)?,
        })
    }

    fn construct(&self, inputs: &VisualSegmentRequest) -> Result<Construction, EngineError> {
        let segment = build_visual_segment(inputs)?;
        let mut derived = DerivedScalarSet::new();
        derived.insert(keys::VSS_SLOPE, segment.vss_slope);
        derived.insert(keys::VSS_LENGTH, segment.vss_length);
        derived.insert(keys::DECISION_POINT_DISTANCE, segment.decision_point_distance);
        derived.insert(keys::OCS_LENGTH, segment.ocs_length);
        Ok(Construction {
            geometry: segment.geometry,
            derived,
        })
    }
}
