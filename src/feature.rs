use ifp_core::{CalculationType, Geometry, InputError, Obstacle, ObstacleAssessment, ParameterRecord, assess_obstacles};
use serde::Serialize;
use tracing::info;

use crate::EngineError;

/// Output of one builder invocation. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryFeature {
    calculation_type: CalculationType,
    geometry: Geometry,
    parameters: ParameterRecord,
}

impl GeometryFeature {
    pub(crate) fn new(calculation_type: CalculationType, geometry: Geometry, parameters: ParameterRecord) -> Self {
        Self {
            calculation_type,
            geometry,
            parameters,
        }
    }

    pub fn calculation_type(&self) -> CalculationType {
        self.calculation_type
    }

    /// Value for the layer's discriminator field.
    pub fn discriminator(&self) -> &'static str {
        self.calculation_type.name()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn parameters(&self) -> &ParameterRecord {
        &self.parameters
    }

    pub fn into_parameters(self) -> ParameterRecord {
        self.parameters
    }

    /// Obstacles lying under this feature's surfaces, each measured against the
    /// lowest surface above it. A spiral has no surfaces to assess against.
    pub fn assess_obstacles(&self, obstacles: &[Obstacle]) -> Result<Vec<ObstacleAssessment>, EngineError> {
        if let Geometry::LineString(_) = self.geometry {
            return Err(InputError::Unrecognised {
                name: "obstacle_surface".to_string(),
                value: self.calculation_type.name().to_string(),
            }
            .into());
        }
        let assessments = assess_obstacles(self.geometry.rings(), obstacles)?;
        info!(
            calculation = self.calculation_type.name(),
            obstacles = obstacles.len(),
            selected = assessments.len(),
            penetrating = assessments.iter().filter(|a| a.penetrates()).count(),
            "assessed obstacles"
        );
        Ok(assessments)
    }

    /// Whole feature as JSON, for hosts that persist it verbatim.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
