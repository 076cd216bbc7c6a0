use ifp_atmosphere::isa_conditions;
use ifp_config::EngineSettings;
use ifp_core::{CalculationType, DerivedScalarSet, PlanarPoint, Quantity, ScalarInputSet, Unit};
use ifp_kinematics::{max_drift_angle, true_airspeed};
use ifp_spiral::{SpiralRequest, TurnDirection, WIND_SPIRAL_SWEEP_DEG, WindModel, generate};

use super::{Construction, SurfaceBuilder, optional, required};
use crate::{EngineError, keys};

/// Wind spiral for a turn at the given IAS, altitude and bank angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSpiralBuilder {
    step: Quantity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindSpiralInputs {
    pub aerodrome_elevation: Quantity,
    pub temperature_reference: Quantity,
    pub isa_variation: Option<Quantity>,
    pub ias: Quantity,
    pub altitude: Quantity,
    pub bank_angle: Quantity,
    pub wind_speed: Quantity,
    pub wind_direction: Option<Quantity>,
    pub turn_direction: TurnDirection,
    pub start: PlanarPoint,
    pub initial_heading: Quantity,
    pub sweep: Quantity,
}

impl WindSpiralBuilder {
    pub fn new(settings: &EngineSettings) -> Self {
        Self {
            step: Quantity::degrees(settings.spiral_step_deg),
        }
    }
}

impl SurfaceBuilder for WindSpiralBuilder {
    type Inputs = WindSpiralInputs;

    fn calculation_type(&self) -> CalculationType {
        CalculationType::WindSpiral
    }

    fn validate(&self, inputs: &ScalarInputSet) -> Result<WindSpiralInputs, EngineError> {
        Ok(WindSpiralInputs {
            aerodrome_elevation: required(inputs, keys::AERODROME_ELEVATION, Unit::Feet)?,
            temperature_reference: required(inputs, keys::TEMPERATURE_REFERENCE, Unit::Celsius)?,
            isa_variation: optional(inputs, keys::ISA_VARIATION, Unit::Celsius)?,
            ias: required(inputs, keys::IAS, Unit::Knots)?,
            altitude: required(inputs, keys::ALTITUDE, Unit::Feet)?,
            bank_angle: required(inputs, keys::BANK_ANGLE, Unit::Degrees)?,
            wind_speed: required(inputs, keys::WIND_SPEED, Unit::Knots)?,
            wind_direction: optional(inputs, keys::WIND_DIRECTION, Unit::Degrees)?,
            turn_direction: inputs.require_text(keys::TURN_DIRECTION)?.parse()?,
            start: PlanarPoint::new(
                inputs.require_quantity(keys::START_X, Unit::Meters)?,
                inputs.require_quantity(keys::START_Y, Unit::Meters)?,
            ),
            initial_heading: required(inputs, keys::INITIAL_HEADING, Unit::Degrees)?,
            sweep: optional(inputs, keys::SWEEP, Unit::Degrees)?
                .unwrap_or(Quantity::degrees(WIND_SPIRAL_SWEEP_DEG)),
        })
    }

    fn construct(&self, inputs: &WindSpiralInputs) -> Result<Construction, EngineError> {
        let isa = isa_conditions(inputs.aerodrome_elevation, inputs.temperature_reference)?;
        let deviation = inputs.isa_variation.unwrap_or(isa.deviation);
        let tas = true_airspeed(inputs.ias, inputs.altitude, deviation)?;
        let drift = max_drift_angle(tas, inputs.wind_speed)?;

        let path = generate(&SpiralRequest {
            start: inputs.start,
            initial_heading: inputs.initial_heading,
            true_airspeed: tas,
            bank_angle: inputs.bank_angle,
            wind_speed: inputs.wind_speed,
            wind_model: match inputs.wind_direction {
                Some(from) => WindModel::FromBearing(from),
                None => WindModel::Omnidirectional,
            },
            turn_direction: inputs.turn_direction,
            sweep: inputs.sweep,
            step: self.step,
        })?;

        let mut derived = DerivedScalarSet::new();
        derived.insert(keys::ISA_TEMPERATURE, isa.isa_temperature);
        derived.insert(keys::ISA_DEVIATION, deviation);
        derived.insert(keys::TRUE_AIRSPEED, tas);
        derived.insert(keys::TURN_RADIUS, path.radius);
        derived.insert(keys::RATE_OF_TURN, path.rate_of_turn);
        derived.insert(keys::TURN_TIME, path.turn_time);
        derived.insert(keys::WIND_EFFECT, path.wind_effect);
        derived.insert(keys::MAX_DRIFT_ANGLE, drift);
        derived.insert(keys::MAX_GROUND_SPEED, path.max_ground_speed);
        Ok(Construction {
            geometry: path.geometry,
            derived,
        })
    }
}
