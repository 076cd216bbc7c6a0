//! International Standard Atmosphere temperatures as used in procedure design.
//!
//! The model is the linear tropospheric profile `15 − 0.00198·H` (°C, H in feet).
//! Elevations outside the operational range are rejected, never clamped.

use ifp_core::constants::{ISA_LAPSE_RATE_C_PER_FT, ISA_SEA_LEVEL_TEMP_C};
use ifp_core::{InputError, Quantity, Unit};

/// Lowest elevation accepted by the model (ft).
pub const MIN_ELEVATION_FT: f64 = -2_000.0;
/// Tropopause; the linear lapse rate is not valid above it (ft).
pub const MAX_ELEVATION_FT: f64 = 36_089.0;

/// ISA evaluation at one elevation against one reference temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsaConditions {
    pub elevation: Quantity,
    pub reference_temperature: Quantity,
    pub isa_temperature: Quantity,
    pub deviation: Quantity,
}

/// Standard temperature at `elevation`, in °C.
pub fn isa_temperature(elevation: Quantity) -> Result<Quantity, InputError> {
    let elevation_ft = checked_elevation_ft(elevation)?;
    Ok(Quantity::celsius(
        ISA_SEA_LEVEL_TEMP_C - ISA_LAPSE_RATE_C_PER_FT * elevation_ft,
    ))
}

/// `reference − ISA(elevation)`, in °C.
pub fn isa_deviation(reference_temperature: Quantity, elevation: Quantity) -> Result<Quantity, InputError> {
    Ok(isa_conditions(elevation, reference_temperature)?.deviation)
}

pub fn isa_conditions(elevation: Quantity, reference_temperature: Quantity) -> Result<IsaConditions, InputError> {
    let reference_c = reference_temperature.expect_in("temperature_reference", Unit::Celsius)?;
    let isa = isa_temperature(elevation)?;
    Ok(IsaConditions {
        elevation,
        reference_temperature: Quantity::celsius(reference_c),
        isa_temperature: isa,
        deviation: Quantity::celsius(reference_c - isa.value),
    })
}

fn checked_elevation_ft(elevation: Quantity) -> Result<f64, InputError> {
    let elevation_ft = elevation.expect_in("elevation", Unit::Feet)?;
    if !(MIN_ELEVATION_FT..=MAX_ELEVATION_FT).contains(&elevation_ft) {
        return Err(InputError::out_of_range(
            "elevation",
            elevation_ft,
            format!("[{MIN_ELEVATION_FT}, {MAX_ELEVATION_FT}] ft"),
        ));
    }
    Ok(elevation_ft)
}
