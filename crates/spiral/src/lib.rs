//! Wind spiral generator.
//!
//! Points are evaluated in closed form from the start of the turn: step `i`
//! sits at turn angle `min(i·step, sweep)`, so rounding never accumulates and a
//! calm-air spiral lands exactly on the nominal turn circle.
//!
//! Each point is the nominal circle point plus the wind effect `E = w·t`,
//! laid off from the circle along the outward radial rotated by the drift
//! angle. The omnidirectional spiral uses the maximum drift `asin(w/v)`
//! against the turn; a fixed wind uses the drift it produces on the heading
//! flown at that point. The distance from the turn centre grows with `E`, so
//! the path does not loop back over itself.

use std::str::FromStr;

use ifp_core::{ensure_finite, Geometry, GeometryError, InputError, PlanarPoint, Quantity, Unit, Vector2};
use ifp_kinematics::{
    air_vector, max_drift_angle, rate_of_turn, standard_rate_turn_radius, turn_time, wind_corrected_ground_vector,
    wind_effect, wind_vector,
};
use thiserror::Error;
use tracing::debug;

/// Finest angular step accepted (°).
pub const MIN_STEP_DEG: f64 = 0.5;
/// Coarsest angular step accepted (°).
pub const MAX_STEP_DEG: f64 = 30.0;
/// Turn angle covered by a wind spiral unless a request overrides it (°).
pub const WIND_SPIRAL_SWEEP_DEG: f64 = 360.0;
/// Upper bound on a requested sweep (°).
pub const MAX_SWEEP_DEG: f64 = 720.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    /// +1 for clockwise (right) turns, −1 for left turns.
    pub fn sign(self) -> f64 {
        match self {
            TurnDirection::Right => 1.0,
            TurnDirection::Left => -1.0,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            TurnDirection::Right => "R",
            TurnDirection::Left => "L",
        }
    }
}

impl FromStr for TurnDirection {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "R" | "RIGHT" => Ok(TurnDirection::Right),
            "L" | "LEFT" => Ok(TurnDirection::Left),
            _ => Err(InputError::Unrecognised {
                name: "turn_direction".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// How the wind acts on the turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindModel {
    /// Wind from the most adverse direction at every point: the wind effect
    /// accumulated since the turn began is laid off outward, rotated by the
    /// maximum drift angle against the turn.
    Omnidirectional,
    /// Constant wind blowing from the given bearing; the wind effect is rotated
    /// by the drift that wind produces on the current heading.
    FromBearing(Quantity),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpiralRequest {
    pub start: PlanarPoint,
    pub initial_heading: Quantity,
    pub true_airspeed: Quantity,
    pub bank_angle: Quantity,
    pub wind_speed: Quantity,
    pub wind_model: WindModel,
    pub turn_direction: TurnDirection,
    pub sweep: Quantity,
    pub step: Quantity,
}

/// Generated spiral and the turn quantities it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralPath {
    pub center: PlanarPoint,
    pub geometry: Geometry,
    pub radius: Quantity,
    pub rate_of_turn: Quantity,
    /// Time to complete the whole sweep in still air.
    pub turn_time: Quantity,
    /// Wind drift accumulated over the whole sweep.
    pub wind_effect: Quantity,
    pub max_ground_speed: Quantity,
}

#[derive(Debug, Error)]
pub enum SpiralError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

pub fn generate(request: &SpiralRequest) -> Result<SpiralPath, SpiralError> {
    let step_deg = request.step.expect_in("spiral_step", Unit::Degrees)?;
    if !(MIN_STEP_DEG..=MAX_STEP_DEG).contains(&step_deg) {
        return Err(InputError::out_of_range(
            "spiral_step",
            step_deg,
            format!("[{MIN_STEP_DEG}, {MAX_STEP_DEG}] °"),
        )
        .into());
    }
    let sweep_deg = request.sweep.expect_in("sweep", Unit::Degrees)?;
    if sweep_deg <= 0.0 || sweep_deg > MAX_SWEEP_DEG {
        return Err(InputError::out_of_range("sweep", sweep_deg, format!("(0, {MAX_SWEEP_DEG}] °")).into());
    }
    let heading0 = request.initial_heading.expect_in("initial_heading", Unit::Degrees)?;
    ensure_finite("start_x", request.start.x)?;
    ensure_finite("start_y", request.start.y)?;

    let radius = standard_rate_turn_radius(request.true_airspeed, request.bank_angle)?;
    let rate = rate_of_turn(request.true_airspeed, request.bank_angle)?;
    let max_drift_deg = max_drift_angle(request.true_airspeed, request.wind_speed)?.value;
    let wind_ms = request.wind_speed.expect_in("wind_speed", Unit::MetersPerSecond)?;
    let steady_wind = match request.wind_model {
        WindModel::Omnidirectional => None,
        WindModel::FromBearing(from) => Some(wind_vector(request.wind_speed, from)?),
    };

    let side = request.turn_direction.sign();
    let r = radius.value;
    let center = request.start.translate(Vector2::from_bearing(heading0 + side * 90.0) * r);

    // Guard against 360/5 landing a hair above 72 and emitting a duplicate end point.
    let steps = ((sweep_deg / step_deg) - 1e-9).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 1);
    let mut max_ground_speed_kt: f64 = 0.0;
    for i in 0..=steps {
        let turned_deg = (i as f64 * step_deg).min(sweep_deg);
        let heading_deg = heading0 + side * turned_deg;
        let elapsed = turn_time(radius, request.true_airspeed, Quantity::degrees(turned_deg))?;
        let outward_deg = heading_deg - side * 90.0;

        let air = air_vector(request.true_airspeed, Quantity::degrees(heading_deg))?;
        let (ground, drift_deg) = match steady_wind {
            None => {
                let outward_wind = Vector2::from_bearing(outward_deg) * wind_ms;
                (wind_corrected_ground_vector(air, outward_wind), -side * max_drift_deg)
            }
            Some(wind) => {
                let ground = wind_corrected_ground_vector(air, wind);
                (ground, ground.drift.value)
            }
        };
        max_ground_speed_kt = max_ground_speed_kt.max(ground.ground_speed.value);

        let effect_m = wind_effect(request.wind_speed, elapsed)?.value;
        let offset = Vector2::from_bearing(outward_deg) * r + Vector2::from_bearing(outward_deg + drift_deg) * effect_m;
        points.push(center.translate(offset));
    }

    let total_time = turn_time(radius, request.true_airspeed, Quantity::degrees(sweep_deg))?;
    let total_drift = wind_effect(request.wind_speed, total_time)?;
    debug!(
        points = points.len(),
        radius_m = r,
        turn_time_s = total_time.value,
        wind_effect_m = total_drift.value,
        "generated wind spiral"
    );

    Ok(SpiralPath {
        center,
        geometry: Geometry::line_string(points)?,
        radius,
        rate_of_turn: rate,
        turn_time: total_time,
        wind_effect: total_drift,
        max_ground_speed: Quantity::knots(max_ground_speed_kt),
    })
}
