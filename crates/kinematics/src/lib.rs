//! Turn and wind kinematics.
//!
//! Speeds cross the API as [`Quantity`] values; planar velocity vectors are
//! [`Vector2`] in metres per second with x east and y north.

use ifp_core::constants::G0;
use ifp_core::units::{ms_to_kt, normalize_signed};
use ifp_core::{InputError, Quantity, Unit, Vector2};

/// Numerator of the procedure-design IAS→TAS conversion factor.
pub const TAS_FACTOR_NUMERATOR: f64 = 171_233.0;
/// Exponent applied to the temperature ratio in the conversion factor.
pub const TAS_FACTOR_EXPONENT: f64 = 2.628;
/// Sea-level reference temperature used by the conversion factor (K, rounded).
pub const TAS_REFERENCE_TEMP_K: f64 = 288.0;
/// Temperature lapse used by the conversion factor (K per ft).
pub const TAS_LAPSE_K_PER_FT: f64 = 0.001_98;

/// Ground velocity resulting from an air vector and a wind vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundVector {
    /// Ground velocity (m/s).
    pub velocity: Vector2,
    pub ground_speed: Quantity,
    pub track: Quantity,
    /// Track minus heading, in (−180°, 180°].
    pub drift: Quantity,
}

/// True airspeed from indicated airspeed, altitude and ISA deviation.
///
/// `k = 171233·√(288 + VAR − 0.00198·H) / (288 − 0.00198·H)^2.628`, `TAS = k·IAS`.
pub fn true_airspeed(
    indicated_airspeed: Quantity,
    altitude: Quantity,
    isa_deviation: Quantity,
) -> Result<Quantity, InputError> {
    let ias_kt = positive("ias", indicated_airspeed.expect_in("ias", Unit::Knots)?, "kt")?;
    let altitude_ft = altitude.expect_in("altitude", Unit::Feet)?;
    let deviation_c = isa_deviation.expect_in("isa_deviation", Unit::Celsius)?;

    let standard = TAS_REFERENCE_TEMP_K - TAS_LAPSE_K_PER_FT * altitude_ft;
    let actual = standard + deviation_c;
    if standard <= 0.0 || actual <= 0.0 {
        return Err(InputError::out_of_range(
            "altitude",
            altitude_ft,
            "the range where the corrected temperature stays positive",
        ));
    }
    let factor = TAS_FACTOR_NUMERATOR * actual.sqrt() / standard.powf(TAS_FACTOR_EXPONENT);
    Ok(Quantity::knots(factor * ias_kt))
}

/// Radius of a steady co-ordinated turn, `v² / (g·tan φ)`, in metres.
pub fn standard_rate_turn_radius(true_airspeed: Quantity, bank_angle: Quantity) -> Result<Quantity, InputError> {
    let v = positive("true_airspeed", true_airspeed.expect_in("true_airspeed", Unit::MetersPerSecond)?, "m/s")?;
    let bank_rad = checked_bank_deg(bank_angle)?.to_radians();
    Ok(Quantity::meters(v * v / (G0 * bank_rad.tan())))
}

/// Rate of turn `v / r` at the given bank angle, in °/s.
pub fn rate_of_turn(true_airspeed: Quantity, bank_angle: Quantity) -> Result<Quantity, InputError> {
    let radius_m = standard_rate_turn_radius(true_airspeed, bank_angle)?.value;
    let v = true_airspeed.expect_in("true_airspeed", Unit::MetersPerSecond)?;
    Ok(Quantity::new((v / radius_m).to_degrees(), Unit::DegreesPerSecond))
}

/// Time to turn through `turn_angle` on a circle of `radius` at `speed`.
pub fn turn_time(radius: Quantity, speed: Quantity, turn_angle: Quantity) -> Result<Quantity, InputError> {
    let radius_m = radius.expect_in("turn_radius", Unit::Meters)?;
    if radius_m < 0.0 {
        return Err(InputError::out_of_range("turn_radius", radius_m, "[0, ∞) m"));
    }
    let v = positive("speed", speed.expect_in("speed", Unit::MetersPerSecond)?, "m/s")?;
    let angle_rad = turn_angle.expect_in("turn_angle", Unit::Radians)?.abs();
    Ok(Quantity::seconds(radius_m * angle_rad / v))
}

/// Velocity of an air mass blowing *from* `from_bearing`.
pub fn wind_vector(speed: Quantity, from_bearing: Quantity) -> Result<Vector2, InputError> {
    let w = non_negative("wind_speed", speed.expect_in("wind_speed", Unit::MetersPerSecond)?, "m/s")?;
    let from_deg = from_bearing.expect_in("wind_direction", Unit::Degrees)?;
    Ok(Vector2::from_bearing(from_deg + 180.0) * w)
}

/// Air velocity for a heading flown at `true_airspeed`.
pub fn air_vector(true_airspeed: Quantity, heading: Quantity) -> Result<Vector2, InputError> {
    let v = non_negative("true_airspeed", true_airspeed.expect_in("true_airspeed", Unit::MetersPerSecond)?, "m/s")?;
    let heading_deg = heading.expect_in("heading", Unit::Degrees)?;
    Ok(Vector2::from_bearing(heading_deg) * v)
}

/// Wind triangle by vector addition.
pub fn wind_corrected_ground_vector(air: Vector2, wind: Vector2) -> GroundVector {
    let velocity = air + wind;
    let heading_deg = air.bearing_deg();
    let ground_speed = velocity.norm();
    let track_deg = if ground_speed > 0.0 {
        velocity.bearing_deg()
    } else {
        heading_deg
    };
    GroundVector {
        velocity,
        ground_speed: Quantity::knots(ms_to_kt(ground_speed)),
        track: Quantity::degrees(track_deg),
        drift: Quantity::degrees(normalize_signed(track_deg - heading_deg)),
    }
}

/// Largest drift a crosswind of `wind_speed` can produce, `asin(w / v)`.
pub fn max_drift_angle(true_airspeed: Quantity, wind_speed: Quantity) -> Result<Quantity, InputError> {
    let v = positive("true_airspeed", true_airspeed.expect_in("true_airspeed", Unit::Knots)?, "kt")?;
    let w = non_negative("wind_speed", wind_speed.expect_in("wind_speed", Unit::Knots)?, "kt")?;
    if w >= v {
        return Err(InputError::out_of_range(
            "wind_speed",
            w,
            format!("[0, {v:.3}) kt (below true airspeed)"),
        ));
    }
    Ok(Quantity::degrees((w / v).asin().to_degrees()))
}

/// Distance the air mass moves in `elapsed`, in metres.
pub fn wind_effect(wind_speed: Quantity, elapsed: Quantity) -> Result<Quantity, InputError> {
    let w = non_negative("wind_speed", wind_speed.expect_in("wind_speed", Unit::MetersPerSecond)?, "m/s")?;
    let t = non_negative("elapsed", elapsed.expect_in("elapsed", Unit::Seconds)?, "s")?;
    Ok(Quantity::meters(w * t))
}

fn checked_bank_deg(bank_angle: Quantity) -> Result<f64, InputError> {
    let bank_deg = bank_angle.expect_in("bank_angle", Unit::Degrees)?;
    if bank_deg <= 0.0 || bank_deg >= 90.0 {
        return Err(InputError::out_of_range("bank_angle", bank_deg, "(0, 90) °"));
    }
    Ok(bank_deg)
}

fn positive(name: &str, value: f64, unit: &str) -> Result<f64, InputError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(InputError::out_of_range(name, value, format!("(0, ∞) {unit}")))
    }
}

fn non_negative(name: &str, value: f64, unit: &str) -> Result<f64, InputError> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(InputError::out_of_range(name, value, format!("[0, ∞) {unit}")))
    }
}
