//! Core units, constants, and shared primitives for the procedure-surface workspace.
//!
//! Everything that crosses a crate boundary is expressed as a [`Quantity`]
//! (value plus unit) or as planar geometry in a single projected frame.

mod error;
mod geometry;
mod obstacle;
mod quantity;
mod record;

pub use error::{InputError, ensure_finite};
pub use geometry::{
    Geometry, GeometryError, PlanarPoint, Ring, Vector2, polyline_self_intersection,
};
pub use obstacle::{Obstacle, ObstacleAssessment, assess_obstacles};
pub use quantity::{DerivedScalarSet, Dimension, Quantity, Scalar, ScalarInputSet, Unit};
pub use record::{CalculationType, ParameterEntry, ParameterRecord};

/// Physical and procedure-design constants (SI unless stated otherwise).
pub mod constants {
    /// Standard gravity (m/s²).
    pub const G0: f64 = 9.80665;
    /// Metres per international foot.
    pub const M_PER_FT: f64 = 0.3048;
    /// Metres per nautical mile.
    pub const M_PER_NM: f64 = 1_852.0;
    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    /// ISA mean sea-level temperature (°C).
    pub const ISA_SEA_LEVEL_TEMP_C: f64 = 15.0;
    /// ISA lapse rate as used in procedure design (°C per foot, i.e. 1.98 °C / 1000 ft).
    pub const ISA_LAPSE_RATE_C_PER_FT: f64 = 0.001_98;
    /// Standard-rate turn (°/s).
    pub const STANDARD_RATE_DEG_S: f64 = 3.0;
    /// Angular step used to discretise turn spirals unless settings override it (°).
    pub const DEFAULT_SPIRAL_STEP_DEG: f64 = 5.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{M_PER_FT, M_PER_NM, SECONDS_PER_HOUR};

    /// Convert feet to metres.
    #[inline]
    pub fn ft_to_m(v: f64) -> f64 {
        v * M_PER_FT
    }

    /// Convert metres to feet.
    #[inline]
    pub fn m_to_ft(v: f64) -> f64 {
        v / M_PER_FT
    }

    /// Convert nautical miles to metres.
    #[inline]
    pub fn nm_to_m(v: f64) -> f64 {
        v * M_PER_NM
    }

    /// Convert metres to nautical miles.
    #[inline]
    pub fn m_to_nm(v: f64) -> f64 {
        v / M_PER_NM
    }

    /// Convert knots to metres per second.
    #[inline]
    pub fn kt_to_ms(v: f64) -> f64 {
        v * M_PER_NM / SECONDS_PER_HOUR
    }

    /// Convert metres per second to knots.
    #[inline]
    pub fn ms_to_kt(v: f64) -> f64 {
        v * SECONDS_PER_HOUR / M_PER_NM
    }

    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }

    /// Normalise a bearing into `[0, 360)` degrees.
    #[inline]
    pub fn normalize_bearing(deg: f64) -> f64 {
        let wrapped = deg.rem_euclid(360.0);
        if wrapped >= 360.0 { 0.0 } else { wrapped }
    }

    /// Normalise a signed angle into `(-180, 180]` degrees.
    #[inline]
    pub fn normalize_signed(deg: f64) -> f64 {
        let wrapped = normalize_bearing(deg);
        if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
    }
}
