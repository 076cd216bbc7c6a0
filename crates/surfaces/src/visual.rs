use ifp_core::{Geometry, InputError, Quantity, Unit};
use tracing::debug;

use crate::SurfaceError;
use crate::frame::{CrossSection, LocalPoint, RunwayFrame};

/// Distance of the localizer VSS origin before the threshold (m).
pub const VSS_ORIGIN_M: f64 = 60.0;
/// Localizer VSS slope is the approach angle less this (°).
pub const VSS_SLOPE_REDUCTION_DEG: f64 = 1.12;
/// Straight-in VSS length is this multiple of the distance the approach path
/// takes to descend from OCH to RDH.
pub const STRAIGHT_IN_LENGTH_FACTOR: f64 = 1.12;
/// Localizer OCS slope is the approach angle less this (°).
pub const OCS_SLOPE_REDUCTION_DEG: f64 = 0.5;
/// Lateral splay of the straight-in surfaces, per side.
pub const VSS_SPLAY: f64 = 0.15;
/// Constant VSS half-width for localizer-only approaches (m).
pub const LOC_VSS_HALF_WIDTH_M: f64 = 60.0;
/// Margin added to half the runway width at the threshold end of the localizer OCS (m).
pub const LOC_OCS_EXTRA_HALF_WIDTH_M: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualVariant {
    StraightIn { strip_width: Quantity },
    Localizer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisualSegmentRequest {
    pub frame: RunwayFrame,
    pub variant: VisualVariant,
    pub runway_width: Quantity,
    pub och: Quantity,
    pub rdh: Quantity,
    pub vpa: Quantity,
    pub eye_to_wheel_height: Option<Quantity>,
}

/// VSS and OCS rings with the distances used to size them.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualSegment {
    pub geometry: Geometry,
    pub vss_slope: Quantity,
    pub vss_length: Quantity,
    pub decision_point_distance: Quantity,
    pub ocs_length: Quantity,
}

pub fn build_visual_segment(request: &VisualSegmentRequest) -> Result<VisualSegment, SurfaceError> {
    let runway_width_m = positive("runway_width", request.runway_width.expect_in("runway_width", Unit::Meters)?)?;
    let och_m = positive("och", request.och.expect_in("och", Unit::Meters)?)?;
    let rdh_m = non_negative("rdh", request.rdh.expect_in("rdh", Unit::Meters)?)?;
    let eye_to_wheel_m = match request.eye_to_wheel_height {
        Some(q) => non_negative("eye_to_wheel_height", q.expect_in("eye_to_wheel_height", Unit::Meters)?)?,
        None => 0.0,
    };
    let vpa_deg = request.vpa.expect_in("vpa", Unit::Degrees)?;
    let min_vpa_deg = match request.variant {
        VisualVariant::StraightIn { .. } => 0.0,
        VisualVariant::Localizer => VSS_SLOPE_REDUCTION_DEG,
    };
    if vpa_deg <= min_vpa_deg || vpa_deg >= 90.0 {
        return Err(InputError::out_of_range("vpa", vpa_deg, format!("({min_vpa_deg}, 90) °")).into());
    }
    if och_m <= rdh_m + eye_to_wheel_m {
        return Err(InputError::out_of_range(
            "och",
            och_m,
            format!("({:.2}, ∞) m (above RDH plus eye-to-wheel height)", rdh_m + eye_to_wheel_m),
        )
        .into());
    }

    let path_gradient = vpa_deg.to_radians().tan();
    let decision_point_m = (och_m - rdh_m - eye_to_wheel_m) / path_gradient;

    let frame = &request.frame;
    let (rings, vss_slope_deg, vss_length_m, ocs_length_m) = match request.variant {
        VisualVariant::StraightIn { strip_width } => {
            let strip_m = strip_width.expect_in("strip_width", Unit::Meters)?;
            if strip_m <= runway_width_m {
                return Err(InputError::out_of_range(
                    "strip_width",
                    strip_m,
                    format!("({runway_width_m:.2}, ∞) m (wider than the runway)"),
                )
                .into());
            }
            // Both surfaces run from the threshold to x = L and rise from 0 to OCH;
            // the OCS flanks the VSS on either side.
            let vss_length_m = STRAIGHT_IN_LENGTH_FACTOR * (och_m - rdh_m) / path_gradient;
            let splay_m = VSS_SPLAY * vss_length_m;
            let vss_start = CrossSection::new(0.0, runway_width_m / 2.0, 0.0);
            let vss_end = CrossSection::new(vss_length_m, runway_width_m / 2.0 + splay_m, och_m);
            let ocs_start = CrossSection::new(0.0, strip_m / 2.0, 0.0);
            let ocs_end = CrossSection::new(vss_length_m, strip_m / 2.0 + splay_m, och_m);
            let rings = vec![
                frame.ring("VSS", &trapezoid(vss_start, vss_end))?,
                frame.ring(
                    "OCS left",
                    &[ocs_start.left(), ocs_end.left(), vss_end.left(), vss_start.left()],
                )?,
                frame.ring(
                    "OCS right",
                    &[vss_start.right(), vss_end.right(), ocs_end.right(), ocs_start.right()],
                )?,
            ];
            let vss_slope_deg = (och_m / vss_length_m).atan().to_degrees();
            (rings, vss_slope_deg, vss_length_m, vss_length_m)
        }
        VisualVariant::Localizer => {
            let ocs_length_m = (och_m - rdh_m) / path_gradient;
            if ocs_length_m <= VSS_ORIGIN_M {
                return Err(InputError::out_of_range(
                    "och",
                    och_m,
                    format!("values placing the OCS end beyond {VSS_ORIGIN_M} m"),
                )
                .into());
            }
            let vss_slope_deg = vpa_deg - VSS_SLOPE_REDUCTION_DEG;
            let vss_gradient = vss_slope_deg.to_radians().tan();
            let ocs_gradient = (vpa_deg - OCS_SLOPE_REDUCTION_DEG).to_radians().tan();
            let vss_length_m = och_m / vss_gradient;
            let vss_start = CrossSection::new(VSS_ORIGIN_M, LOC_VSS_HALF_WIDTH_M, 0.0);
            let vss_end = vss_start.extrude(vss_length_m, 0.0, vss_gradient);
            let ocs_start = CrossSection::new(0.0, runway_width_m / 2.0 + LOC_OCS_EXTRA_HALF_WIDTH_M, 0.0);
            let ocs_end = CrossSection::new(ocs_length_m, LOC_VSS_HALF_WIDTH_M, ocs_length_m * ocs_gradient);
            let ocs = [
                ocs_start.right(),
                vss_start.right(),
                ocs_end.right(),
                ocs_end.left(),
                vss_start.left(),
                ocs_start.left(),
            ];
            let rings = vec![frame.ring("VSS", &trapezoid(vss_start, vss_end))?, frame.ring("OCS", &ocs)?];
            (rings, vss_slope_deg, vss_length_m, ocs_length_m)
        }
    };

    debug!(
        vss_length_m,
        decision_point_m,
        ocs_length_m,
        "built visual segment surfaces"
    );
    Ok(VisualSegment {
        geometry: Geometry::surfaces(rings)?,
        vss_slope: Quantity::degrees(vss_slope_deg),
        vss_length: Quantity::meters(vss_length_m),
        decision_point_distance: Quantity::meters(decision_point_m),
        ocs_length: Quantity::meters(ocs_length_m),
    })
}

fn trapezoid(start: CrossSection, end: CrossSection) -> [LocalPoint; 4] {
    [start.right(), end.right(), end.left(), start.left()]
}

fn positive(name: &str, value: f64) -> Result<f64, InputError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(InputError::out_of_range(name, value, "(0, ∞) m"))
    }
}

fn non_negative(name: &str, value: f64) -> Result<f64, InputError> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(InputError::out_of_range(name, value, "[0, ∞) m"))
    }
}
