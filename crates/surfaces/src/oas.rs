use ifp_core::{Geometry, GeometryError, InputError, Quantity, Ring, Unit};
use tracing::debug;

use crate::SurfaceError;
use crate::category::{ApproachCategory, OasTemplate, oas_template};
use crate::frame::{LocalPoint, RunwayFrame};

/// Surface names in emission order.
pub const OAS_TEMPLATE_SURFACES: [&str; 7] = ["W", "X left", "X right", "Y left", "Y right", "Z", "ground"];
/// Appended to the names of the cut-off surfaces when both sets are emitted.
pub const EXTENDED_SUFFIX: &str = " extended";

/// How far the W and X surfaces reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OasExtent {
    /// Standard template points.
    Template,
    /// C′ and D′ moved along their edges to the height `FAP − MOC − threshold elevation`.
    Extended {
        fap_elevation: Quantity,
        moc_intermediate: Quantity,
    },
    /// The template followed by the W, X and Y surfaces cut off as for `Extended`.
    Both {
        fap_elevation: Quantity,
        moc_intermediate: Quantity,
    },
}

impl OasExtent {
    pub fn label(&self) -> &'static str {
        match self {
            OasExtent::Template => "Template",
            OasExtent::Extended { .. } => "Extended",
            OasExtent::Both { .. } => "Both",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OasRequest {
    pub frame: RunwayFrame,
    pub category: ApproachCategory,
    pub extent: OasExtent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OasSurfaces {
    pub geometry: Geometry,
    /// Height above threshold where the extended surfaces stop.
    pub cutoff_height: Option<Quantity>,
}

pub fn build_oas(request: &OasRequest) -> Result<OasSurfaces, SurfaceError> {
    let template = oas_template(request.category)?;
    let frame = &request.frame;

    let (rings, cutoff_height) = match request.extent {
        OasExtent::Template => (template_rings(frame, template, template.c_prime, template.d_prime)?, None),
        OasExtent::Extended {
            fap_elevation,
            moc_intermediate,
        } => {
            let cutoff_m = cutoff_height(frame, fap_elevation, moc_intermediate)?;
            let (c_prime, d_prime) = cut_off(template, cutoff_m);
            (template_rings(frame, template, c_prime, d_prime)?, Some(Quantity::meters(cutoff_m)))
        }
        OasExtent::Both {
            fap_elevation,
            moc_intermediate,
        } => {
            let cutoff_m = cutoff_height(frame, fap_elevation, moc_intermediate)?;
            let (c_prime, d_prime) = cut_off(template, cutoff_m);
            let mut rings = template_rings(frame, template, template.c_prime, template.d_prime)?;
            // Z and the ground plane do not depend on C′ or D′.
            let [w, x_left, x_right, y_left, y_right, _, _] = OAS_TEMPLATE_SURFACES;
            let extended = template_rings(frame, template, c_prime, d_prime)?;
            for ring in extended {
                if [w, x_left, x_right, y_left, y_right].contains(&ring.name()) {
                    let name = format!("{}{EXTENDED_SUFFIX}", ring.name());
                    rings.push(Ring::closed(name, ring.points().to_vec())?);
                }
            }
            (rings, Some(Quantity::meters(cutoff_m)))
        }
    };

    debug!(
        category = %request.category,
        extent = request.extent.label(),
        rings = rings.len(),
        cutoff_m = cutoff_height.map(|q| q.value),
        "built OAS surfaces"
    );
    Ok(OasSurfaces {
        geometry: Geometry::surfaces(rings)?,
        cutoff_height,
    })
}

fn cutoff_height(frame: &RunwayFrame, fap_elevation: Quantity, moc_intermediate: Quantity) -> Result<f64, InputError> {
    let fap_m = fap_elevation.expect_in("fap_elevation", Unit::Meters)?;
    let moc_m = moc_intermediate.expect_in("moc_intermediate", Unit::Meters)?;
    if moc_m < 0.0 {
        return Err(InputError::out_of_range("moc_intermediate", moc_m, "[0, ∞) m"));
    }
    let floor_m = frame.threshold_elevation_m() + moc_m;
    let cutoff_m = fap_m - floor_m;
    if cutoff_m <= 0.0 {
        return Err(InputError::out_of_range(
            "fap_elevation",
            fap_m,
            format!("({floor_m:.2}, ∞) m (above threshold elevation plus MOC)"),
        ));
    }
    Ok(cutoff_m)
}

/// C′ and D′ moved along the C→C′ and D→D′ edges to `cutoff_m` above threshold.
fn cut_off(template: &OasTemplate, cutoff_m: f64) -> (LocalPoint, LocalPoint) {
    (
        template.c.along(template.c_prime, cutoff_m / template.c_prime.h),
        template.d.along(template.d_prime, cutoff_m / template.d_prime.h),
    )
}

fn template_rings(
    frame: &RunwayFrame,
    template: &OasTemplate,
    c_prime: LocalPoint,
    d_prime: LocalPoint,
) -> Result<Vec<Ring>, GeometryError> {
    let (c, d, e, e_prime) = (template.c, template.d, template.e, template.e_prime);
    let m = LocalPoint::mirrored;
    let [w, x_left, x_right, y_left, y_right, z, ground] = OAS_TEMPLATE_SURFACES;
    Ok(vec![
        frame.ring(w, &[c_prime, m(c_prime), m(c), c])?,
        frame.ring(x_left, &[c_prime, d_prime, d, c])?,
        frame.ring(x_right, &[m(c_prime), m(d_prime), m(d), m(c)])?,
        frame.ring(y_left, &[d, e, e_prime, d_prime])?,
        frame.ring(y_right, &[m(d), m(d_prime), m(e_prime), m(e)])?,
        frame.ring(z, &[m(e), e, e_prime, m(e_prime)])?,
        frame.ring(ground, &[m(c), c, d, e, m(e), m(d)])?,
    ])
}
