//! Runway-referenced surface builders.
//!
//! Every builder works in a runway-aligned local frame (see [`RunwayFrame`]) and
//! projects into the caller's planar frame with absolute elevations on every
//! vertex. Category dimensions come from read-only lookup tables.

mod basic;
mod category;
mod frame;
mod oas;
mod visual;

use ifp_core::{GeometryError, InputError};
use thiserror::Error;

pub use basic::{BasicSurfaces, build_basic_surfaces};
pub use category::{ApproachCategory, CategoryProfile, OasTemplate, category_profile, oas_template};
pub use frame::{CrossSection, LocalPoint, RunwayFrame};
pub use oas::{EXTENDED_SUFFIX, OAS_TEMPLATE_SURFACES, OasExtent, OasRequest, OasSurfaces, build_oas};
pub use visual::{
    LOC_OCS_EXTRA_HALF_WIDTH_M, LOC_VSS_HALF_WIDTH_M, OCS_SLOPE_REDUCTION_DEG, STRAIGHT_IN_LENGTH_FACTOR,
    VSS_ORIGIN_M, VSS_SLOPE_REDUCTION_DEG, VSS_SPLAY, VisualSegment, VisualSegmentRequest, VisualVariant,
    build_visual_segment,
};

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("unsupported approach category '{0}'")]
    InvalidCategory(String),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
