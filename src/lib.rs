//! Procedure-surface computation engine.
//!
//! Scalar inputs go in, a [`GeometryFeature`] comes out: planar geometry plus an
//! ordered parameter record tagged with its [`CalculationType`]. Builders are
//! pure and share nothing but read-only lookup tables, so calls may run
//! concurrently on separate threads.

pub mod calculation;
mod error;
pub mod feature;
pub mod keys;
pub mod record;
pub mod report;

pub use calculation::{build_feature, build_request};
pub use error::EngineError;
pub use feature::GeometryFeature;
pub use report::resolve_parameters;

pub use ifp_atmosphere as atmosphere;
pub use ifp_config as config;
pub use ifp_core as core;
pub use ifp_core::CalculationType;
pub use ifp_export as export;
pub use ifp_kinematics as kinematics;
pub use ifp_spiral as spiral;
pub use ifp_surfaces as surfaces;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
