use ifp_core::{GeometryError, InputError};
use ifp_spiral::SpiralError;
use ifp_surfaces::SurfaceError;
use thiserror::Error;

/// Everything a builder invocation can fail with. No partial feature is ever returned.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("invalid approach category '{0}'")]
    InvalidCategory(String),
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(#[from] GeometryError),
    #[error("parameter schema mismatch: {0}")]
    SchemaMismatch(String),
}

impl From<SpiralError> for EngineError {
    fn from(err: SpiralError) -> Self {
        match err {
            SpiralError::Input(e) => EngineError::InvalidInput(e),
            SpiralError::Geometry(e) => EngineError::DegenerateGeometry(e),
        }
    }
}

impl From<SurfaceError> for EngineError {
    fn from(err: SurfaceError) -> Self {
        match err {
            SurfaceError::Input(e) => EngineError::InvalidInput(e),
            SurfaceError::InvalidCategory(label) => EngineError::InvalidCategory(label),
            SurfaceError::Geometry(e) => EngineError::DegenerateGeometry(e),
        }
    }
}
