use thiserror::Error;

/// Rejections raised while reading or validating scalar inputs.
///
/// Every variant names the offending input so hosts can surface it directly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("missing required input '{0}'")]
    Missing(String),
    #[error("input '{name}' is not a finite number")]
    NonFinite { name: String },
    #[error("input '{name}' = {value} is outside {expected}")]
    OutOfRange {
        name: String,
        value: f64,
        expected: String,
    },
    #[error("input '{name}' must be expressed as {expected}, found {found}")]
    UnitMismatch {
        name: String,
        expected: String,
        found: String,
    },
    #[error("input '{name}' has unrecognised value '{value}'")]
    Unrecognised { name: String, value: String },
}

impl InputError {
    pub fn out_of_range(name: &str, value: f64, expected: impl Into<String>) -> Self {
        InputError::OutOfRange {
            name: name.to_string(),
            value,
            expected: expected.into(),
        }
    }
}

/// Reject NaN and infinities, returning the value untouched otherwise.
pub fn ensure_finite(name: &str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NonFinite {
            name: name.to_string(),
        })
    }
}
