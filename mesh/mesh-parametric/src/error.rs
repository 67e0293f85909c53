//! Error types for parametric shape generation.

use thiserror::Error;

/// Result type for parametric shape operations.
pub type ParamResult<T> = Result<T, ParamError>;

/// Errors that can occur while building or generating a parametric shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// A numeric field is non-finite or outside its allowed range.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Constraint that was violated.
        reason: &'static str,
    },
}

impl ParamError {
    pub(crate) const fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}
