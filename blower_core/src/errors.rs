//! # Error Types
//!
//! Structured error types for blower_core. Only input validation can fail a
//! calculation; everything else (unresolved location, missing pipe data,
//! out-of-band velocities or pressures) degrades into messages and warnings
//! attached to the result.
//!
//! ## Example
//!
//! ```rust
//! use blower_core::errors::{CalcError, CalcResult};
//!
//! fn validate_depth(depth_m: f64) -> CalcResult<()> {
//!     if depth_m <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "tank_depth_m".to_string(),
//!             value: depth_m.to_string(),
//!             reason: "Depth must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for blower_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong so callers
/// (CLI, HTTP layer, chat front-end) can report it back to the user.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, not finite, unknown variant)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A calculation setting is out of range
    #[error("Invalid setting '{setting}': {value} - {reason}")]
    InvalidSetting {
        setting: String,
        value: String,
        reason: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an InvalidSetting error
    pub fn invalid_setting(setting: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidSetting {
            setting: setting.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::InvalidSetting { .. } => "INVALID_SETTING",
        }
    }
}

/// Reject non-finite or non-positive values for a named field.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("tank_length_m", "-5", "Value must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::invalid_input("tank_count", "0", "none").error_code(), "INVALID_INPUT");
        assert_eq!(CalcError::missing_field("tank_depth_m").error_code(), "MISSING_FIELD");
        assert_eq!(
            CalcError::invalid_setting("blower_efficiency", "0", "out of range").error_code(),
            "INVALID_SETTING"
        );
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("depth", 2.0).is_ok());
        assert!(require_positive("depth", 0.0).is_err());
        assert!(require_positive("depth", f64::NAN).is_err());
        assert!(require_positive("depth", f64::INFINITY).is_err());
    }
}
