//! # Calculation Settings
//!
//! Knobs that are not part of a single request: which airflow model to use,
//! the blower efficiency assumed for power, and the economic constants used
//! by the energy analysis. Settings are plain serde data so the CLI (or any
//! other boundary) can load them from a file or environment and pass them in.
//!
//! ## Example
//!
//! ```rust
//! use blower_core::settings::{AirflowModel, CalcSettings};
//!
//! let settings = CalcSettings {
//!     airflow_model: AirflowModel::OxygenDemand,
//!     ..CalcSettings::default()
//! };
//! assert!(settings.validate().is_ok());
//! assert_eq!(settings.blower_efficiency, 0.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Strategy used to derive base airflow. One run uses exactly one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AirflowModel {
    /// Area or volume factors per application
    #[default]
    Empirical,
    /// Oxygen demand / (O₂ content × transfer efficiency × alpha)
    OxygenDemand,
}

/// Global calculation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcSettings {
    /// Base airflow strategy
    pub airflow_model: AirflowModel,

    /// Overall blower efficiency η used for every power figure in a result
    pub blower_efficiency: f64,

    /// Electricity tariff per kWh
    pub electricity_tariff_per_kwh: f64,

    /// Currency code for tariff and capital figures (e.g., "ZAR")
    pub currency: String,

    /// Capital cost of a single baseline blower, in `currency`
    pub base_capital_cost: f64,

    /// Operating hours per year spread over the load profile periods
    pub annual_operating_hours: f64,
}

impl Default for CalcSettings {
    fn default() -> Self {
        CalcSettings {
            airflow_model: AirflowModel::Empirical,
            blower_efficiency: 0.5,
            electricity_tariff_per_kwh: 2.50,
            currency: "ZAR".to_string(),
            base_capital_cost: 50_000.0,
            annual_operating_hours: 8760.0,
        }
    }
}

impl CalcSettings {
    /// Validate settings before a calculation uses them.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.blower_efficiency > 0.0 && self.blower_efficiency <= 1.0) {
            return Err(CalcError::invalid_setting(
                "blower_efficiency",
                self.blower_efficiency.to_string(),
                "Efficiency must be in (0, 1]",
            ));
        }
        if !self.electricity_tariff_per_kwh.is_finite() || self.electricity_tariff_per_kwh < 0.0 {
            return Err(CalcError::invalid_setting(
                "electricity_tariff_per_kwh",
                self.electricity_tariff_per_kwh.to_string(),
                "Tariff cannot be negative",
            ));
        }
        if !self.base_capital_cost.is_finite() || self.base_capital_cost < 0.0 {
            return Err(CalcError::invalid_setting(
                "base_capital_cost",
                self.base_capital_cost.to_string(),
                "Capital cost cannot be negative",
            ));
        }
        if !(self.annual_operating_hours > 0.0 && self.annual_operating_hours <= 8784.0) {
            return Err(CalcError::invalid_setting(
                "annual_operating_hours",
                self.annual_operating_hours.to_string(),
                "Hours must be in (0, 8784]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = CalcSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.airflow_model, AirflowModel::Empirical);
    }

    #[test]
    fn test_invalid_efficiency() {
        let settings = CalcSettings {
            blower_efficiency: 1.5,
            ..CalcSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SETTING");

        let settings = CalcSettings {
            blower_efficiency: 0.0,
            ..CalcSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: CalcSettings = serde_json::from_str(r#"{"airflow_model": "oxygen_demand"}"#).unwrap();
        assert_eq!(settings.airflow_model, AirflowModel::OxygenDemand);
        assert_eq!(settings.blower_efficiency, 0.5);
        assert_eq!(settings.currency, "ZAR");
    }
}
