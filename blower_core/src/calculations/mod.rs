//! # Blower Calculations
//!
//! This module contains the sizing pipeline. Each stage follows the pattern:
//!
//! - plain serde inputs (JSON-serializable)
//! - plain serde results (JSON-serializable)
//! - a pure function from one to the other, returning `CalcResult` when the
//!   inputs can be invalid
//!
//! ## Available Calculations
//!
//! - [`blower`] - Airflow, pressure and power for one sizing request
//! - [`configuration`] - Ranking of single, parallel and duty/standby arrangements
//! - [`comprehensive`] - Full report: site, sizing, configurations, energy analysis

pub mod blower;
pub mod comprehensive;
pub mod configuration;

// Re-export commonly used types
pub use blower::{CalculationBreakdown, CalculationInputs, CalculationResults, PipeSystem, TankSummary};
pub use comprehensive::{ComparisonRow, ComprehensiveReport, EnergyAnalysis};
pub use configuration::{BlowerConfiguration, ConfigType, LoadPeriod, LoadProfile, ScoreWeights};
