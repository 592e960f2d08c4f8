//! # blower_core - Blower Sizing Engine
//!
//! `blower_core` is the computational heart of the blower sizing tool. It turns
//! a description of aerated tanks and a site into the airflow, pressure and
//! power a blower must deliver, then recommends how many blowers to install.
//! All inputs and outputs are JSON-serializable, so the same engine serves the
//! CLI, an HTTP layer or a chat assistant.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Transparent**: Every intermediate value is reported
//!
//! ## Quick Start
//!
//! ```rust
//! use blower_core::{comprehensive, CalcSettings, CalculationInputs};
//!
//! let inputs = CalculationInputs {
//!     tank_length_m: 6.0,
//!     tank_width_m: 3.0,
//!     tank_depth_m: 2.0,
//!     location_text: "1420 m above sea level".to_string(),
//!     ..CalculationInputs::default()
//! };
//!
//! let report = comprehensive::run(&inputs, &CalcSettings::default()).unwrap();
//! println!("{:.0} m³/hr at {:.0} mbar", report.requirements.airflow_m3_hr, report.requirements.pressure_mbar);
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&report).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`location`] - Free-text site resolution and air density
//! - [`calculations`] - Sizing, configuration optimizer, comprehensive report
//! - [`application`] - Application, diffuser and pipe parameter tables
//! - [`equations`] - Pneumatic and aeration formulas
//! - [`settings`] - Calculation settings
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod application;
pub mod calculations;
pub mod equations;
pub mod errors;
pub mod location;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use application::{Application, DiffuserType, OperationType, PipeMaterial, TankArrangement};
pub use calculations::{blower, comprehensive, configuration};
pub use calculations::{BlowerConfiguration, CalculationInputs, CalculationResults, ComprehensiveReport, LoadProfile};
pub use errors::{CalcError, CalcResult};
pub use location::LocationData;
pub use settings::{AirflowModel, CalcSettings};
