//! # Blower Sizing Equations
//!
//! This module contains the fundamental pneumatic and aeration equations used
//! by the calculator and optimizer. Having equations in one place enables:
//! - Easy verification against the documented formulas
//! - Documentation of assumptions and unit conventions
//! - Consistent implementation across calculation steps
//!
//! ## Modules
//!
//! - [`pneumatic`] - Hydrostatic head, pipe friction, fittings, altitude, power
//! - [`aeration`] - Oxygen-demand airflow
//!
//! ## Unit Conventions
//!
//! - **Pressure**: mbar (1 m of water = 98.1 mbar)
//! - **Flow**: m³/hr unless the function name says otherwise
//! - **Velocity**: m/s
//! - **Power**: kW

pub mod aeration;
pub mod pneumatic;

// Re-export commonly used items
pub use aeration::{air_for_oxygen_demand_m3_hr, OXYGEN_CONTENT_KG_PER_M3};

pub use pneumatic::{
    affinity_power_fraction,
    altitude_flow_correction,
    altitude_pressure_correction,
    darcy_friction_loss_mbar,
    dynamic_pressure_mbar,
    fitting_loss_mbar,
    hydrostatic_pressure_mbar,
    pipe_area_m2,
    pipe_velocity_m_s,
    shaft_power_kw,
    AIR_DENSITY_KG_PER_M3,
    WATER_HEAD_MBAR_PER_M,
};
