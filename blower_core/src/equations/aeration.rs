//! # Aeration Formulas
//!
//! Oxygen-demand based airflow. Used when the calculator runs with
//! [`AirflowModel::OxygenDemand`](crate::settings::AirflowModel).

/// Mass of oxygen in one cubic meter of air at standard conditions (kg/m³)
pub const OXYGEN_CONTENT_KG_PER_M3: f64 = 0.28;

/// Airflow needed to deliver an oxygen demand through a diffuser system.
///
/// # Formula
/// Q = OD / (0.28 × SOTE × α)
///
/// # Arguments
/// * `oxygen_demand_kg_hr` - Oxygen to dissolve (kg O₂/hr)
/// * `transfer_efficiency` - Standard oxygen transfer efficiency (fraction)
/// * `alpha` - Process-water to clean-water transfer ratio
///
/// # Returns
/// Air volume flow in m³/hr
///
/// # Example
/// ```rust
/// use blower_core::equations::aeration::air_for_oxygen_demand_m3_hr;
///
/// // 21.6 kg/hr at 20 % SOTE, α = 0.65
/// let q = air_for_oxygen_demand_m3_hr(21.6, 0.20, 0.65);
/// assert!((q - 593.41).abs() < 0.01);
/// ```
#[inline]
pub fn air_for_oxygen_demand_m3_hr(oxygen_demand_kg_hr: f64, transfer_efficiency: f64, alpha: f64) -> f64 {
    oxygen_demand_kg_hr / (OXYGEN_CONTENT_KG_PER_M3 * transfer_efficiency * alpha)
}
