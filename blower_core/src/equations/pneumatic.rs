//! # Pneumatic Formulas
//!
//! Pressure and power relations for low-pressure air systems (side channel
//! and centrifugal blowers feeding submerged diffusers).
//!
//! ## Notation
//!
//! - `h` = Submergence depth of the diffusers (m)
//! - `SG` = Specific gravity of the tank liquid
//! - `f` = Darcy friction factor
//! - `L`, `D` = Pipe length and inside diameter (m)
//! - `ρ` = Air density, fixed at 1.2 kg/m³ (20 °C, sea level)
//! - `v` = Mean air velocity in the pipe (m/s)
//! - `K` = Fitting loss coefficient
//! - `η` = Overall blower efficiency
//!
//! ## References
//!
//! - Darcy-Weisbach equation, simplified for incompressible flow
//! - Fan/blower affinity laws: Q ∝ N, p ∝ N², P ∝ N³

use std::f64::consts::PI;

use crate::units::{Millibar, Pascals};

/// Hydrostatic head per meter of water (mbar/m)
pub const WATER_HEAD_MBAR_PER_M: f64 = 98.1;

/// Air density used for pipe losses (kg/m³)
pub const AIR_DENSITY_KG_PER_M3: f64 = 1.2;

// =============================================================================
// STATIC HEAD
// =============================================================================

/// Back-pressure from the liquid column above the diffusers.
///
/// # Formula
/// p = h × 98.1 × SG
///
/// # Example
/// ```rust
/// use blower_core::equations::pneumatic::hydrostatic_pressure_mbar;
///
/// // 2 m of waste water (SG 1.05)
/// let p = hydrostatic_pressure_mbar(2.0, 1.05);
/// assert!((p - 206.01).abs() < 1e-9);
/// ```
#[inline]
pub fn hydrostatic_pressure_mbar(depth_m: f64, specific_gravity: f64) -> f64 {
    depth_m * WATER_HEAD_MBAR_PER_M * specific_gravity
}

// =============================================================================
// PIPE FLOW
// =============================================================================

/// Inside cross-sectional area of a round pipe, A = π(D/2)²
#[inline]
pub fn pipe_area_m2(diameter_m: f64) -> f64 {
    PI * (diameter_m / 2.0).powi(2)
}

/// Mean air velocity in a round pipe.
///
/// # Formula
/// v = Q / A
///
/// # Example
/// ```rust
/// use blower_core::equations::pneumatic::pipe_velocity_m_s;
///
/// // 4.5 m³/min through DN100
/// let v = pipe_velocity_m_s(4.5 / 60.0, 0.1);
/// assert!((v - 9.549).abs() < 0.001);
/// ```
#[inline]
pub fn pipe_velocity_m_s(flow_m3_s: f64, diameter_m: f64) -> f64 {
    flow_m3_s / pipe_area_m2(diameter_m)
}

/// Velocity pressure of the air stream, ½ρv², in mbar.
///
/// # Example
/// ```rust
/// use blower_core::equations::pneumatic::dynamic_pressure_mbar;
///
/// // ½ × 1.2 × 10² = 60 Pa = 0.6 mbar
/// assert!((dynamic_pressure_mbar(10.0) - 0.6).abs() < 1e-12);
/// ```
#[inline]
pub fn dynamic_pressure_mbar(velocity_m_s: f64) -> f64 {
    let pa = Pascals(0.5 * AIR_DENSITY_KG_PER_M3 * velocity_m_s.powi(2));
    Millibar::from(pa).value()
}

/// Straight-pipe friction loss (simplified Darcy-Weisbach).
///
/// # Formula
/// Δp = 0.5 × f × (L/D) × ρ × v² × 0.01   (mbar)
///
/// # Example
/// ```rust
/// use blower_core::equations::pneumatic::darcy_friction_loss_mbar;
///
/// // 50 m of smooth DN100 at 10 m/s
/// let dp = darcy_friction_loss_mbar(0.025, 50.0, 0.1, 10.0);
/// assert!((dp - 7.5).abs() < 1e-9);
/// ```
#[inline]
pub fn darcy_friction_loss_mbar(friction_factor: f64, length_m: f64, diameter_m: f64, velocity_m_s: f64) -> f64 {
    friction_factor * (length_m / diameter_m) * dynamic_pressure_mbar(velocity_m_s)
}

/// Minor losses from fittings, Δp = ΣK × ½ρv² (mbar).
///
/// # Example
/// ```rust
/// use blower_core::equations::pneumatic::fitting_loss_mbar;
///
/// // 4 bends (0.9) + entrance (0.5) + exit (1.0) = 5.1 at 10 m/s
/// assert!((fitting_loss_mbar(5.1, 10.0) - 3.06).abs() < 1e-9);
/// ```
#[inline]
pub fn fitting_loss_mbar(k_total: f64, velocity_m_s: f64) -> f64 {
    k_total * dynamic_pressure_mbar(velocity_m_s)
}

// =============================================================================
// ALTITUDE
// =============================================================================

/// Pressure multiplier for site altitude: +1 % per 100 m.
///
/// Returns exactly 1.0 at or below sea level.
///
/// # Example
/// ```rust
/// use blower_core::equations::pneumatic::altitude_pressure_correction;
///
/// assert!((altitude_pressure_correction(1420.0) - 1.142).abs() < 1e-12);
/// assert_eq!(altitude_pressure_correction(0.0), 1.0);
/// ```
#[inline]
pub fn altitude_pressure_correction(altitude_m: f64) -> f64 {
    if altitude_m > 0.0 {
        1.0 + altitude_m / 100.0 / 100.0
    } else {
        1.0
    }
}

/// Airflow multiplier for site altitude: +1 % per 120 m.
///
/// Deliberately smaller than [`altitude_pressure_correction`]; volumetric
/// capability degrades less than pressure capability with altitude.
#[inline]
pub fn altitude_flow_correction(altitude_m: f64) -> f64 {
    if altitude_m > 0.0 {
        1.0 + altitude_m / 120.0 / 100.0
    } else {
        1.0
    }
}

// =============================================================================
// POWER
// =============================================================================

/// Shaft power of a blower.
///
/// # Formula
/// P = Q × p / (36000 × η)   with Q in m³/hr, p in mbar, P in kW
///
/// # Example
/// ```rust
/// use blower_core::equations::pneumatic::shaft_power_kw;
///
/// let kw = shaft_power_kw(270.0, 200.0, 0.5);
/// assert!((kw - 3.0).abs() < 1e-9);
/// ```
#[inline]
pub fn shaft_power_kw(flow_m3_hr: f64, pressure_mbar: f64, efficiency: f64) -> f64 {
    (flow_m3_hr * pressure_mbar) / (36000.0 * efficiency)
}

/// Affinity law: power fraction at a given speed fraction, P/P₀ = (N/N₀)³
#[inline]
pub fn affinity_power_fraction(speed_fraction: f64) -> f64 {
    speed_fraction.powi(3)
}
