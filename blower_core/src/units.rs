//! # Unit Types
//!
//! Type-safe wrappers for the units used in blower sizing. These provide
//! compile-time safety against unit confusion while remaining lightweight
//! (just f64 wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Blower sizing uses a small, consistent set of SI-derived units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## Units
//!
//! - Length: meters (m), millimeters (mm)
//! - Pressure: millibar (mbar), pascals (Pa)
//! - Volumetric flow: m³/min, m³/hr, m³/s
//!
//! ## Example
//!
//! ```rust
//! use blower_core::units::{CubicMetersPerHour, CubicMetersPerMinute, Meters, Millimeters};
//!
//! let diameter = Millimeters(100.0);
//! let diameter_m: Meters = diameter.into();
//! assert_eq!(diameter_m.0, 0.1);
//!
//! let flow = CubicMetersPerMinute(4.5);
//! let flow_hr: CubicMetersPerHour = flow.into();
//! assert_eq!(flow_hr.0, 270.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Pressure Units
// ============================================================================

/// Pressure in millibar (1 mbar = 100 Pa)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millibar(pub f64);

/// Pressure in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

impl From<Pascals> for Millibar {
    fn from(pa: Pascals) -> Self {
        Millibar(pa.0 * 0.01)
    }
}

// ============================================================================
// Volumetric Flow Units
// ============================================================================

/// Volumetric flow in cubic meters per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetersPerMinute(pub f64);

/// Volumetric flow in cubic meters per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetersPerHour(pub f64);

/// Volumetric flow in cubic meters per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetersPerSecond(pub f64);

impl From<CubicMetersPerMinute> for CubicMetersPerHour {
    fn from(flow: CubicMetersPerMinute) -> Self {
        CubicMetersPerHour(flow.0 * 60.0)
    }
}

impl From<CubicMetersPerHour> for CubicMetersPerMinute {
    fn from(flow: CubicMetersPerHour) -> Self {
        CubicMetersPerMinute(flow.0 / 60.0)
    }
}

impl From<CubicMetersPerMinute> for CubicMetersPerSecond {
    fn from(flow: CubicMetersPerMinute) -> Self {
        CubicMetersPerSecond(flow.0 / 60.0)
    }
}

// ============================================================================
// Accessors and Arithmetic
// ============================================================================

macro_rules! impl_value {
    ($($type:ty),*) => {
        $(
            impl $type {
                /// Get the raw f64 value
                pub fn value(self) -> f64 {
                    self.0
                }
            }
        )*
    };
}

// Pressures and flows are summed and scaled as the calculation builds up.
macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }
    };
}

impl_value!(Meters, Millibar, CubicMetersPerMinute, CubicMetersPerHour, CubicMetersPerSecond);

impl_arithmetic!(Millibar);
impl_arithmetic!(CubicMetersPerHour);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millimeters_to_meters() {
        let mm = Millimeters(150.0);
        let m: Meters = mm.into();
        assert_eq!(m.0, 0.15);
    }

    #[test]
    fn test_pascals_to_millibar() {
        let pa = Pascals(2500.0);
        let mbar: Millibar = pa.into();
        assert_eq!(mbar.value(), 25.0);
    }

    #[test]
    fn test_flow_conversions() {
        let per_min = CubicMetersPerMinute(6.0);
        let per_hr: CubicMetersPerHour = per_min.into();
        assert_eq!(per_hr.0, 360.0);
        let per_s: CubicMetersPerSecond = per_min.into();
        assert_eq!(per_s.0, 0.1);
        let back: CubicMetersPerMinute = per_hr.into();
        assert_eq!(back.value(), 6.0);
    }

    #[test]
    fn test_pressure_build_up() {
        let subtotal = Millibar(200.0) + Millibar(50.0);
        assert_eq!(subtotal.value(), 250.0);
        let total = subtotal * 1.2;
        assert!(((total - subtotal).value() - 50.0).abs() < 1e-9);

        let flow = CubicMetersPerHour(270.0) * 2.0;
        assert_eq!(flow.value(), 540.0);
    }

    #[test]
    fn test_serialization() {
        let p = Millibar(206.01);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "206.01");

        let roundtrip: Millibar = serde_json::from_str(&json).unwrap();
        assert_eq!(p, roundtrip);
    }
}
