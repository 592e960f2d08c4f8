//! Site air density relative to ISA sea level (101 325 Pa, 15 °C).
//!
//! Informational: the calculator sizes with its own altitude multipliers;
//! these ratios tell the buyer how much a catalogue rating (quoted at
//! standard conditions) must be oversized for the site.

use serde::{Deserialize, Serialize};

const SEA_LEVEL_TEMP_K: f64 = 288.15;
const LAPSE_RATE_K_PER_M: f64 = 0.0065;
const BAROMETRIC_EXPONENT: f64 = 5.256;

/// Air density ratios at a site
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientConditions {
    pub altitude_m: f64,
    pub temperature_c: f64,
    /// Barometric pressure / sea-level pressure
    pub pressure_ratio: f64,
    /// Standard temperature / site temperature (absolute)
    pub temperature_ratio: f64,
    /// Site air density / standard air density
    pub density_ratio: f64,
    /// Factor to oversize a standard-rated blower by (>= 1.0)
    pub oversize_factor: f64,
}

impl AmbientConditions {
    /// Compute density ratios with the ISA barometric formula.
    pub fn at(altitude_m: f64, temperature_c: f64) -> Self {
        let base = (1.0 - LAPSE_RATE_K_PER_M * altitude_m / SEA_LEVEL_TEMP_K).max(0.0);
        let pressure_ratio = base.powf(BAROMETRIC_EXPONENT);
        let temperature_ratio = SEA_LEVEL_TEMP_K / (temperature_c + 273.15);
        let density_ratio = pressure_ratio * temperature_ratio;
        let oversize_factor = if density_ratio > 0.0 && density_ratio < 1.0 {
            1.0 / density_ratio
        } else {
            1.0
        };
        AmbientConditions {
            altitude_m,
            temperature_c,
            pressure_ratio,
            temperature_ratio,
            density_ratio,
            oversize_factor,
        }
    }

    /// Advisory about oversizing, when it matters (> 5 %)
    pub fn advisory(&self) -> Option<String> {
        let percent = (self.oversize_factor - 1.0) * 100.0;
        if self.oversize_factor > 1.1 {
            Some(format!(
                "Site air density is {:.0}% of standard: oversize standard-rated blowers by {:.0}%",
                self.density_ratio * 100.0,
                percent
            ))
        } else if self.oversize_factor > 1.05 {
            Some(format!("Consider oversizing standard-rated blowers by {:.0}%", percent))
        } else {
            None
        }
    }
}
