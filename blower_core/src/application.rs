//! # Application and Equipment Tables
//!
//! Closed enumerations for everything the calculator branches on, each with
//! an explicit parameter table. There is no string-keyed fallthrough: an
//! unknown application or diffuser is rejected at parse time, and `Other` /
//! `Custom` have their own rows.
//!
//! ## Application Parameters
//!
//! | Application   | Airflow basis         | Safety | SG   | Diffuser | Redundancy |
//! |---------------|-----------------------|--------|------|----------|------------|
//! | Waste water   | 0.25 m³/min per m²    | 1.20   | 1.05 | Fine     | N+1        |
//! | Fish hatchery | 0.002 m³/min per m²   | 1.50   | 1.00 | Coarse   | N+2        |
//! | Industrial    | 2 air changes/hr      | 1.30   | 1.00 | Disc     | N+1        |
//! | Other         | 2 air changes/hr      | 1.30   | 1.00 | Disc     | N+1        |
//!
//! ## Diffuser Pressure Drops
//!
//! | Diffuser | Drop (mbar) |
//! |----------|-------------|
//! | Fine     | 250         |
//! | Disc     | 200         |
//! | Coarse   | 50          |
//! | Tube     | 80          |
//! | Jet      | 30          |
//! | Custom   | 100         |

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Operation and Tank Arrangement
// ============================================================================

/// Whether the blower pushes air into the tank or draws from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    /// Positive pressure (aeration, agitation)
    #[default]
    Compression,
    /// Suction, extraction, pneumatic conveying
    Vacuum,
}

impl OperationType {
    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match normalize(s).as_str() {
            "compression" | "pressure" | "1" => Ok(OperationType::Compression),
            "vacuum" | "suction" | "2" => Ok(OperationType::Vacuum),
            _ => Err(CalcError::invalid_input(
                "operation_type",
                s,
                "Expected 'compression' or 'vacuum'",
            )),
        }
    }

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            OperationType::Compression => "Compression",
            OperationType::Vacuum => "Vacuum/Suction",
        }
    }
}

/// How multiple tanks are plumbed relative to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TankArrangement {
    /// Identical tanks fed side by side: airflow sums, pressure unchanged
    #[default]
    Parallel,
    /// Air passes through each tank in turn: airflow unchanged, pressure stacks
    Series,
}

impl TankArrangement {
    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match normalize(s).as_str() {
            "parallel" => Ok(TankArrangement::Parallel),
            "series" => Ok(TankArrangement::Series),
            _ => Err(CalcError::invalid_input(
                "tank_arrangement",
                s,
                "Expected 'parallel' or 'series'",
            )),
        }
    }
}

// ============================================================================
// Application
// ============================================================================

/// Application the blower serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Application {
    /// Activated sludge and other waste-water aeration
    #[default]
    WasteWater,
    /// Live-animal systems (trout farms, hatcheries, aquaculture)
    FishHatchery,
    /// Industrial process agitation/aeration
    Industrial,
    /// Anything else; sized like industrial
    Other,
}

/// How the empirical model derives base airflow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "basis", rename_all = "snake_case")]
pub enum AirflowBasis {
    /// m³/min of air per m² of tank floor
    Area { m3_min_per_m2: f64 },
    /// Tank volumes of air per hour
    Volume { air_changes_per_hour: f64 },
}

/// Oxygen-transfer parameters for the oxygen-demand airflow model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OxygenTransfer {
    /// Standard oxygen transfer efficiency (fraction)
    pub transfer_efficiency: f64,
    /// Process-water to clean-water transfer ratio
    pub alpha: f64,
}

/// Per-application parameter row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApplicationParams {
    pub airflow_basis: AirflowBasis,
    pub safety_factor: f64,
    pub specific_gravity: f64,
    pub default_diffuser: DiffuserType,
    pub oxygen_transfer: OxygenTransfer,
    /// Standby units required on top of duty units
    pub redundancy: u32,
}

impl Application {
    /// All application variants for UI selection
    pub const ALL: [Application; 4] = [
        Application::WasteWater,
        Application::FishHatchery,
        Application::Industrial,
        Application::Other,
    ];

    /// Parameter table row for this application
    pub fn params(&self) -> ApplicationParams {
        match self {
            Application::WasteWater => ApplicationParams {
                airflow_basis: AirflowBasis::Area { m3_min_per_m2: 0.25 },
                safety_factor: 1.2,
                specific_gravity: 1.05,
                default_diffuser: DiffuserType::Fine,
                oxygen_transfer: OxygenTransfer {
                    transfer_efficiency: 0.20,
                    alpha: 0.65,
                },
                redundancy: 1,
            },
            Application::FishHatchery => ApplicationParams {
                airflow_basis: AirflowBasis::Area { m3_min_per_m2: 0.002 },
                safety_factor: 1.5,
                specific_gravity: 1.0,
                default_diffuser: DiffuserType::Coarse,
                oxygen_transfer: OxygenTransfer {
                    transfer_efficiency: 0.10,
                    alpha: 0.90,
                },
                redundancy: 2,
            },
            Application::Industrial | Application::Other => ApplicationParams {
                airflow_basis: AirflowBasis::Volume {
                    air_changes_per_hour: 2.0,
                },
                safety_factor: 1.3,
                specific_gravity: 1.0,
                default_diffuser: DiffuserType::Disc,
                oxygen_transfer: OxygenTransfer {
                    transfer_efficiency: 0.15,
                    alpha: 0.75,
                },
                redundancy: 1,
            },
        }
    }

    /// Estimated oxygen demand (kg O₂/hr) for a given aerated volume.
    ///
    /// - Waste water: 150 mg/L BOD, 2 volume turnovers/hr, 2 kg O₂ per kg BOD
    /// - Fish hatchery: 30 kg/m³ stocking, 2 %/day feeding, 0.4 kg O₂ per kg feed
    /// - Industrial/other: 0.5 kg O₂/hr per m³
    pub fn estimated_oxygen_demand_kg_hr(&self, volume_m3: f64) -> f64 {
        match self {
            Application::WasteWater => {
                let bod_load_kg_hr = 0.150 * volume_m3 * 2.0;
                bod_load_kg_hr * 2.0
            }
            Application::FishHatchery => {
                let biomass_kg = volume_m3 * 30.0;
                let feed_kg_hr = biomass_kg * 0.02 / 24.0;
                feed_kg_hr * 0.4
            }
            Application::Industrial | Application::Other => volume_m3 * 0.5,
        }
    }

    /// Whether a blower outage endangers live stock
    pub fn is_life_critical(&self) -> bool {
        matches!(self, Application::FishHatchery)
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match normalize(s).as_str() {
            "waste_water" | "wastewater" | "sewage" | "activated_sludge" => Ok(Application::WasteWater),
            "fish_hatchery" | "hatchery" | "fish" | "aquaculture" | "fish_farm" => Ok(Application::FishHatchery),
            "industrial" | "industry" => Ok(Application::Industrial),
            "other" | "general" => Ok(Application::Other),
            _ => Err(CalcError::invalid_input(
                "application",
                s,
                "Expected one of: waste_water, fish_hatchery, industrial, other",
            )),
        }
    }

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Application::WasteWater => "Waste Water",
            Application::FishHatchery => "Fish Hatchery",
            Application::Industrial => "Industrial",
            Application::Other => "Other",
        }
    }
}

impl std::fmt::Display for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Diffusers
// ============================================================================

/// Diffuser type, determines the fixed pressure drop across the diffuser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffuserType {
    /// Fine bubble membrane
    Fine,
    /// Ceramic disc
    Disc,
    /// Coarse bubble / perforated pipe
    Coarse,
    /// Tube diffusers
    Tube,
    /// Jet aerators
    Jet,
    /// Custom or unknown system
    Custom,
}

impl DiffuserType {
    /// All diffuser variants for UI selection
    pub const ALL: [DiffuserType; 6] = [
        DiffuserType::Fine,
        DiffuserType::Disc,
        DiffuserType::Coarse,
        DiffuserType::Tube,
        DiffuserType::Jet,
        DiffuserType::Custom,
    ];

    /// Pressure drop across a clean diffuser (mbar)
    pub fn pressure_drop_mbar(&self) -> f64 {
        match self {
            DiffuserType::Fine => 250.0,
            DiffuserType::Disc => 200.0,
            DiffuserType::Coarse => 50.0,
            DiffuserType::Tube => 80.0,
            DiffuserType::Jet => 30.0,
            DiffuserType::Custom => 100.0,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match normalize(s).as_str() {
            "fine" | "fine_bubble" | "membrane" => Ok(DiffuserType::Fine),
            "disc" | "disk" | "ceramic" => Ok(DiffuserType::Disc),
            "coarse" | "coarse_bubble" | "perforated" => Ok(DiffuserType::Coarse),
            "tube" | "tubular" => Ok(DiffuserType::Tube),
            "jet" | "jet_aerator" => Ok(DiffuserType::Jet),
            "custom" => Ok(DiffuserType::Custom),
            _ => Err(CalcError::invalid_input(
                "diffuser_type",
                s,
                "Expected one of: fine, disc, coarse, tube, jet, custom",
            )),
        }
    }

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            DiffuserType::Fine => "Fine bubble",
            DiffuserType::Disc => "Ceramic disc",
            DiffuserType::Coarse => "Coarse bubble",
            DiffuserType::Tube => "Tube",
            DiffuserType::Jet => "Jet aerator",
            DiffuserType::Custom => "Custom",
        }
    }
}

impl std::fmt::Display for DiffuserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Pipe Material and Fittings
// ============================================================================

/// Pipe wall condition, selects the Darcy friction factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PipeMaterial {
    #[default]
    Smooth,
    Galvanized,
    Rough,
    VeryRough,
}

impl PipeMaterial {
    /// Darcy friction factor f
    pub fn friction_factor(&self) -> f64 {
        match self {
            PipeMaterial::Smooth => 0.025,
            PipeMaterial::Galvanized => 0.030,
            PipeMaterial::Rough => 0.035,
            PipeMaterial::VeryRough => 0.040,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match normalize(s).as_str() {
            "smooth" | "pvc" | "hdpe" => Ok(PipeMaterial::Smooth),
            "galvanized" | "galvanised" | "steel" => Ok(PipeMaterial::Galvanized),
            "rough" => Ok(PipeMaterial::Rough),
            "very_rough" => Ok(PipeMaterial::VeryRough),
            _ => Err(CalcError::invalid_input(
                "pipe_material",
                s,
                "Expected one of: smooth, galvanized, rough, very_rough",
            )),
        }
    }
}

/// Fitting loss coefficients (K-factors)
pub mod k_factor {
    /// 90° bend
    pub const BEND_90: f64 = 0.9;
    /// Pipe entrance
    pub const ENTRANCE: f64 = 0.5;
    /// Pipe exit
    pub const EXIT: f64 = 1.0;
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace([' ', '-'], "_")
}
