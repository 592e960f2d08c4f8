//! # Pressure and Airflow Calculation
//!
//! Sizes a blower for one or more aerated tanks: base airflow, the pressure
//! it must deliver at the diffusers and the shaft power that takes.
//!
//! ## Calculation Steps
//!
//! 1. Base airflow (empirical area/volume factors, or oxygen demand)
//! 2. Static pressure from diffuser submergence
//! 3. Pipe friction and fitting losses
//! 4. Diffuser pressure drop (× fouling factor)
//! 5. Subtotal, multiplied by tank count for series tanks
//! 6. Safety margin
//! 7. Altitude correction of pressure and airflow
//! 8. Shaft power
//!
//! Every intermediate value is kept in [`CalculationBreakdown`].
//!
//! ## Example
//!
//! ```rust
//! use blower_core::calculations::blower::{calculate, CalculationInputs, PipeSystem};
//! use blower_core::application::Application;
//! use blower_core::location;
//! use blower_core::settings::CalcSettings;
//!
//! let inputs = CalculationInputs {
//!     tank_length_m: 6.0,
//!     tank_width_m: 3.0,
//!     tank_depth_m: 2.0,
//!     altitude_m: Some(1420.0),
//!     application: Application::WasteWater,
//!     pipe: Some(PipeSystem::new(100.0, 50.0, Some(4))),
//!     ..CalculationInputs::default()
//! };
//! let site = location::resolve(&inputs.location_text, inputs.altitude_m, inputs.temperature_c);
//!
//! let result = calculate(&inputs, &site, &CalcSettings::default()).unwrap();
//! println!("Airflow: {:.0} m³/hr", result.airflow_m3_hr);
//! println!("Pressure: {:.0} mbar", result.pressure_mbar);
//! println!("Power: {:.1} kW", result.power_kw);
//! assert!(result.pressure_mbar > 600.0 && result.pressure_mbar < 750.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::configuration::LoadProfile;
use crate::application::{k_factor, AirflowBasis, Application, DiffuserType, OperationType, PipeMaterial, TankArrangement};
use crate::equations::{aeration, pneumatic};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::location::extract::{ALTITUDE_RANGE_M, TEMPERATURE_RANGE_C};
use crate::location::LocationData;
use crate::settings::{AirflowModel, CalcSettings};
use crate::units::{CubicMetersPerHour, CubicMetersPerMinute, CubicMetersPerSecond, Meters, Millibar, Millimeters};

/// Pipe velocity above which noise and losses become excessive (m/s)
pub const MAX_PIPE_VELOCITY_M_S: f64 = 30.0;

/// Pipe velocity below which the pipe is oversized (m/s)
pub const MIN_PIPE_VELOCITY_M_S: f64 = 5.0;

/// Default pipe friction when no pipe data is given (mbar)
pub const DEFAULT_PIPE_FRICTION_MBAR: f64 = 15.0;

/// Default fitting losses when no pipe data is given (mbar)
pub const DEFAULT_FITTING_LOSSES_MBAR: f64 = 10.0;

/// Above this a standard side channel blower cannot deliver (mbar)
pub const HIGH_PRESSURE_MBAR: f64 = 800.0;

/// Above this only positive displacement machines are practical (mbar)
pub const VERY_HIGH_PRESSURE_MBAR: f64 = 1000.0;

/// Fouling factor above which diffusers are due for cleaning
pub const HEAVY_FOULING_FACTOR: f64 = 1.3;

/// Air delivery pipework between blower and diffusers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeSystem {
    /// Inside diameter in mm
    pub diameter_mm: f64,

    /// Total run length in m
    pub length_m: f64,

    /// Number of 90° bends. `None` leaves fitting losses out.
    #[serde(default)]
    pub bends: Option<u32>,

    #[serde(default)]
    pub material: PipeMaterial,
}

impl PipeSystem {
    /// Smooth pipe with the given dimensions
    pub fn new(diameter_mm: f64, length_m: f64, bends: Option<u32>) -> Self {
        PipeSystem {
            diameter_mm,
            length_m,
            bends,
            material: PipeMaterial::Smooth,
        }
    }
}

/// Everything the calculator needs to know about one sizing request.
///
/// ## JSON Example
///
/// ```json
/// {
///   "tank_length_m": 6.0,
///   "tank_width_m": 3.0,
///   "tank_depth_m": 2.0,
///   "tank_count": 1,
///   "tank_arrangement": "parallel",
///   "location_text": "1420 m above sea level",
///   "application": "waste_water",
///   "pipe": { "diameter_mm": 100.0, "length_m": 50.0, "bends": 4 },
///   "diffuser_type": "fine"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInputs {
    #[serde(default)]
    pub operation: OperationType,

    /// Tank length (m)
    pub tank_length_m: f64,

    /// Tank width (m)
    pub tank_width_m: f64,

    /// Liquid depth (m)
    pub tank_depth_m: f64,

    /// Number of identical tanks
    #[serde(default = "default_tank_count")]
    pub tank_count: u32,

    #[serde(default)]
    pub tank_arrangement: TankArrangement,

    /// Free-text site description ("Pretoria", "1420 m above sea level")
    #[serde(default)]
    pub location_text: String,

    /// Site altitude (m), overrides anything in `location_text`
    #[serde(default)]
    pub altitude_m: Option<f64>,

    /// Ambient temperature (°C), overrides anything in `location_text`
    #[serde(default)]
    pub temperature_c: Option<f64>,

    #[serde(default)]
    pub application: Application,

    #[serde(default)]
    pub pipe: Option<PipeSystem>,

    /// Defaults to the application's usual diffuser
    #[serde(default)]
    pub diffuser_type: Option<DiffuserType>,

    /// Diffuser submergence (m), defaults to the tank depth
    #[serde(default)]
    pub diffuser_depth_m: Option<f64>,

    /// Overrides the application safety factor
    #[serde(default)]
    pub safety_factor: Option<f64>,

    /// Multiplier on the clean diffuser pressure drop (1.0 = new)
    #[serde(default)]
    pub fouling_factor: Option<f64>,

    /// Oxygen demand (kg O₂/hr) for the oxygen-demand airflow model
    #[serde(default)]
    pub oxygen_demand_kg_hr: Option<f64>,

    /// Replaces the application's default daily load profile
    #[serde(default)]
    pub load_profile: Option<LoadProfile>,
}

fn default_tank_count() -> u32 {
    1
}

impl Default for CalculationInputs {
    fn default() -> Self {
        CalculationInputs {
            operation: OperationType::Compression,
            tank_length_m: 1.0,
            tank_width_m: 1.0,
            tank_depth_m: 1.0,
            tank_count: 1,
            tank_arrangement: TankArrangement::Parallel,
            location_text: String::new(),
            altitude_m: None,
            temperature_c: None,
            application: Application::WasteWater,
            pipe: None,
            diffuser_type: None,
            diffuser_depth_m: None,
            safety_factor: None,
            fouling_factor: None,
            oxygen_demand_kg_hr: None,
            load_profile: None,
        }
    }
}

impl CalculationInputs {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("tank_length_m", self.tank_length_m)?;
        require_positive("tank_width_m", self.tank_width_m)?;
        require_positive("tank_depth_m", self.tank_depth_m)?;

        if self.tank_count == 0 {
            return Err(CalcError::invalid_input(
                "tank_count",
                "0",
                "At least one tank is required",
            ));
        }

        if let Some(pipe) = &self.pipe {
            require_positive("pipe.diameter_mm", pipe.diameter_mm)?;
            require_positive("pipe.length_m", pipe.length_m)?;
        }
        if let Some(depth) = self.diffuser_depth_m {
            require_positive("diffuser_depth_m", depth)?;
        }

        for (field, factor) in [("safety_factor", self.safety_factor), ("fouling_factor", self.fouling_factor)] {
            if let Some(value) = factor {
                if !value.is_finite() || value < 1.0 {
                    return Err(CalcError::invalid_input(
                        field,
                        value.to_string(),
                        "Factor must be a finite number >= 1.0",
                    ));
                }
            }
        }

        if let Some(demand) = self.oxygen_demand_kg_hr {
            require_positive("oxygen_demand_kg_hr", demand)?;
        }

        let total_volume = self.tank_volume_m3() * self.tank_count as f64;
        if !total_volume.is_finite() {
            return Err(CalcError::invalid_input(
                "tank_volume_m3",
                total_volume.to_string(),
                "Tank dimensions are too large to size",
            ));
        }

        if let Some(profile) = &self.load_profile {
            profile.validate()?;
        }
        Ok(())
    }

    /// Floor area of one tank (m²)
    pub fn tank_area_m2(&self) -> f64 {
        self.tank_length_m * self.tank_width_m
    }

    /// Liquid volume of one tank (m³)
    pub fn tank_volume_m3(&self) -> f64 {
        self.tank_area_m2() * self.tank_depth_m
    }

    /// Volume the air actually passes through: all tanks in parallel, one
    /// tank's worth in series.
    pub fn effective_volume_m3(&self) -> f64 {
        match self.tank_arrangement {
            TankArrangement::Parallel => self.tank_volume_m3() * self.tank_count as f64,
            TankArrangement::Series => self.tank_volume_m3(),
        }
    }

    fn is_series(&self) -> bool {
        self.tank_count > 1 && self.tank_arrangement == TankArrangement::Series
    }
}

fn outside(value: f64, (min, max): (f64, f64)) -> bool {
    value < min || value > max
}

/// Tank geometry echoed back with the result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankSummary {
    pub area_m2: f64,
    pub volume_m3: f64,
    pub depth_m: f64,
    pub count: u32,
    pub arrangement: TankArrangement,
}

/// Every intermediate quantity of the calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationBreakdown {
    pub base_airflow_m3_min: f64,
    pub base_airflow_m3_hr: f64,

    /// Oxygen demand used, when the oxygen-demand model ran (kg O₂/hr)
    pub oxygen_demand_kg_hr: Option<f64>,

    pub static_pressure_mbar: f64,
    pub pipe_friction_mbar: f64,
    pub fitting_losses_mbar: f64,
    pub diffuser_loss_mbar: f64,
    pub subtotal_pressure_mbar: f64,
    pub safety_margin_mbar: f64,
    pub total_pressure_mbar: f64,
    pub altitude_corrected_pressure_mbar: f64,
    pub corrected_airflow_m3_hr: f64,

    pub altitude_pressure_factor: f64,
    pub altitude_flow_factor: f64,
    pub safety_factor: f64,
    pub specific_gravity: f64,
    pub fouling_factor: f64,
    pub diffuser_type: DiffuserType,

    /// Mean velocity in the delivery pipe, when pipe data was given (m/s)
    pub pipe_velocity_m_s: Option<f64>,
}

/// Sizing result for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResults {
    pub operation: OperationType,
    pub application: Application,
    pub airflow_model: AirflowModel,

    /// Base airflow before altitude correction (m³/min)
    pub airflow_m3_min: f64,

    /// Required airflow, altitude corrected (m³/hr)
    pub airflow_m3_hr: f64,

    /// Required pressure, altitude corrected (mbar)
    pub pressure_mbar: f64,

    /// Shaft power at `efficiency` (kW)
    pub power_kw: f64,

    /// Blower efficiency used for `power_kw`
    pub efficiency: f64,

    pub tank: TankSummary,
    pub breakdown: CalculationBreakdown,

    /// Informational notes on assumptions made
    pub messages: Vec<String>,

    /// Conditions the buyer must act on
    pub warnings: Vec<String>,
}

impl CalculationResults {
    /// Whether any warnings were raised
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Size a blower for the given tanks and site.
///
/// `location` should come from [`crate::location::resolve`]. Its altitude
/// drives the correction; altitude and temperature outside the usual range
/// only raise a warning.
#[instrument(skip_all, fields(application = %inputs.application, tanks = inputs.tank_count))]
pub fn calculate(
    inputs: &CalculationInputs,
    location: &LocationData,
    settings: &CalcSettings,
) -> CalcResult<CalculationResults> {
    inputs.validate()?;
    settings.validate()?;

    let params = inputs.application.params();
    let mut messages = Vec::new();
    let mut warnings = Vec::new();

    let tank_area = inputs.tank_area_m2();
    let tank_volume = inputs.tank_volume_m3();
    let count = inputs.tank_count as f64;

    // 1. Base airflow
    let mut oxygen_demand_kg_hr = None;
    let base_airflow = match settings.airflow_model {
        AirflowModel::Empirical => match params.airflow_basis {
            AirflowBasis::Area { m3_min_per_m2 } => {
                let mut flow = tank_area * m3_min_per_m2;
                if inputs.tank_count > 1 {
                    match inputs.tank_arrangement {
                        TankArrangement::Parallel => {
                            flow *= count;
                            messages.push(format!(
                                "Parallel tanks: {} × {:.1} m² × {}",
                                inputs.tank_count, tank_area, m3_min_per_m2
                            ));
                        }
                        TankArrangement::Series => messages.push(format!(
                            "Series tanks: flow passes through {} tanks sequentially",
                            inputs.tank_count
                        )),
                    }
                }
                CubicMetersPerMinute(flow)
            }
            AirflowBasis::Volume { air_changes_per_hour } => {
                messages.push(format!(
                    "{}: {:.1} m³ × {} changes/hr",
                    inputs.application, tank_volume, air_changes_per_hour
                ));
                CubicMetersPerMinute(tank_volume * air_changes_per_hour * count / 60.0)
            }
        },
        AirflowModel::OxygenDemand => {
            let volume = inputs.effective_volume_m3();
            let demand = match inputs.oxygen_demand_kg_hr {
                Some(demand) => demand,
                None => {
                    let estimate = inputs.application.estimated_oxygen_demand_kg_hr(volume);
                    messages.push(format!(
                        "Estimated oxygen demand for {}: {:.2} kg O₂/hr over {:.1} m³",
                        inputs.application, estimate, volume
                    ));
                    estimate
                }
            };
            oxygen_demand_kg_hr = Some(demand);
            let transfer = params.oxygen_transfer;
            let flow = CubicMetersPerHour(aeration::air_for_oxygen_demand_m3_hr(
                demand,
                transfer.transfer_efficiency,
                transfer.alpha,
            ));
            messages.push(format!(
                "Oxygen demand {:.2} kg/hr at {:.0}% transfer efficiency, alpha {:.2}",
                demand,
                transfer.transfer_efficiency * 100.0,
                transfer.alpha
            ));
            CubicMetersPerMinute::from(flow)
        }
    };
    let base_airflow_hr = CubicMetersPerHour::from(base_airflow);
    debug!(m3_min = base_airflow.value(), m3_hr = base_airflow_hr.value(), "base airflow");

    // 2. Static pressure
    let diffuser_depth = inputs.diffuser_depth_m.unwrap_or(inputs.tank_depth_m);
    if diffuser_depth > inputs.tank_depth_m {
        warnings.push(format!(
            "Diffuser depth {:.2} m exceeds tank depth {:.2} m",
            diffuser_depth, inputs.tank_depth_m
        ));
    }
    let static_pressure = pneumatic::hydrostatic_pressure_mbar(diffuser_depth, params.specific_gravity);
    debug!(static_pressure, diffuser_depth, "static pressure");

    // 3. Pipe losses
    let mut pipe_velocity = None;
    let (pipe_friction, fitting_losses) = match &inputs.pipe {
        Some(pipe) => {
            let diameter = Meters::from(Millimeters(pipe.diameter_mm)).value();
            let velocity = pneumatic::pipe_velocity_m_s(CubicMetersPerSecond::from(base_airflow).value(), diameter);
            pipe_velocity = Some(velocity);

            if velocity > MAX_PIPE_VELOCITY_M_S {
                warnings.push(format!(
                    "High pipe velocity: {:.1} m/s (>{:.0} m/s), consider a larger pipe",
                    velocity, MAX_PIPE_VELOCITY_M_S
                ));
            } else if velocity < MIN_PIPE_VELOCITY_M_S {
                messages.push(format!("Low pipe velocity: {:.1} m/s", velocity));
            } else {
                messages.push(format!("Pipe velocity: {:.1} m/s (good)", velocity));
            }

            let friction = pneumatic::darcy_friction_loss_mbar(
                pipe.material.friction_factor(),
                pipe.length_m,
                diameter,
                velocity,
            );
            let fittings = match pipe.bends {
                Some(bends) => {
                    let k_total = bends as f64 * k_factor::BEND_90 + k_factor::ENTRANCE + k_factor::EXIT;
                    messages.push(format!("Fittings: {} × 90° bends + entrance/exit (K = {:.1})", bends, k_total));
                    pneumatic::fitting_loss_mbar(k_total, velocity)
                }
                None => {
                    messages.push("No bend count given: fitting losses not included".to_string());
                    0.0
                }
            };
            (friction, fittings)
        }
        None => {
            messages.push(format!(
                "Using default pipe losses ({:.0} mbar total)",
                DEFAULT_PIPE_FRICTION_MBAR + DEFAULT_FITTING_LOSSES_MBAR
            ));
            (DEFAULT_PIPE_FRICTION_MBAR, DEFAULT_FITTING_LOSSES_MBAR)
        }
    };
    debug!(pipe_friction, fitting_losses, ?pipe_velocity, "pipe losses");

    // 4. Diffuser
    let diffuser_type = match inputs.diffuser_type {
        Some(diffuser) => diffuser,
        None => {
            messages.push(format!(
                "Using default {} diffuser for {}",
                params.default_diffuser, inputs.application
            ));
            params.default_diffuser
        }
    };
    let fouling_factor = inputs.fouling_factor.unwrap_or(1.0);
    if fouling_factor > HEAVY_FOULING_FACTOR {
        warnings.push(format!(
            "Fouling factor {:.2} indicates heavily fouled diffusers: schedule cleaning or replacement",
            fouling_factor
        ));
    }
    let diffuser_loss = diffuser_type.pressure_drop_mbar() * fouling_factor;

    // 5. Subtotal
    let mut subtotal =
        Millibar(static_pressure) + Millibar(pipe_friction) + Millibar(fitting_losses) + Millibar(diffuser_loss);
    if inputs.is_series() {
        subtotal = subtotal * count;
        messages.push(format!("Series tanks: pressure × {}", inputs.tank_count));
    }

    // 6. Safety margin
    let safety_factor = inputs.safety_factor.unwrap_or(params.safety_factor);
    let total_pressure = subtotal * safety_factor;
    let safety_margin = total_pressure - subtotal;
    debug!(
        subtotal = subtotal.value(),
        safety_margin = safety_margin.value(),
        total_pressure = total_pressure.value(),
        "pressure build-up"
    );

    // 7. Altitude
    let altitude = location.altitude_m;
    if outside(altitude, ALTITUDE_RANGE_M) {
        warnings.push(format!(
            "Unusual site altitude {:.0} m (expected {:.0} to {:.0} m): confirm before ordering",
            altitude, ALTITUDE_RANGE_M.0, ALTITUDE_RANGE_M.1
        ));
    }
    if outside(location.temperature_c, TEMPERATURE_RANGE_C) {
        warnings.push(format!(
            "Unusual ambient temperature {:.0} °C (expected {:.0} to {:.0} °C): confirm before ordering",
            location.temperature_c, TEMPERATURE_RANGE_C.0, TEMPERATURE_RANGE_C.1
        ));
    }
    let pressure_factor = pneumatic::altitude_pressure_correction(altitude);
    let flow_factor = pneumatic::altitude_flow_correction(altitude);
    let corrected_pressure = (total_pressure * pressure_factor).value();
    let corrected_airflow = (base_airflow_hr * flow_factor).value();
    if altitude > 0.0 {
        messages.push(format!(
            "Altitude correction at {:.0} m: pressure +{:.1}%, airflow +{:.1}%",
            altitude,
            (pressure_factor - 1.0) * 100.0,
            (flow_factor - 1.0) * 100.0
        ));
    }

    // 8. Power
    let efficiency = settings.blower_efficiency;
    let power_kw = pneumatic::shaft_power_kw(corrected_airflow, corrected_pressure, efficiency);
    if !(corrected_airflow.is_finite() && corrected_pressure.is_finite() && power_kw.is_finite()) {
        return Err(CalcError::invalid_input(
            "inputs",
            format!("{} m³/hr, {} mbar", corrected_airflow, corrected_pressure),
            "Tank or pipe dimensions produce a non-finite result",
        ));
    }

    if corrected_pressure > HIGH_PRESSURE_MBAR {
        warnings.push(format!(
            "High pressure (>{:.0} mbar): special blower or multistage required",
            HIGH_PRESSURE_MBAR
        ));
    }
    if corrected_pressure > VERY_HIGH_PRESSURE_MBAR {
        warnings.push(format!(
            "Very high pressure (>{:.0} mbar): consider a positive displacement blower",
            VERY_HIGH_PRESSURE_MBAR
        ));
    }
    if inputs.operation == OperationType::Vacuum {
        messages.push("Vacuum duty: pressure is the suction required below ambient".to_string());
    }

    info!(
        airflow_m3_hr = corrected_airflow,
        pressure_mbar = corrected_pressure,
        power_kw,
        warnings = warnings.len(),
        "blower sized"
    );

    Ok(CalculationResults {
        operation: inputs.operation,
        application: inputs.application,
        airflow_model: settings.airflow_model,
        airflow_m3_min: base_airflow.value(),
        airflow_m3_hr: corrected_airflow,
        pressure_mbar: corrected_pressure,
        power_kw,
        efficiency,
        tank: TankSummary {
            area_m2: tank_area,
            volume_m3: tank_volume,
            depth_m: inputs.tank_depth_m,
            count: inputs.tank_count,
            arrangement: inputs.tank_arrangement,
        },
        breakdown: CalculationBreakdown {
            base_airflow_m3_min: base_airflow.value(),
            base_airflow_m3_hr: base_airflow_hr.value(),
            oxygen_demand_kg_hr,
            static_pressure_mbar: static_pressure,
            pipe_friction_mbar: pipe_friction,
            fitting_losses_mbar: fitting_losses,
            diffuser_loss_mbar: diffuser_loss,
            subtotal_pressure_mbar: subtotal.value(),
            safety_margin_mbar: safety_margin.value(),
            total_pressure_mbar: total_pressure.value(),
            altitude_corrected_pressure_mbar: corrected_pressure,
            corrected_airflow_m3_hr: corrected_airflow,
            altitude_pressure_factor: pressure_factor,
            altitude_flow_factor: flow_factor,
            safety_factor,
            specific_gravity: params.specific_gravity,
            fouling_factor,
            diffuser_type,
            pipe_velocity_m_s: pipe_velocity,
        },
        messages,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::resolve;

    const EPSILON: f64 = 0.01;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn example_inputs() -> CalculationInputs {
        CalculationInputs {
            tank_length_m: 6.0,
            tank_width_m: 3.0,
            tank_depth_m: 2.0,
            altitude_m: Some(1420.0),
            application: Application::WasteWater,
            pipe: Some(PipeSystem::new(100.0, 50.0, Some(4))),
            ..CalculationInputs::default()
        }
    }

    fn run(inputs: &CalculationInputs) -> CalculationResults {
        let site = resolve(&inputs.location_text, inputs.altitude_m, inputs.temperature_c);
        calculate(inputs, &site, &CalcSettings::default()).unwrap()
    }

    #[test]
    fn test_waste_water_example() {
        let result = run(&example_inputs());
        let b = &result.breakdown;

        assert!(approx_eq(b.base_airflow_m3_min, 4.5));
        assert!(approx_eq(b.base_airflow_m3_hr, 270.0));
        assert!(approx_eq(b.static_pressure_mbar, 206.01));
        assert!(approx_eq(b.diffuser_loss_mbar, 250.0));
        assert_eq!(b.diffuser_type, DiffuserType::Fine);
        assert!((b.pipe_velocity_m_s.unwrap() - 9.549).abs() < 0.001);
        assert!((b.pipe_friction_mbar - 6.84).abs() < 0.01);
        assert!((b.fitting_losses_mbar - 2.79).abs() < 0.01);
        assert!((b.subtotal_pressure_mbar - 465.64).abs() < 0.05);
        assert!((b.altitude_pressure_factor - 1.142).abs() < 1e-12);

        assert!(result.pressure_mbar > 600.0 && result.pressure_mbar < 750.0);
        assert!((result.pressure_mbar - 638.1).abs() < 0.1);
        assert!((result.airflow_m3_hr - 301.95).abs() < 0.01);
        assert!((result.power_kw - 10.70).abs() < 0.05);
        assert_eq!(result.efficiency, 0.5);
        assert!(result.warnings.is_empty());
        assert!(result.messages.iter().any(|m| m.contains("Using default Fine bubble diffuser")));
    }

    #[test]
    fn test_zero_altitude_is_noop() {
        let inputs = CalculationInputs {
            altitude_m: Some(0.0),
            ..example_inputs()
        };
        let result = run(&inputs);
        let b = &result.breakdown;
        assert_eq!(b.altitude_pressure_factor, 1.0);
        assert_eq!(b.altitude_flow_factor, 1.0);
        assert_eq!(b.altitude_corrected_pressure_mbar, b.total_pressure_mbar);
        assert_eq!(b.corrected_airflow_m3_hr, b.base_airflow_m3_hr);
        assert!(!result.messages.iter().any(|m| m.contains("Altitude correction")));
    }

    #[test]
    fn test_altitude_raises_pressure_more_than_airflow() {
        let low = run(&CalculationInputs {
            altitude_m: Some(500.0),
            ..example_inputs()
        });
        let high = run(&CalculationInputs {
            altitude_m: Some(2000.0),
            ..example_inputs()
        });
        assert!(high.pressure_mbar > low.pressure_mbar);
        assert!(high.airflow_m3_hr > low.airflow_m3_hr);
        assert!(high.breakdown.altitude_pressure_factor > high.breakdown.altitude_flow_factor);
    }

    #[test]
    fn test_parallel_tanks_multiply_airflow_only() {
        let single = run(&example_inputs());
        let parallel = run(&CalculationInputs {
            tank_count: 3,
            tank_arrangement: TankArrangement::Parallel,
            pipe: None,
            ..example_inputs()
        });
        let single_no_pipe = run(&CalculationInputs {
            pipe: None,
            ..example_inputs()
        });
        assert!(approx_eq(parallel.breakdown.base_airflow_m3_min, 3.0 * single.breakdown.base_airflow_m3_min));
        assert!(approx_eq(parallel.pressure_mbar, single_no_pipe.pressure_mbar));
    }

    #[test]
    fn test_series_tanks_stack_pressure_only() {
        let single = run(&example_inputs());
        let series = run(&CalculationInputs {
            tank_count: 3,
            tank_arrangement: TankArrangement::Series,
            ..example_inputs()
        });
        assert!(approx_eq(series.breakdown.base_airflow_m3_min, single.breakdown.base_airflow_m3_min));
        assert!(approx_eq(
            series.breakdown.subtotal_pressure_mbar,
            3.0 * single.breakdown.subtotal_pressure_mbar
        ));
    }

    #[test]
    fn test_three_series_tanks_at_300_mbar() {
        // Custom diffuser 100 + default pipe 25 + static 175 = 300 mbar per tank
        let inputs = CalculationInputs {
            tank_count: 3,
            tank_arrangement: TankArrangement::Series,
            application: Application::Industrial,
            diffuser_type: Some(DiffuserType::Custom),
            diffuser_depth_m: Some(175.0 / 98.1),
            tank_depth_m: 2.0,
            safety_factor: Some(1.0),
            altitude_m: Some(0.0),
            pipe: None,
            ..example_inputs()
        };
        let result = run(&inputs);
        assert!(approx_eq(result.breakdown.subtotal_pressure_mbar, 900.0));
        assert!(approx_eq(result.pressure_mbar, 900.0));
        assert!(result.warnings.iter().any(|w| w.contains(">800 mbar")));
        assert!(!result.warnings.iter().any(|w| w.contains(">1000 mbar")));
    }

    #[test]
    fn test_four_series_tanks_need_positive_displacement() {
        // 4 × 300 mbar per tank
        let inputs = CalculationInputs {
            tank_count: 4,
            tank_arrangement: TankArrangement::Series,
            application: Application::Industrial,
            diffuser_type: Some(DiffuserType::Custom),
            diffuser_depth_m: Some(175.0 / 98.1),
            safety_factor: Some(1.0),
            altitude_m: Some(0.0),
            pipe: None,
            ..example_inputs()
        };
        let result = run(&inputs);
        assert!(approx_eq(result.pressure_mbar, 1200.0));
        assert!(result.warnings.iter().any(|w| w.contains(">800 mbar")));
        assert!(result.warnings.iter().any(|w| w.contains("positive displacement")));
    }

    #[test]
    fn test_site_values_outside_usual_range_only_warn() {
        let below_sea = run(&CalculationInputs {
            altitude_m: Some(-20.0),
            ..example_inputs()
        });
        assert_eq!(below_sea.breakdown.altitude_pressure_factor, 1.0);
        assert_eq!(below_sea.breakdown.altitude_flow_factor, 1.0);
        assert!(below_sea.warnings.iter().any(|w| w.contains("Unusual site altitude -20 m")));

        let hot = run(&CalculationInputs {
            temperature_c: Some(52.0),
            ..example_inputs()
        });
        assert!(hot.warnings.iter().any(|w| w.contains("Unusual ambient temperature 52 °C")));
        assert!((hot.pressure_mbar - 638.1).abs() < 0.1);

        let sky_high = run(&CalculationInputs {
            altitude_m: Some(9000.0),
            ..example_inputs()
        });
        assert!(sky_high.breakdown.altitude_pressure_factor > 1.5);
        assert!(sky_high.warnings.iter().any(|w| w.contains("Unusual site altitude 9000 m")));
    }

    #[test]
    fn test_industrial_volume_basis() {
        let inputs = CalculationInputs {
            application: Application::Industrial,
            tank_count: 2,
            ..example_inputs()
        };
        let result = run(&inputs);
        // 36 m³ × 2 ACH × 2 tanks / 60
        assert!(approx_eq(result.breakdown.base_airflow_m3_min, 2.4));
        assert_eq!(result.breakdown.diffuser_type, DiffuserType::Disc);
        assert_eq!(result.breakdown.safety_factor, 1.3);
    }

    #[test]
    fn test_missing_pipe_data_uses_defaults() {
        let result = run(&CalculationInputs {
            pipe: None,
            ..example_inputs()
        });
        assert_eq!(result.breakdown.pipe_friction_mbar, DEFAULT_PIPE_FRICTION_MBAR);
        assert_eq!(result.breakdown.fitting_losses_mbar, DEFAULT_FITTING_LOSSES_MBAR);
        assert!(result.breakdown.pipe_velocity_m_s.is_none());
        assert!(result.messages.iter().any(|m| m.contains("default pipe losses")));
    }

    #[test]
    fn test_zero_bends_still_counts_entrance_and_exit() {
        let result = run(&CalculationInputs {
            pipe: Some(PipeSystem::new(100.0, 50.0, Some(0))),
            ..example_inputs()
        });
        let v = result.breakdown.pipe_velocity_m_s.unwrap();
        let expected = pneumatic::fitting_loss_mbar(1.5, v);
        assert!((result.breakdown.fitting_losses_mbar - expected).abs() < 1e-9);

        let no_count = run(&CalculationInputs {
            pipe: Some(PipeSystem::new(100.0, 50.0, None)),
            ..example_inputs()
        });
        assert_eq!(no_count.breakdown.fitting_losses_mbar, 0.0);
    }

    #[test]
    fn test_rougher_pipe_increases_friction() {
        let smooth = run(&example_inputs());
        let rough = run(&CalculationInputs {
            pipe: Some(PipeSystem {
                material: PipeMaterial::VeryRough,
                ..PipeSystem::new(100.0, 50.0, Some(4))
            }),
            ..example_inputs()
        });
        assert!(rough.breakdown.pipe_friction_mbar > smooth.breakdown.pipe_friction_mbar);
    }

    #[test]
    fn test_high_velocity_warning() {
        let result = run(&CalculationInputs {
            pipe: Some(PipeSystem::new(25.0, 10.0, Some(2))),
            ..example_inputs()
        });
        assert!(result.breakdown.pipe_velocity_m_s.unwrap() > MAX_PIPE_VELOCITY_M_S);
        assert!(result.warnings.iter().any(|w| w.contains("High pipe velocity")));
    }

    #[test]
    fn test_oversized_pipe_low_velocity() {
        let result = run(&CalculationInputs {
            pipe: Some(PipeSystem::new(300.0, 50.0, Some(4))),
            ..example_inputs()
        });
        // 0.075 m³/s through a 300 mm bore
        let velocity = result.breakdown.pipe_velocity_m_s.unwrap();
        assert!((velocity - 1.061).abs() < 0.001);
        assert!(velocity < MIN_PIPE_VELOCITY_M_S);
        assert!(result.messages.iter().any(|m| m.contains("Low pipe velocity")));
        assert!(!result.warnings.iter().any(|w| w.contains("pipe velocity")));
    }

    #[test]
    fn test_fouling_scales_diffuser_loss() {
        let result = run(&CalculationInputs {
            fouling_factor: Some(1.5),
            ..example_inputs()
        });
        assert!(approx_eq(result.breakdown.diffuser_loss_mbar, 375.0));
        assert!(result.warnings.iter().any(|w| w.contains("Fouling factor")));
    }

    #[test]
    fn test_oxygen_demand_model() {
        let settings = CalcSettings {
            airflow_model: AirflowModel::OxygenDemand,
            ..CalcSettings::default()
        };
        let inputs = CalculationInputs {
            oxygen_demand_kg_hr: Some(21.6),
            ..example_inputs()
        };
        let site = resolve("", inputs.altitude_m, None);
        let result = calculate(&inputs, &site, &settings).unwrap();
        assert_eq!(result.airflow_model, AirflowModel::OxygenDemand);
        assert_eq!(result.breakdown.oxygen_demand_kg_hr, Some(21.6));
        // 21.6 / (0.28 × 0.20 × 0.65)
        assert!((result.breakdown.base_airflow_m3_hr - 593.41).abs() < 0.01);

        // Without an explicit demand the application estimate is used
        let estimated = calculate(&example_inputs(), &site, &settings).unwrap();
        // 36 m³ × 0.15 × 2 × 2
        assert!(approx_eq(estimated.breakdown.oxygen_demand_kg_hr.unwrap(), 21.6));
    }

    #[test]
    fn test_vacuum_is_noted() {
        let result = run(&CalculationInputs {
            operation: OperationType::Vacuum,
            ..example_inputs()
        });
        assert_eq!(result.operation, OperationType::Vacuum);
        assert!(result.messages.iter().any(|m| m.contains("Vacuum duty")));
    }

    #[test]
    fn test_validation_errors() {
        let site = resolve("", None, None);
        let settings = CalcSettings::default();

        let bad_depth = CalculationInputs {
            tank_depth_m: 0.0,
            ..example_inputs()
        };
        let err = calculate(&bad_depth, &site, &settings).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let nan_length = CalculationInputs {
            tank_length_m: f64::NAN,
            ..example_inputs()
        };
        assert!(calculate(&nan_length, &site, &settings).is_err());

        let no_tanks = CalculationInputs {
            tank_count: 0,
            ..example_inputs()
        };
        assert!(calculate(&no_tanks, &site, &settings).is_err());

        let low_safety = CalculationInputs {
            safety_factor: Some(0.9),
            ..example_inputs()
        };
        assert!(calculate(&low_safety, &site, &settings).is_err());

        let bad_pipe = CalculationInputs {
            pipe: Some(PipeSystem::new(-100.0, 50.0, None)),
            ..example_inputs()
        };
        assert!(calculate(&bad_pipe, &site, &settings).is_err());

        let huge = CalculationInputs {
            tank_length_m: 1e200,
            tank_width_m: 1e200,
            ..example_inputs()
        };
        let err = calculate(&huge, &site, &settings).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let needle_pipe = CalculationInputs {
            pipe: Some(PipeSystem::new(1e-200, 50.0, Some(4))),
            ..example_inputs()
        };
        assert!(calculate(&needle_pipe, &site, &settings).is_err());

        let bad_settings = CalcSettings {
            blower_efficiency: 0.0,
            ..CalcSettings::default()
        };
        let err = calculate(&example_inputs(), &site, &bad_settings).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SETTING");
    }

    #[test]
    fn test_result_json_roundtrip() {
        let result = run(&example_inputs());
        let json = serde_json::to_string(&result).unwrap();
        let roundtrip: CalculationResults = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }

    #[test]
    fn test_inputs_from_minimal_json() {
        let json = r#"{
            "tank_length_m": 6.0,
            "tank_width_m": 3.0,
            "tank_depth_m": 2.0,
            "application": "fish_hatchery",
            "pipe": { "diameter_mm": 80.0, "length_m": 20.0 }
        }"#;
        let inputs: CalculationInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.tank_count, 1);
        assert_eq!(inputs.application, Application::FishHatchery);
        assert_eq!(inputs.pipe.as_ref().unwrap().material, PipeMaterial::Smooth);
        assert!(inputs.validate().is_ok());
    }
}
