//! # Comprehensive Sizing Report
//!
//! One call from raw request to quote-ready report: resolves the site,
//! sizes the blower, ranks multi-blower configurations against a daily load
//! profile and works out what the recommended arrangement saves in energy
//! and money.
//!
//! ## Example
//!
//! ```rust
//! use blower_core::calculations::blower::{CalculationInputs, PipeSystem};
//! use blower_core::calculations::comprehensive::{format_comparison_table, run};
//! use blower_core::settings::CalcSettings;
//!
//! let inputs = CalculationInputs {
//!     tank_length_m: 6.0,
//!     tank_width_m: 3.0,
//!     tank_depth_m: 2.0,
//!     location_text: "Pretoria".to_string(),
//!     pipe: Some(PipeSystem::new(100.0, 50.0, Some(4))),
//!     ..CalculationInputs::default()
//! };
//!
//! let report = run(&inputs, &CalcSettings::default()).unwrap();
//! assert_eq!(report.location.city.as_deref(), Some("Pretoria"));
//! assert_eq!(report.recommended, report.configurations[0]);
//! println!("{}", format_comparison_table(&report.comparison_table));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::blower::{self, CalculationInputs, CalculationResults};
use super::configuration::{self, BlowerConfiguration, ConfigType, LoadProfile};
use crate::equations::pneumatic::shaft_power_kw;
use crate::errors::{CalcError, CalcResult};
use crate::location::{self, AmbientConditions, Confidence, LocationData};
use crate::settings::CalcSettings;

/// One line of the configuration comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub label: String,

    /// `None` for the baseline row taken straight from the sizing result
    pub config_type: Option<ConfigType>,

    pub blower_count: u32,
    pub operating_count: u32,
    pub standby_count: u32,
    pub unit_capacity_m3_hr: f64,
    pub unit_pressure_mbar: f64,

    /// Shaft power of one unit at its rating (kW)
    pub unit_power_kw: f64,

    /// Installed duty power: operating units at rating (kW)
    pub duty_power_kw: f64,

    pub turndown_min_pct: f64,
    pub energy_savings_pct: f64,
    pub capital_cost_factor: f64,
    pub score: Option<f64>,
}

/// Annual energy and cost of the recommended configuration against a
/// single throttled blower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyAnalysis {
    pub config_type: ConfigType,
    pub blower_count: u32,

    /// Efficiency used for every power figure
    pub efficiency: f64,

    /// Design-point power of a single blower (kW)
    pub baseline_power_kw: f64,

    pub annual_hours: f64,
    pub baseline_annual_kwh: f64,
    pub optimized_annual_kwh: f64,
    pub annual_kwh_savings: f64,
    pub energy_savings_pct: f64,

    pub currency: String,
    pub tariff_per_kwh: f64,
    pub annual_cost_savings: f64,

    /// Capital cost above a single blower
    pub extra_capital_cost: f64,

    /// Months for savings to repay the extra capital. `None` if it never
    /// pays back.
    pub payback_months: Option<f64>,
}

/// Everything a quote needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveReport {
    pub location: LocationData,
    pub ambient: AmbientConditions,
    pub requirements: CalculationResults,

    /// Candidates, best first
    pub configurations: Vec<BlowerConfiguration>,
    pub recommended: BlowerConfiguration,
    pub recommendation_report: String,

    pub comparison_table: Vec<ComparisonRow>,
    pub energy_analysis: EnergyAnalysis,

    pub load_profile: LoadProfile,
    /// Whether `load_profile` is the application default
    pub load_profile_is_default: bool,

    pub messages: Vec<String>,
    pub warnings: Vec<String>,
}

/// Run the whole pipeline for one request.
#[instrument(skip_all, fields(application = %inputs.application))]
pub fn run(inputs: &CalculationInputs, settings: &CalcSettings) -> CalcResult<ComprehensiveReport> {
    let location = location::resolve(&inputs.location_text, inputs.altitude_m, inputs.temperature_c);
    let ambient = location.ambient();
    let requirements = blower::calculate(inputs, &location, settings)?;

    let (load_profile, load_profile_is_default) = match &inputs.load_profile {
        Some(profile) => (profile.clone(), false),
        None => (LoadProfile::default_for(inputs.application), true),
    };

    let configurations = configuration::optimize(
        requirements.airflow_m3_hr,
        requirements.pressure_mbar,
        inputs.application,
        Some(&load_profile),
    );
    let recommended = configurations
        .first()
        .cloned()
        .ok_or_else(|| CalcError::missing_field("configurations"))?;

    let comparison_table = comparison_rows(&requirements, &configurations, settings.blower_efficiency);
    let energy_analysis = energy_analysis(&requirements, &recommended, &load_profile, settings);
    let recommendation_report = configuration::recommendation_report(&configurations);

    let mut messages: Vec<String> = location.explanation.lines().map(str::to_string).collect();
    messages.extend(requirements.messages.iter().cloned());
    let mut warnings = requirements.warnings.clone();

    if location.confidence == Confidence::Low {
        warnings.push("Site conditions partly assumed: confirm altitude and temperature before ordering".to_string());
    }
    if let Some(advisory) = ambient.advisory() {
        warnings.push(advisory);
    }
    if load_profile.periods.is_empty() {
        messages.push("Load profile has no periods: energy savings not evaluated".to_string());
    }
    if load_profile_is_default {
        messages.push(format!(
            "No load profile given: using typical {} profile, savings are indicative",
            inputs.application
        ));
    }
    if inputs.application.is_life_critical() && recommended.standby_count < 2 {
        warnings.push(format!(
            "{} is life-critical: N+2 standby is recommended",
            inputs.application
        ));
    }
    for warning in &warnings {
        warn!(%warning, "sizing warning");
    }

    info!(
        recommended = %recommended.config_type,
        blowers = recommended.blower_count,
        savings_pct = energy_analysis.energy_savings_pct,
        "comprehensive report ready"
    );

    Ok(ComprehensiveReport {
        location,
        ambient,
        requirements,
        configurations,
        recommended,
        recommendation_report,
        comparison_table,
        energy_analysis,
        load_profile,
        load_profile_is_default,
        messages,
        warnings,
    })
}

fn comparison_rows(
    requirements: &CalculationResults,
    configurations: &[BlowerConfiguration],
    efficiency: f64,
) -> Vec<ComparisonRow> {
    let baseline = ComparisonRow {
        label: "Required duty".to_string(),
        config_type: None,
        blower_count: 1,
        operating_count: 1,
        standby_count: 0,
        unit_capacity_m3_hr: requirements.airflow_m3_hr,
        unit_pressure_mbar: requirements.pressure_mbar,
        unit_power_kw: requirements.power_kw,
        duty_power_kw: requirements.power_kw,
        turndown_min_pct: 50.0,
        energy_savings_pct: 0.0,
        capital_cost_factor: 1.0,
        score: None,
    };

    std::iter::once(baseline)
        .chain(configurations.iter().map(|c| {
            let unit_power_kw = shaft_power_kw(c.unit_capacity_m3_hr, c.unit_pressure_mbar, efficiency);
            ComparisonRow {
                label: format!("{} x{}", c.config_type, c.blower_count),
                config_type: Some(c.config_type),
                blower_count: c.blower_count,
                operating_count: c.operating_count,
                standby_count: c.standby_count,
                unit_capacity_m3_hr: c.unit_capacity_m3_hr,
                unit_pressure_mbar: c.unit_pressure_mbar,
                unit_power_kw,
                duty_power_kw: unit_power_kw * c.operating_count as f64,
                turndown_min_pct: c.turndown_min_pct,
                energy_savings_pct: c.energy_savings_pct,
                capital_cost_factor: c.capital_cost_factor,
                score: Some(c.score),
            }
        }))
        .collect()
}

fn energy_analysis(
    requirements: &CalculationResults,
    recommended: &BlowerConfiguration,
    profile: &LoadProfile,
    settings: &CalcSettings,
) -> EnergyAnalysis {
    let efficiency = settings.blower_efficiency;
    let baseline_power_kw = shaft_power_kw(requirements.airflow_m3_hr, requirements.pressure_mbar, efficiency);
    let baseline_annual_kwh = baseline_power_kw * settings.annual_operating_hours * profile.mean_power_fraction();
    let optimized_annual_kwh = baseline_annual_kwh * (1.0 - recommended.energy_savings_pct / 100.0);
    let annual_kwh_savings = baseline_annual_kwh - optimized_annual_kwh;
    let annual_cost_savings = annual_kwh_savings * settings.electricity_tariff_per_kwh;
    let extra_capital_cost = (recommended.capital_cost_factor - 1.0) * settings.base_capital_cost;

    let payback_months = if extra_capital_cost <= 0.0 {
        Some(0.0)
    } else if annual_cost_savings > 0.0 {
        Some(extra_capital_cost / annual_cost_savings * 12.0)
    } else {
        None
    };

    EnergyAnalysis {
        config_type: recommended.config_type,
        blower_count: recommended.blower_count,
        efficiency,
        baseline_power_kw,
        annual_hours: settings.annual_operating_hours,
        baseline_annual_kwh,
        optimized_annual_kwh,
        annual_kwh_savings,
        energy_savings_pct: recommended.energy_savings_pct,
        currency: settings.currency.clone(),
        tariff_per_kwh: settings.electricity_tariff_per_kwh,
        annual_cost_savings,
        extra_capital_cost,
        payback_months,
    }
}

/// Render comparison rows as a fixed-width text table.
pub fn format_comparison_table(rows: &[ComparisonRow]) -> String {
    let mut lines = vec![
        format!(
            "{:<16} {:>7} {:>10} {:>10} {:>9} {:>9} {:>9} {:>8} {:>8} {:>6}",
            "Configuration", "Units", "m³/hr/unit", "mbar", "kW/unit", "Duty kW", "Turndown", "Savings", "Capital", "Score"
        ),
        "-".repeat(102),
    ];
    for row in rows {
        let score = row.score.map_or_else(|| "-".to_string(), |s| format!("{:.2}", s));
        lines.push(format!(
            "{:<16} {:>7} {:>10.0} {:>10.0} {:>9.2} {:>9.2} {:>8.0}% {:>7.1}% {:>7.2}x {:>6}",
            row.label,
            format!("{}+{}", row.operating_count, row.standby_count),
            row.unit_capacity_m3_hr,
            row.unit_pressure_mbar,
            row.unit_power_kw,
            row.duty_power_kw,
            row.turndown_min_pct,
            row.energy_savings_pct,
            row.capital_cost_factor,
            score
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Application;
    use crate::calculations::blower::PipeSystem;

    fn example_inputs() -> CalculationInputs {
        CalculationInputs {
            tank_length_m: 6.0,
            tank_width_m: 3.0,
            tank_depth_m: 2.0,
            altitude_m: Some(1420.0),
            temperature_c: Some(22.0),
            application: Application::WasteWater,
            pipe: Some(PipeSystem::new(100.0, 50.0, Some(4))),
            ..CalculationInputs::default()
        }
    }

    #[test]
    fn test_example_report() {
        let report = run(&example_inputs(), &CalcSettings::default()).unwrap();

        assert!((report.requirements.pressure_mbar - 638.1).abs() < 0.1);
        assert_eq!(report.configurations.len(), 5);
        assert_eq!(report.recommended, report.configurations[0]);
        assert!(report.load_profile_is_default);
        assert_eq!(report.load_profile, LoadProfile::default_for(Application::WasteWater));
        assert!(report.messages.iter().any(|m| m.contains("No load profile given")));
        assert!(report.messages.iter().any(|m| m.contains("Using altitude: 1420 m")));
        assert!(report.recommendation_report.contains("RECOMMENDED CONFIGURATION"));
    }

    #[test]
    fn test_comparison_table_has_baseline_and_candidates() {
        let report = run(&example_inputs(), &CalcSettings::default()).unwrap();
        let rows = &report.comparison_table;
        assert_eq!(rows.len(), 6);
        assert!(rows[0].config_type.is_none());
        assert_eq!(rows[0].unit_power_kw, report.requirements.power_kw);
        for row in &rows[1..] {
            assert!(row.config_type.is_some());
            assert!(row.score.is_some());
            assert!(row.duty_power_kw > 0.0);
        }

        let text = format_comparison_table(rows);
        assert_eq!(text.lines().count(), 8);
        assert!(text.contains("Required duty"));
    }

    #[test]
    fn test_energy_analysis() {
        let settings = CalcSettings::default();
        let report = run(&example_inputs(), &settings).unwrap();
        let energy = &report.energy_analysis;

        assert!((energy.baseline_power_kw - report.requirements.power_kw).abs() < 1e-9);
        let expected_baseline =
            energy.baseline_power_kw * settings.annual_operating_hours * report.load_profile.mean_power_fraction();
        assert!((energy.baseline_annual_kwh - expected_baseline).abs() < 1e-6);
        assert!(energy.optimized_annual_kwh <= energy.baseline_annual_kwh);
        assert!(
            (energy.annual_cost_savings - energy.annual_kwh_savings * settings.electricity_tariff_per_kwh).abs()
                < 1e-6
        );
        assert_eq!(energy.config_type, report.recommended.config_type);
        assert_eq!(energy.currency, "ZAR");

        // Parallel x2 costs 0.5 × base extra and pays back within a year
        let months = energy.payback_months.unwrap();
        assert!(months > 0.0 && months < 12.0, "payback = {}", months);
    }

    #[test]
    fn test_payback_edge_cases() {
        let settings = CalcSettings::default();
        let report = run(&example_inputs(), &settings).unwrap();
        let requirements = &report.requirements;
        let profile = &report.load_profile;

        let single = report
            .configurations
            .iter()
            .find(|c| c.config_type == ConfigType::Single)
            .unwrap();
        assert_eq!(energy_analysis(requirements, single, profile, &settings).payback_months, Some(0.0));

        let duty_standby = report
            .configurations
            .iter()
            .find(|c| c.config_type == ConfigType::DutyStandby)
            .unwrap();
        assert_eq!(energy_analysis(requirements, duty_standby, profile, &settings).payback_months, None);
    }

    #[test]
    fn test_explicit_profile_is_used() {
        let profile = LoadProfile::from_pairs(&[("day", 1.0), ("night", 0.4)]);
        let inputs = CalculationInputs {
            load_profile: Some(profile.clone()),
            ..example_inputs()
        };
        let report = run(&inputs, &CalcSettings::default()).unwrap();
        assert_eq!(report.load_profile, profile);
        assert!(!report.load_profile_is_default);
        assert!(!report.messages.iter().any(|m| m.contains("No load profile given")));
    }

    #[test]
    fn test_site_warnings() {
        let inputs = CalculationInputs {
            altitude_m: None,
            temperature_c: None,
            location_text: "Johannesburg".to_string(),
            ..example_inputs()
        };
        let report = run(&inputs, &CalcSettings::default()).unwrap();
        assert!(report.warnings.iter().any(|w| w.contains("oversize")));

        let unknown = CalculationInputs {
            altitude_m: None,
            temperature_c: None,
            ..example_inputs()
        };
        let report = run(&unknown, &CalcSettings::default()).unwrap();
        assert_eq!(report.location.confidence, Confidence::Low);
        assert!(report.warnings.iter().any(|w| w.contains("partly assumed")));
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let inputs = CalculationInputs {
            load_profile: Some(LoadProfile::from_pairs(&[("night", -1.0)])),
            ..example_inputs()
        };
        let err = run(&inputs, &CalcSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_empty_load_profile_still_ranks() {
        let inputs = CalculationInputs {
            load_profile: Some(LoadProfile { periods: vec![] }),
            ..example_inputs()
        };
        let report = run(&inputs, &CalcSettings::default()).unwrap();

        assert_eq!(report.configurations.len(), 5);
        assert!(report.configurations.iter().all(|c| c.energy_savings_pct == 0.0));
        assert!(!report.load_profile_is_default);
        assert_eq!(report.energy_analysis.annual_kwh_savings, 0.0);
        assert!(report.messages.iter().any(|m| m.contains("no periods")));
    }

    #[test]
    fn test_implausible_site_values_warn_instead_of_failing() {
        let inputs = CalculationInputs {
            altitude_m: Some(-20.0),
            temperature_c: Some(52.0),
            ..example_inputs()
        };
        let report = run(&inputs, &CalcSettings::default()).unwrap();
        assert_eq!(report.requirements.breakdown.altitude_pressure_factor, 1.0);
        assert!(report.warnings.iter().any(|w| w.contains("altitude -20 m")));
        assert!(report.warnings.iter().any(|w| w.contains("temperature 52 °C")));
    }

    #[test]
    fn test_report_json_roundtrip() {
        let report = run(&example_inputs(), &CalcSettings::default()).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let roundtrip: ComprehensiveReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, roundtrip);
    }
}
