//! # Multi-Blower Configuration Optimizer
//!
//! Given the required airflow and pressure, compares five ways of meeting
//! the duty:
//!
//! - one large blower (the baseline)
//! - 2, 3 or 4 smaller blowers in parallel, with N+1 standby (N+2 for
//!   life-critical applications)
//! - duty/standby: two full-size blowers, one running
//!
//! and ranks them by a weighted score of energy savings, redundancy,
//! turndown and capital cost. The weights depend on the application.
//!
//! ## Staging Model
//!
//! Energy savings assume ideal staging: at each load the fewest units that
//! can carry it run, sharing the load equally, and power follows the
//! affinity law P ∝ N³. No efficiency curve and no minimum-speed limit are
//! applied, so the savings figures are an upper bound rather than a
//! guarantee.
//!
//! A period at exactly zero load still runs one staged unit at 50 % speed
//! (0.125 of unit power), while the single throttled blower is charged
//! nothing. Profiles with idle periods therefore show lower staging savings
//! than the same profile with those periods at a small non-zero load.
//!
//! ## Example
//!
//! ```rust
//! use blower_core::application::Application;
//! use blower_core::calculations::configuration::{optimize, ConfigType, LoadProfile};
//!
//! let profile = LoadProfile::default_for(Application::WasteWater);
//! let configs = optimize(1200.0, 400.0, Application::WasteWater, Some(&profile));
//!
//! assert_eq!(configs.len(), 5);
//! let best = &configs[0];
//! assert_eq!(best.config_type, ConfigType::Parallel);
//! println!("{} blowers of {:.0} m³/hr", best.blower_count, best.unit_capacity_m3_hr);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::Application;
use crate::equations::pneumatic::affinity_power_fraction;
use crate::errors::{CalcError, CalcResult};

/// Parallel unit counts evaluated
pub const PARALLEL_UNIT_COUNTS: [u32; 3] = [2, 3, 4];

/// Savings (%) that earn the full efficiency score
const FULL_SCORE_SAVINGS_PCT: f64 = 30.0;

/// Standby units that earn the full redundancy score
const FULL_SCORE_STANDBY: f64 = 2.0;

/// Speed of the single unit left running at zero load
const MIN_STAGED_SPEED: f64 = 0.5;

// ============================================================================
// Load Profile
// ============================================================================

/// One period of the daily duty cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadPeriod {
    /// Period label ("night", "morning_peak", ...)
    pub name: String,
    /// Demand as a fraction of design airflow (may exceed 1.0 at peaks)
    pub load: f64,
}

/// Daily duty cycle: equal-length periods in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadProfile {
    pub periods: Vec<LoadPeriod>,
}

impl LoadProfile {
    /// Build a profile from (name, load) pairs
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        LoadProfile {
            periods: pairs
                .iter()
                .map(|(name, load)| LoadPeriod {
                    name: name.to_string(),
                    load: *load,
                })
                .collect(),
        }
    }

    /// Typical diurnal profile for an application
    pub fn default_for(application: Application) -> Self {
        match application {
            Application::WasteWater => Self::from_pairs(&[
                ("night", 0.3),
                ("early_morning", 0.4),
                ("morning_peak", 1.2),
                ("midday", 0.8),
                ("afternoon", 0.9),
                ("evening_peak", 1.1),
                ("late_evening", 0.5),
            ]),
            Application::FishHatchery => Self::from_pairs(&[
                ("night", 0.7),
                ("morning", 0.9),
                ("feeding_time", 1.3),
                ("afternoon", 1.0),
                ("evening", 0.8),
            ]),
            Application::Industrial | Application::Other => Self::from_pairs(&[
                ("night", 0.1),
                ("shift1", 1.0),
                ("shift2", 1.0),
                ("shift3", 0.5),
            ]),
        }
    }

    /// Validate the profile. An empty profile is valid and yields no
    /// savings.
    pub fn validate(&self) -> CalcResult<()> {
        for period in &self.periods {
            if !period.load.is_finite() || period.load < 0.0 {
                return Err(CalcError::invalid_input(
                    format!("load_profile.{}", period.name),
                    period.load.to_string(),
                    "Load fraction must be a finite number >= 0",
                ));
            }
        }
        Ok(())
    }

    /// Mean of load³ over the periods: the fraction of design power a
    /// single throttled blower draws on average.
    pub fn mean_power_fraction(&self) -> f64 {
        if self.periods.is_empty() {
            return 0.0;
        }
        let total: f64 = self.periods.iter().map(|p| affinity_power_fraction(p.load)).sum();
        total / self.periods.len() as f64
    }
}

// ============================================================================
// Configurations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigType {
    Single,
    Parallel,
    DutyStandby,
}

impl ConfigType {
    pub fn display_name(&self) -> &'static str {
        match self {
            ConfigType::Single => "Single",
            ConfigType::Parallel => "Parallel",
            ConfigType::DutyStandby => "Duty/Standby",
        }
    }
}

impl std::fmt::Display for ConfigType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One candidate arrangement of blowers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlowerConfiguration {
    pub config_type: ConfigType,
    pub blower_count: u32,
    pub operating_count: u32,
    pub standby_count: u32,

    /// Rated airflow of each unit (m³/hr)
    pub unit_capacity_m3_hr: f64,
    /// Rated pressure of each unit, including manifold losses (mbar)
    pub unit_pressure_mbar: f64,
    pub total_capacity_m3_hr: f64,
    pub total_pressure_mbar: f64,

    /// Lowest deliverable airflow as % of design
    pub turndown_min_pct: f64,
    /// Highest deliverable airflow as % of design
    pub turndown_max_pct: f64,

    /// Weighted score in [0, 1]; higher is better
    pub score: f64,
    /// Energy saved against a single throttled blower (%)
    pub energy_savings_pct: f64,
    /// Capital cost relative to a single blower
    pub capital_cost_factor: f64,

    pub recommendation: String,
}

/// Relative importance of each criterion for an application
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub efficiency: f64,
    pub redundancy: f64,
    pub turndown: f64,
    pub capital: f64,
}

impl ScoreWeights {
    pub fn for_application(application: Application) -> Self {
        match application {
            Application::WasteWater => ScoreWeights {
                efficiency: 0.35,
                redundancy: 0.25,
                turndown: 0.20,
                capital: 0.20,
            },
            Application::FishHatchery => ScoreWeights {
                efficiency: 0.20,
                redundancy: 0.45,
                turndown: 0.15,
                capital: 0.20,
            },
            Application::Industrial | Application::Other => ScoreWeights {
                efficiency: 0.40,
                redundancy: 0.20,
                turndown: 0.25,
                capital: 0.15,
            },
        }
    }
}

fn single(flow: f64, pressure: f64) -> BlowerConfiguration {
    BlowerConfiguration {
        config_type: ConfigType::Single,
        blower_count: 1,
        operating_count: 1,
        standby_count: 0,
        unit_capacity_m3_hr: flow,
        unit_pressure_mbar: pressure,
        total_capacity_m3_hr: flow,
        total_pressure_mbar: pressure,
        turndown_min_pct: 50.0,
        turndown_max_pct: 100.0,
        score: 0.0,
        energy_savings_pct: 0.0,
        capital_cost_factor: 1.0,
        recommendation: "Simple installation, no redundancy".to_string(),
    }
}

fn parallel(flow: f64, pressure: f64, n: u32, application: Application) -> BlowerConfiguration {
    // At least one unit must run
    let standby = application.params().redundancy.min(n - 1);
    let operating = n - standby;

    // Manifold losses grow with the number of branches
    let pressure_factor = 1.05 + 0.01 * n as f64;

    let recommendation = match n {
        2 => format!("Good redundancy (N+{}), moderate efficiency improvement", standby),
        3 => "Excellent turndown range, optimal for variable loads, good redundancy".to_string(),
        _ => "Maximum flexibility, higher capital cost, complex controls".to_string(),
    };

    BlowerConfiguration {
        config_type: ConfigType::Parallel,
        blower_count: n,
        operating_count: operating,
        standby_count: standby,
        unit_capacity_m3_hr: flow / operating as f64,
        unit_pressure_mbar: pressure * pressure_factor,
        total_capacity_m3_hr: flow,
        total_pressure_mbar: pressure,
        turndown_min_pct: 50.0 / n as f64,
        turndown_max_pct: 100.0,
        score: 0.0,
        energy_savings_pct: 0.0,
        capital_cost_factor: 0.8 + 0.35 * n as f64,
        recommendation,
    }
}

fn duty_standby(flow: f64, pressure: f64) -> BlowerConfiguration {
    BlowerConfiguration {
        config_type: ConfigType::DutyStandby,
        blower_count: 2,
        operating_count: 1,
        standby_count: 1,
        unit_capacity_m3_hr: flow,
        unit_pressure_mbar: pressure,
        total_capacity_m3_hr: flow,
        total_pressure_mbar: pressure,
        turndown_min_pct: 50.0,
        turndown_max_pct: 100.0,
        score: 0.0,
        energy_savings_pct: 0.0,
        capital_cost_factor: 2.0,
        recommendation: "Full redundancy, no efficiency benefit, simple control".to_string(),
    }
}

/// Power (fraction of one design-size unit) of a staged parallel set at a
/// given load.
fn staged_power_fraction(load: f64, operating: u32, blowers: u32) -> f64 {
    let active = (load * operating as f64).ceil().min(blowers as f64);
    if active >= 1.0 {
        active * affinity_power_fraction(load / active)
    } else {
        affinity_power_fraction(MIN_STAGED_SPEED)
    }
}

/// Energy saved (%) by staging against a single throttled blower.
fn energy_savings_pct(config: &BlowerConfiguration, profile: &LoadProfile) -> f64 {
    if config.config_type != ConfigType::Parallel {
        return 0.0;
    }
    let single: f64 = profile.periods.iter().map(|p| affinity_power_fraction(p.load)).sum();
    let staged: f64 = profile
        .periods
        .iter()
        .map(|p| staged_power_fraction(p.load, config.operating_count, config.blower_count))
        .sum();
    if single <= 0.0 {
        return 0.0;
    }
    ((single - staged) / single * 100.0).max(0.0)
}

fn score(config: &BlowerConfiguration, weights: &ScoreWeights) -> f64 {
    let efficiency = (config.energy_savings_pct / FULL_SCORE_SAVINGS_PCT).min(1.0);
    let redundancy = config.standby_count as f64 / FULL_SCORE_STANDBY;
    let turndown = (100.0 - config.turndown_min_pct) / 100.0;
    let capital = 1.0 / config.capital_cost_factor;

    efficiency * weights.efficiency
        + redundancy * weights.redundancy
        + turndown * weights.turndown
        + capital * weights.capital
}

/// Generate and rank candidate configurations, best first.
///
/// Without a load profile every candidate has zero energy savings and the
/// ranking rests on redundancy, turndown and capital cost. The profile is
/// expected to be validated by the caller.
#[instrument(skip(load_profile), fields(has_profile = load_profile.is_some()))]
pub fn optimize(
    required_flow_m3_hr: f64,
    required_pressure_mbar: f64,
    application: Application,
    load_profile: Option<&LoadProfile>,
) -> Vec<BlowerConfiguration> {
    let mut configs = Vec::with_capacity(PARALLEL_UNIT_COUNTS.len() + 2);
    configs.push(single(required_flow_m3_hr, required_pressure_mbar));
    for n in PARALLEL_UNIT_COUNTS {
        configs.push(parallel(required_flow_m3_hr, required_pressure_mbar, n, application));
    }
    configs.push(duty_standby(required_flow_m3_hr, required_pressure_mbar));

    if let Some(profile) = load_profile {
        for config in &mut configs {
            config.energy_savings_pct = energy_savings_pct(config, profile);
        }
    }

    let weights = ScoreWeights::for_application(application);
    for config in &mut configs {
        config.score = score(config, &weights);
        debug!(
            config = %config.config_type,
            blowers = config.blower_count,
            savings = config.energy_savings_pct,
            score = config.score,
            "candidate scored"
        );
    }

    configs.sort_by(|a, b| b.score.total_cmp(&a.score));
    configs
}

/// Text report of the top three options and the recommended one.
pub fn recommendation_report(configs: &[BlowerConfiguration]) -> String {
    let rule = "=".repeat(60);
    let mut lines = vec![
        rule.clone(),
        "MULTIPLE BLOWER CONFIGURATION ANALYSIS".to_string(),
        rule.clone(),
    ];

    for (i, config) in configs.iter().take(3).enumerate() {
        lines.push(String::new());
        lines.push(format!("Option {}: {}", i + 1, config.config_type.display_name().to_uppercase()));
        lines.push("-".repeat(40));
        lines.push(format!(
            "Configuration: {} blowers ({} duty + {} standby)",
            config.blower_count, config.operating_count, config.standby_count
        ));
        lines.push(format!(
            "Individual Size: {:.0} m³/hr @ {:.0} mbar",
            config.unit_capacity_m3_hr, config.unit_pressure_mbar
        ));
        lines.push(format!(
            "Turndown Range: {:.0}% - {:.0}%",
            config.turndown_min_pct, config.turndown_max_pct
        ));
        lines.push(format!("Energy Savings: {:.1}%", config.energy_savings_pct));
        lines.push(format!("Capital Cost: {:.2}x baseline", config.capital_cost_factor));
        lines.push(format!("Overall Score: {:.2}/1.00", config.score));
        lines.push(format!("Recommendation: {}", config.recommendation));
    }

    lines.push(String::new());
    lines.push(rule.clone());
    lines.push("RECOMMENDED CONFIGURATION".to_string());
    lines.push(rule);
    match configs.first() {
        Some(best) => {
            lines.push(format!(
                "* {} with {} blowers",
                best.config_type.display_name().to_uppercase(),
                best.blower_count
            ));
            lines.push(format!("* Energy savings of {:.0}% expected", best.energy_savings_pct));
            lines.push(format!("* {}", best.recommendation));
        }
        None => lines.push("No configurations to compare".to_string()),
    }
    lines.join("\n")
}
