//! Settings loading: built-in defaults, then an optional settings file
//! (TOML, JSON or YAML by extension), then `BLOWER_*` environment variables.
//!
//! ```toml
//! airflow_model = "oxygen_demand"
//! blower_efficiency = 0.55
//! electricity_tariff_per_kwh = 2.85
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use blower_core::CalcSettings;
use config::{Config, Environment, File};

/// Prefix for environment overrides, e.g. `BLOWER_BLOWER_EFFICIENCY=0.6`
pub const ENV_PREFIX: &str = "BLOWER";

pub fn load(path: Option<&Path>) -> Result<CalcSettings> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }
    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

    let settings: CalcSettings = builder
        .build()
        .context("failed to read settings")?
        .try_deserialize()
        .context("invalid settings")?;
    settings.validate()?;

    tracing::debug!(?settings, "settings loaded");
    Ok(settings)
}
