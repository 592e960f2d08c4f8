//! # Quote Records
//!
//! A saved sizing run: the request, the settings it ran with and the full
//! report, stamped with an id and creation time so it can be attached to a
//! quotation and reopened later.
//!
//! Records are written atomically: serialize, write to `<path>.tmp`, fsync,
//! then rename over the target.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use blower_core::{CalcSettings, CalculationInputs, ComprehensiveReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current schema version for quote files
pub const SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub id: Uuid,
    pub schema_version: String,
    pub created: DateTime<Utc>,

    /// Customer or enquiry reference, if given
    pub customer_reference: Option<String>,

    pub inputs: CalculationInputs,
    pub settings: CalcSettings,
    pub report: ComprehensiveReport,
}

impl QuoteRecord {
    pub fn new(
        customer_reference: Option<String>,
        inputs: CalculationInputs,
        settings: CalcSettings,
        report: ComprehensiveReport,
    ) -> Self {
        QuoteRecord {
            id: Uuid::new_v4(),
            schema_version: SCHEMA_VERSION.to_string(),
            created: Utc::now(),
            customer_reference,
            inputs,
            settings,
            report,
        }
    }
}

/// Save a quote record with atomic write semantics.
pub fn save_quote(record: &QuoteRecord, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(record).context("failed to serialize quote")?;

    let tmp_path = path.with_extension("tmp");
    let mut tmp_file =
        File::create(&tmp_path).with_context(|| format!("failed to create {}", tmp_path.display()))?;
    tmp_file
        .write_all(json.as_bytes())
        .with_context(|| format!("failed to write {}", tmp_path.display()))?;
    tmp_file
        .sync_all()
        .with_context(|| format!("failed to sync {}", tmp_path.display()))?;
    drop(tmp_file);

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err).with_context(|| format!("failed to move quote into {}", path.display()));
    }

    tracing::info!(id = %record.id, path = %path.display(), "quote saved");
    Ok(())
}

/// Load a quote record, rejecting files from an incompatible schema.
pub fn load_quote(path: &Path) -> Result<QuoteRecord> {
    let contents = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let record: QuoteRecord =
        serde_json::from_str(&contents).with_context(|| format!("invalid quote JSON in {}", path.display()))?;
    validate_version(&record.schema_version)?;
    Ok(record)
}

/// Major versions must match.
fn validate_version(file_version: &str) -> Result<()> {
    let major = |v: &str| v.split('.').next().and_then(|p| p.parse::<u32>().ok());
    match (major(file_version), major(SCHEMA_VERSION)) {
        (Some(file), Some(current)) if file == current => Ok(()),
        _ => bail!(
            "quote schema version {} is not compatible with {}",
            file_version,
            SCHEMA_VERSION
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blower_core::comprehensive;

    fn sample_record() -> QuoteRecord {
        let inputs = CalculationInputs {
            tank_length_m: 6.0,
            tank_width_m: 3.0,
            tank_depth_m: 2.0,
            location_text: "Pretoria".to_string(),
            ..CalculationInputs::default()
        };
        let settings = CalcSettings::default();
        let report = comprehensive::run(&inputs, &settings).unwrap();
        QuoteRecord::new(Some("ENQ-0042".to_string()), inputs, settings, report)
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.json");
        let record = sample_record();

        save_quote(&record, &path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());

        let loaded = load_quote(&path).unwrap();
        assert_eq!(loaded, record);
        assert_eq!(loaded.customer_reference.as_deref(), Some("ENQ-0042"));
    }

    #[test]
    fn test_save_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.json");
        save_quote(&sample_record(), &path).unwrap();
        let second = sample_record();
        save_quote(&second, &path).unwrap();
        assert_eq!(load_quote(&path).unwrap().id, second.id);
    }

    #[test]
    fn test_incompatible_version_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.json");
        let mut record = sample_record();
        record.schema_version = "2.0.0".to_string();
        save_quote(&record, &path).unwrap();

        let err = load_quote(&path).unwrap_err();
        assert!(err.to_string().contains("not compatible"));
    }

    #[test]
    fn test_version_check() {
        assert!(validate_version("1.3.0").is_ok());
        assert!(validate_version("0.9.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_invalid_json_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_quote(&path).is_err());
    }
}
