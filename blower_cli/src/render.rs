//! Plain-text rendering of reports for the terminal.

use std::fmt::Write as _;

use blower_core::comprehensive::format_comparison_table;
use blower_core::location::FieldSource;
use blower_core::{ComprehensiveReport, LocationData};

const BANNER: &str = "═══════════════════════════════════════";

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", BANNER);
    let _ = writeln!(out, "  {}", title);
    let _ = writeln!(out, "{}", BANNER);
}

fn source_label(source: FieldSource) -> &'static str {
    match source {
        FieldSource::User => "specified",
        FieldSource::Lookup => "lookup",
        FieldSource::Default => "default",
    }
}

/// Resolved site conditions
pub fn location_text(location: &LocationData) -> String {
    let mut out = String::new();
    heading(&mut out, "SITE CONDITIONS");
    if let Some(city) = &location.city {
        let _ = writeln!(out, "City:        {}", city);
    }
    if let Some(region) = location.region {
        let _ = writeln!(out, "Region:      {}", region.display_name());
    }
    let _ = writeln!(
        out,
        "Altitude:    {:.0} m ({})",
        location.altitude_m,
        source_label(location.altitude_source)
    );
    let _ = writeln!(
        out,
        "Temperature: {:.0} °C ({})",
        location.temperature_c,
        source_label(location.temperature_source)
    );
    let _ = writeln!(out, "Confidence:  {:?}", location.confidence);

    let ambient = location.ambient();
    let _ = writeln!(out, "Air density: {:.0}% of standard", ambient.density_ratio * 100.0);
    out
}

/// Full comprehensive report
pub fn report_text(report: &ComprehensiveReport) -> String {
    let mut out = location_text(&report.location);
    let req = &report.requirements;
    let b = &req.breakdown;

    let _ = writeln!(out);
    heading(&mut out, "BLOWER REQUIREMENTS");
    let _ = writeln!(out, "Application: {} ({})", req.application, req.operation.display_name());
    let _ = writeln!(
        out,
        "Tanks:       {} × {:.1} m² × {:.2} m deep ({:?})",
        req.tank.count, req.tank.area_m2, req.tank.depth_m, req.tank.arrangement
    );
    let _ = writeln!(out, "Airflow:     {:.1} m³/hr ({:.2} m³/min base)", req.airflow_m3_hr, req.airflow_m3_min);
    let _ = writeln!(out, "Pressure:    {:.0} mbar", req.pressure_mbar);
    let _ = writeln!(out, "Power:       {:.2} kW at {:.0}% efficiency", req.power_kw, req.efficiency * 100.0);

    let _ = writeln!(out);
    let _ = writeln!(out, "Pressure build-up:");
    let _ = writeln!(out, "  Static head      {:>8.1} mbar", b.static_pressure_mbar);
    let _ = writeln!(out, "  Pipe friction    {:>8.1} mbar", b.pipe_friction_mbar);
    let _ = writeln!(out, "  Fittings         {:>8.1} mbar", b.fitting_losses_mbar);
    let _ = writeln!(out, "  Diffuser ({})    {:>8.1} mbar", b.diffuser_type, b.diffuser_loss_mbar);
    let _ = writeln!(out, "  Subtotal         {:>8.1} mbar", b.subtotal_pressure_mbar);
    let _ = writeln!(
        out,
        "  Safety (×{:.2})    {:>8.1} mbar",
        b.safety_factor, b.safety_margin_mbar
    );
    let _ = writeln!(
        out,
        "  Altitude (×{:.3}) {:>8.1} mbar",
        b.altitude_pressure_factor, b.altitude_corrected_pressure_mbar
    );

    let _ = writeln!(out);
    heading(&mut out, "CONFIGURATION COMPARISON");
    let _ = writeln!(out, "{}", format_comparison_table(&report.comparison_table));

    let e = &report.energy_analysis;
    let _ = writeln!(out);
    heading(&mut out, "ENERGY ANALYSIS");
    let _ = writeln!(out, "Recommended:      {} × {}", e.config_type, e.blower_count);
    let _ = writeln!(out, "Baseline energy:  {:.0} kWh/yr", e.baseline_annual_kwh);
    let _ = writeln!(out, "Optimized energy: {:.0} kWh/yr", e.optimized_annual_kwh);
    let _ = writeln!(out, "Savings:          {:.0} kWh/yr ({:.1}%)", e.annual_kwh_savings, e.energy_savings_pct);
    let _ = writeln!(
        out,
        "Cost savings:     {} {:.0}/yr at {:.2}/kWh",
        e.currency, e.annual_cost_savings, e.tariff_per_kwh
    );
    let _ = writeln!(out, "Extra capital:    {} {:.0}", e.currency, e.extra_capital_cost);
    match e.payback_months {
        Some(months) => {
            let _ = writeln!(out, "Payback:          {:.1} months", months);
        }
        None => {
            let _ = writeln!(out, "Payback:          never (no energy savings)");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", report.recommendation_report);

    if !report.messages.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Notes:");
        for message in &report.messages {
            let _ = writeln!(out, "  - {}", message);
        }
    }
    if !report.warnings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warnings:");
        for warning in &report.warnings {
            let _ = writeln!(out, "  [!] {}", warning);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use blower_core::{comprehensive, location, CalcSettings, CalculationInputs};

    #[test]
    fn test_location_text() {
        let loc = location::resolve("Durban", None, None);
        let text = location_text(&loc);
        assert!(text.contains("City:        Durban"));
        assert!(text.contains("Altitude:    10 m (lookup)"));
    }

    #[test]
    fn test_report_text_sections() {
        let inputs = CalculationInputs {
            tank_length_m: 6.0,
            tank_width_m: 3.0,
            tank_depth_m: 2.0,
            altitude_m: Some(1420.0),
            ..CalculationInputs::default()
        };
        let report = comprehensive::run(&inputs, &CalcSettings::default()).unwrap();
        let text = report_text(&report);
        for section in ["SITE CONDITIONS", "BLOWER REQUIREMENTS", "CONFIGURATION COMPARISON", "ENERGY ANALYSIS"] {
            assert!(text.contains(section), "missing {}", section);
        }
        assert!(text.contains("Payback:"));
    }
}
