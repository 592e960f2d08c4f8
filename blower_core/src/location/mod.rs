//! # Location Resolver
//!
//! Turns free-text location input ("Johannesburg", "1420 m above sea level",
//! "coastal, about 30 degrees") into the site altitude and ambient
//! temperature the calculator needs.
//!
//! Resolution order per field:
//!
//! 1. Explicit value passed by the caller
//! 2. Number extracted from the text ("1500m", "25°C", ...)
//! 3. Gazetteer lookup: whole-word city/alias match, then a generic region
//!    keyword ("sea level", "highveld"), then fuzzy match
//! 4. Fixed default (500 m, 20 °C)
//!
//! Resolution never fails. Missing or ambiguous input lowers
//! [`Confidence`] and is spelled out in the explanation instead.
//!
//! ## Example
//!
//! ```rust
//! use blower_core::location::{resolve, Confidence, FieldSource};
//!
//! let loc = resolve("Pretoria area", None, None);
//! assert_eq!(loc.altitude_m, 1350.0);
//! assert_eq!(loc.altitude_source, FieldSource::Lookup);
//! assert_eq!(loc.confidence, Confidence::High);
//!
//! let unknown = resolve("", None, None);
//! assert_eq!(unknown.altitude_m, 500.0);
//! assert_eq!(unknown.confidence, Confidence::Low);
//! ```

pub mod ambient;
pub mod extract;
pub mod gazetteer;
pub mod similarity;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use ambient::AmbientConditions;
pub use gazetteer::{GazetteerEntry, RegionProfile};

/// Altitude used when nothing better is known (South African average, m)
pub const DEFAULT_ALTITUDE_M: f64 = 500.0;

/// Temperature used when nothing better is known (°C)
pub const DEFAULT_TEMPERATURE_C: f64 = 20.0;

/// Minimum similarity ratio for a fuzzy gazetteer match
pub const FUZZY_CUTOFF: f64 = 0.6;

/// How much the resolved values can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// Given by the user, explicitly or in the text
    User,
    /// Gazetteer lookup
    Lookup,
    /// Fixed default
    Default,
}

/// How a gazetteer entry was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Alias,
    Fuzzy,
}

/// Result of a gazetteer lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityMatch {
    pub entry: &'static GazetteerEntry,
    pub kind: MatchKind,
}

impl CityMatch {
    fn confidence(&self) -> Confidence {
        match self.kind {
            MatchKind::Exact | MatchKind::Alias => Confidence::High,
            MatchKind::Fuzzy => Confidence::Medium,
        }
    }
}

/// Resolved site conditions. Built once per request, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    /// Site altitude above sea level (m)
    pub altitude_m: f64,

    /// Ambient design temperature (°C)
    pub temperature_c: f64,

    /// Matched city, if any
    pub city: Option<String>,

    /// Generic region profile, if no city was named
    pub region: Option<RegionProfile>,

    pub confidence: Confidence,
    pub altitude_source: FieldSource,
    pub temperature_source: FieldSource,

    /// One line per resolved fact, for display
    pub explanation: String,
}

impl LocationData {
    /// Site air density ratios for these conditions
    pub fn ambient(&self) -> AmbientConditions {
        AmbientConditions::at(self.altitude_m, self.temperature_c)
    }
}

/// Look up a place name: exact key, then alias, then fuzzy match.
///
/// ```rust
/// use blower_core::location::{lookup_city, MatchKind};
///
/// let m = lookup_city("Johanesburg").unwrap();
/// assert_eq!(m.entry.key, "johannesburg");
/// assert_eq!(m.kind, MatchKind::Fuzzy);
/// ```
pub fn lookup_city(name: &str) -> Option<CityMatch> {
    let name = extract::normalize(name);
    if name.is_empty() {
        return None;
    }
    if let Some(entry) = gazetteer::find_exact(&name) {
        return Some(CityMatch {
            entry,
            kind: MatchKind::Exact,
        });
    }
    if let Some(entry) = gazetteer::find_alias(&name) {
        return Some(CityMatch {
            entry,
            kind: MatchKind::Alias,
        });
    }
    fuzzy_match(std::iter::once(name))
}

fn fuzzy_match(candidates: impl IntoIterator<Item = String>) -> Option<CityMatch> {
    let mut best: Option<(f64, &'static GazetteerEntry)> = None;
    for candidate in candidates {
        for (name, entry) in gazetteer::all_names() {
            if name.len() < 4 {
                continue;
            }
            let score = similarity::ratio(&candidate, name);
            if score >= FUZZY_CUTOFF && best.map_or(true, |(s, _)| score > s) {
                best = Some((score, entry));
            }
        }
    }
    best.map(|(score, entry)| {
        debug!(city = entry.key, score, "fuzzy gazetteer match");
        CityMatch {
            entry,
            kind: MatchKind::Fuzzy,
        }
    })
}

/// Resolve free text plus optional explicit values into site conditions.
#[tracing::instrument(skip_all, fields(text_len = raw_text.len()))]
pub fn resolve(raw_text: &str, explicit_altitude: Option<f64>, explicit_temperature: Option<f64>) -> LocationData {
    let explicit_altitude = explicit_altitude.filter(|v| v.is_finite());
    let explicit_temperature = explicit_temperature.filter(|v| v.is_finite());

    let mut altitude = explicit_altitude.or_else(|| extract::altitude(raw_text));
    let mut temperature = explicit_temperature.or_else(|| extract::temperature(raw_text));
    let mut altitude_source = FieldSource::User;
    let mut temperature_source = FieldSource::User;
    let mut notes: Vec<String> = Vec::new();

    let exact = extract::city(raw_text).map(|entry| CityMatch {
        entry,
        kind: MatchKind::Exact,
    });
    let region = if exact.is_none() { extract::region(raw_text) } else { None };
    let needs_lookup = altitude.is_none() || temperature.is_none();
    let city_match = match exact {
        Some(m) => Some(m),
        None if needs_lookup && region.is_none() => fuzzy_match(extract::fuzzy_candidates(raw_text)),
        None => None,
    };

    let mut lookup_confidence = Confidence::High;
    if let Some(m) = city_match {
        if needs_lookup {
            if altitude.is_none() {
                altitude = Some(m.entry.altitude_m);
                altitude_source = FieldSource::Lookup;
            }
            if temperature.is_none() {
                temperature = Some(m.entry.temp_avg_c);
                temperature_source = FieldSource::Lookup;
            }
            lookup_confidence = m.confidence();
        }
        if m.kind == MatchKind::Fuzzy {
            notes.push(format!("Assuming you meant {}", m.entry.display_name));
        }
    } else if let Some(profile) = region {
        if altitude.is_none() {
            altitude = Some(profile.altitude_m());
            altitude_source = FieldSource::Lookup;
        }
        if temperature.is_none() {
            temperature = Some(profile.temp_avg_c());
            temperature_source = FieldSource::Lookup;
        }
        notes.push(format!("Using generic {} profile", profile.display_name()));
    }

    let altitude_m = altitude.unwrap_or_else(|| {
        altitude_source = FieldSource::Default;
        DEFAULT_ALTITUDE_M
    });
    let temperature_c = temperature.unwrap_or_else(|| {
        temperature_source = FieldSource::Default;
        DEFAULT_TEMPERATURE_C
    });

    let confidence = if altitude_source == FieldSource::Default || temperature_source == FieldSource::Default {
        Confidence::Low
    } else {
        lookup_confidence
    };

    let city = city_match.map(|m| m.entry.display_name.to_string());
    let explanation = explain(
        city.as_deref(),
        &notes,
        altitude_m,
        altitude_source,
        temperature_c,
        temperature_source,
        confidence,
    );

    debug!(
        altitude_m,
        temperature_c,
        ?altitude_source,
        ?temperature_source,
        ?confidence,
        "location resolved"
    );

    LocationData {
        altitude_m,
        temperature_c,
        city,
        region: if city_match.is_none() { region } else { None },
        confidence,
        altitude_source,
        temperature_source,
        explanation,
    }
}

fn explain(
    city: Option<&str>,
    notes: &[String],
    altitude_m: f64,
    altitude_source: FieldSource,
    temperature_c: f64,
    temperature_source: FieldSource,
    confidence: Confidence,
) -> String {
    let mut lines = Vec::new();
    if let Some(city) = city {
        lines.push(format!("Location: {}", city));
    }
    lines.extend(notes.iter().cloned());
    lines.push(match altitude_source {
        FieldSource::User => format!("Using altitude: {:.0} m (as specified)", altitude_m),
        FieldSource::Lookup => format!("Found altitude: {:.0} m", altitude_m),
        FieldSource::Default => format!(
            "Using default altitude: {:.0} m (please specify for better accuracy)",
            altitude_m
        ),
    });
    lines.push(match temperature_source {
        FieldSource::User => format!("Using temperature: {:.0} °C (as specified)", temperature_c),
        FieldSource::Lookup => format!("Using average temperature: {:.0} °C", temperature_c),
        FieldSource::Default => format!(
            "Using default temperature: {:.0} °C (please specify for better accuracy)",
            temperature_c
        ),
    });
    if confidence == Confidence::Low {
        lines.push("Tip: provide a city name or altitude for more accurate results".to_string());
    }
    lines.join("\n")
}
