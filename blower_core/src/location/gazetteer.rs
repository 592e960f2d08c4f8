//! South African gazetteer: altitude and average ambient temperature for
//! the cities and industrial areas the sales team quotes into most often,
//! plus two generic regional profiles.

use serde::{Deserialize, Serialize};

/// A named place with its design conditions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazetteerEntry {
    /// Lowercase lookup key
    pub key: &'static str,
    /// Name used in explanations
    pub display_name: &'static str,
    /// Altitude above sea level (m)
    pub altitude_m: f64,
    /// Annual average temperature (°C)
    pub temp_avg_c: f64,
    /// Lowercase alternative names
    pub aliases: &'static [&'static str],
}

const fn entry(
    key: &'static str,
    display_name: &'static str,
    altitude_m: f64,
    temp_avg_c: f64,
    aliases: &'static [&'static str],
) -> GazetteerEntry {
    GazetteerEntry {
        key,
        display_name,
        altitude_m,
        temp_avg_c,
        aliases,
    }
}

/// Cities and industrial areas, in match priority order
pub static CITIES: &[GazetteerEntry] = &[
    // Major cities
    entry("johannesburg", "Johannesburg", 1750.0, 20.0, &["joburg", "jhb", "jozi", "egoli"]),
    entry("pretoria", "Pretoria", 1350.0, 22.0, &["tshwane", "pta"]),
    entry("cape town", "Cape Town", 50.0, 18.0, &["kaapstad", "mother city", "cpt"]),
    entry("durban", "Durban", 10.0, 24.0, &["ethekwini", "dbn"]),
    entry("port elizabeth", "Port Elizabeth", 60.0, 20.0, &["gqeberha", "pe", "nelson mandela bay"]),
    entry("bloemfontein", "Bloemfontein", 1400.0, 20.0, &["bloem", "mangaung"]),
    entry("east london", "East London", 50.0, 21.0, &["buffalo city", "el"]),
    entry("kimberley", "Kimberley", 1200.0, 22.0, &["diamond city"]),
    entry("nelspruit", "Nelspruit", 660.0, 24.0, &["mbombela"]),
    entry("polokwane", "Polokwane", 1230.0, 21.0, &["pietersburg"]),
    entry("rustenburg", "Rustenburg", 1170.0, 23.0, &["phokeng"]),
    entry("george", "George", 200.0, 18.0, &[]),
    // Industrial areas
    entry("vanderbijlpark", "Vanderbijlpark", 1480.0, 21.0, &["vaal triangle"]),
    entry("midrand", "Midrand", 1550.0, 20.0, &[]),
    entry("centurion", "Centurion", 1450.0, 21.0, &[]),
    entry("germiston", "Germiston", 1665.0, 20.0, &[]),
    entry("benoni", "Benoni", 1650.0, 20.0, &[]),
    entry("boksburg", "Boksburg", 1630.0, 20.0, &[]),
];

/// Generic regional profile used when no specific city is named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionProfile {
    /// Sea-level coastal site
    Coastal,
    /// Inland plateau / highveld site
    Inland,
}

impl RegionProfile {
    /// Keywords that select this profile
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            RegionProfile::Coastal => &["sea level", "coastal", "coast", "seaside", "beach"],
            RegionProfile::Inland => &["inland", "highveld", "interior"],
        }
    }

    /// Representative altitude (m)
    pub fn altitude_m(&self) -> f64 {
        match self {
            RegionProfile::Coastal => 50.0,
            RegionProfile::Inland => 1200.0,
        }
    }

    /// Representative average temperature (°C)
    pub fn temp_avg_c(&self) -> f64 {
        match self {
            RegionProfile::Coastal => 22.0,
            RegionProfile::Inland => 20.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RegionProfile::Coastal => "coastal",
            RegionProfile::Inland => "inland",
        }
    }
}

/// Find a city by its exact key
pub fn find_exact(name: &str) -> Option<&'static GazetteerEntry> {
    CITIES.iter().find(|e| e.key == name)
}

/// Find a city by one of its aliases
pub fn find_alias(name: &str) -> Option<&'static GazetteerEntry> {
    CITIES.iter().find(|e| e.aliases.contains(&name))
}

/// Every lookup name (keys first, then aliases) paired with its entry
pub fn all_names() -> impl Iterator<Item = (&'static str, &'static GazetteerEntry)> {
    CITIES
        .iter()
        .map(|e| (e.key, e))
        .chain(CITIES.iter().flat_map(|e| e.aliases.iter().map(move |a| (*a, e))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_lowercase_and_unique() {
        for (i, a) in CITIES.iter().enumerate() {
            assert_eq!(a.key, a.key.to_lowercase());
            for b in &CITIES[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn test_find_exact_and_alias() {
        assert_eq!(find_exact("durban").unwrap().altitude_m, 10.0);
        assert_eq!(find_alias("gqeberha").unwrap().key, "port elizabeth");
        assert!(find_exact("gqeberha").is_none());
    }

    #[test]
    fn test_all_names_includes_aliases() {
        let names: Vec<_> = all_names().map(|(n, _)| n).collect();
        assert!(names.contains(&"johannesburg"));
        assert!(names.contains(&"jozi"));
        assert_eq!(names.first(), Some(&"johannesburg"));
    }
}
