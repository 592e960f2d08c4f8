//! Pattern extraction of altitude, temperature and place names from free
//! text such as "Pretoria area, about 28 degrees" or "1420 m above sea level".

use once_cell::sync::Lazy;
use regex::Regex;

use super::gazetteer::{self, GazetteerEntry, RegionProfile};

/// Plausible ambient temperatures (°C); anything else is a false positive
pub const TEMPERATURE_RANGE_C: (f64, f64) = (-10.0, 50.0);

/// Plausible site altitudes (m)
pub const ALTITUDE_RANGE_M: (f64, f64) = (0.0, 6000.0);

static ALTITUDE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(\d+(?:\.\d+)?)\s*(?:m|meters?|metres?)\b",
        r"altitude\s+(?:is\s+|of\s+)?(\d+(?:\.\d+)?)",
        r"elevation\s+(?:is\s+|of\s+)?(\d+(?:\.\d+)?)",
    ])
});

static TEMPERATURE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(-?\d+(?:\.\d+)?)\s*°?\s*c(?:elsius)?\b",
        r"temperature\s+(?:is\s+|of\s+)?(-?\d+(?:\.\d+)?)",
        r"temp\s+(?:is\s+)?(-?\d+(?:\.\d+)?)",
        r"(-?\d+(?:\.\d+)?)\s*degrees?\b",
        r"average\s+(?:temp(?:erature)?\s+)?(-?\d+(?:\.\d+)?)",
    ])
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static location pattern is valid"))
        .collect()
}

/// Words that look like place names to the fuzzy matcher but never are
const FUZZY_STOP_WORDS: &[&str] = &[
    "about", "above", "altitude", "area", "around", "average", "celsius", "degrees", "elevation",
    "level", "meters", "metres", "near", "outside", "plant", "site", "tank", "temp", "temperature",
    "town", "urban", "usually", "works",
];

/// Lowercase the text and reduce it to single-space separated words
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_in_range(patterns: &[Regex], text: &str, (min, max): (f64, f64)) -> Option<f64> {
    patterns.iter().find_map(|re| {
        re.captures_iter(text)
            .filter_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
            .find(|v| (min..=max).contains(v))
    })
}

/// First plausible altitude mentioned in the text
pub fn altitude(text: &str) -> Option<f64> {
    first_in_range(&ALTITUDE_PATTERNS, &text.to_lowercase(), ALTITUDE_RANGE_M)
}

/// First plausible ambient temperature mentioned in the text
pub fn temperature(text: &str) -> Option<f64> {
    first_in_range(&TEMPERATURE_PATTERNS, &text.to_lowercase(), TEMPERATURE_RANGE_C)
}

fn contains_phrase(normalized: &str, phrase: &str) -> bool {
    format!(" {} ", normalized).contains(&format!(" {} ", phrase))
}

/// City named in the text, by whole-word match on key then aliases
pub fn city(text: &str) -> Option<&'static GazetteerEntry> {
    let normalized = normalize(text);
    gazetteer::CITIES.iter().find(|entry| {
        contains_phrase(&normalized, entry.key)
            || entry.aliases.iter().any(|alias| contains_phrase(&normalized, alias))
    })
}

/// Generic regional profile named in the text
pub fn region(text: &str) -> Option<RegionProfile> {
    let normalized = normalize(text);
    [RegionProfile::Coastal, RegionProfile::Inland]
        .into_iter()
        .find(|profile| profile.keywords().iter().any(|kw| contains_phrase(&normalized, kw)))
}

/// Single words and adjacent word pairs worth fuzzy-matching against the
/// gazetteer. Short words and stop words are skipped.
pub fn fuzzy_candidates(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    let words: Vec<&str> = normalized
        .split(' ')
        .filter(|w| w.len() >= 4 && !FUZZY_STOP_WORDS.contains(w) && !w.chars().all(|c| c.is_ascii_digit()))
        .collect();
    let mut candidates: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    candidates.extend(words.windows(2).map(|pair| pair.join(" ")));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_altitude_patterns() {
        assert_eq!(altitude("1420 meters above sea level"), Some(1420.0));
        assert_eq!(altitude("altitude 1500m, temperature 25°C"), Some(1500.0));
        assert_eq!(altitude("Altitude is 900"), Some(900.0));
        assert_eq!(altitude("elevation 1200"), Some(1200.0));
        assert_eq!(altitude("site at 1350 metres"), Some(1350.0));
    }

    #[test]
    fn test_altitude_ignores_millimeters_and_minutes() {
        assert_eq!(altitude("pipe is 100mm"), None);
        assert_eq!(altitude("ready in 20 minutes"), None);
    }

    #[test]
    fn test_temperature_patterns() {
        assert_eq!(temperature("altitude 1500m, temperature 25°C"), Some(25.0));
        assert_eq!(temperature("about 30 degrees usually"), Some(30.0));
        assert_eq!(temperature("temp 18"), Some(18.0));
        assert_eq!(temperature("average temperature 21"), Some(21.0));
        assert_eq!(temperature("winter nights reach -5 c"), Some(-5.0));
    }

    #[test]
    fn test_temperature_rejects_implausible_values() {
        // 150 degrees is not an ambient temperature
        assert_eq!(temperature("pipe rated to 150 degrees"), None);
        assert_eq!(temperature("150 degrees, ambient 24 degrees"), Some(24.0));
    }

    #[test]
    fn test_city_whole_word() {
        assert_eq!(city("I'm in Johannesburg").unwrap().key, "johannesburg");
        assert_eq!(city("jhb, average temp").unwrap().key, "johannesburg");
        assert_eq!(city("Gqeberha harbour").unwrap().key, "port elizabeth");
        // "pe" inside "pipe" and "el" inside "level" must not match
        assert!(city("long pipe at sea level").is_none());
    }

    #[test]
    fn test_region_keywords() {
        assert_eq!(region("We're at sea level"), Some(RegionProfile::Coastal));
        assert_eq!(region("somewhere inland"), Some(RegionProfile::Inland));
        assert_eq!(region("Highveld farm"), Some(RegionProfile::Inland));
        assert_eq!(region("Pretoria"), None);
    }

    #[test]
    fn test_fuzzy_candidates() {
        let candidates = fuzzy_candidates("near Johanesburg at 1500 m");
        assert!(candidates.contains(&"johanesburg".to_string()));
        assert!(!candidates.contains(&"near".to_string()));
        assert!(!candidates.contains(&"1500".to_string()));
    }
}
