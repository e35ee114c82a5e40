//! Mapping free-text location strings onto the canonical Irish lists.
//!
//! Matching is word-boundary-anchored and longest-canonical-name-wins, so a
//! town whose name happens to sit inside a longer name (or inside a county
//! name) can no longer shadow the right answer. City checks always run
//! before county checks.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::locations::{CITIES_AND_TOWNS, CITY_KEYWORDS, COUNTIES, MAJOR_CITIES, VENUE_CITY_WEIGHTS};

/// How a location value was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    /// The text itself named a canonical city or county.
    Confirmed,
    /// Backfilled from a keyword hint or the reference distribution.
    Guessed,
}

/// A resolved location. Exactly one of `city`/`county` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationMatch {
    pub city: Option<&'static str>,
    pub county: Option<&'static str>,
    pub confidence: Confidence,
}

impl LocationMatch {
    fn city(name: &'static str, confidence: Confidence) -> Self {
        Self {
            city: Some(name),
            county: None,
            confidence,
        }
    }

    fn county(name: &'static str) -> Self {
        Self {
            city: None,
            county: Some(name),
            confidence: Confidence::Confirmed,
        }
    }
}

struct CanonEntry {
    name: &'static str,
    lower: String,
    pattern: Regex,
}

/// Canonical names indexed for matching, longest name first so that the
/// first containment hit is also the longest one.
fn build_index(names: &[&'static str]) -> Vec<CanonEntry> {
    let mut entries: Vec<CanonEntry> = names
        .iter()
        .filter_map(|name| {
            let lower = name.to_lowercase();
            let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&lower))).ok()?;
            Some(CanonEntry {
                name,
                lower,
                pattern,
            })
        })
        .collect();
    entries.sort_by(|a, b| b.lower.len().cmp(&a.lower.len()));
    entries
}

static CITY_INDEX: Lazy<Vec<CanonEntry>> = Lazy::new(|| build_index(CITIES_AND_TOWNS));
static COUNTY_INDEX: Lazy<Vec<CanonEntry>> = Lazy::new(|| build_index(&COUNTIES));

/// Strips an optional "County "/"Co. "/"Co " prefix from already-lowercased
/// input before county comparison. The second element reports whether a
/// prefix was present, which marks the text as county-only: many county
/// names double as town names ("Wicklow", "Monaghan"), and an explicit
/// prefix must not resolve to the town.
fn strip_county_prefix(text: &str) -> (&str, bool) {
    for prefix in ["county ", "co. ", "co "] {
        if let Some(rest) = text.strip_prefix(prefix) {
            return (rest.trim(), true);
        }
    }
    (text, false)
}

/// Containment in either direction with word boundaries: the canonical name
/// appears in the text, or the whole text appears in the canonical name.
fn boundary_contains(entry: &CanonEntry, text: &str, text_pattern: Option<&Regex>) -> bool {
    if entry.pattern.is_match(text) {
        return true;
    }
    match text_pattern {
        Some(re) => re.is_match(&entry.lower),
        None => false,
    }
}

/// Maps arbitrary text to a canonical Irish city or county.
///
/// Order: exact city, city containment (longest wins), exact county with the
/// "County "/"Co." prefix stripped, county containment (longest wins).
/// Text carrying an explicit county prefix skips the city checks entirely.
/// Returns `None` when nothing matches.
pub fn match_location(text: &str) -> Option<LocationMatch> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lowered = trimmed.to_lowercase();
    let text_pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&lowered))).ok();
    let (stripped, county_marked) = strip_county_prefix(&lowered);

    if !county_marked {
        for entry in CITY_INDEX.iter() {
            if entry.lower == lowered {
                return Some(LocationMatch::city(entry.name, Confidence::Confirmed));
            }
        }

        for entry in CITY_INDEX.iter() {
            if boundary_contains(entry, &lowered, text_pattern.as_ref()) {
                return Some(LocationMatch::city(entry.name, Confidence::Confirmed));
            }
        }
    }

    for entry in COUNTY_INDEX.iter() {
        if entry.lower == stripped {
            return Some(LocationMatch::county(entry.name));
        }
    }

    let stripped_pattern = if county_marked {
        Regex::new(&format!(r"\b{}\b", regex::escape(stripped))).ok()
    } else {
        text_pattern
    };
    for entry in COUNTY_INDEX.iter() {
        if boundary_contains(entry, stripped, stripped_pattern.as_ref()) {
            return Some(LocationMatch::county(entry.name));
        }
    }

    None
}

/// Best-effort city guess from keyword hints in an entity name.
///
/// Always reported as `Guessed`; callers must not present these as
/// detections.
pub fn guess_city_from_name(name: &str) -> Option<LocationMatch> {
    let lowered = name.to_lowercase();
    for &(keyword, city) in CITY_KEYWORDS {
        if lowered.contains(keyword) {
            return Some(LocationMatch::city(city, Confidence::Guessed));
        }
    }
    None
}

/// Scans a name for one of the seven major cities, word-boundary anchored.
pub fn detect_major_city_in_name(name: &str) -> Option<&'static str> {
    let lowered = name.to_lowercase();
    MAJOR_CITIES.into_iter().find(|city| {
        Regex::new(&format!(r"\b{}\b", regex::escape(&city.to_lowercase())))
            .map(|re| re.is_match(&lowered))
            .unwrap_or(false)
    })
}

/// City assignments for `unlocated` records, in proportion to the reference
/// venue distribution.
///
/// Deterministic in input order: the pool of unlocated records is consumed
/// front to back, one contiguous run per city. Integer truncation can leave
/// a tail of records unassigned; the returned list may be shorter than
/// `unlocated`. Every assignment from here is a guess, never a detection.
pub fn proportional_assignments(unlocated: usize) -> Vec<&'static str> {
    let total: u32 = VENUE_CITY_WEIGHTS.iter().map(|(_, w)| w).sum();
    let mut out = Vec::new();

    for &(city, weight) in VENUE_CITY_WEIGHTS {
        if out.len() >= unlocated {
            break;
        }
        let target = ((weight as f64 / total as f64) * unlocated as f64) as usize;
        let take = target.min(unlocated - out.len());
        out.extend(std::iter::repeat(city).take(take));
    }

    out
}
