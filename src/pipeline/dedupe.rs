//! Intra-batch duplicate detection.
//!
//! Records are processed in input order and compared only against records
//! already accepted, so the first occurrence of an entity always wins.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::domain::{DuplicateEntry, EntityKind, Record};
use crate::pipeline::similarity::{normalize_name, normalize_website, similarity};

/// Names at or above this similarity are the same entity within a batch.
pub const NAME_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Which matching rules apply for an entity type.
#[derive(Debug, Clone)]
pub struct DedupePolicy {
    /// Label for the external identifier in duplicate reasons.
    pub identifier_label: &'static str,
    pub match_website: bool,
    pub match_location: bool,
}

impl DedupePolicy {
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            // Bands carry no address or venue website; identifier and name
            // checks are the only meaningful ones.
            EntityKind::Band => Self {
                identifier_label: "MusicBrainz ID",
                match_website: false,
                match_location: false,
            },
            EntityKind::Venue => Self {
                identifier_label: "Google Place ID",
                match_website: true,
                match_location: true,
            },
            EntityKind::Studio => Self {
                identifier_label: "external identifier",
                match_website: true,
                match_location: true,
            },
        }
    }
}

/// Result of a dedupe pass: surviving records in first-seen order plus the
/// audit trail of what was dropped and why.
#[derive(Debug)]
pub struct DedupeOutcome<R> {
    pub kept: Vec<R>,
    pub dropped: Vec<DuplicateEntry>,
}

/// Coordinates rounded to 3 decimal degrees (about 100 m).
fn location_key(lat: f64, lng: f64) -> (i64, i64) {
    ((lat * 1000.0).round() as i64, (lng * 1000.0).round() as i64)
}

/// State accumulated over the records accepted so far.
#[derive(Default)]
struct SeenState {
    ids: HashSet<String>,
    names: Vec<String>,
    name_set: HashSet<String>,
    websites: HashSet<String>,
    locations: HashSet<(i64, i64)>,
}

impl SeenState {
    fn register<R: Record>(&mut self, record: &R, name: String, policy: &DedupePolicy) {
        if let Some(id) = record.external_id() {
            self.ids.insert(id.trim().to_string());
        }
        self.name_set.insert(name.clone());
        self.names.push(name);
        if policy.match_website {
            if let Some(site) = record.website() {
                self.websites.insert(normalize_website(site));
            }
        }
        if policy.match_location {
            if let Some((lat, lng)) = record.coordinates() {
                self.locations.insert(location_key(lat, lng));
            }
        }
    }

    /// Checks the rules in fixed order; the first hit decides the reason.
    fn duplicate_reason<R: Record>(
        &self,
        record: &R,
        name: &str,
        policy: &DedupePolicy,
    ) -> Option<String> {
        if let Some(id) = record.external_id() {
            if self.ids.contains(id.trim()) {
                return Some(format!("same {}", policy.identifier_label));
            }
        }

        if self.name_set.contains(name) {
            return Some("exact name match".to_string());
        }

        for seen in &self.names {
            if similarity(name, seen) >= NAME_SIMILARITY_THRESHOLD {
                return Some(format!("similar name to '{}'", seen));
            }
        }

        if policy.match_website {
            if let Some(site) = record.website() {
                if self.websites.contains(&normalize_website(site)) {
                    return Some("same website".to_string());
                }
            }
        }

        if policy.match_location {
            if let Some((lat, lng)) = record.coordinates() {
                if self.locations.contains(&location_key(lat, lng)) {
                    return Some("same location".to_string());
                }
            }
        }

        None
    }
}

/// Filters near-duplicates out of a batch.
///
/// Output preserves the input order of accepted records. Records with no
/// name never match anything and are retained as automatically unique.
pub fn dedupe<R: Record>(records: Vec<R>, policy: &DedupePolicy) -> DedupeOutcome<R> {
    let mut kept = Vec::new();
    let mut dropped = Vec::new();
    let mut seen = SeenState::default();

    for record in records {
        let name = normalize_name(record.name());
        if name.is_empty() {
            warn!("record without a name retained as unique");
            kept.push(record);
            continue;
        }

        match seen.duplicate_reason(&record, &name, policy) {
            Some(reason) => {
                debug!(name = record.name(), %reason, "duplicate detected");
                dropped.push(DuplicateEntry {
                    name: record.name().to_string(),
                    reason,
                });
            }
            None => {
                seen.register(&record, name, policy);
                kept.push(record);
            }
        }
    }

    DedupeOutcome { kept, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Band, Venue};

    fn venue(name: &str) -> Venue {
        Venue {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn venue_policy() -> DedupePolicy {
        DedupePolicy::for_kind(EntityKind::Venue)
    }

    #[test]
    fn test_identifier_match_keeps_exactly_one_either_order() {
        let a = Venue {
            google_place_id: Some("ChIJ-abc".to_string()),
            ..venue("Whelan's")
        };
        let b = Venue {
            google_place_id: Some("ChIJ-abc".to_string()),
            ..venue("Whelan's of Wexford Street")
        };

        for pair in [vec![a.clone(), b.clone()], vec![b, a]] {
            let first_name = pair[0].name.clone();
            let outcome = dedupe(pair, &venue_policy());
            assert_eq!(outcome.kept.len(), 1);
            assert_eq!(outcome.kept[0].name, first_name);
            assert_eq!(outcome.dropped.len(), 1);
            assert_eq!(outcome.dropped[0].reason, "same Google Place ID");
        }
    }

    #[test]
    fn test_exact_name_match_is_case_insensitive() {
        let outcome = dedupe(vec![venue("The Academy"), venue("the academy")], &venue_policy());
        assert_eq!(outcome.kept.len(), 1);
        assert_eq!(outcome.dropped[0].reason, "exact name match");
    }

    #[test]
    fn test_similarity_threshold_is_inclusive() {
        // These names score exactly 0.85 (34 matched chars over 40)
        let outcome = dedupe(
            vec![venue("abcdefghijklmnopqrst"), venue("abcdefghijklmnopqxyz")],
            &venue_policy(),
        );
        assert_eq!(outcome.kept.len(), 1);
        assert!(outcome.dropped[0].reason.starts_with("similar name to"));

        // Below the threshold both survive
        let outcome = dedupe(
            vec![venue("abcdefghijklmnopqrst"), venue("abcdefghijklwxyzwxyz")],
            &venue_policy(),
        );
        assert_eq!(outcome.kept.len(), 2);
    }

    #[test]
    fn test_website_match_ignores_scheme_and_trailing_slash() {
        let a = Venue {
            website: Some("https://whelanslive.com/".to_string()),
            ..venue("Whelan's")
        };
        let b = Venue {
            website: Some("http://Whelanslive.com".to_string()),
            ..venue("Midnight at Wexford St")
        };
        let outcome = dedupe(vec![a, b], &venue_policy());
        assert_eq!(outcome.kept.len(), 1);
        assert_eq!(outcome.dropped[0].reason, "same website");
    }

    #[test]
    fn test_location_rounding_boundary() {
        let at = |name: &str, lat: f64, lng: f64| Venue {
            latitude: Some(lat),
            longitude: Some(lng),
            ..venue(name)
        };

        // Same 3-decimal key: duplicates
        let outcome = dedupe(
            vec![at("A", 53.34981, -6.26031), at("B", 53.34979, -6.26029)],
            &venue_policy(),
        );
        assert_eq!(outcome.kept.len(), 1);
        assert_eq!(outcome.dropped[0].reason, "same location");

        // Distinct keys: both kept
        let outcome = dedupe(
            vec![at("A", 53.3498, -6.2603), at("B", 53.3510, -6.2603)],
            &venue_policy(),
        );
        assert_eq!(outcome.kept.len(), 2);
    }

    #[test]
    fn test_band_policy_skips_website_and_location() {
        let a = Band {
            name: "First".to_string(),
            website: Some("https://example.com".to_string()),
            ..Default::default()
        };
        let b = Band {
            name: "Second".to_string(),
            website: Some("https://example.com".to_string()),
            ..Default::default()
        };
        let outcome = dedupe(vec![a, b], &DedupePolicy::for_kind(EntityKind::Band));
        assert_eq!(outcome.kept.len(), 2);
    }

    #[test]
    fn test_band_identifier_dedup() {
        let mk = |name: &str| Band {
            name: name.to_string(),
            musicbrainz_id: Some("7f2b8a2e".to_string()),
            ..Default::default()
        };
        let outcome = dedupe(vec![mk("U2"), mk("U 2")], &DedupePolicy::for_kind(EntityKind::Band));
        assert_eq!(outcome.kept.len(), 1);
        assert_eq!(outcome.dropped[0].reason, "same MusicBrainz ID");
    }

    #[test]
    fn test_unnamed_records_are_retained_and_never_matched() {
        let outcome = dedupe(vec![venue(""), venue(""), venue("  ")], &venue_policy());
        assert_eq!(outcome.kept.len(), 3);
        assert!(outcome.dropped.is_empty());
    }

    #[test]
    fn test_output_preserves_first_seen_order() {
        let outcome = dedupe(
            vec![venue("Cyprus Avenue"), venue("Dolans"), venue("cyprus avenue"), venue("Roisin Dubh")],
            &venue_policy(),
        );
        let names: Vec<&str> = outcome.kept.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Cyprus Avenue", "Dolans", "Roisin Dubh"]);
    }
}
