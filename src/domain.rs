use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The three entity types this tool stages for import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Band,
    Venue,
    Studio,
}

impl EntityKind {
    /// Document `_type` in the external store.
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityKind::Band => "band",
            EntityKind::Venue => "venue",
            EntityKind::Studio => "soundStudio",
        }
    }

    /// Stem used for input/output file names (`bands_import.ndjson` etc.).
    pub fn file_stem(&self) -> &'static str {
        match self {
            EntityKind::Band => "bands",
            EntityKind::Venue => "venues",
            EntityKind::Studio => "studios",
        }
    }

    /// Prefix for deterministic document ids and slug fallbacks.
    pub fn doc_prefix(&self) -> &'static str {
        match self {
            EntityKind::Band => "band",
            EntityKind::Venue => "venue",
            EntityKind::Studio => "studio",
        }
    }

    /// Default scraper output file for this entity type.
    pub fn default_input(&self) -> String {
        format!("irish_{}_data.json", self.file_stem())
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Accessors the duplicate detector needs from any scraped record.
///
/// Records are immutable once read; the detector only inspects them.
pub trait Record {
    fn name(&self) -> &str;

    /// External unique identifier (Google Place ID, MusicBrainz ID).
    fn external_id(&self) -> Option<&str> {
        None
    }

    fn website(&self) -> Option<&str> {
        None
    }

    fn coordinates(&self) -> Option<(f64, f64)> {
        None
    }
}

/// A band as produced by the band scraper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Band {
    pub name: String,
    pub slug: Option<String>,
    pub musicbrainz_id: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub country: Option<String>,
    pub formed_year: Option<i32>,
    pub is_active: Option<bool>,
    pub has_recent_activity: Option<bool>,
    #[serde(alias = "genres")]
    pub music_genres: Vec<String>,
    pub band_type: Option<String>,
    pub member_count: Option<u32>,
    pub record_label: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub spotify: Option<String>,
    pub bandcamp: Option<String>,
    pub youtube: Option<String>,
    pub lastfm_listeners: Option<u64>,
    pub spotify_followers: Option<u64>,
    pub verified: Option<bool>,
    pub featured: Option<bool>,
}

impl Record for Band {
    fn name(&self) -> &str {
        &self.name
    }

    fn external_id(&self) -> Option<&str> {
        self.musicbrainz_id.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// A venue as produced by the venue scraper (Google Places backed).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Venue {
    pub name: String,
    pub google_place_id: Option<String>,
    pub description: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub capacity: Option<u32>,
    pub venue_type: Option<String>,
    #[serde(rename = "hasPA")]
    pub has_pa: Option<bool>,
    pub has_lighting: Option<bool>,
    pub has_parking: Option<bool>,
    pub is_accessible: Option<bool>,
    pub serves_food: Option<bool>,
    pub serves_alcohol: Option<bool>,
    pub rating: Option<f64>,
    pub total_reviews: Option<u32>,
    pub price_level: Option<i32>,
}

impl Record for Venue {
    fn name(&self) -> &str {
        &self.name
    }

    fn external_id(&self) -> Option<&str> {
        self.google_place_id.as_deref().filter(|s| !s.trim().is_empty())
    }

    fn website(&self) -> Option<&str> {
        self.website.as_deref().filter(|s| !s.trim().is_empty())
    }

    fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0 => Some((lat, lng)),
            _ => None,
        }
    }
}

/// Slug object as the store represents it (`{"current": "..."}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlugRef {
    pub current: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudioAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub country: Option<String>,
    pub eircode: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudioContact {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudioPricing {
    pub hourly_rate: Option<f64>,
    pub half_day_rate: Option<f64>,
    pub full_day_rate: Option<f64>,
    pub currency: Option<String>,
    pub engineer_included: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoPoint {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// A sound studio as produced by the studio scraper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Studio {
    pub name: String,
    pub slug: Option<SlugRef>,
    pub description: Option<String>,
    pub address: Option<StudioAddress>,
    pub location: Option<GeoPoint>,
    pub contact: Option<StudioContact>,
    pub pricing: Option<StudioPricing>,
    pub amenities: Vec<String>,
    pub genres_supported: Vec<String>,
    pub features: Vec<String>,
    pub capacity: Option<u32>,
    pub band_friendly: Option<bool>,
    pub studio_type: Option<String>,
    pub verified: Option<bool>,
    pub featured: Option<bool>,
    pub claimed: Option<bool>,
    pub profile_image_url: Option<String>,
    pub opening_hours: Option<BTreeMap<String, String>>,
}

impl Record for Studio {
    fn name(&self) -> &str {
        &self.name
    }

    fn website(&self) -> Option<&str> {
        self.contact
            .as_ref()
            .and_then(|c| c.website.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    fn coordinates(&self) -> Option<(f64, f64)> {
        let loc = self.location.as_ref()?;
        match (loc.lat, loc.lng) {
            (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0 => Some((lat, lng)),
            _ => None,
        }
    }
}

/// One record dropped by the duplicate detector, for the audit report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateEntry {
    pub name: String,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_deserializes_scraper_fields() {
        let raw = r#"{
            "name": "The Frames",
            "musicbrainzId": "mbid-123",
            "musicGenres": ["rock", "folk"],
            "formedYear": 1990,
            "city": "Dublin"
        }"#;
        let band: Band = serde_json::from_str(raw).unwrap();
        assert_eq!(band.name, "The Frames");
        assert_eq!(band.external_id(), Some("mbid-123"));
        assert_eq!(band.music_genres.len(), 2);
        assert_eq!(band.formed_year, Some(1990));
    }

    #[test]
    fn test_band_accepts_genres_alias() {
        let raw = r#"{"name": "Aslan", "genres": ["rock"]}"#;
        let band: Band = serde_json::from_str(raw).unwrap();
        assert_eq!(band.music_genres, vec!["rock".to_string()]);
    }

    #[test]
    fn test_venue_coordinates_require_both_axes() {
        let venue = Venue {
            name: "Whelan's".to_string(),
            latitude: Some(53.3349),
            longitude: None,
            ..Default::default()
        };
        assert_eq!(venue.coordinates(), None);
    }

    #[test]
    fn test_studio_website_comes_from_contact() {
        let raw = r#"{
            "name": "Windmill Lane",
            "contact": {"website": "https://windmilllane.com"},
            "location": {"lat": 53.3442, "lng": -6.2312}
        }"#;
        let studio: Studio = serde_json::from_str(raw).unwrap();
        assert_eq!(studio.website(), Some("https://windmilllane.com"));
        assert!(studio.coordinates().is_some());
    }

    #[test]
    fn test_record_with_missing_name_defaults_empty() {
        let venue: Venue = serde_json::from_str(r#"{"city": "Cork"}"#).unwrap();
        assert_eq!(venue.name(), "");
    }
}
