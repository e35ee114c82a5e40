//! Mapping cleaned scraped records into the store's document shape.
//!
//! Document ids are deterministic (`<type>-<slug>`), so re-running the tool
//! over the same batch produces the same ids.

use serde_json::{json, Map, Value};

use crate::domain::{Band, EntityKind, Studio, Venue};

/// Folds the Irish fadas so slugs stay plain ASCII.
fn fold_accent(c: char) -> char {
    match c {
        'á' | 'Á' => 'a',
        'é' | 'É' => 'e',
        'í' | 'Í' => 'i',
        'ó' | 'Ó' => 'o',
        'ú' | 'Ú' => 'u',
        other => other,
    }
}

/// URL-friendly slug from an entity name.
///
/// Lowercased, accent-folded, non-alphanumeric runs collapsed to single
/// hyphens. The store requires ids to start with a letter, so a slug that
/// does not gets the entity-type prefix; an empty slug falls back to the
/// type name alone.
pub fn create_slug(name: &str, kind: EntityKind) -> String {
    let slug = name
        .to_lowercase()
        .chars()
        .map(fold_accent)
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        kind.doc_prefix().to_string()
    } else if !slug.starts_with(|c: char| c.is_ascii_alphabetic()) {
        format!("{}-{}", kind.doc_prefix(), slug)
    } else {
        slug
    }
}

/// Maps a scraped venue type onto the store schema's value set.
pub fn map_venue_type(scraped: &str) -> &'static str {
    match scraped {
        "pub" => "pub",
        "club" => "club",
        "theatre" | "theater" => "theatre",
        "arena" => "arena",
        "concert_hall" => "concert_hall",
        _ => "other",
    }
}

/// Facility tags derived from the venue's boolean characteristics.
pub fn venue_facilities(venue: &Venue) -> Vec<&'static str> {
    let mut facilities = Vec::new();
    if venue.has_pa == Some(true) {
        facilities.push("sound_system");
    }
    if venue.has_lighting == Some(true) {
        facilities.push("lighting");
    }
    if venue.has_parking == Some(true) {
        facilities.push("parking");
    }
    if venue.serves_alcohol == Some(true) {
        facilities.push("bar");
    }
    if venue.serves_food == Some(true) {
        facilities.push("food_service");
    }
    if venue.is_accessible == Some(true) {
        facilities.push("ramp_access");
    }
    facilities
}

fn slug_value(current: &str) -> Value {
    json!({ "_type": "slug", "current": current })
}

fn insert_if_some(map: &mut Map<String, Value>, key: &str, value: Option<&String>) {
    if let Some(v) = value {
        if !v.trim().is_empty() {
            map.insert(key.to_string(), Value::String(v.clone()));
        }
    }
}

fn insert_object_if_nonempty(map: &mut Map<String, Value>, key: &str, object: Map<String, Value>) {
    if !object.is_empty() {
        map.insert(key.to_string(), Value::Object(object));
    }
}

/// Store document for a band.
pub fn band_document(band: &Band) -> Value {
    let slug = create_slug(&band.name, EntityKind::Band);
    let mut doc = Map::new();
    doc.insert("_id".into(), json!(format!("band-{}", slug)));
    doc.insert("_type".into(), json!("band"));
    doc.insert("name".into(), json!(band.name));
    doc.insert("slug".into(), slug_value(&slug));
    doc.insert(
        "description".into(),
        json!(band.description.clone().unwrap_or_default()),
    );
    doc.insert("isActive".into(), json!(band.is_active.unwrap_or(true)));
    doc.insert(
        "hasRecentActivity".into(),
        json!(band.has_recent_activity.unwrap_or(false)),
    );
    doc.insert("verified".into(), json!(false));
    doc.insert("featured".into(), json!(false));

    let mut location = Map::new();
    insert_if_some(&mut location, "city", band.city.as_ref());
    insert_if_some(&mut location, "county", band.county.as_ref());
    insert_if_some(&mut location, "country", band.country.as_ref());
    insert_object_if_nonempty(&mut doc, "location", location);

    let mut contact = Map::new();
    insert_if_some(&mut contact, "email", band.email.as_ref());
    insert_if_some(&mut contact, "website", band.website.as_ref());
    insert_if_some(&mut contact, "facebook", band.facebook.as_ref());
    insert_if_some(&mut contact, "instagram", band.instagram.as_ref());
    insert_if_some(&mut contact, "twitter", band.twitter.as_ref());
    insert_object_if_nonempty(&mut doc, "contact", contact);

    let mut music_details = Map::new();
    if !band.music_genres.is_empty() {
        music_details.insert("genres".into(), json!(band.music_genres));
    }
    insert_if_some(&mut music_details, "bandType", band.band_type.as_ref());
    if let Some(year) = band.formed_year {
        music_details.insert("formedYear".into(), json!(year));
    }
    if let Some(count) = band.member_count {
        music_details.insert("memberCount".into(), json!(count));
    }
    insert_if_some(&mut music_details, "recordLabel", band.record_label.as_ref());
    insert_object_if_nonempty(&mut doc, "musicDetails", music_details);

    let mut streaming = Map::new();
    insert_if_some(&mut streaming, "spotify", band.spotify.as_ref());
    insert_if_some(&mut streaming, "bandcamp", band.bandcamp.as_ref());
    insert_if_some(&mut streaming, "youtube", band.youtube.as_ref());
    insert_object_if_nonempty(&mut doc, "streamingLinks", streaming);

    let mut stats = Map::new();
    if let Some(listeners) = band.lastfm_listeners {
        stats.insert("lastfmListeners".into(), json!(listeners));
    }
    if let Some(followers) = band.spotify_followers {
        stats.insert("spotifyFollowers".into(), json!(followers));
    }
    insert_object_if_nonempty(&mut doc, "stats", stats);

    insert_if_some(&mut doc, "musicbrainzId", band.musicbrainz_id.as_ref());

    Value::Object(doc)
}

/// Store document for a venue.
pub fn venue_document(venue: &Venue) -> Value {
    let slug = create_slug(&venue.name, EntityKind::Venue);
    let mut doc = Map::new();
    doc.insert("_id".into(), json!(format!("venue-{}", slug)));
    doc.insert("_type".into(), json!("venue"));
    doc.insert("name".into(), json!(venue.name));
    doc.insert("slug".into(), slug_value(&slug));
    doc.insert("description".into(), json!(venue_description(venue)));
    doc.insert("verified".into(), json!(false));
    doc.insert("claimed".into(), json!(false));
    doc.insert("featured".into(), json!(false));

    let mut address = Map::new();
    insert_if_some(&mut address, "street", venue.street.as_ref());
    insert_if_some(&mut address, "city", venue.city.as_ref());
    insert_if_some(&mut address, "county", venue.county.as_ref());
    insert_if_some(&mut address, "country", venue.country.as_ref());
    insert_object_if_nonempty(&mut doc, "address", address);

    if let (Some(lat), Some(lng)) = (venue.latitude, venue.longitude) {
        doc.insert(
            "location".into(),
            json!({ "_type": "geopoint", "lat": lat, "lng": lng }),
        );
    }

    let mut contact = Map::new();
    insert_if_some(&mut contact, "phone", venue.phone.as_ref());
    insert_if_some(&mut contact, "email", venue.email.as_ref());
    insert_if_some(&mut contact, "website", venue.website.as_ref());
    insert_object_if_nonempty(&mut doc, "contact", contact);

    if let Some(capacity) = venue.capacity {
        doc.insert("capacity".into(), json!(capacity));
    }
    if let Some(venue_type) = &venue.venue_type {
        doc.insert("venueType".into(), json!(map_venue_type(venue_type)));
    }
    let facilities = venue_facilities(venue);
    if !facilities.is_empty() {
        doc.insert("facilities".into(), json!(facilities));
    }

    Value::Object(doc)
}

/// Venue description with the Google rating folded in as a suffix.
fn venue_description(venue: &Venue) -> String {
    let mut description = venue.description.clone().unwrap_or_default();

    let has_google_data = venue.google_place_id.is_some()
        || venue.rating.is_some()
        || venue.total_reviews.is_some()
        || venue.price_level.is_some();
    if !has_google_data {
        return description;
    }

    if !description.is_empty() && !description.ends_with('.') {
        description.push('.');
    }
    if let (Some(rating), Some(reviews)) = (venue.rating, venue.total_reviews) {
        description.push_str(&format!(
            " (Google Rating: {}/5 from {} reviews)",
            rating, reviews
        ));
    }
    description
}

/// Store document for a sound studio.
pub fn studio_document(studio: &Studio) -> Value {
    let slug = studio
        .slug
        .as_ref()
        .map(|s| s.current.clone())
        .unwrap_or_else(|| create_slug(&studio.name, EntityKind::Studio));
    let mut doc = Map::new();
    doc.insert("_id".into(), json!(format!("studio-{}", create_slug(&studio.name, EntityKind::Studio))));
    doc.insert("_type".into(), json!("soundStudio"));
    doc.insert("name".into(), json!(studio.name));
    doc.insert("slug".into(), slug_value(&slug));
    doc.insert(
        "description".into(),
        json!(studio.description.clone().unwrap_or_default()),
    );
    doc.insert(
        "bandFriendly".into(),
        json!(studio.band_friendly.unwrap_or(true)),
    );
    doc.insert(
        "studioType".into(),
        json!(studio
            .studio_type
            .clone()
            .unwrap_or_else(|| "professional".to_string())),
    );
    doc.insert("verified".into(), json!(studio.verified.unwrap_or(false)));
    doc.insert("featured".into(), json!(studio.featured.unwrap_or(false)));
    doc.insert("claimed".into(), json!(studio.claimed.unwrap_or(false)));

    if let Some(addr) = &studio.address {
        doc.insert(
            "address".into(),
            json!({
                "street": addr.street.clone().unwrap_or_default(),
                "city": addr.city.clone().unwrap_or_default(),
                "county": addr.county.clone().unwrap_or_default(),
                "country": addr.country.clone().unwrap_or_else(|| "Ireland".to_string()),
                "eircode": addr.eircode.clone().unwrap_or_default(),
            }),
        );
    }

    if let Some(loc) = &studio.location {
        doc.insert(
            "location".into(),
            json!({
                "_type": "geopoint",
                "lat": loc.lat.unwrap_or(0.0),
                "lng": loc.lng.unwrap_or(0.0),
            }),
        );
    }

    if let Some(contact) = &studio.contact {
        let mut contact_map = Map::new();
        insert_if_some(&mut contact_map, "phone", contact.phone.as_ref());
        insert_if_some(&mut contact_map, "email", contact.email.as_ref());
        insert_if_some(&mut contact_map, "website", contact.website.as_ref());
        insert_if_some(&mut contact_map, "facebook", contact.facebook.as_ref());
        insert_if_some(&mut contact_map, "instagram", contact.instagram.as_ref());
        insert_if_some(&mut contact_map, "twitter", contact.twitter.as_ref());
        insert_object_if_nonempty(&mut doc, "contact", contact_map);
    }

    if let Some(pricing) = &studio.pricing {
        let mut pricing_map = Map::new();
        pricing_map.insert(
            "currency".into(),
            json!(pricing.currency.clone().unwrap_or_else(|| "EUR".to_string())),
        );
        if let Some(rate) = pricing.hourly_rate {
            pricing_map.insert("hourlyRate".into(), json!(rate));
        }
        if let Some(rate) = pricing.half_day_rate {
            pricing_map.insert("halfDayRate".into(), json!(rate));
        }
        if let Some(rate) = pricing.full_day_rate {
            pricing_map.insert("fullDayRate".into(), json!(rate));
        }
        if pricing.engineer_included == Some(true) {
            pricing_map.insert("engineerIncluded".into(), json!(true));
        }
        doc.insert("pricing".into(), Value::Object(pricing_map));
    }

    if !studio.amenities.is_empty() {
        doc.insert("amenities".into(), json!(studio.amenities));
    }
    if !studio.genres_supported.is_empty() {
        doc.insert("genresSupported".into(), json!(studio.genres_supported));
    }
    if !studio.features.is_empty() {
        doc.insert("features".into(), json!(studio.features));
    }
    if let Some(capacity) = studio.capacity {
        doc.insert("capacity".into(), json!(capacity));
    }
    insert_if_some(&mut doc, "_profileImageUrl", studio.profile_image_url.as_ref());
    if let Some(hours) = &studio.opening_hours {
        doc.insert("openingHours".into(), json!(hours));
    }

    Value::Object(doc)
}
