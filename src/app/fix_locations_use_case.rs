//! Re-standardizing location data in an already-scraped band batch.
//!
//! Reads the batch, rewrites city/county against the canonical lists
//! (including scanning band names for the major cities), and regenerates
//! the fixed batch plus its import-format outputs.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use crate::config::Config;
use crate::domain::Band;
use crate::error::{ImporterError, Result};
use crate::locations::{CITIES_AND_TOWNS, COUNTIES};
use crate::pipeline::catalog;
use crate::pipeline::locate;

pub struct FixLocationsUseCase<'a> {
    config: &'a Config,
}

impl<'a> FixLocationsUseCase<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    fn data_dir(&self) -> &Path {
        &self.config.importer.data_dir
    }

    pub fn run(&self, input: Option<&Path>) -> Result<()> {
        let path = match input {
            Some(p) => p.to_path_buf(),
            None => self.data_dir().join("irish_bands_data.json"),
        };
        if !path.exists() {
            println!("❌ {} not found!", path.display());
            return Err(ImporterError::MissingInput(path.display().to_string()));
        }

        let raw = fs::read_to_string(&path)?;
        let mut bands: Vec<Band> = serde_json::from_str(&raw)?;
        println!("📚 Loaded {} bands", bands.len());
        println!(
            "📍 Loaded {} cities and {} counties",
            CITIES_AND_TOWNS.len(),
            COUNTIES.len()
        );

        let fixed = fix_band_locations(&mut bands);
        println!("✅ Fixed {} location entries", fixed);

        self.write_outputs(&bands)?;
        print_location_stats(&bands);
        Ok(())
    }

    fn write_outputs(&self, bands: &[Band]) -> Result<()> {
        let fixed_path = self.data_dir().join("irish_bands_data_fixed.json");
        fs::write(&fixed_path, serde_json::to_string_pretty(bands)?)?;

        let docs: Vec<Value> = bands.iter().map(catalog::band_document).collect();

        let sanity_path = self.data_dir().join("bands_for_sanity_fixed.json");
        fs::write(&sanity_path, serde_json::to_string_pretty(&docs)?)?;

        let ndjson_path = self.data_dir().join("bands_import_fixed.ndjson");
        let mut lines = Vec::with_capacity(docs.len());
        for doc in &docs {
            lines.push(serde_json::to_string(doc)?);
        }
        fs::write(&ndjson_path, lines.join("\n"))?;

        info!(count = bands.len(), "wrote fixed band batch");
        println!("\n📁 Files created:");
        println!("  - {}", fixed_path.display());
        println!("  - {}", sanity_path.display());
        println!("  - {}", ndjson_path.display());
        Ok(())
    }
}

/// Rewrites each band's city/county to canonical values, drawing candidates
/// from the existing fields and from major-city mentions in the band name.
/// Returns the number of fields changed.
fn fix_band_locations(bands: &mut [Band]) -> usize {
    let mut fixed = 0;

    for band in bands.iter_mut() {
        let mut candidates: Vec<String> = Vec::new();
        if let Some(city) = &band.city {
            candidates.push(city.clone());
        }
        if let Some(county) = &band.county {
            candidates.push(county.clone());
        }
        if let Some(city) = locate::detect_major_city_in_name(&band.name) {
            candidates.push(city.to_string());
        }

        let mut best_city: Option<&'static str> = None;
        let mut best_county: Option<&'static str> = None;
        for candidate in &candidates {
            if let Some(m) = locate::match_location(candidate) {
                if best_city.is_none() {
                    best_city = m.city;
                }
                if best_county.is_none() {
                    best_county = m.county;
                }
            }
        }

        if let Some(city) = best_city {
            if band.city.as_deref() != Some(city) {
                band.city = Some(city.to_string());
                fixed += 1;
                println!("  Fixed city: {} -> {}", band.name, city);
            }
        }
        if let Some(county) = best_county {
            if band.county.as_deref() != Some(county) {
                band.county = Some(county.to_string());
                fixed += 1;
                println!("  Fixed county: {} -> {}", band.name, county);
            }
        }
    }

    fixed
}

fn print_location_stats(bands: &[Band]) {
    let mut city_counts: HashMap<&str, usize> = HashMap::new();
    let mut county_counts: HashMap<&str, usize> = HashMap::new();

    for band in bands {
        if let Some(city) = &band.city {
            *city_counts.entry(city).or_default() += 1;
        }
        if let Some(county) = &band.county {
            *county_counts.entry(county).or_default() += 1;
        }
    }

    let mut cities: Vec<_> = city_counts.into_iter().collect();
    cities.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    println!("\n🏙️ Top Cities in Fixed Data:");
    for (city, count) in cities.into_iter().take(10) {
        println!("  {}: {} bands", city, count);
    }

    let mut counties: Vec<_> = county_counts.into_iter().collect();
    counties.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    println!("\n🏞️ Top Counties in Fixed Data:");
    for (county, count) in counties.into_iter().take(5) {
        println!("  {}: {} bands", county, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_rewrites_nonstandard_city_text() {
        let mut bands = vec![Band {
            name: "The Scratch".to_string(),
            city: Some("dublin 2".to_string()),
            ..Default::default()
        }];
        let fixed = fix_band_locations(&mut bands);
        assert_eq!(fixed, 1);
        assert_eq!(bands[0].city.as_deref(), Some("Dublin"));
    }

    #[test]
    fn test_fix_takes_city_from_band_name() {
        let mut bands = vec![Band {
            name: "Cork City Firkin Crane".to_string(),
            ..Default::default()
        }];
        fix_band_locations(&mut bands);
        assert_eq!(bands[0].city.as_deref(), Some("Cork"));
    }

    #[test]
    fn test_fix_fills_county_from_county_text() {
        let mut bands = vec![Band {
            name: "Inland Sea".to_string(),
            county: Some("Co. Wicklow".to_string()),
            ..Default::default()
        }];
        let fixed = fix_band_locations(&mut bands);
        assert_eq!(fixed, 1);
        assert_eq!(bands[0].county.as_deref(), Some("Wicklow"));
    }

    #[test]
    fn test_fix_leaves_canonical_data_untouched() {
        let mut bands = vec![Band {
            name: "Aslan".to_string(),
            city: Some("Dublin".to_string()),
            county: Some("Dublin".to_string()),
            ..Default::default()
        }];
        let fixed = fix_band_locations(&mut bands);
        assert_eq!(fixed, 0);
    }
}
