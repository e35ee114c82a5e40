//! Writing the import batch to disk and summarizing the run.
//!
//! Plain file writes, no retries: actually loading the NDJSON into the
//! store is a separate out-of-process step.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use crate::domain::{DuplicateEntry, EntityKind};
use crate::error::Result;

/// Band names surfaced in the run summary when they appear in a batch.
const FAMOUS_BANDS: [&str; 8] = [
    "u2",
    "the cranberries",
    "thin lizzy",
    "the dubliners",
    "westlife",
    "boyzone",
    "the corrs",
    "clannad",
];

/// Paths of the files written for one batch.
#[derive(Debug)]
pub struct ImportFiles {
    pub ndjson: PathBuf,
    pub review: PathBuf,
}

/// Writes the NDJSON import file and the pretty-printed review copy.
pub fn write_import_files(data_dir: &Path, kind: EntityKind, docs: &[Value]) -> Result<ImportFiles> {
    let ndjson = data_dir.join(format!("{}_import.ndjson", kind.file_stem()));
    let review = data_dir.join(format!("{}_sanity_format.json", kind.file_stem()));

    let mut lines = Vec::with_capacity(docs.len());
    for doc in docs {
        lines.push(serde_json::to_string(doc)?);
    }
    fs::write(&ndjson, lines.join("\n"))?;
    fs::write(&review, serde_json::to_string_pretty(&docs)?)?;

    info!(count = docs.len(), path = %ndjson.display(), "wrote import files");
    println!("📁 Created import files:");
    println!("   📄 {} ({} {})", ndjson.display(), docs.len(), kind);
    println!("   📄 {} (human-readable)", review.display());

    Ok(ImportFiles { ndjson, review })
}

/// Writes the duplicates report. Nothing is written for a clean batch.
pub fn write_duplicates_report(
    data_dir: &Path,
    kind: EntityKind,
    dropped: &[DuplicateEntry],
) -> Result<Option<PathBuf>> {
    if dropped.is_empty() {
        return Ok(None);
    }
    let path = data_dir.join(format!("{}_duplicates_report.json", kind.file_stem()));
    fs::write(&path, serde_json::to_string_pretty(dropped)?)?;
    println!("📋 Duplicate report saved to: {}", path.display());
    Ok(Some(path))
}

/// Record counts at each stage of a run.
#[derive(Debug, Clone, Copy)]
pub struct StageCounts {
    pub scraped: usize,
    pub after_dedupe: usize,
    pub already_in_store: usize,
    pub ready: usize,
}

/// Prints the end-of-run summary with per-city/per-type breakdowns.
pub fn print_summary(kind: EntityKind, counts: StageCounts, docs: &[Value]) {
    println!("\n📊 IMPORT SUMMARY");
    println!("=================");
    println!("Total scraped {}: {}", kind, counts.scraped);
    println!("After deduplication: {}", counts.after_dedupe);
    println!("Already in Sanity: {}", counts.already_in_store);
    println!("Ready to import: {}", counts.ready);

    match kind {
        EntityKind::Venue => print_venue_breakdown(docs),
        EntityKind::Band => print_band_breakdown(docs),
        EntityKind::Studio => print_studio_breakdown(docs),
    }
}

fn sorted_desc(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut entries: Vec<_> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

fn print_venue_breakdown(docs: &[Value]) {
    let mut city_counts: HashMap<String, usize> = HashMap::new();
    let mut type_counts: HashMap<String, usize> = HashMap::new();

    for doc in docs {
        let city = doc["address"]["city"].as_str().unwrap_or("Unknown");
        *city_counts.entry(city.to_string()).or_default() += 1;
        let venue_type = doc["venueType"].as_str().unwrap_or("other");
        *type_counts.entry(venue_type.to_string()).or_default() += 1;
    }

    println!("\n🏙️  By City:");
    for (city, count) in sorted_desc(city_counts).into_iter().take(10) {
        println!("   {}: {}", city, count);
    }

    println!("\n🎭 By Type:");
    for (venue_type, count) in sorted_desc(type_counts) {
        println!("   {}: {}", venue_type, count);
    }
}

fn print_band_breakdown(docs: &[Value]) {
    let active = docs
        .iter()
        .filter(|d| d["isActive"].as_bool().unwrap_or(true))
        .count();
    let with_genres = docs
        .iter()
        .filter(|d| d["musicDetails"]["genres"].is_array())
        .count();
    let with_contact = docs.iter().filter(|d| d["contact"].is_object()).count();

    println!("\n📈 Band Statistics:");
    println!("   Active bands: {}", active);
    println!("   Bands with genres: {}", with_genres);
    println!("   Bands with contact info: {}", with_contact);

    let famous: Vec<&str> = docs
        .iter()
        .filter_map(|d| d["name"].as_str())
        .filter(|name| FAMOUS_BANDS.contains(&name.to_lowercase().as_str()))
        .collect();
    if !famous.is_empty() {
        println!("\n🌟 Famous bands included:");
        for name in famous.iter().take(10) {
            println!("   • {}", name);
        }
    }
}

fn print_studio_breakdown(docs: &[Value]) {
    let with_location = docs.iter().filter(|d| d["location"].is_object()).count();
    let with_contact = docs.iter().filter(|d| d["contact"].is_object()).count();
    let with_pricing = docs.iter().filter(|d| d["pricing"].is_object()).count();

    println!("\n📈 Studio Statistics:");
    println!("   Studios with locations: {}", with_location);
    println!("   Studios with contact info: {}", with_contact);
    println!("   Studios with pricing: {}", with_pricing);
}
