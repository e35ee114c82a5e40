use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use tempfile::tempdir;

use ims_importer::app::{FixLocationsUseCase, ImportOptions, ImportUseCase};
use ims_importer::config::{Config, ImporterConfig, SanityConfig};
use ims_importer::domain::{Band, DuplicateEntry, EntityKind};
use ims_importer::pipeline::existing::{ExistingRecordSet, ExistingRecords};
use ims_importer::ImporterError;

/// Store stub answering from a fixed name list.
struct StubStore {
    names: Vec<String>,
}

impl StubStore {
    fn with_names(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    fn empty() -> Self {
        Self { names: Vec::new() }
    }
}

#[async_trait]
impl ExistingRecords for StubStore {
    async fn fetch(&self, _kind: EntityKind) -> ims_importer::Result<ExistingRecordSet> {
        Ok(ExistingRecordSet::from_names(self.names.iter()))
    }
}

/// Store stub whose query always fails, to exercise the fail-open path.
struct BrokenStore;

#[async_trait]
impl ExistingRecords for BrokenStore {
    async fn fetch(&self, _kind: EntityKind) -> ims_importer::Result<ExistingRecordSet> {
        Err(ImporterError::StoreQuery {
            message: "connection refused".to_string(),
        })
    }
}

fn test_config(data_dir: &Path) -> Config {
    Config {
        sanity: SanityConfig {
            project_id: "testproject".to_string(),
            dataset: "production".to_string(),
            timeout_seconds: 1,
        },
        importer: ImporterConfig {
            data_dir: data_dir.to_path_buf(),
        },
    }
}

fn write_input(data_dir: &Path, file: &str, records: &Value) -> PathBuf {
    let path = data_dir.join(file);
    fs::write(&path, serde_json::to_string_pretty(records).unwrap()).unwrap();
    path
}

fn read_ndjson(path: &Path) -> Vec<Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_venue_batch_end_to_end_dedup() -> Result<()> {
    let dir = tempdir()?;
    let config = test_config(dir.path());

    // Records 1-2 share a website, 3-4 share rounded coordinates, 5-6 are
    // unique: four survivors and a two-entry report expected
    let venues = json!([
        {"name": "The Grand Social", "website": "https://thegrandsocial.ie"},
        {"name": "Grand Social Bar", "website": "http://thegrandsocial.ie/"},
        {"name": "Cyprus Avenue", "latitude": 51.898, "longitude": -8.473},
        {"name": "The Old Oak", "latitude": 51.8981, "longitude": -8.4729},
        {"name": "Whelan's", "city": "Dublin"},
        {"name": "Roisin Dubh", "city": "Galway"}
    ]);
    write_input(dir.path(), "irish_venues_data.json", &venues);

    let store = StubStore::empty();
    let importer = ImportUseCase::new(&config, &store);
    importer.run_venues(&ImportOptions::default()).await?;

    let docs = read_ndjson(&dir.path().join("venues_import.ndjson"));
    assert_eq!(docs.len(), 4);
    let names: Vec<&str> = docs.iter().map(|d| d["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["The Grand Social", "Cyprus Avenue", "Whelan's", "Roisin Dubh"]
    );

    let report: Vec<DuplicateEntry> = serde_json::from_str(&fs::read_to_string(
        dir.path().join("venues_duplicates_report.json"),
    )?)?;
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].name, "Grand Social Bar");
    assert_eq!(report[0].reason, "same website");
    assert_eq!(report[1].name, "The Old Oak");
    assert_eq!(report[1].reason, "same location");

    // The review copy holds the same four documents as a JSON array
    let review: Vec<Value> = serde_json::from_str(&fs::read_to_string(
        dir.path().join("venues_sanity_format.json"),
    )?)?;
    assert_eq!(review.len(), 4);

    Ok(())
}

#[tokio::test]
async fn test_existing_store_filtering_is_fuzzy() -> Result<()> {
    let dir = tempdir()?;
    let config = test_config(dir.path());

    let venues = json!([
        {"name": "Whelans", "city": "Dublin"},
        {"name": "The Workman's Club", "city": "Dublin"}
    ]);
    write_input(dir.path(), "irish_venues_data.json", &venues);

    // "Whelans" is 0.9+ similar to the existing "Whelan's" and must be
    // skipped; the Workman's Club is genuinely new
    let store = StubStore::with_names(&["Whelan's"]);
    let importer = ImportUseCase::new(&config, &store);
    importer.run_venues(&ImportOptions::default()).await?;

    let docs = read_ndjson(&dir.path().join("venues_import.ndjson"));
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["name"], "The Workman's Club");

    Ok(())
}

#[tokio::test]
async fn test_store_failure_fails_open() -> Result<()> {
    let dir = tempdir()?;
    let config = test_config(dir.path());

    let venues = json!([
        {"name": "Dolans", "city": "Limerick"}
    ]);
    write_input(dir.path(), "irish_venues_data.json", &venues);

    let store = BrokenStore;
    let importer = ImportUseCase::new(&config, &store);
    importer.run_venues(&ImportOptions::default()).await?;

    // The batch proceeds unfiltered despite the query failure
    let docs = read_ndjson(&dir.path().join("venues_import.ndjson"));
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["name"], "Dolans");

    Ok(())
}

#[tokio::test]
async fn test_missing_input_is_fatal() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());

    let store = StubStore::empty();
    let importer = ImportUseCase::new(&config, &store);
    let err = importer
        .run_venues(&ImportOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ImporterError::MissingInput(_)));
}

#[tokio::test]
async fn test_band_batch_identifier_dedup_and_documents() -> Result<()> {
    let dir = tempdir()?;
    let config = test_config(dir.path());

    let bands = json!([
        {
            "name": "The Frames",
            "musicbrainzId": "4d9df9e3",
            "city": "Dublin",
            "musicGenres": ["rock", "folk"],
            "formedYear": 1990
        },
        {"name": "Frames, The", "musicbrainzId": "4d9df9e3"},
        {"name": "Kneecap", "city": "Belfast"}
    ]);
    write_input(dir.path(), "irish_bands_data.json", &bands);

    let store = StubStore::empty();
    let importer = ImportUseCase::new(&config, &store);
    importer
        .run_bands(&ImportOptions {
            skip_existing_check: true,
            ..Default::default()
        })
        .await?;

    let docs = read_ndjson(&dir.path().join("bands_import.ndjson"));
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0]["_id"], "band-the-frames");
    assert_eq!(docs[0]["musicDetails"]["genres"], json!(["rock", "folk"]));
    assert_eq!(docs[1]["location"]["city"], "Belfast");

    let report: Vec<DuplicateEntry> = serde_json::from_str(&fs::read_to_string(
        dir.path().join("bands_duplicates_report.json"),
    )?)?;
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].reason, "same MusicBrainz ID");

    Ok(())
}

#[tokio::test]
async fn test_studio_batch_website_dedup() -> Result<()> {
    let dir = tempdir()?;
    let config = test_config(dir.path());

    let studios = json!([
        {
            "name": "Windmill Lane",
            "contact": {"website": "https://windmilllane.com"},
            "location": {"lat": 53.3442, "lng": -6.2312}
        },
        {
            "name": "Windmill Lane Recording",
            "contact": {"website": "https://windmilllane.com/"}
        },
        {
            "name": "Camden Recording",
            "contact": {"website": "https://camdenrecording.com"},
            "pricing": {"hourlyRate": 45.0}
        }
    ]);
    write_input(dir.path(), "irish_studios_data.json", &studios);

    let store = StubStore::empty();
    let importer = ImportUseCase::new(&config, &store);
    importer
        .run_studios(&ImportOptions {
            skip_existing_check: true,
            ..Default::default()
        })
        .await?;

    let docs = read_ndjson(&dir.path().join("studios_import.ndjson"));
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0]["_type"], "soundStudio");
    assert_eq!(docs[1]["pricing"]["currency"], "EUR");

    Ok(())
}

#[test]
fn test_fix_locations_rewrites_batch() -> Result<()> {
    let dir = tempdir()?;
    let config = test_config(dir.path());

    let bands = json!([
        {"name": "The Scratch", "city": "dublin 8"},
        {"name": "Limerick City Sessions"},
        {"name": "Inland Sea", "county": "Co. Wicklow"}
    ]);
    write_input(dir.path(), "irish_bands_data.json", &bands);

    FixLocationsUseCase::new(&config).run(None)?;

    let fixed: Vec<Band> = serde_json::from_str(&fs::read_to_string(
        dir.path().join("irish_bands_data_fixed.json"),
    )?)?;
    assert_eq!(fixed[0].city.as_deref(), Some("Dublin"));
    assert_eq!(fixed[1].city.as_deref(), Some("Limerick"));
    assert_eq!(fixed[2].county.as_deref(), Some("Wicklow"));

    let docs = read_ndjson(&dir.path().join("bands_import_fixed.ndjson"));
    assert_eq!(docs.len(), 3);
    assert_eq!(docs[0]["location"]["city"], "Dublin");

    let review: Vec<Value> = serde_json::from_str(&fs::read_to_string(
        dir.path().join("bands_for_sanity_fixed.json"),
    )?)?;
    assert_eq!(review.len(), 3);

    Ok(())
}
