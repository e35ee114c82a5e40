//! Read-only check against records already imported into the store.
//!
//! One GROQ query per run fetches the names of every document of the
//! relevant type. The check is fail-open: if the query cannot be completed
//! the batch proceeds unfiltered with a warning, never failing closed.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::SanityConfig;
use crate::domain::EntityKind;
use crate::error::Result;
use crate::pipeline::similarity::{normalize_name, similarity};

/// Names within this similarity of an existing record count as already
/// present. Stricter than the intra-batch threshold to keep false positives
/// down against a large corpus.
pub const EXISTING_SIMILARITY_THRESHOLD: f64 = 0.90;

/// Lowercased, trimmed names already present in the store, fetched once per
/// run and used only for membership tests.
#[derive(Debug, Clone, Default)]
pub struct ExistingRecordSet {
    names: HashSet<String>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl ExistingRecordSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| normalize_name(n.as_ref()))
                .filter(|n| !n.is_empty())
                .collect(),
            fetched_at: Some(Utc::now()),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether `name` is already in the store, exactly or within the fuzzy
    /// threshold of an existing name.
    pub fn contains(&self, name: &str) -> bool {
        let name = normalize_name(name);
        if name.is_empty() {
            return false;
        }
        if self.names.contains(&name) {
            return true;
        }
        self.names
            .iter()
            .any(|existing| similarity(&name, existing) >= EXISTING_SIMILARITY_THRESHOLD)
    }
}

/// Source of already-imported record names, stubbed out in tests.
#[async_trait]
pub trait ExistingRecords: Send + Sync {
    async fn fetch(&self, kind: EntityKind) -> Result<ExistingRecordSet>;
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Vec<NamedDocument>,
}

#[derive(Debug, Deserialize)]
struct NamedDocument {
    name: Option<String>,
}

/// Client for the store's query endpoint.
pub struct SanityClient {
    http: reqwest::Client,
    project_id: String,
    dataset: String,
}

impl SanityClient {
    pub fn new(config: &SanityConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            project_id: config.project_id.clone(),
            dataset: config.dataset.clone(),
        })
    }

    fn query_url(&self) -> String {
        format!(
            "https://{}.api.sanity.io/v2021-10-21/data/query/{}",
            self.project_id, self.dataset
        )
    }
}

#[async_trait]
impl ExistingRecords for SanityClient {
    async fn fetch(&self, kind: EntityKind) -> Result<ExistingRecordSet> {
        let query = format!("*[_type == \"{}\"]{{name, slug}}", kind.type_name());
        let response = self
            .http
            .get(self.query_url())
            .query(&[("query", query.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body: QueryResponse = response.json().await?;
        let set = ExistingRecordSet::from_names(
            body.result.iter().filter_map(|doc| doc.name.as_deref()),
        );
        Ok(set)
    }
}

/// Fetches the existing-name set, degrading to an empty set on any failure.
pub async fn fetch_existing(source: &dyn ExistingRecords, kind: EntityKind) -> ExistingRecordSet {
    match source.fetch(kind).await {
        Ok(set) => {
            info!(kind = %kind, count = set.len(), "fetched existing records from store");
            println!("📋 Found {} existing {} in Sanity", set.len(), kind);
            set
        }
        Err(err) => {
            warn!(kind = %kind, error = %err, "existing-record query failed, proceeding unfiltered");
            println!("⚠️  Could not fetch existing {} ({}), proceeding without the check", kind, err);
            ExistingRecordSet::empty()
        }
    }
}
