//! Resident population reference dataset
//!
//! The dataset is a CSV where column index 1 holds the municipality name and
//! column index 2 its resident count. A header row is read as ordinary data;
//! it never equals a real municipality name.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::providers::{PopulationSource, ProviderError};
use crate::types::PopulationRecord;

/// Published CSV export of the municipality population sheet
pub const DEFAULT_POPULATION_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vR0A79pNYNO4YD-jhyZ4baNjHsGZCsAyTgVlZgaoSGdKN_ehlS5fUnwmESyknqyy-Wf9-30OnjdCR3I/pub?gid=0&single=true&output=csv";

const MUNICIPALITY_COLUMN: usize = 1;
const POPULATION_COLUMN: usize = 2;

/// Result of looking a municipality up in the dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopulationLookup {
    Found(PopulationRecord),
    NotFound,
    /// The matching row's population cell is not an integer
    NotNumeric(String),
}

/// Raw rows of the reference dataset, in file order
#[derive(Debug, Clone, Default)]
pub struct PopulationDataset {
    rows: Vec<Vec<String>>,
}

impl PopulationDataset {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Parse CSV text; rows may have differing column counts
    pub fn from_csv(text: &str) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row whose municipality column equals `municipality` exactly
    pub fn lookup(&self, municipality: &str) -> PopulationLookup {
        let matched = self.rows.iter().find_map(|row| {
            let name = row.get(MUNICIPALITY_COLUMN)?;
            let population = row.get(POPULATION_COLUMN)?;
            (name == municipality).then_some((name, population))
        });

        let Some((name, raw)) = matched else {
            return PopulationLookup::NotFound;
        };

        match parse_population(raw) {
            Some(population) => PopulationLookup::Found(PopulationRecord {
                municipality: name.clone(),
                population,
            }),
            None => PopulationLookup::NotNumeric(raw.clone()),
        }
    }
}

/// Parse a resident count, ignoring `,` thousands separators
pub fn parse_population(raw: &str) -> Option<u64> {
    let digits: String = raw.trim().chars().filter(|c| *c != ',').collect();
    digits.parse().ok()
}

/// Downloads the dataset over HTTP on every call
pub struct HttpPopulationSource {
    http: reqwest::Client,
    url: String,
}

impl HttpPopulationSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl PopulationSource for HttpPopulationSource {
    async fn load(&self) -> Result<PopulationDataset, ProviderError> {
        let response = self.http.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(format!("population dataset returned status {}", response.status()).into());
        }

        let text = response.text().await?;
        let dataset = PopulationDataset::from_csv(&text)?;
        debug!(rows = dataset.len(), "Loaded population dataset");

        Ok(dataset)
    }
}
