//! Development-potential scoring for street addresses
//!
//! An address is geocoded, its municipality resolved, and three signals are
//! gathered around it: the municipality's resident population, the
//! flood-risk class at the point, and the named amenities within 500 m. The
//! signals are normalized and combined into a score in `[0, 1]`, which maps to
//! a LOW / MEDIUM / HIGH tier.
//!
//! Every external lookup sits behind a trait in [`providers`], so the
//! pipeline runs unchanged over live HTTP clients or deterministic stubs.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use address_potential::{Analyzer, FloodRiskStrategy, HttpPopulationSource};
//! use bigdatacloud_client::BigDataCloudClient;
//! use nominatim_client::NominatimClient;
//! use overpass_client::OverpassClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let analyzer = Analyzer::new(
//!     Arc::new(NominatimClient::new()?),
//!     Arc::new(BigDataCloudClient::new()?),
//!     Arc::new(HttpPopulationSource::new(
//!         address_potential::DEFAULT_POPULATION_CSV_URL,
//!         Duration::from_secs(30),
//!     )?),
//!     Arc::new(FloodRiskStrategy::fixed_default()),
//!     Arc::new(OverpassClient::new()?),
//! );
//!
//! let analysis = analyzer.analyze("Praça do Comércio, Lisboa").await?;
//! println!("{}", analysis.summary());
//! # Ok(())
//! # }
//! ```

mod error;
mod pipeline;
pub mod poi;
pub mod population;
pub mod providers;
pub mod risk;
pub mod scoring;
mod types;

pub use error::{AnalysisError, FailureKind, Stage};
pub use pipeline::Analyzer;
pub use poi::{AmenityFeature, SEARCH_RADIUS_M};
pub use population::{
    HttpPopulationSource, PopulationDataset, PopulationLookup, DEFAULT_POPULATION_CSV_URL,
};
pub use providers::{
    FloodRiskLookup, Geocoder, PoiSource, PopulationSource, ProviderError, ReverseGeocoder,
};
pub use risk::{FloodRiskStrategy, RiskClassification, RiskLevel, DEFAULT_FIXED_RISK_CODE};
pub use types::{
    Analysis, Coordinates, InconclusiveAnalysis, InconclusiveReason, PoiSummary,
    PointOfInterest, PopulationRecord, ScoredAnalysis, SiteFacts, Tier,
};
