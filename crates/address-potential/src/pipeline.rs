//! Address → development potential

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::error::{AnalysisError, Stage};
use crate::poi::{self, SEARCH_RADIUS_M};
use crate::population::PopulationLookup;
use crate::providers::{
    FloodRiskLookup, Geocoder, PoiSource, PopulationSource, ProviderError, ReverseGeocoder,
};
use crate::scoring;
use crate::types::{
    Analysis, InconclusiveAnalysis, InconclusiveReason, ScoredAnalysis, SiteFacts, Tier,
};

/// Runs the pipeline over injected capabilities
///
/// Holds no per-request state, so one instance can serve concurrent calls.
#[derive(Clone)]
pub struct Analyzer {
    geocoder: Arc<dyn Geocoder>,
    reverse_geocoder: Arc<dyn ReverseGeocoder>,
    population: Arc<dyn PopulationSource>,
    flood_risk: Arc<dyn FloodRiskLookup>,
    pois: Arc<dyn PoiSource>,
}

impl Analyzer {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        reverse_geocoder: Arc<dyn ReverseGeocoder>,
        population: Arc<dyn PopulationSource>,
        flood_risk: Arc<dyn FloodRiskLookup>,
        pois: Arc<dyn PoiSource>,
    ) -> Self {
        Self {
            geocoder,
            reverse_geocoder,
            population,
            flood_risk,
            pois,
        }
    }

    /// Geocode, resolve the municipality, gather population, flood risk and
    /// POIs, then score
    ///
    /// Population, flood risk and POIs are fetched together; when more than
    /// one fails, the first in that order is reported.
    #[instrument(skip(self))]
    pub async fn analyze(&self, address: &str) -> Result<Analysis, AnalysisError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(AnalysisError::Geocode {
                message: "address is empty".to_string(),
            });
        }

        let coordinates = match self.geocoder.geocode(address).await {
            Ok(Some(coordinates)) => coordinates,
            Ok(None) => {
                return Err(AnalysisError::Geocode {
                    message: "no coordinates found for the address".to_string(),
                })
            }
            Err(e) => {
                return Err(AnalysisError::Geocode {
                    message: e.to_string(),
                })
            }
        };
        debug!(lat = coordinates.latitude, lon = coordinates.longitude, "Geocoded address");

        let municipality = match self.reverse_geocoder.municipality(coordinates).await {
            Ok(Some(municipality)) => municipality,
            Ok(None) => {
                return Err(AnalysisError::ReverseGeocode {
                    coordinates,
                    message: "no municipality found for the coordinates".to_string(),
                })
            }
            Err(e) => {
                return Err(AnalysisError::ReverseGeocode {
                    coordinates,
                    message: e.to_string(),
                })
            }
        };
        debug!(municipality = %municipality, "Resolved municipality");

        let (dataset, risk, features) = futures::join!(
            self.population.load(),
            self.flood_risk.classify(coordinates),
            self.pois.amenities_near(coordinates, SEARCH_RADIUS_M),
        );
        let fetch_failed = |stage: Stage, e: ProviderError| AnalysisError::DataFetch {
            stage,
            coordinates,
            municipality: municipality.clone(),
            message: e.to_string(),
        };
        let dataset = dataset.map_err(|e| fetch_failed(Stage::Population, e))?;
        let risk = risk.map_err(|e| fetch_failed(Stage::FloodRisk, e))?;
        let features = features.map_err(|e| fetch_failed(Stage::Poi, e))?;

        let pois = poi::summarize(features);
        debug!(poi_count = pois.count, "Collected points of interest");

        let lookup = dataset.lookup(&municipality);
        let population = match &lookup {
            PopulationLookup::Found(record) => Some(record.population),
            PopulationLookup::NotFound | PopulationLookup::NotNumeric(_) => None,
        };

        let facts = SiteFacts {
            address: address.to_string(),
            coordinates,
            municipality,
            population,
            risk,
            pois,
        };

        Ok(evaluate(facts, &lookup))
    }
}

/// Score the facts, or explain why they cannot be scored
fn evaluate(facts: SiteFacts, lookup: &PopulationLookup) -> Analysis {
    let reason = match (lookup, facts.population, facts.risk.level()) {
        (PopulationLookup::NotNumeric(_), _, _) => InconclusiveReason::PopulationNotNumeric,
        (_, None, _) => InconclusiveReason::PopulationNotFound,
        (_, _, None) => InconclusiveReason::RiskUnknown,
        (_, Some(population), Some(level)) => {
            let breakdown = scoring::score(population, level, facts.pois.count);
            let tier = Tier::from_score(breakdown.score);
            info!(
                municipality = %facts.municipality,
                score = breakdown.score,
                tier = %tier,
                "Scored address"
            );
            return Analysis::Scored(ScoredAnalysis {
                facts,
                tier,
                score: breakdown.score,
                breakdown,
            });
        }
    };

    info!(municipality = %facts.municipality, reason = ?reason, "Analysis inconclusive");
    Analysis::Inconclusive(InconclusiveAnalysis { facts, reason })
}
