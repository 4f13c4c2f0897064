//! Value types produced by one run of the pipeline

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::risk::RiskClassification;
use crate::scoring::ScoreBreakdown;

/// WGS84 position
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Row of the population reference dataset that matched a municipality
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationRecord {
    pub municipality: String,
    pub population: u64,
}

/// Named amenity near the analysed address
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Output of the POI counter
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoiSummary {
    pub count: usize,
    pub locations: Vec<PointOfInterest>,
    pub category_counts: BTreeMap<String, usize>,
}

/// Three-tier development potential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Low => "LOW",
            Tier::Medium => "MEDIUM",
            Tier::High => "HIGH",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything gathered about an address before scoring
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteFacts {
    pub address: String,
    pub coordinates: Coordinates,
    pub municipality: String,
    pub population: Option<u64>,
    pub risk: RiskClassification,
    pub pois: PoiSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredAnalysis {
    #[serde(flatten)]
    pub facts: SiteFacts,
    pub tier: Tier,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Why scoring was skipped even though every lookup answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InconclusiveReason {
    PopulationNotFound,
    PopulationNotNumeric,
    RiskUnknown,
}

impl InconclusiveReason {
    pub fn description(&self) -> &'static str {
        match self {
            Self::PopulationNotFound => "the municipality is not in the population dataset",
            Self::PopulationNotNumeric => "the population dataset holds a non-numeric value for the municipality",
            Self::RiskUnknown => "no flood-risk classification is available at this location",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InconclusiveAnalysis {
    #[serde(flatten)]
    pub facts: SiteFacts,
    pub reason: InconclusiveReason,
}

/// Non-failure outcome of `analyze`
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Analysis {
    Scored(ScoredAnalysis),
    Inconclusive(InconclusiveAnalysis),
}

impl Analysis {
    pub fn facts(&self) -> &SiteFacts {
        match self {
            Analysis::Scored(scored) => &scored.facts,
            Analysis::Inconclusive(inconclusive) => &inconclusive.facts,
        }
    }

    pub fn tier(&self) -> Option<Tier> {
        match self {
            Analysis::Scored(scored) => Some(scored.tier),
            Analysis::Inconclusive(_) => None,
        }
    }

    /// One-line human-readable result
    pub fn summary(&self) -> String {
        match self {
            Analysis::Scored(scored) => {
                let facts = &scored.facts;
                let level = facts
                    .risk
                    .code
                    .map(|code| format!(" (level {code})"))
                    .unwrap_or_default();
                format!(
                    "The address ({}) has {} development potential: {} residents live in {}, \
                     the flood risk is {}{}, and there are {} points of interest within {} m.",
                    facts.address,
                    scored.tier,
                    facts.population.unwrap_or_default(),
                    facts.municipality,
                    facts.risk.label,
                    level,
                    facts.pois.count,
                    crate::poi::SEARCH_RADIUS_M,
                )
            }
            Analysis::Inconclusive(inconclusive) => format!(
                "The analysis could not be completed: {}.",
                inconclusive.reason.description()
            ),
        }
    }
}
