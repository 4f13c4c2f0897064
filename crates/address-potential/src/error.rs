//! Terminal failures of the pipeline

use serde::Serialize;
use std::fmt;

use crate::types::Coordinates;

/// Pipeline stage that owns a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Geocoder,
    ReverseGeocoder,
    Population,
    FloodRisk,
    Poi,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Geocoder => "geocoder",
            Stage::ReverseGeocoder => "reverse_geocoder",
            Stage::Population => "population",
            Stage::FloodRisk => "flood_risk",
            Stage::Poi => "poi",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    GeocodeFailure,
    ReverseGeocodeFailure,
    DataFetchFailure,
}

/// A stage failed; nothing after it ran
#[derive(Debug, Clone)]
pub enum AnalysisError {
    /// Address blank, unmatched, malformed upstream data, or service unreachable
    Geocode { message: String },
    /// No municipality for the coordinates
    ReverseGeocode {
        coordinates: Coordinates,
        message: String,
    },
    /// Population dataset, flood-risk service or POI service unreachable
    DataFetch {
        stage: Stage,
        coordinates: Coordinates,
        municipality: String,
        message: String,
    },
}

impl AnalysisError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Geocode { .. } => FailureKind::GeocodeFailure,
            Self::ReverseGeocode { .. } => FailureKind::ReverseGeocodeFailure,
            Self::DataFetch { .. } => FailureKind::DataFetchFailure,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            Self::Geocode { .. } => Stage::Geocoder,
            Self::ReverseGeocode { .. } => Stage::ReverseGeocoder,
            Self::DataFetch { stage, .. } => *stage,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Geocode { message }
            | Self::ReverseGeocode { message, .. }
            | Self::DataFetch { message, .. } => message,
        }
    }

    /// Coordinates resolved before the failure, if any
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Self::Geocode { .. } => None,
            Self::ReverseGeocode { coordinates, .. } | Self::DataFetch { coordinates, .. } => {
                Some(*coordinates)
            }
        }
    }

    /// Municipality resolved before the failure, if any
    pub fn municipality(&self) -> Option<&str> {
        match self {
            Self::DataFetch { municipality, .. } => Some(municipality),
            _ => None,
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geocode { message } => write!(f, "Geocoding failed: {message}"),
            Self::ReverseGeocode { message, .. } => {
                write!(f, "Municipality lookup failed: {message}")
            }
            Self::DataFetch { stage, message, .. } => {
                write!(f, "Data fetch failed ({stage}): {message}")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}
