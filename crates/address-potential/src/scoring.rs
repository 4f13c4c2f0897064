//! Development-potential score
//!
//! Three raw signals are min-max normalized against fixed bounds, the risk and
//! density terms are inverted (more of either lowers potential), and the
//! results are combined with fixed weights that sum to 1. The score therefore
//! always lies in `[0, 1]`.

use serde::Serialize;

use crate::risk::RiskLevel;
use crate::types::Tier;

/// Resident population bounds (smallest and largest municipality)
pub const POPULATION_BOUNDS: (f64, f64) = (384.0, 545_796.0);
pub const RISK_BOUNDS: (f64, f64) = (1.0, 5.0);
pub const RESIDENTS_PER_POI_BOUNDS: (f64, f64) = (0.0, 2000.0);

pub const POPULATION_WEIGHT: f64 = 0.4;
pub const RISK_WEIGHT: f64 = 0.3;
pub const DENSITY_WEIGHT: f64 = 0.3;

/// Lowest score that is MEDIUM
pub const MEDIUM_THRESHOLD: f64 = 0.33;
/// Lowest score that is HIGH
pub const HIGH_THRESHOLD: f64 = 0.66;

/// Normalized inputs and the weighted score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub residents_per_poi: f64,
    pub population_norm: f64,
    pub risk_norm: f64,
    pub density_norm: f64,
    pub score: f64,
}

/// `(x - lo) / (hi - lo)` clamped to `[0, 1]`; 0 for a degenerate range
pub fn min_max_scale(x: f64, lo: f64, hi: f64) -> f64 {
    if hi == lo {
        return 0.0;
    }
    ((x - lo) / (hi - lo)).clamp(0.0, 1.0)
}

/// Residents per point of interest
///
/// The denominator is always `poi_count + 1`, so zero POIs yields the
/// population itself.
pub fn residents_per_poi(population: u64, poi_count: usize) -> f64 {
    population as f64 / (poi_count as f64 + 1.0)
}

pub fn score(population: u64, risk: RiskLevel, poi_count: usize) -> ScoreBreakdown {
    let residents_per_poi = residents_per_poi(population, poi_count);

    let population_norm = min_max_scale(
        population as f64,
        POPULATION_BOUNDS.0,
        POPULATION_BOUNDS.1,
    );
    let risk_norm = min_max_scale(f64::from(risk.code()), RISK_BOUNDS.0, RISK_BOUNDS.1);
    let density_norm = min_max_scale(
        residents_per_poi,
        RESIDENTS_PER_POI_BOUNDS.0,
        RESIDENTS_PER_POI_BOUNDS.1,
    );

    let score = POPULATION_WEIGHT * population_norm
        + RISK_WEIGHT * (1.0 - risk_norm)
        + DENSITY_WEIGHT * (1.0 - density_norm);

    ScoreBreakdown {
        residents_per_poi,
        population_norm,
        risk_norm,
        density_norm,
        score,
    }
}

impl Tier {
    pub fn from_score(score: f64) -> Self {
        if score < MEDIUM_THRESHOLD {
            Tier::Low
        } else if score < HIGH_THRESHOLD {
            Tier::Medium
        } else {
            Tier::High
        }
    }
}
