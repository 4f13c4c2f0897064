//! Flood-risk classification and the strategy that produces it

use async_trait::async_trait;
use segurmaps_client::SegurmapsClient;
use serde::Serialize;
use tracing::{debug, warn};

use crate::providers::{FloodRiskLookup, ProviderError};
use crate::types::Coordinates;

/// Code used when no live risk service is configured
pub const DEFAULT_FIXED_RISK_CODE: u8 = 3;

const UNKNOWN_LABEL: &str = "unknown";

/// CIRAC ordinal flood-risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    VeryLow = 1,
    Low = 2,
    Moderate = 3,
    High = 4,
    VeryHigh = 5,
}

impl RiskLevel {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::VeryLow),
            2 => Some(Self::Low),
            3 => Some(Self::Moderate),
            4 => Some(Self::High),
            5 => Some(Self::VeryHigh),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "very low",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::VeryHigh => "very high",
        }
    }
}

/// Risk code plus its label; `code` is `None` when the level is unknown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskClassification {
    pub code: Option<u8>,
    pub label: String,
}

impl RiskClassification {
    /// Classify a raw code, mapping anything outside 1–5 to "unknown"
    pub fn from_code(code: Option<u8>) -> Self {
        match code.and_then(RiskLevel::from_code) {
            Some(level) => level.into(),
            None => Self::unknown(),
        }
    }

    pub fn unknown() -> Self {
        Self {
            code: None,
            label: UNKNOWN_LABEL.to_string(),
        }
    }

    pub fn level(&self) -> Option<RiskLevel> {
        self.code.and_then(RiskLevel::from_code)
    }
}

impl From<RiskLevel> for RiskClassification {
    fn from(level: RiskLevel) -> Self {
        Self {
            code: Some(level.code()),
            label: level.label().to_string(),
        }
    }
}

/// How flood risk is obtained: a live point query or a constant
pub enum FloodRiskStrategy {
    Live(SegurmapsClient),
    Fixed(RiskLevel),
}

impl FloodRiskStrategy {
    /// Constant "moderate" classification
    pub fn fixed_default() -> Self {
        Self::Fixed(RiskLevel::Moderate)
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Self::Live(_) => "live",
            Self::Fixed(_) => "fixed",
        }
    }
}

#[async_trait]
impl FloodRiskLookup for FloodRiskStrategy {
    async fn classify(&self, at: Coordinates) -> Result<RiskClassification, ProviderError> {
        match self {
            Self::Live(client) => {
                let ridx = client.risk_index(at.latitude, at.longitude).await?;
                let classification = RiskClassification::from_code(ridx);
                if classification.code.is_none() {
                    warn!(lat = at.latitude, lon = at.longitude, ridx = ?ridx, "Unknown flood-risk code");
                }
                Ok(classification)
            }
            Self::Fixed(level) => {
                debug!(code = level.code(), "Using fixed flood-risk level");
                Ok((*level).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_for_every_code() {
        let labels: Vec<String> = (1..=5)
            .map(|code| RiskClassification::from_code(Some(code)).label)
            .collect();
        assert_eq!(labels, ["very low", "low", "moderate", "high", "very high"]);
    }

    #[test]
    fn test_out_of_range_codes_are_unknown() {
        for code in [Some(0), Some(6), Some(255), None] {
            let classification = RiskClassification::from_code(code);
            assert_eq!(classification, RiskClassification::unknown());
            assert!(classification.level().is_none());
        }
    }

    #[tokio::test]
    async fn test_fixed_strategy_returns_constant() {
        let strategy = FloodRiskStrategy::fixed_default();
        let classification = strategy
            .classify(Coordinates::new(38.7, -9.1))
            .await
            .unwrap();
        assert_eq!(classification.code, Some(DEFAULT_FIXED_RISK_CODE));
        assert_eq!(classification.label, "moderate");
        assert_eq!(strategy.mode(), "fixed");
    }
}
