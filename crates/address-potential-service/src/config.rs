use std::env;
use std::time::Duration;

use address_potential::{RiskLevel, DEFAULT_FIXED_RISK_CODE, DEFAULT_POPULATION_CSV_URL};

use crate::error::{Result, ServiceError};

/// Which service resolves coordinates to a municipality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReverseGeocoderKind {
    BigDataCloud,
    Nominatim,
}

/// Where flood-risk codes come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskMode {
    Fixed,
    Live,
}

/// SegurMaps connection settings, only used in live risk mode
#[derive(Debug, Clone)]
pub struct SegurmapsConfig {
    pub url: String,
    pub map_id: u32,
    pub token: Option<String>,
    pub accept_invalid_certs: bool,
}

/// Service configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub nominatim_url: String,
    pub reverse_geocoder: ReverseGeocoderKind,
    pub bigdatacloud_url: String,
    pub reverse_geocode_language: String,
    pub population_csv_url: String,
    pub overpass_url: String,
    pub risk_mode: RiskMode,
    pub fixed_risk: RiskLevel,
    pub segurmaps: SegurmapsConfig,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let string_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let port = parse_or(var("PORT"), "PORT", 3005u16)?;
        let timeout_secs = parse_or(var("REQUEST_TIMEOUT_SECS"), "REQUEST_TIMEOUT_SECS", 30u64)?;
        if timeout_secs == 0 {
            return Err(ServiceError::Config(
                "REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let reverse_geocoder = match var("REVERSE_GEOCODER").as_deref() {
            None | Some("bigdatacloud") => ReverseGeocoderKind::BigDataCloud,
            Some("nominatim") => ReverseGeocoderKind::Nominatim,
            Some(other) => {
                return Err(ServiceError::Config(format!(
                    "REVERSE_GEOCODER must be 'bigdatacloud' or 'nominatim', got '{}'",
                    other
                )))
            }
        };

        let risk_mode = match var("RISK_MODE").as_deref() {
            None | Some("fixed") => RiskMode::Fixed,
            Some("live") => RiskMode::Live,
            Some(other) => {
                return Err(ServiceError::Config(format!(
                    "RISK_MODE must be 'fixed' or 'live', got '{}'",
                    other
                )))
            }
        };

        let fixed_code = parse_or(var("FIXED_RISK_CODE"), "FIXED_RISK_CODE", DEFAULT_FIXED_RISK_CODE)?;
        let fixed_risk = RiskLevel::from_code(fixed_code).ok_or_else(|| {
            ServiceError::Config(format!(
                "FIXED_RISK_CODE must be between 1 and 5, got {}",
                fixed_code
            ))
        })?;

        let segurmaps = SegurmapsConfig {
            url: string_or("SEGURMAPS_URL", "https://segurmaps.apseguradores.pt"),
            map_id: parse_or(var("SEGURMAPS_MAP_ID"), "SEGURMAPS_MAP_ID", 36u32)?,
            token: var("SEGURMAPS_TOKEN"),
            accept_invalid_certs: parse_bool(
                var("SEGURMAPS_ACCEPT_INVALID_CERTS"),
                "SEGURMAPS_ACCEPT_INVALID_CERTS",
            )?,
        };

        if risk_mode == RiskMode::Live && segurmaps.token.is_none() {
            return Err(ServiceError::Config(
                "SEGURMAPS_TOKEN is required when RISK_MODE=live".to_string(),
            ));
        }

        Ok(Self {
            port,
            user_agent: string_or("USER_AGENT", "address-potential/0.1"),
            request_timeout: Duration::from_secs(timeout_secs),
            nominatim_url: string_or("NOMINATIM_URL", "https://nominatim.openstreetmap.org"),
            reverse_geocoder,
            bigdatacloud_url: string_or("BIGDATACLOUD_URL", "https://api.bigdatacloud.net"),
            reverse_geocode_language: string_or("REVERSE_GEOCODE_LANGUAGE", "pt"),
            population_csv_url: string_or("POPULATION_CSV_URL", DEFAULT_POPULATION_CSV_URL),
            overpass_url: string_or("OVERPASS_URL", "https://overpass-api.de/api/interpreter"),
            risk_mode,
            fixed_risk,
            segurmaps,
        })
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, key: &str, default: T) -> Result<T> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ServiceError::Config(format!("{} has an invalid value '{}'", key, raw))),
    }
}

fn parse_bool(value: Option<String>, key: &str) -> Result<bool> {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(false),
        Some("1" | "true" | "yes") => Ok(true),
        Some("0" | "false" | "no") => Ok(false),
        Some(other) => Err(ServiceError::Config(format!(
            "{} must be true or false, got '{}'",
            key, other
        ))),
    }
}
