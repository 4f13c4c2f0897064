//! Address development-potential service
//!
//! Geocodes an address, gathers population, flood-risk and amenity signals
//! around it, and returns a LOW / MEDIUM / HIGH potential tier over HTTP.

mod config;
mod error;
mod server;

use crate::config::{Config, ReverseGeocoderKind, RiskMode};
use crate::error::{Result, ServiceError};
use crate::server::{start_server, ServerState, SharedState};
use address_potential::{Analyzer, FloodRiskStrategy, HttpPopulationSource, ReverseGeocoder};
use bigdatacloud_client::BigDataCloudClient;
use nominatim_client::NominatimClient;
use overpass_client::OverpassClient;
use segurmaps_client::{SegurmapsClient, SegurmapsOptions};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter =
        EnvFilter::from_default_env().add_directive("address_potential=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting address potential service...");

    let config = Config::from_env()?;
    info!("Port: {}", config.port);
    info!("Reverse geocoder: {:?}", config.reverse_geocoder);
    info!("Risk mode: {:?}", config.risk_mode);
    info!("Request timeout: {:?}", config.request_timeout);

    let analyzer = build_analyzer(&config)?;
    let risk_mode = match config.risk_mode {
        RiskMode::Live => "live",
        RiskMode::Fixed => "fixed",
    };

    // Create shared state
    let state: SharedState = Arc::new(ServerState::new(analyzer, risk_mode));

    // Start HTTP server (blocking)
    start_server(state, config.port).await?;

    Ok(())
}

/// Wire the live upstream clients into an [`Analyzer`]
fn build_analyzer(config: &Config) -> Result<Analyzer> {
    let timeout = config.request_timeout;

    let nominatim = Arc::new(NominatimClient::with_options(
        &config.nominatim_url,
        &config.user_agent,
        timeout,
    )?);

    let reverse_geocoder: Arc<dyn ReverseGeocoder> = match config.reverse_geocoder {
        ReverseGeocoderKind::Nominatim => nominatim.clone(),
        ReverseGeocoderKind::BigDataCloud => Arc::new(BigDataCloudClient::with_options(
            &config.bigdatacloud_url,
            &config.reverse_geocode_language,
            timeout,
        )?),
    };

    let flood_risk = match config.risk_mode {
        RiskMode::Fixed => FloodRiskStrategy::Fixed(config.fixed_risk),
        RiskMode::Live => {
            let token = config.segurmaps.token.as_deref().ok_or_else(|| {
                ServiceError::Config("SEGURMAPS_TOKEN is required when RISK_MODE=live".to_string())
            })?;
            let options = SegurmapsOptions {
                base_url: config.segurmaps.url.clone(),
                map_id: config.segurmaps.map_id,
                accept_invalid_certs: config.segurmaps.accept_invalid_certs,
                timeout,
                ..SegurmapsOptions::new(token)
            };
            FloodRiskStrategy::Live(SegurmapsClient::new(&options)?)
        }
    };

    let population = HttpPopulationSource::new(&config.population_csv_url, timeout)?;
    let pois = OverpassClient::with_options(&config.overpass_url, timeout)?;

    Ok(Analyzer::new(
        nominatim,
        reverse_geocoder,
        Arc::new(population),
        Arc::new(flood_risk),
        Arc::new(pois),
    ))
}
