//! Overpass API HTTP client

use crate::error::{OverpassError, Result};
use crate::query::tagged_around_query;
use crate::types::{Element, OverpassResponse};
use std::time::Duration;
use tracing::{debug, warn};

/// Client for an Overpass API interpreter endpoint
pub struct OverpassClient {
    http: reqwest::Client,
    interpreter_url: String,
}

impl OverpassClient {
    /// Public interpreter run by the Overpass maintainers
    pub const DEFAULT_INTERPRETER_URL: &'static str = "https://overpass-api.de/api/interpreter";

    /// Create a client against the public interpreter (30 second timeout)
    pub fn new() -> Result<Self> {
        Self::with_options(Self::DEFAULT_INTERPRETER_URL, Duration::from_secs(30))
    }

    /// Create a client against a custom interpreter URL with a custom timeout
    pub fn with_options(interpreter_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            interpreter_url: interpreter_url.to_string(),
        })
    }

    /// Run a raw Overpass QL query
    ///
    /// The query must request `[out:json]`.
    pub async fn interpret(&self, query: &str) -> Result<OverpassResponse> {
        let response = self
            .http
            .post(&self.interpreter_url)
            .body(query.to_string())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OverpassError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        let data: OverpassResponse = serde_json::from_slice(&body)?;

        if let Some(ref remark) = data.remark {
            warn!(remark = %remark, "Overpass returned a remark; results may be partial");
        }

        Ok(data)
    }

    /// All elements tagged with `tag` within `radius_m` meters of the point
    ///
    /// # Arguments
    /// * `tag` - OSM tag key that must be present (e.g. "amenity")
    /// * `latitude`, `longitude` - Search center
    /// * `radius_m` - Search radius in meters
    pub async fn around(
        &self,
        tag: &str,
        latitude: f64,
        longitude: f64,
        radius_m: u32,
    ) -> Result<Vec<Element>> {
        let query = tagged_around_query(tag, latitude, longitude, radius_m);
        let data = self.interpret(&query).await?;

        debug!(
            lat = latitude,
            lon = longitude,
            radius_m,
            elements = data.elements.len(),
            "Overpass query complete"
        );

        Ok(data.elements)
    }
}
