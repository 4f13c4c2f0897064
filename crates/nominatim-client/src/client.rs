use std::time::Duration;

use tracing::{debug, warn};

use crate::error::NominatimError;
use crate::types::{NominatimResponse, SearchResult};

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_USER_AGENT: &str = "nominatim-client-rs/0.1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Nominatim geocoding client
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    /// Create a new client with default settings
    pub fn new() -> crate::Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a new client with a custom Nominatim URL
    pub fn with_base_url(base_url: &str) -> crate::Result<Self> {
        Self::with_options(
            base_url,
            DEFAULT_USER_AGENT,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a new client with a custom Nominatim URL, user agent and request timeout
    ///
    /// The public instance rejects requests without an identifying user agent.
    pub fn with_options(base_url: &str, user_agent: &str, timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?q={}&format=json",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    /// Free-text search; results are returned in Nominatim's ranking order
    pub async fn search(&self, query: &str) -> crate::Result<Vec<SearchResult>> {
        let url = self.search_url(query);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NominatimError::Status(response.status().as_u16()));
        }

        let results: Vec<SearchResult> = response.json().await?;
        debug!(query, matches = results.len(), "Searched address");

        Ok(results)
    }

    /// Reverse geocode coordinates to the name of the containing municipality
    pub async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> crate::Result<Option<String>> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(NominatimError::InvalidCoordinates(latitude, longitude));
        }

        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json&addressdetails=1",
            self.base_url, latitude, longitude
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NominatimError::Status(response.status().as_u16()));
        }

        let data: NominatimResponse = response.json().await?;

        if let Some(ref err) = data.error {
            warn!(lat = latitude, lon = longitude, error = %err, "Nominatim returned error");
            return Ok(None);
        }

        let municipality = parse_municipality(&data);

        debug!(
            lat = latitude,
            lon = longitude,
            municipality = municipality.as_deref().unwrap_or("unknown"),
            "Reverse geocoded coordinates"
        );

        Ok(municipality)
    }
}

/// First non-blank of city, town, village and municipality
fn parse_municipality(data: &NominatimResponse) -> Option<String> {
    let addr = &data.address;
    [&addr.city, &addr.town, &addr.village, &addr.municipality]
        .into_iter()
        .filter_map(|name| name.as_deref())
        .find(|name| !name.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: serde_json::Value) -> Option<String> {
        let data: NominatimResponse = serde_json::from_value(value).unwrap();
        parse_municipality(&data)
    }

    #[test]
    fn test_municipality_prefers_city() {
        let municipality = parse(serde_json::json!({
            "address": {
                "city": "Lisboa",
                "town": "Benfica",
                "country": "Portugal",
                "country_code": "pt"
            }
        }));
        assert_eq!(municipality.as_deref(), Some("Lisboa"));
    }

    #[test]
    fn test_municipality_falls_back_to_town_then_village() {
        let town = parse(serde_json::json!({ "address": { "town": "Sintra" } }));
        assert_eq!(town.as_deref(), Some("Sintra"));

        let village = parse(serde_json::json!({ "address": { "village": "Azenhas do Mar" } }));
        assert_eq!(village.as_deref(), Some("Azenhas do Mar"));
    }

    #[test]
    fn test_empty_city_falls_through_to_town() {
        let municipality = parse(serde_json::json!({
            "address": { "city": "", "town": "Cascais" }
        }));
        assert_eq!(municipality.as_deref(), Some("Cascais"));
    }

    #[test]
    fn test_missing_address_yields_no_municipality() {
        assert!(parse(serde_json::json!({ "error": "Unable to geocode" })).is_none());
    }

    #[test]
    fn test_search_url_percent_encodes_query() {
        let client = NominatimClient::with_base_url("http://localhost:8080").unwrap();
        assert_eq!(
            client.search_url("Rua Augusta 1, Lisboa & Ç"),
            "http://localhost:8080/search?q=Rua%20Augusta%201%2C%20Lisboa%20%26%20%C3%87&format=json"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = NominatimClient::with_base_url("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
