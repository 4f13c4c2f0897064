//! BigDataCloud reverse geocoding client
//!
//! Wraps the keyless `reverse-geocode-client` endpoint, which resolves a
//! coordinate pair to the name of the containing city.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.bigdatacloud.net";
const DEFAULT_LANGUAGE: &str = "en";

/// Reverse geocoding answer, reduced to the city name
///
/// The service returns empty strings rather than omitting fields it could not
/// resolve; [`ReverseGeocode::city_name`] normalizes that.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseGeocode {
    #[serde(default)]
    pub city: Option<String>,
}

impl ReverseGeocode {
    /// City name, or `None` when absent or blank
    pub fn city_name(&self) -> Option<&str> {
        self.city
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Errors from the BigDataCloud client
#[derive(Debug)]
pub enum BigDataCloudError {
    Http(reqwest::Error),
    /// Non-success HTTP status from the service
    Status(u16),
}

impl fmt::Display for BigDataCloudError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "BigDataCloud HTTP error: {e}"),
            Self::Status(code) => write!(f, "BigDataCloud returned status {code}"),
        }
    }
}

impl std::error::Error for BigDataCloudError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Status(_) => None,
        }
    }
}

impl From<reqwest::Error> for BigDataCloudError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

pub type Result<T> = std::result::Result<T, BigDataCloudError>;

/// Client for `GET /data/reverse-geocode-client`
pub struct BigDataCloudClient {
    http: reqwest::Client,
    base_url: String,
    language: String,
}

impl BigDataCloudClient {
    /// Create a client against the public endpoint with a 30 second timeout
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_BASE_URL, DEFAULT_LANGUAGE, Duration::from_secs(30))
    }

    /// Create a client with a custom base URL, locality language and timeout
    pub fn with_options(base_url: &str, language: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        })
    }

    fn reverse_geocode_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/data/reverse-geocode-client?latitude={}&longitude={}&localityLanguage={}",
            self.base_url,
            latitude,
            longitude,
            urlencoding::encode(&self.language)
        )
    }

    /// Resolve coordinates to their city
    pub async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<ReverseGeocode> {
        let url = self.reverse_geocode_url(latitude, longitude);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(BigDataCloudError::Status(response.status().as_u16()));
        }

        let data: ReverseGeocode = response.json().await?;
        debug!(
            lat = latitude,
            lon = longitude,
            city = data.city_name().unwrap_or("unknown"),
            "Reverse geocoded coordinates"
        );

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_geocode_url() {
        let client =
            BigDataCloudClient::with_options("http://localhost:9000/", "pt", Duration::from_secs(5))
                .unwrap();
        assert_eq!(
            client.reverse_geocode_url(38.72, -9.14),
            "http://localhost:9000/data/reverse-geocode-client?latitude=38.72&longitude=-9.14&localityLanguage=pt"
        );
    }

    #[test]
    fn test_deserialize_response() {
        let data: ReverseGeocode = serde_json::from_value(serde_json::json!({
            "latitude": 38.72,
            "longitude": -9.14,
            "city": "Lisboa",
            "locality": "Arroios",
            "principalSubdivision": "Lisboa",
            "countryName": "Portugal",
            "countryCode": "PT"
        }))
        .unwrap();
        assert_eq!(data.city_name(), Some("Lisboa"));
    }

    #[test]
    fn test_blank_city_is_absent() {
        let data: ReverseGeocode =
            serde_json::from_value(serde_json::json!({ "city": "  ", "locality": "Oceano" }))
                .unwrap();
        assert_eq!(data.city_name(), None);
    }

    #[test]
    fn test_status_error_display() {
        assert_eq!(
            BigDataCloudError::Status(429).to_string(),
            "BigDataCloud returned status 429"
        );
    }
}
