use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use tracing::{debug, warn};

use crate::error::SegurmapsError;
use crate::types::{extract_risk_index, PointGeometry};

const DEFAULT_BASE_URL: &str = "https://segurmaps.apseguradores.pt";
/// Map id of the CIRAC flood-risk layer
const DEFAULT_MAP_ID: u32 = 36;

/// Connection settings for [`SegurmapsClient`]
#[derive(Debug, Clone)]
pub struct SegurmapsOptions {
    pub base_url: String,
    pub map_id: u32,
    pub token: String,
    /// Skip TLS certificate validation; the public host has served invalid chains
    pub accept_invalid_certs: bool,
    pub timeout: Duration,
}

impl SegurmapsOptions {
    pub fn new(token: &str) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            map_id: DEFAULT_MAP_ID,
            token: token.to_string(),
            accept_invalid_certs: false,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Client for `POST /api/v2/extract`
pub struct SegurmapsClient {
    http: reqwest::Client,
    extract_url: String,
}

impl SegurmapsClient {
    pub fn new(options: &SegurmapsOptions) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", options.token))
            .map_err(|_| SegurmapsError::InvalidToken)?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if options.accept_invalid_certs {
            warn!("SegurMaps client accepts invalid TLS certificates");
        }

        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .default_headers(headers)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()?;

        Ok(Self {
            http,
            extract_url: format!(
                "{}/api/v2/extract?map_id={}",
                options.base_url.trim_end_matches('/'),
                options.map_id
            ),
        })
    }

    /// Risk index (`ridx`) at a point, `None` when the layer has no value there
    pub async fn risk_index(&self, latitude: f64, longitude: f64) -> crate::Result<Option<u8>> {
        let response = self
            .http
            .post(&self.extract_url)
            .json(&PointGeometry::new(latitude, longitude))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SegurmapsError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        let data: serde_json::Value = serde_json::from_slice(&body)?;
        let ridx = extract_risk_index(&data);

        debug!(lat = latitude, lon = longitude, ridx = ?ridx, "Extracted risk index");

        Ok(ridx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_url() {
        let mut options = SegurmapsOptions::new("token");
        options.base_url = "http://localhost:7000/".to_string();
        options.map_id = 12;
        let client = SegurmapsClient::new(&options).unwrap();
        assert_eq!(
            client.extract_url,
            "http://localhost:7000/api/v2/extract?map_id=12"
        );
    }

    #[test]
    fn test_default_options_target_cirac_layer() {
        let options = SegurmapsOptions::new("token");
        assert_eq!(options.map_id, 36);
        assert!(!options.accept_invalid_certs);
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let options = SegurmapsOptions::new("bad\ntoken");
        assert!(matches!(
            SegurmapsClient::new(&options),
            Err(SegurmapsError::InvalidToken)
        ));
    }
}
