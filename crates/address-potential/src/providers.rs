//! One capability per external lookup, and their live implementations

use async_trait::async_trait;
use bigdatacloud_client::BigDataCloudClient;
use nominatim_client::NominatimClient;
use overpass_client::OverpassClient;

use crate::poi::AmenityFeature;
use crate::population::PopulationDataset;
use crate::risk::RiskClassification;
use crate::types::Coordinates;

/// Error type shared by every capability
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// Address → coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` when the service has no match for the address
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, ProviderError>;
}

/// Coordinates → municipality name
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// `Ok(None)` when the service answers without a locality
    async fn municipality(&self, at: Coordinates) -> Result<Option<String>, ProviderError>;
}

/// Resident population reference table
#[async_trait]
pub trait PopulationSource: Send + Sync {
    async fn load(&self) -> Result<PopulationDataset, ProviderError>;
}

/// Coordinates → flood-risk classification
#[async_trait]
pub trait FloodRiskLookup: Send + Sync {
    async fn classify(&self, at: Coordinates) -> Result<RiskClassification, ProviderError>;
}

/// Amenity features within a radius
#[async_trait]
pub trait PoiSource: Send + Sync {
    async fn amenities_near(
        &self,
        at: Coordinates,
        radius_m: u32,
    ) -> Result<Vec<AmenityFeature>, ProviderError>;
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, ProviderError> {
        let results = self.search(address).await?;
        let Some(first) = results.first() else {
            return Ok(None);
        };

        match first.position() {
            Some((latitude, longitude)) => Ok(Some(Coordinates::new(latitude, longitude))),
            None => Err("first match has no usable latitude/longitude".into()),
        }
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn municipality(&self, at: Coordinates) -> Result<Option<String>, ProviderError> {
        Ok(self.reverse_geocode(at.latitude, at.longitude).await?)
    }
}

#[async_trait]
impl ReverseGeocoder for BigDataCloudClient {
    async fn municipality(&self, at: Coordinates) -> Result<Option<String>, ProviderError> {
        let data = self.reverse_geocode(at.latitude, at.longitude).await?;
        Ok(data.city_name().map(str::to_string))
    }
}

#[async_trait]
impl PoiSource for OverpassClient {
    async fn amenities_near(
        &self,
        at: Coordinates,
        radius_m: u32,
    ) -> Result<Vec<AmenityFeature>, ProviderError> {
        let elements = self
            .around("amenity", at.latitude, at.longitude, radius_m)
            .await?;

        Ok(elements
            .iter()
            .map(|element| AmenityFeature {
                name: element.tag("name").map(str::to_string),
                amenity: element.tag("amenity").map(str::to_string),
                position: element
                    .position()
                    .map(|(lat, lon)| Coordinates::new(lat, lon)),
            })
            .collect())
    }
}
